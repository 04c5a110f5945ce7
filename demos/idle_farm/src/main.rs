//! Idle Farm Demo
//!
//! Loads a small farm from RON content, buys a few levels, runs the live
//! tick loop, catches up the time since the last run and prints a balance
//! report for every purchase.
//!
//! Levels and the last-active time are saved to `idle_farm.db` in the
//! system temp directory, or to the path given as the first argument. Run
//! the demo twice to see offline catch-up.

use chrono::Utc;
use idleworks_analyzer::Analyzer;
use idleworks_core::{format, LedgerEvent, Model, Producer, PurchaseOutcome, Runtime, Speed};
use idleworks_db::Store;
use idleworks_script::Loader;
use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;
use tracing::info;
use tracing_subscriber::EnvFilter;

const FRAME: f64 = 1.0 / 30.0;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(true)
        .init();

    println!("=== Idleworks Idle Farm Demo ===\n");

    let mut loader = Loader::new();
    loader.load_directory(concat!(env!("CARGO_MANIFEST_DIR"), "/content"))?;
    let content = loader.finish().resolve()?;

    let save_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("idle_farm.db"));
    let mut store = Store::open(&save_path)?;
    info!(path = %save_path.display(), "Save opened");

    let mut runtime = Runtime::new(content.runtime_config())?;
    let mut model = runtime.new_model();
    content.seed_ledger(&mut model.ledger);

    let mut producers = Vec::new();
    for config in content.configs() {
        let producer = Producer::load(config.clone(), &store)?;
        producer.activate(&mut model);
        producers.push(producer);
    }

    // Offline catch-up from the previous run
    let away = store.offline_seconds(Utc::now())?;
    if away > 0.0 {
        let report = runtime.apply_offline(&mut model, away);
        println!("Welcome back! You were away for {}.", format::time(report.elapsed));
        for (kind, amount) in &report.credited {
            println!("  +{} {}", format::smart(*amount), kind.name());
        }
        println!();
    }

    let changes = Rc::new(Cell::new(0u64));
    let counter = changes.clone();
    model.ledger.subscribe(move |event| {
        if matches!(event, LedgerEvent::Changed { .. }) {
            counter.set(counter.get() + 1);
        }
    });
    runtime.on_cycle_complete(|done| {
        println!(
            "  {} finished {} cycle(s): +{} {}",
            done.key,
            done.cycles,
            format::smart(done.gained),
            done.resource.name()
        );
    });

    println!("Buying levels...");
    for producer in &mut producers {
        for _ in 0..3 {
            match producer.purchase(&mut model, &mut store)? {
                PurchaseOutcome::Purchased { level } => {
                    println!("  {} -> level {}", producer.key(), level);
                }
                PurchaseOutcome::InsufficientFunds => {
                    let price: Vec<String> = producer
                        .current_costs()
                        .iter()
                        .map(|(kind, amount)| format!("{} {}", format::smart(*amount), kind.name()))
                        .collect();
                    println!("  {} needs {} for the next level", producer.key(), price.join(" + "));
                    break;
                }
            }
        }
    }
    print_balances(&model);

    println!("\nRunning 5 seconds at normal speed...");
    run_frames(&mut runtime, &mut model, 5.0);

    println!("\nRunning 5 seconds at fast speed...");
    model.clock.set_speed(Speed::Fast);
    run_frames(&mut runtime, &mut model, 5.0);

    println!(
        "\nSimulated {} at tick {} ({} balance changes)",
        format::time(model.clock.elapsed),
        model.current_tick(),
        changes.get()
    );
    print_balances(&model);

    println!("\nProduction per second:");
    for (kind, rate) in &model.production_per_second(None) {
        println!("  {}: {}/s", kind.name(), format::smart(*rate));
    }

    for config in content.configs() {
        for cost in config.costs() {
            let report = Analyzer::new(config).analyze(&cost.resource, 50)?;
            println!("\n{}", report);
        }
    }

    store.save_last_active(Utc::now())?;
    println!("=== Progress saved to {} ===", save_path.display());
    Ok(())
}

fn run_frames(runtime: &mut Runtime, model: &mut Model, seconds: f64) {
    let frames = (seconds / FRAME).round() as u32;
    for _ in 0..frames {
        runtime.update(model, FRAME);
    }
}

fn print_balances(model: &Model) {
    println!("Balances:");
    for (kind, amount) in model.ledger.all() {
        println!("  {}: {}", kind.name(), format::smart(amount));
    }
}
