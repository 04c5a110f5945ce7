//! Tick runtime: advances active actions and credits completed cycles
//!
//! Every pass runs the same algorithm over each active action:
//!
//! 1. re-derive the cycle duration from the action's current level
//! 2. add the elapsed time to the action's timer
//! 3. if the timer reached the duration, count whole cycles by division,
//!    credit `production × global multiplier × cycles` and keep the
//!    remainder in the timer
//!
//! Live play calls [`Runtime::update`] every frame; frames are batched
//! until `tick_interval` seconds have accumulated. Offline catch-up is the
//! same pass run once with the whole offline duration, so its cost depends
//! on the number of active actions, never on how long the player was away.

use crate::config::RuntimeConfig;
use crate::error::Result;
use crate::event::{SubscriptionId, Subscribers};
use crate::grant::{Grant, GrantSet};
use crate::registry::IdleAction;
use crate::{ActionKey, Costs, Model, ResourceKind, Tick};
use tracing::{debug, info, warn};

/// An action completed one or more cycles during a pass
#[derive(Debug, Clone, PartialEq)]
pub struct CycleComplete {
    pub key: ActionKey,
    pub resource: ResourceKind,
    /// Whole cycles completed (saturates at `u64::MAX`)
    pub cycles: u64,
    /// Amount credited to the ledger
    pub gained: f64,
}

impl From<&Grant> for CycleComplete {
    fn from(grant: &Grant) -> Self {
        Self {
            key: grant.key.clone(),
            resource: grant.resource.clone(),
            cycles: grant.cycles as u64,
            gained: grant.amount,
        }
    }
}

/// Result of one live pass
#[derive(Debug, Clone, Default)]
pub struct TickReport {
    /// Tick number after the pass
    pub tick: Tick,
    /// Seconds covered by the pass
    pub elapsed: f64,
    /// Actions that completed at least one cycle
    pub completed: Vec<CycleComplete>,
    /// Total credited per resource
    pub credited: Costs,
}

/// Result of an offline catch-up
#[derive(Debug, Clone, Default)]
pub struct OfflineReport {
    /// Seconds applied
    pub elapsed: f64,
    /// Number of actions that completed at least one cycle
    pub actions: usize,
    /// Total credited per resource
    pub credited: Costs,
}

/// Drives a [`Model`] forward in time
pub struct Runtime {
    config: RuntimeConfig,
    /// Live time not yet handed to a pass
    accumulator: f64,
    cycle_handlers: Subscribers<CycleComplete>,
}

impl Runtime {
    /// Create a runtime with validated settings
    pub fn new(config: RuntimeConfig) -> Result<Self> {
        Ok(Self {
            config: config.validated()?,
            accumulator: 0.0,
            cycle_handlers: Subscribers::new(),
        })
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Live time waiting for the next pass
    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    /// Create an empty model using the configured global multiplier
    pub fn new_model(&self) -> Model {
        Model::with_multiplier(self.config.global_multiplier)
    }

    /// Register a handler for cycle completions of live passes
    pub fn on_cycle_complete(
        &mut self,
        handler: impl FnMut(&CycleComplete) + 'static,
    ) -> SubscriptionId {
        self.cycle_handlers.subscribe(handler)
    }

    /// Remove a cycle handler
    pub fn remove_handler(&mut self, id: SubscriptionId) -> bool {
        self.cycle_handlers.unsubscribe(id)
    }

    /// Feed live frame time
    ///
    /// `dt` is scaled by the clock speed and accumulated. Once the
    /// accumulated time reaches `tick_interval`, all of it is passed to
    /// one pass and the accumulator restarts from zero.
    pub fn update(&mut self, model: &mut Model, dt: f64) -> Option<TickReport> {
        if !dt.is_finite() || dt < 0.0 {
            warn!(dt, "Ignored invalid frame time");
            return None;
        }
        if model.clock.speed.is_paused() {
            return None;
        }

        self.accumulator += dt * model.clock.speed.scale();
        if self.accumulator < self.config.tick_interval {
            return None;
        }

        let elapsed = std::mem::take(&mut self.accumulator);
        Some(self.advance(model, elapsed))
    }

    /// Run one pass over every active action
    pub fn advance(&mut self, model: &mut Model, elapsed: f64) -> TickReport {
        if !elapsed.is_finite() || elapsed < 0.0 {
            warn!(elapsed, "Ignored invalid elapsed time");
            return TickReport {
                tick: model.clock.tick,
                ..TickReport::default()
            };
        }

        let grants = collect_grants(model, elapsed);
        grants.apply(&mut model.ledger);
        model.clock.advance(elapsed);

        let completed: Vec<CycleComplete> = grants.iter().map(CycleComplete::from).collect();
        for event in &completed {
            self.cycle_handlers.emit(event);
        }

        debug!(
            tick = model.clock.tick,
            elapsed,
            completed = completed.len(),
            "Pass complete"
        );
        TickReport {
            tick: model.clock.tick,
            elapsed,
            completed,
            credited: grants.totals(),
        }
    }

    /// Apply time spent away in a single pass
    ///
    /// Credits are merged per resource and added once each. No cycle
    /// handlers run. The clock speed is ignored.
    pub fn apply_offline(&mut self, model: &mut Model, elapsed: f64) -> OfflineReport {
        if !elapsed.is_finite() || elapsed < 0.0 {
            warn!(elapsed, "Ignored invalid offline time");
            return OfflineReport::default();
        }

        let grants = collect_grants(model, elapsed);
        let credited = grants.apply_merged(&mut model.ledger);
        model.clock.advance(elapsed);

        info!(
            seconds = elapsed,
            actions = grants.len(),
            resources = credited.len(),
            "Offline earnings applied"
        );
        OfflineReport {
            elapsed,
            actions: grants.len(),
            credited,
        }
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self {
            config: RuntimeConfig::default(),
            accumulator: 0.0,
            cycle_handlers: Subscribers::new(),
        }
    }
}

impl std::fmt::Debug for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime")
            .field("config", &self.config)
            .field("accumulator", &self.accumulator)
            .field("cycle_handlers", &self.cycle_handlers.len())
            .finish()
    }
}

/// Timers are left untouched when the global multiplier is unusable
fn collect_grants(model: &mut Model, elapsed: f64) -> GrantSet {
    let multiplier = model.global_multiplier;
    let mut grants = GrantSet::new();
    if !multiplier.is_finite() || multiplier < 0.0 {
        warn!(multiplier, "Skipped production with invalid global multiplier");
        return grants;
    }
    model.registry.for_each_active_mut(|action| {
        if let Some(grant) = resolve_cycles(action, elapsed, multiplier) {
            grants.push(grant);
        }
    });
    grants
}

/// Advance one action's timer and count the cycles it completed
fn resolve_cycles(action: &mut IdleAction, elapsed: f64, multiplier: f64) -> Option<Grant> {
    let duration = action.duration();
    action.timer += elapsed;
    if action.timer < duration {
        return None;
    }

    let mut cycles = (action.timer / duration).floor();
    action.timer -= cycles * duration;
    // Rounding in the division can leave the remainder a hair outside [0, duration)
    if action.timer >= duration {
        action.timer -= duration;
        cycles += 1.0;
    }
    if action.timer < 0.0 {
        action.timer = 0.0;
    }

    Some(Grant {
        key: action.key.clone(),
        resource: action.resource.clone(),
        cycles,
        amount: action.production_per_cycle(multiplier) * cycles,
    })
}
