//! Idleworks Analyzer - balance analysis of purchase curves
//!
//! Tabulates cost, production, ROI and payback per level for one cost
//! resource of a [`PurchaseCurveConfig`](idleworks_core::PurchaseCurveConfig),
//! grades each level and derives balance recommendations.
//!
//! # Example
//!
//! ```rust
//! use idleworks_analyzer::{Analyzer, ExportFormat, Exporter};
//! use idleworks_core::{ActionKey, CurveParams, PurchaseCurveConfig, ResourceCost, ResourceKind};
//!
//! let gold = ResourceKind::new("gold", "Gold");
//! let config = PurchaseCurveConfig::new(
//!     ActionKey::new("farm", "wheat"),
//!     gold.clone(),
//!     vec![ResourceCost::new(gold.clone(), 10.0)],
//!     CurveParams::default(),
//! )?;
//!
//! let report = Analyzer::new(&config).analyze(&gold, 50)?;
//! println!("{}", report);
//!
//! let csv = Exporter::new(&report).export(ExportFormat::Csv)?;
//! assert!(csv.starts_with("level,"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod analyzer;
mod error;
mod exporter;

pub use analyzer::{
    AnalysisReport, Analyzer, Grade, LevelRow, Recommendation, RoiStats, MAX_ANALYZED_LEVEL,
};
pub use error::{Error, Result};
pub use exporter::{ExportFormat, Exporter};
