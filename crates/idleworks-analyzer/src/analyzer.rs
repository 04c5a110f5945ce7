//! ROI and payback analysis of a purchase config
//!
//! Walks the curve of one cost resource level by level and flags the
//! balance problems designers usually look for: a first level that is too
//! cheap or too expensive, a payback that is too slow or too fast, ROI
//! shrinking as the game goes on, and levels where the price exceeds what
//! one cycle produces.

use crate::{Error, Result};
use idleworks_core::{format, PurchaseCurveConfig, ResourceCost, ResourceKind};
use serde::Serialize;
use std::fmt;

/// Highest level an analysis covers
pub const MAX_ANALYZED_LEVEL: u32 = 200;

/// Traffic-light rating of a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Grade {
    Good,
    Fair,
    Poor,
}

impl Grade {
    /// ROI of 1.5x or more is good, 1x or more is fair
    pub fn for_roi(roi: f64) -> Self {
        if roi >= 1.5 {
            Grade::Good
        } else if roi >= 1.0 {
            Grade::Fair
        } else {
            Grade::Poor
        }
    }

    /// Payback of 15 s or less is good, 30 s or less is fair
    pub fn for_payback(payback: f64) -> Self {
        if payback <= 15.0 {
            Grade::Good
        } else if payback <= 30.0 {
            Grade::Fair
        } else {
            Grade::Poor
        }
    }

    fn symbol(&self) -> &'static str {
        match self {
            Grade::Good => "+",
            Grade::Fair => "~",
            Grade::Poor => "-",
        }
    }
}

/// Curve values at one level
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelRow {
    pub level: u32,
    pub cost: f64,
    pub production: f64,
    pub roi: f64,
    pub payback: f64,
    pub roi_grade: Grade,
    pub payback_grade: Grade,
}

/// Summary of ROI across the analyzed levels
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoiStats {
    pub best_level: u32,
    pub best_roi: f64,
    pub worst_level: u32,
    pub worst_roi: f64,
    pub average_roi: f64,
    /// Change from the first to the last level, in percent
    pub trend_percent: f64,
}

impl RoiStats {
    fn from_rows(rows: &[LevelRow]) -> Option<Self> {
        let first = rows.first()?;
        let last = rows.last()?;

        let mut best = first;
        let mut worst = first;
        let mut total = 0.0;
        for row in rows {
            if row.roi > best.roi {
                best = row;
            }
            if row.roi < worst.roi {
                worst = row;
            }
            total += row.roi;
        }

        let trend_percent = if first.roi > 0.0 {
            (last.roi - first.roi) / first.roi * 100.0
        } else {
            0.0
        };

        Some(Self {
            best_level: best.level,
            best_roi: best.roi,
            worst_level: worst.level,
            worst_roi: worst.roi,
            average_roi: total / rows.len() as f64,
            trend_percent,
        })
    }
}

/// A balance finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Recommendation {
    /// Level 1 ROI below 1.2x
    RoiTooLow,
    /// Level 1 ROI above 3x
    RoiTooHigh,
    /// Level 1 ROI within 1.2x to 3x
    RoiGood,
    /// Level 1 payback above 60 s
    PaybackTooSlow,
    /// Level 1 payback below 5 s
    PaybackTooFast,
    /// ROI at the last level is below level 1
    RoiDecreasing,
    /// ROI does not shrink over the analyzed levels
    RoiGrowing,
    /// Some level costs more than one cycle produces
    CostExceedsProduction,
}

impl Recommendation {
    /// Whether the finding needs attention
    pub fn is_warning(&self) -> bool {
        !matches!(self, Recommendation::RoiGood | Recommendation::RoiGrowing)
    }

    pub fn message(&self) -> &'static str {
        match self {
            Recommendation::RoiTooLow => {
                "Level 1 ROI is too low (<1.2x). Consider reducing cost or increasing production."
            }
            Recommendation::RoiTooHigh => "Level 1 ROI is very high (>3x). May be too easy.",
            Recommendation::RoiGood => "Level 1 ROI is good (1.2x-3x).",
            Recommendation::PaybackTooSlow => {
                "Level 1 payback is too long (>60s). Early game may feel slow."
            }
            Recommendation::PaybackTooFast => {
                "Level 1 payback is very short (<5s). May feel too fast."
            }
            Recommendation::RoiDecreasing => {
                "ROI is decreasing over time. Consider increasing production_multiplier relative to cost_multiplier."
            }
            Recommendation::RoiGrowing => "ROI is growing over time.",
            Recommendation::CostExceedsProduction => {
                "Cost exceeds production at some levels (ROI < 1x)."
            }
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = if self.is_warning() { "WARN" } else { "OK" };
        write!(f, "[{}] {}", tag, self.message())
    }
}

/// Full analysis of one cost resource of a config
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Analyzed action, as `category/action`
    pub action: String,
    /// Analyzed cost resource
    pub resource: String,
    pub max_level: u32,
    pub rows: Vec<LevelRow>,
    pub stats: RoiStats,
    pub recommendations: Vec<Recommendation>,
}

impl AnalysisReport {
    /// Findings that need attention
    pub fn warnings(&self) -> impl Iterator<Item = &Recommendation> {
        self.recommendations.iter().filter(|r| r.is_warning())
    }
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== ROI Analysis: {} ({}) ===", self.action, self.resource)?;
        writeln!(f, "Levels: 1 - {}", self.max_level)?;

        writeln!(f, "\nLevel data:")?;
        for row in &self.rows {
            writeln!(
                f,
                "  Lv {:>3}  cost {:>9}  prod {:>9}  roi {:>7.2}{}  pay {:>8}{}",
                row.level,
                format::smart(row.cost),
                format::smart(row.production),
                row.roi,
                row.roi_grade.symbol(),
                format::time(row.payback),
                row.payback_grade.symbol(),
            )?;
        }

        let s = &self.stats;
        writeln!(f, "\nStatistics:")?;
        writeln!(f, "  Best ROI: level {} -> {:.2}x", s.best_level, s.best_roi)?;
        writeln!(f, "  Worst ROI: level {} -> {:.2}x", s.worst_level, s.worst_roi)?;
        writeln!(f, "  Average ROI: {:.2}x", s.average_roi)?;
        let arrow = if s.trend_percent >= 0.0 { "up" } else { "down" };
        writeln!(f, "  Trend: {:.1}% {}", s.trend_percent, arrow)?;

        if !self.recommendations.is_empty() {
            writeln!(f, "\nRecommendations:")?;
            for recommendation in &self.recommendations {
                writeln!(f, "  {}", recommendation)?;
            }
        }

        Ok(())
    }
}

/// Analyzer for one purchase config
pub struct Analyzer<'a> {
    config: &'a PurchaseCurveConfig,
}

impl<'a> Analyzer<'a> {
    /// Create a new analyzer for a config
    pub fn new(config: &'a PurchaseCurveConfig) -> Self {
        Self { config }
    }

    /// Curve values of one cost resource over `start..=end`
    pub fn rows(&self, resource: &ResourceKind, start: u32, end: u32) -> Result<Vec<LevelRow>> {
        if start == 0 || start > end {
            return Err(Error::InvalidLevelRange(start, end));
        }
        let cost = self.cost_entry(resource)?;
        Ok((start..=end).map(|level| self.row(cost, level)).collect())
    }

    /// Analyze one cost resource up to `max_level` (clamped to 1..=200)
    pub fn analyze(&self, resource: &ResourceKind, max_level: u32) -> Result<AnalysisReport> {
        let max_level = max_level.clamp(1, MAX_ANALYZED_LEVEL);
        let rows = self.rows(resource, 1, max_level)?;
        let stats = RoiStats::from_rows(&rows)
            .ok_or(Error::InvalidLevelRange(1, max_level))?;
        let recommendations = recommend(&rows);

        Ok(AnalysisReport {
            action: self.config.key().to_string(),
            resource: resource.to_string(),
            max_level,
            rows,
            stats,
            recommendations,
        })
    }

    /// Analyze every cost resource of the config
    pub fn analyze_all(&self, max_level: u32) -> Result<Vec<AnalysisReport>> {
        self.config
            .costs()
            .iter()
            .map(|cost| self.analyze(&cost.resource, max_level))
            .collect()
    }

    fn cost_entry(&self, resource: &ResourceKind) -> Result<&'a ResourceCost> {
        self.config
            .cost_entry(resource)
            .ok_or_else(|| Error::UnknownResource {
                resource: resource.to_string(),
                action: self.config.key().to_string(),
            })
    }

    fn row(&self, cost: &ResourceCost, level: u32) -> LevelRow {
        let roi = self.config.roi(cost, level);
        let payback = self.config.payback_time(cost, level);
        LevelRow {
            level,
            cost: self.config.cost_for_level(cost, level),
            production: self.config.production_for_level(level),
            roi,
            payback,
            roi_grade: Grade::for_roi(roi),
            payback_grade: Grade::for_payback(payback),
        }
    }
}

fn recommend(rows: &[LevelRow]) -> Vec<Recommendation> {
    let mut out = Vec::new();
    let (Some(first), Some(last)) = (rows.first(), rows.last()) else {
        return out;
    };

    if first.roi < 1.2 {
        out.push(Recommendation::RoiTooLow);
    } else if first.roi > 3.0 {
        out.push(Recommendation::RoiTooHigh);
    } else {
        out.push(Recommendation::RoiGood);
    }

    if first.payback > 60.0 {
        out.push(Recommendation::PaybackTooSlow);
    } else if first.payback < 5.0 {
        out.push(Recommendation::PaybackTooFast);
    }

    if last.roi < first.roi {
        out.push(Recommendation::RoiDecreasing);
    } else {
        out.push(Recommendation::RoiGrowing);
    }

    if rows.iter().any(|row| row.cost > row.production) {
        out.push(Recommendation::CostExceedsProduction);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use idleworks_core::{ActionKey, CurveParams};

    fn config(gold: &ResourceKind, base_cost: f64, params: CurveParams) -> PurchaseCurveConfig {
        PurchaseCurveConfig::new(
            ActionKey::new("farm", "wheat"),
            gold.clone(),
            vec![ResourceCost::new(gold.clone(), base_cost)],
            params,
        )
        .unwrap()
    }

    #[test]
    fn test_grades() {
        assert_eq!(Grade::for_roi(1.5), Grade::Good);
        assert_eq!(Grade::for_roi(1.0), Grade::Fair);
        assert_eq!(Grade::for_roi(0.99), Grade::Poor);
        assert_eq!(Grade::for_payback(15.0), Grade::Good);
        assert_eq!(Grade::for_payback(30.0), Grade::Fair);
        assert_eq!(Grade::for_payback(30.1), Grade::Poor);
    }

    #[test]
    fn test_expensive_config_is_flagged() {
        let gold = ResourceKind::new("gold", "Gold");
        let config = config(&gold, 10.0, CurveParams::default());
        let report = Analyzer::new(&config).analyze(&gold, 50).unwrap();

        assert_eq!(report.rows.len(), 50);
        assert_eq!(report.action, "farm/wheat");
        assert!(report.recommendations.contains(&Recommendation::RoiTooLow));
        assert!(report.recommendations.contains(&Recommendation::PaybackTooSlow));
        assert!(report
            .recommendations
            .contains(&Recommendation::CostExceedsProduction));
        assert_eq!(report.rows[0].roi_grade, Grade::Poor);
    }

    #[test]
    fn test_balanced_config() {
        let gold = ResourceKind::new("gold", "Gold");
        // Level 1 price: 0.02 × 1.15 × 30 = 0.69, ROI ≈ 1.45
        let config = config(&gold, 0.02, CurveParams::default());
        let report = Analyzer::new(&config).analyze(&gold, 100).unwrap();

        assert!(report.recommendations.contains(&Recommendation::RoiGood));
        assert!(report.recommendations.contains(&Recommendation::RoiGrowing));
        assert!(!report
            .recommendations
            .contains(&Recommendation::CostExceedsProduction));
        assert_eq!(report.warnings().count(), 0);

        let stats = &report.stats;
        assert_eq!(stats.worst_level, 1);
        assert!(stats.best_roi >= stats.average_roi);
        assert!(stats.average_roi >= stats.worst_roi);
        assert!(stats.trend_percent > 0.0);
        // Early payback is floored at 15 s
        assert_eq!(report.rows[0].payback, 15.0);
    }

    #[test]
    fn test_level_range_is_clamped() {
        let gold = ResourceKind::new("gold", "Gold");
        let config = config(&gold, 10.0, CurveParams::default());
        let analyzer = Analyzer::new(&config);

        assert_eq!(analyzer.analyze(&gold, 500).unwrap().rows.len(), 200);
        assert_eq!(analyzer.analyze(&gold, 0).unwrap().rows.len(), 1);
        assert!(matches!(
            analyzer.rows(&gold, 5, 2),
            Err(Error::InvalidLevelRange(5, 2))
        ));
    }

    #[test]
    fn test_unknown_resource() {
        let gold = ResourceKind::new("gold", "Gold");
        let wood = ResourceKind::new("wood", "Wood");
        let config = config(&gold, 10.0, CurveParams::default());

        assert!(matches!(
            Analyzer::new(&config).analyze(&wood, 10),
            Err(Error::UnknownResource { .. })
        ));
        assert_eq!(Analyzer::new(&config).analyze_all(10).unwrap().len(), 1);
    }

    #[test]
    fn test_report_display() {
        let gold = ResourceKind::new("gold", "Gold");
        let config = config(&gold, 10.0, CurveParams::default());
        let text = Analyzer::new(&config).analyze(&gold, 3).unwrap().to_string();

        assert!(text.contains("ROI Analysis: farm/wheat (gold)"));
        assert!(text.contains("Lv   3"));
        assert!(text.contains("[WARN]"));
    }
}
