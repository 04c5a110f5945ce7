//! Export analysis reports to various formats

use crate::analyzer::AnalysisReport;
use crate::{Error, Result};
use std::io::Write;

/// Export format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// RON format (Rust Object Notation)
    Ron,
    /// JSON format (requires serde_json feature)
    Json,
    /// CSV format (level rows only)
    Csv,
    /// Human-readable text format
    Text,
}

/// Exporter for an analysis report
pub struct Exporter<'a> {
    report: &'a AnalysisReport,
}

impl<'a> Exporter<'a> {
    /// Create a new exporter
    pub fn new(report: &'a AnalysisReport) -> Self {
        Self { report }
    }

    /// Export to a string in the specified format
    pub fn export(&self, format: ExportFormat) -> Result<String> {
        match format {
            ExportFormat::Ron => self.to_ron(),
            ExportFormat::Json => self.to_json(),
            ExportFormat::Csv => Ok(self.to_csv()),
            ExportFormat::Text => Ok(self.to_text()),
        }
    }

    /// Export to a writer
    pub fn export_to<W: Write>(&self, writer: &mut W, format: ExportFormat) -> Result<()> {
        let content = self.export(format)?;
        writer.write_all(content.as_bytes())?;
        Ok(())
    }

    pub fn to_ron(&self) -> Result<String> {
        ron::ser::to_string_pretty(self.report, ron::ser::PrettyConfig::default())
            .map_err(|e| Error::Serialization(e.to_string()))
    }

    #[cfg(feature = "serde_json")]
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self.report).map_err(|e| Error::Serialization(e.to_string()))
    }

    #[cfg(not(feature = "serde_json"))]
    pub fn to_json(&self) -> Result<String> {
        Err(Error::Export(
            "JSON export requires the 'serde_json' feature".to_string(),
        ))
    }

    /// One line per level, full precision
    pub fn to_csv(&self) -> String {
        let mut output = String::new();
        output.push_str("level,cost,production,roi,payback,roi_grade,payback_grade\n");

        for row in &self.report.rows {
            output.push_str(&format!(
                "{},{},{},{},{},{:?},{:?}\n",
                row.level,
                row.cost,
                row.production,
                row.roi,
                row.payback,
                row.roi_grade,
                row.payback_grade
            ));
        }

        output
    }

    pub fn to_text(&self) -> String {
        self.report.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Analyzer;
    use idleworks_core::{ActionKey, CurveParams, PurchaseCurveConfig, ResourceCost, ResourceKind};

    fn report() -> AnalysisReport {
        let gold = ResourceKind::new("gold", "Gold");
        let config = PurchaseCurveConfig::new(
            ActionKey::new("farm", "wheat"),
            gold.clone(),
            vec![ResourceCost::new(gold.clone(), 0.02)],
            CurveParams::default(),
        )
        .unwrap();
        Analyzer::new(&config).analyze(&gold, 5).unwrap()
    }

    #[test]
    fn test_export_ron() {
        let report = report();
        let ron = Exporter::new(&report).to_ron().unwrap();

        assert!(ron.contains("rows"));
        assert!(ron.contains("recommendations"));
        assert!(ron.contains("RoiGood"));
    }

    #[test]
    fn test_export_csv() {
        let report = report();
        let csv = Exporter::new(&report).to_csv();

        assert!(csv.starts_with("level,cost,production,roi,payback,roi_grade,payback_grade\n"));
        assert_eq!(csv.lines().count(), 6);
        assert!(csv.lines().nth(1).unwrap().starts_with("1,"));
    }

    #[test]
    fn test_export_to_writer() {
        let report = report();
        let mut buffer = Vec::new();
        Exporter::new(&report)
            .export_to(&mut buffer, ExportFormat::Text)
            .unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("=== ROI Analysis"));
    }

    #[cfg(not(feature = "serde_json"))]
    #[test]
    fn test_json_needs_feature() {
        let report = report();
        assert!(matches!(
            Exporter::new(&report).export(ExportFormat::Json),
            Err(Error::Export(_))
        ));
    }
}
