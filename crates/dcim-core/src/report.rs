//! # Report Module
//!
//! Renders capacity and compliance results into the fixed text layout.
//!
//! Layout:
//! 1. Header: rule, title, total asset count, total power (kVA), rule
//! 2. Section 1: one row per rack, first-seen order
//! 3. Section 2a: EOL table, or a single compliance-maintained line
//! 4. Section 2b: vendor-risk table, or a single no-risky-vendor line
//! 5. Closing marker
//!
//! Rendering is a pure function of its inputs.

use crate::capacity::{CapacitySummary, aggregate_capacity};
use crate::compliance::{ComplianceFindings, classify_assets};
use crate::{Asset, ReportConfig, Result};
use serde::{Deserialize, Serialize};

const REPORT_TITLE: &str = "DCO CAPACITY AND COMPLIANCE REPORT";
const RULE_WIDTH: usize = 60;
const EOL_RULE_WIDTH: usize = 50;
const VENDOR_RULE_WIDTH: usize = 45;

/// Line emitted when no asset is past end-of-life.
pub const NO_EOL_LINE: &str = "### EOL Assets: 0 devices identified. Compliance maintained.";

/// Line emitted when no online asset comes from a critical vendor.
pub const NO_VENDOR_RISK_LINE: &str =
    "### High-Risk Vendors: No active assets from critical vendors identified.";

/// End marker of every report.
pub const END_MARKER: &str = "--- END OF REPORT ---";

// =============================================================================
// CAPACITY REPORT
// =============================================================================

/// Everything one report run computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityReport {
    /// Limits and thresholds the run used.
    pub config: ReportConfig,
    /// Rack capacity figures.
    pub capacity: CapacitySummary,
    /// EOL and vendor-risk findings.
    pub compliance: ComplianceFindings,
}

impl CapacityReport {
    /// Run the aggregator and the classifier over a snapshot.
    ///
    /// Either both succeed or the run fails as a whole.
    pub fn build(assets: &[Asset], config: &ReportConfig) -> Result<Self> {
        let capacity = aggregate_capacity(assets, config)?;
        let compliance = classify_assets(assets, config)?;
        Ok(Self {
            config: config.clone(),
            capacity,
            compliance,
        })
    }

    /// Render the report text.
    #[must_use]
    pub fn to_text(&self) -> String {
        render_report(&self.capacity, &self.compliance, &self.config)
    }
}

// =============================================================================
// RENDERING
// =============================================================================

/// Render capacity and compliance results as report text.
#[must_use]
pub fn render_report(
    capacity: &CapacitySummary,
    compliance: &ComplianceFindings,
    config: &ReportConfig,
) -> String {
    let mut lines: Vec<String> = Vec::new();

    // Header
    lines.push("=".repeat(RULE_WIDTH));
    lines.push(format!("  {}", REPORT_TITLE));
    lines.push(format!("  Total Assets Tracked: {}", capacity.total_assets));
    lines.push(format!(
        "  Total Active Power Draw: {:.2} kVA",
        capacity.total_power_watts / config.watts_per_kva
    ));
    lines.push("=".repeat(RULE_WIDTH));
    lines.push(String::from("\n"));

    // Section 1
    lines.push(String::from(
        "--- 1. RACK CAPACITY UTILIZATION (by Rack ID) ---\n",
    ));
    lines.push(format!(
        "{:<10}{:<10}{:<15}{:<12}{:<12}",
        "Rack ID", "U Used", "Power (kVA)", "U Util.", "Power Util."
    ));
    lines.push("-".repeat(RULE_WIDTH));
    for metric in &capacity.metrics {
        lines.push(format!(
            "{:<10}{:<10}{:<15}{:<12}{:<12}",
            metric.rack_id,
            metric.units_used,
            metric.power_kva_text(),
            metric.units_utilization_text(),
            metric.power_utilization_text()
        ));
    }
    lines.push(String::from("\n"));

    // Section 2
    lines.push(String::from("--- 2. COMPLIANCE & END-OF-LIFE RISKS ---\n"));

    if compliance.eol.is_empty() {
        lines.push(NO_EOL_LINE.to_string());
    } else {
        lines.push(format!(
            "### EOL Assets (Age >= {} Years): {} Devices Identified",
            threshold_text(config.eol_age_years),
            compliance.eol.len()
        ));
        lines.push(format!(
            "{:<15}{:<10}{:<10}{:<15}",
            "Asset ID", "Rack ID", "Age (Yrs)", "Status"
        ));
        lines.push("-".repeat(EOL_RULE_WIDTH));
        for risk in &compliance.eol {
            lines.push(format!(
                "{:<15}{:<10}{:<10.1}{:<15}",
                risk.asset_id, risk.rack_id, risk.age, risk.status
            ));
        }
    }
    lines.push(String::from("\n"));

    if compliance.vendor_risk.is_empty() {
        lines.push(NO_VENDOR_RISK_LINE.to_string());
    } else {
        lines.push(format!(
            "### High-Risk Vendor Assets ({}): {} Devices Identified",
            config.critical_vendors.join(", "),
            compliance.vendor_risk.len()
        ));
        lines.push(format!(
            "{:<15}{:<10}{:<10}{:<10}",
            "Asset ID", "Rack ID", "Vendor", "Age (Yrs)"
        ));
        lines.push("-".repeat(VENDOR_RULE_WIDTH));
        for risk in &compliance.vendor_risk {
            lines.push(format!(
                "{:<15}{:<10}{:<10}{:<10.1}",
                risk.asset_id, risk.rack_id, risk.vendor, risk.age
            ));
        }
    }
    lines.push(String::from("\n"));
    lines.push(END_MARKER.to_string());

    lines.join("\n")
}

/// Threshold in its shortest exact form, always with a fractional part
/// (`5.0`, `2.75`).
fn threshold_text(years: f64) -> String {
    format!("{:?}", years)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn scenario() -> Vec<Asset> {
        vec![
            Asset::new("A1", "R1", "Online", 2, 500.0, 6.0, "HP"),
            Asset::new("A2", "R1", "Offline", 4, 1000.0, 1.0, "Dell"),
        ]
    }

    #[test]
    fn scenario_renders_full_layout() {
        let report = CapacityReport::build(&scenario(), &ReportConfig::default()).unwrap();
        let expected = [
            "============================================================",
            "  DCO CAPACITY AND COMPLIANCE REPORT",
            "  Total Assets Tracked: 2",
            "  Total Active Power Draw: 0.50 kVA",
            "============================================================",
            "\n",
            "--- 1. RACK CAPACITY UTILIZATION (by Rack ID) ---\n",
            "Rack ID   U Used    Power (kVA)    U Util.     Power Util. ",
            "------------------------------------------------------------",
            "R1        2         0.50           4.8%        10.0%       ",
            "\n",
            "--- 2. COMPLIANCE & END-OF-LIFE RISKS ---\n",
            "### EOL Assets (Age >= 5.0 Years): 1 Devices Identified",
            "Asset ID       Rack ID   Age (Yrs) Status         ",
            "--------------------------------------------------",
            "A1             R1        6.0       EOL Risk       ",
            "\n",
            "### High-Risk Vendor Assets (HP, EMC): 1 Devices Identified",
            "Asset ID       Rack ID   Vendor    Age (Yrs) ",
            "---------------------------------------------",
            "A1             R1        HP        6.0       ",
            "\n",
            "--- END OF REPORT ---",
        ]
        .join("\n");

        assert_eq!(report.to_text(), expected);
    }

    #[test]
    fn empty_snapshot_renders_none_found_lines() {
        let report = CapacityReport::build(&[], &ReportConfig::default()).unwrap();
        let text = report.to_text();

        assert!(text.contains("  Total Assets Tracked: 0"));
        assert!(text.contains("  Total Active Power Draw: 0.00 kVA"));
        assert!(text.contains(NO_EOL_LINE));
        assert!(text.contains(NO_VENDOR_RISK_LINE));
        assert!(!text.contains("Devices Identified"));
        assert!(text.ends_with(END_MARKER));
    }

    #[test]
    fn empty_sections_have_no_tables() {
        let assets = vec![Asset::new("N1", "R7", "Online", 1, 100.0, 1.0, "Dell")];
        let text = CapacityReport::build(&assets, &ReportConfig::default())
            .unwrap()
            .to_text();
        assert!(!text.contains("Age (Yrs)"));
        assert!(text.contains("R7        1         0.10           2.4%        2.0%"));
    }

    #[test]
    fn custom_threshold_and_vendors_appear_in_headers() {
        let config = ReportConfig::new()
            .with_eol_age_years(2.75)
            .with_critical_vendors(["Dell", "Cisco"]);
        let assets = vec![Asset::new("D1", "R1", "Online", 1, 10.0, 3.0, "Dell")];
        let text = CapacityReport::build(&assets, &config).unwrap().to_text();
        assert!(text.contains("### EOL Assets (Age >= 2.75 Years): 1 Devices Identified"));
        assert!(text.contains("### High-Risk Vendor Assets (Dell, Cisco): 1 Devices Identified"));
    }

    #[test]
    fn over_capacity_is_rendered_unclamped() {
        let assets = vec![Asset::new("BIG", "R1", "Online", 50, 7500.0, 1.0, "Dell")];
        let text = CapacityReport::build(&assets, &ReportConfig::default())
            .unwrap()
            .to_text();
        assert!(text.contains("119.0%"));
        assert!(text.contains("150.0%"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let report = CapacityReport::build(&scenario(), &ReportConfig::default()).unwrap();
        assert_eq!(report.to_text(), report.to_text());

        let rebuilt = CapacityReport::build(&scenario(), &ReportConfig::default()).unwrap();
        assert_eq!(report.to_text(), rebuilt.to_text());
    }

    #[test]
    fn report_serializes_to_json() {
        let report = CapacityReport::build(&scenario(), &ReportConfig::default()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["capacity"]["total_assets"], 2);
        assert_eq!(json["capacity"]["metrics"][0]["rack_id"], "R1");
        assert_eq!(json["compliance"]["eol"][0]["status"], "EOL Risk");
        assert_eq!(json["config"]["critical_vendors"][1], "EMC");
    }
}
