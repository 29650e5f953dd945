//! # Compliance Classifier
//!
//! Flags assets that carry lifecycle or vendor risk.
//!
//! Two independent predicates are evaluated per asset in one pass:
//! - **EOL risk**: age at or above the threshold, unless the asset is already
//!   `Decom Pending`.
//! - **Vendor risk**: vendor on the critical list and the asset is `Online`.
//!
//! An asset can land in neither list, either list, or both. Each list keeps
//! input order.

use crate::{Asset, ReportConfig, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Status label attached to every EOL finding.
pub const EOL_RISK_LABEL: &str = "EOL Risk";

/// An asset at or past end-of-life.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EolRisk {
    pub asset_id: String,
    pub rack_id: String,
    pub age: f64,
    /// Always [`EOL_RISK_LABEL`].
    pub status: String,
}

impl EolRisk {
    fn from_asset(asset: &Asset) -> Self {
        Self {
            asset_id: asset.asset_id.clone(),
            rack_id: asset.rack_id.clone(),
            age: asset.asset_age_years,
            status: EOL_RISK_LABEL.to_string(),
        }
    }
}

/// An online asset from a critical vendor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorRisk {
    pub asset_id: String,
    pub rack_id: String,
    pub vendor: String,
    pub age: f64,
}

impl VendorRisk {
    fn from_asset(asset: &Asset) -> Self {
        Self {
            asset_id: asset.asset_id.clone(),
            rack_id: asset.rack_id.clone(),
            vendor: asset.vendor.clone(),
            age: asset.asset_age_years,
        }
    }
}

/// Output of one classification pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComplianceFindings {
    /// End-of-life candidates, in input order.
    pub eol: Vec<EolRisk>,
    /// Vendor-risk candidates, in input order.
    pub vendor_risk: Vec<VendorRisk>,
}

impl ComplianceFindings {
    /// Check if nothing was flagged.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.eol.is_empty() && self.vendor_risk.is_empty()
    }
}

/// Check if an asset is an end-of-life risk.
#[must_use]
pub fn is_eol_risk(asset: &Asset, config: &ReportConfig) -> bool {
    asset.asset_age_years >= config.eol_age_years && !asset.status.is_decom_pending()
}

/// Check if an asset is an operational vendor risk.
#[must_use]
pub fn is_vendor_risk(asset: &Asset, config: &ReportConfig) -> bool {
    asset.status.is_online() && config.is_critical_vendor(&asset.vendor)
}

/// Classify every asset of a snapshot.
///
/// Fails on the first malformed record; no partial findings are returned.
pub fn classify_assets(assets: &[Asset], config: &ReportConfig) -> Result<ComplianceFindings> {
    config.validate()?;

    let mut findings = ComplianceFindings::default();
    for (index, asset) in assets.iter().enumerate() {
        asset.validate().map_err(|e| e.at_index(index))?;

        if is_eol_risk(asset, config) {
            findings.eol.push(EolRisk::from_asset(asset));
        }
        if is_vendor_risk(asset, config) {
            findings.vendor_risk.push(VendorRisk::from_asset(asset));
        }
    }

    debug!(
        eol = findings.eol.len(),
        vendor_risk = findings.vendor_risk.len(),
        "compliance classified"
    );

    Ok(findings)
}

// =============================================================================
// TESTS
// =============================================================================
