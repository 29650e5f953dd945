//! # Asset Module
//!
//! The physical-asset record as it arrives from the snapshot.
//!
//! Records are read-only to the engine. Only two status values carry
//! meaning: `"Online"` counts toward rack capacity and `"Decom Pending"`
//! exempts an asset from end-of-life flagging. Every other status string is
//! kept verbatim and treated as "not online, not decom-pending".

use crate::MalformedRecordError;
use serde::{Deserialize, Serialize};
use std::fmt;

const STATUS_ONLINE: &str = "Online";
const STATUS_DECOM_PENDING: &str = "Decom Pending";

// =============================================================================
// ASSET STATUS
// =============================================================================

/// Operational state of an asset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AssetStatus {
    /// Powered and in service. Counts toward rack capacity.
    Online,
    /// Slated for decommission. Exempt from end-of-life flagging.
    DecomPending,
    /// Any other state, kept as written in the snapshot.
    Other(String),
}

impl AssetStatus {
    /// Check if the asset counts toward capacity.
    #[must_use]
    pub fn is_online(&self) -> bool {
        matches!(self, Self::Online)
    }

    /// Check if the asset is already slated for decommission.
    #[must_use]
    pub fn is_decom_pending(&self) -> bool {
        matches!(self, Self::DecomPending)
    }

    /// The status as written in the snapshot.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Online => STATUS_ONLINE,
            Self::DecomPending => STATUS_DECOM_PENDING,
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for AssetStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            STATUS_ONLINE => Self::Online,
            STATUS_DECOM_PENDING => Self::DecomPending,
            _ => Self::Other(raw),
        }
    }
}

impl From<&str> for AssetStatus {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_string())
    }
}

impl From<AssetStatus> for String {
    fn from(status: AssetStatus) -> Self {
        match status {
            AssetStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// ASSET RECORD
// =============================================================================

/// One physical asset from the snapshot.
///
/// An asset occupies exactly one rack for the duration of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// Unique identifier.
    pub asset_id: String,
    /// Rack the asset occupies.
    pub rack_id: String,
    /// Operational state.
    pub status: AssetStatus,
    /// Vertical space consumed, in rack units.
    pub rack_units: u32,
    /// Power draw in watts.
    pub power_watts: f64,
    /// Age in years.
    pub asset_age_years: f64,
    /// Manufacturer name.
    pub vendor: String,
}

impl Asset {
    /// Create a new asset record.
    #[must_use]
    pub fn new(
        asset_id: impl Into<String>,
        rack_id: impl Into<String>,
        status: impl Into<AssetStatus>,
        rack_units: u32,
        power_watts: f64,
        asset_age_years: f64,
        vendor: impl Into<String>,
    ) -> Self {
        Self {
            asset_id: asset_id.into(),
            rack_id: rack_id.into(),
            status: status.into(),
            rack_units,
            power_watts,
            asset_age_years,
            vendor: vendor.into(),
        }
    }

    /// Check that the record can be aggregated and classified.
    ///
    /// Rejects blank identifiers and negative or non-finite measurements.
    pub fn validate(&self) -> Result<(), MalformedRecordError> {
        if self.asset_id.trim().is_empty() {
            return Err(MalformedRecordError {
                index: None,
                asset_id: None,
                reason: String::from("asset_id is empty"),
            });
        }
        if self.rack_id.trim().is_empty() {
            return Err(MalformedRecordError::for_asset(
                &self.asset_id,
                "rack_id is empty",
            ));
        }
        if !self.power_watts.is_finite() || self.power_watts < 0.0 {
            return Err(MalformedRecordError::for_asset(
                &self.asset_id,
                format!(
                    "power_watts must be a non-negative number, got {}",
                    self.power_watts
                ),
            ));
        }
        if !self.asset_age_years.is_finite() || self.asset_age_years < 0.0 {
            return Err(MalformedRecordError::for_asset(
                &self.asset_id,
                format!(
                    "asset_age_years must be a non-negative number, got {}",
                    self.asset_age_years
                ),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn server() -> Asset {
        Asset::new("SRV-1", "R1", "Online", 2, 450.0, 3.0, "Dell")
    }

    #[test]
    fn status_parses_known_values() {
        assert_eq!(AssetStatus::from("Online"), AssetStatus::Online);
        assert_eq!(AssetStatus::from("Decom Pending"), AssetStatus::DecomPending);
        assert_eq!(
            AssetStatus::from("Offline"),
            AssetStatus::Other(String::from("Offline"))
        );
    }

    #[test]
    fn status_matching_is_exact() {
        assert!(!AssetStatus::from("online").is_online());
        assert!(!AssetStatus::from("Decom pending").is_decom_pending());
    }

    #[test]
    fn other_status_keeps_raw_text() {
        let status = AssetStatus::from("Decommissioned");
        assert_eq!(status.as_str(), "Decommissioned");
        assert_eq!(String::from(status), "Decommissioned");
        assert_eq!(AssetStatus::DecomPending.to_string(), "Decom Pending");
    }

    #[test]
    fn valid_asset_passes() {
        assert!(server().validate().is_ok());
    }

    #[test]
    fn negative_power_is_rejected() {
        let mut asset = server();
        asset.power_watts = -1.0;
        let err = asset.validate().unwrap_err();
        assert_eq!(err.asset_id.as_deref(), Some("SRV-1"));
        assert!(err.reason.contains("power_watts"));
    }

    #[test]
    fn non_finite_age_is_rejected() {
        let mut asset = server();
        asset.asset_age_years = f64::NAN;
        assert!(asset.validate().is_err());
    }

    #[test]
    fn blank_ids_are_rejected() {
        let mut asset = server();
        asset.rack_id = String::from("  ");
        assert!(asset.validate().is_err());

        let mut asset = server();
        asset.asset_id = String::new();
        let err = asset.validate().unwrap_err();
        assert!(err.asset_id.is_none());
    }
}
