//! # Config Module
//!
//! Capacity limits and compliance thresholds for one report run.
//!
//! The configuration is an explicit value handed to the aggregator and the
//! classifier at call time. Nothing here is global, so runs with different
//! thresholds can execute side by side.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

// =============================================================================
// DEFAULTS
// =============================================================================

/// Default rack height in rack units.
pub const DEFAULT_MAX_RACK_UNITS: u32 = 42;

/// Default rack power budget in kVA.
pub const DEFAULT_MAX_RACK_POWER_KVA: f64 = 5.0;

/// Watts per kVA used for power conversion.
pub const DEFAULT_WATTS_PER_KVA: f64 = 1000.0;

/// Default age, in years, at which an asset becomes an EOL risk.
pub const DEFAULT_EOL_AGE_YEARS: f64 = 5.0;

/// Vendors flagged for elevated operational risk by default.
pub const DEFAULT_CRITICAL_VENDORS: [&str; 2] = ["HP", "EMC"];

// =============================================================================
// REPORT CONFIG
// =============================================================================

/// Limits and thresholds for a report run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Usable space per rack, in rack units.
    pub max_rack_units: u32,
    /// Power budget per rack, in kVA.
    pub max_rack_power_kva: f64,
    /// Conversion factor from watts to kVA.
    pub watts_per_kva: f64,
    /// Age at or above which an asset is an EOL risk.
    pub eol_age_years: f64,
    /// Critical vendors, in reporting order.
    pub critical_vendors: Vec<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            max_rack_units: DEFAULT_MAX_RACK_UNITS,
            max_rack_power_kva: DEFAULT_MAX_RACK_POWER_KVA,
            watts_per_kva: DEFAULT_WATTS_PER_KVA,
            eol_age_years: DEFAULT_EOL_AGE_YEARS,
            critical_vendors: DEFAULT_CRITICAL_VENDORS
                .iter()
                .map(|v| (*v).to_string())
                .collect(),
        }
    }
}

impl ReportConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the usable space per rack.
    #[must_use]
    pub fn with_max_rack_units(mut self, units: u32) -> Self {
        self.max_rack_units = units;
        self
    }

    /// Set the power budget per rack.
    #[must_use]
    pub fn with_max_rack_power_kva(mut self, kva: f64) -> Self {
        self.max_rack_power_kva = kva;
        self
    }

    /// Set the EOL age threshold.
    #[must_use]
    pub fn with_eol_age_years(mut self, years: f64) -> Self {
        self.eol_age_years = years;
        self
    }

    /// Replace the critical vendor list.
    ///
    /// Order is kept; repeated names are dropped.
    #[must_use]
    pub fn with_critical_vendors<I, S>(mut self, vendors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list: Vec<String> = Vec::new();
        for vendor in vendors {
            let vendor = vendor.into();
            if !list.contains(&vendor) {
                list.push(vendor);
            }
        }
        self.critical_vendors = list;
        self
    }

    /// Check if a vendor is on the critical list. Case-sensitive.
    #[must_use]
    pub fn is_critical_vendor(&self, vendor: &str) -> bool {
        self.critical_vendors.iter().any(|v| v == vendor)
    }

    /// Check that every limit can be divided by.
    pub fn validate(&self) -> Result<()> {
        if self.max_rack_units == 0 {
            return Err(Error::InvalidConfig(String::from(
                "max_rack_units must be greater than zero",
            )));
        }
        if !is_positive(self.max_rack_power_kva) {
            return Err(Error::InvalidConfig(format!(
                "max_rack_power_kva must be a positive number, got {}",
                self.max_rack_power_kva
            )));
        }
        if !is_positive(self.watts_per_kva) {
            return Err(Error::InvalidConfig(format!(
                "watts_per_kva must be a positive number, got {}",
                self.watts_per_kva
            )));
        }
        if !self.eol_age_years.is_finite() || self.eol_age_years < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "eol_age_years must be a non-negative number, got {}",
                self.eol_age_years
            )));
        }
        Ok(())
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

// =============================================================================
// TESTS
// =============================================================================
