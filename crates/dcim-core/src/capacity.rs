//! # Capacity Aggregator
//!
//! Groups assets by rack and measures each rack against its space and power
//! limits.
//!
//! Only `Online` assets consume capacity. Every asset, whatever its status,
//! counts toward the total and creates its rack on first sight, so a rack
//! holding nothing but offline gear still shows up with zero utilization.
//!
//! Utilization is never clamped: an over-provisioned rack reports more than
//! 100%.

use crate::{Asset, ReportConfig, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

// =============================================================================
// RACK LEDGER
// =============================================================================

/// Running totals for one rack during a single aggregation pass.
#[derive(Debug, Clone, Default, PartialEq)]
struct RackAggregate {
    rack_id: String,
    units_used: u64,
    power_used_watts: f64,
}

/// Rack aggregates in first-seen order.
///
/// `index` maps a rack id to its slot in `racks`; iteration always follows
/// `racks`, which keeps report ordering tied to input order.
#[derive(Debug, Default)]
struct RackLedger {
    racks: Vec<RackAggregate>,
    index: BTreeMap<String, usize>,
}

impl RackLedger {
    /// Get the aggregate for a rack, creating it if this is the first sight.
    fn entry(&mut self, rack_id: &str) -> &mut RackAggregate {
        let slot = match self.index.get(rack_id) {
            Some(&slot) => slot,
            None => {
                let slot = self.racks.len();
                debug!(rack_id, slot, "tracking new rack");
                self.racks.push(RackAggregate {
                    rack_id: rack_id.to_string(),
                    ..RackAggregate::default()
                });
                self.index.insert(rack_id.to_string(), slot);
                slot
            }
        };
        &mut self.racks[slot]
    }
}

// =============================================================================
// CAPACITY METRIC
// =============================================================================

/// Finalized utilization figures for one rack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityMetric {
    /// The rack.
    pub rack_id: String,
    /// Rack units consumed by online assets.
    pub units_used: u64,
    /// Power drawn by online assets, in watts.
    pub power_used_watts: f64,
    /// Power drawn by online assets, in kVA.
    pub power_used_kva: f64,
    /// Space used as a percentage of the rack limit. Unclamped.
    pub units_utilization: f64,
    /// Power used as a percentage of the rack budget. Unclamped.
    pub power_utilization: f64,
}

impl CapacityMetric {
    fn finalize(rack: RackAggregate, config: &ReportConfig) -> Self {
        let power_used_kva = rack.power_used_watts / config.watts_per_kva;
        let power_utilization = (power_used_kva / config.max_rack_power_kva) * 100.0;
        let units_utilization = (rack.units_used as f64 / f64::from(config.max_rack_units)) * 100.0;

        Self {
            rack_id: rack.rack_id,
            units_used: rack.units_used,
            power_used_watts: rack.power_used_watts,
            power_used_kva,
            units_utilization,
            power_utilization,
        }
    }

    /// Power in kVA with two fractional digits, e.g. `0.50`.
    #[must_use]
    pub fn power_kva_text(&self) -> String {
        format!("{:.2}", self.power_used_kva)
    }

    /// Space utilization with one fractional digit, e.g. `4.8%`.
    #[must_use]
    pub fn units_utilization_text(&self) -> String {
        format!("{:.1}%", self.units_utilization)
    }

    /// Power utilization with one fractional digit, e.g. `10.0%`.
    #[must_use]
    pub fn power_utilization_text(&self) -> String {
        format!("{:.1}%", self.power_utilization)
    }

    /// Check if the rack exceeds its space or power limit.
    #[must_use]
    pub fn is_over_capacity(&self) -> bool {
        self.units_utilization > 100.0 || self.power_utilization > 100.0
    }
}

// =============================================================================
// CAPACITY SUMMARY
// =============================================================================

/// Output of one aggregation pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CapacitySummary {
    /// One metric per rack, in first-seen order.
    pub metrics: Vec<CapacityMetric>,
    /// Every asset processed, online or not.
    pub total_assets: usize,
    /// Power drawn by online assets across all racks, in watts.
    pub total_power_watts: f64,
    /// Same as `total_power_watts`, in kVA.
    pub total_power_kva: f64,
}

impl CapacitySummary {
    /// Racks running above their space or power limit.
    pub fn over_capacity(&self) -> impl Iterator<Item = &CapacityMetric> {
        self.metrics.iter().filter(|m| m.is_over_capacity())
    }

    /// Look up a rack's metric.
    #[must_use]
    pub fn rack(&self, rack_id: &str) -> Option<&CapacityMetric> {
        self.metrics.iter().find(|m| m.rack_id == rack_id)
    }
}

// =============================================================================
// AGGREGATION
// =============================================================================

/// Aggregate rack capacity over a snapshot.
///
/// Single pass over `assets`. Fails on the first malformed record or on a
/// configuration whose limits cannot be divided by; no partial summary is
/// returned.
pub fn aggregate_capacity(assets: &[Asset], config: &ReportConfig) -> Result<CapacitySummary> {
    config.validate()?;

    let mut ledger = RackLedger::default();
    for (index, asset) in assets.iter().enumerate() {
        asset.validate().map_err(|e| e.at_index(index))?;

        let rack = ledger.entry(&asset.rack_id);
        if asset.status.is_online() {
            rack.units_used = rack.units_used.saturating_add(u64::from(asset.rack_units));
            rack.power_used_watts += asset.power_watts;
        }
    }

    let mut total_power_watts = 0.0;
    let mut metrics = Vec::with_capacity(ledger.racks.len());
    for rack in ledger.racks {
        total_power_watts += rack.power_used_watts;
        metrics.push(CapacityMetric::finalize(rack, config));
    }

    debug!(
        racks = metrics.len(),
        assets = assets.len(),
        total_power_watts,
        "capacity aggregated"
    );

    Ok(CapacitySummary {
        metrics,
        total_assets: assets.len(),
        total_power_watts,
        total_power_kva: total_power_watts / config.watts_per_kva,
    })
}

// =============================================================================
// TESTS
// =============================================================================
