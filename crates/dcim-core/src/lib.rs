//! # DCIM Core
//!
//! Rack capacity and compliance risk engine for data-center asset snapshots.
//!
//! The engine answers two questions about a point-in-time asset snapshot:
//! - How full are the racks (space and power)?
//! - Which assets are aging out or come from a flagged vendor?
//!
//! ## Components
//!
//! - [`capacity`]: groups assets by rack and computes utilization
//! - [`compliance`]: flags end-of-life and vendor-risk assets
//! - [`report`]: renders both outputs into the fixed text layout
//! - [`formats`]: decodes a JSON snapshot into [`Asset`] records
//!
//! The aggregator and the classifier are independent of each other. Both take
//! the raw asset slice and a [`ReportConfig`]; neither keeps state between
//! calls.
//!
//! Note: File I/O lives in the app layer (apps/dcim-report).

pub mod asset;
pub mod capacity;
pub mod compliance;
pub mod config;
pub mod formats;
pub mod report;

pub use asset::{Asset, AssetStatus};
pub use capacity::{CapacityMetric, CapacitySummary, aggregate_capacity};
pub use compliance::{ComplianceFindings, EolRisk, VendorRisk, classify_assets};
pub use config::ReportConfig;
pub use report::{CapacityReport, render_report};

use std::fmt;
use thiserror::Error;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// A record that is missing a field or holds a value of the wrong shape.
///
/// Carries whatever could be recovered about the offending record so the
/// operator can find it in the snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedRecordError {
    /// Position of the record in the input sequence, when known.
    pub index: Option<usize>,
    /// The record's `asset_id`, when it could be read.
    pub asset_id: Option<String>,
    /// What was wrong with the record.
    pub reason: String,
}

impl MalformedRecordError {
    /// Create an error for a record with a readable `asset_id`.
    #[must_use]
    pub fn for_asset(asset_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            index: None,
            asset_id: Some(asset_id.into()),
            reason: reason.into(),
        }
    }

    /// Attach the record's position in the input sequence.
    #[must_use]
    pub fn at_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }
}

impl fmt::Display for MalformedRecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.asset_id, self.index) {
            (Some(id), Some(index)) => write!(f, "asset '{}' (record #{}): ", id, index)?,
            (Some(id), None) => write!(f, "asset '{}': ", id)?,
            (None, Some(index)) => write!(f, "record #{}: ", index)?,
            (None, None) => {}
        }
        f.write_str(&self.reason)
    }
}

impl std::error::Error for MalformedRecordError {}

/// Errors produced by the engine.
#[derive(Debug, Error)]
pub enum Error {
    /// A record could not be used. Aborts the whole run.
    #[error("malformed record: {0}")]
    MalformedRecord(#[from] MalformedRecordError),

    /// The snapshot document itself has the wrong shape.
    #[error("invalid snapshot document: {0}")]
    InvalidDocument(String),

    /// A limit or threshold cannot be used for computation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result alias used throughout the engine.
pub type Result<T> = std::result::Result<T, Error>;

// =============================================================================
// TESTS
// =============================================================================
