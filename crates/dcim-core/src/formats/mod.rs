//! # Formats Module
//!
//! Snapshot decoding for asset records.
//!
//! This module contains:
//! - JSON snapshot decoding with per-record error reporting
//! - JSON encoding of asset lists (fixtures, exports)
//!
//! Note: File I/O operations remain in the app layer (apps/dcim-report).
//! This module only handles format conversion (pure transformations).

mod json;

pub use json::*;
