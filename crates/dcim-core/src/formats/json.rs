//! JSON snapshot format.
//!
//! A snapshot is a JSON array of asset objects:
//!
//! ```text
//! [
//!   {"asset_id": "SRV-001", "rack_id": "R01", "status": "Online",
//!    "rack_units": 2, "power_watts": 450, "asset_age_years": 3.5,
//!    "vendor": "Dell"}
//! ]
//! ```
//!
//! Elements are decoded one at a time so a bad record can be reported by
//! position and, when readable, by `asset_id`.

use crate::{Asset, Error, MalformedRecordError, Result};
use serde_json::Value;

/// Decode a JSON snapshot into validated asset records.
pub fn parse_assets_json(input: &str) -> Result<Vec<Asset>> {
    let document: Value =
        serde_json::from_str(input).map_err(|e| Error::InvalidDocument(e.to_string()))?;

    let records = match document {
        Value::Array(records) => records,
        other => {
            return Err(Error::InvalidDocument(format!(
                "expected an array of asset records, found {}",
                value_kind(&other)
            )));
        }
    };

    let mut assets = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        assets.push(decode_record(index, record)?);
    }
    Ok(assets)
}

/// Encode assets as a pretty-printed JSON snapshot.
pub fn assets_to_json(assets: &[Asset]) -> Result<String> {
    serde_json::to_string_pretty(assets).map_err(|e| Error::InvalidDocument(e.to_string()))
}

fn decode_record(index: usize, record: Value) -> std::result::Result<Asset, MalformedRecordError> {
    let asset_id = record
        .get("asset_id")
        .and_then(Value::as_str)
        .map(str::to_string);

    let asset: Asset = serde_json::from_value(record).map_err(|e| MalformedRecordError {
        index: Some(index),
        asset_id,
        reason: e.to_string(),
    })?;

    asset.validate().map_err(|e| e.at_index(index))?;
    Ok(asset)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::AssetStatus;

    const SNAPSHOT: &str = r#"[
        {"asset_id": "A1", "rack_id": "R1", "status": "Online",
         "rack_units": 2, "power_watts": 500, "asset_age_years": 6, "vendor": "HP"},
        {"asset_id": "A2", "rack_id": "R1", "status": "Offline",
         "rack_units": 4, "power_watts": 1000.5, "asset_age_years": 1.2, "vendor": "Dell"}
    ]"#;

    fn malformed(input: &str) -> MalformedRecordError {
        match parse_assets_json(input) {
            Err(Error::MalformedRecord(record)) => record,
            other => panic!("expected malformed record, got {other:?}"),
        }
    }

    #[test]
    fn parses_snapshot() {
        let assets = parse_assets_json(SNAPSHOT).unwrap();
        assert_eq!(assets.len(), 2);
        assert_eq!(assets[0].status, AssetStatus::Online);
        assert_eq!(assets[0].power_watts, 500.0);
        assert_eq!(assets[1].status, AssetStatus::Other(String::from("Offline")));
        assert_eq!(assets[1].asset_age_years, 1.2);
    }

    #[test]
    fn empty_array_is_valid() {
        assert!(parse_assets_json("[]").unwrap().is_empty());
    }

    #[test]
    fn non_array_document_is_rejected() {
        let result = parse_assets_json(r#"{"assets": []}"#);
        match result {
            Err(Error::InvalidDocument(msg)) => assert!(msg.contains("an object")),
            other => panic!("unexpected: {other:?}"),
        }
        assert!(matches!(
            parse_assets_json("not json"),
            Err(Error::InvalidDocument(_))
        ));
    }

    #[test]
    fn missing_field_reports_asset_id() {
        let err = malformed(
            r#"[{"asset_id": "A9", "rack_id": "R1", "status": "Online",
                 "rack_units": 1, "asset_age_years": 1, "vendor": "HP"}]"#,
        );
        assert_eq!(err.index, Some(0));
        assert_eq!(err.asset_id.as_deref(), Some("A9"));
        assert!(err.reason.contains("power_watts"));
    }

    #[test]
    fn wrong_shape_without_id_reports_index() {
        let err = malformed(
            r#"[
                {"asset_id": "A1", "rack_id": "R1", "status": "Online",
                 "rack_units": 1, "power_watts": 1, "asset_age_years": 1, "vendor": "HP"},
                {"rack_id": "R1", "status": "Online",
                 "rack_units": "two", "power_watts": 1, "asset_age_years": 1, "vendor": "HP"}
            ]"#,
        );
        assert_eq!(err.index, Some(1));
        assert!(err.asset_id.is_none());
    }

    #[test]
    fn negative_rack_units_are_rejected() {
        let err = malformed(
            r#"[{"asset_id": "N", "rack_id": "R1", "status": "Online",
                 "rack_units": -1, "power_watts": 1, "asset_age_years": 1, "vendor": "HP"}]"#,
        );
        assert_eq!(err.asset_id.as_deref(), Some("N"));
    }

    #[test]
    fn negative_power_is_rejected_after_decoding() {
        let err = malformed(
            r#"[{"asset_id": "P", "rack_id": "R1", "status": "Online",
                 "rack_units": 1, "power_watts": -10, "asset_age_years": 1, "vendor": "HP"}]"#,
        );
        assert_eq!(err.index, Some(0));
        assert!(err.reason.contains("power_watts"));
    }

    #[test]
    fn encoded_snapshot_decodes_to_same_assets() {
        let assets = parse_assets_json(SNAPSHOT).unwrap();
        let json = assets_to_json(&assets).unwrap();
        assert!(json.contains("\"status\": \"Offline\""));
        assert_eq!(parse_assets_json(&json).unwrap(), assets);
    }
}
