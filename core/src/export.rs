//! Entitlement export.
//!
//! JSON is the only format: it carries all six property value variants,
//! including `null`, without loss.

use crate::error::ExportError;
use crate::types::{ApplicationRecord, PropertyValue};
use std::path::Path;
use tracing::{info, warn};

pub const EXPORT_EXTENSION: &str = "json";

/// Formats offered to the save dialog.
pub const ALLOWED_FORMATS: [&str; 1] = [EXPORT_EXTENSION];

/// `<name>-entitlements.json`, with path separators in the name replaced by `-`.
pub fn suggested_file_name(record: &ApplicationRecord) -> String {
    let name = record.display_name.replace(['/', '\\', ':'], "-");
    format!("{name}-entitlements.{EXPORT_EXTENSION}")
}

pub fn to_json_bytes(entitlements: &PropertyValue) -> Result<Vec<u8>, ExportError> {
    serde_json::to_vec_pretty(entitlements).map_err(ExportError::Serialize)
}

pub fn from_json_slice(bytes: &[u8]) -> Result<PropertyValue, ExportError> {
    serde_json::from_slice(bytes).map_err(ExportError::Parse)
}

/// Writes the record's entitlements to `path`, replacing any existing file.
pub fn write_to_path(record: &ApplicationRecord, path: &Path) -> Result<(), ExportError> {
    let result = to_json_bytes(&record.entitlements)
        .and_then(|bytes| std::fs::write(path, bytes).map_err(ExportError::from));

    match &result {
        Ok(()) => info!(app = %record.display_name, path = %path.display(), "exported entitlements"),
        Err(e) => warn!(app = %record.display_name, error = %e, "failed to export entitlements"),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RawApplication;
    use serde_json::json;

    fn make_record() -> ApplicationRecord {
        ApplicationRecord::from_raw(
            RawApplication::new("Notes", "com.apple.Notes").with_entitlements(json!({
                "com.apple.security.app-sandbox": true,
                "com.apple.developer.team-identifier": null,
                "limits": {"max": 18446744073709551615u64, "min": -12, "ratio": 0.25},
                "keychain-access-groups": ["group.a", ["nested", {}]],
            })),
        )
    }

    #[test]
    fn export_round_trips_every_variant() {
        let record = make_record();

        let bytes = to_json_bytes(&record.entitlements).unwrap();
        let parsed = from_json_slice(&bytes).unwrap();

        assert_eq!(parsed, record.entitlements);
    }

    #[test]
    fn export_suggested_file_name() {
        assert_eq!(suggested_file_name(&make_record()), "Notes-entitlements.json");
    }

    #[test]
    fn export_rejects_malformed_input() {
        let result = from_json_slice(b"{\"unterminated\": ");

        assert!(matches!(result, Err(ExportError::Parse(_))));
    }
}
