//! User actions that reach outside the core.
//!
//! None of these touch catalog or tree state; they only format text or
//! bytes and hand them to the platform.

use crate::error::{ExportError, PlatformError};
use crate::export;
use crate::tree::EntitlementNode;
use crate::types::ApplicationRecord;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Side-effecting capabilities provided by the host platform.
pub trait Platform {
    fn reveal_in_file_browser(&self, path: &Path) -> Result<(), PlatformError>;

    fn launch_application(&self, path: &Path) -> Result<(), PlatformError>;

    fn copy_to_clipboard(&self, text: &str) -> Result<(), PlatformError>;

    /// Asks the user where to save `bytes`. `Ok(None)` means the user cancelled.
    fn save_file(
        &self,
        suggested_name: &str,
        bytes: &[u8],
        allowed_formats: &[&str],
    ) -> Result<Option<PathBuf>, PlatformError>;
}

/// Copies `"<path> = <value>"` for one entitlement row.
pub fn copy_node(platform: &dyn Platform, node: &EntitlementNode<'_>) -> Result<(), PlatformError> {
    let text = node.copy_text();
    debug!(path = %node.path, "copying entitlement");
    platform.copy_to_clipboard(&text)
}

pub fn copy_bundle_identifier(
    platform: &dyn Platform,
    record: &ApplicationRecord,
) -> Result<(), PlatformError> {
    platform.copy_to_clipboard(&record.bundle_identifier)
}

pub fn reveal(platform: &dyn Platform, record: &ApplicationRecord) -> Result<(), PlatformError> {
    debug!(path = %record.bundle_path.display(), "revealing bundle");
    platform.reveal_in_file_browser(&record.bundle_path)
}

pub fn launch(platform: &dyn Platform, record: &ApplicationRecord) -> Result<(), PlatformError> {
    info!(app = %record.display_name, "launching application");
    platform.launch_application(&record.bundle_path)
}

/// Serializes the record's entitlements and hands them to the save dialog.
///
/// Returns the chosen path, or `None` if the user cancelled.
pub fn export_entitlements(
    platform: &dyn Platform,
    record: &ApplicationRecord,
) -> Result<Option<PathBuf>, ExportError> {
    let result = export::to_json_bytes(&record.entitlements).and_then(|bytes| {
        platform
            .save_file(
                &export::suggested_file_name(record),
                &bytes,
                &export::ALLOWED_FORMATS,
            )
            .map_err(ExportError::from)
    });

    match &result {
        Ok(Some(path)) => {
            info!(app = %record.display_name, path = %path.display(), "exported entitlements")
        }
        Ok(None) => debug!(app = %record.display_name, "export cancelled"),
        Err(e) => warn!(app = %record.display_name, error = %e, "failed to export entitlements"),
    }
    result
}
