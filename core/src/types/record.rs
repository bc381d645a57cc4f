//! Installed application records.

use crate::types::{PropertyValue, RawValue};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

/// Bundle identifier prefix reserved for the platform vendor.
pub const SYSTEM_PREFIX: &str = "com.apple.";

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque identity of one record. Unique per process, never derived from content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AppId(u64);

impl AppId {
    fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Application as reported by the enumeration, before normalization.
#[derive(Debug, Clone)]
pub struct RawApplication {
    pub display_name: String,
    pub bundle_identifier: String,
    pub bundle_path: PathBuf,
    pub executable_path: PathBuf,
    pub entitlements: RawValue,
    pub preference_domain: String,
}

impl RawApplication {
    /// Starts a raw record with no entitlements and empty paths.
    pub fn new(display_name: impl Into<String>, bundle_identifier: impl Into<String>) -> Self {
        let bundle_identifier = bundle_identifier.into();
        Self {
            display_name: display_name.into(),
            preference_domain: bundle_identifier.clone(),
            bundle_identifier,
            bundle_path: PathBuf::new(),
            executable_path: PathBuf::new(),
            entitlements: RawValue::Dictionary(Vec::new()),
        }
    }

    pub fn with_entitlements(mut self, entitlements: impl Into<RawValue>) -> Self {
        self.entitlements = entitlements.into();
        self
    }

    pub fn with_bundle_path(mut self, bundle_path: impl Into<PathBuf>) -> Self {
        self.bundle_path = bundle_path.into();
        self
    }

    pub fn with_executable_path(mut self, executable_path: impl Into<PathBuf>) -> Self {
        self.executable_path = executable_path.into();
        self
    }
}

/// Normalized, immutable application record.
///
/// Equality and hashing use the identity token only.
#[derive(Debug, Clone)]
pub struct ApplicationRecord {
    id: AppId,
    pub display_name: String,
    pub bundle_identifier: String,
    pub bundle_path: PathBuf,
    pub executable_path: PathBuf,
    pub entitlements: PropertyValue,
    pub preference_domain: String,
}

impl ApplicationRecord {
    /// Assigns a fresh identity and normalizes the entitlements.
    pub fn from_raw(raw: RawApplication) -> Self {
        Self {
            id: AppId::next(),
            display_name: raw.display_name,
            bundle_identifier: raw.bundle_identifier,
            bundle_path: raw.bundle_path,
            executable_path: raw.executable_path,
            entitlements: PropertyValue::from_raw(raw.entitlements),
            preference_domain: raw.preference_domain,
        }
    }

    pub fn id(&self) -> AppId {
        self.id
    }

    /// Number of top-level entitlement keys.
    pub fn entitlement_count(&self) -> usize {
        self.entitlements.child_count()
    }

    pub fn is_system(&self, system_prefix: &str) -> bool {
        self.bundle_identifier.starts_with(system_prefix)
    }
}

impl PartialEq for ApplicationRecord {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ApplicationRecord {}

impl std::hash::Hash for ApplicationRecord {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Catalog facet: platform-vendor apps, everything else, or both.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFilter {
    System,
    User,
    #[default]
    All,
}

impl SourceFilter {
    pub const ALL: [SourceFilter; 3] = [SourceFilter::System, SourceFilter::User, SourceFilter::All];

    pub fn label(self) -> &'static str {
        match self {
            SourceFilter::System => "Apple Made Apps",
            SourceFilter::User => "User Installed Apps",
            SourceFilter::All => "All",
        }
    }

    pub fn admits(self, record: &ApplicationRecord, system_prefix: &str) -> bool {
        match self {
            SourceFilter::System => record.is_system(system_prefix),
            SourceFilter::User => !record.is_system(system_prefix),
            SourceFilter::All => true,
        }
    }
}

impl fmt::Display for SourceFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceFilter::System => write!(f, "system"),
            SourceFilter::User => write!(f, "user"),
            SourceFilter::All => write!(f, "all"),
        }
    }
}
