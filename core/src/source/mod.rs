//! Installed-application enumeration.
//!
//! Enumeration runs once, on its own thread, and streams every record into
//! the catalog as soon as it is normalized. The presentation side reads the
//! catalog at any time and sees whatever has arrived so far.

use crate::catalog::Ingestor;
use crate::config::SourceConfig;
use crate::error::SourceError;
use crate::types::{ApplicationRecord, RawApplication, RawValue};
use serde::Deserialize;
use std::path::PathBuf;
use std::thread::{self, JoinHandle};
use tracing::{info, warn};

/// Black-box provider of installed applications.
pub trait ApplicationSource: Send + 'static {
    /// Hands each discovered application to `sink`, in discovery order.
    fn enumerate(&mut self, sink: &mut dyn FnMut(RawApplication)) -> Result<(), SourceError>;
}

/// Fixed list of applications.
pub struct StaticSource {
    apps: Vec<RawApplication>,
}

impl StaticSource {
    pub fn new(apps: Vec<RawApplication>) -> Self {
        Self { apps }
    }
}

impl ApplicationSource for StaticSource {
    fn enumerate(&mut self, sink: &mut dyn FnMut(RawApplication)) -> Result<(), SourceError> {
        for app in self.apps.drain(..) {
            sink(app);
        }
        Ok(())
    }
}

/// Reads a JSON array of application objects.
///
/// Only `display_name` is required; `entitlements` may hold any JSON value.
pub struct JsonSource {
    path: PathBuf,
}

#[derive(Deserialize)]
struct JsonApplication {
    display_name: String,
    #[serde(default)]
    bundle_identifier: String,
    #[serde(default)]
    bundle_path: PathBuf,
    #[serde(default)]
    executable_path: PathBuf,
    #[serde(default)]
    entitlements: serde_json::Value,
    #[serde(default)]
    preference_domain: String,
}

impl From<JsonApplication> for RawApplication {
    fn from(app: JsonApplication) -> Self {
        Self {
            display_name: app.display_name,
            bundle_identifier: app.bundle_identifier,
            bundle_path: app.bundle_path,
            executable_path: app.executable_path,
            entitlements: RawValue::from(app.entitlements),
            preference_domain: app.preference_domain,
        }
    }
}

impl JsonSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ApplicationSource for JsonSource {
    fn enumerate(&mut self, sink: &mut dyn FnMut(RawApplication)) -> Result<(), SourceError> {
        let content = std::fs::read(&self.path)?;
        let apps: Vec<JsonApplication> = serde_json::from_slice(&content)?;
        for app in apps {
            sink(app.into());
        }
        Ok(())
    }
}

/// Stand-in when the platform offers no enumeration.
pub struct UnavailableSource {
    reason: String,
}

impl UnavailableSource {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl ApplicationSource for UnavailableSource {
    fn enumerate(&mut self, _sink: &mut dyn FnMut(RawApplication)) -> Result<(), SourceError> {
        Err(SourceError::Unavailable(self.reason.clone()))
    }
}

/// Picks the source named by the config.
pub fn from_config(config: &SourceConfig) -> Box<dyn ApplicationSource> {
    match &config.path {
        Some(path) => Box::new(JsonSource::new(path.clone())),
        None => Box::new(UnavailableSource::new(
            "no application enumeration on this platform",
        )),
    }
}

impl ApplicationSource for Box<dyn ApplicationSource> {
    fn enumerate(&mut self, sink: &mut dyn FnMut(RawApplication)) -> Result<(), SourceError> {
        (**self).enumerate(sink)
    }
}

/// Runs `source` to completion on the calling thread.
///
/// Returns the number of records ingested. A source failure is logged and
/// leaves whatever already arrived in the catalog.
pub fn load<S: ApplicationSource>(mut source: S, ingestor: &Ingestor) -> usize {
    info!("enumerating installed applications");
    let mut count = 0;
    let result = source.enumerate(&mut |raw| {
        ingestor.ingest(ApplicationRecord::from_raw(raw));
        count += 1;
    });

    match result {
        Ok(()) => info!(count, "application enumeration finished"),
        Err(e) => warn!(error = %e, count, "application enumeration stopped"),
    }
    count
}

/// Background enumeration started by `spawn_loader`.
pub struct Loader {
    handle: JoinHandle<usize>,
}

impl Loader {
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for enumeration to end. Returns the number of records ingested.
    pub fn join(self) -> thread::Result<usize> {
        self.handle.join()
    }
}

/// Starts enumeration on a background thread. Never blocks the caller.
pub fn spawn_loader<S: ApplicationSource>(source: S, ingestor: Ingestor) -> std::io::Result<Loader> {
    let handle = thread::Builder::new()
        .name("app-enumeration".to_string())
        .spawn(move || load(source, &ingestor))?;
    Ok(Loader { handle })
}
