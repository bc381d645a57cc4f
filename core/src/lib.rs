//! Installed-application entitlement inspector.
//!
//! - `catalog`: the installed-application list with facet and text filters.
//! - `tree`: the flattened, expandable view over one application's entitlements.
//! - `inspector`: the state object tying the two together for the UI.
//! - `source`, `actions`, `export`: the edges where the core meets the platform.

pub mod actions;
pub mod catalog;
pub mod config;
pub mod error;
pub mod export;
pub mod inspector;
pub mod source;
pub mod tree;
pub mod types;

pub use error::{Error, Result};
pub use inspector::Inspector;
