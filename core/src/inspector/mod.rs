//! Inspector state shared by the presentation layer.
//!
//! Owns the catalog and the tree state for the current selection. Tree state
//! (expand-set and entitlement filter) belongs to one application and is
//! reset whenever the selected record changes identity.

use crate::actions::{self, Platform};
use crate::catalog::{Catalog, Ingestor};
use crate::config::InspectorConfig;
use crate::error::{ExportError, PlatformError};
use crate::source::{self, Loader};
use crate::tree::{EntitlementNode, ExpandSet, FilterScope, build_view};
use crate::types::{AppId, ApplicationRecord, NodePath, SearchText, SourceFilter};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct Inspector {
    catalog: Catalog,
    filter_scope: FilterScope,
    tree: TreeState,
}

#[derive(Default)]
struct TreeState {
    owner: Option<AppId>,
    expanded: ExpandSet,
    query: SearchText,
}

/// Create operations.
impl Inspector {
    pub fn new(config: &InspectorConfig) -> Self {
        let config = config.with_defaults_for_invalid();
        Self {
            catalog: Catalog::new(&config.catalog),
            filter_scope: config.entitlements.filter_scope,
            tree: TreeState::default(),
        }
    }

    /// Loads config from `config_path` and starts enumerating applications
    /// in the background with the configured source.
    pub fn start(config_path: &Path) -> crate::Result<(Self, Loader)> {
        let config = InspectorConfig::load(config_path)?;
        for problem in config.validate() {
            warn!(%problem, "invalid config value replaced with default");
        }

        let inspector = Self::new(&config);
        let loader = source::spawn_loader(source::from_config(&config.source), inspector.ingestor())?;
        Ok((inspector, loader))
    }

    pub fn ingestor(&self) -> Ingestor {
        self.catalog.ingestor()
    }
}

/// Catalog operations.
impl Inspector {
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn set_source_filter(&mut self, source_filter: SourceFilter) {
        self.catalog.set_source_filter(source_filter);
    }

    pub fn set_search_query(&mut self, text: &str) {
        self.catalog.set_search_query(text);
    }

    pub fn visible_records(&self) -> Vec<Arc<ApplicationRecord>> {
        self.catalog.visible_records()
    }

    pub fn selected_record(&self) -> Option<&Arc<ApplicationRecord>> {
        self.catalog.selected_record()
    }

    /// Changes the selection. Tree state is dropped when the identity changes.
    pub fn select(&mut self, record: Option<Arc<ApplicationRecord>>) {
        let owner = record.as_ref().map(|record| record.id());
        if owner != self.tree.owner {
            debug!(?owner, "selection changed, resetting entitlement view");
            self.tree = TreeState {
                owner,
                ..TreeState::default()
            };
        }
        self.catalog.select(record);
    }
}

/// Entitlement view operations.
impl Inspector {
    pub fn filter_scope(&self) -> FilterScope {
        self.filter_scope
    }

    pub fn set_filter_scope(&mut self, scope: FilterScope) {
        self.filter_scope = scope;
    }

    pub fn set_entitlement_query(&mut self, text: &str) {
        self.tree.query = SearchText::from(text);
    }

    pub fn entitlement_query(&self) -> &SearchText {
        &self.tree.query
    }

    /// Flips a node between expanded and collapsed. Returns the new state.
    pub fn toggle(&mut self, path: &NodePath) -> bool {
        self.tree.expanded.toggle(path)
    }

    pub fn expand_set(&self) -> &ExpandSet {
        &self.tree.expanded
    }

    /// Visible nodes of the selected application's entitlements. Empty when
    /// nothing is selected.
    pub fn entitlement_view(&self) -> Vec<EntitlementNode<'_>> {
        match self.catalog.selected_record() {
            Some(record) => build_view(
                &record.entitlements,
                &self.tree.expanded,
                &self.tree.query,
                self.filter_scope,
            ),
            None => Vec::new(),
        }
    }
}

/// Actions on the selection.
impl Inspector {
    fn require_selection(&self) -> Result<&Arc<ApplicationRecord>, PlatformError> {
        self.selected_record()
            .ok_or_else(|| PlatformError::Failed("no application selected".to_string()))
    }

    /// Copies one row of the entitlement view. Unknown paths copy nothing.
    pub fn copy_entry(&self, platform: &dyn Platform, path: &NodePath) -> Result<bool, PlatformError> {
        match self.entitlement_view().iter().find(|node| &node.path == path) {
            Some(node) => actions::copy_node(platform, node).map(|()| true),
            None => Ok(false),
        }
    }

    pub fn copy_bundle_identifier(&self, platform: &dyn Platform) -> Result<(), PlatformError> {
        actions::copy_bundle_identifier(platform, self.require_selection()?)
    }

    pub fn reveal_selected(&self, platform: &dyn Platform) -> Result<(), PlatformError> {
        actions::reveal(platform, self.require_selection()?)
    }

    pub fn launch_selected(&self, platform: &dyn Platform) -> Result<(), PlatformError> {
        actions::launch(platform, self.require_selection()?)
    }

    pub fn export_selected(&self, platform: &dyn Platform) -> Result<Option<PathBuf>, ExportError> {
        actions::export_entitlements(platform, self.require_selection()?)
    }
}
