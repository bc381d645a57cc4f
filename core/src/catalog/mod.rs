//! Application catalog.
//!
//! Design:
//! - The backing list is append-only and shared with the background
//!   enumeration through an `Ingestor` handle.
//! - Readers clone the list of `Arc`s under a short read lock and filter the
//!   snapshot, so a half-applied append is never observed.
//! - Facet and query compose with AND. Filtering never touches the backing
//!   list and never clears the selection.

use crate::config::CatalogConfig;
use crate::types::{AppId, ApplicationRecord, SearchText, SourceFilter};
use std::sync::{Arc, PoisonError, RwLock};

type Records = Arc<RwLock<Vec<Arc<ApplicationRecord>>>>;

/// Write handle for the enumeration task.
#[derive(Clone)]
pub struct Ingestor {
    records: Records,
}

impl Ingestor {
    /// Appends one record. Arrival order is catalog order.
    pub fn ingest(&self, record: ApplicationRecord) -> Arc<ApplicationRecord> {
        let record = Arc::new(record);
        self.records
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::clone(&record));
        record
    }
}

pub struct Catalog {
    records: Records,
    system_prefix: String,
    source_filter: SourceFilter,
    query: SearchText,
    selected: Option<Arc<ApplicationRecord>>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(&CatalogConfig::default())
    }
}

/// Create operations.
impl Catalog {
    pub fn new(config: &CatalogConfig) -> Self {
        Self {
            records: Arc::default(),
            system_prefix: config.system_prefix.clone(),
            source_filter: config.default_source,
            query: SearchText::default(),
            selected: None,
        }
    }

    /// Returns a handle that appends into this catalog from another thread.
    pub fn ingestor(&self) -> Ingestor {
        Ingestor {
            records: Arc::clone(&self.records),
        }
    }
}

/// Mutation operations.
impl Catalog {
    pub fn ingest(&self, record: ApplicationRecord) -> Arc<ApplicationRecord> {
        self.ingestor().ingest(record)
    }

    pub fn set_source_filter(&mut self, source_filter: SourceFilter) {
        self.source_filter = source_filter;
    }

    pub fn set_search_query(&mut self, text: &str) {
        self.query = SearchText::from(text);
    }

    /// Sets or clears the selection. The record need not be visible.
    pub fn select(&mut self, record: Option<Arc<ApplicationRecord>>) {
        self.selected = record;
    }
}

/// Query operations.
impl Catalog {
    pub fn source_filter(&self) -> SourceFilter {
        self.source_filter
    }

    pub fn search_query(&self) -> &SearchText {
        &self.query
    }

    pub fn system_prefix(&self) -> &str {
        &self.system_prefix
    }

    pub fn selected_record(&self) -> Option<&Arc<ApplicationRecord>> {
        self.selected.as_ref()
    }

    /// Total number of ingested records, regardless of filters.
    pub fn len(&self) -> usize {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Point-in-time copy of every ingested record, in arrival order.
    pub fn snapshot(&self) -> Vec<Arc<ApplicationRecord>> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn find(&self, id: AppId) -> Option<Arc<ApplicationRecord>> {
        self.snapshot().into_iter().find(|record| record.id() == id)
    }

    /// Records passing the active facet and query, in catalog order.
    pub fn visible_records(&self) -> Vec<Arc<ApplicationRecord>> {
        self.snapshot()
            .into_iter()
            .filter(|record| self.is_visible(record))
            .collect()
    }

    pub fn is_visible(&self, record: &ApplicationRecord) -> bool {
        self.source_filter.admits(record, &self.system_prefix)
            && (self.query.matches(&record.display_name)
                || self.query.matches(&record.bundle_identifier))
    }
}
