//! Shared state handed to every handler
//!
//! Handlers reach storage only through the [`RepositoryFactory`] trait, so
//! tests can swap in any implementation.

use roster_interfaces::RepositoryFactory;
use roster_query::{ExpressionCache, PageWindow, Predicate, RecordQuery, Schema};
use roster_web::{FilterPath, ListDefaults, ListQuery, WebError};
use std::sync::Arc;

/// Application context containing all dependencies
#[derive(Clone)]
pub struct AppContext {
    /// Repository factory for storage operations
    pub repositories: Arc<dyn RepositoryFactory>,
    /// Parsed filter expressions, keyed by schema and raw expression
    pub filters: Arc<ExpressionCache>,
    /// Fallback `limit` and `sort` of list endpoints
    pub list_defaults: ListDefaults,
    /// Prefix the resource routes are mounted under
    pub api_prefix: String,
}

impl AppContext {
    pub fn new(repositories: Arc<dyn RepositoryFactory>) -> Self {
        Self {
            repositories,
            filters: Arc::new(ExpressionCache::default()),
            list_defaults: ListDefaults::default(),
            api_prefix: "/api/v1".to_string(),
        }
    }

    pub fn with_list_defaults(mut self, list_defaults: ListDefaults) -> Self {
        self.list_defaults = list_defaults;
        self
    }

    pub fn with_filter_cache_size(mut self, capacity: usize) -> Self {
        self.filters = Arc::new(ExpressionCache::new(capacity));
        self
    }

    /// Validated query over `R` plus the window used for the page links.
    ///
    /// Exposed names (such as `user_id` for a comment's owner) sort like
    /// declared fields.
    pub fn list_query<R: Schema>(&self, params: &ListQuery) -> Result<(RecordQuery, PageWindow), WebError> {
        let exposed = R::exposed_attributes();
        let extra: Vec<&str> = exposed.iter().map(String::as_str).collect();

        let query = params.to_record_query(R::schema(), &extra, &self.list_defaults)?;
        let window = params.window(&self.list_defaults)?;
        Ok((query, window))
    }

    /// Checked predicate of a `/filter/{attribute}/{value}` path over `R`'s exposed names
    pub fn filter_predicate<R: Schema>(&self, path: &FilterPath) -> Result<Predicate, WebError> {
        path.predicate(&self.filters, R::schema(), &R::attribute_options())
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("filters", &self.filters)
            .field("list_defaults", &self.list_defaults)
            .field("api_prefix", &self.api_prefix)
            .finish_non_exhaustive()
    }
}
