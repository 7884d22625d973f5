//! Memoized filter expression parsing
//!
//! Only the parse is cached: it is a pure function of the schema and the raw
//! expression. Query results are never cached since they depend on live
//! storage.

use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tracing::trace;

use crate::error::QueryResult;
use crate::filter::{FilterExpression, Predicate};
use crate::schema::{AttributeOptions, SchemaDescriptor};

/// Schema name, options and raw expression
type CacheKey = (&'static str, AttributeOptions, String);

/// Bounded LRU cache of validated filter expressions
pub struct ExpressionCache {
    entries: Mutex<LruCache<CacheKey, Arc<FilterExpression>>>,
}

impl ExpressionCache {
    pub const DEFAULT_CAPACITY: usize = 128;

    /// Create a cache holding up to `capacity` expressions (at least one)
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Parse and validate `raw` against the attributes `schema` exposes under
    /// `options`, reusing earlier parses.
    ///
    /// Invalid expressions are not cached.
    pub fn expression(
        &self,
        schema: &SchemaDescriptor,
        options: &AttributeOptions,
        raw: &str,
    ) -> QueryResult<Arc<FilterExpression>> {
        let key = (schema.name(), options.clone(), raw.to_string());

        if let Some(hit) = self.entries.lock().get(&key) {
            trace!(schema = schema.name(), expression = raw, "filter expression cache hit");
            return Ok(Arc::clone(hit));
        }

        let expression = FilterExpression::parse(raw);
        expression.validate_with(schema, options)?;

        let expression = Arc::new(expression);
        self.entries.lock().put(key, Arc::clone(&expression));
        Ok(expression)
    }

    /// Validated predicate for `raw` bound to `value`
    pub fn predicate(
        &self,
        schema: &SchemaDescriptor,
        options: &AttributeOptions,
        raw: &str,
        value: &str,
    ) -> QueryResult<Predicate> {
        Ok(self.expression(schema, options, raw)?.bind(value))
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl Default for ExpressionCache {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

impl std::fmt::Debug for ExpressionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpressionCache")
            .field("len", &self.len())
            .finish()
    }
}
