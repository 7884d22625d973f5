//! # Roster Query
//!
//! Attribute-driven query helpers shared by every Roster resource. Given the
//! schema of a record type and the raw query parameters of a list request,
//! this crate produces:
//!
//! - **Sort tokens**: validated `attribute:direction` pairs (`first_name:desc` → `-first_name`)
//! - **Predicates**: boolean trees built from the `attrAndattr2Orattr3` filter DSL
//! - **Page links**: `next` / `previous` URLs for a `(limit, offset)` window
//! - **Attribute lists**: the ordered attributes of a schema, with renames, exclusions and additions
//!
//! Everything here is pure and synchronous. Executing a [`RecordQuery`]
//! against real storage is the job of the data-access layer; [`RecordQuery::apply`]
//! is the reference in-memory execution.
//!
//! ## Example
//!
//! ```rust
//! use roster_query::{build_predicate, page_links, validate_sort, SchemaDescriptor};
//!
//! static PERSON: SchemaDescriptor =
//!     SchemaDescriptor::new("Person", "id", &["first_name", "last_name", "email"]);
//!
//! let order = validate_sort(&PERSON, "first_name:desc", &[]).unwrap();
//! assert_eq!(order.to_string(), "-first_name");
//!
//! let predicate = build_predicate("first_nameOrlast_name", "john");
//! assert_eq!(predicate.attributes(), vec!["first_name", "last_name"]);
//!
//! let links = page_links("/users", 10, 5, 0);
//! assert_eq!(links.next.as_deref(), Some("/users?limit=5&offset=5"));
//! assert!(links.previous.is_none());
//! ```

pub mod cache;
pub mod error;
pub mod filter;
pub mod pagination;
pub mod query;
pub mod record;
pub mod schema;
pub mod sort;

// Re-export commonly used types and functions
pub use cache::ExpressionCache;
pub use error::{QueryError, QueryResult};
pub use filter::{
    build_predicate, parse_filter, parse_filter_with, FilterExpression, FilterTerm, Operator, Predicate,
};
pub use pagination::{page_links, PageLinks, PageWindow};
pub use query::{Page, RecordQuery};
pub use record::{AttributeValue, Record};
pub use schema::{
    attributes_of, is_attribute, is_exposed_attribute, AttributeOptions, Schema, SchemaDescriptor,
};
pub use sort::{sort_records, validate_sort, SortDirection, SortToken};
