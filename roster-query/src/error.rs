//! Query validation errors
//!
//! Every variant describes malformed client input. Callers translate them
//! into 400-class responses; nothing here is fatal.

use thiserror::Error;

/// Result type for query validation
pub type QueryResult<T> = Result<T, QueryError>;

/// Errors raised while validating list query parameters
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Sort string is not `attribute:asc|desc` over a known attribute
    #[error("Invalid sort parameters '{raw}'. It must match attribute:order, ex: id:asc or id:desc")]
    InvalidSort { raw: String },

    /// Filter expression references an attribute outside the schema
    #[error("Invalid attribute filter '{attribute}'. Try with: {allowed}")]
    UnknownAttribute {
        schema: String,
        attribute: String,
        allowed: String,
    },

    /// Filter expression has no attribute left once the keywords are removed
    #[error("Filter expression '{raw}' does not name any attribute")]
    EmptyExpression { raw: String },

    /// Page window bounds are out of range
    #[error("Invalid values: offset(>=0) or limit(>0), got limit={limit} offset={offset}")]
    InvalidWindow { limit: i64, offset: i64 },
}

impl QueryError {
    /// Stable machine-readable code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            QueryError::InvalidSort { .. } => "INVALID_SORT",
            QueryError::UnknownAttribute { .. } => "INVALID_FILTER",
            QueryError::EmptyExpression { .. } => "INVALID_FILTER",
            QueryError::InvalidWindow { .. } => "INVALID_PAGINATION",
        }
    }
}
