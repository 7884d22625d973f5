//! Sort specification parsing and validation

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::error::{QueryError, QueryResult};
use crate::record::Record;
use crate::schema::{is_attribute, SchemaDescriptor};

/// Direction of a sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Map a direction token (`asc` / `desc`, any case)
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_lowercase().as_str() {
            "asc" => Some(SortDirection::Ascending),
            "desc" => Some(SortDirection::Descending),
            _ => None,
        }
    }

    /// Prefix marking the direction in an order token
    pub fn prefix(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "",
            SortDirection::Descending => "-",
        }
    }

    pub fn as_token(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

/// Validated sort key and direction.
///
/// Displays as the order token handed to the data-access layer:
/// `first_name` for ascending, `-first_name` for descending.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SortToken {
    attribute: String,
    direction: SortDirection,
}

impl SortToken {
    pub fn new(attribute: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            attribute: attribute.into(),
            direction,
        }
    }

    pub fn ascending(attribute: impl Into<String>) -> Self {
        Self::new(attribute, SortDirection::Ascending)
    }

    /// Ascending order on the primary key
    pub fn by_primary_key(schema: &SchemaDescriptor) -> Self {
        Self::ascending(schema.primary_key())
    }

    /// Parse `attribute:direction` against `schema`.
    ///
    /// The valid attributes are the declared fields, the primary key and any
    /// `extra` attributes an endpoint exposes (computed or renamed fields).
    /// Attribute and direction are compared lower-cased.
    pub fn parse(schema: &SchemaDescriptor, raw: &str, extra: &[&str]) -> QueryResult<Self> {
        let invalid = || QueryError::InvalidSort {
            raw: raw.to_string(),
        };

        let (attribute, direction) = raw.split_once(':').ok_or_else(invalid)?;
        if direction.contains(':') {
            return Err(invalid());
        }

        let attribute = attribute.to_lowercase();
        let direction = SortDirection::from_token(direction).ok_or_else(invalid)?;

        if attribute.is_empty() || !is_sortable(schema, &attribute, extra) {
            return Err(invalid());
        }

        Ok(Self {
            attribute,
            direction,
        })
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    pub fn is_descending(&self) -> bool {
        self.direction == SortDirection::Descending
    }

    /// Compare two records on this token's attribute and direction
    pub fn compare<R: Record + ?Sized>(&self, left: &R, right: &R) -> Ordering {
        let ordering = left
            .attribute(&self.attribute)
            .cmp(&right.attribute(&self.attribute));
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

impl fmt::Display for SortToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.direction.prefix(), self.attribute)
    }
}

/// Validate a raw sort string; `None` is the "no valid order" sentinel
pub fn validate_sort(schema: &SchemaDescriptor, raw: &str, extra: &[&str]) -> Option<SortToken> {
    SortToken::parse(schema, raw, extra).ok()
}

/// Stable in-place sort of `records` by `token`
pub fn sort_records<R: Record>(records: &mut [R], token: &SortToken) {
    records.sort_by(|left, right| token.compare(left, right));
}

fn is_sortable(schema: &SchemaDescriptor, attribute: &str, extra: &[&str]) -> bool {
    schema.is_primary_key(attribute)
        || is_attribute(schema, attribute)
        || extra.iter().any(|name| name.to_lowercase() == attribute)
}
