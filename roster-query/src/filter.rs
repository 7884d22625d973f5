//! Filter expression parser and predicate builder
//!
//! A filter expression joins attribute names with the keywords `And` / `Or`,
//! for example `first_nameOrlast_nameAndemail`. Each attribute becomes a
//! case-insensitive "contains" test against the same value.
//!
//! Terms are folded left to right. `And` (or no keyword, for the first term)
//! starts a new top-level term. `Or` pops the most recent top-level term and
//! merges it with the new test into a disjunction, so
//! `aAndbOrc` means `a AND (b OR c)` and `aOrbAndc` means `(a OR b) AND c`.
//! There is no other precedence and no parenthesis.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{QueryError, QueryResult};
use crate::record::Record;
use crate::schema::{attributes_of, AttributeOptions, SchemaDescriptor};

static KEYWORDS: Lazy<Regex> =
    Lazy::new(|| Regex::new("And|AND|Or|OR").expect("keyword pattern is a valid regex"));

/// Boolean keyword joining two terms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    And,
    Or,
}

impl Operator {
    fn from_keyword(keyword: &str) -> Self {
        if keyword.eq_ignore_ascii_case("or") {
            Operator::Or
        } else {
            Operator::And
        }
    }
}

/// One attribute of an expression with the keyword that preceded it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilterTerm {
    /// `None` for the first term
    pub operator: Option<Operator>,
    pub attribute: String,
}

/// Parsed filter expression, independent of the value being searched for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterExpression {
    raw: String,
    terms: Vec<FilterTerm>,
}

impl FilterExpression {
    /// Tokenize `raw` on the `And` / `Or` keywords.
    ///
    /// Empty tokens (leading, trailing or doubled keywords) are skipped along
    /// with their keyword. Attributes are lower-cased.
    pub fn parse(raw: &str) -> Self {
        let mut terms = Vec::new();
        let mut preceding = None;
        let mut cursor = 0;

        for keyword in KEYWORDS.find_iter(raw) {
            push_term(&mut terms, preceding, &raw[cursor..keyword.start()]);
            preceding = Some(Operator::from_keyword(keyword.as_str()));
            cursor = keyword.end();
        }
        push_term(&mut terms, preceding, &raw[cursor..]);

        Self {
            raw: raw.to_string(),
            terms,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn terms(&self) -> &[FilterTerm] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn attributes(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(|term| term.attribute.as_str())
    }

    /// Check every term against the declared fields of `schema`.
    ///
    /// The primary key is never a valid filter target.
    pub fn validate(&self, schema: &SchemaDescriptor) -> QueryResult<()> {
        self.validate_with(schema, &AttributeOptions::default())
    }

    /// Check every term against the attributes `schema` exposes under `options`
    pub fn validate_with(&self, schema: &SchemaDescriptor, options: &AttributeOptions) -> QueryResult<()> {
        if self.terms.is_empty() {
            return Err(QueryError::EmptyExpression {
                raw: self.raw.clone(),
            });
        }

        let allowed = attributes_of(schema, options);
        let is_allowed = |name: &str| {
            let name = name.to_lowercase();
            !schema.is_primary_key(&name) && allowed.iter().any(|attribute| attribute.to_lowercase() == name)
        };

        if let Some(term) = self.terms.iter().find(|term| !is_allowed(&term.attribute)) {
            return Err(QueryError::UnknownAttribute {
                schema: schema.name().to_string(),
                attribute: term.attribute.clone(),
                allowed: allowed
                    .iter()
                    .filter(|attribute| !schema.is_primary_key(attribute))
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join(", "),
            });
        }

        Ok(())
    }

    /// Build the predicate tree testing every term against `value`
    pub fn bind(&self, value: &str) -> Predicate {
        let mut terms: Vec<Predicate> = Vec::with_capacity(self.terms.len());

        for term in &self.terms {
            let leaf = Predicate::contains(&term.attribute, value);
            match (term.operator, terms.pop()) {
                (Some(Operator::Or), Some(previous)) => terms.push(previous.or(leaf)),
                (_, previous) => {
                    terms.extend(previous);
                    terms.push(leaf);
                }
            }
        }

        Predicate::conjunction(terms)
    }
}

fn push_term(terms: &mut Vec<FilterTerm>, operator: Option<Operator>, token: &str) {
    let attribute = token.trim().to_lowercase();
    if !attribute.is_empty() {
        terms.push(FilterTerm {
            operator,
            attribute,
        });
    }
}

/// Boolean tree of containment tests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    /// Case-insensitive substring test on the stringified attribute
    Contains { attribute: String, value: String },
    /// Disjunction
    Any(Vec<Predicate>),
    /// Conjunction; an empty conjunction matches every record
    All(Vec<Predicate>),
}

impl Predicate {
    pub fn contains(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Predicate::Contains {
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    /// Fold `other` into this term as a disjunction, flattening existing groups
    pub fn or(self, other: Predicate) -> Self {
        match self {
            Predicate::Any(mut group) => {
                group.push(other);
                Predicate::Any(group)
            }
            term => Predicate::Any(vec![term, other]),
        }
    }

    /// Conjunction of `terms`, collapsed when there is a single term
    pub fn conjunction(mut terms: Vec<Predicate>) -> Self {
        if terms.len() == 1 {
            terms.remove(0)
        } else {
            Predicate::All(terms)
        }
    }

    pub fn matches<R: Record + ?Sized>(&self, record: &R) -> bool {
        match self {
            Predicate::Contains { attribute, value } => record
                .attribute(attribute)
                .filter(|found| !found.is_null())
                .map(|found| {
                    found
                        .to_string()
                        .to_lowercase()
                        .contains(&value.to_lowercase())
                })
                .unwrap_or(false),
            Predicate::Any(group) => group.iter().any(|p| p.matches(record)),
            Predicate::All(group) => group.iter().all(|p| p.matches(record)),
        }
    }

    /// Attributes tested by the leaves, left to right
    pub fn attributes(&self) -> Vec<&str> {
        let mut attributes = Vec::new();
        self.collect_attributes(&mut attributes);
        attributes
    }

    fn collect_attributes<'a>(&'a self, into: &mut Vec<&'a str>) {
        match self {
            Predicate::Contains { attribute, .. } => into.push(attribute),
            Predicate::Any(group) | Predicate::All(group) => {
                for predicate in group {
                    predicate.collect_attributes(into);
                }
            }
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Contains { attribute, value } => {
                write!(f, "{} icontains {:?}", attribute, value)
            }
            Predicate::Any(group) => {
                f.write_str("(")?;
                write_joined(f, group, "OR")?;
                f.write_str(")")
            }
            Predicate::All(group) if group.is_empty() => f.write_str("TRUE"),
            Predicate::All(group) => write_joined(f, group, "AND"),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, group: &[Predicate], keyword: &str) -> fmt::Result {
    for (index, predicate) in group.iter().enumerate() {
        if index > 0 {
            write!(f, " {} ", keyword)?;
        }
        write!(f, "{}", predicate)?;
    }
    Ok(())
}

/// Build a predicate from an expression without checking its attributes
pub fn build_predicate(raw: &str, value: &str) -> Predicate {
    FilterExpression::parse(raw).bind(value)
}

/// Build a predicate after checking every attribute against `schema`
pub fn parse_filter(schema: &SchemaDescriptor, raw: &str, value: &str) -> QueryResult<Predicate> {
    parse_filter_with(schema, &AttributeOptions::default(), raw, value)
}

/// [`parse_filter`] over the attributes `schema` exposes under `options`
pub fn parse_filter_with(
    schema: &SchemaDescriptor,
    options: &AttributeOptions,
    raw: &str,
    value: &str,
) -> QueryResult<Predicate> {
    let expression = FilterExpression::parse(raw);
    expression.validate_with(schema, options)?;
    Ok(expression.bind(value))
}
