use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use serde::{Deserialize, Serialize};

use roster_query::{AttributeOptions, ExpressionCache, Predicate, SchemaDescriptor};

use crate::errors::WebError;

/// `/filter/{attribute}/{value}` segments of a filter endpoint.
///
/// `attribute` is a filter expression such as `first_nameOrlast_name`;
/// `value` is the substring every term is matched against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterPath {
    pub attribute: String,
    pub value: String,
}

impl FilterPath {
    /// Checked predicate for this path, parsed through `cache`.
    ///
    /// Attributes are checked against the names `schema` exposes under `options`.
    pub fn predicate(
        &self,
        cache: &ExpressionCache,
        schema: &SchemaDescriptor,
        options: &AttributeOptions,
    ) -> Result<Predicate, WebError> {
        Ok(cache.predicate(schema, options, &self.attribute, &self.value)?)
    }
}

impl<S> FromRequestParts<S> for FilterPath
where
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(path) = Path::<FilterPath>::from_request_parts(parts, state).await?;
        Ok(path)
    }
}

/// Single numeric `{id}` segment of a record route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdPath(pub i64);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state).await?;
        Ok(IdPath(id))
    }
}
