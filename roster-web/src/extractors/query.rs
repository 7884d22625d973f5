use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::{Deserialize, Serialize};

use roster_query::{PageWindow, RecordQuery, SchemaDescriptor, SortToken};

use crate::errors::WebError;

/// Fallbacks applied when a list request omits `limit` or `sort`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListDefaults {
    pub limit: i64,
    pub sort: String,
}

impl Default for ListDefaults {
    fn default() -> Self {
        Self {
            limit: 20,
            sort: "id:asc".to_string(),
        }
    }
}

/// `?limit=&offset=&sort=` of a list endpoint.
///
/// `limit` and `offset` are signed so that negative values reach window
/// validation instead of failing deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub sort: Option<String>,
}

impl ListQuery {
    /// Validated sort token; `extra` names computed attributes that may also be sorted on
    pub fn order(
        &self,
        schema: &SchemaDescriptor,
        extra: &[&str],
        defaults: &ListDefaults,
    ) -> Result<SortToken, WebError> {
        let raw = self.sort.as_deref().unwrap_or(&defaults.sort);
        Ok(SortToken::parse(schema, raw, extra)?)
    }

    pub fn window(&self, defaults: &ListDefaults) -> Result<PageWindow, WebError> {
        let limit = self.limit.unwrap_or(defaults.limit);
        let offset = self.offset.unwrap_or(0);
        Ok(PageWindow::new(limit, offset)?)
    }

    /// Sort first, then window, so a bad sort wins over a bad window
    pub fn to_record_query(
        &self,
        schema: &SchemaDescriptor,
        extra: &[&str],
        defaults: &ListDefaults,
    ) -> Result<RecordQuery, WebError> {
        let order = self.order(schema, extra, defaults)?;
        let window = self.window(defaults)?;
        Ok(RecordQuery::ordered_by(order).paged(window))
    }
}

/// Extracts [`ListQuery`] and answers malformed parameters with a JSON 400
#[derive(Debug, Clone)]
pub struct ListParams(pub ListQuery);

impl<S> FromRequestParts<S> for ListParams
where
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<ListQuery>::from_request_parts(parts, state).await?;
        Ok(ListParams(query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    static PERSON: SchemaDescriptor = SchemaDescriptor::new("Person", "id", &["first_name", "email"]);

    async fn extract(uri: &str) -> Result<ListQuery, WebError> {
        let request = Request::builder().uri(uri).body(()).unwrap();
        let (mut parts, _) = request.into_parts();
        ListParams::from_request_parts(&mut parts, &()).await.map(|ListParams(q)| q)
    }

    #[tokio::test]
    async fn test_defaults_apply() {
        let query = extract("/users").await.unwrap();
        let defaults = ListDefaults::default();

        let window = query.window(&defaults).unwrap();
        assert_eq!((window.limit(), window.offset()), (20, 0));
        assert_eq!(query.order(&PERSON, &[], &defaults).unwrap().to_string(), "id");
    }

    #[tokio::test]
    async fn test_negative_values_reach_validation() {
        let query = extract("/users?limit=-1&offset=0").await.unwrap();
        assert_eq!(query.limit, Some(-1));

        let error = query.window(&ListDefaults::default()).unwrap_err();
        assert_eq!(error.error_code(), "INVALID_PAGINATION");
        assert!(error.to_string().starts_with("Invalid values: offset(>=0) or limit(>0)"));
    }

    #[tokio::test]
    async fn test_sort_checked_before_window() {
        let query = extract("/users?limit=0&sort=height:asc").await.unwrap();
        let error = query
            .to_record_query(&PERSON, &[], &ListDefaults::default())
            .unwrap_err();
        assert_eq!(error.error_code(), "INVALID_SORT");
    }

    #[tokio::test]
    async fn test_non_numeric_limit_is_bad_request() {
        let error = extract("/users?limit=ten").await.unwrap_err();
        assert_eq!(error.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }
}
