//! REST API error type and its mapping onto HTTP responses

use axum::response::{IntoResponse, Response};
use roster_interfaces::DatabaseError;
use roster_query::QueryError;
use roster_web::WebError;
use thiserror::Error;
use tracing::warn;

/// REST API specific error type
#[derive(Error, Debug)]
pub enum RestError {
    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    Web(#[from] WebError),
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;

impl RestError {
    /// The `Not Found` answer of an empty page or filter result
    pub fn empty_result() -> Self {
        RestError::NotFound("Not Found".to_string())
    }

    /// Translate into the web error that renders the response
    pub fn into_web_error(self) -> WebError {
        match self {
            RestError::NotFound(message) => WebError::not_found(message),
            RestError::Web(error) => error,
            RestError::Database(error) => match error {
                DatabaseError::NotFound { .. } => WebError::not_found(error.to_string()),
                DatabaseError::Constraint { message } => WebError::conflict(message),
                DatabaseError::Validation { message } => {
                    WebError::validation_single(None, message, "VALIDATION_ERROR".to_string())
                }
                DatabaseError::Internal { message } => WebError::internal(message),
            },
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let error = self.into_web_error();
        if error.status_code().is_client_error() {
            warn!(code = error.error_code(), "{}", error);
        }
        error.into_response()
    }
}

impl From<QueryError> for RestError {
    fn from(error: QueryError) -> Self {
        RestError::Web(error.into())
    }
}

impl From<validator::ValidationErrors> for RestError {
    fn from(errors: validator::ValidationErrors) -> Self {
        RestError::Web(errors.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_database_errors_map_to_statuses() {
        let missing = RestError::from(DatabaseError::not_found("User", 9)).into_web_error();
        assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(missing.to_string(), "User with ID 9 doesn't exist");

        let orphan = RestError::from(DatabaseError::constraint("Person with ID 9 doesn't exist")).into_web_error();
        assert_eq!(orphan.status_code(), StatusCode::CONFLICT);

        let broken = RestError::from(DatabaseError::Internal {
            message: "poisoned".to_string(),
        })
        .into_web_error();
        assert_eq!(broken.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_query_errors_are_bad_requests() {
        let error = RestError::from(QueryError::InvalidWindow { limit: 0, offset: 0 }).into_web_error();
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(error.error_code(), "INVALID_PAGINATION");
    }
}
