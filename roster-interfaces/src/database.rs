//! Database repository interfaces
//!
//! Listing goes through [`QueryRepository::find`], which receives a
//! [`RecordQuery`] already validated against the record's schema. Storage
//! never sees raw sort or filter strings.

use async_trait::async_trait;
use roster_api_types::{
    Comment, CommentPatch, CommentPayload, Person, PersonPatch, PersonPayload, Vote, VotePayload,
};
use roster_query::{Page, RecordQuery};
use serde::{Deserialize, Serialize};

/// Common database error type
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("{entity} with ID {id} doesn't exist")]
    NotFound { entity: String, id: i64 },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Constraint violation: {message}")]
    Constraint { message: String },

    #[error("Internal database error: {message}")]
    Internal { message: String },
}

impl DatabaseError {
    pub fn not_found(entity: impl Into<String>, id: i64) -> Self {
        DatabaseError::NotFound {
            entity: entity.into(),
            id,
        }
    }

    pub fn constraint(message: impl Into<String>) -> Self {
        DatabaseError::Constraint {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        DatabaseError::Internal {
            message: message.into(),
        }
    }
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;

/// Base repository trait with health check capability
#[async_trait]
pub trait Repository: Send + Sync {
    /// Check if the repository is healthy and can serve requests
    async fn health_check(&self) -> DatabaseResult<()>;
}

/// Generic CRUD repository over records `T` created from payloads `N`
#[async_trait]
pub trait CrudRepository<T, N>: Repository
where
    T: Send + 'static,
    N: Send + 'static,
{
    /// Store a new record under the next free id
    async fn create(&self, new: N) -> DatabaseResult<T>;

    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<T>>;

    /// Overwrite every field of an existing record, keeping its id
    async fn replace(&self, id: i64, new: N) -> DatabaseResult<T>;

    /// Delete a record and return it as it was
    async fn delete(&self, id: i64) -> DatabaseResult<T>;

    /// Get total count of records
    async fn count(&self) -> DatabaseResult<u64>;
}

/// Repository able to execute validated list queries
#[async_trait]
pub trait QueryRepository<T: Send + 'static>: Repository {
    /// Filter, order and window the records.
    ///
    /// `Page::total` counts every record matching the predicate, ignoring
    /// the window.
    async fn find(&self, query: &RecordQuery) -> DatabaseResult<Page<T>>;
}

/// Person repository interface
#[async_trait]
pub trait PersonRepository: CrudRepository<Person, PersonPayload> + QueryRepository<Person> {
    /// Update only the fields present in `patch`
    async fn patch(&self, id: i64, patch: PersonPatch) -> DatabaseResult<Person>;
}

/// Comment repository interface
#[async_trait]
pub trait CommentRepository: CrudRepository<Comment, CommentPayload> + QueryRepository<Comment> {
    async fn patch(&self, id: i64, patch: CommentPatch) -> DatabaseResult<Comment>;

    /// Comments written by one person, with the query applied on top
    async fn find_by_user(&self, user_id: i64, query: &RecordQuery) -> DatabaseResult<Page<Comment>>;
}

/// Vote repository interface
#[async_trait]
pub trait VoteRepository: CrudRepository<Vote, VotePayload> + QueryRepository<Vote> {
    async fn find_by_comment(&self, comment_id: i64) -> DatabaseResult<Vec<Vote>>;
}

/// Number of records inserted by a seeding run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedReport {
    pub people: usize,
    pub comments: usize,
    pub votes: usize,
}

// =============================================================================
// Repository Factory
// =============================================================================

/// Factory trait for accessing repository instances
#[async_trait]
pub trait RepositoryFactory: Send + Sync {
    fn person_repository(&self) -> &dyn PersonRepository;

    fn comment_repository(&self) -> &dyn CommentRepository;

    fn vote_repository(&self) -> &dyn VoteRepository;

    /// Insert `quantity` fake people, comments and votes
    async fn seed(&self, quantity: usize) -> DatabaseResult<SeedReport>;

    /// Check health of all repositories
    async fn health_check(&self) -> DatabaseResult<()>;
}
