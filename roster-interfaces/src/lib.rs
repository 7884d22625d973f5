//! # Roster Interfaces
//!
//! Repository traits that separate the HTTP layer from storage. Handlers
//! depend only on these traits; `roster-storage` provides the in-memory
//! implementation and tests can supply their own.
//!
//! ## Main Interfaces
//!
//! - [`CrudRepository`] - create / read / replace / delete by id
//! - [`QueryRepository`] - execute a validated [`roster_query::RecordQuery`]
//! - [`RepositoryFactory`] - access to every repository plus a health check

pub mod database;

// Re-export commonly used types
pub use database::{
    CommentRepository, CrudRepository, DatabaseError, DatabaseResult, PersonRepository, QueryRepository, Repository,
    RepositoryFactory, SeedReport, VoteRepository,
};
