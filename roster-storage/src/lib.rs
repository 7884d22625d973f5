//! In-memory storage for Roster
//!
//! All three tables live behind one lock so that cascading deletes and
//! foreign-key checks see a consistent view. Each repository is a cheap
//! handle onto the shared [`InMemoryStore`].

pub mod factory;
pub mod repositories;
pub mod seed;
pub mod store;

// Re-export core types for convenience
pub use factory::InMemoryRepositoryFactory;
pub use repositories::{InMemoryCommentRepository, InMemoryPersonRepository, InMemoryVoteRepository};
pub use store::InMemoryStore;
