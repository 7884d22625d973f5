//! Repository implementations over [`crate::InMemoryStore`]

pub mod comment_repository;
pub mod person_repository;
pub mod vote_repository;

pub use comment_repository::InMemoryCommentRepository;
pub use person_repository::InMemoryPersonRepository;
pub use vote_repository::InMemoryVoteRepository;
