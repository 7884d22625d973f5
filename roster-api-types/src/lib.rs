//! Record types for the Roster API
//!
//! The same definitions are used by storage, the REST handlers and the
//! query helpers, so each record also carries its schema descriptor and
//! exposes its attributes through [`roster_query::Record`].

pub mod domain;
pub mod enums;
pub mod payloads;
pub mod text;

// Re-export main types for convenience
pub use domain::{Comment, Person, Vote, COMMENT_SCHEMA, PERSON_SCHEMA, VOTE_SCHEMA};
pub use enums::{Gender, ParseGenderError};
pub use payloads::{CommentPatch, CommentPayload, PersonPatch, PersonPayload, VotePayload};
