pub mod response;

pub use response::{accepted, created, ok, Envelope, PageResponse};
