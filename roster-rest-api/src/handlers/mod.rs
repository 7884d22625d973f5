pub mod comments;
pub mod health;
pub mod persons;
pub mod root;
pub mod votes;

// Re-export handler functions
pub use comments::*;
pub use health::*;
pub use persons::*;
pub use root::*;
pub use votes::*;
