pub mod error;
pub mod listing;
pub mod raw;
pub mod source;

pub use error::GitError;
pub use source::{Capabilities, GitSource, ListingOptions};
