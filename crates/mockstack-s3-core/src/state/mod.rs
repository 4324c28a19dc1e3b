//! Bucket and object state.

mod bucket;
mod listing;
mod object;

pub use bucket::S3Bucket;
pub use listing::{ListEntry, ListResult, list_objects};
pub use object::{Owner, S3Object};
