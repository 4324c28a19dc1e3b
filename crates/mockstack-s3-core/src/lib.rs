//! In-memory object-storage backend.
//!
//! ```text
//! S3Backend (one per region partition)
//!        |
//!        v
//!   ResourceTable<S3Bucket>
//!        |
//!        v
//!   BTreeMap<key, S3Object>  (byte-ordered, drives listing)
//! ```

pub mod backend;
pub mod checksums;
pub mod state;

pub use backend::S3Backend;
pub use state::{ListEntry, ListResult, Owner, S3Bucket, S3Object};
