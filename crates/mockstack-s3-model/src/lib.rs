//! Operation table, typed inputs, and wire errors for the S3 simulation.

pub mod error;
pub mod input;
pub mod operations;

pub use error::{S3Error, S3ErrorCode};
pub use input::S3Request;
pub use operations::S3Operation;
