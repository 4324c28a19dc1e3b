//! Operation table, typed inputs, and wire errors for the RDS simulation.

pub mod error;
pub mod input;
pub mod operations;

pub use error::{RdsError, RdsErrorCode};
pub use input::RdsRequest;
pub use operations::RdsOperation;
