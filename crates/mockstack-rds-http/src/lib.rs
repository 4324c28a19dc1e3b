//! RDS query-protocol handling for MockStack.
//!
//! # Architecture
//!
//! ```text
//! http::Request<Bytes>
//!   -> QueryParams (query string + form body)
//!   -> RdsRouter (host match + Action lookup)
//!   -> decode_request
//!   -> RegionStore<RdsBackend>::with_region -> execute
//!   -> {Action}Response XML / ErrorResponse XML
//!   -> x-amzn-RequestId
//! <- http::Response<Bytes>
//! ```

pub mod dispatch;
pub mod params;
pub mod request;
pub mod response;
pub mod router;
pub mod service;
pub mod xml;

pub use dispatch::{RdsOutput, execute};
pub use params::QueryParams;
pub use router::{RdsHost, RdsRouter};
pub use service::RdsHttpService;
