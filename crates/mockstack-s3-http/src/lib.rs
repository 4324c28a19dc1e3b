//! S3 wire handling for MockStack.
//!
//! - **Routing** ([`router`]): matches endpoint hosts and maps method, path,
//!   and headers to an S3 operation. Path-style and virtual-hosted-style
//!   addressing are both supported.
//! - **Request decoding** ([`request`], [`multipart`]): turns a routed request
//!   into a typed [`S3Request`](mockstack_s3_model::S3Request).
//! - **Dispatch** ([`dispatch`]): runs the request against a region's backend.
//! - **Response rendering** ([`response`], [`xml`]): status, headers, and XML
//!   documents in the provider's format.
//! - **Service** ([`service`]): the [`S3HttpService`] tying these together.
//!
//! # Architecture
//!
//! ```text
//! http::Request<Bytes>
//!   -> S3Router (host match + operation identification)
//!   -> decode_request
//!   -> RegionStore<S3Backend>::with_region -> execute
//!   -> output_to_response / error_to_response
//!   -> x-amz-request-id
//! <- http::Response<Bytes>
//! ```

// S3Error is returned by value throughout.
#![allow(clippy::result_large_err)]

pub mod dispatch;
pub mod multipart;
pub mod request;
pub mod response;
pub mod router;
pub mod service;
pub mod xml;

pub use dispatch::{S3Output, execute};
pub use router::{RoutingContext, S3Host, S3Router};
pub use service::S3HttpService;
