//! In-process simulation of S3 object storage and RDS database provisioning.
//!
//! Outbound calls are handed to an [`ActivationGuard`] as buffered
//! `http::Request<Bytes>` values. Calls addressed to a provider endpoint are
//! decoded, executed against per-(service, region) in-memory backends, and
//! answered in the provider's own wire format.
//!
//! ```text
//! MockAws
//!   ├── BackendRegistry
//!   │     ├── RegionStore<S3Backend>
//!   │     ├── RegionStore<RdsBackend>
//!   │     └── StaticSubnets
//!   └── Interceptor
//!         ├── S3HttpService   (s3[.<region>|-<region>].amazonaws.com, <bucket>.s3...)
//!         └── RdsHttpService  (rds[.<region>].amazonaws.com)
//! ```

mod activation;
mod error;
mod interceptor;
mod registry;

pub use activation::{ActivationGuard, MockAws};
pub use error::InterceptError;
pub use interceptor::{Interceptor, Route};
pub use registry::BackendRegistry;
