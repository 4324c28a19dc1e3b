//! Scoped activation of the mock.
//!
//! [`MockAws::activate`] resets all state and returns an [`ActivationGuard`];
//! calls go through [`ActivationGuard::send`] while the guard lives. Dropping
//! the guard, including during unwinding, resets state again and lets a new
//! activation start.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use bytes::Bytes;
use mockstack_core::{
    Clock, MockStackConfig, MockStackError, MockStackResult, SystemClock, UnsupportedOperation,
};
use mockstack_rds_core::StaticSubnets;
use tracing::{debug, info, warn};

use crate::error::InterceptError;
use crate::interceptor::{Interceptor, Route};
use crate::registry::BackendRegistry;

#[derive(Debug)]
struct Shared {
    registry: BackendRegistry,
    interceptor: Interceptor,
    active: AtomicBool,
}

/// An in-memory simulation of the object-storage and database providers.
///
/// # Examples
///
/// ```
/// use bytes::Bytes;
/// use mockstack::MockAws;
/// use mockstack_core::MockStackConfig;
///
/// let mock = MockAws::new(MockStackConfig::default());
/// let status = mock
///     .scoped(|guard| {
///         let req = http::Request::builder()
///             .method("PUT")
///             .uri("http://s3.amazonaws.com/foobar")
///             .body(Bytes::new())
///             .unwrap();
///         guard.send(req).map(|resp| resp.status())
///     })
///     .unwrap()
///     .unwrap();
/// assert_eq!(status, http::StatusCode::OK);
/// ```
#[derive(Debug, Clone)]
pub struct MockAws {
    shared: Arc<Shared>,
}

impl MockAws {
    /// Create a mock that stamps times from the system clock.
    #[must_use]
    pub fn new(config: MockStackConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create a mock that stamps times from `clock`.
    #[must_use]
    pub fn with_clock(config: MockStackConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            shared: Arc::new(Shared {
                registry: BackendRegistry::new(clock),
                interceptor: Interceptor::from_config(&config),
                active: AtomicBool::new(false),
            }),
        }
    }

    /// Whether an activation is live.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.shared.active.load(Ordering::Acquire)
    }

    /// Start intercepting with fresh state.
    pub fn activate(&self) -> MockStackResult<ActivationGuard> {
        if self
            .shared
            .active
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("activation requested while another is live");
            return Err(MockStackError::AlreadyActive);
        }
        self.shared.registry.reset();
        info!("mock activated");
        Ok(ActivationGuard {
            shared: Arc::clone(&self.shared),
        })
    }

    /// Run `f` inside an activation.
    pub fn scoped<T>(&self, f: impl FnOnce(&ActivationGuard) -> T) -> MockStackResult<T> {
        let guard = self.activate()?;
        Ok(f(&guard))
    }
}

/// A live activation. State is reset when this is dropped.
#[derive(Debug)]
pub struct ActivationGuard {
    shared: Arc<Shared>,
}

impl ActivationGuard {
    /// Send one call through the interceptor.
    ///
    /// The host comes from the URI authority, or else the `Host` header.
    pub fn send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>, InterceptError> {
        let host = request_host(&req).ok_or(InterceptError::MissingHost)?;
        let Some(route) = self.shared.interceptor.route(&host) else {
            debug!(host, "call not intercepted");
            return Err(InterceptError::NotIntercepted { host });
        };
        Ok(self.dispatch(&route, &req)?)
    }

    /// Dispatch along an explicit route, bypassing host matching.
    pub fn dispatch(
        &self,
        route: &Route,
        req: &http::Request<Bytes>,
    ) -> Result<http::Response<Bytes>, UnsupportedOperation> {
        self.shared
            .interceptor
            .dispatch(&self.shared.registry, route, req)
    }

    /// The subnet registry, for fixtures that create subnet groups.
    #[must_use]
    pub fn network(&self) -> &StaticSubnets {
        self.shared.registry.network()
    }

    /// Direct access to backend state.
    #[must_use]
    pub fn registry(&self) -> &BackendRegistry {
        &self.shared.registry
    }

    /// The matcher this activation routes through.
    #[must_use]
    pub fn interceptor(&self) -> &Interceptor {
        &self.shared.interceptor
    }
}

impl Drop for ActivationGuard {
    fn drop(&mut self) {
        self.shared.registry.reset();
        self.shared.active.store(false, Ordering::Release);
        info!("mock deactivated");
    }
}

fn request_host(req: &http::Request<Bytes>) -> Option<String> {
    if let Some(authority) = req.uri().authority() {
        return Some(authority.as_str().to_owned());
    }
    req.headers()
        .get(http::header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}
