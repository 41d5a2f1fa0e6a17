//! Per-session request serialization.
//!
//! Some clients fire overlapping requests on one session and expect them
//! to observe each other's effects in order. This filter holds a lock per
//! session key for the duration of the downstream chain, so requests on
//! the same session run one at a time while different sessions proceed in
//! parallel.

use std::collections::HashMap;
use std::sync::Arc;

use salvo::Depot;
use tokio::sync::{Mutex, OwnedMutexGuard};

use quiver_core::config::SessionConfig;

/// Middleware that serializes requests sharing a session key.
///
/// The key comes from the configured session cookie when present, then
/// the configured session header, then the peer address.
pub struct SessionSerializeFilter {
    config: SessionConfig,
    locks: Arc<Mutex<HashMap<String, Arc<Mutex<()>>>>>,
}

impl SessionSerializeFilter {
    /// Creates the filter from session settings.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Derives the serialization key for a request.
    fn session_key(&self, req: &salvo::Request) -> String {
        if let Some(cookie) = req.cookie(&self.config.cookie_name) {
            return format!("cookie:{}", cookie.value());
        }
        if let Some(value) = req
            .headers()
            .get(self.config.header_name.as_str())
            .and_then(|v| v.to_str().ok())
        {
            return format!("header:{value}");
        }
        format!("addr:{}", req.remote_addr())
    }

    /// Acquires the lock for a session key, creating it on first use.
    async fn acquire(&self, key: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            Arc::clone(locks.entry(key.to_string()).or_default())
        };
        lock.lock_owned().await
    }

    /// Drops a session's lock entry once nothing else holds it.
    async fn release(&self, key: &str) {
        let mut locks = self.locks.lock().await;
        if let Some(entry) = locks.get(key)
            && Arc::strong_count(entry) == 1
        {
            locks.remove(key);
        }
    }
}

/// ## Summary
/// Serialization middleware: runs the rest of the chain while holding the
/// per-session lock, so concurrent requests on the same session execute
/// sequentially.
///
/// ## Side Effects
/// Maintains a shared map of session locks; entries are removed once no
/// request holds or waits on them.
#[salvo::async_trait]
impl salvo::Handler for SessionSerializeFilter {
    #[tracing::instrument(skip(self, req, depot, res, ctrl), fields(
        method = %req.method(),
        path = %req.uri().path()
    ))]
    async fn handle(
        &self,
        req: &mut salvo::Request,
        depot: &mut Depot,
        res: &mut salvo::Response,
        ctrl: &mut salvo::FlowCtrl,
    ) {
        if !self.config.enabled {
            return;
        }

        let key = self.session_key(req);
        tracing::trace!(session = %key, "Waiting for session lock");
        let guard = self.acquire(&key).await;
        tracing::trace!(session = %key, "Session lock acquired");

        ctrl.call_next(req, depot, res).await;

        drop(guard);
        self.release(&key).await;
    }
}
