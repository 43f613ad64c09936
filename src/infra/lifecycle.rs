//! Process-wide teardown ordering and cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::clients::AutomationBackend;
use crate::infra::audit::AuditLog;

/// Handle to a running HTTP transport. Cloneable; closing it signals the
/// axum server's graceful shutdown.
#[derive(Clone, Default)]
pub struct HttpHandle {
    token: CancellationToken,
}

impl HttpHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn close(&self) {
        self.token.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Token the axum server awaits for graceful shutdown.
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }
}

/// Owns the process cancellation token and runs teardown in a fixed order:
/// HTTP transport, audit log, backend connection, then cancel. Step errors
/// are logged, never propagated; teardown always runs to the end.
pub struct Lifecycle {
    token: CancellationToken,
    // Written once when the HTTP transport starts serving; read thereafter.
    http: RwLock<Option<HttpHandle>>,
    audit: Arc<dyn AuditLog>,
    backend: Arc<dyn AutomationBackend>,
    finished: AtomicBool,
}

impl Lifecycle {
    pub fn new(audit: Arc<dyn AuditLog>, backend: Arc<dyn AutomationBackend>) -> Arc<Self> {
        Arc::new(Self {
            token: CancellationToken::new(),
            http: RwLock::new(None),
            audit,
            backend,
            finished: AtomicBool::new(false),
        })
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn is_shut_down(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn set_http_transport(&self, handle: HttpHandle) {
        if let Ok(mut slot) = self.http.write() {
            *slot = Some(handle);
        }
    }

    pub fn http_transport(&self) -> Option<HttpHandle> {
        self.http.read().ok().and_then(|slot| slot.clone())
    }

    /// Defer teardown so an in-flight response can reach the client first.
    pub fn schedule_shutdown(self: &Arc<Self>, delay: Duration) {
        let this = Arc::clone(self);
        tokio::spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            this.shutdown().await;
        });
    }

    /// Idempotent; the second and later calls return immediately.
    pub async fn shutdown(&self) {
        if self.finished.swap(true, Ordering::SeqCst) {
            return;
        }
        tracing::info!("shutdown: tearing down transports and collaborators");

        if let Ok(mut slot) = self.http.write() {
            if let Some(handle) = slot.take() {
                handle.close();
            }
        }
        self.audit.close();
        if let Err(e) = self.backend.close().await {
            tracing::warn!(error = %e, "backend close failed");
        }
        self.token.cancel();
    }
}
