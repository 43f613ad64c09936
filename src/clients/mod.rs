//! Clients for the remote automation backend.

pub mod automaton;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde_json::Value as J;
use thiserror::Error;

use crate::domain::DisplaySnapshot;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("backend unreachable: {0}")]
    Transport(String),
    #[error("backend status {0}")]
    Status(u16),
    #[error("backend payload: {0}")]
    Decode(String),
    #[error("{0}")]
    Other(String),
}

/// Boundary to the automation service. Tool handlers send one command per
/// invocation; `initialize` fetches the display snapshot through the same
/// seam so tests can fake the whole backend with a closure.
#[async_trait::async_trait]
pub trait AutomationBackend: Send + Sync {
    async fn invoke(&self, command: &str, payload: J) -> Result<J, BackendError>;

    async fn display_snapshot(&self) -> Result<DisplaySnapshot, BackendError>;

    /// Teardown hook; remote HTTP clients have nothing to release.
    async fn close(&self) -> Result<(), BackendError> {
        Ok(())
    }
}

type BoxedInvoke = Pin<Box<dyn Future<Output = Result<J, BackendError>> + Send>>;

/// Closure-backed backend. Used by tests, and as the boot fallback when no
/// backend URL is configured: the service stays up and every tool call gets
/// actionable feedback instead of a connection error.
pub struct FnBackend {
    inner: Arc<dyn Fn(String, J) -> BoxedInvoke + Send + Sync>,
}

impl FnBackend {
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn(String, J) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<J, BackendError>> + Send + 'static,
    {
        Self { inner: Arc::new(move |cmd, payload| Box::pin(f(cmd, payload))) }
    }

    pub fn unconfigured() -> Self {
        Self::new(|_cmd, _payload| async {
            Err(BackendError::Other(
                "AUTOMATON_BASE_URL not configured; set it to enable automation tools".into(),
            ))
        })
    }
}

#[async_trait::async_trait]
impl AutomationBackend for FnBackend {
    async fn invoke(&self, command: &str, payload: J) -> Result<J, BackendError> {
        (self.inner)(command.to_owned(), payload).await
    }

    async fn display_snapshot(&self) -> Result<DisplaySnapshot, BackendError> {
        let v = (self.inner)("display.snapshot".to_owned(), J::Null).await?;
        serde_json::from_value(v).map_err(|e| BackendError::Decode(e.to_string()))
    }
}
