use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use crate::api::router::Router;
use crate::api::stdio;
use crate::clients::automaton::AutomatonRemote;
use crate::clients::{AutomationBackend, FnBackend};
use crate::infra::audit::{AuditLog, TracingAuditLog};
use crate::infra::config::Config;
use crate::infra::http_app;
use crate::infra::lifecycle::{HttpHandle, Lifecycle};
use crate::tools::catalog::build_catalog;

pub async fn run_server() -> anyhow::Result<()> {
    let cfg = Config::from_env_and_toml();
    run_with_config(cfg).await
}

pub async fn run_with_config(cfg: Config) -> anyhow::Result<()> {
    tracing::info!(
        mode = %cfg.mode,
        port = cfg.port,
        backend = cfg.backend.base_url.as_deref().unwrap_or("(unconfigured)"),
        "BOOT automaton-mcp-gateway"
    );

    let backend: Arc<dyn AutomationBackend> = match &cfg.backend.base_url {
        Some(_) => Arc::new(AutomatonRemote::from_config(&cfg.backend)),
        None => {
            tracing::warn!("no backend configured; tool calls will report how to fix that");
            Arc::new(FnBackend::unconfigured())
        }
    };
    let audit: Arc<dyn AuditLog> = Arc::new(TracingAuditLog);
    let lifecycle = Lifecycle::new(audit.clone(), backend.clone());
    let router = Arc::new(Router::new(
        build_catalog(backend.clone()),
        backend,
        audit,
        lifecycle.clone(),
        Duration::from_millis(cfg.shutdown_grace_ms),
    ));

    // Stdio mode: serve JSON-RPC over stdin/stdout ONLY (no HTTP).
    if cfg.mode == "stdio" {
        stdio::serve(
            tokio::io::stdin(),
            tokio::io::stdout(),
            router,
            lifecycle.cancellation_token(),
        )
        .await?;
        lifecycle.shutdown().await;
        return Ok(());
    }

    let handle = HttpHandle::new();
    lifecycle.set_http_transport(handle.clone());
    let shutdown_token = handle.token();

    let app = http_app::build_app(router);
    let addr: SocketAddr = ([0, 0, 0, 0], cfg.port).into();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown_token.cancelled_owned().await })
        .await?;
    lifecycle.shutdown().await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn config_selects_server_mode_by_default() {
        std::env::remove_var("MODE");
        let cfg = Config::from_env();
        assert_eq!(cfg.mode, "server");
    }
}
