//! Audit-log boundary. Persistence lives elsewhere; the gateway only emits.

use std::time::Duration;

use serde_json::Value as J;

use crate::infra::metrics::CallOutcome;

pub struct AuditEntry {
    pub tool: String,
    pub arguments: J,
    pub outcome: CallOutcome,
    pub duration: Duration,
}

/// Fire-and-forget sink for tool-call records. Implementations must not
/// block and must never fail the caller.
pub trait AuditLog: Send + Sync {
    fn record(&self, entry: AuditEntry);
    fn close(&self) {}
}

/// Emits audit records as structured tracing events under the `audit` target.
#[derive(Default)]
pub struct TracingAuditLog;

impl AuditLog for TracingAuditLog {
    fn record(&self, e: AuditEntry) {
        tracing::info!(
            target: "audit",
            tool = %e.tool,
            outcome = e.outcome.as_str(),
            duration_ms = e.duration.as_millis() as u64,
            arguments = %e.arguments,
            at = %chrono::Utc::now().to_rfc3339(),
            "tool call"
        );
    }

    fn close(&self) {
        tracing::debug!(target: "audit", "audit log closed");
    }
}

/// Discards everything. Used where audit output is noise (unit tests).
#[derive(Default)]
pub struct NullAuditLog;

impl AuditLog for NullAuditLog {
    fn record(&self, _entry: AuditEntry) {}
}
