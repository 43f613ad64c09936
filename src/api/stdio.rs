//! Stream transport: newline-delimited JSON-RPC over an async byte stream.
//!
//! Two activities run concurrently: a dedicated reader pulling one line at a
//! time, and a dispatch loop that spawns one handler task per message so a
//! slow tool call never blocks reading. Responses are written in completion
//! order; clients correlate by id.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::api::router::Router;
use crate::core::rpc::RpcResp;

const HANDOFF_DEPTH: usize = 64;

/// Serve one stream until EOF or cancellation. EOF is normal termination;
/// pending handler tasks are drained so their responses still flush. On
/// cancellation the function returns promptly and in-flight handler tasks
/// are left to run to completion detached.
pub async fn serve<R, W>(
    input: R,
    output: W,
    router: Arc<Router>,
    token: CancellationToken,
) -> anyhow::Result<()>
where
    R: AsyncRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (tx, mut rx) = mpsc::channel::<String>(HANDOFF_DEPTH);

    let reader_token = token.clone();
    let reader = tokio::spawn(async move {
        let mut lines = BufReader::new(input).lines();
        loop {
            tokio::select! {
                // Cancellation unblocks the pending read.
                _ = reader_token.cancelled() => break,
                next = lines.next_line() => match next {
                    Ok(Some(line)) => {
                        if line.trim().is_empty() {
                            continue;
                        }
                        if tx.send(line).await.is_err() {
                            break;
                        }
                    }
                    Ok(None) => {
                        tracing::info!("input stream closed");
                        break;
                    }
                    // Any read error stops the reader; the dispatch loop
                    // keeps draining what was already handed off.
                    Err(e) => {
                        tracing::warn!(error = %e, "read error on input stream");
                        break;
                    }
                }
            }
        }
    });

    let writer = Arc::new(Mutex::new(output));
    let mut in_flight: JoinSet<()> = JoinSet::new();
    let mut cancelled = false;

    loop {
        tokio::select! {
            _ = token.cancelled() => {
                cancelled = true;
                break;
            }
            msg = rx.recv() => match msg {
                Some(line) => {
                    let router = Arc::clone(&router);
                    let writer = Arc::clone(&writer);
                    in_flight.spawn(async move {
                        if let Some(resp) = router.handle_raw(&line).await {
                            write_line(&writer, &resp).await;
                        }
                    });
                }
                None => break,
            }
        }
    }

    if cancelled {
        // Shutdown must not kill in-flight tool calls.
        in_flight.detach_all();
    } else {
        while in_flight.join_next().await.is_some() {}
    }
    let _ = reader.await;
    Ok(())
}

/// Best-effort write; a closed transport is logged, never a panic.
async fn write_line<W>(writer: &Arc<Mutex<W>>, resp: &RpcResp)
where
    W: AsyncWrite + Unpin + Send,
{
    let payload = match serde_json::to_string(resp) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "response serialization failed");
            return;
        }
    };
    let mut guard = writer.lock().await;
    if let Err(e) = guard.write_all(payload.as_bytes()).await {
        tracing::warn!(error = %e, "write to closed transport");
        return;
    }
    if let Err(e) = guard.write_all(b"\n").await {
        tracing::warn!(error = %e, "write to closed transport");
        return;
    }
    if let Err(e) = guard.flush().await {
        tracing::warn!(error = %e, "flush failed");
    }
}
