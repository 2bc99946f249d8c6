//! Stdio transport

use std::future::Future;

use rmcp::ServiceExt;
use rmcp::transport::io::stdio;

use crate::server::ServerHandler;
use crate::{Error, Result};

/// Serve MCP over stdin/stdout until the client disconnects or `shutdown` fires
pub async fn run_stdio(
    handler: ServerHandler,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let transport = stdio();
    let server = handler
        .serve(transport)
        .await
        .map_err(|e| Error::Transport(format!("Failed to start stdio transport: {e}")))?;

    tokio::select! {
        result = server.waiting() => {
            result.map_err(|e| Error::Transport(format!("Stdio transport error: {e}")))?;
        }
        () = shutdown => {}
    }

    Ok(())
}
