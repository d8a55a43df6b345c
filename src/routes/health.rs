//! Health check endpoint for liveness probes.

/// Liveness probe. Always returns OK if the process is running.
pub async fn live() -> &'static str {
    "OK"
}
