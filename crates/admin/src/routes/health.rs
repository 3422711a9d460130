//! Liveness probe.

/// The process is serving requests. Backend reachability needs a token, so
/// it is not probed here.
pub async fn health() -> &'static str {
    "ok"
}
