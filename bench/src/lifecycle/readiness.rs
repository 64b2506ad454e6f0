use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::{sleep, timeout, Instant};
use tracing::{debug, trace};

/// Polls `host:port` with plain TCP connects every `interval` until one succeeds or
/// `ready_timeout` elapses.
///
/// Returns `false` on timeout instead of failing, never before the deadline has passed.
pub async fn wait_ready(
    host: &str,
    port: u16,
    ready_timeout: Duration,
    interval: Duration,
) -> bool {
    let address = format!("{host}:{port}");
    let deadline = Instant::now() + ready_timeout;
    let mut attempt = 0u32;
    loop {
        attempt += 1;
        let now = Instant::now();
        let attempt_timeout = interval
            .min(deadline.saturating_duration_since(now))
            .max(Duration::from_millis(1));
        match timeout(attempt_timeout, TcpStream::connect(&address)).await {
            Ok(Ok(_)) => {
                debug!("{address} accepted a connection after {attempt} attempt(s).");
                return true;
            }
            Ok(Err(error)) => trace!("Readiness check {attempt} of {address} failed: {error}"),
            Err(_) => trace!("Readiness check {attempt} of {address} timed out."),
        }

        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            debug!("{address} did not accept connections within {ready_timeout:?}.");
            return false;
        }
        sleep(interval.min(remaining)).await;
    }
}
