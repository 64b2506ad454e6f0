use crate::timer::BenchmarkTimer;
use api_bench_report::benchmark_result::BenchmarkResult;
use std::fmt::Display;
use std::future::Future;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use users_sdk::protocol::Protocol;

/// Failure messages are logged only for this many failing iterations per operation.
pub const MAX_LOGGED_FAILURES: u64 = 5;

/// Executes an operation a fixed number of times against one protocol and aggregates the timings.
#[derive(Debug, Clone, Copy)]
pub struct BenchmarkRunner {
    protocol: Protocol,
}

impl BenchmarkRunner {
    pub fn new(protocol: Protocol) -> Self {
        Self { protocol }
    }

    /// Runs `test` exactly `repetitions` times.
    ///
    /// `Ok(true)` counts as a success; `Ok(false)` and `Err(_)` count as errors and never
    /// stop the loop. `total_time` is the wall-clock span of the whole loop.
    pub async fn run<F, Fut, E>(
        &self,
        operation: &str,
        repetitions: u32,
        mut test: F,
    ) -> BenchmarkResult
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<bool, E>>,
        E: Display,
    {
        let protocol = self.protocol;
        info!("Benchmarking {protocol} {operation} with {repetitions} requests...");
        let mut timer = BenchmarkTimer::with_capacity(repetitions as usize);
        let mut success_count = 0u64;
        let mut error_count = 0u64;

        let loop_started_at = Instant::now();
        for iteration in 1..=repetitions {
            timer.start();
            let outcome = test().await;
            timer.stop();
            match outcome {
                Ok(true) => success_count += 1,
                Ok(false) => {
                    error_count += 1;
                    if error_count <= MAX_LOGGED_FAILURES {
                        warn!(
                            "{protocol} {operation} request {iteration}/{repetitions} was unsuccessful."
                        );
                    }
                }
                Err(error) => {
                    error_count += 1;
                    if error_count <= MAX_LOGGED_FAILURES {
                        warn!(
                            "{protocol} {operation} request {iteration}/{repetitions} failed: {error}"
                        );
                    }
                }
            }
        }
        let total_time = if repetitions == 0 {
            Duration::ZERO
        } else {
            loop_started_at.elapsed()
        };

        if error_count > MAX_LOGGED_FAILURES {
            warn!(
                "{protocol} {operation}: {} more failures were not logged.",
                error_count - MAX_LOGGED_FAILURES
            );
        }

        let result = BenchmarkResult::from_samples(
            &protocol.to_string(),
            operation,
            total_time,
            timer.durations(),
            success_count,
            error_count,
        );
        info!(
            "{protocol} {operation}: {:.2} req/s, avg: {:.2} ms, success: {}/{}",
            result.requests_per_second,
            result.avg_response_time.as_secs_f64() * 1000.0,
            result.success_count,
            result.total_requests
        );
        result
    }
}
