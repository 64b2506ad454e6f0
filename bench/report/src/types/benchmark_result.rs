use crate::utils::round_float;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationSecondsWithFrac};
use std::time::Duration;

/// Aggregated outcome of running one operation N times against one protocol.
///
/// Durations are serialized as fractional seconds.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BenchmarkResult {
    /// Protocol display name, e.g. `gRPC`
    pub protocol: String,

    /// Operation name, e.g. `get_user_by_id`
    pub operation: String,

    pub total_requests: u64,

    /// Wall-clock span from the first iteration start to the last iteration end
    #[serde_as(as = "DurationSecondsWithFrac<f64>")]
    pub total_time: Duration,

    #[serde_as(as = "DurationSecondsWithFrac<f64>")]
    pub avg_response_time: Duration,

    #[serde_as(as = "DurationSecondsWithFrac<f64>")]
    pub min_response_time: Duration,

    #[serde_as(as = "DurationSecondsWithFrac<f64>")]
    pub max_response_time: Duration,

    #[serde(serialize_with = "round_float")]
    pub requests_per_second: f64,

    pub success_count: u64,

    pub error_count: u64,

    /// Percentage of failed requests
    #[serde(serialize_with = "round_float")]
    pub error_rate: f64,
}

impl BenchmarkResult {
    /// Builds the result from the per-request durations.
    ///
    /// With no durations the response times are zero, with a zero `total_time`
    /// the throughput is zero.
    pub fn from_samples(
        protocol: &str,
        operation: &str,
        total_time: Duration,
        durations: &[Duration],
        success_count: u64,
        error_count: u64,
    ) -> Self {
        let total_requests = success_count + error_count;
        let (avg_response_time, min_response_time, max_response_time) = if durations.is_empty() {
            (Duration::ZERO, Duration::ZERO, Duration::ZERO)
        } else {
            let sum: Duration = durations.iter().sum();
            (
                sum.div_f64(durations.len() as f64),
                durations.iter().min().copied().unwrap_or_default(),
                durations.iter().max().copied().unwrap_or_default(),
            )
        };

        let total_secs = total_time.as_secs_f64();
        let requests_per_second = if total_secs > 0.0 {
            total_requests as f64 / total_secs
        } else {
            0.0
        };
        let error_rate = if total_requests > 0 {
            error_count as f64 / total_requests as f64 * 100.0
        } else {
            0.0
        };

        Self {
            protocol: protocol.to_string(),
            operation: operation.to_string(),
            total_requests,
            total_time,
            avg_response_time,
            min_response_time,
            max_response_time,
            requests_per_second,
            success_count,
            error_count,
            error_rate,
        }
    }

    /// Percentage of successful requests, 0 when nothing was executed.
    pub fn success_rate(&self) -> f64 {
        if self.total_requests == 0 {
            return 0.0;
        }
        self.success_count as f64 / self.total_requests as f64 * 100.0
    }
}
