use crate::utils::round_float;
use serde::{Deserialize, Serialize};

/// Overall standing of one protocol across all of its operations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProtocolScore {
    pub protocol: String,
    pub operations: usize,
    #[serde(serialize_with = "round_float")]
    pub average_requests_per_second: f64,
    #[serde(serialize_with = "round_float")]
    pub average_success_rate: f64,
    /// `average_requests_per_second * average_success_rate / 100`
    #[serde(serialize_with = "round_float")]
    pub score: f64,
}
