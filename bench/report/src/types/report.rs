use crate::benchmark_result::BenchmarkResult;
use crate::protocol_score::ProtocolScore;
use crate::ranking::{rank_operations, rank_protocols, OperationRanking};
use chrono::{DateTime, Local};

#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkReport {
    /// Time the report was generated, also used as the file name suffix
    pub timestamp: DateTime<Local>,

    /// Requested repetitions per operation
    pub requests: u32,

    /// All results of the run, in execution order
    pub results: Vec<BenchmarkResult>,
}

impl BenchmarkReport {
    pub fn new(requests: u32, results: Vec<BenchmarkResult>) -> Self {
        Self {
            timestamp: Local::now(),
            requests,
            results,
        }
    }

    pub fn operation_rankings(&self) -> Vec<OperationRanking> {
        rank_operations(&self.results)
    }

    pub fn protocol_scores(&self) -> Vec<ProtocolScore> {
        rank_protocols(&self.results)
    }

    pub fn file_suffix(&self) -> String {
        self.timestamp.format("%Y%m%d_%H%M%S").to_string()
    }
}
