pub mod benchmark_result;
pub mod protocol_score;
pub mod report;
