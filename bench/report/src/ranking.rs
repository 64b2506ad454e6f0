use crate::benchmark_result::BenchmarkResult;
use crate::protocol_score::ProtocolScore;
use std::cmp::Ordering;

/// Results of a single operation, fastest protocol first.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationRanking {
    pub operation: String,
    pub results: Vec<BenchmarkResult>,
}

fn descending(left: f64, right: f64) -> Ordering {
    right.partial_cmp(&left).unwrap_or(Ordering::Equal)
}

/// Groups results per operation, keeping the order in which operations first appear,
/// and sorts each group by descending requests per second.
pub fn rank_operations(results: &[BenchmarkResult]) -> Vec<OperationRanking> {
    let mut rankings: Vec<OperationRanking> = Vec::new();
    for result in results {
        match rankings
            .iter_mut()
            .find(|ranking| ranking.operation == result.operation)
        {
            Some(ranking) => ranking.results.push(result.clone()),
            None => rankings.push(OperationRanking {
                operation: result.operation.clone(),
                results: vec![result.clone()],
            }),
        }
    }

    for ranking in rankings.iter_mut() {
        ranking.results.sort_by(|left, right| {
            descending(left.requests_per_second, right.requests_per_second)
                .then_with(|| left.protocol.cmp(&right.protocol))
        });
    }
    rankings
}

/// Scores every protocol by its average throughput weighted by its average success rate.
///
/// Results that issued no requests carry no measurement and are left out of the averages.
pub fn rank_protocols(results: &[BenchmarkResult]) -> Vec<ProtocolScore> {
    let mut protocols: Vec<&str> = Vec::new();
    for result in results {
        if !protocols.contains(&result.protocol.as_str()) {
            protocols.push(&result.protocol);
        }
    }

    let mut scores: Vec<ProtocolScore> = protocols
        .into_iter()
        .map(|protocol| {
            let protocol_results: Vec<&BenchmarkResult> = results
                .iter()
                .filter(|result| result.protocol == protocol && result.total_requests > 0)
                .collect();
            let operations = protocol_results.len();
            let average = |value: fn(&BenchmarkResult) -> f64| {
                if operations == 0 {
                    return 0.0;
                }
                protocol_results.iter().map(|result| value(result)).sum::<f64>()
                    / operations as f64
            };
            let average_requests_per_second = average(|result| result.requests_per_second);
            let average_success_rate = average(BenchmarkResult::success_rate);
            ProtocolScore {
                protocol: protocol.to_string(),
                operations,
                average_requests_per_second,
                average_success_rate,
                score: average_requests_per_second * average_success_rate / 100.0,
            }
        })
        .collect();

    scores.sort_by(|left, right| {
        descending(left.score, right.score).then_with(|| left.protocol.cmp(&right.protocol))
    });
    scores
}
