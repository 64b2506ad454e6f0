use crate::benchmark_result::BenchmarkResult;
use crate::protocol_score::ProtocolScore;
use crate::report::BenchmarkReport;
use crate::utils::as_millis;
use colored::{Color, Colorize};
use std::fmt::Write;
use tracing::info;

const TITLE: &str = "API PROTOCOL BENCHMARK REPORT";

impl BenchmarkReport {
    /// Prints the rankings to the console with colors.
    pub fn print_summary(&self) {
        info!("{}", TITLE.bold().blue());
        info!(
            "{}",
            format!(
                "Generated at: {}, requests per operation: {}",
                self.timestamp.format("%Y-%m-%d %H:%M:%S"),
                self.requests
            )
            .blue()
        );

        for ranking in self.operation_rankings() {
            info!("{}", format!("Operation: {}", ranking.operation).bold());
            for (position, result) in ranking.results.iter().enumerate() {
                let color = match (position, result.error_count) {
                    (_, errors) if errors > 0 => Color::Red,
                    (0, _) => Color::Green,
                    _ => Color::White,
                };
                info!("{}", result_line(position + 1, result).color(color));
            }
        }

        info!("{}", "Overall ranking".bold());
        for (position, score) in self.protocol_scores().iter().enumerate() {
            let line = score_line(position + 1, score);
            if position == 0 {
                info!("{}", line.green().bold());
            } else {
                info!("{}", line);
            }
        }
    }

    /// Renders the rankings as plain text.
    pub fn render_text(&self) -> String {
        let mut text = String::new();
        let _ = writeln!(text, "{TITLE}");
        let _ = writeln!(text, "{}", "=".repeat(TITLE.len()));
        let _ = writeln!(
            text,
            "Generated at: {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S")
        );
        let _ = writeln!(text, "Requests per operation: {}", self.requests);

        for ranking in self.operation_rankings() {
            let _ = writeln!(text);
            let _ = writeln!(text, "Operation: {}", ranking.operation);
            for (position, result) in ranking.results.iter().enumerate() {
                let _ = writeln!(text, "{}", result_line(position + 1, result));
            }
        }

        let _ = writeln!(text);
        let _ = writeln!(text, "Overall ranking (avg req/s x avg success rate / 100)");
        for (position, score) in self.protocol_scores().iter().enumerate() {
            let _ = writeln!(text, "{}", score_line(position + 1, score));
        }
        text
    }
}

fn result_line(position: usize, result: &BenchmarkResult) -> String {
    format!(
        "{position:>2}. {:<8} {:>10.2} req/s, avg: {:.2} ms, min: {:.2} ms, max: {:.2} ms, success: {}/{} ({:.1}%)",
        result.protocol,
        result.requests_per_second,
        as_millis(result.avg_response_time),
        as_millis(result.min_response_time),
        as_millis(result.max_response_time),
        result.success_count,
        result.total_requests,
        result.success_rate(),
    )
}

fn score_line(position: usize, score: &ProtocolScore) -> String {
    format!(
        "{position:>2}. {:<8} score: {:.2}, avg: {:.2} req/s, avg success: {:.1}% over {} operations",
        score.protocol,
        score.score,
        score.average_requests_per_second,
        score.average_success_rate,
        score.operations,
    )
}
