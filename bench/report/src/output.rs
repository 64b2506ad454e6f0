use crate::report::BenchmarkReport;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFiles {
    pub text: PathBuf,
    pub json: PathBuf,
}

impl BenchmarkReport {
    /// Writes `benchmark_report_<timestamp>.txt` and `benchmark_results_<timestamp>.json`
    /// into the output directory, creating it when needed.
    pub fn dump_to_files(&self, output_dir: &Path) -> io::Result<ReportFiles> {
        fs::create_dir_all(output_dir)?;
        let suffix = self.file_suffix();

        let text = output_dir.join(format!("benchmark_report_{suffix}.txt"));
        fs::write(&text, self.render_text())?;
        info!("Text report saved to: {}", text.display());

        let json = output_dir.join(format!("benchmark_results_{suffix}.json"));
        let results = serde_json::to_string_pretty(&self.results)?;
        fs::write(&json, results)?;
        info!("JSON results saved to: {}", json.display());

        Ok(ReportFiles { text, json })
    }
}
