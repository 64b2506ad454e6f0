use crate::configs::bench::BenchConfig;
use crate::error::BenchmarkError;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use std::path::Path;
use tracing::info;

const ENV_PREFIX: &str = "API_BENCH_";

/// Loads the configuration: built-in defaults, then the optional TOML file,
/// then `API_BENCH_` environment variables with `__` separating nested keys.
pub fn load(path: Option<&Path>) -> Result<BenchConfig, BenchmarkError> {
    load_with_prefix(path, ENV_PREFIX)
}

fn load_with_prefix(path: Option<&Path>, env_prefix: &str) -> Result<BenchConfig, BenchmarkError> {
    let mut figment = Figment::from(Serialized::defaults(BenchConfig::default()));
    if let Some(path) = path {
        info!("Loading config from path: '{}'...", path.display());
        if !path.is_file() {
            return Err(BenchmarkError::CannotLoadConfiguration(format!(
                "Cannot find configuration file at path: '{}'.",
                path.display()
            )));
        }
        figment = figment.merge(Toml::file(path));
    }

    let config: BenchConfig = figment
        .merge(Env::prefixed(env_prefix).split("__"))
        .extract()
        .map_err(|error| {
            BenchmarkError::CannotLoadConfiguration(format!(
                "Failed to load configuration: {error}"
            ))
        })?;
    info!("Using config: {config}");
    Ok(config)
}
