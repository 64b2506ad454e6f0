mod args;
mod client_factory;
mod configs;
mod error;
mod lifecycle;
mod orchestrator;
mod runner;
mod signal;
mod suite;
#[cfg(test)]
mod test_clients;
mod timer;

use crate::args::Args;
use crate::client_factory::DefaultClientFactory;
use crate::configs::config_provider;
use crate::error::BenchmarkError;
use crate::orchestrator::{BenchmarkSettings, Orchestrator};
use crate::suite::TEST_USERS;
use clap::Parser;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};
use users_sdk::data::loader::DataLoader;

#[tokio::main]
async fn main() -> Result<(), BenchmarkError> {
    let args = Args::parse();
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config_provider::load(args.config.as_deref())?;
    let protocols = args.protocols()?;
    let test_users = DataLoader::new(&args.data)?.load_users(Some(TEST_USERS))?;
    info!(
        "Loaded {} test users, benchmarking: {}",
        test_users.len(),
        protocols
            .iter()
            .map(|protocol| protocol.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let settings = BenchmarkSettings {
        requests: args.requests,
        output: args.output.clone(),
        keep_servers: args.keep_servers,
        server_executable: args.server_executable()?,
        data: args.data.clone(),
    };
    let orchestrator = Orchestrator::new(
        settings,
        config,
        protocols,
        test_users,
        Box::new(DefaultClientFactory),
        args.verbose,
    );
    orchestrator.run().await
}
