mod args;
mod graphql;
mod grpc;
mod rest;
mod server_error;
mod shutdown;
mod soap;
mod store;

use crate::args::Args;
use crate::server_error::ServerError;
use crate::store::UserStore;
use clap::Parser;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};
use users_sdk::data::loader::DataLoader;
use users_sdk::protocol::Protocol;

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    let args = Args::parse();
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let users = DataLoader::new(&args.data)?.load_users(None)?;
    let store = UserStore::new(users);
    info!(
        "Starting {} server with {} users...",
        args.protocol,
        store.len()
    );

    let address = args.address();
    let store = store.shared();
    match args.protocol {
        Protocol::Rest => rest::start(&address, store).await,
        Protocol::GraphQl => graphql::start(&address, store).await,
        Protocol::Grpc => grpc::start(&address, store).await,
        Protocol::Soap => soap::start(&address, store).await,
    }
}
