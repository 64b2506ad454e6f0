use std::io;
use std::time::Duration;
use thiserror::Error;
use users_sdk::error::{DataError, ProtocolError};
use users_sdk::protocol::Protocol;

#[derive(Debug, Error)]
pub enum BenchmarkError {
    #[error("{protocol} server exited during startup, output: {output}")]
    ServerStartup { protocol: Protocol, output: String },
    #[error("{protocol} server is not accepting connections on port: {port} after {timeout:?}")]
    ServerUnresponsive {
        protocol: Protocol,
        port: u16,
        timeout: Duration,
    },
    #[error("Cannot spawn {protocol} server: {source}")]
    ServerSpawn {
        protocol: Protocol,
        #[source]
        source: io::Error,
    },
    #[error("Unknown protocol: {0}")]
    UnknownProtocol(String),
    #[error("Data source not found: {0}")]
    DataSourceNotFound(String),
    #[error("Cannot load configuration: {0}")]
    CannotLoadConfiguration(String),
    #[error("Cannot write report: {0}")]
    CannotWriteReport(#[source] io::Error),
    #[error("Cannot create client: {0}")]
    CannotCreateClient(#[from] ProtocolError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl From<DataError> for BenchmarkError {
    fn from(error: DataError) -> Self {
        match error {
            DataError::FileNotFound(path) => BenchmarkError::DataSourceNotFound(path),
            DataError::IoError(error) => BenchmarkError::Io(error),
        }
    }
}
