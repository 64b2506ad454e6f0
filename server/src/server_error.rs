use std::io;
use thiserror::Error;
use users_sdk::error::DataError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("IO error")]
    IoError(#[from] io::Error),
    #[error("Cannot load users")]
    CannotLoadUsers(#[from] DataError),
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
    #[error("gRPC transport error")]
    GrpcTransport(#[from] tonic::transport::Error),
}
