use std::io;
use thiserror::Error;

/// Failure of a single protocol operation.
///
/// Transport problems (connection refused, timeouts) and protocol faults
/// (malformed payloads, server side errors) share one type so that every
/// adapter exposes the same failure surface.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Request error")]
    RequestError(#[from] reqwest::Error),
    #[error("Cannot parse URL")]
    CannotParseUrl,
    #[error("Unexpected status code: {0}")]
    UnexpectedStatus(u16),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error("GraphQL errors: {0}")]
    GraphQl(String),
    #[error("gRPC status: {0}")]
    Grpc(#[from] tonic::Status),
    #[error("gRPC transport error")]
    GrpcTransport(#[from] tonic::transport::Error),
    #[error("SOAP fault: {0}")]
    SoapFault(String),
    #[error("XML error")]
    Xml(#[from] quick_xml::Error),
    #[error("User with ID: {0} was not found")]
    NotFound(u64),
    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

impl ProtocolError {
    /// Returns `true` when the failure happened before the server produced a
    /// response, e.g. connection refused or a timeout.
    pub fn is_transport(&self) -> bool {
        match self {
            ProtocolError::Transport(_) | ProtocolError::GrpcTransport(_) => true,
            ProtocolError::RequestError(error) => {
                error.is_connect() || error.is_timeout() || error.is_request()
            }
            ProtocolError::Grpc(status) => matches!(
                status.code(),
                tonic::Code::Unavailable | tonic::Code::DeadlineExceeded
            ),
            _ => false,
        }
    }
}

#[derive(Debug, Error)]
pub enum DataError {
    #[error("Data file not found: {0}")]
    FileNotFound(String),
    #[error("IO error")]
    IoError(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_failures_should_be_classified_as_transport() {
        assert!(ProtocolError::Transport("connection refused".to_string()).is_transport());
        assert!(ProtocolError::Grpc(tonic::Status::unavailable("down")).is_transport());
    }

    #[test]
    fn protocol_faults_should_not_be_classified_as_transport() {
        assert!(!ProtocolError::SoapFault("boom".to_string()).is_transport());
        assert!(!ProtocolError::UnexpectedStatus(500).is_transport());
        assert!(!ProtocolError::Grpc(tonic::Status::internal("boom")).is_transport());
        assert!(!ProtocolError::NotFound(7).is_transport());
    }
}
