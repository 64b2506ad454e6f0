use users_sdk::client::UserClient;
use users_sdk::error::ProtocolError;
use users_sdk::graphql::client::GraphQlClient;
use users_sdk::grpc::client::GrpcClient;
use users_sdk::protocol::Protocol;
use users_sdk::rest::client::RestClient;
use users_sdk::soap::client::SoapClient;

/// Selects the adapter implementation for a protocol.
pub trait ClientFactory: Sync + Send {
    fn create_client(
        &self,
        protocol: Protocol,
        host: &str,
        port: u16,
    ) -> Result<Box<dyn UserClient>, ProtocolError>;
}

#[derive(Debug, Copy, Clone, Default)]
pub struct DefaultClientFactory;

impl ClientFactory for DefaultClientFactory {
    fn create_client(
        &self,
        protocol: Protocol,
        host: &str,
        port: u16,
    ) -> Result<Box<dyn UserClient>, ProtocolError> {
        let client: Box<dyn UserClient> = match protocol {
            Protocol::Rest => Box::new(RestClient::new(&format!("http://{host}:{port}"))?),
            Protocol::GraphQl => Box::new(GraphQlClient::new(&format!("http://{host}:{port}"))?),
            Protocol::Grpc => Box::new(GrpcClient::new(&format!("{host}:{port}"))),
            Protocol::Soap => Box::new(SoapClient::new(&format!("http://{host}:{port}/"))?),
        };
        Ok(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_should_create_adapter_for_every_protocol() {
        for protocol in Protocol::ALL {
            let client = DefaultClientFactory
                .create_client(protocol, "127.0.0.1", protocol.default_port())
                .unwrap();
            assert_eq!(client.protocol(), protocol);
        }
    }

    #[test]
    fn invalid_host_should_be_rejected() {
        let result = DefaultClientFactory.create_client(Protocol::Rest, "not a host", 8000);
        assert!(matches!(result, Err(ProtocolError::CannotParseUrl)));
    }
}
