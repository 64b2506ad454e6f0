use crate::common::ClientFactory;
use async_trait::async_trait;
use users_sdk::client::UserClient;
use users_sdk::grpc::client::GrpcClient;

#[derive(Debug, Clone)]
pub struct GrpcClientFactory {
    pub server_address: String,
}

#[async_trait]
impl ClientFactory for GrpcClientFactory {
    async fn create_client(&self) -> Box<dyn UserClient> {
        Box::new(GrpcClient::new(&self.server_address))
    }
}
