use crate::common::ClientFactory;
use async_trait::async_trait;
use users_sdk::client::UserClient;
use users_sdk::graphql::client::GraphQlClient;

#[derive(Debug, Clone)]
pub struct GraphQlClientFactory {
    pub server_address: String,
}

#[async_trait]
impl ClientFactory for GraphQlClientFactory {
    async fn create_client(&self) -> Box<dyn UserClient> {
        let api_url = format!("http://{}", self.server_address);
        let client = GraphQlClient::new(&api_url).unwrap();
        Box::new(client)
    }
}
