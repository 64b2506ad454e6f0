use crate::common::ClientFactory;
use async_trait::async_trait;
use users_sdk::client::UserClient;
use users_sdk::rest::client::RestClient;

#[derive(Debug, Clone)]
pub struct RestClientFactory {
    pub server_address: String,
}

#[async_trait]
impl ClientFactory for RestClientFactory {
    async fn create_client(&self) -> Box<dyn UserClient> {
        let api_url = format!("http://{}", self.server_address);
        let client = RestClient::new(&api_url).unwrap();
        Box::new(client)
    }
}
