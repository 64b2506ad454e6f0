use crate::common::ClientFactory;
use async_trait::async_trait;
use users_sdk::client::UserClient;
use users_sdk::soap::client::SoapClient;

#[derive(Debug, Clone)]
pub struct SoapClientFactory {
    pub server_address: String,
}

#[async_trait]
impl ClientFactory for SoapClientFactory {
    async fn create_client(&self) -> Box<dyn UserClient> {
        let service_url = format!("http://{}/", self.server_address);
        let client = SoapClient::new(&service_url).unwrap();
        Box::new(client)
    }
}
