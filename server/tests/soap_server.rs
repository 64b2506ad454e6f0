mod common;
use crate::common::soap::SoapClientFactory;
use crate::common::scenarios::user_crud_scenario;
use crate::common::TestServer;
use serial_test::serial;
use users_sdk::protocol::Protocol;

#[tokio::test]
#[serial]
async fn user_crud_scenario_should_be_valid() {
    let mut test_server = TestServer::new(Protocol::Soap, 18002);
    test_server.start();
    let client_factory = SoapClientFactory {
        server_address: test_server.address().to_string(),
    };
    user_crud_scenario::run(&client_factory).await;
}
