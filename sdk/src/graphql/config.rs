use std::time::Duration;

#[derive(Debug, Clone)]
pub struct GraphQlClientConfig {
    pub api_url: String,
    pub endpoint: String,
    pub timeout: Duration,
}

impl Default for GraphQlClientConfig {
    fn default() -> GraphQlClientConfig {
        GraphQlClientConfig {
            api_url: "http://127.0.0.1:8001".to_string(),
            endpoint: "/graphql".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}
