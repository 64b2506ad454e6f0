use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RestClientConfig {
    pub api_url: String,
    pub timeout: Duration,
}

impl Default for RestClientConfig {
    fn default() -> RestClientConfig {
        RestClientConfig {
            api_url: "http://127.0.0.1:8000".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}
