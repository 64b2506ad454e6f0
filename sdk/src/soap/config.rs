use std::time::Duration;

#[derive(Debug, Clone)]
pub struct SoapClientConfig {
    /// Service URL, the WSDL is fetched from `{service_url}?wsdl`.
    pub service_url: String,
    pub timeout: Duration,
}

impl Default for SoapClientConfig {
    fn default() -> SoapClientConfig {
        SoapClientConfig {
            service_url: "http://127.0.0.1:8002".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}
