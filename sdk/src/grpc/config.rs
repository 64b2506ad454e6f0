use std::time::Duration;

#[derive(Debug, Clone)]
pub struct GrpcClientConfig {
    pub server_address: String,
    pub connect_timeout: Duration,
    pub timeout: Duration,
}

impl Default for GrpcClientConfig {
    fn default() -> GrpcClientConfig {
        GrpcClientConfig {
            server_address: "127.0.0.1:50051".to_string(),
            connect_timeout: Duration::from_secs(5),
            timeout: Duration::from_secs(10),
        }
    }
}
