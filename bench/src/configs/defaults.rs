use crate::configs::bench::{BenchConfig, LifecycleConfig, PortsConfig};
use std::time::Duration;
use users_sdk::protocol::Protocol;

impl Default for BenchConfig {
    fn default() -> BenchConfig {
        BenchConfig {
            host: "127.0.0.1".to_string(),
            ports: PortsConfig::default(),
            lifecycle: LifecycleConfig::default(),
        }
    }
}

impl Default for PortsConfig {
    fn default() -> PortsConfig {
        PortsConfig {
            rest: Protocol::Rest.default_port(),
            graphql: Protocol::GraphQl.default_port(),
            grpc: Protocol::Grpc.default_port(),
            soap: Protocol::Soap.default_port(),
        }
    }
}

impl Default for LifecycleConfig {
    fn default() -> LifecycleConfig {
        LifecycleConfig {
            startup_grace: Duration::from_secs(3).into(),
            ready_timeout: Duration::from_secs(30).into(),
            poll_interval: Duration::from_millis(500).into(),
            stop_timeout: Duration::from_secs(5).into(),
            grpc_grace: Duration::from_secs(2).into(),
            settle_time: Duration::from_secs(2).into(),
        }
    }
}
