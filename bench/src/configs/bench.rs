use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use std::fmt::{Display, Formatter};
use users_sdk::protocol::Protocol;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BenchConfig {
    /// Host the servers are started on and the clients connect to
    pub host: String,
    pub ports: PortsConfig,
    pub lifecycle: LifecycleConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct PortsConfig {
    pub rest: u16,
    pub graphql: u16,
    pub grpc: u16,
    pub soap: u16,
}

#[serde_as]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct LifecycleConfig {
    /// Delay between spawning a server and checking that it is still alive
    #[serde_as(as = "DisplayFromStr")]
    pub startup_grace: humantime::Duration,
    #[serde_as(as = "DisplayFromStr")]
    pub ready_timeout: humantime::Duration,
    #[serde_as(as = "DisplayFromStr")]
    pub poll_interval: humantime::Duration,
    /// Time given to a server to exit after SIGTERM before it is killed
    #[serde_as(as = "DisplayFromStr")]
    pub stop_timeout: humantime::Duration,
    /// Extra delay used instead of the readiness check for gRPC
    #[serde_as(as = "DisplayFromStr")]
    pub grpc_grace: humantime::Duration,
    /// Pause after all servers are started, before the first request
    #[serde_as(as = "DisplayFromStr")]
    pub settle_time: humantime::Duration,
}

impl PortsConfig {
    pub fn port(&self, protocol: Protocol) -> u16 {
        match protocol {
            Protocol::Rest => self.rest,
            Protocol::GraphQl => self.graphql,
            Protocol::Grpc => self.grpc,
            Protocol::Soap => self.soap,
        }
    }
}

impl Display for BenchConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{ host: {}, ports: {{ rest: {}, graphql: {}, grpc: {}, soap: {} }}, lifecycle: {} }}",
            self.host,
            self.ports.rest,
            self.ports.graphql,
            self.ports.grpc,
            self.ports.soap,
            self.lifecycle
        )
    }
}

impl Display for LifecycleConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{ startup_grace: {}, ready_timeout: {}, poll_interval: {}, stop_timeout: {}, grpc_grace: {}, settle_time: {} }}",
            self.startup_grace,
            self.ready_timeout,
            self.poll_interval,
            self.stop_timeout,
            self.grpc_grace,
            self.settle_time
        )
    }
}
