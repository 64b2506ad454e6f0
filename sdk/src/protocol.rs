use clap::ValueEnum;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// API style under test.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    ValueEnum,
)]
pub enum Protocol {
    #[display("REST")]
    #[serde(rename = "rest")]
    #[value(name = "REST")]
    Rest,
    #[display("GraphQL")]
    #[serde(rename = "graphql")]
    #[value(name = "GraphQL")]
    GraphQl,
    #[display("gRPC")]
    #[serde(rename = "grpc")]
    #[value(name = "gRPC")]
    Grpc,
    #[display("SOAP")]
    #[serde(rename = "soap")]
    #[value(name = "SOAP")]
    Soap,
}

impl Protocol {
    pub const ALL: [Protocol; 4] = [
        Protocol::Rest,
        Protocol::GraphQl,
        Protocol::Grpc,
        Protocol::Soap,
    ];

    pub fn default_port(&self) -> u16 {
        match self {
            Protocol::Rest => 8000,
            Protocol::GraphQl => 8001,
            Protocol::Soap => 8002,
            Protocol::Grpc => 50051,
        }
    }

    /// Lowercase identifier used for config keys and CLI values of the server.
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Rest => "rest",
            Protocol::GraphQl => "graphql",
            Protocol::Grpc => "grpc",
            Protocol::Soap => "soap",
        }
    }
}

impl FromStr for Protocol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rest" => Ok(Protocol::Rest),
            "graphql" => Ok(Protocol::GraphQl),
            "grpc" => Ok(Protocol::Grpc),
            "soap" => Ok(Protocol::Soap),
            _ => Err(format!("Unknown protocol: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_protocol_names_case_insensitively() {
        assert_eq!("REST".parse::<Protocol>().unwrap(), Protocol::Rest);
        assert_eq!("GraphQL".parse::<Protocol>().unwrap(), Protocol::GraphQl);
        assert_eq!("grpc".parse::<Protocol>().unwrap(), Protocol::Grpc);
        assert_eq!("Soap".parse::<Protocol>().unwrap(), Protocol::Soap);
        assert!("thrift".parse::<Protocol>().is_err());
    }

    #[test]
    fn display_should_round_trip_through_from_str() {
        for protocol in Protocol::ALL {
            assert_eq!(protocol.to_string().parse::<Protocol>().unwrap(), protocol);
        }
    }
}
