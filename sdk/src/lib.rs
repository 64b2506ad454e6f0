pub mod client;
pub mod data;
pub mod error;
pub mod graphql;
pub mod grpc;
pub mod models;
pub mod protocol;
pub mod rest;
pub mod soap;
