pub mod client;
pub mod config;
pub mod envelope;
pub mod wsdl;
pub mod xml;
