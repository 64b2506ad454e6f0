pub mod bench;
pub mod config_provider;
pub mod defaults;
