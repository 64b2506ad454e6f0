use clap::Parser;
use std::path::PathBuf;
use users_sdk::protocol::Protocol;

#[derive(Parser, Debug)]
#[command(author, version, about = "User management demo server", long_about = None)]
pub struct Args {
    /// Protocol served by this process
    #[arg(short, long, value_enum, ignore_case = true)]
    pub protocol: Protocol,

    /// Address to bind to, defaults to 127.0.0.1 with the default port of the protocol
    #[arg(short, long)]
    pub address: Option<String>,

    /// CSV file with the `id,name,email` records the store is seeded with
    #[arg(short, long, default_value = "data/users.csv")]
    pub data: PathBuf,
}

impl Args {
    pub fn address(&self) -> String {
        self.address
            .clone()
            .unwrap_or_else(|| format!("127.0.0.1:{}", self.protocol.default_port()))
    }
}
