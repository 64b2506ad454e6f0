use crate::error::BenchmarkError;
use clap::Parser;
use std::env;
use std::io;
use std::path::PathBuf;
use std::str::FromStr;
use users_sdk::protocol::Protocol;

const SERVER_EXECUTABLE: &str = "user-server";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Compares REST, GraphQL, gRPC and SOAP user management APIs",
    long_about = None
)]
pub struct Args {
    /// APIs to benchmark, in execution order
    #[arg(
        long,
        num_args = 1..,
        value_delimiter = ',',
        default_values = ["REST", "GraphQL", "gRPC", "SOAP"]
    )]
    pub apis: Vec<String>,

    /// Repetitions of every operation
    #[arg(long, default_value_t = 100)]
    pub requests: u32,

    /// Directory the text and JSON reports are written to
    #[arg(long, default_value = "./reports")]
    pub output: PathBuf,

    /// Use already running servers instead of starting them
    #[arg(long, default_value_t = false)]
    pub keep_servers: bool,

    /// Optional TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// CSV file with the `id,name,email` records, also used to seed the servers
    #[arg(long, default_value = "data/users.csv")]
    pub data: PathBuf,

    /// Path to the server binary, defaults to `user-server` next to this executable
    #[arg(short = 'e', long)]
    pub server_executable_path: Option<PathBuf>,

    /// Show the output of the started servers instead of capturing it
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Args {
    /// Parses the selected APIs, case-insensitively and without duplicates.
    pub fn protocols(&self) -> Result<Vec<Protocol>, BenchmarkError> {
        let mut protocols = Vec::with_capacity(self.apis.len());
        for api in &self.apis {
            let protocol = Protocol::from_str(api.trim())
                .map_err(|_| BenchmarkError::UnknownProtocol(api.clone()))?;
            if !protocols.contains(&protocol) {
                protocols.push(protocol);
            }
        }
        Ok(protocols)
    }

    pub fn server_executable(&self) -> Result<PathBuf, io::Error> {
        if let Some(path) = &self.server_executable_path {
            return Ok(path.clone());
        }

        let executable = format!("{SERVER_EXECUTABLE}{}", env::consts::EXE_SUFFIX);
        Ok(env::current_exe()?.with_file_name(executable))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_should_select_all_apis() {
        let args = Args::parse_from(["api-bench"]);
        assert_eq!(args.protocols().unwrap(), Protocol::ALL.to_vec());
        assert_eq!(args.requests, 100);
        assert_eq!(args.output, PathBuf::from("./reports"));
        assert!(!args.keep_servers);
    }

    #[test]
    fn apis_should_be_parsed_case_insensitively_without_duplicates() {
        let args = Args::parse_from(["api-bench", "--apis", "grpc", "REST", "GRPC,soap"]);
        assert_eq!(
            args.protocols().unwrap(),
            vec![Protocol::Grpc, Protocol::Rest, Protocol::Soap]
        );
    }

    #[test]
    fn unknown_api_should_be_rejected() {
        let args = Args::parse_from(["api-bench", "--apis", "REST", "thrift"]);
        assert!(matches!(
            args.protocols(),
            Err(BenchmarkError::UnknownProtocol(api)) if api == "thrift"
        ));
    }

    #[test]
    fn explicit_server_executable_should_be_used() {
        let args = Args::parse_from(["api-bench", "-e", "/opt/user-server"]);
        assert_eq!(
            args.server_executable().unwrap(),
            PathBuf::from("/opt/user-server")
        );
    }
}
