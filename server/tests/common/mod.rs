pub mod graphql;
pub mod grpc;
pub mod rest;
pub mod scenarios;
pub mod soap;

use assert_cmd::prelude::CommandCargoExt;
use async_trait::async_trait;
use std::fs;
use std::net::TcpStream;
use std::path::PathBuf;
use std::process::{Child, Command};
use std::thread::sleep;
use std::time::Duration;
use tempfile::TempDir;
use users_sdk::client::UserClient;
use users_sdk::protocol::Protocol;

const SEED_USERS: &str = "\
id,name,email
1,Nguyễn Văn An,an.nguyen@gmail.com
2,Trần Thị Bình,binh.tran@example.com
3,Lê Hoàng Cường,cuong.le@gmail.com
";

#[async_trait]
pub trait ClientFactory: Sync + Send {
    async fn create_client(&self) -> Box<dyn UserClient>;
}

pub struct TestServer {
    protocol: Protocol,
    address: String,
    data_dir: TempDir,
    child_handle: Option<Child>,
}

impl TestServer {
    pub fn new(protocol: Protocol, port: u16) -> Self {
        let data_dir = tempfile::tempdir().unwrap();
        fs::write(data_dir.path().join("users.csv"), SEED_USERS).unwrap();
        Self {
            protocol,
            address: format!("127.0.0.1:{port}"),
            data_dir,
            child_handle: None,
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    fn data_path(&self) -> PathBuf {
        self.data_dir.path().join("users.csv")
    }

    pub fn start(&mut self) {
        let mut command = Command::cargo_bin("user-server").unwrap();
        command
            .arg("--protocol")
            .arg(self.protocol.as_str())
            .arg("--address")
            .arg(&self.address)
            .arg("--data")
            .arg(self.data_path());
        self.child_handle = Some(command.spawn().unwrap());
        self.wait_until_listening();
    }

    fn wait_until_listening(&self) {
        for _ in 0..100 {
            if TcpStream::connect(&self.address).is_ok() {
                return;
            }
            sleep(Duration::from_millis(100));
        }
        panic!(
            "{} server did not start listening on: {}",
            self.protocol, self.address
        );
    }

    pub fn stop(&mut self) {
        if let Some(mut child_handle) = self.child_handle.take() {
            #[cfg(unix)]
            unsafe {
                use libc::kill;
                use libc::SIGTERM;
                kill(child_handle.id() as libc::pid_t, SIGTERM);
            }

            #[cfg(not(unix))]
            child_handle.kill().unwrap();

            child_handle.wait().unwrap();
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.stop();
    }
}
