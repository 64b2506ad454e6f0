use std::collections::VecDeque;
use std::ffi::OsString;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Child;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::debug;
use users_sdk::protocol::Protocol;

/// Number of captured output lines kept for error reporting.
pub const OUTPUT_TAIL_LINES: usize = 50;

const DRAIN_TIMEOUT: Duration = Duration::from_secs(1);

/// Program and arguments used to spawn a server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerCommand {
    pub program: OsString,
    pub args: Vec<OsString>,
}

impl ServerCommand {
    pub fn new(program: impl Into<OsString>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(OsString::from).collect(),
        }
    }

    /// Command line of the bundled `user-server` binary.
    pub fn user_server(executable: &Path, protocol: Protocol, address: &str, data: &Path) -> Self {
        Self {
            program: executable.as_os_str().to_owned(),
            args: vec![
                "--protocol".into(),
                protocol.as_str().into(),
                "--address".into(),
                address.into(),
                "--data".into(),
                data.as_os_str().to_owned(),
            ],
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct OutputTail {
    lines: Arc<Mutex<VecDeque<String>>>,
}

impl OutputTail {
    fn push(&self, line: String) {
        if let Ok(mut lines) = self.lines.lock() {
            if lines.len() == OUTPUT_TAIL_LINES {
                lines.pop_front();
            }
            lines.push_back(line);
        }
    }

    pub(crate) fn joined(&self) -> String {
        self.lines
            .lock()
            .map(|lines| lines.iter().cloned().collect::<Vec<_>>().join("\n"))
            .unwrap_or_default()
    }
}

/// A spawned server process owned by the lifecycle manager.
#[derive(Debug)]
pub struct ServerProcessHandle {
    pub protocol: Protocol,
    pub port: u16,
    pub(crate) child: Child,
    output: OutputTail,
    drains: Vec<JoinHandle<()>>,
}

impl ServerProcessHandle {
    /// Wraps the child and starts forwarding its piped stdout/stderr.
    pub(crate) fn new(protocol: Protocol, port: u16, mut child: Child) -> Self {
        let output = OutputTail::default();
        let mut drains = Vec::with_capacity(2);
        if let Some(stdout) = child.stdout.take() {
            drains.push(drain(protocol, stdout, output.clone()));
        }
        if let Some(stderr) = child.stderr.take() {
            drains.push(drain(protocol, stderr, output.clone()));
        }
        Self {
            protocol,
            port,
            child,
            output,
            drains,
        }
    }

    pub fn id(&self) -> Option<u32> {
        self.child.id()
    }

    /// Waits briefly for the output readers to finish and returns the captured tail.
    pub(crate) async fn collect_output(&mut self) -> String {
        for drain in self.drains.drain(..) {
            if timeout(DRAIN_TIMEOUT, drain).await.is_err() {
                debug!("Output of {} server was not fully drained.", self.protocol);
            }
        }
        self.output.joined()
    }
}

impl Drop for ServerProcessHandle {
    fn drop(&mut self) {
        for drain in &self.drains {
            drain.abort();
        }
    }
}

fn drain<R>(protocol: Protocol, reader: R, output: OutputTail) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut lines = BufReader::new(reader).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            debug!("[{protocol}] {line}");
            output.push(line);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_server_command_should_pass_protocol_address_and_data() {
        let command = ServerCommand::user_server(
            Path::new("/opt/user-server"),
            Protocol::GraphQl,
            "127.0.0.1:8001",
            Path::new("data/users.csv"),
        );
        assert_eq!(command.program, OsString::from("/opt/user-server"));
        assert_eq!(
            command.args,
            ["--protocol", "graphql", "--address", "127.0.0.1:8001", "--data", "data/users.csv"]
                .map(OsString::from)
        );
    }

    #[test]
    fn output_tail_should_keep_last_lines_only() {
        let tail = OutputTail::default();
        for line in 0..OUTPUT_TAIL_LINES + 5 {
            tail.push(line.to_string());
        }
        let joined = tail.joined();
        let lines: Vec<_> = joined.lines().collect();
        assert_eq!(lines.len(), OUTPUT_TAIL_LINES);
        assert_eq!(lines[0], "5");
        assert_eq!(lines.last().copied(), Some("54"));
    }
}
