use crate::client_factory::ClientFactory;
use crate::configs::bench::BenchConfig;
use crate::error::BenchmarkError;
use crate::lifecycle::manager::ServerLifecycleManager;
use crate::lifecycle::process::ServerCommand;
use crate::signal::shutdown_signal;
use crate::suite::OperationSuite;
use api_bench_report::report::BenchmarkReport;
use derive_more::Display;
use std::collections::HashMap;
use std::fmt::Formatter;
use std::future::Future;
use std::path::PathBuf;
use tokio::time::sleep;
use tracing::{info, warn};
use users_sdk::models::user::User;
use users_sdk::protocol::Protocol;

/// Run parameters taken from the command line.
#[derive(Debug, Clone)]
pub struct BenchmarkSettings {
    pub requests: u32,
    pub output: PathBuf,
    pub keep_servers: bool,
    pub server_executable: PathBuf,
    pub data: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ProtocolOutcome {
    #[display("completed {operations} operations, {failed_requests} failed requests")]
    Completed {
        operations: usize,
        failed_requests: u64,
    },
    #[display("skipped: {reason}")]
    Skipped { reason: String },
}

/// Outcome of every selected protocol, in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub outcomes: Vec<(Protocol, ProtocolOutcome)>,
}

impl RunSummary {
    pub fn completed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| matches!(outcome, ProtocolOutcome::Completed { .. }))
            .count()
    }

    fn print(&self) {
        info!("Run summary:");
        for (protocol, outcome) in &self.outcomes {
            info!("{protocol}: {outcome}");
        }
    }
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{} protocols completed",
            self.completed(),
            self.outcomes.len()
        )
    }
}

/// Sequences server startup, the per-protocol operation suites, reporting and cleanup.
pub struct Orchestrator {
    settings: BenchmarkSettings,
    config: BenchConfig,
    protocols: Vec<Protocol>,
    test_users: Vec<User>,
    lifecycle: ServerLifecycleManager,
    client_factory: Box<dyn ClientFactory>,
}

impl Orchestrator {
    pub fn new(
        settings: BenchmarkSettings,
        config: BenchConfig,
        protocols: Vec<Protocol>,
        test_users: Vec<User>,
        client_factory: Box<dyn ClientFactory>,
        verbose: bool,
    ) -> Self {
        let lifecycle = ServerLifecycleManager::new(&config.host, config.lifecycle, verbose);
        Self {
            settings,
            config,
            protocols,
            test_users,
            lifecycle,
            client_factory,
        }
    }

    /// Executes the benchmarks and always stops the started servers afterwards,
    /// also when interrupted by Ctrl-C or SIGTERM.
    pub async fn run(mut self) -> Result<(), BenchmarkError> {
        self.run_until(shutdown_signal()).await.map(|_| ())
    }

    /// Same as `run`, interrupted when `shutdown` resolves.
    /// Returns `None` when the run was interrupted.
    pub async fn run_until<S>(
        &mut self,
        shutdown: S,
    ) -> Result<Option<RunSummary>, BenchmarkError>
    where
        S: Future<Output = ()>,
    {
        let result = tokio::select! {
            result = self.execute() => result.map(Some),
            _ = shutdown => Ok(None),
        };

        self.lifecycle.stop_all().await;
        let summary = result?;
        match &summary {
            Some(summary) => info!("Finished the benchmarks, {summary}."),
            None => warn!("Benchmarks were interrupted, all started servers have been stopped."),
        }
        Ok(summary)
    }

    async fn execute(&mut self) -> Result<RunSummary, BenchmarkError> {
        let mut skipped = HashMap::new();
        if self.settings.keep_servers {
            info!("Using already running servers.");
        } else {
            self.start_servers(&mut skipped).await;
        }
        self.wait_for_servers(&skipped).await;

        let host = self.config.host.clone();
        let requests = self.settings.requests;
        let mut summary = RunSummary::default();
        let mut results = Vec::new();
        for protocol in self.protocols.clone() {
            if let Some(reason) = skipped.remove(&protocol) {
                summary
                    .outcomes
                    .push((protocol, ProtocolOutcome::Skipped { reason }));
                continue;
            }

            let port = self.config.ports.port(protocol);
            let client = match self.client_factory.create_client(protocol, &host, port) {
                Ok(client) => client,
                Err(error) => {
                    let error = BenchmarkError::CannotCreateClient(error);
                    warn!("Skipping {protocol} benchmarks: {error}");
                    summary.outcomes.push((
                        protocol,
                        ProtocolOutcome::Skipped {
                            reason: error.to_string(),
                        },
                    ));
                    continue;
                }
            };

            info!("Benchmarking {protocol} API on {host}:{port}...");
            let protocol_results = OperationSuite::new(client.as_ref(), &self.test_users, requests)
                .run()
                .await;
            if let Err(error) = client.disconnect().await {
                warn!("Cannot disconnect {protocol} client: {error}");
            }

            summary.outcomes.push((
                protocol,
                ProtocolOutcome::Completed {
                    operations: protocol_results.len(),
                    failed_requests: protocol_results.iter().map(|r| r.error_count).sum(),
                },
            ));
            results.extend(protocol_results);
        }

        let report = BenchmarkReport::new(requests, results);
        report.print_summary();
        summary.print();
        report
            .dump_to_files(&self.settings.output)
            .map_err(BenchmarkError::CannotWriteReport)?;
        Ok(summary)
    }

    async fn start_servers(&mut self, skipped: &mut HashMap<Protocol, String>) {
        for protocol in self.protocols.clone() {
            let port = self.config.ports.port(protocol);
            let address = format!("{}:{port}", self.config.host);
            let command = ServerCommand::user_server(
                &self.settings.server_executable,
                protocol,
                &address,
                &self.settings.data,
            );
            if let Err(error) = self.lifecycle.start(protocol, port, &command).await {
                warn!("Skipping {protocol} benchmarks: {error}");
                skipped.insert(protocol, error.to_string());
            }
        }
    }

    /// Best effort: an unresponsive server is reported and benchmarked anyway.
    async fn wait_for_servers(&mut self, skipped: &HashMap<Protocol, String>) {
        let lifecycle = self.config.lifecycle;
        for protocol in self.protocols.clone() {
            if skipped.contains_key(&protocol) {
                continue;
            }

            let port = self.config.ports.port(protocol);
            if protocol == Protocol::Grpc {
                if !self.settings.keep_servers {
                    sleep(lifecycle.grpc_grace.into()).await;
                }
                self.lifecycle.mark_ready(protocol);
                continue;
            }

            if !self.lifecycle.wait_ready(protocol, port).await {
                let error = BenchmarkError::ServerUnresponsive {
                    protocol,
                    port,
                    timeout: lifecycle.ready_timeout.into(),
                };
                warn!("{error}, proceeding anyway.");
            }
        }

        if !self.settings.keep_servers {
            info!("Waiting {} for the servers to settle...", lifecycle.settle_time);
            sleep(lifecycle.settle_time.into()).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_clients::{InMemoryClient, UnreachableClient};
    use std::time::Duration;
    use users_sdk::client::UserClient;
    use users_sdk::error::ProtocolError;

    struct FakeClientFactory {
        users: Vec<User>,
    }

    impl ClientFactory for FakeClientFactory {
        fn create_client(
            &self,
            protocol: Protocol,
            _: &str,
            _: u16,
        ) -> Result<Box<dyn UserClient>, ProtocolError> {
            match protocol {
                Protocol::Rest | Protocol::Grpc => {
                    Ok(Box::new(InMemoryClient::seeded(protocol, &self.users)))
                }
                Protocol::Soap => Ok(Box::new(UnreachableClient)),
                Protocol::GraphQl => Err(ProtocolError::CannotParseUrl),
            }
        }
    }

    fn test_users() -> Vec<User> {
        vec![
            User::new(1, "Nguyễn Văn An", "an.nguyen@gmail.com"),
            User::new(2, "Phạm Thị Mai", "mai.pham@example.com"),
        ]
    }

    fn orchestrator(output: PathBuf) -> Orchestrator {
        let users = test_users();
        let mut config = BenchConfig::default();
        config.lifecycle.ready_timeout = Duration::from_millis(100).into();
        config.lifecycle.poll_interval = Duration::from_millis(50).into();
        let settings = BenchmarkSettings {
            requests: 3,
            output,
            keep_servers: true,
            server_executable: PathBuf::from("user-server"),
            data: PathBuf::from("data/users.csv"),
        };
        Orchestrator::new(
            settings,
            config,
            vec![Protocol::Soap, Protocol::GraphQl, Protocol::Rest, Protocol::Grpc],
            users.clone(),
            Box::new(FakeClientFactory { users }),
            false,
        )
    }

    #[tokio::test]
    async fn failing_protocols_should_not_abort_the_run() {
        let output = tempfile::tempdir().unwrap();
        let mut orchestrator = orchestrator(output.path().to_path_buf());
        let summary = orchestrator.execute().await.unwrap();

        let protocols: Vec<_> = summary.outcomes.iter().map(|(p, _)| *p).collect();
        assert_eq!(
            protocols,
            vec![Protocol::Soap, Protocol::GraphQl, Protocol::Rest, Protocol::Grpc]
        );
        assert_eq!(
            summary.outcomes[0].1,
            ProtocolOutcome::Completed {
                operations: 6,
                failed_requests: 15,
            }
        );
        assert!(matches!(summary.outcomes[1].1, ProtocolOutcome::Skipped { .. }));
        assert_eq!(
            summary.outcomes[2].1,
            ProtocolOutcome::Completed {
                operations: 6,
                failed_requests: 0,
            }
        );
        assert_eq!(summary.completed(), 3);
        assert_eq!(summary.to_string(), "3/4 protocols completed");

        let files = std::fs::read_dir(output.path()).unwrap().count();
        assert_eq!(files, 2);
    }

    #[tokio::test]
    async fn run_should_succeed_with_partial_protocol_failures() {
        let output = tempfile::tempdir().unwrap();
        let orchestrator = orchestrator(output.path().to_path_buf());
        orchestrator.run().await.unwrap();
        assert_eq!(std::fs::read_dir(output.path()).unwrap().count(), 2);
    }

    #[test]
    fn outcomes_should_be_displayed_for_the_summary() {
        let completed = ProtocolOutcome::Completed {
            operations: 6,
            failed_requests: 2,
        };
        let skipped = ProtocolOutcome::Skipped {
            reason: "gRPC server exited during startup".to_string(),
        };
        assert_eq!(completed.to_string(), "completed 6 operations, 2 failed requests");
        assert_eq!(skipped.to_string(), "skipped: gRPC server exited during startup");
    }

    #[cfg(unix)]
    mod managed_servers {
        use super::*;
        use serial_test::serial;
        use std::fs;
        use std::os::unix::fs::PermissionsExt;
        use std::path::Path;
        use tempfile::TempDir;

        /// Writes an executable standing in for `user-server`.
        /// It receives `--protocol <name>` as its first two arguments.
        fn server_script(dir: &Path, body: &str) -> PathBuf {
            let path = dir.join("user-server.sh");
            fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
            path
        }

        fn free_port() -> u16 {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        }

        fn managed_orchestrator(
            workspace: &TempDir,
            script_body: &str,
            protocols: Vec<Protocol>,
            ready_timeout: Duration,
        ) -> Orchestrator {
            let users = test_users();
            let mut config = BenchConfig::default();
            config.ports.rest = free_port();
            config.lifecycle.startup_grace = Duration::from_millis(300).into();
            config.lifecycle.ready_timeout = ready_timeout.into();
            config.lifecycle.poll_interval = Duration::from_millis(50).into();
            config.lifecycle.stop_timeout = Duration::from_secs(2).into();
            config.lifecycle.grpc_grace = Duration::from_millis(10).into();
            config.lifecycle.settle_time = Duration::from_millis(10).into();
            let settings = BenchmarkSettings {
                requests: 2,
                output: workspace.path().join("reports"),
                keep_servers: false,
                server_executable: server_script(workspace.path(), script_body),
                data: PathBuf::from("data/users.csv"),
            };
            Orchestrator::new(
                settings,
                config,
                protocols,
                users.clone(),
                Box::new(FakeClientFactory { users }),
                false,
            )
        }

        fn read_pid(path: &Path) -> libc::pid_t {
            fs::read_to_string(path).unwrap().trim().parse().unwrap()
        }

        fn is_alive(pid: libc::pid_t) -> bool {
            unsafe { libc::kill(pid, 0) == 0 }
        }

        #[tokio::test]
        #[serial]
        async fn server_exiting_on_startup_should_be_skipped() {
            let workspace = tempfile::tempdir().unwrap();
            let pid_file = workspace.path().join("grpc.pid");
            let script = format!(
                r#"case "$2" in
  rest) echo 'address in use' >&2; exit 1 ;;
  *) echo $$ > {}; exec sleep 30 ;;
esac"#,
                pid_file.display()
            );
            let mut orchestrator = managed_orchestrator(
                &workspace,
                &script,
                vec![Protocol::Rest, Protocol::Grpc],
                Duration::from_millis(100),
            );

            let summary = orchestrator
                .run_until(std::future::pending())
                .await
                .unwrap()
                .unwrap();

            match &summary.outcomes[0] {
                (Protocol::Rest, ProtocolOutcome::Skipped { reason }) => {
                    assert!(reason.contains("address in use"), "reason: {reason}");
                }
                outcome => panic!("unexpected outcome: {outcome:?}"),
            }
            assert_eq!(
                summary.outcomes[1],
                (
                    Protocol::Grpc,
                    ProtocolOutcome::Completed {
                        operations: 6,
                        failed_requests: 0,
                    }
                )
            );
            let reports = fs::read_dir(workspace.path().join("reports")).unwrap().count();
            assert_eq!(reports, 2);
            assert!(orchestrator.lifecycle.tracked().is_empty());
            assert!(!is_alive(read_pid(&pid_file)));
        }

        #[tokio::test]
        #[serial]
        async fn interrupted_run_should_stop_started_servers() {
            let workspace = tempfile::tempdir().unwrap();
            let pid_dir = workspace.path().display().to_string();
            let script = format!("echo $$ > {pid_dir}/$2.pid\nexec sleep 30");
            let mut orchestrator = managed_orchestrator(
                &workspace,
                &script,
                vec![Protocol::Grpc, Protocol::Rest],
                Duration::from_secs(30),
            );

            let started_at = std::time::Instant::now();
            let summary = orchestrator
                .run_until(sleep(Duration::from_secs(1)))
                .await
                .unwrap();

            assert!(summary.is_none());
            assert!(started_at.elapsed() < Duration::from_secs(10));
            assert!(orchestrator.lifecycle.tracked().is_empty());
            for protocol in [Protocol::Grpc, Protocol::Rest] {
                let pid = read_pid(&workspace.path().join(format!("{}.pid", protocol.as_str())));
                assert!(!is_alive(pid), "{protocol} server is still running");
            }
            assert!(!workspace.path().join("reports").exists());
        }
    }
}
