use crate::configs::bench::LifecycleConfig;
use crate::error::BenchmarkError;
use crate::lifecycle::process::{ServerCommand, ServerProcessHandle};
use crate::lifecycle::readiness;
use crate::lifecycle::state::ServerState;
use std::collections::{BTreeMap, HashMap};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::{sleep, timeout};
use tracing::{debug, error, info, warn};
use users_sdk::protocol::Protocol;

/// Owns the server processes started for a run and tracks their states.
#[derive(Debug)]
pub struct ServerLifecycleManager {
    host: String,
    config: LifecycleConfig,
    verbose: bool,
    servers: BTreeMap<Protocol, ServerProcessHandle>,
    states: HashMap<Protocol, ServerState>,
}

impl ServerLifecycleManager {
    pub fn new(host: &str, config: LifecycleConfig, verbose: bool) -> Self {
        Self {
            host: host.to_string(),
            config,
            verbose,
            servers: BTreeMap::new(),
            states: HashMap::new(),
        }
    }

    pub fn state(&self, protocol: Protocol) -> ServerState {
        self.states.get(&protocol).copied().unwrap_or_default()
    }

    /// Protocols whose processes are currently tracked.
    pub fn tracked(&self) -> Vec<Protocol> {
        self.servers.keys().copied().collect()
    }

    /// Spawns the server, waits the startup grace period and checks that it is still alive.
    ///
    /// A process that already exited moves to `Unresponsive` and its captured output is
    /// returned in the error.
    pub async fn start(
        &mut self,
        protocol: Protocol,
        port: u16,
        command: &ServerCommand,
    ) -> Result<(), BenchmarkError> {
        if self.servers.contains_key(&protocol) {
            warn!("{protocol} server is already running, restarting it...");
            self.stop(protocol).await?;
        }

        self.set_state(protocol, ServerState::Starting);
        info!("Starting {protocol} server on port: {port}...");
        let (stdout, stderr) = if self.verbose {
            (Stdio::inherit(), Stdio::inherit())
        } else {
            (Stdio::piped(), Stdio::piped())
        };
        let child = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(stderr)
            .kill_on_drop(true)
            .spawn();
        let child = match child {
            Ok(child) => child,
            Err(source) => {
                self.set_state(protocol, ServerState::Unresponsive);
                return Err(BenchmarkError::ServerSpawn { protocol, source });
            }
        };

        let mut handle = ServerProcessHandle::new(protocol, port, child);
        debug!("{protocol} server spawned with PID: {:?}", handle.id());
        sleep(self.config.startup_grace.into()).await;

        match handle.child.try_wait() {
            Ok(Some(status)) => {
                self.set_state(protocol, ServerState::Unresponsive);
                let output = handle.collect_output().await;
                error!("{protocol} server exited during startup with {status}.");
                Err(BenchmarkError::ServerStartup {
                    protocol,
                    output: format!("{status}\n{output}"),
                })
            }
            Ok(None) => {
                self.servers.insert(protocol, handle);
                Ok(())
            }
            Err(error) => {
                warn!("Cannot check the status of {protocol} server: {error}");
                self.servers.insert(protocol, handle);
                Ok(())
            }
        }
    }

    /// Probes the server port until it accepts connections or the ready timeout elapses.
    pub async fn wait_ready(&mut self, protocol: Protocol, port: u16) -> bool {
        let ready_timeout: Duration = self.config.ready_timeout.into();
        info!(
            "Waiting up to {} for {protocol} server on port: {port}...",
            self.config.ready_timeout
        );
        let ready = readiness::wait_ready(
            &self.host,
            port,
            ready_timeout,
            self.config.poll_interval.into(),
        )
        .await;
        if self.servers.contains_key(&protocol) {
            let next = if ready {
                ServerState::Ready
            } else {
                ServerState::Unresponsive
            };
            self.set_state(protocol, next);
        }
        ready
    }

    /// Marks a tracked server as ready without probing it.
    pub fn mark_ready(&mut self, protocol: Protocol) {
        if self.servers.contains_key(&protocol) {
            self.set_state(protocol, ServerState::Ready);
        }
    }

    /// Sends SIGTERM, waits up to the stop timeout and kills the process if it is still alive.
    ///
    /// The handle is always released and the state always ends as `Stopped`.
    pub async fn stop(&mut self, protocol: Protocol) -> Result<(), BenchmarkError> {
        let Some(mut handle) = self.servers.remove(&protocol) else {
            debug!("{protocol} server is not tracked, nothing to stop.");
            return Ok(());
        };

        self.set_state(protocol, ServerState::Stopping);
        terminate(&mut handle);
        let result = match timeout(self.config.stop_timeout.into(), handle.child.wait()).await {
            Ok(Ok(status)) => {
                info!("{protocol} server has stopped with {status}.");
                Ok(())
            }
            Ok(Err(error)) => {
                warn!("Cannot wait for {protocol} server to stop: {error}, killing it...");
                handle.child.kill().await.map_err(BenchmarkError::Io)
            }
            Err(_) => {
                warn!(
                    "{protocol} server did not stop within {}, killing it...",
                    self.config.stop_timeout
                );
                handle.child.kill().await.map_err(BenchmarkError::Io)
            }
        };
        self.set_state(protocol, ServerState::Stopped);
        result
    }

    /// Stops every tracked server, a failure to stop one does not affect the others.
    pub async fn stop_all(&mut self) {
        for protocol in self.tracked() {
            if let Err(error) = self.stop(protocol).await {
                error!("Failed to stop {protocol} server: {error}");
            }
        }
    }

    fn set_state(&mut self, protocol: Protocol, next: ServerState) {
        let current = self.state(protocol);
        if !current.can_transition_to(next) {
            debug!("Unexpected {protocol} server state transition: {current} -> {next}");
        }
        info!("{protocol} server: {current} -> {next}");
        self.states.insert(protocol, next);
    }
}

#[cfg(unix)]
fn terminate(handle: &mut ServerProcessHandle) {
    use libc::{kill, pid_t, SIGTERM};

    let Some(pid) = handle.id() else {
        return;
    };
    // SAFETY: the PID belongs to a child that has not been reaped yet.
    let result = unsafe { kill(pid as pid_t, SIGTERM) };
    if result != 0 {
        warn!(
            "Cannot send SIGTERM to {} server (PID: {pid}).",
            handle.protocol
        );
    }
}

#[cfg(not(unix))]
fn terminate(handle: &mut ServerProcessHandle) {
    if let Err(error) = handle.child.start_kill() {
        warn!("Cannot terminate {} server: {error}", handle.protocol);
    }
}
