//! Subprocess launch and supervision.
//!
//! The launcher takes a fully composed argument vector and a replaceable
//! spawn function, logs the joined command line for operator traceability,
//! and either blocks until the child exits or hands the live child back to
//! the caller. No retries, no timeout: a spawn failure propagates as-is and
//! termination is the caller's business.

use crate::error::UeCmdError;
use std::io;
use std::process::ExitStatus;
use tokio::process::{Child, Command};

/// Replaceable spawn function, `Popen`-shaped: the first token is the
/// program, the rest its arguments.
pub type SpawnFn = Box<dyn Fn(&[String]) -> io::Result<Child> + Send + Sync>;

/// Result of a launch: either the editor ran to completion or it is still
/// running and owned by the caller.
#[derive(Debug)]
pub enum Launched {
    Completed(ExitStatus),
    Detached(Child),
}

impl Launched {
    /// The exit status, when the launch waited for completion.
    pub fn exit_status(&self) -> Option<ExitStatus> {
        match self {
            Self::Completed(status) => Some(*status),
            Self::Detached(_) => None,
        }
    }
}

/// Spawns the editor process from a composed argument vector.
pub struct ProcessLauncher {
    spawn: SpawnFn,
}

impl ProcessLauncher {
    /// A launcher that spawns real processes via [`tokio::process::Command`].
    pub fn new() -> Self {
        Self {
            spawn: Box::new(spawn_process),
        }
    }

    /// A launcher with a custom spawn function, for test doubles or wrapper
    /// environments.
    pub fn with_spawner(spawn: SpawnFn) -> Self {
        Self { spawn }
    }

    /// Spawn `argv` and, when `wait` is set, block until the child exits.
    pub async fn launch(&self, argv: &[String], wait: bool) -> Result<Launched, UeCmdError> {
        tracing::info!("Run Unreal Editor with commands: {}", argv.join(" "));

        let mut child = (self.spawn)(argv).map_err(UeCmdError::Spawn)?;

        if wait {
            let status = child.wait().await.map_err(UeCmdError::Spawn)?;
            tracing::info!(
                "Editor process exited with code {}",
                status.code().unwrap_or(-1)
            );
            Ok(Launched::Completed(status))
        } else {
            Ok(Launched::Detached(child))
        }
    }
}

impl Default for ProcessLauncher {
    fn default() -> Self {
        Self::new()
    }
}

fn spawn_process(argv: &[String]) -> io::Result<Child> {
    let (program, args) = argv.split_first().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "empty argument vector")
    })?;
    Command::new(program).args(args).spawn()
}
