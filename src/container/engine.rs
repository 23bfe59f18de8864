//! Running the container engine as a child process

use std::process::{Command, ExitStatus};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;

use tracing::{debug, info};

use super::invocation::{BuildInvocation, Invocation, RunInvocation};
use crate::error::{LaunchError, Result};

/// Something that can carry out engine invocations and report exit codes.
///
/// A nonzero exit code is a normal result, not an error; errors are
/// reserved for failing to start or wait on the engine at all.
pub trait ContainerEngine {
    fn execute(&self, invocation: &Invocation) -> Result<i32>;

    fn build(&self, build: &BuildInvocation) -> Result<i32> {
        self.execute(&build.to_invocation())
    }

    fn run(&self, run: &RunInvocation) -> Result<i32> {
        self.execute(&run.to_invocation())
    }

    /// Whether the user interrupted an invocation since start-up
    fn interrupted(&self) -> bool {
        false
    }
}

static INTERRUPTED: AtomicBool = AtomicBool::new(false);
static HANDLER: OnceLock<std::result::Result<(), String>> = OnceLock::new();

/// Install the process-wide Ctrl+C handler once. The launcher keeps running
/// on SIGINT so it can collect the child's exit status; the child, sharing
/// the terminal's foreground process group, receives the signal itself.
fn ignore_interrupts() -> Result<()> {
    HANDLER
        .get_or_init(|| {
            ctrlc::set_handler(|| {
                INTERRUPTED.store(true, Ordering::SeqCst);
                debug!("interrupt received; waiting for the engine to exit");
            })
            .map_err(|e| e.to_string())
        })
        .clone()
        .map_err(LaunchError::Signal)
}

/// Process exit code for a finished child. Signal deaths map to
/// `128 + signal`, as a shell reports them.
pub fn status_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}

/// Runs the engine's command-line client (`docker`, `podman`, ...) in the
/// foreground with inherited stdio, one invocation at a time.
#[derive(Debug, Default, Clone)]
pub struct CliEngine;

impl CliEngine {
    pub fn new() -> Self {
        Self
    }
}

impl ContainerEngine for CliEngine {
    fn execute(&self, invocation: &Invocation) -> Result<i32> {
        ignore_interrupts()?;

        info!(command = %invocation.command_line(), "invoking container engine");

        let mut child = Command::new(&invocation.program)
            .args(&invocation.args)
            .spawn()
            .map_err(|source| LaunchError::Spawn {
                program: invocation.program.clone(),
                source,
            })?;

        let status = child.wait().map_err(|source| LaunchError::Wait {
            program: invocation.program.clone(),
            source,
        })?;

        let code = status_code(status);
        debug!(program = %invocation.program, code, "engine exited");
        Ok(code)
    }

    fn interrupted(&self) -> bool {
        INTERRUPTED.load(Ordering::SeqCst)
    }
}
