//! External process execution using `std::process`.
//!
//! stdout and stderr are drained on helper threads so a chatty child never
//! blocks on a full pipe. When a timeout is set the calling thread polls
//! `try_wait` until the deadline and kills the child once it passes.

use std::io::{self, Read};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use fabrik_core::{
    application::{ApplicationError, ports::CommandRunner},
    domain::{CommandOutput, CommandSpec},
    error::{FabrikError, FabrikResult},
};

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Production runner that spawns real processes.
#[derive(Debug, Clone, Copy)]
pub struct ProcessRunner {
    poll_interval: Duration,
}

impl ProcessRunner {
    pub fn new() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&self, spec: &CommandSpec) -> FabrikResult<CommandOutput> {
        let mut command = Command::new(&spec.program);
        command
            .args(&spec.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &spec.current_dir {
            command.current_dir(dir);
        }

        debug!(command = %spec, "spawning process");
        let mut child = command.spawn().map_err(|e| spawn_error(&spec.program, e))?;

        let stdout = child.stdout.take().map(drain);
        let stderr = child.stderr.take().map(drain);

        let status = match spec.timeout {
            None => child.wait().map_err(|e| launch_error(&spec.program, e))?,
            Some(timeout) => match self.wait_until(&mut child, timeout, &spec.program)? {
                Some(status) => status,
                None => {
                    warn!(command = %spec, ?timeout, "process timed out, killing it");
                    abandon(&mut child);
                    return Err(ApplicationError::CommandTimedOut {
                        command: spec.to_string(),
                        timeout_secs: whole_seconds(timeout),
                    }
                    .into());
                }
            },
        };

        let output = CommandOutput {
            status: status.code(),
            stdout: decode_stdout(collect(stdout), &spec.program)?,
            stderr: String::from_utf8_lossy(&collect(stderr)).into_owned(),
        };
        debug!(status = ?output.status, "process finished");
        Ok(output)
    }
}

impl ProcessRunner {
    /// Poll until the child exits or `timeout` elapses (`Ok(None)`).
    fn wait_until(
        &self,
        child: &mut Child,
        timeout: Duration,
        program: &str,
    ) -> FabrikResult<Option<ExitStatus>> {
        let deadline = Instant::now() + timeout;
        loop {
            match child.try_wait() {
                Ok(Some(status)) => return Ok(Some(status)),
                Ok(None) => {}
                Err(e) => {
                    abandon(child);
                    return Err(launch_error(program, e));
                }
            }
            if Instant::now() >= deadline {
                return Ok(None);
            }
            thread::sleep(self.poll_interval);
        }
    }
}

fn drain<R: Read + Send + 'static>(mut pipe: R) -> JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buffer = Vec::new();
        let _ = pipe.read_to_end(&mut buffer);
        buffer
    })
}

/// Kill and reap a child we stopped waiting for.
///
/// The readers are left behind: a grandchild may still hold the pipes.
fn abandon(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

fn collect(reader: Option<JoinHandle<Vec<u8>>>) -> Vec<u8> {
    reader
        .and_then(|handle| handle.join().ok())
        .unwrap_or_default()
}

/// Manifests are parsed downstream, so stdout must be real text.
fn decode_stdout(bytes: Vec<u8>, program: &str) -> FabrikResult<String> {
    String::from_utf8(bytes).map_err(|e| {
        ApplicationError::InvalidOutput {
            program: program.to_string(),
            reason: e.utf8_error().to_string(),
        }
        .into()
    })
}

fn whole_seconds(timeout: Duration) -> u64 {
    timeout.as_secs() + u64::from(timeout.subsec_nanos() > 0)
}

fn spawn_error(program: &str, e: io::Error) -> FabrikError {
    if e.kind() == io::ErrorKind::NotFound {
        ApplicationError::CommandNotFound {
            program: program.to_string(),
        }
        .into()
    } else {
        launch_error(program, e)
    }
}

fn launch_error(program: &str, e: io::Error) -> FabrikError {
    ApplicationError::CommandLaunchFailed {
        program: program.to_string(),
        reason: e.to_string(),
    }
    .into()
}
