//! Runner backed by real child processes

use std::io::{Read, Write};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use super::{CommandOutput, CommandRunner, Invocation, OutputMode};
use crate::error::{Result, SandboxError};
use crate::host::SearchPath;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Spawns programs with `std::process::Command`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation, path: &SearchPath) -> Result<CommandOutput> {
        let program = path
            .find(&invocation.program)
            .ok_or_else(|| SandboxError::CommandSpawnFailed {
                program: invocation.program.clone(),
                reason: "not found on PATH".to_string(),
            })?;

        let mut cmd = Command::new(&program);
        cmd.args(&invocation.args).env("PATH", path.to_os_string());

        match invocation.mode {
            OutputMode::Capture => {
                cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
            }
            OutputMode::Inherit => {
                cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
            }
        }
        if invocation.stdin.is_some() {
            cmd.stdin(Stdio::piped());
        } else if invocation.mode == OutputMode::Capture {
            cmd.stdin(Stdio::null());
        }

        debug!(command = %invocation, resolved = %program.display(), "spawning");
        let mut child = cmd.spawn().map_err(|e| SandboxError::CommandSpawnFailed {
            program: invocation.program.clone(),
            reason: e.to_string(),
        })?;

        let writer = feed_stdin(&mut child, invocation.stdin.clone());
        let stdout_reader = child.stdout.take().map(drain);
        let stderr_reader = child.stderr.take().map(drain);

        let status = wait_for(&mut child, invocation)?;

        if let Some(handle) = writer {
            if let Ok(Err(e)) = handle.join() {
                warn!(command = %invocation, error = %e, "child closed stdin early");
            }
        }

        let output = CommandOutput {
            status_code: exit_code(status),
            stdout: collect(stdout_reader),
            stderr: collect(stderr_reader),
        };
        debug!(command = %invocation, status = output.status_code, "finished");
        Ok(output)
    }
}

fn feed_stdin(
    child: &mut Child,
    input: Option<Vec<u8>>,
) -> Option<JoinHandle<std::io::Result<()>>> {
    let input = input?;
    let mut stdin = child.stdin.take()?;
    Some(thread::spawn(move || {
        stdin.write_all(&input)?;
        stdin.flush()
    }))
}

fn drain<R: Read + Send + 'static>(mut stream: R) -> JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = stream.read_to_end(&mut buf);
        buf
    })
}

fn collect(handle: Option<JoinHandle<Vec<u8>>>) -> Vec<u8> {
    handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default()
}

fn wait_for(child: &mut Child, invocation: &Invocation) -> Result<ExitStatus> {
    let Some(limit) = invocation.timeout else {
        return Ok(child.wait()?);
    };

    let deadline = Instant::now() + limit;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(status);
        }
        if Instant::now() >= deadline {
            warn!(command = %invocation, seconds = limit.as_secs(), "timed out, killing");
            let _ = child.kill();
            let _ = child.wait();
            return Err(SandboxError::CommandTimedOut {
                program: invocation.program.clone(),
                seconds: limit.as_secs(),
            });
        }
        thread::sleep(POLL_INTERVAL);
    }
}

#[cfg(unix)]
fn exit_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    status
        .code()
        .or_else(|| status.signal().map(|sig| 128 + sig))
        .unwrap_or(1)
}

#[cfg(not(unix))]
fn exit_code(status: ExitStatus) -> i32 {
    status
        .code()
        .unwrap_or(if status.success() { 0 } else { 1 })
}
