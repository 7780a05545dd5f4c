use std::path::Path;
use std::process::{ExitStatus, Output, Stdio};
use std::time::Duration;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    process::{Child, Command},
    time::{self, Instant},
};
use tracing::{debug, warn};

use crate::{
    config::describe_limit,
    error::Error,
    scratch::ToolInvocation,
    types::{ExecutionResult, ExecutionStatus},
};

const READ_CHUNK: usize = 8 * 1024;

/// How long to keep draining pipes after a timeout kill
const DRAIN_GRACE: Duration = Duration::from_millis(200);

/// Which side of the exit/deadline race won
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Termination {
    Exited(ExitStatus),
    TimedOut,
}

#[derive(Debug)]
pub(crate) struct RunOutcome {
    pub stdout: String,
    pub stderr: String,
    pub termination: Termination,
    /// Measured from spawn to resolution
    pub elapsed: Duration,
}

impl RunOutcome {
    pub fn into_result(self, timeout_message: String) -> ExecutionResult {
        let (status, error) = match self.termination {
            Termination::TimedOut => (ExecutionStatus::Timeout, timeout_message),
            Termination::Exited(_) if !self.stderr.is_empty() => {
                (ExecutionStatus::Stderr, self.stderr)
            }
            Termination::Exited(status) if status.success() => {
                (ExecutionStatus::Success, String::new())
            }
            Termination::Exited(status) => (ExecutionStatus::NonZeroExit, exit_message(status)),
        };

        ExecutionResult {
            output: self.stdout,
            error,
            execution_time: self.elapsed.as_millis() as u64,
            status,
        }
    }
}

fn exit_message(status: ExitStatus) -> String {
    if let Some(code) = status.code() {
        return format!("Process exited with code {}", code);
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return format!("Process terminated by signal {}", signal);
        }
    }

    format!("Process exited with status {}", status)
}

/// Run one compiler invocation to completion within `limit`.
pub(crate) async fn compile(
    invocation: &ToolInvocation,
    cwd: &Path,
    limit: Duration,
) -> Result<(), Error> {
    debug!("Compiling: {}", invocation);
    let program = invocation.program.to_string_lossy();

    let mut command = Command::new(&invocation.program);
    command
        .args(&invocation.args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    // Compiler drivers fork cc1, as and ld; the group lets a timeout reach them.
    #[cfg(unix)]
    command.process_group(0);

    let mut child = command
        .spawn()
        .map_err(|e| Error::CompilationError(format!("failed to run {}: {}", program, e)))?;
    let pid = child.id();

    let output = match time::timeout(limit, collect_output(&mut child)).await {
        Ok(output) => output.map_err(|e| Error::CompilationError(e.to_string()))?,
        Err(_) => {
            warn!("{} exceeded {}, killing pid {:?}", program, describe_limit(limit), pid);
            kill_process_group(&mut child, pid).await;
            return Err(Error::CompilationError(format!(
                "{} timed out after {}",
                program,
                describe_limit(limit)
            )));
        }
    };

    if output.status.success() {
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr).trim_end().to_string();
    let stdout = String::from_utf8_lossy(&output.stdout).trim_end().to_string();
    let message = if !stderr.is_empty() {
        stderr
    } else if !stdout.is_empty() {
        stdout
    } else {
        format!("{}: {}", program, exit_message(output.status))
    };
    Err(Error::CompilationError(message))
}

/// Wait for exit while draining both pipes, so a chatty compiler cannot block
/// on a full pipe.
async fn collect_output(child: &mut Child) -> std::io::Result<Output> {
    let mut stdout_pipe = child.stdout.take();
    let mut stderr_pipe = child.stderr.take();
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();

    let read_stdout = async {
        if let Some(pipe) = stdout_pipe.as_mut() {
            pipe.read_to_end(&mut stdout).await?;
        }
        Ok::<_, std::io::Error>(())
    };
    let read_stderr = async {
        if let Some(pipe) = stderr_pipe.as_mut() {
            pipe.read_to_end(&mut stderr).await?;
        }
        Ok::<_, std::io::Error>(())
    };

    let (status, (), ()) = tokio::try_join!(child.wait(), read_stdout, read_stderr)?;
    Ok(Output {
        status,
        stdout,
        stderr,
    })
}

/// Try each candidate in order; the first success wins, otherwise the last
/// candidate's error is returned.
pub(crate) async fn compile_first_success(
    candidates: &[ToolInvocation],
    cwd: &Path,
    limit: Duration,
) -> Result<(), Error> {
    let mut last_error = None;
    for (index, candidate) in candidates.iter().enumerate() {
        match compile(candidate, cwd, limit).await {
            Ok(()) => return Ok(()),
            Err(e) => {
                if index + 1 < candidates.len() {
                    debug!("{} failed, trying next toolchain: {}", candidate, e);
                }
                last_error = Some(e);
            }
        }
    }

    match last_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// Spawn the program, feed `input` once, capture both streams and race the
/// natural exit against a deadline of `limit` from spawn.
///
/// The loop below is the only place an outcome is produced. Whichever branch
/// resolves first ends it; the other branch's future is dropped unpolled.
pub(crate) async fn run(
    invocation: &ToolInvocation,
    cwd: &Path,
    input: &str,
    limit: Duration,
) -> Result<RunOutcome, Error> {
    debug!("Running: {}", invocation);

    let mut command = Command::new(&invocation.program);
    command
        .args(&invocation.args)
        .current_dir(cwd)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    // Own process group, so a timeout kill also reaches anything it forked.
    #[cfg(unix)]
    command.process_group(0);

    let mut child = command.spawn().map_err(|e| {
        Error::Spawn(format!("{}: {}", invocation.program.to_string_lossy(), e))
    })?;
    let start = Instant::now();
    let pid = child.id();

    let deadline = time::sleep(limit);
    tokio::pin!(deadline);

    feed_stdin(&mut child, input);

    let mut stdout = child
        .stdout
        .take()
        .ok_or_else(|| Error::Spawn("stdout was not captured".to_string()))?;
    let mut stderr = child
        .stderr
        .take()
        .ok_or_else(|| Error::Spawn("stderr was not captured".to_string()))?;

    let mut stdout_buf = Vec::new();
    let mut stderr_buf = Vec::new();
    let mut stdout_chunk = [0u8; READ_CHUNK];
    let mut stderr_chunk = [0u8; READ_CHUNK];
    let mut stdout_open = true;
    let mut stderr_open = true;
    let mut exit: Option<ExitStatus> = None;

    let termination = loop {
        if let Some(status) = exit {
            if !stdout_open && !stderr_open {
                break Termination::Exited(status);
            }
        }

        tokio::select! {
            read = stdout.read(&mut stdout_chunk), if stdout_open => match read {
                Ok(0) => stdout_open = false,
                Ok(n) => stdout_buf.extend_from_slice(&stdout_chunk[..n]),
                Err(e) => {
                    debug!("stdout read failed: {}", e);
                    stdout_open = false;
                }
            },
            read = stderr.read(&mut stderr_chunk), if stderr_open => match read {
                Ok(0) => stderr_open = false,
                Ok(n) => stderr_buf.extend_from_slice(&stderr_chunk[..n]),
                Err(e) => {
                    debug!("stderr read failed: {}", e);
                    stderr_open = false;
                }
            },
            status = child.wait(), if exit.is_none() => {
                exit = Some(status?);
            }
            _ = &mut deadline => {
                warn!("Run exceeded {}, killing pid {:?}", describe_limit(limit), pid);
                kill_process_group(&mut child, pid).await;
                break Termination::TimedOut;
            }
        }
    };
    let elapsed = start.elapsed();

    if termination == Termination::TimedOut {
        // Keep whatever the program flushed before it died.
        let _ = time::timeout(DRAIN_GRACE, async {
            if stdout_open {
                let _ = stdout.read_to_end(&mut stdout_buf).await;
            }
            if stderr_open {
                let _ = stderr.read_to_end(&mut stderr_buf).await;
            }
        })
        .await;
    }

    Ok(RunOutcome {
        stdout: String::from_utf8_lossy(&stdout_buf).into_owned(),
        stderr: String::from_utf8_lossy(&stderr_buf).into_owned(),
        termination,
        elapsed,
    })
}

/// Write `input` to the child's stdin and close it. An empty input just
/// closes stdin so reads see EOF.
fn feed_stdin(child: &mut Child, input: &str) {
    let Some(mut stdin) = child.stdin.take() else {
        return;
    };
    if input.is_empty() {
        return;
    }

    // Written from its own task so a child that never reads stdin cannot
    // stall output capture.
    let input = input.to_owned();
    tokio::spawn(async move {
        if let Err(e) = stdin.write_all(input.as_bytes()).await {
            debug!("stdin closed before input was consumed: {}", e);
        }
    });
}

async fn kill_process_group(child: &mut Child, pid: Option<u32>) {
    #[cfg(unix)]
    {
        use nix::sys::signal::{killpg, Signal};
        use nix::unistd::Pid;

        if let Some(pid) = pid {
            if let Err(e) = killpg(Pid::from_raw(pid as i32), Signal::SIGKILL) {
                debug!("killpg({}) failed: {}", pid, e);
            }
        }
    }
    #[cfg(not(unix))]
    let _ = pid;

    if let Err(e) = child.start_kill() {
        debug!("start_kill failed: {}", e);
    }
    if let Err(e) = child.wait().await {
        warn!("Failed to reap killed process: {}", e);
    }
}
