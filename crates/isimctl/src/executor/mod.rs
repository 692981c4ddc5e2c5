use anyhow::Result;
use async_trait::async_trait;
use isimctl_common::{Cancelled, ExecutionError};
use std::io;
use std::process::{ExitStatus, Stdio};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::debug;

#[cfg(test)]
use mockall::automock;

/// Capture ceiling for standard output (simctl device lists are well below this)
pub const STDOUT_LIMIT: usize = 10 * 1024 * 1024;

/// Capture ceiling for standard error
pub const STDERR_LIMIT: usize = 1024 * 1024;

/// Runs one external executable.
///
/// Failures are reported as [`ExecutionError`]; a cancelled call fails with
/// [`Cancelled`] instead.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Executing: Send + Sync {
    /// Whether the executable can be found on PATH
    fn is_executable_available(&self) -> bool;

    /// Run with `arguments` and return standard output
    async fn capture_output(&self, arguments: &[String]) -> Result<String>;

    /// Run with `arguments`, discarding standard output
    async fn execute(&self, arguments: &[String]) -> Result<()>;
}

/// [`Executing`] implementation backed by `tokio::process`
pub struct Executor {
    program: String,
    cancel: CancellationToken,
}

struct Collected {
    status: ExitStatus,
    stdout: Vec<u8>,
    stderr: Vec<u8>,
}

impl Executor {
    pub fn new(program: impl Into<String>, cancel: CancellationToken) -> Self {
        Self {
            program: program.into(),
            cancel,
        }
    }

    async fn run(&self, arguments: &[String], capture_stdout: bool) -> Result<Collected> {
        let command = command_line(&self.program, arguments);

        if self.cancel.is_cancelled() {
            return Err(Cancelled.into());
        }

        debug!("Running: {}", command);

        let mut child = Command::new(&self.program)
            .args(arguments)
            .stdin(Stdio::null())
            .stdout(if capture_stdout {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|err| ExecutionError::new(&command, err.to_string()))?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        let collect = async {
            let (stdout, stderr) = tokio::try_join!(
                read_limited(stdout, STDOUT_LIMIT, "standard output"),
                read_limited(stderr, STDERR_LIMIT, "standard error"),
            )?;
            let status = child.wait().await?;
            Ok::<_, io::Error>(Collected {
                status,
                stdout,
                stderr,
            })
        };

        // Dropping the child on cancellation kills it
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                debug!("Cancelled: {}", command);
                Err(anyhow::Error::from(Cancelled))
            }
            collected = collect => {
                if self.cancel.is_cancelled() {
                    debug!("Cancelled while collecting: {}", command);
                    return Err(Cancelled.into());
                }
                collected.map_err(|err| anyhow::Error::from(ExecutionError::new(&command, err.to_string())))
            }
        }
    }

    /// Ctrl-C reaches the child's process group too, so its exit can be
    /// collected before the token fires
    fn unsuccessful(&self, arguments: &[String], collected: &Collected) -> anyhow::Error {
        if self.cancel.is_cancelled() || interrupted(collected.status) {
            debug!("Interrupted: {}", command_line(&self.program, arguments));
            return Cancelled.into();
        }
        failure(&self.program, arguments, collected).into()
    }
}

#[async_trait]
impl Executing for Executor {
    fn is_executable_available(&self) -> bool {
        which::which(&self.program).is_ok()
    }

    async fn capture_output(&self, arguments: &[String]) -> Result<String> {
        let collected = self.run(arguments, true).await?;

        if !collected.status.success() {
            return Err(self.unsuccessful(arguments, &collected));
        }

        debug!("Captured {} bytes of output", collected.stdout.len());
        Ok(String::from_utf8_lossy(&collected.stdout).into_owned())
    }

    async fn execute(&self, arguments: &[String]) -> Result<()> {
        let collected = self.run(arguments, false).await?;

        if !collected.status.success() {
            return Err(self.unsuccessful(arguments, &collected));
        }

        Ok(())
    }
}

fn command_line(program: &str, arguments: &[String]) -> String {
    std::iter::once(program)
        .chain(arguments.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Prefer stderr, then stdout, then the exit condition
fn failure(program: &str, arguments: &[String], collected: &Collected) -> ExecutionError {
    let description = non_blank(&collected.stderr)
        .or_else(|| non_blank(&collected.stdout))
        .unwrap_or_else(|| describe_status(collected.status));

    ExecutionError::new(command_line(program, arguments), description)
}

fn non_blank(bytes: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(bytes);
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

#[cfg(unix)]
fn interrupted(status: ExitStatus) -> bool {
    use std::os::unix::process::ExitStatusExt;
    const SIGINT: i32 = 2;
    status.signal() == Some(SIGINT)
}

#[cfg(not(unix))]
fn interrupted(_status: ExitStatus) -> bool {
    false
}

fn describe_status(status: ExitStatus) -> String {
    if let Some(code) = status.code() {
        return format!("exited with code {}", code);
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return format!("terminated by signal {}", signal);
        }
    }

    "terminated abnormally".to_string()
}

async fn read_limited<R>(reader: Option<R>, limit: usize, stream: &str) -> io::Result<Vec<u8>>
where
    R: AsyncRead + Unpin,
{
    let Some(reader) = reader else {
        return Ok(Vec::new());
    };

    let mut buffer = Vec::new();
    reader.take(limit as u64 + 1).read_to_end(&mut buffer).await?;

    if buffer.len() > limit {
        return Err(io::Error::new(
            io::ErrorKind::Other,
            format!("{} exceeded the capture limit of {} bytes", stream, limit),
        ));
    }

    Ok(buffer)
}
