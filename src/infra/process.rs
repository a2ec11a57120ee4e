//! Child process execution
//!
//! Every external tool (downloader, archive extractors, build command) is
//! launched through the [`ProcessRunner`] trait so the pipeline can be driven
//! by a recording fake in tests. [`SystemRunner`] is the real implementation.
//!
//! A nonzero exit status is never an error here; callers decide what it means.

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::io::AsyncReadExt;
use tokio::process::{Child, Command};
use tokio::task::JoinHandle;

use crate::config::defaults::POLL_INTERVAL;
use crate::error::ProcessError;

/// How the child's standard streams are wired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StdioMode {
    /// stdout/stderr are captured and returned to the caller; stdin is closed
    #[default]
    Capture,
    /// stdin/stdout/stderr are shared with this process so output streams live
    Inherit,
}

/// A single external command to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Program name or path
    pub program: String,
    /// Arguments, not including the program
    pub args: Vec<String>,
    /// Working directory; inherits ours when unset
    pub cwd: Option<PathBuf>,
    /// Stream wiring
    pub stdio: StdioMode,
}

impl Invocation {
    /// Create an invocation with captured output and no working directory
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            stdio: StdioMode::Capture,
        }
    }

    /// Add a single argument
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Add multiple arguments
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Add a path as an argument
    #[must_use]
    pub fn arg_path(mut self, path: &Path) -> Self {
        self.args.push(path.to_string_lossy().into_owned());
        self
    }

    /// Set the working directory
    #[must_use]
    pub fn dir(mut self, dir: &Path) -> Self {
        self.cwd = Some(dir.to_path_buf());
        self
    }

    /// Share our stdio with the child
    #[must_use]
    pub fn inherit_stdio(mut self) -> Self {
        self.stdio = StdioMode::Inherit;
        self
    }

    /// Render as a shell-like command line, for logs
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Outcome of a finished child process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code, or -1 if the child was killed by a signal
    pub code: i32,
    /// Captured stdout (empty under [`StdioMode::Inherit`])
    pub stdout: String,
    /// Captured stderr (empty under [`StdioMode::Inherit`])
    pub stderr: String,
}

impl ProcessOutput {
    /// Build a successful output with no captured text
    #[cfg(test)]
    pub fn ok() -> Self {
        Self::default()
    }

    /// Build a failed output with the given code and stderr
    #[cfg(test)]
    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Returns true if the command exited with status 0
    pub fn success(&self) -> bool {
        self.code == 0
    }

    /// Get stderr, trimmed of whitespace
    pub fn stderr_trimmed(&self) -> &str {
        self.stderr.trim()
    }
}

/// Runs external commands to completion
#[allow(async_fn_in_trait)]
pub trait ProcessRunner {
    /// Run the invocation and wait for it to exit
    async fn run(&self, invocation: &Invocation) -> Result<ProcessOutput, ProcessError>;
}

/// Runs commands as real child processes
#[derive(Debug, Clone)]
pub struct SystemRunner {
    poll_interval: Duration,
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self {
            poll_interval: POLL_INTERVAL,
        }
    }
}

impl SystemRunner {
    /// Create a runner with the default poll interval
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the interval between exit checks
    #[must_use]
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Start the invocation without waiting for it
    ///
    /// Captured streams are drained in background tasks from the moment the
    /// child starts, so a child writing more than a pipe buffer never stalls.
    pub fn spawn(&self, invocation: &Invocation) -> Result<RunningProcess, ProcessError> {
        tracing::debug!(
            cwd = ?invocation.cwd,
            "Running: {}",
            invocation.display()
        );

        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args);
        if let Some(ref dir) = invocation.cwd {
            cmd.current_dir(dir);
        }
        match invocation.stdio {
            StdioMode::Capture => {
                cmd.stdin(Stdio::null());
                cmd.stdout(Stdio::piped());
                cmd.stderr(Stdio::piped());
            }
            StdioMode::Inherit => {
                cmd.stdin(Stdio::inherit());
                cmd.stdout(Stdio::inherit());
                cmd.stderr(Stdio::inherit());
            }
        }

        let mut child = cmd.spawn().map_err(|e| ProcessError::Spawn {
            program: invocation.program.clone(),
            error: e.to_string(),
        })?;

        let stdout = child.stdout.take().map(|mut pipe| {
            tokio::spawn(async move {
                let mut buf = Vec::new();
                pipe.read_to_end(&mut buf).await.map(|_| buf)
            })
        });
        let stderr = child.stderr.take().map(|mut pipe| {
            tokio::spawn(async move {
                let mut buf = Vec::new();
                pipe.read_to_end(&mut buf).await.map(|_| buf)
            })
        });

        Ok(RunningProcess {
            program: invocation.program.clone(),
            child,
            stdout,
            stderr,
            poll_interval: self.poll_interval,
        })
    }
}

impl ProcessRunner for SystemRunner {
    async fn run(&self, invocation: &Invocation) -> Result<ProcessOutput, ProcessError> {
        self.spawn(invocation)?.wait().await
    }
}

type Drain = JoinHandle<std::io::Result<Vec<u8>>>;

/// A child that has been started but not yet waited on
#[derive(Debug)]
pub struct RunningProcess {
    program: String,
    child: Child,
    stdout: Option<Drain>,
    stderr: Option<Drain>,
    poll_interval: Duration,
}

impl RunningProcess {
    /// OS process id, if the child is still running
    pub fn id(&self) -> Option<u32> {
        self.child.id()
    }

    /// Poll until the child exits, then collect its captured output
    pub async fn wait(mut self) -> Result<ProcessOutput, ProcessError> {
        let status = loop {
            match self.child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => tokio::time::sleep(self.poll_interval).await,
                Err(e) => {
                    return Err(ProcessError::Wait {
                        program: self.program,
                        error: e.to_string(),
                    })
                }
            }
        };

        let stdout = collect(&self.program, self.stdout.take()).await?;
        let stderr = collect(&self.program, self.stderr.take()).await?;

        Ok(ProcessOutput {
            code: exit_code(status),
            stdout,
            stderr,
        })
    }
}

async fn collect(program: &str, drain: Option<Drain>) -> Result<String, ProcessError> {
    let Some(drain) = drain else {
        return Ok(String::new());
    };
    let bytes = drain
        .await
        .map_err(|e| ProcessError::Output {
            program: program.to_string(),
            error: e.to_string(),
        })?
        .map_err(|e| ProcessError::Output {
            program: program.to_string(),
            error: e.to_string(),
        })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(-1)
}
