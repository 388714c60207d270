//! External command execution
//!
//! Every git invocation goes through [`Cmd`], which logs the command line at
//! debug level, emits a `[gsw-trace]` timing line, and optionally kills the
//! child when it exceeds a timeout.

use std::cell::Cell;
use std::process::Command;
use std::sync::OnceLock;
use std::time::{Duration, Instant};

/// Monotonic epoch for trace timestamps.
///
/// All trace timestamps are relative to this epoch, so they stay monotonic even
/// if the system clock steps backward.
static TRACE_EPOCH: OnceLock<Instant> = OnceLock::new();

fn trace_epoch() -> &'static Instant {
    TRACE_EPOCH.get_or_init(Instant::now)
}

thread_local! {
    /// Thread-local command timeout. When set, all commands executed via [`Cmd::run`]
    /// on this thread are killed if they exceed this duration.
    ///
    /// Each scan worker sets this at the start of a repository's inspection.
    static COMMAND_TIMEOUT: Cell<Option<Duration>> = const { Cell::new(None) };
}

/// Set the command timeout for the current thread.
///
/// Set to `None` to disable the timeout.
pub fn set_command_timeout(timeout: Option<Duration>) {
    COMMAND_TIMEOUT.with(|t| t.set(timeout));
}

/// Extract numeric thread ID from ThreadId's debug format ("ThreadId(N)").
fn thread_id_number() -> u64 {
    let thread_id = std::thread::current().id();
    let debug_str = format!("{:?}", thread_id);
    debug_str
        .strip_prefix("ThreadId(")
        .and_then(|s| s.strip_suffix(")"))
        .and_then(|s| s.parse().ok())
        .unwrap_or(0)
}

/// Spawns the process, drains stdout/stderr on background threads, and waits
/// with a deadline. On expiry the child is killed and `TimedOut` is returned.
fn run_with_timeout_impl(
    cmd: &mut Command,
    timeout: Duration,
) -> std::io::Result<std::process::Output> {
    use std::io::{ErrorKind, Read};
    use std::process::Stdio;

    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    let mut stdout_handle = child.stdout.take();
    let mut stderr_handle = child.stderr.take();

    // Read both pipes concurrently so a full buffer can't deadlock the child
    let stdout_thread = std::thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(ref mut handle) = stdout_handle {
            let _ = handle.read_to_end(&mut buf);
        }
        buf
    });

    let stderr_thread = std::thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(ref mut handle) = stderr_handle {
            let _ = handle.read_to_end(&mut buf);
        }
        buf
    });

    let deadline = Instant::now() + timeout;
    let status = loop {
        match child.try_wait()? {
            Some(status) => break status,
            None => {
                if Instant::now() >= deadline {
                    let _ = child.kill();
                    let _ = child.wait();

                    // Readers see EOF once the child is gone
                    let _ = stdout_thread.join();
                    let _ = stderr_thread.join();

                    return Err(std::io::Error::new(
                        ErrorKind::TimedOut,
                        "command timed out",
                    ));
                }
                std::thread::sleep(Duration::from_millis(10));
            }
        }
    };

    let stdout = stdout_thread.join().unwrap_or_default();
    let stderr = stderr_thread.join().unwrap_or_default();

    Ok(std::process::Output {
        status,
        stdout,
        stderr,
    })
}

/// Builder for executing commands with logging and tracing.
///
/// The calling thread's timeout (see [`set_command_timeout`]) applies to [`Cmd::run`].
///
/// ```ignore
/// let output = Cmd::new("git")
///     .args(["status", "--porcelain"])
///     .current_dir(&repo_path)
///     .context("my-repo")
///     .run()?;
/// ```
pub struct Cmd {
    program: String,
    args: Vec<String>,
    current_dir: Option<std::path::PathBuf>,
    context: Option<String>,
    envs: Vec<(String, String)>,
}

impl Cmd {
    /// Create a new command builder for the given program.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
            context: None,
            envs: Vec::new(),
        }
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set the working directory for the command.
    pub fn current_dir(mut self, dir: impl Into<std::path::PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Set the logging context (typically the repository name).
    pub fn context(mut self, ctx: impl Into<String>) -> Self {
        self.context = Some(ctx.into());
        self
    }

    /// Set an environment variable.
    pub fn env(mut self, key: impl Into<String>, val: impl Into<String>) -> Self {
        self.envs.push((key.into(), val.into()));
        self
    }

    /// The command line as it would be typed in a shell.
    pub fn display(&self) -> String {
        std::iter::once(&self.program)
            .chain(&self.args)
            .map(|part| shell_escape::escape(part.as_str().into()).into_owned())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Execute the command and return its output.
    ///
    /// A non-zero exit status is not an error here; callers inspect
    /// `output.status` themselves.
    pub fn run(self) -> std::io::Result<std::process::Output> {
        let cmd_str = self.display();

        match &self.context {
            Some(ctx) => log::debug!("$ {} [{}]", cmd_str, ctx),
            None => log::debug!("$ {}", cmd_str),
        }

        let t0 = Instant::now();
        let ts = t0.duration_since(*trace_epoch()).as_micros() as u64;
        let tid = thread_id_number();

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(ref dir) = self.current_dir {
            cmd.current_dir(dir);
        }
        for (key, val) in &self.envs {
            cmd.env(key, val);
        }

        let result = match COMMAND_TIMEOUT.with(|t| t.get()) {
            Some(timeout) => run_with_timeout_impl(&mut cmd, timeout),
            None => cmd.output(),
        };

        let dur_us = t0.elapsed().as_micros() as u64;
        let ctx = self.context.as_deref().unwrap_or("-");
        match &result {
            Ok(output) => log::debug!(
                "[gsw-trace] ts={} tid={} context={} cmd=\"{}\" dur_us={} ok={}",
                ts,
                tid,
                ctx,
                cmd_str,
                dur_us,
                output.status.success()
            ),
            Err(e) => log::debug!(
                "[gsw-trace] ts={} tid={} context={} cmd=\"{}\" dur_us={} err=\"{}\"",
                ts,
                tid,
                ctx,
                cmd_str,
                dur_us,
                e
            ),
        }

        result
    }
}
