//! One run of the external solver
//!
//! The program text goes to a temp file passed as the last argument. Stdout is
//! redirected to a second temp file and stderr is drained on a helper thread.
//! With a timeout, the child gets a termination signal, then a grace period,
//! then a forced kill. On unix the child leads its own process group and the
//! signals go to the whole group, so helpers started by a wrapper script stop
//! with it. Both temp files are removed when the run ends, whichever way it
//! ends.

use crate::config::SolverConfig;
use crate::{AspError, AspResult};
use std::io::{Read, Write};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

/// Exit codes the solver uses for syntax, grounding and other hard errors
pub const ERROR_EXIT_CODES: [i32; 2] = [1, 65];

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// What a finished run left behind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    pub stdout: String,
    pub stderr: String,
    /// `None` when the process ended on a signal
    pub exit_code: Option<i32>,
    /// The timeout elapsed and the process was terminated
    pub killed: bool,
}

impl ProcessOutput {
    pub fn is_error(&self) -> bool {
        self.exit_code
            .is_some_and(|code| ERROR_EXIT_CODES.contains(&code))
    }

    /// Raise on an error exit code; otherwise return stderr as a warning
    pub fn check(&self) -> AspResult<Option<String>> {
        if let Some(exit_code) = self.exit_code.filter(|_| self.is_error()) {
            return Err(AspError::Process {
                exit_code,
                stderr: self.stderr.trim().to_string(),
            });
        }
        if self.stderr.trim().is_empty() {
            return Ok(None);
        }
        warn!(exit_code = ?self.exit_code, "solver reported: {}", self.stderr.trim());
        Ok(Some(self.stderr.trim().to_string()))
    }
}

/// A prepared solver invocation that owns its temp files
#[derive(Debug)]
pub struct SolverProcess {
    command: Command,
    program: NamedTempFile,
    output: NamedTempFile,
    timeout: Option<Duration>,
    grace_period: Duration,
}

impl SolverProcess {
    /// Write `text` to a fresh program file and prepare the command line
    pub fn new(config: &SolverConfig, text: &str, options: &[String]) -> AspResult<Self> {
        let mut program = tempfile::Builder::new()
            .prefix("aspire_program_")
            .suffix(".lp")
            .tempfile_in(&config.temp_dir)?;
        program.write_all(text.as_bytes())?;
        program.flush()?;

        let output = tempfile::Builder::new()
            .prefix("aspire_output_")
            .suffix(".json")
            .tempfile_in(&config.temp_dir)?;

        let mut command = Command::new(&config.executable);
        command.args(options).arg(program.path());
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            command.process_group(0);
        }

        Ok(Self {
            command,
            program,
            output,
            timeout: None,
            grace_period: config.grace_period,
        })
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run to completion or timeout; the temp files are gone once this returns
    pub fn run(mut self) -> AspResult<ProcessOutput> {
        debug!(command = ?self.command, timeout = ?self.timeout, "spawning solver");
        let mut child = self
            .command
            .stdin(Stdio::null())
            .stdout(Stdio::from(self.output.reopen()?))
            .stderr(Stdio::piped())
            .spawn()?;

        let mut stderr_pipe = child.stderr.take();
        let stderr_reader = thread::spawn(move || {
            let mut text = String::new();
            if let Some(pipe) = stderr_pipe.as_mut() {
                let _ = pipe.read_to_string(&mut text);
            }
            text
        });

        let waited = match self.timeout {
            None => child.wait().map(|status| (status, false)),
            Some(timeout) => match child.wait_timeout(timeout) {
                Ok(Some(status)) => Ok((status, false)),
                Ok(None) => {
                    info!(?timeout, "solver timed out, terminating");
                    terminate(&mut child, self.grace_period).map(|status| (status, true))
                }
                Err(e) => Err(e),
            },
        };
        let (status, killed) = match waited {
            Ok(waited) => waited,
            Err(e) => return Err(abandon(&mut child, e)),
        };

        let stderr = stderr_reader.join().unwrap_or_default();
        let mut stdout = String::new();
        if !killed {
            std::fs::File::open(self.output.path())?.read_to_string(&mut stdout)?;
        }
        debug!(program = ?self.program.path(), exit_code = ?status.code(), killed, "solver finished");

        Ok(ProcessOutput {
            stdout,
            stderr,
            exit_code: status.code(),
            killed,
        })
    }
}

trait ChildExt {
    fn wait_timeout(&mut self, timeout: Duration) -> std::io::Result<Option<ExitStatus>>;
}

impl ChildExt for Child {
    fn wait_timeout(&mut self, timeout: Duration) -> std::io::Result<Option<ExitStatus>> {
        let start = Instant::now();
        loop {
            match self.try_wait()? {
                Some(status) => return Ok(Some(status)),
                None => {
                    if start.elapsed() >= timeout {
                        return Ok(None);
                    }
                    thread::sleep(POLL_INTERVAL);
                }
            }
        }
    }
}

/// Ask the child to stop, then kill it if it is still around after `grace_period`
fn terminate(child: &mut Child, grace_period: Duration) -> std::io::Result<ExitStatus> {
    send_terminate(child);
    if let Some(status) = child.wait_timeout(grace_period)? {
        return Ok(status);
    }
    info!("solver ignored termination, killing");
    force_kill(child)?;
    child.wait()
}

/// Kill and reap a child we can no longer wait on, keeping the original error
fn abandon(child: &mut Child, error: std::io::Error) -> AspError {
    warn!(%error, "lost track of solver, killing it");
    let _ = force_kill(child);
    let _ = child.wait();
    AspError::Io(error)
}

#[cfg(unix)]
fn signal_group(child: &Child, signal: libc::c_int) -> std::io::Result<()> {
    let pid = libc::pid_t::try_from(child.id())
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    // SAFETY: the child leads a group of its own and has not been reaped yet,
    // so `-pid` cannot name an unrelated group.
    if unsafe { libc::kill(-pid, signal) } == 0 {
        return Ok(());
    }
    let error = std::io::Error::last_os_error();
    match error.raw_os_error() {
        Some(libc::ESRCH) => Ok(()),
        _ => Err(error),
    }
}

#[cfg(unix)]
fn send_terminate(child: &mut Child) {
    if let Err(e) = signal_group(child, libc::SIGTERM) {
        warn!(error = %e, "could not signal solver");
    }
}

#[cfg(unix)]
fn force_kill(child: &mut Child) -> std::io::Result<()> {
    signal_group(child, libc::SIGKILL)
}

#[cfg(not(unix))]
fn send_terminate(child: &mut Child) {
    let _ = child.kill();
}

#[cfg(not(unix))]
fn force_kill(child: &mut Child) -> std::io::Result<()> {
    child.kill()
}
