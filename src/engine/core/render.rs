use std::ffi::OsString;
use std::fmt;
use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus};
use thiserror::Error;
use tracing::{debug, info};

use super::job::RenderJob;

/// How the encoder process ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessExit {
    /// `None` when the child was killed by a signal
    pub code: Option<i32>,
}

impl ProcessExit {
    pub fn from_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<ExitStatus> for ProcessExit {
    fn from(status: ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

impl fmt::Display for ProcessExit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit code {}", code),
            None => f.write_str("termination by signal"),
        }
    }
}

/// Runs the external encoder and blocks until it exits
pub trait EncoderProcess {
    fn run(&mut self, program: &Path, args: &[OsString]) -> io::Result<ProcessExit>;
}

/// Spawns the real encoder with inherited stdin/stdout/stderr
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemEncoder;

impl EncoderProcess for SystemEncoder {
    fn run(&mut self, program: &Path, args: &[OsString]) -> io::Result<ProcessExit> {
        let status = Command::new(program).args(args).status()?;
        Ok(status.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    Encoded,
    /// Output already existed and overwrite was off; the encoder was not started
    Skipped,
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("encoder failed with {status}; command: {command}")]
    EncoderFailed { status: ProcessExit, command: String },

    #[error("encoder executable not found or not runnable ({source}); command: {command}")]
    ExecutableNotFound {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to launch encoder ({source}); command: {command}")]
    Launch {
        command: String,
        #[source]
        source: io::Error,
    },
}

impl RenderError {
    /// The exact command line that was attempted
    pub fn command(&self) -> &str {
        match self {
            Self::EncoderFailed { command, .. }
            | Self::ExecutableNotFound { command, .. }
            | Self::Launch { command, .. } => command,
        }
    }
}

/// True if anything (file, directory, even a dangling symlink) sits at `path`
pub fn output_exists(path: &Path) -> bool {
    std::fs::symlink_metadata(path).is_ok()
}

/// Run one job: skip if the output is already there (unless `overwrite`), else encode.
pub fn render(
    job: &RenderJob,
    overwrite: bool,
    encoder: &mut dyn EncoderProcess,
) -> Result<RenderOutcome, RenderError> {
    info!(
        "--- Encoding {} --> {}",
        job.input_path().display(),
        job.output_path().display()
    );

    if !overwrite && output_exists(job.output_path()) {
        info!("  - The file already exists, skipping render");
        return Ok(RenderOutcome::Skipped);
    }

    debug!(command = %job.command_line(), "launching encoder");

    match encoder.run(job.encoder_path(), job.args()) {
        Ok(exit) if exit.success() => Ok(RenderOutcome::Encoded),
        Ok(exit) => Err(RenderError::EncoderFailed {
            status: exit,
            command: job.command_line(),
        }),
        Err(e) if matches!(
            e.kind(),
            io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied
        ) =>
        {
            Err(RenderError::ExecutableNotFound {
                command: job.command_line(),
                source: e,
            })
        }
        Err(e) => Err(RenderError::Launch {
            command: job.command_line(),
            source: e,
        }),
    }
}
