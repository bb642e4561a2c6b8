use std::path::PathBuf;
use tracing::{error, info, warn};

use super::plan::PlannedJob;
use super::profile::ProfileRequest;
use super::render::{EncoderProcess, RenderOutcome, render};

pub const EXIT_OK: u8 = 0;
/// At least one job failed or could not be built
pub const EXIT_JOB_FAILED: u8 = 1;
/// Global misconfiguration; nothing was run
pub const EXIT_CONFIG_ERROR: u8 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Encoded,
    Skipped,
    /// Encoder failed or could not be started
    Failed(String),
    /// Request never became a job (bad resolution, codec or profile name)
    Invalid(String),
}

#[derive(Debug, Clone)]
pub struct JobReport {
    pub request: ProfileRequest,
    pub output_path: Option<PathBuf>,
    pub status: JobStatus,
}

#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub jobs: Vec<JobReport>,
}

impl BatchReport {
    fn count(&self, pred: impl Fn(&JobStatus) -> bool) -> usize {
        self.jobs.iter().filter(|j| pred(&j.status)).count()
    }

    pub fn encoded(&self) -> usize {
        self.count(|s| *s == JobStatus::Encoded)
    }

    pub fn skipped(&self) -> usize {
        self.count(|s| *s == JobStatus::Skipped)
    }

    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, JobStatus::Failed(_) | JobStatus::Invalid(_)))
    }

    pub fn all_ok(&self) -> bool {
        self.failed() == 0
    }

    pub fn exit_code(&self) -> u8 {
        if self.all_ok() {
            EXIT_OK
        } else {
            EXIT_JOB_FAILED
        }
    }
}

/// Run planned jobs one after another. A failing job is logged and recorded; the
/// remaining jobs still run.
pub fn run_batch(
    planned: Vec<PlannedJob>,
    overwrite: bool,
    encoder: &mut dyn EncoderProcess,
) -> BatchReport {
    let mut report = BatchReport::default();

    for PlannedJob { request, job } in planned {
        let entry = match job {
            Err(e) => {
                error!("Skipping render '{}': {}", request, e);
                JobReport {
                    request,
                    output_path: None,
                    status: JobStatus::Invalid(e.to_string()),
                }
            }
            Ok(job) => {
                let status = match render(&job, overwrite, encoder) {
                    Ok(RenderOutcome::Encoded) => {
                        info!("Finished {}", job.output_path().display());
                        JobStatus::Encoded
                    }
                    Ok(RenderOutcome::Skipped) => JobStatus::Skipped,
                    Err(e) => {
                        error!("Failed to encode {}: {}", job.input_path().display(), e);
                        JobStatus::Failed(e.to_string())
                    }
                };
                JobReport {
                    request,
                    output_path: Some(job.output_path().to_path_buf()),
                    status,
                }
            }
        };
        report.jobs.push(entry);
    }

    if !report.all_ok() {
        warn!(
            "{} of {} renders failed",
            report.failed(),
            report.jobs.len()
        );
    }

    report
}
