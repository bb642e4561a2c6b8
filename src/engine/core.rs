mod batch;
mod encoder_cmd;
mod error;
mod job;
mod plan;
mod profile;
mod render;

pub use batch::{
    BatchReport, EXIT_CONFIG_ERROR, EXIT_JOB_FAILED, EXIT_OK, JobReport, JobStatus, run_batch,
};
pub use encoder_cmd::{build_encoder_args, build_encoder_cmd, format_encoder_cmd};
pub use error::ConfigError;
pub use job::{DEFAULT_QUALITY, DEFAULT_QUALITY_FLAG, DEFAULT_SHARED_ARGS, JobSettings, RenderJob};
pub use plan::{PlannedJob, build_job, default_requests, plan_jobs, select_requests};
pub use profile::{
    CONTAINER_EXT, PRIMARY_PROFILE, ProfileCatalog, ProfileRequest, ProfileSpec, RenderProfile,
    Resolution, SECONDARY_PROFILE, derive_output_path,
};
pub use render::{
    EncoderProcess, ProcessExit, RenderError, RenderOutcome, SystemEncoder, output_exists, render,
};
