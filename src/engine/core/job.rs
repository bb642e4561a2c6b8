use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use super::encoder_cmd::{build_encoder_args, build_encoder_cmd, format_encoder_cmd};
use super::error::ConfigError;
use super::profile::{RenderProfile, derive_output_path};

/// Shared arguments passed to every rendition unless the config says otherwise
pub const DEFAULT_SHARED_ARGS: &[&str] = &[
    "--chapter-copy",
    "--sub-copy",
    "--audio-stream",
    "5.1,:stereo",
    "--audio-codec",
    "aac",
    "--audio-bitrate",
    "224",
];

pub const DEFAULT_QUALITY: &str = "22";
pub const DEFAULT_QUALITY_FLAG: &str = "--cqp";

/// Run-wide settings, resolved once and applied identically to every job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSettings {
    pub encoder_path: PathBuf,
    pub output_root: PathBuf,
    /// Kept as text so values like "22" or "22:24:26" reach the encoder untouched
    pub quality: String,
    pub quality_flag: String,
    pub shared_args: Vec<String>,
}

impl JobSettings {
    /// Settings with the stock quality flag and shared arguments
    pub fn new(
        encoder_path: impl Into<PathBuf>,
        output_root: impl Into<PathBuf>,
        quality: impl Into<String>,
    ) -> Self {
        Self {
            encoder_path: encoder_path.into(),
            output_root: output_root.into(),
            quality: quality.into(),
            quality_flag: DEFAULT_QUALITY_FLAG.to_string(),
            shared_args: DEFAULT_SHARED_ARGS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// One input file bound to one profile: everything needed for a single encoder run.
///
/// Fields are private and fixed at construction, so the output path and argument
/// vector can never drift apart from the profile and settings they came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderJob {
    input_path: PathBuf,
    output_root: PathBuf,
    output_path: PathBuf,
    encoder_path: PathBuf,
    profile: RenderProfile,
    args: Vec<OsString>,
}

impl RenderJob {
    pub fn new(
        input_path: &Path,
        profile: RenderProfile,
        settings: &JobSettings,
    ) -> Result<Self, ConfigError> {
        let output_path = derive_output_path(
            input_path,
            &settings.output_root,
            profile.codec(),
            profile.resolution(),
        )?;
        let args = build_encoder_args(&profile, settings, input_path, &output_path);

        Ok(Self {
            input_path: input_path.to_path_buf(),
            output_root: settings.output_root.clone(),
            output_path,
            encoder_path: settings.encoder_path.clone(),
            profile,
            args,
        })
    }

    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn encoder_path(&self) -> &Path {
        &self.encoder_path
    }

    pub fn profile(&self) -> &RenderProfile {
        &self.profile
    }

    /// Encoder arguments, program excluded
    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    pub fn command(&self) -> Command {
        build_encoder_cmd(self)
    }

    /// Printable command line, used in every report about this job
    pub fn command_line(&self) -> String {
        format_encoder_cmd(&self.encoder_path, &self.args)
    }
}
