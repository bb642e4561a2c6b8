// Config file handling and the per-run configuration built from it

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::engine::{
    ConfigError, DEFAULT_QUALITY, DEFAULT_QUALITY_FLAG, DEFAULT_SHARED_ARGS, JobSettings,
    ProfileCatalog, ProfileRequest, ProfileSpec, select_requests,
};
use crate::logging::DEFAULT_LEVEL;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub encoder: EncoderConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Extra named profiles usable as `--render NAME`
    #[serde(default)]
    pub profiles: BTreeMap<String, ProfileSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncoderConfig {
    /// Encoder executable
    #[serde(default = "default_encoder_path")]
    pub path: PathBuf,

    /// Constant-quality value, passed through verbatim
    #[serde(default = "default_quality")]
    pub quality: String,

    /// Flag that carries the quality value
    #[serde(default = "default_quality_flag")]
    pub quality_flag: String,

    /// Shell-style argument string appended to every rendition
    #[serde(default = "default_shared_args")]
    pub shared_args: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_root")]
    pub root: PathBuf,

    #[serde(default)]
    pub overwrite: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_encoder_path() -> PathBuf {
    if cfg!(target_os = "windows") {
        PathBuf::from(r"C:\tools\nvenc\NVEncC64.exe")
    } else {
        PathBuf::from("nvencc")
    }
}

fn default_output_root() -> PathBuf {
    if cfg!(target_os = "windows") {
        PathBuf::from(r"D:\BD\conv")
    } else {
        PathBuf::from("conv")
    }
}

fn default_quality() -> String {
    DEFAULT_QUALITY.to_string()
}

fn default_quality_flag() -> String {
    DEFAULT_QUALITY_FLAG.to_string()
}

fn default_shared_args() -> String {
    DEFAULT_SHARED_ARGS.join(" ")
}

fn default_log_level() -> String {
    DEFAULT_LEVEL.to_string()
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            path: default_encoder_path(),
            quality: default_quality(),
            quality_flag: default_quality_flag(),
            shared_args: default_shared_args(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            root: default_output_root(),
            overwrite: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("nvrender");
        Ok(config_dir.join("config.toml"))
    }

    /// Load the config from its default location; built-in defaults if there is none.
    ///
    /// Nothing is written to disk.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load an explicitly named config file, which must exist
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}

/// Values supplied on the command line; `None` means "use the config file"
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub encoder_path: Option<PathBuf>,
    pub output_root: Option<PathBuf>,
    pub quality: Option<String>,
    pub overwrite: Option<bool>,
    pub extra_args: Option<String>,
    pub render: Vec<ProfileRequest>,
    pub only_primary: bool,
    pub only_secondary: bool,
    pub dry_run: bool,
}

/// Everything one run needs, fixed before the first job is built
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub settings: JobSettings,
    pub overwrite: bool,
    pub dry_run: bool,
    pub requests: Vec<ProfileRequest>,
    pub catalog: ProfileCatalog,
}

impl RunConfig {
    /// Merge CLI overrides over the config file. Precedence: flag, file, built-in default.
    pub fn resolve(config: &Config, overrides: Overrides) -> Result<Self, ConfigError> {
        let quality = overrides
            .quality
            .unwrap_or_else(|| config.encoder.quality.clone());
        if quality.trim().is_empty() {
            return Err(ConfigError::EmptyQuality);
        }

        let mut shared_args = split_args(&config.encoder.shared_args)?;
        if let Some(extra) = overrides.extra_args.as_deref() {
            shared_args.extend(split_args(extra)?);
        }

        let requests = select_requests(
            overrides.render,
            overrides.only_primary,
            overrides.only_secondary,
        )?;

        let settings = JobSettings {
            encoder_path: overrides
                .encoder_path
                .unwrap_or_else(|| config.encoder.path.clone()),
            output_root: overrides
                .output_root
                .unwrap_or_else(|| config.output.root.clone()),
            quality,
            quality_flag: config.encoder.quality_flag.clone(),
            shared_args,
        };

        Ok(Self {
            settings,
            overwrite: overrides.overwrite.unwrap_or(config.output.overwrite),
            dry_run: overrides.dry_run,
            requests,
            catalog: ProfileCatalog::with_user_profiles(&config.profiles),
        })
    }
}

fn split_args(value: &str) -> Result<Vec<String>, ConfigError> {
    shlex::split(value).ok_or_else(|| ConfigError::MalformedExtraArgs {
        value: value.to_string(),
    })
}
