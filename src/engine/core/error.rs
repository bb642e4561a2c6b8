use std::path::PathBuf;
use thiserror::Error;

/// Problems found while turning requests and settings into jobs.
///
/// Raised before any encoder process is started. Whether one of these aborts
/// the whole run or only the affected request depends on where it surfaces:
/// `RunConfig::resolve` and `plan_jobs` failures are global, errors attached to
/// a single `PlannedJob` are not.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("malformed resolution '{value}': expected WIDTHxHEIGHT, e.g. 1920x1080")]
    MalformedResolution { value: String },

    #[error("invalid codec '{value}': must be non-empty without whitespace or path separators")]
    InvalidCodec { value: String },

    #[error("unknown profile '{name}' (known: {})", known.join(", "))]
    UnknownProfile { name: String, known: Vec<String> },

    #[error("conflicting profile selection: {reason}")]
    ConflictingSelection { reason: String },

    #[error("quality value must not be empty")]
    EmptyQuality,

    #[error("could not split shared encoder arguments (unbalanced quotes?): {value}")]
    MalformedExtraArgs { value: String },

    #[error("input path has no file name: {}", path.display())]
    NoFileName { path: PathBuf },
}
