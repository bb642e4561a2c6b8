use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::error::ConfigError;

/// Container extension every rendition is written with, whatever the input was
pub const CONTAINER_EXT: &str = "mkv";

pub const PRIMARY_PROFILE: &str = "primary";
pub const SECONDARY_PROFILE: &str = "secondary";

/// Target output size, kept both parsed and as the literal `WIDTHxHEIGHT` token.
///
/// The literal is what the encoder receives (`--output-res`), and the height half
/// of the literal is what goes into filenames, so `1280x0720` stays `0720`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    width: u32,
    height: u32,
    literal: String,
    split: usize,
}

impl Resolution {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The token exactly as supplied
    pub fn as_str(&self) -> &str {
        &self.literal
    }

    /// Height component exactly as supplied
    pub fn height_token(&self) -> &str {
        &self.literal[self.split + 1..]
    }
}

impl FromStr for Resolution {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ConfigError::MalformedResolution {
            value: s.to_string(),
        };

        let mut parts = s.split('x');
        let (Some(w), Some(h), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(malformed());
        };

        let width = parse_dimension(w).ok_or_else(malformed)?;
        let height = parse_dimension(h).ok_or_else(malformed)?;

        Ok(Self {
            width,
            height,
            literal: s.to_string(),
            split: w.len(),
        })
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.literal)
    }
}

// u32::from_str accepts a leading '+', which the encoder would not
fn parse_dimension(token: &str) -> Option<u32> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse::<u32>().ok().filter(|v| *v > 0)
}

/// Codec identifiers end up in output filenames, so keep them to a single path segment
fn validate_codec(codec: &str) -> Result<(), ConfigError> {
    let bad = codec.is_empty()
        || codec
            .chars()
            .any(|c| c.is_whitespace() || c == '/' || c == '\\');
    if bad {
        return Err(ConfigError::InvalidCodec {
            value: codec.to_string(),
        });
    }
    Ok(())
}

/// One desired output rendition: codec plus target resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderProfile {
    name: Option<String>,
    codec: String,
    resolution: Resolution,
}

impl RenderProfile {
    pub fn new(codec: &str, resolution: &str) -> Result<Self, ConfigError> {
        validate_codec(codec)?;
        Ok(Self {
            name: None,
            codec: codec.to_string(),
            resolution: resolution.parse()?,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set when the profile came from the catalog rather than an explicit `codec@WxH`
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn codec(&self) -> &str {
        &self.codec
    }

    pub fn resolution(&self) -> &Resolution {
        &self.resolution
    }
}

impl fmt::Display for RenderProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.codec, self.resolution)
    }
}

/// Unvalidated profile definition as written in the config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSpec {
    pub codec: String,
    pub resolution: String,
}

impl ProfileSpec {
    pub fn new(codec: &str, resolution: &str) -> Self {
        Self {
            codec: codec.to_string(),
            resolution: resolution.to_string(),
        }
    }

    pub fn to_profile(&self) -> Result<RenderProfile, ConfigError> {
        RenderProfile::new(&self.codec, &self.resolution)
    }
}

/// Named profiles available to `--render NAME`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileCatalog {
    profiles: BTreeMap<String, ProfileSpec>,
}

impl ProfileCatalog {
    /// The two built-in renditions: HEVC 1080p and H.264 720p
    pub fn builtin() -> Self {
        let mut profiles = BTreeMap::new();
        profiles.insert(
            PRIMARY_PROFILE.to_string(),
            ProfileSpec::new("hevc", "1920x1080"),
        );
        profiles.insert(
            SECONDARY_PROFILE.to_string(),
            ProfileSpec::new("h264", "1280x720"),
        );
        Self { profiles }
    }

    /// Built-ins plus user definitions; a user entry replaces a built-in of the same name
    pub fn with_user_profiles(user: &BTreeMap<String, ProfileSpec>) -> Self {
        let mut catalog = Self::builtin();
        for (name, spec) in user {
            catalog.profiles.insert(name.clone(), spec.clone());
        }
        catalog
    }

    pub fn get(&self, name: &str) -> Option<&ProfileSpec> {
        self.profiles.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }
}

/// A single `--render` value: either `CODEC@WxH` or a catalog name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileRequest {
    Named(String),
    Explicit { codec: String, resolution: String },
}

impl ProfileRequest {
    /// Never fails: bad codecs, resolutions and names are reported when the request is resolved
    pub fn parse(value: &str) -> Self {
        match value.split_once('@') {
            Some((codec, resolution)) => Self::Explicit {
                codec: codec.to_string(),
                resolution: resolution.to_string(),
            },
            None => Self::Named(value.to_string()),
        }
    }

    pub fn explicit(codec: &str, resolution: &str) -> Self {
        Self::Explicit {
            codec: codec.to_string(),
            resolution: resolution.to_string(),
        }
    }

    pub fn resolve(&self, catalog: &ProfileCatalog) -> Result<RenderProfile, ConfigError> {
        match self {
            Self::Named(name) => catalog
                .get(name)
                .ok_or_else(|| ConfigError::UnknownProfile {
                    name: name.clone(),
                    known: catalog.names().map(str::to_string).collect(),
                })?
                .to_profile()
                .map(|p| p.with_name(name.clone())),
            Self::Explicit { codec, resolution } => RenderProfile::new(codec, resolution),
        }
    }
}

impl fmt::Display for ProfileRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::Explicit { codec, resolution } => write!(f, "{}@{}", codec, resolution),
        }
    }
}

/// Derive `<output_root>/<input stem>.<codec>.<height>.mkv`.
///
/// Pure: only the file-name component of `input_path` is used and the filesystem
/// is never consulted.
pub fn derive_output_path(
    input_path: &Path,
    output_root: &Path,
    codec: &str,
    resolution: &Resolution,
) -> Result<PathBuf, ConfigError> {
    let stem = input_path
        .file_stem()
        .ok_or_else(|| ConfigError::NoFileName {
            path: input_path.to_path_buf(),
        })?;

    let mut filename = stem.to_os_string();
    for part in [codec, resolution.height_token(), CONTAINER_EXT] {
        filename.push(".");
        filename.push(part);
    }

    Ok(output_root.join(filename))
}
