use std::path::Path;

use super::error::ConfigError;
use super::job::{JobSettings, RenderJob};
use super::profile::{PRIMARY_PROFILE, ProfileCatalog, ProfileRequest, SECONDARY_PROFILE};

/// A request paired with the job it resolved to, or why it could not be built
#[derive(Debug, Clone)]
pub struct PlannedJob {
    pub request: ProfileRequest,
    pub job: Result<RenderJob, ConfigError>,
}

/// Rendered when nothing is requested: primary (HEVC 1080p) then secondary (H.264 720p)
pub fn default_requests() -> Vec<ProfileRequest> {
    vec![
        ProfileRequest::Named(PRIMARY_PROFILE.to_string()),
        ProfileRequest::Named(SECONDARY_PROFILE.to_string()),
    ]
}

/// Collapse `--render` and the `--only-*` toggles into one requested set.
///
/// Explicit requests replace the defaults. The toggles are shorthand for a
/// single named request and cannot be mixed with each other or with `--render`.
pub fn select_requests(
    render: Vec<ProfileRequest>,
    only_primary: bool,
    only_secondary: bool,
) -> Result<Vec<ProfileRequest>, ConfigError> {
    if only_primary && only_secondary {
        return Err(ConfigError::ConflictingSelection {
            reason: "--only-primary and --only-secondary are mutually exclusive".to_string(),
        });
    }
    if !render.is_empty() && (only_primary || only_secondary) {
        return Err(ConfigError::ConflictingSelection {
            reason: "--render cannot be combined with --only-primary or --only-secondary"
                .to_string(),
        });
    }

    if only_primary {
        Ok(vec![ProfileRequest::Named(PRIMARY_PROFILE.to_string())])
    } else if only_secondary {
        Ok(vec![ProfileRequest::Named(SECONDARY_PROFILE.to_string())])
    } else if render.is_empty() {
        Ok(default_requests())
    } else {
        Ok(render)
    }
}

/// Resolve one request into a job
pub fn build_job(
    input_path: &Path,
    request: &ProfileRequest,
    catalog: &ProfileCatalog,
    settings: &JobSettings,
) -> Result<RenderJob, ConfigError> {
    let profile = request.resolve(catalog)?;
    RenderJob::new(input_path, profile, settings)
}

/// One planned entry per request, in request order.
///
/// Per-request problems stay attached to their entry so the rest of the batch can
/// still run. An input without a file name breaks every job alike and fails the
/// whole plan instead.
pub fn plan_jobs(
    input_path: &Path,
    requests: &[ProfileRequest],
    catalog: &ProfileCatalog,
    settings: &JobSettings,
) -> Result<Vec<PlannedJob>, ConfigError> {
    if input_path.file_stem().is_none() {
        return Err(ConfigError::NoFileName {
            path: input_path.to_path_buf(),
        });
    }

    Ok(requests
        .iter()
        .map(|request| PlannedJob {
            request: request.clone(),
            job: build_job(input_path, request, catalog, settings),
        })
        .collect())
}
