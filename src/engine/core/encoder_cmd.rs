use std::ffi::{OsStr, OsString};
use std::path::Path;
use std::process::Command;

use super::job::{JobSettings, RenderJob};
use super::profile::RenderProfile;

/// Assemble the encoder argument vector.
///
/// Order is fixed: codec, output resolution, quality, shared args, then input and
/// output last.
pub fn build_encoder_args(
    profile: &RenderProfile,
    settings: &JobSettings,
    input_path: &Path,
    output_path: &Path,
) -> Vec<OsString> {
    let mut args: Vec<OsString> = Vec::with_capacity(10 + settings.shared_args.len());

    args.push("-c".into());
    args.push(profile.codec().into());

    args.push("--output-res".into());
    args.push(profile.resolution().as_str().into());

    args.push(settings.quality_flag.as_str().into());
    args.push(settings.quality.as_str().into());

    args.extend(settings.shared_args.iter().map(OsString::from));

    args.push("-i".into());
    args.push(input_path.as_os_str().to_os_string());
    args.push("-o".into());
    args.push(output_path.as_os_str().to_os_string());

    args
}

/// Build the process command for a job (stdio is left inherited)
pub fn build_encoder_cmd(job: &RenderJob) -> Command {
    let mut cmd = Command::new(job.encoder_path());
    cmd.args(job.args());
    cmd
}

/// Render program + args as one line; args with spaces or quotes are double-quoted
pub fn format_encoder_cmd(program: &Path, args: &[OsString]) -> String {
    std::iter::once(program.as_os_str())
        .chain(args.iter().map(OsString::as_os_str))
        .map(quote_arg)
        .collect::<Vec<_>>()
        .join(" ")
}

fn quote_arg(arg: &OsStr) -> String {
    let s = arg.to_string_lossy();
    if s.is_empty() {
        "\"\"".to_string()
    } else if s.chars().any(|c| c.is_whitespace() || c == '"') {
        format!("\"{}\"", s.replace('"', "\\\""))
    } else {
        s.into_owned()
    }
}
