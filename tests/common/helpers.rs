#![allow(dead_code)]

use nvrender::engine::{
    EncoderProcess, JobSettings, PlannedJob, ProcessExit, ProfileCatalog, ProfileRequest,
    plan_jobs,
};
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

/// Encoder double: records each invocation and answers with a fixed exit code
#[derive(Debug, Default)]
pub struct RecordingEncoder {
    pub calls: Vec<(PathBuf, Vec<String>)>,
    pub exit_code: i32,
}

impl RecordingEncoder {
    pub fn succeeding() -> Self {
        Self::default()
    }

    pub fn failing(exit_code: i32) -> Self {
        Self {
            calls: Vec::new(),
            exit_code,
        }
    }

    /// Value following `-o` in the nth call
    pub fn output_of(&self, n: usize) -> Option<&str> {
        let args = &self.calls.get(n)?.1;
        let pos = args.iter().position(|a| a == "-o")?;
        args.get(pos + 1).map(String::as_str)
    }
}

impl EncoderProcess for RecordingEncoder {
    fn run(&mut self, program: &Path, args: &[OsString]) -> io::Result<ProcessExit> {
        self.calls.push((
            program.to_path_buf(),
            args.iter()
                .map(|a| a.to_string_lossy().to_string())
                .collect(),
        ));
        Ok(ProcessExit::from_code(self.exit_code))
    }
}

pub fn test_settings(output_root: &Path) -> JobSettings {
    JobSettings::new("nvencc", output_root, "22")
}

pub fn requests(values: &[&str]) -> Vec<ProfileRequest> {
    values.iter().map(|v| ProfileRequest::parse(v)).collect()
}

/// Plan with the built-in catalog
pub fn plan(input: &str, output_root: &Path, requests: &[ProfileRequest]) -> Vec<PlannedJob> {
    plan_jobs(
        Path::new(input),
        requests,
        &ProfileCatalog::builtin(),
        &test_settings(output_root),
    )
    .expect("input has a file name")
}

pub fn output_paths(planned: &[PlannedJob]) -> Vec<Option<PathBuf>> {
    planned
        .iter()
        .map(|p| p.job.as_ref().ok().map(|j| j.output_path().to_path_buf()))
        .collect()
}
