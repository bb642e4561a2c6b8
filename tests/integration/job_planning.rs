// Tests for turning an input + requested profiles into jobs

use nvrender::config::{Config, Overrides, RunConfig};
use nvrender::engine::{ConfigError, ProfileRequest, plan_jobs};
use std::path::{Path, PathBuf};

use crate::common::helpers::*;

#[test]
fn test_default_profiles_for_movie() {
    let planned = plan(
        "movie.mkv",
        Path::new("/out"),
        &nvrender::engine::default_requests(),
    );

    assert_eq!(planned.len(), 2, "zero requests should yield the two defaults");
    assert_eq!(
        output_paths(&planned),
        vec![
            Some(PathBuf::from("/out/movie.hevc.1080.mkv")),
            Some(PathBuf::from("/out/movie.h264.720.mkv")),
        ]
    );

    let first = planned[0].job.as_ref().unwrap();
    assert_eq!(first.profile().codec(), "hevc");
    assert_eq!(first.profile().resolution().as_str(), "1920x1080");
    let second = planned[1].job.as_ref().unwrap();
    assert_eq!(second.profile().codec(), "h264");
    assert_eq!(second.profile().resolution().as_str(), "1280x720");
}

#[test]
fn test_single_explicit_profile() {
    let planned = plan("clip.ts", Path::new("/r"), &requests(&["av1@3840x2160"]));

    assert_eq!(planned.len(), 1);
    assert_eq!(
        output_paths(&planned),
        vec![Some(PathBuf::from("/r/clip.av1.2160.mkv"))]
    );
}

#[test]
fn test_explicit_requests_preserve_order() {
    let wanted = requests(&[
        "h264@640x360",
        "hevc@3840x2160",
        "secondary",
        "av1@1920x1080",
        "primary",
    ]);
    let planned = plan("show.mp4", Path::new("out"), &wanted);

    assert_eq!(planned.len(), wanted.len());
    for (entry, request) in planned.iter().zip(&wanted) {
        assert_eq!(&entry.request, request);
    }
    assert_eq!(
        output_paths(&planned),
        vec![
            Some(PathBuf::from("out/show.h264.360.mkv")),
            Some(PathBuf::from("out/show.hevc.2160.mkv")),
            Some(PathBuf::from("out/show.h264.720.mkv")),
            Some(PathBuf::from("out/show.av1.1080.mkv")),
            Some(PathBuf::from("out/show.hevc.1080.mkv")),
        ]
    );
}

#[test]
fn test_malformed_resolution_only_affects_its_request() {
    let planned = plan(
        "movie.mkv",
        Path::new("/out"),
        &requests(&["hevc@1920", "h264@1280x720"]),
    );

    assert_eq!(planned.len(), 2);
    assert_eq!(
        planned[0].job.as_ref().unwrap_err(),
        &ConfigError::MalformedResolution {
            value: "1920".to_string()
        }
    );
    assert!(
        planned[1].job.is_ok(),
        "the well-formed request must still be planned"
    );
}

#[test]
fn test_unknown_profile_name() {
    let planned = plan("movie.mkv", Path::new("/out"), &requests(&["tertiary"]));
    assert!(matches!(
        planned[0].job.as_ref().unwrap_err(),
        ConfigError::UnknownProfile { name, known }
            if name == "tertiary" && known.iter().any(|k| k == "primary")
    ));
}

#[test]
fn test_input_directories_are_dropped() {
    let planned = plan(
        "/mnt/bluray/rips/Feature.Film.m2ts",
        Path::new("/srv/conv"),
        &requests(&["primary"]),
    );
    assert_eq!(
        output_paths(&planned),
        vec![Some(PathBuf::from("/srv/conv/Feature.Film.hevc.1080.mkv"))]
    );
}

#[test]
fn test_overrides_apply_to_every_job() {
    let config = Config::default();
    let overrides = Overrides {
        output_root: Some(PathBuf::from("/renders")),
        quality: Some("28".to_string()),
        encoder_path: Some(PathBuf::from("/usr/local/bin/nvencc")),
        render: requests(&["primary", "secondary", "av1@2560x1440"]),
        ..Overrides::default()
    };
    let run = RunConfig::resolve(&config, overrides).unwrap();
    let planned = plan_jobs(
        Path::new("movie.mkv"),
        &run.requests,
        &run.catalog,
        &run.settings,
    )
    .unwrap();

    assert_eq!(planned.len(), 3);
    for entry in &planned {
        let job = entry.job.as_ref().unwrap();
        assert_eq!(job.output_root(), Path::new("/renders"));
        assert!(job.output_path().starts_with("/renders"));
        assert_eq!(job.encoder_path(), Path::new("/usr/local/bin/nvencc"));

        let args: Vec<String> = job
            .args()
            .iter()
            .map(|a| a.to_string_lossy().to_string())
            .collect();
        let q = args.iter().position(|a| a == "--cqp").unwrap();
        assert_eq!(args[q + 1], "28", "every job should carry the overridden quality");
        assert!(args.contains(&"--chapter-copy".to_string()));
    }
}

#[test]
fn test_config_file_profiles_are_addressable() {
    let config = Config::from_toml(
        r#"
        [profiles.mobile]
        codec = "h264"
        resolution = "854x480"
        "#,
    )
    .unwrap();
    let overrides = Overrides {
        output_root: Some(PathBuf::from("/out")),
        render: vec![ProfileRequest::parse("mobile")],
        ..Overrides::default()
    };
    let run = RunConfig::resolve(&config, overrides).unwrap();
    let planned = plan_jobs(
        Path::new("movie.mkv"),
        &run.requests,
        &run.catalog,
        &run.settings,
    )
    .unwrap();

    let job = planned[0].job.as_ref().unwrap();
    assert_eq!(job.profile().name(), Some("mobile"));
    assert_eq!(job.output_path(), Path::new("/out/movie.h264.480.mkv"));
}

#[test]
fn test_planning_does_not_touch_filesystem() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let root = temp_dir.path().join("not-created-yet");

    let planned = plan("movie.mkv", &root, &nvrender::engine::default_requests());
    assert_eq!(planned.len(), 2);
    assert!(!root.exists(), "planning must not create the output root");
}
