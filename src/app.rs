use crate::cli::Cli;
use anyhow::Result;
use nvrender::config::{Config, Overrides, RunConfig};
use nvrender::engine::{
    self, BatchReport, EXIT_CONFIG_ERROR, EXIT_JOB_FAILED, EXIT_OK, EncoderProcess, PlannedJob,
    SystemEncoder,
};
use std::fs;
use std::path::Path;
use std::process::ExitCode;
use tracing::{debug, error, info};

/// Config from `--config` if given, else the default location (or built-ins)
pub fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

pub fn run(cli: &Cli, config: &Config) -> ExitCode {
    ExitCode::from(execute(
        &cli.input,
        config,
        cli.overrides(),
        &mut SystemEncoder,
    ))
}

/// One whole run against the given encoder; returns the process exit code
fn execute(
    input: &Path,
    config: &Config,
    overrides: Overrides,
    encoder: &mut dyn EncoderProcess,
) -> u8 {
    let run = match RunConfig::resolve(config, overrides) {
        Ok(run) => run,
        Err(e) => {
            error!("{}", e);
            return EXIT_CONFIG_ERROR;
        }
    };
    debug!(?run, "resolved run configuration");

    print_options(&run);

    let planned = match engine::plan_jobs(input, &run.requests, &run.catalog, &run.settings) {
        Ok(planned) => planned,
        Err(e) => {
            error!("{}", e);
            return EXIT_CONFIG_ERROR;
        }
    };

    if run.dry_run {
        return handle_dry_run(&planned, run.overwrite);
    }

    let output_root = &run.settings.output_root;
    if let Err(e) = fs::create_dir_all(output_root) {
        error!(
            "Cannot create output root {}: {}",
            output_root.display(),
            e
        );
        return EXIT_CONFIG_ERROR;
    }

    let report = engine::run_batch(planned, run.overwrite, encoder);
    print_summary(&report);
    report.exit_code()
}

fn print_single(label: &str, value: impl std::fmt::Display) {
    println!(" -- {:<12}  :  {}", label, value);
}

fn print_options(run: &RunConfig) {
    print_single("Encoder", run.settings.encoder_path.display());
    print_single("Output Root", run.settings.output_root.display());
    print_single("Quality", &run.settings.quality);
    for (i, request) in run.requests.iter().enumerate() {
        let label = if i == 0 { "Rendering" } else { "" };
        // Show what a profile name stands for
        let shown = match request.resolve(&run.catalog) {
            Ok(profile) if profile.name().is_some() => format!("{} ({})", request, profile),
            _ => request.to_string(),
        };
        if label.is_empty() {
            println!("    {:<12}  :  {}", label, shown);
        } else {
            print_single(label, shown);
        }
    }
    print_single("Overwrite", run.overwrite);
}

fn handle_dry_run(planned: &[PlannedJob], overwrite: bool) -> u8 {
    let mut code = EXIT_OK;
    for entry in planned {
        match &entry.job {
            Ok(job) => {
                if !overwrite && engine::output_exists(job.output_path()) {
                    println!("# exists, would skip: {}", job.output_path().display());
                }
                println!("{}", job.command_line());
            }
            Err(e) => {
                error!("Skipping render '{}': {}", entry.request, e);
                code = EXIT_JOB_FAILED;
            }
        }
    }
    code
}

fn print_summary(report: &BatchReport) {
    info!(
        "Done: {} encoded, {} skipped, {} failed",
        report.encoded(),
        report.skipped(),
        report.failed()
    );
}
