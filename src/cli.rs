use clap::Parser;
use nvrender::config::Overrides;
use nvrender::engine::ProfileRequest;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "nvrender")]
#[command(
    version,
    about = "Use NVEnc to generate several renditions of one file (default: hevc@1080p, h264@720p)",
    long_about = None
)]
pub struct Cli {
    /// Source file to re-encode
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Encoder executable (e.g. NVEncC64.exe)
    #[arg(short, long, value_name = "PATH", visible_alias = "nvenc")]
    pub encoder: Option<PathBuf>,

    /// Directory to write the new files
    #[arg(short, long, value_name = "DIR")]
    pub output_root: Option<PathBuf>,

    /// Constant quality setting (lower is better)
    #[arg(short, long, value_name = "Q", visible_alias = "cqp")]
    pub quality: Option<String>,

    /// Clobber output files that already exist (overrides config)
    #[arg(long, conflicts_with = "no_overwrite")]
    pub overwrite: bool,

    /// Skip renditions whose output already exists (overrides config)
    #[arg(long, conflicts_with = "overwrite")]
    pub no_overwrite: bool,

    /// Rendition to produce, repeatable: CODEC@WxH (e.g. "h264@1280x720") or a profile name
    #[arg(short, long = "render", value_name = "CODEC@WxH|NAME")]
    pub render: Vec<String>,

    /// Only render the primary profile (hevc@1920x1080 unless reconfigured)
    #[arg(long)]
    pub only_primary: bool,

    /// Only render the secondary profile (h264@1280x720 unless reconfigured)
    #[arg(long)]
    pub only_secondary: bool,

    /// Extra encoder arguments, shell-quoted, appended to the shared arguments
    #[arg(long, value_name = "ARGS", allow_hyphen_values = true)]
    pub extra_args: Option<String>,

    /// Print the encoder commands without running them
    #[arg(long)]
    pub dry_run: bool,

    /// Config file to use instead of the default location
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        let overwrite = if self.overwrite {
            Some(true)
        } else if self.no_overwrite {
            Some(false)
        } else {
            None // Use config default
        };

        Overrides {
            encoder_path: self.encoder.clone(),
            output_root: self.output_root.clone(),
            quality: self.quality.clone(),
            overwrite,
            extra_args: self.extra_args.clone(),
            render: self.render.iter().map(|r| ProfileRequest::parse(r)).collect(),
            only_primary: self.only_primary,
            only_secondary: self.only_secondary,
            dry_run: self.dry_run,
        }
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}
