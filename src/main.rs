mod app;
mod cli;

use nvrender::engine::EXIT_CONFIG_ERROR;
use nvrender::logging;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = cli::parse();

    // Logging is not up yet; the config decides its level
    let config = match app::load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::from(EXIT_CONFIG_ERROR);
        }
    };

    logging::init_logging(&config.logging.level, cli.verbose);
    app::run(&cli, &config)
}
