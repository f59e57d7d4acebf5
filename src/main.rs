use std::fs::File;
use std::path::PathBuf;

use arcview::core::config::{self, CliOverrides};
use arcview::tui;
use clap::Parser;
use simplelog::{ConfigBuilder, WriteLogger};

#[derive(Parser)]
#[command(name = "arcview", about = "Browse the contents of .zip and .docx archives in the terminal")]
struct Args {
    /// Archive to open on startup
    archive: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<String>,

    /// Log file path
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // The logger needs the resolved config, so config problems are logged afterwards.
    let (file_config, config_error) = match config::load_config() {
        Ok(c) => (c, None),
        Err(e) => (Default::default(), Some(e)),
    };
    let cli = CliOverrides {
        log_level: args.log_level,
        log_file: args.log_file,
    };
    let resolved = config::resolve(&file_config, &cli);

    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    if let Some(e) = config_error {
        log::warn!("Config error, using defaults: {}", e);
    }
    for warning in &resolved.warnings {
        log::warn!("{}", warning);
    }
    log::info!("arcview starting up: {:?}", resolved);

    tui::run(resolved, args.archive)
}
