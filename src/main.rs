mod cli;
mod engine;
mod error;
mod logging;
mod model;
mod orchestrator;
#[cfg(feature = "tui")]
mod tui;
mod view;

use anyhow::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();
    let is_one_shot = args.is_one_shot();

    if is_one_shot || cfg!(not(feature = "tui")) {
        logging::init(&args.log_level, logging::LogTarget::Stderr)?;
    } else {
        let path = args
            .log_file
            .clone()
            .unwrap_or_else(logging::default_log_path);
        logging::init(&args.log_level, logging::LogTarget::File(&path))?;
    }

    match cli::run(args).await {
        Ok(()) => Ok(()),
        Err(e) if is_one_shot => {
            eprintln!("{e}");
            std::process::exit(1);
        }
        Err(e) => Err(e),
    }
}
