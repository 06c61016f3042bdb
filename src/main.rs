use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use outage_schedule_rust::{
    app, cli, config,
    infrastructure::{directories, logging, shutdown},
};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();
    let args = cli::Args::parse();

    let config = config::load_config()?;

    if args.list_regions {
        for region in app::load_registry(&config)?.iter() {
            println!("{}\t{}", region.id, region.name);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let paths = directories::ensure_directories(&config.directories)?;
    logging::init_tracing(&config.logging.level, &paths.logs_dir)?;

    let (shutdown, listener) = shutdown::Shutdown::new();
    shutdown::install_signal_handlers(shutdown);

    let app = app::ParserApp::initialize(config, paths, &args.region)?;
    let outcome = app.run(listener).await;

    if outcome.ok {
        tracing::info!(target: "app", "{}", outcome.message);
        Ok(ExitCode::SUCCESS)
    } else {
        tracing::error!(target: "app", "{}", outcome.message);
        Ok(ExitCode::FAILURE)
    }
}
