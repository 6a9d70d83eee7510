//! PSLF Stats - command line entry point

use clap::Parser;
use pslf_stats::{app, logging, Config, StdinSource};

fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    logging::init_logger(config.verbose);

    tracing::debug!(?config, "configuration");

    let mut input = StdinSource::new();
    app::run(&config, &mut input, std::io::stdout())?;

    tracing::info!("done");
    Ok(())
}
