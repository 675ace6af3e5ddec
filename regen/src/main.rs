mod cli;

use clap::Parser;
use cli::Cli;
use regen_core::{Generator, GeneratorConfig, Result};
use std::io::{self, BufWriter, Write};
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG takes precedence over -v/-q
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| cli.log_filter().into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let loaded = match &cli.config {
        Some(path) => GeneratorConfig::load(path),
        None => GeneratorConfig::discover(),
    };
    let config = match loaded.and_then(|config| {
        let config = cli.apply(config);
        config.validate()?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e);
        }
    };
    match config.to_toml() {
        Ok(rendered) => debug!("Effective configuration:\n{}", rendered),
        Err(e) => debug!("Effective configuration: {:?} ({})", config, e),
    }

    let generator = match Generator::with_config(&cli.pattern, &config) {
        Ok(generator) => generator,
        Err(e) => {
            error!("Invalid pattern {:?}: {}", cli.pattern, e);
            return Err(e);
        }
    };

    info!("Generating {} string(s) for {:?}", cli.count, cli.pattern);
    let mut out = BufWriter::new(io::stdout().lock());
    for value in generator.take(cli.count) {
        writeln!(out, "{}", value)?;
    }
    out.flush()?;
    Ok(())
}
