use anyhow::Context;
use cec_kernel::config::{DEFAULT_CONFIG_NAME, load_config};
use cec_kernel::domain::config::{LoggingConfig, PortalConfig};
use cec_logger::{LevelFilter, Logger};
use cec_server::Server;
use clap::Parser;
use std::path::PathBuf;

/// Community Energy Compass portal server
#[derive(Debug, Parser)]
#[command(name = "cec-portal", version, about)]
struct Cli {
    /// Configuration file; the extension may be omitted
    #[arg(short, long, default_value = DEFAULT_CONFIG_NAME)]
    config: PathBuf,

    /// Overrides `server.port`
    #[arg(short, long)]
    port: Option<u16>,
}

fn init_logger(cfg: &LoggingConfig) -> anyhow::Result<Logger> {
    let level: LevelFilter =
        cfg.level.parse().with_context(|| format!("Invalid log level `{}`", cfg.level))?;

    let mut builder = Logger::builder().name(env!("CARGO_PKG_NAME")).level(level).json(cfg.json);
    if let Some(directory) = &cfg.directory {
        builder = builder.directory(directory);
    }
    if let Some(filter) = &cfg.filter {
        builder = builder.env_filter(filter);
    }

    Ok(builder.init()?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cfg: PortalConfig =
        load_config(Some(&cli.config)).context("Critical: Configuration is malformed")?;

    let _log = init_logger(&cfg.logging)?;

    let mut server = Server::builder().config(cfg);
    if let Some(port) = cli.port {
        server = server.port(port);
    }

    server.build()?.run().await
}
