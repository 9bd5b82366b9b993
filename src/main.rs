//! Per-key RGB keyboard lighting driver CLI
//!
//! Builds lighting programs for the keyboard lighting controller and pushes
//! them to a hidraw device.

use clap::Parser;
use klc_driver::config::Config;
use tracing::debug;

// CLI definitions
mod cli;
use cli::{Cli, Commands};

// Command handlers
mod commands;
use commands::resolve_model;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("klc_driver=info".parse()?)
                .add_directive("klc_keyboard=info".parse()?),
        )
        .init();

    let config = Config::load(cli.config.as_deref())?;
    debug!("Effective config: {:?}", config);

    let printer = commands::printer_config(cli.monitor, cli.hex, cli.filter);

    match cli.command {
        Commands::Models => {
            commands::layout::models()?;
        }
        Commands::Keys { model } => {
            commands::layout::keys(resolve_model(model, &config))?;
        }
        Commands::Dump {
            model,
            effect,
            regions,
            json,
            full,
        } => {
            let model = resolve_model(model, &config);
            commands::dump::dump(model, &effect.preset(), &regions, json, full)?;
        }
        Commands::Apply {
            device,
            model,
            effect,
            regions,
        } => {
            let model = resolve_model(model, &config);
            commands::apply::apply(&device, model, &effect.preset(), &regions, &config, printer)
                .await?;
        }
        Commands::Off { device, model } => {
            let model = resolve_model(model, &config);
            commands::apply::off(&device, model, &config, printer).await?;
        }
        Commands::Live { device, model } => {
            let model = resolve_model(model, &config);
            commands::apply::live(&device, model, &config, printer).await?;
        }
    }

    Ok(())
}
