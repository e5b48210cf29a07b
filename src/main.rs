use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use quakewatch::app::AppContext;
use quakewatch::cli::{commands, Cli, Commands};
use quakewatch::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut config = Config::load()?;
    cli.apply_overrides(&mut config);
    let ctx = AppContext::new(config)?;

    match cli.command {
        Commands::List { view, limit } => {
            commands::list(&ctx, &view, limit).await?;
        }
        Commands::Show { index, view } => {
            commands::show(&ctx, index, &view).await?;
        }
        Commands::Legend => {
            commands::legend();
        }
        Commands::Tui => {
            quakewatch::tui::run(Arc::new(ctx)).await?;
        }
    }

    Ok(())
}
