use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use readit::app::AppContext;
use readit::cli::{commands, Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = cli.resolve_config()?;
    let ctx = AppContext::new(config)?;

    match cli.command {
        Commands::Thread { ref url, sort } => {
            commands::show_thread(&ctx, url, sort, cli.json).await?;
        }
        Commands::Post { ref url } => {
            commands::show_post(&ctx, url, cli.json).await?;
        }
        Commands::Profile {
            ref username,
            ref filter,
            ref after,
        } => {
            commands::show_profile(&ctx, username, filter.as_deref(), after.as_deref(), cli.json)
                .await?;
        }
        Commands::Cards {
            ref username,
            ref filter,
            ref after,
        } => {
            commands::show_cards(&ctx, username, filter.as_deref(), after.as_deref(), cli.json)
                .await?;
        }
    }

    Ok(())
}
