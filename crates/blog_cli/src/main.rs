mod browser;
mod cli;
mod commands;
mod format;
mod logging;

use std::sync::Arc;
use anyhow::{Context, Result};
use blog_client::HttpArticleClient;
use blog_query::{BlogSession, QueryClient, RetryPolicy};
use clap::Parser;
use tracing::info;
use cli::{Cli, Commands};
use commands::CreateArgs;
use logging::{init_logging, level_for, LogTarget};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.clone().unwrap_or(Commands::Tui);

    let target = match (&cli.log_file, &command) {
        (Some(path), _) => LogTarget::File(path),
        (None, Commands::Tui) => LogTarget::Discard,
        (None, _) => LogTarget::Stderr,
    };
    init_logging(level_for(cli.verbose), target).context("Failed to set up logging")?;

    match command {
        Commands::Serve { port, seed } => commands::serve(cli.resource.clone(), port, seed).await,
        Commands::Tui => browser::run(session(&cli)?).await,
        Commands::List => commands::list(&session(&cli)?).await,
        Commands::Show { id } => commands::show(&mut session(&cli)?, id).await,
        Commands::Create {
            title,
            description,
            content,
            category,
            cover_image,
        } => {
            let args = CreateArgs {
                title,
                description,
                content,
                category,
                cover_image,
            };
            commands::create(&mut session(&cli)?, args).await
        }
    }
}

fn session(cli: &Cli) -> Result<BlogSession> {
    let api = HttpArticleClient::new(cli.client_config()).context("Invalid article store URL")?;
    info!("📡 Using article store at {}", cli.api_url);
    let retry = RetryPolicy {
        attempts: cli.retries.max(1),
        ..RetryPolicy::default()
    };
    let client = QueryClient::new(Arc::new(api)).with_retry(retry);
    Ok(BlogSession::new(client, cli.api_url.clone()))
}
