//! meetnotes - Meeting transcript summaries you can edit and share
//!
//! Entry point for the meetnotes CLI application.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use meetnotes::cli::{Cli, Commands};
use meetnotes::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Commands::Completions { shell } => {
            meetnotes::cli::completions::print(shell);
        }
        Commands::Templates => {
            meetnotes::cli::commands::list_templates();
        }
        command => {
            // Load configuration only for runtime commands.
            let settings = Settings::load()?;

            match command {
                Commands::Serve { bind } => {
                    meetnotes::cli::commands::serve(&settings, bind).await?;
                }
                Commands::Summarize {
                    file,
                    prompt,
                    output,
                    save,
                    json,
                } => {
                    meetnotes::cli::commands::summarize_transcript(
                        &settings, &file, &prompt, output, save, json,
                    )
                    .await?;
                }
                Commands::Review { file, prompt } => {
                    meetnotes::cli::commands::review_transcript(&settings, &file, &prompt).await?;
                }
                Commands::Share {
                    summary,
                    to,
                    subject,
                    message,
                } => {
                    meetnotes::cli::commands::share_summary(
                        &settings, &summary, to, subject, message,
                    )
                    .await?;
                }
                Commands::Config(config_cmd) => {
                    meetnotes::cli::commands::config_command(&settings, config_cmd)?;
                }
                Commands::Completions { .. } | Commands::Templates => unreachable!(),
            }
        }
    }

    Ok(())
}
