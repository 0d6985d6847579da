//! CLI command implementations

use anyhow::{Context, Result};
use chrono::Local;
use clap::ValueEnum;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cli::args::{ConfigCommand, PromptArgs};
use crate::cli::review;
use crate::config::Settings;
use crate::editor::{download_file_name, LatestDraft, ShareComposer, ShareDraft, StubMailer};
use crate::summary::{InstructionPreset, SummarizeResult, Summarizer, SummaryTemplate};
use crate::transcript::read_transcript;
use crate::workspace::Workspace;

/// Run the HTTP API server
pub async fn serve(settings: &Settings, bind: Option<String>) -> Result<()> {
    let bind_addr = bind.unwrap_or_else(|| settings.server.bind_addr.clone());
    crate::server::run_http(settings, &bind_addr).await
}

/// Summarize a transcript file and print the result
pub async fn summarize_transcript(
    settings: &Settings,
    file: &Path,
    prompt: &PromptArgs,
    output: Option<PathBuf>,
    save: bool,
    json: bool,
) -> Result<()> {
    let transcript = read_transcript(file, settings.server.max_transcript_bytes)?;
    let summarizer = Summarizer::from_settings(settings)?;

    let result = summarizer.summarize(&prompt.to_request(transcript)).await?;

    if let Some(path) = output {
        write_summary(&path, &result.summary_text)?;
    }
    if save {
        let path = PathBuf::from(download_file_name(Local::now().date_naive()));
        write_summary(&path, &result.summary_text)?;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(&result);
    }

    Ok(())
}

/// Summarize, then hand the summary to the interactive editor
pub async fn review_transcript(settings: &Settings, file: &Path, prompt: &PromptArgs) -> Result<()> {
    let transcript = read_transcript(file, settings.server.max_transcript_bytes)?;
    let summarizer = Arc::new(Summarizer::from_settings(settings)?);

    let drafts = Arc::new(LatestDraft::default());
    let mut workspace = Workspace::from_settings(
        settings,
        summarizer,
        drafts.clone(),
        Arc::new(StubMailer::new(settings.send_delay())),
    );

    let result = workspace.summarize(prompt.to_request(transcript)).await?;
    print_result(&result);

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    review::run(&mut workspace, &drafts, stdin, std::io::stdout()).await
}

/// Share a summary file with the given recipients
pub async fn share_summary(
    settings: &Settings,
    summary: &Path,
    to: Vec<String>,
    subject: Option<String>,
    message: Option<String>,
) -> Result<()> {
    let text = std::fs::read_to_string(summary)
        .with_context(|| format!("Failed to read summary file: {}", summary.display()))?;
    if text.trim().is_empty() {
        anyhow::bail!("Summary file is empty: {}", summary.display());
    }

    let mut draft = ShareDraft::from_settings(&settings.share);
    if let Some(subject) = subject {
        draft.subject = subject;
    }
    if message.is_some() {
        draft.message = message;
    }
    for (i, address) in to.into_iter().enumerate() {
        if i > 0 {
            draft.add_recipient();
        }
        draft.update_recipient(i, address);
    }

    let composer = ShareComposer::new(draft, Arc::new(StubMailer::new(settings.send_delay())));
    let outcome = composer.send(&text).await?;
    println!(
        "{} ({} recipient{})",
        outcome.message,
        outcome.recipient_count,
        if outcome.recipient_count == 1 { "" } else { "s" }
    );

    Ok(())
}

/// List built-in templates and presets
pub fn list_templates() {
    println!("Templates (--template):");
    for template in SummaryTemplate::ALL {
        println!("  {:<10} {}", template.key(), template.display_name());
    }

    println!();
    println!("Instruction presets (--preset):");
    for preset in InstructionPreset::value_variants() {
        if let Some(value) = preset.to_possible_value() {
            println!("  {:<13} {}", value.get_name(), preset.label());
        }
    }
}

/// Handle config subcommands
pub fn config_command(settings: &Settings, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => {
            let toml = toml::to_string_pretty(settings)?;
            println!("{}", toml);
        }
        ConfigCommand::Path => {
            let path = Settings::config_path()?;
            println!("{}", path.display());
        }
        ConfigCommand::Init { force } => {
            let path = Settings::config_path()?;
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            Settings::write_default(&path)?;
            println!("Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}

// Helper functions

pub(crate) fn write_summary(path: &Path, text: &str) -> Result<()> {
    std::fs::write(path, text)
        .with_context(|| format!("Failed to write summary to {}", path.display()))?;
    eprintln!("Summary saved to {}", path.display());
    Ok(())
}

fn print_result(result: &SummarizeResult) {
    println!("{}", result.summary_text);
    println!();
    println!(
        "[{} | {} words | {}]",
        result.resolved_template_name,
        result.word_count,
        result.generated_at.with_timezone(&Local).format("%Y-%m-%d %H:%M")
    );
}
