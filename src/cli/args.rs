//! CLI argument definitions using clap

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::summary::{InstructionPreset, SummarizeRequest, SummaryTemplate, DEFAULT_INSTRUCTIONS};

/// meetnotes - Meeting transcript summaries you can edit and share
#[derive(Parser, Debug)]
#[command(name = "meetnotes")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API (POST /summarize, POST /send-email)
    Serve {
        /// Address to bind, overrides server.bind_addr
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Summarize a plain-text transcript file ("-" for stdin)
    Summarize {
        /// Transcript file
        file: PathBuf,

        #[command(flatten)]
        prompt: PromptArgs,

        /// Write the summary to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also save the summary as meeting-summary-<date>.txt
        #[arg(long)]
        save: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Summarize a transcript, then edit and share the result interactively
    Review {
        /// Transcript file
        file: PathBuf,

        #[command(flatten)]
        prompt: PromptArgs,
    },

    /// Share a summary file by email (delivery is simulated)
    Share {
        /// File containing the summary text
        summary: PathBuf,

        /// Recipient address (repeatable)
        #[arg(long = "to", required = true)]
        to: Vec<String>,

        /// Email subject
        #[arg(short, long)]
        subject: Option<String>,

        /// Message placed above the summary
        #[arg(short, long)]
        message: Option<String>,
    },

    /// List built-in summary templates and instruction presets
    Templates,

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

/// How the summary should be steered.
#[derive(Args, Debug, Clone, Default)]
pub struct PromptArgs {
    /// Fixed summary template; takes precedence over --prompt and --preset
    #[arg(short, long, value_enum)]
    pub template: Option<SummaryTemplate>,

    /// Custom instructions
    #[arg(short, long, conflicts_with = "preset")]
    pub prompt: Option<String>,

    /// Canned custom instructions
    #[arg(long, value_enum)]
    pub preset: Option<InstructionPreset>,
}

impl PromptArgs {
    /// Build the service request. Without any steering the default
    /// instructions are used.
    pub fn to_request(&self, transcript: String) -> SummarizeRequest {
        let mut request = SummarizeRequest::new(transcript);
        if let Some(template) = self.template {
            request = request.with_template(template.key());
        }

        let instructions = match (&self.prompt, self.preset) {
            (Some(prompt), _) => Some(prompt.clone()),
            (None, Some(preset)) => Some(preset.instructions().to_string()),
            (None, None) if self.template.is_none() => Some(DEFAULT_INSTRUCTIONS.to_string()),
            (None, None) => None,
        };
        if let Some(instructions) = instructions {
            request = request.with_prompt(instructions);
        }
        request
    }
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}
