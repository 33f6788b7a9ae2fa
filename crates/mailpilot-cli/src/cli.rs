use clap::{Parser, Subcommand};
use mailpilot_core::{Category, Priority, Tone};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "mailpilot",
    version,
    about = "Summarize, classify, extract action items from and draft replies to email",
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Override the AI service base URL from config
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage the locally stored threads used for summaries
    #[command(subcommand)]
    Threads(ThreadCommands),

    /// Summarize one stored thread
    Summarize {
        /// Thread id
        id: u64,
    },

    /// Classify an inbox into categories
    Classify {
        /// Only show emails in this category
        #[arg(long)]
        category: Option<Category>,

        /// JSON file with the emails to classify (default: sample inbox)
        #[arg(long, value_name = "FILE")]
        input: Option<PathBuf>,
    },

    /// Extract action items from a batch of emails
    Extract {
        /// Only show items with this priority
        #[arg(long)]
        priority: Option<Priority>,

        /// JSON file with the emails to scan (default: sample emails)
        #[arg(long, value_name = "FILE")]
        input: Option<PathBuf>,
    },

    /// Draft replies in every tone, optionally refining one
    Draft {
        /// Reply thread id
        thread_id: u64,

        /// Tone to show or refine (default: first returned)
        #[arg(long)]
        tone: Option<Tone>,

        /// Refinement instructions for the chosen draft
        #[arg(long, requires = "tone")]
        feedback: Option<String>,
    },

    /// Inspect the config file
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand, Debug)]
pub enum ThreadCommands {
    /// List stored threads
    List,

    /// Store a new thread
    Add {
        #[arg(long)]
        subject: String,

        /// Full thread text
        #[arg(long)]
        content: String,
    },

    /// Delete a stored thread
    Remove { id: u64 },

    /// Replace stored threads with the service's thread list
    Refresh,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the config file location
    Path,
    /// Print the active config
    Show,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_enum_flags_case_insensitively() {
        let cli = Cli::try_parse_from([
            "mailpilot",
            "--api-url",
            "http://localhost:9000",
            "classify",
            "--category",
            "fyi",
        ])
        .expect("parse");

        assert_eq!(cli.api_url.as_deref(), Some("http://localhost:9000"));
        match cli.command {
            Commands::Classify { category, input } => {
                assert_eq!(category, Some(Category::Fyi));
                assert_eq!(input, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn feedback_needs_a_tone() {
        assert!(Cli::try_parse_from(["mailpilot", "draft", "1", "--feedback", "shorter"]).is_err());

        let cli = Cli::try_parse_from([
            "mailpilot", "draft", "1", "--tone", "short", "--feedback", "shorter",
        ])
        .expect("parse");
        match cli.command {
            Commands::Draft {
                thread_id,
                tone,
                feedback,
            } => {
                assert_eq!(thread_id, 1);
                assert_eq!(tone, Some(Tone::Short));
                assert_eq!(feedback.as_deref(), Some("shorter"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn thread_subcommands_parse() {
        let cli = Cli::try_parse_from(["mailpilot", "threads", "remove", "3"]).expect("parse");
        assert!(matches!(cli.command, Commands::Threads(ThreadCommands::Remove { id: 3 })));
    }
}
