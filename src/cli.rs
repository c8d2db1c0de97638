//! CLI definitions: argument parsing, subcommands, and help text.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;

pub use clap_complete::generate;

const AFTER_HELP: &str = "\
EXAMPLES:
  dataset-chat chat sales.csv                    Upload and chat interactively
  dataset-chat chat sales.csv -p \"Top region?\"   Ask one question, print the answer
  dataset-chat chat data.json --transcript t.html  Save the conversation as HTML on exit
  dataset-chat format < answer.md                Convert message markup to HTML
  dataset-chat datasets                          List datasets loaded on the server
  dataset-chat health                            Check the server
  dataset-chat completions bash                  Generate bash completions

INTERACTIVE COMMANDS:
  /open <path>   Upload another dataset
  /reset         Clear dataset and conversation
  /save [path]   Save the transcript as HTML
  /quit          Exit
";

/// Command-line arguments for the application.
#[derive(Parser)]
#[command(
    author,
    version,
    about = "Chat with your datasets through a dataset analysis server",
    after_help = AFTER_HELP
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Server base URL (overrides DATASET_CHAT_SERVER_URL)
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// Increase log verbosity (use multiple times for debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Reduce log output (errors only)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Upload a dataset and ask questions about it
    Chat {
        /// CSV, XLSX or JSON file to upload
        dataset: PathBuf,
        /// Ask a single question then exit (use '-' to read it from stdin)
        #[arg(short = 'p', long)]
        prompt: Option<String>,
        /// Print answers as formatted HTML instead of wrapped text
        #[arg(long)]
        html: bool,
        /// Wrap width for text output (0 disables wrapping)
        #[arg(long, default_value_t = 100)]
        width: usize,
        /// Save the transcript as HTML to this path on exit
        #[arg(long)]
        transcript: Option<PathBuf>,
    },
    /// Convert message markup to an HTML fragment
    Format {
        /// Input file, or '-' for stdin
        #[arg(default_value = "-")]
        input: String,
    },
    /// List datasets loaded on the server
    Datasets,
    /// Show server health
    Health,
    /// Show server, timeout and directories
    Config,
    /// Generate shell completion script
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        #[arg(value_parser = clap::value_parser!(Shell))]
        shell: Shell,
    },
}

impl Args {
    /// Log level based on -v/-q flags: error, warn, info, or debug.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose >= 2 {
            "debug"
        } else if self.verbose >= 1 {
            "info"
        } else {
            "warn"
        }
    }

    /// Interactive chat owns the terminal, so logs go to a file.
    pub fn is_interactive(&self) -> bool {
        matches!(self.command, Commands::Chat { prompt: None, .. })
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn args_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn log_level_from_flags() {
        let args = Args::parse_from(["dataset-chat", "health"]);
        assert_eq!(args.log_level(), "warn");
        let args = Args::parse_from(["dataset-chat", "-vv", "health"]);
        assert_eq!(args.log_level(), "debug");
        let args = Args::parse_from(["dataset-chat", "health", "-q", "-v"]);
        assert_eq!(args.log_level(), "error");
    }

    #[test]
    fn chat_defaults() {
        let args = Args::parse_from(["dataset-chat", "chat", "sales.csv"]);
        assert!(args.is_interactive());
        match args.command {
            Commands::Chat {
                dataset,
                prompt,
                html,
                width,
                transcript,
            } => {
                assert_eq!(dataset, PathBuf::from("sales.csv"));
                assert!(prompt.is_none());
                assert!(!html);
                assert_eq!(width, 100);
                assert!(transcript.is_none());
            }
            _ => panic!("expected chat"),
        }
    }

    #[test]
    fn single_prompt_is_not_interactive() {
        let args = Args::parse_from([
            "dataset-chat",
            "--server",
            "http://h:1",
            "chat",
            "a.json",
            "-p",
            "rows?",
        ]);
        assert!(!args.is_interactive());
        assert_eq!(args.server.as_deref(), Some("http://h:1"));
    }

    #[test]
    fn format_reads_stdin_by_default() {
        let args = Args::parse_from(["dataset-chat", "format"]);
        assert!(matches!(args.command, Commands::Format { input } if input == "-"));
    }
}
