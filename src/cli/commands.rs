//! CLI command definitions and argument parsing

use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

use crate::models::GroundingMode;

#[derive(Parser)]
#[command(name = "bookrag")]
#[command(about = "RAG question answering over the Physical AI & Humanoid Robotics book")]
#[command(version)]
pub struct Cli {
    /// Enable verbose debug logging (default: configured level)
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Host to bind (default: server.host)
        #[arg(long)]
        host: Option<String>,
        /// Port to bind (default: server.port)
        #[arg(short, long)]
        port: Option<u16>,
        /// Disable permissive CORS
        #[arg(long)]
        no_cors: bool,
    },
    /// Index documents from a JSON file
    Index {
        /// JSON array of documents, or an object with a `documents` array
        path: PathBuf,
    },
    /// Ask a single question
    Query {
        /// The question to answer
        question: String,
        /// Where the answer's context comes from
        #[arg(short, long, value_enum, default_value = "full-book")]
        mode: ModeArg,
        /// Passage to answer from in selected-text mode
        #[arg(short, long)]
        selected_text: Option<String>,
    },
    /// Show logged exchanges for a session
    Sessions {
        /// Session identifier, e.g. session_<uuid>
        session_id: String,
    },
    /// Show current configuration
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    FullBook,
    SelectedText,
}

impl From<ModeArg> for GroundingMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::FullBook => Self::FullBook,
            ModeArg::SelectedText => Self::SelectedText,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query_with_mode() {
        let cli = Cli::try_parse_from([
            "bookrag",
            "query",
            "What is ZMP?",
            "--mode",
            "selected-text",
            "--selected-text",
            "The zero moment point...",
        ])
        .unwrap();

        match cli.command {
            Commands::Query {
                question,
                mode,
                selected_text,
            } => {
                assert_eq!(question, "What is ZMP?");
                assert_eq!(GroundingMode::from(mode), GroundingMode::SelectedText);
                assert_eq!(selected_text.as_deref(), Some("The zero moment point..."));
            }
            _ => panic!("expected query command"),
        }
    }

    #[test]
    fn test_parse_serve_defaults() {
        let cli = Cli::try_parse_from(["bookrag", "-v", "serve"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Serve {
                host: None,
                port: None,
                no_cors: false
            }
        ));
    }
}
