//! # ask-author CLI (`ask`)
//!
//! The `ask` binary is the primary interface for ask-author. It answers
//! questions against the configured corpus, inspects the loaded documents,
//! and starts the HTTP server.
//!
//! ## Usage
//!
//! ```bash
//! ask --config ./config/ask.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `ask ask "<question>"` | Answer a question and print the sources |
//! | `ask corpus` | List the loaded documents |
//! | `ask serve` | Start the HTTP server |
//!
//! ## Examples
//!
//! ```bash
//! # Answer a question
//! ask ask "who won the award" --config ./config/ask.toml
//!
//! # Inspect the corpus the config points at
//! ask corpus --config ./config/ask.toml
//!
//! # Serve POST /ask over HTTP
//! ask serve --config ./config/ask.toml
//! ```

use anyhow::bail;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use ask_author::config;
use ask_author::corpus::Corpus;
use ask_author::engine::AskEngine;
use ask_author::server;

/// ask-author — question answering over a fixed article library.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. See `config/ask.example.toml` for a full example.
#[derive(Parser)]
#[command(
    name = "ask",
    about = "ask-author — question answering over a fixed article library",
    version,
    long_about = "ask-author retrieves the most relevant articles for a question by \
    keyword overlap and composes an answer with a source list, either from a fixed \
    template or through a generation backend (local or Bedrock)."
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/ask.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Answer a question against the corpus.
    ///
    /// Loads the corpus, retrieves the best-matching documents, and prints
    /// the composed answer followed by its sources. A question matching
    /// nothing prints the fixed no-relevant-content response.
    Ask {
        /// The question to answer.
        question: String,
    },

    /// List the documents in the configured corpus.
    ///
    /// Loads the corpus and prints each document's position, title, and
    /// content length. Useful for verifying configuration before serving.
    Corpus,

    /// Start the HTTP server.
    ///
    /// Binds to the address configured in `[server].bind` and serves
    /// `POST /ask` and `GET /health`.
    Serve,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Ask { question } => {
            let question = question.trim().to_string();
            if question.is_empty() {
                bail!("question must not be empty");
            }

            let corpus = Corpus::load(&cfg.corpus).await?;
            let engine = AskEngine::new(corpus, &cfg)?;
            let answer = engine.answer_question(&question).await?;

            println!("{}", answer.text);
            if !answer.sources.is_empty() {
                println!();
                println!("sources: {}", answer.sources.join(", "));
            }
        }
        Commands::Corpus => {
            let corpus = Corpus::load(&cfg.corpus).await?;
            println!("{} documents", corpus.len());
            for (i, doc) in corpus.documents().iter().enumerate() {
                println!("{:>3}. {} ({} chars)", i + 1, doc.title, doc.content.chars().count());
            }
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
    }

    Ok(())
}
