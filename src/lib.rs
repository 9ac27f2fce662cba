//! # ask-author
//!
//! Question answering over a small fixed library of articles.
//!
//! A free-text question is normalized into a token set, matched against every
//! document by distinct-term overlap, and the top-ranked documents are turned
//! into an answer with a source list — either through a fixed template or by
//! delegating to a generation backend (pure-local template or a hosted
//! Bedrock model).
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌───────────┐   ┌───────────┐   ┌────────────┐
//! │  Corpus   │──▶│ Retriever │──▶│ Composer  │──▶│   Answer    │
//! │ file / S3 │   │  overlap  │   │ template/ │   │ text+sources│
//! └──────────┘   └───────────┘   │ generated │   └────────────┘
//!                                └─────┬─────┘
//!                                      ▼
//!                               ┌────────────┐
//!                               │  Backend    │
//!                               │ local/bedrock│
//!                               └────────────┘
//! ```
//!
//! The corpus is loaded exactly once at startup and shared read-only across
//! requests; the CLI (`ask`) and the HTTP layer are thin frontends over
//! [`engine::AskEngine`].
//!
//! ## Quick Start
//!
//! ```bash
//! ask ask "who won the award"        # answer one question
//! ask corpus                         # list the loaded documents
//! ask serve                          # start the HTTP server
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing and validation |
//! | [`error`] | Typed error kinds |
//! | [`models`] | Core data types |
//! | [`tokenize`] | Text normalization into token sets |
//! | [`retrieve`] | Overlap scoring and ranking |
//! | [`compose`] | Template-mode answer composition |
//! | [`generate`] | Generation backend abstraction (local, bedrock) |
//! | [`corpus`] | Corpus load (file or S3) |
//! | [`aws`] | AWS SigV4 request signing |
//! | [`engine`] | Composition root |
//! | [`server`] | HTTP layer |

pub mod aws;
pub mod compose;
pub mod config;
pub mod corpus;
pub mod engine;
pub mod error;
pub mod generate;
pub mod models;
pub mod retrieve;
pub mod server;
pub mod tokenize;
