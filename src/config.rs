//! TOML configuration parsing and startup validation.
//!
//! Every section has defaults, so a minimal config only needs to point at a
//! corpus. Validation happens once at load time; an invalid generation or
//! answer mode is a fatal startup error, never a per-request one.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{AskError, Result};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    #[serde(default)]
    pub answer: AnswerConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Where the corpus snapshot is fetched from at startup.
#[derive(Debug, Deserialize, Clone)]
pub struct CorpusConfig {
    /// `"file"` or `"s3"`.
    #[serde(default = "default_corpus_source")]
    pub source: String,
    /// Local JSON file (source = "file").
    pub path: Option<PathBuf>,
    /// Bucket name (source = "s3").
    pub bucket: Option<String>,
    /// Object key (source = "s3").
    pub key: Option<String>,
    #[serde(default = "default_region")]
    pub region: String,
    /// Custom endpoint for S3-compatible stores (MinIO, LocalStack).
    pub endpoint_url: Option<String>,
}

fn default_corpus_source() -> String {
    "file".to_string()
}
fn default_region() -> String {
    "ap-south-1".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct RetrievalConfig {
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
        }
    }
}

fn default_top_k() -> usize {
    2
}

/// How `Answer.text` is produced: `"template"` composes locally from the top
/// results, `"generated"` delegates to the configured generation backend.
#[derive(Debug, Deserialize, Clone)]
pub struct AnswerConfig {
    #[serde(default = "default_answer_mode")]
    pub mode: String,
}

impl Default for AnswerConfig {
    fn default() -> Self {
        Self {
            mode: default_answer_mode(),
        }
    }
}

fn default_answer_mode() -> String {
    "template".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct GenerationConfig {
    /// `"local"` or `"bedrock"`.
    #[serde(default = "default_generation_mode")]
    pub mode: String,
    #[serde(default = "default_region")]
    pub region: String,
    #[serde(default = "default_model_id")]
    pub model_id: String,
    #[serde(default = "default_max_token_count")]
    pub max_token_count: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_top_p")]
    pub top_p: f64,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Custom endpoint for testing against a stub service.
    pub endpoint_url: Option<String>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            mode: default_generation_mode(),
            region: default_region(),
            model_id: default_model_id(),
            max_token_count: default_max_token_count(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            timeout_secs: default_timeout_secs(),
            endpoint_url: None,
        }
    }
}

fn default_generation_mode() -> String {
    "local".to_string()
}
fn default_model_id() -> String {
    "amazon.nova-lite-v1:0".to_string()
}
fn default_max_token_count() -> u32 {
    500
}
fn default_temperature() -> f64 {
    0.2
}
fn default_top_p() -> f64 {
    0.9
}
fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:7878".to_string()
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        AskError::Config(format!("failed to read config file {}: {}", path.display(), e))
    })?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| AskError::Config(format!("failed to parse config file: {}", e)))?;

    validate(&config)?;
    Ok(config)
}

/// Validate a parsed config. Split out so tests can build configs directly.
pub fn validate(config: &Config) -> Result<()> {
    match config.corpus.source.as_str() {
        "file" => {
            if config.corpus.path.is_none() {
                return Err(AskError::Config(
                    "corpus.path must be set when corpus.source is 'file'".to_string(),
                ));
            }
        }
        "s3" => {
            if config.corpus.bucket.is_none() || config.corpus.key.is_none() {
                return Err(AskError::Config(
                    "corpus.bucket and corpus.key must be set when corpus.source is 's3'"
                        .to_string(),
                ));
            }
        }
        other => {
            return Err(AskError::Config(format!(
                "Unknown corpus source: '{}'. Must be file or s3.",
                other
            )));
        }
    }

    if config.retrieval.top_k < 1 {
        return Err(AskError::Config(
            "retrieval.top_k must be >= 1".to_string(),
        ));
    }

    match config.answer.mode.as_str() {
        "template" | "generated" => {}
        other => {
            return Err(AskError::Config(format!(
                "Unknown answer mode: '{}'. Must be template or generated.",
                other
            )));
        }
    }

    // Generation mode is validated even in template answer mode — a bad mode
    // is a startup failure, not something discovered on first generated call.
    match config.generation.mode.as_str() {
        "local" | "bedrock" => {}
        other => {
            return Err(AskError::Config(format!(
                "Unknown generation mode: '{}'. Must be local or bedrock.",
                other
            )));
        }
    }

    if config.generation.mode == "bedrock" {
        if config.generation.model_id.is_empty() {
            return Err(AskError::Config(
                "generation.model_id must be set for bedrock mode".to_string(),
            ));
        }
        if config.generation.region.is_empty() {
            return Err(AskError::Config(
                "generation.region must be set for bedrock mode".to_string(),
            ));
        }
    }

    if !(0.0..=1.0).contains(&config.generation.temperature) {
        return Err(AskError::Config(
            "generation.temperature must be in [0.0, 1.0]".to_string(),
        ));
    }
    if !(0.0..=1.0).contains(&config.generation.top_p) {
        return Err(AskError::Config(
            "generation.top_p must be in [0.0, 1.0]".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml_str: &str) -> Result<Config> {
        let config: Config = toml::from_str(toml_str).expect("toml parses");
        validate(&config)?;
        Ok(config)
    }

    #[test]
    fn test_minimal_config_gets_defaults() {
        let config = parse(
            r#"
[corpus]
path = "./articles.json"
"#,
        )
        .unwrap();

        assert_eq!(config.corpus.source, "file");
        assert_eq!(config.retrieval.top_k, 2);
        assert_eq!(config.answer.mode, "template");
        assert_eq!(config.generation.mode, "local");
        assert_eq!(config.generation.model_id, "amazon.nova-lite-v1:0");
        assert_eq!(config.generation.max_token_count, 500);
        assert_eq!(config.generation.temperature, 0.2);
        assert_eq!(config.generation.top_p, 0.9);
        assert_eq!(config.server.bind, "127.0.0.1:7878");
    }

    #[test]
    fn test_unknown_generation_mode_rejected() {
        let err = parse(
            r#"
[corpus]
path = "./articles.json"

[generation]
mode = "openai"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, AskError::Config(_)));
        assert!(err.to_string().contains("Unknown generation mode"));
    }

    #[test]
    fn test_generation_mode_checked_even_in_template_answer_mode() {
        let err = parse(
            r#"
[corpus]
path = "./articles.json"

[answer]
mode = "template"

[generation]
mode = "nonsense"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, AskError::Config(_)));
    }

    #[test]
    fn test_unknown_answer_mode_rejected() {
        let err = parse(
            r#"
[corpus]
path = "./articles.json"

[answer]
mode = "chatty"
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Unknown answer mode"));
    }

    #[test]
    fn test_file_source_requires_path() {
        let err = parse("[corpus]\nsource = \"file\"\n").unwrap_err();
        assert!(err.to_string().contains("corpus.path"));
    }

    #[test]
    fn test_s3_source_requires_bucket_and_key() {
        let err = parse(
            r#"
[corpus]
source = "s3"
bucket = "ask-author-content"
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("corpus.key"));
    }

    #[test]
    fn test_s3_source_accepted() {
        let config = parse(
            r#"
[corpus]
source = "s3"
bucket = "ask-author-content"
key = "content/sample_articles.json"
region = "ap-south-1"
"#,
        )
        .unwrap();
        assert_eq!(config.corpus.bucket.as_deref(), Some("ask-author-content"));
    }

    #[test]
    fn test_top_k_zero_rejected() {
        let err = parse(
            r#"
[corpus]
path = "./articles.json"

[retrieval]
top_k = 0
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("top_k"));
    }

    #[test]
    fn test_temperature_out_of_range_rejected() {
        let err = parse(
            r#"
[corpus]
path = "./articles.json"

[generation]
temperature = 1.5
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("temperature"));
    }
}
