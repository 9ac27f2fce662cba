//! Generation backend abstraction and implementations.
//!
//! Defines the [`GenerationBackend`] trait and its two concrete variants:
//! - **[`LocalBackend`]** — pure; stitches the context contents into a fixed
//!   excerpt-plus-sources template. No side effects.
//! - **[`BedrockBackend`]** — submits a structured prompt to the Bedrock
//!   runtime `invoke` endpoint with fixed decoding parameters and appends the
//!   sources line to the model's text. One synchronous network call per
//!   request; no internal retry — callers apply their own policy at the
//!   boundary (the configured client timeout is that boundary).
//!
//! The backend is chosen once at construction via [`create_backend`]; an
//! unrecognized mode is a configuration error at startup, not a per-request
//! condition.

use async_trait::async_trait;
use chrono::Utc;
use std::time::Duration;

use crate::aws::{self, AwsCredentials, SigningRequest};
use crate::compose::{truncate_chars, NO_RELEVANT_CONTENT};
use crate::config::GenerationConfig;
use crate::error::{AskError, Result};
use crate::models::Document;

/// Maximum excerpt length (characters) in the local template.
const LOCAL_EXCERPT_CHARS: usize = 500;

/// A pluggable producer of narrative answer text.
#[async_trait]
pub trait GenerationBackend: Send + Sync + std::fmt::Debug {
    /// The configured mode name (`"local"` or `"bedrock"`).
    fn mode(&self) -> &str;

    /// Produce the answer text for a question given ranked context documents.
    ///
    /// Empty contexts yield the fixed no-relevant-content string rather than
    /// an error.
    async fn generate(&self, question: &str, contexts: &[&Document]) -> Result<String>;
}

/// Instantiate the backend selected by `generation.mode`.
pub fn create_backend(config: &GenerationConfig) -> Result<Box<dyn GenerationBackend>> {
    match config.mode.as_str() {
        "local" => Ok(Box::new(LocalBackend)),
        "bedrock" => Ok(Box::new(BedrockBackend::new(config)?)),
        other => Err(AskError::Config(format!(
            "Unknown generation mode: '{}'. Must be local or bedrock.",
            other
        ))),
    }
}

/// Join all context titles for the trailing `Sources:` block.
fn sources_line(contexts: &[&Document]) -> String {
    contexts
        .iter()
        .map(|c| c.title.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

// ============ Local backend ============

/// Pure template backend: excerpt of the combined contexts plus sources.
#[derive(Debug)]
pub struct LocalBackend;

#[async_trait]
impl GenerationBackend for LocalBackend {
    fn mode(&self) -> &str {
        "local"
    }

    async fn generate(&self, _question: &str, contexts: &[&Document]) -> Result<String> {
        if contexts.is_empty() {
            return Ok(NO_RELEVANT_CONTENT.to_string());
        }

        let combined = contexts
            .iter()
            .map(|c| c.content.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let summary = truncate_chars(&combined, LOCAL_EXCERPT_CHARS);

        Ok(format!(
            "Answer:\n{}\n\nSources:\n{}",
            summary,
            sources_line(contexts)
        ))
    }
}

// ============ Bedrock backend ============

/// Hosted-model backend calling the Bedrock runtime over its REST API.
///
/// Requests are signed with AWS SigV4 (credentials from the environment,
/// verified at construction). Decoding parameters come from config and are
/// fixed per process.
#[derive(Debug)]
pub struct BedrockBackend {
    region: String,
    model_id: String,
    max_token_count: u32,
    temperature: f64,
    top_p: f64,
    endpoint_url: Option<String>,
    client: reqwest::Client,
}

impl BedrockBackend {
    /// Build the backend, verifying credentials are available up front.
    pub fn new(config: &GenerationConfig) -> Result<Self> {
        // Fail at startup, not on the first question
        AwsCredentials::from_env().map_err(|e| AskError::Config(e.to_string()))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AskError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            region: config.region.clone(),
            model_id: config.model_id.clone(),
            max_token_count: config.max_token_count,
            temperature: config.temperature,
            top_p: config.top_p,
            endpoint_url: config.endpoint_url.clone(),
            client,
        })
    }

    fn host(&self) -> String {
        if let Some(ref endpoint) = self.endpoint_url {
            endpoint
                .trim_start_matches("https://")
                .trim_start_matches("http://")
                .trim_end_matches('/')
                .to_string()
        } else {
            format!("bedrock-runtime.{}.amazonaws.com", self.region)
        }
    }

    fn scheme(&self) -> &'static str {
        match self.endpoint_url {
            Some(ref e) if e.starts_with("http://") => "http",
            _ => "https",
        }
    }

    async fn invoke(&self, prompt: &str) -> Result<String> {
        let creds =
            AwsCredentials::from_env().map_err(|e| AskError::Generation(e.to_string()))?;

        let body = serde_json::json!({
            "inputText": prompt,
            "textGenerationConfig": {
                "maxTokenCount": self.max_token_count,
                "temperature": self.temperature,
                "topP": self.top_p,
            }
        });
        let payload = serde_json::to_vec(&body)
            .map_err(|e| AskError::Generation(format!("failed to encode request: {}", e)))?;

        let host = self.host();
        let canonical_uri = format!("/model/{}/invoke", aws::uri_encode(&self.model_id));

        let signed = aws::sign(
            &creds,
            &SigningRequest {
                method: "POST",
                host: &host,
                canonical_uri: &canonical_uri,
                canonical_querystring: "",
                region: &self.region,
                service: "bedrock",
                payload: &payload,
                timestamp: Utc::now(),
            },
        );

        let url = format!("{}://{}{}", self.scheme(), host, canonical_uri);
        let mut req = self
            .client
            .post(&url)
            .header("Authorization", &signed.authorization)
            .header("x-amz-content-sha256", &signed.content_sha256)
            .header("x-amz-date", &signed.amz_date)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .body(payload);
        if let Some(ref token) = signed.session_token {
            req = req.header("x-amz-security-token", token);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| AskError::Generation(format!("Bedrock request failed: {}", e)))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body_text = resp.text().await.unwrap_or_default();
            return Err(AskError::Generation(format!(
                "Bedrock invoke failed (HTTP {}): {}",
                status,
                truncate_chars(&body_text, 500)
            )));
        }

        let json: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| AskError::Generation(format!("invalid Bedrock response: {}", e)))?;

        parse_invoke_response(&json)
    }
}

/// System framing for the hosted model. The question and context blocks are
/// appended by [`build_prompt`].
const PROMPT_FRAMING: &str = "You are an AI assistant for an Indian media platform.\n\
Answer ONLY using the provided context.\n\
If answer is not present, say:\n\
\"The information is not available in the content library.\"\n\
\n\
Be clear, structured, and concise.\n\
If question is in Hindi, respond in Hindi.";

/// Build the structured prompt: framing, context blocks, literal question.
fn build_prompt(question: &str, contexts: &[&Document]) -> String {
    let context_text = contexts
        .iter()
        .map(|c| c.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "{}\n\nContext:\n{}\n\nQuestion:\n{}",
        PROMPT_FRAMING, context_text, question
    )
}

/// Extract `results[0].outputText` from an invoke response.
///
/// A missing or malformed field is surfaced as a generation error, never
/// papered over with a default.
fn parse_invoke_response(json: &serde_json::Value) -> Result<String> {
    json.get("results")
        .and_then(|r| r.as_array())
        .and_then(|r| r.first())
        .and_then(|r| r.get("outputText"))
        .and_then(|t| t.as_str())
        .map(str::to_string)
        .ok_or_else(|| {
            AskError::Generation("invalid Bedrock response: missing results[0].outputText".to_string())
        })
}

#[async_trait]
impl GenerationBackend for BedrockBackend {
    fn mode(&self) -> &str {
        "bedrock"
    }

    async fn generate(&self, question: &str, contexts: &[&Document]) -> Result<String> {
        if contexts.is_empty() {
            return Ok(NO_RELEVANT_CONTENT.to_string());
        }

        let prompt = build_prompt(question, contexts);
        let output = self.invoke(&prompt).await?;

        Ok(format!(
            "{}\n\nSources:\n{}",
            output.trim(),
            sources_line(contexts)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(title: &str, content: &str) -> Document {
        Document {
            title: title.to_string(),
            content: content.to_string(),
        }
    }

    fn run_local(question: &str, contexts: &[&Document]) -> String {
        let rt = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        rt.block_on(LocalBackend.generate(question, contexts)).unwrap()
    }

    #[test]
    fn test_local_empty_contexts() {
        assert_eq!(run_local("anything", &[]), NO_RELEVANT_CONTENT);
    }

    #[test]
    fn test_local_end_to_end_example() {
        // Corpus A/B, query "sharma" retrieves only A
        let a = doc("A", "Sharma wins award");
        let text = run_local("sharma", &[&a]);

        assert!(text.contains("Sharma wins award"));
        assert!(text.starts_with("Answer:\n"));
        assert!(text.ends_with("Sources:\nA"));
    }

    #[test]
    fn test_local_joins_contents_with_single_spaces() {
        let a = doc("A", "first part");
        let b = doc("B", "second part");
        let text = run_local("q", &[&a, &b]);
        assert!(text.contains("first part second part"));
    }

    #[test]
    fn test_local_excerpt_capped_at_500_chars() {
        let a = doc("A", &"x".repeat(800));
        let text = run_local("q", &[&a]);

        let summary = text
            .strip_prefix("Answer:\n")
            .and_then(|t| t.split("\n\nSources:").next())
            .unwrap();
        assert_eq!(summary.chars().count(), 500);
    }

    #[test]
    fn test_local_sources_comma_joined_in_order() {
        let a = doc("First", "one");
        let b = doc("Second", "two");
        let text = run_local("q", &[&a, &b]);
        assert!(text.ends_with("Sources:\nFirst, Second"));
    }

    #[test]
    fn test_build_prompt_contains_framing_context_and_question() {
        let a = doc("A", "Sharma wins award");
        let b = doc("B", "Weather today is sunny");
        let prompt = build_prompt("who won?", &[&a, &b]);

        assert!(prompt.starts_with("You are an AI assistant for an Indian media platform."));
        assert!(prompt.contains("Context:\nSharma wins award\n\nWeather today is sunny"));
        assert!(prompt.ends_with("Question:\nwho won?"));
    }

    #[test]
    fn test_parse_invoke_response_ok() {
        let json = serde_json::json!({
            "results": [{"outputText": "  Sharma won the award.  "}]
        });
        assert_eq!(
            parse_invoke_response(&json).unwrap(),
            "  Sharma won the award.  "
        );
    }

    #[test]
    fn test_parse_invoke_response_missing_results() {
        let err = parse_invoke_response(&serde_json::json!({})).unwrap_err();
        assert!(matches!(err, AskError::Generation(_)));
    }

    #[test]
    fn test_parse_invoke_response_empty_results() {
        let err = parse_invoke_response(&serde_json::json!({"results": []})).unwrap_err();
        assert!(matches!(err, AskError::Generation(_)));
    }

    #[test]
    fn test_parse_invoke_response_non_string_output() {
        let json = serde_json::json!({"results": [{"outputText": 42}]});
        let err = parse_invoke_response(&json).unwrap_err();
        assert!(matches!(err, AskError::Generation(_)));
    }

    #[test]
    fn test_create_backend_local() {
        let config = GenerationConfig::default();
        let backend = create_backend(&config).unwrap();
        assert_eq!(backend.mode(), "local");
    }

    #[test]
    fn test_create_backend_unknown_mode_is_config_error() {
        let config = GenerationConfig {
            mode: "hosted".to_string(),
            ..GenerationConfig::default()
        };
        let err = create_backend(&config).unwrap_err();
        assert!(matches!(err, AskError::Config(_)));
    }
}
