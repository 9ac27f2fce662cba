//! Corpus loading and ownership.
//!
//! The corpus is fetched exactly once at process start — from a local JSON
//! file or from an S3 object — and is immutable for the life of the process.
//! A fetch or parse failure is fatal: the process cannot serve without its
//! document snapshot.

use chrono::Utc;

use crate::aws::{self, AwsCredentials, SigningRequest};
use crate::config::CorpusConfig;
use crate::error::{AskError, Result};
use crate::models::Document;

/// The fixed, ordered collection of documents available for retrieval.
///
/// Constructed once by the composition root and passed by reference into
/// retrieval calls; never mutated after load.
#[derive(Debug, Clone)]
pub struct Corpus {
    documents: Vec<Document>,
}

impl Corpus {
    /// Wrap an already-materialized document sequence.
    pub fn from_documents(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    /// Fetch and parse the corpus from the configured source.
    pub async fn load(config: &CorpusConfig) -> Result<Self> {
        let bytes = match config.source.as_str() {
            "file" => load_file(config)?,
            "s3" => load_s3(config).await?,
            other => {
                return Err(AskError::Config(format!(
                    "Unknown corpus source: '{}'. Must be file or s3.",
                    other
                )));
            }
        };

        let documents = parse_documents(&bytes)?;
        Ok(Self { documents })
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Parse the corpus blob: a JSON array of `{title, content}` records.
fn parse_documents(bytes: &[u8]) -> Result<Vec<Document>> {
    serde_json::from_slice(bytes)
        .map_err(|e| AskError::CorpusLoad(format!("invalid corpus JSON: {}", e)))
}

fn load_file(config: &CorpusConfig) -> Result<Vec<u8>> {
    let path = config
        .path
        .as_ref()
        .ok_or_else(|| AskError::Config("corpus.path not set".to_string()))?;

    std::fs::read(path).map_err(|e| {
        AskError::CorpusLoad(format!("failed to read {}: {}", path.display(), e))
    })
}

/// Download the corpus object from S3 with a SigV4-signed GET.
async fn load_s3(config: &CorpusConfig) -> Result<Vec<u8>> {
    let bucket = config
        .bucket
        .as_ref()
        .ok_or_else(|| AskError::Config("corpus.bucket not set".to_string()))?;
    let key = config
        .key
        .as_ref()
        .ok_or_else(|| AskError::Config("corpus.key not set".to_string()))?;

    let creds = AwsCredentials::from_env()
        .map_err(|e| AskError::CorpusLoad(e.to_string()))?;

    let host = s3_host(config, bucket);
    let encoded_key = key
        .split('/')
        .map(aws::uri_encode)
        .collect::<Vec<_>>()
        .join("/");
    let canonical_uri = format!("/{}", encoded_key);

    let signed = aws::sign(
        &creds,
        &SigningRequest {
            method: "GET",
            host: &host,
            canonical_uri: &canonical_uri,
            canonical_querystring: "",
            region: &config.region,
            service: "s3",
            payload: b"",
            timestamp: Utc::now(),
        },
    );

    let url = format!("{}://{}{}", scheme(config), host, canonical_uri);
    let client = reqwest::Client::new();

    let mut req = client
        .get(&url)
        .header("Authorization", &signed.authorization)
        .header("x-amz-content-sha256", &signed.content_sha256)
        .header("x-amz-date", &signed.amz_date);
    if let Some(ref token) = signed.session_token {
        req = req.header("x-amz-security-token", token);
    }

    let resp = req.send().await.map_err(|e| {
        AskError::CorpusLoad(format!("failed to get s3://{}/{}: {}", bucket, key, e))
    })?;

    if !resp.status().is_success() {
        return Err(AskError::CorpusLoad(format!(
            "S3 GetObject failed (HTTP {}) for s3://{}/{}",
            resp.status(),
            bucket,
            key
        )));
    }

    let bytes = resp
        .bytes()
        .await
        .map_err(|e| AskError::CorpusLoad(format!("failed to read S3 response body: {}", e)))?;
    Ok(bytes.to_vec())
}

/// Compute the S3 hostname, honoring a custom endpoint for S3-compatible
/// stores (MinIO, LocalStack).
fn s3_host(config: &CorpusConfig, bucket: &str) -> String {
    if let Some(ref endpoint) = config.endpoint_url {
        endpoint
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .trim_end_matches('/')
            .to_string()
    } else {
        format!("{}.s3.{}.amazonaws.com", bucket, config.region)
    }
}

fn scheme(config: &CorpusConfig) -> &'static str {
    match config.endpoint_url {
        Some(ref e) if e.starts_with("http://") => "http",
        _ => "https",
    }
}
