//! Remote generative classifier adapter
//!
//! Delegates verdict production to a hosted text-completion model via the
//! generateContent API. The adapter owns prompt construction, response
//! parsing, and schema validation; it never fabricates a verdict, so every
//! failure surfaces as an error for the orchestrator to recover from.

use async_trait::async_trait;
use scamcheck_core::{AnalysisVerdict, Error, Result, RiskLevel};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable holding the remote service credential
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Low temperature keeps the verdict output format stable
const TEMPERATURE: f32 = 0.1;
const MAX_OUTPUT_TOKENS: u32 = 500;

/// A verdict source backed by an external service
#[async_trait]
pub trait RemoteClassifier: Send + Sync {
    /// Produce a verdict for the message, or fail
    async fn classify(&self, message: &str) -> Result<AnalysisVerdict>;

    /// Get the classifier name for operator logs
    fn name(&self) -> &str;
}

/// Configuration for the hosted model endpoint
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// API credential
    pub api_key: String,

    /// Model identifier
    pub model: String,

    /// API base URL (overridable for tests)
    pub base_url: String,

    /// Per-request timeout; expiry is an ordinary failure
    pub timeout: Duration,
}

impl RemoteConfig {
    /// Create a configuration with default model, endpoint, and timeout
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Read the credential from the environment.
    ///
    /// Returns `None` when the credential is absent or empty; that is an
    /// expected configuration state selecting heuristic-only mode, not an
    /// error.
    pub fn from_env() -> Option<Self> {
        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .map(Self::new)
    }

    /// Set a custom model identifier
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set a custom API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set a custom request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Gemini-backed implementation of [`RemoteClassifier`]
pub struct GeminiClassifier {
    config: RemoteConfig,
    client: reqwest::Client,
}

impl GeminiClassifier {
    /// Create a new classifier with its own HTTP client
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::remote_call(format!("failed to build http client: {e}")))?;

        Ok(Self { config, client })
    }

    /// Build the single structured prompt sent per message
    fn build_prompt(message: &str) -> String {
        format!(
            "You are a cybersecurity expert specializing in scam and phishing detection. \
             Analyze the following message for scam indicators.\n\n\
             Respond with ONLY a JSON object, no markdown and no other text, in exactly this \
             format:\n\
             {{\"riskScore\": <integer 0-100>, \"riskLevel\": \"<low|medium|high>\", \
             \"explanation\": \"<2-3 sentences explaining the assessment>\", \
             \"patterns\": [\"<description of each scam pattern detected>\"], \
             \"suspiciousPhrases\": [\"<phrase quoted verbatim from the message>\"]}}\n\n\
             Message to analyze:\n{message}"
        )
    }
}

#[async_trait]
impl RemoteClassifier for GeminiClassifier {
    async fn classify(&self, message: &str) -> Result<AnalysisVerdict> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        );

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Self::build_prompt(message),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        };

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::Timeout
                } else {
                    Error::remote_call(format!("request failed: {e}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::remote_call(format!("service returned {status}")));
        }

        let completion: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| Error::invalid_response_format(format!("completion body: {e}")))?;

        let text = completion
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or_else(|| Error::invalid_response_format("completion contained no candidates"))?;

        parse_verdict(&text)
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

/// Strip a Markdown code fence the model may wrap around the JSON
fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

/// Parse and validate the model's JSON verdict.
///
/// Fails with `InvalidResponseFormat` when the payload is not JSON, and
/// with `InvalidResponseSchema` when it lacks a numeric score or a valid
/// tier. The tier is taken as reported, not recomputed from the score.
fn parse_verdict(raw: &str) -> Result<AnalysisVerdict> {
    let stripped = strip_code_fences(raw);
    let value: serde_json::Value = serde_json::from_str(stripped)
        .map_err(|e| Error::invalid_response_format(format!("verdict is not valid JSON: {e}")))?;

    let score = value
        .get("riskScore")
        .and_then(|v| v.as_f64())
        .ok_or_else(|| Error::invalid_response_schema("missing numeric riskScore"))?;
    let risk_score = score.clamp(0.0, 100.0).round() as u8;

    let risk_level: RiskLevel = value
        .get("riskLevel")
        .cloned()
        .and_then(|v| serde_json::from_value(v).ok())
        .ok_or_else(|| Error::invalid_response_schema("missing or invalid riskLevel"))?;

    let explanation = value
        .get("explanation")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| {
            "The message was classified by the remote model without further detail.".to_string()
        });

    let patterns = string_array(&value, "patterns");
    let suspicious_phrases = AnalysisVerdict::dedup_phrases(string_array(&value, "suspiciousPhrases"));

    Ok(AnalysisVerdict {
        risk_score,
        risk_level,
        explanation,
        patterns: AnalysisVerdict::patterns_or_sentinel(patterns),
        suspicious_phrases,
    })
}

/// Extract an array of strings from a field, tolerating absence
fn string_array(value: &serde_json::Value, field: &str) -> Vec<String> {
    value
        .get(field)
        .and_then(|v| v.as_array())
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

// =============================================================================
// generateContent API structures
// =============================================================================

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}
