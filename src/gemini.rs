//! Gemini API client
//!
//! Implements [`CompletionProvider`] over `generateContent`.
//! Uses a long-lived reqwest::Client for connection pooling.

use crate::config::ProviderConfig;
use crate::error::OrchestrationError;
use crate::models::{Message, Role};
use crate::provider::{match_label, CompletionProvider};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tracing::{error, info, warn};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Reusable Gemini client (connection-pooled)
pub struct GeminiClient {
    client: Client,
    config: ProviderConfig,
    endpoint: String,
}

impl GeminiClient {
    pub fn new(config: ProviderConfig) -> crate::Result<Self> {
        if !config.has_api_key() {
            return Err(OrchestrationError::Configuration(
                "GEMINI_API_KEY not configured".to_string(),
            ));
        }

        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(8)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| {
                OrchestrationError::Configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        let endpoint = config.endpoint();

        Ok(Self {
            client,
            config,
            endpoint,
        })
    }

    /// Single generateContent round trip
    async fn generate(&self, request: &GeminiRequest) -> crate::Result<String> {
        info!(model = %self.config.model, "Calling Gemini API");

        let response = self
            .client
            .post(&self.endpoint)
            .header(API_KEY_HEADER, self.config.api_key.as_str())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                error!("Gemini API request failed: {}", e);
                OrchestrationError::Upstream(format!("Gemini API error: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!(%status, "Gemini API error response: {}", error_text);
            return Err(OrchestrationError::Upstream(format!(
                "Gemini API returned {}: {}",
                status,
                api_error_message(&error_text)
            )));
        }

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            let e = e.without_url();
            error!("Failed to parse Gemini response: {}", e);
            OrchestrationError::Upstream(format!("Gemini parse error: {}", e))
        })?;

        let text = extract_text(gemini_response)?;
        info!(chars = text.len(), "Gemini response received");
        Ok(text)
    }
}

#[async_trait]
impl CompletionProvider for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn complete(
        &self,
        messages: &[Message],
        constrained_to: Option<&[&str]>,
    ) -> crate::Result<String> {
        let request = build_request(messages, &self.config, constrained_to);

        let Some(labels) = constrained_to else {
            return self.generate(&request).await;
        };

        coerce_label(labels, self.config.label_attempts, || self.generate(&request)).await
    }
}

/// Run `generate` until its output matches one of `labels`, at most
/// `attempts` times. Transport errors are returned immediately.
async fn coerce_label<F, Fut>(
    labels: &[&str],
    attempts: u32,
    mut generate: F,
) -> crate::Result<String>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = crate::Result<String>>,
{
    for attempt in 1..=attempts {
        let raw = generate().await?;
        if let Some(label) = match_label(&raw, labels) {
            return Ok(label.to_string());
        }
        warn!(attempt, raw = %raw, "Gemini output outside label set");
    }

    Err(OrchestrationError::Upstream(format!(
        "Gemini output could not be coerced into [{}] after {} attempt(s)",
        labels.join(", "),
        attempts
    )))
}

/// Map role-tagged messages onto a Gemini request body
fn build_request(
    messages: &[Message],
    config: &ProviderConfig,
    constrained_to: Option<&[&str]>,
) -> GeminiRequest {
    let system_text = messages
        .iter()
        .filter(|m| m.role() == Role::System)
        .map(|m| m.content())
        .collect::<Vec<_>>()
        .join("\n\n");

    let contents = messages
        .iter()
        .filter(|m| m.role() != Role::System)
        .map(|m| Content {
            role: Some(
                match m.role() {
                    Role::Assistant => "model",
                    _ => "user",
                }
                .to_string(),
            ),
            parts: vec![Part {
                text: m.content().to_string(),
            }],
        })
        .collect();

    let (response_mime_type, response_schema) = match constrained_to {
        Some(labels) => (
            Some("text/x.enum".to_string()),
            Some(ResponseSchema {
                schema_type: "STRING".to_string(),
                values: labels.iter().map(|l| l.to_string()).collect(),
            }),
        ),
        None => (None, None),
    };

    GeminiRequest {
        contents,
        generation_config: GenerationConfig {
            temperature: config.temperature,
            top_p: config.top_p,
            top_k: config.top_k,
            max_output_tokens: config.max_output_tokens,
            response_mime_type,
            response_schema,
        },
        system_instruction: (!system_text.is_empty()).then(|| SystemInstruction {
            parts: vec![Part { text: system_text }],
        }),
    }
}

/// Pull `error.message` out of a Gemini error body, else return it whole
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

fn extract_text(response: GeminiResponse) -> crate::Result<String> {
    let candidate = response.candidates.into_iter().next().ok_or_else(|| {
        OrchestrationError::Upstream("No response from Gemini API".to_string())
    })?;

    let finish_reason = candidate.finish_reason;
    let text = candidate
        .content
        .map(|c| {
            c.parts
                .into_iter()
                .map(|p| p.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(OrchestrationError::Upstream(format!(
            "Empty response from Gemini (finish reason: {})",
            finish_reason.as_deref().unwrap_or("unknown")
        )));
    }

    Ok(text)
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<SystemInstruction>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    top_k: i32,
    max_output_tokens: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<ResponseSchema>,
}

#[derive(Debug, Serialize)]
struct ResponseSchema {
    #[serde(rename = "type")]
    schema_type: String,
    #[serde(rename = "enum")]
    values: Vec<String>,
}

#[derive(Debug, Serialize)]
struct SystemInstruction {
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}
