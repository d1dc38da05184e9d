use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::error::VisionError;
use super::prompts;
use super::{FilterVerdict, VisionModel};
use crate::lookup::ProductRecord;

/// Confidence assumed when the filter verdict omits the scalar.
pub const DEFAULT_VERDICT_CONFIDENCE: f64 = 0.9;

/// Upper bound on keywords returned by one generation call.
pub const MAX_KEYWORDS: usize = 5;

/// Chat-completions client used for all three vision capabilities.
///
/// The product image is downloaded and inlined as a base64 `data:` URL so
/// the provider never needs to reach the original image host itself.
#[derive(Clone)]
pub struct OpenAiVisionModel {
    http: reqwest::Client,
    url: String,
    api_key: String,
    model: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct KeywordsPayload {
    #[serde(default)]
    keywords: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct JancodesPayload {
    #[serde(default)]
    jancodes: Vec<String>,
    confidence: Option<f64>,
}

impl OpenAiVisionModel {
    /// Creates a client for `url` with a per-request `timeout`.
    pub fn new(
        url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, VisionError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| VisionError::Unavailable {
                message: e.to_string(),
            })?;

        Ok(Self {
            http,
            url: url.into(),
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    /// Downloads the product image and re-encodes it as a `data:` URL.
    async fn fetch_image_data_url(&self, image_url: &str) -> Result<String, VisionError> {
        let bytes = self
            .http
            .get(image_url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| VisionError::Unavailable {
                message: format!("image download failed: {e}"),
            })?
            .bytes()
            .await
            .map_err(|e| VisionError::Unavailable {
                message: format!("image download failed: {e}"),
            })?;

        Ok(format!("data:image/jpeg;base64,{}", BASE64.encode(&bytes)))
    }

    /// One chat-completion round trip with JSON response format. Returns the
    /// assistant message content.
    async fn chat(
        &self,
        system_prompt: &str,
        user_text: String,
        image_data_url: &str,
    ) -> Result<String, VisionError> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system_prompt },
                {
                    "role": "user",
                    "content": [
                        { "type": "text", "text": user_text },
                        { "type": "image_url", "image_url": { "url": image_data_url } }
                    ]
                }
            ],
            "max_tokens": 500,
            "response_format": { "type": "json_object" }
        });

        let response = self
            .http
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| VisionError::Unavailable {
                message: e.to_string(),
            })?
            .error_for_status()
            .map_err(|e| VisionError::Unavailable {
                message: e.to_string(),
            })?;

        let parsed: ChatResponse =
            response
                .json()
                .await
                .map_err(|e| VisionError::MalformedOutput {
                    message: e.to_string(),
                })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| VisionError::MalformedOutput {
                message: "response carried no assistant content".to_string(),
            })
    }
}

impl VisionModel for OpenAiVisionModel {
    async fn generate_keywords(
        &self,
        product_name: &str,
        image_url: &str,
    ) -> Result<Vec<String>, VisionError> {
        let data_url = self.fetch_image_data_url(image_url).await?;
        let content = self
            .chat(
                prompts::KEYWORD_SYSTEM_PROMPT,
                prompts::keyword_user_text(product_name),
                &data_url,
            )
            .await?;

        let keywords = finalize_keywords(parse_keywords(&content)?, product_name);

        debug!(count = keywords.len(), "generated search keywords");
        Ok(keywords)
    }

    async fn filter_candidates(
        &self,
        pool: &[ProductRecord],
        product_name: &str,
        image_url: &str,
    ) -> Result<FilterVerdict, VisionError> {
        let data_url = self.fetch_image_data_url(image_url).await?;

        let candidates_json =
            serde_json::to_string_pretty(pool).map_err(|e| VisionError::MalformedOutput {
                message: format!("candidate pool not serializable: {e}"),
            })?;

        let content = self
            .chat(
                prompts::FILTER_SYSTEM_PROMPT,
                prompts::filter_user_text(product_name, &candidates_json),
                &data_url,
            )
            .await?;

        parse_verdict(&content)
    }

    async fn estimate_codes(
        &self,
        product_name: &str,
        image_url: &str,
    ) -> Result<Vec<String>, VisionError> {
        let data_url = self.fetch_image_data_url(image_url).await?;
        let content = self
            .chat(
                prompts::ESTIMATE_SYSTEM_PROMPT,
                prompts::estimate_user_text(product_name),
                &data_url,
            )
            .await?;

        parse_codes(&content)
    }
}

/// Appends the plain product name (a useful search term on its own) when
/// not already proposed, then caps the list at [`MAX_KEYWORDS`].
pub(crate) fn finalize_keywords(mut keywords: Vec<String>, product_name: &str) -> Vec<String> {
    if !product_name.is_empty() && !keywords.iter().any(|k| k == product_name) {
        keywords.push(product_name.to_string());
    }

    keywords.truncate(MAX_KEYWORDS);
    keywords
}

/// Parses `{"keywords": [...]}`, dropping empty/whitespace entries.
pub(crate) fn parse_keywords(content: &str) -> Result<Vec<String>, VisionError> {
    let payload: KeywordsPayload =
        serde_json::from_str(content).map_err(|e| VisionError::MalformedOutput {
            message: e.to_string(),
        })?;

    Ok(payload
        .keywords
        .into_iter()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .collect())
}

/// Parses `{"jancodes": [...], "confidence": 0.x}`, deduplicating codes
/// while preserving rank order and clamping confidence to [0, 1].
pub(crate) fn parse_verdict(content: &str) -> Result<FilterVerdict, VisionError> {
    let payload: JancodesPayload =
        serde_json::from_str(content).map_err(|e| VisionError::MalformedOutput {
            message: e.to_string(),
        })?;

    let mut jancodes: Vec<String> = Vec::new();
    for code in payload.jancodes {
        let code = code.trim().to_string();
        if !code.is_empty() && !jancodes.contains(&code) {
            jancodes.push(code);
        }
    }

    let confidence = payload
        .confidence
        .unwrap_or(DEFAULT_VERDICT_CONFIDENCE)
        .clamp(0.0, 1.0);

    Ok(FilterVerdict {
        jancodes,
        confidence,
    })
}

/// Parses `{"jancodes": [...]}` for direct estimation (confidence ignored).
pub(crate) fn parse_codes(content: &str) -> Result<Vec<String>, VisionError> {
    Ok(parse_verdict(content)?.jancodes)
}
