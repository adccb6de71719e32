//! Backend for the Gemini `generateContent` API with maps grounding.
//!
//! Endpoint: `/v1beta/models/{model}:generateContent`, authenticated with the
//! `x-goog-api-key` header. The request enables the `googleMaps` tool and,
//! when the caller has a position, biases retrieval toward it via
//! `toolConfig.retrievalConfig.latLng`.

use super::{Backend, ExchangeReply, ExchangeRequest};
use crate::error::Result;
use crate::types::GroundingMetadata;
use crate::GuideError;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

/// Backend for Google's Gemini generative content API.
///
/// # Example
///
/// ```
/// use lit_guide::backend::GeminiBackend;
///
/// let backend = GeminiBackend::new().with_api_key("AIza...");
/// ```
#[derive(Clone, Default)]
pub struct GeminiBackend {
    /// Optional API key. If unset, every call fails with
    /// [`GuideError::MissingApiKey`] — the adapter above turns that into
    /// fallback text rather than a crash.
    pub(crate) api_key: Option<String>,
}

impl std::fmt::Debug for GeminiBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiBackend")
            .field(
                "api_key",
                &self.api_key.as_ref().map(|k| {
                    if k.len() > 6 {
                        format!("{}***", &k[..6])
                    } else {
                        "***".to_string()
                    }
                }),
            )
            .finish()
    }
}

impl GeminiBackend {
    /// Create a backend without authentication.
    pub fn new() -> Self {
        Self { api_key: None }
    }

    /// Set the API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Create a backend keyed (or not) from the `GEMINI_API_KEY` variable.
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty()),
        }
    }

    /// Returns `true` if an API key has been configured.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Build the `contents` array: the full history, oldest first.
    fn build_contents(request: &ExchangeRequest) -> Vec<Value> {
        request
            .turns
            .iter()
            .map(|turn| {
                json!({
                    "role": turn.role.as_wire_str(),
                    "parts": [{"text": turn.text}],
                })
            })
            .collect()
    }

    /// Build the request body for `:generateContent`.
    fn build_body(request: &ExchangeRequest) -> Value {
        let mut body = json!({
            "systemInstruction": {"parts": [{"text": request.system_instruction}]},
            "contents": Self::build_contents(request),
            "tools": [{"googleMaps": {}}],
        });

        if let Some(loc) = request.location {
            body["toolConfig"] = json!({
                "retrievalConfig": {
                    "latLng": {
                        "latitude": loc.latitude,
                        "longitude": loc.longitude,
                    }
                }
            });
        }

        body
    }

    /// Join the text parts of the first candidate. Empty if there are none.
    fn extract_text(json_resp: &Value) -> String {
        json_resp
            .pointer("/candidates/0/content/parts")
            .and_then(|v| v.as_array())
            .map(|parts| {
                parts
                    .iter()
                    .filter_map(|p| p.get("text").and_then(|t| t.as_str()))
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default()
    }

    /// Deserialize the first candidate's grounding metadata, if readable.
    fn extract_grounding(json_resp: &Value) -> Option<GroundingMetadata> {
        let raw = json_resp.pointer("/candidates/0/groundingMetadata")?;
        serde_json::from_value(raw.clone()).ok()
    }
}

#[async_trait]
impl Backend for GeminiBackend {
    async fn exchange(
        &self,
        client: &Client,
        base_url: &str,
        request: &ExchangeRequest,
    ) -> Result<ExchangeReply> {
        let key = self.api_key.as_deref().ok_or(GuideError::MissingApiKey)?;

        let base = base_url.trim_end_matches('/');
        let url = format!("{}/v1beta/models/{}:generateContent", base, request.model);
        let body = Self::build_body(request);

        let resp = client
            .post(&url)
            .header("x-goog-api-key", key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status().as_u16();
        if !resp.status().is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GuideError::Http { status, body });
        }

        let payload = resp.text().await?;
        let json_resp: Value = serde_json::from_str(&payload)?;
        if json_resp
            .get("candidates")
            .and_then(|c| c.as_array())
            .map_or(true, |c| c.is_empty())
        {
            return Err(GuideError::EmptyResponse);
        }

        Ok(ExchangeReply {
            text: Self::extract_text(&json_resp),
            grounding: Self::extract_grounding(&json_resp),
            status,
        })
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}
