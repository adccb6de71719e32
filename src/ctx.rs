//! Shared context for adapter invocations.
//!
//! [`GuideCtx`] carries the HTTP client, service endpoint, backend, model
//! identifier, and system instruction. It is constructed once per process and
//! shared by every exchange; no conversation state lives here — the session
//! resends its full history on every call.

use crate::backend::{Backend, GeminiBackend};
use crate::concierge::SYSTEM_INSTRUCTION;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// Default endpoint for the Gemini API.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Shared context for grounded exchanges.
///
/// # Example
///
/// ```
/// use lit_guide::GuideCtx;
///
/// let ctx = GuideCtx::builder()
///     .api_key("AIza...")
///     .model("gemini-2.5-flash")
///     .build();
/// ```
pub struct GuideCtx {
    /// HTTP client (cheap to clone -- uses `Arc` internally).
    pub client: Client,
    /// Base URL for the generative service.
    pub base_url: String,
    /// Service backend. Default: [`GeminiBackend`].
    pub backend: Arc<dyn Backend>,
    /// Model identifier sent with every request.
    pub model: String,
    /// Persona and tone policy sent as the system instruction.
    pub system_instruction: String,
}

impl GuideCtx {
    /// Create a new builder with all defaults.
    pub fn builder() -> GuideCtxBuilder {
        GuideCtxBuilder {
            client: None,
            base_url: None,
            backend: None,
            api_key: None,
            model: None,
            system_instruction: None,
            timeout: None,
        }
    }

    /// Build a context from the environment.
    ///
    /// Reads `GEMINI_API_KEY` (tolerated if absent — each exchange then fails
    /// and is absorbed into fallback text, never a crash) plus optional
    /// `LIT_GUIDE_MODEL` and `LIT_GUIDE_BASE_URL` overrides.
    pub fn from_env() -> Self {
        let mut builder = Self::builder().backend(Arc::new(GeminiBackend::from_env()));
        if let Ok(model) = std::env::var("LIT_GUIDE_MODEL") {
            builder = builder.model(model);
        }
        if let Ok(base_url) = std::env::var("LIT_GUIDE_BASE_URL") {
            builder = builder.base_url(base_url);
        }
        builder.build()
    }
}

impl std::fmt::Debug for GuideCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GuideCtx")
            .field("base_url", &self.base_url)
            .field("backend", &self.backend.name())
            .field("model", &self.model)
            .finish()
    }
}

/// Builder for [`GuideCtx`].
pub struct GuideCtxBuilder {
    client: Option<Client>,
    base_url: Option<String>,
    backend: Option<Arc<dyn Backend>>,
    api_key: Option<String>,
    model: Option<String>,
    system_instruction: Option<String>,
    timeout: Option<Duration>,
}

impl GuideCtxBuilder {
    /// Set the HTTP client. If not set, a default client is created.
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Set the service base URL. Default: [`DEFAULT_BASE_URL`].
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the backend. Default: [`GeminiBackend`] with the builder's key.
    pub fn backend(mut self, backend: Arc<dyn Backend>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Set the API key for the default [`GeminiBackend`].
    /// Ignored if a backend is supplied via [`backend`](Self::backend).
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the model identifier. Default: [`DEFAULT_MODEL`].
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Override the system instruction. Default:
    /// [`SYSTEM_INSTRUCTION`](crate::concierge::SYSTEM_INSTRUCTION).
    pub fn system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    /// Set the request timeout. Default: 60 seconds.
    ///
    /// Ignored when a custom `Client` is supplied (its own timeout applies).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the context.
    pub fn build(self) -> GuideCtx {
        let timeout = self.timeout.unwrap_or(Duration::from_secs(60));
        let client = self.client.unwrap_or_else(|| {
            Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client")
        });
        let backend = self.backend.unwrap_or_else(|| {
            let mut gemini = GeminiBackend::new();
            if let Some(key) = self.api_key {
                gemini = gemini.with_api_key(key);
            }
            Arc::new(gemini)
        });
        GuideCtx {
            client,
            base_url: self
                .base_url
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            backend,
            model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            system_instruction: self
                .system_instruction
                .unwrap_or_else(|| SYSTEM_INSTRUCTION.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let ctx = GuideCtx::builder().build();
        assert_eq!(ctx.base_url, DEFAULT_BASE_URL);
        assert_eq!(ctx.model, DEFAULT_MODEL);
        assert_eq!(ctx.backend.name(), "gemini");
        assert!(ctx.system_instruction.contains("Dallas"));
    }

    #[test]
    fn test_builder_trims_trailing_slash() {
        let ctx = GuideCtx::builder()
            .base_url("https://example.com/")
            .build();
        assert_eq!(ctx.base_url, "https://example.com");
    }

    #[test]
    fn test_builder_overrides() {
        let ctx = GuideCtx::builder()
            .model("gemini-exp")
            .system_instruction("Terse answers only.")
            .timeout(Duration::from_secs(5))
            .build();
        assert_eq!(ctx.model, "gemini-exp");
        assert_eq!(ctx.system_instruction, "Terse answers only.");
    }
}
