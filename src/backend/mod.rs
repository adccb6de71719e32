//! Backend trait and normalized request/reply types.
//!
//! The [`Backend`] trait abstracts over the generative service, translating
//! between the normalized [`ExchangeRequest`]/[`ExchangeReply`] types and the
//! provider's HTTP API. Built-in implementations: [`GeminiBackend`] for the
//! real service, [`MockBackend`] for deterministic tests.
//!
//! ```text
//! concierge::exchange ──► ExchangeRequest ──► Backend::exchange() ──► ExchangeReply
//!                                                    │
//!                                         ┌──────────┴──────────┐
//!                                   GeminiBackend          MockBackend
//!                                   generateContent        canned replies
//! ```

pub mod gemini;
pub mod mock;

pub use gemini::GeminiBackend;
pub use mock::MockBackend;

use crate::error::Result;
use crate::types::{Coordinates, GroundingMetadata, Role};
use async_trait::async_trait;
use reqwest::Client;

/// One role-tagged turn of conversation, in chronological order.
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    /// Who authored the turn.
    pub role: Role,
    /// The turn's text.
    pub text: String,
}

impl Turn {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }
}

/// A normalized request for one grounded exchange — provider-agnostic.
///
/// [`exchange`](crate::concierge::exchange) builds this from the session's
/// full history; the [`Backend`] translates it into the provider's HTTP shape.
#[derive(Debug, Clone)]
pub struct ExchangeRequest {
    /// Model identifier (e.g. `"gemini-2.5-flash"`).
    pub model: String,

    /// Persona and tone policy sent as the system instruction.
    pub system_instruction: String,

    /// The full conversation so far plus the new user turn, oldest first.
    /// The last turn is always the user turn being answered.
    pub turns: Vec<Turn>,

    /// Optional position used to bias maps grounding toward the user.
    pub location: Option<Coordinates>,
}

/// A normalized reply from the generative service.
#[derive(Debug, Clone, Default)]
pub struct ExchangeReply {
    /// The generated text. May be empty if the provider returned no parts;
    /// the adapter substitutes a placeholder in that case.
    pub text: String,

    /// Citations attached to the first candidate, if the reply was grounded.
    pub grounding: Option<GroundingMetadata>,

    /// HTTP status code (for diagnostics/logging).
    pub status: u16,
}

/// Abstraction over the generative content service.
///
/// Implementors make exactly one outbound call per [`exchange`](Backend::exchange)
/// invocation and never retry; retry policy (there is none, by contract) and
/// error absorption live above this trait.
///
/// Object-safe by design — held as `Arc<dyn Backend>` in
/// [`GuideCtx`](crate::ctx::GuideCtx).
#[async_trait]
pub trait Backend: Send + Sync {
    /// Execute one grounded exchange.
    async fn exchange(
        &self,
        client: &Client,
        base_url: &str,
        request: &ExchangeRequest,
    ) -> Result<ExchangeReply>;

    /// Human-readable name for logging and diagnostics.
    fn name(&self) -> &'static str;
}
