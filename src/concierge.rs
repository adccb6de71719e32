//! The conversation adapter — the bridge between a locally-held conversation
//! and the grounded generative service.
//!
//! [`exchange`] is stateless: every call reshapes the *entire* prior history
//! into role-tagged turns and sends it along with the new user message. That
//! is a deliberate tradeoff — full context every call (correct under
//! stateless/serverless hosting, trivial resume semantics) against request
//! size growing linearly with conversation length. Do not replace it with a
//! persistent remote session without re-deriving the failure and resume
//! behavior; server-side state changes what a dropped connection means.
//!
//! The public contract never fails. Any transport, auth, or payload problem
//! is logged for operators and absorbed into a displayable apology, so the
//! session controller has exactly one code path.

use crate::backend::{ExchangeReply, ExchangeRequest, Turn};
use crate::ctx::GuideCtx;
use crate::types::{ChatMessage, Coordinates, GroundingMetadata};

/// Persona and tone policy for the concierge, sent as the system instruction
/// on every exchange.
pub const SYSTEM_INSTRUCTION: &str = "\
You are the \"Dallas Lit Guide\", a knowledgeable and sophisticated concierge for \
independent bookstores in Dallas, Texas. \
Your goal is to help users discover charming bookshops, find literary events, or get \
book recommendations based on their mood.

You have access to Google Maps to find real locations. \
When a user asks about a specific store or location, ALWAYS use the 'googleMaps' tool \
to provide accurate, real-time information. \
If the user asks about recent events or news, you can use the 'googleMaps' tool as it \
often contains latest reviews, or imply general knowledge if specific search isn't \
needed (though maps is preferred for locations).

Tone: Warm, literary, inviting, slightly whimsical but very practical with directions.
Format: Keep responses concise and scannable. Use markdown.";

/// Shown when the service answers successfully but with no text.
pub const FALLBACK_EMPTY: &str = "I couldn't find that information right now.";

/// Shown when the exchange fails for any reason (network, auth, bad payload).
pub const FALLBACK_ERROR: &str =
    "I'm having trouble connecting to the literary network. Please try again.";

/// The normalized result of one exchange. Always displayable.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeOutcome {
    /// Reply text. Never empty — real content or one of the fallbacks.
    pub text: String,
    /// Citations, present only when the service grounded a successful reply.
    pub grounding: Option<GroundingMetadata>,
}

/// Send one user message with its full prior history and return a
/// displayable outcome.
///
/// `history` must be in chronological order; `new_text` is appended as the
/// final user turn. Callers are expected to filter blank input (the session
/// controller does) — this function sends whatever it is given.
///
/// Makes exactly one outbound call, no retry, and retains no state between
/// invocations.
pub async fn exchange(
    ctx: &GuideCtx,
    history: &[ChatMessage],
    new_text: &str,
    location: Option<Coordinates>,
) -> ExchangeOutcome {
    let request = build_request(ctx, history, new_text, location);

    match ctx
        .backend
        .exchange(&ctx.client, &ctx.base_url, &request)
        .await
    {
        Ok(reply) => outcome_from_reply(reply),
        Err(err) => {
            tracing::error!(backend = ctx.backend.name(), error = %err, "exchange failed");
            ExchangeOutcome {
                text: FALLBACK_ERROR.to_string(),
                grounding: None,
            }
        }
    }
}

/// Reshape history plus the new message into a normalized request.
fn build_request(
    ctx: &GuideCtx,
    history: &[ChatMessage],
    new_text: &str,
    location: Option<Coordinates>,
) -> ExchangeRequest {
    let mut turns: Vec<Turn> = history
        .iter()
        .filter(|m| !m.thinking)
        .map(|m| Turn::new(m.role, m.text.clone()))
        .collect();
    turns.push(Turn::new(crate::types::Role::User, new_text));

    ExchangeRequest {
        model: ctx.model.clone(),
        system_instruction: ctx.system_instruction.clone(),
        turns,
        location,
    }
}

fn outcome_from_reply(reply: ExchangeReply) -> ExchangeOutcome {
    let text = if reply.text.trim().is_empty() {
        FALLBACK_EMPTY.to_string()
    } else {
        reply.text
    };
    ExchangeOutcome {
        text,
        grounding: reply.grounding,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockBackend;
    use crate::types::{GroundingChunk, Role};
    use std::sync::Arc;

    fn mock_ctx(backend: Arc<MockBackend>) -> GuideCtx {
        GuideCtx::builder().backend(backend).build()
    }

    fn history() -> Vec<ChatMessage> {
        vec![
            ChatMessage::model(0, "Welcome!"),
            ChatMessage::user(1, "Any poetry readings?"),
            ChatMessage::model(2, "Poets Oak Cliff hosts them."),
        ]
    }

    #[tokio::test]
    async fn test_exchange_sends_full_history_plus_new_turn() {
        let backend = Arc::new(MockBackend::fixed("Sure."));
        let ctx = mock_ctx(backend.clone());

        exchange(&ctx, &history(), "What time tonight?", None).await;

        let seen = backend.requests();
        assert_eq!(seen.len(), 1);
        let turns = &seen[0].turns;
        assert_eq!(turns.len(), 4);
        assert_eq!(turns[0].role, Role::Model);
        assert_eq!(turns[0].text, "Welcome!");
        assert_eq!(turns[3].role, Role::User);
        assert_eq!(turns[3].text, "What time tonight?");
        assert_eq!(seen[0].system_instruction, SYSTEM_INSTRUCTION);
    }

    #[tokio::test]
    async fn test_exchange_passes_location() {
        let backend = Arc::new(MockBackend::fixed("Nearby: The Wild Detectives."));
        let ctx = mock_ctx(backend.clone());

        let loc = Coordinates::new(32.78, -96.80);
        exchange(&ctx, &[], "Find a bookstore near me", Some(loc)).await;

        assert_eq!(backend.requests()[0].location, Some(loc));
    }

    #[tokio::test]
    async fn test_exchange_skips_thinking_placeholders() {
        let backend = Arc::new(MockBackend::fixed("ok"));
        let ctx = mock_ctx(backend.clone());

        let mut msgs = history();
        let mut placeholder = ChatMessage::model(3, "Consulting the archives...");
        placeholder.thinking = true;
        msgs.push(placeholder);

        exchange(&ctx, &msgs, "next", None).await;
        assert_eq!(backend.requests()[0].turns.len(), 4); // 3 history + 1 new
    }

    #[tokio::test]
    async fn test_exchange_returns_grounding() {
        let grounding = GroundingMetadata {
            grounding_chunks: vec![GroundingChunk::Maps {
                uri: "https://maps.example".into(),
                title: "Deep Vellum Books".into(),
                review_snippets: vec![],
            }],
            web_search_queries: vec![],
        };
        let backend = Arc::new(MockBackend::grounded("Try Deep Vellum Books.", grounding));
        let ctx = mock_ctx(backend);

        let outcome = exchange(&ctx, &[], "Where?", None).await;
        assert_eq!(outcome.text, "Try Deep Vellum Books.");
        let chunks = outcome.grounding.unwrap().grounding_chunks;
        assert_eq!(chunks[0].title(), "Deep Vellum Books");
    }

    #[tokio::test]
    async fn test_empty_reply_becomes_placeholder() {
        let backend = Arc::new(MockBackend::fixed("   "));
        let ctx = mock_ctx(backend);

        let outcome = exchange(&ctx, &[], "hm", None).await;
        assert_eq!(outcome.text, FALLBACK_EMPTY);
    }

    #[tokio::test]
    async fn test_failure_becomes_apology_not_error() {
        let backend = Arc::new(MockBackend::failing());
        let ctx = mock_ctx(backend);

        let outcome = exchange(&ctx, &history(), "hello?", None).await;
        assert_eq!(outcome.text, FALLBACK_ERROR);
        assert!(outcome.grounding.is_none());
    }

    #[tokio::test]
    async fn test_missing_api_key_becomes_apology() {
        // Real backend, no key, no network call needed to fail.
        let ctx = GuideCtx::builder().build();
        let outcome = exchange(&ctx, &[], "hi", None).await;
        assert_eq!(outcome.text, FALLBACK_ERROR);
    }
}
