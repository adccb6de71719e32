//! The chat session controller.
//!
//! [`ChatSession`] owns one conversation: an append-only message list seeded
//! with a welcome message, the draft input text, a `busy` flag, and an
//! optional user position. It mediates exactly one in-flight exchange at a
//! time — a submit observed while busy is dropped, not queued — and has no
//! error branch of its own, because [`exchange`](crate::concierge::exchange)
//! always produces displayable text.

use crate::concierge::{self, ExchangeOutcome};
use crate::ctx::GuideCtx;
use crate::location::LocationSource;
use crate::types::{ChatMessage, Coordinates};

/// The fixed greeting every session starts with.
pub const WELCOME_TEXT: &str = "Hello! I'm your Dallas Literary Guide. Ask me about \
finding a cozy reading nook, a rare edition, or directions to the nearest indie bookshop.";

/// One in-memory conversation, from construction until drop. Not persisted.
#[derive(Debug)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    input: String,
    busy: bool,
    location: Option<Coordinates>,
    next_id: u64,
}

impl ChatSession {
    /// Start a session seeded with the welcome message.
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage::model(0, WELCOME_TEXT)],
            input: String::new(),
            busy: false,
            location: None,
            next_id: 1,
        }
    }

    /// The conversation so far, oldest first.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Whether an exchange is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// The current draft input.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Replace the draft input.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// The stored user position, if one was acquired.
    pub fn location(&self) -> Option<Coordinates> {
        self.location
    }

    /// Set the user position directly.
    pub fn set_location(&mut self, location: Coordinates) {
        self.location = Some(location);
    }

    /// One-shot, best-effort position read. Stores on success; on denial or
    /// unavailability leaves the location unset and proceeds silently.
    pub async fn acquire_location(&mut self, source: &dyn LocationSource) {
        if let Some(loc) = source.current().await {
            self.location = Some(loc);
        }
    }

    /// Submit a user message and wait for the reply.
    ///
    /// No-op if `text` is blank or an exchange is already in flight. Otherwise
    /// appends the user message, clears the draft input, and invokes the
    /// adapter with the *pre-append* history plus the new text; the reply —
    /// real or fallback — is appended as a fresh model message. `busy` is
    /// cleared regardless of outcome.
    pub async fn submit(&mut self, ctx: &GuideCtx, text: &str) {
        if text.trim().is_empty() || self.busy {
            return;
        }

        let history = self.messages.clone();
        let user_id = self.fresh_id();
        self.messages.push(ChatMessage::user(user_id, text));
        self.input.clear();
        self.busy = true;

        let ExchangeOutcome { text: reply, grounding } =
            concierge::exchange(ctx, &history, text, self.location).await;

        let model_id = self.fresh_id();
        self.messages
            .push(ChatMessage::model(model_id, reply).with_grounding(grounding));
        self.busy = false;
    }

    /// Submit whatever is in the draft input.
    pub async fn submit_input(&mut self, ctx: &GuideCtx) {
        let text = self.input.clone();
        self.submit(ctx, &text).await;
    }

    fn fresh_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockBackend;
    use crate::concierge::FALLBACK_ERROR;
    use crate::location::{FixedLocation, NoLocation};
    use crate::types::{GroundingChunk, GroundingMetadata, Role};
    use std::sync::Arc;

    fn mock_ctx(backend: Arc<MockBackend>) -> GuideCtx {
        GuideCtx::builder().backend(backend).build()
    }

    #[test]
    fn test_new_session_has_one_welcome_message() {
        let session = ChatSession::new();
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].role, Role::Model);
        assert_eq!(session.messages()[0].text, WELCOME_TEXT);
        assert!(!session.is_busy());
        assert!(session.location().is_none());
    }

    #[tokio::test]
    async fn test_blank_submit_is_a_noop() {
        let ctx = mock_ctx(Arc::new(MockBackend::fixed("unused")));
        let mut session = ChatSession::new();

        session.submit(&ctx, "").await;
        session.submit(&ctx, "   \n\t").await;

        assert_eq!(session.messages().len(), 1);
        assert!(!session.is_busy());
    }

    #[tokio::test]
    async fn test_submit_while_busy_is_a_noop() {
        let backend = Arc::new(MockBackend::fixed("unused"));
        let ctx = mock_ctx(backend.clone());
        let mut session = ChatSession::new();
        session.busy = true;

        session.submit(&ctx, "Anyone there?").await;

        assert_eq!(session.messages().len(), 1);
        assert!(backend.requests().is_empty());
        assert!(session.is_busy()); // untouched by the dropped submit
    }

    #[tokio::test]
    async fn test_successful_submit_appends_user_then_model() {
        let ctx = mock_ctx(Arc::new(MockBackend::fixed("Happy to help.")));
        let mut session = ChatSession::new();

        session.submit(&ctx, "Which store has the best coffee?").await;

        let msgs = session.messages();
        assert_eq!(msgs.len(), 3);
        assert_eq!(msgs[1].role, Role::User);
        assert_eq!(msgs[1].text, "Which store has the best coffee?");
        assert_eq!(msgs[2].role, Role::Model);
        assert_eq!(msgs[2].text, "Happy to help.");
        assert!(!session.is_busy());

        // Fresh, monotonic ids.
        assert!(msgs[0].id < msgs[1].id && msgs[1].id < msgs[2].id);
    }

    #[tokio::test]
    async fn test_submit_sends_pre_append_history() {
        let backend = Arc::new(MockBackend::fixed("ok"));
        let ctx = mock_ctx(backend.clone());
        let mut session = ChatSession::new();

        session.submit(&ctx, "First question").await;
        session.submit(&ctx, "Second question").await;

        let seen = backend.requests();
        // First call: welcome + new turn.
        assert_eq!(seen[0].turns.len(), 2);
        assert_eq!(seen[0].turns[1].text, "First question");
        // Second call: welcome, user, model, new turn.
        assert_eq!(seen[1].turns.len(), 4);
        assert_eq!(seen[1].turns[3].text, "Second question");
    }

    #[tokio::test]
    async fn test_submit_clears_input() {
        let ctx = mock_ctx(Arc::new(MockBackend::fixed("ok")));
        let mut session = ChatSession::new();
        session.set_input("Are there any poetry readings tonight?");

        session.submit_input(&ctx).await;

        assert_eq!(session.input(), "");
        assert_eq!(session.messages().len(), 3);
    }

    #[tokio::test]
    async fn test_acquire_location_best_effort() {
        let mut session = ChatSession::new();

        session.acquire_location(&NoLocation).await;
        assert!(session.location().is_none());

        session
            .acquire_location(&FixedLocation(Coordinates::new(32.78, -96.80)))
            .await;
        assert_eq!(session.location().unwrap().latitude, 32.78);
    }

    #[tokio::test]
    async fn test_end_to_end_grounded_exchange() {
        let grounding = GroundingMetadata {
            grounding_chunks: vec![GroundingChunk::Maps {
                uri: "https://maps.google.com/?cid=42".into(),
                title: "Deep Vellum Books".into(),
                review_snippets: vec![],
            }],
            web_search_queries: vec![],
        };
        let backend = Arc::new(MockBackend::grounded(
            "Try Deep Vellum Books in Deep Ellum.",
            grounding,
        ));
        let ctx = mock_ctx(backend.clone());

        let mut session = ChatSession::new();
        session.set_location(Coordinates::new(32.78, -96.80));
        session.submit(&ctx, "Find a bookstore near me open now.").await;

        // The adapter saw the welcome-only history, the new text, and the location.
        let seen = backend.requests();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].turns.len(), 2);
        assert_eq!(seen[0].turns[0].text, WELCOME_TEXT);
        assert_eq!(seen[0].turns[1].text, "Find a bookstore near me open now.");
        assert_eq!(seen[0].location, Some(Coordinates::new(32.78, -96.80)));

        let msgs = session.messages();
        assert_eq!(msgs.len(), 3);
        assert!(!session.is_busy());
        let chunks = &msgs[2].grounding.as_ref().unwrap().grounding_chunks;
        assert_eq!(chunks[0].title(), "Deep Vellum Books");
    }

    #[tokio::test]
    async fn test_backend_failure_surfaces_as_apology() {
        let ctx = mock_ctx(Arc::new(MockBackend::failing()));
        let mut session = ChatSession::new();

        session.submit(&ctx, "Hello?").await;

        let msgs = session.messages();
        assert_eq!(msgs.len(), 3);
        assert_eq!(msgs[2].role, Role::Model);
        assert_eq!(msgs[2].text, FALLBACK_ERROR);
        assert!(msgs[2].grounding.is_none());
        assert!(!session.is_busy());
    }
}
