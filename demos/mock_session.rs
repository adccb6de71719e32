//! Example: driving a session with MockBackend, no live service needed.
//!
//! Run with: `cargo run --example mock_session`

use lit_guide::types::{GroundingChunk, GroundingMetadata};
use lit_guide::{render, ChatSession, Coordinates, GuideCtx, MockBackend};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    // A canned grounded reply, as the real service would shape it.
    let grounding = GroundingMetadata {
        grounding_chunks: vec![GroundingChunk::Maps {
            uri: "https://maps.google.com/?cid=42".to_string(),
            title: "Deep Vellum Books".to_string(),
            review_snippets: vec!["Excellent coffee and translated fiction.".to_string()],
        }],
        web_search_queries: vec![],
    };
    let mock = MockBackend::grounded(
        "Try **Deep Vellum Books** in Deep Ellum — open until 8pm.",
        grounding,
    );

    let ctx = GuideCtx::builder().backend(Arc::new(mock)).build();

    let mut session = ChatSession::new();
    session.set_location(Coordinates::new(32.78, -96.80));
    session.submit(&ctx, "Find a bookstore near me open now.").await;

    for msg in session.messages() {
        println!("[{:?}]", msg.role);
        for line in render::message_lines(msg) {
            println!("  {}", line);
        }
    }
}
