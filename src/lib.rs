//! # Lit Guide
//!
//! Conversation core for an indie-bookstore guide: a static catalog of
//! curated Dallas bookstores, a maps-grounded Gemini chat adapter, and a
//! single-flight chat session.
//!
//! The presentation layer (cards, chat bubbles) lives elsewhere; this crate
//! owns everything behind it:
//!
//! - **[`catalog`]** — the fixed featured-bookstore list.
//! - **[`concierge`]** — the stateless adapter. Resends the full history on
//!   every call and *never fails*: any transport or auth problem comes back
//!   as displayable fallback text.
//! - **[`ChatSession`]** — append-only message list, blank-input and
//!   single-flight guards, best-effort location capture.
//! - **[`backend`]** — the provider seam ([`GeminiBackend`] for the real
//!   service, [`MockBackend`] for deterministic tests).
//!
//! ## Quick Start
//!
//! ```no_run
//! use lit_guide::{ChatSession, GuideCtx};
//! use lit_guide::location::EnvLocation;
//!
//! #[tokio::main]
//! async fn main() {
//!     let ctx = GuideCtx::from_env(); // reads GEMINI_API_KEY
//!     let mut session = ChatSession::new();
//!     session.acquire_location(&EnvLocation).await;
//!
//!     session.submit(&ctx, "Find a bookstore near me open now.").await;
//!     for msg in session.messages() {
//!         for line in lit_guide::render::message_lines(msg) {
//!             println!("{}", line);
//!         }
//!     }
//! }
//! ```
//!
//! ## Testing without a live service
//!
//! ```
//! use lit_guide::{ChatSession, GuideCtx, MockBackend};
//! use std::sync::Arc;
//!
//! # tokio_test::block_on(async {
//! let ctx = GuideCtx::builder()
//!     .backend(Arc::new(MockBackend::fixed("Try The Wild Detectives.")))
//!     .build();
//! let mut session = ChatSession::new();
//! session.submit(&ctx, "Somewhere with cocktails?").await;
//! assert_eq!(session.messages().last().unwrap().text, "Try The Wild Detectives.");
//! # });
//! ```

pub mod backend;
pub mod catalog;
pub mod concierge;
pub mod ctx;
pub mod error;
pub mod location;
pub mod render;
pub mod session;
pub mod types;

pub use backend::{GeminiBackend, MockBackend};
pub use concierge::{exchange, ExchangeOutcome, FALLBACK_EMPTY, FALLBACK_ERROR};
pub use ctx::{GuideCtx, GuideCtxBuilder};
pub use error::{GuideError, Result};
pub use session::{ChatSession, WELCOME_TEXT};
pub use types::{
    Bookstore, ChatMessage, Coordinates, GroundingChunk, GroundingMetadata, Role,
};
