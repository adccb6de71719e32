//! Mock backend for testing without a live service.
//!
//! [`MockBackend`] returns pre-configured replies in order, cycling when
//! exhausted, and records every request it receives so tests can assert on
//! the exact history and location that reached the wire. The
//! [`failing`](MockBackend::failing) constructor builds a backend whose every
//! call errors, for exercising the fallback path.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::Client;

use super::{Backend, ExchangeReply, ExchangeRequest};
use crate::error::Result;
use crate::types::GroundingMetadata;
use crate::GuideError;

/// A test backend with canned replies.
#[derive(Debug)]
pub struct MockBackend {
    replies: Vec<ExchangeReply>,
    index: AtomicUsize,
    fail: bool,
    requests: Mutex<Vec<ExchangeRequest>>,
}

impl MockBackend {
    /// Create a mock with the given canned replies, returned in order.
    /// Cycles from the beginning when exhausted.
    pub fn new(replies: Vec<ExchangeReply>) -> Self {
        assert!(
            !replies.is_empty(),
            "MockBackend requires at least one reply"
        );
        Self {
            replies,
            index: AtomicUsize::new(0),
            fail: false,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock that always returns the same text, ungrounded.
    pub fn fixed(text: impl Into<String>) -> Self {
        Self::new(vec![ExchangeReply {
            text: text.into(),
            grounding: None,
            status: 200,
        }])
    }

    /// Create a mock that always returns the same text with grounding attached.
    pub fn grounded(text: impl Into<String>, grounding: GroundingMetadata) -> Self {
        Self::new(vec![ExchangeReply {
            text: text.into(),
            grounding: Some(grounding),
            status: 200,
        }])
    }

    /// Create a mock whose every call fails with a transport-shaped error.
    pub fn failing() -> Self {
        Self {
            replies: Vec::new(),
            index: AtomicUsize::new(0),
            fail: true,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// All requests this mock has received, in order.
    pub fn requests(&self) -> Vec<ExchangeRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn next_reply(&self) -> ExchangeReply {
        let idx = self.index.fetch_add(1, Ordering::Relaxed) % self.replies.len();
        self.replies[idx].clone()
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn exchange(
        &self,
        _client: &Client,
        _base_url: &str,
        request: &ExchangeRequest,
    ) -> Result<ExchangeReply> {
        self.requests.lock().unwrap().push(request.clone());
        if self.fail {
            return Err(GuideError::Http {
                status: 503,
                body: "mock outage".to_string(),
            });
        }
        Ok(self.next_reply())
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
