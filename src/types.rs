//! Domain types: bookstore listings, chat messages, and grounding metadata.
//!
//! Grounding metadata mirrors what the Gemini `generateContent` response
//! attaches to a candidate. Each citation is modeled as a tagged variant per
//! kind ([`GroundingChunk::Web`] / [`GroundingChunk::Maps`]) rather than one
//! struct full of optional fields, so rendering code can match exhaustively.

use serde::{Deserialize, Deserializer, Serialize};

/// A curated bookstore listing. Statically defined, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookstore {
    /// Stable identifier (e.g. `"deep-vellum"`).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Street address.
    pub address: String,
    /// Short editorial description.
    pub description: String,
    /// Image reference (URL).
    pub image: String,
    /// Ordered tag strings (e.g. `"Poetry"`, `"Coffee"`).
    pub tags: Vec<String>,
    /// Optional rating on a 0–5 scale.
    pub rating: Option<f32>,
    /// Optional website URL.
    pub website: Option<String>,
}

/// The author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The human participant.
    User,
    /// The generative model.
    Model,
}

impl Role {
    /// The role string the Gemini API expects in a `contents` entry.
    pub fn as_wire_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Model => "model",
        }
    }
}

/// One message in a chat session.
///
/// Messages are immutable once appended; the session's list only ever grows.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    /// Unique within a session; monotonically increasing in arrival order.
    pub id: u64,
    /// Who authored the message.
    pub role: Role,
    /// Body text (markdown from the model side).
    pub text: String,
    /// Marks an in-flight placeholder bubble, never sent to the API.
    pub thinking: bool,
    /// Citations attached to a model reply, if the service grounded it.
    pub grounding: Option<GroundingMetadata>,
}

impl ChatMessage {
    /// Build a user-authored message.
    pub fn user(id: u64, text: impl Into<String>) -> Self {
        Self {
            id,
            role: Role::User,
            text: text.into(),
            thinking: false,
            grounding: None,
        }
    }

    /// Build a model-authored message.
    pub fn model(id: u64, text: impl Into<String>) -> Self {
        Self {
            id,
            role: Role::Model,
            text: text.into(),
            thinking: false,
            grounding: None,
        }
    }

    /// Attach grounding metadata (builder style).
    pub fn with_grounding(mut self, grounding: Option<GroundingMetadata>) -> Self {
        self.grounding = grounding;
        self
    }
}

/// A geographic position used to bias maps grounding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Grounding attribution attached to a model reply.
///
/// Deserializes directly from the camelCase `groundingMetadata` object on a
/// Gemini response candidate. Chunks that are neither web nor maps citations
/// are dropped during deserialization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroundingMetadata {
    /// Citations backing the reply, in the order the service returned them.
    pub grounding_chunks: Vec<GroundingChunk>,
    /// Search queries the service issued while grounding, if any.
    pub web_search_queries: Vec<String>,
}

/// A single citation, tagged by source kind.
#[derive(Debug, Clone, PartialEq)]
pub enum GroundingChunk {
    /// A web search citation.
    Web {
        uri: String,
        title: String,
    },
    /// A maps/places citation, optionally carrying review snippets.
    Maps {
        uri: String,
        title: String,
        /// Verbatim review excerpts for the place. Often empty.
        review_snippets: Vec<String>,
    },
}

impl GroundingChunk {
    /// The citation's target URI, whichever kind it is.
    pub fn uri(&self) -> &str {
        match self {
            GroundingChunk::Web { uri, .. } | GroundingChunk::Maps { uri, .. } => uri,
        }
    }

    /// The citation's display title, whichever kind it is.
    pub fn title(&self) -> &str {
        match self {
            GroundingChunk::Web { title, .. } | GroundingChunk::Maps { title, .. } => title,
        }
    }
}

// Wire shapes for the provider's groundingMetadata object. Kept private:
// the rest of the crate only sees the tagged variants above.

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireMetadata {
    #[serde(default)]
    grounding_chunks: Vec<WireChunk>,
    #[serde(default)]
    web_search_queries: Vec<String>,
}

#[derive(Deserialize)]
struct WireChunk {
    #[serde(default)]
    web: Option<WireWeb>,
    #[serde(default)]
    maps: Option<WireMaps>,
}

#[derive(Deserialize)]
struct WireWeb {
    #[serde(default)]
    uri: String,
    #[serde(default)]
    title: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireMaps {
    #[serde(default)]
    uri: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    place_answer_sources: Option<WirePlaceAnswerSources>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WirePlaceAnswerSources {
    #[serde(default)]
    review_snippets: Vec<WireReviewSnippet>,
}

#[derive(Deserialize)]
struct WireReviewSnippet {
    #[serde(default)]
    content: String,
}

impl WireChunk {
    fn into_chunk(self) -> Option<GroundingChunk> {
        // Maps wins if the provider ever sends both on one chunk.
        if let Some(maps) = self.maps {
            let review_snippets = maps
                .place_answer_sources
                .map(|s| {
                    s.review_snippets
                        .into_iter()
                        .map(|r| r.content)
                        .filter(|c| !c.is_empty())
                        .collect()
                })
                .unwrap_or_default();
            return Some(GroundingChunk::Maps {
                uri: maps.uri,
                title: maps.title,
                review_snippets,
            });
        }
        if let Some(web) = self.web {
            return Some(GroundingChunk::Web {
                uri: web.uri,
                title: web.title,
            });
        }
        None
    }
}

impl<'de> Deserialize<'de> for GroundingMetadata {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = WireMetadata::deserialize(deserializer)?;
        Ok(GroundingMetadata {
            grounding_chunks: wire
                .grounding_chunks
                .into_iter()
                .filter_map(WireChunk::into_chunk)
                .collect(),
            web_search_queries: wire.web_search_queries,
        })
    }
}
