//! Plain-text shaping of messages and citations for a transcript.
//!
//! The GUI owns actual presentation; this module gives it (and the demos) a
//! canonical text form for each citation, including the rule that a review
//! snippet, when present, is surfaced verbatim — and that nothing is invented
//! when it is absent.

use crate::types::{ChatMessage, GroundingChunk};

/// One display line for a citation.
///
/// Maps citations show the place title and, when the service attached one,
/// the first review snippet quoted verbatim. Web citations show title and
/// uri. No placeholder text is injected for missing fields.
pub fn citation_line(chunk: &GroundingChunk) -> String {
    match chunk {
        GroundingChunk::Maps {
            uri,
            title,
            review_snippets,
        } => match review_snippets.first() {
            Some(snippet) => format!("[map] {} — \"{}\" <{}>", title, snippet, uri),
            None => format!("[map] {} <{}>", title, uri),
        },
        GroundingChunk::Web { uri, title } => format!("[web] {} <{}>", title, uri),
    }
}

/// The lines a transcript shows for one message: its text, then each
/// citation under a references separator. Ungrounded messages are one line.
pub fn message_lines(message: &ChatMessage) -> Vec<String> {
    let mut lines = vec![message.text.clone()];
    if let Some(grounding) = &message.grounding {
        if !grounding.grounding_chunks.is_empty() {
            lines.push("References:".to_string());
            lines.extend(grounding.grounding_chunks.iter().map(citation_line));
        }
    }
    lines
}
