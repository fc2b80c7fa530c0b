//! Boundary with the conversational assistant.
//!
//! The assistant is a black box that answers with a display message plus
//! zero or more actions from the closed vocabulary. Replies arrive as text
//! that is supposed to be JSON but often is not quite: models wrap output in
//! Markdown fences or ignore the shape entirely. Parsing is therefore
//! lenient — anything that cannot be interpreted becomes a plain message
//! with no actions, never an application error.

use serde::Deserialize;
use tracing::warn;

use crate::core::actions::Action;

/// An interpreted assistant reply.
#[derive(Debug, Clone, PartialEq)]
pub struct AssistantReply {
    pub message: String,
    pub actions: Vec<Action>,
}

#[derive(Debug, Deserialize)]
struct RawReply {
    message: String,
    #[serde(default)]
    actions: Vec<serde_json::Value>,
}

/// Interprets a raw assistant reply.
///
/// Markdown code fences are stripped before parsing. Each action is
/// validated individually; one malformed action is dropped without taking
/// the rest of the reply with it. Unknown action tags come through as
/// [`Action::Unknown`] and are ignored downstream.
pub fn parse_reply(raw: &str) -> AssistantReply {
    let cleaned = raw.replace("```json", "").replace("```", "");
    match serde_json::from_str::<RawReply>(cleaned.trim()) {
        Ok(reply) => {
            let actions = reply
                .actions
                .into_iter()
                .filter_map(|value| match serde_json::from_value::<Action>(value) {
                    Ok(action) => Some(action),
                    Err(err) => {
                        warn!(%err, "dropping malformed assistant action");
                        None
                    }
                })
                .collect();
            AssistantReply {
                message: reply.message,
                actions,
            }
        }
        Err(_) => AssistantReply {
            message: raw.to_string(),
            actions: Vec::new(),
        },
    }
}
