//! LUIS response model.
//!
//! Only the fields the accessors read are typed; the rest of the payload is
//! carried through `extra` so the middleware can hand downstream stages the
//! full response.

use serde::{Deserialize, Serialize};

/// Entity type LUIS assigns to prebuilt key-phrase extractions.
pub const KEY_PHRASE_ENTITY: &str = "builtin.keyPhrase";

/// Deserialized body of a LUIS v2 prediction response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_scoring_intent: Option<IntentScore>,
    #[serde(default)]
    pub intents: Vec<IntentScore>,
    /// `None` when the app has no entity extraction enabled, which is not the
    /// same as an empty list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entities: Option<Vec<Entity>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl AnalysisResult {
    /// Entities tagged `builtin.keyPhrase`, in response order.
    /// `None` if the response carried no `entities` field at all.
    pub fn key_phrases(&self) -> Option<Vec<Entity>> {
        self.entities.as_ref().map(|entities| {
            entities
                .iter()
                .filter(|e| e.is_key_phrase())
                .cloned()
                .collect()
        })
    }
}

/// An intent with its confidence score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentScore {
    pub intent: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

/// A tagged span of the query text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    #[serde(rename = "type")]
    pub entity_type: String,
    /// `entity`, `startIndex`, `endIndex`, `score`, resolution data, ...
    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl Entity {
    pub fn is_key_phrase(&self) -> bool {
        self.entity_type == KEY_PHRASE_ENTITY
    }

    /// Matched text, when the provider included it.
    pub fn text(&self) -> Option<&str> {
        self.fields.get("entity").and_then(|v| v.as_str())
    }
}
