//! LUIS.ai integration.
//!
//! - `Analyzer` turns a message into one prediction request
//! - accessors read intents and key phrases from the per-message cache
//! - `NluClient` is the transport seam; `HttpNluClient` talks to the real API

pub mod accessors;
pub mod analyzer;
pub mod client;
pub mod types;

pub use accessors::{all_intents, key_phrases, top_intent};
pub use analyzer::{Analyzer, build_request_uri};
pub use client::{HttpNluClient, NluClient};
pub use types::{AnalysisResult, Entity, IntentScore};
