//! Request context — the per-message state a pipeline run works on.

use mail_parser::MessageParser;
use serde_json::{Map, Value};
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::luis::types::AnalysisResult;

/// Context for one inbound message.
///
/// Carries the raw (possibly HTML) subject and body, the user's stored
/// settings, the result bag later pipeline stages read, and the memoized
/// LUIS analysis for this message.
#[derive(Debug, Default)]
pub struct RequestContext {
    /// Unique ID for log correlation.
    pub id: Uuid,
    /// Subject line, markup allowed.
    pub subject: String,
    /// Message body, markup allowed.
    pub body: String,
    /// Per-user persisted settings.
    stored_data: Value,
    /// Results attached by pipeline stages, keyed by skill name.
    skills: Map<String, Value>,
    analysis: OnceCell<AnalysisResult>,
}

impl RequestContext {
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            subject: subject.into(),
            body: body.into(),
            ..Default::default()
        }
    }

    /// Build a context from a raw RFC 5322 message.
    ///
    /// The body is the first text part; mail-parser renders an HTML-only
    /// message to text. Returns `None` if the bytes don't parse as a message.
    pub fn from_raw_email(raw: &[u8]) -> Option<Self> {
        let parsed = MessageParser::default().parse(raw)?;
        let subject = parsed.subject().unwrap_or_default().to_string();
        let body = parsed
            .body_text(0)
            .map(|b| b.into_owned())
            .unwrap_or_default();
        Some(Self::new(subject, body))
    }

    /// Attach the user's stored settings.
    pub fn with_stored_data(mut self, stored_data: Value) -> Self {
        self.stored_data = stored_data;
        self
    }

    /// Look up a stored setting by dotted path, e.g.
    /// `natural_language_middleware.luis_endpoint`.
    pub fn stored(&self, path: &str) -> Option<&Value> {
        path.split('.')
            .try_fold(&self.stored_data, |node, key| node.get(key))
    }

    /// Results attached so far.
    pub fn skills(&self) -> &Map<String, Value> {
        &self.skills
    }

    pub fn skill(&self, name: &str) -> Option<&Value> {
        self.skills.get(name)
    }

    /// Attach (or replace) a skill result.
    pub fn attach_skill(&mut self, name: impl Into<String>, value: Value) {
        self.skills.insert(name.into(), value);
    }

    /// Cached analysis for this message, if one has completed.
    pub fn analysis(&self) -> Option<&AnalysisResult> {
        self.analysis.get()
    }

    pub(crate) fn analysis_cell(&self) -> &OnceCell<AnalysisResult> {
        &self.analysis
    }
}
