//! Analyzer — sends a message's subject and body to LUIS.
//!
//! Flow:
//! 1. Resolve the endpoint (user's stored setting, else the config store)
//! 2. Strip markup from subject and body
//! 3. `endpoint + enc(subject) + "%20" + enc(body)` → one GET
//!
//! LUIS expects the query text as the tail of the URL, so the endpoint is
//! used as a literal prefix rather than parsed.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ConfigStore;
use crate::context::RequestContext;
use crate::error::AnalyzeError;
use crate::luis::client::NluClient;
use crate::luis::types::AnalysisResult;
use crate::sanitize::strip_tags;

/// Settings namespace the user's LUIS preferences are stored under.
pub const SETTINGS_NAMESPACE: &str = "natural_language_middleware";

/// Key of the per-user endpoint override inside [`SETTINGS_NAMESPACE`].
pub const ENDPOINT_SETTING: &str = "luis_endpoint";

/// Build the prediction URI for a subject/body pair.
///
/// Markup is stripped before encoding. The separator is a literal `%20`.
pub fn build_request_uri(endpoint: &str, subject: &str, body: &str) -> String {
    let subject = strip_tags(subject);
    let body = strip_tags(body);
    format!(
        "{endpoint}{}%20{}",
        urlencoding::encode(&subject),
        urlencoding::encode(&body)
    )
}

/// Runs LUIS analyses against a configured endpoint.
pub struct Analyzer {
    config: Arc<ConfigStore>,
    client: Arc<dyn NluClient>,
}

impl Analyzer {
    pub fn new(config: Arc<ConfigStore>, client: Arc<dyn NluClient>) -> Self {
        Self { config, client }
    }

    pub fn config(&self) -> &ConfigStore {
        &self.config
    }

    /// Endpoint for this message: the user's stored override when present and
    /// non-empty, otherwise the store's.
    fn resolve_endpoint(&self, ctx: &RequestContext) -> String {
        ctx.stored(&format!("{SETTINGS_NAMESPACE}.{ENDPOINT_SETTING}"))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| self.config.endpoint())
    }

    /// Analyze the message. Always issues a request; see
    /// [`analyze_cached`](Self::analyze_cached) for the memoized form.
    pub async fn analyze(&self, ctx: &RequestContext) -> Result<AnalysisResult, AnalyzeError> {
        let endpoint = self.resolve_endpoint(ctx);
        if endpoint.is_empty() {
            warn!(id = %ctx.id, "LUIS analysis skipped: no endpoint configured");
            return Err(AnalyzeError::NotConfigured);
        }

        let uri = build_request_uri(&endpoint, &ctx.subject, &ctx.body);
        debug!(id = %ctx.id, "Sending message to LUIS");

        self.client.fetch(&uri).await.inspect_err(|e| {
            warn!(id = %ctx.id, error = %e, "LUIS API call failed");
        })
    }

    /// Analyze the message once per context.
    ///
    /// Returns the cached result if this context has already been analyzed.
    /// Concurrent callers share a single in-flight request; a failed attempt
    /// leaves the cache empty so the next call tries again.
    pub async fn analyze_cached<'a>(
        &self,
        ctx: &'a RequestContext,
    ) -> Result<&'a AnalysisResult, AnalyzeError> {
        if let Some(cached) = ctx.analysis() {
            debug!(id = %ctx.id, "LUIS cache hit");
            return Ok(cached);
        }
        ctx.analysis_cell()
            .get_or_try_init(|| self.analyze(ctx))
            .await
    }
}
