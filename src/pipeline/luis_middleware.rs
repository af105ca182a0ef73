//! LUIS middleware — runs every message through LUIS and attaches the
//! results to the context under `skills["luis"]`.
//!
//! On failure the same key gets `{"status": "error", "message": ...}` and the
//! pipeline continues; this is the only place analysis errors are swallowed.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{error, info};

use crate::config::LuisConfig;
use crate::context::RequestContext;
use crate::error::{LuisError, PipelineError};
use crate::luis::analyzer::Analyzer;
use crate::pipeline::types::{Completed, Middleware, Next};

/// Key the analysis is attached under.
pub const SKILL_NAME: &str = "luis";

pub struct LuisMiddleware {
    analyzer: Arc<Analyzer>,
    config: Option<LuisConfig>,
}

impl LuisMiddleware {
    pub fn new(analyzer: Arc<Analyzer>) -> Self {
        Self {
            analyzer,
            config: None,
        }
    }

    /// Apply `config` to the analyzer's store on every invocation.
    pub fn with_config(mut self, config: LuisConfig) -> Self {
        self.config = Some(config);
        self
    }

    async fn analyze(&self, ctx: &RequestContext) -> Result<Value, PipelineError> {
        let result = self
            .analyzer
            .analyze_cached(ctx)
            .await
            .map_err(LuisError::from)?;
        Ok(serde_json::to_value(result)?)
    }
}

/// Descriptor attached in place of a result when analysis fails.
pub fn error_descriptor(message: impl Into<String>) -> Value {
    serde_json::json!({
        "status": "error",
        "message": message.into(),
    })
}

#[async_trait]
impl Middleware for LuisMiddleware {
    fn name(&self) -> &str {
        SKILL_NAME
    }

    async fn handle(&self, ctx: &mut RequestContext, next: Next) -> Completed {
        if let Some(config) = &self.config {
            self.analyzer.config().configure(config.clone());
        }

        let value = match self.analyze(ctx).await {
            Ok(value) => {
                info!(id = %ctx.id, "Attached LUIS analysis");
                value
            }
            Err(e) => {
                error!(id = %ctx.id, error = %e, "LUIS middleware failed, continuing");
                error_descriptor(e.to_string())
            }
        };
        ctx.attach_skill(SKILL_NAME, value);

        next.proceed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalyzeError;
    use crate::luis::analyzer::tests::{StubClient, analyzer_with, shopping_response};

    #[tokio::test]
    async fn attaches_analysis_on_success() {
        let client = StubClient::ok(shopping_response());
        let mw = LuisMiddleware::new(Arc::new(analyzer_with("https://example.com/?q=", client)));
        let mut ctx = RequestContext::new("<b>Buy</b> shoes", "now");

        let _done = mw.handle(&mut ctx, Next::new()).await;

        let luis = ctx.skill(SKILL_NAME).unwrap();
        assert_eq!(luis["topScoringIntent"]["intent"], "Shopping.FindItem");
        assert_eq!(luis["query"], "Buy shoes now");
        assert!(ctx.analysis().is_some());
    }

    #[tokio::test]
    async fn attaches_error_descriptor_on_failure() {
        let client = StubClient::failing(AnalyzeError::Transport("connection refused".into()));
        let mw = LuisMiddleware::new(Arc::new(analyzer_with("https://example.com/?q=", client)));
        let mut ctx = RequestContext::new("hi", "there");

        let _done = mw.handle(&mut ctx, Next::new()).await;

        let luis = ctx.skill(SKILL_NAME).unwrap();
        assert_eq!(luis["status"], "error");
        assert_eq!(
            luis["message"],
            "LUIS request failed: connection refused"
        );
        assert_eq!(luis.as_object().map(|o| o.len()), Some(2));
    }

    #[tokio::test]
    async fn config_override_is_applied_each_call() {
        let client = StubClient::ok(shopping_response());
        let analyzer = Arc::new(analyzer_with("", client.clone()));
        let mw = LuisMiddleware::new(Arc::clone(&analyzer))
            .with_config(LuisConfig::new("https://override.example.com/?q="));

        let mut ctx = RequestContext::new("a", "b");
        let _done = mw.handle(&mut ctx, Next::new()).await;

        assert_eq!(
            client.uris.lock().unwrap().as_slice(),
            ["https://override.example.com/?q=a%20b"]
        );
        assert_eq!(analyzer.config().endpoint(), "https://override.example.com/?q=");
    }

    #[tokio::test]
    async fn unconfigured_endpoint_is_reported_not_raised() {
        let client = StubClient::ok(shopping_response());
        let mw = LuisMiddleware::new(Arc::new(analyzer_with("", client.clone())));
        let mut ctx = RequestContext::new("a", "b");

        let _done = mw.handle(&mut ctx, Next::new()).await;

        assert_eq!(ctx.skill(SKILL_NAME).unwrap()["status"], "error");
        assert_eq!(client.calls(), 0);
    }

    #[test]
    fn error_descriptor_shape() {
        assert_eq!(
            error_descriptor("boom"),
            serde_json::json!({ "status": "error", "message": "boom" })
        );
    }
}
