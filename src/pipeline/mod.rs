//! Per-message middleware pipeline.
//!
//! Each inbound message gets a [`RequestContext`]; stages run in order, each
//! attaching results to the context and handing control on via [`Next`].
//! A failing stage records the failure on the context and the run continues.

pub mod luis_middleware;
pub mod types;

use std::sync::Arc;

use tracing::{debug, info};

use crate::context::RequestContext;

pub use luis_middleware::LuisMiddleware;
pub use types::{Completed, Middleware, Next};

/// Ordered list of middleware stages.
#[derive(Default)]
pub struct Pipeline {
    stages: Vec<Arc<dyn Middleware>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stage.
    pub fn stage(mut self, stage: impl Middleware + 'static) -> Self {
        self.stages.push(Arc::new(stage));
        self
    }

    /// Run every stage against `ctx`, in order.
    pub async fn run(&self, ctx: &mut RequestContext) {
        for stage in &self.stages {
            debug!(id = %ctx.id, stage = stage.name(), "Running pipeline stage");
            let _completed: Completed = stage.handle(ctx, Next::new()).await;
        }
        info!(id = %ctx.id, stages = self.stages.len(), "Pipeline complete");
    }
}
