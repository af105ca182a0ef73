//! Shared types for the middleware pipeline.

use async_trait::async_trait;

use crate::context::RequestContext;

// ── Continuation ────────────────────────────────────────────────────

/// Handed to each stage; consuming it is the only way to produce the
/// [`Completed`] a stage must return, so a stage signals completion exactly
/// once.
#[derive(Debug)]
#[must_use = "a stage must call `proceed` to let the pipeline continue"]
pub struct Next {
    _private: (),
}

impl Next {
    pub(crate) fn new() -> Self {
        Self { _private: () }
    }

    /// Signal that this stage is done.
    pub fn proceed(self) -> Completed {
        Completed { _private: () }
    }
}

/// Proof that a stage called [`Next::proceed`].
#[derive(Debug)]
pub struct Completed {
    _private: (),
}

// ── Middleware trait ────────────────────────────────────────────────

/// One stage of the per-message pipeline.
///
/// Stages read and write the [`RequestContext`]; failures are recorded on
/// the context rather than returned, so one stage can't stall the rest.
#[async_trait]
pub trait Middleware: Send + Sync {
    /// Stage name for logging.
    fn name(&self) -> &str;

    async fn handle(&self, ctx: &mut RequestContext, next: Next) -> Completed;
}
