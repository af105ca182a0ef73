//! LUIS middleware — intent and key-phrase analysis for inbound email.

pub mod config;
pub mod context;
pub mod error;
pub mod luis;
pub mod pipeline;
pub mod sanitize;
