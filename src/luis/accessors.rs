//! Accessors that project fields out of a message's LUIS analysis.
//!
//! Each one looks up the context's cached analysis and only calls LUIS on a
//! miss, so any number of accessor calls cost at most one request per message.

use crate::context::RequestContext;
use crate::error::LuisError;
use crate::luis::analyzer::Analyzer;
use crate::luis::types::{Entity, IntentScore};

/// Name of the user's most likely intent.
pub async fn top_intent(analyzer: &Analyzer, ctx: &RequestContext) -> Result<String, LuisError> {
    let result = analyzer.analyze_cached(ctx).await?;
    result
        .top_scoring_intent
        .as_ref()
        .map(|i| i.intent.clone())
        .ok_or_else(|| LuisError::MissingCapability {
            field: "topScoringIntent".to_string(),
            hint: "Is the LUIS app trained and published with at least one intent?".to_string(),
        })
}

/// All intents LUIS scored, in response order.
pub async fn all_intents(
    analyzer: &Analyzer,
    ctx: &RequestContext,
) -> Result<Vec<IntentScore>, LuisError> {
    let result = analyzer.analyze_cached(ctx).await?;
    Ok(result.intents.clone())
}

/// Entities of type `builtin.keyPhrase`, in response order.
///
/// Key phrase extraction must be enabled in LUIS under Build > Entities. A
/// response with no `entities` field at all is an error; one with entities but
/// no key phrases yields an empty list.
pub async fn key_phrases(
    analyzer: &Analyzer,
    ctx: &RequestContext,
) -> Result<Vec<Entity>, LuisError> {
    let result = analyzer.analyze_cached(ctx).await?;
    result.key_phrases().ok_or_else(|| LuisError::MissingCapability {
        field: "entities".to_string(),
        hint: "Have you enabled Key Phrase entities in LUIS under Build > Entities?".to_string(),
    })
}
