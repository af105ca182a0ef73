use std::sync::Arc;

use luis_middleware::config::{ConfigStore, LuisConfig};
use luis_middleware::context::RequestContext;
use luis_middleware::luis::{Analyzer, HttpNluClient};
use luis_middleware::pipeline::{LuisMiddleware, Pipeline};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut ctx = match args.as_slice() {
        [flag, path] if flag == "--eml" => {
            let raw = tokio::fs::read(path).await?;
            RequestContext::from_raw_email(&raw)
                .ok_or_else(|| anyhow::anyhow!("{path}: not a parseable email"))?
        }
        [subject, body @ ..] if !subject.starts_with("--") => {
            RequestContext::new(subject.as_str(), body.join(" "))
        }
        _ => {
            eprintln!("Usage: luis-middleware <subject> [body...]");
            eprintln!("       luis-middleware --eml <message.eml>");
            eprintln!("  export LUIS_ENDPOINT='https://<region>.api.cognitive.microsoft.com/luis/v2.0/apps/<app>?subscription-key=<key>&q='");
            std::process::exit(2);
        }
    };

    let config = LuisConfig::require_env()?;
    let store = ConfigStore::global();
    store.configure(config);

    let analyzer = Arc::new(Analyzer::new(store, Arc::new(HttpNluClient::new())));
    let pipeline = Pipeline::new().stage(LuisMiddleware::new(analyzer));

    pipeline.run(&mut ctx).await;

    println!("{}", serde_json::to_string_pretty(ctx.skills())?);
    Ok(())
}
