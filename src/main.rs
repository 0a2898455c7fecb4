use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use notetaker_core::{AppContext, CoreConfig};

/// Main entry point for the notetaker application
///
/// Builds the application context, then serves the web form and its endpoints on port 3000
/// (configurable via NOTETAKER_ADDR).
///
/// The sentiment model is loaded before the async runtime starts: the remote backend uses a
/// blocking HTTP client, which must not be created or dropped on an executor thread. A model
/// that still fails to load after one retry aborts startup.
///
/// # Environment Variables
/// - `NOTETAKER_ADDR`: server address (default: "0.0.0.0:3000")
/// - `NOTETAKER_SENTIMENT_BACKEND`: "lexicon", "remote" or "onnx" (default: "onnx" when built
///   with the `onnx` feature, otherwise "lexicon")
/// - `NOTETAKER_SENTIMENT_URL`: remote classifier endpoint
/// - `NOTETAKER_SENTIMENT_TOKEN`: optional bearer token for the remote classifier
/// - `NOTETAKER_SENTIMENT_TIMEOUT_SECS`: remote request timeout (default: 30)
/// - `NOTETAKER_SENTIMENT_MODEL_DIR`: directory of the ONNX model and tokenizer
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration, model loading, binding or serving fails
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("notetaker_run=info".parse()?)
                .add_directive("notetaker_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("NOTETAKER_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let cfg = CoreConfig::from_env()?;
    let ctx = Arc::new(AppContext::initialise(cfg)?);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(serve(addr, ctx.clone()))?;

    // Drop the runtime before the context so any blocking client is released off the executor.
    drop(runtime);
    drop(ctx);

    Ok(())
}

async fn serve(addr: String, ctx: Arc<AppContext>) -> anyhow::Result<()> {
    tracing::info!("++ Starting notetaker web form on {}", addr);

    let app = api_rest::router(ctx);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
