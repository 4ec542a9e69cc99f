use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use warp::Filter;

mod api;
mod config;
mod error;
mod middleware;
mod models;
mod pipeline;
mod query;
mod stages;

use crate::pipeline::DigestPipeline;
use crate::stages::{RecordFetcher, RecordLocator, Summarizer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .json()
        .init();

    info!("Starting PhysioDigest literature digest service");

    // Load configuration
    let config = config::Config::from_env()?;
    info!("Configuration loaded");

    // One shared HTTP client; per-request timeouts live here, not in
    // the pipeline stages.
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.http_timeout_secs))
        .build()?;

    let pipeline = Arc::new(DigestPipeline::new(
        RecordLocator::new(http.clone(), config.eutils_base_url.clone()),
        RecordFetcher::new(http.clone(), config.eutils_base_url),
        Summarizer::new(
            http,
            config.openai_base_url,
            config.openai_api_key,
            config.openai_model,
        ),
    ));

    // Build API routes
    let api_routes = api::routes(pipeline)
        .with(warp::log("api"))
        .with(middleware::cors());

    // Health check route
    let health = warp::path("health")
        .and(warp::get())
        .map(|| warp::reply::json(&serde_json::json!({"status": "healthy"})));

    // Metrics route
    let metrics = warp::path("metrics").and(warp::get()).map(|| {
        use prometheus::{Encoder, TextEncoder};
        let encoder = TextEncoder::new();
        let metric_families = prometheus::gather();
        let mut buffer = vec![];
        encoder.encode(&metric_families, &mut buffer).unwrap();
        warp::reply::with_header(buffer, "Content-Type", encoder.format_type())
    });

    let routes = health
        .or(metrics)
        .or(api_routes)
        .recover(error::handle_rejection);

    // Start server
    let addr = ([0, 0, 0, 0], config.port);
    info!("Server listening on {}", addr.1);

    warp::serve(routes).run(addr).await;

    Ok(())
}
