mod analysis;
mod auth;
mod config;
mod cv;
mod db;
mod errors;
mod jobs;
mod llm_client;
mod models;
mod parser;
mod routes;
mod state;
#[cfg(test)]
mod testing;

use anyhow::{Context, Result};
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::AnalysisInvoker;
use crate::auth::RemoteIdentityVerifier;
use crate::config::Config;
use crate::cv::{PgCvStore, RedisLinkStore, S3BlobStorage};
use crate::db::{create_pool, run_migrations};
use crate::jobs::{JobRunner, Orchestrator, PgJobStore, TokioScheduler};
use crate::llm_client::LlmClient;
use crate::parser::{DocumentParser, TesseractCli};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CV gap analysis API v{}", env!("CARGO_PKG_VERSION"));

    // PostgreSQL
    let db = create_pool(&config.database_url).await?;
    run_migrations(&db).await?;

    // Redis (download short links)
    let redis = redis::Client::open(config.redis_url.clone()).context("Invalid REDIS_URL")?;
    info!("Redis client initialized");

    // S3 / MinIO
    let s3 = build_s3_client(&config).await;
    info!("S3 client initialized (bucket: {})", config.s3_bucket);

    // LLM
    let llm = LlmClient::new(config.anthropic_api_key.clone())
        .context("Failed to build LLM HTTP client")?;
    let analyzer = Arc::new(
        AnalysisInvoker::new(llm).context("Failed to serialize the analysis schema")?,
    );
    info!("Analysis invoker initialized (model: {})", llm_client::MODEL);

    // Document parsing
    let recognizer = TesseractCli::new(&config.ocr_languages, config.ocr_dpi)
        .with_binaries(config.pdftoppm_bin.clone(), config.tesseract_bin.clone());
    info!(
        "OCR fallback: languages={} dpi={}",
        recognizer.languages(),
        config.ocr_dpi
    );
    let parser = DocumentParser::new(Arc::new(recognizer));

    // Stores and job pipeline
    let jobs = Arc::new(PgJobStore::new(db.clone()));
    let cvs = Arc::new(PgCvStore::new(db));
    let runner = Arc::new(JobRunner::new(jobs.clone(), cvs.clone(), analyzer));
    let scheduler = Arc::new(TokioScheduler::new(runner));
    let orchestrator = Arc::new(Orchestrator::new(jobs, scheduler));

    let identity = Arc::new(
        RemoteIdentityVerifier::new(&config.auth_url, config.auth_api_key.clone())
            .context("Failed to build identity HTTP client")?,
    );

    let state = AppState {
        identity,
        orchestrator,
        cvs,
        blobs: Arc::new(S3BlobStorage::new(s3, config.s3_bucket.clone())),
        links: Arc::new(RedisLinkStore::new(redis)),
        parser,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "cvgap-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    // MinIO needs path-style addressing
    let s3_config = aws_sdk_s3::config::Builder::from(&s3_config)
        .force_path_style(true)
        .build();

    aws_sdk_s3::Client::from_conf(s3_config)
}
