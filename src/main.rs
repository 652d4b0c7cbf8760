//! Telco Predictor - Main Entry Point
//!
//! Loads the model bundle once, then answers one JSON prediction request per
//! stdin line with one JSON response per stdout line.

use anyhow::Result;
use std::io;
use std::process::ExitCode;
use std::sync::Arc;
use telco_predictor::{
    config::{AppConfig, LoggingConfig},
    metrics::PipelineMetrics,
    models::ModelBundle,
    pipeline::PredictionPipeline,
    server,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_logging(logging: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("telco_predictor={}", logging.level)))?;

    // stdout carries responses, so logs go to stderr
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    if logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}

fn main() -> Result<ExitCode> {
    let config = AppConfig::load()?;
    init_logging(&config.logging)?;

    info!("Starting Telco Predictor");
    info!(models_dir = %config.models.models_dir, "Configuration loaded");

    let bundle = match ModelBundle::load(&config.models) {
        Ok(bundle) => Arc::new(bundle),
        Err(e) => {
            error!(error = %e, kind = e.kind(), "Failed to load model artifacts");
            eprintln!("Error loading the model: {}", e.user_message());
            return Ok(ExitCode::FAILURE);
        }
    };

    info!(
        model_info = %bundle.model_info(),
        "Model loaded successfully"
    );

    let pipeline = PredictionPipeline::new(bundle);
    let metrics = PipelineMetrics::new();

    let stdin = io::stdin();
    let stdout = io::stdout();
    server::serve(&pipeline, &metrics, stdin.lock(), stdout.lock())?;

    info!("Input closed, shutting down...");
    metrics.print_summary();

    Ok(ExitCode::SUCCESS)
}
