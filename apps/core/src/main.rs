// Brandlens CLI entry point
// Reads an AnalysisRequest as JSON and prints the QueryReport.

use anyhow::{Context, Result};
use std::io::Read;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use brandlens_core::{AnalysisRequest, ProviderCoordinator, ProviderSettings, VisibilityEngine};

fn init_tracing() {
    let json = std::env::var("BRANDLENS_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    // stdout carries the report, so logs go to stderr
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(json.then(|| fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json).then(|| fmt::layer().with_writer(std::io::stderr)))
        .init();
}

fn read_request(path: Option<&str>) -> Result<AnalysisRequest> {
    let raw = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read request file {}", path))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read request from stdin")?;
            buf
        }
    };
    serde_json::from_str(&raw).context("Request is not a valid AnalysisRequest")
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    let settings = ProviderSettings::from_env()?;
    let coordinator = Arc::new(ProviderCoordinator::from_settings(&settings));

    let arg = std::env::args().nth(1);
    if arg.as_deref() == Some("--providers") {
        let providers = coordinator.available();
        println!("{}", serde_json::to_string_pretty(&providers)?);
        return Ok(());
    }

    let request = read_request(arg.as_deref())?;
    info!(brand = %request.brand_name, "Running visibility query");

    let engine = VisibilityEngine::new(coordinator);
    let report = engine.run(request).await?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
