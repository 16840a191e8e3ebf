use std::sync::Arc;

use quiz_core::model::RoleKey;
use server::{AppState, ServerConfig, router};
use services::{GeminiGenerator, QuestionProvider};
use storage::{FallbackTable, RoleAvailability};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  quiz-server [--port <port>] [--fallback-dir <dir>] [--public-dir <dir>]");
    eprintln!("              [--ai-timeout-secs <secs>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --port 4000 --fallback-dir fallback_questions --public-dir public");
    eprintln!("  --ai-timeout-secs 30");
    eprintln!();
    eprintln!("Environment (a .env file is read if present):");
    eprintln!("  PORT, QUIZ_FALLBACK_DIR, QUIZ_PUBLIC_DIR, QUIZ_AI_TIMEOUT_SECS");
    eprintln!("  GEMINI_API_KEY, QUIZ_AI_MODEL, QUIZ_AI_BASE_URL, RUST_LOG");
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    init_tracing();

    let Some(config) = ServerConfig::load().inspect_err(|_| print_usage())? else {
        print_usage();
        return Ok(());
    };

    // Loaded once; handlers only ever read it.
    let table = FallbackTable::load_dir(&config.fallback_dir, RoleKey::known());
    for (role, state) in table.availability() {
        if let RoleAvailability::Unavailable { reason } = state {
            warn!(role = %role, reason = %reason, "fallback questions unavailable");
        }
    }
    info!(
        available = table.available_count(),
        dir = %config.fallback_dir.display(),
        "fallback table ready"
    );

    let generator = GeminiGenerator::from_env();
    match generator.model() {
        Some(model) => info!(model, "question generator enabled"),
        None => warn!("GEMINI_API_KEY not set, AI requests will use fallback questions"),
    }

    let provider = QuestionProvider::new(Arc::new(generator), Arc::new(table))
        .with_timeout(config.ai_timeout);
    let app = router(AppState::new(provider), &config.public_dir);

    let listener = TcpListener::bind(config.addr()).await?;
    info!(addr = %config.addr(), "server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
