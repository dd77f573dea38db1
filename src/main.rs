use std::sync::Arc;

use oinori_bot::bot::Bot;
use oinori_bot::config::Config;
use oinori_bot::detect::RejectionDetector;
use oinori_bot::line::LineClient;
use oinori_bot::ocr::{OcrEngine, TesseractOcr};
use oinori_bot::server::{self, AppState};
use oinori_bot::store::{CounterStore, LibSqlBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = Config::from_env().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        eprintln!("  export LINE_CHANNEL_SECRET=...");
        eprintln!("  export LINE_CHANNEL_ACCESS_TOKEN=...");
        std::process::exit(1);
    });

    eprintln!("📩 Oinori Bot v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Webhook: http://0.0.0.0:{}/callback", config.port);
    eprintln!("   OCR lang: {}", config.ocr_lang);

    // ── Database ─────────────────────────────────────────────────────
    let db_path = std::path::Path::new(&config.db_path);
    let store: Arc<dyn CounterStore> = Arc::new(
        LibSqlBackend::new_local(db_path).await.unwrap_or_else(|e| {
            eprintln!("Error: Failed to open database at {}: {}", config.db_path, e);
            std::process::exit(1);
        }),
    );
    eprintln!("   Database: {}", config.db_path);

    // ── Bot wiring ───────────────────────────────────────────────────
    let line = Arc::new(LineClient::new(config.channel_access_token.clone()));
    let ocr: Arc<dyn OcrEngine> =
        Arc::new(TesseractOcr::new(config.ocr_lang.clone()).with_timeout(config.ocr_timeout));
    let detector = match config.keywords.clone() {
        Some(keywords) => {
            eprintln!("   Keywords: {} custom", keywords.len());
            RejectionDetector::with_keywords(keywords)
        }
        None => RejectionDetector::new(),
    };

    let bot = Arc::new(Bot::new(line, ocr, store, detector));

    // ── Server ───────────────────────────────────────────────────────
    let app = server::app(AppState {
        bot,
        channel_secret: config.channel_secret.clone(),
    });

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    tracing::info!(port = config.port, "Webhook server started");
    axum::serve(listener, app).await?;

    Ok(())
}
