use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use lingo_voice::controllers::tts::TtsController;
use lingo_voice::domain::tts::TtsService;
use lingo_voice::infrastructure::config::{Config, LogFormat};
use lingo_voice::infrastructure::http::{build_router, start_http_server};
use lingo_voice::infrastructure::janitor::TempFileJanitor;
use lingo_voice::infrastructure::repositories::{AudioCacheRepository, TranslateTtsProvider};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting lingo-voice on {}:{} ({:?})",
        config.host,
        config.port,
        config.environment
    );

    if config.is_development() {
        tracing::debug!(?config, "Loaded configuration");
    }

    // Open the on-disk audio cache
    let cache_repo = Arc::new(
        AudioCacheRepository::open(config.tts_cache_dir.clone(), config.tts_scratch_dir.clone())
            .await?,
    );
    tracing::info!(
        cache_dir = %cache_repo.cache_dir().display(),
        scratch_dir = %cache_repo.scratch_dir().display(),
        "Audio cache ready"
    );

    // Synthesis provider
    let provider = Arc::new(TranslateTtsProvider::new(
        config.tts_provider_url.clone(),
        config.provider_timeout(),
    )?);
    tracing::info!(endpoint = %config.tts_provider_url, "Synthesis provider initialized");

    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    let tts_service = Arc::new(TtsService::new(
        cache_repo.clone(),
        provider,
        config.tts_default_language.clone(),
        config.provider_timeout(),
        config.tts_memory_cache_entries,
    ));
    let tts_controller = Arc::new(TtsController::new(tts_service));

    // Background sweep of delivered temp files
    let janitor = TempFileJanitor::new(cache_repo.scratch_dir().to_path_buf(), config.temp_file_max_age());
    let janitor_handle = janitor.spawn(config.temp_cleanup_interval());

    let app = build_router(cache_repo, tts_controller);
    let result = start_http_server(config, app).await;

    janitor_handle.abort();
    result
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "lingo_voice=debug,tower_http=debug".into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
