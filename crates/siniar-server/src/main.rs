//! Siniar server binary.
//!
//! Starts an axum HTTP server with structured logging and graceful shutdown
//! on SIGTERM/SIGINT.

use siniar_dialogue::GeminiClient;
use siniar_document::PdfExtractor;
use siniar_server::config::{self, Config};
use siniar_server::pipeline::PodcastPipeline;
use siniar_server::{app, AppState};
use siniar_voice::ElevenLabsTts;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

fn resolve_config_path() -> (Option<String>, &'static str) {
    if let Some(path) = std::env::args()
        .nth(1)
        .filter(|value| !value.trim().is_empty())
    {
        return (Some(path), "cli-arg");
    }

    if let Ok(path) = std::env::var("SINIAR_CONFIG_PATH") {
        if !path.trim().is_empty() {
            return (Some(path), "env-var");
        }
    }

    (None, "default")
}

fn create_storage_dirs(config: &Config) -> std::io::Result<()> {
    for dir in [
        &config.storage.temp_dir,
        &config.storage.audio_dir,
        &config.storage.output_dir,
    ] {
        std::fs::create_dir_all(dir)?;
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let dotenv = dotenvy::dotenv();

    let (resolved_config_path, config_source) = resolve_config_path();
    let selected_config_path = resolved_config_path.as_deref().or(Some("config.toml"));

    let config = config::load_config(selected_config_path)
        .expect("failed to load configuration; the server cannot start without valid config");

    let filter =
        EnvFilter::try_new(&config.logging.level).unwrap_or_else(|_| EnvFilter::new("info"));

    if config.logging.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    if let Ok(path) = dotenv {
        tracing::info!(path = %path.display(), "loaded environment file");
    }
    tracing::info!(
        source = config_source,
        path = selected_config_path.unwrap_or("<none>"),
        "resolved startup configuration path"
    );

    if config.elevenlabs.voice_one_id.is_empty() || config.elevenlabs.voice_two_id.is_empty() {
        tracing::warn!("VOICE_ONE_ID or VOICE_TWO_ID is not set; synthesis requests will fail");
    }

    create_storage_dirs(&config).expect("failed to create storage directories");

    let model = GeminiClient::new(config.gemini.clone())
        .expect("failed to create language model client; is GENAI_API_KEY set?");
    let tts = ElevenLabsTts::new(config.elevenlabs.clone())
        .expect("failed to create speech client; is ELEVENLABS_API_KEY set?");

    let pipeline = PodcastPipeline::from_config(
        &config,
        Arc::new(PdfExtractor::new()),
        Arc::new(model),
        Arc::new(tts),
    );

    let state = AppState {
        pipeline: Arc::new(pipeline),
        max_upload_bytes: config.server.max_upload_bytes,
    };

    let addr = SocketAddr::new(config.server.host, config.server.port);
    tracing::info!(%addr, "starting siniar server");

    let listener = TcpListener::bind(addr)
        .await
        .expect("failed to bind to address; is another process using this port?");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    tracing::info!("siniar server shut down");
}

/// Waits for a SIGINT (Ctrl+C) or SIGTERM signal for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => { tracing::info!("received SIGINT, initiating graceful shutdown"); }
        () = terminate => { tracing::info!("received SIGTERM, initiating graceful shutdown"); }
    }
}
