//! TriageFlow server entry point.

use std::error::Error;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use triage_flow::adapters::{
    voice_router, InfermedicaConfig, InfermedicaExtractor, TwimlRenderer, VoiceAppState,
};
use triage_flow::application::DialogueController;
use triage_flow::config::{AppConfig, LogFormat, ServerConfig};
use triage_flow::domain::triage::ResponseComposer;
use triage_flow::ports::SymptomExtractor;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    let extractor = InfermedicaExtractor::new(InfermedicaConfig::from_settings(&config.extraction))?;
    report_integrations(&config, &extractor);

    let controller = DialogueController::new(Arc::new(extractor), ResponseComposer::default());
    let renderer = TwimlRenderer::new(
        config.voice.profile(),
        config.telephony.language.clone(),
        config.telephony.speech_timeout.clone(),
    );
    let app = voice_router(
        VoiceAppState::new(controller, renderer),
        config.server.request_timeout(),
    );

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "TriageFlow listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("TriageFlow stopped");
    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    match server.log_format {
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_target(true))
            .init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_target(false).json())
            .init(),
    }
}

/// Logs which external integrations have credentials, never their values.
fn report_integrations(config: &AppConfig, extractor: &InfermedicaExtractor) {
    let info = extractor.extractor_info();
    if info.configured {
        tracing::info!(
            extractor = %info.name,
            endpoint = info.endpoint.as_deref().unwrap_or("-"),
            "Symptom classifier configured"
        );
    } else {
        tracing::warn!(
            extractor = %info.name,
            "Symptom classifier credentials missing; callers will hear a connection apology"
        );
    }

    if config.telephony.has_credentials() {
        tracing::info!("Telephony account credentials present");
    } else {
        tracing::info!("Telephony account credentials not set");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
