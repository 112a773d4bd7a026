//! Gateway HTTP server: slash-command webhook endpoint and health probe.

use crate::config::{self, Config};
use crate::gateway::protocol::{
    EphemeralResponse, INVALID_TOKEN, PROCESSING_ERROR, REPORT_SENT, SEND_FAILED, USAGE_HINT,
};
use crate::report::{Report, SlashCommand};
use crate::slack::{report_blocks, SlackClient, SlackError};
use anyhow::{Context, Result};
use axum::{
    extract::{rejection::FormRejection, Form, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;

/// Shared state for the gateway: read-only for the process lifetime.
#[derive(Clone)]
pub struct GatewayState {
    pub config: Arc<Config>,
    pub slack: SlackClient,
    /// Channel id the reports are posted to, resolved once at startup.
    pub mod_channel_id: String,
    /// When Some, the form's `token` must match or the command is rejected.
    pub verification_token: Option<String>,
}

/// Run the gateway server; binds to config.gateway.bind:config.gateway.port.
/// Refuses to start when the bot token or moderation channel is unresolved.
/// Blocks until shutdown (e.g. Ctrl+C).
pub async fn run_gateway(config: Config) -> Result<()> {
    let bot_token = config::resolve_bot_token(&config).ok_or_else(|| {
        anyhow::anyhow!("no bot token configured (set SLACK_BOT_TOKEN or slack.botToken)")
    })?;
    let mod_channel_id = config::resolve_mod_channel(&config).ok_or_else(|| {
        anyhow::anyhow!("no moderation channel configured (set MOD_CHANNEL_ID or slack.modChannelId)")
    })?;
    let verification_token = config::resolve_verification_token(&config);
    let slack = SlackClient::new(bot_token, config::resolve_api_base(&config));

    let state = GatewayState {
        config: Arc::new(config.clone()),
        slack,
        mod_channel_id,
        verification_token,
    };

    let app = Router::new()
        .route("/", get(health_http))
        .route(
            "/slack/command",
            post(slash_command).fallback(method_not_allowed),
        )
        .with_state(state);

    let bind_addr = format!("{}:{}", config.gateway.bind, config.gateway.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding to {}", bind_addr))?;
    log::info!("gateway listening on {}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("gateway server exited")?;
    log::info!("gateway stopped");
    Ok(())
}

/// Future that completes when the process should shut down (SIGINT or SIGTERM).
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    log::info!("shutdown signal received, draining connections");
}

/// Terminal outcomes for one slash-command invocation. Translated to an HTTP
/// response at the handler boundary only.
enum Outcome {
    /// A verification token is configured and the form's token did not match.
    TokenMismatch,
    /// Report text missing or blank; answered with the usage hint.
    EmptyReport,
    /// Slack accepted the chat.postMessage call.
    Forwarded,
    /// Slack answered ok=false; payload kept for operator logs.
    Rejected(Value),
    /// Transport or decode failure talking to Slack.
    Failed(SlackError),
}

async fn handle_command(state: &GatewayState, cmd: SlashCommand) -> Outcome {
    if let Some(ref expected) = state.verification_token {
        if cmd.token.as_deref().unwrap_or("") != expected.as_str() {
            return Outcome::TokenMismatch;
        }
    }

    let Some(report) = Report::from_command(&cmd) else {
        return Outcome::EmptyReport;
    };

    log::info!(
        "forwarding report from {} in {} to {}",
        report.reporter_id,
        report.source_channel_id,
        state.mod_channel_id
    );
    match state
        .slack
        .post_message(&state.mod_channel_id, report_blocks(&report))
        .await
    {
        Ok(_) => Outcome::Forwarded,
        Err(SlackError::Api { payload }) => Outcome::Rejected(payload),
        Err(e) => Outcome::Failed(e),
    }
}

/// POST /slack/command — receives the URL-encoded slash-command form,
/// forwards the report, and answers the invoking user ephemerally.
/// User-input problems answer 200 so Slack renders the text to the user;
/// only unhandled failures answer 500.
async fn slash_command(
    State(state): State<GatewayState>,
    payload: Result<Form<SlashCommand>, FormRejection>,
) -> (StatusCode, Json<EphemeralResponse>) {
    let cmd = match payload {
        Ok(Form(cmd)) => cmd,
        Err(e) => {
            log::error!("slash command form decode failed: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(EphemeralResponse::new(PROCESSING_ERROR)),
            );
        }
    };

    match handle_command(&state, cmd).await {
        Outcome::TokenMismatch => {
            log::warn!("slash command rejected: verification token mismatch");
            (StatusCode::FORBIDDEN, Json(EphemeralResponse::new(INVALID_TOKEN)))
        }
        Outcome::EmptyReport => (StatusCode::OK, Json(EphemeralResponse::new(USAGE_HINT))),
        Outcome::Forwarded => (StatusCode::OK, Json(EphemeralResponse::new(REPORT_SENT))),
        Outcome::Rejected(payload) => {
            log::error!("chat.postMessage rejected the report: {}", payload);
            (StatusCode::OK, Json(EphemeralResponse::new(SEND_FAILED)))
        }
        Outcome::Failed(e) => {
            log::error!("forwarding report failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(EphemeralResponse::new(PROCESSING_ERROR)),
            )
        }
    }
}

/// Any non-POST method on the command route.
async fn method_not_allowed() -> (StatusCode, &'static str) {
    (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}

/// GET / returns a simple health JSON (for probes).
async fn health_http(State(state): State<GatewayState>) -> Json<Value> {
    Json(json!({
        "runtime": "running",
        "port": state.config.gateway.port,
    }))
}
