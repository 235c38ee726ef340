//! Session reflector binary.
//!
//! Wires configuration, logging, the Supabase adapter and the reflector, then
//! logs every change of the reflected session until Ctrl-C.
//!
//! Set `SESSION_REFLECTOR__AUTH__ACCESS_TOKEN` to hand over the access token
//! of an existing sign-in once the reflector is listening.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use session_reflector::adapters::auth::{SupabaseAuthProvider, SupabaseConfig};
use session_reflector::application::SessionReflector;
use session_reflector::config::{AppConfig, LoggingConfig};
use session_reflector::ports::AuthProvider;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;

    init_tracing(&config.logging);

    let supabase = SupabaseConfig::new(
        config.auth.supabase_url.clone(),
        config.auth.supabase_anon_key.clone(),
    )
    .with_request_timeout(config.auth.request_timeout());
    let provider = Arc::new(SupabaseAuthProvider::new(supabase)?);

    let reflector = Arc::new(SessionReflector::new(
        Arc::clone(&provider) as Arc<dyn AuthProvider>,
        config.reflector.clone(),
    ));

    let watcher = tokio::spawn(log_user_changes(Arc::clone(&reflector)));

    if let Err(e) = reflector.initialize().await {
        tracing::warn!("Session reflector started without an initial session: {}", e);
    }
    tracing::info!(
        state = %reflector.state(),
        loading = reflector.is_loading().get(),
        "Session reflector ready"
    );

    if let Some(token) = config.auth.access_token.clone() {
        if let Err(e) = provider.set_session(token, None).await {
            tracing::error!("Handing over access token failed: {}", e);
        }
    }

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for Ctrl-C")?;

    tracing::info!("Shutting down");
    reflector.teardown();
    watcher.abort();

    Ok(())
}

/// Logs the reflected user every time it changes.
async fn log_user_changes(reflector: Arc<SessionReflector>) {
    let mut users = reflector.current_user().subscribe();
    while users.changed().await.is_ok() {
        match users.borrow_and_update().as_ref() {
            Some(user) => tracing::info!(user_id = %user.id, "Signed in"),
            None => tracing::info!("Signed out"),
        }
    }
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));

    let registry = tracing_subscriber::registry().with(filter);
    if logging.json {
        registry.with(fmt::layer().json()).try_init().ok();
    } else {
        registry.with(fmt::layer().with_target(false)).try_init().ok();
    }
}
