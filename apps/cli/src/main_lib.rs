use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use tunicoin_client::{ApiClient, ClientConfig, ClientError, Session, SessionEvent};

use crate::{config::Config, secrets::FileSecretStore};

pub fn init_tracing() {
    let log_format = std::env::var("TUNI_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    // Output goes to stdout; logs stay on stderr so they never mix with it.
    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

/// Restores the session from the token file and builds the API client.
pub fn build_client(config: &Config) -> anyhow::Result<ApiClient> {
    let store = FileSecretStore::open(config.secret_file.clone(), config.secret_key.as_deref())?;
    tracing::debug!("Token file in use: {}", store.path().display());

    let session = Session::restore(Arc::new(store))?;
    tracing::debug!("Session state at start-up: {:?}", session.state());
    watch_session(&session);

    let client_config =
        ClientConfig::new(config.api_url.clone()).with_timeout(config.request_timeout);
    let client = ApiClient::new(client_config, session)?;
    tracing::info!("Using API at {}", client.base_url());
    Ok(client)
}

/// Logs session transitions for the lifetime of the process.
fn watch_session(session: &Session) {
    let mut events = session.subscribe();
    tokio::spawn(async move {
        while events.changed().await.is_ok() {
            let event = *events.borrow_and_update();
            match event {
                SessionEvent::Expired => {
                    tracing::warn!("Session expired, sign in again with `tunicoin auth login`")
                }
                SessionEvent::SignedIn => tracing::debug!("Signed in"),
                SessionEvent::SignedOut => tracing::debug!("Signed out"),
            }
        }
    });
}

/// One line for the terminal: what a toast would have shown.
pub fn describe_error(err: &anyhow::Error) -> String {
    match err.downcast_ref::<ClientError>() {
        Some(client_err) if client_err.requires_sign_in() => format!(
            "{} Run `tunicoin auth login` to sign in.",
            client_err.user_message()
        ),
        Some(client_err) => client_err.user_message(),
        None => format!("{:#}", err),
    }
}
