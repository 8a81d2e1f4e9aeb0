// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Adipotech

use std::{env, net::SocketAddr, sync::Arc};

use tracing_subscriber::EnvFilter;

use adipotech_server::{
    api::router,
    config::AppConfig,
    providers::{MailRelayNotifier, NoopNotifier, Notifier, OpenAiCompletion, StripeCheckout},
    state::AppState,
};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    let format = env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());
    if format == "json" {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() {
    init_tracing();

    let config = AppConfig::from_env();

    let mut state = AppState::new(&config).expect("Failed to initialize storage");

    let notifier: Arc<dyn Notifier> = if MailRelayNotifier::is_configured() {
        match MailRelayNotifier::from_env() {
            Ok(relay) => Arc::new(relay),
            Err(e) => {
                tracing::warn!(error = %e, "mail relay misconfigured; notifications disabled");
                Arc::new(NoopNotifier)
            }
        }
    } else {
        Arc::new(NoopNotifier)
    };
    state = state.with_notifier(notifier);

    if StripeCheckout::is_configured() {
        match StripeCheckout::from_env(&config.frontend_url) {
            Ok(checkout) => state = state.with_payments(Arc::new(checkout)),
            Err(e) => tracing::warn!(error = %e, "checkout provider misconfigured; payments disabled"),
        }
    } else {
        tracing::info!("STRIPE_SECRET_KEY not set; payments disabled");
    }

    if OpenAiCompletion::is_configured() {
        match OpenAiCompletion::from_env() {
            Ok(completion) => state = state.with_ai(Arc::new(completion)),
            Err(e) => tracing::warn!(error = %e, "completion provider misconfigured; AI proxy disabled"),
        }
    } else {
        tracing::info!("OPENAI_API_KEY not set; AI proxy disabled");
    }

    match state.authenticator.ensure_admin(&config.admin_password).await {
        Ok(true) => tracing::warn!(
            "seeded admin account 'admin'; rotate ADMIN_PASSWORD before exposing this server"
        ),
        Ok(false) => {}
        Err(e) => {
            tracing::error!(error = %e, "failed to seed admin account");
            std::process::exit(1);
        }
    }

    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Failed to parse bind address");

    tracing::info!("Adipotech server listening on http://{addr} (docs at /docs)");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server failed");
}
