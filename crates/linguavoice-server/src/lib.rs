#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod auth;
mod billing;
mod cors;
mod error;
mod extract;
mod generate;
mod health;
mod relay;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;
use url::Url;

use linguavoice_accounts::{QuotaPolicy, RecordStoreClient, UsageRecorder};
use linguavoice_auth::{IdentityVerifier, MemoryRelay, TokenRelay};
use linguavoice_config::Config;
use linguavoice_payments::PaymentsClient;
use translation::TranslationClient;
use tts::SpeechClient;

pub use error::ApiError;

/// Shared state behind the generation and relay routes
pub(crate) struct AppState {
    pub relay: Arc<dyn TokenRelay>,
    pub records: RecordStoreClient,
    pub quota: QuotaPolicy,
    pub translator: TranslationClient,
    pub speech: SpeechClient,
    pub recorder: UsageRecorder,
    /// Redirect-target page URL, derived from the public base URL
    pub callback_url: Url,
    pub default_voice: String,
    pub source_languages: Vec<String>,
}

impl AppState {
    /// Whether the target language matches the source text's language,
    /// making translation a no-op to skip
    pub fn is_source_language(&self, language: &str) -> bool {
        self.source_languages.iter().any(|s| s.eq_ignore_ascii_case(language))
    }
}

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if a downstream client cannot be constructed or
    /// the public URL cannot host the callback page
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let listen_address = config
            .server
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

        let records = RecordStoreClient::new(&config.accounts)?;
        let relay: Arc<dyn TokenRelay> = Arc::new(MemoryRelay::new(Duration::from_secs(config.relay.ttl_seconds)));

        let state = Arc::new(AppState {
            relay,
            records: records.clone(),
            quota: QuotaPolicy::from_config(&config.quota),
            translator: TranslationClient::new(&config.translation)?,
            speech: SpeechClient::new(&config.tts)?,
            recorder: UsageRecorder::new(records.clone()),
            callback_url: config.server.public_url.join("auth/callback")?,
            default_voice: config.tts.default_voice.clone(),
            source_languages: config.translation.source_languages.clone(),
        });

        let mut app = Router::new()
            .route("/generate", post(generate::generate_handler))
            .route("/auth/create_magic_session", post(relay::create_magic_session))
            .route("/auth/receive_token", post(relay::receive_token))
            .route("/auth/poll_token", get(relay::poll_token))
            .route("/auth/callback", get(relay::callback_page))
            .with_state(state);

        // Payment relays are opt-in
        if let Some(ref payments_config) = config.payments {
            let billing_state = billing::BillingState {
                payments: PaymentsClient::new(payments_config)?,
                prices: payments_config.prices.clone(),
                webhook_secret: payments_config.webhook_secret.clone(),
                records,
            };

            app = app
                .route(
                    "/billing/create_checkout_session",
                    post(billing::create_checkout_session).with_state(billing_state.clone()),
                )
                .route(
                    "/billing/webhook",
                    post(billing::webhook_handler).with_state(billing_state),
                );
        }

        if config.server.health.enabled {
            app = app.route(&config.server.health.path, get(health::health_handler));
        }

        // Apply middleware layers (innermost first)

        app = app.layer(TraceLayer::new_for_http());

        if let Some(ref cors_config) = config.server.cors {
            app = app.layer(cors::cors_layer(cors_config));
        }

        // Bearer verification runs outermost so every handler sees a
        // resolved caller
        let verifier = IdentityVerifier::new(&config.auth)?;
        let public_paths = config.auth.public_paths.clone();
        app = app.layer(axum::middleware::from_fn(move |req, next| {
            let verifier = verifier.clone();
            let public_paths = public_paths.clone();
            async move { auth::auth_middleware(verifier, public_paths, req, next).await }
        }));

        Ok(Self {
            router: app,
            listen_address,
        })
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}
