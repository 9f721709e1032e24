//! Grizzly World Deliveries shop - interactive terminal storefront.
//!
//! Browse the menu, build a cart, pick a payment method and hand the order
//! off to WhatsApp. Configuration comes from the environment (see
//! [`grizzly_shop::config`]); logs go to stderr so they never mix with the
//! shop display.

#![cfg_attr(not(test), forbid(unsafe_code))]

use grizzly_shop::config::LogFormat;
use grizzly_shop::offline::register_async;
use grizzly_shop::{AppError, Menu, ShopConfig, ShopSession, Terminal};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &ShopConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            sample_rate: config.sentry_sample_rate,
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

/// Install the tracing subscriber: env filter, stderr output and Sentry.
fn init_tracing(log_format: LogFormat) {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "grizzly_shop=info,grizzly_core=info".into());

    let json = log_format == LogFormat::Json;
    let pretty_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));
    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(pretty_layer)
        .with(json_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() {
    // Load configuration from environment (needed for Sentry init)
    let config = match ShopConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(LogFormat::Pretty);
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);
    init_tracing(config.log_format);
    tracing::debug!(?config, "Configuration loaded");

    if let Err(e) = run(config).await {
        e.report();
        tracing::error!("Shop failed: {e}");
        std::process::exit(1);
    }
}

async fn run(config: ShopConfig) -> Result<(), AppError> {
    let menu = Menu::load(config.menu_path.as_deref()).await?;
    tracing::info!(items = menu.items.len(), "Menu loaded");

    // Fire and forget; the shop opens without waiting for the cache.
    let _offline = register_async(config.cache_dir.clone(), menu.clone(), config.payment.clone());

    tokio::task::spawn_blocking(move || {
        let stdin = std::io::stdin();
        let mut session = ShopSession::new(&config, menu, stdin.lock(), Terminal);
        session.run()
    })
    .await?
}
