use std::borrow::Cow;

use sentry::integrations::tracing::EventFilter;
use sentry::{ClientInitGuard, ClientOptions};
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::prelude::*;

/// Initialises tracing and Sentry.
///
/// Sentry stays disabled when no DSN is given, the guard must still be held until exit.
pub fn init(sentry_dsn: Option<String>, traces_sample_rate: f32) -> Result<ClientInitGuard> {
    let guard = sentry::init((
        sentry_dsn,
        ClientOptions {
            release: Some(Cow::Borrowed(env!("CARGO_PKG_VERSION"))),
            traces_sample_rate,
            ..Default::default()
        },
    ));

    let sentry_filter = EnvFilter::try_from_env("CAR_PRICE_SENTRY_LOG")
        .or_else(|_| EnvFilter::try_new("car_price=info"))?;
    let sentry_layer = sentry::integrations::tracing::layer()
        .event_filter(|metadata| {
            if metadata.level() <= &Level::WARN {
                EventFilter::Event
            } else {
                EventFilter::Breadcrumb
            }
        })
        .with_filter(sentry_filter);

    let format_filter = EnvFilter::try_from_env("CAR_PRICE_LOG")
        .or_else(|_| EnvFilter::try_new("car_price=info,poem=info"))?;
    let format_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(format_filter);

    tracing_subscriber::Registry::default()
        .with(sentry_layer)
        .with(format_layer)
        .try_init()?;

    Ok(guard)
}

pub fn format_duration(duration: StdDuration) -> String {
    humantime::format_duration(duration).to_string()
}

pub fn format_elapsed(instant: Instant) -> String {
    format_duration(instant.elapsed())
}
