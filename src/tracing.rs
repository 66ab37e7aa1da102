use std::borrow::Cow;

use sentry::integrations::tracing::EventFilter;
use sentry::{ClientInitGuard, ClientOptions};
use tracing::{Level, Metadata, Subscriber};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::prelude::*;

const LOG_VARIABLE: &str = "SCORE_PREDICTOR_LOG";
const LOG_DIRECTIVES: &str = "score_predictor=info,poem=info";

const SENTRY_LOG_VARIABLE: &str = "SCORE_PREDICTOR_SENTRY_LOG";
const SENTRY_LOG_DIRECTIVES: &str = "score_predictor=debug";

/// Installs the global subscriber.
///
/// Log lines go to stderr, so that the `predict` subcommand keeps stdout for its result.
/// With the DSN set, warnings and errors are reported to Sentry, the other events become
/// breadcrumbs of those reports.
pub fn init(sentry_dsn: Option<String>, traces_sample_rate: f32) -> Result<ClientInitGuard> {
    let guard = sentry::init((
        sentry_dsn,
        ClientOptions {
            release: Some(Cow::Borrowed(env!("CARGO_PKG_VERSION"))),
            traces_sample_rate,
            ..Default::default()
        },
    ));

    Registry::default()
        .with(sentry_layer()?)
        .with(stderr_layer()?)
        .try_init()
        .context("failed to install the tracing subscriber")?;

    Ok(guard)
}

fn sentry_layer<S>() -> Result<impl Layer<S>>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let layer = sentry::integrations::tracing::layer::<S>()
        .event_filter(sentry_event_filter)
        .span_filter(|metadata| *metadata.level() <= Level::INFO)
        .with_filter(env_filter(SENTRY_LOG_VARIABLE, SENTRY_LOG_DIRECTIVES)?);
    Ok(layer)
}

fn sentry_event_filter(metadata: &Metadata<'_>) -> EventFilter {
    if *metadata.level() <= Level::WARN {
        EventFilter::Event
    } else {
        EventFilter::Breadcrumb
    }
}

fn stderr_layer<S>() -> Result<impl Layer<S>>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let layer = tracing_subscriber::fmt::layer::<S>()
        .without_time()
        .with_writer(std::io::stderr)
        .with_filter(env_filter(LOG_VARIABLE, LOG_DIRECTIVES)?);
    Ok(layer)
}

/// Reads the filter directives from the environment variable, falling back to the defaults.
fn env_filter(variable: &str, default_directives: &str) -> Result<EnvFilter> {
    EnvFilter::try_from_env(variable)
        .or_else(|_| EnvFilter::try_new(default_directives))
        .with_context(|| format!("invalid default directives for `{}`", variable))
}

pub fn format_duration(duration: StdDuration) -> String {
    humantime::format_duration(duration).to_string()
}

pub fn format_elapsed(instant: Instant) -> String {
    format_duration(instant.elapsed())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_duration_ok() {
        assert_eq!(format_duration(StdDuration::from_millis(1500)), "1s 500ms");
        assert_eq!(format_duration(StdDuration::from_secs(61)), "1m 1s");
    }

    #[test]
    fn default_directives_ok() -> Result {
        env_filter("SCORE_PREDICTOR_UNSET_LOG", LOG_DIRECTIVES)?;
        env_filter("SCORE_PREDICTOR_UNSET_SENTRY_LOG", SENTRY_LOG_DIRECTIVES)?;
        Ok(())
    }
}
