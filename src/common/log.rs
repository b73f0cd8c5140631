//! Tracing subscriber setup.
//!
//! `RUST_LOG` wins over the configured filter when set. JSON output keeps the
//! one-object-per-line shape expected by log shippers.

use std::sync::OnceLock;

use tracing_subscriber::{fmt, EnvFilter};

use crate::common::config::LogFormat;
use crate::common::error::{SurvivalError, SurvivalResult};

static INSTALLED: OnceLock<()> = OnceLock::new();

/// Install the global subscriber. Subsequent calls are no-ops.
pub fn init(filter: &str, format: LogFormat) -> SurvivalResult<()> {
    if INSTALLED.get().is_some() {
        return Ok(());
    }

    let env_filter = build_env_filter(filter)?;
    let builder = fmt().with_env_filter(env_filter).with_target(true);
    let installed = match format {
        LogFormat::Json => builder.json().with_current_span(false).try_init(),
        LogFormat::Text => builder.try_init(),
    };
    installed.map_err(|err| SurvivalError::Config(format!("tracing subscriber: {err}")))?;

    let _ = INSTALLED.set(());
    tracing::debug!(filter, ?format, "logging initialised");
    Ok(())
}

fn build_env_filter(fallback: &str) -> SurvivalResult<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(fallback)
        .map_err(|err| SurvivalError::Config(format!("log filter {fallback:?}: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_filter() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        let err = build_env_filter("titanic_predictor=loud").unwrap_err();
        assert!(matches!(err, SurvivalError::Config(_)));
    }
}
