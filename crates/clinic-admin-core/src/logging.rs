//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! The library only emits events; hosts call [`init_logging`] once at startup
//! to print them. `RUST_LOG` takes precedence over the filter passed in.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when neither `RUST_LOG` nor an explicit filter is given.
pub const DEFAULT_FILTER: &str = "clinic_admin_core=info";

/// Build the filter: `RUST_LOG` if set, then `filter`, then [`DEFAULT_FILTER`].
pub fn build_env_filter(filter: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        filter
            .and_then(|f| EnvFilter::try_new(f).ok())
            .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
    })
}

/// Install a global fmt subscriber.
///
/// Returns `false` when a global subscriber was already installed; the
/// existing one stays in place.
pub fn init_logging(filter: Option<&str>) -> bool {
    tracing_subscriber::registry()
        .with(build_env_filter(filter))
        .with(fmt::layer().with_target(true))
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_noop() {
        init_logging(Some("clinic_admin_core=debug"));
        assert!(!init_logging(None));
    }
}
