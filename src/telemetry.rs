//! Opt-in `tracing` setup for hosts embedding `page-enhancer`.
//!
//! Binders emit a `debug!` summary per pass, `trace!` per bound element and
//! `warn!` for skipped elements or suspicious markup. Nothing is printed until
//! the host installs a subscriber, its own or the one installed here.

/// Filter used when `RUST_LOG` is unset or blank: warnings from every target,
/// pass summaries from this crate.
pub const DEFAULT_LOG_DIRECTIVE: &str = "warn,page_enhancer=info";

/// Picks the filter directive, preferring a non-blank `RUST_LOG` value.
#[must_use]
pub fn log_directive(rust_log: Option<&str>) -> &str {
    match rust_log.map(str::trim) {
        Some(directive) if !directive.is_empty() => directive,
        _ => DEFAULT_LOG_DIRECTIVE,
    }
}

/// Installs a compact subscriber filtered by `RUST_LOG`.
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber is already set.
#[must_use]
pub fn init_default_tracing() -> bool {
    let rust_log = std::env::var("RUST_LOG").ok();
    init_tracing_with_directive(log_directive(rust_log.as_deref()))
}

/// Installs a compact subscriber with an explicit filter directive.
/// A directive that does not parse falls back to `DEFAULT_LOG_DIRECTIVE`.
#[must_use]
pub fn init_tracing_with_directive(directive: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_new(directive)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVE));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = directive;
        false
    }
}
