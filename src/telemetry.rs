//! Opt-in tracing setup for hosts embedding the renderers.
//!
//! The library itself only emits `tracing` events. Hosts that already own a
//! subscriber never need this module; the rest can call one of the helpers
//! below once at startup.

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER_DIRECTIVES: &str = "ndvi_charts=info";

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG`, falling back to
/// [`DEFAULT_FILTER_DIRECTIVES`].
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber is already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_fallback(DEFAULT_FILTER_DIRECTIVES)
}

/// Same as [`init_default_tracing`] with caller-provided fallback directives,
/// e.g. `"ndvi_charts=trace"` to follow hover transitions.
#[must_use]
pub fn init_tracing_with_fallback(fallback_directives: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback_directives));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_directives;
        false
    }
}
