use lorekeeper_core::{ResourceKind, LOREKEEPER_LOG_VAR};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// Re-export tracing macros for convenience
pub use tracing::{debug, error, info, instrument, span, trace, warn, Level, Span};

/// Initialize the tracing system
///
/// Reads the filter from `LOREKEEPER_LOG`, falling back to `info`, and
/// writes compact lines to stderr. Calling it twice returns an error from
/// the second call rather than replacing the first subscriber.
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let filter = EnvFilter::try_from_env(LOREKEEPER_LOG_VAR)
        .or_else(|_| EnvFilter::try_new("info"))?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(is_tty())
        .compact()
        .with_target(true)
        .with_thread_ids(false)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Install a test-writer subscriber; safe to call from every test
pub fn init_for_tests() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOREKEEPER_LOG_VAR)
                .unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

/// Check if we're running in a TTY environment
fn is_tty() -> bool {
    std::io::IsTerminal::is_terminal(&std::io::stderr())
}

/// Create a span for one access-layer operation on a collection
pub fn access_span(kind: ResourceKind, action: &str, anonymous: bool) -> Span {
    span!(
        Level::DEBUG,
        "access",
        kind = %kind,
        action = %action,
        anonymous = anonymous
    )
}

/// Emit a structured event for anonymous list cache lookups
pub fn cache_event(key: &str, hit: bool) {
    if hit {
        debug!(key = %key, "cache_hit");
    } else {
        debug!(key = %key, "cache_miss");
    }
}

/// Emit a structured event for a prefix invalidation
pub fn cache_invalidated(prefix: &str, removed: usize) {
    debug!(prefix = %prefix, removed = removed, "cache_invalidated");
}

/// Emit a structured event when a policy check refuses an action
pub fn policy_denied(kind: ResourceKind, id: &str, action: &str, code: &str) {
    debug!(
        kind = %kind,
        id = %id,
        action = %action,
        code = %code,
        "policy_denied"
    );
}
