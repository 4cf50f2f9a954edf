// logging.rs -- tracing subscriber setup.
//
// The library itself only emits `tracing` events. Binaries, benches and
// tests decide whether anything is printed by installing a subscriber here.
// RUST_LOG always wins over the requested verbosity.

use tracing_subscriber::EnvFilter;

/// Map a verbosity count to a filter directive.
pub fn level_for_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Install a global fmt subscriber. Returns false if one was already set.
pub fn init(verbose: u8) -> bool {
    init_with_level(level_for_verbosity(verbose))
}

/// Install a global fmt subscriber with an explicit default directive
/// (e.g. the `logging.level` value from the config file).
pub fn init_with_level(level: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .try_init()
        .is_ok()
}

/// Subscriber that writes through the test harness. Idempotent.
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(level_for_verbosity(0), "info");
        assert_eq!(level_for_verbosity(1), "debug");
        assert_eq!(level_for_verbosity(2), "trace");
        assert_eq!(level_for_verbosity(9), "trace");
    }

    #[test]
    fn test_init_test_is_idempotent() {
        init_test();
        init_test();
        tracing::info!("still alive");
    }
}
