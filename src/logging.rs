//! Tracing setup for the daymark binary.

use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber writing compact lines to stderr.
///
/// `RUST_LOG` wins over `level` when set. Returns false if a subscriber was
/// already installed, in which case that one stays in place.
pub fn init(level: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact();

    match subscriber.try_init() {
        Ok(()) => true,
        Err(e) => {
            // Goes to whichever subscriber won the race.
            debug!(error = %e, "tracing subscriber already installed");
            false
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_keeps_first_subscriber() {
        init("debug");
        assert!(!init("not a valid [filter"));
    }
}
