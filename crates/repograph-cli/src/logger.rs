//! Logging setup for the CLI.
//!
//! Verbosity is resolved in this order: `--verbose` (debug for repograph
//! crates), `--quiet` (errors only), `RUST_LOG`, then info for repograph
//! crates. Log lines go to stderr so JSON written to stdout stays clean.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str = "repograph_cli=debug,repograph_analysis=debug,repograph_graph=debug";
const QUIET_FILTER: &str = "error";
const DEFAULT_FILTER: &str = "repograph_cli=info,repograph_analysis=info";

/// Install the global tracing subscriber. Call once, before any logging.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color && console::colors_enabled_stderr())
        .with_writer(std::io::stderr)
        .compact();

    // A second init (tests) is harmless.
    let _ = tracing_subscriber::registry()
        .with(build_filter(verbose, quiet))
        .with(fmt_layer)
        .try_init();
}

fn build_filter(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_filter_enables_debug() {
        let filter = build_filter(true, false);
        assert!(filter.to_string().contains("repograph_analysis=debug"));
    }

    #[test]
    fn quiet_filter_is_errors_only() {
        let filter = build_filter(false, true).to_string();
        assert!(filter.contains("error") && !filter.contains("debug"));
    }
}
