//! Logging setup for the dbavro command-line tool.
//!
//! Log lines go to stderr so a schema written to stdout stays parseable.
//! Our own crates log at the level chosen by `-v`/`-q`; dependencies stay
//! at WARN unless `RUST_LOG` adds directives for them.

use crate::error::DbAvroError;
use crate::Result;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Crates whose events follow the verbosity flags
const OWN_TARGETS: [&str; 2] = ["dbavro_core", "dbavro"];

/// Maps the `-v`/`-q` flags to a maximum log level.
///
/// # Arguments
/// * `verbose` - number of `-v` flags (0 is INFO, 1 is DEBUG, more is TRACE)
/// * `quiet` - keep only errors, whatever `verbose` says
pub fn level_for(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::ERROR;
    }
    match verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Builds the event filter for the given flags.
///
/// `extra` holds `RUST_LOG`-style directives. They are ignored when
/// `quiet` is set.
///
/// # Errors
/// Returns `Configuration` when `extra` is not a valid directive list.
pub fn build_filter(verbose: u8, quiet: bool, extra: Option<&str>) -> Result<EnvFilter> {
    let level = level_for(verbose, quiet);
    let mut directives = vec![LevelFilter::WARN.min(level).to_string()];
    directives.extend(OWN_TARGETS.iter().map(|target| format!("{target}={level}")));
    if let Some(extra) = extra.filter(|e| !quiet && !e.trim().is_empty()) {
        directives.push(extra.to_string());
    }

    let spec = directives.join(",");
    EnvFilter::try_new(&spec).map_err(|e| {
        DbAvroError::configuration(format!("Invalid log filter '{}': {}", spec, e))
    })
}

/// Installs the global stderr subscriber.
///
/// # Arguments
/// * `verbose` - number of `-v` flags
/// * `quiet` - only log errors
///
/// # Returns
/// `Ok(())` once the subscriber is installed. Reads extra directives from
/// `RUST_LOG`.
///
/// # Example
/// ```rust,no_run
/// use dbavro_core::logging::init_logging;
///
/// init_logging(1, false).expect("Failed to initialize logging");
/// ```
pub fn init_logging(verbose: u8, quiet: bool) -> Result<()> {
    let extra = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(verbose, quiet, extra.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose > 1)
        .without_time()
        .try_init()
        .map_err(|e| DbAvroError::configuration(format!("Logging already initialized: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Only one global subscriber may exist per process; filters are
    // checked without installing one.
    #[test]
    fn test_verbosity_levels() {
        let cases = [
            (0, true, LevelFilter::ERROR),
            (5, true, LevelFilter::ERROR),
            (0, false, LevelFilter::INFO),
            (1, false, LevelFilter::DEBUG),
            (2, false, LevelFilter::TRACE),
            (10, false, LevelFilter::TRACE),
        ];

        for (verbose, quiet, expected) in cases {
            assert_eq!(level_for(verbose, quiet), expected, "verbose={verbose} quiet={quiet}");
        }
    }

    #[test]
    fn test_filter_scopes_level_to_own_crates() {
        let filter = build_filter(1, false, None).unwrap().to_string();
        assert!(filter.contains("dbavro_core=debug"), "{filter}");
        assert!(filter.contains("dbavro=debug"), "{filter}");
        assert!(filter.contains("warn"), "{filter}");
    }

    #[test]
    fn test_quiet_drops_extra_directives() {
        let filter = build_filter(0, true, Some("jsonschema=trace"))
            .unwrap()
            .to_string();
        assert!(!filter.contains("jsonschema"), "{filter}");
        assert!(filter.contains("dbavro_core=error"), "{filter}");
    }

    #[test]
    fn test_extra_directives_are_applied() {
        let filter = build_filter(0, false, Some("jsonschema=debug"))
            .unwrap()
            .to_string();
        assert!(filter.contains("jsonschema=debug"), "{filter}");
    }

    #[test]
    fn test_invalid_extra_directive_fails() {
        let error = build_filter(0, false, Some("dbavro=notalevel")).unwrap_err();
        assert!(matches!(error, DbAvroError::Configuration { .. }));
    }
}
