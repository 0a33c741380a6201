use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const CRATES: &[&str] = &[
    "toolpin",
    "toolpin_archive",
    "toolpin_fetch",
    "toolpin_install",
    "toolpin_platform",
    "toolpin_resource",
    "toolpin_shim",
];

/// Logs go to stderr so they never land between status lines.
///
/// `RUST_LOG` wins over `verbose`.
pub fn init(verbose: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives(verbose)));
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

fn directives(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "warn" };
    let mut directives = vec!["warn".to_string()];
    directives.extend(CRATES.iter().map(|name| format!("{name}={level}")));
    directives.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directives_parse() {
        for verbose in [false, true] {
            assert!(EnvFilter::try_new(directives(verbose)).is_ok());
        }
        assert!(directives(true).contains("toolpin_fetch=debug"));
        assert!(!directives(false).contains("debug"));
    }
}
