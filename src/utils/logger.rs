use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Output shape of the process log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable single-line records for terminals.
    Compact,
    /// One JSON object per record, for container log collectors.
    Json,
}

/// Directives used when `RUST_LOG` is unset. Verbose also shows per-request HTTP traces.
pub fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "rodman_feats=debug,tower_http=debug,info"
    } else {
        "rodman_feats=info,tower_http=warn"
    }
}

/// Install the global subscriber. `RUST_LOG` wins over the built-in directives.
pub fn init_logger(format: LogFormat, verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));
    let layer = fmt::layer().with_target(false).with_file(false).with_line_number(false);

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Compact => registry.with(layer.compact()).init(),
        LogFormat::Json => registry.with(layer.json()).init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_parse() {
        for verbose in [false, true] {
            let directives = default_directives(verbose);
            assert!(directives.starts_with("rodman_feats="));
            assert!(EnvFilter::try_new(directives).is_ok());
        }
        assert!(default_directives(true).contains("debug"));
        assert!(!default_directives(false).contains("debug"));
    }
}
