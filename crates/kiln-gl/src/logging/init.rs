use std::sync::Once;

/// Logger configuration for applications embedding the GL wrappers.
///
/// `env_filter` uses `env_logger` filter syntax, e.g. `"warn,kiln_gl=debug"`.
/// Driver diagnostics from successful compiles and links are logged at
/// `warn`; per-object creation at `debug`; buffer orphaning at `trace`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    /// Level used when neither `env_filter` nor `RUST_LOG` is set.
    pub default_level: log::LevelFilter,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            default_level: log::LevelFilter::Info,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

static INIT: Once = Once::new();

/// Installs `env_logger` as the global logger, once.
///
/// Later calls are ignored, and so is the case where the host application
/// already installed a different logger.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match config.env_filter.or_else(|| std::env::var("RUST_LOG").ok()) {
            Some(filter) => {
                builder.parse_filters(&filter);
            }
            None => {
                builder.filter_level(config.default_level);
            }
        }

        builder.write_style(config.write_style);

        if builder.try_init().is_ok() {
            log::debug!("logging initialized");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_defers_to_an_installed_logger() {
        crate::testing::capture_logs();
        init_logging(LoggingConfig {
            env_filter: Some("kiln_gl=trace".into()),
            ..LoggingConfig::default()
        });
        init_logging(LoggingConfig::default());

        log::warn!("records still reach the host logger");
        assert!(crate::testing::logged(log::Level::Warn, "records still reach the host logger"));
    }

    #[test]
    fn default_level_is_info() {
        assert_eq!(LoggingConfig::default().default_level, log::LevelFilter::Info);
    }
}
