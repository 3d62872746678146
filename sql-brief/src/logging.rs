//! Logging utilities and configuration for sql-brief.
//!
//! Library code only emits `tracing` events; installing a subscriber is left
//! to the application, optionally through [`setup::init_logging`].

use tracing::Level;

/// Controls how much model-facing text is written to logs.
///
/// Prompts and completions embed schema text and sample values, which can be
/// large and may carry real data.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Base log level for sql-brief components
    pub base_level: Level,
    /// Whether to log assembled prompts
    pub log_prompts: bool,
    /// Whether to log raw model completions
    pub log_completions: bool,
    /// Maximum length for logged field values (to prevent huge logs)
    pub max_field_length: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            base_level: Level::INFO,
            log_prompts: false,
            log_completions: false,
            max_field_length: 256,
        }
    }
}

impl LogConfig {
    /// Creates a verbose configuration suitable for debugging prompts.
    pub fn verbose() -> Self {
        Self {
            base_level: Level::DEBUG,
            log_prompts: true,
            log_completions: true,
            max_field_length: 2048,
        }
    }

    /// Creates a minimal configuration that never logs data-bearing text.
    pub fn production() -> Self {
        Self {
            base_level: Level::WARN,
            log_prompts: false,
            log_completions: false,
            max_field_length: 128,
        }
    }

    /// Truncates `value` to this configuration's field length.
    pub fn field(&self, value: &str) -> String {
        truncate_field(value, self.max_field_length)
    }
}

/// Truncates a string to at most `max_length` bytes, backing off to the
/// nearest character boundary.
pub fn truncate_field(value: &str, max_length: usize) -> String {
    if value.len() <= max_length {
        return value.to_string();
    }
    let mut end = max_length;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...(truncated)", &value[..end])
}

/// Subscriber installation for binaries and demos.
pub mod setup {
    use tracing::Level;

    use crate::error::{BriefError, BriefResult};

    /// Configuration for installing a `tracing` subscriber.
    #[derive(Debug, Clone)]
    pub struct LoggingConfig {
        /// Log level for the application
        pub level: Level,
        /// Log level for sql-brief components specifically
        pub brief_level: Level,
        /// Whether to use JSON output format
        pub json_format: bool,
        /// Environment filter override
        pub env_filter: Option<String>,
    }

    impl Default for LoggingConfig {
        fn default() -> Self {
            Self {
                level: Level::INFO,
                brief_level: Level::DEBUG,
                json_format: false,
                env_filter: None,
            }
        }
    }

    impl LoggingConfig {
        /// Creates a configuration for production use.
        pub fn production() -> Self {
            Self {
                level: Level::WARN,
                brief_level: Level::INFO,
                json_format: true,
                env_filter: None,
            }
        }

        /// Creates a configuration for development use.
        pub fn development() -> Self {
            Self {
                level: Level::DEBUG,
                brief_level: Level::DEBUG,
                json_format: false,
                env_filter: None,
            }
        }

        /// Sets the log level for the application.
        pub fn with_level(mut self, level: Level) -> Self {
            self.level = level;
            self
        }

        /// Sets the log level for sql-brief components.
        pub fn with_brief_level(mut self, level: Level) -> Self {
            self.brief_level = level;
            self
        }

        /// Sets whether to use JSON output format.
        pub fn with_json_format(mut self, enabled: bool) -> Self {
            self.json_format = enabled;
            self
        }

        /// Sets a custom environment filter.
        pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
            self.env_filter = Some(filter.into());
            self
        }

        /// Builds the environment filter string.
        pub fn env_filter(&self) -> String {
            match &self.env_filter {
                Some(filter) => filter.clone(),
                None => format!(
                    "{},sql_brief={}",
                    self.level.as_str().to_lowercase(),
                    self.brief_level.as_str().to_lowercase()
                ),
            }
        }
    }

    /// Installs a global `tracing` subscriber.
    ///
    /// `RUST_LOG` takes precedence over the configured filter.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use sql_brief::logging::setup::{init_logging, LoggingConfig};
    ///
    /// init_logging(LoggingConfig::development().with_json_format(true)).unwrap();
    /// ```
    pub fn init_logging(config: LoggingConfig) -> BriefResult<()> {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.env_filter()));

        let fmt_layer = if config.json_format {
            tracing_subscriber::fmt::layer().json().boxed()
        } else {
            tracing_subscriber::fmt::layer().boxed()
        };

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| BriefError::configuration(format!("Failed to install logger: {e}")))
    }
}
