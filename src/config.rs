//! # Config Module — *Process-Wide Configuration*
//!
//! A single, process-wide configuration object: split thresholds for the
//! parallel engine and the default null-token set used by string parsers.
//! Constructed once at program start via [`Config::init`] and read
//! thereafter via [`Config::get`] — no teardown, no late reconfiguration
//! mid-bulk-op. Mirrors the "initialize once via a static" shape this crate
//! uses elsewhere (see the unnamed-field counter idiom in `Field`-style
//! metadata types upstream).

use std::sync::OnceLock;

static CONFIG: OnceLock<Config> = OnceLock::new();

/// Process-wide configuration for the parallel engine and string parsing.
#[derive(Debug, Clone)]
pub struct Config {
    /// Minimum row-axis task size above which a bulk operation forks.
    pub row_split_threshold: usize,
    /// Minimum column-axis task size above which a bulk operation forks.
    pub col_split_threshold: usize,
    /// Tokens that string parsers treat as a null/missing value.
    pub null_tokens: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            row_split_threshold: 10_000,
            col_split_threshold: 10_000,
            null_tokens: ["", "null", "NULL", "Null", "N/A", "n/a", "-"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl Config {
    /// Initializes the process-wide configuration. Only the first call takes
    /// effect; subsequent calls are no-ops, matching the "init-at-startup,
    /// no-teardown" lifecycle specified for this configuration object.
    pub fn init(config: Config) {
        let _ = CONFIG.set(config);
    }

    /// Returns the process-wide configuration, initializing it with defaults
    /// on first access if [`Config::init`] was never called.
    pub fn get() -> &'static Config {
        CONFIG.get_or_init(Config::default)
    }

    /// Returns `true` if the given token (case- and value- sensitive, as
    /// configured) should parse to null.
    pub fn is_null_token(&self, token: &str) -> bool {
        self.null_tokens.iter().any(|t| t == token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_thresholds_are_positive() {
        let c = Config::default();
        assert!(c.row_split_threshold > 0);
        assert!(c.col_split_threshold > 0);
    }

    #[test]
    fn default_null_tokens_cover_common_sentinels() {
        let c = Config::default();
        for tok in ["", "null", "NULL", "Null", "N/A", "n/a", "-"] {
            assert!(c.is_null_token(tok), "expected {tok:?} to be a null token");
        }
        assert!(!c.is_null_token("0"));
    }
}
