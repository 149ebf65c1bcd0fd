//! Reader configuration.
//!
//! The reader receives an immutable key/value snapshot that the caller has
//! already resolved (from properties files, the environment, or test
//! fixtures). Only the keys documented here are consulted; everything else
//! is carried along untouched.

use std::collections::HashMap;

/// Configuration key for the `~` approximation tolerance.
pub const RANGE_APPROXIMATION_KEY: &str = "spec.range.approximation";

/// Tolerance applied to `~N` ranges when no value is configured.
pub const DEFAULT_RANGE_APPROXIMATION: i32 = 2;

/// An immutable key/value view consulted while reading specs.
///
/// A parse call receives the configuration as an explicit parameter, so
/// its behavior cannot be affected by configuration changes made elsewhere
/// while the call runs.
#[derive(Clone, Debug, Default)]
pub struct ReaderConfig {
    values: HashMap<String, String>,
}

impl ReaderConfig {
    /// An empty configuration; every lookup falls back to its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the configuration with `key` set to `value`.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Look up a raw configuration value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// The `±` window applied when a range is written as `~N`.
    ///
    /// A missing value falls back to [`DEFAULT_RANGE_APPROXIMATION`]. A
    /// malformed or negative value does too, with a warning: a broken
    /// environment must not fail an otherwise valid spec.
    pub fn range_approximation(&self) -> i32 {
        let Some(raw) = self.get(RANGE_APPROXIMATION_KEY) else {
            return DEFAULT_RANGE_APPROXIMATION;
        };

        match raw.parse::<i32>() {
            Ok(value) if value >= 0 => value,
            Ok(value) => {
                tracing::warn!(value, "negative `{RANGE_APPROXIMATION_KEY}`, using default");
                DEFAULT_RANGE_APPROXIMATION
            }
            Err(_) => {
                tracing::warn!(raw, "malformed `{RANGE_APPROXIMATION_KEY}`, using default");
                DEFAULT_RANGE_APPROXIMATION
            }
        }
    }
}

impl<K, V> FromIterator<(K, V)> for ReaderConfig
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tolerance_defaults() {
        let config = ReaderConfig::new();
        assert_eq!(config.range_approximation(), DEFAULT_RANGE_APPROXIMATION);
    }

    #[test]
    fn tolerance_from_value() {
        let config = ReaderConfig::default().with(RANGE_APPROXIMATION_KEY, "5");
        assert_eq!(config.range_approximation(), 5);

        let config = ReaderConfig::default().with(RANGE_APPROXIMATION_KEY, "0");
        assert_eq!(config.range_approximation(), 0);
    }

    #[test]
    fn bad_tolerance_falls_back() {
        for raw in ["7.5", "two", "", "-3"] {
            let config = ReaderConfig::default().with(RANGE_APPROXIMATION_KEY, raw);
            assert_eq!(
                config.range_approximation(),
                DEFAULT_RANGE_APPROXIMATION,
                "raw: {raw:?}"
            );
        }
    }

    #[test]
    fn collects_from_pairs() {
        let config: ReaderConfig = [("spec.colors", "on"), (RANGE_APPROXIMATION_KEY, "9")]
            .into_iter()
            .collect();

        assert_eq!(config.get("spec.colors"), Some("on"));
        assert_eq!(config.get("spec.sounds"), None);
        assert_eq!(config.range_approximation(), 9);
    }
}
