//! Session configuration.

use qcomposer_ir::CircuitDefaults;

use crate::error::ConfigError;

/// Query parameter that carries the snapshot token by default.
pub const DEFAULT_SHARE_PARAM: &str = "circuit";

/// Moment columns added by one "extend" action by default.
pub const DEFAULT_MOMENT_INCREMENT: usize = 5;

/// Session configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Query parameter holding the snapshot token.
    pub share_param: String,
    /// Dimensions of a fresh circuit and of a reset.
    pub defaults: CircuitDefaults,
    /// Columns added when no explicit increment is given.
    pub moment_increment: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            share_param: DEFAULT_SHARE_PARAM.to_string(),
            defaults: CircuitDefaults::default(),
            moment_increment: DEFAULT_MOMENT_INCREMENT,
        }
    }
}

impl SessionConfig {
    /// Defaults overridden by `QCOMPOSER_SHARE_PARAM`,
    /// `QCOMPOSER_INITIAL_QUBITS`, `QCOMPOSER_INITIAL_MOMENTS` and
    /// `QCOMPOSER_MOMENT_INCREMENT`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable lookup.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(param) = lookup("QCOMPOSER_SHARE_PARAM") {
            let trimmed = param.trim();
            if trimmed.is_empty() {
                return Err(ConfigError::InvalidVar {
                    var: "QCOMPOSER_SHARE_PARAM",
                    value: param,
                    reason: "must not be empty".into(),
                });
            }
            config.share_param = trimmed.to_string();
        }
        if let Some(qubits) = parse_count(&lookup, "QCOMPOSER_INITIAL_QUBITS")? {
            if qubits == 0 {
                return Err(ConfigError::InvalidVar {
                    var: "QCOMPOSER_INITIAL_QUBITS",
                    value: qubits.to_string(),
                    reason: "a circuit needs at least one qubit".into(),
                });
            }
            config.defaults.qubits = qubits;
        }
        if let Some(moments) = parse_count(&lookup, "QCOMPOSER_INITIAL_MOMENTS")? {
            config.defaults.moments = moments;
        }
        if let Some(increment) = parse_count(&lookup, "QCOMPOSER_MOMENT_INCREMENT")? {
            config.moment_increment = increment;
        }

        Ok(config)
    }
}

fn parse_count(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<usize>, ConfigError> {
    match lookup(var) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse::<usize>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidVar {
                var,
                value,
                reason: e.to_string(),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = SessionConfig::from_vars(vars(&[])).unwrap();
        assert_eq!(config, SessionConfig::default());
        assert_eq!(config.share_param, "circuit");
        assert_eq!(config.defaults.qubits, 3);
        assert_eq!(config.defaults.moments, 10);
    }

    #[test]
    fn test_overrides() {
        let config = SessionConfig::from_vars(vars(&[
            ("QCOMPOSER_SHARE_PARAM", " c "),
            ("QCOMPOSER_INITIAL_QUBITS", "5"),
            ("QCOMPOSER_INITIAL_MOMENTS", "20"),
            ("QCOMPOSER_MOMENT_INCREMENT", "2"),
        ]))
        .unwrap();
        assert_eq!(config.share_param, "c");
        assert_eq!(config.defaults.qubits, 5);
        assert_eq!(config.defaults.moments, 20);
        assert_eq!(config.moment_increment, 2);
    }

    #[test]
    fn test_rejects_bad_numbers() {
        let err = SessionConfig::from_vars(vars(&[("QCOMPOSER_MOMENT_INCREMENT", "lots")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidVar {
                var: "QCOMPOSER_MOMENT_INCREMENT",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_zero_qubits_and_empty_param() {
        assert!(SessionConfig::from_vars(vars(&[("QCOMPOSER_INITIAL_QUBITS", "0")])).is_err());
        assert!(SessionConfig::from_vars(vars(&[("QCOMPOSER_SHARE_PARAM", "  ")])).is_err());
    }
}
