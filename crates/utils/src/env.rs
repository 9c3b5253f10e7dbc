//! Typed access to environment configuration.

use std::{env, str::FromStr};

/// Read `key` from the environment, or `default` when unset or empty.
pub fn var_or(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => default.to_string(),
    }
}

/// Parse `key` from the environment, or `default` when unset or unparseable.
pub fn parse_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_vars_fall_back_to_defaults() {
        assert_eq!(
            var_or("PAGE_STUDIO_TEST_UNSET_VAR", "sqlite://fallback.db"),
            "sqlite://fallback.db"
        );
        assert_eq!(parse_or("PAGE_STUDIO_TEST_UNSET_PORT", 3001u16), 3001);
    }
}
