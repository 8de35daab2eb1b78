//! Environment variable expansion for configuration values.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// `field` names the configuration key in error messages.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    shellexpand::env(value)
        .map(std::borrow::Cow::into_owned)
        .map_err(|err| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} {}", err.var_name, err.cause),
        })
}

/// Expand like [`expand_env`], but resolve to an empty string when a
/// referenced variable is unset.
///
/// Used for values only some commands need, so the command that needs
/// them reports the gap.
pub(crate) fn expand_env_or_empty(value: &str) -> String {
    shellexpand::env(value).map_or_else(|_| String::new(), std::borrow::Cow::into_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_passthrough() {
        assert_eq!(
            expand_env("https://api.notion.com/v1", "notion.endpoint").unwrap(),
            "https://api.notion.com/v1"
        );
    }

    #[test]
    fn test_default_used_when_unset() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("MDNOTION_EXPAND_UNSET");
        }
        assert_eq!(
            expand_env("${MDNOTION_EXPAND_UNSET:-fallback}", "notion.token").unwrap(),
            "fallback"
        );
    }

    #[test]
    fn test_set_variable() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("MDNOTION_EXPAND_SET", "secret");
        }
        assert_eq!(
            expand_env("Bearer ${MDNOTION_EXPAND_SET}", "notion.token").unwrap(),
            "Bearer secret"
        );
        unsafe {
            std::env::remove_var("MDNOTION_EXPAND_SET");
        }
    }

    #[test]
    fn test_missing_variable_names_field() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("MDNOTION_EXPAND_MISSING");
        }
        let err = expand_env("${MDNOTION_EXPAND_MISSING}", "notion.token").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        let msg = err.to_string();
        assert!(msg.contains("notion.token"));
        assert!(msg.contains("MDNOTION_EXPAND_MISSING"));
    }

    #[test]
    fn test_or_empty_blanks_missing_variable() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("MDNOTION_EXPAND_OPTIONAL");
        }
        assert_eq!(expand_env_or_empty("${MDNOTION_EXPAND_OPTIONAL}"), "");
        assert_eq!(
            expand_env_or_empty("${MDNOTION_EXPAND_OPTIONAL:-fallback}"),
            "fallback"
        );
    }
}
