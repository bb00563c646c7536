//! `${VAR}` expansion for path settings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// Bare `$VAR` is left as written. An unset variable without a default is
/// reported against `field`.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |name| -> Result<Option<String>, UnsetVar> {
        std::env::var(name)
            .map(Some)
            .map_err(|_| UnsetVar(name.to_owned()))
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.0),
    })
}

struct UnsetVar(String);

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_expand_set_var() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("RW_NAV_TEST_DOCS_ROOT", "/srv/docs");
        }
        let result = expand_env("${RW_NAV_TEST_DOCS_ROOT}/content", "docs.source_dir").unwrap();
        assert_eq!(result, "/srv/docs/content");
        unsafe {
            std::env::remove_var("RW_NAV_TEST_DOCS_ROOT");
        }
    }

    #[test]
    fn test_expand_default_when_unset() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("RW_NAV_TEST_UNSET_NAV");
        }
        let result = expand_env("${RW_NAV_TEST_UNSET_NAV:-nav.yaml}", "navigation.file").unwrap();
        assert_eq!(result, "nav.yaml");
    }

    #[test]
    fn test_expand_value_wins_over_default() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("RW_NAV_TEST_SET_NAV", "sidebar.json");
        }
        let result = expand_env("${RW_NAV_TEST_SET_NAV:-nav.yaml}", "navigation.file").unwrap();
        assert_eq!(result, "sidebar.json");
        unsafe {
            std::env::remove_var("RW_NAV_TEST_SET_NAV");
        }
    }

    #[test]
    fn test_expand_unset_var_names_field() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("RW_NAV_TEST_MISSING");
        }
        let err = expand_env("${RW_NAV_TEST_MISSING}", "docs.source_dir").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        let message = err.to_string();
        assert!(message.contains("RW_NAV_TEST_MISSING"));
        assert!(message.contains("docs.source_dir"));
    }

    #[test]
    fn test_literal_and_bare_dollar_unchanged() {
        assert_eq!(expand_env("docs", "docs.source_dir").unwrap(), "docs");
        assert_eq!(expand_env("$HOME/docs", "docs.source_dir").unwrap(), "$HOME/docs");
    }
}
