//! Environment variable expansion for configuration strings.
//!
//! Supports:
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

use crate::ConfigError;

/// Expand environment variable references in a string.
///
/// Returns the original string unchanged if no `${}` patterns are present.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, LookupError> {
        match std::env::var(var) {
            Ok(val) => Ok(Some(val)),
            Err(_) => Err(LookupError {
                var_name: var.to_owned(),
            }),
        }
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{0}}} not set", e.cause.var_name),
    })
}

/// Expand an optional value in place.
pub(crate) fn expand_opt(value: &mut Option<String>, field: &str) -> Result<(), ConfigError> {
    if let Some(v) = value {
        *v = expand_env(v, field)?;
    }
    Ok(())
}

/// Error returned when environment variable lookup fails.
struct LookupError {
    var_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_simple_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("REFGEN_TEST_SPEC_ROOT", "/srv/spec");
        }
        let result = expand_env("${REFGEN_TEST_SPEC_ROOT}", "docs.spec_dir").unwrap();
        assert_eq!(result, "/srv/spec");
        unsafe {
            std::env::remove_var("REFGEN_TEST_SPEC_ROOT");
        }
    }

    #[test]
    fn test_expand_with_default_uses_default() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("REFGEN_TEST_UNSET_OUT");
        }
        let result = expand_env("${REFGEN_TEST_UNSET_OUT:-dist}/ref", "docs.output_dir").unwrap();
        assert_eq!(result, "dist/ref");
    }

    #[test]
    fn test_expand_missing_var_error() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("REFGEN_TEST_MISSING");
        }
        let err = expand_env("${REFGEN_TEST_MISSING}", "libraries.versions.spec").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("REFGEN_TEST_MISSING"));
        assert!(err.to_string().contains("libraries.versions.spec"));
    }

    #[test]
    fn test_expand_literal_unchanged() {
        let result = expand_env("supabase_js_v2.yml", "libraries.versions.spec").unwrap();
        assert_eq!(result, "supabase_js_v2.yml");
    }

    #[test]
    fn test_expand_opt() {
        let mut none = None;
        expand_opt(&mut none, "docs.markdown_dir").unwrap();
        assert_eq!(none, None);

        let mut literal = Some("docs/ref".to_owned());
        expand_opt(&mut literal, "docs.markdown_dir").unwrap();
        assert_eq!(literal.as_deref(), Some("docs/ref"));
    }
}
