//! Configuration path utilities for parmsets.
//!
//! This module resolves the declaration file path and expands shell
//! references like `~` and `$HOME` in it.

use log::warn;

/// Default path for the parameter declaration file
const DEFAULT_DECLARATIONS_PATH: &str = "~/.parmsets/parameters.yml";

/// Default column width of parameter names in the usage string
pub const DEFAULT_PADDING: usize = 12;

/// Resolves the declaration file path.
///
/// If a custom path is provided, uses that path. Otherwise, uses the default
/// declaration path. `~` and environment variables are expanded; when an
/// environment variable is undefined only `~` is expanded.
///
/// # Examples
///
/// ```
/// use parmsets_cli::config::get_declarations_path;
///
/// let custom_path = get_declarations_path(&Some("/path/to/parameters.yml".to_string()));
/// assert_eq!(custom_path, "/path/to/parameters.yml");
/// ```
pub fn get_declarations_path(declarations_path_arg: &Option<String>) -> String {
    let declarations_path = match declarations_path_arg {
        Some(declarations_path) => declarations_path,
        None => DEFAULT_DECLARATIONS_PATH,
    };

    match shellexpand::full(declarations_path) {
        Ok(expanded) => expanded.to_string(),
        Err(e) => {
            warn!("Could not expand `{declarations_path}`: {e}");
            shellexpand::tilde(declarations_path).to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_declarations_path_with_custom_path() {
        let custom_path = Some("/custom/path/parameters.yml".to_string());
        let result = get_declarations_path(&custom_path);
        assert_eq!(result, "/custom/path/parameters.yml");
    }

    #[test]
    fn test_get_declarations_path_with_none() {
        let result = get_declarations_path(&None);
        // Should expand the tilde in the default path
        assert!(result.ends_with(".parmsets/parameters.yml"));
    }

    #[test]
    fn test_get_declarations_path_with_undefined_variable() {
        let path = Some("~/$PARMSETS_SURELY_UNDEFINED_VARIABLE/parameters.yml".to_string());
        let result = get_declarations_path(&path);
        assert!(result.contains("$PARMSETS_SURELY_UNDEFINED_VARIABLE"));
    }
}
