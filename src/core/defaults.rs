use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::paths;
use crate::utils::parser;
use crate::width::DEFAULT_COLUMNS;

/// Forces non-interactive mode when set to a truthy value.
pub const ASSUME_DEFAULTS_ENV: &str = "TERMPROMPT_ASSUME_DEFAULTS";

/// Root configuration structure for termprompt.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptConfig {
    /// Wrap width used when the terminal width cannot be detected.
    #[serde(default = "default_line_width")]
    pub line_width: usize,

    /// Answer every prompt with its default without reading input.
    #[serde(default)]
    pub assume_defaults: bool,

    /// Seconds to wait for an answer; 0 waits forever.
    #[serde(default)]
    pub default_timeout: u64,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            line_width: default_line_width(),
            assume_defaults: false,
            default_timeout: 0,
        }
    }
}

fn default_line_width() -> usize {
    DEFAULT_COLUMNS
}

impl PromptConfig {
    fn validate(self, path: &Path) -> crate::Result<Self> {
        if self.line_width == 0 {
            return Err(crate::Error::config_invalid_value(
                "line_width",
                Some(self.line_width.to_string()),
                format!("must be at least 1 (in {})", path.display()),
            ));
        }
        Ok(self)
    }
}

// =============================================================================
// Loading functions
// =============================================================================

/// Load the full termprompt.json config, falling back to defaults on any error.
pub fn load_config() -> PromptConfig {
    match load_config_from_file() {
        Ok(Some(config)) => config,
        Ok(None) => PromptConfig::default(),
        Err(err) => {
            log_status!("config", "Ignoring termprompt.json: {}", err);
            PromptConfig::default()
        }
    }
}

/// Attempt to load config from the termprompt.json file.
fn load_config_from_file() -> crate::Result<Option<PromptConfig>> {
    let path = paths::termprompt_json()?;

    if !path.exists() {
        return Ok(None);
    }

    load_config_from(&path).map(Some)
}

/// Parse and validate a config file at an explicit path.
pub fn load_config_from(path: &Path) -> crate::Result<PromptConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        crate::Error::internal_io(e.to_string(), Some(format!("read {}", path.display())))
    })?;

    let config: PromptConfig = serde_json::from_str(&content)
        .map_err(|e| crate::Error::config_invalid_json(path.display().to_string(), e))?;

    config.validate(path)
}

/// Check if the termprompt.json file exists
pub fn config_exists() -> bool {
    paths::termprompt_json()
        .map(|p| p.exists())
        .unwrap_or(false)
}

/// Get the path to termprompt.json (for display purposes)
pub fn config_path() -> crate::Result<String> {
    Ok(paths::termprompt_json()?.display().to_string())
}

/// Get built-in defaults (ignoring any file config)
pub fn builtin_defaults() -> PromptConfig {
    PromptConfig::default()
}

/// Whether `TERMPROMPT_ASSUME_DEFAULTS` asks for non-interactive mode.
pub fn assume_defaults_from_env() -> bool {
    std::env::var(ASSUME_DEFAULTS_ENV)
        .map(|v| parser::is_truthy(&v))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config_file(content: &str) -> NamedTempFile {
        let mut temp = NamedTempFile::new().unwrap();
        write!(temp, "{}", content).unwrap();
        temp
    }

    #[test]
    fn builtin_defaults_match_documented_values() {
        let config = builtin_defaults();
        assert_eq!(config.line_width, 80);
        assert!(!config.assume_defaults);
        assert_eq!(config.default_timeout, 0);
    }

    #[test]
    fn load_config_from_reads_all_fields() {
        let temp = config_file(
            r#"{"line_width": 100, "assume_defaults": true, "default_timeout": 30}"#,
        );
        let config = load_config_from(temp.path()).unwrap();
        assert_eq!(config.line_width, 100);
        assert!(config.assume_defaults);
        assert_eq!(config.default_timeout, 30);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let temp = config_file(r#"{"default_timeout": 5}"#);
        let config = load_config_from(temp.path()).unwrap();
        assert_eq!(config.line_width, 80);
        assert!(!config.assume_defaults);
        assert_eq!(config.default_timeout, 5);
    }

    #[test]
    fn invalid_json_is_reported() {
        let temp = config_file("{ not json");
        let err = load_config_from(temp.path()).unwrap_err();
        assert_eq!(err.code.as_str(), "config.invalid_json");
    }

    #[test]
    fn zero_line_width_is_rejected() {
        let temp = config_file(r#"{"line_width": 0}"#);
        let err = load_config_from(temp.path()).unwrap_err();
        assert_eq!(err.code.as_str(), "config.invalid_value");
        assert_eq!(err.details["key"], "line_width");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_config_from(Path::new("/nonexistent/termprompt.json")).unwrap_err();
        assert_eq!(err.code.as_str(), "internal.io_error");
    }
}
