use crate::error::{Error, Result};
use std::env;
use std::path::PathBuf;

/// Environment variable that points at an alternative config file.
pub const CONFIG_ENV: &str = "TERMPROMPT_CONFIG";

/// Base config directory (universal ~/.config/termprompt/ on all platforms)
pub fn termprompt() -> Result<PathBuf> {
    #[cfg(windows)]
    {
        let appdata = env::var("APPDATA").map_err(|_| {
            Error::internal_unexpected(
                "APPDATA environment variable not set on Windows".to_string(),
            )
        })?;
        Ok(PathBuf::from(appdata).join("termprompt"))
    }

    #[cfg(not(windows))]
    {
        let home = env::var("HOME").map_err(|_| {
            Error::internal_unexpected(
                "HOME environment variable not set on Unix-like system".to_string(),
            )
        })?;
        Ok(PathBuf::from(home).join(".config").join("termprompt"))
    }
}

/// Config file path. `TERMPROMPT_CONFIG` wins over the default location;
/// `~` and `$VAR` references in it are expanded.
pub fn termprompt_json() -> Result<PathBuf> {
    match env::var(CONFIG_ENV) {
        Ok(custom) if !custom.trim().is_empty() => {
            let expanded = shellexpand::full(custom.trim()).map_err(|e| {
                Error::config_invalid_value(CONFIG_ENV, Some(custom.clone()), e.to_string())
            })?;
            Ok(PathBuf::from(expanded.into_owned()))
        }
        _ => Ok(termprompt()?.join("termprompt.json")),
    }
}
