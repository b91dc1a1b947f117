//! Non-interactive mode lookup.
//!
//! The reader asks an [`InteractionMode`] before every blocking read instead
//! of consulting a global, so callers decide where the flag lives.

use crate::defaults;

pub trait InteractionMode {
    /// `true` when prompts must resolve to their defaults without reading.
    fn is_non_interactive(&self) -> bool;
}

/// A mode decided once, e.g. from a `--yes` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixedMode {
    non_interactive: bool,
}

impl FixedMode {
    pub fn interactive() -> Self {
        Self {
            non_interactive: false,
        }
    }

    pub fn non_interactive() -> Self {
        Self {
            non_interactive: true,
        }
    }
}

impl InteractionMode for FixedMode {
    fn is_non_interactive(&self) -> bool {
        self.non_interactive
    }
}

/// Reads `TERMPROMPT_ASSUME_DEFAULTS` and the config file on every query.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfiguredMode;

impl InteractionMode for ConfiguredMode {
    fn is_non_interactive(&self) -> bool {
        defaults::assume_defaults_from_env() || defaults::load_config().assume_defaults
    }
}

impl<F> InteractionMode for F
where
    F: Fn() -> bool,
{
    fn is_non_interactive(&self) -> bool {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn fixed_modes() {
        assert!(!FixedMode::interactive().is_non_interactive());
        assert!(FixedMode::non_interactive().is_non_interactive());
        assert!(!FixedMode::default().is_non_interactive());
    }

    #[test]
    fn closures_are_modes() {
        let flag = std::cell::Cell::new(false);
        let mode = || flag.get();
        assert!(!mode.is_non_interactive());
        flag.set(true);
        assert!(mode.is_non_interactive());
    }

    #[test]
    fn configured_mode_reads_env_and_config_each_time() {
        let mut temp = NamedTempFile::new().unwrap();
        write!(temp, r#"{{"assume_defaults": false}}"#).unwrap();
        std::env::set_var(crate::paths::CONFIG_ENV, temp.path());
        std::env::remove_var(defaults::ASSUME_DEFAULTS_ENV);

        let mode = ConfiguredMode;
        assert!(!mode.is_non_interactive());

        std::env::set_var(defaults::ASSUME_DEFAULTS_ENV, "1");
        assert!(mode.is_non_interactive());
        std::env::remove_var(defaults::ASSUME_DEFAULTS_ENV);

        let mut enabled = NamedTempFile::new().unwrap();
        write!(enabled, r#"{{"assume_defaults": true}}"#).unwrap();
        std::env::set_var(crate::paths::CONFIG_ENV, enabled.path());
        assert!(mode.is_non_interactive());

        // Clean up
        std::env::remove_var(crate::paths::CONFIG_ENV);
    }
}
