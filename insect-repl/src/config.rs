//! Configuration handling for the insect front end

use std::path::PathBuf;

/// Environment variable that disables the startup file when set to `true`
pub const NO_RC_VAR: &str = "INSECT_NO_RC";

/// Environment variable holding the log filter
pub const LOG_VAR: &str = "INSECT_LOG";

/// REPL configuration
#[derive(Debug, Clone)]
pub struct ReplConfig {
    /// History file path, no history when unset
    pub history_file: Option<PathBuf>,
    /// Maximum history entries loaded into the editor
    pub max_history: usize,
    /// Prompt string
    pub prompt: String,
    /// Startup file evaluated before interactive or piped input
    pub rc_file: Option<PathBuf>,
    /// Whether to evaluate the startup file at all
    pub load_rc: bool,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            history_file: None,
            max_history: 10000,
            prompt: ">>> ".to_string(),
            rc_file: None,
            load_rc: true,
        }
    }
}

impl ReplConfig {
    /// Resolve per-user paths and read the environment
    pub fn from_env() -> Self {
        let flag = std::env::var(NO_RC_VAR).ok();
        Self {
            history_file: default_history_file(),
            rc_file: default_rc_file(),
            load_rc: rc_enabled(flag.as_deref()),
            ..Self::default()
        }
    }
}

/// Only the literal value `true` turns the startup file off
pub fn rc_enabled(no_rc: Option<&str>) -> bool {
    no_rc != Some("true")
}

fn default_rc_file() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".insectrc"))
}

fn default_history_file() -> Option<PathBuf> {
    dirs::data_dir().map(|data| data.join("insect-history"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rc_flag() {
        assert!(rc_enabled(None));
        assert!(rc_enabled(Some("false")));
        assert!(rc_enabled(Some("1")));
        assert!(rc_enabled(Some("TRUE")));
        assert!(!rc_enabled(Some("true")));
    }

    #[test]
    fn test_default_config() {
        let config = ReplConfig::default();
        assert_eq!(config.prompt, ">>> ");
        assert_eq!(config.max_history, 10000);
        assert!(config.load_rc);
        assert!(config.rc_file.is_none());
    }

    #[test]
    fn test_paths_from_env() {
        let config = ReplConfig::from_env();
        if let Some(rc) = config.rc_file {
            assert!(rc.ends_with(".insectrc"));
        }
        if let Some(history) = config.history_file {
            assert!(history.ends_with("insect-history"));
        }
    }
}
