use std::path::{Path, PathBuf};

use deploybot_config::{config_dir, config_file_path, DeployBotConfig, DEFAULT_LOG_DIR, DEFAULT_LOG_LEVEL};

/// Process-level settings read from the environment before the config file.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding `config.yaml`
    pub config_dir: PathBuf,
    /// Explicit config file (`DEPLOYBOT_CONFIG`), overrides `config_dir`
    pub config_path: Option<PathBuf>,
    /// Log directory override (`DEPLOYBOT_LOG_DIR`)
    pub log_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        Self {
            config_dir: config_dir(),
            config_path: std::env::var("DEPLOYBOT_CONFIG").ok().map(PathBuf::from),
            log_dir: std::env::var("DEPLOYBOT_LOG_DIR").ok().map(PathBuf::from),
        }
    }

    pub fn config_path(&self) -> PathBuf {
        self.config_path
            .clone()
            .unwrap_or_else(|| config_file_path(&self.config_dir))
    }

    /// Log directory: env override, then the file's `logging.dir` resolved
    /// against the config directory.
    pub fn log_dir(&self, file: &DeployBotConfig) -> PathBuf {
        if let Some(dir) = &self.log_dir {
            return dir.clone();
        }
        let dir = file
            .logging
            .as_ref()
            .and_then(|l| l.dir.as_deref())
            .unwrap_or(DEFAULT_LOG_DIR);
        resolve_against(&self.config_dir, Path::new(dir))
    }

    pub fn log_level(file: &DeployBotConfig) -> String {
        file.logging
            .as_ref()
            .and_then(|l| l.level.clone())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
    }
}

fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deploybot_config::LoggingConfig;
    use pretty_assertions::assert_eq;

    fn cli_config() -> Config {
        Config {
            config_dir: PathBuf::from("/etc/deploybot"),
            config_path: None,
            log_dir: None,
        }
    }

    #[test]
    fn config_path_defaults_to_config_dir() {
        assert_eq!(cli_config().config_path(), PathBuf::from("/etc/deploybot/config.yaml"));
    }

    #[test]
    fn relative_log_dir_lives_under_config_dir() {
        let file = DeployBotConfig {
            logging: Some(LoggingConfig {
                level: Some("debug".into()),
                dir: Some("var/log".into()),
            }),
            ..Default::default()
        };
        assert_eq!(cli_config().log_dir(&file), PathBuf::from("/etc/deploybot/var/log"));
        assert_eq!(Config::log_level(&file), "debug");
    }

    #[test]
    fn env_log_dir_wins() {
        let config = Config {
            log_dir: Some(PathBuf::from("/tmp/logs")),
            ..cli_config()
        };
        assert_eq!(config.log_dir(&DeployBotConfig::default()), PathBuf::from("/tmp/logs"));
        assert_eq!(Config::log_level(&DeployBotConfig::default()), "info");
    }
}
