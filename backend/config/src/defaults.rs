//! Config defaults: fills in values the rest of the bot relies on.

use crate::schema::{DeployBotConfig, LoggingConfig};

/// Deployments API used when `api_url` is not set.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Log level used when `logging.level` is not set.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Directory for rolling log files when `logging.dir` is not set.
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Apply all defaults to a freshly loaded config.
pub fn apply_all_defaults(config: DeployBotConfig) -> DeployBotConfig {
    let config = apply_api_defaults(config);
    apply_logging_defaults(config)
}

fn apply_api_defaults(mut config: DeployBotConfig) -> DeployBotConfig {
    if config.api_url.as_deref().map(str::trim).unwrap_or("").is_empty() {
        config.api_url = Some(DEFAULT_API_URL.to_string());
    }
    config
}

fn apply_logging_defaults(mut config: DeployBotConfig) -> DeployBotConfig {
    let logging = config.logging.get_or_insert_with(LoggingConfig::default);
    if logging.level.is_none() {
        logging.level = Some(DEFAULT_LOG_LEVEL.to_string());
    }
    if logging.dir.is_none() {
        logging.dir = Some(DEFAULT_LOG_DIR.to_string());
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applies_api_url() {
        let cfg = apply_all_defaults(DeployBotConfig::default());
        assert_eq!(cfg.api_url.as_deref(), Some(DEFAULT_API_URL));
    }

    #[test]
    fn keeps_user_api_url() {
        let cfg = DeployBotConfig {
            api_url: Some("https://ghe.example.com/api/v3".into()),
            ..Default::default()
        };
        let cfg = apply_all_defaults(cfg);
        assert_eq!(cfg.api_url.as_deref(), Some("https://ghe.example.com/api/v3"));
    }

    #[test]
    fn applies_logging_level_without_touching_set_dir() {
        let cfg = DeployBotConfig {
            logging: Some(LoggingConfig {
                level: None,
                dir: Some("/var/log/deploybot".into()),
            }),
            ..Default::default()
        };
        let logging = apply_all_defaults(cfg).logging.unwrap();
        assert_eq!(logging.level.as_deref(), Some(DEFAULT_LOG_LEVEL));
        assert_eq!(logging.dir.as_deref(), Some("/var/log/deploybot"));
    }
}
