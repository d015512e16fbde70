//! Config validation: checks with user-friendly error messages.

use crate::schema::{AppConfig, DeployBotConfig};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Characters allowed in app and environment slugs typed in chat.
static SLUG_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-_.0-9a-z]+$").unwrap());

/// `owner/name` repository identifier.
static REPO_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.-]+/[A-Za-z0-9_.-]+$").unwrap());

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// A collection of validation errors found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &DeployBotConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_access_token(config, &mut report);
    validate_apps(config, &mut report);
    report
}

fn validate_access_token(config: &DeployBotConfig, report: &mut ValidationReport) {
    if config.access_token.as_deref().map(str::trim).unwrap_or("").is_empty() {
        report.error("access_token", "An access token for the deployments API is required");
    }
}

fn validate_apps(config: &DeployBotConfig, report: &mut ValidationReport) {
    if config.apps.is_empty() {
        report.warn("apps", "No apps configured; every command will reply 'not found'");
    }

    // Sorted so reports are stable between runs.
    let mut slugs: Vec<&String> = config.apps.keys().collect();
    slugs.sort();
    for slug in slugs {
        let path = format!("apps.{slug}");
        if !SLUG_PATTERN.is_match(slug) {
            report.error(
                &path,
                format!("App slug '{slug}' can't be typed in chat; use [-_.0-9a-z]"),
            );
        }
        validate_app(&path, &config.apps[slug], report);
    }
}

fn validate_app(path: &str, app: &AppConfig, report: &mut ValidationReport) {
    match app.repo.as_deref() {
        None => report.warn(
            format!("{path}.repo"),
            "No repo configured; deploys of this app will fail",
        ),
        Some(repo) if !REPO_PATTERN.is_match(repo) => report.error(
            format!("{path}.repo"),
            format!("Repo '{repo}' must look like 'owner/name'"),
        ),
        Some(_) => {}
    }

    if let Some(env) = &app.default_env {
        if !SLUG_PATTERN.is_match(env) {
            report.error(
                format!("{path}.default_env"),
                format!("Environment '{env}' must match [-_.0-9a-z]+"),
            );
        }
    }

    if let Some(git_ref) = &app.default_ref {
        if git_ref.trim().is_empty() || git_ref.contains(char::is_whitespace) {
            report.error(format!("{path}.default_ref"), "Ref cannot be empty or contain spaces");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_app(slug: &str, app: AppConfig) -> DeployBotConfig {
        let mut cfg = DeployBotConfig {
            access_token: Some("token".into()),
            ..Default::default()
        };
        cfg.apps.insert(slug.to_string(), app);
        cfg
    }

    #[test]
    fn minimal_config_is_valid() {
        let report = validate(&with_app("myapp", AppConfig::with_repo("testuser/myapp")));
        assert!(report.is_valid(), "errors: {:?}", report.errors);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn missing_token_is_error() {
        let mut cfg = with_app("myapp", AppConfig::with_repo("testuser/myapp"));
        cfg.access_token = None;
        let report = validate(&cfg);
        assert!(!report.is_valid());
        assert_eq!(report.errors[0].path, "access_token");
    }

    #[test]
    fn app_without_repo_is_warning() {
        let report = validate(&with_app("myapp", AppConfig::default()));
        assert!(report.is_valid());
        assert_eq!(report.warnings[0].path, "apps.myapp.repo");
    }

    #[test]
    fn bad_repo_and_env_are_errors() {
        let app = AppConfig {
            repo: Some("no-owner".into()),
            default_env: Some("Staging".into()),
            ..Default::default()
        };
        let report = validate(&with_app("myapp", app));
        let paths: Vec<_> = report.errors.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["apps.myapp.repo", "apps.myapp.default_env"]);
    }

    #[test]
    fn uppercase_slug_is_error() {
        let report = validate(&with_app("MyApp", AppConfig::with_repo("testuser/myapp")));
        assert!(report.errors.iter().any(|e| e.path == "apps.MyApp"));
    }
}
