//! Deploy command grammar: turn chat text into a [`DeployIntent`].
//!
//! Recognized forms:
//!
//! ```text
//! deploy app
//! deploy app/ref
//! deploy app to env
//! deploy! app/ref to env
//! lock app in env
//! unlock app on env
//! ```
//!
//! The pattern is searched, not anchored, and is case-sensitive. Refs are any
//! run of non-whitespace, so `feature/my-branch` survives intact.

use once_cell::sync::Lazy;
use regex::Regex;

/// App and environment slugs.
const VALID_SLUG: &str = r"([-_.0-9a-z]+)";

static DEPLOY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    let pattern = [
        r"(deploy|lock|unlock)", // command
        r"(!)?\s+",              // forced
        VALID_SLUG,              // app
        r"(?:/(\S+))?",          // ref
        r"(?:\s+(?:to|in|on)\s+",
        VALID_SLUG, // environment
        r")?",
    ]
    .concat();
    Regex::new(&pattern).unwrap()
});

/// The verb of a recognized command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Deploy,
    Lock,
    Unlock,
}

impl CommandKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CommandKind::Deploy => "deploy",
            CommandKind::Lock => "lock",
            CommandKind::Unlock => "unlock",
        }
    }

    /// Task label sent to the deployments API.
    pub fn task(self) -> &'static str {
        match self {
            CommandKind::Deploy => "deploy",
            CommandKind::Lock => "deploy:lock",
            CommandKind::Unlock => "deploy:unlock",
        }
    }
}

/// What a command points at. `None` means the text did not say.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub app: String,
    pub git_ref: Option<String>,
    pub environment: Option<String>,
}

/// A parsed chat command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployIntent {
    Deploy { forced: bool, target: Target },
    Lock(Target),
    Unlock(Target),
    Unrecognized,
}

impl DeployIntent {
    pub fn parse(text: &str) -> Self {
        let Some(caps) = DEPLOY_PATTERN.captures(text) else {
            return DeployIntent::Unrecognized;
        };

        let target = Target {
            app: caps[3].to_string(),
            git_ref: caps.get(4).map(|m| m.as_str().to_string()),
            environment: caps.get(5).map(|m| m.as_str().to_string()),
        };

        // A bang after lock/unlock is accepted by the grammar but means nothing.
        match &caps[1] {
            "deploy" => DeployIntent::Deploy {
                forced: caps.get(2).is_some(),
                target,
            },
            "lock" => DeployIntent::Lock(target),
            _ => DeployIntent::Unlock(target),
        }
    }

    pub fn command(&self) -> Option<CommandKind> {
        match self {
            DeployIntent::Deploy { .. } => Some(CommandKind::Deploy),
            DeployIntent::Lock(_) => Some(CommandKind::Lock),
            DeployIntent::Unlock(_) => Some(CommandKind::Unlock),
            DeployIntent::Unrecognized => None,
        }
    }

    pub fn target(&self) -> Option<&Target> {
        match self {
            DeployIntent::Deploy { target, .. }
            | DeployIntent::Lock(target)
            | DeployIntent::Unlock(target) => Some(target),
            DeployIntent::Unrecognized => None,
        }
    }

    pub fn is_forced(&self) -> bool {
        matches!(self, DeployIntent::Deploy { forced: true, .. })
    }

    pub fn app(&self) -> Option<&str> {
        self.target().map(|t| t.app.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn target(app: &str, git_ref: Option<&str>, environment: Option<&str>) -> Target {
        Target {
            app: app.to_string(),
            git_ref: git_ref.map(str::to_string),
            environment: environment.map(str::to_string),
        }
    }

    #[test]
    fn parses_bare_deploy() {
        assert_eq!(
            DeployIntent::parse("deploy myapp"),
            DeployIntent::Deploy {
                forced: false,
                target: target("myapp", None, None),
            }
        );
    }

    #[test]
    fn parses_ref_and_environment() {
        assert_eq!(
            DeployIntent::parse("deploy myapp/experiment to branch-lab"),
            DeployIntent::Deploy {
                forced: false,
                target: target("myapp", Some("experiment"), Some("branch-lab")),
            }
        );
    }

    #[test]
    fn keeps_slashes_in_ref() {
        let intent = DeployIntent::parse("deploy app/my-complicated/branch-name to staging");
        assert_eq!(
            intent.target().unwrap().git_ref.as_deref(),
            Some("my-complicated/branch-name")
        );
    }

    #[test]
    fn bang_forces_deploy() {
        let intent = DeployIntent::parse("deploy! app to stg");
        assert!(intent.is_forced());
        assert_eq!(intent.target().unwrap().environment.as_deref(), Some("stg"));
    }

    #[test]
    fn lock_and_unlock_accept_every_preposition() {
        assert_eq!(
            DeployIntent::parse("lock app in stg"),
            DeployIntent::Lock(target("app", None, Some("stg")))
        );
        assert_eq!(
            DeployIntent::parse("unlock app on production"),
            DeployIntent::Unlock(target("app", None, Some("production")))
        );
        assert_eq!(
            DeployIntent::parse("lock app to qa").command(),
            Some(CommandKind::Lock)
        );
    }

    #[test]
    fn lock_is_never_forced() {
        let intent = DeployIntent::parse("lock! app in stg");
        assert_eq!(intent.command(), Some(CommandKind::Lock));
        assert!(!intent.is_forced());
    }

    #[test]
    fn slug_charset_is_restricted() {
        let intent = DeployIntent::parse("deploy my_app.v2-x to prod");
        assert_eq!(intent.app(), Some("my_app.v2-x"));
        assert_eq!(DeployIntent::parse("deploy MyApp"), DeployIntent::Unrecognized);
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert_eq!(DeployIntent::parse("Deploy myapp"), DeployIntent::Unrecognized);
    }

    #[test]
    fn unrelated_text_is_unrecognized() {
        let intent = DeployIntent::parse("where can i go for lunch");
        assert_eq!(intent, DeployIntent::Unrecognized);
        assert_eq!(intent.command(), None);
        assert_eq!(intent.app(), None);
        assert!(!intent.is_forced());
    }

    #[test]
    fn command_needs_whitespace_before_app() {
        assert_eq!(DeployIntent::parse("deploymyapp"), DeployIntent::Unrecognized);
    }

    #[test]
    fn task_labels() {
        assert_eq!(CommandKind::Deploy.task(), "deploy");
        assert_eq!(CommandKind::Lock.task(), "deploy:lock");
        assert_eq!(CommandKind::Unlock.task(), "deploy:unlock");
    }
}
