//! Command registry: the commands the bot understands and how they route.
use regex::Regex;
use tracing::warn;

use crate::types::{CommandDef, HelpEntry};

fn help(usage: &str, description: &str) -> HelpEntry {
    HelpEntry {
        usage: usage.to_string(),
        description: description.to_string(),
    }
}

/// Build the built-in command list.
pub fn builtin_commands() -> Vec<CommandDef> {
    vec![
        CommandDef {
            key: "deploy".into(),
            routes: vec![r"^deploy!?\s+".into()],
            help: vec![
                help("deploy app", "Deploy app."),
                help("deploy app/ref", "Deploy app at specific ref (branch / sha / etc)"),
                help("deploy app to env", "Deploy app to environment"),
                help("deploy app/ref to env", "Deploy app at ref to environment"),
                help("deploy! app to env", "Force deploy app, ignoring CI and any locks"),
            ],
        },
        CommandDef {
            key: "lock".into(),
            routes: vec![r"^(un)?lock\s+".into()],
            help: vec![
                help("lock app in env", "Lock app in environment."),
                help("unlock app in env", "Unlock app in environment."),
            ],
        },
        CommandDef {
            key: "wcid".into(),
            routes: vec![r"(?i)^where can i deploy\s+".into(), r"^wcid\s+".into()],
            help: vec![
                help("where can i deploy <app>", "display latest deployment status for <app>"),
                help("wcid <app>", "display latest deployment status for <app>"),
            ],
        },
        CommandDef {
            key: "help".into(),
            routes: vec![r"^help(\s+|$)".into()],
            help: vec![help("help", "List the commands this bot understands")],
        },
    ]
}

/// Registry with route regexes compiled once.
#[derive(Clone)]
pub struct CommandRegistry {
    commands: Vec<(CommandDef, Vec<Regex>)>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::from_defs(builtin_commands())
    }

    /// Build a registry from explicit definitions. Routes that fail to
    /// compile are logged and skipped.
    pub fn from_defs(defs: Vec<CommandDef>) -> Self {
        let commands = defs
            .into_iter()
            .map(|def| {
                let routes = def
                    .routes
                    .iter()
                    .filter_map(|route| match Regex::new(route) {
                        Ok(re) => Some(re),
                        Err(e) => {
                            warn!(key = %def.key, route = %route, error = %e, "Skipping invalid command route");
                            None
                        }
                    })
                    .collect();
                (def, routes)
            })
            .collect();
        Self { commands }
    }

    pub fn all(&self) -> impl Iterator<Item = &CommandDef> {
        self.commands.iter().map(|(def, _)| def)
    }

    /// First command whose route matches `text`, with the byte offset where
    /// the route prefix ends.
    pub fn find_route(&self, text: &str) -> Option<(&CommandDef, usize)> {
        self.commands.iter().find_map(|(def, routes)| {
            routes
                .iter()
                .find_map(|re| re.find(text))
                .map(|m| (def, m.end()))
        })
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_keys_are_unique() {
        let registry = CommandRegistry::new();
        let mut keys: Vec<_> = registry.all().map(|d| d.key.as_str()).collect();
        let before = keys.len();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), before);
    }

    #[test]
    fn routes_deploy_and_forced_deploy() {
        let registry = CommandRegistry::new();
        assert_eq!(registry.find_route("deploy myapp").unwrap().0.key, "deploy");
        assert_eq!(registry.find_route("deploy! myapp to prod").unwrap().0.key, "deploy");
    }

    #[test]
    fn routes_lock_and_unlock() {
        let registry = CommandRegistry::new();
        assert_eq!(registry.find_route("lock myapp in stg").unwrap().0.key, "lock");
        assert_eq!(registry.find_route("unlock myapp in stg").unwrap().0.key, "lock");
    }

    #[test]
    fn routes_wcid_in_both_spellings() {
        let registry = CommandRegistry::new();
        assert_eq!(registry.find_route("where can i deploy myapp").unwrap().0.key, "wcid");
        assert_eq!(registry.find_route("where can I deploy myapp").unwrap().0.key, "wcid");
        assert_eq!(registry.find_route("wcid myapp").unwrap().0.key, "wcid");
    }

    #[test]
    fn route_offset_points_past_prefix() {
        let registry = CommandRegistry::new();
        let text = "where can I deploy myapp";
        let (_, end) = registry.find_route(text).unwrap();
        assert_eq!(&text[end..], "myapp");
    }

    #[test]
    fn ignores_chatter() {
        let registry = CommandRegistry::new();
        assert!(registry.find_route("we should deploy myapp later").is_none());
        assert!(registry.find_route("deployment went fine").is_none());
    }

    #[test]
    fn invalid_routes_are_skipped() {
        let registry = CommandRegistry::from_defs(vec![CommandDef {
            key: "broken".into(),
            routes: vec!["(".into()],
            help: vec![],
        }]);
        assert_eq!(registry.all().count(), 1);
        assert!(registry.find_route("(").is_none());
    }
}
