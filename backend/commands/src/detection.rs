//! Command detection: identify bot commands in inbound messages.
use crate::registry::CommandRegistry;
use crate::types::CommandInvocation;

/// Detect a command at the start of a message.
/// Returns `None` if the message is ordinary chatter.
pub fn detect_command(text: &str, registry: &CommandRegistry) -> Option<CommandInvocation> {
    let trimmed = text.trim();
    let (def, prefix_end) = registry.find_route(trimmed)?;
    let rest = &trimmed[prefix_end..];

    Some(CommandInvocation {
        key: def.key.clone(),
        args: rest.split_whitespace().map(str::to_string).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_deploy_with_args() {
        let registry = CommandRegistry::new();
        let inv = detect_command("  deploy myapp/branch to staging ", &registry).unwrap();
        assert_eq!(inv.key, "deploy");
        assert_eq!(inv.args, vec!["myapp/branch", "to", "staging"]);
    }

    #[test]
    fn long_wcid_form_puts_app_first() {
        let registry = CommandRegistry::new();
        let inv = detect_command("where can I deploy myapp", &registry).unwrap();
        assert_eq!(inv.key, "wcid");
        assert_eq!(inv.args, vec!["myapp"]);
    }

    #[test]
    fn help_takes_no_args() {
        let registry = CommandRegistry::new();
        let inv = detect_command("help", &registry).unwrap();
        assert_eq!(inv.key, "help");
        assert!(inv.args.is_empty());
    }

    #[test]
    fn bare_command_word_is_not_a_command() {
        let registry = CommandRegistry::new();
        assert!(detect_command("deploy", &registry).is_none());
        assert!(detect_command("good morning", &registry).is_none());
    }
}
