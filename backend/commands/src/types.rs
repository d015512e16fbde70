//! Chat command types.
use serde::{Deserialize, Serialize};

/// One line of help text: how to type it, what it does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpEntry {
    pub usage: String,
    pub description: String,
}

/// A command the bot answers to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandDef {
    /// Unique key the dispatcher routes on (e.g. "deploy", "wcid").
    pub key: String,
    /// Regexes matched against the start of the message; any match routes here.
    pub routes: Vec<String>,
    pub help: Vec<HelpEntry>,
}

/// A detected command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    pub key: String,
    /// Whitespace-separated words after the matched route prefix.
    pub args: Vec<String>,
}
