//! Terminal output: ANSI styling for bot replies and status notes.

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Check if the terminal supports color output.
pub fn supports_color() -> bool {
    std::env::var("NO_COLOR").is_err()
        && (std::env::var("COLORTERM").is_ok()
            || std::env::var("TERM")
                .map(|t| t != "dumb")
                .unwrap_or(false))
}

/// Render one bot reply, one output line per reply line.
pub fn format_reply(reply: &str, color: bool) -> String {
    reply
        .lines()
        .map(|line| {
            if color {
                format!("{CYAN}{BOLD}deploybot>{RESET} {line}")
            } else {
                format!("deploybot> {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn print_reply(reply: &str) {
    println!("{}", format_reply(reply, supports_color()));
}

pub fn prompt(color: bool) -> String {
    if color {
        format!("{DIM}>{RESET} ")
    } else {
        "> ".to_string()
    }
}

pub fn note_warn(msg: &str) {
    if supports_color() {
        println!("{YELLOW}{BOLD}⚠{RESET} {msg}");
    } else {
        println!("WARN: {msg}");
    }
}

pub fn note_error(msg: &str) {
    if supports_color() {
        eprintln!("{RED}{BOLD}✗{RESET} {msg}");
    } else {
        eprintln!("ERROR: {msg}");
    }
}

pub fn note_success(msg: &str) {
    if supports_color() {
        println!("{GREEN}{BOLD}✓{RESET} {msg}");
    } else {
        println!("OK: {msg}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_every_reply_line() {
        let out = format_reply("*staging*: a\n*production*: b", false);
        assert_eq!(out, "deploybot> *staging*: a\ndeploybot> *production*: b");
    }

    #[test]
    fn colors_the_prefix_only() {
        let out = format_reply("hi", true);
        assert!(out.starts_with(CYAN));
        assert!(out.ends_with(" hi"));
    }
}
