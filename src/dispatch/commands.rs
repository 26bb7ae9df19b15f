//! Slash commands (`/start`, `/help`).
//!
//! Commands never reach the rule table: known ones get a fixed reply and
//! unknown ones are ignored.

/// A recognized slash command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    Start,
    Help,
    Other(&'a str),
}

/// Parse a leading `/command`, optionally addressed as `/command@botname`.
/// Returns `None` for text that is not a command.
pub fn parse_command(text: &str) -> Option<Command<'_>> {
    let rest = text.trim_start().strip_prefix('/')?;
    let word = rest.split_whitespace().next().unwrap_or("");
    let name = word.split('@').next().unwrap_or(word);

    Some(if name.eq_ignore_ascii_case("start") {
        Command::Start
    } else if name.eq_ignore_ascii_case("help") {
        Command::Help
    } else {
        Command::Other(name)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_start() {
        assert_eq!(parse_command("/start"), Some(Command::Start));
        assert_eq!(parse_command("  /start@MushafBot"), Some(Command::Start));
        assert_eq!(parse_command("/START payload"), Some(Command::Start));
    }

    #[test]
    fn parses_help() {
        assert_eq!(parse_command("/help"), Some(Command::Help));
    }

    #[test]
    fn unknown_command() {
        assert_eq!(parse_command("/settings"), Some(Command::Other("settings")));
        assert_eq!(parse_command("/"), Some(Command::Other("")));
    }

    #[test]
    fn plain_text_is_not_a_command() {
        assert_eq!(parse_command("45"), None);
        assert_eq!(parse_command("ترتيل 45"), None);
        assert_eq!(parse_command("a/b"), None);
    }
}
