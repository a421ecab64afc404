//! Session command parsing.

/// One line of session input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Anything that is not a `:` command; empty means "my own address".
    Submit(String),
    ToggleTheme,
    ClearHistory,
    ShowHistory,
    Help,
    Quit,
}

pub const HELP: &str = "\
Type an IP address or domain and press Enter (empty line: your own address).
  :theme    toggle light/dark
  :history  show recent searches
  :clear    clear search history
  :help     show this help
  :quit     exit";

pub fn parse_command(line: &str) -> Command {
    let trimmed = line.trim();
    match trimmed {
        ":theme" | ":t" => Command::ToggleTheme,
        ":clear" | ":c" => Command::ClearHistory,
        ":history" | ":h" => Command::ShowHistory,
        ":help" | ":?" => Command::Help,
        ":quit" | ":q" | ":exit" => Command::Quit,
        other => Command::Submit(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_command(":theme"), Command::ToggleTheme);
        assert_eq!(parse_command(" :q "), Command::Quit);
        assert_eq!(parse_command(":clear"), Command::ClearHistory);
        assert_eq!(parse_command(":history"), Command::ShowHistory);
        assert_eq!(parse_command(":?"), Command::Help);
    }

    #[test]
    fn test_parse_submit() {
        assert_eq!(
            parse_command("8.8.8.8\n"),
            Command::Submit("8.8.8.8".to_string())
        );
        assert_eq!(parse_command(""), Command::Submit(String::new()));
        // Unknown commands go to validation like any other text
        assert_eq!(
            parse_command(":bogus"),
            Command::Submit(":bogus".to_string())
        );
    }
}
