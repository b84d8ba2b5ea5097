//! Line commands of the interactive dashboard session.

use std::str::FromStr;

use crate::error::DashboardError;

/// What the operator can type at the session prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// `select India, Pakistan`; `select` alone clears the selection.
    Select(Vec<String>),
    SelectAll,
    ClearCache,
    Render,
    Summary,
    Help,
    Quit,
}

pub const HELP: &str = "commands: select <country,...> | select-all | clear-cache | render | summary | help | quit";

impl FromStr for SessionCommand {
    type Err = DashboardError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (command, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));

        match command.to_ascii_lowercase().as_str() {
            "select" => Ok(SessionCommand::Select(
                rest.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect(),
            )),
            "select-all" => Ok(SessionCommand::SelectAll),
            "clear-cache" => Ok(SessionCommand::ClearCache),
            "render" => Ok(SessionCommand::Render),
            "summary" => Ok(SessionCommand::Summary),
            "help" | "?" => Ok(SessionCommand::Help),
            "quit" | "exit" => Ok(SessionCommand::Quit),
            other => Err(DashboardError::InvalidConfig(format!(
                "unknown command '{other}'; {HELP}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_select_list() {
        let cmd: SessionCommand = "select United States, India".parse().unwrap();
        assert_eq!(
            cmd,
            SessionCommand::Select(vec!["United States".to_string(), "India".to_string()])
        );
    }

    #[test]
    fn test_parse_empty_select() {
        assert_eq!("select".parse::<SessionCommand>().unwrap(), SessionCommand::Select(vec![]));
    }

    #[test]
    fn test_parse_keywords() {
        assert_eq!("  clear-cache ".parse::<SessionCommand>().unwrap(), SessionCommand::ClearCache);
        assert_eq!("RENDER".parse::<SessionCommand>().unwrap(), SessionCommand::Render);
        assert_eq!("exit".parse::<SessionCommand>().unwrap(), SessionCommand::Quit);
        assert_eq!("select-all".parse::<SessionCommand>().unwrap(), SessionCommand::SelectAll);
    }

    #[test]
    fn test_parse_unknown() {
        assert!("plot everything".parse::<SessionCommand>().is_err());
    }
}
