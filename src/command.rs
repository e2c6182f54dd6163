use std::{fmt, str::FromStr};

use crate::GitInjectError;

/// Commands accepted by `-cmd`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Print usage
    Help,
    /// Print the resolved commit hash and version
    Show,
    /// Write the resolved commit hash and version to the generated directory
    Gen,
}

impl FromStr for Command {
    type Err = GitInjectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "help" => Ok(Self::Help),
            "show" => Ok(Self::Show),
            "gen" => Ok(Self::Gen),
            _ => Err(GitInjectError::InvalidCommand(s.to_string())),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Help => "help",
            Self::Show => "show",
            Self::Gen => "gen",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("help", Command::Help)]
    #[test_case("show", Command::Show)]
    #[test_case("gen", Command::Gen)]
    fn test_parse(s: &str, expected: Command) {
        assert_eq!(expected, s.parse().unwrap());
        assert_eq!(s, expected.to_string());
    }

    #[test_case("init"; "unsupported")]
    #[test_case("Show"; "case sensitive")]
    #[test_case(""; "empty")]
    fn test_parse_invalid(s: &str) {
        let err = s.parse::<Command>().unwrap_err();
        assert_eq!(format!("Invalid command: {s}"), err.to_string());
    }
}
