// Copyright 2025 Jonas Kruckenberg
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use core::fmt;
use core::str::FromStr;

use treemap::{Count, Key};

/// A single line of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Increase { id: Key, amount: Count },
    Reduce { id: Key, amount: Count },
    Count { id: Key },
    InRange { low: Key, high: Key },
    Next { id: Key },
    Previous { id: Key },
    LevelOrder,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    UnknownCommand(String),
    MissingArgument(&'static str),
    InvalidInteger {
        name: &'static str,
        value: String,
    },
    UnexpectedArgument(String),
    NonPositiveAmount(Count),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnknownCommand(command) => write!(f, "unknown command `{command}`"),
            ParseError::MissingArgument(name) => write!(f, "missing argument <{name}>"),
            ParseError::InvalidInteger { name, value } => {
                write!(f, "<{name}> should be an integer, but was `{value}`")
            }
            ParseError::UnexpectedArgument(arg) => write!(f, "unexpected argument `{arg}`"),
            ParseError::NonPositiveAmount(amount) => {
                write!(f, "<count> must be greater than 0, but was {amount}")
            }
        }
    }
}

impl core::error::Error for ParseError {}

struct Args<'a> {
    words: core::str::SplitWhitespace<'a>,
}

impl Args<'_> {
    fn integer(&mut self, name: &'static str) -> Result<i64, ParseError> {
        let word = self
            .words
            .next()
            .ok_or(ParseError::MissingArgument(name))?;

        word.parse().map_err(|_| ParseError::InvalidInteger {
            name,
            value: word.to_string(),
        })
    }

    fn amount(&mut self) -> Result<Count, ParseError> {
        let amount = self.integer("count")?;
        if amount <= 0 {
            return Err(ParseError::NonPositiveAmount(amount));
        }
        Ok(amount)
    }

    fn finish(mut self, command: Command) -> Result<Command, ParseError> {
        match self.words.next() {
            Some(extra) => Err(ParseError::UnexpectedArgument(extra.to_string())),
            None => Ok(command),
        }
    }
}

impl FromStr for Command {
    type Err = ParseError;

    /// Parses a command line. Command names are matched case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let name = words.next().unwrap_or_default();
        let mut args = Args { words };

        let command = match name.to_ascii_lowercase().as_str() {
            "increase" => Command::Increase {
                id: args.integer("id")?,
                amount: args.amount()?,
            },
            "reduce" => Command::Reduce {
                id: args.integer("id")?,
                amount: args.amount()?,
            },
            "count" => Command::Count {
                id: args.integer("id")?,
            },
            "inrange" => Command::InRange {
                low: args.integer("id1")?,
                high: args.integer("id2")?,
            },
            "next" => Command::Next {
                id: args.integer("id")?,
            },
            "previous" => Command::Previous {
                id: args.integer("id")?,
            },
            "levelorder" => Command::LevelOrder,
            "help" => Command::Help,
            "quit" => Command::Quit,
            _ => return Err(ParseError::UnknownCommand(name.to_string())),
        };

        args.finish(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_commands() {
        assert_eq!(
            "increase 5 10".parse(),
            Ok(Command::Increase { id: 5, amount: 10 })
        );
        assert_eq!(
            "reduce -3 1".parse(),
            Ok(Command::Reduce { id: -3, amount: 1 })
        );
        assert_eq!("count 7".parse(), Ok(Command::Count { id: 7 }));
        assert_eq!(
            "inrange 1 100".parse(),
            Ok(Command::InRange { low: 1, high: 100 })
        );
        assert_eq!("next 0".parse(), Ok(Command::Next { id: 0 }));
        assert_eq!("previous 9".parse(), Ok(Command::Previous { id: 9 }));
        assert_eq!("levelorder".parse(), Ok(Command::LevelOrder));
        assert_eq!("help".parse(), Ok(Command::Help));
        assert_eq!("quit".parse(), Ok(Command::Quit));
    }

    #[test]
    fn names_are_case_insensitive() {
        assert_eq!(
            "InRange 1 2".parse(),
            Ok(Command::InRange { low: 1, high: 2 })
        );
        assert_eq!("QUIT".parse(), Ok(Command::Quit));
        assert_eq!("  LevelOrder  ".parse(), Ok(Command::LevelOrder));
    }

    #[test]
    fn inverted_range_parses() {
        // rejected by the tree, not the parser
        assert_eq!(
            "inrange 10 5".parse(),
            Ok(Command::InRange { low: 10, high: 5 })
        );
    }

    #[test]
    fn errors() {
        assert_eq!(
            "frobnicate 1".parse::<Command>(),
            Err(ParseError::UnknownCommand("frobnicate".to_string()))
        );
        assert_eq!(
            "count".parse::<Command>(),
            Err(ParseError::MissingArgument("id"))
        );
        assert_eq!(
            "increase 1 x".parse::<Command>(),
            Err(ParseError::InvalidInteger {
                name: "count",
                value: "x".to_string()
            })
        );
        assert_eq!(
            "next 1 2".parse::<Command>(),
            Err(ParseError::UnexpectedArgument("2".to_string()))
        );
        assert_eq!(
            "increase 1 0".parse::<Command>(),
            Err(ParseError::NonPositiveAmount(0))
        );
        assert_eq!(
            "reduce 1 -4".parse::<Command>(),
            Err(ParseError::NonPositiveAmount(-4))
        );
        assert_eq!(
            "count 99999999999999999999".parse::<Command>(),
            Err(ParseError::InvalidInteger {
                name: "id",
                value: "99999999999999999999".to_string()
            })
        );
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            ParseError::MissingArgument("id2").to_string(),
            "missing argument <id2>"
        );
        assert_eq!(
            ParseError::NonPositiveAmount(-1).to_string(),
            "<count> must be greater than 0, but was -1"
        );
    }
}
