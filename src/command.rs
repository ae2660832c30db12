//! Command symbols understood by the rover.

use crate::error::ParseSymbolError;
use crate::observer::Movement;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single motion primitive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Step one cell along the heading (`F`).
    Forward,
    /// Step one cell against the heading (`B`).
    Backward,
    /// Rotate a quarter turn counter-clockwise (`L`).
    TurnLeft,
    /// Rotate a quarter turn clockwise (`R`).
    TurnRight,
}

/// Symbol table, upper-case. Lookups fold case first.
const SYMBOLS: [(char, Command); 4] = [
    ('F', Command::Forward),
    ('B', Command::Backward),
    ('L', Command::TurnLeft),
    ('R', Command::TurnRight),
];

impl Command {
    pub const ALL: [Command; 4] = [
        Command::Forward,
        Command::Backward,
        Command::TurnLeft,
        Command::TurnRight,
    ];

    /// Looks up a symbol, ignoring case. Returns `None` for anything that is
    /// not one of `F`, `B`, `L`, `R`.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        let symbol = symbol.to_ascii_uppercase();
        SYMBOLS
            .iter()
            .find(|(s, _)| *s == symbol)
            .map(|&(_, cmd)| cmd)
    }

    /// The canonical upper-case symbol.
    pub fn symbol(self) -> char {
        match self {
            Self::Forward => 'F',
            Self::Backward => 'B',
            Self::TurnLeft => 'L',
            Self::TurnRight => 'R',
        }
    }

    /// The movement label observers receive for this command.
    pub fn movement(self) -> Movement {
        match self {
            Self::Forward => Movement::Forward,
            Self::Backward => Movement::Backward,
            Self::TurnLeft => Movement::Left,
            Self::TurnRight => Movement::Right,
        }
    }

    /// True for commands that change position and can therefore collide.
    pub fn is_move(self) -> bool {
        matches!(self, Self::Forward | Self::Backward)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Command {
    type Err = ParseSymbolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let parsed = match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_symbol(c),
            _ => None,
        };
        parsed.ok_or_else(|| ParseSymbolError {
            kind: "command",
            symbol: s.to_owned(),
        })
    }
}

/// Parses a command string leniently: unknown symbols are dropped.
pub fn parse_commands(commands: &str) -> Vec<Command> {
    commands.chars().filter_map(Command::from_symbol).collect()
}

/// Renders a command sequence back into its symbol string.
pub fn format_commands(commands: &[Command]) -> String {
    commands.iter().map(|c| c.symbol()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_are_case_insensitive() {
        assert_eq!(Command::from_symbol('f'), Some(Command::Forward));
        assert_eq!(Command::from_symbol('B'), Some(Command::Backward));
        assert_eq!(Command::from_symbol('l'), Some(Command::TurnLeft));
        assert_eq!(Command::from_symbol('R'), Some(Command::TurnRight));
    }

    #[test]
    fn unknown_symbols_are_dropped() {
        assert_eq!(
            parse_commands("fx?b  Lr9"),
            vec![
                Command::Forward,
                Command::Backward,
                Command::TurnLeft,
                Command::TurnRight
            ]
        );
        assert!(parse_commands("xyz").is_empty());
    }

    #[test]
    fn strict_parse_rejects_unknown_and_multi_char() {
        assert_eq!("r".parse::<Command>(), Ok(Command::TurnRight));
        assert!("Q".parse::<Command>().is_err());
        assert!("FF".parse::<Command>().is_err());
        assert!("".parse::<Command>().is_err());
    }

    #[test]
    fn format_uses_canonical_symbols() {
        assert_eq!(format_commands(&parse_commands("fblr")), "FBLR");
    }
}
