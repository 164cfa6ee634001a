//! Two-character move codes: a column letter `A`-`I` followed by a row digit
//! `1`-`7`, so `"I7"` is the bottom-right cell. A history is a plain
//! concatenation of codes, oldest first (e.g. `I7H7A3`).
use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::grid::{Cell, COLS, ROWS};
use crate::GameError;

pub fn encode(cell: Cell) -> String {
    cell.to_string()
}

/// Decodes a single code. Only the canonical upper-case form is accepted, so
/// `encode(decode(code)?) == code` holds for every code that decodes.
pub fn decode(code: &str) -> Result<Cell, GameError> {
    decode_at(code, 0)
}

fn decode_at(code: &str, offset: usize) -> Result<Cell, GameError> {
    let chars: Vec<char> = code.chars().collect();
    if chars.len() != 2 {
        return Err(GameError::ParseMove {
            position: offset,
            reason: format!("expected two characters, found {}", chars.len()),
        });
    }
    let letter = chars[0];
    let col = match letter {
        'A'..='Z' => letter as usize - 'A' as usize,
        _ => {
            return Err(GameError::ParseMove {
                position: offset,
                reason: format!("expected column letter, found {letter}"),
            })
        }
    };
    if col >= COLS {
        return Err(GameError::ParseMove {
            position: offset,
            reason: format!("column must be A-{}", (b'A' + COLS as u8 - 1) as char),
        });
    }
    let digit = chars[1];
    let row = match digit.to_digit(10) {
        Some(value) if (1..=ROWS as u32).contains(&value) => value as usize - 1,
        _ => {
            return Err(GameError::ParseMove {
                position: offset + 1,
                reason: format!("row must be 1-{ROWS}, found {digit}"),
            })
        }
    };
    Cell::new(row, col)
}

pub fn parse_history(history: &str) -> Result<Vec<Cell>, GameError> {
    let history = history.trim();
    let chars: Vec<char> = history.chars().collect();
    if chars.len() % 2 != 0 {
        return Err(GameError::ParseMove {
            position: chars.len(),
            reason: "missing row digit".to_string(),
        });
    }
    chars
        .chunks(2)
        .enumerate()
        .map(|(idx, pair)| {
            let code: String = pair.iter().collect();
            decode_at(&code, idx * 2)
        })
        .collect()
}

pub fn format_history(moves: &[Cell]) -> String {
    moves.iter().map(|cell| encode(*cell)).collect()
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = (b'A' + self.col as u8) as char;
        write!(f, "{letter}{}", self.row + 1)
    }
}

impl FromStr for Cell {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode(s)
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Cell {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        decode(&code).map_err(de::Error::custom)
    }
}
