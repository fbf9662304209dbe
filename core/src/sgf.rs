// SPDX-License-Identifier: MIT OR Apache-2.0

//! ConHex game records in SGF-like notation
//!
//! ```text
//! (;FF[CONHEX]VA[CONHEX]EV[event]PB[first]PW[second]SO[source]
//! ;B[J3];R[H5];B[I6];R[resign])
//! ```
//!
//! The root node must start with the six header fields in that order. Every
//! following node is one move: `B` for the first player, `R` or `W` for the
//! second, with a coordinate, `swap` or `resign` as payload.

use crate::rules::next_side;
use crate::transform::{from_notation_coordinate, to_notation_coordinate};
use crate::{GameState, GameType, Move, Origin, Player, Point, Side, DEFAULT_BOARD_SIZE};
use std::iter::Peekable;
use std::str::Chars;
use thiserror::Error;

/// Header fields, in the order a record must list them
const HEADER_FIELDS: [&str; 6] = ["FF", "VA", "EV", "PB", "PW", "SO"];

/// Game identifier expected in the FF and VA fields
const GAME_NAME: &str = "conhex";

/// Malformed game record
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("Expected {0}")]
    Expected(&'static str),

    #[error("Unterminated value for property {0}")]
    Unterminated(String),

    #[error("Missing header field {expected}, found {found:?}")]
    MissingField {
        expected: &'static str,
        found: Option<String>,
    },

    #[error("{field} field does not name ConHex: {value:?}")]
    NotConhex { field: &'static str, value: String },

    #[error("Unknown side marker {0:?}")]
    UnknownSide(String),

    #[error("Invalid move token {0:?}")]
    InvalidMove(String),

    #[error("Move {0} has no properties")]
    EmptyNode(usize),
}

/// Represents a notation property
#[derive(Debug, Clone)]
struct SgfProperty {
    id: String,
    values: Vec<String>,
}

impl SgfProperty {
    fn value(&self) -> &str {
        self.values.first().map(|v| v.trim()).unwrap_or("")
    }
}

/// Represents a notation node
#[derive(Debug, Clone)]
struct SgfNode {
    properties: Vec<SgfProperty>,
}

/// Reads and writes ConHex game records
#[derive(Debug, Clone, Copy)]
pub struct SgfProcessor {
    origin: Origin,
    board_size: u8,
}

/// Parse a record from `origin` on the default board size
pub fn parse_game(text: &str, origin: Origin) -> Result<GameState, FormatError> {
    SgfProcessor::new(origin, DEFAULT_BOARD_SIZE).parse(text)
}

impl SgfProcessor {
    pub fn new(origin: Origin, board_size: u8) -> Self {
        Self { origin, board_size }
    }

    /// Parse a record into a game. Newlines anywhere are ignored.
    pub fn parse(&self, text: &str) -> Result<GameState, FormatError> {
        let text: String = text.chars().filter(|c| *c != '\n' && *c != '\r').collect();
        let nodes = self.parse_record(&mut text.chars().peekable())?;

        let (root, move_nodes) = nodes.split_first().ok_or(FormatError::MissingField {
            expected: HEADER_FIELDS[0],
            found: None,
        })?;
        let [_, _, event, first, second, source] = self.read_header(root)?;

        let main_branch = move_nodes
            .iter()
            .enumerate()
            .map(|(i, node)| self.parse_move(i + 1, node))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!(
            origin = %self.origin,
            event = %event,
            moves = main_branch.len(),
            "Parsed game record"
        );

        Ok(GameState {
            kind: GameType::Review,
            origin: self.origin,
            players: vec![
                Player { name: first, side: Side::First },
                Player { name: second, side: Side::Second },
            ],
            board_size: self.board_size,
            event,
            source,
            main_branch,
        })
    }

    /// Parse the outer `( ... )` and the node sequence inside it
    fn parse_record(&self, chars: &mut Peekable<Chars>) -> Result<Vec<SgfNode>, FormatError> {
        self.skip_whitespace(chars);
        if chars.next() != Some('(') {
            return Err(FormatError::Expected("'(' at start of record"));
        }

        let mut nodes = Vec::new();
        self.skip_whitespace(chars);
        while chars.peek() == Some(&';') {
            nodes.push(self.parse_node(chars)?);
            self.skip_whitespace(chars);
        }

        if chars.next() != Some(')') {
            return Err(FormatError::Expected("')' at end of record"));
        }
        self.skip_whitespace(chars);
        if chars.peek().is_some() {
            return Err(FormatError::Expected("end of text after record"));
        }
        Ok(nodes)
    }

    fn parse_node(&self, chars: &mut Peekable<Chars>) -> Result<SgfNode, FormatError> {
        if chars.next() != Some(';') {
            return Err(FormatError::Expected("';' at start of node"));
        }

        let mut properties = Vec::new();
        self.skip_whitespace(chars);
        while let Some(&c) = chars.peek() {
            if c.is_ascii_alphabetic() {
                properties.push(self.parse_property(chars)?);
                self.skip_whitespace(chars);
            } else {
                break;
            }
        }

        Ok(SgfNode { properties })
    }

    fn parse_property(&self, chars: &mut Peekable<Chars>) -> Result<SgfProperty, FormatError> {
        let mut id = String::new();
        while let Some(c) = chars.next_if(|c| c.is_ascii_alphabetic()) {
            id.push(c);
        }

        self.skip_whitespace(chars);
        let mut values = Vec::new();
        while chars.peek() == Some(&'[') {
            values.push(self.parse_property_value(&id, chars)?);
            self.skip_whitespace(chars);
        }

        Ok(SgfProperty { id, values })
    }

    fn parse_property_value(&self, id: &str, chars: &mut Peekable<Chars>) -> Result<String, FormatError> {
        if chars.next() != Some('[') {
            return Err(FormatError::Expected("'[' at start of value"));
        }

        let mut value = String::new();
        let mut escaped = false;
        for c in chars.by_ref() {
            if escaped {
                value.push(c);
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == ']' {
                return Ok(value);
            } else {
                value.push(c);
            }
        }
        Err(FormatError::Unterminated(id.to_string()))
    }

    fn skip_whitespace(&self, chars: &mut Peekable<Chars>) {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
    }

    /// Values of the six header fields, checked for order and game name
    fn read_header(&self, root: &SgfNode) -> Result<[String; 6], FormatError> {
        let mut values: [String; 6] = Default::default();
        for (i, expected) in HEADER_FIELDS.iter().enumerate() {
            match root.properties.get(i) {
                Some(p) if p.id == *expected => values[i] = p.value().to_string(),
                other => {
                    return Err(FormatError::MissingField {
                        expected: *expected,
                        found: other.map(|p| p.id.clone()),
                    })
                }
            }
        }
        if root.properties.len() > HEADER_FIELDS.len() {
            tracing::debug!(
                extra = root.properties.len() - HEADER_FIELDS.len(),
                "Ignoring extra header properties"
            );
        }

        for (field, value) in HEADER_FIELDS.iter().zip(values.iter()).take(2) {
            if !value.to_lowercase().contains(GAME_NAME) {
                return Err(FormatError::NotConhex {
                    field: *field,
                    value: value.clone(),
                });
            }
        }
        Ok(values)
    }

    /// One move node: a side marker with a coordinate, swap or resign
    fn parse_move(&self, number: usize, node: &SgfNode) -> Result<Move, FormatError> {
        let first = node.properties.first().ok_or(FormatError::EmptyNode(number))?;
        let property = node
            .properties
            .iter()
            .find(|p| is_move_property(&p.id))
            .ok_or_else(|| FormatError::UnknownSide(first.id.clone()))?;

        let side = match property.id.to_ascii_lowercase().as_str() {
            "resign" => return Ok(Move::Resign),
            "swap" => return Ok(Move::Swap),
            "b" => Side::First,
            // Both letters mark the second player depending on the site
            _ => Side::Second,
        };

        let payload = property.value();
        match payload.to_ascii_lowercase().as_str() {
            "resign" => Ok(Move::Resign),
            "swap" => Ok(Move::Swap),
            _ => {
                let point = from_notation_coordinate(payload, self.origin, self.board_size)?;
                Ok(Move::place(point, side))
            }
        }
    }

    /// Write `game` back out in the same dialect
    pub fn generate(game: &GameState) -> String {
        let name = |side: Side| game.player(side).map(|p| p.name.as_str()).unwrap_or("");

        let mut sgf = String::from("(;FF[CONHEX]VA[CONHEX]");
        sgf.push_str(&format!("EV[{}]", escape(&game.event)));
        sgf.push_str(&format!("PB[{}]", escape(name(Side::First))));
        sgf.push_str(&format!("PW[{}]", escape(name(Side::Second))));
        sgf.push_str(&format!("SO[{}]", escape(&game.source)));

        for (i, mv) in game.main_branch.iter().enumerate() {
            let side = mv.side().unwrap_or_else(|| next_side(&game.main_branch[..i]));
            let marker = match side {
                Side::First => 'B',
                Side::Second => 'R',
            };
            let payload = match mv {
                Move::Place { x, y, .. } => {
                    to_notation_coordinate(Point::new(*x, *y), game.origin, game.board_size)
                }
                Move::Swap => "swap".to_string(),
                Move::Resign => "resign".to_string(),
            };
            sgf.push_str(&format!(";{}[{}]", marker, payload));
        }

        sgf.push(')');
        sgf
    }
}

fn is_move_property(id: &str) -> bool {
    matches!(id, "B" | "R" | "W") || id.eq_ignore_ascii_case("resign") || id.eq_ignore_ascii_case("swap")
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace(']', "\\]")
}
