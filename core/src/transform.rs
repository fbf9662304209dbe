// SPDX-License-Identifier: MIT OR Apache-2.0

//! Coordinate transforms: board rotation, notation coordinates and the
//! swap (pie rule) reflection.
//!
//! Internal coordinates run from `1` to `2N+1` on both axes with `y`
//! growing downwards. Notation columns are letters (`A` is column 1);
//! notation rows depend on the [`Origin`] the record came from.

use crate::sgf::FormatError;
use crate::{Move, Point};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Source convention a game record was written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Origin {
    /// conhex.com: rows numbered top to bottom
    #[default]
    #[serde(rename = "conhex.com")]
    ConhexCom,
    /// Little Golem: rows numbered bottom to top
    #[serde(rename = "little-golem")]
    LittleGolem,
}

impl Origin {
    pub const ALL: [Origin; 2] = [Origin::ConhexCom, Origin::LittleGolem];

    pub fn as_str(&self) -> &'static str {
        match self {
            Origin::ConhexCom => "conhex.com",
            Origin::LittleGolem => "little-golem",
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An origin name outside the supported set
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unsupported origin {0:?}")]
pub struct UnsupportedOriginError(pub String);

impl FromStr for Origin {
    type Err = UnsupportedOriginError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "conhex.com" => Ok(Origin::ConhexCom),
            "little-golem" => Ok(Origin::LittleGolem),
            other => Err(UnsupportedOriginError(other.to_string())),
        }
    }
}

/// Sum of the first and last coordinate on an axis (`2N + 2`)
pub fn coordinate_span(size: u8) -> i32 {
    2 * i32::from(size) + 2
}

/// Rotate a point 90 degrees clockwise `rotations` times around the board
/// center `(size + 1, size + 1)`.
pub fn rotate_clockwise(point: Point, rotations: u32, size: u8) -> Point {
    let offset = i32::from(size) + 1;
    let (x, y) = rotate_offset(point.x - offset, point.y - offset, rotations);
    Point::new(x + offset, y + offset)
}

/// Same rotation in doubled coordinates, for half-lattice points such as
/// tile centers. `doubled` holds `(2x, 2y)`.
pub(crate) fn rotate_doubled(doubled: (i32, i32), rotations: u32, size: u8) -> (i32, i32) {
    let offset = 2 * (i32::from(size) + 1);
    let (x, y) = rotate_offset(doubled.0 - offset, doubled.1 - offset, rotations);
    (x + offset, y + offset)
}

fn rotate_offset(x: i32, y: i32, rotations: u32) -> (i32, i32) {
    (0..rotations % 4).fold((x, y), |(x, y), _| (y, -x))
}

/// Notation row for an internal row
fn notation_row(y: i32, origin: Origin, size: u8) -> i32 {
    match origin {
        Origin::ConhexCom => y,
        Origin::LittleGolem => coordinate_span(size) - y,
    }
}

/// Internal row for a notation row. The mapping is its own inverse.
fn internal_row(row: i32, origin: Origin, size: u8) -> i32 {
    notation_row(row, origin, size)
}

/// Convert an internal point into the letter+number notation, e.g. `J3`
pub fn to_notation_coordinate(point: Point, origin: Origin, size: u8) -> String {
    let column = u8::try_from(point.x - 1)
        .ok()
        .filter(|c| *c < 26)
        .map(|c| char::from(b'A' + c));
    let row = notation_row(point.y, origin, size);
    match column {
        Some(letter) => format!("{}{}", letter, row),
        // Off-board columns have no letter; keep them readable in logs
        None => format!("#{}:{}", point.x, row),
    }
}

/// Parse a `<Letter><Digits>` coordinate into an internal point
pub fn from_notation_coordinate(text: &str, origin: Origin, size: u8) -> Result<Point, FormatError> {
    let invalid = || FormatError::InvalidMove(text.to_string());

    let mut chars = text.chars();
    let letter = chars.next().filter(|c| c.is_ascii_alphabetic()).ok_or_else(invalid)?;
    let digits = chars.as_str();
    if digits.is_empty() || digits.len() > 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let row: i32 = digits.parse().map_err(|_| invalid())?;

    let x = i32::from(letter.to_ascii_uppercase() as u8 - b'A') + 1;
    Ok(Point::new(x, internal_row(row, origin, size)))
}

/// Reflect a point across the swap axis of `origin`.
///
/// Each source reflects across the main diagonal of its own numbering. For
/// conhex.com that is the internal main diagonal; Little Golem counts rows
/// from the bottom, so its diagonal is the internal anti-diagonal.
pub fn reflect_for_swap(point: Point, size: u8, origin: Origin) -> Point {
    match origin {
        Origin::ConhexCom => Point::new(point.y, point.x),
        Origin::LittleGolem => {
            let span = coordinate_span(size);
            Point::new(span - point.y, span - point.x)
        }
    }
}

/// Realize the pie rule on a played node: reflect it and flip its side.
/// Special moves are returned unchanged.
pub fn compute_swap_move(mv: &Move, size: u8, origin: Origin) -> Move {
    match *mv {
        Move::Place { x, y, side } => {
            Move::place(reflect_for_swap(Point::new(x, y), size, origin), side.opposite())
        }
        Move::Swap | Move::Resign => *mv,
    }
}

/// Label for a move list entry
pub fn notation_label(mv: &Move, origin: Origin, size: u8) -> String {
    match mv {
        Move::Place { x, y, .. } => to_notation_coordinate(Point::new(*x, *y), origin, size),
        Move::Swap => "swap".to_string(),
        Move::Resign => "resign".to_string(),
    }
}
