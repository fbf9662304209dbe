// SPDX-License-Identifier: MIT OR Apache-2.0

//! ConHex Core - Board Geometry and Game Rules
//!
//! This crate provides the core game functionality including:
//! - Board geometry generation (tiles, nodes, adjacency) for any board size
//! - Coordinate transforms between the internal lattice and game notations
//! - Move application with tile majority ownership and the swap (pie) rule
//! - Branch navigation over recorded and exploratory move sequences
//! - Parsing of ConHex game records in the SGF-like notation

#![deny(unsafe_code)]
#![deny(clippy::all)]

pub mod board;
pub mod config;
pub mod connection;
pub mod library;
pub mod logging;
pub mod navigator;
pub mod rules;
pub mod sgf;
pub mod snapshot;
pub mod transform;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub use board::{Board, Centroid, Tile};
pub use navigator::{BranchSource, Navigator};
pub use rules::{Engine, Position};
pub use sgf::{parse_game, FormatError, SgfProcessor};
pub use transform::{Origin, UnsupportedOriginError};

/// Board size used when a game record does not say otherwise
pub const DEFAULT_BOARD_SIZE: u8 = 5;

/// Smallest board the tiling rule produces a connected board for
pub const MIN_BOARD_SIZE: u8 = 2;

/// Largest board whose columns still fit in a single notation letter
pub const MAX_BOARD_SIZE: u8 = 12;

/// Player side in a ConHex game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// First player, connects the top and bottom edges
    First,
    /// Second player, connects the left and right edges
    Second,
}

impl Side {
    /// Returns the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }
}

/// Lattice point in board-internal coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Ownership state of a board vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeState {
    Empty,
    First,
    Second,
    /// Edge-closing polygon vertex, never playable
    Fake,
}

impl From<Side> for NodeState {
    fn from(side: Side) -> Self {
        match side {
            Side::First => NodeState::First,
            Side::Second => NodeState::Second,
        }
    }
}

/// Ownership state of a tile. Tiles are never fake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileState {
    Empty,
    First,
    Second,
}

impl TileState {
    /// The side owning the tile, if it has been decided
    pub fn owner(&self) -> Option<Side> {
        match self {
            TileState::Empty => None,
            TileState::First => Some(Side::First),
            TileState::Second => Some(Side::Second),
        }
    }
}

impl From<Side> for TileState {
    fn from(side: Side) -> Self {
        match side {
            Side::First => TileState::First,
            Side::Second => TileState::Second,
        }
    }
}

/// A board vertex with its ownership state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Node {
    pub x: i32,
    pub y: i32,
    pub state: NodeState,
}

impl Node {
    /// Create an unowned playable node
    pub const fn empty(x: i32, y: i32) -> Self {
        Self { x, y, state: NodeState::Empty }
    }

    /// Create an edge-closing node
    pub const fn fake(x: i32, y: i32) -> Self {
        Self { x, y, state: NodeState::Fake }
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Coordinate equality, ignoring state
    pub fn is_at(&self, point: Point) -> bool {
        self.x == point.x && self.y == point.y
    }
}

impl From<Point> for Node {
    fn from(p: Point) -> Self {
        Node::empty(p.x, p.y)
    }
}

/// Represents a move in the game
///
/// Serialized as a flat record tagged by `state`:
/// `{"state":"first","x":10,"y":9}`, `{"state":"swap"}`, `{"state":"resign"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "MoveRecord", into = "MoveRecord")]
pub enum Move {
    /// A played node
    Place { x: i32, y: i32, side: Side },
    /// Pie rule: take over the first move instead of playing elsewhere
    Swap,
    /// Resign the game
    Resign,
}

impl Move {
    pub const fn place(point: Point, side: Side) -> Self {
        Move::Place { x: point.x, y: point.y, side }
    }

    /// Coordinates of a played node
    pub fn point(&self) -> Option<Point> {
        match self {
            Move::Place { x, y, .. } => Some(Point::new(*x, *y)),
            Move::Swap | Move::Resign => None,
        }
    }

    /// Side of a played node
    pub fn side(&self) -> Option<Side> {
        match self {
            Move::Place { side, .. } => Some(*side),
            Move::Swap | Move::Resign => None,
        }
    }

    pub fn is_special(&self) -> bool {
        matches!(self, Move::Swap | Move::Resign)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
enum MoveRecord {
    First { x: i32, y: i32 },
    Second { x: i32, y: i32 },
    Swap,
    Resign,
}

impl From<MoveRecord> for Move {
    fn from(record: MoveRecord) -> Self {
        match record {
            MoveRecord::First { x, y } => Move::Place { x, y, side: Side::First },
            MoveRecord::Second { x, y } => Move::Place { x, y, side: Side::Second },
            MoveRecord::Swap => Move::Swap,
            MoveRecord::Resign => Move::Resign,
        }
    }
}

impl From<Move> for MoveRecord {
    fn from(mv: Move) -> Self {
        match mv {
            Move::Place { x, y, side: Side::First } => MoveRecord::First { x, y },
            Move::Place { x, y, side: Side::Second } => MoveRecord::Second { x, y },
            Move::Swap => MoveRecord::Swap,
            Move::Resign => MoveRecord::Resign,
        }
    }
}

/// Lifecycle of a game record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameType {
    Ongoing,
    Ended,
    /// Loaded from a record for study
    Review,
}

/// A named participant in a recorded game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub side: Side,
}

/// A full game record, as parsed from notation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    #[serde(rename = "type")]
    pub kind: GameType,
    /// Source convention the record was written in
    pub origin: Origin,
    pub players: Vec<Player>,
    pub board_size: u8,
    /// Event name from the record header
    #[serde(default)]
    pub event: String,
    /// Source (usually a URL) from the record header
    #[serde(default)]
    pub source: String,
    pub main_branch: Vec<Move>,
}

impl GameState {
    /// Create an empty game for interactive play
    pub fn new(board_size: u8, origin: Origin) -> Self {
        Self {
            kind: GameType::Ongoing,
            origin,
            players: Vec::new(),
            board_size,
            event: String::new(),
            source: String::new(),
            main_branch: Vec::new(),
        }
    }

    pub fn player(&self, side: Side) -> Option<&Player> {
        self.players.iter().find(|p| p.side == side)
    }

    /// Whether the record opens with the pie rule
    pub fn is_swapped(&self) -> bool {
        matches!(self.main_branch.get(1), Some(Move::Swap))
    }

    pub fn is_resigned(&self) -> bool {
        matches!(self.main_branch.last(), Some(Move::Resign))
    }
}

/// Errors that can occur while building or loading a game
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// No ConHex board exists for this size
    #[error("Invalid board size {0}, expected 2..=12")]
    InvalidBoardSize(u8),

    #[error(transparent)]
    UnsupportedOrigin(#[from] UnsupportedOriginError),

    #[error(transparent)]
    Format(#[from] FormatError),
}
