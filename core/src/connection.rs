// SPDX-License-Identifier: MIT OR Apache-2.0

//! Winning connections
//!
//! First connects the top and bottom edges, second connects the left and
//! right edges, each through a chain of owned, neighbouring tiles.

use crate::board::{Board, Tile};
use crate::rules::next_side;
use crate::{Move, Point, Side, TileState};
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};

/// Board edge, named as seen with `y` growing downwards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    /// The two edges `side` has to connect
    pub fn goals(side: Side) -> (Edge, Edge) {
        match side {
            Side::First => (Edge::Top, Edge::Bottom),
            Side::Second => (Edge::Left, Edge::Right),
        }
    }

    fn holds(&self, point: Point, far: i32) -> bool {
        match self {
            Edge::Top => point.y == 1,
            Edge::Bottom => point.y == far,
            Edge::Left => point.x == 1,
            Edge::Right => point.x == far,
        }
    }
}

/// Whether any vertex of `tile`, playable or fake, lies on `edge`
pub fn touches(tile: &Tile, edge: Edge, board: &Board) -> bool {
    let far = board.far_edge();
    tile.nodes
        .iter()
        .chain(tile.fake_nodes.iter())
        .any(|n| edge.holds(n.point(), far))
}

/// State of play derived from a position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum Outcome {
    Ongoing,
    Connected { winner: Side },
    Resigned { winner: Side },
}

impl Outcome {
    pub fn winner(&self) -> Option<Side> {
        match self {
            Outcome::Ongoing => None,
            Outcome::Connected { winner } | Outcome::Resigned { winner } => Some(*winner),
        }
    }

    pub fn is_over(&self) -> bool {
        !matches!(self, Outcome::Ongoing)
    }
}

/// Whether `side` owns a chain of tiles joining its two edges
pub fn is_connected(board: &Board, tiles: &[Tile], side: Side) -> bool {
    let owned = TileState::from(side);
    let (start, goal) = Edge::goals(side);

    let mut seen: HashSet<Point> = HashSet::new();
    let mut queue: VecDeque<&Tile> = tiles
        .iter()
        .filter(|t| t.state == owned && touches(t, start, board))
        .collect();
    seen.extend(queue.iter().map(|t| t.position));

    while let Some(tile) = queue.pop_front() {
        if touches(tile, goal, board) {
            return true;
        }
        for next in tiles.iter().filter(|t| t.state == owned && tile.is_neighbor(t.position)) {
            if seen.insert(next.position) {
                queue.push_back(next);
            }
        }
    }
    false
}

/// The side with a winning connection, if any
pub fn winner(board: &Board, tiles: &[Tile]) -> Option<Side> {
    [Side::First, Side::Second]
        .into_iter()
        .find(|side| is_connected(board, tiles, *side))
}

/// Outcome of a position. A resign marker is attributed to the side whose
/// turn it was when it was recorded.
pub fn outcome(board: &Board, moves: &[Move], tiles: &[Tile]) -> Outcome {
    if let Some(index) = moves.iter().position(|m| *m == Move::Resign) {
        let resigned = next_side(&moves[..index]);
        return Outcome::Resigned { winner: resigned.opposite() };
    }
    match winner(board, tiles) {
        Some(side) => Outcome::Connected { winner: side },
        None => Outcome::Ongoing,
    }
}
