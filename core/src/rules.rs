// SPDX-License-Identifier: MIT OR Apache-2.0

//! Move application and tile ownership

use crate::board::{self, Board, Tile};
use crate::transform::compute_swap_move;
use crate::{GameError, Move, Node, NodeState, Origin, Point, Side, TileState};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Moves played so far and the tiles they produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub moves: Vec<Move>,
    pub tiles: Vec<Tile>,
}

impl Position {
    /// No moves, all tiles empty
    pub fn empty(board: &Board) -> Self {
        Self {
            moves: Vec::new(),
            tiles: board.tiles().to_vec(),
        }
    }

    /// Whether a node at `point` has already been played
    pub fn is_occupied(&self, point: Point) -> bool {
        self.moves.iter().any(|m| m.point() == Some(point))
    }

    /// Side assigned to the next played node
    pub fn next_side(&self) -> Side {
        next_side(&self.moves)
    }

    /// Current state of every canonical node of `board`
    pub fn node_states(&self, board: &Board) -> Vec<Node> {
        board
            .nodes()
            .iter()
            .map(|n| {
                let owner = self.moves.iter().rev().find_map(|m| match m {
                    Move::Place { x, y, side } if n.is_at(Point::new(*x, *y)) => Some(*side),
                    _ => None,
                });
                Node {
                    state: owner.map(NodeState::from).unwrap_or(NodeState::Empty),
                    ..*n
                }
            })
            .collect()
    }

    pub fn count_tiles_for(&self, side: Side) -> usize {
        let state = TileState::from(side);
        self.tiles.iter().filter(|t| t.state == state).count()
    }
}

/// Sides alternate strictly: second follows a first placement, anything
/// else (no moves, a swap marker, a second placement) is followed by first.
pub fn next_side(moves: &[Move]) -> Side {
    match moves.last() {
        Some(Move::Place { side: Side::First, .. }) => Side::Second,
        _ => Side::First,
    }
}

/// Applies moves to positions for one board and origin
#[derive(Debug, Clone)]
pub struct Engine {
    board: Arc<Board>,
    origin: Origin,
}

impl Engine {
    /// Engine over the shared geometry for `board_size`
    pub fn new(board_size: u8, origin: Origin) -> Result<Self, GameError> {
        Ok(Self::with_board(board::cached(board_size)?, origin))
    }

    pub fn with_board(board: Arc<Board>, origin: Origin) -> Self {
        Self { board, origin }
    }

    pub fn board(&self) -> &Arc<Board> {
        &self.board
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn empty_position(&self) -> Position {
        Position::empty(&self.board)
    }

    /// Apply `mv` to `position`, returning the next position.
    ///
    /// Placing on an occupied or non-playable coordinate is not an error: the
    /// position comes back unchanged. The side carried by a placement is
    /// ignored; sides always alternate.
    pub fn apply_move(&self, mv: &Move, position: &Position) -> Position {
        match mv {
            Move::Resign => {
                tracing::debug!("Resign recorded after {} moves", position.moves.len());
                let mut moves = position.moves.clone();
                moves.push(Move::Resign);
                Position {
                    moves,
                    tiles: position.tiles.clone(),
                }
            }
            Move::Swap => self.apply_swap(position),
            Move::Place { x, y, .. } => self.apply_placement(Point::new(*x, *y), position),
        }
    }

    fn apply_swap(&self, position: &Position) -> Position {
        match position.moves.first() {
            Some(first @ Move::Place { .. }) => {
                let swapped = compute_swap_move(first, self.board.size(), self.origin);
                tracing::debug!(?first, ?swapped, origin = %self.origin, "Swap applied");

                let mut tiles = self.board.tiles().to_vec();
                if let Move::Place { x, y, side } = swapped {
                    tiles = update_tiles_for_move(&tiles, Point::new(x, y), side);
                }
                Position {
                    moves: vec![swapped, Move::Swap],
                    tiles,
                }
            }
            _ => {
                tracing::debug!("Swap with no first move to take over");
                let mut moves = position.moves.clone();
                moves.push(Move::Swap);
                Position {
                    moves,
                    tiles: position.tiles.clone(),
                }
            }
        }
    }

    fn apply_placement(&self, point: Point, position: &Position) -> Position {
        if position.is_occupied(point) {
            tracing::debug!(%point, "Node already played, move ignored");
            return position.clone();
        }
        if !self.board.contains_node(point) {
            tracing::warn!(%point, size = self.board.size(), "Not a playable node, move ignored");
            return position.clone();
        }

        let side = position.next_side();
        let mut moves = position.moves.clone();
        moves.push(Move::place(point, side));
        Position {
            moves,
            tiles: update_tiles_for_move(&position.tiles, point, side),
        }
    }

    /// Rebuild a position from scratch by applying `moves` in order
    pub fn replay(&self, moves: &[Move]) -> Position {
        moves
            .iter()
            .fold(self.empty_position(), |position, mv| self.apply_move(mv, &position))
    }

    /// Rebuild a branch previously produced by [`Engine::apply_move`].
    ///
    /// Such a branch stores a swap as its outcome: the reflected move owned
    /// by the second side, then the marker. That prefix is seeded as is
    /// rather than reflected a second time. Records read from notation hold
    /// the opening as played and go through [`Engine::replay`] instead.
    pub fn replay_recorded(&self, moves: &[Move]) -> Position {
        let (start, rest) = match moves {
            [Move::Place { x, y, side: Side::Second }, Move::Swap, rest @ ..] => {
                let taken = Point::new(*x, *y);
                let tiles = update_tiles_for_move(self.board.tiles(), taken, Side::Second);
                (
                    Position {
                        moves: vec![Move::place(taken, Side::Second), Move::Swap],
                        tiles,
                    },
                    rest,
                )
            }
            _ => (self.empty_position(), moves),
        };

        rest.iter().fold(start, |position, mv| self.apply_move(mv, &position))
    }
}

/// Mark every node at `point` with `side`, then settle tile ownership
pub fn update_tiles_for_move(tiles: &[Tile], point: Point, side: Side) -> Vec<Tile> {
    tiles
        .iter()
        .map(|tile| {
            let mut tile = tile.clone();
            for node in tile.nodes.iter_mut().filter(|n| n.is_at(point)) {
                node.state = NodeState::from(side);
            }
            update_tile_status(tile)
        })
        .collect()
}

/// A tile is decided the first time one side holds at least half of its
/// nodes, and never changes after that.
pub fn update_tile_status(mut tile: Tile) -> Tile {
    if tile.state == TileState::Empty {
        if tile.has_majority(Side::First) {
            tile.state = TileState::First;
        } else if tile.has_majority(Side::Second) {
            tile.state = TileState::Second;
        }
    }
    tile
}
