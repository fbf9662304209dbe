// SPDX-License-Identifier: MIT OR Apache-2.0

//! Branch navigation over a recorded game and an exploratory branch
//!
//! Every jump rebuilds the position forward from an empty board. Tile
//! ownership cannot be undone one node at a time, so there is no backward
//! patching anywhere.

use crate::connection::{outcome, Outcome};
use crate::logging::CorrelationId;
use crate::rules::{Engine, Position};
use crate::snapshot::BoardDocument;
use crate::transform::notation_label;
use crate::{GameError, GameState, Move};
use serde::{Deserialize, Serialize};

/// Which move sequence a jump replays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BranchSource {
    /// The recorded game as loaded
    Main,
    /// The exploratory branch, possibly diverging from the record
    Current,
}

/// The move sequence replayed by a jump to `index`.
///
/// When the recorded game opens with a swap, its first two moves are kept
/// verbatim and only the tail comes from the current branch; the current
/// branch holds the already reflected first move.
pub fn branch_prefix(
    main: &[Move],
    current: &[Move],
    index: usize,
    source: BranchSource,
    reset_branch: bool,
) -> Vec<Move> {
    let take = |moves: &[Move]| moves[..index.min(moves.len())].to_vec();

    if reset_branch {
        return take(main);
    }
    match source {
        BranchSource::Main => take(main),
        BranchSource::Current if matches!(main.get(1), Some(Move::Swap)) => {
            let mut prefix = main[..index.min(2)].to_vec();
            if index > 2 {
                prefix.extend_from_slice(&current[2.min(current.len())..index.min(current.len())]);
            }
            prefix
        }
        BranchSource::Current => take(current),
    }
}

/// Whether [`branch_prefix`] opens with moves taken from the current
/// branch, which holds positions already produced by the engine. Prefixes
/// opening with the record replay it as played.
fn prefix_is_recorded(main: &[Move], source: BranchSource, reset_branch: bool) -> bool {
    !reset_branch && source == BranchSource::Current && !matches!(main.get(1), Some(Move::Swap))
}

/// Interactive view over one game: the record, the exploratory branch and
/// the position currently shown.
#[derive(Debug, Clone)]
pub struct Navigator {
    engine: Engine,
    main_branch: Vec<Move>,
    current_branch: Vec<Move>,
    position: Position,
    correlation: CorrelationId,
}

impl Navigator {
    /// Start at the end of `main_branch`
    pub fn new(engine: Engine, main_branch: Vec<Move>) -> Self {
        let position = engine.empty_position();
        let mut navigator = Self {
            engine,
            main_branch,
            current_branch: Vec::new(),
            position,
            correlation: CorrelationId::new(),
        };
        if !navigator.main_branch.is_empty() {
            navigator.reset();
        }
        navigator
    }

    /// Navigator over a parsed game record
    pub fn from_game(game: &GameState) -> Result<Self, GameError> {
        let engine = Engine::new(game.board_size, game.origin)?;
        let mut navigator = Self::new(engine, game.main_branch.clone());
        if !game.event.is_empty() {
            navigator.correlation = navigator.correlation.clone().with_game(game.event.clone());
        }
        Ok(navigator)
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn moves(&self) -> &[Move] {
        &self.position.moves
    }

    pub fn main_branch(&self) -> &[Move] {
        &self.main_branch
    }

    pub fn current_branch(&self) -> &[Move] {
        &self.current_branch
    }

    pub fn correlation(&self) -> &CorrelationId {
        &self.correlation
    }

    /// Play a new move on top of the shown position. The result becomes the
    /// current branch. Returns false when the move was rejected.
    pub fn play(&mut self, mv: &Move) -> bool {
        let _span = self.correlation.span().entered();

        let next = self.engine.apply_move(mv, &self.position);
        if next.moves == self.position.moves {
            tracing::debug!(?mv, "Move rejected");
            return false;
        }
        self.current_branch = next.moves.clone();
        self.position = next;
        tracing::debug!(moves = self.position.moves.len(), "Move played");
        true
    }

    /// Rebuild the position after the first `index` moves of `source`
    pub fn jump_to_move(&mut self, index: usize, source: BranchSource, reset_branch: bool) -> &Position {
        let _span = self.correlation.span().entered();

        let prefix = branch_prefix(&self.main_branch, &self.current_branch, index, source, reset_branch);
        self.position = if prefix_is_recorded(&self.main_branch, source, reset_branch) {
            self.engine.replay_recorded(&prefix)
        } else {
            self.engine.replay(&prefix)
        };
        if reset_branch {
            self.current_branch = self.position.moves.clone();
        }
        tracing::debug!(index, ?source, reset_branch, shown = self.position.moves.len(), "Jumped to move");
        &self.position
    }

    /// Show the opening move
    pub fn first_move(&mut self) -> &Position {
        self.jump_to_move(1, BranchSource::Current, false)
    }

    pub fn previous_move(&mut self) -> &Position {
        let index = self.position.moves.len().saturating_sub(1);
        self.jump_to_move(index, BranchSource::Current, false)
    }

    pub fn next_move(&mut self) -> &Position {
        let index = (self.position.moves.len() + 1).min(self.current_branch.len());
        self.jump_to_move(index, BranchSource::Current, false)
    }

    pub fn last_move(&mut self) -> &Position {
        self.jump_to_move(self.current_branch.len(), BranchSource::Current, false)
    }

    /// Drop the exploratory branch and show the full record again
    pub fn reset(&mut self) -> &Position {
        self.current_branch = self.main_branch.clone();
        self.jump_to_move(self.main_branch.len(), BranchSource::Main, true)
    }

    /// Labels for the move list of the shown position
    pub fn move_labels(&self) -> Vec<String> {
        let size = self.engine.board().size();
        let origin = self.engine.origin();
        self.position
            .moves
            .iter()
            .map(|m| notation_label(m, origin, size))
            .collect()
    }

    pub fn outcome(&self) -> Outcome {
        outcome(self.engine.board(), &self.position.moves, &self.position.tiles)
    }

    /// Whole-state document for the sync layer
    pub fn document(&self) -> BoardDocument {
        BoardDocument {
            moves: self.position.moves.clone(),
            tiles: self.position.tiles.clone(),
            branch: self.current_branch.clone(),
        }
    }

    /// Replace local state with a remote document. Last writer wins; there is
    /// no merge with local edits.
    pub fn apply_remote(&mut self, document: BoardDocument) {
        let _span = self.correlation.span().entered();
        tracing::debug!(
            moves = document.moves.len(),
            branch = document.branch.len(),
            "Applying remote document"
        );
        self.position = Position {
            moves: document.moves,
            tiles: document.tiles,
        };
        self.current_branch = document.branch;
    }
}
