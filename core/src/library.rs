// SPDX-License-Identifier: MIT OR Apache-2.0

//! Loading game records from disk and summarizing a collection of them

use crate::logging::PerfTimer;
use crate::sgf::parse_game;
use crate::{GameState, Origin};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Parse a single notation file
pub fn parse_file(path: &Path, origin: Origin) -> Result<GameState> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read game record: {}", path.display()))?;
    let game = parse_game(&content, origin)
        .with_context(|| format!("Failed to parse game record: {}", path.display()))?;
    Ok(game)
}

/// Parse every file, keeping one result per path in order
pub fn batch_parse_files(paths: &[PathBuf], origin: Origin) -> Vec<Result<GameState>> {
    let _timer = PerfTimer::new("batch_parse_files");
    let results: Vec<Result<GameState>> = paths.iter().map(|path| parse_file(path, origin)).collect();

    let failed = results.iter().filter(|r| r.is_err()).count();
    if failed > 0 {
        tracing::warn!(failed, total = paths.len(), "Some game records could not be parsed");
    }
    results
}

/// Statistics about a set of parsed games
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryStats {
    pub total_games: usize,
    pub swapped_games: usize,
    pub resigned_games: usize,
    pub total_moves: usize,
    pub average_game_length: f32,
    /// Number of games each player name appears in
    pub player_games: HashMap<String, usize>,
}

pub fn calculate_library_stats(games: &[GameState]) -> LibraryStats {
    let mut player_games = HashMap::new();
    let mut total_moves = 0;

    for game in games {
        total_moves += game.main_branch.len();
        for player in game.players.iter().filter(|p| !p.name.is_empty()) {
            *player_games.entry(player.name.clone()).or_insert(0) += 1;
        }
    }

    LibraryStats {
        total_games: games.len(),
        swapped_games: games.iter().filter(|g| g.is_swapped()).count(),
        resigned_games: games.iter().filter(|g| g.is_resigned()).count(),
        total_moves,
        average_game_length: if games.is_empty() {
            0.0
        } else {
            total_moves as f32 / games.len() as f32
        },
        player_games,
    }
}
