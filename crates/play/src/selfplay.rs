//! Engine vs engine games and their JSON records.

use anyhow::{Context, Result};
use gomoku_board::{find_winner, Board};
use gomoku_core::{Location, Player, TurnOrder};
use gomoku_mcts::{Mcts, SearchConfig};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// A single move in a recorded game.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MoveRecord {
    pub player: Player,
    pub location: Location,

    /// Win ratio the engine saw for this move.
    pub win_ratio: f64,

    /// Simulations spent choosing it (0 for a forced move).
    pub simulations: usize,
}

/// A complete engine vs engine game.
#[derive(Serialize, Deserialize, Debug)]
pub struct GameRecord {
    /// Moves in play order.
    pub moves: Vec<MoveRecord>,

    /// `None` when the board filled without a line.
    pub winner: Option<Player>,

    pub metadata: HashMap<String, serde_json::Value>,
}

/// Totals over a batch of games.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub games: usize,
    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,
    pub total_moves: usize,
}

impl Summary {
    pub fn from_records(records: &[GameRecord]) -> Self {
        let mut summary = Self {
            games: records.len(),
            ..Self::default()
        };
        for record in records {
            summary.total_moves += record.moves.len();
            match record.winner {
                Some(Player::X) => summary.x_wins += 1,
                Some(Player::O) => summary.o_wins += 1,
                None => summary.draws += 1,
            }
        }
        summary
    }

    pub fn average_length(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.total_moves as f64 / self.games as f64
        }
    }
}

/// Play one game with both sides driven by the same engine.
///
/// The first mover and every search are seeded from `seed`.
pub fn play_game(config: &SearchConfig, seed: u64) -> Result<GameRecord> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let first = if rng.gen_bool(0.5) { Player::X } else { Player::O };
    let mut turn = TurnOrder::starting_with(first);
    let mut board = Board::new(config.width, config.height, config.n_in_row)?;
    let mut engine = Mcts::new(config.clone(), rng)?;

    let mut moves = Vec::new();
    let winner = loop {
        let player = turn.peek();
        let result = engine.search(&board, &turn)?;
        board.apply(player, result.cell)?;
        turn.next();

        moves.push(MoveRecord {
            player,
            location: board.location_of(result.cell)?,
            win_ratio: result.win_ratio,
            simulations: result.simulations,
        });

        if let Some(winner) = find_winner(&board, config.n_in_row) {
            break Some(winner);
        }
        if board.is_full() {
            break None;
        }
    };

    debug!(seed, moves = moves.len(), winner = ?winner, "self-play game finished");

    let mut metadata = HashMap::new();
    metadata.insert("seed".to_string(), serde_json::json!(seed));
    metadata.insert("moves".to_string(), serde_json::json!(moves.len()));
    metadata.insert("first_player".to_string(), serde_json::json!(first));
    metadata.insert("width".to_string(), serde_json::json!(config.width));
    metadata.insert("height".to_string(), serde_json::json!(config.height));
    metadata.insert("n_in_row".to_string(), serde_json::json!(config.n_in_row));
    metadata.insert(
        "max_simulations".to_string(),
        serde_json::json!(config.max_simulations),
    );

    Ok(GameRecord {
        moves,
        winner,
        metadata,
    })
}

/// Play `games` games in parallel. Game `i` is seeded with `seed + i * 1000`.
pub fn play_games(config: &SearchConfig, games: usize, seed: u64) -> Result<Vec<GameRecord>> {
    (0..games)
        .into_par_iter()
        .map(|i| {
            let game_seed = seed.wrapping_add(i as u64 * 1000);
            play_game(config, game_seed).with_context(|| format!("self-play game {} failed", i))
        })
        .collect()
}

/// Write each record to `output/game_NNNNNN.json`, creating the directory
/// if needed. Returns the written paths.
pub fn save_records(output: &Path, records: &[GameRecord]) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {:?}", output))?;

    let mut paths = Vec::with_capacity(records.len());
    for (i, record) in records.iter().enumerate() {
        let filename = output.join(format!("game_{:06}.json", i));
        let file =
            File::create(&filename).with_context(|| format!("Failed to create file: {:?}", filename))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, record)
            .with_context(|| format!("Failed to serialize game {}", i))?;
        writer
            .flush()
            .with_context(|| format!("Failed to write file: {:?}", filename))?;
        paths.push(filename);
    }
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn small_config() -> SearchConfig {
        SearchConfig::for_testing(4, 4, 3, 40)
    }

    #[test]
    fn test_play_game_is_legal() {
        let config = small_config();
        let record = play_game(&config, 42).unwrap();

        // Replaying the record never touches a cell twice
        let mut board = Board::new(4, 4, 3).unwrap();
        for mv in &record.moves {
            let cell = board.cell_at(mv.location.row, mv.location.col).unwrap();
            board.apply(mv.player, cell).unwrap();
        }

        assert_eq!(find_winner(&board, 3), record.winner);
        if record.winner.is_none() {
            assert!(board.is_full());
        }
        assert_eq!(record.metadata["seed"], serde_json::json!(42));
    }

    #[test]
    fn test_players_alternate() {
        let record = play_game(&small_config(), 7).unwrap();
        for pair in record.moves.windows(2) {
            assert_eq!(pair[1].player, pair[0].player.opposite());
        }
    }

    #[test]
    fn test_play_game_deterministic() {
        let config = small_config();
        let record1 = play_game(&config, 99).unwrap();
        let record2 = play_game(&config, 99).unwrap();
        assert_eq!(record1.moves, record2.moves);
        assert_eq!(record1.winner, record2.winner);
    }

    #[test]
    fn test_play_games_count() {
        let records = play_games(&small_config(), 3, 1).unwrap();
        assert_eq!(records.len(), 3);

        let summary = Summary::from_records(&records);
        assert_eq!(summary.games, 3);
        assert_eq!(summary.x_wins + summary.o_wins + summary.draws, 3);
        assert!(summary.average_length() >= 3.0);
    }

    #[test]
    fn test_summary_counts() {
        let record = |winner, len| GameRecord {
            moves: vec![
                MoveRecord {
                    player: Player::X,
                    location: Location::new(0, 0),
                    win_ratio: 0.0,
                    simulations: 0,
                };
                len
            ],
            winner,
            metadata: HashMap::new(),
        };
        let records = [record(Some(Player::X), 5), record(None, 9), record(Some(Player::X), 4)];

        let summary = Summary::from_records(&records);
        assert_eq!(
            summary,
            Summary {
                games: 3,
                x_wins: 2,
                o_wins: 0,
                draws: 1,
                total_moves: 18,
            }
        );
        assert!((summary.average_length() - 6.0).abs() < 1e-9);
        assert_eq!(Summary::default().average_length(), 0.0);
    }

    #[test]
    fn test_save_records_writes_json() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("games");
        let records = play_games(&small_config(), 2, 5).unwrap();

        let paths = save_records(&output, &records).unwrap();
        assert_eq!(paths.len(), 2);
        assert!(paths[0].ends_with("game_000000.json"));
        assert!(paths[1].ends_with("game_000001.json"));

        let text = fs::read_to_string(&paths[1]).unwrap();
        let loaded: GameRecord = serde_json::from_str(&text).unwrap();
        let played = |moves: &[MoveRecord]| -> Vec<(Player, Location)> {
            moves.iter().map(|m| (m.player, m.location)).collect()
        };
        assert_eq!(played(&loaded.moves), played(&records[1].moves));
        assert_eq!(loaded.winner, records[1].winner);
        assert_eq!(loaded.metadata["seed"], serde_json::json!(1005));
    }

    #[test]
    fn test_save_records_fails_when_output_is_a_file() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("not-a-dir");
        fs::write(&output, b"occupied").unwrap();

        let records = play_games(&small_config(), 1, 3).unwrap();
        assert!(save_records(&output, &records).is_err());
    }
}
