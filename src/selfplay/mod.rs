use crate::core::{initial_board, Move, PlayerId};
use crate::game::{winner_by_scores, GameState};
use crate::player::ai::{GreedyAI, MinimaxAI, RandomAI};
use crate::player::PlayerController;
use crossterm::{execute, terminal};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerKind {
    Random,
    Greedy,
    Minimax,
}

impl ControllerKind {
    pub fn label(&self) -> &'static str {
        match self {
            ControllerKind::Random => "Random",
            ControllerKind::Greedy => "Greedy",
            ControllerKind::Minimax => "Minimax",
        }
    }

    fn build(self, player_id: PlayerId, name: &str) -> Box<dyn PlayerController> {
        match self {
            ControllerKind::Random => Box::new(RandomAI::new(player_id, name)),
            ControllerKind::Greedy => Box::new(GreedyAI::new(player_id, name)),
            ControllerKind::Minimax => Box::new(MinimaxAI::new(player_id, name)),
        }
    }
}

pub struct SelfPlayConfig {
    pub num_games: usize,
    pub p1: ControllerKind,
    pub p2: ControllerKind,
    /// Starting clock handed to both players each game.
    pub clock: Duration,
    pub save_records: bool,
    pub parallel: bool,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct GameResult {
    pub winner: Option<PlayerId>,
    pub moves: usize,
    pub p1_score: i32,
    pub p2_score: i32,
    pub time_ms: u128,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct SelfPlayStats {
    pub total_games: usize,
    pub p1_wins: usize,
    pub p2_wins: usize,
    pub draws: usize,
    pub avg_moves: f64,
    pub avg_time_ms: f64,
    pub p1_kind: String,
    pub p2_kind: String,
    pub games: Vec<GameResult>,
}

impl SelfPlayStats {
    pub fn new() -> Self {
        Self {
            total_games: 0,
            p1_wins: 0,
            p2_wins: 0,
            draws: 0,
            avg_moves: 0.0,
            avg_time_ms: 0.0,
            p1_kind: String::new(),
            p2_kind: String::new(),
            games: Vec::new(),
        }
    }

    pub fn add_result(&mut self, result: GameResult) {
        self.total_games += 1;
        match result.winner {
            Some(PlayerId::Player1) => self.p1_wins += 1,
            Some(PlayerId::Player2) => self.p2_wins += 1,
            None => self.draws += 1,
        }
        self.games.push(result);
        self.recalculate_averages();
    }

    fn recalculate_averages(&mut self) {
        if self.games.is_empty() {
            return;
        }
        let total_moves: usize = self.games.iter().map(|g| g.moves).sum();
        let total_time: u128 = self.games.iter().map(|g| g.time_ms).sum();
        self.avg_moves = total_moves as f64 / self.games.len() as f64;
        self.avg_time_ms = total_time as f64 / self.games.len() as f64;
    }
}

impl Default for SelfPlayStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Full record of one game, saved alongside the aggregate stats.
#[derive(Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub p1: String,
    pub p2: String,
    pub winner: Option<PlayerId>,
    pub p1_score: i32,
    pub p2_score: i32,
    pub moves: Vec<Move>,
}

pub fn run_selfplay(config: &SelfPlayConfig) -> anyhow::Result<SelfPlayStats> {
    let mut stats = SelfPlayStats::new();
    stats.p1_kind = config.p1.label().to_string();
    stats.p2_kind = config.p2.label().to_string();

    if config.parallel {
        let outcomes: Vec<(GameResult, Vec<Move>)> = (0..config.num_games)
            .into_par_iter()
            .map(|_| play_one(config))
            .collect();
        for (idx, (result, moves)) in outcomes.into_iter().enumerate() {
            if config.save_records {
                save_record(config, &result, &moves, idx + 1)?;
            }
            stats.add_result(result);
        }
        print_progress(&stats, config.num_games, config.num_games);
    } else {
        for game_num in 1..=config.num_games {
            let (result, moves) = play_one(config);
            if config.save_records {
                save_record(config, &result, &moves, game_num)?;
            }
            stats.add_result(result);
            print_progress(&stats, game_num, config.num_games);
        }
    }

    Ok(stats)
}

/// One silent game between fresh controllers. Returns the result and the
/// move list for the optional record.
fn play_one(config: &SelfPlayConfig) -> (GameResult, Vec<Move>) {
    let p1 = config.p1.build(PlayerId::Player1, "P1");
    let p2 = config.p2.build(PlayerId::Player2, "P2");

    let mut state = GameState::new(initial_board());
    let mut clocks = HashMap::from([
        (PlayerId::Player1, config.clock),
        (PlayerId::Player2, config.clock),
    ]);
    let mut moves = Vec::new();
    let start = Instant::now();

    // Generous guard; a game always ends after 40 placements.
    let move_limit = 200;

    let winner = loop {
        if state.is_done() || moves.len() >= move_limit {
            break winner_by_scores(&state.scores());
        }

        let player = state.current_player;
        let controller: &dyn PlayerController = match player {
            PlayerId::Player1 => p1.as_ref(),
            PlayerId::Player2 => p2.as_ref(),
        };

        let remaining = clocks[&player];
        let t0 = Instant::now();
        let chosen = controller.choose_move(&state, remaining);
        let elapsed = t0.elapsed();

        let clock = clocks.get_mut(&player).expect("clock exists");
        if elapsed >= *clock {
            break Some(player.opponent());
        }
        *clock -= elapsed;

        match chosen {
            Some(mv) => {
                moves.push(mv);
                state = state.apply(&mv);
            }
            None => break Some(player.opponent()),
        }
    };

    let scores = state.scores();
    let result = GameResult {
        winner,
        moves: moves.len(),
        p1_score: scores[&PlayerId::Player1],
        p2_score: scores[&PlayerId::Player2],
        time_ms: start.elapsed().as_millis(),
    };
    (result, moves)
}

fn print_progress(stats: &SelfPlayStats, game_num: usize, total: usize) {
    let _ = execute!(
        std::io::stdout(),
        terminal::Clear(terminal::ClearType::All),
        crossterm::cursor::MoveTo(0, 0)
    );

    print!("=== Self-Play Progress ===\r\n\r\n");
    print!(
        "{} (P1) vs {} (P2)\r\n",
        stats.p1_kind, stats.p2_kind
    );
    print!("Game {}/{} completed\r\n\r\n", game_num, total);
    print!(
        "P1 wins: {} ({:.1}%)\r\n",
        stats.p1_wins,
        stats.p1_wins as f64 / stats.total_games as f64 * 100.0
    );
    print!(
        "P2 wins: {} ({:.1}%)\r\n",
        stats.p2_wins,
        stats.p2_wins as f64 / stats.total_games as f64 * 100.0
    );
    print!(
        "Draws:   {} ({:.1}%)\r\n",
        stats.draws,
        stats.draws as f64 / stats.total_games as f64 * 100.0
    );
    print!("Avg moves: {:.1}\r\n", stats.avg_moves);
    print!("Avg time:  {:.1}s\r\n", stats.avg_time_ms / 1000.0);

    let _ = std::io::Write::flush(&mut std::io::stdout());
}

fn save_record(
    config: &SelfPlayConfig,
    result: &GameResult,
    moves: &[Move],
    game_num: usize,
) -> anyhow::Result<()> {
    let record_dir = "selfplay_records";
    std::fs::create_dir_all(record_dir)?;

    let filename = format!(
        "{}/game_{:04}_{}.json",
        record_dir,
        game_num,
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    );

    let record = MatchRecord {
        p1: config.p1.label().to_string(),
        p2: config.p2.label().to_string(),
        winner: result.winner,
        p1_score: result.p1_score,
        p2_score: result.p2_score,
        moves: moves.to_vec(),
    };

    let file = std::fs::File::create(filename)?;
    serde_json::to_writer(file, &record)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_game_runs_to_completion() {
        let config = SelfPlayConfig {
            num_games: 1,
            p1: ControllerKind::Random,
            p2: ControllerKind::Random,
            clock: Duration::from_secs(900),
            save_records: false,
            parallel: false,
        };
        let (result, moves) = play_one(&config);
        // Both 20-piece reserves get placed.
        assert_eq!(moves.len(), 40);
        assert_eq!(result.moves, 40);
        // Final scores match the recorded winner.
        match result.winner {
            Some(PlayerId::Player1) => assert!(result.p1_score > result.p2_score),
            Some(PlayerId::Player2) => assert!(result.p2_score > result.p1_score),
            None => assert_eq!(result.p1_score, result.p2_score),
        }
    }

    #[test]
    fn stats_accumulate() {
        let mut stats = SelfPlayStats::new();
        stats.add_result(GameResult {
            winner: Some(PlayerId::Player1),
            moves: 40,
            p1_score: 14,
            p2_score: 9,
            time_ms: 120,
        });
        stats.add_result(GameResult {
            winner: None,
            moves: 40,
            p1_score: 11,
            p2_score: 11,
            time_ms: 80,
        });
        assert_eq!(stats.total_games, 2);
        assert_eq!(stats.p1_wins, 1);
        assert_eq!(stats.draws, 1);
        assert!((stats.avg_moves - 40.0).abs() < f64::EPSILON);
        assert!((stats.avg_time_ms - 100.0).abs() < f64::EPSILON);
    }
}
