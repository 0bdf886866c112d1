use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// How many entries [`ScoreBoard::best_times`] returns.
pub const BEST_TIMES_LEN: usize = 10;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameResult {
    pub config: GameConfig,
    pub won: bool,
    pub progress: f64,
    pub cells_revealed: CellCount,
    pub total_safe_cells: CellCount,
    pub elapsed_secs: u32,
}

impl GameResult {
    /// Builds a result from a `GameWin` or `GameOver` event, `None` for anything else.
    pub fn from_event(config: GameConfig, event: &GameEvent) -> Option<Self> {
        let won = matches!(event, GameEvent::GameWin(_));
        event.summary().map(|summary| Self {
            config,
            won,
            progress: summary.progress,
            cells_revealed: summary.cells_revealed,
            total_safe_cells: summary.total_safe_cells,
            elapsed_secs: summary.elapsed_secs,
        })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub games_played: u32,
    pub games_won: u32,
    /// Fastest win, if any.
    pub best_time: Option<u32>,
    /// Mean duration of wins, if any.
    pub average_time: Option<f64>,
    pub win_rate: f64,
}

/// In-memory record of finished games, kept ordered by duration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBoard {
    results: Vec<GameResult>,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, result: GameResult) {
        let at = self
            .results
            .partition_point(|r| r.elapsed_secs <= result.elapsed_secs);
        self.results.insert(at, result);
    }

    pub fn results(&self) -> &[GameResult] {
        &self.results
    }

    /// Fastest wins on boards matching `config`.
    pub fn best_times(&self, config: GameConfig) -> impl Iterator<Item = &GameResult> + '_ {
        self.results
            .iter()
            .filter(move |r| r.won && r.config == config)
            .take(BEST_TIMES_LEN)
    }

    pub fn player_stats(&self) -> PlayerStats {
        let games_played = self.results.len() as u32;
        let wins: Vec<u32> = self
            .results
            .iter()
            .filter(|r| r.won)
            .map(|r| r.elapsed_secs)
            .collect();
        let games_won = wins.len() as u32;

        let average_time = (!wins.is_empty()).then(|| {
            wins.iter().map(|&t| f64::from(t)).sum::<f64>() / f64::from(games_won)
        });
        let win_rate = if games_played > 0 {
            f64::from(games_won) / f64::from(games_played)
        } else {
            0.0
        };

        PlayerStats {
            games_played,
            games_won,
            best_time: wins.iter().copied().min(),
            average_time,
            win_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(config: GameConfig, won: bool, elapsed_secs: u32) -> GameResult {
        GameResult {
            config,
            won,
            progress: if won { 1.0 } else { 0.5 },
            cells_revealed: 0,
            total_safe_cells: config.total_safe_cells(),
            elapsed_secs,
        }
    }

    #[test]
    fn empty_board_stats() {
        let stats = ScoreBoard::new().player_stats();

        assert_eq!(stats.games_played, 0);
        assert_eq!(stats.best_time, None);
        assert_eq!(stats.average_time, None);
        assert_eq!(stats.win_rate, 0.0);
    }

    #[test]
    fn stats_only_count_wins_for_times() {
        let easy = Difficulty::Easy.config();
        let mut board = ScoreBoard::new();
        board.record(result(easy, true, 90));
        board.record(result(easy, false, 5));
        board.record(result(easy, true, 30));
        board.record(result(easy, false, 200));

        let stats = board.player_stats();

        assert_eq!(stats.games_played, 4);
        assert_eq!(stats.games_won, 2);
        assert_eq!(stats.best_time, Some(30));
        assert_eq!(stats.average_time, Some(60.0));
        assert_eq!(stats.win_rate, 0.5);
    }

    #[test]
    fn best_times_are_sorted_and_capped() {
        let easy = Difficulty::Easy.config();
        let hard = Difficulty::Hard.config();
        let mut board = ScoreBoard::new();
        for secs in (0..15).rev() {
            board.record(result(easy, true, 100 + secs));
        }
        board.record(result(hard, true, 1));
        board.record(result(easy, false, 2));

        let times: Vec<u32> = board.best_times(easy).map(|r| r.elapsed_secs).collect();

        assert_eq!(times, (100..110).collect::<Vec<_>>());
        assert_eq!(board.best_times(hard).count(), 1);
        assert!(board.results().windows(2).all(|w| w[0].elapsed_secs <= w[1].elapsed_secs));
    }

    #[test]
    fn result_from_engine_events() {
        let config = GameConfig::new(3, 3, 1).unwrap();
        let placer = FixedMinePlacer::new(config, &[(0, 0)]).unwrap();
        let mut engine = GameEngine::new(config, GameMode::Classic, placer);
        engine.reveal((2, 2), 17);

        let results: Vec<GameResult> = engine
            .drain_events()
            .filter_map(|event| GameResult::from_event(config, &event))
            .collect();

        assert_eq!(results.len(), 1);
        assert!(results[0].won);
        assert_eq!(results[0].progress, 1.0);
        assert_eq!(results[0].cells_revealed, 8);
        assert_eq!(results[0].elapsed_secs, 17);
        assert_eq!(
            GameResult::from_event(config, &GameEvent::GameStart),
            None
        );
    }
}
