//! Observer pattern for training and evaluation pipelines
//!
//! Observers allow composable data collection during a run without coupling
//! the loops to specific output formats.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    ports::Observer,
    q_learning::Ply,
    tictactoe::{Board, GameOutcome, GameRecord, Player},
};

/// Progress bar observer - Shows run progress with a running X/O/draw tally
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    label: &'static str,
    x_wins: usize,
    o_wins: usize,
    draws: usize,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self::with_label("episodes")
    }

    /// Progress observer whose bar counts `label` (e.g. "games")
    pub fn with_label(label: &'static str) -> Self {
        Self {
            progress_bar: None,
            label,
            x_wins: 0,
            o_wins: 0,
            draws: 0,
        }
    }

    fn tally(&self) -> String {
        format!("{} O:{} D:{}", self.x_wins, self.o_wins, self.draws)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_run_start(&mut self, total_episodes: usize) -> Result<()> {
        let template = format!(
            "[{{elapsed_precise}}] {{bar:40.cyan/blue}} {{pos}}/{{len}} {} (X:{{msg}})",
            self.label
        );
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(&template)
                .map_err(|e| Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, episode: usize, outcome: GameOutcome, _plies: usize) -> Result<()> {
        match outcome {
            GameOutcome::Win(Player::X) => self.x_wins += 1,
            GameOutcome::Win(Player::O) => self.o_wins += 1,
            GameOutcome::Draw => self.draws += 1,
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(episode as u64 + 1);
            pb.set_message(self.tally());
        }
        Ok(())
    }

    fn on_run_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.tally());
        }
        Ok(())
    }
}

/// Metrics observer - Tracks outcomes for one mark, game lengths and TD errors
pub struct MetricsObserver {
    perspective: Player,
    wins: usize,
    draws: usize,
    losses: usize,
    total_games: usize,
    move_counts: Vec<usize>,
    td_error_sum: f64,
    updates: usize,
}

impl MetricsObserver {
    /// Create a new metrics observer counting from X's point of view
    pub fn new() -> Self {
        Self::for_mark(Player::X)
    }

    /// Metrics observer counting wins and losses for `perspective`
    pub fn for_mark(perspective: Player) -> Self {
        Self {
            perspective,
            wins: 0,
            draws: 0,
            losses: 0,
            total_games: 0,
            move_counts: Vec::new(),
            td_error_sum: 0.0,
            updates: 0,
        }
    }

    fn rate(&self, count: usize) -> f64 {
        if self.total_games == 0 {
            0.0
        } else {
            count as f64 / self.total_games as f64
        }
    }

    pub fn win_rate(&self) -> f64 {
        self.rate(self.wins)
    }

    pub fn draw_rate(&self) -> f64 {
        self.rate(self.draws)
    }

    pub fn loss_rate(&self) -> f64 {
        self.rate(self.losses)
    }

    /// Get average game length
    pub fn avg_game_length(&self) -> f64 {
        if self.move_counts.is_empty() {
            0.0
        } else {
            self.move_counts.iter().sum::<usize>() as f64 / self.move_counts.len() as f64
        }
    }

    /// Mean absolute TD error over all updates seen
    pub fn mean_abs_td_error(&self) -> f64 {
        if self.updates == 0 {
            0.0
        } else {
            self.td_error_sum / self.updates as f64
        }
    }

    /// Get metrics summary
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            perspective: self.perspective,
            total_games: self.total_games,
            wins: self.wins,
            draws: self.draws,
            losses: self.losses,
            win_rate: self.win_rate(),
            draw_rate: self.draw_rate(),
            loss_rate: self.loss_rate(),
            avg_game_length: self.avg_game_length(),
            mean_abs_td_error: self.mean_abs_td_error(),
        }
    }
}

/// Summary of run metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub perspective: Player,
    pub total_games: usize,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
    pub win_rate: f64,
    pub draw_rate: f64,
    pub loss_rate: f64,
    pub avg_game_length: f64,
    pub mean_abs_td_error: f64,
}

impl Default for MetricsObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for MetricsObserver {
    fn on_ply(&mut self, _episode: usize, _board: &Board, ply: &Ply) -> Result<()> {
        if let Some(td_error) = ply.td_error {
            self.td_error_sum += td_error.abs();
            self.updates += 1;
        }
        Ok(())
    }

    fn on_episode_end(&mut self, _episode: usize, outcome: GameOutcome, plies: usize) -> Result<()> {
        self.total_games += 1;
        self.move_counts.push(plies);
        if outcome.is_win_for(self.perspective) {
            self.wins += 1;
        } else if outcome.is_loss_for(self.perspective) {
            self.losses += 1;
        } else {
            self.draws += 1;
        }
        Ok(())
    }
}

/// One line of the episode log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeObservation {
    pub episode: usize,
    pub outcome: GameOutcome,
    pub record: GameRecord,
    /// TD error of each ply that was learned from, in play order
    pub td_errors: Vec<f64>,
}

/// JSONL observer - Exports one JSON object per episode
pub struct JsonlObserver<W: Write = BufWriter<File>> {
    writer: W,
    record: GameRecord,
    td_errors: Vec<f64>,
}

impl JsonlObserver {
    /// Create a new JSONL observer writing to the file at `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| Error::ResourceUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_writer(BufWriter::new(file)))
    }
}

impl<W: Write> JsonlObserver<W> {
    pub fn from_writer(writer: W) -> Self {
        Self {
            writer,
            record: GameRecord::new(),
            td_errors: Vec::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Observer for JsonlObserver<W> {
    fn on_episode_start(&mut self, _episode: usize) -> Result<()> {
        self.record = GameRecord::new();
        self.td_errors.clear();
        Ok(())
    }

    fn on_ply(&mut self, _episode: usize, _board: &Board, ply: &Ply) -> Result<()> {
        self.record.push(ply.action, ply.mover);
        if let Some(td_error) = ply.td_error {
            self.td_errors.push(td_error);
        }
        Ok(())
    }

    fn on_episode_end(&mut self, episode: usize, outcome: GameOutcome, _plies: usize) -> Result<()> {
        self.record.outcome = Some(outcome);
        let observation = EpisodeObservation {
            episode,
            outcome,
            record: std::mem::take(&mut self.record),
            td_errors: std::mem::take(&mut self.td_errors),
        };

        serde_json::to_writer(&mut self.writer, &observation)?;
        writeln!(&mut self.writer)?;
        Ok(())
    }

    fn on_run_end(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
