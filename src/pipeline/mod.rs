//! Training and evaluation pipelines
//!
//! This module provides composable pipelines for:
//! - Training an agent through self-play
//! - Evaluating the learned table for one mark
//! - Recording observations during either run

pub mod evaluation;
pub mod observers;
pub mod training;

pub use evaluation::{
    EvaluationConfig, EvaluationMode, EvaluationPipeline, EvaluationResult, Opponent,
};
pub use observers::{
    EpisodeObservation, JsonlObserver, MetricsObserver, MetricsSummary, ProgressObserver,
};
pub use training::{TrainingConfig, TrainingPipeline, TrainingResult};

pub use crate::ports::Observer;
