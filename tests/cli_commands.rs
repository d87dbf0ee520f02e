//! CLI argument parsing and end-to-end command runs

use clap::Parser;
use qttt::{
    cli::commands::{
        evaluate::{self, EvaluateArgs},
        train::{self, TrainArgs},
    },
    pipeline::{EvaluationMode, EvaluationResult, Opponent},
    q_learning::{QTable, serialization},
    tictactoe::{NUM_STATES, Player, StateEncoding},
};
use tempfile::tempdir;

#[test]
fn train_defaults() {
    let args = TrainArgs::parse_from(["qttt-train"]);
    assert_eq!(args.agent.episodes, 10_000);
    assert_eq!(args.agent.alpha, None);
    assert!(!args.agent.no_progress);
    assert!(args.agent.load.is_none() && args.agent.save.is_none());
}

#[test]
fn evaluate_options_parse() {
    let args = EvaluateArgs::parse_from([
        "qttt-evaluate",
        "--games",
        "20",
        "--agent-mark",
        "o",
        "--mode",
        "learning",
        "--opponent",
        "random",
        "--eval-epsilon",
        "0",
        "--encoding",
        "relative",
    ]);

    assert_eq!(args.games, 20);
    assert_eq!(args.agent_mark, Player::O);
    assert_eq!(args.mode, EvaluationMode::Learning);
    assert_eq!(args.opponent, Opponent::Random);
    assert_eq!(args.eval_epsilon, Some(0.0));
    assert_eq!(args.agent.encoding, Some(StateEncoding::Relative));
}

#[test]
fn unknown_mode_is_a_parse_error() {
    assert!(EvaluateArgs::try_parse_from(["qttt-evaluate", "--mode", "sometimes"]).is_err());
}

#[test]
fn train_saves_table_and_summary() {
    let tmp = tempdir().unwrap();
    let table = tmp.path().join("q_values.csv");
    let summary = tmp.path().join("summary.json");

    let args = TrainArgs::parse_from([
        "qttt-train",
        "--episodes",
        "25",
        "--seed",
        "9",
        "--no-progress",
        "--save",
        table.to_str().unwrap(),
        "--summary",
        summary.to_str().unwrap(),
    ]);
    train::execute(args).expect("training should succeed");

    let text = std::fs::read_to_string(&table).unwrap();
    assert_eq!(text.lines().count(), NUM_STATES);

    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&summary).unwrap()).unwrap();
    assert_eq!(parsed["episodes"], 25);
}

#[test]
fn unreadable_table_falls_back_to_fresh_training() {
    let tmp = tempdir().unwrap();
    let missing = tmp.path().join("missing.csv");
    let saved = tmp.path().join("saved.csv");

    let args = TrainArgs::parse_from([
        "qttt-train",
        "--episodes",
        "5",
        "--no-progress",
        "--load",
        missing.to_str().unwrap(),
        "--save",
        saved.to_str().unwrap(),
    ]);
    train::execute(args).expect("missing table is only a warning");

    let mut table = QTable::new(0.5, 0.9);
    serialization::load_from_file(&mut table, &saved).unwrap();
}

#[test]
fn unwritable_save_path_is_only_a_warning() {
    let tmp = tempdir().unwrap();
    let target = tmp.path().join("no-such-dir").join("q.csv");

    let args = TrainArgs::parse_from([
        "qttt-train",
        "--episodes",
        "3",
        "--no-progress",
        "--save",
        target.to_str().unwrap(),
    ]);
    train::execute(args).expect("save failure is only a warning");
    assert!(!target.exists());
}

#[test]
fn evaluate_exports_results() {
    let tmp = tempdir().unwrap();
    let export = tmp.path().join("eval.json");
    let observations = tmp.path().join("episodes.jsonl");

    let args = EvaluateArgs::parse_from([
        "qttt-evaluate",
        "--episodes",
        "50",
        "--seed",
        "2",
        "--no-progress",
        "--observations",
        observations.to_str().unwrap(),
        "--games",
        "30",
        "--opponent",
        "random",
        "--export",
        export.to_str().unwrap(),
    ]);
    evaluate::execute(args).expect("evaluation should succeed");

    let result = EvaluationResult::load(&export).unwrap();
    assert_eq!(result.total_games, 30);
    assert_eq!(result.agent_mark, Player::X);

    let log = std::fs::read_to_string(&observations).unwrap();
    assert_eq!(log.lines().count(), 50);
}

#[test]
fn bad_config_file_is_an_error() {
    let tmp = tempdir().unwrap();
    let config = tmp.path().join("agent.json");
    std::fs::write(&config, r#"{"epsilon": 2.0}"#).unwrap();

    let args = TrainArgs::parse_from([
        "qttt-train",
        "--episodes",
        "1",
        "--no-progress",
        "--config",
        config.to_str().unwrap(),
    ]);
    assert!(train::execute(args).is_err());
}
