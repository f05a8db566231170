use clap::Parser;
use qtoe::{
    cli::commands::{
        evaluate::{self, EvaluateArgs},
        train::{TrainArgs, execute},
    },
    export::ProgressSeries,
};
use tempfile::tempdir;

fn parse_args<I, T>(args: I) -> TrainArgs
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    TrainArgs::parse_from(args)
}

#[test]
fn train_writes_agent_progress_and_summary() {
    let tmp = tempdir().unwrap();
    let agent_path = tmp.path().join("agent.msgpack");
    let progress_dir = tmp.path().join("progress");
    let summary_path = tmp.path().join("reports/summary.json");

    let args = parse_args([
        "qtoe-train",
        "--epochs",
        "3",
        "--episodes",
        "50",
        "--eval-games",
        "4",
        "--seed",
        "21",
        "--no-progress",
        "--output",
        agent_path.to_str().unwrap(),
        "--progress-dir",
        progress_dir.to_str().unwrap(),
        "--summary",
        summary_path.to_str().unwrap(),
    ]);

    let report = execute(args).expect("training should succeed");
    assert_eq!(report.episodes_trained(), 150);
    assert!(agent_path.exists());

    let csv_files: Vec<_> = std::fs::read_dir(&progress_dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    assert_eq!(csv_files.len(), 1);
    let name = csv_files[0].file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("agent_wins_") && name.ends_with(".csv"), "{name}");

    let series = ProgressSeries::read_csv(&csv_files[0]).unwrap();
    assert_eq!(series.len(), 4);
    assert!(series.samples().iter().all(|sample| sample.games == 4));

    let contents = std::fs::read_to_string(&summary_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed["epochs"].as_array().unwrap().len(), 4);
    assert_eq!(
        parsed["training"]["agent_wins"].as_u64(),
        Some(report.training.agent_wins as u64)
    );
}

#[test]
fn evaluate_reads_a_trained_agent() {
    let tmp = tempdir().unwrap();
    let agent_path = tmp.path().join("agent.msgpack");
    let export_path = tmp.path().join("evaluation.json");

    execute(parse_args([
        "qtoe-train",
        "--epochs",
        "1",
        "--episodes",
        "100",
        "--seed",
        "2",
        "--no-progress",
        "--output",
        agent_path.to_str().unwrap(),
    ]))
    .unwrap();

    let args = EvaluateArgs::parse_from([
        "qtoe-evaluate",
        agent_path.to_str().unwrap(),
        "--games",
        "12",
        "--seed",
        "8",
        "--export",
        export_path.to_str().unwrap(),
    ]);
    let tally = evaluate::execute(args).unwrap();
    assert_eq!(tally.games(), 12);

    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&export_path).unwrap()).unwrap();
    assert_eq!(parsed["games"], 12);
    assert_eq!(parsed["opponent"], "Random");
}

#[test]
fn config_file_supplies_defaults_for_flags() {
    let tmp = tempdir().unwrap();
    let config_path = tmp.path().join("run.json");
    std::fs::write(
        &config_path,
        r#"{
            "agent": {"rewards": {"loss": -1.0}},
            "training": {"epochs": 2, "episodes_per_epoch": 20, "evaluation_games": 2}
        }"#,
    )
    .unwrap();

    let report = execute(parse_args([
        "qtoe-train",
        "--config",
        config_path.to_str().unwrap(),
        "--no-progress",
    ]))
    .unwrap();

    assert_eq!(report.epochs.len(), 3);
    assert_eq!(report.episodes_trained(), 40);
}

#[test]
fn invalid_hyperparameters_fail_before_training() {
    let result = execute(parse_args([
        "qtoe-train",
        "--discount-factor",
        "0",
        "--no-progress",
    ]));
    assert!(result.is_err());
}
