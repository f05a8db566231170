//! Saving and loading trained agents through the repository adapters

use std::path::Path;

use qtoe::{
    Error,
    adapters::{InMemoryRepository, MsgPackRepository},
    pipeline::{RandomOpponent, TrainingConfig, TrainingPipeline, evaluate},
    ports::AgentRepository,
    q_learning::{AgentConfig, QLearningAgent, QTable, SavedAgent, TrainingMetadata},
    tictactoe::Side,
};
use serde::Serialize;
use tempfile::tempdir;

fn trained_agent() -> QLearningAgent {
    let mut pipeline = TrainingPipeline::new(TrainingConfig {
        epochs: 2,
        episodes_per_epoch: 300,
        seed: Some(17),
        ..TrainingConfig::default()
    });
    let mut agent = QLearningAgent::new(AgentConfig::new()).unwrap();
    let mut opponent = RandomOpponent::new("Random");
    pipeline.run(&mut agent, &mut opponent).unwrap();
    agent
}

#[test]
fn test_file_roundtrip_preserves_policy() {
    let agent = trained_agent();
    let dir = tempdir().unwrap();
    let path = dir.path().join("agent.msgpack");

    let metadata = TrainingMetadata {
        episodes_trained: Some(600),
        epochs: Some(2),
        opponent: Some("Random".to_string()),
        seed: Some(17),
        saved_at: None,
    }
    .stamped();
    let repo = MsgPackRepository::new();
    repo.save(&SavedAgent::from_agent(&agent, metadata), &path)
        .unwrap();

    let loaded = repo.load(&path).unwrap();
    assert_eq!(loaded.metadata.episodes_trained, Some(600));
    assert!(loaded.metadata.saved_at.is_some());

    let mut restored = loaded.to_agent().unwrap();
    assert_eq!(restored.q_table(), agent.q_table());
    assert_eq!(restored.epsilon(), agent.epsilon());

    // Same table and same seeds give the same evaluation games
    let mut original = agent;
    original.set_rng_seed(3);
    restored.set_rng_seed(3);
    let (a, _) = evaluate(
        &mut original,
        &mut RandomOpponent::with_seed("Random", 4),
        30,
        Side::Agent,
    );
    let (b, _) = evaluate(
        &mut restored,
        &mut RandomOpponent::with_seed("Random", 4),
        30,
        Side::Agent,
    );
    assert_eq!(a, b);
}

#[test]
fn test_in_memory_repository_shares_storage_between_clones() {
    let repo = InMemoryRepository::new();
    let view = repo.clone();
    let saved = SavedAgent::from_agent(&trained_agent(), TrainingMetadata::default());

    repo.save(&saved, Path::new("runs/first")).unwrap();

    assert!(view.contains(Path::new("runs/first")));
    assert_eq!(view.load(Path::new("runs/first")).unwrap(), saved);
    assert!(matches!(
        view.load(Path::new("runs/second")),
        Err(Error::NotFound { .. })
    ));
}

#[test]
fn test_missing_file_is_an_io_error() {
    let dir = tempdir().unwrap();
    let result = MsgPackRepository.load(&dir.path().join("absent.msgpack"));
    assert!(matches!(result, Err(Error::Io { .. })));
}

/// Same layout as a saved agent, but with a free-form table
#[derive(Serialize)]
struct RawSavedAgent {
    version: u32,
    config: AgentConfig,
    epsilon: f64,
    q_table: Vec<f64>,
    metadata: TrainingMetadata,
}

#[test]
fn test_truncated_table_is_rejected() {
    let raw = RawSavedAgent {
        version: SavedAgent::VERSION,
        config: AgentConfig::new(),
        epsilon: 0.1,
        q_table: vec![0.0; 9],
        metadata: TrainingMetadata::default(),
    };
    let bytes = rmp_serde::to_vec(&raw).unwrap();

    assert!(matches!(
        SavedAgent::from_bytes(&bytes),
        Err(Error::SerializationContext { .. })
    ));

    let full = RawSavedAgent {
        q_table: vec![0.0; QTable::LEN],
        ..raw
    };
    let bytes = rmp_serde::to_vec(&full).unwrap();
    assert!(SavedAgent::from_bytes(&bytes).is_ok());
}

#[test]
fn test_unknown_version_is_rejected_on_load() {
    let raw = RawSavedAgent {
        version: SavedAgent::VERSION + 1,
        config: AgentConfig::new(),
        epsilon: 0.1,
        q_table: vec![0.0; QTable::LEN],
        metadata: TrainingMetadata::default(),
    };
    let saved = SavedAgent::from_bytes(&rmp_serde::to_vec(&raw).unwrap()).unwrap();

    assert!(matches!(
        saved.to_agent(),
        Err(Error::UnsupportedVersion { .. })
    ));
}
