//! Persistence tests for intent-chat.
//!
//! These tests verify that a trained model, an intent pack, and a config file
//! survive a write + reload cycle and answer exactly as before.

use rand::SeedableRng;
use rand::rngs::StdRng;

use intent_chat::classifier::DEFAULT_ALPHA;
use intent_chat::config::ChatConfig;
use intent_chat::error::ModelError;
use intent_chat::model::TrainedModel;
use intent_chat::pack::IntentPack;
use intent_chat::pipeline::ChatPipeline;

const UTTERANCES: &[&str] = &[
    "Hello!!",
    "see you later",
    "thanks a lot",
    "what time is it",
    "tell me a joke",
    "completely unknown",
    "",
];

#[test]
fn model_survives_restart() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("models").join("basic.bin");
    let pack = IntentPack::bundled().unwrap();

    // First session: train and persist.
    let trained = TrainedModel::train(&pack.training_examples(), 0.5).unwrap();
    trained.save(&path).unwrap();

    // Second session: load and compare.
    let loaded = TrainedModel::load(&path).unwrap();
    assert_eq!(
        trained.vectorizer().vocabulary(),
        loaded.vectorizer().vocabulary()
    );
    assert_eq!(loaded.classifier().alpha(), 0.5);
    assert_eq!(loaded.classifier().intents(), trained.classifier().intents());
    for utterance in UTTERANCES {
        assert_eq!(
            trained.rank(utterance).unwrap(),
            loaded.rank(utterance).unwrap(),
            "ranking differs for {utterance:?}"
        );
    }
}

#[test]
fn reloaded_pipeline_answers_identically() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("model.bin");
    let pack = IntentPack::bundled().unwrap();

    let original = ChatPipeline::from_pack(&pack, DEFAULT_ALPHA).unwrap();
    original.model().save(&path).unwrap();
    let reloaded = ChatPipeline::new(TrainedModel::load(&path).unwrap(), pack.response_table());

    let mut a = StdRng::seed_from_u64(7);
    let mut b = StdRng::seed_from_u64(7);
    for utterance in UTTERANCES {
        assert_eq!(
            original.respond(utterance, &mut a).unwrap(),
            reloaded.respond(utterance, &mut b).unwrap()
        );
    }
}

#[test]
fn truncated_model_file_is_rejected() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("model.bin");
    let pack = IntentPack::bundled().unwrap();
    let model = TrainedModel::train(&pack.training_examples(), DEFAULT_ALPHA).unwrap();

    let bytes = model.to_bytes().unwrap();
    std::fs::write(&path, &bytes[..bytes.len() / 2]).unwrap();
    assert!(matches!(
        TrainedModel::load(&path),
        Err(ModelError::Serialization { .. })
    ));
}

#[test]
fn pack_loads_from_disk() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("small.toml");
    std::fs::write(
        &path,
        r#"
[pack]
name = "small"
fallback = "Say again?"

[[intent]]
label = "greeting"
examples = ["Hello", "Hi there"]
responses = ["Hey!"]

[[intent]]
label = "goodbye"
examples = ["Goodbye", "See you later"]
responses = ["Bye!"]
"#,
    )
    .unwrap();

    let pack = IntentPack::load(&path).unwrap();
    assert_eq!(pack.name, "small");
    assert_eq!(pack.labels(), vec!["greeting", "goodbye"]);

    let pipeline = ChatPipeline::from_pack(&pack, DEFAULT_ALPHA).unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(pipeline.respond("see you", &mut rng).unwrap(), "Bye!");
    assert_eq!(pipeline.responses().fallback(), "Say again?");
}

#[test]
fn config_points_at_pack_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let config_path = dir.path().join("chat.toml");
    let config = ChatConfig {
        alpha: 0.25,
        intents: Some(dir.path().join("pack.toml")),
        seed: Some(42),
        ..Default::default()
    };
    config.save(&config_path).unwrap();

    let loaded = ChatConfig::load(&config_path).unwrap();
    assert_eq!(loaded.alpha, 0.25);
    assert_eq!(loaded.intents, config.intents);
    assert_eq!(loaded.seed, Some(42));
    assert_eq!(loaded.bot_name, "Chatbot");
}
