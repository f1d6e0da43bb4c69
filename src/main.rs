//! intent-chat CLI: intent-classification chatbot.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use intent_chat::classifier::Prediction;
use intent_chat::config::ChatConfig;
use intent_chat::model::TrainedModel;
use intent_chat::pack::IntentPack;
use intent_chat::pipeline::ChatPipeline;
use intent_chat::session::ChatSession;

#[derive(Parser)]
#[command(name = "intent-chat", version, about = "Intent-classification chatbot")]
struct Cli {
    /// Config file (TOML).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Intent pack to train on and answer from (defaults to the bundled pack).
    #[arg(long, global = true)]
    intents: Option<PathBuf>,

    /// Additive smoothing constant. Only applies when training.
    #[arg(long, global = true, conflicts_with = "model")]
    alpha: Option<f64>,

    /// Seed for reproducible response selection.
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Load a persisted model instead of training at startup.
    #[arg(long, global = true)]
    model: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat interactively (default).
    Chat,

    /// Answer a single utterance.
    Ask {
        /// The utterance to answer.
        utterance: String,

        /// Also print the normalized text and every intent's score.
        #[arg(long)]
        explain: bool,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List intents with example and response counts.
    Intents,

    /// Print the fitted vocabulary in index order.
    Vocab,

    /// Train and persist the model.
    Train {
        /// Output path for the model file.
        #[arg(long)]
        out: PathBuf,
    },
}

#[derive(Serialize)]
struct AskOutput<'a> {
    utterance: &'a str,
    normalized: &'a str,
    intent: &'a str,
    score: f64,
    response: &'a str,
    ranking: &'a [Prediction],
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ChatConfig::load(path)?,
        None => ChatConfig::default(),
    };
    if let Some(alpha) = cli.alpha {
        config.alpha = alpha;
    }
    if cli.intents.is_some() {
        config.intents = cli.intents.clone();
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    let pack = match &config.intents {
        Some(path) => IntentPack::load(path)?,
        None => IntentPack::bundled()?,
    };
    let mut responses = pack.response_table();
    if let Some(fallback) = &config.fallback {
        responses.set_fallback(fallback.clone());
    }

    let model = match &cli.model {
        Some(path) => {
            let model = TrainedModel::load(path)?;
            if alpha_ignored(config.alpha, &model) {
                tracing::warn!(
                    configured = config.alpha,
                    trained = model.classifier().alpha(),
                    "configured alpha ignored, the loaded model keeps its trained alpha"
                );
            }
            model
        }
        None => TrainedModel::train(&pack.training_examples(), config.alpha)?,
    };
    let pipeline = ChatPipeline::new(model, responses);

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            ChatSession::new(&pipeline, rng)
                .with_bot_name(config.bot_name.clone())
                .with_prompt(config.prompt.clone())
                .run(stdin.lock(), stdout.lock())?;
        }

        Commands::Ask {
            utterance,
            explain,
            json,
        } => {
            let explanation = pipeline.explain(&utterance)?;
            let Some(best) = explanation.best() else {
                miette::bail!("the model has no intents");
            };
            let response = pipeline.responses().select(&best.intent, &mut rng);

            if json {
                let out = AskOutput {
                    utterance: &utterance,
                    normalized: &explanation.normalized,
                    intent: &best.intent,
                    score: best.score,
                    response,
                    ranking: &explanation.ranking,
                };
                let json = serde_json::to_string_pretty(&out).into_diagnostic()?;
                println!("{json}");
            } else {
                if explain {
                    println!("normalized: \"{}\"", explanation.normalized);
                    println!("known:      {}", explanation.known_tokens.join(" "));
                    println!("unknown:    {}", explanation.unknown_tokens.join(" "));
                    println!("scores:");
                    for (i, p) in explanation.ranking.iter().enumerate() {
                        println!("  {}. {}", i + 1, p);
                    }
                }
                println!("{}: {response}", config.bot_name);
            }
        }

        Commands::Intents => {
            let classifier = pipeline.model().classifier();
            println!("Pack \"{}\": {}", pack.name, pack.description);
            println!("Intents ({}):", pack.intents.len());
            for spec in &pack.intents {
                let trained = classifier
                    .example_count(&spec.label)
                    .map(|n| format!("{n} examples"))
                    .unwrap_or_else(|| "untrained".to_string());
                println!(
                    "  {} [{}] {} responses",
                    spec.label,
                    trained,
                    spec.responses.len()
                );
            }
            let mismatches = pipeline.audit();
            if !mismatches.is_empty() {
                println!("\nMismatches (answered with the fallback):");
                for m in &mismatches {
                    println!("  {m}");
                }
            }
        }

        Commands::Vocab => {
            let vocabulary = pipeline.model().vectorizer().vocabulary();
            println!("Vocabulary ({} tokens):", vocabulary.len());
            for (i, token) in vocabulary.tokens().iter().enumerate() {
                println!("  {i:>4} {token}");
            }
        }

        Commands::Train { out } => {
            pipeline.model().save(&out)?;
            let classifier = pipeline.model().classifier();
            println!(
                "Saved model to {} ({} intents, {} tokens, alpha {})",
                out.display(),
                classifier.intents().len(),
                classifier.vocabulary_len(),
                classifier.alpha()
            );
        }
    }

    Ok(())
}

/// Whether a configured smoothing constant differs from the one a loaded
/// model was trained with.
fn alpha_ignored(configured: f64, model: &TrainedModel) -> bool {
    configured != model.classifier().alpha()
}
