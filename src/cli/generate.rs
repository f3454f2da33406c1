// `draftloop generate`: run one request end to end

use anyhow::{Context, Result};
use clap::Args;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::Config;
use crate::content::{load_document, Brief, ReferenceExample, StyleProfile};
use crate::engine::{GenerationRequest, GenerationResult, ProgressEvent, RefinementLoop};
use crate::history::JsonlHistory;
use crate::providers::OpenAiCompletion;

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Brief file (TOML or JSON)
    #[arg(long)]
    pub brief: PathBuf,

    /// Style profile file (TOML or JSON)
    #[arg(long)]
    pub profile: PathBuf,

    /// JSON array of reference posts (strings or {"text": ...} objects)
    #[arg(long)]
    pub examples: Option<PathBuf>,

    /// Subject the history is kept under
    #[arg(long, default_value = "default")]
    pub subject: String,

    /// Override writer.max_iterations
    #[arg(long)]
    pub max_iterations: Option<usize>,

    /// Skip the parallel first drafts
    #[arg(long)]
    pub single_draft: bool,

    /// Seed for reproducible example and phrase selection
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the full result as JSON instead of the final text
    #[arg(long)]
    pub json: bool,

    /// Do not append the result to the history
    #[arg(long)]
    pub no_history: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ExampleEntry {
    Text(String),
    Object(ReferenceExample),
}

/// Load reference examples from a JSON array
pub fn load_examples(path: &Path) -> Result<Vec<ReferenceExample>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read examples file {}", path.display()))?;
    let entries: Vec<ExampleEntry> = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse examples in {}", path.display()))?;
    Ok(entries
        .into_iter()
        .map(|entry| match entry {
            ExampleEntry::Text(text) => ReferenceExample::new(text),
            ExampleEntry::Object(example) => example,
        })
        .collect())
}

/// Apply command-line overrides on top of the loaded config
pub fn apply_overrides(config: &mut Config, args: &GenerateArgs) -> Result<()> {
    if let Some(n) = args.max_iterations {
        config.writer.max_iterations = n;
    }
    if args.single_draft {
        config.writer.multi_draft_enabled = false;
    }
    config.validate().context("Invalid command-line overrides")?;
    Ok(())
}

fn describe(event: &ProgressEvent) -> String {
    match event {
        ProgressEvent::GenerationStarted {
            iteration,
            max_iterations,
        } if *iteration == 1 => format!("[1/{}] Writing first draft...", max_iterations),
        ProgressEvent::GenerationStarted {
            iteration,
            max_iterations,
        } => format!("[{}/{}] Revising draft...", iteration, max_iterations),
        ProgressEvent::ScoringStarted { iteration } => {
            format!("[{}] Critic is scoring...", iteration)
        }
        ProgressEvent::IterationComplete {
            iteration,
            score,
            approved,
        } => format!(
            "[{}] Score {}/100{}",
            iteration,
            score,
            if *approved { " - approved" } else { "" }
        ),
        ProgressEvent::Finished {
            termination,
            iterations,
            final_score,
        } => format!(
            "Finished after {} iteration(s): {:?}, final score {}/100",
            iterations, termination, final_score
        ),
    }
}

pub async fn run_generate(mut config: Config, args: GenerateArgs) -> Result<()> {
    apply_overrides(&mut config, &args)?;

    let brief: Brief = load_document(&args.brief).context("Failed to load brief")?;
    let profile: StyleProfile = load_document(&args.profile).context("Failed to load profile")?;
    let examples = match &args.examples {
        Some(path) => load_examples(path)?,
        None => Vec::new(),
    };

    let service = Arc::new(OpenAiCompletion::from_config(&config.provider)?);
    let history = Arc::new(JsonlHistory::new(config.history_dir.clone()));

    let mut engine = RefinementLoop::from_config(service, &config).with_history(history.clone());
    if let Some(seed) = args.seed {
        engine = engine.with_seed(seed);
    }

    let request = GenerationRequest::new(args.subject.clone(), brief, profile).with_examples(examples);

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let printer = async move {
        while let Some(event) = rx.recv().await {
            eprintln!("{}", describe(&event));
        }
    };
    let (result, ()) = tokio::join!(engine.run_with_progress(&request, Some(tx)), printer);
    let result: GenerationResult = result?;

    if !args.no_history {
        let path = history.append(&result)?;
        tracing::debug!("Saved result to {}", path.display());
    }

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&result).context("Failed to serialize result")?
        );
    } else {
        println!("{}", result.final_text);
        eprintln!(
            "\nstatus: {} | score: {}/100 | iterations: {}",
            result.status, result.final_score, result.iterations
        );
    }

    Ok(())
}
