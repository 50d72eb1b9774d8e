//! CLI command definitions for debate-arena.
//!
//! Thin wrappers over the core: roster parsing, output-directory setup,
//! and file writing happen here, never inside the engine or runner.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use tracing::{info, warn};

use crate::debate::{lincoln_douglas, DebateEngine};
use crate::judging::{result_to_markdown, JudgePanel};
use crate::matrix::{
    build_matrix_schedule, estimate_matrix_cost, matrix_result_to_json, matrix_to_markdown,
    MatrixRunner, DEFAULT_TOKENS_PER_DEBATE, DEFAULT_TOKENS_PER_JUDGE,
};
use crate::models::{DebateModel, ModelConfig, OpenRouterModel};

/// Default output directory for debate artifacts.
const DEFAULT_OUTPUT_DIR: &str = "./debates";

/// AI debate tournaments with blind judging panels.
#[derive(Parser)]
#[command(name = "debate-arena")]
#[command(about = "Run AI-vs-AI debates, blind judging panels, and round-robin tournaments")]
#[command(version)]
#[command(
    long_about = "debate-arena stages formal Lincoln-Douglas debates between model backends,\n\
                  scores them with blind judge panels, and runs full round-robin tournaments.\n\n\
                  Models are given as comma-separated name=model_id pairs, e.g.:\n  \
                  debate-arena matrix \"Resolved: ...\" --models \"Claude Opus 4.5=anthropic/claude-opus-4.5,GPT-5.2=openai/gpt-5.2\""
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info", global = true)]
    pub log_level: String,
}

/// Available CLI subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Run a single debate between two models, judged by the rest.
    Debate(DebateArgs),

    /// Run a full round-robin matrix tournament.
    Matrix(MatrixArgs),

    /// Preview a tournament schedule and cost estimate without running it.
    Schedule(ScheduleArgs),
}

/// Arguments for `debate-arena debate`.
#[derive(Parser, Debug)]
pub struct DebateArgs {
    /// The debate resolution/topic.
    pub resolution: String,

    /// Affirmative model as name=model_id.
    #[arg(long)]
    pub affirmative: String,

    /// Negative model as name=model_id.
    #[arg(long)]
    pub negative: String,

    /// Judge models as comma-separated name=model_id pairs.
    #[arg(long)]
    pub judges: String,

    /// Output directory for the transcript document.
    #[arg(short = 'o', long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output: String,

    /// OpenRouter API key (can also be set via OPENROUTER_API_KEY env var).
    #[arg(long, env = "OPENROUTER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}

/// Arguments for `debate-arena matrix`.
#[derive(Parser, Debug)]
pub struct MatrixArgs {
    /// The debate resolution/topic.
    pub resolution: String,

    /// Participating models as comma-separated name=model_id pairs.
    #[arg(long)]
    pub models: String,

    /// Output directory for transcripts, summary, and the JSON record.
    #[arg(short = 'o', long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output: String,

    /// OpenRouter API key (can also be set via OPENROUTER_API_KEY env var).
    #[arg(long, env = "OPENROUTER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}

/// Arguments for `debate-arena schedule`.
#[derive(Parser, Debug)]
pub struct ScheduleArgs {
    /// Participating model names, comma-separated.
    #[arg(long)]
    pub models: String,

    /// Assumed tokens per debate for the cost estimate.
    #[arg(long, default_value_t = DEFAULT_TOKENS_PER_DEBATE)]
    pub tokens_per_debate: u64,

    /// Assumed tokens per judge pass for the cost estimate.
    #[arg(long, default_value_t = DEFAULT_TOKENS_PER_JUDGE)]
    pub tokens_per_judge: u64,
}

/// Parse CLI arguments from the process environment.
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Run the CLI with parsed arguments.
pub async fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Debate(args) => run_debate(args).await,
        Commands::Matrix(args) => run_matrix(args).await,
        Commands::Schedule(args) => run_schedule(args),
    }
}

/// Parse a single name=model_id roster entry into a model adapter.
fn parse_model_spec(
    spec: &str,
    api_key: Option<&str>,
) -> anyhow::Result<(String, Arc<dyn DebateModel>)> {
    let (name, model_id) = spec
        .split_once('=')
        .with_context(|| format!("Invalid model spec '{}', expected name=model_id", spec))?;
    let name = name.trim();
    let model_id = model_id.trim();
    if name.is_empty() || model_id.is_empty() {
        anyhow::bail!("Invalid model spec '{}', expected name=model_id", spec);
    }

    // Provider label from the model id's routing prefix.
    let provider = model_id
        .split('/')
        .next()
        .map(|p| {
            let mut label = p.to_string();
            if let Some(first) = label.get_mut(0..1) {
                first.make_ascii_uppercase();
            }
            label
        })
        .unwrap_or_else(|| "Unknown".to_string());

    let config = ModelConfig::new(provider, model_id, name);
    let model = match api_key {
        Some(key) => OpenRouterModel::with_key(config, key.to_string()),
        None => OpenRouterModel::from_env(config)?,
    };
    Ok((name.to_string(), Arc::new(model)))
}

/// Parse a comma-separated roster into model adapters.
fn parse_roster(
    specs: &str,
    api_key: Option<&str>,
) -> anyhow::Result<Vec<(String, Arc<dyn DebateModel>)>> {
    specs
        .split(',')
        .filter(|s| !s.trim().is_empty())
        .map(|spec| parse_model_spec(spec, api_key))
        .collect()
}

fn ensure_output_dir(path: &str) -> anyhow::Result<PathBuf> {
    let dir = PathBuf::from(path);
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    Ok(dir)
}

async fn run_debate(args: DebateArgs) -> anyhow::Result<()> {
    let output_dir = ensure_output_dir(&args.output)?;

    let api_key = args.api_key.as_deref();
    let (aff_name, affirmative) = parse_model_spec(&args.affirmative, api_key)?;
    let (neg_name, negative) = parse_model_spec(&args.negative, api_key)?;
    let judges = parse_roster(&args.judges, api_key)?;

    anyhow::ensure!(
        judges
            .iter()
            .all(|(name, _)| name != &aff_name && name != &neg_name),
        "Judges must not include either debater"
    );

    let engine = DebateEngine::new(lincoln_douglas());
    let transcript = engine
        .run_debate(&args.resolution, affirmative.as_ref(), negative.as_ref())
        .await?;

    let panel = JudgePanel::new(judges.into_iter().map(|(_, model)| model).collect());
    let result = panel.judge_debate(&transcript).await?;

    let mut document = crate::debate::transcript_to_markdown(&transcript);
    document.push_str(&result_to_markdown(&result));

    let path = output_dir.join(format!("debate-{}.md", transcript.id));
    fs::write(&path, document)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    info!(path = %path.display(), winner = %result.winner_model, "Debate saved");
    Ok(())
}

async fn run_matrix(args: MatrixArgs) -> anyhow::Result<()> {
    let output_dir = ensure_output_dir(&args.output)?;
    let models = parse_roster(&args.models, args.api_key.as_deref())?;

    let run_id = Utc::now().format("%Y%m%d-%H%M%S").to_string();
    let names: Vec<String> = models.iter().map(|(name, _)| name.clone()).collect();
    let schedule = build_matrix_schedule(&names);

    info!(
        models = names.len(),
        debates = schedule.len(),
        run_id = %run_id,
        "Starting matrix tournament"
    );

    // Per-round checkpoint: transcript document plus one JSONL line per
    // flattened record, written before the next round starts.
    let checkpoint_dir = output_dir.clone();
    let rounds_path = output_dir.join(format!("matrix-{}-rounds.jsonl", run_id));
    let rounds_path_cb = rounds_path.clone();

    let mut runner = MatrixRunner::new(models, lincoln_douglas())?
        .with_on_debate_complete(Box::new(move |_index, record, transcript, result| {
            let mut document = crate::debate::transcript_to_markdown(transcript);
            document.push_str(&result_to_markdown(result));
            let path = checkpoint_dir.join(format!("debate-{}.md", transcript.id));
            if let Err(error) = fs::write(&path, document) {
                warn!(%error, path = %path.display(), "Failed to write transcript");
            }

            if let Err(error) = append_jsonl(&rounds_path_cb, record) {
                warn!(%error, "Failed to append round checkpoint");
            }
        }));

    let result = runner.run_matrix(&args.resolution, &schedule).await?;

    let summary_path = output_dir.join(format!("matrix-{}.md", run_id));
    fs::write(&summary_path, matrix_to_markdown(&result))
        .with_context(|| format!("Failed to write {}", summary_path.display()))?;

    let record_path = output_dir.join(format!("matrix-{}.json", run_id));
    fs::write(&record_path, matrix_result_to_json(&result)?)
        .with_context(|| format!("Failed to write {}", record_path.display()))?;

    info!(
        summary = %summary_path.display(),
        record = %record_path.display(),
        "Tournament saved"
    );
    Ok(())
}

fn append_jsonl<T: serde::Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    use std::io::Write;

    let mut line = serde_json::to_string(value)?;
    line.push('\n');
    let mut file = fs::OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(line.as_bytes())?;
    Ok(())
}

fn run_schedule(args: ScheduleArgs) -> anyhow::Result<()> {
    let names: Vec<String> = args
        .models
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    anyhow::ensure!(names.len() >= 2, "Need at least 2 model names");

    let schedule = build_matrix_schedule(&names);
    let estimate =
        estimate_matrix_cost(names.len(), args.tokens_per_debate, args.tokens_per_judge);

    println!("Schedule for {} models ({} debates):", names.len(), schedule.len());
    for entry in &schedule {
        println!(
            "  {:>3}. {} (AFF) vs {} (NEG) — judges: {}",
            entry.debate_index + 1,
            entry.affirmative_name,
            entry.negative_name,
            entry.judge_names.join(", ")
        );
    }
    println!();
    println!("Estimated cost:");
    println!("  Debate tokens: {}", estimate.estimated_debate_tokens);
    println!("  Judge tokens:  {}", estimate.estimated_judge_tokens);
    println!("  Total tokens:  {}", estimate.estimated_total_tokens);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_structure_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_model_spec_rejects_malformed() {
        assert!(parse_model_spec("no-equals-sign", Some("key")).is_err());
        assert!(parse_model_spec("=anthropic/claude-opus-4.5", Some("key")).is_err());
        assert!(parse_model_spec("Claude=", Some("key")).is_err());
    }

    #[test]
    fn test_parse_model_spec_with_explicit_key() {
        let (name, model) =
            parse_model_spec("Claude Opus 4.5=anthropic/claude-opus-4.5", Some("key"))
                .expect("valid spec");
        assert_eq!(name, "Claude Opus 4.5");
        assert_eq!(model.model_id(), "anthropic/claude-opus-4.5");
        assert_eq!(model.provider(), "Anthropic");
    }

    #[test]
    fn test_schedule_command_previews_without_credentials() {
        let args = ScheduleArgs {
            models: "Alpha,Beta,Gamma".to_string(),
            tokens_per_debate: DEFAULT_TOKENS_PER_DEBATE,
            tokens_per_judge: DEFAULT_TOKENS_PER_JUDGE,
        };
        assert!(run_schedule(args).is_ok());
    }

    #[test]
    fn test_schedule_command_rejects_single_model() {
        let args = ScheduleArgs {
            models: "Alpha".to_string(),
            tokens_per_debate: DEFAULT_TOKENS_PER_DEBATE,
            tokens_per_judge: DEFAULT_TOKENS_PER_JUDGE,
        };
        assert!(run_schedule(args).is_err());
    }
}
