use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;
use speech_score_rs::{
    aggregate_reports, compute_case_report, infer_exercise_kind, CaseReport, Meta,
    PronunciationScorerBuilder, Report, ScoreInput, ScorerConfig, SoundAnalysis,
    StaticPhoneticAnalyzer,
};

#[path = "score_report/json_report_formatter.rs"]
mod json_report_formatter;
#[path = "score_report/text_report_formatter.rs"]
mod text_report_formatter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Text => "txt",
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "score_report")]
#[command(about = "Generate deterministic pronunciation-scoring reports from recorded cases")]
struct Args {
    #[arg(
        long,
        env = "SPEECH_SCORE_REPORT_CASES",
        default_value = "test-data/scoring/cases.json"
    )]
    cases: PathBuf,
    #[arg(long, env = "SPEECH_SCORE_REPORT_OUT")]
    out: Option<PathBuf>,
    #[arg(long, env = "SPEECH_SCORE_REPORT_INVENTORY")]
    inventory: Option<PathBuf>,
    #[arg(long, env = "SPEECH_SCORE_REPORT_LIMIT")]
    limit: Option<usize>,
    #[arg(long, env = "SPEECH_SCORE_REPORT_OFFSET", default_value_t = 0)]
    offset: usize,
    #[arg(
        long,
        env = "SPEECH_SCORE_REPORT_FORMAT",
        value_enum,
        default_value_t = OutputFormat::Json
    )]
    output_format: OutputFormat,
}

/// One recorded scoring case: the transcript the speech-to-text service
/// produced, the prompted phrase, and optionally the per-sound analysis
/// captured from the richer assessment backend at recording time.
#[derive(Debug, Clone, Deserialize)]
struct Case {
    id: String,
    #[serde(default)]
    kind: String,
    transcript: String,
    #[serde(default)]
    reference_phrase: String,
    #[serde(default)]
    target_sound: Option<String>,
    #[serde(default)]
    analysis: HashMap<String, CaseSoundAnalysis>,
}

#[derive(Debug, Clone, Deserialize)]
struct CaseSoundAnalysis {
    percentage: u32,
    #[serde(default)]
    problematic: Vec<String>,
}

fn main() {
    if let Err(message) = run() {
        eprintln!("{message}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = Args::parse();
    let repo_root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));

    let cases_path = resolve_path(&repo_root, &args.cases);
    require_path_exists(&cases_path, "Missing --cases path.")?;
    let inventory_path = args
        .inventory
        .as_ref()
        .map(|path| resolve_path(&repo_root, path));
    if let Some(path) = inventory_path.as_ref() {
        require_path_exists(path, "Missing --inventory path.")?;
    }
    let out_path = resolve_out_path(&repo_root, args.out.as_ref(), args.output_format);

    let mut cases = load_cases(&cases_path)?;
    if args.offset > 0 {
        cases = cases.into_iter().skip(args.offset).collect();
    }
    if let Some(limit) = args.limit {
        cases.truncate(limit);
    }
    if cases.is_empty() {
        return Err("No cases selected after applying offset/limit.".to_string());
    }

    let progress = ProgressBar::new(cases.len() as u64);
    progress.set_style(
        ProgressStyle::with_template(
            "[{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta}) {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=>-"),
    );
    progress.set_message("starting...");

    let mut case_reports: Vec<CaseReport> = Vec::with_capacity(cases.len());
    for case in &cases {
        progress.set_message(case.id.clone());
        let report = score_case(case, inventory_path.as_deref())?;
        case_reports.push(report);
        progress.inc(1);
    }
    progress.finish_with_message("scoring pass complete");

    let aggregates = aggregate_reports(&case_reports);
    let report = Report {
        schema_version: 1,
        meta: Meta {
            generated_at: Utc::now().to_rfc3339(),
            analyzer: "static".to_string(),
            case_count: case_reports.len(),
        },
        cases: case_reports,
        aggregates,
    };

    match args.output_format {
        OutputFormat::Json => json_report_formatter::write_report(&out_path, &report)?,
        OutputFormat::Text => text_report_formatter::write_summary(&out_path, &report)?,
    }
    println!("{}", out_path.display());
    Ok(())
}

fn score_case(case: &Case, inventory_path: Option<&Path>) -> Result<CaseReport, String> {
    let sounds: HashMap<String, SoundAnalysis> = case
        .analysis
        .iter()
        .map(|(sound, data)| {
            (
                sound.clone(),
                SoundAnalysis {
                    percentage: data.percentage,
                    problematic: data.problematic.clone(),
                },
            )
        })
        .collect();

    let config = ScorerConfig {
        inventory_path: inventory_path
            .map(|path| path.to_string_lossy().into_owned())
            .unwrap_or_default(),
        ..ScorerConfig::default()
    };
    let scorer = PronunciationScorerBuilder::new(config)
        .with_analyzer(Box::new(StaticPhoneticAnalyzer::new(sounds)))
        .build()
        .map_err(|err| format!("{}: failed to build scorer: {err}", case.id))?;

    let input = ScoreInput {
        transcript: case.transcript.clone(),
        reference_phrase: case.reference_phrase.clone(),
        target_sound: case.target_sound.clone(),
    };
    let result = scorer.score(&input);

    compute_case_report(&case.id, infer_exercise_kind(&case.kind), &input, &result)
        .map_err(|err| format!("{}: metric computation failed: {err}", case.id))
}

fn load_cases(path: &Path) -> Result<Vec<Case>, String> {
    let contents = fs::read_to_string(path)
        .map_err(|err| format!("Failed to read cases file '{}': {err}", path.display()))?;
    let cases: Vec<Case> = serde_json::from_str(&contents)
        .map_err(|err| format!("Failed to parse cases file '{}': {err}", path.display()))?;
    if cases.is_empty() {
        return Err(format!("No cases found in '{}'.", path.display()));
    }
    Ok(cases)
}

fn resolve_out_path(
    repo_root: &Path,
    out: Option<&PathBuf>,
    output_format: OutputFormat,
) -> PathBuf {
    if let Some(path) = out {
        return resolve_path(repo_root, path);
    }

    let run_id = Utc::now().format("%Y%m%dT%H%M%SZ");
    repo_root
        .join("target")
        .join("score_reports")
        .join(format!(
            "score-report-{run_id}.{}",
            output_format.extension()
        ))
}

fn resolve_path(repo_root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        repo_root.join(path)
    }
}

fn require_path_exists(path: &Path, message: &str) -> Result<(), String> {
    if path.exists() {
        return Ok(());
    }
    Err(format!("{message} Missing path: {}", path.display()))
}
