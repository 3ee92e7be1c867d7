use std::cmp::Ordering;

use serde::Serialize;

use crate::error::ScoreError;
use crate::types::{ScoreInput, ScoreResult};

const OUTLIER_TOP_N: usize = 20;
const WRONG_UTTERANCE_NOTE_CUTOFF: u32 = 50;

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub schema_version: u32,
    pub meta: Meta,
    pub cases: Vec<CaseReport>,
    pub aggregates: AggregateReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct Meta {
    pub generated_at: String,
    pub analyzer: String,
    pub case_count: usize,
}

/// The two exercise families of the practice app, plus a fallback for
/// fixture rows that do not say.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseKind {
    Repeat,
    Reading,
    Unknown,
}

pub fn infer_exercise_kind(value: &str) -> ExerciseKind {
    let normalized = value.to_ascii_lowercase();
    if normalized.contains("repeat") {
        ExerciseKind::Repeat
    } else if normalized.contains("read") {
        ExerciseKind::Reading
    } else {
        ExerciseKind::Unknown
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CaseReport {
    pub id: String,
    pub kind: ExerciseKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_sound: Option<String>,
    pub has_reference: bool,
    pub accuracy: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phrase_match: Option<u32>,
    pub correct_word_count: u32,
    pub incorrect_word_count: u32,
    pub incorrect_word_ratio: f32,
    pub suggestion_count: u32,
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AggregateReport {
    pub counts: AggregateCounts,
    pub global: AggregateMetrics,
    pub by_kind: AggregateByKind,
    pub outliers: OutlierReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct AggregateCounts {
    pub total: u32,
    pub with_target_sound: u32,
    pub without_target_sound: u32,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct AggregateMetrics {
    pub accuracy: Option<MetricDistribution>,
    pub phrase_match: Option<MetricDistribution>,
    pub incorrect_word_ratio: Option<MetricDistribution>,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct AggregateByKind {
    pub repeat: AggregateMetrics,
    pub reading: AggregateMetrics,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unknown: Option<AggregateMetrics>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricDistribution {
    pub mean: f32,
    pub p50: f32,
    pub p90: f32,
    pub p95: f32,
    pub p99: f32,
}

/// Worst performers, ranked lowest score first. Low accuracy, not high, is
/// what a reviewer wants surfaced.
#[derive(Debug, Clone, Serialize)]
pub struct OutlierReport {
    pub lowest_accuracy: Vec<OutlierEntry>,
    pub lowest_phrase_match: Vec<OutlierEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OutlierEntry {
    pub id: String,
    pub kind: ExerciseKind,
    pub value: f32,
}

pub fn compute_case_report(
    id: &str,
    kind: ExerciseKind,
    input: &ScoreInput,
    result: &ScoreResult,
) -> Result<CaseReport, ScoreError> {
    let mut notes = Vec::new();
    let has_reference = !input.reference_phrase.trim().is_empty();

    if input.transcript.trim().is_empty() {
        notes.push("no_speech_detected".to_string());
    }
    if !has_reference {
        notes.push("reference_missing".to_string());
    }
    if result
        .phrase_match
        .is_some_and(|pm| pm < WRONG_UTTERANCE_NOTE_CUTOFF)
    {
        notes.push("wrong_utterance".to_string());
    }

    let classified = result.correct_words.len() + result.incorrect_words.len();
    let incorrect_word_ratio = if classified == 0 {
        0.0
    } else {
        checked_f32(
            result.incorrect_words.len() as f64 / classified as f64,
            "case.incorrect_word_ratio",
        )?
    };

    Ok(CaseReport {
        id: id.to_string(),
        kind,
        target_sound: input.target_sound.clone(),
        has_reference,
        accuracy: result.accuracy,
        phrase_match: result.phrase_match,
        correct_word_count: to_u32(result.correct_words.len()),
        incorrect_word_count: to_u32(result.incorrect_words.len()),
        incorrect_word_ratio,
        suggestion_count: to_u32(result.suggestions.len()),
        notes,
    })
}

pub fn aggregate_reports(cases: &[CaseReport]) -> AggregateReport {
    let with_target_sound = cases
        .iter()
        .filter(|case| case.target_sound.is_some())
        .count();

    let all: Vec<&CaseReport> = cases.iter().collect();
    let global = aggregate_metrics_from_cases(&all);
    let repeat = aggregate_metrics_for_kind(&all, ExerciseKind::Repeat);
    let reading = aggregate_metrics_for_kind(&all, ExerciseKind::Reading);
    let unknown = aggregate_metrics_for_kind(&all, ExerciseKind::Unknown);
    let outliers = build_outliers(&all, OUTLIER_TOP_N);

    AggregateReport {
        counts: AggregateCounts {
            total: to_u32(cases.len()),
            with_target_sound: to_u32(with_target_sound),
            without_target_sound: to_u32(cases.len().saturating_sub(with_target_sound)),
        },
        global,
        by_kind: AggregateByKind {
            repeat,
            reading,
            unknown: (!kind_is_empty(&all, ExerciseKind::Unknown)).then_some(unknown),
        },
        outliers,
    }
}

fn aggregate_metrics_for_kind(cases: &[&CaseReport], kind: ExerciseKind) -> AggregateMetrics {
    let filtered: Vec<&CaseReport> = cases
        .iter()
        .copied()
        .filter(|case| case.kind == kind)
        .collect();
    aggregate_metrics_from_cases(&filtered)
}

fn kind_is_empty(cases: &[&CaseReport], kind: ExerciseKind) -> bool {
    !cases.iter().any(|case| case.kind == kind)
}

fn aggregate_metrics_from_cases(cases: &[&CaseReport]) -> AggregateMetrics {
    let mut accuracy = Vec::new();
    let mut phrase_match = Vec::new();
    let mut incorrect_word_ratio = Vec::new();

    for case in cases {
        accuracy.push(case.accuracy as f64);
        if let Some(pm) = case.phrase_match {
            phrase_match.push(pm as f64);
        }
        if case.correct_word_count + case.incorrect_word_count > 0 {
            incorrect_word_ratio.push(case.incorrect_word_ratio as f64);
        }
    }

    AggregateMetrics {
        accuracy: distribution_or_none(&accuracy),
        phrase_match: distribution_or_none(&phrase_match),
        incorrect_word_ratio: distribution_or_none(&incorrect_word_ratio),
    }
}

fn build_outliers(cases: &[&CaseReport], top_n: usize) -> OutlierReport {
    let lowest_accuracy = ranked_outliers(cases, top_n, |case| Some(case.accuracy as f64));
    let lowest_phrase_match =
        ranked_outliers(cases, top_n, |case| case.phrase_match.map(|pm| pm as f64));

    OutlierReport {
        lowest_accuracy,
        lowest_phrase_match,
    }
}

fn ranked_outliers(
    cases: &[&CaseReport],
    top_n: usize,
    metric: impl Fn(&CaseReport) -> Option<f64>,
) -> Vec<OutlierEntry> {
    let mut entries: Vec<OutlierEntry> = cases
        .iter()
        .filter_map(|case| {
            metric(case).map(|value| OutlierEntry {
                id: case.id.clone(),
                kind: case.kind,
                value: value as f32,
            })
        })
        .collect();

    entries.sort_by(|a, b| {
        a.value
            .partial_cmp(&b.value)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });
    entries.truncate(top_n);
    entries
}

fn distribution_or_none(values: &[f64]) -> Option<MetricDistribution> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let mean_value = mean(&sorted);
    let p50_value = percentile_sorted(&sorted, 0.5);
    let p90_value = percentile_sorted(&sorted, 0.9);
    let p95_value = percentile_sorted(&sorted, 0.95);
    let p99_value = percentile_sorted(&sorted, 0.99);

    Some(MetricDistribution {
        mean: checked_f32(mean_value, "aggregate.mean").ok()?,
        p50: checked_f32(p50_value, "aggregate.p50").ok()?,
        p90: checked_f32(p90_value, "aggregate.p90").ok()?,
        p95: checked_f32(p95_value, "aggregate.p95").ok()?,
        p99: checked_f32(p99_value, "aggregate.p99").ok()?,
    })
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn percentile_sorted(sorted_values: &[f64], percentile: f64) -> f64 {
    if sorted_values.is_empty() {
        return 0.0;
    }
    if sorted_values.len() == 1 {
        return sorted_values[0];
    }

    let clamped = percentile.clamp(0.0, 1.0);
    let max_index = (sorted_values.len() - 1) as f64;
    let rank = clamped * max_index;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        sorted_values[lower]
    } else {
        let weight = rank - lower as f64;
        sorted_values[lower] * (1.0 - weight) + sorted_values[upper] * weight
    }
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

fn checked_f32(value: f64, metric_name: &str) -> Result<f32, ScoreError> {
    if !value.is_finite() {
        return Err(ScoreError::invalid_input(format!(
            "metric '{metric_name}' produced non-finite value: {value}"
        )));
    }
    if value < f32::MIN as f64 || value > f32::MAX as f64 {
        return Err(ScoreError::invalid_input(format!(
            "metric '{metric_name}' out of f32 range: {value}"
        )));
    }
    Ok(value as f32)
}
