use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use speech_score_rs::{AggregateReport, ExerciseKind, MetricDistribution, Report};

pub fn write_summary(path: &Path, report: &Report) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|err| {
            format!(
                "Failed to create summary output directory '{}': {err}",
                parent.display()
            )
        })?;
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "score_report generated_at={} analyzer={} cases={}",
        report.meta.generated_at, report.meta.analyzer, report.meta.case_count
    );
    for case in &report.cases {
        let _ = writeln!(
            out,
            "case id={} kind={} accuracy={} phrase_match={} correct={} incorrect={} notes={}",
            case.id,
            kind_str(case.kind),
            case.accuracy,
            case.phrase_match
                .map_or_else(|| "-".to_string(), |pm| pm.to_string()),
            case.correct_word_count,
            case.incorrect_word_count,
            if case.notes.is_empty() {
                "-".to_string()
            } else {
                case.notes.join(",")
            }
        );
    }
    write_aggregates(&mut out, &report.aggregates);

    let mut file = File::create(path)
        .map_err(|err| format!("Failed to create summary file '{}': {err}", path.display()))?;
    file.write_all(out.as_bytes())
        .map_err(|err| format!("Failed to write summary file '{}': {err}", path.display()))?;
    Ok(())
}

fn write_aggregates(out: &mut String, aggregates: &AggregateReport) {
    let _ = writeln!(
        out,
        "counts total={} with_target_sound={} without_target_sound={}",
        aggregates.counts.total,
        aggregates.counts.with_target_sound,
        aggregates.counts.without_target_sound
    );
    write_distribution(out, "accuracy", aggregates.global.accuracy.as_ref());
    write_distribution(out, "phrase_match", aggregates.global.phrase_match.as_ref());
    write_distribution(
        out,
        "incorrect_word_ratio",
        aggregates.global.incorrect_word_ratio.as_ref(),
    );
    for entry in aggregates.outliers.lowest_accuracy.iter().take(5) {
        let _ = writeln!(
            out,
            "outlier id={} kind={} accuracy={:.0}",
            entry.id,
            kind_str(entry.kind),
            entry.value
        );
    }
}

fn write_distribution(out: &mut String, name: &str, distribution: Option<&MetricDistribution>) {
    match distribution {
        Some(d) => {
            let _ = writeln!(
                out,
                "{name} mean={:.2} p50={:.2} p90={:.2} p95={:.2} p99={:.2}",
                d.mean, d.p50, d.p90, d.p95, d.p99
            );
        }
        None => {
            let _ = writeln!(out, "{name} no_samples");
        }
    }
}

fn kind_str(kind: ExerciseKind) -> &'static str {
    match kind {
        ExerciseKind::Repeat => "repeat",
        ExerciseKind::Reading => "reading",
        ExerciseKind::Unknown => "unknown",
    }
}
