pub mod config;
pub mod error;
pub mod pipeline;
pub mod scoring;
pub mod types;

pub use config::ScorerConfig;
pub use error::ScoreError;
pub use pipeline::builder::PronunciationScorerBuilder;
pub use pipeline::defaults::{NullPhoneticAnalyzer, StaticPhoneticAnalyzer};
pub use pipeline::runtime::PronunciationScorer;
pub use pipeline::traits::PhoneticAnalyzer;
pub use scoring::report::{
    aggregate_reports, compute_case_report, infer_exercise_kind, AggregateReport, CaseReport,
    ExerciseKind, Meta, MetricDistribution, OutlierEntry, Report,
};
pub use scoring::{
    analyze_target_sound, classify_words, score_basic_accuracy, score_phrase_match, SoundInventory,
};
pub use types::{ScoreInput, ScoreResult, SoundAnalysis, WordMatch};
