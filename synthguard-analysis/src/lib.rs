//! Sequence analysis engine for synthetic DNA constructs.
//!
//! Four independent analyzers run over one nucleotide sequence and are
//! collected into an [`AnalysisReport`]:
//!
//! - **Synthesis feasibility**: length, GC%, homopolymer runs, repeats, GC profile
//! - **Restriction mapping**: cut sites, single/double cutters, virtual gel position
//! - **Codon optimization**: optimal back-translation, CAI, velocity profile
//! - **Safety prediction**: Chi sites, hairpins, premature stops, risk score
//!
//! # Example
//!
//! ```
//! use synthguard_analysis::{Analyzer, SafetyStatus};
//!
//! let analyzer = Analyzer::new();
//! let report = analyzer.analyze("ATGGCTGGTGGCTAA");
//!
//! assert_eq!(report.safety.checks.chi.count, 1);
//! assert_eq!(report.safety.score, 80);
//! assert_eq!(report.safety.status, SafetyStatus::Stable);
//! assert!(!report.optimization.is_failed());
//! ```

pub mod config;
pub mod engine;
pub mod finding;
pub mod optimization;
pub mod report;
pub mod restriction;
pub mod safety;
pub mod synthesis;
pub mod verdict;

pub use config::{AnalysisConfig, OptimizationParams, RestrictionParams, SafetyParams, SynthesisParams};
pub use engine::Analyzer;
pub use finding::{Finding, FindingKind, Severity};
pub use optimization::{OptimizationOutcome, OptimizationReport, VelocityGraph};
pub use report::AnalysisReport;
pub use restriction::{EnzymeSite, RestrictionReport, RestrictionStatus};
pub use safety::{SafetyCheck, SafetyChecks, SafetyReport, SafetyStatus};
pub use synthesis::{GcPlot, SynthesisReport};
pub use verdict::{CheckStatus, Risk};

pub use synthguard_core::{Result, Scored, Summarizable, SynthguardError};

/// Analyze `seq` with default parameters and tables.
pub fn analyze(seq: impl AsRef<[u8]>) -> AnalysisReport {
    Analyzer::new().analyze(seq)
}

/// Round to `places` decimals, halves away from zero.
///
/// The tie test runs on the scaled binary value, so a literal such as 0.745
/// (stored just below the tie) still rounds up to 0.75.
pub(crate) fn round_to(x: f64, places: i32) -> f64 {
    let f = 10f64.powi(places);
    (x * f).round() / f
}
