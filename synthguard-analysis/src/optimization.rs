//! Codon optimization: back-translate the protein with each amino acid's
//! optimal codon, then compare CAI, GC% and the per-codon velocity profile
//! of the original and optimized sequences.

use synthguard_core::{Result, Scored, Summarizable, SynthguardError};
use synthguard_seq::nucleotide::gc_percent;
use synthguard_seq::{CodonWeights, GeneticCode};

use crate::config::OptimizationParams;
use crate::round_to;

/// Error marker reported in place of an optimization that could not run.
pub const INVALID_SEQUENCE: &str = "Invalid Sequence";

/// Downsampled per-codon weight series for the original and optimized
/// sequences.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VelocityGraph {
    /// 1-indexed codon number of each point.
    pub labels: Vec<usize>,
    pub original: Vec<f64>,
    pub optimized: Vec<f64>,
}

/// Result of a successful optimization.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimizationReport {
    pub original_dna: String,
    pub optimized_dna: String,
    /// Translated protein, stops as `*`.
    pub protein: String,
    pub cai_before: f64,
    pub cai_after: f64,
    pub gc_before: f64,
    pub gc_after: f64,
    pub velocity_graph: VelocityGraph,
}

impl OptimizationReport {
    /// Number of codons that differ between the original and optimized sequences.
    pub fn codons_changed(&self) -> usize {
        self.original_dna
            .as_bytes()
            .chunks_exact(3)
            .zip(self.optimized_dna.as_bytes().chunks_exact(3))
            .filter(|(a, b)| a != b)
            .count()
    }
}

impl Scored for OptimizationReport {
    /// CAI of the optimized sequence.
    fn score(&self) -> f64 {
        self.cai_after
    }
}

/// Optimizer section of the aggregate report.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum OptimizationOutcome {
    Optimized(OptimizationReport),
    /// The sequence could not be translated; nothing else was computed.
    Failed { error: String, reason: String },
}

impl OptimizationOutcome {
    /// The report, when optimization succeeded.
    pub fn report(&self) -> Option<&OptimizationReport> {
        match self {
            OptimizationOutcome::Optimized(r) => Some(r),
            OptimizationOutcome::Failed { .. } => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, OptimizationOutcome::Failed { .. })
    }
}

impl Summarizable for OptimizationOutcome {
    fn summary(&self) -> String {
        match self {
            OptimizationOutcome::Optimized(r) => format!(
                "optimization: CAI {:.2} -> {:.2}, GC {:.1}% -> {:.1}%, {} codons changed",
                r.cai_before,
                r.cai_after,
                r.gc_before,
                r.gc_after,
                r.codons_changed(),
            ),
            OptimizationOutcome::Failed { error, reason } => {
                format!("optimization: {} ({})", error, reason)
            }
        }
    }
}

/// Per-codon weights of every full codon in reading order.
pub fn velocity_profile(seq: &[u8], weights: &CodonWeights, params: &OptimizationParams) -> Vec<f64> {
    weights.profile(seq, params.unknown_codon_weight)
}

/// Codon Adaptation Index: geometric mean of the codon weights, rounded to 2
/// decimals.
///
/// Unknown codons weigh `unknown_codon_weight`; a weight ≤ 0 contributes
/// `zero_weight_log` instead of ln(w). Sequences shorter than one codon
/// score 0.0.
pub fn codon_adaptation_index(seq: &[u8], weights: &CodonWeights, params: &OptimizationParams) -> f64 {
    let profile = velocity_profile(seq, weights, params);
    if profile.is_empty() {
        return 0.0;
    }
    let log_sum: f64 = profile
        .iter()
        .map(|&w| if w > 0.0 { w.ln() } else { params.zero_weight_log })
        .sum();
    round_to((log_sum / profile.len() as f64).exp(), 2)
}

/// Back-translate a protein using the optimal codon of each residue.
///
/// # Errors
///
/// Returns an error if a residue has no optimal codon in `weights`.
pub fn back_translate(protein: &[u8], weights: &CodonWeights) -> Result<Vec<u8>> {
    let mut dna = Vec::with_capacity(protein.len() * 3);
    for &aa in protein {
        let codon = weights.optimal_codon(aa).ok_or_else(|| {
            SynthguardError::InvalidInput(format!("no codon for amino acid '{}'", aa as char))
        })?;
        dna.extend_from_slice(&codon);
    }
    Ok(dna)
}

/// Keep every `stride`-th point so that at most about `max_points` remain.
fn downsample(values: &[f64], stride: usize) -> Vec<f64> {
    values.iter().step_by(stride).copied().collect()
}

/// Optimize `seq` for the organism described by `weights`.
///
/// # Errors
///
/// Fails when `seq` cannot be translated (length not a multiple of 3 or an
/// undefined codon).
pub fn optimize_sequence(
    seq: &[u8],
    code: &GeneticCode,
    weights: &CodonWeights,
    params: &OptimizationParams,
) -> Result<OptimizationReport> {
    let protein = code.translate(seq)?;
    let optimized = back_translate(&protein, weights)?;

    let vel_orig = velocity_profile(seq, weights, params);
    let vel_opt = velocity_profile(&optimized, weights, params);
    let stride = (vel_orig.len() / params.max_points.max(1)).max(1);
    let velocity_graph = VelocityGraph {
        labels: (0..vel_orig.len()).step_by(stride).map(|i| i + 1).collect(),
        original: downsample(&vel_orig, stride),
        optimized: downsample(&vel_opt, stride),
    };

    Ok(OptimizationReport {
        original_dna: String::from_utf8_lossy(seq).into_owned(),
        optimized_dna: String::from_utf8_lossy(&optimized).into_owned(),
        protein: String::from_utf8_lossy(&protein).into_owned(),
        cai_before: codon_adaptation_index(seq, weights, params),
        cai_after: codon_adaptation_index(&optimized, weights, params),
        gc_before: round_to(gc_percent(seq), 1),
        gc_after: round_to(gc_percent(&optimized), 1),
        velocity_graph,
    })
}

/// Run the optimizer, turning a translation failure into the error marker.
pub fn analyze_optimization(
    seq: &[u8],
    code: &GeneticCode,
    weights: &CodonWeights,
    params: &OptimizationParams,
) -> OptimizationOutcome {
    match optimize_sequence(seq, code, weights, params) {
        Ok(report) => {
            tracing::debug!(
                cai_before = report.cai_before,
                cai_after = report.cai_after,
                organism = weights.organism(),
                "codon optimization complete"
            );
            OptimizationOutcome::Optimized(report)
        }
        Err(e) => {
            tracing::warn!(error = %e, "codon optimization skipped");
            OptimizationOutcome::Failed {
                error: INVALID_SEQUENCE.to_string(),
                reason: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (GeneticCode, CodonWeights, OptimizationParams) {
        (
            GeneticCode::standard(),
            CodonWeights::e_coli_class_ii(),
            OptimizationParams::default(),
        )
    }

    #[test]
    fn cai_of_optimal_codons_is_one() {
        let (_, w, p) = setup();
        assert_eq!(codon_adaptation_index(b"CTGAAAGAATAA", &w, &p), 1.0);
    }

    #[test]
    fn cai_geometric_mean() {
        let (_, w, p) = setup();
        // GCA (0.586) and GCG (1.0): sqrt(0.586) = 0.7655
        assert_eq!(codon_adaptation_index(b"GCAGCG", &w, &p), 0.77);
    }

    #[test]
    fn cai_zero_weight_and_unknown() {
        let (_, w, p) = setup();
        // TAG has weight 0 → ln substituted by -9.0
        assert_eq!(codon_adaptation_index(b"TAG", &w, &p), round_to((-9.0f64).exp(), 2));
        // NNN → 0.1
        assert_eq!(codon_adaptation_index(b"NNN", &w, &p), 0.1);
    }

    #[test]
    fn cai_short_sequence() {
        let (_, w, p) = setup();
        assert_eq!(codon_adaptation_index(b"", &w, &p), 0.0);
        assert_eq!(codon_adaptation_index(b"AT", &w, &p), 0.0);
    }

    #[test]
    fn optimizes_to_preferred_codons() {
        let (code, w, p) = setup();
        // Met-Leu-Gly-Stop with poor codons
        let report = optimize_sequence(b"ATGCTAGGATAG", &code, &w, &p).unwrap();
        assert_eq!(report.protein, "MLG*");
        assert_eq!(report.optimized_dna, "ATGCTGGGTTAA");
        assert!(report.cai_after > report.cai_before);
        assert_eq!(report.cai_after, 1.0);
        assert_eq!(report.codons_changed(), 3);
    }

    #[test]
    fn gc_before_after_rounded() {
        let (code, w, p) = setup();
        let report = optimize_sequence(b"AAGGGC", &code, &w, &p).unwrap();
        // AAG GGC → AAA GGT
        assert_eq!(report.gc_before, 66.7);
        assert_eq!(report.gc_after, 33.3);
    }

    #[test]
    fn velocity_graph_downsampled() {
        let (code, w, p) = setup();
        let seq = b"GCA".repeat(250);
        let report = optimize_sequence(&seq, &code, &w, &p).unwrap();
        let graph = &report.velocity_graph;
        // 250 codons, stride 2
        assert_eq!(graph.original.len(), 125);
        assert_eq!(graph.optimized.len(), 125);
        assert_eq!(graph.labels.len(), 125);
        assert_eq!(graph.labels[..3], [1, 3, 5]);
        assert!(graph.original.iter().all(|&v| v == 0.586));
        assert!(graph.optimized.iter().all(|&v| v == 1.0));
    }

    #[test]
    fn velocity_graph_short_not_downsampled() {
        let (code, w, p) = setup();
        let report = optimize_sequence(b"ATGAAATAA", &code, &w, &p).unwrap();
        assert_eq!(report.velocity_graph.labels, vec![1, 2, 3]);
        assert_eq!(report.velocity_graph.original, vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn invalid_sequences_yield_error_marker() {
        let (code, w, p) = setup();
        for bad in [&b"ATGA"[..], &b"ATGNNN"[..]] {
            let outcome = analyze_optimization(bad, &code, &w, &p);
            assert!(outcome.is_failed());
            assert!(outcome.report().is_none());
            match outcome {
                OptimizationOutcome::Failed { error, .. } => assert_eq!(error, INVALID_SEQUENCE),
                _ => unreachable!(),
            }
        }
    }

    #[test]
    fn empty_sequence_optimizes_to_empty() {
        let (code, w, p) = setup();
        let report = optimize_sequence(b"", &code, &w, &p).unwrap();
        assert!(report.optimized_dna.is_empty());
        assert_eq!(report.cai_before, 0.0);
        assert!(report.velocity_graph.labels.is_empty());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn failed_outcome_serializes_as_error_object() {
        let (code, w, p) = setup();
        let json = serde_json::to_value(analyze_optimization(b"AT", &code, &w, &p)).unwrap();
        assert_eq!(json["error"], "Invalid Sequence");
        assert!(json.get("optimized_dna").is_none());
    }
}
