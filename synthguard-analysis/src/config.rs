//! Tunable parameters for the four analyzers.
//!
//! Every struct's `Default` carries the thresholds the reports are calibrated
//! against; hosts only need to override what they want to change.

/// Parameters for the synthesis feasibility checks.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SynthesisParams {
    /// Shortest synthesizable length in bp (default: 100).
    pub min_length: usize,
    /// Length above which synthesis gets harder (default: 10000).
    pub max_length: usize,
    /// Optimal GC% range, inclusive (default: 35–65).
    pub gc_optimal: (f64, f64),
    /// Acceptable GC% range, inclusive (default: 25–75).
    pub gc_acceptable: (f64, f64),
    /// Minimum homopolymer run length that is reported (default: 6).
    pub homopolymer_threshold: usize,
    /// Repeat scanner window width (default: 20).
    pub repeat_window: usize,
    /// GC profile window width (default: 50).
    pub gc_window: usize,
    /// Upper bound on GC profile points, sets the stride (default: 200).
    pub gc_max_points: usize,
}

impl Default for SynthesisParams {
    fn default() -> Self {
        Self {
            min_length: 100,
            max_length: 10_000,
            gc_optimal: (35.0, 65.0),
            gc_acceptable: (25.0, 75.0),
            homopolymer_threshold: 6,
            repeat_window: 20,
            gc_window: 50,
            gc_max_points: 200,
        }
    }
}

/// Parameters for the virtual gel placement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RestrictionParams {
    /// Ladder size mapped to the bottom of the gel (default: 500 bp).
    pub ladder_low_bp: f64,
    /// Ladder size mapped to the top of the gel (default: 15000 bp).
    pub ladder_high_bp: f64,
    /// Lowest reported y position, in percent (default: 5).
    pub gel_min: f64,
    /// Highest reported y position, in percent (default: 95).
    pub gel_max: f64,
    /// Position used when the placement cannot be computed (default: 50).
    pub fallback_gel_pos: f64,
}

impl Default for RestrictionParams {
    fn default() -> Self {
        Self {
            ladder_low_bp: 500.0,
            ladder_high_bp: 15_000.0,
            gel_min: 5.0,
            gel_max: 95.0,
            fallback_gel_pos: 50.0,
        }
    }
}

/// Parameters for codon optimization and CAI.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OptimizationParams {
    /// Upper bound on velocity graph points (default: 100).
    pub max_points: usize,
    /// Weight of codons missing from the weight table (default: 0.1).
    pub unknown_codon_weight: f64,
    /// Substitute for ln(w) when w ≤ 0 (default: -9.0).
    pub zero_weight_log: f64,
}

impl Default for OptimizationParams {
    fn default() -> Self {
        Self {
            max_points: 100,
            unknown_codon_weight: 0.1,
            zero_weight_log: -9.0,
        }
    }
}

/// Parameters for the safety scan.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SafetyParams {
    /// Recombination hotspot motif (default: `GCTGGTGG`).
    pub chi_motif: String,
    /// Hairpin probe width (default: 10).
    pub hairpin_window: usize,
    /// Distance between hairpin probes (default: 50).
    pub hairpin_stride: usize,
    /// Gap between a probe's end and the search region (default: 5).
    pub hairpin_gap: usize,
    /// End of the search region, counted from the probe's end (default: 40).
    pub hairpin_reach: usize,
    /// Hairpin detection stops after this many hits (default: 5).
    pub max_hairpins: usize,
    /// Number of risk-density bins (default: 20).
    pub density_bins: usize,
}

impl Default for SafetyParams {
    fn default() -> Self {
        Self {
            chi_motif: "GCTGGTGG".to_string(),
            hairpin_window: 10,
            hairpin_stride: 50,
            hairpin_gap: 5,
            hairpin_reach: 40,
            max_hairpins: 5,
            density_bins: 20,
        }
    }
}

/// Parameters for a whole analysis run.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnalysisConfig {
    pub synthesis: SynthesisParams,
    pub restriction: RestrictionParams,
    pub optimization: OptimizationParams,
    pub safety: SafetyParams,
}
