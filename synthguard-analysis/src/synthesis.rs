//! Synthesis feasibility: length, GC content, homopolymer runs, repeated
//! windows, and the windowed GC profile used for plotting.

use std::collections::HashMap;

use synthguard_core::Summarizable;
use synthguard_seq::nucleotide::gc_percent;

use crate::config::SynthesisParams;
use crate::finding::Finding;
use crate::round_to;
use crate::verdict::{CheckStatus, Risk};

/// Number of GC histogram bins, each 10 percentage points wide.
pub const GC_HISTOGRAM_BINS: usize = 10;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A scalar check with its verdict.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValueCheck<T> {
    pub value: T,
    pub status: CheckStatus,
    pub risk: Risk,
    pub message: String,
}

/// A check that reports a list of regions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegionCheck<T> {
    pub status: CheckStatus,
    pub risk: Risk,
    pub count: usize,
    pub details: Vec<T>,
    pub message: String,
}

impl<T> RegionCheck<T> {
    fn new(details: Vec<T>, hit_status: CheckStatus, hit_risk: Risk) -> Self {
        let (status, risk, message) = if details.is_empty() {
            (CheckStatus::Pass, Risk::Low, "None")
        } else {
            (hit_status, hit_risk, "Detected")
        };
        Self {
            status,
            risk,
            count: details.len(),
            details,
            message: message.to_string(),
        }
    }
}

/// A maximal run of one repeated base.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HomopolymerRun {
    /// First base of the run (1-indexed).
    pub start: usize,
    /// Last base of the run (1-indexed, inclusive).
    pub end: usize,
    pub length: usize,
    pub base: char,
}

/// One occurrence of a window whose content was already seen.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RepeatHit {
    pub start: usize,
    pub end: usize,
    pub sequence: String,
}

/// GC% per sampled window, for a line chart.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GcPlot {
    /// 1-indexed window start positions.
    pub labels: Vec<usize>,
    /// GC% of each window, rounded to 2 decimals.
    pub values: Vec<f64>,
}

/// Full synthesis feasibility report.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SynthesisReport {
    pub length: ValueCheck<usize>,
    pub gc: ValueCheck<f64>,
    pub gc_plot: GcPlot,
    pub gc_hist: [usize; GC_HISTOGRAM_BINS],
    pub homopolymers: RegionCheck<HomopolymerRun>,
    pub repeats: RegionCheck<RepeatHit>,
}

impl SynthesisReport {
    /// Worst verdict among the length, GC, homopolymer and repeat checks.
    pub fn overall_status(&self) -> CheckStatus {
        [
            self.length.status,
            self.gc.status,
            self.homopolymers.status,
            self.repeats.status,
        ]
        .into_iter()
        .max_by_key(|s| match s {
            CheckStatus::Pass => 0,
            CheckStatus::Warning => 1,
            CheckStatus::Fail => 2,
        })
        .unwrap_or(CheckStatus::Pass)
    }

    /// Homopolymer runs and repeats as positional findings.
    pub fn findings(&self) -> Vec<Finding> {
        let runs = self
            .homopolymers
            .details
            .iter()
            .map(|r| Finding::homopolymer(r.start, r.base, r.length));
        let repeats = self
            .repeats
            .details
            .iter()
            .map(|r| Finding::repeat(r.start, r.sequence.clone()));
        runs.chain(repeats).collect()
    }
}

impl Summarizable for SynthesisReport {
    fn summary(&self) -> String {
        format!(
            "synthesis {}: {} bp ({}), GC {:.2}% ({}), {} homopolymer runs, {} repeat hits",
            self.overall_status(),
            self.length.value,
            self.length.status,
            self.gc.value,
            self.gc.status,
            self.homopolymers.count,
            self.repeats.count,
        )
    }
}

// ---------------------------------------------------------------------------
// Checks
// ---------------------------------------------------------------------------

/// Length check: too short fails, too long warns.
pub fn check_length(seq: &[u8], params: &SynthesisParams) -> ValueCheck<usize> {
    let length = seq.len();
    let (status, risk, message) = if length < params.min_length {
        (
            CheckStatus::Fail,
            Risk::High,
            format!("Too Short (<{}bp)", params.min_length),
        )
    } else if length > params.max_length {
        (
            CheckStatus::Warning,
            Risk::Moderate,
            format!("Long (>{})", human_bp(params.max_length)),
        )
    } else {
        (CheckStatus::Pass, Risk::Low, "Optimal".to_string())
    };
    ValueCheck {
        value: length,
        status,
        risk,
        message,
    }
}

fn human_bp(bp: usize) -> String {
    if bp >= 1000 && bp % 1000 == 0 {
        format!("{}kb", bp / 1000)
    } else {
        format!("{}bp", bp)
    }
}

/// GC content check. The reported value is rounded to 2 decimals; the
/// thresholds are applied to the unrounded percentage.
pub fn check_gc_content(seq: &[u8], params: &SynthesisParams) -> ValueCheck<f64> {
    let gc = gc_percent(seq);
    let (acc_lo, acc_hi) = params.gc_acceptable;
    let (opt_lo, opt_hi) = params.gc_optimal;
    let (status, risk, message) = if gc < acc_lo || gc > acc_hi {
        (CheckStatus::Fail, Risk::High, "Critical Extreme")
    } else if gc < opt_lo || gc > opt_hi {
        (CheckStatus::Warning, Risk::Moderate, "Suboptimal")
    } else {
        (CheckStatus::Pass, Risk::Low, "Optimal")
    };
    ValueCheck {
        value: round_to(gc, 2),
        status,
        risk,
        message: message.to_string(),
    }
}

/// Maximal runs of one repeated byte with `length >= threshold`.
///
/// Any run fails the check with high risk.
pub fn check_homopolymers(seq: &[u8], threshold: usize) -> RegionCheck<HomopolymerRun> {
    let mut runs = Vec::new();
    let mut i = 0;
    while i < seq.len() {
        let base = seq[i];
        let run_len = seq[i..].iter().take_while(|&&b| b == base).count();
        if run_len >= threshold.max(1) {
            runs.push(HomopolymerRun {
                start: i + 1,
                end: i + run_len,
                length: run_len,
                base: base as char,
            });
        }
        i += run_len;
    }
    RegionCheck::new(runs, CheckStatus::Fail, Risk::High)
}

/// Windows of width `window` whose content occurs more than once.
///
/// Each later occurrence emits two hits: the first occurrence and itself. A
/// window seen N times therefore yields 2×(N−1) hits, the first occurrence
/// repeated once per later match. Any hit warns with moderate risk.
pub fn check_repeats(seq: &[u8], window: usize) -> RegionCheck<RepeatHit> {
    let mut hits = Vec::new();
    if window > 0 && seq.len() >= window {
        let mut first_seen: HashMap<&[u8], usize> = HashMap::with_capacity(seq.len() - window + 1);
        for (i, chunk) in seq.windows(window).enumerate() {
            match first_seen.get(chunk) {
                Some(&first) => {
                    let text = String::from_utf8_lossy(chunk).into_owned();
                    hits.push(RepeatHit {
                        start: first + 1,
                        end: first + window,
                        sequence: text.clone(),
                    });
                    hits.push(RepeatHit {
                        start: i + 1,
                        end: i + window,
                        sequence: text,
                    });
                }
                None => {
                    first_seen.insert(chunk, i);
                }
            }
        }
    }
    RegionCheck::new(hits, CheckStatus::Warning, Risk::Moderate)
}

// ---------------------------------------------------------------------------
// GC profile
// ---------------------------------------------------------------------------

/// Stride between sampled windows, bounding the output to about `max_points`.
pub fn profile_stride(len: usize, max_points: usize) -> usize {
    (len / max_points.max(1)).max(1)
}

/// Start offsets (0-indexed) of the sampled windows.
fn sampled_windows(len: usize, window: usize, max_points: usize) -> impl Iterator<Item = usize> {
    (0..len.saturating_sub(window)).step_by(profile_stride(len, max_points))
}

/// GC% over sliding windows, sampled at a fixed stride.
///
/// A sequence shorter than the window yields a single point holding the
/// whole-sequence GC%.
pub fn gc_profile(seq: &[u8], window: usize, max_points: usize) -> GcPlot {
    if seq.len() < window {
        return GcPlot {
            labels: vec![1],
            values: vec![round_to(gc_percent(seq), 2)],
        };
    }
    let (labels, values) = sampled_windows(seq.len(), window, max_points)
        .map(|i| (i + 1, round_to(gc_percent(&seq[i..i + window]), 2)))
        .unzip();
    GcPlot { labels, values }
}

/// Counts of sampled windows per 10-point GC% bin (90–100 share the last bin).
pub fn gc_histogram(seq: &[u8], window: usize, max_points: usize) -> [usize; GC_HISTOGRAM_BINS] {
    let mut bins = [0usize; GC_HISTOGRAM_BINS];
    for i in sampled_windows(seq.len(), window, max_points) {
        let gc = gc_percent(&seq[i..i + window]) as usize;
        bins[(gc / 10).min(GC_HISTOGRAM_BINS - 1)] += 1;
    }
    bins
}

/// Run every synthesis check.
pub fn analyze_synthesis(seq: &[u8], params: &SynthesisParams) -> SynthesisReport {
    let report = SynthesisReport {
        length: check_length(seq, params),
        gc: check_gc_content(seq, params),
        gc_plot: gc_profile(seq, params.gc_window, params.gc_max_points),
        gc_hist: gc_histogram(seq, params.gc_window, params.gc_max_points),
        homopolymers: check_homopolymers(seq, params.homopolymer_threshold),
        repeats: check_repeats(seq, params.repeat_window),
    };
    tracing::debug!(
        len = seq.len(),
        gc = report.gc.value,
        homopolymers = report.homopolymers.count,
        repeats = report.repeats.count,
        "synthesis checks complete"
    );
    report
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn dna(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
        proptest::collection::vec(
            prop_oneof![Just(b'A'), Just(b'C'), Just(b'G'), Just(b'T')],
            0..=max_len,
        )
    }

    /// Equal numbers of G/C and A/T bases in random order.
    fn balanced_gc() -> impl Strategy<Value = Vec<u8>> {
        (1usize..200)
            .prop_flat_map(|n| {
                (
                    proptest::collection::vec(prop_oneof![Just(b'G'), Just(b'C')], n),
                    proptest::collection::vec(prop_oneof![Just(b'A'), Just(b'T')], n),
                )
            })
            .prop_map(|(gc, at)| [gc, at].concat())
            .prop_shuffle()
    }

    proptest! {
        #[test]
        fn short_sequences_fail_length_check(seq in dna(99)) {
            let check = check_length(&seq, &SynthesisParams::default());
            prop_assert_eq!(check.status, CheckStatus::Fail);
            prop_assert_eq!(check.risk, Risk::High);
        }

        #[test]
        fn half_gc_passes(seq in balanced_gc()) {
            let check = check_gc_content(&seq, &SynthesisParams::default());
            prop_assert_eq!(check.value, 50.0);
            prop_assert_eq!(check.status, CheckStatus::Pass);
            prop_assert_eq!(check.risk, Risk::Low);
        }

        #[test]
        fn histogram_sums_to_window_count(seq in dna(1500), window in 1usize..80) {
            let stride = profile_stride(seq.len(), 200);
            let expected = seq.len().saturating_sub(window).div_ceil(stride);
            let hist = gc_histogram(&seq, window, 200);
            prop_assert_eq!(hist.iter().sum::<usize>(), expected);
        }

        #[test]
        fn profile_and_histogram_agree(seq in dna(800)) {
            let plot = gc_profile(&seq, 50, 200);
            let hist = gc_histogram(&seq, 50, 200);
            if seq.len() >= 50 {
                prop_assert_eq!(plot.values.len(), hist.iter().sum::<usize>());
            }
        }

        #[test]
        fn homopolymer_runs_are_uniform(seq in dna(300)) {
            for run in check_homopolymers(&seq, 3).details {
                let span = &seq[run.start - 1..run.end];
                prop_assert!(span.iter().all(|&b| b as char == run.base));
                prop_assert_eq!(span.len(), run.length);
            }
        }
    }
}
