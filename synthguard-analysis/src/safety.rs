//! Safety and stability scan: Chi recombination hotspots, hairpin-forming
//! inverted repeats and premature stop codons, aggregated into a weighted
//! score and a positional risk-density histogram.

use std::fmt;

use synthguard_core::{Result, Scored, Summarizable};
use synthguard_seq::nucleotide::{contains, find_all, reverse_complement};
use synthguard_seq::GeneticCode;

use crate::config::SafetyParams;
use crate::finding::Finding;

const STOP_PENALTY: u32 = 50;
const CHI_PENALTY: u32 = 20;
const HAIRPIN_PENALTY: u32 = 5;

/// Overall safety verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum SafetyStatus {
    /// No issue at all.
    Secure,
    /// Some issues, score at least 50.
    Stable,
    /// Score below 50.
    Unsafe,
}

impl SafetyStatus {
    pub fn from_score(score: u32) -> Self {
        if score == 100 {
            SafetyStatus::Secure
        } else if score < 50 {
            SafetyStatus::Unsafe
        } else {
            SafetyStatus::Stable
        }
    }
}

impl fmt::Display for SafetyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SafetyStatus::Secure => "SECURE",
            SafetyStatus::Stable => "STABLE",
            SafetyStatus::Unsafe => "UNSAFE",
        };
        f.write_str(s)
    }
}

/// Pass/fail flag for one class of issue.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SafetyCheck {
    pub status: crate::verdict::CheckStatus,
    pub count: usize,
    pub label: String,
    pub risk_val: u32,
}

impl SafetyCheck {
    fn new(label: &str, risk_val: u32, count: usize) -> Self {
        Self {
            status: crate::verdict::CheckStatus::from_count(count),
            count,
            label: label.to_string(),
            risk_val,
        }
    }
}

/// The three per-class flags.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SafetyChecks {
    pub stops: SafetyCheck,
    pub hairpins: SafetyCheck,
    pub chi: SafetyCheck,
}

/// Full safety report.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SafetyReport {
    /// 100 minus weighted penalties, floored at 0.
    pub score: u32,
    pub status: SafetyStatus,
    /// All issues, sorted by start position.
    pub issues: Vec<Finding>,
    pub checks: SafetyChecks,
    /// Summed issue weights per equal-width bin.
    pub risk_density: Vec<u32>,
    pub bin_labels: Vec<String>,
    pub message: String,
    /// Why the stop-codon scan did not run, if it didn't.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub stop_scan_error: Option<String>,
}

impl Scored for SafetyReport {
    fn score(&self) -> f64 {
        self.score as f64
    }
}

impl Summarizable for SafetyReport {
    fn summary(&self) -> String {
        format!(
            "safety {} ({}/100): {} stops, {} hairpins, {} chi sites",
            self.status,
            self.score,
            self.checks.stops.count,
            self.checks.hairpins.count,
            self.checks.chi.count,
        )
    }
}

/// Every (possibly overlapping) occurrence of `motif`.
pub fn find_chi_sites(seq: &[u8], motif: &[u8]) -> Vec<Finding> {
    find_all(seq, motif)
        .into_iter()
        .map(|i| Finding::chi_site(i + 1, motif.len()))
        .collect()
}

/// Probe windows whose reverse complement occurs shortly downstream.
///
/// Probes are taken every `hairpin_stride` bases while at least two probe
/// widths of sequence remain. The search region for a probe ending at `e` is
/// `[e + hairpin_gap, e + hairpin_reach)`, cut at the end of the sequence.
/// Scanning stops after `max_hairpins` hits.
pub fn find_hairpins(seq: &[u8], params: &SafetyParams) -> Vec<Finding> {
    let window = params.hairpin_window;
    let mut hits = Vec::new();
    if window == 0 || params.max_hairpins == 0 {
        return hits;
    }
    let last = seq.len().saturating_sub(2 * window);
    for i in (0..last).step_by(params.hairpin_stride.max(1)) {
        let probe_end = i + window;
        let rc = reverse_complement(&seq[i..probe_end]);
        let from = (probe_end + params.hairpin_gap).min(seq.len());
        let to = (probe_end + params.hairpin_reach).min(seq.len());
        if from < to && contains(&seq[from..to], &rc) {
            let span = params.hairpin_reach.min(seq.len() - i);
            hits.push(Finding::hairpin(i + 1, span));
            if hits.len() >= params.max_hairpins {
                break;
            }
        }
    }
    hits
}

/// Stop codons anywhere but the final codon.
///
/// # Errors
///
/// Fails when the sequence cannot be translated.
pub fn find_premature_stops(seq: &[u8], code: &GeneticCode) -> Result<Vec<Finding>> {
    let protein = code.translate(seq)?;
    let body = &protein[..protein.len().saturating_sub(1)];
    Ok(body
        .iter()
        .enumerate()
        .filter(|(_, &aa)| aa == b'*')
        .map(|(i, _)| Finding::premature_stop(i * 3 + 1))
        .collect())
}

/// Width of each risk-density bin.
pub fn density_bin_size(len: usize, bins: usize) -> usize {
    (len / bins.max(1)).max(1)
}

/// Sum of issue weights per bin, keyed on each issue's start position.
/// Positions past the last full bin land in the last bin.
pub fn risk_density(issues: &[Finding], len: usize, bins: usize) -> Vec<u32> {
    let mut density = vec![0u32; bins];
    if bins == 0 {
        return density;
    }
    let bin_size = density_bin_size(len, bins);
    for issue in issues {
        let idx = (issue.start / bin_size).min(bins - 1);
        density[idx] += issue.weight;
    }
    density
}

/// `"lo-hi"` labels for each risk-density bin.
pub fn bin_labels(len: usize, bins: usize) -> Vec<String> {
    let size = density_bin_size(len, bins);
    (0..bins)
        .map(|i| format!("{}-{}", i * size, (i + 1) * size))
        .collect()
}

/// 100 minus 50 per stop, 20 per chi site and 5 per hairpin, floored at 0.
pub fn safety_score(stops: usize, chi: usize, hairpins: usize) -> u32 {
    let penalty = (stops as u64) * STOP_PENALTY as u64
        + (chi as u64) * CHI_PENALTY as u64
        + (hairpins as u64) * HAIRPIN_PENALTY as u64;
    100u64.saturating_sub(penalty) as u32
}

/// Run the full safety scan.
///
/// An untranslatable sequence does not fail the scan: stop detection is
/// skipped, the stop check passes with a zero count, and the reason is kept in
/// `stop_scan_error`.
pub fn analyze_safety(seq: &[u8], code: &GeneticCode, params: &SafetyParams) -> SafetyReport {
    let chi = find_chi_sites(seq, params.chi_motif.as_bytes());
    let hairpins = find_hairpins(seq, params);
    let (stops, stop_scan_error) = match find_premature_stops(seq, code) {
        Ok(stops) => (stops, None),
        Err(e) => {
            tracing::warn!(error = %e, "stop codon scan skipped");
            (Vec::new(), Some(e.to_string()))
        }
    };

    let checks = SafetyChecks {
        stops: SafetyCheck::new("Premature Stops", 5, stops.len()),
        hairpins: SafetyCheck::new("Strong Hairpins", 2, hairpins.len()),
        chi: SafetyCheck::new("Chi Sites", 3, chi.len()),
    };

    let mut issues: Vec<Finding> = chi.into_iter().chain(hairpins).chain(stops).collect();
    issues.sort_by_key(|f| f.start);

    let score = safety_score(checks.stops.count, checks.chi.count, checks.hairpins.count);
    let risk_density = risk_density(&issues, seq.len(), params.density_bins);
    tracing::debug!(score, issues = issues.len(), "safety scan complete");

    SafetyReport {
        score,
        status: SafetyStatus::from_score(score),
        message: format!("{} anomalies detected.", issues.len()),
        bin_labels: bin_labels(seq.len(), params.density_bins),
        risk_density,
        issues,
        checks,
        stop_scan_error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finding::FindingKind;
    use crate::verdict::CheckStatus;

    fn scan(seq: &[u8]) -> SafetyReport {
        analyze_safety(seq, &GeneticCode::standard(), &SafetyParams::default())
    }

    #[test]
    fn chi_motif_alone() {
        let report = scan(b"GCTGGTGG");
        assert_eq!(report.issues.len(), 1);
        let chi = &report.issues[0];
        assert_eq!(chi.kind, FindingKind::ChiSite);
        assert_eq!((chi.start, chi.end), (1, 8));
        assert_eq!(report.score, 80);
        assert_eq!(report.status, SafetyStatus::Stable);
        assert_eq!(report.checks.chi.status, CheckStatus::Fail);
        // Length 8 cannot be translated; the stop check passes regardless.
        assert_eq!(report.checks.stops.status, CheckStatus::Pass);
        assert!(report.stop_scan_error.is_some());
    }

    #[test]
    fn chi_sites_overlap() {
        let hits = find_chi_sites(b"GCTGGTGGCTGGTGG", b"GCTGGTGG");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[1].start, 8);
    }

    #[test]
    fn single_premature_stop() {
        // ATG TAA GCC GCC ... (stop at codon 2)
        let mut seq = b"ATGTAA".to_vec();
        seq.extend(b"GCC".repeat(10));
        let report = scan(&seq);
        assert_eq!(report.checks.stops.count, 1);
        assert_eq!(report.issues.len(), 1);
        assert_eq!((report.issues[0].start, report.issues[0].end), (4, 6));
        assert_eq!(report.score, 50);
        assert_eq!(report.status, SafetyStatus::Stable);
        assert!(report.stop_scan_error.is_none());
    }

    #[test]
    fn final_stop_is_not_premature() {
        let stops = find_premature_stops(b"ATGGCCTAA", &GeneticCode::standard()).unwrap();
        assert!(stops.is_empty());
        let stops = find_premature_stops(b"TAATAA", &GeneticCode::standard()).unwrap();
        assert_eq!(stops.len(), 1);
        assert!(find_premature_stops(b"", &GeneticCode::standard()).unwrap().is_empty());
    }

    #[test]
    fn untranslatable_sequence_skips_stops() {
        assert!(find_premature_stops(b"ATGTAAN", &GeneticCode::standard()).is_err());
        let report = scan(b"ATGTAANN");
        assert_eq!(report.checks.stops.count, 0);
        assert_eq!(report.score, 100);
        assert_eq!(report.status, SafetyStatus::Secure);
    }

    #[test]
    fn hairpin_detected() {
        // Probe ACGTTGCAAG at 0; its reverse complement CTTGCAACGT placed at 20.
        let mut seq = b"ACGTTGCAAG".to_vec();
        seq.extend(b"AAAAAAAAAA");
        seq.extend(b"CTTGCAACGT");
        seq.extend(vec![b'A'; 30]);
        let hits = find_hairpins(&seq, &SafetyParams::default());
        assert_eq!(hits.len(), 1);
        assert_eq!((hits[0].start, hits[0].end), (1, 40));
        assert_eq!(hits[0].weight, 2);
    }

    #[test]
    fn hairpin_span_clipped_at_sequence_end() {
        // Probe at 50; its reverse complement sits in the truncated region 65..80.
        let mut seq = vec![b'A'; 50];
        seq.extend(b"ACGTTGCAAG");
        seq.extend(b"AAAAA");
        seq.extend(b"CTTGCAACGT");
        seq.extend(b"AAAAA");
        assert_eq!(seq.len(), 80);
        let hits = find_hairpins(&seq, &SafetyParams::default());
        assert_eq!(hits.len(), 1);
        assert_eq!((hits[0].start, hits[0].end), (51, 80));
        assert_eq!(hits[0].width(), 30);
    }

    #[test]
    fn hairpin_outside_region_ignored() {
        // Reverse complement starts right after the probe (gap < 5).
        let mut seq = b"ACGTTGCAAG".to_vec();
        seq.extend(b"CTTGCAACGT");
        seq.extend(vec![b'A'; 40]);
        assert!(find_hairpins(&seq, &SafetyParams::default()).is_empty());
    }

    #[test]
    fn hairpin_cap() {
        // Poly-A probes find poly-T downstream: every probe hits.
        let block: Vec<u8> = [vec![b'A'; 15], vec![b'T'; 35]].concat();
        let seq = block.repeat(10);
        let hits = find_hairpins(&seq, &SafetyParams::default());
        assert_eq!(hits.len(), 5);
        let capped = SafetyParams {
            max_hairpins: 2,
            ..SafetyParams::default()
        };
        assert_eq!(find_hairpins(&seq, &capped).len(), 2);
    }

    #[test]
    fn hairpin_short_sequence() {
        assert!(find_hairpins(b"ACGTACGTACGTACGTACG", &SafetyParams::default()).is_empty());
    }

    #[test]
    fn score_floor_and_status() {
        assert_eq!(safety_score(0, 0, 0), 100);
        assert_eq!(safety_score(1, 0, 0), 50);
        assert_eq!(safety_score(0, 1, 1), 75);
        assert_eq!(safety_score(3, 2, 5), 0);
        assert_eq!(SafetyStatus::from_score(100), SafetyStatus::Secure);
        assert_eq!(SafetyStatus::from_score(50), SafetyStatus::Stable);
        assert_eq!(SafetyStatus::from_score(49), SafetyStatus::Unsafe);
    }

    #[test]
    fn density_bins() {
        let issues = vec![
            Finding::chi_site(1, 8),
            Finding::premature_stop(55),
            Finding::hairpin(200, 40),
        ];
        let density = risk_density(&issues, 200, 20);
        assert_eq!(density.len(), 20);
        // bin size 10: start 1 → 0, 55 → 5, 200 → clamped to 19
        assert_eq!(density[0], 3);
        assert_eq!(density[5], 5);
        assert_eq!(density[19], 2);
        assert_eq!(density.iter().sum::<u32>(), 10);
    }

    #[test]
    fn density_short_sequence() {
        let labels = bin_labels(8, 20);
        assert_eq!(labels[0], "0-1");
        assert_eq!(labels[19], "19-20");
        let density = risk_density(&[Finding::chi_site(1, 8)], 8, 20);
        assert_eq!(density[1], 3);
    }

    #[test]
    fn issues_sorted_by_start() {
        let mut seq = b"ATGGCC".to_vec();
        seq.extend(b"GCTGGTGGC"); // chi at 7
        seq.extend(b"TAGGCC"); // stop at 16
        seq.extend(b"GCTGGTGGA"); // chi at 22
        seq.extend(b"GCC");
        let report = scan(&seq);
        let starts: Vec<usize> = report.issues.iter().map(|f| f.start).collect();
        assert!(starts.windows(2).all(|w| w[0] <= w[1]));
        let chi = report.issues.iter().filter(|f| f.kind == FindingKind::ChiSite).count();
        assert_eq!(chi, 2);
        assert_eq!(report.message, format!("{} anomalies detected.", report.issues.len()));
        assert!(report.summary().contains("2 chi sites"));
        assert_eq!(report.score as f64, Scored::score(&report));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serialized_field_names() {
        let json = serde_json::to_value(scan(b"GCTGGTGG")).unwrap();
        assert_eq!(json["status"], "STABLE");
        assert_eq!(json["checks"]["chi"]["label"], "Chi Sites");
        assert_eq!(json["checks"]["stops"]["status"], "PASS");
        assert_eq!(json["issues"][0]["type"], "Chi Site");
        assert_eq!(json["risk_density"].as_array().unwrap().len(), 20);
        assert!(json["stop_scan_error"].is_string());
    }
}
