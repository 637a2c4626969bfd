//! Positional annotations produced by the analyzers.
//!
//! Every finding covers a 1-indexed, inclusive `start..=end` span of the
//! input sequence and carries a severity and a risk weight. Only the safety
//! kinds have a non-zero weight; the rest are informational for renderers.

use std::fmt;

/// How serious a finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        };
        f.write_str(s)
    }
}

/// What a finding marks.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum FindingKind {
    /// Run of one repeated base.
    Homopolymer { base: char, length: usize },
    /// Window whose content occurs more than once.
    Repeat { sequence: String },
    /// Restriction enzyme cut position.
    #[cfg_attr(feature = "serde", serde(rename = "Restriction Site"))]
    RestrictionSite { enzyme: String, frequency: usize },
    /// Recombination hotspot motif.
    #[cfg_attr(feature = "serde", serde(rename = "Chi Site"))]
    ChiSite,
    /// Probe whose reverse complement lies shortly downstream.
    Hairpin,
    /// Stop codon before the final codon.
    #[cfg_attr(feature = "serde", serde(rename = "Premature Stop"))]
    PrematureStop,
}

impl FindingKind {
    /// Display label, as used in the serialized `type` field.
    pub fn label(&self) -> &'static str {
        match self {
            FindingKind::Homopolymer { .. } => "Homopolymer",
            FindingKind::Repeat { .. } => "Repeat",
            FindingKind::RestrictionSite { .. } => "Restriction Site",
            FindingKind::ChiSite => "Chi Site",
            FindingKind::Hairpin => "Hairpin",
            FindingKind::PrematureStop => "Premature Stop",
        }
    }
}

/// A positional annotation on the analyzed sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Finding {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub kind: FindingKind,
    #[cfg_attr(feature = "serde", serde(rename = "risk"))]
    pub severity: Severity,
    /// First covered position (1-indexed).
    pub start: usize,
    /// Last covered position (1-indexed, inclusive).
    pub end: usize,
    /// Contribution to the safety risk density.
    #[cfg_attr(feature = "serde", serde(rename = "val"))]
    pub weight: u32,
}

impl Finding {
    /// Chi site starting at `start`, spanning the motif.
    pub fn chi_site(start: usize, motif_len: usize) -> Self {
        Self::spanning(FindingKind::ChiSite, Severity::High, 3, start, motif_len)
    }

    /// Hairpin probe region starting at `start`.
    pub fn hairpin(start: usize, span: usize) -> Self {
        Self::spanning(FindingKind::Hairpin, Severity::Medium, 2, start, span)
    }

    /// Premature stop codon starting at `start`.
    pub fn premature_stop(start: usize) -> Self {
        Self::spanning(FindingKind::PrematureStop, Severity::Critical, 5, start, 3)
    }

    /// Homopolymer run.
    pub fn homopolymer(start: usize, base: char, length: usize) -> Self {
        Self::spanning(
            FindingKind::Homopolymer { base, length },
            Severity::High,
            0,
            start,
            length,
        )
    }

    /// Repeated window.
    pub fn repeat(start: usize, sequence: String) -> Self {
        let len = sequence.len();
        Self::spanning(FindingKind::Repeat { sequence }, Severity::Medium, 0, start, len)
    }

    /// Single-position restriction cut.
    pub fn restriction_site(position: usize, enzyme: String, frequency: usize) -> Self {
        Self::spanning(
            FindingKind::RestrictionSite { enzyme, frequency },
            Severity::Low,
            0,
            position,
            1,
        )
    }

    fn spanning(kind: FindingKind, severity: Severity, weight: u32, start: usize, len: usize) -> Self {
        Self {
            kind,
            severity,
            start,
            end: start + len.max(1) - 1,
            weight,
        }
    }

    /// Number of positions covered.
    pub fn width(&self) -> usize {
        self.end + 1 - self.start
    }

    /// Whether `pos` (1-indexed) falls inside the finding.
    pub fn contains(&self, pos: usize) -> bool {
        (self.start..=self.end).contains(&pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spans_are_inclusive() {
        let chi = Finding::chi_site(1, 8);
        assert_eq!((chi.start, chi.end), (1, 8));
        assert_eq!(chi.width(), 8);
        assert!(chi.contains(8));
        assert!(!chi.contains(9));

        let stop = Finding::premature_stop(4);
        assert_eq!((stop.start, stop.end, stop.weight), (4, 6, 5));
        assert_eq!(stop.severity, Severity::Critical);

        let site = Finding::restriction_site(17, "EcoRI".into(), 1);
        assert_eq!((site.start, site.end), (17, 17));
    }

    #[test]
    fn safety_weights() {
        assert_eq!(Finding::chi_site(1, 8).weight, 3);
        assert_eq!(Finding::hairpin(1, 40).weight, 2);
        assert_eq!(Finding::homopolymer(1, 'A', 7).weight, 0);
        assert_eq!(Finding::hairpin(1, 40).kind.label(), "Hairpin");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serialized_shape() {
        let json = serde_json::to_value(Finding::chi_site(3, 8)).unwrap();
        assert_eq!(json["type"], "Chi Site");
        assert_eq!(json["risk"], "High");
        assert_eq!(json["start"], 3);
        assert_eq!(json["end"], 10);
        assert_eq!(json["val"], 3);

        let json = serde_json::to_value(Finding::premature_stop(1)).unwrap();
        assert_eq!(json["type"], "Premature Stop");
        assert_eq!(json["risk"], "Critical");
    }
}
