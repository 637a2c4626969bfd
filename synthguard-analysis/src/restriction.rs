//! Restriction map: enzyme cut sites, single/double cutter classification
//! and the virtual gel placement of the full-length construct.

use std::fmt;

use synthguard_core::{Result, Summarizable, SynthguardError};
use synthguard_seq::SiteFinder;

use crate::config::RestrictionParams;
use crate::finding::Finding;
use crate::round_to;

/// One cut position of one enzyme.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnzymeSite {
    pub enzyme: String,
    /// 1-indexed position of the first base after the cut.
    pub position: usize,
    /// Total number of cuts by this enzyme across the whole sequence.
    pub frequency: usize,
}

/// Cloning readiness of the construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RestrictionStatus {
    /// At least one enzyme cuts exactly once.
    #[cfg_attr(feature = "serde", serde(rename = "CLONING READY"))]
    CloningReady,
    /// No single cutter.
    #[cfg_attr(feature = "serde", serde(rename = "LIMITED"))]
    Limited,
    /// Nothing to map.
    #[cfg_attr(feature = "serde", serde(rename = "FAIL"))]
    Fail,
}

impl fmt::Display for RestrictionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RestrictionStatus::CloningReady => "CLONING READY",
            RestrictionStatus::Limited => "LIMITED",
            RestrictionStatus::Fail => "FAIL",
        };
        f.write_str(s)
    }
}

/// Restriction map of a sequence.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RestrictionReport {
    pub status: RestrictionStatus,
    pub message: String,
    /// Number of entries in `sites`.
    pub count: usize,
    /// Every cut, sorted by position.
    pub sites: Vec<EnzymeSite>,
    pub single_cutters: Vec<String>,
    pub double_cutters: Vec<String>,
    /// Virtual gel y position in percent, rounded to 1 decimal.
    pub gel_pos: f64,
    pub total_len: usize,
}

impl RestrictionReport {
    /// Cut sites as positional findings.
    pub fn findings(&self) -> Vec<Finding> {
        self.sites
            .iter()
            .map(|s| Finding::restriction_site(s.position, s.enzyme.clone(), s.frequency))
            .collect()
    }
}

impl Summarizable for RestrictionReport {
    fn summary(&self) -> String {
        format!(
            "restriction {}: {} cuts, {} single cutters, {} double cutters, gel {:.1}%",
            self.status,
            self.count,
            self.single_cutters.len(),
            self.double_cutters.len(),
            self.gel_pos,
        )
    }
}

/// Vertical gel position (percent from the top) of a fragment of `len` bp.
///
/// Log-linear interpolation between the ladder bounds: the high ladder size
/// maps to 0%, the low one to 100%, clamped to `[gel_min, gel_max]`.
///
/// # Errors
///
/// Returns an error for a zero length or a degenerate ladder.
pub fn virtual_gel_position(len: usize, params: &RestrictionParams) -> Result<f64> {
    if len == 0 {
        return Err(SynthguardError::InvalidInput(
            "fragment length must be positive".into(),
        ));
    }
    let min_log = params.ladder_low_bp.ln();
    let max_log = params.ladder_high_bp.ln();
    let span = max_log - min_log;
    if !span.is_finite() || span <= 0.0 {
        return Err(SynthguardError::InvalidInput(format!(
            "gel ladder {}..{} bp is not increasing",
            params.ladder_low_bp, params.ladder_high_bp
        )));
    }
    let normalized = ((len as f64).ln() - min_log) / span;
    let y = (1.0 - normalized) * 100.0;
    Ok(y.clamp(params.gel_min, params.gel_max))
}

/// Build the restriction map of `seq` using `finder`.
pub fn map_restriction_sites<F>(seq: &[u8], finder: &F, params: &RestrictionParams) -> RestrictionReport
where
    F: SiteFinder + ?Sized,
{
    if seq.is_empty() {
        return RestrictionReport {
            status: RestrictionStatus::Fail,
            message: "No sequence.".to_string(),
            count: 0,
            sites: Vec::new(),
            single_cutters: Vec::new(),
            double_cutters: Vec::new(),
            gel_pos: params.fallback_gel_pos,
            total_len: 0,
        };
    }

    let mut sites = Vec::new();
    let mut single_cutters = Vec::new();
    let mut double_cutters = Vec::new();

    for (enzyme, cuts) in finder.find_sites(seq) {
        let frequency = cuts.len();
        match frequency {
            0 => continue,
            1 => single_cutters.push(enzyme.clone()),
            2 => double_cutters.push(enzyme.clone()),
            _ => {}
        }
        sites.extend(cuts.into_iter().map(|position| EnzymeSite {
            enzyme: enzyme.clone(),
            position,
            frequency,
        }));
    }
    sites.sort_by_key(|s| s.position);

    let gel_pos = match virtual_gel_position(seq.len(), params) {
        Ok(y) => round_to(y, 1),
        Err(e) => {
            tracing::debug!(error = %e, "gel position unavailable, using fallback");
            params.fallback_gel_pos
        }
    };

    let status = if single_cutters.is_empty() {
        RestrictionStatus::Limited
    } else {
        RestrictionStatus::CloningReady
    };
    tracing::debug!(
        sites = sites.len(),
        single = single_cutters.len(),
        double = double_cutters.len(),
        "restriction map complete"
    );

    RestrictionReport {
        status,
        message: format!("{} unique cut sites found.", single_cutters.len()),
        count: sites.len(),
        sites,
        single_cutters,
        double_cutters,
        gel_pos,
        total_len: seq.len(),
    }
}
