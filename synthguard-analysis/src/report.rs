//! Aggregate report: one section per analyzer.

use synthguard_core::Summarizable;

use crate::finding::Finding;
use crate::optimization::OptimizationOutcome;
use crate::restriction::RestrictionReport;
use crate::safety::SafetyReport;
use crate::synthesis::SynthesisReport;

/// Everything one analysis run produced.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnalysisReport {
    pub synthesis: SynthesisReport,
    pub restriction: RestrictionReport,
    pub optimization: OptimizationOutcome,
    pub safety: SafetyReport,
}

impl AnalysisReport {
    /// All positional findings across sections, sorted by start position.
    ///
    /// Within one start position, findings keep section order: synthesis,
    /// restriction, then safety.
    pub fn annotations(&self) -> Vec<Finding> {
        let mut all = self.synthesis.findings();
        all.extend(self.restriction.findings());
        all.extend(self.safety.issues.iter().cloned());
        all.sort_by_key(|f| f.start);
        all
    }
}

impl Summarizable for AnalysisReport {
    fn summary(&self) -> String {
        [
            self.synthesis.summary(),
            self.restriction.summary(),
            self.optimization.summary(),
            self.safety.summary(),
        ]
        .join("\n")
    }
}
