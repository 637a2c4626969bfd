//! The orchestrator: runs the four analyzers over one sequence and collects
//! their sections into an [`AnalysisReport`].

use synthguard_seq::{CodonWeights, EnzymeCatalog, GeneticCode, SiteFinder};

use crate::config::AnalysisConfig;
use crate::optimization::analyze_optimization;
use crate::report::AnalysisReport;
use crate::restriction::map_restriction_sites;
use crate::safety::analyze_safety;
use crate::synthesis::analyze_synthesis;

/// Reusable analysis engine.
///
/// Holds only read-only tables and parameters; every call to
/// [`analyze`](Analyzer::analyze) derives its report from the input alone.
/// With the `parallel` feature the analyzers run concurrently.
#[derive(Debug, Clone)]
pub struct Analyzer<F = EnzymeCatalog> {
    config: AnalysisConfig,
    code: GeneticCode,
    weights: CodonWeights,
    finder: F,
}

impl Analyzer<EnzymeCatalog> {
    /// Default parameters, the standard genetic code, E. coli class II codon
    /// weights and the built-in enzyme catalog.
    pub fn new() -> Self {
        Self::with_config(AnalysisConfig::default())
    }

    pub fn with_config(config: AnalysisConfig) -> Self {
        Self {
            config,
            code: GeneticCode::standard(),
            weights: CodonWeights::e_coli_class_ii(),
            finder: EnzymeCatalog::builtin(),
        }
    }
}

impl Default for Analyzer<EnzymeCatalog> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: SiteFinder + Sync> Analyzer<F> {
    /// Replace the codon weight table used by the optimizer.
    pub fn with_weights(mut self, weights: CodonWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Replace the restriction site finder.
    pub fn with_finder<G: SiteFinder + Sync>(self, finder: G) -> Analyzer<G> {
        Analyzer {
            config: self.config,
            code: self.code,
            weights: self.weights,
            finder,
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn weights(&self) -> &CodonWeights {
        &self.weights
    }

    pub fn finder(&self) -> &F {
        &self.finder
    }

    /// Analyze one uppercase nucleotide sequence.
    ///
    /// Never fails: degraded inputs show up in each section's own status
    /// fields.
    pub fn analyze(&self, seq: impl AsRef<[u8]>) -> AnalysisReport {
        let seq = seq.as_ref();
        let cfg = &self.config;

        #[cfg(feature = "parallel")]
        let report = {
            let ((synthesis, restriction), (optimization, safety)) = rayon::join(
                || {
                    rayon::join(
                        || analyze_synthesis(seq, &cfg.synthesis),
                        || map_restriction_sites(seq, &self.finder, &cfg.restriction),
                    )
                },
                || {
                    rayon::join(
                        || analyze_optimization(seq, &self.code, &self.weights, &cfg.optimization),
                        || analyze_safety(seq, &self.code, &cfg.safety),
                    )
                },
            );
            AnalysisReport {
                synthesis,
                restriction,
                optimization,
                safety,
            }
        };
        #[cfg(not(feature = "parallel"))]
        let report = AnalysisReport {
            synthesis: analyze_synthesis(seq, &cfg.synthesis),
            restriction: map_restriction_sites(seq, &self.finder, &cfg.restriction),
            optimization: analyze_optimization(seq, &self.code, &self.weights, &cfg.optimization),
            safety: analyze_safety(seq, &self.code, &cfg.safety),
        };

        tracing::info!(
            len = seq.len(),
            synthesis = %report.synthesis.overall_status(),
            restriction = %report.restriction.status,
            optimized = !report.optimization.is_failed(),
            safety = %report.safety.status,
            "analysis complete"
        );
        report
    }
}
