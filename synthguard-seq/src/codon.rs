//! Genetic code, codon usage and per-organism codon weight tables.
//!
//! The [`GeneticCode`] maps the 64 DNA triplets to amino acids (stop = `b'*'`).
//! [`CodonWeights`] holds the relative adaptiveness of every codon for a
//! reference organism together with the optimal (max-weight) codon for each
//! amino acid. Both are immutable once built and are meant to be shared by
//! reference across analyses.

use synthguard_core::{Result, SynthguardError};

/// Two-bit rank of a nucleotide (A, C, G, T/U), case-insensitive.
fn base_rank(b: u8) -> Option<usize> {
    Some(match b {
        b'A' | b'a' => 0,
        b'C' | b'c' => 1,
        b'G' | b'g' => 2,
        b'T' | b't' | b'U' | b'u' => 3,
        _ => return None,
    })
}

/// Table index in [0, 64) of a triplet, or `None` if it is not exactly three
/// unambiguous bases. Tables below are ordered AAA, AAC, AAG, AAT, ACA, ... TTT.
pub fn codon_index(codon: &[u8]) -> Option<usize> {
    match codon {
        [a, b, c] => Some((base_rank(*a)? << 4) | (base_rank(*b)? << 2) | base_rank(*c)?),
        _ => None,
    }
}

/// DNA triplet for a table index in [0, 64).
pub fn index_to_codon(idx: usize) -> [u8; 3] {
    let base = |rank: usize| b"ACGT"[rank & 3];
    [base(idx >> 4), base(idx >> 2), base(idx)]
}

/// Standard genetic code (NCBI Table 1).
const STANDARD_AA: [u8; 64] = [
    b'K', b'N', b'K', b'N', b'T', b'T', b'T', b'T', b'R', b'S', b'R', b'S',
    b'I', b'I', b'M', b'I', b'Q', b'H', b'Q', b'H', b'P', b'P', b'P', b'P',
    b'R', b'R', b'R', b'R', b'L', b'L', b'L', b'L', b'E', b'D', b'E', b'D',
    b'A', b'A', b'A', b'A', b'G', b'G', b'G', b'G', b'V', b'V', b'V', b'V',
    b'*', b'Y', b'*', b'Y', b'S', b'S', b'S', b'S', b'*', b'C', b'W', b'C',
    b'L', b'F', b'L', b'F',
];

/// E. coli class II (highly expressed genes) relative adaptiveness, same order.
const E_COLI_CLASS_II: [f64; 64] = [
    1.000, 1.000, 0.253, 0.051, 0.076, 1.000, 0.297, 0.347, 0.004, 0.410, 0.002, 0.085,
    0.003, 1.000, 1.000, 0.185, 0.163, 1.000, 1.000, 0.291, 0.135, 0.012, 1.000, 0.070,
    0.006, 0.356, 0.008, 1.000, 0.007, 0.037, 1.000, 0.042, 1.000, 1.000, 0.259, 0.434,
    0.586, 0.122, 1.000, 0.407, 0.060, 0.603, 0.207, 1.000, 0.495, 0.066, 0.221, 1.000,
    1.000, 1.000, 0.000, 0.239, 0.077, 0.179, 0.068, 1.000, 0.290, 1.000, 1.000, 0.444,
    0.020, 1.000, 0.020, 0.296,
];

/// Amino acid symbols the tables cover, stop included.
pub const AMINO_ACIDS: &[u8; 21] = b"ACDEFGHIKLMNPQRSTVWY*";

// ---------------------------------------------------------------------------
// GeneticCode
// ---------------------------------------------------------------------------

/// Triplet to amino-acid table.
#[derive(Debug, Clone)]
pub struct GeneticCode {
    table: [u8; 64],
}

impl GeneticCode {
    /// The standard genetic code (NCBI Table 1).
    pub fn standard() -> Self {
        Self { table: STANDARD_AA }
    }

    /// Translate a single codon to its amino acid, `b'*'` for stops.
    ///
    /// Returns `None` for triplets with bases outside `ACGT`/`U`.
    pub fn translate_codon(&self, codon: &[u8]) -> Option<u8> {
        codon_index(codon).map(|idx| self.table[idx])
    }

    /// Whether `codon` is a stop in this table.
    pub fn is_stop(&self, codon: &[u8]) -> bool {
        self.translate_codon(codon) == Some(b'*')
    }

    /// Translate a whole sequence, stop codons included as `b'*'`.
    ///
    /// Translation does not halt at stops. Fails when the length is not a
    /// multiple of 3 or when a triplet has no entry in the table.
    pub fn translate(&self, seq: &[u8]) -> Result<Vec<u8>> {
        if seq.len() % 3 != 0 {
            return Err(SynthguardError::IncompleteCodon { len: seq.len() });
        }
        seq.chunks_exact(3)
            .enumerate()
            .map(|(i, codon)| {
                self.translate_codon(codon)
                    .ok_or_else(|| SynthguardError::UndefinedCodon {
                        codon: String::from_utf8_lossy(codon).into_owned(),
                        position: i * 3 + 1,
                    })
            })
            .collect()
    }

    /// Indices of all codons encoding `aa`, in table order.
    pub fn synonymous(&self, aa: u8) -> Vec<usize> {
        (0..64).filter(|&i| self.table[i] == aa).collect()
    }
}

impl Default for GeneticCode {
    fn default() -> Self {
        Self::standard()
    }
}

// ---------------------------------------------------------------------------
// Codon usage
// ---------------------------------------------------------------------------

/// Per-codon counts over one or more in-frame coding sequences, used to
/// derive codon weights from a reference gene set.
#[derive(Debug, Clone)]
pub struct CodonUsage {
    counts: [u64; 64],
    total: u64,
}

impl CodonUsage {
    /// Build a codon usage table from an in-frame coding sequence.
    ///
    /// Non-standard bases and incomplete trailing codons are skipped.
    pub fn from_sequence(seq: &[u8]) -> Self {
        let mut counts = [0u64; 64];
        let mut total = 0u64;
        for codon in seq.chunks_exact(3) {
            if let Some(idx) = codon_index(codon) {
                counts[idx] += 1;
                total += 1;
            }
        }
        CodonUsage { counts, total }
    }

    /// Add the counts of `other`.
    pub fn merge(&mut self, other: &CodonUsage) {
        self.counts
            .iter_mut()
            .zip(other.counts.iter())
            .for_each(|(a, b)| *a += b);
        self.total += other.total;
    }

    /// Times `codon` was seen.
    pub fn count(&self, codon: &[u8]) -> u64 {
        codon_index(codon).map_or(0, |idx| self.counts[idx])
    }

    /// Total number of counted codons.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Relative adaptiveness (w_i) for all 64 codons.
    ///
    /// For each amino acid (stop included), w_i = count_i / max count among
    /// its synonymous codons. Groups that were never observed get 0.0.
    pub fn relative_adaptiveness(&self, code: &GeneticCode) -> [f64; 64] {
        let mut w = [0.0f64; 64];
        for &aa in AMINO_ACIDS.iter() {
            let synonymous = code.synonymous(aa);
            let max = synonymous.iter().map(|&i| self.counts[i]).max().unwrap_or(0);
            if max == 0 {
                continue;
            }
            for &idx in &synonymous {
                w[idx] = self.counts[idx] as f64 / max as f64;
            }
        }
        w
    }
}

// ---------------------------------------------------------------------------
// CodonWeights
// ---------------------------------------------------------------------------

/// Per-codon relative adaptiveness for a reference organism, plus the
/// optimal codon for every amino acid.
#[derive(Debug, Clone)]
pub struct CodonWeights {
    organism: String,
    weights: [f64; 64],
    optimal: [Option<[u8; 3]>; 128],
}

impl CodonWeights {
    /// Build a table from raw weights (codon index order).
    ///
    /// The optimal codon for each amino acid is the first max-weight codon in
    /// table order; a group whose weights are all zero falls back to its first
    /// codon so every amino acid keeps a back-translation.
    pub fn new(organism: impl Into<String>, weights: [f64; 64], code: &GeneticCode) -> Self {
        let mut optimal = [None; 128];
        for &aa in AMINO_ACIDS.iter() {
            let mut best: Option<usize> = None;
            for idx in code.synonymous(aa) {
                match best {
                    Some(b) if weights[idx] <= weights[b] => {}
                    _ => best = Some(idx),
                }
            }
            optimal[aa as usize] = best.map(index_to_codon);
        }
        Self {
            organism: organism.into(),
            weights,
            optimal,
        }
    }

    /// E. coli class II (highly expressed genes) weights.
    pub fn e_coli_class_ii() -> Self {
        Self::new("E. coli (class II)", E_COLI_CLASS_II, &GeneticCode::standard())
    }

    /// Derive weights from the codon usage of a reference coding set.
    pub fn from_reference(
        organism: impl Into<String>,
        usage: &CodonUsage,
        code: &GeneticCode,
    ) -> Result<Self> {
        if usage.total() == 0 {
            return Err(SynthguardError::InvalidInput(
                "reference codon usage is empty".into(),
            ));
        }
        Ok(Self::new(organism, usage.relative_adaptiveness(code), code))
    }

    /// Organism label.
    pub fn organism(&self) -> &str {
        &self.organism
    }

    /// Weight of a codon, `None` for triplets outside the table.
    pub fn weight(&self, codon: &[u8]) -> Option<f64> {
        codon_index(codon).map(|idx| self.weights[idx])
    }

    /// Optimal codon for an amino acid symbol (`b'*'` for stop).
    pub fn optimal_codon(&self, aa: u8) -> Option<[u8; 3]> {
        self.optimal.get(aa as usize).copied().flatten()
    }

    /// Weight of every full codon in `seq`, in reading order.
    ///
    /// Triplets outside the table get `unknown`. A trailing partial codon is
    /// ignored.
    pub fn profile(&self, seq: &[u8], unknown: f64) -> Vec<f64> {
        seq.chunks_exact(3)
            .map(|codon| self.weight(codon).unwrap_or(unknown))
            .collect()
    }
}

impl Default for CodonWeights {
    fn default() -> Self {
        Self::e_coli_class_ii()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn coding_seq(max_codons: usize) -> impl Strategy<Value = Vec<u8>> {
        proptest::collection::vec(
            prop_oneof![Just(b'A'), Just(b'C'), Just(b'G'), Just(b'T')],
            3..=(max_codons * 3),
        )
        .prop_map(|v| {
            let len = v.len() - (v.len() % 3);
            v[..len].to_vec()
        })
    }

    proptest! {
        #[test]
        fn translation_length(seq in coding_seq(40)) {
            let protein = GeneticCode::standard().translate(&seq).unwrap();
            prop_assert_eq!(protein.len(), seq.len() / 3);
        }

        #[test]
        fn derived_weights_in_unit_interval(seq in coding_seq(40)) {
            let code = GeneticCode::standard();
            let usage = CodonUsage::from_sequence(&seq);
            let w = CodonWeights::from_reference("p", &usage, &code).unwrap();
            for idx in 0..64 {
                let wi = w.weight(&index_to_codon(idx)).unwrap();
                prop_assert!((0.0..=1.0).contains(&wi));
            }
        }
    }
}
