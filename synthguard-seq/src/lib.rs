//! Sequence primitives and static reference data for DNA construct analysis.
//!
//! - **Nucleotides**: GC fraction, reverse complement, overlapping exact search
//! - **Codons**: standard [`GeneticCode`], [`CodonUsage`] and per-organism [`CodonWeights`]
//! - **Restriction enzymes**: the [`SiteFinder`] capability and the embedded [`EnzymeCatalog`]
//!
//! # Example
//!
//! ```
//! use synthguard_seq::{CodonWeights, GeneticCode, nucleotide};
//!
//! let code = GeneticCode::standard();
//! assert_eq!(code.translate(b"ATGTTTTAA").unwrap(), b"MF*".to_vec());
//!
//! let weights = CodonWeights::e_coli_class_ii();
//! assert_eq!(weights.optimal_codon(b'L'), Some(*b"CTG"));
//!
//! assert_eq!(nucleotide::reverse_complement(b"GAATTCAA"), b"TTGAATTC".to_vec());
//! ```

pub mod codon;
pub mod nucleotide;
pub mod restriction;

pub use codon::{CodonUsage, CodonWeights, GeneticCode};
pub use restriction::{EnzymeCatalog, RestrictionEnzyme, SiteFinder, SiteMap};
