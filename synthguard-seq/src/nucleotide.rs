//! Nucleotide-level helpers shared by the analyzers.
//!
//! All functions operate on raw `&[u8]` slices and define behavior for bytes
//! outside `ACGT`: they are never an error, they simply do not count as G/C,
//! do not complement, and do not match.

/// Fraction of G/C bases, in [0.0, 1.0].
///
/// Strong (`S`) codes count as G/C. The denominator only includes bases whose
/// G/C state is known (`A`, `C`, `G`, `T`, `S`, `W`), so `N` and other
/// ambiguity codes are removed rather than diluting the fraction. Case is
/// ignored. Returns 0.0 when no countable base is present.
pub fn gc_fraction(seq: &[u8]) -> f64 {
    let mut gc = 0usize;
    let mut counted = 0usize;
    for &b in seq {
        match b.to_ascii_uppercase() {
            b'G' | b'C' | b'S' => {
                gc += 1;
                counted += 1;
            }
            b'A' | b'T' | b'W' => counted += 1,
            _ => {}
        }
    }
    if counted == 0 {
        return 0.0;
    }
    gc as f64 / counted as f64
}

/// GC content as a percentage in [0.0, 100.0].
pub fn gc_percent(seq: &[u8]) -> f64 {
    gc_fraction(seq) * 100.0
}

/// Complement of a single IUPAC DNA base (uppercase). Other bytes are returned unchanged.
pub fn complement(b: u8) -> u8 {
    match b {
        b'A' => b'T',
        b'T' => b'A',
        b'C' => b'G',
        b'G' => b'C',
        b'R' => b'Y', // A|G → T|C
        b'Y' => b'R',
        b'S' => b'S',
        b'W' => b'W',
        b'K' => b'M', // G|T → C|A
        b'M' => b'K',
        b'B' => b'V', // C|G|T → G|C|A
        b'V' => b'B',
        b'D' => b'H', // A|G|T → T|C|A
        b'H' => b'D',
        b'N' => b'N',
        other => other,
    }
}

/// Reverse complement of a DNA slice.
pub fn reverse_complement(seq: &[u8]) -> Vec<u8> {
    seq.iter().rev().map(|&b| complement(b)).collect()
}

/// Start offsets (0-indexed) of every exact, possibly overlapping occurrence
/// of `pattern` in `text`.
///
/// Knuth-Morris-Pratt: O(n+m) regardless of how repetitive the text is.
pub fn find_all(text: &[u8], pattern: &[u8]) -> Vec<usize> {
    let n = text.len();
    let m = pattern.len();
    if m == 0 || m > n {
        return vec![];
    }

    let mut fail = vec![0usize; m];
    let mut k = 0usize;
    for i in 1..m {
        while k > 0 && pattern[k] != pattern[i] {
            k = fail[k - 1];
        }
        if pattern[k] == pattern[i] {
            k += 1;
        }
        fail[i] = k;
    }

    let mut hits = Vec::new();
    let mut q = 0usize;
    for (i, &c) in text.iter().enumerate() {
        while q > 0 && pattern[q] != c {
            q = fail[q - 1];
        }
        if pattern[q] == c {
            q += 1;
        }
        if q == m {
            hits.push(i + 1 - m);
            q = fail[q - 1];
        }
    }
    hits
}

/// Whether `pattern` occurs anywhere in `text`.
pub fn contains(text: &[u8], pattern: &[u8]) -> bool {
    !pattern.is_empty() && text.windows(pattern.len()).any(|w| w == pattern)
}
