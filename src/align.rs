//! Semi-global pairwise alignment.
//!
//! Overlap alignment of a pattern (adapter template or barcode query)
//! against a read window: leading and trailing gaps are free on both
//! sequences, interior gaps are affine. A gap of length `L` costs
//! `open + (L - 1) * extend`. The optimum is taken over the last row and
//! last column of the DP table; reported end coordinates are 0-based
//! inclusive.
//!
//! Two variants: [`semi_global`] returns score and end coordinates only,
//! [`semi_global_stats`] additionally carries the match count and
//! alignment length along the optimal path. Both run the same kernel
//! semantics; the kernels are compiled per SIMD target via `multiversion`
//! and dispatched at runtime, so every target produces identical scores.

use multiversion::multiversion;

use crate::matrix::{encode, SubstMatrix};

const NEG_INF: i32 = i32::MIN / 2;

/// Score and end coordinates of a semi-global alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alignment {
    pub score: i32,
    /// 0-based inclusive end of the alignment on the read.
    pub read_end: usize,
    /// 0-based inclusive end of the alignment on the pattern.
    pub pattern_end: usize,
}

/// [`Alignment`] plus path statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignmentStats {
    pub score: i32,
    pub read_end: usize,
    pub pattern_end: usize,
    /// Identically matching positions on the optimal path.
    pub matches: usize,
    /// Aligned columns on the optimal path, gaps included.
    pub length: usize,
}

/// Align `pattern` against `read`, score only.
///
/// Returns `None` when either sequence is empty.
pub fn semi_global(
    read: &[u8],
    pattern: &[u8],
    gap_open: i32,
    gap_extend: i32,
    matrix: &SubstMatrix,
) -> Option<Alignment> {
    if read.is_empty() || pattern.is_empty() {
        return None;
    }
    let read_enc = encode(read);
    let pattern_enc = encode(pattern);
    let (score, read_end, pattern_end) =
        fill_score(&read_enc, &pattern_enc, gap_open, gap_extend, matrix);
    Some(Alignment { score, read_end, pattern_end })
}

/// Align `pattern` against `read`, with match count and alignment length.
pub fn semi_global_stats(
    read: &[u8],
    pattern: &[u8],
    gap_open: i32,
    gap_extend: i32,
    matrix: &SubstMatrix,
) -> Option<AlignmentStats> {
    if read.is_empty() || pattern.is_empty() {
        return None;
    }
    let read_enc = encode(read);
    let pattern_enc = encode(pattern);
    fill_stats(&read_enc, &pattern_enc, gap_open, gap_extend, matrix)
}

#[multiversion(targets = "simd")]
fn fill_score(
    read: &[u8],
    pattern: &[u8],
    gap_open: i32,
    gap_extend: i32,
    matrix: &SubstMatrix,
) -> (i32, usize, usize) {
    let m = pattern.len();

    // h holds H for the current row, e the running gap-in-read scores.
    let mut h = vec![0i32; m + 1];
    let mut f = vec![NEG_INF; m + 1];

    let mut best = NEG_INF;
    let mut best_read_end = 0usize;
    let mut best_pattern_end = 0usize;

    for (i, &rc) in read.iter().enumerate() {
        let row = matrix.row(rc);
        let mut h_diag = h[0];
        let mut e = NEG_INF;
        h[0] = 0;
        for (j, &pc) in pattern.iter().enumerate() {
            let h_up = h[j + 1];
            f[j + 1] = (h_up - gap_open).max(f[j + 1] - gap_extend);
            e = (h[j] - gap_open).max(e - gap_extend);
            let h_new = (h_diag + row[pc as usize]).max(e).max(f[j + 1]);
            h_diag = h_up;
            h[j + 1] = h_new;
        }
        // trailing read gap is free: candidate wherever the pattern is spent
        if h[m] > best {
            best = h[m];
            best_read_end = i;
            best_pattern_end = m - 1;
        }
    }
    // trailing pattern gap is free: candidates along the last read row
    for j in 1..=m {
        if h[j] > best {
            best = h[j];
            best_read_end = read.len() - 1;
            best_pattern_end = j - 1;
        }
    }

    (best, best_read_end, best_pattern_end)
}

#[multiversion(targets = "simd")]
fn fill_stats(
    read: &[u8],
    pattern: &[u8],
    gap_open: i32,
    gap_extend: i32,
    matrix: &SubstMatrix,
) -> Option<AlignmentStats> {
    let m = pattern.len();

    let mut h = vec![0i32; m + 1];
    let mut h_mat = vec![0u32; m + 1];
    let mut h_len = vec![0u32; m + 1];
    let mut f = vec![NEG_INF; m + 1];
    let mut f_mat = vec![0u32; m + 1];
    let mut f_len = vec![0u32; m + 1];

    let mut best: Option<AlignmentStats> = None;
    let mut take = |score: i32, read_end: usize, pattern_end: usize, matches: u32, length: u32| {
        if best.map_or(true, |b| score > b.score) {
            best = Some(AlignmentStats {
                score,
                read_end,
                pattern_end,
                matches: matches as usize,
                length: length as usize,
            });
        }
    };

    for (i, &rc) in read.iter().enumerate() {
        let row = matrix.row(rc);
        let mut h_diag = h[0];
        let mut h_diag_mat = h_mat[0];
        let mut h_diag_len = h_len[0];
        let mut e = NEG_INF;
        let mut e_mat = 0u32;
        let mut e_len = 0u32;
        h[0] = 0;
        h_mat[0] = 0;
        h_len[0] = 0;
        for (j, &pc) in pattern.iter().enumerate() {
            let h_up = h[j + 1];
            let h_up_mat = h_mat[j + 1];
            let h_up_len = h_len[j + 1];

            if h_up - gap_open >= f[j + 1] - gap_extend {
                f[j + 1] = h_up - gap_open;
                f_mat[j + 1] = h_up_mat;
                f_len[j + 1] = h_up_len + 1;
            } else {
                f[j + 1] -= gap_extend;
                f_len[j + 1] += 1;
            }

            if h[j] - gap_open >= e - gap_extend {
                e = h[j] - gap_open;
                e_mat = h_mat[j];
                e_len = h_len[j] + 1;
            } else {
                e -= gap_extend;
                e_len += 1;
            }

            let diag = h_diag + row[pc as usize];
            let is_match = (rc == pc) as u32;
            // branch priority on ties: diagonal, then gap-in-read, then gap-in-pattern
            let (h_new, mat_new, len_new) = if diag >= e && diag >= f[j + 1] {
                (diag, h_diag_mat + is_match, h_diag_len + 1)
            } else if e >= f[j + 1] {
                (e, e_mat, e_len)
            } else {
                (f[j + 1], f_mat[j + 1], f_len[j + 1])
            };

            h_diag = h_up;
            h_diag_mat = h_up_mat;
            h_diag_len = h_up_len;
            h[j + 1] = h_new;
            h_mat[j + 1] = mat_new;
            h_len[j + 1] = len_new;
        }
        take(h[m], i, m - 1, h_mat[m], h_len[m]);
    }
    for j in 1..=m {
        take(h[j], read.len() - 1, j - 1, h_mat[j], h_len[j]);
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit() -> SubstMatrix {
        SubstMatrix::barcode()
    }

    fn adapter() -> SubstMatrix {
        SubstMatrix::adapter(5, -2, -1)
    }

    #[test]
    fn empty_inputs_do_not_align() {
        assert!(semi_global(b"", b"ACGT", 1, 1, &unit()).is_none());
        assert!(semi_global(b"ACGT", b"", 1, 1, &unit()).is_none());
        assert!(semi_global_stats(b"", b"", 1, 1, &unit()).is_none());
    }

    #[test]
    fn exact_match_is_full_score() {
        let aln = semi_global(b"ACGT", b"ACGT", 2, 2, &adapter()).unwrap();
        assert_eq!(aln.score, 20);
        assert_eq!(aln.read_end, 3);
        assert_eq!(aln.pattern_end, 3);
    }

    #[test]
    fn contained_pattern_has_free_read_overhang() {
        let aln = semi_global(b"GGGACGTGGG", b"ACGT", 1, 1, &unit()).unwrap();
        assert_eq!(aln.score, 4);
        assert_eq!(aln.read_end, 6);
        assert_eq!(aln.pattern_end, 3);
    }

    #[test]
    fn pattern_overhang_is_free() {
        // pattern prefix aligns to the read suffix, the rest dangles for free
        let aln = semi_global(b"TTTACG", b"ACGGG", 1, 1, &unit()).unwrap();
        assert_eq!(aln.score, 3);
        assert_eq!(aln.read_end, 5);
        assert_eq!(aln.pattern_end, 2);
    }

    #[test]
    fn placeholder_bases_score_nmatch() {
        let aln = semi_global(b"ACGT", b"ANGT", 2, 2, &adapter()).unwrap();
        assert_eq!(aln.score, 14);
    }

    #[test]
    fn modified_bases_are_neutral() {
        let aln = semi_global(b"ACGT", b"AXGT", 2, 2, &adapter()).unwrap();
        assert_eq!(aln.score, 15);
    }

    #[test]
    fn interior_gap_is_affine() {
        // ACGGT vs ACG-T: one gap, open 2 extend 2 -> 4 * 5 - 2
        let aln = semi_global(b"ACGGT", b"ACGT", 2, 2, &adapter()).unwrap();
        assert_eq!(aln.score, 18);
        assert_eq!(aln.read_end, 4);
        assert_eq!(aln.pattern_end, 3);
    }

    #[test]
    fn gap_extension_costs_less_than_reopening() {
        // two separate gaps would cost 2 * open; one long gap open + extend
        let aln = semi_global(b"ACGGGT", b"ACGT", 3, 1, &adapter()).unwrap();
        assert_eq!(aln.score, 20 - 3 - 1);
    }

    #[test]
    fn stats_track_matches_and_length() {
        let s = semi_global_stats(b"ACGGT", b"ACGT", 2, 2, &adapter()).unwrap();
        assert_eq!(s.score, 18);
        assert_eq!(s.matches, 4);
        assert_eq!(s.length, 5);

        let s = semi_global_stats(b"GGGACGTGGG", b"ACGT", 1, 1, &unit()).unwrap();
        assert_eq!(s.matches, 4);
        assert_eq!(s.length, 4);
        assert_eq!(s.read_end, 6);
    }

    #[test]
    fn mismatches_are_counted_in_length_not_matches() {
        let s = semi_global_stats(b"ACTT", b"ACGT", 1, 1, &unit()).unwrap();
        assert_eq!(s.score, 2);
        assert_eq!(s.matches, 3);
        assert_eq!(s.length, 4);
    }
}
