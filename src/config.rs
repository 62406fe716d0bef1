//! Scoring and window parameters.

use crate::matrix::SubstMatrix;

/// Alignment scoring and window parameters shared by every scan.
///
/// The adapter substitution matrix is owned here and rebuilt whenever one
/// of the scoring fields changes; the barcode matrix is fixed (`+1/-1`
/// with unit gap penalties).
#[derive(Debug, Clone)]
pub struct Config {
    match_score: i32,
    nmatch: i32,
    mismatch: i32,
    gap_open: i32,
    gap_extend: i32,
    max_align_length: usize,
    extracted_barcode_extension: usize,
    barcode_context_length: usize,
    matrix: SubstMatrix,
    matrix_barcode: SubstMatrix,
}

impl Default for Config {
    fn default() -> Self {
        let match_score = 5;
        let nmatch = -1;
        let mismatch = -2;
        Config {
            match_score,
            nmatch,
            mismatch,
            gap_open: 2,
            gap_extend: 2,
            max_align_length: 150,
            extracted_barcode_extension: 11,
            barcode_context_length: 11,
            matrix: SubstMatrix::adapter(match_score, mismatch, nmatch),
            matrix_barcode: SubstMatrix::barcode(),
        }
    }
}

impl Config {
    /// Match score for plain bases.
    pub fn match_score(&self) -> i32 {
        self.match_score
    }

    /// Stored as a magnitude; rebuilds the adapter matrix.
    pub fn set_match_score(&mut self, value: i32) {
        self.match_score = value.abs();
        self.rebuild_matrix();
    }

    /// Score of a placeholder `N` against any base.
    pub fn nmatch(&self) -> i32 {
        self.nmatch
    }

    pub fn set_nmatch(&mut self, value: i32) {
        self.nmatch = value;
        self.rebuild_matrix();
    }

    /// Mismatch score, stored negative.
    pub fn mismatch(&self) -> i32 {
        self.mismatch
    }

    pub fn set_mismatch(&mut self, value: i32) {
        self.mismatch = -value.abs();
        self.rebuild_matrix();
    }

    pub fn gap_open(&self) -> i32 {
        self.gap_open
    }

    pub fn set_gap_open(&mut self, value: i32) {
        self.gap_open = value.abs();
    }

    pub fn gap_extend(&self) -> i32 {
        self.gap_extend
    }

    pub fn set_gap_extend(&mut self, value: i32) {
        self.gap_extend = value.abs();
    }

    /// Read-end window length scanned for an adapter.
    pub fn max_align_length(&self) -> usize {
        self.max_align_length
    }

    pub fn set_max_align_length(&mut self, value: usize) {
        self.max_align_length = value;
    }

    /// Padding added around the extracted barcode region to absorb indel
    /// slippage.
    pub fn extracted_barcode_extension(&self) -> usize {
        self.extracted_barcode_extension
    }

    pub fn set_extracted_barcode_extension(&mut self, value: usize) {
        self.extracted_barcode_extension = value;
    }

    /// Adapter flank length appended on both sides of a barcode when
    /// matching it against the extracted region.
    pub fn barcode_context_length(&self) -> usize {
        self.barcode_context_length
    }

    pub fn set_barcode_context_length(&mut self, value: usize) {
        self.barcode_context_length = value;
    }

    /// Substitution matrix for adapter-template alignment.
    pub fn matrix(&self) -> &SubstMatrix {
        &self.matrix
    }

    /// Substitution matrix for barcode alignment.
    pub fn matrix_barcode(&self) -> &SubstMatrix {
        &self.matrix_barcode
    }

    fn rebuild_matrix(&mut self) {
        self.matrix = SubstMatrix::adapter(self.match_score, self.mismatch, self.nmatch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.match_score(), 5);
        assert_eq!(config.nmatch(), -1);
        assert_eq!(config.mismatch(), -2);
        assert_eq!(config.gap_open(), 2);
        assert_eq!(config.gap_extend(), 2);
        assert_eq!(config.max_align_length(), 150);
        assert_eq!(config.extracted_barcode_extension(), 11);
        assert_eq!(config.barcode_context_length(), 11);
    }

    #[test]
    fn scoring_setters_rebuild_the_matrix() {
        let mut config = Config::default();
        assert_eq!(config.matrix().score(b'A', b'A'), 5);
        config.set_match_score(3);
        assert_eq!(config.matrix().score(b'A', b'A'), 3);
        config.set_mismatch(4);
        assert_eq!(config.mismatch(), -4);
        assert_eq!(config.matrix().score(b'A', b'C'), -4);
        config.set_nmatch(0);
        assert_eq!(config.matrix().score(b'N', b'G'), 0);
    }
}
