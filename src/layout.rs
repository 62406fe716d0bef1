//! Adapter layouts: the declarative description of one sequencing kit.
//!
//! A layout is a DNA template over `{A,T,G,C,N,X}` in which runs of `N`
//! mark the placeholder regions a barcode will occupy, plus the ordered
//! barcode sets eligible for those placeholders. Placeholder positions are
//! derived once at construction and every barcode is checked against its
//! placeholder length, so a layout that constructs is internally
//! consistent for the lifetime of the process.

use thiserror::Error;

/// A sample barcode.
///
/// Layout documents carry integer ids; they are stored as strings so a
/// synthesized pair call (`id = "3/7"`) is an ordinary `Barcode` and
/// downstream reporting stays uniform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Barcode {
    pub name: String,
    pub id: String,
    pub sequence: Vec<u8>,
    pub fwd_strand: bool,
}

/// Position of a placeholder region inside an adapter template.
///
/// `start`/`end` are 0-based inclusive; `(-1, -1, 0)` means "no such
/// placeholder".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarcodePosition {
    pub start: i32,
    pub end: i32,
    pub length: i32,
}

impl BarcodePosition {
    pub const NONE: BarcodePosition = BarcodePosition { start: -1, end: -1, length: 0 };

    pub fn is_present(&self) -> bool {
        self.end > -1
    }
}

/// Informational pointer to an alternate-backend model file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelInfo {
    pub file: String,
    pub length: usize,
}

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("kit {kit}: invalid adapter template (alphabet is A/T/G/C/N/X): {sequence}")]
    InvalidTemplate { kit: String, sequence: String },
    #[error(
        "kit {kit}: barcode {barcode} length {got} does not match placeholder length {expected}"
    )]
    BarcodeLengthMismatch { kit: String, barcode: String, got: usize, expected: usize },
}

/// One sequencing kit's adapter description.
#[derive(Debug, Clone)]
pub struct AdapterLayout {
    pub kit: String,
    pub description: String,
    pub auto_detect: bool,
    pub trim_offset: usize,
    pub model: Option<ModelInfo>,
    sequence: Vec<u8>,
    barcode_set_1: Option<Vec<Barcode>>,
    barcode_set_2: Option<Vec<Barcode>>,
    barcode_pos_1: BarcodePosition,
    barcode_pos_2: BarcodePosition,
}

impl AdapterLayout {
    /// Build and validate a layout.
    ///
    /// The template is uppercased, checked against the alphabet, scanned
    /// for its placeholder runs, and every provided barcode is checked
    /// against the corresponding placeholder length.
    pub fn new(
        kit: impl Into<String>,
        sequence: &str,
        barcode_set_1: Option<Vec<Barcode>>,
        barcode_set_2: Option<Vec<Barcode>>,
        description: impl Into<String>,
    ) -> Result<Self, LayoutError> {
        let kit = kit.into();
        let sequence = sequence.to_ascii_uppercase().into_bytes();
        if sequence.is_empty() || sequence.iter().any(|b| !matches!(b, b'A' | b'T' | b'G' | b'C' | b'N' | b'X')) {
            return Err(LayoutError::InvalidTemplate {
                kit,
                sequence: String::from_utf8_lossy(&sequence).into_owned(),
            });
        }

        let barcode_pos_1 = if barcode_set_1.is_some() {
            Self::placeholder_pos(&sequence, 0)
        } else {
            BarcodePosition::NONE
        };
        let barcode_pos_2 = if barcode_set_2.is_some() {
            Self::placeholder_pos(&sequence, 1)
        } else {
            BarcodePosition::NONE
        };

        for (set, pos) in [(&barcode_set_1, barcode_pos_1), (&barcode_set_2, barcode_pos_2)] {
            if let Some(barcodes) = set {
                for barcode in barcodes {
                    if barcode.sequence.len() as i32 != pos.length {
                        return Err(LayoutError::BarcodeLengthMismatch {
                            kit,
                            barcode: barcode.name.clone(),
                            got: barcode.sequence.len(),
                            expected: pos.length.max(0) as usize,
                        });
                    }
                }
            }
        }

        Ok(AdapterLayout {
            kit,
            description: description.into(),
            auto_detect: false,
            trim_offset: 0,
            model: None,
            sequence,
            barcode_set_1,
            barcode_set_2,
            barcode_pos_1,
            barcode_pos_2,
        })
    }

    pub fn with_auto_detect(mut self, auto_detect: bool) -> Self {
        self.auto_detect = auto_detect;
        self
    }

    pub fn with_trim_offset(mut self, trim_offset: usize) -> Self {
        self.trim_offset = trim_offset;
        self
    }

    pub fn with_model(mut self, model: Option<ModelInfo>) -> Self {
        self.model = model;
        self
    }

    /// Locate the `index`-th maximal run of `N` in a template.
    pub fn placeholder_pos(template: &[u8], index: usize) -> BarcodePosition {
        let mut seen = 0usize;
        let mut i = 0usize;
        while i < template.len() {
            if template[i] == b'N' {
                let start = i;
                while i < template.len() && template[i] == b'N' {
                    i += 1;
                }
                if seen == index {
                    return BarcodePosition {
                        start: start as i32,
                        end: (i - 1) as i32,
                        length: (i - start) as i32,
                    };
                }
                seen += 1;
            } else {
                i += 1;
            }
        }
        BarcodePosition::NONE
    }

    /// The template verbatim, placeholder `N`s preserved.
    pub fn adapter_sequence(&self) -> &[u8] {
        &self.sequence
    }

    /// The template with a concrete barcode substituted into placeholder 1.
    pub fn adapter_sequence_with(&self, barcode: &Barcode) -> Vec<u8> {
        if !self.barcode_pos_1.is_present() {
            return self.sequence.clone();
        }
        let start = self.barcode_pos_1.start as usize;
        let end = self.barcode_pos_1.end as usize + 1;
        let mut seq = Vec::with_capacity(self.sequence.len());
        seq.extend_from_slice(&self.sequence[..start]);
        seq.extend_from_slice(&barcode.sequence);
        seq.extend_from_slice(&self.sequence[end..]);
        seq
    }

    pub fn adapter_len(&self) -> usize {
        self.sequence.len()
    }

    fn pos(&self, index: usize) -> BarcodePosition {
        match index {
            0 => self.barcode_pos_1,
            1 => self.barcode_pos_2,
            _ => BarcodePosition::NONE,
        }
    }

    /// Position of the last placeholder base in the template, or -1.
    pub fn barcode_end(&self, index: usize) -> i32 {
        self.pos(index).end
    }

    /// Placeholder length in the template, 0 when absent.
    pub fn barcode_length(&self, index: usize) -> i32 {
        self.pos(index).length
    }

    pub fn barcode_set(&self, index: usize) -> Option<&[Barcode]> {
        match index {
            0 => self.barcode_set_1.as_deref(),
            1 => self.barcode_set_2.as_deref(),
            _ => None,
        }
    }

    /// Up to `n` template bases immediately before placeholder `index`.
    pub fn upstream_context(&self, n: usize, index: usize) -> &[u8] {
        let pos = self.pos(index);
        if !pos.is_present() {
            return &[];
        }
        let start = (pos.start as usize).saturating_sub(n);
        &self.sequence[start..pos.start as usize]
    }

    /// Up to `n` template bases immediately after placeholder `index`.
    pub fn downstream_context(&self, n: usize, index: usize) -> &[u8] {
        let pos = self.pos(index);
        if !pos.is_present() {
            return &[];
        }
        let start = pos.end as usize + 1;
        let end = (start + n).min(self.sequence.len());
        &self.sequence[start..end]
    }

    /// True when the kit carries two barcodes per adapter.
    pub fn is_double_barcode(&self) -> bool {
        self.barcode_set_2.is_some()
    }

    /// Sum of both placeholder lengths.
    pub fn total_barcode_length(&self) -> i32 {
        self.barcode_pos_1.length + self.barcode_pos_2.length
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bc(name: &str, id: u32, seq: &str) -> Barcode {
        Barcode { name: name.into(), id: id.to_string(), sequence: seq.as_bytes().to_vec(), fwd_strand: true }
    }

    const SPACER: &str = "NNNNNNNNNNNNNNNNNNNNNNNN";

    #[test]
    fn placeholder_positions() {
        let pos = AdapterLayout::placeholder_pos(b"NNNNN", 0);
        assert_eq!(pos, BarcodePosition { start: 0, end: 4, length: 5 });

        let pos = AdapterLayout::placeholder_pos(b"AAAANNNNN", 0);
        assert_eq!(pos, BarcodePosition { start: 4, end: 8, length: 5 });

        let pos = AdapterLayout::placeholder_pos(b"NNNNNAAAA", 0);
        assert_eq!(pos, BarcodePosition { start: 0, end: 4, length: 5 });

        assert_eq!(AdapterLayout::placeholder_pos(b"", 0), BarcodePosition::NONE);
        assert_eq!(
            AdapterLayout::placeholder_pos(
                b"AATGTACTTCGTTCAGTTACGTATTGCTGTTTTCGCATTTATCGTGAAACGCTTTCGCGTTTTTCGTGCGCCGCTTCA",
                0
            ),
            BarcodePosition::NONE
        );
    }

    #[test]
    fn placeholder_single_n_and_long_run() {
        let pos = AdapterLayout::placeholder_pos(
            b"AATGTACTTCGTTCAGTTACGTATTGCTNGTTTTCGCATTTATCGTGAAACGCTTTCGCGTTTTTCGTGCGCCGCTTCA",
            0,
        );
        assert_eq!(pos, BarcodePosition { start: 28, end: 28, length: 1 });

        let pos = AdapterLayout::placeholder_pos(
            b"AATGTACTTCGTTCAGTTACGTATTGCTNNNNNNNNNNNNNNNNNNNNNNNNGTTTTCGCATTTATCGTGAAACGCTTTCGCGTTTTTCGTGCGCCGCTTCA",
            0,
        );
        assert_eq!(pos, BarcodePosition { start: 28, end: 51, length: 24 });
    }

    #[test]
    fn placeholder_two_runs() {
        let template =
            b"AATGTACTTCGTTCAGTTACGTATTGCTNNNNNNNNNNNNNNNNNNNNNNNNGTTTTCGCATTTATCGTGNNNNNNNNNNAAACGCTTTCGCGTTTTTCGTGCGCCGCTTCA";
        let first = AdapterLayout::placeholder_pos(template, 0);
        let second = AdapterLayout::placeholder_pos(template, 1);
        assert_eq!(first, BarcodePosition { start: 28, end: 51, length: 24 });
        assert_eq!(second, BarcodePosition { start: 70, end: 79, length: 10 });
        assert!(first.end < second.start);
    }

    #[test]
    fn double_barcode_layout_accessors() {
        let template =
            format!("AAAAAAAAAT{SPACER}ATTTTTTTTTGGGGGGGGGC{SPACER}GCCCCCCCCC");
        let set = vec![bc("barcode01", 1, &"A".repeat(24))];
        let layout =
            AdapterLayout::new("PBC001", &template, Some(set.clone()), Some(set), "test layout")
                .unwrap();

        assert_eq!(layout.adapter_sequence(), template.as_bytes());
        assert_eq!(layout.adapter_len(), template.len());
        assert_eq!(layout.barcode_end(0), (10 + SPACER.len() - 1) as i32);
        assert_eq!(layout.barcode_end(1), (10 + SPACER.len() + 20 + SPACER.len() - 1) as i32);
        assert_eq!(layout.barcode_length(0), SPACER.len() as i32);
        assert_eq!(layout.barcode_length(1), SPACER.len() as i32);
        assert_eq!(layout.upstream_context(2, 0), b"AT");
        assert_eq!(layout.downstream_context(2, 0), b"AT");
        assert_eq!(layout.upstream_context(2, 1), b"GC");
        assert_eq!(layout.downstream_context(2, 1), b"GC");
        assert!(layout.is_double_barcode());
        assert_eq!(layout.total_barcode_length(), 48);
    }

    #[test]
    fn barcode_substitution() {
        let layout = AdapterLayout::new(
            "RBK001",
            &format!("AATG{}GTTT", "NNNN"),
            Some(vec![bc("barcode01", 1, "ACGT")]),
            None,
            "",
        )
        .unwrap();
        let full = layout.adapter_sequence_with(&bc("barcode02", 2, "TTAA"));
        assert_eq!(full, b"AATGTTAAGTTT");
    }

    #[test]
    fn invalid_template_is_rejected() {
        let err = AdapterLayout::new("BAD", "ACGT-ACGT", None, None, "").unwrap_err();
        assert!(matches!(err, LayoutError::InvalidTemplate { .. }));
        let err = AdapterLayout::new("BAD", "", None, None, "").unwrap_err();
        assert!(matches!(err, LayoutError::InvalidTemplate { .. }));
    }

    #[test]
    fn barcode_length_mismatch_is_rejected() {
        let err = AdapterLayout::new(
            "RBK001",
            "AATGNNNNNGTTT",
            Some(vec![bc("barcode01", 1, "ACGT")]),
            None,
            "",
        )
        .unwrap_err();
        assert!(matches!(err, LayoutError::BarcodeLengthMismatch { expected: 5, got: 4, .. }));
    }

    #[test]
    fn lowercase_template_is_uppercased() {
        let layout = AdapterLayout::new("RBK001", "aatgnnnngttt", None, None, "").unwrap();
        assert_eq!(layout.adapter_sequence(), b"AATGNNNNGTTT");
    }
}
