//! Barcode-only call strategy.
//!
//! No adapter search: every barcode of a flat set is aligned directly
//! against the window with the statistics variant, and a call must reach
//! `min_quality / 100` identity over the barcode length. Looser than the
//! adapter-anchored strategies, kit-independent. Trimming covers the
//! detected barcode only.

use crate::config::Config;
use crate::layout::Barcode;
use crate::scanner::{find_highest_scoring_barcode, BarcodeResult, ExitStatus};

pub(crate) fn scan(
    window: &[u8],
    barcodes: &[Barcode],
    min_quality: f64,
    config: &Config,
) -> BarcodeResult {
    let Some(m) = find_highest_scoring_barcode(window, barcodes, b"", b"", true, config) else {
        return BarcodeResult::unclassified();
    };
    if m.identity < min_quality / 100.0 {
        return BarcodeResult::unclassified();
    }
    BarcodeResult {
        barcode: Some(m.barcode.clone()),
        barcode_score: m.score,
        adapter: None,
        adapter_end: m.read_end,
        trim5p: 0,
        trim3p: 0,
        exit_status: ExitStatus::Classified,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kits;

    #[test]
    fn exact_barcode_is_found_without_an_adapter() {
        let config = Config::default();
        let barcodes = kits::simple_barcodes("standard", None).unwrap();

        // barcode05 embedded in unrelated sequence
        let mut window = b"TTACGCATGCGA".to_vec();
        window.extend_from_slice(b"CTTGTCCAGGGTTTGTGTAACCTT");
        window.extend_from_slice(b"AGCCTAAGCATG");

        let result = scan(&window, &barcodes, 60.0, &config);
        let barcode = result.barcode.unwrap();
        assert_eq!(barcode.name, "barcode05");
        assert_eq!(result.barcode_score, 100.0);
        assert!(result.adapter.is_none());
        // trimming covers the barcode only: the alignment ends where the
        // barcode ends on the window
        assert_eq!(result.adapter_end, 12 + 24 - 1);
    }

    #[test]
    fn low_identity_is_refused() {
        let config = Config::default();
        let barcodes = kits::simple_barcodes("standard", None).unwrap();
        let window = b"TTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTT".to_vec();
        let result = scan(&window, &barcodes, 60.0, &config);
        assert!(result.barcode.is_none());
        assert_eq!(result.exit_status, ExitStatus::Unclassified);
    }

    #[test]
    fn empty_window_is_unclassified() {
        let config = Config::default();
        let barcodes = kits::simple_barcodes("standard", None).unwrap();
        let result = scan(b"", &barcodes, 60.0, &config);
        assert!(result.barcode.is_none());
    }
}
