//! Adapter-anchored call strategy.
//!
//! Locates the best adapter template on the window, back-projects the
//! placeholder to extract the barcode region, and picks the best barcode
//! with its adapter context. When the adapter alignment itself is weak
//! (normalized score ≤ 90) on a single-barcode layout, the placeholder
//! back-projection is unreliable, so the barcode search falls back to the
//! whole window.

use std::sync::Arc;

use log::debug;

use crate::config::Config;
use crate::layout::AdapterLayout;
use crate::scanner::{
    extract_barcode_region, find_best_adapter_template, find_highest_scoring_barcode,
    BarcodeResult, ExitStatus,
};

const CONFIDENT_ADAPTER_SCORE: f64 = 90.0;

pub(crate) fn scan(
    window: &[u8],
    layouts: &[Arc<AdapterLayout>],
    config: &Config,
) -> BarcodeResult {
    let Some(hit) = find_best_adapter_template(layouts, window, config) else {
        return BarcodeResult::unclassified();
    };
    let layout = &hit.layout;
    let set_index = 0;

    let region: &[u8] = if hit.score > CONFIDENT_ADAPTER_SCORE || layout.is_double_barcode() {
        extract_barcode_region(window, layout, set_index, hit.read_end, config)
    } else {
        &window[..window.len().min(config.max_align_length())]
    };

    let call = layout.barcode_set(set_index).and_then(|barcodes| {
        find_highest_scoring_barcode(
            region,
            barcodes,
            layout.upstream_context(config.barcode_context_length(), set_index),
            layout.downstream_context(config.barcode_context_length(), set_index),
            false,
            config,
        )
    });

    let adapter_end = (hit.read_end + layout.trim_offset).min(window.len());
    let (barcode, barcode_score) = match call {
        Some(m) => {
            debug!(
                "{}: {} scored {:.1} (runner-up {:.1})",
                layout.kit, m.barcode.name, m.score, m.second_best
            );
            (Some(m.barcode.clone()), m.score)
        }
        None => (None, 0.0),
    };
    BarcodeResult {
        barcode,
        barcode_score,
        adapter: Some(Arc::clone(layout)),
        adapter_end,
        trim5p: 0,
        trim3p: 0,
        exit_status: ExitStatus::Classified,
    }
}
