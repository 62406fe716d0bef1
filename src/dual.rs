//! Dual-barcode call strategy.
//!
//! The chosen layout must carry two placeholder regions; both are
//! extracted and scored independently and both must produce a barcode.
//! The reported call is a synthetic pair barcode whose id encodes both
//! ids; the reported score is the weaker of the two.

use std::sync::Arc;

use crate::config::Config;
use crate::layout::{AdapterLayout, Barcode};
use crate::scanner::{
    extract_barcode_region, find_best_adapter_template, find_highest_scoring_barcode,
    BarcodeMatch, BarcodeResult, ExitStatus,
};

pub(crate) fn scan(
    window: &[u8],
    layouts: &[Arc<AdapterLayout>],
    config: &Config,
) -> BarcodeResult {
    let Some(hit) = find_best_adapter_template(layouts, window, config) else {
        return BarcodeResult::unclassified();
    };
    let layout = &hit.layout;
    if !layout.is_double_barcode() {
        return BarcodeResult::unclassified();
    }

    let first = call_placeholder(window, layout, 0, hit.read_end, config);
    let second = call_placeholder(window, layout, 1, hit.read_end, config);
    match (first, second) {
        (Some(first), Some(second)) => {
            let pair = Barcode {
                name: format!("barcode{:0>2}/{:0>2}", first.barcode.id, second.barcode.id),
                id: format!("{}/{}", first.barcode.id, second.barcode.id),
                sequence: Vec::new(),
                fwd_strand: true,
            };
            BarcodeResult {
                barcode: Some(pair),
                barcode_score: first.score.min(second.score),
                adapter: Some(Arc::clone(layout)),
                adapter_end: (hit.read_end + layout.trim_offset).min(window.len()),
                trim5p: 0,
                trim3p: 0,
                exit_status: ExitStatus::Classified,
            }
        }
        _ => BarcodeResult::unclassified(),
    }
}

fn call_placeholder<'a>(
    window: &[u8],
    layout: &'a AdapterLayout,
    set_index: usize,
    read_end: usize,
    config: &Config,
) -> Option<BarcodeMatch<'a>> {
    let region = extract_barcode_region(window, layout, set_index, read_end, config);
    find_highest_scoring_barcode(
        region,
        layout.barcode_set(set_index)?,
        layout.upstream_context(config.barcode_context_length(), set_index),
        layout.downstream_context(config.barcode_context_length(), set_index),
        false,
        config,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kits::KitRegistry;

    #[test]
    fn both_placeholders_are_called_and_paired() {
        let config = Config::default();
        let layouts = KitRegistry::load(None).unwrap().by_kit("DUAL");
        let layout = &layouts[0];

        let set1 = layout.barcode_set(0).unwrap();
        let set2 = layout.barcode_set(1).unwrap();
        let template = layout.adapter_sequence();
        // substitute barcode03 into the first placeholder and barcode07
        // into the second
        let mut window = Vec::new();
        window.extend_from_slice(&template[..28]);
        window.extend_from_slice(&set1[2].sequence);
        window.extend_from_slice(&template[52..79]);
        window.extend_from_slice(&set2[6].sequence);
        window.extend_from_slice(&template[103..]);
        window.extend_from_slice(b"TTCCATTAATTCGCCACGCGCCAGAGACT");
        assert_eq!(window.len(), template.len() + 29);

        let result = scan(&window, &layouts, &config);
        let barcode = result.barcode.unwrap();
        assert_eq!(barcode.name, "barcode03/07");
        assert_eq!(barcode.id, "3/7");
        assert!(barcode.sequence.is_empty());
        assert_eq!(result.barcode_score, 100.0);
        assert_eq!(result.exit_status, ExitStatus::Classified);
    }

    #[test]
    fn single_barcode_layout_is_refused() {
        let config = Config::default();
        let layouts = KitRegistry::load(None).unwrap().by_kit("RBK001");
        let barcode02 = layouts[0].barcode_set(0).unwrap()[1].clone();
        let window = layouts[0].adapter_sequence_with(&barcode02);

        let result = scan(&window, &layouts, &config);
        assert!(result.barcode.is_none());
        assert_eq!(result.exit_status, ExitStatus::Unclassified);
    }
}
