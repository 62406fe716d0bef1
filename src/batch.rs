//! Batch coordination: kit auto-detection, pinned per-read calling, and
//! the abundance filter.
//!
//! Pass 1 votes the best-scoring end's layout per read and pins the
//! plurality kit. Pass 2 calls every read with the candidate set
//! restricted to the pinned kit; the pinned set is threaded through the
//! calls as a parameter, so a batch leaves no state behind. Pass 3
//! optionally voids barcodes whose support is a sliver of the dominant
//! one. Results come back in input order.

use std::collections::HashMap;
use std::sync::Arc;

use log::debug;
use rayon::prelude::*;

use crate::layout::AdapterLayout;
use crate::scanner::{
    extract_align_sequence, find_best_adapter_template, BarcodeResult, Scanner, TemplateHit,
};

/// Default number of reads per auto-detection window.
pub const DEFAULT_BATCH_SIZE: usize = 4000;

/// A barcode supported by at most this fraction of the dominant barcode's
/// count is considered spurious.
pub const ABUNDANCE_FILTER_FRACTION: f64 = 0.05;

impl Scanner {
    /// Detect the dominant kit over a window of reads.
    ///
    /// Every read votes the kit of its better-scoring end; `None` means
    /// the window produced no adapter hits at all.
    pub fn detect_kit(&self, reads: &[&[u8]]) -> Option<String> {
        self.install(|| self.kit_vote(reads))
    }

    /// Call a window of reads: pin the kit, call each read against the
    /// pinned layouts, then optionally apply the abundance filter.
    pub fn detect_barcode_batch(&self, reads: &[&[u8]]) -> Vec<BarcodeResult> {
        self.install(|| {
            let kit = self.kit_vote(reads);
            debug!("batch of {} reads pinned kit {:?}", reads.len(), kit);

            let pinned: Vec<Arc<AdapterLayout>> = match &kit {
                Some(kit) => self
                    .layouts
                    .iter()
                    .filter(|layout| layout.kit.eq_ignore_ascii_case(kit))
                    .cloned()
                    .collect(),
                None => Vec::new(),
            };

            let mut results: Vec<BarcodeResult> = reads
                .par_iter()
                .map(|read| self.detect_barcode_with(&pinned, read))
                .collect();

            if self.enable_filter_barcodes {
                filter_barcodes(&mut results);
            }
            results
        })
    }

    fn kit_vote(&self, reads: &[&[u8]]) -> Option<String> {
        let tally: HashMap<Option<String>, usize> = reads
            .par_iter()
            .fold(HashMap::new, |mut acc: HashMap<Option<String>, usize>, read| {
                *acc.entry(self.vote(read)).or_insert(0) += 1;
                acc
            })
            .reduce(HashMap::new, |mut left, right| {
                for (kit, count) in right {
                    *left.entry(kit).or_insert(0) += count;
                }
                left
            });

        let mut entries: Vec<(Option<String>, usize)> = tally.into_iter().collect();
        // plurality; ties prefer a named kit, then the lexicographically
        // smaller name, so the vote is deterministic across thread counts
        entries.sort_by(|(kit_a, count_a), (kit_b, count_b)| {
            count_b.cmp(count_a).then_with(|| match (kit_a, kit_b) {
                (Some(a), Some(b)) => a.cmp(b),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            })
        });
        entries.into_iter().next().and_then(|(kit, _)| kit)
    }

    /// One read's vote: the kit of whichever end aligns an adapter better.
    fn vote(&self, read: &[u8]) -> Option<String> {
        let end5 = self.scan_end(read, false);
        let end3 = self.scan_end(read, true);
        match (end5, end3) {
            (Some(a), Some(b)) => {
                Some(if a.score > b.score { a.layout.kit.clone() } else { b.layout.kit.clone() })
            }
            (Some(a), None) => Some(a.layout.kit.clone()),
            (None, Some(b)) => Some(b.layout.kit.clone()),
            (None, None) => None,
        }
    }

    fn scan_end(&self, read: &[u8], reverse: bool) -> Option<TemplateHit> {
        let window = extract_align_sequence(read, reverse, self.config.max_align_length());
        find_best_adapter_template(&self.layouts, &window, &self.config)
    }

    /// Run `task` in a worker pool sized to the configured thread count
    /// (all logical CPUs when unset).
    fn install<T: Send>(&self, task: impl FnOnce() -> T + Send) -> T {
        let threads = self.threads.unwrap_or_else(num_cpus::get).max(1);
        match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
            Ok(pool) => pool.install(task),
            Err(_) => task(),
        }
    }
}

/// Void calls whose barcode is supported by at most 5% of the dominant
/// barcode's count.
fn filter_barcodes(results: &mut [BarcodeResult]) {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for result in results.iter() {
        if let Some(barcode) = &result.barcode {
            *counts.entry(barcode.id.clone()).or_insert(0) += 1;
        }
    }
    let Some(&max_count) = counts.values().max() else {
        return;
    };
    let threshold = (max_count as f64 * ABUNDANCE_FILTER_FRACTION) as usize;

    for result in results.iter_mut() {
        let voided = result
            .barcode
            .as_ref()
            .map_or(false, |barcode| counts[&barcode.id] <= threshold);
        if voided {
            *result = BarcodeResult::unclassified();
        }
    }
}
