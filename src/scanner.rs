//! Scanner core: locating adapters on read ends and calling barcodes.
//!
//! The per-read flow is shared by every strategy: scan the 5′ window, scan
//! the reverse-complemented 3′ window, gate each end on the minimum
//! quality, refuse reads whose ends call different barcodes, keep the
//! higher-scoring end, optionally screen the read interior for a stray
//! adapter (chimeras), and attach the trimming coordinates. A no-call is
//! a normal result, never an error.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use bio::alphabets::dna;
use log::debug;

use crate::align;
use crate::config::Config;
use crate::kits::{self, KitError, KitRegistry};
use crate::layout::{AdapterLayout, Barcode};
use crate::{dual, epi2me, simple};

/// Normalized barcode score an interior adapter hit needs to flag a read
/// as chimeric.
const MIDDLE_ADAPTER_MIN_SCORE: f64 = 50.0;

/// Outcome class of a call, with the wire codes used in TSV/debug output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// A barcode was assigned.
    Classified,
    /// Nothing above the quality threshold.
    Unclassified,
    /// Adapter found in the read interior; the read is chimeric.
    MiddleAdapter,
    /// 5′ and 3′ ends confidently called different barcodes.
    EndDisagreement,
}

impl ExitStatus {
    pub fn code(self) -> u32 {
        match self {
            ExitStatus::Classified => 0,
            ExitStatus::Unclassified => 1,
            ExitStatus::MiddleAdapter => 997,
            ExitStatus::EndDisagreement => 1002,
        }
    }
}

/// Result of calling one read.
#[derive(Debug, Clone)]
pub struct BarcodeResult {
    pub barcode: Option<Barcode>,
    /// Normalized score in `[0, 100]`; 0 when no barcode was called.
    pub barcode_score: f64,
    pub adapter: Option<Arc<AdapterLayout>>,
    /// Last base of the adapter alignment, in read coordinates.
    pub adapter_end: usize,
    /// Half-open trimming interval `[trim5p, trim3p)` on the read.
    pub trim5p: usize,
    pub trim3p: usize,
    pub exit_status: ExitStatus,
}

impl BarcodeResult {
    pub fn unclassified() -> Self {
        BarcodeResult {
            barcode: None,
            barcode_score: 0.0,
            adapter: None,
            adapter_end: 0,
            trim5p: 0,
            trim3p: 0,
            exit_status: ExitStatus::Unclassified,
        }
    }

    /// Kit name of the identified adapter, if any.
    pub fn kit(&self) -> Option<&str> {
        self.adapter.as_deref().map(|adapter| adapter.kit.as_str())
    }
}

/// Extract the read window that will be scanned for an adapter.
///
/// `length == 0` returns the whole read untouched (reverse flag included);
/// otherwise the first `length` bases, or the reverse complement of the
/// last `length` bases.
pub(crate) fn extract_align_sequence(read: &[u8], rev_comp: bool, length: usize) -> Vec<u8> {
    if length == 0 {
        return read.to_vec();
    }
    if rev_comp {
        let start = read.len().saturating_sub(length);
        dna::revcomp(&read[start..])
    } else {
        read[..length.min(read.len())].to_vec()
    }
}

/// Back-project the placeholder position through the adapter alignment to
/// the read, then widen both sides to absorb indel slippage.
pub(crate) fn extract_barcode_region<'a>(
    read: &'a [u8],
    layout: &AdapterLayout,
    set_index: usize,
    adapter_end: usize,
    config: &Config,
) -> &'a [u8] {
    let read_len = read.len() as i64;
    let adapter_len = layout.adapter_len() as i64;
    let barcode_end = layout.barcode_end(set_index) as i64;
    let barcode_len = layout.barcode_length(set_index) as i64;

    let mut end = adapter_end as i64 - (adapter_len - barcode_end) + 1;
    let mut start = end - barcode_len;

    let extension = config.extracted_barcode_extension() as i64;
    start -= extension.min(start);
    end += extension.min(read_len - end);

    let from = start.clamp(0, read_len) as usize;
    let to = (end + 1).clamp(0, read_len) as usize;
    if from >= to {
        &read[0..0]
    } else {
        &read[from..to]
    }
}

/// Best barcode for an extracted read region.
#[derive(Debug, Clone)]
pub(crate) struct BarcodeMatch<'a> {
    pub barcode: &'a Barcode,
    /// Normalized score: `100 * raw / |context + barcode + context|`.
    pub score: f64,
    /// Runner-up normalized score, 0 with a single candidate.
    pub second_best: f64,
    /// `matches / |barcode|`, only filled when statistics are requested.
    pub identity: f64,
    /// End of the barcode alignment on the region.
    pub read_end: usize,
}

/// Align every candidate barcode (wrapped in its adapter context) against
/// the extracted region and keep the best normalized score; earlier
/// candidates win ties.
pub(crate) fn find_highest_scoring_barcode<'a>(
    region: &[u8],
    barcodes: &'a [Barcode],
    upstream: &[u8],
    downstream: &[u8],
    compute_identity: bool,
    config: &Config,
) -> Option<BarcodeMatch<'a>> {
    if region.is_empty() {
        return None;
    }

    let mut best: Option<BarcodeMatch<'a>> = None;
    let mut second_best = 0.0f64;

    for barcode in barcodes {
        let mut query =
            Vec::with_capacity(upstream.len() + barcode.sequence.len() + downstream.len());
        query.extend_from_slice(upstream);
        query.extend_from_slice(&barcode.sequence);
        query.extend_from_slice(downstream);
        if query.is_empty() {
            continue;
        }

        let (raw, read_end, matches) = if compute_identity {
            match align::semi_global_stats(region, &query, 1, 1, config.matrix_barcode()) {
                Some(stats) => (stats.score, stats.read_end, stats.matches),
                None => continue,
            }
        } else {
            match align::semi_global(region, &query, 1, 1, config.matrix_barcode()) {
                Some(aln) => (aln.score, aln.read_end, 0),
                None => continue,
            }
        };

        let score = raw as f64 * 100.0 / query.len() as f64;
        let identity = if compute_identity && !barcode.sequence.is_empty() {
            matches as f64 / barcode.sequence.len() as f64
        } else {
            0.0
        };

        match &best {
            Some(current) if score <= current.score => {
                if score > second_best {
                    second_best = score;
                }
            }
            _ => {
                if let Some(current) = &best {
                    second_best = current.score;
                }
                best = Some(BarcodeMatch { barcode, score, second_best: 0.0, identity, read_end });
            }
        }
    }

    best.map(|mut m| {
        m.second_best = second_best;
        m
    })
}

/// Best adapter template for a scan window.
#[derive(Debug, Clone)]
pub(crate) struct TemplateHit {
    pub layout: Arc<AdapterLayout>,
    /// End of the adapter alignment on the window.
    pub read_end: usize,
    /// Normalized score in `[.., 100]`.
    pub score: f64,
}

/// Theoretical maximum raw score of a template under the active config:
/// plain bases at `match`, placeholder bases at `nmatch`. `None` when the
/// template cannot produce a positive maximum.
fn normalization_denominator(layout: &AdapterLayout, config: &Config) -> Option<f64> {
    let barcode_len = i64::from(layout.total_barcode_length());
    let adapter_len = layout.adapter_len() as i64;
    let denominator = (adapter_len - barcode_len) * i64::from(config.match_score())
        + barcode_len * i64::from(config.nmatch());
    (denominator > 0).then_some(denominator as f64)
}

/// Align every candidate template against the window and keep the best
/// normalized score; earlier layouts win ties.
pub(crate) fn find_best_adapter_template(
    layouts: &[Arc<AdapterLayout>],
    window: &[u8],
    config: &Config,
) -> Option<TemplateHit> {
    if window.is_empty() {
        return None;
    }
    let mut best: Option<TemplateHit> = None;
    for layout in layouts {
        let Some(denominator) = normalization_denominator(layout, config) else {
            continue;
        };
        let Some(aln) = align::semi_global(
            window,
            layout.adapter_sequence(),
            config.gap_open(),
            config.gap_extend(),
            config.matrix(),
        ) else {
            continue;
        };
        let score = f64::from(aln.score) * 100.0 / denominator;
        if best.as_ref().map_or(true, |b| b.score < score) {
            best = Some(TemplateHit { layout: Arc::clone(layout), read_end: aln.read_end, score });
        }
    }
    best
}

/// Call strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Adapter-anchored single call (default).
    Epi2me,
    /// Two placeholders in one adapter, reported as a pair.
    Dual,
    /// Barcode-only search without an adapter.
    Simple,
}

impl Mode {
    pub fn name(self) -> &'static str {
        match self {
            Mode::Epi2me => "epi2me",
            Mode::Dual => "dual",
            Mode::Simple => "simple",
        }
    }

    pub fn default_min_quality(self) -> f64 {
        match self {
            Mode::Epi2me => 58.0,
            Mode::Dual => 60.0,
            Mode::Simple => 60.0,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = KitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "epi2me" => Ok(Mode::Epi2me),
            "dual" => Ok(Mode::Dual),
            "simple" => Ok(Mode::Simple),
            other => Err(KitError::UnknownMode(other.to_string())),
        }
    }
}

pub(crate) enum Strategy {
    Epi2me,
    Dual,
    Simple { barcodes: Vec<Barcode> },
}

/// A configured barcode caller.
///
/// Construction resolves the candidate layouts once; calling is pure and
/// shares only this immutable state, so a scanner can be used from many
/// threads at once.
pub struct Scanner {
    strategy: Strategy,
    pub(crate) layouts: Vec<Arc<AdapterLayout>>,
    pub(crate) min_quality: f64,
    pub(crate) threads: Option<usize>,
    pub(crate) enable_filter_barcodes: bool,
    scan_middle_adapter: bool,
    pub(crate) config: Config,
}

impl Scanner {
    pub fn builder(mode: Mode) -> ScannerBuilder {
        ScannerBuilder {
            mode,
            kit: None,
            min_quality: None,
            kit_folder: None,
            threads: None,
            enable_filter_barcodes: false,
            scan_middle_adapter: false,
            config: None,
        }
    }

    pub fn mode(&self) -> Mode {
        match self.strategy {
            Strategy::Epi2me => Mode::Epi2me,
            Strategy::Dual => Mode::Dual,
            Strategy::Simple { .. } => Mode::Simple,
        }
    }

    pub fn min_quality(&self) -> f64 {
        self.min_quality
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Candidate layouts this scanner considers.
    pub fn layouts(&self) -> &[Arc<AdapterLayout>] {
        &self.layouts
    }

    /// Call a single read.
    pub fn detect_barcode(&self, read: &[u8]) -> BarcodeResult {
        self.detect_barcode_with(&self.layouts, read)
    }

    /// Call a single read against an explicit candidate set. Batch pass 2
    /// threads the pinned kit through here instead of mutating scanner
    /// state.
    pub(crate) fn detect_barcode_with(
        &self,
        layouts: &[Arc<AdapterLayout>],
        read: &[u8],
    ) -> BarcodeResult {
        let window_len = self.config.max_align_length();

        let window5 = extract_align_sequence(read, false, window_len);
        let mut result5 = self.scan(&window5, layouts);
        let trim5p = result5.adapter_end;
        if result5.barcode_score < self.min_quality {
            result5 = BarcodeResult::unclassified();
        }

        let window3 = extract_align_sequence(read, true, window_len);
        let mut result3 = self.scan(&window3, layouts);
        let mut trim3p = read.len();
        if result3.adapter.is_some() && result3.adapter_end > 0 {
            trim3p = trim3p.saturating_sub(result3.adapter_end);
        }
        if result3.barcode_score < self.min_quality {
            result3 = BarcodeResult::unclassified();
        }

        let mut best = BarcodeResult::unclassified();
        let mut best_score = 0.0;
        for candidate in [&result5, &result3] {
            if candidate.barcode_score > best_score {
                best_score = candidate.barcode_score;
                best = candidate.clone();
            }
        }

        // both ends confident but naming different barcodes: refuse
        if let (Some(barcode5), Some(barcode3)) = (&result5.barcode, &result3.barcode) {
            if barcode5.id != barcode3.id {
                best = BarcodeResult::unclassified();
                best.exit_status = ExitStatus::EndDisagreement;
            }
        }

        if self.scan_middle_adapter {
            if let Some(adapter) = best.adapter.clone() {
                if self.scan_middle(read, &adapter.kit, layouts) {
                    best = BarcodeResult::unclassified();
                    best.exit_status = ExitStatus::MiddleAdapter;
                }
            }
        }

        best.trim5p = trim5p;
        best.trim3p = trim3p;
        if best.trim3p < best.trim5p {
            // the read is nothing but adapter
            best.trim5p = 0;
        }
        best
    }

    /// One window scan with the active strategy.
    pub(crate) fn scan(&self, window: &[u8], layouts: &[Arc<AdapterLayout>]) -> BarcodeResult {
        match &self.strategy {
            Strategy::Epi2me => epi2me::scan(window, layouts, &self.config),
            Strategy::Dual => dual::scan(window, layouts, &self.config),
            Strategy::Simple { barcodes } => {
                simple::scan(window, barcodes, self.min_quality, &self.config)
            }
        }
    }

    /// Screen the read interior for the detected kit's adapter, forward
    /// then reverse-complemented. Reads too short to have an interior
    /// pass.
    fn scan_middle(&self, read: &[u8], kit: &str, layouts: &[Arc<AdapterLayout>]) -> bool {
        let margin = self.config.max_align_length();
        if read.len() <= 2 * margin {
            return false;
        }
        let interior = &read[margin..read.len() - margin];

        let kit_layouts: Vec<Arc<AdapterLayout>> = layouts
            .iter()
            .filter(|layout| layout.kit.eq_ignore_ascii_case(kit))
            .cloned()
            .collect();
        if kit_layouts.is_empty() {
            return false;
        }

        let forward = self.scan(interior, &kit_layouts);
        if forward.barcode_score >= MIDDLE_ADAPTER_MIN_SCORE {
            debug!(
                "middle adapter ({kit}) found with score {:.1} at {}",
                forward.barcode_score, forward.adapter_end
            );
            return true;
        }

        let interior_rc = dna::revcomp(interior);
        let reverse = self.scan(&interior_rc, &kit_layouts);
        if reverse.barcode_score >= MIDDLE_ADAPTER_MIN_SCORE {
            debug!(
                "middle adapter ({kit}) found on reverse strand with score {:.1} at {}",
                reverse.barcode_score, reverse.adapter_end
            );
            return true;
        }
        false
    }
}

/// Builder for [`Scanner`].
pub struct ScannerBuilder {
    mode: Mode,
    kit: Option<String>,
    min_quality: Option<f64>,
    kit_folder: Option<PathBuf>,
    threads: Option<usize>,
    enable_filter_barcodes: bool,
    scan_middle_adapter: bool,
    config: Option<Config>,
}

impl ScannerBuilder {
    /// Kit name, `"auto"` for the auto-detectable subset (the default).
    /// In simple mode this names the flat barcode set (or a YAML file).
    pub fn kit(mut self, kit: impl Into<String>) -> Self {
        self.kit = Some(kit.into());
        self
    }

    /// Minimum barcode quality; defaults depend on the mode.
    pub fn min_quality(mut self, min_quality: f64) -> Self {
        self.min_quality = Some(min_quality);
        self
    }

    /// Folder of kit layout documents instead of the embedded defaults.
    pub fn kit_folder(mut self, folder: impl Into<PathBuf>) -> Self {
        self.kit_folder = Some(folder.into());
        self
    }

    /// Worker threads for batch calls; defaults to all logical CPUs.
    pub fn threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Void rare barcode calls after a batch (abundance filter).
    pub fn enable_filter_barcodes(mut self, enable: bool) -> Self {
        self.enable_filter_barcodes = enable;
        self
    }

    /// Screen read interiors for stray adapters (chimera rejection).
    pub fn scan_middle_adapter(mut self, enable: bool) -> Self {
        self.scan_middle_adapter = enable;
        self
    }

    /// Override the scoring/window parameters.
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    pub fn build(self) -> Result<Scanner, KitError> {
        let registry = KitRegistry::load(self.kit_folder.as_deref())?;
        let kit = self.kit.as_deref().filter(|kit| !kit.eq_ignore_ascii_case("auto"));

        let (strategy, layouts) = match self.mode {
            Mode::Epi2me => {
                let layouts = resolve_layouts(&registry, kit)?;
                (Strategy::Epi2me, layouts)
            }
            Mode::Dual => {
                // dual kits are not auto-detectable; default to the DUAL layout
                let layouts = resolve_layouts(&registry, Some(kit.unwrap_or("DUAL")))?;
                (Strategy::Dual, layouts)
            }
            Mode::Simple => {
                let set = kit.unwrap_or("standard");
                let barcodes = kits::simple_barcodes(set, self.kit_folder.as_deref())?;
                (Strategy::Simple { barcodes }, registry.auto_detect())
            }
        };

        Ok(Scanner {
            strategy,
            layouts,
            min_quality: self.min_quality.unwrap_or_else(|| self.mode.default_min_quality()),
            threads: self.threads,
            enable_filter_barcodes: self.enable_filter_barcodes,
            scan_middle_adapter: self.scan_middle_adapter,
            config: self.config.unwrap_or_default(),
        })
    }
}

fn resolve_layouts(
    registry: &KitRegistry,
    kit: Option<&str>,
) -> Result<Vec<Arc<AdapterLayout>>, KitError> {
    match kit {
        None => Ok(registry.auto_detect()),
        Some(kit) => {
            let layouts = registry.by_kit(kit);
            if layouts.is_empty() {
                return Err(KitError::UnknownKit(kit.to_string()));
            }
            Ok(layouts)
        }
    }
}
