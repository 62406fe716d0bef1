//! Kit registry: discovery and validation of adapter layout documents.
//!
//! Layout documents are YAML, one kit per document. The registry loads
//! every `*.yml`/`*.yaml` file from a kit folder (or a single file), or
//! falls back to the embedded defaults in [`crate::data::kits`]. Documents
//! flagged `active: false` are skipped. A document that fails to parse is
//! logged and skipped so the remaining kits still load; a document that
//! parses but is semantically invalid (bad template alphabet, barcode
//! length not matching its placeholder) aborts the load with a typed
//! error.

use std::path::Path;
use std::sync::Arc;

use log::warn;
use serde::Deserialize;
use thiserror::Error;

use crate::data;
use crate::layout::{AdapterLayout, Barcode, LayoutError, ModelInfo};

#[derive(Debug, Error)]
pub enum KitError {
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("unknown kit: {0}")]
    UnknownKit(String),
    #[error("unknown simple barcode set: {0}")]
    UnknownSimpleSet(String),
    #[error("simple barcode set {0} has no barcodes")]
    EmptySimpleSet(String),
    #[error("invalid demultiplexing mode: {0}")]
    UnknownMode(String),
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct BarcodeEntry {
    id: u32,
    name: String,
    sequence: String,
    #[serde(default = "default_true")]
    fwd_strand: bool,
}

impl From<BarcodeEntry> for Barcode {
    fn from(entry: BarcodeEntry) -> Barcode {
        Barcode {
            name: entry.name,
            id: entry.id.to_string(),
            sequence: entry.sequence.to_ascii_uppercase().into_bytes(),
            fwd_strand: entry.fwd_strand,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ModelEntry {
    file: String,
    length: usize,
}

#[derive(Debug, Deserialize)]
struct KitDocument {
    #[serde(default)]
    kit: String,
    #[serde(default)]
    sequence: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    auto_detect: bool,
    #[serde(default = "default_true")]
    active: bool,
    #[serde(default)]
    trim_offset: usize,
    #[serde(default)]
    barcode_set_1: Option<Vec<BarcodeEntry>>,
    #[serde(default)]
    barcode_set_2: Option<Vec<BarcodeEntry>>,
    #[serde(default)]
    model: Option<ModelEntry>,
}

impl KitDocument {
    fn into_layout(self) -> Result<AdapterLayout, LayoutError> {
        let set1 = self.barcode_set_1.map(|set| set.into_iter().map(Barcode::from).collect());
        let set2 = self.barcode_set_2.map(|set| set.into_iter().map(Barcode::from).collect());
        Ok(AdapterLayout::new(self.kit, &self.sequence, set1, set2, self.description)?
            .with_auto_detect(self.auto_detect)
            .with_trim_offset(self.trim_offset)
            .with_model(self.model.map(|m| ModelInfo { file: m.file, length: m.length })))
    }
}

/// Parse one layout document. `Ok(None)` means "skip": the document is
/// inactive or unparseable (the latter is logged).
fn parse_layout(source: &str, text: &str) -> Result<Option<Arc<AdapterLayout>>, KitError> {
    let doc: KitDocument = match serde_yaml::from_str(text) {
        Ok(doc) => doc,
        Err(err) => {
            warn!("skipping malformed kit file {source}: {err}");
            return Ok(None);
        }
    };
    if !doc.active {
        return Ok(None);
    }
    Ok(Some(Arc::new(doc.into_layout()?)))
}

/// The loaded, immutable set of kit layouts.
#[derive(Debug, Clone)]
pub struct KitRegistry {
    layouts: Vec<Arc<AdapterLayout>>,
}

impl KitRegistry {
    /// Load from a kit folder (or single file), or from the embedded
    /// defaults when no folder is given.
    pub fn load(kit_folder: Option<&Path>) -> Result<Self, KitError> {
        let mut layouts = Vec::new();
        match kit_folder {
            None => {
                for (name, text) in data::kits::BUILTIN_KITS {
                    if let Some(layout) = parse_layout(name, text)? {
                        layouts.push(layout);
                    }
                }
            }
            Some(path) => {
                for file in layout_files(path)? {
                    let text = std::fs::read_to_string(&file).map_err(|source| KitError::Io {
                        path: file.display().to_string(),
                        source,
                    })?;
                    if let Some(layout) = parse_layout(&file.display().to_string(), &text)? {
                        layouts.push(layout);
                    }
                }
            }
        }
        Ok(KitRegistry { layouts })
    }

    pub fn layouts(&self) -> &[Arc<AdapterLayout>] {
        &self.layouts
    }

    /// All layouts for a kit name, case-insensitive.
    pub fn by_kit(&self, kit: &str) -> Vec<Arc<AdapterLayout>> {
        self.layouts
            .iter()
            .filter(|layout| layout.kit.eq_ignore_ascii_case(kit))
            .cloned()
            .collect()
    }

    pub fn contains(&self, kit: &str) -> bool {
        self.layouts.iter().any(|layout| layout.kit.eq_ignore_ascii_case(kit))
    }

    /// The subset eligible for kit auto-detection.
    pub fn auto_detect(&self) -> Vec<Arc<AdapterLayout>> {
        self.layouts.iter().filter(|layout| layout.auto_detect).cloned().collect()
    }

    /// Kit names with their descriptions, registry order, deduplicated.
    pub fn kit_descriptions(&self) -> Vec<(String, String)> {
        let mut seen = Vec::new();
        for layout in &self.layouts {
            if !seen.iter().any(|(kit, _): &(String, String)| kit == &layout.kit) {
                seen.push((layout.kit.clone(), layout.description.clone()));
            }
        }
        seen
    }
}

fn layout_files(path: &Path) -> Result<Vec<std::path::PathBuf>, KitError> {
    if !path.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }
    let entries = std::fs::read_dir(path)
        .map_err(|source| KitError::Io { path: path.display().to_string(), source })?;
    let mut files: Vec<_> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| {
            matches!(
                p.extension().and_then(|e| e.to_str()),
                Some(ext) if ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml")
            )
        })
        .collect();
    // directory iteration order is platform-dependent
    files.sort();
    Ok(files)
}

/// Resolve a flat barcode set for the simple strategy: a YAML file path,
/// a `simple_<name>.yml` document in the kit folder, or an embedded set.
pub fn simple_barcodes(set: &str, kit_folder: Option<&Path>) -> Result<Vec<Barcode>, KitError> {
    let direct = Path::new(set);
    let text = if direct.is_file() {
        std::fs::read_to_string(direct)
            .map_err(|source| KitError::Io { path: set.to_string(), source })?
    } else if let Some(file) = kit_folder
        .map(|folder| folder.join(format!("simple_{set}.yml")))
        .filter(|file| file.is_file())
    {
        std::fs::read_to_string(&file)
            .map_err(|source| KitError::Io { path: file.display().to_string(), source })?
    } else if let Some((_, text)) =
        data::kits::BUILTIN_SIMPLE_SETS.iter().find(|(name, _)| name.eq_ignore_ascii_case(set))
    {
        (*text).to_string()
    } else {
        return Err(KitError::UnknownSimpleSet(set.to_string()));
    };

    let doc: KitDocument = serde_yaml::from_str(&text)
        .map_err(|source| KitError::Parse { path: set.to_string(), source })?;
    let barcodes: Vec<Barcode> =
        doc.barcode_set_1.unwrap_or_default().into_iter().map(Barcode::from).collect();
    if barcodes.is_empty() {
        return Err(KitError::EmptySimpleSet(set.to_string()));
    }
    Ok(barcodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn embedded_registry_loads() {
        let registry = KitRegistry::load(None).unwrap();
        assert!(registry.contains("RBK001"));
        assert!(registry.contains("rbk001"));
        // inactive documents are skipped
        assert!(!registry.contains("RBK000"));

        let rbk = registry.by_kit("RBK001");
        assert_eq!(rbk.len(), 1);
        assert_eq!(rbk[0].barcode_set(0).unwrap().len(), 12);
        assert_eq!(rbk[0].adapter_len(), 102);
        assert!(!rbk[0].is_double_barcode());

        let dual = registry.by_kit("DUAL");
        assert!(dual[0].is_double_barcode());
        assert_eq!(dual[0].barcode_set(1).unwrap().len(), 12);

        // NBD103 carries an informational model pointer
        let nbd = registry.by_kit("NBD103");
        assert_eq!(nbd[0].model.as_ref().unwrap().length, 68);
    }

    #[test]
    fn auto_detect_subset() {
        let registry = KitRegistry::load(None).unwrap();
        let auto = registry.auto_detect();
        let has = |kit: &str| auto.iter().any(|l| l.kit == kit);
        assert!(has("RBK001"));
        assert!(has("NBD103"));
        assert!(has("RAB204"));
        assert!(has("RAD002"));
        assert!(!has("PBC001"));
        assert!(!has("DUAL"));
    }

    #[test]
    fn every_barcode_matches_its_placeholder() {
        let registry = KitRegistry::load(None).unwrap();
        for layout in registry.layouts() {
            for index in 0..2 {
                if let Some(set) = layout.barcode_set(index) {
                    for barcode in set {
                        assert_eq!(
                            barcode.sequence.len() as i32,
                            layout.barcode_length(index),
                            "{} {}",
                            layout.kit,
                            barcode.name
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn malformed_file_is_skipped_but_valid_ones_load() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("rbk001.yml"), data::kits::RBK001).unwrap();
        let mut bad = std::fs::File::create(dir.path().join("broken.yml")).unwrap();
        writeln!(bad, "kit: [unterminated").unwrap();

        let registry = KitRegistry::load(Some(dir.path())).unwrap();
        assert_eq!(registry.layouts().len(), 1);
        assert!(registry.contains("RBK001"));
    }

    #[test]
    fn invalid_layout_aborts_the_load() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("bad.yml"),
            "kit: BAD\nsequence: ACGTQ\ndescription: bad alphabet\n",
        )
        .unwrap();
        assert!(matches!(
            KitRegistry::load(Some(dir.path())),
            Err(KitError::Layout(LayoutError::InvalidTemplate { .. }))
        ));
    }

    #[test]
    fn barcode_placeholder_mismatch_aborts_the_load() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("bad.yml"),
            "kit: BAD\nsequence: AATGNNNNNGTTT\nbarcode_set_1:\n  - {id: 1, name: barcode01, sequence: ACGT}\n",
        )
        .unwrap();
        assert!(matches!(
            KitRegistry::load(Some(dir.path())),
            Err(KitError::Layout(LayoutError::BarcodeLengthMismatch { .. }))
        ));
    }

    #[test]
    fn single_file_load() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("only.yml");
        std::fs::write(&file, data::kits::NBD103).unwrap();
        let registry = KitRegistry::load(Some(&file)).unwrap();
        assert_eq!(registry.layouts().len(), 1);
        assert!(registry.contains("NBD103"));
    }

    #[test]
    fn simple_set_resolution() {
        let barcodes = simple_barcodes("standard", None).unwrap();
        assert_eq!(barcodes.len(), 12);
        assert_eq!(barcodes[1].name, "barcode02");
        assert_eq!(barcodes[1].id, "2");
        assert_eq!(barcodes[1].sequence, b"TCGATTCCGTTTGTAGTCGTCTGT");

        assert!(matches!(
            simple_barcodes("nope", None),
            Err(KitError::UnknownSimpleSet(_))
        ));
    }

    #[test]
    fn simple_set_from_kit_folder() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("simple_mini.yml"), data::kits::SIMPLE_STANDARD).unwrap();
        let barcodes = simple_barcodes("mini", Some(dir.path())).unwrap();
        assert_eq!(barcodes.len(), 12);
    }
}
