#![forbid(unsafe_code)]
//! # chopshop
//!
//! Alignment-based **barcode demultiplexing** for Oxford Nanopore reads:
//! find the sequencing-adapter+barcode construct on the noisy ends of a
//! read, assign the read to a sample barcode (or *unclassified*), and
//! report the coordinates that trim the synthetic bases away.
//!
//! ## Highlights
//! - 🧬 **Declarative kit layouts**: adapters are DNA templates with `N`
//!   placeholder runs and `X` modified bases, loaded from YAML documents
//!   (embedded defaults included).
//! - 🎯 **Semi-global scanning**: a scoring-matrix aligner that treats
//!   placeholders and modified bases differently from plain mismatches.
//! - 📦 **Batch mode**: kit auto-detection by vote over a read window,
//!   then per-read calling with the kit pinned, then an optional
//!   abundance filter against spurious calls.
//! - 🔀 **Three strategies**: adapter-anchored (`epi2me`), dual-barcode
//!   (`dual`) and barcode-only (`simple`).
//!
//! ## Examples
//! ```rust
//! use chopshop::{Mode, Scanner};
//!
//! let scanner = Scanner::builder(Mode::Epi2me).kit("RBK001").build().unwrap();
//! let read = concat!(
//!     "AATGTACTTCGTTCAGTTACGTATTGCT",                       // adapter leader
//!     "GAGTCTTGTGTCCCAGTTACCAGG",                           // barcode03
//!     "GTTTTCGCATTTATCGTGAAACGCTTTCGCGTTTTTCGTGCGCCGCTTCA", // adapter stem
//!     "ATCATAAACGCGCTGGAAGTTGCGCCGTTCAATCACCATCACC",        // insert
//! );
//! let result = scanner.detect_barcode(read.as_bytes());
//! assert_eq!(result.barcode.unwrap().name, "barcode03");
//! assert_eq!(result.exit_status.code(), 0);
//! ```
//!
//! Kit layouts can be inspected without a scanner:
//! ```rust
//! use chopshop::{AdapterLayout, BarcodePosition};
//!
//! let pos = AdapterLayout::placeholder_pos(b"AAAANNNNN", 0);
//! assert_eq!(pos, BarcodePosition { start: 4, end: 8, length: 5 });
//! ```

pub mod align;
pub mod batch;
pub mod config;
mod dual;
mod epi2me;
pub mod kits;
pub mod layout;
pub mod matrix;
pub mod report;
pub mod scanner;
mod simple;

pub mod data {
    pub mod kits;
}

pub use config::Config;
pub use kits::{simple_barcodes, KitError, KitRegistry};
pub use layout::{AdapterLayout, Barcode, BarcodePosition, LayoutError, ModelInfo};
pub use report::TsvWriter;
pub use scanner::{BarcodeResult, ExitStatus, Mode, Scanner, ScannerBuilder};

use std::path::Path;

/// All demultiplexing strategies.
pub fn available_modes() -> Vec<Mode> {
    vec![Mode::Epi2me, Mode::Dual, Mode::Simple]
}

/// Kit names and descriptions, from a kit folder or the embedded
/// defaults.
pub fn available_kits(kit_folder: Option<&Path>) -> Result<Vec<(String, String)>, KitError> {
    Ok(KitRegistry::load(kit_folder)?.kit_descriptions())
}

/// Crate version string (from `CARGO_PKG_VERSION`).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
