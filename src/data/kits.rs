//! Embedded default kit layout documents.
//!
//! Each constant is a complete kit layout document in the same YAML schema
//! the registry accepts from a kit folder, so the embedded defaults and
//! user-supplied files go through one loader. Adapter leaders and barcode
//! sequences are the publicly documented Oxford Nanopore sequences; runs
//! of `N` mark the barcode placeholder, `X` a modified base.

/// Rapid barcoding kit, 12 barcodes in the rapid flanking context.
pub const RBK001: &str = "\
kit: RBK001
description: Rapid barcoding sequencing kit
sequence: AATGTACTTCGTTCAGTTACGTATTGCTNNNNNNNNNNNNNNNNNNNNNNNNGTTTTCGCATTTATCGTGAAACGCTTTCGCGTTTTTCGTGCGCCGCTTCA
auto_detect: true
trim_offset: 0
barcode_set_1:
  - {id: 1, name: barcode01, sequence: AAGAAAGTTGTCGGTGTCTTTGTG, fwd_strand: true}
  - {id: 2, name: barcode02, sequence: TCGATTCCGTTTGTAGTCGTCTGT, fwd_strand: true}
  - {id: 3, name: barcode03, sequence: GAGTCTTGTGTCCCAGTTACCAGG, fwd_strand: true}
  - {id: 4, name: barcode04, sequence: TTCGGATTCTATCGTGTTTCCCTA, fwd_strand: true}
  - {id: 5, name: barcode05, sequence: CTTGTCCAGGGTTTGTGTAACCTT, fwd_strand: true}
  - {id: 6, name: barcode06, sequence: TTCTCGCAAAGGCAGAAAGTAGTC, fwd_strand: true}
  - {id: 7, name: barcode07, sequence: GTGTTACCGTGGGAATGAATCCTT, fwd_strand: true}
  - {id: 8, name: barcode08, sequence: TTCAGGGAACAAACCAAGTTACGT, fwd_strand: true}
  - {id: 9, name: barcode09, sequence: AACTAGGCACAGCGAGTCTTGGTT, fwd_strand: true}
  - {id: 10, name: barcode10, sequence: AAGCGTTGAAACCTTTGTCCTCTC, fwd_strand: true}
  - {id: 11, name: barcode11, sequence: GTTTCATCTATCGGAGGGAATGGA, fwd_strand: true}
  - {id: 12, name: barcode12, sequence: CAGGTAGAAAGAAGCAGAATCGGA, fwd_strand: true}
";

/// Native (ligation) barcoding kit, 12 native barcodes.
pub const NBD103: &str = "\
kit: NBD103
description: Native barcoding expansion for ligation sequencing
sequence: AATGTACTTCGTTCAGTTACGTATTGCTAAGGTTAANNNNNNNNNNNNNNNNNNNNNNNNCAGCACCT
auto_detect: true
model: {file: nbd103.bin, length: 68}
barcode_set_1:
  - {id: 1, name: barcode01, sequence: CACAAAGACACCGACAACTTTCTT, fwd_strand: true}
  - {id: 2, name: barcode02, sequence: ACAGACGACTACAAACGGAATCGA, fwd_strand: true}
  - {id: 3, name: barcode03, sequence: CCTGGTAACTGGGACACAAGACTC, fwd_strand: true}
  - {id: 4, name: barcode04, sequence: TAGGGAAACACGATAGAATCCGAA, fwd_strand: true}
  - {id: 5, name: barcode05, sequence: AAGGTTACACAAACCCTGGACAAG, fwd_strand: true}
  - {id: 6, name: barcode06, sequence: GACTACTTTCTGCCTTTGCGAGAA, fwd_strand: true}
  - {id: 7, name: barcode07, sequence: AAGGATTCATTCCCACGGTAACAC, fwd_strand: true}
  - {id: 8, name: barcode08, sequence: ACGTAACTTGGTTTGTTCCCTGAA, fwd_strand: true}
  - {id: 9, name: barcode09, sequence: AACCAAGACTCGCTGTGCCTAGTT, fwd_strand: true}
  - {id: 10, name: barcode10, sequence: GAGAGGACAAAGGTTTCAACGCTT, fwd_strand: true}
  - {id: 11, name: barcode11, sequence: TCCATTCCCTCCGATAGATGAAAC, fwd_strand: true}
  - {id: 12, name: barcode12, sequence: TCCGATTCTGCTTCTTTCTACCTG, fwd_strand: true}
";

/// 16S rapid amplicon barcoding. The `X` in the primer is a modified base
/// and must stay score-neutral.
pub const RAB204: &str = "\
kit: RAB204
description: 16S rapid amplicon barcoding kit
sequence: AATGTACTTCGTTCAGTTACGTATTGCTNNNNNNNNNNNNNNNNNNNNNNNNAGAGTTTGATCXTGGCTCAG
auto_detect: true
barcode_set_1:
  - {id: 1, name: barcode01, sequence: AAGAAAGTTGTCGGTGTCTTTGTG, fwd_strand: true}
  - {id: 2, name: barcode02, sequence: TCGATTCCGTTTGTAGTCGTCTGT, fwd_strand: true}
  - {id: 3, name: barcode03, sequence: GAGTCTTGTGTCCCAGTTACCAGG, fwd_strand: true}
  - {id: 4, name: barcode04, sequence: TTCGGATTCTATCGTGTTTCCCTA, fwd_strand: true}
  - {id: 5, name: barcode05, sequence: CTTGTCCAGGGTTTGTGTAACCTT, fwd_strand: true}
  - {id: 6, name: barcode06, sequence: TTCTCGCAAAGGCAGAAAGTAGTC, fwd_strand: true}
  - {id: 7, name: barcode07, sequence: GTGTTACCGTGGGAATGAATCCTT, fwd_strand: true}
  - {id: 8, name: barcode08, sequence: TTCAGGGAACAAACCAAGTTACGT, fwd_strand: true}
  - {id: 9, name: barcode09, sequence: AACTAGGCACAGCGAGTCTTGGTT, fwd_strand: true}
  - {id: 10, name: barcode10, sequence: AAGCGTTGAAACCTTTGTCCTCTC, fwd_strand: true}
  - {id: 11, name: barcode11, sequence: GTTTCATCTATCGGAGGGAATGGA, fwd_strand: true}
  - {id: 12, name: barcode12, sequence: CAGGTAGAAAGAAGCAGAATCGGA, fwd_strand: true}
";

/// PCR barcoding kit. Not eligible for auto-detection.
pub const PBC001: &str = "\
kit: PBC001
description: PCR barcoding kit
sequence: ATCGCCTACCGTGACNNNNNNNNNNNNNNNNNNNNNNNNTTGCCTGTCGCTCTATCTTC
auto_detect: false
barcode_set_1:
  - {id: 1, name: barcode01, sequence: AAGAAAGTTGTCGGTGTCTTTGTG, fwd_strand: true}
  - {id: 2, name: barcode02, sequence: TCGATTCCGTTTGTAGTCGTCTGT, fwd_strand: true}
  - {id: 3, name: barcode03, sequence: GAGTCTTGTGTCCCAGTTACCAGG, fwd_strand: true}
  - {id: 4, name: barcode04, sequence: TTCGGATTCTATCGTGTTTCCCTA, fwd_strand: true}
  - {id: 5, name: barcode05, sequence: CTTGTCCAGGGTTTGTGTAACCTT, fwd_strand: true}
  - {id: 6, name: barcode06, sequence: TTCTCGCAAAGGCAGAAAGTAGTC, fwd_strand: true}
  - {id: 7, name: barcode07, sequence: GTGTTACCGTGGGAATGAATCCTT, fwd_strand: true}
  - {id: 8, name: barcode08, sequence: TTCAGGGAACAAACCAAGTTACGT, fwd_strand: true}
  - {id: 9, name: barcode09, sequence: AACTAGGCACAGCGAGTCTTGGTT, fwd_strand: true}
  - {id: 10, name: barcode10, sequence: AAGCGTTGAAACCTTTGTCCTCTC, fwd_strand: true}
  - {id: 11, name: barcode11, sequence: GTTTCATCTATCGGAGGGAATGGA, fwd_strand: true}
  - {id: 12, name: barcode12, sequence: CAGGTAGAAAGAAGCAGAATCGGA, fwd_strand: true}
";

/// Double-barcode layout: two placeholder regions in one adapter.
pub const DUAL: &str = "\
kit: DUAL
description: Dual barcoding layout with two placeholder regions
sequence: AATGTACTTCGTTCAGTTACGTATTGCTNNNNNNNNNNNNNNNNNNNNNNNNGTTTTCGCATTTATCGTGAAACGCTTTNNNNNNNNNNNNNNNNNNNNNNNNCGCGTTTTTCGTGCGCCGCTTCA
auto_detect: false
barcode_set_1:
  - {id: 1, name: barcode01, sequence: AAGAAAGTTGTCGGTGTCTTTGTG, fwd_strand: true}
  - {id: 2, name: barcode02, sequence: TCGATTCCGTTTGTAGTCGTCTGT, fwd_strand: true}
  - {id: 3, name: barcode03, sequence: GAGTCTTGTGTCCCAGTTACCAGG, fwd_strand: true}
  - {id: 4, name: barcode04, sequence: TTCGGATTCTATCGTGTTTCCCTA, fwd_strand: true}
  - {id: 5, name: barcode05, sequence: CTTGTCCAGGGTTTGTGTAACCTT, fwd_strand: true}
  - {id: 6, name: barcode06, sequence: TTCTCGCAAAGGCAGAAAGTAGTC, fwd_strand: true}
  - {id: 7, name: barcode07, sequence: GTGTTACCGTGGGAATGAATCCTT, fwd_strand: true}
  - {id: 8, name: barcode08, sequence: TTCAGGGAACAAACCAAGTTACGT, fwd_strand: true}
  - {id: 9, name: barcode09, sequence: AACTAGGCACAGCGAGTCTTGGTT, fwd_strand: true}
  - {id: 10, name: barcode10, sequence: AAGCGTTGAAACCTTTGTCCTCTC, fwd_strand: true}
  - {id: 11, name: barcode11, sequence: GTTTCATCTATCGGAGGGAATGGA, fwd_strand: true}
  - {id: 12, name: barcode12, sequence: CAGGTAGAAAGAAGCAGAATCGGA, fwd_strand: true}
barcode_set_2:
  - {id: 1, name: barcode01, sequence: AAGAAAGTTGTCGGTGTCTTTGTG, fwd_strand: true}
  - {id: 2, name: barcode02, sequence: TCGATTCCGTTTGTAGTCGTCTGT, fwd_strand: true}
  - {id: 3, name: barcode03, sequence: GAGTCTTGTGTCCCAGTTACCAGG, fwd_strand: true}
  - {id: 4, name: barcode04, sequence: TTCGGATTCTATCGTGTTTCCCTA, fwd_strand: true}
  - {id: 5, name: barcode05, sequence: CTTGTCCAGGGTTTGTGTAACCTT, fwd_strand: true}
  - {id: 6, name: barcode06, sequence: TTCTCGCAAAGGCAGAAAGTAGTC, fwd_strand: true}
  - {id: 7, name: barcode07, sequence: GTGTTACCGTGGGAATGAATCCTT, fwd_strand: true}
  - {id: 8, name: barcode08, sequence: TTCAGGGAACAAACCAAGTTACGT, fwd_strand: true}
  - {id: 9, name: barcode09, sequence: AACTAGGCACAGCGAGTCTTGGTT, fwd_strand: true}
  - {id: 10, name: barcode10, sequence: AAGCGTTGAAACCTTTGTCCTCTC, fwd_strand: true}
  - {id: 11, name: barcode11, sequence: GTTTCATCTATCGGAGGGAATGGA, fwd_strand: true}
  - {id: 12, name: barcode12, sequence: CAGGTAGAAAGAAGCAGAATCGGA, fwd_strand: true}
";

/// Non-barcoded rapid kit: the bare adapter acts as a kit fingerprint for
/// auto-detection, nothing to demultiplex.
pub const RAD002: &str = "\
kit: RAD002
description: Rapid sequencing kit (non-barcoded)
sequence: AATGTACTTCGTTCAGTTACGTATTGCTGTTTTCGCATTTATCGTGAAACGCTTTCGCGTTTTTCGTGCGCCGCTTCA
auto_detect: true
";

/// Superseded rapid barcoding layout, kept for reference but never loaded.
pub const RBK000: &str = "\
kit: RBK000
description: Early-access rapid barcoding layout
sequence: AATGTACTTCGTTCAGTTACGTATTGCTNNNNNNNNNNNNNNNNNNNNNNNNGTTTTCGCATTTATCGTG
active: false
barcode_set_1:
  - {id: 1, name: barcode01, sequence: AAGAAAGTTGTCGGTGTCTTTGTG, fwd_strand: true}
  - {id: 2, name: barcode02, sequence: TCGATTCCGTTTGTAGTCGTCTGT, fwd_strand: true}
";

/// Flat barcode set for the adapter-free simple strategy.
pub const SIMPLE_STANDARD: &str = "\
kit: standard
description: Flat standard barcode set
sequence: NNNNNNNNNNNNNNNNNNNNNNNN
barcode_set_1:
  - {id: 1, name: barcode01, sequence: AAGAAAGTTGTCGGTGTCTTTGTG, fwd_strand: true}
  - {id: 2, name: barcode02, sequence: TCGATTCCGTTTGTAGTCGTCTGT, fwd_strand: true}
  - {id: 3, name: barcode03, sequence: GAGTCTTGTGTCCCAGTTACCAGG, fwd_strand: true}
  - {id: 4, name: barcode04, sequence: TTCGGATTCTATCGTGTTTCCCTA, fwd_strand: true}
  - {id: 5, name: barcode05, sequence: CTTGTCCAGGGTTTGTGTAACCTT, fwd_strand: true}
  - {id: 6, name: barcode06, sequence: TTCTCGCAAAGGCAGAAAGTAGTC, fwd_strand: true}
  - {id: 7, name: barcode07, sequence: GTGTTACCGTGGGAATGAATCCTT, fwd_strand: true}
  - {id: 8, name: barcode08, sequence: TTCAGGGAACAAACCAAGTTACGT, fwd_strand: true}
  - {id: 9, name: barcode09, sequence: AACTAGGCACAGCGAGTCTTGGTT, fwd_strand: true}
  - {id: 10, name: barcode10, sequence: AAGCGTTGAAACCTTTGTCCTCTC, fwd_strand: true}
  - {id: 11, name: barcode11, sequence: GTTTCATCTATCGGAGGGAATGGA, fwd_strand: true}
  - {id: 12, name: barcode12, sequence: CAGGTAGAAAGAAGCAGAATCGGA, fwd_strand: true}
";

/// All embedded kit layout documents, in registry order.
pub const BUILTIN_KITS: &[(&str, &str)] = &[
    ("RBK001", RBK001),
    ("NBD103", NBD103),
    ("RAB204", RAB204),
    ("PBC001", PBC001),
    ("DUAL", DUAL),
    ("RAD002", RAD002),
    ("RBK000", RBK000),
];

/// Embedded flat barcode sets for simple mode, by set name.
pub const BUILTIN_SIMPLE_SETS: &[(&str, &str)] = &[("standard", SIMPLE_STANDARD)];
