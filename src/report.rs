//! Tab-separated result rows.
//!
//! One row per read: name, length, barcode id (or `none`), score (or
//! `-1`), kit (or `none`), adapter end (or `-1`), free-form comment.

use std::io::{self, Write};

use crate::scanner::BarcodeResult;

pub struct TsvWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> TsvWriter<W> {
    pub fn new(inner: W) -> Self {
        let writer = csv::WriterBuilder::new().delimiter(b'\t').from_writer(inner);
        TsvWriter { writer }
    }

    pub fn write_header(&mut self) -> csv::Result<()> {
        self.writer.write_record([
            "read_id",
            "read_length",
            "barcode",
            "score",
            "kit",
            "adapter_end",
            "comment",
        ])
    }

    pub fn write_result(
        &mut self,
        name: &str,
        read_length: usize,
        comment: &str,
        result: &BarcodeResult,
    ) -> csv::Result<()> {
        let length = read_length.to_string();
        match &result.barcode {
            Some(barcode) => self.writer.write_record([
                name,
                &length,
                &barcode.id,
                &format!("{:.2}", result.barcode_score),
                result.kit().unwrap_or("none"),
                &result.adapter_end.to_string(),
                comment,
            ]),
            None => self
                .writer
                .write_record([name, &length, "none", "-1", "none", "-1", comment]),
        }
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Barcode;
    use crate::scanner::{ExitStatus, Scanner, Mode};

    #[test]
    fn classified_and_unclassified_rows() {
        let mut result = BarcodeResult::unclassified();
        result.barcode = Some(Barcode {
            name: "barcode03".into(),
            id: "3".into(),
            sequence: b"GAGTCTTGTGTCCCAGTTACCAGG".to_vec(),
            fwd_strand: true,
        });
        result.barcode_score = 97.5;
        result.adapter_end = 101;
        result.exit_status = ExitStatus::Classified;

        let mut out = Vec::new();
        {
            let mut tsv = TsvWriter::new(&mut out);
            tsv.write_header().unwrap();
            tsv.write_result("read-1", 1234, "runid=a1", &result).unwrap();
            tsv.write_result("read-2", 987, "", &BarcodeResult::unclassified()).unwrap();
            tsv.flush().unwrap();
        }

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "read_id\tread_length\tbarcode\tscore\tkit\tadapter_end\tcomment"
        );
        // no adapter layout attached: the kit column is none
        assert_eq!(lines[1], "read-1\t1234\t3\t97.50\tnone\t101\trunid=a1");
        assert_eq!(lines[2], "read-2\t987\tnone\t-1\tnone\t-1\t");
    }

    #[test]
    fn kit_column_from_detected_adapter() {
        let registry = crate::kits::KitRegistry::load(None).unwrap();
        let layout = &registry.by_kit("RBK001")[0];
        let barcode = layout.barcode_set(0).unwrap()[1].clone();
        let mut read = layout.adapter_sequence_with(&barcode);
        read.extend_from_slice(b"ATCATAAACGCGCTGGAAGTTGCGCCGTTCAATCACC");

        let scanner = Scanner::builder(Mode::Epi2me).kit("RBK001").build().unwrap();
        let result = scanner.detect_barcode(&read);

        let mut out = Vec::new();
        TsvWriter::new(&mut out).write_result("r", read.len(), "", &result).unwrap();
        let text = String::from_utf8(out).unwrap();
        let fields: Vec<&str> = text.trim_end().split('\t').collect();
        assert_eq!(fields[2], "2");
        assert_eq!(fields[4], "RBK001");
    }
}
