// vcf.rs - Variant call format loader for one replicate

use crate::data::record::parse_vcf_line;
use crate::data::replicate::{LoadOptions, PositionKey, ReplicateData};
use crate::error::VcfRepError;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

impl ReplicateData {
    /// Load every body line of a variant call format file
    pub fn from_file(file_path: &Path, options: &LoadOptions) -> Result<Self, VcfRepError> {
        let file = File::open(file_path).map_err(|e| VcfRepError::Io {
            path: file_path.to_path_buf(),
            source: e,
        })?;

        let mut data = Self::from_reader(
            BufReader::new(file),
            &file_path.display().to_string(),
            options,
        )?;

        if options.keep_path {
            data.path = Some(file_path.to_path_buf());
        }
        Ok(data)
    }

    /// Load from any line source; `source_name` only labels errors
    ///
    /// Loading is all-or-nothing: the first malformed line aborts with its
    /// 1-based line number.
    pub fn from_reader<R: BufRead>(
        reader: R,
        source_name: &str,
        options: &LoadOptions,
    ) -> Result<Self, VcfRepError> {
        options.validate()?;
        let selection = options.effective_selection();

        let mut data = ReplicateData::new();
        let mut header = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line_number = line_num + 1;
            let line = line.map_err(|e| VcfRepError::Io {
                path: PathBuf::from(source_name),
                source: e,
            })?;
            let line = line.trim_end_matches(['\n', '\r']);

            if line.is_empty() {
                continue;
            }
            if line.starts_with("##") {
                if options.keep_header {
                    header.push(line.to_string());
                }
                continue;
            }
            if line.starts_with('#') {
                continue;
            }

            let record = parse_vcf_line(line, &selection)
                .map_err(|e| e.at_line(line_number, source_name))?;

            // Both columns are forced on by the effective selection
            let chrom = record.chrom.clone().unwrap_or_default();
            let raw_pos = record.pos.as_deref().unwrap_or_default();
            let pos = raw_pos.trim().parse::<i64>().map_err(|_| {
                VcfRepError::InvalidPosition {
                    value: raw_pos.to_string(),
                }
                .at_line(line_number, source_name)
            })?;

            data.insert(PositionKey::new(chrom, pos), record);
        }

        if options.keep_header {
            data.header = Some(header);
        }
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::record::{FieldSelection, VcfField};
    use std::io::Cursor;

    const VCF: &str = "##fileformat=VCFv4.2\n\
##source=caller\n\
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tS1\n\
chr1\t100\t.\tA\tG\t50\tPASS\tDP=3\tGT\t0/1\n\
chr1\t100\t.\tA\tT\t40\tPASS\tDP=3\tGT\t0/1\n\
chr2\t100\t.\tC\t<DEL>\t.\tPASS\tSVTYPE=DEL\tGT\t1/1\n";

    fn load(text: &str, options: &LoadOptions) -> Result<ReplicateData, VcfRepError> {
        ReplicateData::from_reader(Cursor::new(text), "test.vcf", options)
    }

    #[test]
    fn test_load_positions() {
        let data = load(VCF, &LoadOptions::default()).unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data.record_count(), 3);
        assert!(data.header.is_none());
        assert!(data.path.is_none());

        let records = data.get(&PositionKey::new("chr1", 100)).unwrap();
        let alts: Vec<_> = records.iter().map(|r| r.alt_or_empty()).collect();
        assert_eq!(alts, vec!["G", "T"]);
    }

    #[test]
    fn test_keep_header() {
        let options = LoadOptions {
            keep_header: true,
            ..Default::default()
        };
        let data = load(VCF, &options).unwrap();
        assert_eq!(
            data.header,
            Some(vec![
                "##fileformat=VCFv4.2".to_string(),
                "##source=caller".to_string()
            ])
        );
    }

    #[test]
    fn test_alterations_only_still_has_position() {
        let data = load(VCF, &LoadOptions::alterations_only()).unwrap();
        let record = &data.get(&PositionKey::new("chr2", 100)).unwrap()[0];
        assert_eq!(record.chrom.as_deref(), Some("chr2"));
        assert_eq!(record.pos.as_deref(), Some("100"));
        assert_eq!(record.alt.as_deref(), Some("<DEL>"));
        assert!(record.qual.is_none());
        assert!(record.info.is_none());
    }

    #[test]
    fn test_invalid_position_aborts_load() {
        let text = "chr1\t100\t.\tA\tG\t.\t.\t.\nchr1\tabc\t.\tA\tG\t.\t.\t.\n";
        let err = load(text, &LoadOptions::default()).unwrap_err();
        match err {
            VcfRepError::Load { line, source_name, source } => {
                assert_eq!(line, 2);
                assert_eq!(source_name, "test.vcf");
                assert!(matches!(*source, VcfRepError::InvalidPosition { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_short_line_aborts_load() {
        let err = load("chr1\t100\t.\tA\tG\n", &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, VcfRepError::Load { line: 1, .. }));
    }

    #[test]
    fn test_reserved_selection_rejected() {
        let options = LoadOptions {
            selection: FieldSelection::none().include(VcfField::Chrom),
            ..Default::default()
        };
        assert!(matches!(
            load(VCF, &options),
            Err(VcfRepError::ReservedField("chrom"))
        ));
    }
}
