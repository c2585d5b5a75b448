// record.rs - Variant record and single line parser

use crate::error::VcfRepError;
use std::str::FromStr;

/// Number of mandatory columns in a variant call format body line
pub const MANDATORY_COLUMNS: usize = 8;

/// Body columns of a single-sample variant call format file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VcfField {
    Chrom,
    Pos,
    Id,
    Ref,
    Alt,
    Qual,
    Filter,
    Info,
    Format,
    Samples,
}

impl VcfField {
    pub const ALL: [VcfField; 10] = [
        VcfField::Chrom,
        VcfField::Pos,
        VcfField::Id,
        VcfField::Ref,
        VcfField::Alt,
        VcfField::Qual,
        VcfField::Filter,
        VcfField::Info,
        VcfField::Format,
        VcfField::Samples,
    ];

    fn index(self) -> usize {
        self as usize
    }

    pub fn name(&self) -> &'static str {
        match self {
            VcfField::Chrom => "chrom",
            VcfField::Pos => "pos",
            VcfField::Id => "id",
            VcfField::Ref => "ref",
            VcfField::Alt => "alt",
            VcfField::Qual => "qual",
            VcfField::Filter => "filter",
            VcfField::Info => "info",
            VcfField::Format => "format",
            VcfField::Samples => "samples",
        }
    }
}

impl FromStr for VcfField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VcfField::ALL
            .iter()
            .find(|field| field.name() == s.to_lowercase())
            .copied()
            .ok_or_else(|| {
                format!(
                    "Unknown field '{}'. Use: chrom, pos, id, ref, alt, qual, filter, info, format, samples",
                    s
                )
            })
    }
}

/// Per-field inclusion choice, resolved against `FieldSelection::include_all`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Inclusion {
    /// Follow the selection-wide default
    #[default]
    Default,
    Include,
    Exclude,
}

impl Inclusion {
    pub fn resolve(self, include_all: bool) -> bool {
        match self {
            Inclusion::Include => true,
            Inclusion::Exclude => false,
            Inclusion::Default => include_all,
        }
    }
}

/// Which columns end up in a parsed `VariantRecord`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSelection {
    /// Value used by every field left at `Inclusion::Default`
    pub include_all: bool,
    /// Split the INFO column into key/value pairs instead of keeping raw text
    pub parse_info: bool,
    choices: [Inclusion; 10],
}

impl Default for FieldSelection {
    fn default() -> Self {
        Self::all()
    }
}

impl FieldSelection {
    /// Every column, INFO decomposed
    pub fn all() -> Self {
        Self {
            include_all: true,
            parse_info: true,
            choices: [Inclusion::Default; 10],
        }
    }

    /// No column unless explicitly included
    pub fn none() -> Self {
        Self {
            include_all: false,
            ..Self::all()
        }
    }

    pub fn with(mut self, field: VcfField, inclusion: Inclusion) -> Self {
        self.choices[field.index()] = inclusion;
        self
    }

    pub fn include(self, field: VcfField) -> Self {
        self.with(field, Inclusion::Include)
    }

    pub fn exclude(self, field: VcfField) -> Self {
        self.with(field, Inclusion::Exclude)
    }

    pub fn raw_info(mut self) -> Self {
        self.parse_info = false;
        self
    }

    pub fn inclusion(&self, field: VcfField) -> Inclusion {
        self.choices[field.index()]
    }

    pub fn is_included(&self, field: VcfField) -> bool {
        self.inclusion(field).resolve(self.include_all)
    }
}

/// INFO column decomposed into ordered, unique keys
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InfoMap {
    entries: Vec<(String, String)>,
}

impl InfoMap {
    /// Insert or replace a key; the first insertion fixes its position
    pub fn insert(&mut self, key: String, value: String) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Join back into `key=value;flag` text
    pub fn to_info_string(&self) -> String {
        self.entries
            .iter()
            .map(|(k, v)| {
                if v.is_empty() {
                    k.clone()
                } else {
                    format!("{}={}", k, v)
                }
            })
            .collect::<Vec<_>>()
            .join(";")
    }
}

/// INFO column, raw or decomposed depending on `FieldSelection::parse_info`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InfoField {
    Raw(String),
    Parsed(InfoMap),
}

impl InfoField {
    pub fn as_map(&self) -> Option<&InfoMap> {
        match self {
            InfoField::Parsed(map) => Some(map),
            InfoField::Raw(_) => None,
        }
    }

    pub fn to_info_string(&self) -> String {
        match self {
            InfoField::Raw(text) => text.clone(),
            InfoField::Parsed(map) => map.to_info_string(),
        }
    }
}

/// One body line of a variant call format file
///
/// Every column is optional; which ones are present depends on the
/// `FieldSelection` used when parsing. `format` is `None` both when excluded
/// and when the line has no ninth column.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VariantRecord {
    pub chrom: Option<String>,
    pub pos: Option<String>,
    pub id: Option<String>,
    pub reference: Option<String>,
    pub alt: Option<String>,
    pub qual: Option<String>,
    pub filter: Option<String>,
    pub info: Option<InfoField>,
    pub format: Option<String>,
    pub samples: Option<Vec<String>>,
}

impl VariantRecord {
    /// Alteration value, empty when the column was not loaded
    pub fn alt_or_empty(&self) -> &str {
        self.alt.as_deref().unwrap_or("")
    }

    /// Re-serialize the loaded columns in file order
    ///
    /// Parsed INFO is rebuilt from its map, so an empty value such as `AF=`
    /// comes back as the bare key `AF`. Use `FieldSelection::raw_info` for
    /// byte-exact INFO text.
    pub fn to_fields(&self) -> Vec<String> {
        let mut fields = Vec::new();
        let simple = [
            &self.chrom,
            &self.pos,
            &self.id,
            &self.reference,
            &self.alt,
            &self.qual,
            &self.filter,
        ];
        for value in simple.into_iter().flatten() {
            fields.push(value.clone());
        }
        if let Some(info) = &self.info {
            fields.push(info.to_info_string());
        }
        if let Some(format) = &self.format {
            fields.push(format.clone());
        }
        if let Some(samples) = &self.samples {
            fields.extend(samples.iter().cloned());
        }
        fields
    }
}

/// Split an INFO column on `;` then on the first `=`; bare keys map to ""
pub fn parse_info_field(info: &str) -> InfoMap {
    let mut map = InfoMap::default();
    for item in info.split(';') {
        match item.split_once('=') {
            Some((key, value)) => map.insert(key.to_string(), value.to_string()),
            None => map.insert(item.to_string(), String::new()),
        }
    }
    map
}

/// Parse one tab-delimited body line into a `VariantRecord`
pub fn parse_vcf_line(line: &str, selection: &FieldSelection) -> Result<VariantRecord, VcfRepError> {
    let line = line.trim_end_matches(['\n', '\r']);
    let columns: Vec<&str> = line.split('\t').collect();

    if columns.len() < MANDATORY_COLUMNS {
        return Err(VcfRepError::MissingFields {
            line: line.to_string(),
        });
    }

    let wanted = |field: VcfField| selection.is_included(field);
    let take = |field: VcfField, index: usize| wanted(field).then(|| columns[index].to_string());

    let info = wanted(VcfField::Info).then(|| {
        if selection.parse_info {
            InfoField::Parsed(parse_info_field(columns[7]))
        } else {
            InfoField::Raw(columns[7].to_string())
        }
    });

    let format = if wanted(VcfField::Format) {
        columns.get(8).map(|s| s.to_string())
    } else {
        None
    };

    let samples = wanted(VcfField::Samples).then(|| {
        columns
            .iter()
            .skip(9)
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
    });

    Ok(VariantRecord {
        chrom: take(VcfField::Chrom, 0),
        pos: take(VcfField::Pos, 1),
        id: take(VcfField::Id, 2),
        reference: take(VcfField::Ref, 3),
        alt: take(VcfField::Alt, 4),
        qual: take(VcfField::Qual, 5),
        filter: take(VcfField::Filter, 6),
        info,
        format,
        samples,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE: &str = "chr1\t100\trs1\tA\tG\t50\tPASS\tDP=10;SOMATIC;AF=0.5\tGT:DP\t0/1:10";

    #[test]
    fn test_parse_full_line() {
        let record = parse_vcf_line(LINE, &FieldSelection::all()).unwrap();
        assert_eq!(record.chrom.as_deref(), Some("chr1"));
        assert_eq!(record.pos.as_deref(), Some("100"));
        assert_eq!(record.alt.as_deref(), Some("G"));
        assert_eq!(record.format.as_deref(), Some("GT:DP"));
        assert_eq!(record.samples, Some(vec!["0/1:10".to_string()]));

        let info = record.info.as_ref().and_then(|i| i.as_map()).unwrap();
        assert_eq!(info.get("DP"), Some("10"));
        assert_eq!(info.get("SOMATIC"), Some(""));
        assert_eq!(info.len(), 3);
    }

    #[test]
    fn test_too_few_fields() {
        let result = parse_vcf_line("chr1\t100\trs1\tA\tG\t50\tPASS", &FieldSelection::all());
        assert!(matches!(result, Err(VcfRepError::MissingFields { .. })));
    }

    #[test]
    fn test_trailing_newline_is_stripped() {
        let line = format!("{}\n", LINE);
        let record = parse_vcf_line(&line, &FieldSelection::all()).unwrap();
        assert_eq!(record.samples, Some(vec!["0/1:10".to_string()]));
    }

    #[test]
    fn test_eight_columns_only() {
        let record = parse_vcf_line("chr2\t5\t.\tC\tT\t.\t.\tEND=9", &FieldSelection::all()).unwrap();
        assert_eq!(record.format, None);
        assert_eq!(record.samples, Some(Vec::new()));
    }

    #[test]
    fn test_selection_resolution() {
        let selection = FieldSelection::none().include(VcfField::Alt);
        assert!(selection.is_included(VcfField::Alt));
        assert!(!selection.is_included(VcfField::Chrom));

        let selection = FieldSelection::all().exclude(VcfField::Info);
        assert!(!selection.is_included(VcfField::Info));
        assert!(selection.is_included(VcfField::Qual));
    }

    #[test]
    fn test_subset_roundtrip_independent_of_flag_order() {
        let columns: Vec<&str> = LINE.split('\t').collect();

        let first = FieldSelection::none()
            .include(VcfField::Alt)
            .include(VcfField::Chrom)
            .include(VcfField::Filter)
            .raw_info()
            .include(VcfField::Info);
        let second = FieldSelection::none()
            .include(VcfField::Info)
            .include(VcfField::Filter)
            .include(VcfField::Chrom)
            .include(VcfField::Alt)
            .raw_info();

        let expected = vec![columns[0], columns[4], columns[6], columns[7]];
        for selection in [first, second] {
            let record = parse_vcf_line(LINE, &selection).unwrap();
            assert_eq!(record.to_fields(), expected);
        }
    }

    #[test]
    fn test_parsed_info_reserializes() {
        let record = parse_vcf_line(LINE, &FieldSelection::all()).unwrap();
        assert_eq!(record.to_fields(), LINE.split('\t').collect::<Vec<_>>());
    }

    #[test]
    fn test_empty_info_value_only_exact_when_raw() {
        let line = "chr1\t5\t.\tA\tG\t.\tPASS\tAF=;DB";

        let parsed = parse_vcf_line(line, &FieldSelection::all()).unwrap();
        assert_eq!(parsed.to_fields()[7], "AF;DB");

        let raw = parse_vcf_line(line, &FieldSelection::all().raw_info()).unwrap();
        assert_eq!(raw.to_fields()[7], "AF=;DB");
    }

    #[test]
    fn test_info_value_keeps_later_equals() {
        let map = parse_info_field("ANN=a=b;X");
        assert_eq!(map.get("ANN"), Some("a=b"));
        assert_eq!(map.get("X"), Some(""));
    }

    #[test]
    fn test_field_names() {
        assert_eq!("ALT".parse::<VcfField>().unwrap(), VcfField::Alt);
        assert!("depth".parse::<VcfField>().is_err());
    }
}
