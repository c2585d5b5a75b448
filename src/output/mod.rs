// mod.rs - Report formatters module

use crate::core::{ComparisonReport, PairwiseScore, PositionAgreement, ReplicateMeans};
use crate::data::PositionKey;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::{create_dir_all, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

pub const FILE_LEGEND: &str = "#GSCORE\tGF\tGM\tISCORE\tIF\tIM\tFILE";
pub const POSITION_LEGEND: &str = "#SCORE\tCHROM\tPOS\tGF\tGM\tOCUR";

/// Which part of a comparison is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputType {
    /// Replicate against replicate scores
    File,
    /// Variant position summary
    Position,
    Both,
}

impl OutputType {
    pub fn includes_files(&self) -> bool {
        matches!(self, OutputType::File | OutputType::Both)
    }

    pub fn includes_positions(&self) -> bool {
        matches!(self, OutputType::Position | OutputType::Both)
    }
}

impl FromStr for OutputType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "file" => Ok(OutputType::File),
            "position" => Ok(OutputType::Position),
            "both" => Ok(OutputType::Both),
            _ => Err(format!("Invalid output type: {}. Use: file, position, both", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    /// One JSON document per group and per line
    Json,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            _ => Err(format!("Unsupported report format: {}. Use: text, json", s)),
        }
    }
}

/// Presentation settings shared by every group of a run
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub output_type: OutputType,
    pub format: ReportFormat,
    /// Show full paths instead of file names
    pub complete_names: bool,
    /// Run settings echoed in each group header
    pub settings: String,
}

fn display_name(name: &str, complete_names: bool) -> String {
    if complete_names {
        return name.to_string();
    }
    name.rsplit(['/', '\\']).next().unwrap_or(name).to_string()
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Always show a decimal part: 100.0, 66.67, 0.5
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

fn score_row(score: &PairwiseScore, other: &str) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}\t{}\t{}",
        format_number(score.global_percent),
        score.global_matches,
        score.global_max,
        format_number(score.inclusion_percent),
        score.inclusion_matches,
        score.inclusion_max,
        other
    )
}

/// Render one group as tab-separated text
pub fn render_text(group_name: &str, report: &ComparisonReport, options: &ReportOptions) -> String {
    let mut paragraph = String::new();
    let mut header_written = false;

    if options.output_type.includes_files() {
        paragraph.push_str(&format!(
            "###{}\tglobal={}%\tsettings: {}\n",
            group_name,
            format_number(round4(report.scores.grand_mean)),
            options.settings
        ));
        header_written = true;

        for (name, means) in &report.scores.means {
            paragraph.push_str(&format!(
                "##{}\tglobal={}\tinclusion={}\n",
                display_name(name, options.complete_names),
                format_number(round4(means.global)),
                format_number(round4(means.inclusion))
            ));
            paragraph.push_str(FILE_LEGEND);
            paragraph.push('\n');

            for (other, score) in report.scores.sorted_row(name) {
                paragraph.push_str(&score_row(score, &display_name(other, options.complete_names)));
                paragraph.push('\n');
            }
        }
    }

    if options.output_type.includes_positions() {
        if !header_written {
            paragraph.push_str(&format!("###{}\tsettings: {}\n", group_name, options.settings));
        }
        paragraph.push_str(POSITION_LEGEND);
        paragraph.push('\n');

        for (key, agreement) in sorted_positions(report) {
            let details = agreement
                .alterations
                .iter()
                .map(|(alt, weight)| format!("{}={}", alt, format_number(*weight)))
                .collect::<Vec<_>>()
                .join(";");
            paragraph.push_str(&format!(
                "{}\t{}\t{}\t{}\t{}\t{}\n",
                format_number(round4(agreement.agreement_ratio())),
                key.chrom,
                key.pos,
                agreement.agreeing.len(),
                agreement.replicate_count,
                details
            ));
        }
    }

    paragraph
}

/// Positions by agreement ratio, highest first; ties keep chromosome/coordinate order
fn sorted_positions(report: &ComparisonReport) -> Vec<(&PositionKey, &PositionAgreement)> {
    let mut positions: Vec<_> = report.positions.iter().collect();
    positions.sort_by(|a, b| b.1.agreement_ratio().total_cmp(&a.1.agreement_ratio()));
    positions
}

#[derive(Serialize)]
struct JsonComparison<'a> {
    other: String,
    #[serde(flatten)]
    score: &'a PairwiseScore,
}

#[derive(Serialize)]
struct JsonReplicate<'a> {
    name: String,
    means: &'a ReplicateMeans,
    comparisons: Vec<JsonComparison<'a>>,
}

#[derive(Serialize)]
struct JsonPosition<'a> {
    chrom: &'a str,
    pos: i64,
    score: f64,
    agreeing: Vec<String>,
    replicate_count: usize,
    alterations: &'a BTreeMap<String, f64>,
}

#[derive(Serialize)]
struct JsonGroup<'a> {
    group: &'a str,
    settings: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    global: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    replicates: Option<Vec<JsonReplicate<'a>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    positions: Option<Vec<JsonPosition<'a>>>,
    comparison_errors: Vec<String>,
}

/// Render one group as a single-line JSON document
pub fn render_json(
    group_name: &str,
    report: &ComparisonReport,
    options: &ReportOptions,
) -> Result<String, String> {
    let short = |name: &str| display_name(name, options.complete_names);

    let replicates = options.output_type.includes_files().then(|| {
        report
            .scores
            .means
            .iter()
            .map(|(name, means)| JsonReplicate {
                name: short(name),
                means,
                comparisons: report
                    .scores
                    .sorted_row(name)
                    .into_iter()
                    .map(|(other, score)| JsonComparison {
                        other: short(other),
                        score,
                    })
                    .collect(),
            })
            .collect()
    });

    let positions = options.output_type.includes_positions().then(|| {
        sorted_positions(report)
            .into_iter()
            .map(|(key, agreement)| JsonPosition {
                chrom: &key.chrom,
                pos: key.pos,
                score: round4(agreement.agreement_ratio()),
                agreeing: agreement.agreeing.iter().map(|n| short(n)).collect(),
                replicate_count: agreement.replicate_count,
                alterations: &agreement.alterations,
            })
            .collect()
    });

    let group = JsonGroup {
        group: group_name,
        settings: &options.settings,
        global: options
            .output_type
            .includes_files()
            .then(|| round4(report.scores.grand_mean)),
        replicates,
        positions,
        comparison_errors: report.errors.iter().map(|e| e.to_string()).collect(),
    };

    serde_json::to_string(&group).map_err(|e| format!("Failed to serialize report: {}", e))
}

/// Render one group in the configured format
pub fn render_group(
    group_name: &str,
    report: &ComparisonReport,
    options: &ReportOptions,
) -> Result<String, String> {
    match options.format {
        ReportFormat::Text => Ok(render_text(group_name, report, options)),
        ReportFormat::Json => render_json(group_name, report, options).map(|line| line + "\n"),
    }
}

/// Comment lines written once at the top of a text report
pub fn run_header(command_line: &str) -> String {
    format!(
        "# Command: {}\n# Generated: {}\n# vcfrep v{}\n",
        command_line,
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
        env!("CARGO_PKG_VERSION")
    )
}

/// Ensure parent directory exists before creating file
fn ensure_parent_dir(file_path: &Path) -> Result<(), String> {
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent).map_err(|e| {
                format!("Failed to create parent directory '{}': {}", parent.display(), e)
            })?;
        }
    }
    Ok(())
}

/// Append to the report file, or print when no file is given
pub fn emit(output_file: Option<&Path>, content: &str) -> Result<(), String> {
    let Some(path) = output_file else {
        print!("{}", content);
        return Ok(());
    };

    ensure_parent_dir(path)?;
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| format!("Failed to open output file '{}': {}", path.display(), e))?;
    file.write_all(content.as_bytes())
        .map_err(|e| format!("Write error: {}", e))?;
    Ok(())
}
