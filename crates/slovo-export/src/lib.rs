use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, Workbook, Worksheet};
use serde::Serialize;
use slovo_config::export::ExportConfig;
use slovo_core::AnalysisSession;
use slovo_core::stats;
use slovo_core::types::{AnalysisReport, PosStat};

pub mod error;
pub mod format;

pub use error::{ExportError, Result};
pub use format::ExportFormat;

pub const LEMMA_HEADER: [&str; 3] = ["Base form", "Form count", "Forms (with part of speech)"];
pub const SUMMARY_HEADER: [&str; 3] = ["Part of speech", "Count", "Coefficient"];

pub const LEMMA_SHEET: &str = "Lemmas";
pub const SUMMARY_SHEET: &str = "POS summary";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    /// Used when the target path has no recognizable extension
    pub format: ExportFormat,
    pub include_summary: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            include_summary: false,
        }
    }
}

impl ExportOptions {
    pub fn from_config(config: &ExportConfig) -> Result<Self> {
        Ok(Self {
            format: config.default_format.parse()?,
            include_summary: config.include_summary,
        })
    }
}

/// Where the POS summary table went
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryTarget {
    File(PathBuf),
    /// Second sheet of the lemma workbook
    Sheet(&'static str),
}

/// Files written by one export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    pub format: ExportFormat,
    pub lemma_path: PathBuf,
    pub summary: Option<SummaryTarget>,
    pub rows: usize,
}

#[derive(Serialize)]
struct LemmaRow<'a> {
    base_form: &'a str,
    form_count: usize,
    forms: String,
}

#[derive(Serialize)]
struct SummaryRow<'a> {
    part_of_speech: &'a str,
    count: usize,
    coefficient: f64,
}

/// `<stem>.summary.<ext>` next to the lemma table
pub fn summary_path(path: &Path, format: ExportFormat) -> PathBuf {
    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("lemmas");
    path.with_file_name(format!("{stem}.summary.{}", format.extension()))
}

fn spreadsheet<W: Write>(writer: W, delimiter: u8) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer)
}

fn write_header(sheet: &mut Worksheet, header: &[&str]) -> Result<()> {
    let bold = Format::new().set_bold();
    for (col, title) in (0u16..).zip(header) {
        sheet.write_string_with_format(0, col, *title, &bold)?;
    }
    Ok(())
}

fn lemma_sheet(sheet: &mut Worksheet, report: &AnalysisReport) -> Result<usize> {
    sheet.set_name(LEMMA_SHEET)?;
    write_header(sheet, &LEMMA_HEADER)?;

    for (row, entry) in (1u32..).zip(&report.entries) {
        sheet.write_string(row, 0, entry.lemma.as_str())?;
        sheet.write_number(row, 1, entry.count as f64)?;
        sheet.write_string(row, 2, entry.forms_display())?;
    }
    sheet.autofit();

    Ok(report.entries.len())
}

fn summary_sheet(sheet: &mut Worksheet, stats: &[PosStat]) -> Result<()> {
    sheet.set_name(SUMMARY_SHEET)?;
    write_header(sheet, &SUMMARY_HEADER)?;

    let coefficient = Format::new().set_num_format("0.0000");
    for (row, stat) in (1u32..).zip(stats) {
        sheet.write_string(row, 0, stat.label.as_str())?;
        sheet.write_number(row, 1, stat.count as f64)?;
        sheet.write_number_with_format(row, 2, stat.coefficient, &coefficient)?;
    }
    sheet.autofit();

    Ok(())
}

fn save_workbook<W: Write>(workbook: &mut Workbook, mut writer: W) -> Result<()> {
    writer.write_all(&workbook.save_to_buffer()?)?;
    writer.flush()?;
    Ok(())
}

/// Excel workbook with the lemma sheet, plus the summary sheet when `stats` is given
pub fn write_workbook<W: Write>(
    report: &AnalysisReport,
    stats: Option<&[PosStat]>,
    writer: W,
) -> Result<usize> {
    let mut workbook = Workbook::new();
    let rows = lemma_sheet(workbook.add_worksheet(), report)?;
    if let Some(stats) = stats {
        summary_sheet(workbook.add_worksheet(), stats)?;
    }
    save_workbook(&mut workbook, writer)?;
    Ok(rows)
}

/// One row per lemma, in report order
pub fn write_lemmas<W: Write>(
    report: &AnalysisReport,
    format: ExportFormat,
    mut writer: W,
) -> Result<usize> {
    let rows: Vec<LemmaRow<'_>> = report
        .entries
        .iter()
        .map(|entry| LemmaRow {
            base_form: &entry.lemma,
            form_count: entry.count,
            forms: entry.forms_display(),
        })
        .collect();

    if format == ExportFormat::Xlsx {
        return write_workbook(report, None, writer);
    }

    match format.delimiter() {
        Some(delimiter) => {
            let mut csv = spreadsheet(writer, delimiter);
            csv.write_record(LEMMA_HEADER)?;
            for row in &rows {
                csv.write_record([
                    row.base_form,
                    row.form_count.to_string().as_str(),
                    row.forms.as_str(),
                ])?;
            }
            csv.flush()?;
        }
        None => {
            serde_json::to_writer_pretty(&mut writer, &rows)?;
            writer.flush()?;
        }
    }

    Ok(rows.len())
}

pub fn write_summary<W: Write>(stats: &[PosStat], format: ExportFormat, mut writer: W) -> Result<()> {
    if format == ExportFormat::Xlsx {
        let mut workbook = Workbook::new();
        summary_sheet(workbook.add_worksheet(), stats)?;
        return save_workbook(&mut workbook, writer);
    }

    match format.delimiter() {
        Some(delimiter) => {
            let mut csv = spreadsheet(writer, delimiter);
            csv.write_record(SUMMARY_HEADER)?;
            for stat in stats {
                csv.write_record([
                    stat.label.as_str(),
                    stat.count.to_string().as_str(),
                    format!("{:.4}", stat.coefficient).as_str(),
                ])?;
            }
            csv.flush()?;
        }
        None => {
            let rows: Vec<SummaryRow<'_>> = stats
                .iter()
                .map(|stat| SummaryRow {
                    part_of_speech: stat.label.as_str(),
                    count: stat.count,
                    coefficient: stat.coefficient,
                })
                .collect();
            serde_json::to_writer_pretty(&mut writer, &rows)?;
            writer.flush()?;
        }
    }

    Ok(())
}

/// Write the lemma table to `path`, plus the summary table when requested.
/// The path's extension picks the format when it names one. Excel output
/// keeps the summary on a second sheet, other formats in a sibling file.
pub fn export_report(
    report: &AnalysisReport,
    path: &Path,
    options: &ExportOptions,
) -> Result<ExportOutcome> {
    if report.entries.is_empty() {
        return Err(ExportError::NoData);
    }

    let format = ExportFormat::from_path(path).unwrap_or(options.format);
    let summary = if options.include_summary {
        Some(stats::pos_statistics(&report.pos_summary, report.total_words)?)
    } else {
        None
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let writer = BufWriter::new(File::create(path)?);

    if format == ExportFormat::Xlsx {
        let rows = write_workbook(report, summary.as_deref(), writer)?;
        tracing::info!("Exported {} lemmas to workbook {}", rows, path.display());
        return Ok(ExportOutcome {
            format,
            lemma_path: path.to_path_buf(),
            summary: summary.map(|_| SummaryTarget::Sheet(SUMMARY_SHEET)),
            rows,
        });
    }

    let rows = write_lemmas(report, format, writer)?;
    tracing::info!("Exported {} lemmas to {}", rows, path.display());

    let summary = match summary {
        Some(stats) => {
            let target = summary_path(path, format);
            write_summary(&stats, format, BufWriter::new(File::create(&target)?))?;
            tracing::info!("Exported POS summary to {}", target.display());
            Some(SummaryTarget::File(target))
        }
        None => None,
    };

    Ok(ExportOutcome {
        format,
        lemma_path: path.to_path_buf(),
        summary,
        rows,
    })
}

/// Export the session's latest results
pub fn export_session(
    session: &AnalysisSession,
    path: &Path,
    options: &ExportOptions,
) -> Result<ExportOutcome> {
    let report = session.latest()?;
    export_report(&report, path, options)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use slovo_core::selector::BackendSelector;
    use slovo_core::tags::TagNormalizer;
    use slovo_core::types::{LemmaEntry, PosLabel, PosSummary};

    use super::*;

    fn report() -> AnalysisReport {
        let mut cat = LemmaEntry::new("кошка");
        cat.count = 2;
        cat.forms = BTreeMap::from([
            ("кошки".to_string(), PosLabel::new("Noun")),
            ("кошка".to_string(), PosLabel::new("Noun")),
        ]);

        let mut on = LemmaEntry::new("на");
        on.count = 1;
        on.forms = BTreeMap::from([("на".to_string(), PosLabel::new("Preposition"))]);

        AnalysisReport {
            entries: vec![cat, on],
            pos_summary: PosSummary::from_iter([
                (PosLabel::new("Noun"), 2),
                (PosLabel::new("Preposition"), 1),
            ]),
            total_words: 3,
            backend: "test".to_string(),
        }
    }

    #[test]
    fn test_csv_lemma_table() {
        let mut out = Vec::new();
        let rows = write_lemmas(&report(), ExportFormat::Csv, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(rows, 2);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "Base form,Form count,Forms (with part of speech)");
        assert_eq!(lines[1], "кошка,2,\"кошка (Noun), кошки (Noun)\"");
        assert_eq!(lines[2], "на,1,на (Preposition)");
    }

    #[test]
    fn test_tsv_summary_table() {
        let stats = stats::pos_statistics(&report().pos_summary, 3).unwrap();
        let mut out = Vec::new();
        write_summary(&stats, ExportFormat::Tsv, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "Part of speech\tCount\tCoefficient");
        assert_eq!(lines[1], "Noun\t2\t0.6667");
        assert_eq!(lines[2], "Preposition\t1\t0.3333");
    }

    #[test]
    fn test_json_lemma_table() {
        let mut out = Vec::new();
        write_lemmas(&report(), ExportFormat::Json, &mut out).unwrap();
        let rows: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(rows[0]["base_form"], "кошка");
        assert_eq!(rows[0]["form_count"], 2);
        assert_eq!(rows[1]["forms"], "на (Preposition)");
    }

    #[test]
    fn test_export_with_summary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("lemmas.tsv");
        let options = ExportOptions {
            format: ExportFormat::Csv,
            include_summary: true,
        };

        let outcome = export_report(&report(), &path, &options).unwrap();

        assert_eq!(outcome.format, ExportFormat::Tsv);
        assert_eq!(outcome.rows, 2);
        let summary = dir.path().join("out").join("lemmas.summary.tsv");
        assert_eq!(outcome.summary, Some(SummaryTarget::File(summary.clone())));
        assert!(std::fs::read_to_string(&path).unwrap().starts_with("Base form\t"));
        assert!(std::fs::read_to_string(&summary).unwrap().contains("Noun\t2\t"));
    }

    #[test]
    fn test_unrecognized_extension_uses_default_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lemmas.out");
        let options = ExportOptions {
            format: ExportFormat::Json,
            include_summary: false,
        };

        let outcome = export_report(&report(), &path, &options).unwrap();
        assert_eq!(outcome.format, ExportFormat::Json);
        assert!(outcome.summary.is_none());
        assert!(std::fs::read_to_string(&path).unwrap().trim_start().starts_with('['));
    }

    #[test]
    fn test_xlsx_workbook_with_summary_sheet() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lemmas.xlsx");
        let options = ExportOptions {
            format: ExportFormat::Csv,
            include_summary: true,
        };

        let outcome = export_report(&report(), &path, &options).unwrap();

        assert_eq!(outcome.format, ExportFormat::Xlsx);
        assert_eq!(outcome.rows, 2);
        assert_eq!(outcome.summary, Some(SummaryTarget::Sheet(SUMMARY_SHEET)));
        assert!(!dir.path().join("lemmas.summary.xlsx").exists());

        // xlsx files are zip archives
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_xlsx_lemma_table_to_writer() {
        let mut out = Vec::new();
        let rows = write_lemmas(&report(), ExportFormat::Xlsx, &mut out).unwrap();
        assert_eq!(rows, 2);
        assert!(out.starts_with(b"PK"));
    }

    #[test]
    fn test_export_before_analysis_is_no_data() {
        let session = AnalysisSession::new(BackendSelector::new(), TagNormalizer::default()).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lemmas.csv");

        let err = export_session(&session, &path, &ExportOptions::default()).unwrap_err();
        assert!(matches!(err, ExportError::NoData));
        assert!(err.is_informational());
        assert!(!path.exists());
    }

    #[test]
    fn test_options_from_config() {
        let config = ExportConfig {
            default_format: "tsv".to_string(),
            include_summary: true,
        };
        let options = ExportOptions::from_config(&config).unwrap();
        assert_eq!(options.format, ExportFormat::Tsv);
        assert!(options.include_summary);
    }
}
