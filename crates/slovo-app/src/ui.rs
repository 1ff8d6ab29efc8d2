use std::fmt::Write as _;

use kanal::AsyncReceiver;
use slovo_core::selector::BackendKind;
use slovo_core::types::{AnalysisReport, CoefficientTable, PosLabel, PosStat};
use slovo_export::{ExportOutcome, LEMMA_HEADER, SUMMARY_HEADER, SummaryTarget};

use crate::types::UiEvent;

const BAR_WIDTH: usize = 40;
const PIE_WIDTH: usize = 50;
const PIE_SYMBOLS: [char; 8] = ['█', '▓', '▒', '░', '#', '*', '+', '~'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ChartKind {
    Bar,
    Pie,
}

/// Prints everything the event loop reports until shutdown
pub async fn ui_loop(app_to_ui_rx: AsyncReceiver<UiEvent>) -> anyhow::Result<()> {
    while let Ok(event) = app_to_ui_rx.recv().await {
        match &event {
            UiEvent::Shutdown => break,
            UiEvent::Error(message) => eprintln!("error: {message}"),
            other => {
                if let Some(text) = render(other) {
                    println!("{text}");
                }
            }
        }
    }

    tracing::debug!("UI loop finished");
    Ok(())
}

pub fn render(event: &UiEvent) -> Option<String> {
    let text = match event {
        UiEvent::Report(report) => render_summary(report),
        UiEvent::Lemmas(report) => render_lemmas(report),
        UiEvent::Statistics { rows, total } => render_statistics(rows, *total),
        UiEvent::Chart { kind, coefficients } => match kind {
            ChartKind::Bar => render_bar_chart(coefficients),
            ChartKind::Pie => render_pie_chart(coefficients),
        },
        UiEvent::Exported(outcome) => render_export(outcome),
        UiEvent::Backend {
            kind,
            name,
            warning,
            runs,
        } => render_backend(*kind, name.as_deref(), warning.as_deref(), *runs),
        UiEvent::Notice(message) => message.clone(),
        UiEvent::Error(message) => format!("error: {message}"),
        UiEvent::Shutdown => return None,
    };
    Some(text)
}

fn table_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

fn table(header: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = table_line(header.iter().copied(), &widths);
    out.push('\n');
    out.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in rows {
        out.push('\n');
        out.push_str(&table_line(row.iter().map(String::as_str), &widths));
    }
    out
}

pub fn render_summary(report: &AnalysisReport) -> String {
    format!(
        "Analyzed {} words into {} lemmas ({} backend)",
        report.total_words,
        report.entries.len(),
        report.backend
    )
}

pub fn render_lemmas(report: &AnalysisReport) -> String {
    let rows: Vec<Vec<String>> = report
        .entries
        .iter()
        .map(|entry| {
            vec![
                entry.lemma.clone(),
                entry.count.to_string(),
                entry.forms_display(),
            ]
        })
        .collect();
    table(&LEMMA_HEADER, &rows)
}

pub fn render_statistics(stats: &[PosStat], total: usize) -> String {
    let rows: Vec<Vec<String>> = stats
        .iter()
        .map(|stat| {
            vec![
                stat.label.to_string(),
                stat.count.to_string(),
                format!("{:.4}", stat.coefficient),
            ]
        })
        .collect();

    let mut out = table(&SUMMARY_HEADER, &rows);
    let _ = write!(out, "\nTotal words: {total}");
    out
}

/// Highest share first, then label
fn ranked(coefficients: &CoefficientTable) -> Vec<(&PosLabel, f64)> {
    let mut ranked: Vec<(&PosLabel, f64)> = coefficients.iter().map(|(l, c)| (l, *c)).collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked
}

fn label_width(coefficients: &CoefficientTable) -> usize {
    coefficients
        .keys()
        .map(|label| label.as_str().chars().count())
        .max()
        .unwrap_or(0)
}

pub fn render_bar_chart(coefficients: &CoefficientTable) -> String {
    let width = label_width(coefficients);

    ranked(coefficients)
        .into_iter()
        .map(|(label, share)| {
            let cells = ((share * BAR_WIDTH as f64).round() as usize).max(1);
            format!(
                "{:<width$}  {:<BAR_WIDTH$}  {:>5.1}%",
                label.as_str(),
                "█".repeat(cells),
                share * 100.0
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Split `total` cells by share so the parts always add up to `total`
fn allocate_cells(shares: &[f64], total: usize) -> Vec<usize> {
    let exact: Vec<f64> = shares.iter().map(|s| s * total as f64).collect();
    let mut cells: Vec<usize> = exact.iter().map(|e| e.floor() as usize).collect();

    let assigned: usize = cells.iter().sum();
    let mut by_remainder: Vec<usize> = (0..shares.len()).collect();
    by_remainder.sort_by(|&a, &b| {
        (exact[b] - exact[b].floor()).total_cmp(&(exact[a] - exact[a].floor()))
    });

    for &idx in by_remainder.iter().take(total.saturating_sub(assigned)) {
        cells[idx] += 1;
    }
    cells
}

pub fn render_pie_chart(coefficients: &CoefficientTable) -> String {
    let ranked = ranked(coefficients);
    let shares: Vec<f64> = ranked.iter().map(|(_, share)| *share).collect();
    let cells = allocate_cells(&shares, PIE_WIDTH);
    let width = label_width(coefficients);

    let mut strip = String::from("[");
    let mut legend = Vec::new();
    for (i, ((label, share), count)) in ranked.iter().zip(&cells).enumerate() {
        let symbol = PIE_SYMBOLS[i % PIE_SYMBOLS.len()];
        strip.extend(std::iter::repeat_n(symbol, *count));
        legend.push(format!(
            "{symbol} {:<width$}  {:>5.1}%",
            label.as_str(),
            share * 100.0
        ));
    }
    strip.push(']');

    format!("{strip}\n{}", legend.join("\n"))
}

pub fn render_export(outcome: &ExportOutcome) -> String {
    let mut out = format!(
        "Exported {} lemmas to {} ({})",
        outcome.rows,
        outcome.lemma_path.display(),
        outcome.format
    );
    match &outcome.summary {
        Some(SummaryTarget::File(path)) => {
            let _ = write!(out, "\nPOS summary written to {}", path.display());
        }
        Some(SummaryTarget::Sheet(name)) => {
            let _ = write!(out, "\nPOS summary on sheet \"{name}\"");
        }
        None => {}
    }
    out
}

pub fn render_backend(
    kind: BackendKind,
    name: Option<&str>,
    warning: Option<&str>,
    runs: u64,
) -> String {
    let mut out = format!(
        "Backend: {} ({}), {} runs",
        name.unwrap_or("none"),
        kind.as_str(),
        runs
    );
    if let Some(warning) = warning {
        let _ = write!(out, "\nwarning: {warning}");
    }
    out
}

pub const HELP: &str = "\
Type text to analyze it, or a command:
  :lemmas              lemma table of the last analysis
  :stats               part-of-speech statistics
  :chart bar|pie       chart of part-of-speech shares
  :export PATH [FMT]   save the lemma table (csv, tsv, json, xlsx)
  :backend             active morphological backend
  :help                this message
  :quit                exit";
