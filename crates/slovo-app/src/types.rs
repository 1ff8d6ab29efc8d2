use std::path::PathBuf;
use std::sync::Arc;

use slovo_core::selector::BackendKind;
use slovo_core::types::{AnalysisReport, CoefficientTable, PosStat};
use slovo_export::{ExportFormat, ExportOutcome};

use crate::ui::ChartKind;

/// Requests handled by the event loop
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    Analyze(String),
    ShowLemmas,
    ShowStatistics,
    ShowChart(ChartKind),
    Export {
        path: PathBuf,
        format: Option<ExportFormat>,
    },
    ShowBackend,
    Help,
    Quit,
}

/// Results sent to the terminal
#[derive(Debug, Clone)]
pub enum UiEvent {
    Report(Arc<AnalysisReport>),
    Lemmas(Arc<AnalysisReport>),
    Statistics {
        rows: Vec<PosStat>,
        total: usize,
    },
    Chart {
        kind: ChartKind,
        coefficients: CoefficientTable,
    },
    Exported(ExportOutcome),
    Backend {
        kind: BackendKind,
        name: Option<String>,
        warning: Option<String>,
        runs: u64,
    },
    /// Informational condition, not a failure
    Notice(String),
    Error(String),
    Shutdown,
}
