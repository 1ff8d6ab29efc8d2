use std::path::PathBuf;

use clap::Parser;
use slovo_export::ExportFormat;

use crate::types::AppEvent;
use crate::ui::ChartKind;

#[derive(Parser, Debug)]
#[command(
    name = "slovo",
    version,
    about = "Lemma and part-of-speech statistics for Russian text"
)]
pub struct Args {
    /// Text to analyze
    #[arg(short, long, conflicts_with = "file")]
    pub text: Option<String>,

    /// File with text to analyze
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// JSON config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write the lemma table to this file
    #[arg(short, long)]
    pub export: Option<PathBuf>,

    /// Export format (csv, tsv, json, xlsx); defaults to the file extension
    #[arg(long, requires = "export")]
    pub format: Option<ExportFormat>,

    /// Print part-of-speech statistics
    #[arg(short, long)]
    pub stats: bool,

    /// Print a chart of part-of-speech shares
    #[arg(long, value_enum)]
    pub chart: Option<ChartKind>,

    /// Keep reading text and commands from stdin
    #[arg(short, long)]
    pub interactive: bool,
}

impl Args {
    /// Requests run before exiting, or before the prompt in interactive mode
    pub fn initial_events(&self, text: Option<String>) -> Vec<AppEvent> {
        let Some(text) = text else {
            return Vec::new();
        };

        let mut events = vec![AppEvent::Analyze(text), AppEvent::ShowLemmas];
        if self.stats {
            events.push(AppEvent::ShowStatistics);
        }
        if let Some(kind) = self.chart {
            events.push(AppEvent::ShowChart(kind));
        }
        if let Some(path) = &self.export {
            events.push(AppEvent::Export {
                path: path.clone(),
                format: self.format,
            });
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_events() {
        let args = Args::parse_from([
            "slovo",
            "--text",
            "Кошка сидела",
            "--stats",
            "--chart",
            "pie",
            "--export",
            "out.csv",
            "--format",
            "tsv",
        ]);

        let events = args.initial_events(args.text.clone());
        assert_eq!(
            events,
            vec![
                AppEvent::Analyze("Кошка сидела".to_string()),
                AppEvent::ShowLemmas,
                AppEvent::ShowStatistics,
                AppEvent::ShowChart(ChartKind::Pie),
                AppEvent::Export {
                    path: PathBuf::from("out.csv"),
                    format: Some(ExportFormat::Tsv),
                },
            ]
        );
    }

    #[test]
    fn test_no_text_no_events() {
        let args = Args::parse_from(["slovo", "--interactive", "--stats"]);
        assert!(args.interactive);
        assert!(args.initial_events(None).is_empty());
    }

    #[test]
    fn test_text_and_file_conflict() {
        assert!(Args::try_parse_from(["slovo", "--text", "кот", "--file", "a.txt"]).is_err());
        assert!(Args::try_parse_from(["slovo", "--format", "csv"]).is_err());
    }
}
