use crate::error::{AnalysisError, Result};
use crate::types::{CoefficientTable, PosStat, PosSummary};

/// Relative frequency of every label present in the summary
pub fn coefficients(summary: &PosSummary, total: usize) -> Result<CoefficientTable> {
    if total == 0 || summary.is_empty() {
        return Err(AnalysisError::NoData);
    }

    Ok(summary
        .iter()
        .map(|(label, count)| (label.clone(), count as f64 / total as f64))
        .collect())
}

/// Summary rows ordered by count (descending), then label
pub fn pos_statistics(summary: &PosSummary, total: usize) -> Result<Vec<PosStat>> {
    let mut rows: Vec<PosStat> = coefficients(summary, total)?
        .into_iter()
        .map(|(label, coefficient)| PosStat {
            count: summary.get(label.as_str()),
            label,
            coefficient,
        })
        .collect();

    rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PosLabel;

    fn summary(pairs: &[(&str, usize)]) -> PosSummary {
        pairs
            .iter()
            .map(|(label, count)| (PosLabel::new(*label), *count))
            .collect()
    }

    #[test]
    fn test_coefficients_sum_to_one() {
        let summary = summary(&[("Noun", 3), ("Verb", 2), ("Preposition", 1), ("Unknown", 1)]);
        let table = coefficients(&summary, summary.total()).unwrap();

        let sum: f64 = table.values().sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert!((table[&PosLabel::new("Noun")] - 3.0 / 7.0).abs() < 1e-12);
        assert!(table.values().all(|c| *c > 0.0 && *c <= 1.0));
    }

    #[test]
    fn test_zero_total_is_no_data() {
        let summary = summary(&[("Noun", 1)]);
        assert!(matches!(coefficients(&summary, 0), Err(AnalysisError::NoData)));
        assert!(matches!(
            coefficients(&PosSummary::new(), 5),
            Err(AnalysisError::NoData)
        ));
    }

    #[test]
    fn test_statistics_ordering() {
        let summary = summary(&[("Verb", 2), ("Noun", 3), ("Adverb", 2)]);
        let rows = pos_statistics(&summary, 7).unwrap();

        let labels: Vec<_> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Noun", "Adverb", "Verb"]);
        assert_eq!(rows[0].count, 3);
    }
}
