use std::sync::{Arc, OnceLock};

use super::domain::SlotLabel;

/// Past daily booking counts per slot, oldest first.
const STANDARD_TABLE: [(&str, [u32; 7]); 9] = [
    ("09:00", [4, 5, 6, 5, 4, 5, 6]),
    ("10:00", [5, 6, 6, 5, 6, 5, 6]),
    ("11:00", [3, 4, 3, 4, 3, 4, 3]),
    ("12:00", [2, 3, 2, 3, 2, 2, 3]),
    ("13:00", [2, 2, 3, 2, 3, 2, 2]),
    ("14:00", [3, 4, 4, 3, 4, 3, 4]),
    ("15:00", [4, 5, 4, 5, 4, 5, 5]),
    ("16:00", [5, 6, 5, 6, 6, 5, 6]),
    ("17:00", [4, 5, 4, 5, 4, 4, 5]),
];

/// Immutable per-slot booking history; slot order defines the business day.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoricalPatterns {
    entries: Vec<(SlotLabel, Vec<u32>)>,
}

impl HistoricalPatterns {
    pub fn new(entries: Vec<(SlotLabel, Vec<u32>)>) -> Self {
        Self { entries }
    }

    /// The shared reference table, built on first use.
    pub fn standard() -> Arc<Self> {
        static STANDARD: OnceLock<Arc<HistoricalPatterns>> = OnceLock::new();
        Arc::clone(STANDARD.get_or_init(|| {
            Arc::new(Self::new(
                STANDARD_TABLE
                    .iter()
                    .map(|(label, counts)| (SlotLabel::from(*label), counts.to_vec()))
                    .collect(),
            ))
        }))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SlotLabel, &[u32])> {
        self.entries
            .iter()
            .map(|(label, counts)| (label, counts.as_slice()))
    }

    pub fn labels(&self) -> impl Iterator<Item = &SlotLabel> {
        self.entries.iter().map(|(label, _)| label)
    }

    pub fn observations(&self, label: &SlotLabel) -> Option<&[u32]> {
        self.entries
            .iter()
            .find(|(candidate, _)| candidate == label)
            .map(|(_, counts)| counts.as_slice())
    }

    /// Mean of the last `window` observations for `label`; 0 for unknown labels.
    pub fn moving_average(&self, label: &SlotLabel, window: usize) -> f64 {
        self.observations(label)
            .map(|counts| moving_average(counts, window))
            .unwrap_or(0.0)
    }

    /// Mean over every observation of every slot.
    pub fn overall_average(&self) -> f64 {
        let (sum, count) = self
            .entries
            .iter()
            .flat_map(|(_, counts)| counts.iter())
            .fold((0.0, 0usize), |(sum, count), value| {
                (sum + f64::from(*value), count + 1)
            });

        if count == 0 {
            0.0
        } else {
            sum / count as f64
        }
    }

    /// Slots whose moving average exceeds `threshold` times the overall average.
    pub fn peak_labels(&self, window: usize, threshold: f64) -> Vec<SlotLabel> {
        let overall = self.overall_average();
        self.iter()
            .filter(|(_, counts)| is_peak(moving_average(counts, window), overall, threshold))
            .map(|(label, _)| label.clone())
            .collect()
    }
}

/// A `window` of zero, or one wider than the data, averages everything.
pub(crate) fn moving_average(values: &[u32], window: usize) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let start = if window == 0 {
        0
    } else {
        values.len().saturating_sub(window)
    };
    let recent = &values[start..];
    recent.iter().map(|value| f64::from(*value)).sum::<f64>() / recent.len() as f64
}

pub(crate) fn is_peak(average: f64, overall_average: f64, threshold: f64) -> bool {
    average > overall_average * threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moving_average_uses_most_recent_window() {
        assert_eq!(moving_average(&[1, 1, 1, 4, 4], 2), 4.0);
        assert_eq!(moving_average(&[2, 4], 7), 3.0);
        assert_eq!(moving_average(&[], 7), 0.0);
        assert_eq!(moving_average(&[3, 5], 0), 4.0);
    }

    #[test]
    fn standard_table_covers_business_day() {
        let patterns = HistoricalPatterns::standard();
        let labels: Vec<&str> = patterns.labels().map(SlotLabel::as_str).collect();
        assert_eq!(
            labels,
            vec!["09:00", "10:00", "11:00", "12:00", "13:00", "14:00", "15:00", "16:00", "17:00"]
        );
        assert!(patterns.iter().all(|(_, counts)| counts.len() == 7));
    }

    #[test]
    fn overall_average_flattens_every_slot() {
        let patterns = HistoricalPatterns::standard();
        let expected = 258.0 / 63.0;
        assert!((patterns.overall_average() - expected).abs() < 1e-9);
    }

    #[test]
    fn derived_peaks_follow_threshold_rule() {
        let patterns = HistoricalPatterns::standard();
        let peaks = patterns.peak_labels(7, 1.3);
        assert_eq!(peaks, vec![SlotLabel::from("10:00"), SlotLabel::from("16:00")]);
    }

    #[test]
    fn unknown_label_averages_to_zero() {
        let patterns = HistoricalPatterns::standard();
        assert_eq!(patterns.moving_average(&SlotLabel::from("20:00"), 7), 0.0);
    }

    #[test]
    fn empty_table_has_zero_overall_average() {
        let patterns = HistoricalPatterns::new(Vec::new());
        assert!(patterns.is_empty());
        assert_eq!(patterns.overall_average(), 0.0);
        assert!(patterns.peak_labels(7, 1.3).is_empty());
    }
}
