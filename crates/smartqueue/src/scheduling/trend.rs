use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{Appointment, SlotLabel};

const RISE_FACTOR: f64 = 1.2;
const FALL_FACTOR: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Increasing,
    Stable,
    Decreasing,
}

/// Booking count for one slot label and its direction relative to the previous label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub slot_label: SlotLabel,
    pub count: usize,
    pub trend: Trend,
}

/// Counts appointments per label in first-seen order and compares each count
/// with the label seen before it.
///
/// Every appointment counts regardless of date or status. The comparison
/// follows input order, not clock order, so the same bookings supplied in a
/// different order can yield different trends.
pub fn analyze_congestion_trend(appointments: &[Appointment]) -> Vec<TrendPoint> {
    let mut counts: Vec<(SlotLabel, usize)> = Vec::new();
    let mut positions: HashMap<&SlotLabel, usize> = HashMap::new();

    for appointment in appointments {
        match positions.get(&appointment.time_slot) {
            Some(&position) => counts[position].1 += 1,
            None => {
                positions.insert(&appointment.time_slot, counts.len());
                counts.push((appointment.time_slot.clone(), 1));
            }
        }
    }

    let mut previous: Option<usize> = None;
    let points: Vec<TrendPoint> = counts
        .into_iter()
        .map(|(slot_label, count)| {
            let trend = previous.map_or(Trend::Stable, |prior| classify(count, prior));
            previous = Some(count);
            TrendPoint {
                slot_label,
                count,
                trend,
            }
        })
        .collect();

    debug!(
        appointments = appointments.len(),
        labels = points.len(),
        "analyzed congestion trend"
    );

    points
}

fn classify(count: usize, previous: usize) -> Trend {
    let count = count as f64;
    let previous = previous as f64;
    if count > previous * RISE_FACTOR {
        Trend::Increasing
    } else if count < previous * FALL_FACTOR {
        Trend::Decreasing
    } else {
        Trend::Stable
    }
}
