use super::domain::{CongestionLevel, Slot};

const SEPARATOR: &str = " • ";

/// Short rationale for a scored slot; always ends with the booked percentage.
pub fn explain_slot(slot: &Slot) -> String {
    let mut reasons: Vec<String> = Vec::with_capacity(5);

    if slot.score >= 80 {
        reasons.push("✓ Optimal time with minimal wait".to_string());
    }
    if slot.congestion == CongestionLevel::Low {
        reasons.push("✓ Low congestion period".to_string());
    }
    if f64::from(slot.booked) < f64::from(slot.capacity) * 0.5 {
        reasons.push("✓ High availability".to_string());
    }
    if slot.estimated_wait < 10 {
        reasons.push("✓ Quick service expected".to_string());
    }
    reasons.push(format!("Currently {}% booked", slot.booked_percent()));

    reasons.join(SEPARATOR)
}
