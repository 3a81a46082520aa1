use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::triage::domain::{PatientDetails, QueueEntry, VisitId};
use crate::triage::queue::TriageQueue;
use crate::triage::vitals::VitalSigns;

pub(super) fn shift_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 3, 7, 0, 0)
        .single()
        .expect("valid shift start")
}

pub(super) fn at_minute(minute: i64) -> DateTime<Utc> {
    shift_start() + Duration::minutes(minute)
}

pub(super) fn visit(id: &str) -> VisitId {
    VisitId::new(id)
}

pub(super) fn entry(id: &str, minute: i64, vitals: VitalSigns) -> QueueEntry {
    QueueEntry::check_in(
        visit(id),
        PatientDetails::new("Patient", id, "Chest pain"),
        at_minute(minute),
        vitals,
    )
}

/// No vitals: score 0.
pub(super) fn stable() -> VitalSigns {
    VitalSigns::default()
}

/// SpO2 92: score 20, moderate.
pub(super) fn hypoxic() -> VitalSigns {
    VitalSigns::default().with_oxygen_saturation(92.0)
}

/// HR 130 + SpO2 85: score 55, urgent.
pub(super) fn deteriorating() -> VitalSigns {
    VitalSigns::default()
        .with_heart_rate(130.0)
        .with_oxygen_saturation(85.0)
}

/// All four axes severe: score 100, critical.
pub(super) fn crashing() -> VitalSigns {
    VitalSigns::default()
        .with_temperature(40.0)
        .with_heart_rate(130.0)
        .with_systolic_bp(170.0)
        .with_oxygen_saturation(85.0)
}

pub(super) fn order(queue: &TriageQueue) -> Vec<String> {
    queue
        .enumerate()
        .iter()
        .map(|entry| entry.visit_id().0.clone())
        .collect()
}

pub(super) fn seeded_queue() -> TriageQueue {
    let mut queue = TriageQueue::new();
    queue.insert(entry("a", 0, stable())).expect("insert a");
    queue.insert(entry("b", 5, hypoxic())).expect("insert b");
    queue.insert(entry("c", 10, deteriorating())).expect("insert c");
    queue.insert(entry("d", 15, hypoxic())).expect("insert d");
    queue
}
