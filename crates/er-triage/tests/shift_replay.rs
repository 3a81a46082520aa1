use chrono::{TimeZone, Utc};
use er_triage::intake::{EventLogImporter, EventLogImportError};
use er_triage::triage::{
    PriorityTier, QueueCensus, QueueError, TriageQueue, UrgencyScore, VisitId, VisitStatus,
};
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn night_shift_log_replays_into_expected_board() {
    let mut queue = TriageQueue::new();
    let outcome = EventLogImporter::replay_path(&mut queue, fixture("night_shift.csv"))
        .expect("fixture replays");

    assert_eq!(outcome.total(), 12);
    assert_eq!(outcome.applied, 10);
    let rejected: Vec<(usize, &str)> = outcome
        .rejected
        .iter()
        .map(|event| (event.row, event.kind))
        .collect();
    assert_eq!(rejected, vec![(11, "status"), (12, "intake")]);
    assert!(matches!(
        outcome.rejected[0].error,
        QueueError::InvalidTransition { .. }
    ));
    assert!(matches!(
        outcome.rejected[1].error,
        QueueError::DuplicateIdentity(_)
    ));

    let board = queue.board();
    let order: Vec<&str> = board.iter().map(|row| row.visit_id.as_str()).collect();
    assert_eq!(order, vec!["ed-0005", "ed-0002", "ed-0004", "ed-0001"]);

    let sepsis = &board[0];
    assert_eq!(sepsis.score, UrgencyScore(100));
    assert_eq!(sepsis.status, VisitStatus::InProgress.label());

    let dyspnea = queue.get(&VisitId::new("ed-0002")).expect("present");
    assert_eq!(dyspnea.score(), UrgencyScore(75));
    assert_eq!(dyspnea.tier(), PriorityTier::Critical);

    let chest_pain = queue.get(&VisitId::new("ed-0003")).expect("history");
    assert_eq!(chest_pain.status(), VisitStatus::Discharged);

    let now = Utc
        .with_ymd_and_hms(2025, 10, 3, 23, 0, 0)
        .single()
        .expect("valid time");
    let census = QueueCensus::collect(&queue, now);
    assert_eq!(census.waiting, 3);
    assert_eq!(census.in_progress, 1);
    assert_eq!(census.discharged, 1);
    assert_eq!(census.tier_count(PriorityTier::Critical), 2);
}

#[test]
fn missing_log_surfaces_io_error() {
    let mut queue = TriageQueue::new();
    match EventLogImporter::replay_path(&mut queue, fixture("missing.csv")) {
        Err(EventLogImportError::Io(_)) => {}
        other => panic!("expected io error, got {other:?}"),
    }
    assert!(queue.is_empty());
}
