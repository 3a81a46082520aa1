use chrono::{DateTime, Duration, TimeZone, Utc};
use er_triage::triage::{
    assess, PatientDetails, PriorityTier, QueueCensus, QueueEntry, QueueError, TriageQueue,
    UrgencyScore, VisitId, VisitStatus, VitalSigns,
};

fn shift_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 3, 19, 0, 0)
        .single()
        .expect("valid shift start")
}

fn check_in(id: &str, minute: i64, vitals: VitalSigns) -> QueueEntry {
    QueueEntry::check_in(
        VisitId::new(id),
        PatientDetails::new("Test", id, "Triage"),
        shift_start() + Duration::minutes(minute),
        vitals,
    )
}

fn ids(queue: &TriageQueue) -> Vec<String> {
    queue
        .enumerate()
        .into_iter()
        .map(|entry| entry.visit_id().to_string())
        .collect()
}

#[test]
fn scoring_examples_match_the_rule_table() {
    let all_absent = assess(&VitalSigns::default());
    assert_eq!(all_absent.score, UrgencyScore(0));
    assert_eq!(all_absent.tier, PriorityTier::Low);

    let hypothermic = assess(&VitalSigns::default().with_temperature(35.0));
    assert_eq!(hypothermic.score, UrgencyScore(20));

    let everything = assess(
        &VitalSigns::default()
            .with_temperature(40.0)
            .with_heart_rate(130.0)
            .with_systolic_bp(170.0)
            .with_oxygen_saturation(85.0),
    );
    assert_eq!(everything.score, UrgencyScore(100));
    assert_eq!(everything.tier, PriorityTier::Critical);

    let saturation_only = assess(&VitalSigns::default().with_oxygen_saturation(92.0));
    assert_eq!(saturation_only.score, UrgencyScore(20));
    assert_eq!(saturation_only.tier, PriorityTier::Moderate);

    assert_eq!(UrgencyScore(70).tier(), PriorityTier::Critical);
    assert_eq!(UrgencyScore(69).tier(), PriorityTier::Urgent);
}

#[test]
fn a_shift_moves_patients_through_the_board() {
    let mut queue = TriageQueue::new();
    queue
        .insert(check_in("sprain", 0, VitalSigns::default().with_heart_rate(80.0)))
        .expect("sprain checked in");
    queue
        .insert(check_in(
            "asthma",
            10,
            VitalSigns::default().with_oxygen_saturation(91.0),
        ))
        .expect("asthma checked in");
    queue
        .insert(check_in(
            "sepsis",
            20,
            VitalSigns::default()
                .with_temperature(39.5)
                .with_heart_rate(125.0)
                .with_systolic_bp(85.0),
        ))
        .expect("sepsis checked in");

    assert_eq!(ids(&queue), vec!["sepsis", "asthma", "sprain"]);
    assert_eq!(queue.peek().expect("head").tier(), PriorityTier::Urgent);

    let called = queue.call_next().expect("call sepsis");
    assert_eq!(called.visit_id(), &VisitId::new("sepsis"));
    assert_eq!(
        queue.next_waiting().expect("asthma waiting").visit_id(),
        &VisitId::new("asthma")
    );

    queue
        .update_vitals(
            &VisitId::new("sprain"),
            VitalSigns::default()
                .with_heart_rate(135.0)
                .with_systolic_bp(70.0)
                .with_oxygen_saturation(87.0),
        )
        .expect("sprain deteriorates");
    assert_eq!(ids(&queue), vec!["sprain", "sepsis", "asthma"]);
    assert_eq!(
        queue.peek().expect("head").tier(),
        PriorityTier::Critical
    );

    assert!(matches!(
        queue.update_status(&VisitId::new("asthma"), VisitStatus::Discharged),
        Err(QueueError::InvalidTransition { .. })
    ));

    queue
        .update_status(&VisitId::new("sepsis"), VisitStatus::Discharged)
        .expect("sepsis discharged");
    assert_eq!(ids(&queue), vec!["sprain", "asthma"]);
    assert_eq!(
        queue
            .get(&VisitId::new("sepsis"))
            .expect("history kept")
            .status(),
        VisitStatus::Discharged
    );

    let census = QueueCensus::collect(&queue, shift_start() + Duration::minutes(40));
    assert_eq!(census.waiting, 2);
    assert_eq!(census.in_progress, 0);
    assert_eq!(census.discharged, 1);
    // sprain waited 40, asthma 30.
    assert_eq!(census.average_wait_minutes, 35);
}

#[test]
fn separate_departments_own_separate_queues() {
    let mut adult = TriageQueue::new();
    let mut pediatric = TriageQueue::new();

    adult
        .insert(check_in("shared-id", 0, VitalSigns::default()))
        .expect("adult intake");
    pediatric
        .insert(check_in("shared-id", 5, VitalSigns::default()))
        .expect("pediatric intake");

    assert_eq!(adult.size(), 1);
    assert_eq!(pediatric.size(), 1);
}
