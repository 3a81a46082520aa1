use super::common::*;
use crate::triage::census::QueueCensus;
use crate::triage::domain::VisitStatus;
use crate::triage::queue::TriageQueue;
use crate::triage::scoring::PriorityTier;

#[test]
fn empty_queue_has_zero_wait() {
    let census = QueueCensus::collect(&TriageQueue::new(), at_minute(60));
    assert_eq!(census, QueueCensus::default());
    assert_eq!(census.tier_breakdown().len(), 4);
    assert!(census.tier_breakdown().iter().all(|row| row.count == 0));
}

#[test]
fn counts_statuses_and_tiers_across_the_shift() {
    let mut queue = seeded_queue();
    queue.insert(entry("e", 20, crashing())).expect("insert e");
    queue
        .update_status(&visit("e"), VisitStatus::InProgress)
        .expect("call e");
    queue
        .update_status(&visit("e"), VisitStatus::Discharged)
        .expect("discharge e");
    queue
        .update_status(&visit("c"), VisitStatus::InProgress)
        .expect("call c");

    let census = QueueCensus::collect(&queue, at_minute(30));

    assert_eq!(census.waiting, 3);
    assert_eq!(census.in_progress, 1);
    assert_eq!(census.discharged, 1);
    assert_eq!(census.active(), 4);
    assert_eq!(census.tier_count(PriorityTier::Critical), 1);
    assert_eq!(census.tier_count(PriorityTier::Urgent), 1);
    assert_eq!(census.tier_count(PriorityTier::Moderate), 2);
    assert_eq!(census.tier_count(PriorityTier::Low), 1);
}

#[test]
fn average_wait_covers_waiting_visits_only() {
    let mut queue = TriageQueue::new();
    queue.insert(entry("a", 0, stable())).expect("insert a");
    queue.insert(entry("b", 10, stable())).expect("insert b");
    queue.insert(entry("c", 20, crashing())).expect("insert c");
    queue.call_next().expect("call c");

    // a waited 45, b waited 35; c is being seen.
    let census = QueueCensus::collect(&queue, at_minute(45));
    assert_eq!(census.average_wait_minutes, 40);
}

#[test]
fn average_wait_rounds_to_nearest_minute() {
    let mut queue = TriageQueue::new();
    queue.insert(entry("a", 0, stable())).expect("insert a");
    queue.insert(entry("b", 1, stable())).expect("insert b");

    // 10 and 9 minutes: 9.5 rounds up.
    let census = QueueCensus::collect(&queue, at_minute(10));
    assert_eq!(census.average_wait_minutes, 10);
}

#[test]
fn arrivals_after_the_census_time_count_as_zero_wait() {
    let mut queue = TriageQueue::new();
    queue.insert(entry("a", 0, stable())).expect("insert a");
    queue.insert(entry("b", 60, stable())).expect("insert b");

    let census = QueueCensus::collect(&queue, at_minute(20));
    assert_eq!(census.waiting, 2);
    // a waited 20, b has not arrived yet.
    assert_eq!(census.average_wait_minutes, 10);

    let before_anyone = QueueCensus::collect(&queue, at_minute(0));
    assert_eq!(before_anyone.average_wait_minutes, 0);
}
