use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::VisitStatus;
use super::queue::TriageQueue;
use super::scoring::PriorityTier;

/// Point-in-time department counts for the dashboard header.
///
/// Tier counts cover every visit the queue has seen during the shift, discharged
/// ones included. The average wait only considers visits still waiting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueueCensus {
    pub waiting: usize,
    pub in_progress: usize,
    pub discharged: usize,
    pub tiers: BTreeMap<PriorityTier, usize>,
    pub average_wait_minutes: i64,
}

impl QueueCensus {
    pub fn collect(queue: &TriageQueue, now: DateTime<Utc>) -> Self {
        let mut census = QueueCensus::default();
        let mut waited_seconds = 0_i64;

        for entry in queue.all_entries() {
            match entry.status() {
                VisitStatus::Waiting => {
                    census.waiting += 1;
                    waited_seconds += (now - entry.arrived_at()).num_seconds().max(0);
                }
                VisitStatus::InProgress => census.in_progress += 1,
                VisitStatus::Discharged => census.discharged += 1,
            }
            *census.tiers.entry(entry.tier()).or_default() += 1;
        }

        if census.waiting > 0 {
            let average = waited_seconds as f64 / census.waiting as f64 / 60.0;
            census.average_wait_minutes = average.round() as i64;
        }

        census
    }

    pub fn tier_count(&self, tier: PriorityTier) -> usize {
        self.tiers.get(&tier).copied().unwrap_or_default()
    }

    /// Tier counts in display order, zero buckets included.
    pub fn tier_breakdown(&self) -> Vec<TierCount> {
        PriorityTier::ordered()
            .into_iter()
            .map(|tier| TierCount {
                tier,
                tier_label: tier.label(),
                count: self.tier_count(tier),
            })
            .collect()
    }

    pub fn active(&self) -> usize {
        self.waiting + self.in_progress
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierCount {
    pub tier: PriorityTier,
    pub tier_label: &'static str,
    pub count: usize,
}
