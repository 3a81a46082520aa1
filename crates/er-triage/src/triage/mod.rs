//! Vital-sign scoring and the urgency-ordered patient queue.
//!
//! Scoring is a pure function of a [`VitalSigns`] snapshot. The [`TriageQueue`] owns
//! the visits of one department shift and keeps them ordered by urgency score, with
//! arrival time breaking ties. Callers create and own their queue instances.

pub mod census;
pub mod domain;
pub mod events;
pub mod queue;
pub mod scoring;
pub mod shared;
pub mod vitals;

#[cfg(test)]
mod tests;

pub use census::{QueueCensus, TierCount};
pub use domain::{PatientDetails, QueueEntry, QueueEntryView, VisitId, VisitStatus};
pub use events::TriageEvent;
pub use queue::{QueueError, TriageQueue};
pub use scoring::{
    assess, score, PriorityTier, ScoreBand, ScoreComponent, ScoredVital, TriageAssessment,
    UrgencyScore,
};
pub use shared::SharedTriageQueue;
pub use vitals::VitalSigns;
