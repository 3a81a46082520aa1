use std::cmp::Reverse;

use tracing::debug;

use super::domain::{QueueEntry, QueueEntryView, VisitId, VisitStatus};
use super::scoring::TriageAssessment;
use super::vitals::VitalSigns;

/// Errors surfaced by queue operations. None of them are retried internally.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueueError {
    #[error("visit {0} is already tracked by the queue")]
    DuplicateIdentity(VisitId),
    #[error("visit {0} is not in the active queue")]
    NotFound(VisitId),
    #[error("visit {visit_id} cannot move from {from} to {to}")]
    InvalidTransition {
        visit_id: VisitId,
        from: VisitStatus,
        to: VisitStatus,
    },
    #[error("no active visits in the queue")]
    Empty,
}

#[derive(Debug, Clone)]
struct Slot {
    sequence: u64,
    entry: QueueEntry,
}

/// Waiting and in-progress visits kept in urgency order.
///
/// Order is score descending, then arrival ascending, then intake order for visits
/// that share both. Discharged visits leave the order but stay available through
/// [`TriageQueue::get`] and [`TriageQueue::discharged`].
#[derive(Debug, Clone, Default)]
pub struct TriageQueue {
    active: Vec<Slot>,
    discharged: Vec<QueueEntry>,
    next_sequence: u64,
}

impl TriageQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a checked-in visit. Returns its 0-based rank after reordering.
    pub fn insert(&mut self, entry: QueueEntry) -> Result<usize, QueueError> {
        if self.contains(entry.visit_id()) {
            return Err(QueueError::DuplicateIdentity(entry.visit_id().clone()));
        }

        let visit_id = entry.visit_id().clone();
        debug!(
            visit_id = %visit_id,
            score = %entry.score(),
            tier = %entry.tier(),
            "visit queued"
        );

        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.active.push(Slot { sequence, entry });
        self.reorder();

        Ok(self.rank_of(&visit_id).unwrap_or_default())
    }

    /// Drop an active visit from the queue entirely, returning it.
    pub fn remove(&mut self, visit_id: &VisitId) -> Result<QueueEntry, QueueError> {
        let index = self
            .position(visit_id)
            .ok_or_else(|| QueueError::NotFound(visit_id.clone()))?;
        let slot = self.active.remove(index);
        debug!(visit_id = %visit_id, "visit removed");
        Ok(slot.entry)
    }

    /// Rescore an active visit from a fresh vital-sign snapshot.
    pub fn update_vitals(
        &mut self,
        visit_id: &VisitId,
        vitals: VitalSigns,
    ) -> Result<TriageAssessment, QueueError> {
        let index = self
            .position(visit_id)
            .ok_or_else(|| QueueError::NotFound(visit_id.clone()))?;

        let entry = &mut self.active[index].entry;
        let previous = entry.score();
        entry.rescore(vitals);
        let assessment = entry.assessment().clone();
        debug!(
            visit_id = %visit_id,
            previous = %previous,
            score = %assessment.score,
            tier = %assessment.tier,
            "visit rescored"
        );

        self.reorder();
        Ok(assessment)
    }

    /// Advance a visit along `waiting -> in-progress -> discharged`.
    ///
    /// Discharging moves the visit into the history list. Returns the updated entry.
    pub fn update_status(
        &mut self,
        visit_id: &VisitId,
        status: VisitStatus,
    ) -> Result<QueueEntry, QueueError> {
        let Some(index) = self.position(visit_id) else {
            return match self.discharged_entry(visit_id) {
                Some(entry) => Err(QueueError::InvalidTransition {
                    visit_id: visit_id.clone(),
                    from: entry.status(),
                    to: status,
                }),
                None => Err(QueueError::NotFound(visit_id.clone())),
            };
        };

        let current = self.active[index].entry.status();
        if !current.can_transition_to(status) {
            return Err(QueueError::InvalidTransition {
                visit_id: visit_id.clone(),
                from: current,
                to: status,
            });
        }

        debug!(visit_id = %visit_id, from = %current, to = %status, "visit status changed");

        if status.is_active() {
            let entry = &mut self.active[index].entry;
            entry.set_status(status);
            return Ok(entry.clone());
        }

        let Slot { mut entry, .. } = self.active.remove(index);
        entry.set_status(status);
        self.discharged.push(entry.clone());
        Ok(entry)
    }

    /// Highest ranked active visit.
    pub fn peek(&self) -> Result<&QueueEntry, QueueError> {
        self.active
            .first()
            .map(|slot| &slot.entry)
            .ok_or(QueueError::Empty)
    }

    /// Snapshot of the active visits, most urgent first.
    pub fn enumerate(&self) -> Vec<QueueEntry> {
        self.active.iter().map(|slot| slot.entry.clone()).collect()
    }

    /// Board rows for the presentation layer, ranked from 1.
    pub fn board(&self) -> Vec<QueueEntryView> {
        self.active
            .iter()
            .enumerate()
            .map(|(index, slot)| slot.entry.view(index + 1))
            .collect()
    }

    pub fn size(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Look up a visit whether it is still active or already discharged.
    pub fn get(&self, visit_id: &VisitId) -> Option<&QueueEntry> {
        self.position(visit_id)
            .map(|index| &self.active[index].entry)
            .or_else(|| self.discharged_entry(visit_id))
    }

    /// Discharged visits in the order they left the queue.
    pub fn discharged(&self) -> &[QueueEntry] {
        &self.discharged
    }

    /// Highest ranked visit that has not been called yet.
    pub fn next_waiting(&self) -> Option<&QueueEntry> {
        self.active
            .iter()
            .map(|slot| &slot.entry)
            .find(|entry| entry.status() == VisitStatus::Waiting)
    }

    /// Call the highest ranked waiting visit, moving it to in-progress.
    pub fn call_next(&mut self) -> Result<QueueEntry, QueueError> {
        let visit_id = self
            .next_waiting()
            .map(|entry| entry.visit_id().clone())
            .ok_or(QueueError::Empty)?;
        self.update_status(&visit_id, VisitStatus::InProgress)
    }

    /// 0-based position of an active visit.
    pub fn rank_of(&self, visit_id: &VisitId) -> Option<usize> {
        self.position(visit_id)
    }

    pub(crate) fn all_entries(&self) -> impl Iterator<Item = &QueueEntry> {
        self.active
            .iter()
            .map(|slot| &slot.entry)
            .chain(self.discharged.iter())
    }

    fn contains(&self, visit_id: &VisitId) -> bool {
        self.position(visit_id).is_some() || self.discharged_entry(visit_id).is_some()
    }

    fn position(&self, visit_id: &VisitId) -> Option<usize> {
        self.active
            .iter()
            .position(|slot| slot.entry.visit_id() == visit_id)
    }

    fn discharged_entry(&self, visit_id: &VisitId) -> Option<&QueueEntry> {
        self.discharged
            .iter()
            .find(|entry| entry.visit_id() == visit_id)
    }

    fn reorder(&mut self) {
        self.active.sort_by_key(|slot| {
            (
                Reverse(slot.entry.score()),
                slot.entry.arrived_at(),
                slot.sequence,
            )
        });
    }
}
