use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use super::census::QueueCensus;
use super::domain::{QueueEntry, QueueEntryView, VisitId, VisitStatus};
use super::events::TriageEvent;
use super::queue::{QueueError, TriageQueue};
use super::scoring::TriageAssessment;
use super::vitals::VitalSigns;

/// Cloneable handle for a queue shared between threads.
///
/// Every call holds the lock for its whole duration, so two reorderings never
/// interleave. Reads hand back owned snapshots.
#[derive(Debug, Clone, Default)]
pub struct SharedTriageQueue {
    inner: Arc<Mutex<TriageQueue>>,
}

impl SharedTriageQueue {
    pub fn new(queue: TriageQueue) -> Self {
        Self {
            inner: Arc::new(Mutex::new(queue)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, TriageQueue> {
        self.inner.lock().expect("triage queue mutex poisoned")
    }

    pub fn insert(&self, entry: QueueEntry) -> Result<usize, QueueError> {
        self.lock().insert(entry)
    }

    pub fn remove(&self, visit_id: &VisitId) -> Result<QueueEntry, QueueError> {
        self.lock().remove(visit_id)
    }

    pub fn update_vitals(
        &self,
        visit_id: &VisitId,
        vitals: VitalSigns,
    ) -> Result<TriageAssessment, QueueError> {
        self.lock().update_vitals(visit_id, vitals)
    }

    pub fn update_status(
        &self,
        visit_id: &VisitId,
        status: VisitStatus,
    ) -> Result<QueueEntry, QueueError> {
        self.lock().update_status(visit_id, status)
    }

    pub fn apply(&self, event: TriageEvent) -> Result<VisitId, QueueError> {
        self.lock().apply(event)
    }

    pub fn call_next(&self) -> Result<QueueEntry, QueueError> {
        self.lock().call_next()
    }

    pub fn peek(&self) -> Result<QueueEntry, QueueError> {
        self.lock().peek().cloned()
    }

    pub fn enumerate(&self) -> Vec<QueueEntry> {
        self.lock().enumerate()
    }

    pub fn board(&self) -> Vec<QueueEntryView> {
        self.lock().board()
    }

    pub fn get(&self, visit_id: &VisitId) -> Option<QueueEntry> {
        self.lock().get(visit_id).cloned()
    }

    pub fn census(&self, now: DateTime<Utc>) -> QueueCensus {
        QueueCensus::collect(&self.lock(), now)
    }

    pub fn size(&self) -> usize {
        self.lock().size()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Run several operations against the queue under one lock acquisition.
    pub fn with_queue<T>(&self, f: impl FnOnce(&mut TriageQueue) -> T) -> T {
        f(&mut *self.lock())
    }
}
