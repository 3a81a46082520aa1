use serde::Serialize;

use super::domain::{QueueEntry, VisitId, VisitStatus};
use super::queue::{QueueError, TriageQueue};
use super::vitals::VitalSigns;

/// Inbound changes coming from the intake desk, bedside charting and the board.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TriageEvent {
    Intake { entry: QueueEntry },
    Vitals { visit_id: VisitId, vitals: VitalSigns },
    Status { visit_id: VisitId, status: VisitStatus },
}

impl TriageEvent {
    pub fn visit_id(&self) -> &VisitId {
        match self {
            TriageEvent::Intake { entry } => entry.visit_id(),
            TriageEvent::Vitals { visit_id, .. } | TriageEvent::Status { visit_id, .. } => {
                visit_id
            }
        }
    }

    pub const fn kind(&self) -> &'static str {
        match self {
            TriageEvent::Intake { .. } => "intake",
            TriageEvent::Vitals { .. } => "vitals",
            TriageEvent::Status { .. } => "status",
        }
    }
}

impl TriageQueue {
    /// Route an event to the matching queue operation.
    pub fn apply(&mut self, event: TriageEvent) -> Result<VisitId, QueueError> {
        match event {
            TriageEvent::Intake { entry } => {
                let visit_id = entry.visit_id().clone();
                self.insert(entry)?;
                Ok(visit_id)
            }
            TriageEvent::Vitals { visit_id, vitals } => {
                self.update_vitals(&visit_id, vitals)?;
                Ok(visit_id)
            }
            TriageEvent::Status { visit_id, status } => {
                self.update_status(&visit_id, status)?;
                Ok(visit_id)
            }
        }
    }
}
