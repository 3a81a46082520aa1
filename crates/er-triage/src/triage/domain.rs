use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::scoring::{self, PriorityTier, TriageAssessment, UrgencyScore};
use super::vitals::VitalSigns;

/// Identifier wrapper for a patient visit.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisitId(pub String);

impl VisitId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VisitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Descriptive fields carried alongside a visit. Ordering never looks at them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PatientDetails {
    pub first_name: String,
    pub last_name: String,
    pub chief_complaint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PatientDetails {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        chief_complaint: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            chief_complaint: chief_complaint.into(),
            description: None,
        }
    }

    pub fn full_name(&self) -> String {
        match (self.first_name.trim(), self.last_name.trim()) {
            ("", "") => "Unknown".to_string(),
            (first, "") => first.to_string(),
            ("", last) => last.to_string(),
            (first, last) => format!("{first} {last}"),
        }
    }
}

/// Lifecycle of a visit: `Waiting -> InProgress -> Discharged`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VisitStatus {
    Waiting,
    InProgress,
    Discharged,
}

impl VisitStatus {
    pub const fn ordered() -> [Self; 3] {
        [Self::Waiting, Self::InProgress, Self::Discharged]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::InProgress => "in-progress",
            Self::Discharged => "discharged",
        }
    }

    /// The only state this one may advance to. `None` for the terminal state.
    pub const fn successor(self) -> Option<Self> {
        match self {
            Self::Waiting => Some(Self::InProgress),
            Self::InProgress => Some(Self::Discharged),
            Self::Discharged => None,
        }
    }

    pub fn can_transition_to(self, next: Self) -> bool {
        self.successor() == Some(next)
    }

    pub const fn is_active(self) -> bool {
        !matches!(self, Self::Discharged)
    }
}

impl fmt::Display for VisitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One patient's visit as tracked by the queue.
///
/// Score and tier live in a single [`TriageAssessment`] and are only replaced
/// together, through [`QueueEntry::rescore`]. Arrival time has no setter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueueEntry {
    visit_id: VisitId,
    arrived_at: DateTime<Utc>,
    status: VisitStatus,
    vitals: VitalSigns,
    assessment: TriageAssessment,
    patient: PatientDetails,
}

impl QueueEntry {
    /// Check a patient in. The entry starts out waiting and is scored from whatever
    /// vitals were captured at intake.
    pub fn check_in(
        visit_id: VisitId,
        patient: PatientDetails,
        arrived_at: DateTime<Utc>,
        vitals: VitalSigns,
    ) -> Self {
        let assessment = scoring::assess(&vitals);
        Self {
            visit_id,
            arrived_at,
            status: VisitStatus::Waiting,
            vitals,
            assessment,
            patient,
        }
    }

    pub fn visit_id(&self) -> &VisitId {
        &self.visit_id
    }

    pub fn arrived_at(&self) -> DateTime<Utc> {
        self.arrived_at
    }

    pub fn status(&self) -> VisitStatus {
        self.status
    }

    pub fn vitals(&self) -> &VitalSigns {
        &self.vitals
    }

    pub fn assessment(&self) -> &TriageAssessment {
        &self.assessment
    }

    pub fn score(&self) -> UrgencyScore {
        self.assessment.score
    }

    pub fn tier(&self) -> PriorityTier {
        self.assessment.tier
    }

    pub fn patient(&self) -> &PatientDetails {
        &self.patient
    }

    /// Whole minutes between arrival and `now`, floored at zero.
    pub fn minutes_waited(&self, now: DateTime<Utc>) -> i64 {
        (now - self.arrived_at).num_minutes().max(0)
    }

    pub(crate) fn rescore(&mut self, vitals: VitalSigns) {
        self.assessment = scoring::assess(&vitals);
        self.vitals = vitals;
    }

    pub(crate) fn set_status(&mut self, status: VisitStatus) {
        self.status = status;
    }

    pub fn view(&self, rank: usize) -> QueueEntryView {
        QueueEntryView {
            rank,
            visit_id: self.visit_id.clone(),
            patient_name: self.patient.full_name(),
            chief_complaint: self.patient.chief_complaint.clone(),
            arrived_at: self.arrived_at,
            status: self.status.label(),
            score: self.assessment.score,
            tier: self.assessment.tier.label(),
            vitals: self.vitals,
        }
    }
}

/// Flattened row handed to the presentation layer. `rank` is 1-based.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueueEntryView {
    pub rank: usize,
    pub visit_id: VisitId,
    pub patient_name: String,
    pub chief_complaint: String,
    pub arrived_at: DateTime<Utc>,
    pub status: &'static str,
    pub score: UrgencyScore,
    pub tier: &'static str,
    pub vitals: VitalSigns,
}
