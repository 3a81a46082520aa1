//! Event-log import: replays a recorded shift of intake, vitals and status events
//! into a [`TriageQueue`].

mod parser;

use std::io::Read;
use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

use crate::triage::{QueueError, TriageEvent, TriageQueue, VisitId};

#[derive(Debug, thiserror::Error)]
pub enum EventLogImportError {
    #[error("failed to read event log: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid event log CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("event log row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },
}

/// An event together with the CSV line it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggedEvent {
    pub row: usize,
    pub event: TriageEvent,
}

/// Event the queue refused during replay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedEvent {
    pub row: usize,
    pub kind: &'static str,
    pub visit_id: VisitId,
    pub reason: String,
    #[serde(skip)]
    pub error: QueueError,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReplayOutcome {
    pub applied: usize,
    pub rejected: Vec<RejectedEvent>,
}

impl ReplayOutcome {
    pub fn total(&self) -> usize {
        self.applied + self.rejected.len()
    }
}

pub struct EventLogImporter;

impl EventLogImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<LoggedEvent>, EventLogImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<LoggedEvent>, EventLogImportError> {
        parser::parse_events(reader)
    }

    /// Apply events in log order. Rejections are collected rather than aborting.
    pub fn replay<I>(queue: &mut TriageQueue, events: I) -> ReplayOutcome
    where
        I: IntoIterator<Item = LoggedEvent>,
    {
        let mut outcome = ReplayOutcome::default();

        for LoggedEvent { row, event } in events {
            let kind = event.kind();
            let visit_id = event.visit_id().clone();

            match queue.apply(event) {
                Ok(_) => outcome.applied += 1,
                Err(error) => {
                    match &error {
                        QueueError::DuplicateIdentity(_) => {
                            warn!(row, %visit_id, "duplicate intake in event log")
                        }
                        other => warn!(row, kind, %visit_id, error = %other, "event rejected"),
                    }
                    outcome.rejected.push(RejectedEvent {
                        row,
                        kind,
                        visit_id,
                        reason: error.to_string(),
                        error,
                    });
                }
            }
        }

        info!(
            applied = outcome.applied,
            rejected = outcome.rejected.len(),
            active = queue.size(),
            "event log replayed"
        );
        outcome
    }

    pub fn replay_path<P: AsRef<Path>>(
        queue: &mut TriageQueue,
        path: P,
    ) -> Result<ReplayOutcome, EventLogImportError> {
        let events = Self::from_path(path)?;
        Ok(Self::replay(queue, events))
    }
}
