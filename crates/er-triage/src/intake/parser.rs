use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use std::io::Read;

use super::{EventLogImportError, LoggedEvent};
use crate::triage::{PatientDetails, QueueEntry, TriageEvent, VisitId, VisitStatus, VitalSigns};

pub(crate) fn parse_events<R: Read>(reader: R) -> Result<Vec<LoggedEvent>, EventLogImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut events = Vec::new();

    for record in csv_reader.records() {
        let record = record?;
        // Line the record starts on; quoted fields may span several lines.
        let row = record
            .position()
            .map(|position| position.line() as usize)
            .unwrap_or_default();
        let event = record
            .deserialize::<EventRow>(Some(&headers))?
            .into_event()
            .map_err(|reason| EventLogImportError::MalformedRow { row, reason })?;
        events.push(LoggedEvent { row, event });
    }

    Ok(events)
}

#[derive(Debug, Deserialize)]
struct EventRow {
    #[serde(rename = "Event")]
    event: String,
    #[serde(rename = "Visit ID")]
    visit_id: String,
    #[serde(rename = "Timestamp", default, deserialize_with = "empty_string_as_none")]
    timestamp: Option<String>,
    #[serde(rename = "First Name", default, deserialize_with = "empty_string_as_none")]
    first_name: Option<String>,
    #[serde(rename = "Last Name", default, deserialize_with = "empty_string_as_none")]
    last_name: Option<String>,
    #[serde(
        rename = "Chief Complaint",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    chief_complaint: Option<String>,
    #[serde(rename = "Description", default, deserialize_with = "empty_string_as_none")]
    description: Option<String>,
    #[serde(rename = "Temperature", default, deserialize_with = "empty_string_as_none")]
    temperature: Option<String>,
    #[serde(rename = "Heart Rate", default, deserialize_with = "empty_string_as_none")]
    heart_rate: Option<String>,
    #[serde(rename = "BP Systolic", default, deserialize_with = "empty_string_as_none")]
    systolic_bp: Option<String>,
    #[serde(rename = "BP Diastolic", default, deserialize_with = "empty_string_as_none")]
    diastolic_bp: Option<String>,
    #[serde(
        rename = "Oxygen Saturation",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    oxygen_saturation: Option<String>,
    #[serde(
        rename = "Respiratory Rate",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    respiratory_rate: Option<String>,
    #[serde(rename = "Status", default, deserialize_with = "empty_string_as_none")]
    status: Option<String>,
}

impl EventRow {
    fn into_event(self) -> Result<TriageEvent, String> {
        let visit_id = self.visit_id.trim();
        if visit_id.is_empty() {
            return Err("missing visit id".to_string());
        }
        let visit_id = VisitId::new(visit_id);

        match self.event.trim().to_ascii_lowercase().as_str() {
            "intake" => {
                let raw = self
                    .timestamp
                    .as_deref()
                    .ok_or_else(|| "intake event requires a timestamp".to_string())?;
                let arrived_at = parse_timestamp(raw)
                    .ok_or_else(|| format!("unrecognized timestamp '{raw}'"))?;
                let vitals = self.vitals()?;
                let patient = PatientDetails {
                    first_name: self.first_name.unwrap_or_default(),
                    last_name: self.last_name.unwrap_or_default(),
                    chief_complaint: self.chief_complaint.unwrap_or_default(),
                    description: self.description,
                };

                Ok(TriageEvent::Intake {
                    entry: QueueEntry::check_in(visit_id, patient, arrived_at, vitals),
                })
            }
            "vitals" => {
                let vitals = self.vitals()?;
                if vitals.is_empty() {
                    return Err("vitals event carries no readings".to_string());
                }
                Ok(TriageEvent::Vitals { visit_id, vitals })
            }
            "status" => {
                let raw = self
                    .status
                    .as_deref()
                    .ok_or_else(|| "status event requires a status".to_string())?;
                let status =
                    parse_status(raw).ok_or_else(|| format!("unrecognized status '{raw}'"))?;
                Ok(TriageEvent::Status { visit_id, status })
            }
            other => Err(format!("unrecognized event '{other}'")),
        }
    }

    fn vitals(&self) -> Result<VitalSigns, String> {
        Ok(VitalSigns {
            temperature: parse_reading("Temperature", self.temperature.as_deref())?,
            heart_rate: parse_reading("Heart Rate", self.heart_rate.as_deref())?,
            systolic_bp: parse_reading("BP Systolic", self.systolic_bp.as_deref())?,
            diastolic_bp: parse_reading("BP Diastolic", self.diastolic_bp.as_deref())?,
            oxygen_saturation: parse_reading(
                "Oxygen Saturation",
                self.oxygen_saturation.as_deref(),
            )?,
            respiratory_rate: parse_reading("Respiratory Rate", self.respiratory_rate.as_deref())?,
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_reading(column: &str, raw: Option<&str>) -> Result<Option<f64>, String> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(format!("{column} '{raw}' is not a number")),
    }
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .map(|naive| naive.and_utc())
}

fn parse_status(value: &str) -> Option<VisitStatus> {
    match value.trim().to_ascii_lowercase().replace('_', "-").as_str() {
        "waiting" => Some(VisitStatus::Waiting),
        "in-progress" => Some(VisitStatus::InProgress),
        "discharged" => Some(VisitStatus::Discharged),
        _ => None,
    }
}

#[cfg(test)]
pub(crate) fn parse_timestamp_for_tests(value: &str) -> Option<DateTime<Utc>> {
    parse_timestamp(value)
}

#[cfg(test)]
pub(crate) fn parse_status_for_tests(value: &str) -> Option<VisitStatus> {
    parse_status(value)
}
