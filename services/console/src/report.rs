use crate::infra::format_clock;
use chrono::{DateTime, Utc};
use clap::Args;
use er_triage::error::AppError;
use er_triage::intake::{EventLogImporter, RejectedEvent};
use er_triage::triage::{
    assess, QueueCensus, QueueEntryView, TriageAssessment, TriageQueue, VitalSigns,
};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Body temperature in degrees Celsius
    #[arg(long)]
    pub(crate) temperature: Option<f64>,
    /// Heart rate in beats per minute
    #[arg(long)]
    pub(crate) heart_rate: Option<f64>,
    /// Systolic blood pressure in mmHg
    #[arg(long)]
    pub(crate) systolic_bp: Option<f64>,
    /// Diastolic blood pressure in mmHg (recorded, not scored)
    #[arg(long)]
    pub(crate) diastolic_bp: Option<f64>,
    /// Peripheral oxygen saturation in percent
    #[arg(long)]
    pub(crate) oxygen_saturation: Option<f64>,
    /// Respiratory rate in breaths per minute (recorded, not scored)
    #[arg(long)]
    pub(crate) respiratory_rate: Option<f64>,
    /// Emit JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

impl ScoreArgs {
    fn vitals(&self) -> VitalSigns {
        VitalSigns {
            temperature: self.temperature,
            heart_rate: self.heart_rate,
            systolic_bp: self.systolic_bp,
            diastolic_bp: self.diastolic_bp,
            oxygen_saturation: self.oxygen_saturation,
            respiratory_rate: self.respiratory_rate,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct ReplayArgs {
    /// CSV event log exported from the department board
    #[arg(long)]
    pub(crate) events: PathBuf,
    /// Evaluation time for waits and the census (defaults to now)
    #[arg(long, value_parser = crate::infra::parse_timestamp)]
    pub(crate) now: Option<DateTime<Utc>>,
    /// Emit JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Debug, Serialize)]
struct ScoreResponse<'a> {
    vitals: &'a VitalSigns,
    #[serde(flatten)]
    assessment: &'a TriageAssessment,
    tier_color: &'static str,
}

/// Everything the board shows at one instant.
#[derive(Debug, Serialize)]
pub(crate) struct QueueSnapshot<'a> {
    pub(crate) department: &'a str,
    pub(crate) evaluated_at: DateTime<Utc>,
    pub(crate) board: Vec<QueueEntryView>,
    pub(crate) census: QueueCensus,
    #[serde(skip_serializing_if = "no_rejections")]
    pub(crate) rejected: &'a [RejectedEvent],
}

fn no_rejections(rejected: &&[RejectedEvent]) -> bool {
    rejected.is_empty()
}

impl<'a> QueueSnapshot<'a> {
    pub(crate) fn capture(
        department: &'a str,
        queue: &TriageQueue,
        now: DateTime<Utc>,
        rejected: &'a [RejectedEvent],
    ) -> Self {
        Self {
            department,
            evaluated_at: now,
            board: queue.board(),
            census: QueueCensus::collect(queue, now),
            rejected,
        }
    }
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let vitals = args.vitals();
    let assessment = assess(&vitals);

    if args.json {
        let response = ScoreResponse {
            vitals: &vitals,
            assessment: &assessment,
            tier_color: assessment.tier.color(),
        };
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    render_assessment(&vitals, &assessment);
    Ok(())
}

pub(crate) fn run_replay(args: ReplayArgs, department: &str) -> Result<(), AppError> {
    let ReplayArgs { events, now, json } = args;
    let now = now.unwrap_or_else(Utc::now);

    let mut queue = TriageQueue::new();
    let outcome = EventLogImporter::replay_path(&mut queue, &events)?;
    let snapshot = QueueSnapshot::capture(department, &queue, now, &outcome.rejected);

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    println!(
        "Replayed {} events from {} ({} applied, {} rejected)",
        outcome.total(),
        events.display(),
        outcome.applied,
        outcome.rejected.len()
    );
    render_snapshot(&snapshot);
    Ok(())
}

pub(crate) fn render_assessment(vitals: &VitalSigns, assessment: &TriageAssessment) {
    if vitals.is_empty() {
        println!("No readings supplied");
    } else {
        println!("Vitals: {}", vitals.summary());
    }
    println!(
        "Urgency score {} -> {} ({})",
        assessment.score,
        assessment.tier,
        assessment.tier.color()
    );
    for component in &assessment.components {
        println!("  - {}", component.describe());
    }
}

pub(crate) fn render_snapshot(snapshot: &QueueSnapshot<'_>) {
    println!(
        "\n{} queue at {} ({} active)",
        snapshot.department,
        snapshot.evaluated_at.format("%Y-%m-%d %H:%M UTC"),
        snapshot.board.len()
    );
    if snapshot.board.is_empty() {
        println!("  (no active visits)");
    }
    for row in &snapshot.board {
        println!("{}", board_line(row, snapshot.evaluated_at));
        if !row.vitals.is_empty() {
            println!("       {}", row.vitals.summary());
        }
    }

    if !snapshot.rejected.is_empty() {
        println!("Rejected events:");
        for rejected in snapshot.rejected {
            println!(
                "  - row {} {} {}: {}",
                rejected.row, rejected.kind, rejected.visit_id, rejected.reason
            );
        }
    }

    println!("{}", census_line(&snapshot.census));
    let tiers = snapshot
        .census
        .tier_breakdown()
        .into_iter()
        .map(|bucket| format!("{} {}", bucket.tier_label, bucket.count))
        .collect::<Vec<_>>()
        .join(", ");
    println!("Tiers: {tiers}");
}

fn board_line(row: &QueueEntryView, now: DateTime<Utc>) -> String {
    format!(
        "  #{:<2} [{:<8}] {:>3}  {} ({}) - {} | arrived {} | waited {} min | {}",
        row.rank,
        row.tier.to_uppercase(),
        row.score.value(),
        row.patient_name,
        row.visit_id,
        row.chief_complaint,
        format_clock(row.arrived_at),
        (now - row.arrived_at).num_minutes().max(0),
        row.status
    )
}

fn census_line(census: &QueueCensus) -> String {
    format!(
        "Census: {} active ({} waiting, {} in progress) | {} discharged | average wait {} min",
        census.active(),
        census.waiting,
        census.in_progress,
        census.discharged,
        census.average_wait_minutes
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use er_triage::triage::{PatientDetails, QueueEntry, VisitId};

    fn evening() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 3, 22, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    fn queue_with_fever() -> TriageQueue {
        let mut queue = TriageQueue::new();
        queue
            .insert(QueueEntry::check_in(
                VisitId::new("ed-0100"),
                PatientDetails::new("Ada", "Moreno", "Fever"),
                evening(),
                VitalSigns::default()
                    .with_temperature(39.4)
                    .with_heart_rate(125.0)
                    .with_oxygen_saturation(88.0),
            ))
            .expect("insert");
        queue
    }

    #[test]
    fn score_args_map_every_reading() {
        let args = ScoreArgs {
            temperature: Some(38.2),
            heart_rate: Some(104.0),
            systolic_bp: Some(150.0),
            diastolic_bp: Some(95.0),
            oxygen_saturation: Some(93.0),
            respiratory_rate: Some(22.0),
            json: false,
        };
        let vitals = args.vitals();
        assert_eq!(vitals.diastolic_bp, Some(95.0));
        assert_eq!(vitals.respiratory_rate, Some(22.0));
        assert_eq!(assess(&vitals).score.value(), 50);
    }

    #[test]
    fn board_line_shows_rank_tier_and_wait() {
        let queue = queue_with_fever();
        let board = queue.board();
        let line = board_line(&board[0], evening() + Duration::minutes(25));

        assert!(line.contains("#1"));
        assert!(line.contains("[CRITICAL"));
        assert!(line.contains("Ada Moreno (ed-0100)"));
        assert!(line.contains("arrived 22:00"));
        assert!(line.contains("waited 25 min"));
        assert!(line.ends_with("waiting"));
    }

    #[test]
    fn snapshot_serializes_without_empty_rejections() {
        let queue = queue_with_fever();
        let now = evening() + Duration::minutes(10);
        let snapshot = QueueSnapshot::capture("emergency", &queue, now, &[]);

        let json = serde_json::to_value(&snapshot).expect("serializes");
        assert_eq!(json["department"], "emergency");
        assert_eq!(json["board"][0]["visit_id"], "ed-0100");
        assert_eq!(json["board"][0]["score"], 75);
        assert_eq!(json["census"]["waiting"], 1);
        assert_eq!(json["census"]["average_wait_minutes"], 10);
        assert!(json.get("rejected").is_none());
    }

    #[test]
    fn census_line_reads_counts() {
        let queue = queue_with_fever();
        let census = QueueCensus::collect(&queue, evening() + Duration::minutes(40));
        assert_eq!(
            census_line(&census),
            "Census: 1 active (1 waiting, 0 in progress) | 0 discharged | average wait 40 min"
        );
    }
}
