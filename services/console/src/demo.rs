use crate::infra::format_clock;
use crate::report::{render_snapshot, QueueSnapshot};
use chrono::{DateTime, Duration, Utc};
use clap::Args;
use er_triage::error::AppError;
use er_triage::triage::{
    PatientDetails, QueueEntry, QueueError, SharedTriageQueue, TriageEvent, VisitId,
    VisitStatus, VitalSigns,
};
use std::thread;
use tracing::info;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// End of the simulated shift window (defaults to now)
    #[arg(long, value_parser = crate::infra::parse_timestamp)]
    pub(crate) now: Option<DateTime<Utc>>,
    /// Emit the final queue snapshot as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

const SHIFT_MINUTES: i64 = 120;

struct Arrival {
    visit_id: &'static str,
    first_name: &'static str,
    last_name: &'static str,
    complaint: &'static str,
    minute: i64,
    vitals: VitalSigns,
}

impl Arrival {
    fn check_in(&self, shift_start: DateTime<Utc>) -> QueueEntry {
        QueueEntry::check_in(
            VisitId::new(self.visit_id),
            PatientDetails::new(self.first_name, self.last_name, self.complaint),
            shift_start + Duration::minutes(self.minute),
            self.vitals,
        )
    }
}

fn walk_ins() -> Vec<Arrival> {
    vec![
        Arrival {
            visit_id: "ed-2001",
            first_name: "Maya",
            last_name: "Chen",
            complaint: "Sprained ankle",
            minute: 10,
            vitals: VitalSigns::default()
                .with_temperature(36.8)
                .with_heart_rate(88.0)
                .with_systolic_bp(124.0)
                .with_diastolic_bp(78.0)
                .with_oxygen_saturation(99.0),
        },
        Arrival {
            visit_id: "ed-2002",
            first_name: "Omar",
            last_name: "Haddad",
            complaint: "Productive cough",
            minute: 25,
            vitals: VitalSigns::default()
                .with_temperature(38.7)
                .with_heart_rate(104.0)
                .with_systolic_bp(132.0)
                .with_oxygen_saturation(93.0)
                .with_respiratory_rate(24.0),
        },
        Arrival {
            visit_id: "ed-2003",
            first_name: "Lucia",
            last_name: "Ferreira",
            complaint: "Migraine",
            minute: 60,
            vitals: VitalSigns::default()
                .with_temperature(37.0)
                .with_heart_rate(76.0)
                .with_systolic_bp(148.0)
                .with_diastolic_bp(92.0)
                .with_oxygen_saturation(98.0),
        },
    ]
}

fn ambulance_arrivals() -> Vec<Arrival> {
    vec![
        Arrival {
            visit_id: "ed-2004",
            first_name: "Daniel",
            last_name: "Okafor",
            complaint: "Chest pain",
            minute: 80,
            vitals: VitalSigns::default()
                .with_temperature(36.9)
                .with_heart_rate(124.0)
                .with_systolic_bp(168.0)
                .with_diastolic_bp(101.0)
                .with_oxygen_saturation(92.0),
        },
        Arrival {
            visit_id: "ed-2005",
            first_name: "Grace",
            last_name: "Lindqvist",
            complaint: "Fall at home",
            minute: 95,
            vitals: VitalSigns::default()
                .with_temperature(35.8)
                .with_heart_rate(58.0)
                .with_systolic_bp(102.0)
                .with_oxygen_saturation(96.0),
        },
    ]
}

/// The intake desk and the ambulance bay check patients in concurrently.
fn admit_arrivals(
    queue: &SharedTriageQueue,
    shift_start: DateTime<Utc>,
) -> Result<(), QueueError> {
    thread::scope(|scope| {
        let handles = [walk_ins(), ambulance_arrivals()].map(|arrivals| {
            let queue = queue.clone();
            scope.spawn(move || -> Result<(), QueueError> {
                for arrival in &arrivals {
                    queue.insert(arrival.check_in(shift_start))?;
                }
                Ok(())
            })
        });

        handles
            .into_iter()
            .try_for_each(|handle| handle.join().expect("arrival thread panicked"))
    })
}

/// Bedside charting and board actions applied after the arrivals are in.
fn bedside_round() -> Vec<TriageEvent> {
    let deteriorated = VitalSigns::default()
        .with_temperature(39.4)
        .with_heart_rate(122.0)
        .with_systolic_bp(128.0)
        .with_oxygen_saturation(89.0)
        .with_respiratory_rate(28.0);

    vec![
        TriageEvent::Vitals {
            visit_id: VisitId::new("ed-2002"),
            vitals: deteriorated,
        },
        TriageEvent::Status {
            visit_id: VisitId::new("ed-2002"),
            status: VisitStatus::InProgress,
        },
        TriageEvent::Status {
            visit_id: VisitId::new("ed-2004"),
            status: VisitStatus::InProgress,
        },
        TriageEvent::Status {
            visit_id: VisitId::new("ed-2004"),
            status: VisitStatus::Discharged,
        },
        TriageEvent::Status {
            visit_id: VisitId::new("ed-2004"),
            status: VisitStatus::Discharged,
        },
    ]
}

/// Play the scripted shift and return the events the queue refused.
fn simulate_shift(
    queue: &SharedTriageQueue,
    shift_start: DateTime<Utc>,
) -> Result<Vec<(TriageEvent, QueueError)>, QueueError> {
    admit_arrivals(queue, shift_start)?;

    let mut refused = Vec::new();
    for event in bedside_round() {
        if let Err(err) = queue.apply(event.clone()) {
            refused.push((event, err));
        }
    }
    Ok(refused)
}

pub(crate) fn run_demo(args: DemoArgs, department: &str) -> Result<(), AppError> {
    let DemoArgs { now, json } = args;
    let now = now.unwrap_or_else(Utc::now);
    let shift_start = now - Duration::minutes(SHIFT_MINUTES);

    let queue = SharedTriageQueue::default();
    let refused = simulate_shift(&queue, shift_start)?;
    info!(
        active = queue.size(),
        refused = refused.len(),
        "demo shift simulated"
    );

    let snapshot =
        queue.with_queue(|queue| QueueSnapshot::capture(department, queue, now, &[]));
    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    println!(
        "Emergency triage demo ({} to {})",
        format_clock(shift_start),
        format_clock(now)
    );
    println!(
        "- {} walk-ins and {} ambulance arrivals checked in",
        walk_ins().len(),
        ambulance_arrivals().len()
    );
    println!("- Bedside round: ed-2002 deteriorated, ed-2002 and ed-2004 called, ed-2004 discharged");
    for (event, err) in &refused {
        println!("  Refused {} for {}: {}", event.kind(), event.visit_id(), err);
    }
    render_snapshot(&snapshot);

    if let Some(discharged) = queue.get(&VisitId::new("ed-2004")) {
        println!("{}", discharge_note(&discharged, now));
    }

    Ok(())
}

fn discharge_note(entry: &QueueEntry, now: DateTime<Utc>) -> String {
    format!(
        "Discharged {} (arrived {}, {} min before the end of the shift)",
        entry.patient().full_name(),
        format_clock(entry.arrived_at()),
        entry.minutes_waited(now)
    )
}
