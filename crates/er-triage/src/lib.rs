//! Emergency department triage: vital-sign urgency scoring and an urgency-ordered
//! patient queue, plus the configuration, logging and event-log import around them.

pub mod config;
pub mod error;
pub mod intake;
pub mod telemetry;
pub mod triage;
