//! Vital-sign urgency scoring.
//!
//! Each vital is checked against its severe band first and only falls through to the
//! moderate band when the severe condition does not hold. The moderate thresholds are
//! supersets of the severe ones, so the order of evaluation is what keeps a single
//! vital from contributing twice.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::vitals::VitalSigns;

/// Sum of the per-vital contributions. Higher is more urgent.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct UrgencyScore(pub u32);

impl UrgencyScore {
    pub const ZERO: Self = Self(0);

    pub const fn value(self) -> u32 {
        self.0
    }

    pub const fn tier(self) -> PriorityTier {
        PriorityTier::from_score(self)
    }
}

impl fmt::Display for UrgencyScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Coarse urgency bucket. Variants are declared lowest first so that `Ord` follows
/// urgency: `Critical > Urgent > Moderate > Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityTier {
    Low,
    Moderate,
    Urgent,
    Critical,
}

impl PriorityTier {
    /// Tiers in display order, most urgent first.
    pub const fn ordered() -> [Self; 4] {
        [Self::Critical, Self::Urgent, Self::Moderate, Self::Low]
    }

    /// Lower bounds are inclusive: 70 is critical, 69 is urgent.
    pub const fn from_score(score: UrgencyScore) -> Self {
        match score.0 {
            70.. => Self::Critical,
            45..=69 => Self::Urgent,
            20..=44 => Self::Moderate,
            _ => Self::Low,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Urgent => "urgent",
            Self::Moderate => "moderate",
            Self::Low => "low",
        }
    }

    /// Badge styling token used by the queue board.
    pub const fn color(self) -> &'static str {
        match self {
            Self::Critical => "destructive",
            Self::Urgent => "warning",
            Self::Moderate => "accent",
            Self::Low => "secondary",
        }
    }
}

impl fmt::Display for PriorityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The vitals that carry weight in the urgency score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoredVital {
    Temperature,
    HeartRate,
    SystolicBloodPressure,
    OxygenSaturation,
}

impl ScoredVital {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::HeartRate => "heart rate",
            Self::SystolicBloodPressure => "systolic blood pressure",
            Self::OxygenSaturation => "oxygen saturation",
        }
    }

    fn reading(self, vitals: &VitalSigns) -> Option<f64> {
        match self {
            Self::Temperature => vitals.temperature,
            Self::HeartRate => vitals.heart_rate,
            Self::SystolicBloodPressure => vitals.systolic_bp,
            Self::OxygenSaturation => vitals.oxygen_saturation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Severe,
    Moderate,
}

impl ScoreBand {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Severe => "severe",
            Self::Moderate => "moderate",
        }
    }
}

/// One vital's contribution to an assessment, kept for audit and display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub vital: ScoredVital,
    pub band: ScoreBand,
    pub reading: f64,
    pub points: u32,
}

impl ScoreComponent {
    pub fn describe(&self) -> String {
        format!(
            "{} {} ({}) +{}",
            self.band.label(),
            self.vital.label(),
            self.reading,
            self.points
        )
    }
}

/// Score and tier computed together from one vital-sign snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriageAssessment {
    pub score: UrgencyScore,
    pub tier: PriorityTier,
    pub components: Vec<ScoreComponent>,
}

impl Default for TriageAssessment {
    fn default() -> Self {
        Self {
            score: UrgencyScore::ZERO,
            tier: PriorityTier::Low,
            components: Vec::new(),
        }
    }
}

struct VitalRule {
    vital: ScoredVital,
    severe: fn(f64) -> bool,
    severe_points: u32,
    moderate: fn(f64) -> bool,
    moderate_points: u32,
}

const RULES: [VitalRule; 4] = [
    VitalRule {
        vital: ScoredVital::Temperature,
        severe: |t| t > 39.0 || t < 36.0,
        severe_points: 20,
        moderate: |t| t > 38.5 || t < 36.5,
        moderate_points: 10,
    },
    VitalRule {
        vital: ScoredVital::HeartRate,
        severe: |hr| hr > 120.0 || hr < 40.0,
        severe_points: 25,
        moderate: |hr| hr > 100.0 || hr < 50.0,
        moderate_points: 15,
    },
    VitalRule {
        vital: ScoredVital::SystolicBloodPressure,
        severe: |sys| sys > 160.0 || sys < 80.0,
        severe_points: 25,
        moderate: |sys| sys > 140.0 || sys < 90.0,
        moderate_points: 15,
    },
    VitalRule {
        vital: ScoredVital::OxygenSaturation,
        severe: |spo2| spo2 < 90.0,
        severe_points: 30,
        moderate: |spo2| spo2 < 94.0,
        moderate_points: 20,
    },
];

impl VitalRule {
    fn evaluate(&self, vitals: &VitalSigns) -> Option<ScoreComponent> {
        let reading = self.vital.reading(vitals)?;
        let (band, points) = if (self.severe)(reading) {
            (ScoreBand::Severe, self.severe_points)
        } else if (self.moderate)(reading) {
            (ScoreBand::Moderate, self.moderate_points)
        } else {
            return None;
        };

        Some(ScoreComponent {
            vital: self.vital,
            band,
            reading,
            points,
        })
    }
}

/// Urgency score for a snapshot. Absent vitals contribute nothing.
pub fn score(vitals: &VitalSigns) -> UrgencyScore {
    UrgencyScore(
        RULES
            .iter()
            .filter_map(|rule| rule.evaluate(vitals))
            .map(|component| component.points)
            .sum(),
    )
}

/// Full assessment with the tier and the itemised contributions.
pub fn assess(vitals: &VitalSigns) -> TriageAssessment {
    let components: Vec<ScoreComponent> = RULES
        .iter()
        .filter_map(|rule| rule.evaluate(vitals))
        .collect();
    let score = UrgencyScore(components.iter().map(|component| component.points).sum());

    TriageAssessment {
        score,
        tier: score.tier(),
        components,
    }
}
