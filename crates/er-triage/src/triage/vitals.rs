use serde::{Deserialize, Serialize};

/// Vital-sign snapshot captured at intake or when a clinician amends readings.
///
/// Every reading is optional; an unmeasured vital never counts as abnormal.
/// Diastolic pressure and respiratory rate are recorded for display only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VitalSigns {
    /// Body temperature in °C.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Heart rate in beats per minute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<f64>,
    /// Systolic blood pressure in mmHg.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub systolic_bp: Option<f64>,
    /// Diastolic blood pressure in mmHg.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diastolic_bp: Option<f64>,
    /// Peripheral oxygen saturation in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oxygen_saturation: Option<f64>,
    /// Respiratory rate in breaths per minute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub respiratory_rate: Option<f64>,
}

impl VitalSigns {
    pub fn with_temperature(mut self, celsius: f64) -> Self {
        self.temperature = Some(celsius);
        self
    }

    pub fn with_heart_rate(mut self, bpm: f64) -> Self {
        self.heart_rate = Some(bpm);
        self
    }

    pub fn with_systolic_bp(mut self, mmhg: f64) -> Self {
        self.systolic_bp = Some(mmhg);
        self
    }

    pub fn with_diastolic_bp(mut self, mmhg: f64) -> Self {
        self.diastolic_bp = Some(mmhg);
        self
    }

    pub fn with_oxygen_saturation(mut self, percent: f64) -> Self {
        self.oxygen_saturation = Some(percent);
        self
    }

    pub fn with_respiratory_rate(mut self, per_minute: f64) -> Self {
        self.respiratory_rate = Some(per_minute);
        self
    }

    /// True when none of the readings were captured.
    pub fn is_empty(&self) -> bool {
        self.temperature.is_none()
            && self.heart_rate.is_none()
            && self.systolic_bp.is_none()
            && self.diastolic_bp.is_none()
            && self.oxygen_saturation.is_none()
            && self.respiratory_rate.is_none()
    }

    /// Compact one-line rendering used by queue listings, e.g. `T 38.9°C | HR 112 bpm`.
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if let Some(value) = self.temperature {
            parts.push(format!("T {value:.1}°C"));
        }
        if let Some(value) = self.heart_rate {
            parts.push(format!("HR {value:.0} bpm"));
        }
        match (self.systolic_bp, self.diastolic_bp) {
            (Some(sys), Some(dia)) => parts.push(format!("BP {sys:.0}/{dia:.0} mmHg")),
            (Some(sys), None) => parts.push(format!("BP {sys:.0} mmHg")),
            _ => {}
        }
        if let Some(value) = self.oxygen_saturation {
            parts.push(format!("O2 {value:.0}%"));
        }
        if let Some(value) = self.respiratory_rate {
            parts.push(format!("RR {value:.0}/min"));
        }
        parts.join(" | ")
    }
}
