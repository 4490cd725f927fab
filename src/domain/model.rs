use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_THRESHOLD_PERCENT: f64 = 70.0;
pub const STRICT_THRESHOLD_PERCENT: f64 = 75.0;

fn default_threshold_used() -> f64 {
    DEFAULT_THRESHOLD_PERCENT
}

/// A single fuel-price observation.
///
/// `threshold_used` is frozen at save time so the recommendation shown for an old
/// record does not move when the global threshold changes. Records written before the
/// field existed deserialize with the default threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub alcohol_price: f64,
    pub gas_price: f64,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub address: Option<String>,
    pub timestamp: i64,
    #[serde(default = "default_threshold_used")]
    pub threshold_used: f64,
}

impl Station {
    pub fn new(alcohol_price: f64, gas_price: f64, threshold_used: f64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: None,
            alcohol_price,
            gas_price,
            latitude: None,
            longitude: None,
            address: None,
            timestamp: chrono::Utc::now().timestamp_millis(),
            threshold_used,
        }
    }

    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name.filter(|n| !n.trim().is_empty());
        self
    }

    pub fn with_location(
        mut self,
        latitude: Option<f64>,
        longitude: Option<f64>,
        address: Option<String>,
    ) -> Self {
        self.latitude = latitude;
        self.longitude = longitude;
        self.address = address;
        self
    }

    pub fn ratio_percent(&self) -> f64 {
        crate::domain::services::compute_ratio_percent(self.alcohol_price, self.gas_price)
    }

    /// Recommendation at the threshold stored with this record.
    pub fn recommendation(&self) -> Recommendation {
        self.recommendation_at(self.threshold_used)
    }

    pub fn recommendation_at(&self, threshold_percent: f64) -> Recommendation {
        crate::domain::services::recommendation_text(self.ratio_percent(), threshold_percent)
    }

    pub fn has_location(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    UseEthanol,
    UseGasoline,
}

impl Recommendation {
    pub fn label(&self) -> &'static str {
        match self {
            Recommendation::UseEthanol => "use ethanol",
            Recommendation::UseGasoline => "use gasoline",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The persisted "strict mode" switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThresholdMode {
    #[default]
    Default,
    Strict,
}

impl ThresholdMode {
    pub fn from_flag(strict: bool) -> Self {
        if strict {
            ThresholdMode::Strict
        } else {
            ThresholdMode::Default
        }
    }

    pub fn as_flag(&self) -> bool {
        matches!(self, ThresholdMode::Strict)
    }
}

/// Percentages each mode maps to. Configurable, but only affects new saves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub default_percent: f64,
    pub strict_percent: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            default_percent: DEFAULT_THRESHOLD_PERCENT,
            strict_percent: STRICT_THRESHOLD_PERCENT,
        }
    }
}

impl Thresholds {
    pub fn percent_for(&self, mode: ThresholdMode) -> f64 {
        match mode {
            ThresholdMode::Default => self.default_percent,
            ThresholdMode::Strict => self.strict_percent,
        }
    }
}
