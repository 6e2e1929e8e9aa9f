use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Current weather as reported by the upstream weather collaborator.
///
/// Missing numeric fields deserialize to zero and a missing condition to an
/// empty string, so partial readings still evaluate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    #[serde(default)]
    pub temperature_celsius: f64,
    #[serde(default)]
    pub humidity_percent: u8,
    #[serde(default)]
    pub condition: String,
}

impl WeatherReading {
    pub fn new(temperature_celsius: f64, humidity_percent: u8, condition: impl Into<String>) -> Self {
        Self {
            temperature_celsius,
            humidity_percent,
            condition: condition.into(),
        }
    }

    pub(crate) fn condition_mentions(&self, needle: &str) -> bool {
        self.condition.to_lowercase().contains(needle)
    }

    pub(crate) fn is_rainy(&self) -> bool {
        self.condition_mentions("rain")
    }

    pub(crate) fn is_stormy(&self) -> bool {
        self.is_rainy() || self.condition_mentions("thunderstorm")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Positive,
    Info,
    Warning,
    ActionNeeded,
    Critical,
}

impl Severity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::ActionNeeded => "action_needed",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One line of advice. The serialized tag is `type` to match what the
/// summarisation prompt and the UI already consume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdviceItem {
    pub emoji: String,
    #[serde(rename = "type")]
    pub severity: Severity,
    pub text: String,
}

impl AdviceItem {
    pub fn new(emoji: &str, severity: Severity, text: impl Into<String>) -> Self {
        Self {
            emoji: emoji.to_string(),
            severity,
            text: text.into(),
        }
    }
}

/// Growth stage reported by the farmer. Only sowing and harvesting drive
/// stage rules; anything unrecognised is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CropStage {
    Sowing,
    Vegetative,
    Flowering,
    Harvesting,
    Other(String),
}

impl CropStage {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.to_lowercase().as_str() {
            "sowing" => Self::Sowing,
            "vegetative" | "growing" => Self::Vegetative,
            "flowering" => Self::Flowering,
            "harvesting" => Self::Harvesting,
            _ => Self::Other(trimmed.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Sowing => "sowing",
            Self::Vegetative => "vegetative",
            Self::Flowering => "flowering",
            Self::Harvesting => "harvesting",
            Self::Other(raw) => raw,
        }
    }
}

impl fmt::Display for CropStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Ideal growing window for a single crop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropCondition {
    /// Inclusive `[min, max]` in °C.
    pub ideal_temp_celsius: (f64, f64),
}

impl CropCondition {
    pub fn min_celsius(&self) -> f64 {
        self.ideal_temp_celsius.0
    }

    pub fn max_celsius(&self) -> f64 {
        self.ideal_temp_celsius.1
    }

    pub fn accepts(&self, temperature_celsius: f64) -> bool {
        self.min_celsius() <= temperature_celsius && temperature_celsius <= self.max_celsius()
    }
}

/// Crop name → ideal conditions. Keys are matched case-sensitively.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CropConditionTable {
    crops: BTreeMap<String, CropCondition>,
}

impl CropConditionTable {
    pub fn new(crops: BTreeMap<String, CropCondition>) -> Self {
        Self { crops }
    }

    pub fn get(&self, crop: &str) -> Option<&CropCondition> {
        self.crops.get(crop)
    }

    pub fn crop_names(&self) -> impl Iterator<Item = &str> {
        self.crops.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.crops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crops.is_empty()
    }
}

impl FromIterator<(String, CropCondition)> for CropConditionTable {
    fn from_iter<I: IntoIterator<Item = (String, CropCondition)>>(iter: I) -> Self {
        Self {
            crops: iter.into_iter().collect(),
        }
    }
}
