//! Weather-driven advisory rules for a single crop.

pub mod domain;
mod rules;

pub use domain::{
    AdviceItem, CropCondition, CropConditionTable, CropStage, Severity, WeatherReading,
};

use std::sync::Arc;
use tracing::debug;

/// Stateless evaluator over a shared crop-conditions table.
#[derive(Debug, Clone, Default)]
pub struct AdvisoryEngine {
    crop_conditions: Arc<CropConditionTable>,
}

impl AdvisoryEngine {
    pub fn new(crop_conditions: Arc<CropConditionTable>) -> Self {
        Self { crop_conditions }
    }

    pub fn crop_conditions(&self) -> &CropConditionTable {
        &self.crop_conditions
    }

    /// Produces advice ordered most urgent rule first. Never fails: an
    /// unknown crop only skips the temperature rule.
    ///
    /// With a stage the stage rules run and a favorable temperature stays
    /// silent; without one the temperature rule also confirms a good reading.
    pub fn evaluate(
        &self,
        weather: &WeatherReading,
        crop: &str,
        stage: Option<&CropStage>,
    ) -> Vec<AdviceItem> {
        let advice = rules::apply_rules(weather, crop, stage, &self.crop_conditions);
        debug!(
            crop,
            stage = stage.map(CropStage::label),
            items = advice.len(),
            "advisory rules evaluated"
        );
        advice
    }
}
