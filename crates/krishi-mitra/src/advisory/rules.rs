use super::domain::{AdviceItem, CropConditionTable, CropStage, Severity, WeatherReading};

const HUMIDITY_FUNGAL_THRESHOLD: u8 = 80;

/// Runs every rule in priority order and accumulates the advice they emit.
pub(crate) fn apply_rules(
    weather: &WeatherReading,
    crop: &str,
    stage: Option<&CropStage>,
    crop_conditions: &CropConditionTable,
) -> Vec<AdviceItem> {
    let mut advice = Vec::new();

    if let Some(stage) = stage {
        stage_advice(weather, stage, &mut advice);
    }

    if weather.humidity_percent > HUMIDITY_FUNGAL_THRESHOLD {
        advice.push(AdviceItem::new(
            "💧",
            Severity::Warning,
            format!(
                "High humidity ({}%) increases the risk of fungal diseases for most crops. Ensure good air circulation.",
                weather.humidity_percent
            ),
        ));
    }

    // Stage-aware evaluation only reports temperature when it is a problem.
    temperature_advice(weather, crop, crop_conditions, stage.is_none(), &mut advice);

    if advice.is_empty() {
        advice.push(AdviceItem::new(
            "👍",
            Severity::Info,
            "Weather conditions appear stable. Continue standard farming practices and monitor daily.",
        ));
    }

    advice
}

fn stage_advice(weather: &WeatherReading, stage: &CropStage, advice: &mut Vec<AdviceItem>) {
    match stage {
        CropStage::Sowing if weather.is_rainy() => advice.push(AdviceItem::new(
            "🌱",
            Severity::Positive,
            "Rain brings good soil moisture, which helps seeds germinate. A good window for sowing.",
        )),
        CropStage::Sowing => advice.push(AdviceItem::new(
            "🚿",
            Severity::ActionNeeded,
            "No rain in the forecast. Irrigate the field before sowing so seeds have enough moisture to germinate.",
        )),
        CropStage::Harvesting if weather.is_stormy() => advice.push(AdviceItem::new(
            "⛈️",
            Severity::Critical,
            "Rain or thunderstorm expected. Harvest mature produce immediately and move it under cover.",
        )),
        CropStage::Harvesting => advice.push(AdviceItem::new(
            "☀️",
            Severity::Positive,
            "Clear weather is ideal for harvesting and drying your produce.",
        )),
        CropStage::Vegetative | CropStage::Flowering | CropStage::Other(_) => {}
    }
}

fn temperature_advice(
    weather: &WeatherReading,
    crop: &str,
    crop_conditions: &CropConditionTable,
    confirm_favorable: bool,
    advice: &mut Vec<AdviceItem>,
) {
    let Some(condition) = crop_conditions.get(crop) else {
        return;
    };

    let temperature = weather.temperature_celsius;
    if !condition.accepts(temperature) {
        advice.push(AdviceItem::new(
            "🌡️",
            Severity::Warning,
            format!(
                "The current temperature ({}°C) is outside the ideal range of {}-{}°C for {}. This may cause stress.",
                temperature,
                condition.min_celsius(),
                condition.max_celsius(),
                crop
            ),
        ));
    } else if confirm_favorable {
        advice.push(AdviceItem::new(
            "✅",
            Severity::Positive,
            format!("The current temperature ({temperature}°C) is favorable for your {crop} crop."),
        ));
    }
}
