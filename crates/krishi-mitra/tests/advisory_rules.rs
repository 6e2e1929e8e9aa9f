use krishi_mitra::advisory::{AdvisoryEngine, CropStage, Severity, WeatherReading};
use krishi_mitra::config::DataConfig;
use krishi_mitra::KnowledgeBase;
use std::path::PathBuf;

fn shipped_data() -> DataConfig {
    DataConfig {
        data_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data"),
        languages: vec!["en".to_string(), "hi".to_string()],
    }
}

fn engine() -> AdvisoryEngine {
    KnowledgeBase::load(&shipped_data()).advisory_engine()
}

#[test]
fn humid_heatwave_on_growing_wheat_warns_about_humidity_then_temperature() {
    let weather = WeatherReading::new(40.0, 85, "Clear");
    let advice = engine().evaluate(&weather, "Wheat", Some(&CropStage::parse("Growing")));

    assert_eq!(advice.len(), 2);
    assert_eq!(advice[0].severity, Severity::Warning);
    assert!(advice[0].text.contains("85%"));
    assert_eq!(advice[1].severity, Severity::Warning);
    assert_eq!(
        advice[1].text,
        "The current temperature (40°C) is outside the ideal range of 10-25°C for Wheat. This may cause stress."
    );
}

#[test]
fn humidity_above_eighty_yields_exactly_one_humidity_warning() {
    let engine = engine();
    for humidity in [81, 90, 100] {
        for stage in [None, Some(CropStage::Sowing), Some(CropStage::Harvesting)] {
            let weather = WeatherReading::new(18.0, humidity, "Haze");
            let advice = engine.evaluate(&weather, "Wheat", stage.as_ref());
            let humidity_items: Vec<_> = advice
                .iter()
                .filter(|item| item.text.contains(&format!("({humidity}%)")))
                .collect();

            assert_eq!(humidity_items.len(), 1, "humidity {humidity}, stage {stage:?}");
            assert_eq!(humidity_items[0].severity, Severity::Warning);
        }
    }
}

#[test]
fn rain_at_harvest_leads_with_critical_advice() {
    for condition in ["Light Rain", "heavy rain", "Thunderstorm"] {
        let weather = WeatherReading::new(22.0, 60, condition);
        let advice = engine().evaluate(&weather, "Mustard", Some(&CropStage::Harvesting));
        assert_eq!(advice[0].severity, Severity::Critical, "{condition}");
    }
}

#[test]
fn dry_sowing_asks_for_irrigation() {
    let weather = WeatherReading::new(20.0, 40, "Sunny");
    let advice = engine().evaluate(&weather, "Wheat", Some(&CropStage::Sowing));

    assert!(advice
        .iter()
        .any(|item| item.severity == Severity::ActionNeeded && item.text.contains("Irrigate")));
}

#[test]
fn unknown_crop_never_gets_temperature_advice() {
    let engine = engine();
    for temperature in [-5.0, 15.0, 48.0] {
        let weather = WeatherReading::new(temperature, 50, "Clear");
        let advice = engine.evaluate(&weather, "Dragonfruit", None);
        assert!(advice.iter().all(|item| !item.text.contains("temperature")));
    }
}

#[test]
fn empty_table_with_calm_weather_gives_single_fallback() {
    let engine = AdvisoryEngine::default();
    let weather = WeatherReading::new(24.0, 80, "Partly cloudy");

    let advice = engine.evaluate(&weather, "Wheat", Some(&CropStage::Flowering));

    assert_eq!(advice.len(), 1);
    assert_eq!(advice[0].severity, Severity::Info);
    assert_eq!(advice[0].emoji, "👍");
}

#[test]
fn favorable_temperature_is_confirmed_only_without_a_stage() {
    let engine = engine();
    let weather = WeatherReading::new(20.0, 50, "Clear");

    let unstaged = engine.evaluate(&weather, "Wheat", None);
    assert_eq!(unstaged.len(), 1);
    assert_eq!(unstaged[0].severity, Severity::Positive);

    let staged = engine.evaluate(&weather, "Wheat", Some(&CropStage::Vegetative));
    assert_eq!(staged.len(), 1);
    assert_eq!(staged[0].severity, Severity::Info);
}
