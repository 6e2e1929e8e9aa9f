use serde::Serialize;

/// Agro-climatic zone with the crops recommended for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgroClimaticZone {
    pub name: &'static str,
    pub crops: &'static [&'static str],
}

const SOUTHERN_PLAINS: &str = "Sub-Humid Southern Plains and Aravalli Hills (Zone IVa)";
const LUNI_BASIN: &str = "Transitional Plain of Luni Basin (Zone IIa)";
const ARID_WEST: &str = "Arid Western Plains (Zone Ia)";

const CROPS_NOT_AVAILABLE: &str = "General crop recommendations not available for this area.";

/// Rajasthan districts keyed in lower case.
const RAJASTHAN_ZONES: &[(&str, AgroClimaticZone)] = &[
    (
        "udaipur",
        AgroClimaticZone {
            name: SOUTHERN_PLAINS,
            crops: &["Maize", "Soybean", "Gram", "Wheat", "Mustard"],
        },
    ),
    (
        "chittorgarh",
        AgroClimaticZone {
            name: SOUTHERN_PLAINS,
            crops: &["Maize", "Soybean", "Gram", "Wheat", "Mustard"],
        },
    ),
    (
        "bhilwara",
        AgroClimaticZone {
            name: SOUTHERN_PLAINS,
            crops: &["Maize", "Cotton", "Wheat", "Gram", "Groundnut"],
        },
    ),
    (
        "pali",
        AgroClimaticZone {
            name: LUNI_BASIN,
            crops: &["Sesame", "Mustard", "Wheat", "Barley", "Guar"],
        },
    ),
    (
        "jodhpur",
        AgroClimaticZone {
            name: LUNI_BASIN,
            crops: &["Bajra (Pearl Millet)", "Moong", "Moth", "Guar", "Wheat"],
        },
    ),
    (
        "jaisalmer",
        AgroClimaticZone {
            name: ARID_WEST,
            crops: &["Bajra (Pearl Millet)", "Moth Bean", "Guar", "Mustard (irrigated)"],
        },
    ),
    (
        "barmer",
        AgroClimaticZone {
            name: ARID_WEST,
            crops: &["Bajra (Pearl Millet)", "Moth Bean", "Guar", "Til (Sesame)"],
        },
    ),
];

pub fn zone_for(city: &str, state: &str) -> Option<&'static AgroClimaticZone> {
    if !state.trim().eq_ignore_ascii_case("rajasthan") {
        return None;
    }
    let city = city.trim().to_lowercase();
    RAJASTHAN_ZONES
        .iter()
        .find(|(district, _)| *district == city)
        .map(|(_, zone)| zone)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CropRecommendation {
    pub city: String,
    pub state: String,
    pub agro_climatic_zone: String,
    pub recommended_crops: Vec<String>,
}

/// Zone and crop list for a location, with a generic zone name and a
/// not-available note for places outside the table.
pub fn recommend_crops(city: &str, state: &str) -> CropRecommendation {
    let (agro_climatic_zone, recommended_crops) = match zone_for(city, state) {
        Some(zone) => (
            zone.name.to_string(),
            zone.crops.iter().map(|crop| crop.to_string()).collect(),
        ),
        None => (
            format!("General {} Zone", state.trim()),
            vec![CROPS_NOT_AVAILABLE.to_string()],
        ),
    };

    CropRecommendation {
        city: city.trim().to_string(),
        state: state.trim().to_string(),
        agro_climatic_zone,
        recommended_crops,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn district_lookup_ignores_case() {
        let zone = zone_for("UDAIPUR", "rajasthan").expect("udaipur mapped");
        assert_eq!(zone.name, SOUTHERN_PLAINS);
        assert!(zone.crops.contains(&"Maize"));
    }

    #[test]
    fn other_states_fall_back_to_general_zone() {
        let recommendation = recommend_crops("Ludhiana", "Punjab");
        assert_eq!(recommendation.agro_climatic_zone, "General Punjab Zone");
        assert_eq!(recommendation.recommended_crops, vec![CROPS_NOT_AVAILABLE]);
    }

    #[test]
    fn unmapped_rajasthan_district_is_general() {
        assert!(zone_for("Kota", "Rajasthan").is_none());
        let recommendation = recommend_crops("Kota", "Rajasthan");
        assert_eq!(recommendation.agro_climatic_zone, "General Rajasthan Zone");
        assert_eq!(recommendation.recommended_crops, vec![CROPS_NOT_AVAILABLE]);
    }

    #[test]
    fn mapped_district_reports_its_zone() {
        let recommendation = recommend_crops(" Jodhpur ", "Rajasthan");
        assert_eq!(recommendation.city, "Jodhpur");
        assert_eq!(recommendation.agro_climatic_zone, LUNI_BASIN);
    }
}
