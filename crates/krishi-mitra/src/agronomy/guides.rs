use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("no fertilizer guidance for crop '{0}'")]
    UnknownCrop(String),
    #[error("unknown soil type '{0}' (expected Black, Red, Sandy or Brown)")]
    UnknownSoil(String),
    #[error("unknown season '{0}' (expected Rabi, Kharif or Zaid)")]
    UnknownSeason(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoilType {
    Black,
    Red,
    Sandy,
    Brown,
}

impl SoilType {
    pub const fn ordered() -> [Self; 4] {
        [Self::Black, Self::Red, Self::Sandy, Self::Brown]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Black => "Black",
            Self::Red => "Red",
            Self::Sandy => "Sandy",
            Self::Brown => "Brown",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, LookupError> {
        Self::ordered()
            .into_iter()
            .find(|soil| soil.label().eq_ignore_ascii_case(raw.trim()))
            .ok_or_else(|| LookupError::UnknownSoil(raw.trim().to_string()))
    }
}

impl fmt::Display for SoilType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug)]
struct FertilizerEntry {
    crop: &'static str,
    /// Indexed in `SoilType::ordered()` order.
    by_soil: [&'static str; 4],
}

/// Crop × soil NPK guidance.
#[derive(Debug)]
pub struct FertilizerGuide {
    entries: Vec<FertilizerEntry>,
}

impl FertilizerGuide {
    pub fn standard() -> Self {
        Self {
            entries: standard_fertilizer_entries(),
        }
    }

    pub fn crops(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.crop)
    }

    pub fn recommend(&self, crop: &str, soil: SoilType) -> Result<&'static str, LookupError> {
        let entry = self
            .entries
            .iter()
            .find(|entry| entry.crop.eq_ignore_ascii_case(crop.trim()))
            .ok_or_else(|| LookupError::UnknownCrop(crop.trim().to_string()))?;
        Ok(entry.by_soil[soil as usize])
    }
}

fn standard_fertilizer_entries() -> Vec<FertilizerEntry> {
    vec![
        FertilizerEntry {
            crop: "Wheat",
            by_soil: [
                "Apply 120 kg N, 60 kg P₂O₅, 40 kg K₂O per hectare. Use Urea, DAP, and MOP.",
                "Apply 100 kg N, 50 kg P₂O₅, 30 kg K₂O per hectare. Add 5 tonnes FYM before sowing.",
                "Use 90 kg N, 45 kg P₂O₅, and 25 kg K₂O. Split N into 2–3 doses.",
                "Apply 110 kg N, 55 kg P₂O₅, 35 kg K₂O per hectare. Include organic manure.",
            ],
        },
        FertilizerEntry {
            crop: "Rice",
            by_soil: [
                "Apply 100 kg N, 50 kg P₂O₅, 50 kg K₂O per hectare. Use split application for N.",
                "Use 90 kg N, 40 kg P₂O₅, and 40 kg K₂O. Add zinc sulphate @ 25 kg/ha.",
                "Apply 80 kg N, 30 kg P₂O₅, and 30 kg K₂O. Water management is essential.",
                "Use 90:45:45 NPK with green manure incorporation before transplanting.",
            ],
        },
        FertilizerEntry {
            crop: "Maize",
            by_soil: [
                "Apply 120 kg N, 60 kg P₂O₅, 40 kg K₂O. Use basal + top dressing method.",
                "Use 100:50:30 NPK with 5 tonnes FYM. Zinc and Boron may be needed.",
                "Apply 80 kg N, 40 kg P₂O₅, 20 kg K₂O. Split nitrogen application in 3 stages.",
                "100 kg N, 50 kg P₂O₅, 30 kg K₂O per hectare. Use organic compost pre-sowing.",
            ],
        },
        FertilizerEntry {
            crop: "Potato",
            by_soil: [
                "150:80:120 NPK kg/ha. Apply FYM @ 25 tons/ha before sowing.",
                "120:60:100 NPK + 2 tonnes of compost. Potassium is critical for tuber growth.",
                "100:40:80 NPK. Add micronutrients like Boron if deficiency appears.",
                "130:70:110 NPK. Ensure deep ploughing and ridge formation.",
            ],
        },
        FertilizerEntry {
            crop: "Sugarcane",
            by_soil: [
                "Apply 250:115:115 NPK. Apply in 3 split doses with organic matter.",
                "Use 225:100:100 NPK with 10 tonnes FYM. Micronutrients essential.",
                "200:90:90 NPK. Add press mud or compost for better results.",
                "240:110:110 NPK + green manure or biofertilizer for soil enrichment.",
            ],
        },
        FertilizerEntry {
            crop: "Tomato",
            by_soil: [
                "100:60:60 NPK per ha. Add 10–15 tonnes FYM. Split nitrogen.",
                "80:40:50 NPK + Boron and Magnesium. Add neem cake for pest resistance.",
                "70:35:45 NPK. Frequent irrigation needed.",
                "90:50:50 NPK + Trichoderma enriched compost for disease control.",
            ],
        },
        FertilizerEntry {
            crop: "Mustard",
            by_soil: [
                "80:40:30 NPK + 5 kg Zinc Sulphate. Ideal for higher oil yield.",
                "70:35:25 NPK. Sulphur application helps oil quality.",
                "60:30:20 NPK. Add FYM and maintain moisture.",
                "75:40:25 NPK. Use neem-coated urea.",
            ],
        },
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    Rabi,
    Kharif,
    Zaid,
}

impl Season {
    pub const fn ordered() -> [Self; 3] {
        [Self::Rabi, Self::Kharif, Self::Zaid]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Rabi => "Rabi",
            Self::Kharif => "Kharif",
            Self::Zaid => "Zaid",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, LookupError> {
        Self::ordered()
            .into_iter()
            .find(|season| season.label().eq_ignore_ascii_case(raw.trim()))
            .ok_or_else(|| LookupError::UnknownSeason(raw.trim().to_string()))
    }

    /// Crops sown in this season.
    pub const fn crops(self) -> &'static [&'static str] {
        match self {
            Self::Rabi => &["Wheat", "Mustard", "Barley"],
            Self::Kharif => &["Paddy", "Maize", "Bajra"],
            Self::Zaid => &["Watermelon", "Cucumber"],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recommendation_matches_crop_and_soil_case_insensitively() {
        let guide = FertilizerGuide::standard();
        let soil = SoilType::parse("sandy").expect("sandy is known");
        let text = guide.recommend("wheat", soil).expect("wheat is known");
        assert!(text.starts_with("Use 90 kg N"));
    }

    #[test]
    fn unknown_crop_and_soil_are_reported() {
        let guide = FertilizerGuide::standard();
        assert_eq!(
            guide.recommend("Cereals", SoilType::Black),
            Err(LookupError::UnknownCrop("Cereals".to_string()))
        );
        assert_eq!(
            SoilType::parse("Loam"),
            Err(LookupError::UnknownSoil("Loam".to_string()))
        );
    }

    #[test]
    fn every_crop_covers_every_soil() {
        let guide = FertilizerGuide::standard();
        for crop in guide.crops() {
            for soil in SoilType::ordered() {
                assert!(!guide.recommend(crop, soil).expect("entry").is_empty());
            }
        }
    }

    #[test]
    fn season_calendar_lists_crops() {
        assert_eq!(
            Season::parse("KHARIF").map(Season::crops),
            Ok(&["Paddy", "Maize", "Bajra"][..])
        );
        assert!(Season::parse("Monsoon").is_err());
    }
}
