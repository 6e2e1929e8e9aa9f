//! Static agronomy lookups: agro-climatic zones, fertilizer doses and the
//! seasonal crop calendar.

pub mod guides;
pub mod location;

pub use guides::{FertilizerGuide, LookupError, Season, SoilType};
pub use location::{recommend_crops, zone_for, AgroClimaticZone, CropRecommendation};
