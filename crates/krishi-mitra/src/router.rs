use std::io::Cursor;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::advisory::{AdviceItem, AdvisoryEngine, CropStage, WeatherReading};
use crate::agronomy::{recommend_crops, CropRecommendation, FertilizerGuide, Season, SoilType};
use crate::data::KnowledgeBase;
use crate::error::AppError;
use crate::mandi::{MandiPriceBoard, MandiPriceOutcome};
use crate::schemes::{
    suggest_loans, title_case, FarmerProfile, LandHoldingBand, LoanSuggestions, SchemeDirectory,
    SchemeRecord,
};

struct ApiState {
    advisory: AdvisoryEngine,
    schemes: SchemeDirectory,
    fertilizer: FertilizerGuide,
}

/// Advisory, scheme and agronomy endpoints over one loaded knowledge base.
pub fn advisory_router(knowledge: &KnowledgeBase) -> Router {
    let state = Arc::new(ApiState {
        advisory: knowledge.advisory_engine(),
        schemes: knowledge.scheme_directory(),
        fertilizer: FertilizerGuide::standard(),
    });

    Router::new()
        .route("/api/v1/agri_advice", post(advice_handler))
        .route("/api/v1/schemes", post(schemes_handler))
        .route("/api/v1/loan_suggestions", post(loans_handler))
        .route("/api/v1/crop_recommendation", get(crop_recommendation_handler))
        .route("/api/v1/fertilizer", get(fertilizer_handler))
        .route("/api/v1/crop_calendar", get(crop_calendar_handler))
        .route("/api/v1/mandi_prices", post(mandi_prices_handler))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct AdviceRequest {
    pub weather: WeatherReading,
    pub crop: String,
    #[serde(default)]
    pub stage: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AdviceResponse {
    pub crop: String,
    /// Normalised stage label the rules ran with, so `"Growing"` comes back
    /// as `"vegetative"` and an unrecognised stage is echoed trimmed.
    pub stage: Option<String>,
    pub advice: Vec<AdviceItem>,
}

async fn advice_handler(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<AdviceRequest>,
) -> Json<AdviceResponse> {
    let stage = request.stage.as_deref().map(CropStage::parse);
    let advice = state
        .advisory
        .evaluate(&request.weather, &request.crop, stage.as_ref());

    Json(AdviceResponse {
        crop: request.crop,
        stage: stage.map(|stage| stage.label().to_string()),
        advice,
    })
}

#[derive(Debug, Deserialize)]
pub struct SchemesRequest {
    pub state: String,
    #[serde(default)]
    pub profile: FarmerProfile,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SchemesQuery {
    pub state: String,
    pub language: String,
    pub profile: FarmerProfile,
}

#[derive(Debug, Serialize)]
pub struct SchemesResponse {
    pub query: SchemesQuery,
    pub eligible_schemes: Vec<SchemeRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

async fn schemes_handler(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<SchemesRequest>,
) -> Json<SchemesResponse> {
    let lookup = state
        .schemes
        .lookup(&request.profile, &request.state, request.language.as_deref());
    let language = state
        .schemes
        .library()
        .served_language(request.language.as_deref())
        .to_string();

    Json(SchemesResponse {
        eligible_schemes: lookup.schemes().to_vec(),
        message: lookup.message(),
        query: SchemesQuery {
            state: title_case(&request.state),
            language,
            profile: request.profile,
        },
    })
}

#[derive(Debug, Deserialize)]
pub struct LoanRequest {
    pub age: u8,
    pub land_holding_acres: f64,
}

async fn loans_handler(Json(request): Json<LoanRequest>) -> Json<LoanSuggestions> {
    let band = LandHoldingBand::from_acres(request.land_holding_acres);
    Json(suggest_loans(request.age, band))
}

#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    pub city: String,
    pub state: String,
}

async fn crop_recommendation_handler(
    Query(query): Query<LocationQuery>,
) -> Json<CropRecommendation> {
    Json(recommend_crops(&query.city, &query.state))
}

#[derive(Debug, Deserialize)]
pub struct FertilizerQuery {
    pub crop: String,
    pub soil: String,
}

#[derive(Debug, Serialize)]
pub struct FertilizerResponse {
    pub crop: String,
    pub soil: SoilType,
    pub recommendation: &'static str,
}

async fn fertilizer_handler(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<FertilizerQuery>,
) -> Result<Json<FertilizerResponse>, AppError> {
    let soil = SoilType::parse(&query.soil)?;
    let recommendation = state.fertilizer.recommend(&query.crop, soil)?;

    Ok(Json(FertilizerResponse {
        crop: title_case(&query.crop),
        soil,
        recommendation,
    }))
}

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub season: String,
}

#[derive(Debug, Serialize)]
pub struct CalendarResponse {
    pub season: Season,
    pub crops: &'static [&'static str],
}

async fn crop_calendar_handler(
    Query(query): Query<CalendarQuery>,
) -> Result<Json<CalendarResponse>, AppError> {
    let season = Season::parse(&query.season)?;
    Ok(Json(CalendarResponse {
        season,
        crops: season.crops(),
    }))
}

/// Either a CSV export or the JSON `records` envelope; with neither the
/// board is empty and the closed-market message comes back.
#[derive(Debug, Deserialize)]
pub struct MandiPricesRequest {
    pub state: String,
    pub commodity: String,
    #[serde(default)]
    pub csv: Option<String>,
    #[serde(default)]
    pub json: Option<String>,
}

async fn mandi_prices_handler(
    Json(request): Json<MandiPricesRequest>,
) -> Result<Json<MandiPriceOutcome>, AppError> {
    let board = match (&request.csv, &request.json) {
        (Some(csv), _) => MandiPriceBoard::from_csv_reader(Cursor::new(csv.as_bytes()))?,
        (None, Some(json)) => MandiPriceBoard::from_json_str(json)?,
        (None, None) => MandiPriceBoard::default(),
    };

    Ok(Json(board.prices_for(&request.state, &request.commodity)))
}
