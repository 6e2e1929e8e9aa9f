use crate::infra::load_knowledge;
use clap::Args;
use krishi_mitra::advisory::{AdviceItem, CropStage, WeatherReading};
use krishi_mitra::agronomy::{recommend_crops, FertilizerGuide, Season, SoilType};
use krishi_mitra::error::AppError;
use krishi_mitra::mandi::{MandiPriceBoard, MandiPriceOutcome};
use krishi_mitra::schemes::{
    format_schemes, suggest_loans, FarmerProfile, LandHoldingBand, LoanSuggestions,
};
use std::io::Cursor;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct AdviseArgs {
    /// Crop name as written in the crop conditions table (e.g. Wheat)
    #[arg(long)]
    pub(crate) crop: String,
    /// Current temperature in °C
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) temperature: f64,
    /// Relative humidity in percent
    #[arg(long)]
    pub(crate) humidity: u8,
    /// Weather description, e.g. "light rain"
    #[arg(long, default_value = "Clear")]
    pub(crate) condition: String,
    /// Growth stage (sowing, growing, flowering, harvesting)
    #[arg(long)]
    pub(crate) stage: Option<String>,
    #[arg(long)]
    pub(crate) data_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct SchemesArgs {
    /// State used to pick state-specific schemes
    #[arg(long)]
    pub(crate) state: String,
    #[arg(long)]
    pub(crate) age: Option<u8>,
    #[arg(long)]
    pub(crate) gender: Option<String>,
    /// Land holding in acres
    #[arg(long)]
    pub(crate) land_holding: Option<f64>,
    /// Whether the farmer has an outstanding crop loan
    #[arg(long)]
    pub(crate) loanee: Option<bool>,
    /// Scheme table language (falls back to the default language)
    #[arg(long)]
    pub(crate) language: Option<String>,
    #[arg(long)]
    pub(crate) data_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct LoansArgs {
    #[arg(long)]
    pub(crate) age: u8,
    /// Land holding in acres
    #[arg(long)]
    pub(crate) land_holding: f64,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    #[arg(long)]
    pub(crate) data_dir: Option<PathBuf>,
    /// Skip the mandi price portion of the demo.
    #[arg(long)]
    pub(crate) skip_mandi: bool,
}

pub(crate) fn run_advise(args: AdviseArgs) -> Result<(), AppError> {
    let AdviseArgs {
        crop,
        temperature,
        humidity,
        condition,
        stage,
        data_dir,
    } = args;

    let knowledge = load_knowledge(data_dir)?;
    let weather = WeatherReading::new(temperature, humidity, condition);
    let stage = stage.as_deref().map(CropStage::parse);
    let advice = knowledge
        .advisory_engine()
        .evaluate(&weather, &crop, stage.as_ref());

    println!(
        "Advice for {} ({}°C, {}% humidity, {})",
        crop, weather.temperature_celsius, weather.humidity_percent, weather.condition
    );
    render_advice(&advice);
    Ok(())
}

pub(crate) fn run_schemes(args: SchemesArgs) -> Result<(), AppError> {
    let SchemesArgs {
        state,
        age,
        gender,
        land_holding,
        loanee,
        language,
        data_dir,
    } = args;

    let knowledge = load_knowledge(data_dir)?;
    let profile = FarmerProfile {
        age,
        gender,
        land_holding_acres: land_holding,
        is_loanee: loanee,
    };
    let lookup = knowledge
        .scheme_directory()
        .lookup(&profile, &state, language.as_deref());

    println!("{}", format_schemes(&lookup));
    Ok(())
}

pub(crate) fn run_loans(args: LoansArgs) -> Result<(), AppError> {
    let suggestions = suggest_loans(args.age, LandHoldingBand::from_acres(args.land_holding));
    render_loans(&suggestions);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let knowledge = load_knowledge(args.data_dir)?;
    let engine = knowledge.advisory_engine();

    println!("KrishiMitra advisory demo");

    let heatwave = WeatherReading::new(40.0, 85, "Clear");
    println!("\nWheat in the vegetative stage during a humid heatwave (40°C, 85%)");
    render_advice(&engine.evaluate(&heatwave, "Wheat", Some(&CropStage::Vegetative)));

    let storm = WeatherReading::new(28.0, 70, "Thunderstorm");
    println!("\nMustard at harvest with a thunderstorm forecast");
    render_advice(&engine.evaluate(&storm, "Mustard", Some(&CropStage::Harvesting)));

    let profile = FarmerProfile {
        age: Some(34),
        gender: Some("Female".to_string()),
        land_holding_acres: Some(2.5),
        is_loanee: Some(true),
    };
    println!("\nScheme eligibility for a 34 year old woman in Rajasthan with 2.5 acres");
    let lookup = knowledge.scheme_directory().lookup(&profile, "Rajasthan", None);
    println!("{}", format_schemes(&lookup));

    println!("Loan and subsidy suggestions (age 34, 2.5 acres)");
    render_loans(&suggest_loans(34, LandHoldingBand::from_acres(2.5)));

    let recommendation = recommend_crops("Udaipur", "Rajasthan");
    println!(
        "\nCrops for {}, {}: {}",
        recommendation.city, recommendation.state, recommendation.agro_climatic_zone
    );
    println!("- {}", recommendation.recommended_crops.join(", "));

    let guide = FertilizerGuide::standard();
    println!("\nFertilizer guidance for Wheat");
    for soil in SoilType::ordered() {
        match guide.recommend("Wheat", soil) {
            Ok(text) => println!("- {soil}: {text}"),
            Err(err) => println!("- {soil}: {err}"),
        }
    }

    println!("\nSeasonal crop calendar");
    for season in Season::ordered() {
        println!("- {}: {}", season.label(), season.crops().join(", "));
    }

    if args.skip_mandi {
        return Ok(());
    }

    println!("\nMandi prices (sample report)");
    let board = MandiPriceBoard::from_csv_reader(Cursor::new(SAMPLE_MANDI_CSV))?;
    match board.prices_for("Rajasthan", "Wheat") {
        MandiPriceOutcome::Prices(report) => {
            println!("{}", report.summary);
            for price in &report.prices {
                println!(
                    "  - {} ({}): ₹{} on {}",
                    price.market_name, price.district, price.modal_price, price.arrival_date
                );
            }
        }
        other => println!("{}", other.summary()),
    }

    Ok(())
}

const SAMPLE_MANDI_CSV: &str = "state,district,market,commodity,modal_price,arrival_date
Rajasthan,Kota,Kota,Wheat,2450.00,17/10/2026
Rajasthan,Udaipur,Udaipur (Grain),Wheat,2310,17/10/2026
Rajasthan,Pali,Sojat Road,Wheat,0,17/10/2026
Rajasthan,Bundi,Bundi,Wheat,2395,16/10/2026
";

fn render_advice(advice: &[AdviceItem]) {
    for item in advice {
        println!("  {} [{}] {}", item.emoji, item.severity, item.text);
    }
}

fn render_loans(suggestions: &LoanSuggestions) {
    if let Some(message) = suggestions.message {
        println!("- {message}");
        return;
    }
    for scheme in &suggestions.schemes {
        println!("- {scheme}");
    }
}
