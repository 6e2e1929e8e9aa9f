use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::Hash;

pub const NOT_ELIGIBLE_MESSAGE: &str =
    "Not eligible for current subsidies based on given inputs.";

const YOUTH_AGE_LIMIT: u8 = 40;
const SENIOR_AGE: u8 = 60;

/// Land-holding bracket used by the loan and subsidy checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LandHoldingBand {
    /// Under one acre.
    Marginal,
    /// One to five acres.
    Small,
    /// Above five acres.
    Large,
}

impl LandHoldingBand {
    pub fn from_acres(acres: f64) -> Self {
        if acres < 1.0 {
            Self::Marginal
        } else if acres <= 5.0 {
            Self::Small
        } else {
            Self::Large
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Marginal => "<1",
            Self::Small => "1-5",
            Self::Large => ">5",
        }
    }

    fn schemes(self) -> &'static [&'static str] {
        match self {
            Self::Marginal => &[
                "PM-KISAN",
                "KALIA Scheme (Odisha)",
                "YSR Rythu Bharosa (Andhra Pradesh)",
                "Mukhya Mantri Krishi Ashirwad (Jharkhand)",
            ],
            Self::Small => &[
                "NABARD Subsidized Loans",
                "Solar Pump Subsidy",
                "Crop Insurance Scheme (PMFBY)",
                "Fasal Bima Yojana",
            ],
            Self::Large => &[
                "NABARD Long-Term Projects",
                "Warehouse Construction Loans",
                "Tractor Subsidy Scheme",
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoanSuggestions {
    pub age: u8,
    pub land_holding: LandHoldingBand,
    pub schemes: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

/// Age- and holding-based loan/subsidy suggestions, age rules first, with
/// repeats dropped after their first mention.
pub fn suggest_loans(age: u8, land_holding: LandHoldingBand) -> LoanSuggestions {
    let age_schemes: &[&'static str] = if age < YOUTH_AGE_LIMIT {
        &["Kisan Credit Card (KCC)", "PM-KISAN", "Youth Agri Loan (NABARD)"]
    } else if age >= SENIOR_AGE {
        &["Senior Farmer Pension Scheme"]
    } else {
        &[]
    };

    let schemes = dedup_preserving_order(
        age_schemes
            .iter()
            .chain(land_holding.schemes())
            .copied(),
    );
    let message = schemes.is_empty().then_some(NOT_ELIGIBLE_MESSAGE);

    LoanSuggestions {
        age,
        land_holding,
        schemes,
        message,
    }
}

/// Keeps the first occurrence of each item in input order.
pub fn dedup_preserving_order<T, I>(items: I) -> Vec<T>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}
