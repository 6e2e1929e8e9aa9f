use super::domain::{EligibilityCriteria, FarmerProfile, SchemeCatalog, SchemeRecord};
use serde::Serialize;

pub const NO_SCHEME_DATA_MESSAGE: &str =
    "No schemes found: scheme data is not currently available for this region.";
pub const NO_MATCH_MESSAGE: &str =
    "No specific schemes found for your profile. Please check general eligibility criteria.";

/// Result of filtering a catalog against a farmer profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SchemeLookup {
    Eligible { schemes: Vec<SchemeRecord> },
    /// Schemes exist for the jurisdiction but the profile conflicts with all of them.
    NoMatchingSchemes { message: &'static str },
    /// No scheme table was loaded or it holds nothing for the jurisdiction.
    NoSchemeData { message: &'static str },
}

impl SchemeLookup {
    pub fn schemes(&self) -> &[SchemeRecord] {
        match self {
            Self::Eligible { schemes } => schemes,
            Self::NoMatchingSchemes { .. } | Self::NoSchemeData { .. } => &[],
        }
    }

    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::Eligible { .. } => None,
            Self::NoMatchingSchemes { message } | Self::NoSchemeData { message } => Some(*message),
        }
    }
}

/// A scheme stays eligible unless a criterion the scheme sets conflicts with
/// a value the farmer supplied.
pub fn is_eligible(scheme: &SchemeRecord, profile: &FarmerProfile) -> bool {
    let EligibilityCriteria {
        gender,
        min_land_holding_acres,
        is_loanee,
    } = &scheme.eligibility_criteria;

    if let (Some(required), Some(actual)) = (gender, &profile.gender) {
        if !required.trim().eq_ignore_ascii_case(actual.trim()) {
            return false;
        }
    }

    if let (Some(minimum), Some(holding)) = (min_land_holding_acres, profile.land_holding_acres) {
        if holding < *minimum {
            return false;
        }
    }

    if let (Some(required), Some(actual)) = (is_loanee, profile.is_loanee) {
        if *required != actual {
            return false;
        }
    }

    true
}

/// Filters `catalog` to the schemes `profile` qualifies for under
/// `jurisdiction`, keeping national schemes ahead of state ones.
pub fn filter_schemes(
    profile: &FarmerProfile,
    jurisdiction: &str,
    catalog: Option<&SchemeCatalog>,
) -> SchemeLookup {
    let Some(catalog) = catalog else {
        return SchemeLookup::NoSchemeData {
            message: NO_SCHEME_DATA_MESSAGE,
        };
    };

    let mut applicable = catalog.applicable(jurisdiction).peekable();
    if applicable.peek().is_none() {
        return SchemeLookup::NoSchemeData {
            message: NO_SCHEME_DATA_MESSAGE,
        };
    }

    let schemes: Vec<SchemeRecord> = applicable
        .filter(|scheme| is_eligible(scheme, profile))
        .cloned()
        .collect();

    if schemes.is_empty() {
        SchemeLookup::NoMatchingSchemes {
            message: NO_MATCH_MESSAGE,
        }
    } else {
        SchemeLookup::Eligible { schemes }
    }
}

/// Numbered text block for display or text-to-speech.
pub fn format_schemes(lookup: &SchemeLookup) -> String {
    let schemes = match lookup {
        SchemeLookup::Eligible { schemes } => schemes,
        SchemeLookup::NoMatchingSchemes { message } | SchemeLookup::NoSchemeData { message } => {
            return (*message).to_string();
        }
    };

    let mut text = String::from("🎯 You are eligible for the following government schemes:\n\n");
    for (index, scheme) in schemes.iter().enumerate() {
        let description = non_empty_or(&scheme.description, "No description available");
        let benefits = non_empty_or(&scheme.benefits, "Benefits not specified");
        text.push_str(&format!("**{}. {}**\n", index + 1, scheme.name));
        text.push_str(&format!("📋 Description: {description}\n"));
        text.push_str(&format!("💰 Benefits: {benefits}\n\n"));
    }
    text
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}
