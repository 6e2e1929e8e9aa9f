use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What the farmer told us about themselves. Every field is optional and an
/// absent field never disqualifies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FarmerProfile {
    #[serde(default)]
    pub age: Option<u8>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub land_holding_acres: Option<f64>,
    #[serde(default)]
    pub is_loanee: Option<bool>,
}

/// Constraints a scheme places on applicants. Unset constraints are
/// non-restrictive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EligibilityCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_land_holding_acres: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_loanee: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemeRecord {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub benefits: String,
    #[serde(default)]
    pub eligibility_criteria: EligibilityCriteria,
}

/// One language's scheme table: national schemes plus schemes keyed by
/// state name. Keys match case-insensitively per word.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemeCatalog {
    #[serde(default)]
    pub national_schemes: Vec<SchemeRecord>,
    #[serde(default)]
    pub state_specific_schemes: BTreeMap<String, Vec<SchemeRecord>>,
}

impl SchemeCatalog {
    pub fn is_empty(&self) -> bool {
        self.national_schemes.is_empty()
            && self.state_specific_schemes.values().all(Vec::is_empty)
    }

    pub fn state_schemes(&self, jurisdiction: &str) -> &[SchemeRecord] {
        let wanted = title_case(jurisdiction);
        self.state_specific_schemes
            .iter()
            .find(|(state, _)| title_case(state) == wanted)
            .map(|(_, schemes)| schemes.as_slice())
            .unwrap_or(&[])
    }

    /// National schemes followed by the jurisdiction's own, each in table order.
    pub fn applicable(&self, jurisdiction: &str) -> impl Iterator<Item = &SchemeRecord> {
        self.national_schemes
            .iter()
            .chain(self.state_schemes(jurisdiction))
    }
}

/// Scheme catalogs per language, with a fallback language for requests in a
/// language we hold no table for.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemeLibrary {
    catalogs: BTreeMap<String, SchemeCatalog>,
    default_language: String,
}

impl Default for SchemeLibrary {
    fn default() -> Self {
        Self::new("en")
    }
}

impl SchemeLibrary {
    pub fn new(default_language: impl Into<String>) -> Self {
        Self {
            catalogs: BTreeMap::new(),
            default_language: default_language.into().to_ascii_lowercase(),
        }
    }

    pub fn with_catalog(mut self, language: &str, catalog: SchemeCatalog) -> Self {
        self.insert(language, catalog);
        self
    }

    pub fn insert(&mut self, language: &str, catalog: SchemeCatalog) {
        self.catalogs.insert(language.to_ascii_lowercase(), catalog);
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.catalogs.keys().map(String::as_str)
    }

    /// Catalog for `language`, or the default language's when it is missing.
    pub fn catalog(&self, language: Option<&str>) -> Option<&SchemeCatalog> {
        self.catalogs.get(self.served_language(language))
    }

    /// Language code whose table answers a request for `language`.
    pub fn served_language(&self, language: Option<&str>) -> &str {
        language
            .map(|code| code.trim().to_ascii_lowercase())
            .and_then(|code| self.catalogs.get_key_value(&code))
            .map(|(code, _)| code.as_str())
            .unwrap_or(self.default_language.as_str())
    }
}

/// Title-cases each alphabetic run the way state keys are stored:
/// `"uttar pradesh"` → `"Uttar Pradesh"`, `"TAMIL NADU"` → `"Tamil Nadu"`.
pub fn title_case(raw: &str) -> String {
    let mut result = String::with_capacity(raw.len());
    let mut at_word_start = true;
    for ch in raw.trim().chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                result.extend(ch.to_uppercase());
            } else {
                result.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            result.push(ch);
            at_word_start = true;
        }
    }
    result
}
