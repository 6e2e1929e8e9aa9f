//! Government scheme eligibility and loan/subsidy suggestions.

pub mod domain;
pub mod eligibility;
pub mod loans;

pub use domain::{
    title_case, EligibilityCriteria, FarmerProfile, SchemeCatalog, SchemeLibrary, SchemeRecord,
};
pub use eligibility::{filter_schemes, format_schemes, is_eligible, SchemeLookup};
pub use loans::{dedup_preserving_order, suggest_loans, LandHoldingBand, LoanSuggestions};

use std::sync::Arc;
use tracing::debug;

/// Stateless filter over the loaded scheme tables.
#[derive(Debug, Clone, Default)]
pub struct SchemeDirectory {
    library: Arc<SchemeLibrary>,
}

impl SchemeDirectory {
    pub fn new(library: Arc<SchemeLibrary>) -> Self {
        Self { library }
    }

    pub fn library(&self) -> &SchemeLibrary {
        &self.library
    }

    pub fn lookup(
        &self,
        profile: &FarmerProfile,
        jurisdiction: &str,
        language: Option<&str>,
    ) -> SchemeLookup {
        let lookup = filter_schemes(profile, jurisdiction, self.library.catalog(language));
        debug!(
            jurisdiction,
            language,
            eligible = lookup.schemes().len(),
            "scheme eligibility evaluated"
        );
        lookup
    }
}
