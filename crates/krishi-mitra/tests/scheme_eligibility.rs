use krishi_mitra::config::DataConfig;
use krishi_mitra::schemes::{
    filter_schemes, format_schemes, EligibilityCriteria, FarmerProfile, SchemeCatalog,
    SchemeDirectory, SchemeLookup, SchemeRecord,
};
use krishi_mitra::KnowledgeBase;
use std::collections::BTreeMap;
use std::path::PathBuf;

fn directory() -> SchemeDirectory {
    let config = DataConfig {
        data_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data"),
        languages: vec!["en".to_string(), "hi".to_string()],
    };
    KnowledgeBase::load(&config).scheme_directory()
}

fn names(lookup: &SchemeLookup) -> Vec<&str> {
    lookup
        .schemes()
        .iter()
        .map(|scheme| scheme.name.as_str())
        .collect()
}

fn holding(acres: f64) -> FarmerProfile {
    FarmerProfile {
        land_holding_acres: Some(acres),
        ..FarmerProfile::default()
    }
}

fn fencing_catalog() -> SchemeCatalog {
    SchemeCatalog {
        national_schemes: Vec::new(),
        state_specific_schemes: BTreeMap::from([(
            "Rajasthan".to_string(),
            vec![SchemeRecord {
                name: "Tarbandi".to_string(),
                description: String::new(),
                benefits: String::new(),
                eligibility_criteria: EligibilityCriteria {
                    min_land_holding_acres: Some(2.0),
                    ..EligibilityCriteria::default()
                },
            }],
        )]),
    }
}

#[test]
fn minimum_holding_excludes_smaller_farms_only() {
    let catalog = fencing_catalog();

    let small = filter_schemes(&holding(1.5), "Rajasthan", Some(&catalog));
    assert!(matches!(small, SchemeLookup::NoMatchingSchemes { .. }));

    let larger = filter_schemes(&holding(2.5), "rajasthan", Some(&catalog));
    assert_eq!(names(&larger), vec!["Tarbandi"]);
}

#[test]
fn absent_gender_never_disqualifies() {
    let lookup = directory().lookup(&FarmerProfile::default(), "Punjab", None);
    assert!(names(&lookup).contains(&"Mahila Kisan Sashaktikaran Pariyojana"));

    let male = FarmerProfile {
        gender: Some("male".to_string()),
        ..FarmerProfile::default()
    };
    let lookup = directory().lookup(&male, "Punjab", None);
    assert!(!names(&lookup).contains(&"Mahila Kisan Sashaktikaran Pariyojana"));
}

#[test]
fn state_schemes_follow_national_ones_for_matching_state() {
    let lookup = directory().lookup(&holding(2.5), "  rajasthan ", Some("en"));
    let names = names(&lookup);

    assert_eq!(names[0], "PM-KISAN");
    assert!(names.contains(&"Rajasthan Tarbandi Yojana"));
    assert!(!names.contains(&"Punjab Crop Residue Management Scheme"));
}

#[test]
fn loanee_flag_must_match_when_given() {
    let non_loanee = FarmerProfile {
        is_loanee: Some(false),
        ..FarmerProfile::default()
    };
    let lookup = directory().lookup(&non_loanee, "Rajasthan", None);
    assert!(!names(&lookup)
        .iter()
        .any(|name| name.contains("PMFBY")));
}

#[test]
fn hindi_table_is_served_when_requested() {
    let lookup = directory().lookup(&FarmerProfile::default(), "Rajasthan", Some("HI"));
    assert_eq!(names(&lookup)[0], "पीएम-किसान");

    let fallback = directory().lookup(&FarmerProfile::default(), "Rajasthan", Some("ta"));
    assert_eq!(names(&fallback)[0], "PM-KISAN");
}

#[test]
fn empty_table_reports_no_schemes_found() {
    let empty = SchemeCatalog::default();
    let lookup = filter_schemes(&holding(3.0), "Rajasthan", Some(&empty));

    assert!(matches!(lookup, SchemeLookup::NoSchemeData { .. }));
    assert!(lookup.schemes().is_empty());
    assert!(format_schemes(&lookup).starts_with("No schemes found"));

    let missing = filter_schemes(&holding(3.0), "Rajasthan", None);
    assert_eq!(missing, lookup);
}
