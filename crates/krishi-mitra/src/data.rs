//! Startup loading of the static agronomy tables.
//!
//! A missing or malformed table is logged and replaced by an empty one, so
//! the evaluators keep working with reduced coverage.

use crate::advisory::{AdvisoryEngine, CropConditionTable};
use crate::config::DataConfig;
use crate::schemes::{SchemeCatalog, SchemeDirectory, SchemeLibrary};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, DataLoadError> {
    let raw = fs::read_to_string(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| DataLoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn read_json_or_default<T: DeserializeOwned + Default>(path: &Path, table: &str) -> T {
    match read_json(path) {
        Ok(value) => value,
        Err(err) => {
            warn!(table, error = %err, "could not load table; proceeding without it");
            T::default()
        }
    }
}

pub fn load_crop_conditions(path: &Path) -> CropConditionTable {
    read_json_or_default(path, "crop_conditions")
}

pub fn load_scheme_library(config: &DataConfig) -> SchemeLibrary {
    let mut library = SchemeLibrary::new(config.default_language());
    for language in &config.languages {
        let catalog: SchemeCatalog =
            read_json_or_default(&config.schemes_path(language), "govt_schemes");
        if !catalog.is_empty() {
            library.insert(language, catalog);
        }
    }
    library
}

/// Immutable tables shared by every request for the life of the process.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    pub crop_conditions: Arc<CropConditionTable>,
    pub schemes: Arc<SchemeLibrary>,
}

impl KnowledgeBase {
    pub fn new(crop_conditions: CropConditionTable, schemes: SchemeLibrary) -> Self {
        Self {
            crop_conditions: Arc::new(crop_conditions),
            schemes: Arc::new(schemes),
        }
    }

    pub fn load(config: &DataConfig) -> Self {
        let crop_conditions = load_crop_conditions(&config.crop_conditions_path());
        let schemes = load_scheme_library(config);

        info!(
            data_dir = %config.data_dir.display(),
            crops = crop_conditions.len(),
            scheme_languages = schemes.languages().count(),
            "knowledge base loaded"
        );

        Self::new(crop_conditions, schemes)
    }

    pub fn advisory_engine(&self) -> AdvisoryEngine {
        AdvisoryEngine::new(Arc::clone(&self.crop_conditions))
    }

    pub fn scheme_directory(&self) -> SchemeDirectory {
        SchemeDirectory::new(Arc::clone(&self.schemes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn data_config(dir: &Path) -> DataConfig {
        DataConfig {
            data_dir: dir.to_path_buf(),
            languages: vec!["en".to_string(), "hi".to_string()],
        }
    }

    #[test]
    fn missing_directory_degrades_to_empty_tables() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = data_config(&dir.path().join("absent"));

        let knowledge = KnowledgeBase::load(&config);

        assert!(knowledge.crop_conditions.is_empty());
        assert_eq!(knowledge.schemes.languages().count(), 0);
    }

    #[test]
    fn malformed_crop_table_degrades_to_empty() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("crop_conditions.json");
        let mut file = fs::File::create(&path).expect("create file");
        file.write_all(b"{ \"Wheat\": ").expect("write file");

        assert!(matches!(
            read_json::<CropConditionTable>(&path),
            Err(DataLoadError::Json { .. })
        ));
        assert!(load_crop_conditions(&path).is_empty());
    }

    #[test]
    fn loads_catalogs_per_language() {
        let dir = tempfile::tempdir().expect("temp dir");
        fs::write(
            dir.path().join("govt_schemes_en.json"),
            r#"{"national_schemes": [{"name": "PM-KISAN"}], "state_specific_schemes": {}}"#,
        )
        .expect("write en table");
        fs::write(dir.path().join("govt_schemes_hi.json"), "").expect("write empty hi table");

        let library = load_scheme_library(&data_config(dir.path()));

        assert_eq!(library.languages().collect::<Vec<_>>(), vec!["en"]);
        let fallback = library.catalog(Some("hi")).expect("falls back to en");
        assert_eq!(fallback.national_schemes[0].name, "PM-KISAN");
    }
}
