use krishi_mitra::config::AppConfig;
use krishi_mitra::error::AppError;
use krishi_mitra::telemetry;
use krishi_mitra::KnowledgeBase;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Environment configuration with the CLI data directory applied on top.
pub(crate) fn load_config(data_dir: Option<PathBuf>) -> Result<AppConfig, AppError> {
    let mut config = AppConfig::load()?;
    if let Some(data_dir) = data_dir {
        config.data.data_dir = data_dir;
    }
    Ok(config)
}

pub(crate) fn load_knowledge(data_dir: Option<PathBuf>) -> Result<KnowledgeBase, AppError> {
    let config = load_config(data_dir)?;
    Ok(KnowledgeBase::load(&config.data))
}

/// Logs for the one-shot commands go to stderr so stdout stays the report.
pub(crate) fn init_cli_telemetry() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init_stderr(&config.telemetry)?;
    Ok(())
}
