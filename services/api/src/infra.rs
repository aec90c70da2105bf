use admission_score::config::AppConfig;
use admission_score::error::AppError;
use admission_score::scoring::{
    ProgramRegistry, RecordSourceError, SchoolRecord, SchoolRecordSource, StudentId,
};
use chrono::{Datelike, Local};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryRecordStore {
    records: Arc<Mutex<HashMap<StudentId, SchoolRecord>>>,
}

impl InMemoryRecordStore {
    pub(crate) fn insert(&self, student: StudentId, record: SchoolRecord) {
        let mut guard = self.records.lock().expect("record store mutex poisoned");
        guard.insert(student, record);
    }
}

impl SchoolRecordSource for InMemoryRecordStore {
    fn school_record(&self, student: &StudentId) -> Result<Option<SchoolRecord>, RecordSourceError> {
        let guard = self.records.lock().expect("record store mutex poisoned");
        Ok(guard.get(student).cloned())
    }
}

/// Registry from an explicit path, then `APP_PROGRAMS_PATH`, then the built-in catalogue.
pub(crate) fn load_registry(
    override_path: Option<PathBuf>,
    config: &AppConfig,
) -> Result<ProgramRegistry, AppError> {
    let path = override_path.or_else(|| config.registry.programs_path.clone());
    registry_from(path.as_deref())
}

fn registry_from(path: Option<&Path>) -> Result<ProgramRegistry, AppError> {
    match path {
        Some(path) => {
            let registry = ProgramRegistry::from_path(path)?;
            info!(path = %path.display(), programs = registry.len(), "loaded program registry");
            Ok(registry)
        }
        None => Ok(ProgramRegistry::standard()),
    }
}

/// Admission year assumed when none is given on the command line.
pub(crate) fn current_year() -> u16 {
    u16::try_from(Local::now().year()).unwrap_or(u16::MAX)
}
