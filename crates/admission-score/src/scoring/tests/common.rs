use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::scoring::domain::{
    Achievement, Category, Cutoff, ElectiveSubjectRecord, SchoolRecord, StudentId, SubjectRecord,
};
use crate::scoring::formula::FormulaShape;
use crate::scoring::registry::{DepartmentMatch, ProgramFormulaConfig, ProgramRegistry};
use crate::scoring::service::{RecordSourceError, SchoolRecordSource, ScoreService};
use crate::scoring::table::ConversionTable;

pub(super) fn regular(
    grade: u8,
    semester: u8,
    label: &str,
    rank: Option<u8>,
    units: f64,
) -> SubjectRecord {
    SubjectRecord {
        grade,
        semester,
        category_code: label.to_string(),
        rank,
        units,
        raw_score: None,
        average: None,
        stddev: None,
    }
}

pub(super) fn elective(
    grade: u8,
    semester: u8,
    label: &str,
    achievement: Option<Achievement>,
    units: f64,
) -> ElectiveSubjectRecord {
    ElectiveSubjectRecord {
        grade,
        semester,
        category_code: label.to_string(),
        achievement,
        units,
    }
}

pub(super) fn school_record(
    regular_subjects: Vec<SubjectRecord>,
    elective_subjects: Vec<ElectiveSubjectRecord>,
) -> SchoolRecord {
    SchoolRecord {
        regular_subjects,
        elective_subjects,
    }
}

pub(super) fn categories(values: &[Category]) -> BTreeSet<Category> {
    values.iter().copied().collect()
}

/// Two first-grade subjects scored on the blended table.
pub(super) fn korean_math_record() -> SchoolRecord {
    school_record(
        vec![
            regular(1, 1, "Korean", Some(2), 4.0),
            regular(1, 1, "Math", Some(3), 4.0),
        ],
        Vec::new(),
    )
}

pub(super) fn blend_program(university: &str, departments: DepartmentMatch) -> ProgramFormulaConfig {
    ProgramFormulaConfig {
        university: university.to_string(),
        year: 2026,
        admission: "학생부교과".to_string(),
        departments,
        formula: FormulaShape::Blend {
            categories: categories(&[Category::Korean, Category::Math]),
        },
        table: ConversionTable::blended(),
        cutoff: Cutoff::new(3, 1),
        reflection_ratio: 100.0,
    }
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[derive(Default, Clone)]
pub(super) struct MemoryRecords {
    records: Arc<Mutex<HashMap<StudentId, SchoolRecord>>>,
}

impl MemoryRecords {
    pub(super) fn with(student: &str, record: SchoolRecord) -> Self {
        let source = Self::default();
        source
            .records
            .lock()
            .expect("record mutex poisoned")
            .insert(StudentId(student.to_string()), record);
        source
    }
}

impl SchoolRecordSource for MemoryRecords {
    fn school_record(&self, student: &StudentId) -> Result<Option<SchoolRecord>, RecordSourceError> {
        let guard = self.records.lock().expect("record mutex poisoned");
        Ok(guard.get(student).cloned())
    }
}

pub(super) struct UnavailableRecords;

impl SchoolRecordSource for UnavailableRecords {
    fn school_record(&self, _student: &StudentId) -> Result<Option<SchoolRecord>, RecordSourceError> {
        Err(RecordSourceError::Unavailable("record store offline".to_string()))
    }
}

pub(super) fn build_service(records: MemoryRecords) -> ScoreService<MemoryRecords> {
    ScoreService::new(Arc::new(ProgramRegistry::standard()), Arc::new(records))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
