//! Integration scenarios for the score conversion workflow.
//!
//! Scenarios go through the public service facade only: a record exported as
//! CSV is imported, scored against registry rules and ranked against a cohort.

use std::collections::HashMap;
use std::io::Cursor;
use std::sync::{Arc, Mutex};

use admission_score::scoring::{
    ProgramKey, ProgramRegistry, RecordSourceError, SchoolRecord, SchoolRecordImporter,
    SchoolRecordSource, ScoreService, StudentId,
};

const EXPORT: &str = "grade,semester,subject,rank,units,raw_score,average,stddev,achievement
1,1,국어,2,4,91,72.5,12.1,
1,1,수학,3,4,88,65.0,15.3,
3,2,영어,1,4,99,70.0,11.0,
";

#[derive(Default)]
struct Records {
    inner: Mutex<HashMap<StudentId, SchoolRecord>>,
}

impl SchoolRecordSource for Records {
    fn school_record(&self, student: &StudentId) -> Result<Option<SchoolRecord>, RecordSourceError> {
        Ok(self
            .inner
            .lock()
            .expect("record mutex poisoned")
            .get(student)
            .cloned())
    }
}

fn registry_document() -> &'static str {
    r#"{
        "programs": [
            {
                "university": "예시대학교",
                "year": 2026,
                "admission": "교과전형",
                "formula": { "type": "blend", "categories": ["korean", "math", "english"] },
                "table": {
                    "rank": [100, 96, 89, 77, 60, 40, 23, 11, 0],
                    "achievement": { "a": 10, "b": 9, "c": 7 }
                },
                "cutoff": { "grade": 3, "semester": 1 },
                "reflection_ratio": "50%"
            }
        ]
    }"#
}

#[test]
fn imported_record_scores_through_registry_rules() {
    let record = SchoolRecordImporter::from_reader(Cursor::new(EXPORT)).expect("export parses");
    let registry =
        ProgramRegistry::from_reader(Cursor::new(registry_document())).expect("registry parses");

    let records = Records::default();
    records
        .inner
        .lock()
        .expect("record mutex poisoned")
        .insert(StudentId("stu-100".to_string()), record);

    let service = ScoreService::new(Arc::new(registry), Arc::new(records));
    let key = ProgramKey::new("예시대학교", 2026, "교과전형", "경영학과");

    let result = service
        .score_student(&StudentId("stu-100".to_string()), &key)
        .expect("student scored");

    // third-grade second-semester English falls outside the window
    assert!(result.success);
    assert_eq!(result.counted_subjects, 2);
    assert!((result.score - 75.591).abs() < 1e-9);
    assert!((result.total_score - 75.591 / 2.0).abs() < 1e-9);

    let summary = service.rank_against_cohort(result.score, &[80.0, result.score, 60.0]);
    assert_eq!(summary.my_rank, 2);
    assert_eq!(summary.same_score_count, 1);
    assert_eq!(summary.peer_count, 3);
}

#[test]
fn registry_file_loads_from_disk() {
    let path = std::env::temp_dir().join(format!(
        "admission-score-registry-{}.json",
        std::process::id()
    ));
    std::fs::write(&path, registry_document()).expect("write registry fixture");

    let registry = ProgramRegistry::from_path(&path).expect("registry loads");
    std::fs::remove_file(&path).ok();

    assert_eq!(registry.len(), 1);
    assert!(ProgramRegistry::from_path(path).is_err());
}
