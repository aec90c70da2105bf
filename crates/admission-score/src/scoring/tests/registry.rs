use std::io::Cursor;

use super::common::*;
use crate::scoring::domain::{Category, ProgramKey};
use crate::scoring::formula::FormulaShape;
use crate::scoring::registry::{DepartmentMatch, ProgramRegistry};
use crate::scoring::service::ScoringError;

#[test]
fn empty_registry_reports_missing_formula() {
    let registry = ProgramRegistry::new();
    let key = ProgramKey::new("미대X", 2030, "없는전형", "없는학과");

    match registry.resolve(&key) {
        Err(ScoringError::ConfigNotFound(missing)) => assert_eq!(missing, key),
        other => panic!("expected missing formula, got {other:?}"),
    }
}

#[test]
fn exact_department_beats_membership_and_wildcard() {
    let registry = ProgramRegistry::with_programs([
        blend_program("한빛대학교", DepartmentMatch::Any),
        blend_program(
            "한빛대학교",
            DepartmentMatch::OneOf {
                names: ["수학과", "물리학과"].into_iter().map(String::from).collect(),
            },
        ),
        blend_program(
            "한빛대학교",
            DepartmentMatch::Exact {
                name: "수학과".to_string(),
            },
        ),
    ]);

    let resolve = |department: &str| {
        registry
            .resolve(&ProgramKey::new("한빛대학교", 2026, "학생부교과", department))
            .expect("rule resolves")
            .departments
            .clone()
    };

    assert!(matches!(resolve("수학과"), DepartmentMatch::Exact { .. }));
    assert!(matches!(resolve("물리학과"), DepartmentMatch::OneOf { .. }));
    assert_eq!(resolve("경영학과"), DepartmentMatch::Any);
}

#[test]
fn buckets_require_exact_university_year_and_admission() {
    let registry = ProgramRegistry::with_programs([blend_program("한빛대학교", DepartmentMatch::Any)]);

    for key in [
        ProgramKey::new("한빛대", 2026, "학생부교과", "경영학과"),
        ProgramKey::new("한빛대학교", 2025, "학생부교과", "경영학과"),
        ProgramKey::new("한빛대학교", 2026, "학생부종합", "경영학과"),
    ] {
        assert!(registry.resolve(&key).is_err(), "{key} should not resolve");
    }
}

#[test]
fn standard_catalogue_dispatches_by_department() {
    let registry = ProgramRegistry::standard();

    let medicine = registry
        .resolve(&ProgramKey::new("한빛대학교", 2026, "학생부교과(지역균형)", "의예과"))
        .expect("medicine rule");
    match &medicine.formula {
        FormulaShape::Blend { categories } => assert!(!categories.contains(&Category::Social)),
        other => panic!("expected blend, got {other:?}"),
    }

    let history = registry
        .resolve(&ProgramKey::new("새솔대학교", 2026, "교과우수자", "사학과"))
        .expect("history rule");
    match &history.formula {
        FormulaShape::BestPick { core, .. } => assert_eq!(core.len(), 2),
        other => panic!("expected best pick, got {other:?}"),
    }

    assert_eq!(registry.len(), registry.programs().len());
}

#[test]
fn loads_rules_from_json() {
    let document = r#"{
        "programs": [
            {
                "university": "다온대학교",
                "year": 2026,
                "admission": "교과성적우수",
                "departments": { "match": "exact", "name": "화학과" },
                "formula": { "type": "top_n_per_group", "core": ["korean", "math"], "substitutes": ["science"] },
                "table": "ten_point",
                "cutoff": { "grade": 3, "semester": 1 },
                "reflection_ratio": "80%"
            },
            {
                "university": "다온대학교",
                "year": 2026,
                "admission": "교과성적우수",
                "formula": { "type": "blend", "categories": ["korean", "english"] },
                "table": {
                    "rank": [100, 98, 95, 90, 85, 80, 70, 50, 0],
                    "achievement": { "a": 10, "b": 9, "c": 8 }
                },
                "cutoff": { "grade": 2, "semester": 2 },
                "reflection_ratio": "n/a"
            }
        ]
    }"#;

    let registry = ProgramRegistry::from_reader(Cursor::new(document)).expect("registry parses");
    assert_eq!(registry.len(), 2);

    let chemistry = registry
        .resolve(&ProgramKey::new("다온대학교", 2026, "교과성적우수", "화학과"))
        .expect("chemistry rule");
    assert_eq!(chemistry.reflection_ratio, 80.0);
    match &chemistry.formula {
        FormulaShape::TopNPerGroup { per_category, .. } => assert_eq!(*per_category, 3),
        other => panic!("expected top n, got {other:?}"),
    }

    let fallback = registry
        .resolve(&ProgramKey::new("다온대학교", 2026, "교과성적우수", "영문학과"))
        .expect("fallback rule");
    assert_eq!(fallback.table.rank[1], 98.0);
    assert_eq!(fallback.reflection_ratio, 0.0);
    assert_eq!(fallback.cutoff.grade, 2);
}

#[test]
fn rejects_malformed_documents() {
    let result = ProgramRegistry::from_reader(Cursor::new("{ \"programs\": [ { \"year\": 2026 } ] }"));
    assert!(result.is_err());
}
