//! Admission score conversion engine.
//!
//! A school record is cut to the program's reflection window, classified into
//! subject categories and aggregated by one of the formula shapes selected
//! through the program registry. Everything here is pure over its inputs.

pub mod classifier;
pub mod cohort;
pub mod domain;
pub mod formula;
pub mod import;
pub mod numeric;
pub mod registry;
pub mod router;
pub mod service;
pub mod table;
pub mod window;

#[cfg(test)]
mod tests;

pub use classifier::classify;
pub use cohort::{rank_against_cohort, RankingSummary, DEFAULT_SCORE_EPSILON};
pub use domain::{
    Achievement, Category, Cutoff, ElectiveSubjectRecord, ProgramKey, SchoolRecord, ScoreResult,
    StudentId, SubjectRecord,
};
pub use formula::{Aggregate, FormulaShape};
pub use import::{RecordImportError, SchoolRecordImporter};
pub use registry::{
    DepartmentMatch, ProgramFormulaConfig, ProgramRegistry, ProgramSummary, RegistryError,
};
pub use router::{scoring_router, CohortRankRequest, ScoreRequest, StudentScoreRequest};
pub use service::{
    score_program, RecordSourceError, SchoolRecordSource, ScoreService, ScoringError,
};
pub use table::{AchievementPoints, ConversionTable};
pub use window::{filter_by_window, Termed, WindowedRecord};
