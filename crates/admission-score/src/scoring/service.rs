use std::sync::Arc;

use tracing::{debug, info};

use super::cohort::{rank_against_cohort, RankingSummary, DEFAULT_SCORE_EPSILON};
use super::domain::{ProgramKey, SchoolRecord, ScoreResult, StudentId};
use super::registry::{ProgramFormulaConfig, ProgramRegistry};
use super::window::WindowedRecord;

/// Read-only access to normalized school records held by the record store.
pub trait SchoolRecordSource: Send + Sync {
    fn school_record(&self, student: &StudentId) -> Result<Option<SchoolRecord>, RecordSourceError>;
}

/// Error raised by a school record source.
#[derive(Debug, thiserror::Error)]
pub enum RecordSourceError {
    #[error("record source unavailable: {0}")]
    Unavailable(String),
}

/// Error raised by the scoring service.
#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("no formula for this program")]
    ConfigNotFound(ProgramKey),
    #[error("no school record for student {0}")]
    StudentNotFound(String),
    #[error(transparent)]
    Source(#[from] RecordSourceError),
}

/// Score a school record with an already resolved program rule.
pub fn score_program(program: &ProgramFormulaConfig, record: &SchoolRecord) -> ScoreResult {
    let window = WindowedRecord::new(record, program.cutoff);
    let aggregate = program.formula.aggregate(&window, &program.table);
    let total_score = aggregate.score * program.reflection_ratio / 100.0;

    ScoreResult::computed(aggregate.score, total_score, aggregate.counted)
}

/// Service composing the program registry, record source and cohort ranking.
pub struct ScoreService<S> {
    registry: Arc<ProgramRegistry>,
    records: Arc<S>,
    score_epsilon: f64,
}

impl<S> ScoreService<S>
where
    S: SchoolRecordSource + 'static,
{
    pub fn new(registry: Arc<ProgramRegistry>, records: Arc<S>) -> Self {
        Self {
            registry,
            records,
            score_epsilon: DEFAULT_SCORE_EPSILON,
        }
    }

    pub fn with_score_epsilon(mut self, score_epsilon: f64) -> Self {
        self.score_epsilon = score_epsilon;
        self
    }

    pub fn registry(&self) -> &ProgramRegistry {
        &self.registry
    }

    /// Score a record for a program; an unknown program yields a failed result.
    pub fn compute_score(&self, record: &SchoolRecord, program: &ProgramKey) -> ScoreResult {
        match self.registry.resolve(program) {
            Ok(config) => {
                let result = score_program(config, record);
                debug!(
                    %program,
                    formula = config.formula.label(),
                    score = result.score,
                    counted = result.counted_subjects,
                    "computed admission score"
                );
                result
            }
            Err(err) => {
                info!(%program, "no formula registered for program");
                ScoreResult::failure(err.to_string())
            }
        }
    }

    /// Fetch a student's record from the source and score it.
    pub fn score_student(
        &self,
        student: &StudentId,
        program: &ProgramKey,
    ) -> Result<ScoreResult, ScoringError> {
        let record = self
            .records
            .school_record(student)?
            .ok_or_else(|| ScoringError::StudentNotFound(student.0.clone()))?;
        Ok(self.compute_score(&record, program))
    }

    pub fn rank_against_cohort(&self, my_score: f64, peer_scores: &[f64]) -> RankingSummary {
        rank_against_cohort(my_score, peer_scores, self.score_epsilon)
    }
}
