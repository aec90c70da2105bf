use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use super::domain::{Achievement, ElectiveSubjectRecord, SchoolRecord, SubjectRecord};
use super::numeric::{parse_lenient, parse_rank};

/// Failure to read a school record export.
#[derive(Debug, thiserror::Error)]
pub enum RecordImportError {
    #[error("failed to read school record export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid school record CSV data: {0}")]
    Csv(#[from] csv::Error),
}

/// Builds a [`SchoolRecord`] from a flat per-subject CSV export.
///
/// Expected headers: `grade,semester,subject,rank,units,raw_score,average,stddev,achievement`.
/// Rows with an achievement level and no usable rank become electives.
pub struct SchoolRecordImporter;

impl SchoolRecordImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<SchoolRecord, RecordImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<SchoolRecord, RecordImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut record = SchoolRecord::default();

        for row in csv_reader.deserialize::<RecordRow>() {
            let row = row?;
            let rank = row.rank.as_deref().and_then(parse_rank);
            let achievement = row.achievement.as_deref().and_then(Achievement::parse);
            let units = row.units.as_deref().map(parse_lenient).unwrap_or(0.0);

            match (rank, achievement) {
                (None, Some(achievement)) => {
                    record.elective_subjects.push(ElectiveSubjectRecord {
                        grade: row.grade,
                        semester: row.semester,
                        category_code: row.subject,
                        achievement: Some(achievement),
                        units,
                    });
                }
                _ => {
                    record.regular_subjects.push(SubjectRecord {
                        grade: row.grade,
                        semester: row.semester,
                        category_code: row.subject,
                        rank,
                        units,
                        raw_score: row.raw_score.as_deref().map(parse_lenient),
                        average: row.average.as_deref().map(parse_lenient),
                        stddev: row.stddev.as_deref().map(parse_lenient),
                    });
                }
            }
        }

        Ok(record)
    }
}

#[derive(Debug, Deserialize)]
struct RecordRow {
    grade: u8,
    semester: u8,
    subject: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    rank: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    units: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    raw_score: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    average: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    stddev: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    achievement: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
