use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for students whose records are held by the record store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StudentId(pub String);

/// Subject category a label can be classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Korean,
    Math,
    English,
    Social,
    Science,
    History,
    TechHome,
    SecondLanguage,
    Arts,
    PhysicalEducation,
}

impl Category {
    pub const fn label(self) -> &'static str {
        match self {
            Category::Korean => "korean",
            Category::Math => "math",
            Category::English => "english",
            Category::Social => "social",
            Category::Science => "science",
            Category::History => "history",
            Category::TechHome => "tech_home",
            Category::SecondLanguage => "second_language",
            Category::Arts => "arts",
            Category::PhysicalEducation => "physical_education",
        }
    }
}

/// Qualitative achievement level recorded for elective subjects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Achievement {
    A,
    B,
    C,
    D,
    E,
}

impl Achievement {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "A" | "a" => Some(Self::A),
            "B" | "b" => Some(Self::B),
            "C" | "c" => Some(Self::C),
            "D" | "d" => Some(Self::D),
            "E" | "e" => Some(Self::E),
            _ => None,
        }
    }
}

/// One rank-graded subject taken in one semester.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectRecord {
    pub grade: u8,
    pub semester: u8,
    pub category_code: String,
    #[serde(default)]
    pub rank: Option<u8>,
    pub units: f64,
    #[serde(default)]
    pub raw_score: Option<f64>,
    #[serde(default)]
    pub average: Option<f64>,
    #[serde(default)]
    pub stddev: Option<f64>,
}

impl SubjectRecord {
    /// Rank usable for table lookup, if it falls inside 1..=9.
    pub fn scored_rank(&self) -> Option<u8> {
        self.rank.filter(|rank| (1..=9).contains(rank))
    }
}

/// Achievement-graded elective taken in one semester.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElectiveSubjectRecord {
    pub grade: u8,
    pub semester: u8,
    pub category_code: String,
    #[serde(default)]
    pub achievement: Option<Achievement>,
    pub units: f64,
}

/// Normalized school record snapshot handed to the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchoolRecord {
    #[serde(default)]
    pub regular_subjects: Vec<SubjectRecord>,
    #[serde(default)]
    pub elective_subjects: Vec<ElectiveSubjectRecord>,
}

/// (grade, semester) boundary up to which a program counts academic history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cutoff {
    pub grade: u8,
    pub semester: u8,
}

impl Cutoff {
    pub const fn new(grade: u8, semester: u8) -> Self {
        Self { grade, semester }
    }

    pub fn includes(&self, grade: u8, semester: u8) -> bool {
        grade < self.grade || (grade == self.grade && semester <= self.semester)
    }
}

/// Composite key selecting one admission program.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProgramKey {
    pub university: String,
    pub year: u16,
    pub admission: String,
    pub department: String,
}

impl ProgramKey {
    pub fn new(
        university: impl Into<String>,
        year: u16,
        admission: impl Into<String>,
        department: impl Into<String>,
    ) -> Self {
        Self {
            university: university.into(),
            year,
            admission: admission.into(),
            department: department.into(),
        }
    }
}

impl fmt::Display for ProgramKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} / {}",
            self.university, self.year, self.admission, self.department
        )
    }
}

/// Outcome of one score computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub success: bool,
    pub score: f64,
    pub total_score: f64,
    pub counted_subjects: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScoreResult {
    pub fn computed(score: f64, total_score: f64, counted_subjects: usize) -> Self {
        Self {
            success: true,
            score,
            total_score,
            counted_subjects,
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            score: 0.0,
            total_score: 0.0,
            counted_subjects: 0,
            error: Some(message.into()),
        }
    }
}
