use super::domain::{Cutoff, ElectiveSubjectRecord, SchoolRecord, SubjectRecord};

/// Anything recorded against a (grade, semester) term.
pub trait Termed {
    fn grade(&self) -> u8;
    fn semester(&self) -> u8;
}

impl Termed for SubjectRecord {
    fn grade(&self) -> u8 {
        self.grade
    }

    fn semester(&self) -> u8 {
        self.semester
    }
}

impl Termed for ElectiveSubjectRecord {
    fn grade(&self) -> u8 {
        self.grade
    }

    fn semester(&self) -> u8 {
        self.semester
    }
}

/// Keep the records taken up to and including the cutoff term, in input order.
pub fn filter_by_window<'a, T: Termed>(records: &'a [T], cutoff: Cutoff) -> Vec<&'a T> {
    records
        .iter()
        .filter(|record| cutoff.includes(record.grade(), record.semester()))
        .collect()
}

/// Borrowed view of a school record restricted to one reflection window.
#[derive(Debug, Clone)]
pub struct WindowedRecord<'a> {
    pub regular: Vec<&'a SubjectRecord>,
    pub elective: Vec<&'a ElectiveSubjectRecord>,
}

impl<'a> WindowedRecord<'a> {
    pub fn new(record: &'a SchoolRecord, cutoff: Cutoff) -> Self {
        Self {
            regular: filter_by_window(&record.regular_subjects, cutoff),
            elective: filter_by_window(&record.elective_subjects, cutoff),
        }
    }
}
