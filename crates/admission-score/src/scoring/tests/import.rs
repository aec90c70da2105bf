use std::io::Cursor;

use crate::scoring::domain::Achievement;
use crate::scoring::import::SchoolRecordImporter;

const EXPORT: &str = "grade,semester,subject,rank,units,raw_score,average,stddev,achievement
1,1,국어,2,4,91,72.5,12.1,
1,1,수학,3,4,88,65.0,15.3,
1,2,음악,,1,,,,A
2,1,진로와 직업,P,1,,,,
2,1,영어,1,abc,97,70.1,10.0,
";

#[test]
fn splits_rows_into_regular_and_elective_records() {
    let record = SchoolRecordImporter::from_reader(Cursor::new(EXPORT)).expect("export parses");

    assert_eq!(record.regular_subjects.len(), 4);
    assert_eq!(record.elective_subjects.len(), 1);

    let korean = &record.regular_subjects[0];
    assert_eq!(korean.category_code, "국어");
    assert_eq!(korean.rank, Some(2));
    assert_eq!(korean.units, 4.0);
    assert_eq!(korean.average, Some(72.5));

    let music = &record.elective_subjects[0];
    assert_eq!(music.achievement, Some(Achievement::A));
    assert_eq!(music.units, 1.0);
}

#[test]
fn malformed_numbers_normalize_instead_of_failing() {
    let record = SchoolRecordImporter::from_reader(Cursor::new(EXPORT)).expect("export parses");

    let career = &record.regular_subjects[2];
    assert_eq!(career.rank, None);
    assert_eq!(career.raw_score, None);

    let english = &record.regular_subjects[3];
    assert_eq!(english.units, 0.0);
    assert_eq!(english.rank, Some(1));
}

#[test]
fn rejects_rows_with_invalid_terms() {
    let export = "grade,semester,subject,rank,units\nfirst,1,국어,2,4\n";
    assert!(SchoolRecordImporter::from_reader(Cursor::new(export)).is_err());
}
