use super::common::{elective, regular, school_record};
use crate::scoring::domain::{Achievement, Cutoff};
use crate::scoring::window::{filter_by_window, WindowedRecord};

fn every_term() -> Vec<crate::scoring::domain::SubjectRecord> {
    vec![
        regular(1, 1, "국어", Some(1), 4.0),
        regular(1, 2, "국어", Some(2), 4.0),
        regular(2, 1, "국어", Some(3), 4.0),
        regular(2, 2, "국어", Some(4), 4.0),
        regular(3, 1, "국어", Some(5), 4.0),
        regular(3, 2, "국어", Some(6), 4.0),
    ]
}

#[test]
fn keeps_records_through_the_cutoff_term() {
    let records = every_term();
    let kept = filter_by_window(&records, Cutoff::new(2, 1));

    let terms: Vec<_> = kept.iter().map(|r| (r.grade, r.semester)).collect();
    assert_eq!(terms, vec![(1, 1), (1, 2), (2, 1)]);
}

#[test]
fn preserves_input_order() {
    let mut records = every_term();
    records.reverse();
    let kept = filter_by_window(&records, Cutoff::new(3, 1));

    let ranks: Vec<_> = kept.iter().map(|r| r.rank).collect();
    assert_eq!(ranks, vec![Some(5), Some(4), Some(3), Some(2), Some(1)]);
}

#[test]
fn extending_the_cutoff_never_removes_records() {
    let records = every_term();
    let cutoffs = [
        Cutoff::new(1, 1),
        Cutoff::new(1, 2),
        Cutoff::new(2, 1),
        Cutoff::new(2, 2),
        Cutoff::new(3, 1),
        Cutoff::new(3, 2),
    ];

    for pair in cutoffs.windows(2) {
        let earlier = filter_by_window(&records, pair[0]);
        let later = filter_by_window(&records, pair[1]);
        assert!(earlier.len() <= later.len());
        for record in &earlier {
            assert!(later.iter().any(|candidate| std::ptr::eq(*candidate, *record)));
        }
    }
}

#[test]
fn applies_the_same_rule_to_electives() {
    let record = school_record(
        every_term(),
        vec![
            elective(2, 2, "음악", Some(Achievement::A), 1.0),
            elective(3, 1, "미술", Some(Achievement::B), 1.0),
        ],
    );

    let window = WindowedRecord::new(&record, Cutoff::new(2, 2));
    assert_eq!(window.regular.len(), 4);
    assert_eq!(window.elective.len(), 1);
    assert_eq!(window.elective[0].category_code, "음악");
}
