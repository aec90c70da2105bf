use std::collections::BTreeSet;

use super::super::classifier::{matches, matches_any};
use super::super::domain::{Category, SubjectRecord};
use super::super::table::ConversionTable;
use super::{pick_leader, weighted_rank_tally, Aggregate};

pub(crate) fn score(
    records: &[&SubjectRecord],
    core: &BTreeSet<Category>,
    candidates: &[Category],
    table: &ConversionTable,
) -> Aggregate {
    let mut total = weighted_rank_tally(records, table, |label| matches_any(label, core));

    let candidate_tallies: Vec<_> = candidates
        .iter()
        .map(|category| {
            // records already counted in core never feed a candidate
            let tally = weighted_rank_tally(records, table, |label| {
                matches(label, *category) && !matches_any(label, core)
            });
            (*category, tally)
        })
        .collect();

    if let Some((_, best)) = pick_leader(
        candidate_tallies
            .iter()
            .map(|(category, tally)| (*category, tally)),
    ) {
        total.merge(&best);
    }

    Aggregate {
        score: total.per_unit(),
        counted: total.counted,
    }
}
