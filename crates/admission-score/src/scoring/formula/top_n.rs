use std::collections::{BTreeMap, BTreeSet};

use super::super::classifier::classify;
use super::super::domain::{Category, SubjectRecord};
use super::super::table::ConversionTable;
use super::{pick_leader, Aggregate, Tally};

pub(crate) fn score(
    records: &[&SubjectRecord],
    core: &BTreeSet<Category>,
    substitutes: &[Category],
    per_category: usize,
    table: &ConversionTable,
) -> Aggregate {
    // Stable sort: equal ranks keep record order, unranked records go last.
    let mut ordered: Vec<&SubjectRecord> = records.to_vec();
    ordered.sort_by_key(|record| record.scored_rank().unwrap_or(u8::MAX));

    let mut counters: BTreeMap<Category, usize> = BTreeMap::new();
    let mut total = Tally::default();
    let mut tier: BTreeMap<Category, Tally> = BTreeMap::new();

    for record in ordered {
        let Some(points) = record.scored_rank().and_then(|rank| table.rank_points(rank)) else {
            continue;
        };

        for category in classify(&record.category_code) {
            let in_core = core.contains(&category);
            if !in_core && !substitutes.contains(&category) {
                continue;
            }

            let counter = counters.entry(category).or_default();
            if *counter >= per_category {
                continue;
            }
            *counter += 1;

            if in_core {
                total.add(points, record.units);
            } else {
                tier.entry(category).or_default().add(points, record.units);
            }
        }
    }

    let empty = Tally::default();
    let winner = pick_leader(
        substitutes
            .iter()
            .map(|category| (*category, tier.get(category).unwrap_or(&empty))),
    );
    if let Some((_, best)) = winner {
        total.merge(&best);
    }

    Aggregate {
        score: total.per_subject(),
        counted: total.counted,
    }
}
