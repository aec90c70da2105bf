use std::collections::BTreeSet;

use super::super::classifier::matches_any;
use super::super::domain::Category;
use super::super::table::ConversionTable;
use super::super::window::WindowedRecord;
use super::{weighted_rank_tally, Aggregate, Tally};

const REGULAR_WEIGHT: f64 = 0.9;
const UNIT_CAP: f64 = 100.0;
const UNIT_DIVISOR: f64 = 1000.0;
const BASE_MULTIPLIER: f64 = 0.9;

/// Combined instructional weight, capped at 100 units.
pub fn capped_units(regular_units: f64, elective_units: f64) -> f64 {
    (regular_units + elective_units).min(UNIT_CAP)
}

pub(crate) fn score(
    window: &WindowedRecord<'_>,
    categories: &BTreeSet<Category>,
    table: &ConversionTable,
) -> Aggregate {
    let regular = weighted_rank_tally(&window.regular, table, |label| {
        matches_any(label, categories)
    });

    let mut elective = Tally::default();
    for record in &window.elective {
        if !matches_any(&record.category_code, categories) {
            continue;
        }
        let Some(points) = record
            .achievement
            .and_then(|achievement| table.achievement_points(achievement))
        else {
            continue;
        };
        elective.add(record.units * points, record.units);
    }

    let total_units = capped_units(regular.units, elective.units);
    let score = (regular.per_unit() * REGULAR_WEIGHT + elective.per_unit())
        * (total_units / UNIT_DIVISOR + BASE_MULTIPLIER);

    Aggregate {
        score,
        counted: regular.counted + elective.counted,
    }
}
