//! Aggregator shapes turning a windowed record into a scalar score.
//!
//! Every program resolves to exactly one [`FormulaShape`]; the shape carries
//! its category parameters while the conversion table and cutoff live on the
//! program configuration.

mod best_pick;
mod blend;
mod top_n;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::domain::{Category, SubjectRecord};
use super::table::ConversionTable;
use super::window::WindowedRecord;

pub use blend::capped_units;

pub(crate) const DEFAULT_PER_CATEGORY: usize = 3;

fn default_per_category() -> usize {
    DEFAULT_PER_CATEGORY
}

/// Closed set of aggregation strategies a program can be scored with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormulaShape {
    /// Unit-weighted regular average blended with the elective average.
    Blend { categories: BTreeSet<Category> },
    /// Core categories plus the strongest of several candidate categories.
    BestPick {
        core: BTreeSet<Category>,
        candidates: Vec<Category>,
    },
    /// Best `per_category` subjects by rank per category, counted not weighted.
    TopNPerGroup {
        core: BTreeSet<Category>,
        substitutes: Vec<Category>,
        #[serde(default = "default_per_category")]
        per_category: usize,
    },
}

impl FormulaShape {
    pub const fn label(&self) -> &'static str {
        match self {
            FormulaShape::Blend { .. } => "blend",
            FormulaShape::BestPick { .. } => "best_pick",
            FormulaShape::TopNPerGroup { .. } => "top_n_per_group",
        }
    }

    pub fn aggregate(&self, window: &WindowedRecord<'_>, table: &ConversionTable) -> Aggregate {
        match self {
            FormulaShape::Blend { categories } => blend::score(window, categories, table),
            FormulaShape::BestPick { core, candidates } => {
                best_pick::score(&window.regular, core, candidates, table)
            }
            FormulaShape::TopNPerGroup {
                core,
                substitutes,
                per_category,
            } => top_n::score(&window.regular, core, substitutes, *per_category, table),
        }
    }
}

/// Scalar produced by an aggregator together with how many subjects fed it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Aggregate {
    pub score: f64,
    pub counted: usize,
}

/// Running point/unit/subject totals for one category or tier.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct Tally {
    pub points: f64,
    pub units: f64,
    pub counted: usize,
}

impl Tally {
    pub fn add(&mut self, points: f64, units: f64) {
        self.points += points;
        self.units += units;
        self.counted += 1;
    }

    pub fn merge(&mut self, other: &Tally) {
        self.points += other.points;
        self.units += other.units;
        self.counted += other.counted;
    }

    pub fn per_unit(&self) -> f64 {
        if self.units > 0.0 {
            self.points / self.units
        } else {
            0.0
        }
    }

    pub fn per_subject(&self) -> f64 {
        if self.counted > 0 {
            self.points / self.counted as f64
        } else {
            0.0
        }
    }

    /// More units wins; equal units fall back to more points.
    pub fn outranks(&self, other: &Tally) -> bool {
        self.units > other.units || (self.units == other.units && self.points > other.points)
    }
}

/// Unit-weighted rank points of the ranked records whose label passes `accept`.
pub(crate) fn weighted_rank_tally<F>(
    records: &[&SubjectRecord],
    table: &ConversionTable,
    accept: F,
) -> Tally
where
    F: Fn(&str) -> bool,
{
    let mut tally = Tally::default();
    for record in records {
        if !accept(&record.category_code) {
            continue;
        }
        let Some(points) = record.scored_rank().and_then(|rank| table.rank_points(rank)) else {
            continue;
        };
        tally.add(record.units * points, record.units);
    }
    tally
}

/// First tally in declaration order that no later one outranks.
pub(crate) fn pick_leader<'a, I>(tallies: I) -> Option<(Category, Tally)>
where
    I: IntoIterator<Item = (Category, &'a Tally)>,
{
    let mut leader: Option<(Category, Tally)> = None;
    for (category, tally) in tallies {
        match &leader {
            Some((_, best)) if !tally.outranks(best) => {}
            _ => leader = Some((category, *tally)),
        }
    }
    leader
}
