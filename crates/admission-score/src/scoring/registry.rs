use std::collections::{BTreeMap, BTreeSet};
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::domain::{Category, Cutoff, ProgramKey};
use super::formula::FormulaShape;
use super::numeric::lenient_number;
use super::service::ScoringError;
use super::table::ConversionTable;

const FULL_REFLECTION: f64 = 100.0;

fn full_reflection() -> f64 {
    FULL_REFLECTION
}

/// Which departments of an admission bucket a rule applies to.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "match", rename_all = "snake_case")]
pub enum DepartmentMatch {
    #[default]
    Any,
    Exact {
        name: String,
    },
    OneOf {
        names: BTreeSet<String>,
    },
}

impl DepartmentMatch {
    /// Higher is more specific; `None` when the department does not match.
    fn specificity(&self, department: &str) -> Option<u8> {
        match self {
            DepartmentMatch::Exact { name } if name == department => Some(2),
            DepartmentMatch::OneOf { names } if names.contains(department) => Some(1),
            DepartmentMatch::Any => Some(0),
            _ => None,
        }
    }
}

/// Scoring rule for one admission program, looked up and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgramFormulaConfig {
    pub university: String,
    pub year: u16,
    pub admission: String,
    pub departments: DepartmentMatch,
    pub formula: FormulaShape,
    pub table: ConversionTable,
    pub cutoff: Cutoff,
    /// Percentage of the admission total the school record contributes.
    pub reflection_ratio: f64,
}

/// Public listing entry for a registered program rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgramSummary {
    pub university: String,
    pub year: u16,
    pub admission: String,
    pub departments: DepartmentMatch,
    pub formula: &'static str,
    pub cutoff: Cutoff,
    pub reflection_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct BucketKey {
    university: String,
    year: u16,
    admission: String,
}

impl BucketKey {
    fn of(key: &ProgramKey) -> Self {
        Self {
            university: key.university.clone(),
            year: key.year,
            admission: key.admission.clone(),
        }
    }
}

/// Registry of program rules bucketed by (university, year, admission).
#[derive(Debug, Clone, Default)]
pub struct ProgramRegistry {
    buckets: BTreeMap<BucketKey, Vec<ProgramFormulaConfig>>,
}

impl ProgramRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_programs<I>(programs: I) -> Self
    where
        I: IntoIterator<Item = ProgramFormulaConfig>,
    {
        let mut registry = Self::new();
        for program in programs {
            registry.register(program);
        }
        registry
    }

    pub fn register(&mut self, program: ProgramFormulaConfig) {
        if !program.table.is_monotonic() {
            warn!(
                university = %program.university,
                year = program.year,
                admission = %program.admission,
                "conversion table points increase with rank"
            );
        }

        let bucket = BucketKey {
            university: program.university.clone(),
            year: program.year,
            admission: program.admission.clone(),
        };
        self.buckets.entry(bucket).or_default().push(program);
    }

    /// Resolve the most specific rule for a program key.
    pub fn resolve(&self, key: &ProgramKey) -> Result<&ProgramFormulaConfig, ScoringError> {
        let mut best: Option<(u8, &ProgramFormulaConfig)> = None;

        if let Some(rules) = self.buckets.get(&BucketKey::of(key)) {
            for rule in rules {
                let Some(specificity) = rule.departments.specificity(&key.department) else {
                    continue;
                };
                if best.map_or(true, |(current, _)| specificity > current) {
                    best = Some((specificity, rule));
                }
            }
        }

        match best {
            Some((_, rule)) => {
                debug!(program = %key, formula = rule.formula.label(), "resolved program rule");
                Ok(rule)
            }
            None => Err(ScoringError::ConfigNotFound(key.clone())),
        }
    }

    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn programs(&self) -> Vec<ProgramSummary> {
        self.buckets
            .values()
            .flatten()
            .map(|program| ProgramSummary {
                university: program.university.clone(),
                year: program.year,
                admission: program.admission.clone(),
                departments: program.departments.clone(),
                formula: program.formula.label(),
                cutoff: program.cutoff,
                reflection_ratio: program.reflection_ratio,
            })
            .collect()
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, RegistryError> {
        let document: RegistryDocument = serde_json::from_reader(reader)?;
        let programs = document
            .programs
            .into_iter()
            .map(ProgramEntry::into_config);
        Ok(Self::with_programs(programs))
    }

    /// Built-in catalogue used when no registry file is configured.
    pub fn standard() -> Self {
        use Category::{English, Korean, Math, Science, Social};

        let set = |categories: &[Category]| categories.iter().copied().collect::<BTreeSet<_>>();

        Self::with_programs([
            ProgramFormulaConfig {
                university: "한빛대학교".to_string(),
                year: 2026,
                admission: "학생부교과(지역균형)".to_string(),
                departments: DepartmentMatch::Any,
                formula: FormulaShape::Blend {
                    categories: set(&[Korean, Math, English, Social, Science]),
                },
                table: ConversionTable::blended(),
                cutoff: Cutoff::new(3, 1),
                reflection_ratio: FULL_REFLECTION,
            },
            ProgramFormulaConfig {
                university: "한빛대학교".to_string(),
                year: 2026,
                admission: "학생부교과(지역균형)".to_string(),
                departments: DepartmentMatch::Exact {
                    name: "의예과".to_string(),
                },
                formula: FormulaShape::Blend {
                    categories: set(&[Korean, Math, English, Science]),
                },
                table: ConversionTable::blended(),
                cutoff: Cutoff::new(3, 1),
                reflection_ratio: FULL_REFLECTION,
            },
            ProgramFormulaConfig {
                university: "새솔대학교".to_string(),
                year: 2026,
                admission: "교과우수자".to_string(),
                departments: DepartmentMatch::OneOf {
                    names: ["국어국문학과", "영어영문학과", "사학과"]
                        .into_iter()
                        .map(str::to_string)
                        .collect(),
                },
                formula: FormulaShape::BestPick {
                    core: set(&[Korean, English]),
                    candidates: vec![Math, Social, Science],
                },
                table: ConversionTable::linear(),
                cutoff: Cutoff::new(3, 1),
                reflection_ratio: FULL_REFLECTION,
            },
            ProgramFormulaConfig {
                university: "새솔대학교".to_string(),
                year: 2026,
                admission: "교과우수자".to_string(),
                departments: DepartmentMatch::Any,
                formula: FormulaShape::BestPick {
                    core: set(&[Korean, English, Math]),
                    candidates: vec![Social, Science],
                },
                table: ConversionTable::linear(),
                cutoff: Cutoff::new(3, 1),
                reflection_ratio: FULL_REFLECTION,
            },
            ProgramFormulaConfig {
                university: "푸른누리대학교".to_string(),
                year: 2026,
                admission: "학교장추천".to_string(),
                departments: DepartmentMatch::Any,
                formula: FormulaShape::TopNPerGroup {
                    core: set(&[Korean, Math, English]),
                    substitutes: vec![Social, Science],
                    per_category: super::formula::DEFAULT_PER_CATEGORY,
                },
                table: ConversionTable::ten_point(),
                cutoff: Cutoff::new(3, 1),
                reflection_ratio: 80.0,
            },
        ])
    }
}

#[derive(Debug, Deserialize)]
struct RegistryDocument {
    #[serde(default)]
    programs: Vec<ProgramEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum TablePreset {
    Blended,
    Linear,
    TenPoint,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TableSpec {
    Preset(TablePreset),
    Custom(ConversionTable),
}

impl TableSpec {
    fn into_table(self) -> ConversionTable {
        match self {
            TableSpec::Preset(TablePreset::Blended) => ConversionTable::blended(),
            TableSpec::Preset(TablePreset::Linear) => ConversionTable::linear(),
            TableSpec::Preset(TablePreset::TenPoint) => ConversionTable::ten_point(),
            TableSpec::Custom(table) => table,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ProgramEntry {
    university: String,
    year: u16,
    admission: String,
    #[serde(default)]
    departments: DepartmentMatch,
    formula: FormulaShape,
    table: TableSpec,
    cutoff: Cutoff,
    #[serde(default = "full_reflection", deserialize_with = "lenient_number")]
    reflection_ratio: f64,
}

impl ProgramEntry {
    fn into_config(self) -> ProgramFormulaConfig {
        ProgramFormulaConfig {
            university: self.university,
            year: self.year,
            admission: self.admission,
            departments: self.departments,
            formula: self.formula,
            table: self.table.into_table(),
            cutoff: self.cutoff,
            reflection_ratio: self.reflection_ratio,
        }
    }
}

/// Failure to load a registry document.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("failed to read program registry {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid program registry document: {0}")]
    Json(#[from] serde_json::Error),
}
