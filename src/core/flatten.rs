//! BOM flattening - depth-first projection of a row forest into flat records
//!
//! Rows are visited in pre-order: a row's record comes before the records of
//! its children, and children are visited in their given order. Traversal uses
//! an explicit stack, so recursion depth is bounded only by `max_depth`.

use miette::Diagnostic;
use thiserror::Error;

use crate::core::config::{Config, PropertyMap, DEFAULT_MAX_DEPTH};
use crate::core::node::{BomNode, RowPath};
use crate::entities::component::PropertyGap;
use crate::entities::record::{BomRecord, BomReport};

/// Structural problems that make a row forest unusable
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum FlattenError {
    #[error("Cycle in BOM tree: row {path} repeats occurrence '{occurrence}' of an ancestor")]
    #[diagnostic(
        code(bomflat::flatten::cycle),
        help("a row may not contain itself; check the exported sub-assembly references")
    )]
    Cycle { path: RowPath, occurrence: String },

    #[error("BOM tree exceeds {limit} levels at row {path}")]
    #[diagnostic(
        code(bomflat::flatten::too_deep),
        help("raise traversal.max_depth or pass --max-depth if the nesting is genuine")
    )]
    TooDeep { path: RowPath, limit: usize },
}

/// Record field filled from a component property
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordField {
    PartNumber,
    Description,
    Material,
}

impl std::fmt::Display for RecordField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordField::PartNumber => write!(f, "part_number"),
            RecordField::Description => write!(f, "description"),
            RecordField::Material => write!(f, "material"),
        }
    }
}

/// A record field that was left blank because its property did not resolve
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowGap {
    pub path: RowPath,
    pub field: RecordField,
    pub gap: PropertyGap,
}

/// Traversal settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlattenOptions {
    /// Rows nested deeper than this many levels abort the traversal
    pub max_depth: usize,

    /// Emit top-level rows only
    pub first_level_only: bool,

    /// Property names read from each row's component
    pub properties: PropertyMap,
}

impl Default for FlattenOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            first_level_only: false,
            properties: PropertyMap::default(),
        }
    }
}

impl From<&Config> for FlattenOptions {
    fn from(config: &Config) -> Self {
        Self {
            max_depth: config.traversal.max_depth,
            first_level_only: config.traversal.first_level_only,
            properties: config.properties.clone(),
        }
    }
}

/// Result of a successful traversal
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Flattened {
    pub report: BomReport,

    /// Fields that fell back to an empty string, in traversal order
    pub gaps: Vec<RowGap>,
}

impl Flattened {
    /// Whether any record was built with blank fields
    pub fn is_degraded(&self) -> bool {
        !self.gaps.is_empty()
    }
}

/// Flatten a row forest with default options
pub fn flatten<N: BomNode>(rows: &[N]) -> Result<BomReport, FlattenError> {
    flatten_with(rows, &FlattenOptions::default()).map(|f| f.report)
}

/// Flatten a row forest, collecting the fields that could not be resolved
///
/// Each unresolved field is also logged as a `warn` event.
pub fn flatten_with<N: BomNode>(
    rows: &[N],
    options: &FlattenOptions,
) -> Result<Flattened, FlattenError> {
    walk(rows, options, true)
}

/// Traverse `rows`; gaps are logged at `warn` when `warn_gaps` is set and at
/// `debug` otherwise
pub(crate) fn walk<N: BomNode>(
    rows: &[N],
    options: &FlattenOptions,
    warn_gaps: bool,
) -> Result<Flattened, FlattenError> {
    let mut out = Flattened::default();

    // (row, depth); depth 0 is a top-level row
    let mut stack: Vec<(&N, usize)> = rows.iter().rev().map(|r| (r, 0)).collect();
    // Ancestors of the row being visited, root first
    let mut lineage: Vec<&N> = Vec::new();

    while let Some((row, depth)) = stack.pop() {
        lineage.truncate(depth);

        if depth >= options.max_depth {
            return Err(FlattenError::TooDeep {
                path: RowPath::of(&lineage, row),
                limit: options.max_depth,
            });
        }

        if let Some(occurrence) = row.occurrence() {
            if lineage.iter().any(|a| a.occurrence() == Some(occurrence)) {
                return Err(FlattenError::Cycle {
                    path: RowPath::of(&lineage, row),
                    occurrence: occurrence.to_string(),
                });
            }
        }

        let path = RowPath::of(&lineage, row);
        let record = project(row, &path, &options.properties, warn_gaps, &mut out.gaps);
        out.report.push(record);

        if !options.first_level_only {
            for child in row.children().iter().rev() {
                stack.push((child, depth + 1));
            }
        }
        lineage.push(row);
    }

    tracing::debug!(
        records = out.report.len(),
        gaps = out.gaps.len(),
        "flattened BOM"
    );
    Ok(out)
}

/// Build one record, substituting empty strings for unresolved properties
fn project<N: BomNode>(
    row: &N,
    path: &RowPath,
    props: &PropertyMap,
    warn_gaps: bool,
    gaps: &mut Vec<RowGap>,
) -> BomRecord {
    let mut resolve = |field: RecordField, name: &str| -> String {
        match row.property(&props.property_set, name) {
            Ok(value) => value,
            Err(gap) => {
                if warn_gaps {
                    tracing::warn!(row = %path, %field, property = name, "{}, using empty value", gap);
                } else {
                    tracing::debug!(row = %path, %field, property = name, "{}, using empty value", gap);
                }
                gaps.push(RowGap {
                    path: path.clone(),
                    field,
                    gap,
                });
                String::new()
            }
        }
    };

    let part_number = resolve(RecordField::PartNumber, &props.part_number);
    let description = resolve(RecordField::Description, &props.description);
    let material = resolve(RecordField::Material, &props.material);

    BomRecord {
        row_number: row.item_number(),
        part_number,
        quantity: row.quantity(),
        description,
        material,
    }
}
