//! Data-quality checks over a BOM row forest

use std::collections::HashSet;

use crate::core::flatten::{walk, FlattenError, FlattenOptions};
use crate::core::node::{BomNode, RowPath};

/// How serious a finding is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// One problem found in a row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub severity: Severity,
    pub path: RowPath,
    pub message: String,
}

impl Finding {
    fn warning(path: RowPath, message: String) -> Self {
        Self {
            severity: Severity::Warning,
            path,
            message,
        }
    }

    fn error(path: RowPath, message: String) -> Self {
        Self {
            severity: Severity::Error,
            path,
            message,
        }
    }
}

/// Check a row forest for values that would produce a poor or unwritable report
///
/// Structural errors (cycles, excess depth) are reported by the flattener
/// itself and are returned as `Err`. Blank fields become findings rather
/// than log warnings.
pub fn lint<N: BomNode>(
    rows: &[N],
    options: &FlattenOptions,
) -> Result<Vec<Finding>, FlattenError> {
    let flattened = walk(rows, options, false)?;
    let mut findings = Vec::new();

    let mut ancestors: Vec<&N> = Vec::new();
    check_siblings(rows, &mut ancestors, options, &mut findings);

    for gap in flattened.gaps {
        findings.push(Finding::warning(
            gap.path,
            format!("{} left blank: {}", gap.field, gap.gap),
        ));
    }

    findings.sort_by(|a, b| a.path.cmp(&b.path).then(b.severity.cmp(&a.severity)));
    Ok(findings)
}

fn check_siblings<'a, N: BomNode>(
    rows: &'a [N],
    ancestors: &mut Vec<&'a N>,
    options: &FlattenOptions,
    findings: &mut Vec<Finding>,
) {
    let mut seen = HashSet::new();

    for row in rows {
        let path = RowPath::of(ancestors, row);
        let quantity = row.quantity();

        if row.item_number() == 0 {
            findings.push(Finding::warning(
                path.clone(),
                "item number is 0; item numbers start at 1".to_string(),
            ));
        }
        if !seen.insert(row.item_number()) {
            findings.push(Finding::warning(
                path.clone(),
                format!("item number {} repeats among its siblings", row.item_number()),
            ));
        }
        if !quantity.is_finite() {
            findings.push(Finding::error(
                path.clone(),
                format!("quantity {} is not a finite number", quantity),
            ));
        } else if quantity.as_f64() < 0.0 {
            findings.push(Finding::warning(
                path.clone(),
                format!("quantity {} is negative", quantity),
            ));
        }

        if !options.first_level_only {
            ancestors.push(row);
            check_siblings(row.children(), ancestors, options, findings);
            ancestors.pop();
        }
    }
}
