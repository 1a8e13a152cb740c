//! Flat BOM records and the report that holds them

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entities::row::Quantity;

/// Flat projection of one BOM row
///
/// Field names are the external contract of the JSON report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BomRecord {
    pub row_number: u32,
    pub part_number: String,
    pub quantity: Quantity,
    pub description: String,
    pub material: String,
}

/// Errors raised when encoding a report
#[derive(Debug, Error, Diagnostic)]
pub enum ReportError {
    #[error("Record {index} (row {row_number}, part '{part_number}') has non-finite quantity {quantity}")]
    #[diagnostic(
        code(bomflat::report::non_finite_quantity),
        help("quantities must be finite numbers to be written as JSON")
    )]
    NonFiniteQuantity {
        index: usize,
        row_number: u32,
        part_number: String,
        quantity: f64,
    },

    #[error("Failed to encode report: {0}")]
    #[diagnostic(code(bomflat::report::encode))]
    Encode(#[from] serde_json::Error),
}

/// Ordered records of one flattened BOM tree
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BomReport {
    records: Vec<BomRecord>,
}

impl BomReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: BomRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[BomRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BomRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Check that every record can be encoded
    pub fn validate(&self) -> Result<(), ReportError> {
        for (index, record) in self.records.iter().enumerate() {
            if !record.quantity.is_finite() {
                return Err(ReportError::NonFiniteQuantity {
                    index,
                    row_number: record.row_number,
                    part_number: record.part_number.clone(),
                    quantity: record.quantity.as_f64(),
                });
            }
        }
        Ok(())
    }

    /// Encode as a compact JSON array
    pub fn to_json(&self) -> Result<String, ReportError> {
        self.validate()?;
        Ok(serde_json::to_string(self)?)
    }

    /// Encode as an indented JSON array
    pub fn to_json_pretty(&self) -> Result<String, ReportError> {
        self.validate()?;
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a report previously written as JSON
    pub fn from_json(json: &str) -> Result<Self, ReportError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl From<Vec<BomRecord>> for BomReport {
    fn from(records: Vec<BomRecord>) -> Self {
        Self { records }
    }
}

impl<'a> IntoIterator for &'a BomReport {
    type Item = &'a BomRecord;
    type IntoIter = std::slice::Iter<'a, BomRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(row_number: u32, part_number: &str, quantity: Quantity) -> BomRecord {
        BomRecord {
            row_number,
            part_number: part_number.to_string(),
            quantity,
            description: String::new(),
            material: String::new(),
        }
    }

    #[test]
    fn test_empty_report_is_empty_array() {
        assert_eq!(BomReport::new().to_json().unwrap(), "[]");
    }

    #[test]
    fn test_field_order_in_json() {
        let report = BomReport::from(vec![record(1, "A1", Quantity::Count(2))]);
        assert_eq!(
            report.to_json().unwrap(),
            r#"[{"row_number":1,"part_number":"A1","quantity":2,"description":"","material":""}]"#
        );
    }

    #[test]
    fn test_non_finite_quantity_names_record() {
        let report = BomReport::from(vec![
            record(1, "A1", Quantity::Count(2)),
            record(2, "B1", Quantity::Measure(f64::NAN)),
        ]);

        match report.to_json() {
            Err(ReportError::NonFiniteQuantity {
                index,
                row_number,
                part_number,
                ..
            }) => {
                assert_eq!(index, 1);
                assert_eq!(row_number, 2);
                assert_eq!(part_number, "B1");
            }
            other => panic!("expected NonFiniteQuantity, got {:?}", other),
        }
    }

    #[test]
    fn test_from_json_reads_decimal_quantities() {
        let report = BomReport::from_json(
            r#"[{"row_number":3,"part_number":"T1","quantity":1.5,"description":"Tube","material":"Copper"}]"#,
        )
        .unwrap();
        assert_eq!(report.len(), 1);
        assert_eq!(report.records()[0].quantity, Quantity::Measure(1.5));
    }
}
