//! BOM row entity - one line item in the host's BOM tree

use serde::{Deserialize, Serialize, Serializer};

use crate::core::node::BomNode;
use crate::entities::component::{ComponentDefinition, PropertyGap};

/// Occurrence count of a part under its parent
///
/// Integer counts (negative ones included) serialize as JSON integers.
/// Measured quantities (lengths, volumes) serialize as JSON numbers and must
/// be finite.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    Count(i64),
    Measure(f64),
}

impl Quantity {
    /// Numeric value as a float
    pub fn as_f64(&self) -> f64 {
        match *self {
            Quantity::Count(n) => n as f64,
            Quantity::Measure(v) => v,
        }
    }

    /// Whether the quantity can be written as a JSON number
    pub fn is_finite(&self) -> bool {
        match *self {
            Quantity::Count(_) => true,
            Quantity::Measure(v) => v.is_finite(),
        }
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Quantity::Count(1)
    }
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Quantity::Count(n) => serializer.serialize_i64(n),
            Quantity::Measure(v) if v.is_finite() => serializer.serialize_f64(v),
            Quantity::Measure(v) => Err(serde::ser::Error::custom(format!(
                "quantity {} is not a finite number",
                v
            ))),
        }
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Quantity::Count(n) => write!(f, "{}", n),
            Quantity::Measure(v) => write!(f, "{}", v),
        }
    }
}

/// A row in a structured or parts-only BOM view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BomRow {
    /// Host reference for this occurrence, if the export carries one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occurrence: Option<String>,

    /// Position of the row within its parent's row list
    pub item_number: u32,

    /// Occurrences of the part under its parent
    #[serde(default)]
    pub quantity: Quantity,

    /// Linked component definition (absent for virtual components)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<ComponentDefinition>,

    /// Nested rows of a sub-assembly
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub child_rows: Vec<BomRow>,
}

impl BomRow {
    /// Create a leaf row with no linked component
    pub fn new(item_number: u32, quantity: Quantity) -> Self {
        Self {
            occurrence: None,
            item_number,
            quantity,
            component: None,
            child_rows: Vec::new(),
        }
    }

    /// Leaf row counting `count` occurrences of a tracked part
    pub fn tracked(
        item_number: u32,
        count: i64,
        part_number: &str,
        description: &str,
        material: &str,
    ) -> Self {
        Self::new(item_number, Quantity::Count(count)).with_component(
            ComponentDefinition::tracking(part_number, description, material),
        )
    }

    pub fn with_component(mut self, component: ComponentDefinition) -> Self {
        self.component = Some(component);
        self
    }

    pub fn with_children(mut self, children: Vec<BomRow>) -> Self {
        self.child_rows = children;
        self
    }

    pub fn with_occurrence(mut self, occurrence: impl Into<String>) -> Self {
        self.occurrence = Some(occurrence.into());
        self
    }

    /// Number of rows in this subtree, including this one
    pub fn row_count(&self) -> usize {
        1 + self.child_rows.iter().map(BomRow::row_count).sum::<usize>()
    }
}

impl BomNode for BomRow {
    fn item_number(&self) -> u32 {
        self.item_number
    }

    fn quantity(&self) -> Quantity {
        self.quantity
    }

    fn property(&self, set: &str, name: &str) -> Result<String, PropertyGap> {
        self.component
            .as_ref()
            .ok_or(PropertyGap::NoComponent)?
            .property(set, name)
    }

    fn children(&self) -> &[Self] {
        &self.child_rows
    }

    fn occurrence(&self) -> Option<&str> {
        self.occurrence.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::component::DESIGN_TRACKING;

    #[test]
    fn test_quantity_parses_integers_as_counts() {
        let q: Quantity = serde_json::from_str("4").unwrap();
        assert_eq!(q, Quantity::Count(4));

        let q: Quantity = serde_json::from_str("2.5").unwrap();
        assert_eq!(q, Quantity::Measure(2.5));

        let q: Quantity = serde_json::from_str("-2").unwrap();
        assert_eq!(q, Quantity::Count(-2));
        assert_eq!(serde_json::to_string(&q).unwrap(), "-2");
    }

    #[test]
    fn test_quantity_serialization() {
        assert_eq!(serde_json::to_string(&Quantity::Count(2)).unwrap(), "2");
        assert_eq!(serde_json::to_string(&Quantity::Measure(0.75)).unwrap(), "0.75");
        assert!(serde_json::to_string(&Quantity::Measure(f64::NAN)).is_err());
        assert!(serde_json::to_string(&Quantity::Measure(f64::INFINITY)).is_err());
    }

    #[test]
    fn test_row_without_component_reports_gap() {
        let row = BomRow::new(1, Quantity::Count(1));
        assert_eq!(
            row.property(DESIGN_TRACKING, "Part Number"),
            Err(PropertyGap::NoComponent)
        );
    }

    #[test]
    fn test_row_count_includes_descendants() {
        let row = BomRow::tracked(2, 1, "B1", "Bracket", "Aluminum").with_children(vec![
            BomRow::tracked(1, 4, "C1", "Screw", "Steel"),
            BomRow::tracked(2, 1, "D1", "Plate", "Steel")
                .with_children(vec![BomRow::tracked(1, 2, "E1", "Pin", "Brass")]),
        ]);
        assert_eq!(row.row_count(), 4);
    }

    #[test]
    fn test_row_defaults_when_fields_omitted() {
        let row: BomRow = serde_yml::from_str("item_number: 3").unwrap();
        assert_eq!(row.item_number, 3);
        assert_eq!(row.quantity, Quantity::Count(1));
        assert!(row.component.is_none());
        assert!(row.child_rows.is_empty());
    }
}
