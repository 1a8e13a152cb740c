//! BomNode trait - common interface for anything that can be flattened

use crate::entities::component::PropertyGap;
use crate::entities::row::Quantity;

/// A row in a BOM tree, as seen by the flattener
///
/// Implementors expose an item number, a quantity, property lookup by
/// property-set and property name, and ordered child rows.
pub trait BomNode: Sized {
    /// Position of the row within its parent's row list
    fn item_number(&self) -> u32;

    /// Occurrences of the part under its parent
    fn quantity(&self) -> Quantity;

    /// Resolve a property of the linked component
    fn property(&self, set: &str, name: &str) -> Result<String, PropertyGap>;

    /// Child rows, in display order
    fn children(&self) -> &[Self];

    /// Host reference identifying this occurrence, used for cycle detection
    fn occurrence(&self) -> Option<&str> {
        None
    }
}

/// Item numbers from a root row down to a row
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowPath(Vec<u32>);

impl RowPath {
    pub fn new(item_numbers: Vec<u32>) -> Self {
        Self(item_numbers)
    }

    /// Build the path of `row` below the given ancestors
    pub fn of<N: BomNode>(ancestors: &[&N], row: &N) -> Self {
        let mut path: Vec<u32> = ancestors.iter().map(|a| a.item_number()).collect();
        path.push(row.item_number());
        Self(path)
    }
}

impl std::fmt::Display for RowPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|n| n.to_string()).collect();
        write!(f, "{}", parts.join("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_path_display() {
        assert_eq!(RowPath::new(vec![2, 1, 3]).to_string(), "2.1.3");
        assert_eq!(RowPath::new(vec![7]).to_string(), "7");
        assert_eq!(RowPath::default().to_string(), "");
    }

    #[test]
    fn test_row_path_orders_parents_first() {
        let parent = RowPath::new(vec![2]);
        let child = RowPath::new(vec![2, 1]);
        let sibling = RowPath::new(vec![3]);
        assert!(parent < child);
        assert!(child < sibling);
    }
}
