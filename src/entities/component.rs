//! Component definition - property sets linked from a BOM row

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Property set the host stores part metadata in
pub const DESIGN_TRACKING: &str = "Design Tracking Properties";

/// Property names within a set, mapped to their scalar values
pub type PropertySet = BTreeMap<String, Value>;

/// Why a property lookup did not produce a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyGap {
    /// The row has no linked component (virtual or unresolved)
    NoComponent,
    /// The component has no property set with the requested name
    NoPropertySet,
    /// The property set exists but lacks the property
    NoProperty,
    /// The property exists but holds null or a non-scalar value
    NoValue,
}

impl std::fmt::Display for PropertyGap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyGap::NoComponent => write!(f, "no component definition"),
            PropertyGap::NoPropertySet => write!(f, "property set not found"),
            PropertyGap::NoProperty => write!(f, "property not found"),
            PropertyGap::NoValue => write!(f, "property has no value"),
        }
    }
}

/// The component a BOM row refers to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentDefinition {
    /// Source document name (e.g., "Bracket.ipt")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,

    /// Property sets keyed by set name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub property_sets: BTreeMap<String, PropertySet>,
}

impl ComponentDefinition {
    /// Create an empty component definition
    pub fn new() -> Self {
        Self::default()
    }

    /// Component with the three design tracking properties populated
    pub fn tracking(part_number: &str, description: &str, material: &str) -> Self {
        Self::new()
            .with_property(DESIGN_TRACKING, "Part Number", part_number)
            .with_property(DESIGN_TRACKING, "Description", description)
            .with_property(DESIGN_TRACKING, "Material", material)
    }

    /// Builder-style setter for a single property
    pub fn with_property(mut self, set: &str, name: &str, value: impl Into<Value>) -> Self {
        self.property_sets
            .entry(set.to_string())
            .or_default()
            .insert(name.to_string(), value.into());
        self
    }

    /// Look up a property and render it as a string
    ///
    /// Strings are returned as-is; numbers and booleans use their JSON text.
    pub fn property(&self, set: &str, name: &str) -> Result<String, PropertyGap> {
        let props = self
            .property_sets
            .get(set)
            .ok_or(PropertyGap::NoPropertySet)?;

        match props.get(name) {
            None => Err(PropertyGap::NoProperty),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(Value::Number(n)) => Ok(n.to_string()),
            Some(Value::Bool(b)) => Ok(b.to_string()),
            Some(_) => Err(PropertyGap::NoValue),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracking_properties_resolve() {
        let cmp = ComponentDefinition::tracking("A1", "Bolt", "Steel");

        assert_eq!(cmp.property(DESIGN_TRACKING, "Part Number").unwrap(), "A1");
        assert_eq!(cmp.property(DESIGN_TRACKING, "Description").unwrap(), "Bolt");
        assert_eq!(cmp.property(DESIGN_TRACKING, "Material").unwrap(), "Steel");
    }

    #[test]
    fn test_missing_set_and_property() {
        let cmp = ComponentDefinition::new().with_property(DESIGN_TRACKING, "Part Number", "A1");

        assert_eq!(
            cmp.property("Summary Information", "Title"),
            Err(PropertyGap::NoPropertySet)
        );
        assert_eq!(
            cmp.property(DESIGN_TRACKING, "Material"),
            Err(PropertyGap::NoProperty)
        );
    }

    #[test]
    fn test_scalar_values_render_as_text() {
        let cmp = ComponentDefinition::new()
            .with_property(DESIGN_TRACKING, "Part Number", 12345)
            .with_property(DESIGN_TRACKING, "Description", true)
            .with_property(DESIGN_TRACKING, "Material", Value::Null);

        assert_eq!(cmp.property(DESIGN_TRACKING, "Part Number").unwrap(), "12345");
        assert_eq!(cmp.property(DESIGN_TRACKING, "Description").unwrap(), "true");
        assert_eq!(
            cmp.property(DESIGN_TRACKING, "Material"),
            Err(PropertyGap::NoValue)
        );
    }

    #[test]
    fn test_component_yaml_roundtrip() {
        let cmp = ComponentDefinition::tracking("B1", "Bracket", "Aluminum");

        let yaml = serde_yml::to_string(&cmp).unwrap();
        assert!(yaml.contains("Design Tracking Properties"));

        let parsed: ComponentDefinition = serde_yml::from_str(&yaml).unwrap();
        assert_eq!(cmp, parsed);
    }
}
