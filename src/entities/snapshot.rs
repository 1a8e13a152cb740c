//! BOM snapshot - a row forest exported from the host application

use serde::de::value::{MapAccessDeserializer, SeqAccessDeserializer};
use serde::de::{Deserializer, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::entities::row::BomRow;

/// Which BOM view the host materialized
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BomView {
    #[default]
    Structured,
    PartsOnly,
}

impl fmt::Display for BomView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BomView::Structured => write!(f, "structured"),
            BomView::PartsOnly => write!(f, "parts only"),
        }
    }
}

/// A read-only snapshot of an assembly's BOM rows
///
/// Accepts either a mapping with `assembly`, `view` and `rows` keys, or a bare
/// sequence of top-level rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BomSnapshot {
    /// Assembly document the rows were taken from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assembly: Option<String>,

    pub view: BomView,

    /// Top-level rows, in host order
    pub rows: Vec<BomRow>,
}

impl BomSnapshot {
    pub fn from_rows(rows: Vec<BomRow>) -> Self {
        Self {
            rows,
            ..Default::default()
        }
    }

    /// Total number of rows across the whole forest
    pub fn row_count(&self) -> usize {
        self.rows.iter().map(BomRow::row_count).sum()
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SnapshotFields {
    #[serde(default)]
    assembly: Option<String>,
    #[serde(default)]
    view: BomView,
    #[serde(default)]
    rows: Vec<BomRow>,
}

impl<'de> Deserialize<'de> for BomSnapshot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SnapshotVisitor;

        impl<'de> Visitor<'de> for SnapshotVisitor {
            type Value = BomSnapshot;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a BOM snapshot mapping or a sequence of rows")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, seq: A) -> Result<Self::Value, A::Error> {
                let rows = Vec::<BomRow>::deserialize(SeqAccessDeserializer::new(seq))?;
                Ok(BomSnapshot::from_rows(rows))
            }

            fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
                let fields = SnapshotFields::deserialize(MapAccessDeserializer::new(map))?;
                Ok(BomSnapshot {
                    assembly: fields.assembly,
                    view: fields.view,
                    rows: fields.rows,
                })
            }
        }

        deserializer.deserialize_any(SnapshotVisitor)
    }
}
