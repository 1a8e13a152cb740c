//! Entity type definitions

pub mod component;
pub mod record;
pub mod row;
pub mod snapshot;

pub use component::{ComponentDefinition, PropertyGap, PropertySet, DESIGN_TRACKING};
pub use record::{BomRecord, BomReport, ReportError};
pub use row::{BomRow, Quantity};
pub use snapshot::{BomSnapshot, BomView};
