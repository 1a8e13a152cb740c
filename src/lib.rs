//! bomflat: Bill-of-Materials flattener
//!
//! Reads a BOM row forest exported from a CAD host and projects it, depth-first
//! and in order, into flat JSON records of part number, quantity, description
//! and material.

pub mod cli;
pub mod core;
pub mod entities;
pub mod loader;

pub use crate::core::{flatten, flatten_with, BomNode, FlattenError, FlattenOptions};
pub use crate::entities::{BomRecord, BomReport, BomRow, Quantity};
