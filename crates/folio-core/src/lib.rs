//! Core types for the Folio layout engine.
//!
//! This crate provides the data model shared by the other folio crates:
//! - Geometry and the box model (rects, padding/margin sides, origins)
//! - Elements and the arena-backed element tree
//! - Pages, baseline grids and column grids
//! - The [`Condition`] contract and the [`Score`] report
//! - Error types

pub mod condition;
pub mod element;
pub mod errors;
pub mod geometry;
pub mod grid;
pub mod page;
pub mod score;
pub mod tree;

pub use condition::{
    require_parent, Condition, ConditionConfig, Fix, Outcome, DEFAULT_PENALTY, DEFAULT_TOLERANCE,
    DEFAULT_WEIGHT,
};
pub use element::{ConditionList, Element, ElementId, ElementKind, ImageContent, TextContent};
pub use errors::{Axis, ConfigError, LayoutError};
pub use geometry::{
    approx_eq, snap_down_to_grid, snap_to_grid, snap_up_to_grid, Origin, Rect, Sides,
};
pub use grid::{track_span, ColumnGrid, Track};
pub use page::{BaselineGrid, Page};
pub use score::{FailReason, Failure, Score, Tally};
pub use tree::{ElementTree, Snapshot};
