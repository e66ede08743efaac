//! Layout conditions for Folio pages.
//!
//! This crate implements the concrete [`Condition`](folio_core::Condition)
//! types:
//! - Edge alignment against the parent box
//! - Fitting and scaling to the parent box
//! - Flow-order floats against previous siblings, singly or into a corner
//! - Text overflow and shrink-to-content
//! - Containers shrinking onto their children
//! - Baseline grid snapping
//! - Column and row grid placement
//!
//! Condition names follow the familiar `Left2Left` / `Float2Top` style and
//! appear in [`Failure`](folio_core::Failure) records.

mod align;
mod baseline;
mod columns;
mod fit;
mod float;
mod flow;
mod lines;
mod shrink;

pub use align::Align;
pub use baseline::{Baseline2Grid, SnapMode};
pub use columns::GridPlacement;
pub use fit::{Boundary, Fit, FitEdge, Scale};
pub use float::{Direction, Float, FloatCorner};
pub use flow::{Overflow2Next, ShrinkToContent, TextExtent};
pub use lines::{HorizontalEdge, Reference, VerticalEdge};
pub use shrink::ShrinkToChildren;
