//! Condition solving for Folio pages and documents.
//!
//! This crate runs the conditions attached to a page's elements until the
//! geometry settles, and reports what still fails.
//!
//! # Architecture
//!
//! 1. **Pages**: element trees built with `folio-core`
//! 2. **Conditions**: rules from `folio-constraint`, attached per element
//! 3. **Solving**: repeated pre-order passes until nothing changes or the
//!    pass budget is spent
//!
//! # Example
//!
//! ```
//! use folio_layout::prelude::*;
//!
//! let mut page = Page::new(500.0, 500.0);
//! page.add_to_root(
//!     Element::rect(100.0, 50.0)
//!         .at(120.0, 300.0)
//!         .with_condition(Align::left_to_left())
//!         .with_condition(Float::top()),
//! )?;
//!
//! let score = solve_page(&mut page)?;
//! assert!(score.is_clean());
//! # Ok::<(), LayoutError>(())
//! ```
//!
//! A score with failures is still a usable layout: the solver always leaves
//! its best effort in place, so check [`Score::fails`](folio_core::Score)
//! when a strict layout is expected.

mod document;
mod solver;

pub use document::Document;
pub use solver::{solve_page, SolveOptions, Solver, DEFAULT_MAX_PASSES};

/// The types most callers need.
pub mod prelude {
    pub use crate::{solve_page, Document, SolveOptions, Solver};
    pub use folio_constraint::{
        Align, Baseline2Grid, Boundary, Direction, Fit, FitEdge, Float, FloatCorner, GridPlacement,
        Overflow2Next, Reference, Scale, ShrinkToChildren, ShrinkToContent,
    };
    pub use folio_core::{
        BaselineGrid, ColumnGrid, Condition, ConditionConfig, Element, ElementId, LayoutError,
        Origin, Page, Rect, Score, Sides, TextContent, Track,
    };
}
