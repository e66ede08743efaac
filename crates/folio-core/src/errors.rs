//! Error types for the Folio engine.
//!
//! Ordinary condition failures are not errors: they are recorded in a
//! [`Score`](crate::Score). The types here describe a malformed tree or an
//! invalid configuration, both of which abort the current solve.

use thiserror::Error;

use crate::element::ElementId;

/// Structural errors raised while building or solving a page.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Adding {child} under {parent} would make {child} its own ancestor")]
    Cycle { parent: ElementId, child: ElementId },

    #[error("Unknown element {0}")]
    UnknownElement(ElementId),

    #[error("Condition {condition} needs the parent bounds of {element}, which has no parent")]
    MissingParent {
        element: ElementId,
        condition: String,
    },

    #[error("Condition {condition} divides by the zero {axis} of {element}")]
    DegenerateExtent {
        element: ElementId,
        condition: String,
        axis: Axis,
    },

    #[error("The page root cannot be removed")]
    RootRemoval,

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors in configuration values, reported when the value is constructed.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Tolerance must be finite and non-negative, got {0}")]
    InvalidTolerance(f64),

    #[error("Weight must be finite, got {0}")]
    InvalidWeight(f64),

    #[error("Penalty must be finite and not positive, got {0}")]
    InvalidPenalty(f64),

    #[error("Iteration budget must be at least one pass")]
    ZeroBudget,

    #[error("Baseline grid unit must be finite and positive, got {0}")]
    InvalidGridUnit(f64),

    #[error("Grid track {index} has invalid size {value}")]
    InvalidTrack { index: usize, value: f64 },

    #[error("Grid gutter must be finite and non-negative, got {0}")]
    InvalidGutter(f64),
}

/// Axis named in extent errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Horizontal => f.write_str("width"),
            Axis::Vertical => f.write_str("height"),
        }
    }
}
