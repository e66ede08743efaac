//! The condition contract.
//!
//! A condition is a predicate on one element plus a fix that mutates
//! geometry when the predicate fails. Conditions only look at the element,
//! its parent, its previous siblings and its children (and, for overflow,
//! the linked next element), and they hold no state about the tree between
//! calls.

use std::fmt;

use crate::element::ElementId;
use crate::errors::{ConfigError, LayoutError};
use crate::page::Page;
use crate::score::{FailReason, Failure, Score};

/// Default slack for "equal" comparisons.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;
/// Default amount added to the score for a passing condition.
pub const DEFAULT_WEIGHT: f64 = 1.0;
/// Default amount added to the score for a failing condition.
pub const DEFAULT_PENALTY: f64 = -10.0;

/// Per-condition options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConditionConfig {
    /// Numeric slack before a comparison fails
    pub tolerance: f64,
    /// Added to the score when the condition holds
    pub weight: f64,
    /// Added to the score when the condition fails
    pub penalty: f64,
}

impl Default for ConditionConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            weight: DEFAULT_WEIGHT,
            penalty: DEFAULT_PENALTY,
        }
    }
}

impl ConditionConfig {
    /// Config with the given tolerance and default weights.
    pub fn new(tolerance: f64) -> Result<Self, ConfigError> {
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(ConfigError::InvalidTolerance(tolerance));
        }
        Ok(Self {
            tolerance,
            ..Default::default()
        })
    }

    pub fn with_weight(mut self, weight: f64) -> Result<Self, ConfigError> {
        if !weight.is_finite() {
            return Err(ConfigError::InvalidWeight(weight));
        }
        self.weight = weight;
        Ok(self)
    }

    pub fn with_penalty(mut self, penalty: f64) -> Result<Self, ConfigError> {
        if !penalty.is_finite() || penalty > 0.0 {
            return Err(ConfigError::InvalidPenalty(penalty));
        }
        self.penalty = penalty;
        Ok(self)
    }
}

/// Result of a fix attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Fix {
    /// Geometry was written
    Applied,
    /// Nothing useful could be written; the reason ends up in the score
    Unsatisfiable(String),
}

impl Fix {
    pub fn unsatisfiable(reason: impl Into<String>) -> Self {
        Fix::Unsatisfiable(reason.into())
    }
}

/// What happened to one condition on one element during one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Held already, nothing was written
    Satisfied,
    /// Failed and a fix was applied
    Fixed,
    /// Failed and could not be improved
    Unsatisfiable,
}

/// A rule that tests and enforces a geometric relationship.
pub trait Condition: fmt::Debug + Send + Sync {
    /// Identifier used in failure records.
    fn name(&self) -> &str;

    fn config(&self) -> &ConditionConfig;

    /// Whether the condition holds for `id`.
    fn test(&self, page: &Page, id: ElementId) -> Result<bool, LayoutError>;

    /// Try to make the condition hold by writing geometry.
    fn fix(&self, page: &mut Page, id: ElementId) -> Result<Fix, LayoutError>;

    /// Elements a fix may write to. The solver compares only these to tell
    /// whether a pass changed anything.
    fn touches(&self, _page: &Page, id: ElementId) -> Vec<ElementId> {
        vec![id]
    }

    /// Test, fix when failing, and record the outcome.
    fn solve(&self, page: &mut Page, id: ElementId, score: &mut Score) -> Result<Outcome, LayoutError> {
        let config = *self.config();
        if self.test(page, id)? {
            score.record_satisfied(self.name(), config.weight);
            return Ok(Outcome::Satisfied);
        }

        let label = page.element(id)?.label().to_string();
        match self.fix(page, id)? {
            Fix::Applied => {
                if self.test(page, id)? {
                    score.record_fixed(self.name(), config.weight);
                } else {
                    let failure = Failure::new(id, label, self.name(), FailReason::NotSettled);
                    score.record_failure(failure, config.penalty);
                }
                Ok(Outcome::Fixed)
            }
            Fix::Unsatisfiable(reason) => {
                let failure =
                    Failure::new(id, label, self.name(), FailReason::Unsatisfiable(reason));
                score.record_failure(failure, config.penalty);
                Ok(Outcome::Unsatisfiable)
            }
        }
    }

    /// Test only, recording the result.
    fn evaluate(&self, page: &Page, id: ElementId, score: &mut Score) -> Result<bool, LayoutError> {
        let config = self.config();
        let holds = self.test(page, id)?;
        if holds {
            score.record_satisfied(self.name(), config.weight);
        } else {
            let label = page.element(id)?.label().to_string();
            let failure = Failure::new(id, label, self.name(), FailReason::Unsatisfied);
            score.record_failure(failure, config.penalty);
        }
        Ok(holds)
    }
}

/// Parent of `id`, or the structural error a parent-relative condition raises.
pub fn require_parent(page: &Page, id: ElementId, condition: &str) -> Result<ElementId, LayoutError> {
    page.element(id)?
        .parent()
        .ok_or_else(|| LayoutError::MissingParent {
            element: id,
            condition: condition.to_string(),
        })
}
