//! Score: the report of a solve.

use std::fmt;

use indexmap::IndexMap;

use crate::element::ElementId;

/// Why a condition ended up in the failure list.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FailReason {
    /// The fix could not improve the layout
    Unsatisfiable(String),
    /// The fix was applied but the condition still does not hold
    NotSettled,
    /// The condition does not hold in the final geometry
    Unsatisfied,
}

impl fmt::Display for FailReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailReason::Unsatisfiable(why) => write!(f, "unsatisfiable: {why}"),
            FailReason::NotSettled => f.write_str("not settled after fix"),
            FailReason::Unsatisfied => f.write_str("unsatisfied"),
        }
    }
}

/// One failing (element, condition) pair.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Failure {
    pub element: ElementId,
    /// Element name, or its kind when unnamed
    pub element_name: String,
    pub condition: String,
    pub reason: FailReason,
}

impl Failure {
    pub fn new(
        element: ElementId,
        element_name: impl Into<String>,
        condition: impl Into<String>,
        reason: FailReason,
    ) -> Self {
        Self {
            element,
            element_name: element_name.into(),
            condition: condition.into(),
            reason,
        }
    }

    /// Whether this failure is about the same element and condition.
    pub fn same_pair(&self, other: &Failure) -> bool {
        self.element == other.element && self.condition == other.condition
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) {}: {}",
            self.element_name, self.element, self.condition, self.reason
        )
    }
}

/// Outcome counts for one condition name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub satisfied: usize,
    pub fixed: usize,
    pub failed: usize,
}

/// Aggregate result of evaluating or solving conditions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Score {
    /// Sum of weights of passing conditions and penalties of failing ones
    pub result: f64,
    pub satisfied: usize,
    pub fixed: usize,
    /// Solver passes run to produce this score
    pub passes: usize,
    pub fails: Vec<Failure>,
    tally: IndexMap<String, Tally>,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_satisfied(&mut self, condition: &str, weight: f64) {
        self.result += weight;
        self.satisfied += 1;
        self.tally_mut(condition).satisfied += 1;
    }

    pub fn record_fixed(&mut self, condition: &str, weight: f64) {
        self.result += weight;
        self.fixed += 1;
        self.tally_mut(condition).fixed += 1;
    }

    pub fn record_failure(&mut self, failure: Failure, penalty: f64) {
        self.result += penalty;
        self.tally_mut(&failure.condition).failed += 1;
        self.fails.push(failure);
    }

    /// True when no condition failed.
    pub fn is_clean(&self) -> bool {
        self.fails.is_empty()
    }

    /// Counts for one condition name, if it was seen.
    pub fn tally(&self, condition: &str) -> Option<Tally> {
        self.tally.get(condition).copied()
    }

    /// Counts per condition name, in first-seen order.
    pub fn tallies(&self) -> impl Iterator<Item = (&str, &Tally)> {
        self.tally.iter().map(|(name, tally)| (name.as_str(), tally))
    }

    /// Fold another score into this one, e.g. across pages.
    pub fn merge(&mut self, other: Score) {
        self.result += other.result;
        self.satisfied += other.satisfied;
        self.fixed += other.fixed;
        self.passes = self.passes.max(other.passes);
        self.fails.extend(other.fails);
        for (name, tally) in other.tally {
            let entry = self.tally_mut(&name);
            entry.satisfied += tally.satisfied;
            entry.fixed += tally.fixed;
            entry.failed += tally.failed;
        }
    }

    fn tally_mut(&mut self, condition: &str) -> &mut Tally {
        if !self.tally.contains_key(condition) {
            self.tally.insert(condition.to_string(), Tally::default());
        }
        &mut self.tally[condition]
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Score: {} Fails: {}", self.result, self.fails.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_display() {
        let mut score = Score::new();
        score.record_satisfied("Align", 1.0);
        score.record_fixed("Fit", 1.0);
        score.record_failure(
            Failure::new(ElementId(3), "logo", "Float", FailReason::Unsatisfied),
            -10.0,
        );
        assert_eq!(score.result, -8.0);
        assert!(!score.is_clean());
        assert_eq!(score.to_string(), "Score: -8 Fails: 1");
        assert_eq!(score.tally("Float"), Some(Tally { satisfied: 0, fixed: 0, failed: 1 }));
        let names: Vec<_> = score.tallies().map(|(name, _)| name).collect();
        assert_eq!(names, ["Align", "Fit", "Float"]);
    }

    #[test]
    fn test_merge() {
        let mut a = Score::new();
        a.record_satisfied("Align", 1.0);
        a.passes = 2;
        let mut b = Score::new();
        b.record_satisfied("Align", 1.0);
        b.record_failure(
            Failure::new(ElementId(1), "rect", "Fit", FailReason::NotSettled),
            -10.0,
        );
        b.passes = 5;

        a.merge(b);
        assert_eq!(a.satisfied, 2);
        assert_eq!(a.passes, 5);
        assert_eq!(a.fails.len(), 1);
        assert_eq!(a.tally("Align").unwrap().satisfied, 2);
    }

    #[test]
    fn test_failure_display() {
        let failure = Failure::new(
            ElementId(2),
            "caption",
            "Overflow2Next",
            FailReason::Unsatisfiable("no next element".into()),
        );
        assert_eq!(
            failure.to_string(),
            "caption (#2) Overflow2Next: unsatisfiable: no next element"
        );
    }
}
