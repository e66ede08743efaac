//! The relaxation loop that applies conditions until the page settles.

use std::collections::HashSet;

use folio_core::{ConfigError, ElementId, FailReason, Failure, LayoutError, Outcome, Page, Score};
use tracing::{debug, trace, warn};

/// Default number of passes before the solver gives up.
pub const DEFAULT_MAX_PASSES: usize = 100;

/// Options for solving a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolveOptions {
    /// Upper bound on full tree passes
    pub max_passes: usize,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            max_passes: DEFAULT_MAX_PASSES,
        }
    }
}

impl SolveOptions {
    pub fn new(max_passes: usize) -> Result<Self, ConfigError> {
        if max_passes == 0 {
            return Err(ConfigError::ZeroBudget);
        }
        Ok(Self { max_passes })
    }
}

/// What one pass did.
struct PassReport {
    mutated: bool,
    fails: Vec<Failure>,
}

/// Applies the conditions of a page pass after pass.
///
/// Each pass walks the tree in pre-order (parents before children, children
/// in flow order) and solves every attached condition in attachment order,
/// so when two conditions on one element disagree the later one wins the
/// pass. Solving stops at the first pass that writes nothing, or when the
/// budget runs out. Either way the page keeps its best-effort geometry and
/// the returned [`Score`] says what still fails; compare
/// [`Score::passes`] with the budget to tell the two apart.
#[derive(Debug, Clone, Default)]
pub struct Solver {
    options: SolveOptions,
}

/// Condition slots fixed at least once, keyed by element and position.
type FixedSlots = HashSet<(ElementId, usize)>;

impl Solver {
    pub fn new(options: SolveOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SolveOptions {
        &self.options
    }

    /// Solve `page` in place.
    ///
    /// Ordinary failures end up in the score. Structural problems (a
    /// parent-relative condition on the root, a degenerate extent, a dangling
    /// id) abort with `Err` and leave the geometry as far as it got.
    pub fn solve(&self, page: &mut Page) -> Result<Score, LayoutError> {
        let mut fixed = FixedSlots::new();
        let max_passes = self.options.max_passes;
        let mut passes = 0;
        let mut last_fails = Vec::new();
        let mut converged = false;

        while passes < max_passes {
            passes += 1;
            let report = run_pass(page, &mut fixed)?;
            debug!(
                page = page.name.as_deref().unwrap_or("page"),
                pass = passes,
                mutated = report.mutated,
                fails = report.fails.len(),
                "solver pass"
            );
            last_fails = report.fails;
            if !report.mutated {
                converged = true;
                break;
            }
        }

        let mut score = final_score(page, &last_fails, &fixed)?;
        score.passes = passes;

        if converged {
            debug!(passes, fails = score.fails.len(), "layout converged");
        } else if !score.is_clean() {
            warn!(
                passes,
                fails = score.fails.len(),
                "pass budget exhausted with failing conditions"
            );
        }
        Ok(score)
    }
}

fn run_pass(page: &mut Page, fixed: &mut FixedSlots) -> Result<PassReport, LayoutError> {
    let mut score = Score::new();
    let mut mutated = false;

    for id in page.tree().pre_order() {
        let conditions = page.element(id)?.conditions.clone();
        for (slot, condition) in conditions.iter().enumerate() {
            let touched = condition.touches(page, id);
            let before = page.tree().snapshot_of(&touched);
            let outcome = condition.solve(page, id, &mut score)?;
            trace!(element = %id, condition = condition.name(), ?outcome, "condition solved");
            if outcome == Outcome::Fixed {
                fixed.insert((id, slot));
            }
            // A satisfied condition writes nothing; anything else may have.
            if outcome != Outcome::Satisfied && page.tree().snapshot_of(&touched) != before {
                mutated = true;
            }
        }
    }

    Ok(PassReport {
        mutated,
        fails: score.fails,
    })
}

/// Test every condition against the final geometry.
///
/// A failing condition keeps the reason recorded for it in the last pass
/// when there is one, otherwise it is reported as unsatisfied.
fn final_score(
    page: &Page,
    last_fails: &[Failure],
    fixed: &FixedSlots,
) -> Result<Score, LayoutError> {
    let mut score = Score::new();
    for id in page.tree().pre_order() {
        let element = page.element(id)?;
        for (slot, condition) in element.conditions.iter().enumerate() {
            let config = condition.config();
            if condition.test(page, id)? {
                if fixed.contains(&(id, slot)) {
                    score.record_fixed(condition.name(), config.weight);
                } else {
                    score.record_satisfied(condition.name(), config.weight);
                }
                continue;
            }
            let failure = last_fails
                .iter()
                .find(|f| f.element == id && f.condition == condition.name())
                .cloned()
                .unwrap_or_else(|| {
                    Failure::new(id, element.label(), condition.name(), FailReason::Unsatisfied)
                });
            score.record_failure(failure, config.penalty);
        }
    }
    Ok(score)
}

/// Solve one page with default options.
pub fn solve_page(page: &mut Page) -> Result<Score, LayoutError> {
    Solver::new(SolveOptions::default()).solve(page)
}
