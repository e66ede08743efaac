//! Documents: ordered pages solved independently.

use folio_core::{LayoutError, Page, Score};
use tracing::debug;

use crate::solver::{SolveOptions, Solver};

/// An ordered set of pages.
///
/// Pages share no elements, so each one is solved on its own and the
/// per-page scores are merged in page order.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pages: Vec<Page>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a page and return its index.
    pub fn add_page(&mut self, page: Page) -> usize {
        self.pages.push(page);
        self.pages.len() - 1
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn pages_mut(&mut self) -> &mut [Page] {
        &mut self.pages
    }

    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Solve every page in order and merge the scores.
    ///
    /// Stops at the first page with a structural error.
    pub fn solve(&mut self, options: &SolveOptions) -> Result<Score, LayoutError> {
        let solver = Solver::new(*options);
        let mut total = Score::new();
        for (index, page) in self.pages.iter_mut().enumerate() {
            let score = solver.solve(page)?;
            debug!(page = index, %score, "page solved");
            total.merge(score);
        }
        Ok(total)
    }

    /// Solve pages concurrently, one page per task.
    ///
    /// Scores are merged in page order, so the result matches
    /// [`solve`](Self::solve).
    #[cfg(feature = "rayon")]
    pub fn solve_parallel(&mut self, options: &SolveOptions) -> Result<Score, LayoutError> {
        use rayon::prelude::*;

        let solver = Solver::new(*options);
        let scores = self
            .pages
            .par_iter_mut()
            .map(|page| solver.solve(page))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(scores.into_iter().fold(Score::new(), |mut total, score| {
            total.merge(score);
            total
        }))
    }
}
