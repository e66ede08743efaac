//! Placement on the column/row grid of the parent.
//!
//! Track offsets are relative to the parent's padded box, so with padding 20
//! and 50 wide columns separated by 5, column 1 starts at x = 75.

use folio_core::{
    approx_eq, require_parent, track_span, Condition, ConditionConfig, ElementId, Fix,
    LayoutError, Page,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    LeftToColumn(usize),
    RightToColumn(usize),
    FitColumnSpan(usize, usize),
    TopToRow(usize),
    BottomToRow(usize),
    FitRowSpan(usize, usize),
}

impl Placement {
    fn is_column(self) -> bool {
        matches!(
            self,
            Placement::LeftToColumn(_) | Placement::RightToColumn(_) | Placement::FitColumnSpan(..)
        )
    }

    /// First track and number of tracks the placement refers to.
    fn tracks(self) -> (usize, usize) {
        match self {
            Placement::LeftToColumn(index)
            | Placement::RightToColumn(index)
            | Placement::TopToRow(index)
            | Placement::BottomToRow(index) => (index, 1),
            Placement::FitColumnSpan(index, span) | Placement::FitRowSpan(index, span) => {
                (index, span)
            }
        }
    }
}

/// Where the element should be along the grid axis.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Goal {
    Start(f64),
    End(f64),
    Span(f64, f64),
}

/// Snap one or both edges of an element to tracks of the parent's grid.
#[derive(Debug, Clone)]
pub struct GridPlacement {
    placement: Placement,
    config: ConditionConfig,
}

impl GridPlacement {
    fn build(placement: Placement) -> Self {
        Self {
            placement,
            config: ConditionConfig::default(),
        }
    }

    /// Margin-left on the start of column `column`.
    pub fn left_to_column(column: usize) -> Self {
        Self::build(Placement::LeftToColumn(column))
    }

    /// Margin-right on the end of column `column`.
    pub fn right_to_column(column: usize) -> Self {
        Self::build(Placement::RightToColumn(column))
    }

    /// Cover `span` columns starting at `column`.
    pub fn fit_column_span(column: usize, span: usize) -> Self {
        Self::build(Placement::FitColumnSpan(column, span))
    }

    pub fn top_to_row(row: usize) -> Self {
        Self::build(Placement::TopToRow(row))
    }

    pub fn bottom_to_row(row: usize) -> Self {
        Self::build(Placement::BottomToRow(row))
    }

    pub fn fit_row_span(row: usize, span: usize) -> Self {
        Self::build(Placement::FitRowSpan(row, span))
    }

    pub fn with_config(mut self, config: ConditionConfig) -> Self {
        self.config = config;
        self
    }

    /// Target for the element, or why there is none.
    fn goal(&self, page: &Page, id: ElementId) -> Result<Result<Goal, String>, LayoutError> {
        let parent = page.element(require_parent(page, id, self.name())?)?;
        let Some(grid) = parent.grid.as_ref() else {
            return Ok(Err("parent has no column grid".to_string()));
        };

        let (tracks, origin) = if self.placement.is_column() {
            (grid.column_positions(parent.inner_width()), parent.inner_left())
        } else {
            (grid.row_positions(parent.inner_height()), parent.inner_top())
        };
        let (index, span) = self.placement.tracks();
        let Some((offset, size)) = track_span(&tracks, index, span) else {
            let kind = if self.placement.is_column() { "column" } else { "row" };
            return Ok(Err(format!(
                "{kind} {index} (span {span}) is outside a grid of {}",
                tracks.len()
            )));
        };

        let start = origin + offset;
        Ok(Ok(match self.placement {
            Placement::LeftToColumn(_) | Placement::TopToRow(_) => Goal::Start(start),
            Placement::RightToColumn(_) | Placement::BottomToRow(_) => Goal::End(start + size),
            Placement::FitColumnSpan(..) | Placement::FitRowSpan(..) => Goal::Span(start, size),
        }))
    }
}

impl Condition for GridPlacement {
    fn name(&self) -> &str {
        match self.placement {
            Placement::LeftToColumn(_) => "Left2Col",
            Placement::RightToColumn(_) => "Right2Col",
            Placement::FitColumnSpan(..) => "Fit2ColSpan",
            Placement::TopToRow(_) => "Top2Row",
            Placement::BottomToRow(_) => "Bottom2Row",
            Placement::FitRowSpan(..) => "Fit2RowSpan",
        }
    }

    fn config(&self) -> &ConditionConfig {
        &self.config
    }

    fn test(&self, page: &Page, id: ElementId) -> Result<bool, LayoutError> {
        let Ok(goal) = self.goal(page, id)? else {
            return Ok(false);
        };
        let element = page.element(id)?;
        let tolerance = self.config.tolerance;
        let (start, end) = if self.placement.is_column() {
            (element.margin_left(), element.margin_right())
        } else {
            (element.margin_top(), element.margin_bottom())
        };
        Ok(match goal {
            Goal::Start(target) => approx_eq(start, target, tolerance),
            Goal::End(target) => approx_eq(end, target, tolerance),
            Goal::Span(target, span) => {
                approx_eq(start, target, tolerance) && approx_eq(end - start, span, tolerance)
            }
        })
    }

    fn fix(&self, page: &mut Page, id: ElementId) -> Result<Fix, LayoutError> {
        let goal = match self.goal(page, id)? {
            Ok(goal) => goal,
            Err(reason) => return Ok(Fix::Unsatisfiable(reason)),
        };
        let column = self.placement.is_column();
        let element = page.element_mut(id)?;
        match (goal, column) {
            (Goal::Start(target), true) => element.set_margin_left(target),
            (Goal::Start(target), false) => element.set_margin_top(target),
            (Goal::End(target), true) => element.set_margin_right(target),
            (Goal::End(target), false) => element.set_margin_bottom(target),
            (Goal::Span(target, span), true) => {
                let width = span - element.margin.horizontal();
                if width < 0.0 {
                    return Ok(Fix::unsatisfiable("margins exceed the column span"));
                }
                element.set_width(width);
                element.set_margin_left(target);
            }
            (Goal::Span(target, span), false) => {
                let height = span - element.margin.vertical();
                if height < 0.0 {
                    return Ok(Fix::unsatisfiable("margins exceed the row span"));
                }
                element.set_height(height);
                element.set_margin_top(target);
            }
        }
        Ok(Fix::Applied)
    }
}
