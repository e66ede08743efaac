//! Edge alignment against the parent box.

use folio_core::{
    approx_eq, require_parent, Condition, ConditionConfig, ElementId, Fix, LayoutError, Page,
};

use crate::lines::{HorizontalEdge, Reference, VerticalEdge};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pair {
    Horizontal(HorizontalEdge, HorizontalEdge),
    Vertical(VerticalEdge, VerticalEdge),
}

/// Puts one edge of the element on one line of its parent.
///
/// `Align::left_to_left()` is satisfied when the element's margin-left
/// equals the parent's padded left; the `_side` variants use the parent's
/// outer sides instead. Alignment only moves, it never resizes.
#[derive(Debug, Clone)]
pub struct Align {
    pair: Pair,
    reference: Reference,
    config: ConditionConfig,
    name: String,
}

impl Align {
    /// Align a horizontal edge of the element to a horizontal parent line.
    pub fn horizontal(edge: HorizontalEdge, target: HorizontalEdge, reference: Reference) -> Self {
        let name = format!("{}2{}{}", edge.label(), target.label(), reference.suffix());
        Self {
            pair: Pair::Horizontal(edge, target),
            reference,
            config: ConditionConfig::default(),
            name,
        }
    }

    /// Align a vertical edge of the element to a vertical parent line.
    pub fn vertical(edge: VerticalEdge, target: VerticalEdge, reference: Reference) -> Self {
        let name = format!("{}2{}{}", edge.label(), target.label(), reference.suffix());
        Self {
            pair: Pair::Vertical(edge, target),
            reference,
            config: ConditionConfig::default(),
            name,
        }
    }

    pub fn with_config(mut self, config: ConditionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn left_to_left() -> Self {
        Self::horizontal(HorizontalEdge::Left, HorizontalEdge::Left, Reference::Inner)
    }

    pub fn left_to_left_side() -> Self {
        Self::horizontal(HorizontalEdge::Left, HorizontalEdge::Left, Reference::Side)
    }

    pub fn left_to_right() -> Self {
        Self::horizontal(HorizontalEdge::Left, HorizontalEdge::Right, Reference::Inner)
    }

    pub fn right_to_right() -> Self {
        Self::horizontal(HorizontalEdge::Right, HorizontalEdge::Right, Reference::Inner)
    }

    pub fn right_to_right_side() -> Self {
        Self::horizontal(HorizontalEdge::Right, HorizontalEdge::Right, Reference::Side)
    }

    pub fn right_to_left() -> Self {
        Self::horizontal(HorizontalEdge::Right, HorizontalEdge::Left, Reference::Inner)
    }

    pub fn center_to_center() -> Self {
        Self::horizontal(HorizontalEdge::Center, HorizontalEdge::Center, Reference::Inner)
    }

    pub fn center_to_center_side() -> Self {
        Self::horizontal(HorizontalEdge::Center, HorizontalEdge::Center, Reference::Side)
    }

    pub fn top_to_top() -> Self {
        Self::vertical(VerticalEdge::Top, VerticalEdge::Top, Reference::Inner)
    }

    pub fn top_to_top_side() -> Self {
        Self::vertical(VerticalEdge::Top, VerticalEdge::Top, Reference::Side)
    }

    pub fn top_to_bottom() -> Self {
        Self::vertical(VerticalEdge::Top, VerticalEdge::Bottom, Reference::Inner)
    }

    pub fn bottom_to_bottom() -> Self {
        Self::vertical(VerticalEdge::Bottom, VerticalEdge::Bottom, Reference::Inner)
    }

    pub fn bottom_to_bottom_side() -> Self {
        Self::vertical(VerticalEdge::Bottom, VerticalEdge::Bottom, Reference::Side)
    }

    pub fn bottom_to_top() -> Self {
        Self::vertical(VerticalEdge::Bottom, VerticalEdge::Top, Reference::Inner)
    }

    pub fn middle_to_middle() -> Self {
        Self::vertical(VerticalEdge::Middle, VerticalEdge::Middle, Reference::Inner)
    }

    pub fn middle_to_middle_side() -> Self {
        Self::vertical(VerticalEdge::Middle, VerticalEdge::Middle, Reference::Side)
    }

    /// Current edge position and the target line.
    fn positions(&self, page: &Page, id: ElementId) -> Result<(f64, f64), LayoutError> {
        let parent = page.element(require_parent(page, id, &self.name)?)?;
        let element = page.element(id)?;
        Ok(match self.pair {
            Pair::Horizontal(edge, target) => {
                (edge.of(element), target.line(parent, self.reference))
            }
            Pair::Vertical(edge, target) => (edge.of(element), target.line(parent, self.reference)),
        })
    }
}

impl Condition for Align {
    fn name(&self) -> &str {
        &self.name
    }

    fn config(&self) -> &ConditionConfig {
        &self.config
    }

    fn test(&self, page: &Page, id: ElementId) -> Result<bool, LayoutError> {
        let (current, target) = self.positions(page, id)?;
        Ok(approx_eq(current, target, self.config.tolerance))
    }

    fn fix(&self, page: &mut Page, id: ElementId) -> Result<Fix, LayoutError> {
        let (_, target) = self.positions(page, id)?;
        let element = page.element_mut(id)?;
        match self.pair {
            Pair::Horizontal(edge, _) => edge.move_to(element, target),
            Pair::Vertical(edge, _) => edge.move_to(element, target),
        }
        Ok(Fix::Applied)
    }
}
