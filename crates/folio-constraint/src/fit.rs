//! Conditions that derive an element's size from its parent.

use folio_core::{
    approx_eq, require_parent, Axis, Condition, ConditionConfig, Element, ElementId, Fix,
    LayoutError, Page,
};

use crate::lines::{HorizontalEdge, Reference, VerticalEdge};

/// Leading and trailing parent line along `axis`.
fn span(parent: &Element, axis: Axis, reference: Reference) -> (f64, f64) {
    match axis {
        Axis::Horizontal => (
            HorizontalEdge::Left.line(parent, reference),
            HorizontalEdge::Right.line(parent, reference),
        ),
        Axis::Vertical => (
            VerticalEdge::Top.line(parent, reference),
            VerticalEdge::Bottom.line(parent, reference),
        ),
    }
}

/// Margin edges of `element` along `axis`.
fn margin_span(element: &Element, axis: Axis) -> (f64, f64) {
    match axis {
        Axis::Horizontal => (element.margin_left(), element.margin_right()),
        Axis::Vertical => (element.margin_top(), element.margin_bottom()),
    }
}

fn fills(element: &Element, target: (f64, f64), axis: Axis, tolerance: f64) -> bool {
    let (start, end) = margin_span(element, axis);
    approx_eq(start, target.0, tolerance) && approx_eq(end, target.1, tolerance)
}

/// Size `element` must take to fill `target`, or why it cannot.
fn filling_size(element: &Element, target: (f64, f64), axis: Axis) -> Result<f64, String> {
    let available = target.1 - target.0;
    if available <= 0.0 {
        return Err(format!("container has no inner {axis}"));
    }
    let margins = match axis {
        Axis::Horizontal => element.margin.horizontal(),
        Axis::Vertical => element.margin.vertical(),
    };
    let size = available - margins;
    if size < 0.0 {
        return Err(format!("margins exceed the container {axis}"));
    }
    Ok(size)
}

fn place(element: &mut Element, start: f64, size: f64, axis: Axis) {
    match axis {
        Axis::Horizontal => {
            element.set_width(size);
            element.set_margin_left(start);
        }
        Axis::Vertical => {
            element.set_height(size);
            element.set_margin_top(start);
        }
    }
}

fn axes(both: bool, axis: Axis) -> &'static [Axis] {
    match (both, axis) {
        (true, _) => &[Axis::Horizontal, Axis::Vertical],
        (false, Axis::Horizontal) => &[Axis::Horizontal],
        (false, Axis::Vertical) => &[Axis::Vertical],
    }
}

/// Fill the parent box along one or both axes.
///
/// The element's leading margin edge moves to the parent's leading line and
/// its size becomes whatever is left once its margins are taken off.
#[derive(Debug, Clone)]
pub struct Fit {
    both: bool,
    axis: Axis,
    reference: Reference,
    config: ConditionConfig,
    name: String,
}

impl Fit {
    fn build(both: bool, axis: Axis, reference: Reference) -> Self {
        let base = match (both, axis) {
            (true, _) => "Fit",
            (false, Axis::Horizontal) => "Fit2Width",
            (false, Axis::Vertical) => "Fit2Height",
        };
        let name = match reference {
            Reference::Inner => base.to_string(),
            Reference::Side if both => "Fit2Sides".to_string(),
            Reference::Side => format!("{base}Sides"),
        };
        Self {
            both,
            axis,
            reference,
            config: ConditionConfig::default(),
            name,
        }
    }

    /// Fill the padded box on both axes.
    pub fn both() -> Self {
        Self::build(true, Axis::Horizontal, Reference::Inner)
    }

    pub fn width() -> Self {
        Self::build(false, Axis::Horizontal, Reference::Inner)
    }

    pub fn height() -> Self {
        Self::build(false, Axis::Vertical, Reference::Inner)
    }

    /// Fill the parent's outer sides on both axes.
    pub fn sides() -> Self {
        Self::build(true, Axis::Horizontal, Reference::Side)
    }

    pub fn width_sides() -> Self {
        Self::build(false, Axis::Horizontal, Reference::Side)
    }

    pub fn height_sides() -> Self {
        Self::build(false, Axis::Vertical, Reference::Side)
    }

    pub fn with_config(mut self, config: ConditionConfig) -> Self {
        self.config = config;
        self
    }
}

impl Condition for Fit {
    fn name(&self) -> &str {
        &self.name
    }

    fn config(&self) -> &ConditionConfig {
        &self.config
    }

    fn test(&self, page: &Page, id: ElementId) -> Result<bool, LayoutError> {
        let parent = page.element(require_parent(page, id, &self.name)?)?;
        let element = page.element(id)?;
        Ok(axes(self.both, self.axis).iter().all(|&axis| {
            fills(element, span(parent, axis, self.reference), axis, self.config.tolerance)
        }))
    }

    fn fix(&self, page: &mut Page, id: ElementId) -> Result<Fix, LayoutError> {
        let parent = page.element(require_parent(page, id, &self.name)?)?;
        let element = page.element(id)?;

        // Check every axis before writing so a half-feasible fit leaves the element alone.
        let mut placements = Vec::with_capacity(2);
        for &axis in axes(self.both, self.axis) {
            let target = span(parent, axis, self.reference);
            match filling_size(element, target, axis) {
                Ok(size) => placements.push((axis, target.0, size)),
                Err(reason) => return Ok(Fix::Unsatisfiable(reason)),
            }
        }

        let element = page.element_mut(id)?;
        for (axis, start, size) in placements {
            place(element, start, size, axis);
        }
        Ok(Fix::Applied)
    }
}

/// Parent line that one edge of the element grows or shrinks onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    Left,
    Right,
    Top,
    Bottom,
}

impl Boundary {
    pub(crate) fn label(self) -> &'static str {
        match self {
            Boundary::Left => "Left",
            Boundary::Right => "Right",
            Boundary::Top => "Top",
            Boundary::Bottom => "Bottom",
        }
    }
}

/// Move one edge onto a parent line while the opposite edge stays put.
#[derive(Debug, Clone)]
pub struct FitEdge {
    boundary: Boundary,
    reference: Reference,
    config: ConditionConfig,
    name: String,
}

impl FitEdge {
    pub fn new(boundary: Boundary, reference: Reference) -> Self {
        Self {
            boundary,
            reference,
            config: ConditionConfig::default(),
            name: format!("Fit2{}{}", boundary.label(), reference.suffix()),
        }
    }

    pub fn to_left() -> Self {
        Self::new(Boundary::Left, Reference::Inner)
    }

    pub fn to_right() -> Self {
        Self::new(Boundary::Right, Reference::Inner)
    }

    pub fn to_top() -> Self {
        Self::new(Boundary::Top, Reference::Inner)
    }

    pub fn to_bottom() -> Self {
        Self::new(Boundary::Bottom, Reference::Inner)
    }

    pub fn with_config(mut self, config: ConditionConfig) -> Self {
        self.config = config;
        self
    }

    fn positions(&self, page: &Page, id: ElementId) -> Result<(f64, f64), LayoutError> {
        let parent = page.element(require_parent(page, id, &self.name)?)?;
        let element = page.element(id)?;
        Ok(match self.boundary {
            Boundary::Left => (
                element.margin_left(),
                HorizontalEdge::Left.line(parent, self.reference),
            ),
            Boundary::Right => (
                element.margin_right(),
                HorizontalEdge::Right.line(parent, self.reference),
            ),
            Boundary::Top => (
                element.margin_top(),
                VerticalEdge::Top.line(parent, self.reference),
            ),
            Boundary::Bottom => (
                element.margin_bottom(),
                VerticalEdge::Bottom.line(parent, self.reference),
            ),
        })
    }
}

impl Condition for FitEdge {
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
        let (_, line) = self.positions(page, id)?;
        let element = page.element_mut(id)?;
        let (start, size) = match self.boundary {
            Boundary::Left => {
                let x = line + element.margin.left;
                (x, element.right() - x)
            }
            Boundary::Right => (
                element.left(),
                line - element.margin.right - element.left(),
            ),
            Boundary::Top => {
                let y = line + element.margin.top;
                (y, element.bottom() - y)
            }
            Boundary::Bottom => (
                element.top(),
                line - element.margin.bottom - element.top(),
            ),
        };
        if size < 0.0 {
            return Ok(Fix::unsatisfiable(format!(
                "{} edge would cross the opposite edge",
                self.boundary.label().to_lowercase()
            )));
        }
        match self.boundary {
            Boundary::Left | Boundary::Right => {
                element.set_left(start);
                element.set_width(size);
            }
            Boundary::Top | Boundary::Bottom => {
                element.set_top(start);
                element.set_height(size);
            }
        }
        Ok(Fix::Applied)
    }
}

/// Fill one axis and scale the other to keep the aspect ratio.
#[derive(Debug, Clone)]
pub struct Scale {
    axis: Axis,
    reference: Reference,
    config: ConditionConfig,
    name: String,
}

impl Scale {
    fn build(axis: Axis, reference: Reference) -> Self {
        let base = match axis {
            Axis::Horizontal => "Scale2Width",
            Axis::Vertical => "Scale2Height",
        };
        Self {
            axis,
            reference,
            config: ConditionConfig::default(),
            name: format!("{base}{}", reference.suffix()),
        }
    }

    pub fn width() -> Self {
        Self::build(Axis::Horizontal, Reference::Inner)
    }

    pub fn height() -> Self {
        Self::build(Axis::Vertical, Reference::Inner)
    }

    pub fn width_side() -> Self {
        Self::build(Axis::Horizontal, Reference::Side)
    }

    pub fn height_side() -> Self {
        Self::build(Axis::Vertical, Reference::Side)
    }

    pub fn with_config(mut self, config: ConditionConfig) -> Self {
        self.config = config;
        self
    }
}

impl Condition for Scale {
    fn name(&self) -> &str {
        &self.name
    }

    fn config(&self) -> &ConditionConfig {
        &self.config
    }

    fn test(&self, page: &Page, id: ElementId) -> Result<bool, LayoutError> {
        let parent = page.element(require_parent(page, id, &self.name)?)?;
        let element = page.element(id)?;
        let target = span(parent, self.axis, self.reference);
        Ok(fills(element, target, self.axis, self.config.tolerance))
    }

    fn fix(&self, page: &mut Page, id: ElementId) -> Result<Fix, LayoutError> {
        let parent = page.element(require_parent(page, id, &self.name)?)?;
        let element = page.element(id)?;
        let (extent, other) = match self.axis {
            Axis::Horizontal => (element.width(), element.height()),
            Axis::Vertical => (element.height(), element.width()),
        };
        if extent == 0.0 {
            return Err(LayoutError::DegenerateExtent {
                element: id,
                condition: self.name.clone(),
                axis: self.axis,
            });
        }
        let ratio = other / extent;
        let target = span(parent, self.axis, self.reference);
        let size = match filling_size(element, target, self.axis) {
            Ok(size) => size,
            Err(reason) => return Ok(Fix::Unsatisfiable(reason)),
        };

        let element = page.element_mut(id)?;
        place(element, target.0, size, self.axis);
        match self.axis {
            Axis::Horizontal => element.set_height(size * ratio),
            Axis::Vertical => element.set_width(size * ratio),
        }
        Ok(Fix::Applied)
    }
}
