//! Flow-order stacking against previous siblings.

use folio_core::{
    approx_eq, require_parent, Condition, ConditionConfig, Element, ElementId, Fix, LayoutError,
    Page,
};

use crate::lines::{spans_overlap, HorizontalEdge, Reference, VerticalEdge};

/// Direction an element floats in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    fn label(self) -> &'static str {
        match self {
            Direction::Up => "Top",
            Direction::Down => "Bottom",
            Direction::Left => "Left",
            Direction::Right => "Right",
        }
    }
}

/// Where a float should land.
#[derive(Debug, Clone, Copy)]
struct Landing {
    /// Current position of the leading margin edge
    current: f64,
    /// Target for that edge
    target: f64,
    /// Whether the element has any previous sibling on its layer
    has_previous: bool,
    /// Whether the element sits inside the padded box once moved
    fits: bool,
}

/// Slide an element towards one side of its parent until it meets a previous
/// sibling or the parent line.
///
/// Only siblings earlier in flow order on the same `z` layer take part, and
/// only when their margin span across the float direction overlaps the
/// element's: a float up stops below the lowest such sibling. Spans that
/// only touch do not overlap, so a sibling ending exactly where the element
/// starts does not block it.
#[derive(Debug, Clone)]
pub struct Float {
    direction: Direction,
    reference: Reference,
    require_previous: bool,
    config: ConditionConfig,
    name: String,
}

impl Float {
    pub fn new(direction: Direction, reference: Reference) -> Self {
        Self {
            direction,
            reference,
            require_previous: false,
            config: ConditionConfig::default(),
            name: format!("Float2{}{}", direction.label(), reference.suffix()),
        }
    }

    pub fn top() -> Self {
        Self::new(Direction::Up, Reference::Inner)
    }

    pub fn bottom() -> Self {
        Self::new(Direction::Down, Reference::Inner)
    }

    pub fn left() -> Self {
        Self::new(Direction::Left, Reference::Inner)
    }

    pub fn right() -> Self {
        Self::new(Direction::Right, Reference::Inner)
    }

    pub fn top_side() -> Self {
        Self::new(Direction::Up, Reference::Side)
    }

    pub fn bottom_side() -> Self {
        Self::new(Direction::Down, Reference::Side)
    }

    pub fn left_side() -> Self {
        Self::new(Direction::Left, Reference::Side)
    }

    pub fn right_side() -> Self {
        Self::new(Direction::Right, Reference::Side)
    }

    /// Treat a float without a previous sibling as unsatisfiable.
    pub fn requiring_previous(mut self) -> Self {
        self.require_previous = true;
        self
    }

    pub fn with_config(mut self, config: ConditionConfig) -> Self {
        self.config = config;
        self
    }

    /// Float into a corner: this direction first, then `second` with the
    /// same reference and options. `None` when both directions lie on the
    /// same axis.
    pub fn then(self, second: Direction) -> Option<FloatCorner> {
        if self.direction.is_vertical() == second.is_vertical() {
            return None;
        }
        let mut then = Float::new(second, self.reference);
        then.require_previous = self.require_previous;
        then.config = self.config;
        let plural = match self.reference {
            Reference::Inner => "",
            Reference::Side => "Sides",
        };
        let name = format!("Float2{}{}{plural}", self.direction.label(), second.label());
        Some(FloatCorner {
            first: self,
            then,
            name,
        })
    }

    fn landing(&self, page: &Page, id: ElementId) -> Result<Landing, LayoutError> {
        let parent_id = require_parent(page, id, &self.name)?;
        let parent = page.element(parent_id)?;
        let element = page.element(id)?;
        let tolerance = self.config.tolerance;

        let siblings = page
            .tree()
            .previous_siblings(id)
            .iter()
            .filter_map(|&sibling| page.tree().get(sibling))
            .filter(|sibling| approx_eq(sibling.z, element.z, tolerance))
            .collect::<Vec<_>>();
        let has_previous = !siblings.is_empty();

        let across: fn(&Element) -> (f64, f64) = match self.direction {
            Direction::Up | Direction::Down => |e| (e.margin_left(), e.margin_right()),
            Direction::Left | Direction::Right => |e| (e.margin_top(), e.margin_bottom()),
        };
        let blocking = siblings
            .iter()
            .filter(|sibling| spans_overlap(across(sibling), across(element)));

        let reference = self.reference;
        let landing = match self.direction {
            Direction::Up => {
                let target = blocking
                    .map(|s| s.margin_bottom())
                    .fold(VerticalEdge::Top.line(parent, reference), f64::max);
                let bottom = target + element.margin_bottom() - element.margin_top();
                Landing {
                    current: element.margin_top(),
                    target,
                    has_previous,
                    fits: bottom <= VerticalEdge::Bottom.line(parent, reference) + tolerance,
                }
            }
            Direction::Down => {
                let target = blocking
                    .map(|s| s.margin_top())
                    .fold(VerticalEdge::Bottom.line(parent, reference), f64::min);
                let top = target - (element.margin_bottom() - element.margin_top());
                Landing {
                    current: element.margin_bottom(),
                    target,
                    has_previous,
                    fits: top >= VerticalEdge::Top.line(parent, reference) - tolerance,
                }
            }
            Direction::Left => {
                let target = blocking
                    .map(|s| s.margin_right())
                    .fold(HorizontalEdge::Left.line(parent, reference), f64::max);
                let right = target + element.margin_right() - element.margin_left();
                Landing {
                    current: element.margin_left(),
                    target,
                    has_previous,
                    fits: right <= HorizontalEdge::Right.line(parent, reference) + tolerance,
                }
            }
            Direction::Right => {
                let target = blocking
                    .map(|s| s.margin_left())
                    .fold(HorizontalEdge::Right.line(parent, reference), f64::min);
                let left = target - (element.margin_right() - element.margin_left());
                Landing {
                    current: element.margin_right(),
                    target,
                    has_previous,
                    fits: left >= HorizontalEdge::Left.line(parent, reference) - tolerance,
                }
            }
        };
        Ok(landing)
    }

    /// Containment only matters against the padded box.
    fn contained(&self, landing: &Landing) -> bool {
        self.reference == Reference::Side || landing.fits
    }
}

impl Condition for Float {
    fn name(&self) -> &str {
        &self.name
    }

    fn config(&self) -> &ConditionConfig {
        &self.config
    }

    fn test(&self, page: &Page, id: ElementId) -> Result<bool, LayoutError> {
        let landing = self.landing(page, id)?;
        if self.require_previous && !landing.has_previous {
            return Ok(false);
        }
        Ok(approx_eq(landing.current, landing.target, self.config.tolerance)
            && self.contained(&landing))
    }

    fn fix(&self, page: &mut Page, id: ElementId) -> Result<Fix, LayoutError> {
        let landing = self.landing(page, id)?;
        if self.require_previous && !landing.has_previous {
            return Ok(Fix::unsatisfiable("no previous sibling to float against"));
        }

        let element = page.element_mut(id)?;
        match self.direction {
            Direction::Up => element.set_margin_top(landing.target),
            Direction::Down => element.set_margin_bottom(landing.target),
            Direction::Left => element.set_margin_left(landing.target),
            Direction::Right => element.set_margin_right(landing.target),
        }

        if self.contained(&landing) {
            Ok(Fix::Applied)
        } else {
            // Left at the landing spot; there is nowhere better to go.
            Ok(Fix::unsatisfiable("overflows the container"))
        }
    }
}

/// Two floats on perpendicular axes scored as one condition, such as
/// `Float2TopLeft`.
///
/// Both floats must hold for the corner to hold. The first one is applied
/// first, so it decides which siblings the second one stacks against.
#[derive(Debug, Clone)]
pub struct FloatCorner {
    first: Float,
    then: Float,
    name: String,
}

impl FloatCorner {
    pub fn with_config(mut self, config: ConditionConfig) -> Self {
        self.first.config = config;
        self.then.config = config;
        self
    }
}

impl Condition for FloatCorner {
    fn name(&self) -> &str {
        &self.name
    }

    fn config(&self) -> &ConditionConfig {
        &self.first.config
    }

    fn test(&self, page: &Page, id: ElementId) -> Result<bool, LayoutError> {
        Ok(self.first.test(page, id)? && self.then.test(page, id)?)
    }

    fn fix(&self, page: &mut Page, id: ElementId) -> Result<Fix, LayoutError> {
        match self.first.fix(page, id)? {
            Fix::Applied => self.then.fix(page, id),
            unsatisfiable => Ok(unsatisfiable),
        }
    }
}
