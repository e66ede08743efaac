//! Edges of an element and the matching lines of its parent.
//!
//! Every condition reads and writes geometry through these helpers so the
//! margin and padding rules live in one place: element edges include the
//! element's margin, parent lines are either the padded box
//! ([`Reference::Inner`]) or the outer sides ([`Reference::Side`]).

use folio_core::Element;

/// Which box of the parent a condition aligns to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reference {
    /// Parent box with padding removed
    #[default]
    Inner,
    /// Parent outer sides
    Side,
}

impl Reference {
    pub(crate) fn suffix(self) -> &'static str {
        match self {
            Reference::Inner => "",
            Reference::Side => "Side",
        }
    }
}

/// Horizontal edge or line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalEdge {
    Left,
    Center,
    Right,
}

/// Vertical edge or line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalEdge {
    Top,
    Middle,
    Bottom,
}

impl HorizontalEdge {
    pub(crate) fn label(self) -> &'static str {
        match self {
            HorizontalEdge::Left => "Left",
            HorizontalEdge::Center => "Center",
            HorizontalEdge::Right => "Right",
        }
    }

    /// Position of this edge of `e`, margin included.
    pub fn of(self, e: &Element) -> f64 {
        match self {
            HorizontalEdge::Left => e.margin_left(),
            HorizontalEdge::Center => e.center_x(),
            HorizontalEdge::Right => e.margin_right(),
        }
    }

    /// Move `e` so this edge sits at `value`.
    pub fn move_to(self, e: &mut Element, value: f64) {
        match self {
            HorizontalEdge::Left => e.set_margin_left(value),
            HorizontalEdge::Center => e.set_center_x(value),
            HorizontalEdge::Right => e.set_margin_right(value),
        }
    }

    /// Line of `parent` in the parent's own frame.
    pub fn line(self, parent: &Element, reference: Reference) -> f64 {
        match (self, reference) {
            (HorizontalEdge::Left, Reference::Inner) => parent.inner_left(),
            (HorizontalEdge::Left, Reference::Side) => 0.0,
            (HorizontalEdge::Center, Reference::Inner) => parent.inner_center_x(),
            (HorizontalEdge::Center, Reference::Side) => parent.width() / 2.0,
            (HorizontalEdge::Right, Reference::Inner) => parent.inner_right(),
            (HorizontalEdge::Right, Reference::Side) => parent.width(),
        }
    }
}

impl VerticalEdge {
    pub(crate) fn label(self) -> &'static str {
        match self {
            VerticalEdge::Top => "Top",
            VerticalEdge::Middle => "Middle",
            VerticalEdge::Bottom => "Bottom",
        }
    }

    /// Position of this edge of `e`, margin included.
    pub fn of(self, e: &Element) -> f64 {
        match self {
            VerticalEdge::Top => e.margin_top(),
            VerticalEdge::Middle => e.middle_y(),
            VerticalEdge::Bottom => e.margin_bottom(),
        }
    }

    /// Move `e` so this edge sits at `value`.
    pub fn move_to(self, e: &mut Element, value: f64) {
        match self {
            VerticalEdge::Top => e.set_margin_top(value),
            VerticalEdge::Middle => e.set_middle_y(value),
            VerticalEdge::Bottom => e.set_margin_bottom(value),
        }
    }

    /// Line of `parent` in the parent's own frame.
    pub fn line(self, parent: &Element, reference: Reference) -> f64 {
        match (self, reference) {
            (VerticalEdge::Top, Reference::Inner) => parent.inner_top(),
            (VerticalEdge::Top, Reference::Side) => 0.0,
            (VerticalEdge::Middle, Reference::Inner) => parent.inner_middle_y(),
            (VerticalEdge::Middle, Reference::Side) => parent.height() / 2.0,
            (VerticalEdge::Bottom, Reference::Inner) => parent.inner_bottom(),
            (VerticalEdge::Bottom, Reference::Side) => parent.height(),
        }
    }
}

/// Whether two `[start, end]` spans share some length. Identical spans
/// overlap even when empty.
pub(crate) fn spans_overlap(a: (f64, f64), b: (f64, f64)) -> bool {
    (a.0 < b.1 && b.0 < a.1) || a == b
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::Sides;

    #[test]
    fn test_parent_lines() {
        let parent = Element::group(300.0, 200.0).with_padding(Sides::new(10.0, 20.0, 30.0, 40.0));
        assert_eq!(HorizontalEdge::Left.line(&parent, Reference::Inner), 40.0);
        assert_eq!(HorizontalEdge::Right.line(&parent, Reference::Inner), 280.0);
        assert_eq!(HorizontalEdge::Center.line(&parent, Reference::Inner), 160.0);
        assert_eq!(HorizontalEdge::Right.line(&parent, Reference::Side), 300.0);
        assert_eq!(VerticalEdge::Bottom.line(&parent, Reference::Inner), 170.0);
        assert_eq!(VerticalEdge::Middle.line(&parent, Reference::Inner), 90.0);
        assert_eq!(VerticalEdge::Top.line(&parent, Reference::Side), 0.0);
    }

    #[test]
    fn test_edges_include_margin() {
        let mut e = Element::rect(50.0, 20.0).with_margin(Sides::uniform(5.0));
        HorizontalEdge::Right.move_to(&mut e, 100.0);
        assert_eq!(e.right(), 95.0);
        assert_eq!(HorizontalEdge::Right.of(&e), 100.0);
        VerticalEdge::Top.move_to(&mut e, 0.0);
        assert_eq!(e.top(), 5.0);
    }

    #[test]
    fn test_spans_overlap() {
        assert!(spans_overlap((0.0, 10.0), (5.0, 15.0)));
        assert!(!spans_overlap((0.0, 10.0), (10.0, 20.0)));
        assert!(spans_overlap((3.0, 3.0), (3.0, 3.0)));
    }
}
