//! Containers that shrink onto their children.

use folio_core::{
    Condition, ConditionConfig, Element, ElementId, Fix, LayoutError, Page, Rect, Sides,
};
use glam::DVec2;

use crate::fit::Boundary;
use crate::lines::Reference;

const ALL: &[Boundary] = &[Boundary::Left, Boundary::Top, Boundary::Right, Boundary::Bottom];
const WIDTH: &[Boundary] = &[Boundary::Left, Boundary::Right];
const HEIGHT: &[Boundary] = &[Boundary::Top, Boundary::Bottom];

/// Move edges of a container onto the combined margin box of its children.
///
/// With [`Reference::Inner`] the padded edge lands on the children, with
/// [`Reference::Side`] the outer side does. Children keep their place on the
/// page: when a leading edge moves they are shifted back by the same amount
/// in the container's frame.
#[derive(Debug, Clone)]
pub struct ShrinkToChildren {
    edges: &'static [Boundary],
    reference: Reference,
    config: ConditionConfig,
    name: String,
}

impl ShrinkToChildren {
    fn with_edges(edges: &'static [Boundary], reference: Reference, stem: &str) -> Self {
        let suffix = match (reference, edges.len()) {
            (Reference::Inner, _) => "",
            (Reference::Side, 1) => "Side",
            (Reference::Side, _) => "Sides",
        };
        Self {
            edges,
            reference,
            config: ConditionConfig::default(),
            name: format!("Shrink2Block{stem}{suffix}"),
        }
    }

    /// A single edge.
    pub fn edge(boundary: Boundary, reference: Reference) -> Self {
        let edges: &'static [Boundary] = match boundary {
            Boundary::Left => &[Boundary::Left],
            Boundary::Right => &[Boundary::Right],
            Boundary::Top => &[Boundary::Top],
            Boundary::Bottom => &[Boundary::Bottom],
        };
        Self::with_edges(edges, reference, boundary.label())
    }

    pub fn all() -> Self {
        Self::with_edges(ALL, Reference::Inner, "")
    }

    pub fn all_sides() -> Self {
        Self::with_edges(ALL, Reference::Side, "")
    }

    pub fn width() -> Self {
        Self::with_edges(WIDTH, Reference::Inner, "Width")
    }

    pub fn width_sides() -> Self {
        Self::with_edges(WIDTH, Reference::Side, "Width")
    }

    pub fn height() -> Self {
        Self::with_edges(HEIGHT, Reference::Inner, "Height")
    }

    pub fn height_sides() -> Self {
        Self::with_edges(HEIGHT, Reference::Side, "Height")
    }

    pub fn with_config(mut self, config: ConditionConfig) -> Self {
        self.config = config;
        self
    }

    fn has(&self, boundary: Boundary) -> bool {
        self.edges.contains(&boundary)
    }

    fn inset(&self, element: &Element) -> Sides {
        match self.reference {
            Reference::Inner => element.padding,
            Reference::Side => Sides::default(),
        }
    }

    /// The element's own box in its frame, with the requested edges moved
    /// onto `bounds`.
    fn target(&self, element: &Element, bounds: Rect) -> Rect {
        let inset = self.inset(element);
        let pick = |boundary, onto: f64, current: f64| {
            if self.has(boundary) {
                onto
            } else {
                current
            }
        };
        let left = pick(Boundary::Left, bounds.x - inset.left, 0.0);
        let top = pick(Boundary::Top, bounds.y - inset.top, 0.0);
        let right = pick(Boundary::Right, bounds.right() + inset.right, element.width());
        let bottom = pick(Boundary::Bottom, bounds.bottom() + inset.bottom, element.height());
        Rect::new(left, top, right - left, bottom - top)
    }
}

impl Condition for ShrinkToChildren {
    fn name(&self) -> &str {
        &self.name
    }

    fn config(&self) -> &ConditionConfig {
        &self.config
    }

    fn test(&self, page: &Page, id: ElementId) -> Result<bool, LayoutError> {
        let element = page.element(id)?;
        let Some(bounds) = page.tree().children_bounds(id) else {
            return Ok(false);
        };
        let own = Rect::new(0.0, 0.0, element.width(), element.height());
        Ok(self.target(element, bounds).approx_eq(&own, self.config.tolerance))
    }

    fn fix(&self, page: &mut Page, id: ElementId) -> Result<Fix, LayoutError> {
        let Some(bounds) = page.tree().children_bounds(id) else {
            return Ok(Fix::unsatisfiable("no children to shrink onto"));
        };
        let target = self.target(page.element(id)?, bounds);
        if target.width < 0.0 || target.height < 0.0 {
            return Ok(Fix::unsatisfiable("children lie beyond the opposite edge"));
        }

        let element = page.element_mut(id)?;
        let shift = target.position();
        element.rect = Rect::from_vecs(element.rect.position() + shift, target.size());

        if shift != DVec2::ZERO {
            for child in page.tree().children(id).to_vec() {
                let child = page.element_mut(child)?;
                child.rect = child.rect.translate(-shift);
            }
        }
        Ok(Fix::Applied)
    }

    fn touches(&self, page: &Page, id: ElementId) -> Vec<ElementId> {
        std::iter::once(id)
            .chain(page.tree().children(id).iter().copied())
            .collect()
    }
}
