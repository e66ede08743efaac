//! Text flow between linked text boxes.

use folio_core::{
    approx_eq, Condition, ConditionConfig, Element, ElementId, Fix, LayoutError, Page,
};
use tracing::trace;

/// Hand text that does not fit the inner height on to the linked next box.
///
/// The source keeps as much content as its inner height holds and the
/// excess is added to the next box's content height. That box may overflow
/// in turn, so a chain drains one link per call.
#[derive(Debug, Clone, Default)]
pub struct Overflow2Next {
    config: ConditionConfig,
}

impl Overflow2Next {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: ConditionConfig) -> Self {
        self.config = config;
        self
    }
}

impl Condition for Overflow2Next {
    fn name(&self) -> &str {
        "Overflow2Next"
    }

    fn config(&self) -> &ConditionConfig {
        &self.config
    }

    fn test(&self, page: &Page, id: ElementId) -> Result<bool, LayoutError> {
        let element = page.element(id)?;
        let Some(text) = element.text_content() else {
            return Ok(true);
        };
        Ok(text.content_height - element.inner_height().max(0.0) <= self.config.tolerance)
    }

    fn touches(&self, page: &Page, id: ElementId) -> Vec<ElementId> {
        let next = page
            .tree()
            .get(id)
            .and_then(Element::text_content)
            .and_then(|text| text.next);
        std::iter::once(id).chain(next).collect()
    }

    fn fix(&self, page: &mut Page, id: ElementId) -> Result<Fix, LayoutError> {
        let element = page.element(id)?;
        let capacity = element.inner_height().max(0.0);
        let Some(text) = element.text_content() else {
            return Ok(Fix::Applied);
        };
        let excess = text.content_height - capacity;

        let Some(next) = text.next else {
            return Ok(Fix::unsatisfiable("no next element linked"));
        };
        if next == id {
            return Ok(Fix::unsatisfiable("linked to itself"));
        }
        let Some(target) = page.tree_mut().get_mut(next) else {
            return Ok(Fix::unsatisfiable(format!("next element {next} no longer exists")));
        };
        let Some(target_text) = target.text_content_mut() else {
            return Ok(Fix::unsatisfiable(format!("next element {next} is not a text box")));
        };
        target_text.content_height += excess;

        if let Some(text) = page.element_mut(id)?.text_content_mut() {
            text.content_height = capacity;
        }
        trace!(from = %id, to = %next, excess, "text overflow moved on");
        Ok(Fix::Applied)
    }
}

/// Which extents of a text box follow its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextExtent {
    #[default]
    Height,
    Width,
    /// Width and height together
    Bounds,
}

/// Size a text box to its content plus padding.
///
/// The leading edges stay put; only the width and/or height change.
#[derive(Debug, Clone, Default)]
pub struct ShrinkToContent {
    extent: TextExtent,
    config: ConditionConfig,
}

impl ShrinkToContent {
    pub fn new(extent: TextExtent) -> Self {
        Self {
            extent,
            config: ConditionConfig::default(),
        }
    }

    pub fn height() -> Self {
        Self::new(TextExtent::Height)
    }

    pub fn width() -> Self {
        Self::new(TextExtent::Width)
    }

    pub fn bounds() -> Self {
        Self::new(TextExtent::Bounds)
    }

    pub fn with_config(mut self, config: ConditionConfig) -> Self {
        self.config = config;
        self
    }

    fn sizes_width(&self) -> bool {
        matches!(self.extent, TextExtent::Width | TextExtent::Bounds)
    }

    fn sizes_height(&self) -> bool {
        matches!(self.extent, TextExtent::Height | TextExtent::Bounds)
    }
}

/// Outer size of `element` when it wraps its text exactly.
fn content_size(element: &Element) -> Option<(f64, f64)> {
    element.text_content().map(|text| {
        (
            text.content_width + element.padding.horizontal(),
            text.content_height + element.padding.vertical(),
        )
    })
}

impl Condition for ShrinkToContent {
    fn name(&self) -> &str {
        match self.extent {
            TextExtent::Height => "Shrink2TextHeight",
            TextExtent::Width => "Shrink2TextWidth",
            TextExtent::Bounds => "Shrink2TextBounds",
        }
    }

    fn config(&self) -> &ConditionConfig {
        &self.config
    }

    fn test(&self, page: &Page, id: ElementId) -> Result<bool, LayoutError> {
        let element = page.element(id)?;
        let Some((width, height)) = content_size(element) else {
            return Ok(true);
        };
        let tolerance = self.config.tolerance;
        Ok((!self.sizes_width() || approx_eq(element.width(), width, tolerance))
            && (!self.sizes_height() || approx_eq(element.height(), height, tolerance)))
    }

    fn fix(&self, page: &mut Page, id: ElementId) -> Result<Fix, LayoutError> {
        let element = page.element_mut(id)?;
        if let Some((width, height)) = content_size(element) {
            if self.sizes_width() {
                element.set_width(width);
            }
            if self.sizes_height() {
                element.set_height(height);
            }
        }
        Ok(Fix::Applied)
    }
}
