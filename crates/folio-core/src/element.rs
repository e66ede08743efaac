//! Elements: geometry, box model and attached conditions.
//!
//! Positions are local to the parent's outer top-left corner. The inner box
//! that a parent offers its children is expressed in the parent's own frame,
//! so a child compares its `left()` against `parent.inner_left()` directly.

use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::condition::Condition;
use crate::geometry::{Rect, Sides};
use crate::grid::ColumnGrid;

/// Stable identifier of an element within one page's tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementId(pub u32);

impl ElementId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Ordered list of conditions attached to one element.
pub type ConditionList = SmallVec<[Arc<dyn Condition>; 4]>;

/// Text content as measured by the sizing provider before solving.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextContent {
    /// Width of the widest laid-out line
    pub content_width: f64,
    /// Height of the laid-out text
    pub content_height: f64,
    /// Distance of the first baseline below the inner top
    pub first_baseline: f64,
    /// Line pitch of the text
    pub line_height: f64,
    /// Element that receives content which does not fit
    pub next: Option<ElementId>,
}

/// Raster or vector image reference with its intrinsic size.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImageContent {
    pub source: String,
    pub intrinsic_width: f64,
    pub intrinsic_height: f64,
}

/// What an element carries. Drawing is left to exporters.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ElementKind {
    /// Root of a page
    Page,
    /// Plain rectangle
    #[default]
    Rect,
    /// Container with no content of its own
    Group,
    Text(TextContent),
    Image(ImageContent),
}

/// A node of the element tree.
#[derive(Debug, Clone, Default)]
pub struct Element {
    /// Optional name, used for lookup and in failure reports
    pub name: Option<String>,
    pub kind: ElementKind,
    /// Position (local to parent) and size
    pub rect: Rect,
    pub padding: Sides,
    pub margin: Sides,
    /// Layer; floats only interact with siblings on the same layer
    pub z: f64,
    /// Column/row grid offered to children
    pub grid: Option<ColumnGrid>,
    pub conditions: ConditionList,
    pub(crate) parent: Option<ElementId>,
    pub(crate) children: Vec<ElementId>,
}

impl Element {
    /// Create an element of the given kind and size at the origin.
    pub fn new(kind: ElementKind, width: f64, height: f64) -> Self {
        Self {
            kind,
            rect: Rect::new(0.0, 0.0, width, height),
            ..Default::default()
        }
    }

    /// Plain rectangle.
    pub fn rect(width: f64, height: f64) -> Self {
        Self::new(ElementKind::Rect, width, height)
    }

    /// Group container.
    pub fn group(width: f64, height: f64) -> Self {
        Self::new(ElementKind::Group, width, height)
    }

    /// Text box with measured content.
    pub fn text(width: f64, height: f64, content: TextContent) -> Self {
        Self::new(ElementKind::Text(content), width, height)
    }

    /// Image box.
    pub fn image(width: f64, height: f64, content: ImageContent) -> Self {
        Self::new(ElementKind::Image(content), width, height)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the position.
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.rect.x = x;
        self.rect.y = y;
        self
    }

    pub fn with_padding(mut self, padding: Sides) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_margin(mut self, margin: Sides) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_z(mut self, z: f64) -> Self {
        self.z = z;
        self
    }

    pub fn with_grid(mut self, grid: ColumnGrid) -> Self {
        self.grid = Some(grid);
        self
    }

    /// Attach a condition after the ones already attached.
    pub fn with_condition(mut self, condition: impl Condition + 'static) -> Self {
        self.conditions.push(Arc::new(condition));
        self
    }

    /// Attach a shared condition.
    pub fn push_condition(&mut self, condition: Arc<dyn Condition>) {
        self.conditions.push(condition);
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    pub fn text_content(&self) -> Option<&TextContent> {
        match &self.kind {
            ElementKind::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn text_content_mut(&mut self) -> Option<&mut TextContent> {
        match &mut self.kind {
            ElementKind::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Name for reports, falling back to the content kind.
    pub fn label(&self) -> &str {
        match (&self.name, &self.kind) {
            (Some(name), _) => name.as_str(),
            (None, ElementKind::Page) => "page",
            (None, ElementKind::Rect) => "rect",
            (None, ElementKind::Group) => "group",
            (None, ElementKind::Text(_)) => "text",
            (None, ElementKind::Image(_)) => "image",
        }
    }

    // Edges in the parent's frame.

    pub fn left(&self) -> f64 {
        self.rect.x
    }

    pub fn right(&self) -> f64 {
        self.rect.right()
    }

    pub fn top(&self) -> f64 {
        self.rect.y
    }

    pub fn bottom(&self) -> f64 {
        self.rect.bottom()
    }

    pub fn center_x(&self) -> f64 {
        self.rect.center_x()
    }

    pub fn middle_y(&self) -> f64 {
        self.rect.center_y()
    }

    pub fn width(&self) -> f64 {
        self.rect.width
    }

    pub fn height(&self) -> f64 {
        self.rect.height
    }

    pub fn margin_left(&self) -> f64 {
        self.rect.x - self.margin.left
    }

    pub fn margin_right(&self) -> f64 {
        self.rect.right() + self.margin.right
    }

    pub fn margin_top(&self) -> f64 {
        self.rect.y - self.margin.top
    }

    pub fn margin_bottom(&self) -> f64 {
        self.rect.bottom() + self.margin.bottom
    }

    /// Geometry and text content height: everything a condition may write.
    pub(crate) fn layout_state(&self) -> (Rect, Option<f64>) {
        (self.rect, self.text_content().map(|text| text.content_height))
    }

    /// Bounds including the margin.
    pub fn outer_rect(&self) -> Rect {
        self.rect.expand(&self.margin)
    }

    // Inner box offered to children, in this element's own frame.

    pub fn inner_left(&self) -> f64 {
        self.padding.left
    }

    pub fn inner_right(&self) -> f64 {
        self.rect.width - self.padding.right
    }

    pub fn inner_top(&self) -> f64 {
        self.padding.top
    }

    pub fn inner_bottom(&self) -> f64 {
        self.rect.height - self.padding.bottom
    }

    pub fn inner_width(&self) -> f64 {
        self.rect.width - self.padding.horizontal()
    }

    pub fn inner_height(&self) -> f64 {
        self.rect.height - self.padding.vertical()
    }

    pub fn inner_center_x(&self) -> f64 {
        self.inner_left() + self.inner_width() / 2.0
    }

    pub fn inner_middle_y(&self) -> f64 {
        self.inner_top() + self.inner_height() / 2.0
    }

    /// Inner box as a rect in this element's own frame.
    pub fn inner_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.rect.width, self.rect.height).inset(&self.padding)
    }

    // Setters move (or resize) without touching any other element.

    pub fn set_left(&mut self, value: f64) {
        self.rect.x = value;
    }

    pub fn set_right(&mut self, value: f64) {
        self.rect.x = value - self.rect.width;
    }

    pub fn set_center_x(&mut self, value: f64) {
        self.rect.x = value - self.rect.width / 2.0;
    }

    pub fn set_top(&mut self, value: f64) {
        self.rect.y = value;
    }

    pub fn set_bottom(&mut self, value: f64) {
        self.rect.y = value - self.rect.height;
    }

    pub fn set_middle_y(&mut self, value: f64) {
        self.rect.y = value - self.rect.height / 2.0;
    }

    pub fn set_margin_left(&mut self, value: f64) {
        self.rect.x = value + self.margin.left;
    }

    pub fn set_margin_right(&mut self, value: f64) {
        self.rect.x = value - self.margin.right - self.rect.width;
    }

    pub fn set_margin_top(&mut self, value: f64) {
        self.rect.y = value + self.margin.top;
    }

    pub fn set_margin_bottom(&mut self, value: f64) {
        self.rect.y = value - self.margin.bottom - self.rect.height;
    }

    pub fn set_width(&mut self, value: f64) {
        self.rect.width = value;
    }

    pub fn set_height(&mut self, value: f64) {
        self.rect.height = value;
    }
}
