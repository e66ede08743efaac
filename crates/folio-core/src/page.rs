//! Pages: the root container handed to the solver.

use crate::element::{Element, ElementId, ElementKind};
use crate::errors::{ConfigError, LayoutError};
use crate::geometry::{Origin, Rect, Sides};
use crate::grid::ColumnGrid;
use crate::tree::ElementTree;

/// Vertical grid that text baselines snap to.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaselineGrid {
    /// Distance between grid lines
    pub unit: f64,
    /// Position of the first grid line, measured from the page top
    pub start: f64,
}

impl BaselineGrid {
    pub fn new(unit: f64) -> Result<Self, ConfigError> {
        Self::with_start(unit, 0.0)
    }

    pub fn with_start(unit: f64, start: f64) -> Result<Self, ConfigError> {
        if !unit.is_finite() || unit <= 0.0 {
            return Err(ConfigError::InvalidGridUnit(unit));
        }
        Ok(Self { unit, start })
    }
}

/// One page: an element tree rooted at the page element, plus the page-wide
/// settings conditions may read.
#[derive(Debug, Clone)]
pub struct Page {
    pub name: Option<String>,
    tree: ElementTree,
    origin: Origin,
    baseline_grid: Option<BaselineGrid>,
}

impl Page {
    /// Create an empty page of the given size.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            name: None,
            tree: ElementTree::new(Element::new(ElementKind::Page, width, height)),
            origin: Origin::default(),
            baseline_grid: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Coordinate convention used by [`add`](Self::add) and the exporter view.
    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_padding(mut self, padding: Sides) -> Self {
        let root = self.tree.root();
        if let Some(element) = self.tree.get_mut(root) {
            element.padding = padding;
        }
        self
    }

    /// Column/row grid offered to the page's direct children.
    pub fn with_grid(mut self, grid: ColumnGrid) -> Self {
        let root = self.tree.root();
        if let Some(element) = self.tree.get_mut(root) {
            element.grid = Some(grid);
        }
        self
    }

    pub fn with_baseline_grid(mut self, grid: BaselineGrid) -> Self {
        self.baseline_grid = Some(grid);
        self
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn baseline_grid(&self) -> Option<BaselineGrid> {
        self.baseline_grid
    }

    pub fn set_baseline_grid(&mut self, grid: Option<BaselineGrid>) {
        self.baseline_grid = grid;
    }

    pub fn root(&self) -> ElementId {
        self.tree.root()
    }

    pub fn tree(&self) -> &ElementTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut ElementTree {
        &mut self.tree
    }

    pub fn element(&self, id: ElementId) -> Result<&Element, LayoutError> {
        self.tree.require(id)
    }

    pub fn element_mut(&mut self, id: ElementId) -> Result<&mut Element, LayoutError> {
        self.tree.require_mut(id)
    }

    /// Look up an element by name.
    pub fn find(&self, name: &str) -> Option<ElementId> {
        self.tree.find(name)
    }

    /// Add `element` as the last child of `parent`.
    ///
    /// The element's position is read in the page's origin convention and
    /// stored top-left.
    pub fn add(&mut self, parent: ElementId, mut element: Element) -> Result<ElementId, LayoutError> {
        let parent_height = self.tree.require(parent)?.height();
        element.rect = self.origin.normalize(element.rect, parent_height);
        let id = self.tree.insert(element);
        if let Err(err) = self.tree.add_child(parent, id) {
            // Drop the orphaned slot.
            let _ = self.tree.remove(id);
            return Err(err);
        }
        Ok(id)
    }

    /// Add `element` directly on the page.
    pub fn add_to_root(&mut self, element: Element) -> Result<ElementId, LayoutError> {
        self.add(self.root(), element)
    }

    /// Rect of `id` in its parent's frame, in the page's origin convention.
    pub fn rect_in_origin(&self, id: ElementId) -> Result<Rect, LayoutError> {
        let element = self.tree.require(id)?;
        let container_height = match element.parent() {
            Some(parent) => self.tree.require(parent)?.height(),
            None => element.height(),
        };
        Ok(self.origin.denormalize(element.rect, container_height))
    }

    /// Absolute rects in tree order, in the page's origin convention.
    ///
    /// This is the view exporters consume once solving has finished.
    pub fn placements(&self) -> Vec<(ElementId, Rect)> {
        let page_height = self
            .tree
            .get(self.root())
            .map(Element::height)
            .unwrap_or_default();
        self.tree
            .pre_order()
            .into_iter()
            .filter_map(|id| {
                let rect = self.tree.absolute_rect(id)?;
                Some((id, self.origin.denormalize(rect, page_height)))
            })
            .collect()
    }
}
