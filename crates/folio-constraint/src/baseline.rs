//! Baseline grid snapping.

use folio_core::{
    approx_eq, snap_down_to_grid, snap_to_grid, snap_up_to_grid, Condition, ConditionConfig,
    ElementId, Fix, LayoutError, Page,
};
use glam::DVec2;

/// Which grid line a baseline moves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnapMode {
    /// Nearest line, ties to the even line
    #[default]
    Nearest,
    /// Nearest line at or above
    Up,
    /// Nearest line at or below
    Down,
}

/// Put the element's reference line on the page's baseline grid.
///
/// Text boxes use their first baseline, other elements their top edge. The
/// line is measured in page coordinates so nested groups snap to the same
/// grid as their page.
#[derive(Debug, Clone, Default)]
pub struct Baseline2Grid {
    mode: SnapMode,
    config: ConditionConfig,
}

impl Baseline2Grid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn up() -> Self {
        Self { mode: SnapMode::Up, ..Self::default() }
    }

    pub fn down() -> Self {
        Self { mode: SnapMode::Down, ..Self::default() }
    }

    pub fn with_config(mut self, config: ConditionConfig) -> Self {
        self.config = config;
        self
    }

    /// Reference line of `id` in top-left page coordinates.
    fn reference_line(page: &Page, id: ElementId) -> Result<f64, LayoutError> {
        let element = page.element(id)?;
        let top = page
            .tree()
            .absolute_rect(id)
            .ok_or(LayoutError::UnknownElement(id))?
            .y;
        Ok(match element.text_content() {
            Some(text) => top + element.padding.top + text.first_baseline,
            None => top,
        })
    }
}

impl Condition for Baseline2Grid {
    fn name(&self) -> &str {
        match self.mode {
            SnapMode::Nearest => "Baseline2Grid",
            SnapMode::Up => "BaselineUp2Grid",
            SnapMode::Down => "BaselineDown2Grid",
        }
    }

    fn config(&self) -> &ConditionConfig {
        &self.config
    }

    fn test(&self, page: &Page, id: ElementId) -> Result<bool, LayoutError> {
        let Some(grid) = page.baseline_grid() else {
            return Ok(false);
        };
        let line = Self::reference_line(page, id)?;
        Ok(approx_eq(
            snap_to_grid(line, grid.unit, grid.start),
            line,
            self.config.tolerance,
        ))
    }

    fn fix(&self, page: &mut Page, id: ElementId) -> Result<Fix, LayoutError> {
        let Some(grid) = page.baseline_grid() else {
            return Ok(Fix::unsatisfiable("page has no baseline grid"));
        };
        let line = Self::reference_line(page, id)?;
        let target = match self.mode {
            SnapMode::Nearest => snap_to_grid(line, grid.unit, grid.start),
            SnapMode::Up => snap_up_to_grid(line, grid.unit, grid.start),
            SnapMode::Down => snap_down_to_grid(line, grid.unit, grid.start),
        };
        let element = page.element_mut(id)?;
        element.rect = element.rect.translate(DVec2::new(0.0, target - line));
        Ok(Fix::Applied)
    }
}
