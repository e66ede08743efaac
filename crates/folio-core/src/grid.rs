//! Column and row grids that a container offers to its children.

use crate::errors::ConfigError;

/// One column or row definition.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Track {
    /// Fixed size, or `None` to share the remaining space equally
    pub size: Option<f64>,
    /// Gutter after this track, or `None` for the grid default
    pub gutter: Option<f64>,
}

impl Track {
    pub fn fixed(size: f64) -> Self {
        Self { size: Some(size), gutter: None }
    }

    /// Track that shares the space left over by fixed tracks.
    pub fn flexible() -> Self {
        Self::default()
    }

    pub fn with_gutter(mut self, gutter: f64) -> Self {
        self.gutter = Some(gutter);
        self
    }
}

/// Column/row grid of a container, relative to its padded box.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnGrid {
    pub columns: Vec<Track>,
    pub rows: Vec<Track>,
    /// Default gutter between tracks
    pub gutter: f64,
}

impl ColumnGrid {
    /// Create a grid, rejecting negative or non-finite sizes.
    pub fn new(columns: Vec<Track>, rows: Vec<Track>, gutter: f64) -> Result<Self, ConfigError> {
        let all = columns.iter().chain(rows.iter());
        for (index, track) in all.enumerate() {
            for value in [track.size, track.gutter].into_iter().flatten() {
                if !value.is_finite() || value < 0.0 {
                    return Err(ConfigError::InvalidTrack { index, value });
                }
            }
        }
        if !gutter.is_finite() || gutter < 0.0 {
            return Err(ConfigError::InvalidGutter(gutter));
        }
        Ok(Self { columns, rows, gutter })
    }

    /// `count` equal columns of `size` separated by `gutter`.
    pub fn uniform_columns(count: usize, size: f64, gutter: f64) -> Result<Self, ConfigError> {
        Self::new(vec![Track::fixed(size); count], Vec::new(), gutter)
    }

    /// Column `(offset, width)` pairs for a padded box of `inner_width`.
    pub fn column_positions(&self, inner_width: f64) -> Vec<(f64, f64)> {
        positions(&self.columns, inner_width, self.gutter)
    }

    /// Row `(offset, height)` pairs for a padded box of `inner_height`.
    pub fn row_positions(&self, inner_height: f64) -> Vec<(f64, f64)> {
        positions(&self.rows, inner_height, self.gutter)
    }
}

/// Offset and total size of `span` tracks starting at `start`.
pub fn track_span(tracks: &[(f64, f64)], start: usize, span: usize) -> Option<(f64, f64)> {
    if span == 0 {
        return None;
    }
    let first = tracks.get(start)?;
    let last = tracks.get(start.checked_add(span - 1)?)?;
    Some((first.0, last.0 - first.0 + last.1))
}

fn positions(tracks: &[Track], available: f64, default_gutter: f64) -> Vec<(f64, f64)> {
    let mut flexible = 0usize;
    let mut used = 0.0;
    for (index, track) in tracks.iter().enumerate() {
        match track.size {
            Some(size) => used += size,
            None => flexible += 1,
        }
        if index + 1 < tracks.len() {
            used += track.gutter.unwrap_or(default_gutter);
        }
    }
    let shared = ((available - used) / flexible.max(1) as f64).max(0.0);

    let mut offset = 0.0;
    tracks
        .iter()
        .map(|track| {
            let size = track.size.unwrap_or(shared);
            let position = (offset, size);
            offset += size + track.gutter.unwrap_or(default_gutter);
            position
        })
        .collect()
}
