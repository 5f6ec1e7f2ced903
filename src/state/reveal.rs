/// Deferred loading hint for grid tiles
///
/// Lays the visible sequence out on the same grid the UI draws and
/// reports which cards have come within `margin` of the scrolled
/// viewport. Every card is reported once; after that it is no longer
/// watched. This is only a hint for when to start loading thumbnails.
use std::collections::HashSet;

use crate::config::Settings;

/// Tile grid measurements shared by the view and the reveal logic
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    pub tile: f32,
    pub gap: f32,
    pub padding: f32,
}

impl GridGeometry {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            tile: settings.tile_size,
            gap: settings.tile_gap,
            padding: settings.grid_padding,
        }
    }

    /// Number of tiles per row for a given viewport width (at least one)
    pub fn columns(&self, width: f32) -> usize {
        let usable = width - 2.0 * self.padding + self.gap;
        let stride = self.tile + self.gap;
        if stride <= 0.0 || usable <= stride {
            return 1;
        }
        (usable / stride).floor() as usize
    }

    /// Vertical extent of `row` in content coordinates
    pub fn row_span(&self, row: usize) -> (f32, f32) {
        let top = self.padding + row as f32 * (self.tile + self.gap);
        (top, top + self.tile)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct Viewport {
    offset: f32,
    height: f32,
}

#[derive(Debug, Clone)]
pub struct RevealTracker {
    geometry: GridGeometry,
    margin: f32,
    columns: usize,
    viewport: Viewport,
    revealed: HashSet<usize>,
}

impl RevealTracker {
    pub fn new(geometry: GridGeometry, margin: f32) -> Self {
        Self {
            geometry,
            margin,
            columns: 1,
            viewport: Viewport::default(),
            revealed: HashSet::new(),
        }
    }

    pub fn geometry(&self) -> GridGeometry {
        self.geometry
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn set_width(&mut self, width: f32) {
        self.columns = self.geometry.columns(width);
    }

    pub fn set_viewport(&mut self, offset: f32, height: f32) {
        self.viewport = Viewport {
            offset: offset.max(0.0),
            height: height.max(0.0),
        };
    }

    pub fn set_height(&mut self, height: f32) {
        self.viewport.height = height.max(0.0);
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.contains(&index)
    }

    /// Cards in `visible` that now intersect the expanded viewport and were
    /// never reported before. They are marked as reported.
    pub fn reveal(&mut self, visible: &[usize]) -> Vec<usize> {
        let top = self.viewport.offset - self.margin;
        let bottom = self.viewport.offset + self.viewport.height + self.margin;
        let columns = self.columns.max(1);

        let mut fresh = Vec::new();
        for (row, chunk) in visible.chunks(columns).enumerate() {
            let (row_top, row_bottom) = self.geometry.row_span(row);
            if row_top >= bottom {
                break;
            }
            if row_bottom <= top {
                continue;
            }
            for &index in chunk {
                if self.revealed.insert(index) {
                    fresh.push(index);
                }
            }
        }
        fresh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> GridGeometry {
        GridGeometry {
            tile: 100.0,
            gap: 10.0,
            padding: 20.0,
        }
    }

    #[test]
    fn test_columns() {
        let geometry = geometry();
        // n tiles need n * 100 + (n - 1) * 10 plus 40 of padding
        assert_eq!(geometry.columns(150.0), 1);
        assert_eq!(geometry.columns(249.0), 1);
        assert_eq!(geometry.columns(250.0), 2);
        assert_eq!(geometry.columns(359.0), 2);
        assert_eq!(geometry.columns(360.0), 3);
        assert_eq!(geometry.columns(0.0), 1);
    }

    #[test]
    fn test_reveals_rows_within_margin_once() {
        let mut tracker = RevealTracker::new(geometry(), 50.0);
        tracker.set_width(260.0); // two columns
        tracker.set_viewport(0.0, 200.0);

        let visible: Vec<usize> = (0..10).collect();
        // Rows start at 20, 130, 240, 350; viewport + margin reaches 250
        assert_eq!(tracker.reveal(&visible), vec![0, 1, 2, 3, 4, 5]);
        assert!(tracker.reveal(&visible).is_empty());

        tracker.set_viewport(200.0, 200.0);
        assert_eq!(tracker.reveal(&visible), vec![6, 7]);

        tracker.set_viewport(400.0, 200.0);
        assert_eq!(tracker.reveal(&visible), vec![8, 9]);
    }

    #[test]
    fn test_rows_above_margin_are_skipped() {
        let mut tracker = RevealTracker::new(geometry(), 0.0);
        tracker.set_width(150.0);
        tracker.set_viewport(300.0, 100.0);

        // Rows: 20..120, 130..230, 240..340, 350..450
        assert_eq!(tracker.reveal(&[0, 1, 2, 3, 4]), vec![2, 3]);
        assert!(tracker.is_revealed(2));
        assert!(!tracker.is_revealed(0));
    }

    #[test]
    fn test_layout_follows_visible_sequence() {
        let mut tracker = RevealTracker::new(geometry(), 0.0);
        tracker.set_width(150.0);
        tracker.set_viewport(0.0, 100.0);

        // Only the first row is in view; it holds whichever card is visible first
        assert_eq!(tracker.reveal(&[4, 9]), vec![4]);
    }
}
