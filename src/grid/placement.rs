//! First-fit placement for newly added items.

use super::{GridItem, MAX_COLUMNS, MAX_SCAN_ROWS};

/// Boolean cell map over a bounded window of the grid.
///
/// Row `0` is the top of the grid; rows at or past `rows` are outside the
/// window and never marked.
#[derive(Debug, Clone)]
pub struct Occupancy {
    columns: u32,
    rows: u32,
    cells: Vec<bool>,
}

impl Occupancy {
    /// Creates an empty window `columns` wide and `rows` high.
    pub fn new(columns: u32, rows: u32) -> Self {
        Self {
            columns,
            rows,
            cells: vec![false; columns as usize * rows as usize],
        }
    }

    /// Builds a window with every cell covered by `items` marked.
    pub fn from_items(items: &[GridItem], columns: u32, rows: u32) -> Self {
        let mut occupancy = Self::new(columns, rows);
        for item in items {
            occupancy.mark(item);
        }
        occupancy
    }

    /// Marks the cells of one item. Cells outside the window are ignored.
    pub fn mark(&mut self, item: &GridItem) {
        let p = item.position;
        for y in p.y..p.bottom().min(self.rows) {
            for x in p.x..p.right().min(self.columns) {
                let idx = self.index(x, y);
                self.cells[idx] = true;
            }
        }
    }

    /// Returns `true` if the cell is inside the window and marked.
    pub fn is_occupied(&self, x: u32, y: u32) -> bool {
        x < self.columns && y < self.rows && self.cells[self.index(x, y)]
    }

    /// Returns `true` if a `w x h` footprint at (`x`, `y`) is inside the
    /// window and every cell is free.
    pub fn fits(&self, x: u32, y: u32, w: u32, h: u32) -> bool {
        if x.saturating_add(w) > self.columns || y.saturating_add(h) > self.rows {
            return false;
        }
        (y..y + h).all(|cy| (x..x + w).all(|cx| !self.is_occupied(cx, cy)))
    }

    /// First origin in row-major order where a `w x h` footprint fits.
    pub fn find(&self, w: u32, h: u32) -> Option<(u32, u32)> {
        if w == 0 || h == 0 || w > self.columns {
            return None;
        }
        (0..self.rows)
            .flat_map(|y| (0..=self.columns - w).map(move |x| (x, y)))
            .find(|&(x, y)| self.fits(x, y, w, h))
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.columns as usize + x as usize
    }
}

/// Picks the origin for a new `w x h` item.
///
/// Scans a window of `scan_rows` rows for the first free footprint. When the
/// window is full, the item goes to column 0 just below the lowest existing
/// item. The width is capped at `columns` first. `columns` and `scan_rows`
/// are capped at [`MAX_COLUMNS`] and [`MAX_SCAN_ROWS`].
pub fn first_fit(items: &[GridItem], w: u32, h: u32, columns: u32, scan_rows: u32) -> (u32, u32) {
    let columns = columns.clamp(1, MAX_COLUMNS);
    let scan_rows = scan_rows.min(MAX_SCAN_ROWS);
    let w = w.clamp(1, columns);
    let h = h.max(1);

    let occupancy = Occupancy::from_items(items, columns, scan_rows);
    if let Some(origin) = occupancy.find(w, h) {
        tracing::debug!(x = origin.0, y = origin.1, w, h, "first-fit slot found");
        return origin;
    }

    let bottom = items
        .iter()
        .map(|item| item.position.bottom())
        .max()
        .unwrap_or(0);
    tracing::debug!(y = bottom, w, h, "scan window full, appending below");
    (0, bottom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Rect;

    fn item(id: &str, x: u32, y: u32, w: u32, h: u32) -> GridItem {
        GridItem::new(id, Rect::new(x, y, w, h))
    }

    #[test]
    fn empty_grid_places_at_origin() {
        assert_eq!(first_fit(&[], 2, 1, 4, 20), (0, 0));
    }

    #[test]
    fn huge_grid_is_capped() {
        assert_eq!(first_fit(&[], 1, 1, u32::MAX, 20), (0, 0));
        assert_eq!(first_fit(&[], u32::MAX, 1, u32::MAX, u32::MAX), (0, 0));

        let items = vec![item("edge", 0, 0, MAX_COLUMNS, 1)];
        assert_eq!(first_fit(&items, 1, 1, u32::MAX, 20), (0, 1));
    }

    #[test]
    fn full_first_row_places_on_second_row() {
        let items = vec![item("row", 0, 0, 4, 1)];
        assert_eq!(first_fit(&items, 1, 1, 4, 20), (0, 1));
        assert_eq!(first_fit(&items, 2, 1, 4, 20), (0, 1));
    }

    #[test]
    fn fills_gap_to_the_right() {
        let items = vec![item("a", 0, 0, 2, 1)];
        assert_eq!(first_fit(&items, 2, 1, 4, 20), (2, 0));
    }

    #[test]
    fn skips_gap_that_is_too_narrow() {
        let items = vec![item("a", 0, 0, 3, 1)];
        assert_eq!(first_fit(&items, 2, 1, 4, 20), (0, 1));
        assert_eq!(first_fit(&items, 1, 1, 4, 20), (3, 0));
    }

    #[test]
    fn tall_footprint_must_be_free_on_every_row() {
        // Column 3 is free on row 0 but blocked on row 1.
        let items = vec![item("a", 0, 0, 3, 1), item("b", 3, 1, 1, 1)];
        assert_eq!(first_fit(&items, 1, 2, 4, 20), (0, 1));
    }

    #[test]
    fn hole_in_the_middle_is_reused() {
        let items = vec![
            item("a", 0, 0, 4, 1),
            item("b", 0, 1, 1, 1),
            item("c", 2, 1, 2, 1),
            item("d", 0, 2, 4, 1),
        ];
        assert_eq!(first_fit(&items, 1, 1, 4, 20), (1, 1));
    }

    #[test]
    fn locked_items_occupy_cells() {
        let items = vec![GridItem::locked("pinned", Rect::new(0, 0, 1, 1))];
        assert_eq!(first_fit(&items, 1, 1, 4, 20), (1, 0));
    }

    #[test]
    fn full_window_appends_below_lowest_item() {
        let items = vec![item("wall", 0, 0, 4, 3), item("deep", 1, 5, 1, 4)];
        assert_eq!(first_fit(&items, 1, 1, 4, 3), (0, 9));
    }

    #[test]
    fn window_exhaustion_for_tall_items() {
        // A 3-row item cannot fit in a 2-row window even when it is empty.
        assert_eq!(first_fit(&[], 1, 3, 4, 2), (0, 0));
        let items = vec![item("a", 0, 0, 1, 1)];
        assert_eq!(first_fit(&items, 1, 3, 4, 2), (0, 1));
    }

    #[test]
    fn too_wide_span_is_capped() {
        let items = vec![item("a", 0, 0, 1, 1)];
        assert_eq!(first_fit(&items, 9, 1, 4, 20), (0, 1));
    }

    #[test]
    fn items_beyond_window_do_not_panic() {
        let items = vec![item("far", 2, 40, 2, 2), item("wide", 3, 0, 5, 1)];
        let occupancy = Occupancy::from_items(&items, 4, 20);
        assert!(occupancy.is_occupied(3, 0));
        assert!(!occupancy.is_occupied(2, 19));
        assert_eq!(first_fit(&items, 1, 1, 4, 20), (0, 0));
    }

    #[test]
    fn occupancy_fits_checks_bounds() {
        let occupancy = Occupancy::new(4, 2);
        assert!(occupancy.fits(0, 0, 4, 2));
        assert!(!occupancy.fits(1, 0, 4, 1));
        assert!(!occupancy.fits(0, 1, 1, 2));
        assert_eq!(occupancy.find(5, 1), None);
    }
}
