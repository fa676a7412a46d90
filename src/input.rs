//! Input normalisation and click hit-testing for the form UI.
//!
//! Keyboard keys and mouse/touch taps both end up as an [`InputEvent`].
//! Taps are resolved against the click targets registered during the last
//! render; nothing here touches the DOM, so it is all unit testable.

use ratzilla::ratatui::layout::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A key press, already mapped to its command character.
    Key(char),
    /// A tap on a registered target, carrying the target's action ID.
    Click(u16),
}

#[derive(Debug, Clone)]
pub struct ClickTarget {
    pub rect: Rect,
    pub action_id: u16,
}

/// Click targets of the current frame plus the terminal size they were
/// laid out for. Shared between the render loop and the mouse handler.
#[derive(Default)]
pub struct ClickState {
    pub targets: Vec<ClickTarget>,
    pub terminal_cols: u16,
    pub terminal_rows: u16,
}

impl ClickState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear_targets(&mut self) {
        self.targets.clear();
    }

    pub fn add_click_target(&mut self, rect: Rect, action_id: u16) {
        self.targets.push(ClickTarget { rect, action_id });
    }

    /// Register the whole width of `area` at `row`. Rows outside `area`
    /// are ignored so clipped content never steals taps.
    pub fn add_row_target(&mut self, area: Rect, row: u16, action_id: u16) {
        if row >= area.y && row < area.y + area.height {
            self.add_click_target(Rect::new(area.x, row, area.width, 1), action_id);
        }
    }

    /// Action ID under a cell. Later targets sit on top of earlier ones.
    pub fn hit_test(&self, col: u16, row: u16) -> Option<u16> {
        self.targets.iter().rev().find_map(|t| {
            let r = &t.rect;
            let inside = col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height;
            inside.then_some(t.action_id)
        })
    }
}

/// Phones in portrait get the stacked layout.
pub fn is_narrow_layout(width: u16) -> bool {
    width < 60
}

/// Map a pixel offset inside the grid container to a terminal row.
pub fn pixel_y_to_row(click_y: f64, grid_height: f64, terminal_rows: u16) -> Option<u16> {
    pixel_to_cell(click_y, grid_height, terminal_rows)
}

/// Map a pixel offset inside the grid container to a terminal column.
pub fn pixel_x_to_col(click_x: f64, grid_width: f64, terminal_cols: u16) -> Option<u16> {
    pixel_to_cell(click_x, grid_width, terminal_cols)
}

fn pixel_to_cell(offset: f64, extent: f64, cells: u16) -> Option<u16> {
    if extent <= 0.0 || cells == 0 || offset < 0.0 {
        return None;
    }
    let cell = (offset / (extent / cells as f64)) as u16;
    (cell < cells).then_some(cell)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_test_finds_row_target() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 4, 60, 1), 1);
        cs.add_click_target(Rect::new(0, 5, 60, 1), 2);

        assert_eq!(cs.hit_test(10, 4), Some(1));
        assert_eq!(cs.hit_test(10, 5), Some(2));
        assert_eq!(cs.hit_test(10, 6), None);
        assert_eq!(cs.hit_test(60, 4), None);
    }

    #[test]
    fn later_target_wins_on_overlap() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 3, 80, 1), 1);
        cs.add_click_target(Rect::new(10, 3, 5, 1), 2);

        assert_eq!(cs.hit_test(12, 3), Some(2));
        assert_eq!(cs.hit_test(2, 3), Some(1));
    }

    #[test]
    fn row_target_clipped_to_area() {
        let mut cs = ClickState::new();
        let area = Rect::new(2, 10, 30, 3);
        cs.add_row_target(area, 9, 1);
        cs.add_row_target(area, 13, 2);
        assert!(cs.targets.is_empty());

        cs.add_row_target(area, 12, 3);
        assert_eq!(cs.hit_test(2, 12), Some(3));
        assert_eq!(cs.hit_test(1, 12), None);
    }

    #[test]
    fn clear_drops_all_targets() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 0, 10, 10), 7);
        cs.clear_targets();
        assert_eq!(cs.hit_test(1, 1), None);
    }

    #[test]
    fn narrow_layout_below_sixty_columns() {
        assert!(is_narrow_layout(40));
        assert!(is_narrow_layout(59));
        assert!(!is_narrow_layout(60));
    }

    #[test]
    fn pixel_rows_and_columns() {
        assert_eq!(pixel_y_to_row(0.0, 450.0, 30), Some(0));
        assert_eq!(pixel_y_to_row(15.0, 450.0, 30), Some(1));
        assert_eq!(pixel_y_to_row(449.0, 450.0, 30), Some(29));
        assert_eq!(pixel_x_to_col(10.0, 800.0, 80), Some(1));
        assert_eq!(pixel_x_to_col(799.0, 800.0, 80), Some(79));
    }

    #[test]
    fn pixel_outside_grid_is_none() {
        assert_eq!(pixel_y_to_row(450.0, 450.0, 30), None);
        assert_eq!(pixel_y_to_row(-1.0, 450.0, 30), None);
        assert_eq!(pixel_y_to_row(10.0, 0.0, 30), None);
        assert_eq!(pixel_x_to_col(10.0, 800.0, 0), None);
    }

    #[test]
    fn tap_at_cell_centre_hits_that_row() {
        let mut cs = ClickState::new();
        cs.terminal_rows = 40;
        cs.add_click_target(Rect::new(0, 12, 37, 1), 42);

        let grid_height = 40.0 * 15.0;
        let row = pixel_y_to_row(12.0 * 15.0 + 7.5, grid_height, cs.terminal_rows).unwrap();
        assert_eq!(cs.hit_test(0, row), Some(42));
    }
}
