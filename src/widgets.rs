//! Clickable line list shared by every form screen.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::text::Line;

use crate::input::ClickState;

/// Lines paired with the action each clickable one triggers.
///
/// Targets follow their line: inserting a line above a clickable one moves
/// its target down with it, so renderers never compute row offsets by hand.
///
/// ```ignore
/// let mut cl = ClickableList::new();
/// cl.push(Line::from("Lycée"));
/// cl.push_clickable(Line::from(" [P] Pré-remplir"), PREFILL);
/// cl.register_targets(area, &mut cs, 1, 1);
/// f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
/// ```
#[derive(Default)]
pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    /// `(line index, action id)`
    actions: Vec<(u16, u16)>,
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    pub fn push_clickable(&mut self, line: Line<'a>, action_id: u16) {
        self.actions.push((self.lines.len() as u16, action_id));
        self.lines.push(line);
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// Register one row target per clickable line.
    ///
    /// `top_offset`/`bottom_offset` are the rows taken by the block's
    /// borders. Lines are assumed not to wrap; anything below the visible
    /// content is skipped.
    pub fn register_targets(
        &self,
        area: Rect,
        cs: &mut ClickState,
        top_offset: u16,
        bottom_offset: u16,
    ) {
        let content_y = area.y + top_offset;
        let content_end = area.y + area.height.saturating_sub(bottom_offset);
        for &(line_idx, action_id) in &self.actions {
            let row = content_y + line_idx;
            if row >= content_end {
                break;
            }
            cs.add_row_target(area, row, action_id);
        }
    }
}
