//! Ratatui binding for the page-number indicator.
//!
//! Draws the editable field plus its read-only suffix into a status-bar
//! slot. All display logic lives in `IndicatorState`; this layer only maps
//! it to spans, colors and a cursor position.

use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use unicode_width::UnicodeWidthStr;

use crate::indicator::IndicatorState;
use crate::theme::Base16Palette;

/// The field never collapses below this many columns, so an empty draft
/// still reads as an input box.
const MIN_FIELD_WIDTH: u16 = 4;

#[derive(Debug, Clone, Copy, Default)]
pub struct PageNumberBar;

impl PageNumberBar {
    pub fn new() -> Self {
        Self
    }

    /// Columns the bar needs for the given state: one leading space, the
    /// field, the auxiliary suffix.
    pub fn desired_width(&self, state: &IndicatorState) -> u16 {
        1 + field_width(state) + state.auxiliary_text().width() as u16
    }

    pub fn render(
        &self,
        f: &mut Frame,
        area: Rect,
        state: &IndicatorState,
        palette: &Base16Palette,
        focused: bool,
    ) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let value = state.display_value();
        let width = field_width(state);
        let padded = format!("{value:<pad$}", pad = width as usize);

        let field_style = if state.select_all {
            let (fg, bg) = palette.selection_colors();
            Style::default().fg(fg).bg(bg)
        } else {
            let (fg, bg) = palette.input_colors(focused);
            let style = Style::default().fg(fg).bg(bg);
            if focused {
                style.add_modifier(Modifier::BOLD)
            } else {
                style
            }
        };
        let aux_style = Style::default().fg(palette.base_04);

        let line = Line::from(vec![
            Span::raw(" "),
            Span::styled(padded, field_style),
            Span::styled(state.auxiliary_text(), aux_style),
        ]);
        f.render_widget(Paragraph::new(line), area);

        // Terminal cursor sits after the last character while typing;
        // select-all highlights the whole field instead.
        if focused && !state.select_all {
            let x = area.x + 1 + value.width() as u16;
            if x < area.right() {
                f.set_cursor_position(Position::new(x, area.y));
            }
        }
    }
}

fn field_width(state: &IndicatorState) -> u16 {
    (state.display_value().width() as u16).max(MIN_FIELD_WIDTH)
}
