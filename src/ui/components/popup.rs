use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph, Widget, Wrap};

use crate::ui::theme::Theme;

/// Bordered modal drawn over whatever is underneath.
pub struct Popup<'a> {
    title: &'a str,
    lines: Vec<Line<'a>>,
    theme: &'a Theme,
}

impl<'a> Popup<'a> {
    pub fn new(title: &'a str, lines: Vec<Line<'a>>, theme: &'a Theme) -> Self {
        Self {
            title,
            lines,
            theme,
        }
    }
}

impl Widget for Popup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        Clear.render(area, buf);
        let block = Block::bordered()
            .title(format!(" {} ", self.title))
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()).fg(colors.fg()));
        Paragraph::new(self.lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
