use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use katsuyo::catalog::{ModeId, ModeTable};

use crate::ui::theme::Theme;

/// Horizontal mode selector; F-keys follow table order.
pub struct ModeTabs<'a> {
    modes: &'a ModeTable,
    active: &'a ModeId,
    theme: &'a Theme,
}

impl<'a> ModeTabs<'a> {
    pub fn new(modes: &'a ModeTable, active: &'a ModeId, theme: &'a Theme) -> Self {
        Self {
            modes,
            active,
            theme,
        }
    }
}

impl Widget for ModeTabs<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Mode ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut spans: Vec<Span> = Vec::new();
        for (i, spec) in self.modes.iter().enumerate() {
            let is_active = &spec.id == self.active;
            let key = if i < 9 {
                format!("F{}", i + 1)
            } else {
                String::new()
            };
            let label = format!(" [{key}] {} ", spec.label);
            let style = if is_active {
                Style::default()
                    .fg(colors.header_fg())
                    .bg(colors.accent_dim())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.text_muted())
            };
            spans.push(Span::styled(label, style));
            spans.push(Span::raw(" "));
        }

        Paragraph::new(Line::from(spans)).render(inner, buf);
    }
}
