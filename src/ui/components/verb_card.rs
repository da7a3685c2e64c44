use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::ui::theme::Theme;

/// The verb to conjugate, with the target form underneath.
pub struct VerbCard<'a> {
    prompt: Option<&'a str>,
    mode_label: &'a str,
    theme: &'a Theme,
}

impl<'a> VerbCard<'a> {
    pub fn new(prompt: Option<&'a str>, mode_label: &'a str, theme: &'a Theme) -> Self {
        Self {
            prompt,
            mode_label,
            theme,
        }
    }
}

impl Widget for VerbCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let top_pad = inner.height.saturating_sub(3) / 2;
        let mut lines: Vec<Line> = (0..top_pad).map(|_| Line::from("")).collect();

        match self.prompt {
            Some(verb) => {
                lines.push(Line::from(Span::styled(
                    verb,
                    Style::default()
                        .fg(colors.prompt())
                        .add_modifier(Modifier::BOLD),
                )));
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    format!("→ {}", self.mode_label),
                    Style::default().fg(colors.text_muted()),
                )));
            }
            None => lines.push(Line::from(Span::styled(
                "…",
                Style::default().fg(colors.text_muted()),
            ))),
        }

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}
