use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use katsuyo::engine::Feedback;

use crate::ui::line_input::LineInput;
use crate::ui::theme::Theme;

pub fn feedback_text(feedback: Feedback) -> &'static str {
    match feedback {
        Feedback::PromptForInput => "Type an answer first",
        Feedback::Correct => "Correct!",
        Feedback::Incorrect => "Not quite. Try again.",
        Feedback::ResetNotice => "Progress reset",
    }
}

/// Answer line plus the feedback for the last submission.
pub struct AnswerBox<'a> {
    input: &'a LineInput,
    feedback: Option<Feedback>,
    locked: bool,
    theme: &'a Theme,
}

impl<'a> AnswerBox<'a> {
    pub fn new(input: &'a LineInput, feedback: Option<Feedback>, theme: &'a Theme) -> Self {
        Self {
            input,
            feedback,
            locked: false,
            theme,
        }
    }

    /// Dims the box while the next verb is about to appear.
    pub fn locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }
}

impl Widget for AnswerBox<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let border = if self.locked {
            colors.border()
        } else {
            colors.border_focused()
        };
        let block = Block::bordered()
            .title(" Answer ")
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let (before, cursor_ch, after) = self.input.render_parts();
        let text_style = Style::default().fg(colors.fg());
        let cursor_style = Style::default()
            .fg(colors.input_cursor_fg())
            .bg(colors.input_cursor_bg());

        let mut spans = vec![Span::raw(" "), Span::styled(before, text_style)];
        if !self.locked {
            let cursor = cursor_ch.map_or_else(|| " ".to_string(), |c| c.to_string());
            spans.push(Span::styled(cursor, cursor_style));
        } else if let Some(c) = cursor_ch {
            spans.push(Span::styled(c.to_string(), text_style));
        }
        spans.push(Span::styled(after, text_style));

        let mut lines = vec![Line::from(spans)];
        if let Some(feedback) = self.feedback {
            let color = match feedback {
                Feedback::Correct => colors.success(),
                Feedback::Incorrect => colors.error(),
                Feedback::PromptForInput => colors.warning(),
                Feedback::ResetNotice => colors.info(),
            };
            lines.push(Line::from(Span::styled(
                format!(" {}", feedback_text(feedback)),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )));
        }

        Paragraph::new(lines).render(inner, buf);
    }
}
