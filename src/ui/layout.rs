use ratatui::layout::{Constraint, Direction, Layout, Rect};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutTier {
    Full,    // ≥20 rows: mode tabs, verb card, answer box, progress bar
    Compact, // <20 rows: progress folded into the header, no tab strip
}

impl LayoutTier {
    pub fn from_area(area: Rect) -> Self {
        if area.height >= 20 {
            LayoutTier::Full
        } else {
            LayoutTier::Compact
        }
    }

    pub fn show_progress_bar(&self) -> bool {
        *self == LayoutTier::Full
    }
}

pub struct DrillLayout {
    pub header: Rect,
    pub tabs: Option<Rect>,
    pub card: Rect,
    pub answer: Rect,
    pub progress: Option<Rect>,
    pub footer: Rect,
    pub tier: LayoutTier,
}

impl DrillLayout {
    pub fn new(area: Rect) -> Self {
        let tier = LayoutTier::from_area(area);

        if tier == LayoutTier::Full {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(1),
                    Constraint::Length(3),
                    Constraint::Min(5),
                    Constraint::Length(4),
                    Constraint::Length(3),
                    Constraint::Length(1),
                ])
                .split(area);
            Self {
                header: rows[0],
                tabs: Some(rows[1]),
                card: rows[2],
                answer: rows[3],
                progress: Some(rows[4]),
                footer: rows[5],
                tier,
            }
        } else {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(1),
                    Constraint::Min(3),
                    Constraint::Length(4),
                    Constraint::Length(1),
                ])
                .split(area);
            Self {
                header: rows[0],
                tabs: None,
                card: rows[1],
                answer: rows[2],
                progress: None,
                footer: rows[3],
                tier,
            }
        }
    }
}

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    const MIN_POPUP_WIDTH: u16 = 40;
    const MIN_POPUP_HEIGHT: u16 = 7;

    let requested_w = area.width.saturating_mul(percent_x.min(100)) / 100;
    let requested_h = area.height.saturating_mul(percent_y.min(100)) / 100;

    let target_w = requested_w.max(MIN_POPUP_WIDTH).min(area.width);
    let target_h = requested_h.max(MIN_POPUP_HEIGHT).min(area.height);

    let left = area
        .x
        .saturating_add((area.width.saturating_sub(target_w)) / 2);
    let top = area
        .y
        .saturating_add((area.height.saturating_sub(target_h)) / 2);

    Rect::new(left, top, target_w, target_h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tall_terminal_gets_full_layout() {
        let layout = DrillLayout::new(Rect::new(0, 0, 80, 30));
        assert_eq!(layout.tier, LayoutTier::Full);
        assert!(layout.tabs.is_some());
        assert!(layout.progress.is_some());
        assert_eq!(layout.footer.y, 29);
    }

    #[test]
    fn test_short_terminal_drops_tabs_and_bar() {
        let layout = DrillLayout::new(Rect::new(0, 0, 80, 12));
        assert_eq!(layout.tier, LayoutTier::Compact);
        assert!(layout.tabs.is_none());
        assert!(layout.progress.is_none());
    }

    #[test]
    fn test_centered_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 30, 5);
        let popup = centered_rect(50, 50, area);
        assert_eq!(popup.width, 30);
        assert_eq!(popup.height, 5);
    }

    #[test]
    fn test_centered_rect_is_centered() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(50, 50, area);
        assert_eq!(popup, Rect::new(25, 10, 50, 20));
    }
}
