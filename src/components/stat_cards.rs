use pl_api::stats::RosterAggregate;
use tui::buffer::Buffer;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::widgets::{Block, BorderType, Borders, Paragraph, Widget};

pub const CARD_HEIGHT: u16 = 3;

/// Four summary cards over the filtered roster.
pub struct StatCards<'a> {
    pub aggregate: &'a RosterAggregate,
}

impl StatCards<'_> {
    fn cards(&self) -> [(&'static str, String, Color); 4] {
        let agg = self.aggregate;
        let avg_age = match agg.average_age {
            Some(_) => format!("{} yrs", agg.average_age_label()),
            None => agg.average_age_label(),
        };
        [
            ("Players", agg.player_count.to_string(), Color::Magenta),
            ("Total Goals", agg.total_goals.to_string(), Color::Red),
            ("Avg Age", avg_age, Color::Yellow),
            ("Key Position", agg.key_position_label().to_uppercase(), Color::Cyan),
        ]
    }
}

impl Widget for StatCards<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 20 || area.height < CARD_HEIGHT {
            return;
        }

        let areas: [Rect; 4] = Layout::horizontal([Constraint::Fill(1); 4]).areas(area);
        for ((title, value, color), card) in self.cards().into_iter().zip(areas) {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(color))
                .title(format!(" {title} "));
            let inner = block.inner(card);
            block.render(card, buf);
            Paragraph::new(value)
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
                .render(inner, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pl_api::PlayerRecord;
    use pl_api::stats::aggregate;

    #[test]
    fn empty_roster_shows_not_available() {
        let agg = RosterAggregate::default();
        let cards = StatCards { aggregate: &agg }.cards();
        assert_eq!(cards[0].1, "0");
        assert_eq!(cards[1].1, "0");
        assert_eq!(cards[2].1, "N/A");
        assert_eq!(cards[3].1, "N/A");
    }

    #[test]
    fn populated_roster_shows_units_and_position() {
        let roster = vec![
            PlayerRecord { age: Some(24), gls: Some(3), pos: Some("fw".into()), ..Default::default() },
            PlayerRecord { age: Some(27), gls: Some(1), pos: Some("fw".into()), ..Default::default() },
        ];
        let agg = aggregate(&roster);
        let cards = StatCards { aggregate: &agg }.cards();
        assert_eq!(cards[0].1, "2");
        assert_eq!(cards[1].1, "4");
        assert_eq!(cards[2].1, "25.5 yrs");
        assert_eq!(cards[3].1, "FW");
    }

    #[test]
    fn renders_titles_into_buffer() {
        let agg = RosterAggregate::default();
        let area = Rect::new(0, 0, 80, CARD_HEIGHT);
        let mut buf = Buffer::empty(area);
        StatCards { aggregate: &agg }.render(area, &mut buf);
        let top: String = (0..area.width).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert!(top.contains("Players"));
        assert!(top.contains("Key Position"));
    }
}
