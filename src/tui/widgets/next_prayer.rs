use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::models::PrayerType;
use crate::tui::theme;
use crate::utils::format::format_duration_secs;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    next_prayer: Option<&(PrayerType, i64)>,
) {
    let block = Block::default()
        .title(Span::styled(" Next Prayer ", theme::gold()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border())
        .style(theme::surface());

    let content: Vec<Line> = match next_prayer {
        None => vec![
            Line::from(""),
            Line::from(Span::styled("  No data", theme::dim())),
        ],
        Some((prayer, secs)) => vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("  {}", prayer.display_name().to_uppercase()),
                theme::gold().add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::styled("  in  ", theme::dim()),
                Span::styled(
                    format_duration_secs(*secs),
                    theme::amber().add_modifier(Modifier::BOLD),
                ),
            ]),
        ],
    };

    let paragraph = Paragraph::new(content)
        .block(block)
        .alignment(Alignment::Left);

    frame.render_widget(paragraph, area);
}
