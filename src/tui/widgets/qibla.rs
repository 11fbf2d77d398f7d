use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use tui_big_text::{BigText, PixelSize};

use crate::models::QiblaResult;
use crate::qibla::compass_point;
use crate::tui::theme;

pub fn render(frame: &mut Frame, area: Rect, qibla: Option<&QiblaResult>) {
    let block = Block::default()
        .title(Span::styled(" Qibla ", theme::gold()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border())
        .style(theme::surface());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(qibla) = qibla else {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled("  No data", theme::dim()))),
            inner,
        );
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(inner);

    let big = BigText::builder()
        .pixel_size(PixelSize::Quadrant)
        .style(theme::gold())
        .lines(vec![format!("{:.1}", qibla.direction).into()])
        .build();
    frame.render_widget(big, chunks[0]);

    let details = vec![
        Line::from(vec![
            Span::styled("  degrees ", theme::dim()),
            Span::styled(compass_point(qibla.direction), theme::amber()),
            Span::styled(" of true north", theme::dim()),
        ]),
        Line::from(vec![
            Span::styled("  Kaaba   ", theme::dim()),
            Span::styled(qibla.distance.as_str(), theme::bold()),
        ]),
    ];
    frame.render_widget(Paragraph::new(details), chunks[1]);
}
