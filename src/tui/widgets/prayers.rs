use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem},
    Frame,
};

use crate::models::{PrayerTimeSet, PrayerType};
use crate::tui::theme;

/// Today's six slots. Times before `now_hhmm` are dimmed and the upcoming prayer is marked.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    times: Option<&PrayerTimeSet>,
    now_hhmm: &str,
    next: Option<PrayerType>,
) {
    let block = Block::default()
        .title(Span::styled(" Prayer Times ", theme::gold()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border())
        .style(theme::surface());

    let items: Vec<ListItem> = match times {
        None => vec![ListItem::new(Line::from(Span::styled("  --:--", theme::dim())))],
        Some(set) => set
            .times
            .schedule()
            .into_iter()
            .map(|(prayer, time)| {
                let is_next = next == Some(prayer);
                let is_past = time < now_hhmm;

                let (icon, time_style) = if is_next {
                    ("▸", theme::gold().add_modifier(Modifier::BOLD))
                } else if is_past {
                    (" ", theme::dim())
                } else {
                    (" ", theme::bold())
                };

                let name_style = if is_next {
                    theme::gold().add_modifier(Modifier::BOLD)
                } else if is_past {
                    theme::dim()
                } else {
                    theme::slot_name(prayer)
                };

                ListItem::new(Line::from(vec![
                    Span::styled(format!(" {} ", icon), theme::gold()),
                    Span::styled(format!("{:<9}", prayer.display_name()), name_style),
                    Span::styled(time.to_string(), time_style),
                ]))
            })
            .collect(),
    };

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}
