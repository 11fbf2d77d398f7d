use anyhow::Result;
use chrono::{Local, NaiveDate, NaiveTime};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use log::warn;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use rusqlite::Connection;
use std::time::Duration;

use crate::config::AppConfig;
use crate::db::repository::SqliteCache;
use crate::models::{City, PrayerTimeSet, PrayerType, QiblaResult};
use crate::prayer_times::{estimate, next_prayer, times_for_city, NoCache, PrayerCache};
use crate::qibla::qibla_from;
use crate::tui::events::{Event, EventHandler};
use crate::tui::theme;
use crate::tui::widgets::{header, next_prayer as next_prayer_widget, prayers, qibla, statusbar};
use crate::utils::hijri::hijri_with_offset;

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Dashboard,
    Help,
}

pub struct App {
    pub view: View,
    pub config: AppConfig,
    pub city_idx: usize,
    pub should_quit: bool,

    // Cached state (refreshed on load/tick)
    pub today: NaiveDate,
    pub hijri_str: String,
    pub times: Option<PrayerTimeSet>,
    pub qibla: Option<QiblaResult>,
    pub next_prayer_info: Option<(PrayerType, i64)>,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let city_idx = config
            .default_city()
            .ok()
            .and_then(|c| config.cities.iter().position(|x| x.name == c.name))
            .unwrap_or(0);

        App {
            view: View::Dashboard,
            config,
            city_idx,
            should_quit: false,
            today: Local::now().date_naive(),
            hijri_str: String::new(),
            times: None,
            qibla: None,
            next_prayer_info: None,
        }
    }

    pub fn city(&self) -> Option<&City> {
        self.config.cities.get(self.city_idx)
    }

    pub fn load(&mut self, conn: &Connection, today: NaiveDate, now: NaiveTime) {
        self.today = today;
        self.hijri_str = match hijri_with_offset(
            today,
            self.config.calendar.hijri_offset,
            &self.config.hijri_calendar(),
        ) {
            Ok(h) => h.formatted(),
            Err(e) => {
                warn!("hijri date unavailable: {}", e);
                String::new()
            }
        };

        let Some(city) = self.city().cloned() else {
            self.times = None;
            self.qibla = None;
            self.next_prayer_info = None;
            return;
        };

        let sqlite = SqliteCache::new(conn);
        let cache: &dyn PrayerCache = if self.config.cache.enabled { &sqlite } else { &NoCache };
        self.times = Some(times_for_city(cache, &city, today));
        self.qibla = Some(qibla_from(city.coordinate()));
        self.refresh_countdown(now);
    }

    /// Called every tick: roll over at midnight, otherwise just recount.
    pub fn tick(&mut self, conn: &Connection, today: NaiveDate, now: NaiveTime) {
        if today != self.today {
            self.load(conn, today, now);
        } else {
            self.refresh_countdown(now);
        }
    }

    fn refresh_countdown(&mut self, now: NaiveTime) {
        let (Some(set), Some(city)) = (&self.times, self.city()) else {
            self.next_prayer_info = None;
            return;
        };
        let tomorrow = self
            .today
            .succ_opt()
            .map(|d| estimate(city.coordinate(), d))
            .unwrap_or_else(|| set.times.clone());

        self.next_prayer_info = match next_prayer(&set.times, &tomorrow, now) {
            Ok(info) => Some(info),
            Err(e) => {
                warn!("could not work out next prayer: {:#}", e);
                None
            }
        };
    }

    pub fn handle_key(&mut self, key: KeyEvent, conn: &Connection) {
        // Only handle key presses; some terminals also send release/repeat events
        if key.kind != KeyEventKind::Press {
            return;
        }
        match self.view {
            View::Dashboard => self.handle_dashboard_key(key, conn),
            View::Help => self.handle_help_key(key),
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyEvent, conn: &Connection) {
        let count = self.config.cities.len();
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Char('?') => {
                self.view = View::Help;
            }
            KeyCode::Right | KeyCode::Char('l') if count > 0 => {
                self.city_idx = (self.city_idx + 1) % count;
                self.reload(conn);
            }
            KeyCode::Left | KeyCode::Char('h') if count > 0 => {
                self.city_idx = (self.city_idx + count - 1) % count;
                self.reload(conn);
            }
            KeyCode::Char('r') => {
                self.reload(conn);
            }
            _ => {}
        }
    }

    fn handle_help_key(&mut self, key: KeyEvent) {
        if let KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') = key.code {
            self.view = View::Dashboard;
        }
    }

    fn reload(&mut self, conn: &Connection) {
        let now = Local::now();
        self.load(conn, now.date_naive(), now.time());
    }

    pub fn draw(&self, frame: &mut Frame) {
        self.draw_dashboard(frame);
        if self.view == View::Help {
            self.draw_help_overlay(frame);
        }
    }

    fn draw_dashboard(&self, frame: &mut Frame) {
        let area = frame.area();

        // Clear background
        frame.render_widget(Block::default().style(theme::base()), area);

        let outer_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // header
                Constraint::Min(0),    // body
                Constraint::Length(1), // status bar
            ])
            .split(area);

        let city_name = self.city().map(|c| c.name.as_str()).unwrap_or("—");
        header::render(frame, outer_chunks[0], city_name, &self.hijri_str, self.today);
        statusbar::render(frame, outer_chunks[2]);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(outer_chunks[1]);

        let today_iso = self.today.format("%Y-%m-%d").to_string();
        let now_hhmm = if self.times.as_ref().is_some_and(|t| t.date == today_iso) {
            Local::now().format("%H:%M").to_string()
        } else {
            String::new()
        };

        prayers::render(
            frame,
            columns[0],
            self.times.as_ref(),
            &now_hhmm,
            self.next_prayer_info.as_ref().map(|(p, _)| *p),
        );

        let right_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(6), // next prayer
                Constraint::Min(0),    // qibla
            ])
            .split(columns[1]);

        next_prayer_widget::render(frame, right_chunks[0], self.next_prayer_info.as_ref());
        qibla::render(frame, right_chunks[1], self.qibla.as_ref());
    }

    fn draw_help_overlay(&self, frame: &mut Frame) {
        let area = frame.area();

        // Center a help box
        let popup_area = Rect {
            x: area.width / 4,
            y: area.height / 4,
            width: area.width / 2,
            height: area.height / 2,
        };

        frame.render_widget(Clear, popup_area);

        let bindings = [
            ("  [← →] / [h l]  ", "Previous / next city"),
            ("  [r]            ", "Recalculate now"),
            ("  [?]            ", "Toggle help"),
            ("  [q] / [Esc]    ", "Quit"),
        ];

        let mut help_text = vec![
            Line::from(Span::styled(
                "  Keybindings",
                theme::gold().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        for (key, action) in bindings {
            help_text.push(Line::from(vec![
                Span::styled(key, theme::gold()),
                Span::styled(action, theme::dim()),
            ]));
        }
        help_text.push(Line::from(""));
        help_text.push(Line::from(Span::styled(
            "  Times are a simplified solar estimate.",
            theme::dim(),
        )));

        let block = Block::default()
            .title(Span::styled(" Help ", theme::gold()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::gold())
            .style(theme::surface());

        let paragraph = Paragraph::new(help_text).block(block);
        frame.render_widget(paragraph, popup_area);
    }
}

/// Run the TUI event loop.
pub fn run(conn: Connection, config: AppConfig) -> Result<()> {
    let mut app = App::new(config);
    let now = Local::now();
    app.load(&conn, now.date_naive(), now.time());

    let mut terminal = ratatui::init();
    let events = EventHandler::new(Duration::from_millis(500));

    let outcome = event_loop(&mut terminal, &mut app, &events, &conn);

    ratatui::restore();
    outcome
}

fn event_loop(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App,
    events: &EventHandler,
    conn: &Connection,
) -> Result<()> {
    loop {
        terminal.draw(|frame| app.draw(frame))?;

        match events.next()? {
            Event::Key(key) => {
                app.handle_key(key, conn);
                if app.should_quit {
                    return Ok(());
                }
            }
            Event::Resize => {}
            Event::Tick => {
                let now = Local::now();
                app.tick(conn, now.date_naive(), now.time());
            }
        }
    }
}
