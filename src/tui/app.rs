use anyhow::Result;
use chrono::{DateTime, Local, NaiveDate, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    DefaultTerminal, Frame,
};

use crate::config::AppConfig;
use crate::db::Storage;
use crate::features::calculator::{Key, Operator};
use crate::features::prayer::seconds_until;
use crate::features::word_clock::phrase_for;
use crate::features::{
    AlarmClock, Calculator, CalendarBook, FeatureError, FinanceLedger, HabitTracker,
    PrayerTimetable, Stopwatch, TasbeehCounter, TodoList,
};
use crate::tui::events::{Event, EventHandler};
use crate::tui::theme;
use crate::tui::widgets::{
    agenda, balance, calculator, habits, header, next_up, statusbar, stopwatch, tasbeeh, word_clock,
};
use crate::utils::hijri::today_hijri_string;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View {
    Dashboard,
    Tasbeeh,
    Stopwatch,
    Calculator,
}

impl View {
    pub const ALL: [View; 4] = [
        View::Dashboard,
        View::Tasbeeh,
        View::Stopwatch,
        View::Calculator,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Tasbeeh => "Tasbeeh",
            View::Stopwatch => "Stopwatch",
            View::Calculator => "Calculator",
        }
    }

    fn index(&self) -> usize {
        match self {
            View::Dashboard => 0,
            View::Tasbeeh => 1,
            View::Stopwatch => 2,
            View::Calculator => 3,
        }
    }

    pub fn next(&self) -> View {
        View::ALL[(self.index() + 1) % View::ALL.len()]
    }

    pub fn prev(&self) -> View {
        View::ALL[(self.index() + View::ALL.len() - 1) % View::ALL.len()]
    }
}

pub struct App {
    pub view: View,
    pub config: AppConfig,
    pub should_quit: bool,
    pub show_help: bool,
    pub message: Option<String>,

    storage: Storage,
    today: NaiveDate,
    hijri_str: String,

    tasbeeh: TasbeehCounter,
    tasbeeh_idx: usize,
    stopwatch: Stopwatch,
    calculator: Calculator,
    prayers: PrayerTimetable,
    alarms: AlarmClock,
    todo: TodoList,
    calendar: CalendarBook,
    ledger: FinanceLedger,
    habits: HabitTracker,
}

impl App {
    pub fn new(storage: Storage, config: AppConfig) -> Self {
        let today = Local::now().date_naive();
        let hijri_str = today_hijri_string(config.clock.hijri_offset);

        App {
            view: View::Dashboard,
            should_quit: false,
            show_help: false,
            message: None,
            today,
            hijri_str,
            tasbeeh: TasbeehCounter::load(&storage),
            tasbeeh_idx: 0,
            stopwatch: Stopwatch::load(&storage),
            calculator: Calculator::new(),
            prayers: PrayerTimetable::load(&storage),
            alarms: AlarmClock::load(&storage),
            todo: TodoList::load(&storage),
            calendar: CalendarBook::load(&storage),
            ledger: FinanceLedger::load(&storage),
            habits: HabitTracker::load(&storage),
            storage,
            config,
        }
    }

    /// Re-read every collection, picking up changes made from the CLI.
    pub fn reload(&mut self) {
        self.tasbeeh = TasbeehCounter::load(&self.storage);
        self.stopwatch = Stopwatch::load(&self.storage);
        self.prayers = PrayerTimetable::load(&self.storage);
        self.alarms = AlarmClock::load(&self.storage);
        self.todo = TodoList::load(&self.storage);
        self.calendar = CalendarBook::load(&self.storage);
        self.ledger = FinanceLedger::load(&self.storage);
        self.habits = HabitTracker::load(&self.storage);
        self.tasbeeh_idx = self
            .tasbeeh_idx
            .min(self.tasbeeh.events().len().saturating_sub(1));
    }

    /// Fast ticks only while a running stopwatch is on screen.
    pub fn tick_rate_ms(&self) -> u64 {
        if self.view == View::Stopwatch && self.stopwatch.is_running() {
            self.config.clock.stopwatch_tick_ms
        } else {
            self.config.clock.tick_ms
        }
    }

    pub fn tick(&mut self) {
        let today = Local::now().date_naive();
        if today != self.today {
            log::debug!("date changed to {}", today);
            self.today = today;
            self.hijri_str = today_hijri_string(self.config.clock.hijri_offset);
            self.reload();
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        // Only handle actual key presses; some terminals also report release/repeat
        if key.kind != KeyEventKind::Press {
            return;
        }

        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
                self.show_help = false;
            }
            return;
        }

        self.message = None;
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Tab => self.view = self.view.next(),
            KeyCode::BackTab => self.view = self.view.prev(),
            code => match self.view {
                View::Dashboard => self.handle_dashboard_key(code),
                View::Tasbeeh => self.handle_tasbeeh_key(code),
                View::Stopwatch => self.handle_stopwatch_key(code),
                View::Calculator => self.handle_calculator_key(code),
            },
        }
    }

    fn handle_dashboard_key(&mut self, code: KeyCode) {
        if code == KeyCode::Char('r') {
            self.reload();
            self.message = Some("Reloaded".to_string());
        }
    }

    fn handle_tasbeeh_key(&mut self, code: KeyCode) {
        let count = self.tasbeeh.events().len();
        let Some(id) = self
            .tasbeeh
            .events()
            .get(self.tasbeeh_idx)
            .map(|e| e.id.clone())
        else {
            return;
        };
        let now = Utc::now();

        let result = match code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.tasbeeh_idx = self.tasbeeh_idx.saturating_sub(1);
                Ok(())
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.tasbeeh_idx + 1 < count {
                    self.tasbeeh_idx += 1;
                }
                Ok(())
            }
            KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Char('+') => {
                self.tasbeeh.increment(&id, now).map(|_| ())
            }
            KeyCode::Char('-') | KeyCode::Backspace => {
                self.tasbeeh.decrement(&id, now).map(|_| ())
            }
            KeyCode::Char('r') => self.tasbeeh.reset_daily(&id, now).map(|_| ()),
            _ => Ok(()),
        };
        self.report(result);
    }

    fn handle_stopwatch_key(&mut self, code: KeyCode) {
        let now_ms = Utc::now().timestamp_millis();
        match code {
            KeyCode::Char(' ') | KeyCode::Enter => self.stopwatch.toggle(now_ms),
            KeyCode::Char('r') => self.stopwatch.reset(),
            _ => {}
        }
    }

    fn handle_calculator_key(&mut self, code: KeyCode) {
        let key = match code {
            KeyCode::Char(c @ '0'..='9') => Key::Digit(c as u8 - b'0'),
            KeyCode::Char('.') => Key::Point,
            KeyCode::Char('+') => Key::Op(Operator::Add),
            KeyCode::Char('-') => Key::Op(Operator::Subtract),
            KeyCode::Char('*') | KeyCode::Char('x') => Key::Op(Operator::Multiply),
            KeyCode::Char('/') => Key::Op(Operator::Divide),
            KeyCode::Char('%') => Key::Percent,
            KeyCode::Char('n') => Key::Negate,
            KeyCode::Char('=') | KeyCode::Enter => Key::Equals,
            KeyCode::Char('c') | KeyCode::Delete => Key::Clear,
            KeyCode::Backspace => Key::Backspace,
            _ => return,
        };
        self.calculator.press(key);
    }

    fn report(&mut self, result: Result<(), FeatureError>) {
        if let Err(e) = result {
            log::warn!("{}", e);
            self.message = Some(e.to_string());
        }
    }

    pub fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let now = Local::now();

        // Clear background
        frame.render_widget(Block::default().style(theme::base()), area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // header
                Constraint::Min(0),    // body
                Constraint::Length(1), // status bar
            ])
            .split(area);

        let tabs: Vec<&str> = View::ALL.iter().map(|v| v.title()).collect();
        header::render(
            frame,
            chunks[0],
            now,
            self.config.clock.hour12,
            &self.hijri_str,
            &tabs,
            self.view.index(),
        );

        match self.view {
            View::Dashboard => self.draw_dashboard(frame, chunks[1], now),
            View::Tasbeeh => self.draw_tasbeeh(frame, chunks[1]),
            View::Stopwatch => self.draw_stopwatch(frame, chunks[1]),
            View::Calculator => calculator::render(frame, chunks[1], &self.calculator),
        }

        statusbar::render(frame, chunks[2], self.hints(), self.message.as_deref());

        if self.show_help {
            self.draw_help_overlay(frame);
        }
    }

    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        match self.view {
            View::Dashboard => &[
                ("[Tab]", " view  "),
                ("[r]", " reload  "),
                ("[?]", " help  "),
                ("[q]", " quit"),
            ],
            View::Tasbeeh => &[
                ("[Space]", " count  "),
                ("[-]", " undo  "),
                ("[r]", " reset  "),
                ("[↑ ↓]", " select  "),
                ("[Tab]", " view  "),
                ("[q]", " quit"),
            ],
            View::Stopwatch => &[
                ("[Space]", " start/pause  "),
                ("[r]", " reset  "),
                ("[Tab]", " view  "),
                ("[q]", " quit"),
            ],
            View::Calculator => &[
                ("[0-9 . + - * / %]", " keys  "),
                ("[Enter]", " =  "),
                ("[c]", " clear  "),
                ("[Tab]", " view  "),
                ("[q]", " quit"),
            ],
        }
    }

    fn draw_dashboard(&self, frame: &mut Frame, area: Rect, now: DateTime<Local>) {
        let now_utc = now.with_timezone(&Utc);
        let now_naive = now.naive_local();

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);

        // Left column: word clock + today's agenda
        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0)])
            .split(columns[0]);

        word_clock::render(frame, left[0], &phrase_for(now.time()));

        let events_today = self.calendar.events_on(self.today);
        let pending = self.todo.pending();
        agenda::render(frame, left[1], &events_today, &pending, now_utc);

        // Right column: next up + finance + streaks
        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(6),
                Constraint::Length(5),
                Constraint::Min(0),
            ])
            .split(columns[1]);

        let next_prayer = self
            .prayers
            .next_prayer(now.time())
            .map(|p| (p, seconds_until(p.time, now.time())));
        let next_alarm = self
            .alarms
            .next_occurrence(now_naive)
            .map(|(alarm, at)| (alarm, at, (at - now_naive).num_seconds()));
        next_up::render(frame, right[0], next_prayer, next_alarm);

        balance::render(frame, right[1], &self.ledger.summary());
        habits::render(frame, right[2], &self.habits.streaks(now_utc));
    }

    fn draw_tasbeeh(&self, frame: &mut Frame, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        tasbeeh::render_list(frame, columns[0], self.tasbeeh.events(), self.tasbeeh_idx);
        tasbeeh::render_counter(
            frame,
            columns[1],
            self.tasbeeh.events().get(self.tasbeeh_idx),
        );
    }

    fn draw_stopwatch(&self, frame: &mut Frame, area: Rect) {
        let now_ms = Utc::now().timestamp_millis();
        stopwatch::render(
            frame,
            area,
            self.stopwatch.elapsed_ms(now_ms),
            self.stopwatch.is_running(),
        );
    }

    fn draw_help_overlay(&self, frame: &mut Frame) {
        let area = frame.area();

        // Center a help box
        let popup_area = Rect {
            x: area.width / 4,
            y: area.height / 5,
            width: area.width / 2,
            height: (area.height * 3 / 5).max(3),
        };

        frame.render_widget(Clear, popup_area);

        let bindings = [
            ("[Tab] / [S-Tab]", "Next / previous view"),
            ("[Space] [Enter] [+]", "Count (Tasbeeh)"),
            ("[-] [Backspace]", "Undo a count (Tasbeeh)"),
            ("[↑ ↓] [j k]", "Select counter (Tasbeeh)"),
            ("[Space]", "Start / pause (Stopwatch)"),
            ("[0-9 + - * / Enter]", "Calculate (Calculator)"),
            ("[r]", "Reset / reload"),
            ("[?]", "Toggle help"),
            ("[q] / [Esc]", "Quit"),
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
                Span::styled(format!("  {:<22}", key), theme::gold()),
                Span::styled(action, theme::dim()),
            ]));
        }
        help_text.push(Line::from(""));
        help_text.push(Line::from(Span::styled(
            "  Add and edit records with the CLI: trifecta --help",
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
pub fn run(storage: Storage, config: AppConfig) -> Result<()> {
    let mut app = App::new(storage, config);

    let mut terminal = ratatui::init();
    let events = EventHandler::new(app.tick_rate_ms());
    let result = event_loop(&mut terminal, &mut app, &events);
    ratatui::restore();
    result
}

fn event_loop(terminal: &mut DefaultTerminal, app: &mut App, events: &EventHandler) -> Result<()> {
    loop {
        terminal.draw(|frame| app.draw(frame))?;

        match events.next()? {
            Event::Key(key) => {
                app.handle_key(key);
                if app.should_quit {
                    return Ok(());
                }
            }
            Event::Tick => app.tick(),
        }

        events.set_tick_rate(app.tick_rate_ms());
    }
}
