use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Datelike, Local, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde_json::{Map, Value};
use std::str::FromStr;

use crate::cli::args::{
    AlarmCommands, CalendarCommands, ConfigCommands, DataCommands, FinanceCommands,
    HabitCommands, NoteCommands, PrayerCommands, StopwatchCommands, TasbeehCommands,
    TodoCommands,
};
use crate::config::AppConfig;
use crate::db::Storage;
use crate::features::alarm::{parse_days, parse_weekday};
use crate::features::calculator::evaluate;
use crate::features::calendar::{parse_date, RECENT_EVENTS};
use crate::features::prayer::seconds_until;
use crate::features::stopwatch::format_elapsed;
use crate::features::word_clock::phrase_for;
use crate::features::{
    AlarmClock, CalendarBook, FinanceLedger, HabitTracker, MonthGrid, NotesBook,
    PrayerTimetable, Stopwatch, TasbeehCounter, TodoList,
};
use crate::models::{ClockTime, EntryKind};
use crate::prayer_times::PrayerCalculator;
use crate::utils::format::{
    format_amount, format_clock, format_duration_secs, format_long_date, format_time,
    format_timestamp, progress_bar,
};
use crate::utils::hijri::today_hijri_string;

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! print_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        print!("\x1b[0m");
    }};
}

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const GOLD: &str = "\x1b[38;2;196;160;68m";

// ─── Clock ───────────────────────────────────────────────────────────────────

pub fn handle_clock(config: &AppConfig, words: bool, hour24: bool) -> Result<()> {
    let now = Local::now();
    let hour12 = config.clock.hour12 && !hour24;

    println!();
    if words {
        println_colored!(GOLD, "  {}", phrase_for(now.time()));
    } else {
        println_colored!(GOLD, "  {}", format_clock(now.time(), hour12));
    }
    println_colored!(BOLD, "  {}", format_long_date(now));
    let hijri = today_hijri_string(config.clock.hijri_offset);
    if !hijri.is_empty() {
        println_colored!(DIM, "  {}", hijri);
    }
    println!();
    Ok(())
}

// ─── Stopwatch ───────────────────────────────────────────────────────────────

pub fn handle_stopwatch(storage: &Storage, action: &StopwatchCommands) -> Result<()> {
    let mut stopwatch = Stopwatch::load(storage);
    let now_ms = Utc::now().timestamp_millis();

    match action {
        StopwatchCommands::Status => {}
        StopwatchCommands::Start => stopwatch.start(now_ms),
        StopwatchCommands::Pause => stopwatch.pause(now_ms),
        StopwatchCommands::Reset => stopwatch.reset(),
    }

    let elapsed = format_elapsed(stopwatch.elapsed_ms(now_ms));
    if stopwatch.is_running() {
        println_colored!(GREEN, "  ▶ {}  running", elapsed);
    } else {
        println_colored!(DIM, "  ⏸ {}  paused", elapsed);
    }
    Ok(())
}

// ─── Tasbeeh ─────────────────────────────────────────────────────────────────

pub fn handle_tasbeeh(
    storage: &Storage,
    config: &AppConfig,
    action: &TasbeehCommands,
) -> Result<()> {
    let mut counter = TasbeehCounter::load(storage);
    let now = Utc::now();

    match action {
        TasbeehCommands::List => {
            println!();
            if counter.events().is_empty() {
                println_colored!(DIM, "  No tasbeeh counters yet. Add one with `trifecta tasbeeh add <name>`.");
            }
            for event in counter.events() {
                let bar = progress_bar(event.daily_count, event.daily_goal, 20);
                let color = if event.goal_reached() { GREEN } else { BOLD };
                println_colored!(
                    color,
                    "  {:<16} {}  {}/{}  (total {})",
                    event.name,
                    bar,
                    event.daily_count,
                    event.daily_goal,
                    event.total_count
                );
                println_colored!(DIM, "  {:<16} id {}", "", event.id);
            }
            println!();
        }
        TasbeehCommands::Add { name, goal } => {
            let goal = goal.unwrap_or(config.tasbeeh.default_goal);
            let event = counter.create(name, goal, now)?;
            println_colored!(GREEN, "  ✓ Added '{}' with a daily goal of {}", event.name, event.daily_goal);
        }
        TasbeehCommands::Count { event, times } => {
            let id = counter.resolve(event)?;
            for _ in 0..*times {
                counter.increment(&id, now)?;
            }
            print_progress(&counter, &id);
        }
        TasbeehCommands::Undo { event } => {
            let id = counter.resolve(event)?;
            counter.decrement(&id, now)?;
            print_progress(&counter, &id);
        }
        TasbeehCommands::Reset { event } => {
            let id = counter.resolve(event)?;
            let event = counter.reset_daily(&id, now)?;
            println_colored!(AMBER, "  ↺ '{}' reset for today (total {})", event.name, event.total_count);
        }
        TasbeehCommands::Remove { event } => {
            let id = counter.resolve(event)?;
            let removed = counter.delete(&id)?;
            println_colored!(RED, "  ✗ Removed '{}'", removed.name);
        }
    }
    Ok(())
}

fn print_progress(counter: &TasbeehCounter, id: &str) {
    if let Some(event) = counter.get(id) {
        if event.goal_reached() {
            println_colored!(
                GREEN,
                "  ✓ {}: {}/{}  goal reached",
                event.name,
                event.daily_count,
                event.daily_goal
            );
        } else {
            println_colored!(
                BOLD,
                "  {}: {}/{} ({:.0}%)",
                event.name,
                event.daily_count,
                event.daily_goal,
                event.progress_percent()
            );
        }
    }
}

// ─── Notes ───────────────────────────────────────────────────────────────────

pub fn handle_note(storage: &Storage, action: &NoteCommands) -> Result<()> {
    let mut book = NotesBook::load(storage);
    let now = Utc::now();

    match action {
        NoteCommands::List { search } => {
            let notes = match search {
                Some(q) => book.search(q),
                None => book.notes().iter().collect(),
            };
            println!();
            if notes.is_empty() {
                println_colored!(DIM, "  No notes found.");
            }
            for note in notes {
                println_colored!(BOLD, "  {}", note.title);
                println_colored!(DIM, "    {}  ·  updated {}", note.id, format_timestamp(note.updated_at));
            }
            println!();
        }
        NoteCommands::Show { id } => {
            let note = book
                .get(id)
                .ok_or_else(|| anyhow!("No note matches '{}'", id))?;
            println!();
            println_colored!(GOLD, "  {}", note.title);
            println_colored!(
                DIM,
                "  created {}  ·  updated {}",
                format_timestamp(note.created_at),
                format_timestamp(note.updated_at)
            );
            println!();
            for line in note.content.lines() {
                println!("  {}", line);
            }
            println!();
        }
        NoteCommands::Add { title, content } => {
            let note = book.create(title, content, now)?;
            println_colored!(GREEN, "  ✓ Note '{}' saved ({})", note.title, note.id);
        }
        NoteCommands::Edit { id, title, content } => {
            let existing = book
                .get(id)
                .ok_or_else(|| anyhow!("No note matches '{}'", id))?;
            let title = title.clone().unwrap_or_else(|| existing.title.clone());
            let content = content.clone().unwrap_or_else(|| existing.content.clone());
            let note = book.update(id, &title, &content, now)?;
            println_colored!(GREEN, "  ✓ Note '{}' updated", note.title);
        }
        NoteCommands::Remove { id } => {
            let removed = book.delete(id)?;
            println_colored!(RED, "  ✗ Deleted note '{}'", removed.title);
        }
    }
    Ok(())
}

// ─── Todo ────────────────────────────────────────────────────────────────────

pub fn handle_todo(storage: &Storage, action: &TodoCommands) -> Result<()> {
    let mut list = TodoList::load(storage);
    let now = Utc::now();

    match action {
        TodoCommands::List { pending, done } => {
            let tasks = if *pending {
                list.pending()
            } else if *done {
                list.completed()
            } else {
                list.tasks().iter().collect()
            };
            println!();
            if tasks.is_empty() {
                println_colored!(DIM, "  Nothing here.");
            }
            for task in tasks {
                let due = task
                    .due_date
                    .map(|d| format!("  due {}", d.with_timezone(&Local).format("%Y-%m-%d")))
                    .unwrap_or_default();
                if task.completed {
                    println_colored!(DIM, "  [✓] {}{}", task.title, due);
                } else if task.is_overdue(now) {
                    println_colored!(RED, "  [ ] {}{}  overdue", task.title, due);
                } else {
                    println_colored!(BOLD, "  [ ] {}{}", task.title, due);
                }
                if let Some(desc) = &task.description {
                    println!("      {}", desc);
                }
                if let Some(remind) = task.reminder_time {
                    println_colored!(DIM, "      ⏰ {}", format_timestamp(remind));
                }
                println_colored!(DIM, "      id {}", task.id);
            }
            println!();
            let overdue = list.overdue(now).len();
            if overdue > 0 {
                println_colored!(AMBER, "  {} overdue", overdue);
                println!();
            }
        }
        TodoCommands::Add {
            title,
            description,
            due,
            remind,
        } => {
            let due_date = due
                .as_deref()
                .map(|s| -> Result<DateTime<Utc>> {
                    let date = parse_date(s)?;
                    let end_of_day = date
                        .and_hms_opt(23, 59, 59)
                        .ok_or_else(|| anyhow!("Invalid due date '{}'", s))?;
                    local_to_utc(end_of_day)
                })
                .transpose()?;
            let reminder_time = remind
                .as_deref()
                .map(|s| -> Result<DateTime<Utc>> {
                    let ndt = NaiveDateTime::parse_from_str(s.trim(), "%Y-%m-%d %H:%M")
                        .with_context(|| format!("Invalid reminder '{}', expected \"YYYY-MM-DD HH:MM\"", s))?;
                    local_to_utc(ndt)
                })
                .transpose()?;
            let task = list.add(title, description.as_deref(), due_date, reminder_time, now)?;
            println_colored!(GREEN, "  ✓ Added '{}' ({})", task.title, task.id);
        }
        TodoCommands::Toggle { id } => {
            let task = list.toggle(id, now)?;
            if task.completed {
                println_colored!(GREEN, "  ✓ '{}' done", task.title);
            } else {
                println_colored!(AMBER, "  ○ '{}' reopened", task.title);
            }
        }
        TodoCommands::Remove { id } => {
            let removed = list.delete(id)?;
            println_colored!(RED, "  ✗ Deleted '{}'", removed.title);
        }
    }
    Ok(())
}

// ─── Calendar ────────────────────────────────────────────────────────────────

pub fn handle_calendar(storage: &Storage, action: &CalendarCommands) -> Result<()> {
    let mut book = CalendarBook::load(storage);
    let now = Utc::now();
    let today = Local::now().date_naive();

    match action {
        CalendarCommands::Month {
            year,
            month,
            offset,
        } => {
            let mut grid = match (year, month) {
                (None, None) => MonthGrid::containing(today),
                _ => {
                    let y = year.unwrap_or(today.year());
                    let m = month.unwrap_or(today.month());
                    MonthGrid::new(y, m).ok_or_else(|| anyhow!("Invalid month {}-{}", y, m))?
                }
            };
            for _ in 0..offset.unsigned_abs() {
                grid = if *offset > 0 { grid.next() } else { grid.prev() };
            }
            let marked = book.marked_days(&grid);

            println!();
            println_colored!(GOLD, "  {}", grid.title());
            println_colored!(DIM, "  Su Mo Tu We Th Fr Sa");
            for week in grid.weeks() {
                print!("  ");
                for cell in week {
                    match cell {
                        None => print!("   "),
                        Some(day) if grid.date(day) == Some(today) => {
                            print_colored!(GREEN, "{:>2} ", day);
                        }
                        Some(day) if marked.contains(&day) => {
                            print_colored!(AMBER, "{:>2} ", day);
                        }
                        Some(day) => print!("{:>2} ", day),
                    }
                }
                println!();
            }
            println!();

            for day in &marked {
                let Some(date) = grid.date(*day) else { continue };
                for event in book.events_on(date) {
                    println_colored!(AMBER, "  {}  {}", grid.date_key(*day), event.title);
                }
            }
            if !marked.is_empty() {
                println!();
            }
        }
        CalendarCommands::Add {
            date,
            title,
            description,
        } => {
            let date = parse_date(date)?;
            let event = book.add(date, title, description.as_deref(), now)?;
            println_colored!(GREEN, "  ✓ '{}' on {} ({})", event.title, event.date, event.id);
        }
        CalendarCommands::On { date } => {
            let date = parse_date(date)?;
            let events = book.events_on(date);
            println!();
            println_colored!(GOLD, "  {}", date.format("%A, %B %-d, %Y"));
            if events.is_empty() {
                println_colored!(DIM, "  No events.");
            }
            for event in events {
                print_event_line(event.title.as_str(), event.description.as_deref(), &event.id);
            }
            println!();
        }
        CalendarCommands::Recent => {
            println!();
            for event in book.recent(RECENT_EVENTS) {
                println_colored!(BOLD, "  {}  {}", event.date, event.title);
                println_colored!(DIM, "      id {}", event.id);
            }
            println!();
        }
        CalendarCommands::Remove { id } => {
            let removed = book.delete(id)?;
            println_colored!(RED, "  ✗ Deleted '{}'", removed.title);
        }
    }
    Ok(())
}

fn print_event_line(title: &str, description: Option<&str>, id: &str) {
    println_colored!(BOLD, "  • {}", title);
    if let Some(desc) = description {
        println!("    {}", desc);
    }
    println_colored!(DIM, "    id {}", id);
}

// ─── Finance ─────────────────────────────────────────────────────────────────

pub fn handle_finance(storage: &Storage, action: &FinanceCommands) -> Result<()> {
    let mut ledger = FinanceLedger::load(storage);
    let now = Utc::now();

    match action {
        FinanceCommands::List => {
            println!();
            if ledger.entries().is_empty() {
                println_colored!(DIM, "  No entries yet.");
            }
            for entry in ledger.by_date() {
                let date = entry.date.with_timezone(&Local).format("%Y-%m-%d");
                let (sign, color) = match entry.kind {
                    EntryKind::Income => ('+', GREEN),
                    EntryKind::Expense => ('-', RED),
                };
                println_colored!(
                    color,
                    "  {}  {}{:>10}  {:<12} {}",
                    date,
                    sign,
                    format_amount(entry.amount),
                    entry.category,
                    entry.description
                );
                println_colored!(DIM, "      id {}", entry.id);
            }
            println!();
        }
        FinanceCommands::Add {
            kind,
            amount,
            category,
            description,
            date,
        } => {
            let kind = EntryKind::from_str(kind)?;
            let date = match date {
                Some(s) => local_to_utc(parse_date(s)?.and_time(NaiveTime::MIN))?,
                None => now,
            };
            let entry = ledger.add(kind, *amount, description, category, date, now)?;
            println_colored!(
                GREEN,
                "  ✓ {} {} in {} ({})",
                entry.kind,
                format_amount(entry.amount),
                entry.category,
                entry.id
            );
        }
        FinanceCommands::Remove { id } => {
            let removed = ledger.delete(id)?;
            println_colored!(RED, "  ✗ Deleted {} of {}", removed.kind, format_amount(removed.amount));
        }
        FinanceCommands::Summary => {
            let summary = ledger.summary();
            println!();
            println_colored!(GREEN, "  Income:    {:>12}", format_amount(summary.total_income));
            println_colored!(RED, "  Expenses:  {:>12}", format_amount(summary.total_expenses));
            let color = if summary.balance < 0.0 { RED } else { GOLD };
            println_colored!(color, "  Balance:   {:>12}", format_amount(summary.balance));

            for kind in [EntryKind::Income, EntryKind::Expense] {
                let categories = ledger.by_category(kind);
                if categories.is_empty() {
                    continue;
                }
                println!();
                println_colored!(BOLD, "  {} by category", kind);
                for (category, total) in categories {
                    println!("    {:<14} {:>12}", category, format_amount(total));
                }
            }
            println!();
        }
    }
    Ok(())
}

// ─── Habits ──────────────────────────────────────────────────────────────────

pub fn handle_habit(storage: &Storage, action: &HabitCommands) -> Result<()> {
    let mut tracker = HabitTracker::load(storage);
    let now = Utc::now();

    match action {
        HabitCommands::List => {
            println!();
            if tracker.habits().is_empty() {
                println_colored!(DIM, "  No habits tracked yet.");
            }
            for (habit, streak) in tracker.streaks(now) {
                println_colored!(BOLD, "  {:<20} {:>14}  {}", habit.name, streak.to_string(), streak.tier().label());
                if let Some(desc) = &habit.description {
                    println!("      {}", desc);
                }
                println_colored!(DIM, "      since {}  ·  id {}", format_timestamp(habit.streak_start()), habit.id);
            }
            println!();
        }
        HabitCommands::Add {
            name,
            description,
            since,
        } => {
            let start = match since {
                Some(s) => local_to_utc(parse_date(s)?.and_time(NaiveTime::MIN))?,
                None => now,
            };
            let habit = tracker.add(name, description.as_deref(), start, now)?;
            println_colored!(GREEN, "  ✓ Tracking '{}' ({})", habit.name, habit.id);
        }
        HabitCommands::Relapse { habit } => {
            let id = tracker.resolve(habit)?;
            let habit = tracker.relapse(&id, now)?;
            println_colored!(AMBER, "  ↺ '{}' streak restarted. Keep going.", habit.name);
        }
        HabitCommands::Remove { habit } => {
            let id = tracker.resolve(habit)?;
            let removed = tracker.delete(&id)?;
            println_colored!(RED, "  ✗ Stopped tracking '{}'", removed.name);
        }
    }
    Ok(())
}

// ─── Alarms ──────────────────────────────────────────────────────────────────

pub fn handle_alarm(storage: &Storage, action: &AlarmCommands) -> Result<()> {
    let mut clock = AlarmClock::load(storage);
    let now = Utc::now();

    match action {
        AlarmCommands::List => {
            println!();
            if clock.alarms().is_empty() {
                println_colored!(DIM, "  No alarms set.");
            }
            for alarm in clock.alarms() {
                let color = if alarm.enabled { BOLD } else { DIM };
                println_colored!(
                    color,
                    "  {}  {:<16} {:<20} {}",
                    alarm.time,
                    alarm.label,
                    alarm.days_label(),
                    if alarm.enabled { "on" } else { "off" }
                );
                println_colored!(DIM, "         id {}", alarm.id);
            }
            println!();
        }
        AlarmCommands::Add { time, label, days } => {
            let time = ClockTime::from_str(time)?;
            let days = parse_days(days)?;
            let alarm = clock.add(time, label, days, now);
            println_colored!(GREEN, "  ✓ '{}' at {} ({}) ({})", alarm.label, alarm.time, alarm.days_label(), alarm.id);
        }
        AlarmCommands::Toggle { id } => {
            let alarm = clock.toggle(id)?;
            let state = if alarm.enabled { "on" } else { "off" };
            println_colored!(AMBER, "  '{}' is now {}", alarm.label, state);
        }
        AlarmCommands::Day { id, weekday } => {
            let day = parse_weekday(weekday)?;
            let alarm = clock.toggle_day(id, day)?;
            println_colored!(AMBER, "  '{}' rings: {}", alarm.label, alarm.days_label());
        }
        AlarmCommands::Remove { id } => {
            let removed = clock.delete(id)?;
            println_colored!(RED, "  ✗ Deleted '{}'", removed.label);
        }
        AlarmCommands::Next => {
            let local_now = Local::now().naive_local();
            match clock.next_occurrence(local_now) {
                Some((alarm, at)) => {
                    let secs = (at - local_now).num_seconds();
                    println_colored!(
                        AMBER,
                        "  Next: '{}' {} at {} in {}",
                        alarm.label,
                        at.format("%a"),
                        format_time(at.time()),
                        format_duration_secs(secs)
                    );
                }
                None => println_colored!(DIM, "  No enabled alarms."),
            }
        }
    }
    Ok(())
}

// ─── Prayer times ────────────────────────────────────────────────────────────

pub fn handle_prayer(storage: &Storage, config: &AppConfig, action: &PrayerCommands) -> Result<()> {
    let mut timetable = PrayerTimetable::load(storage);
    let now_time = Local::now().time();

    match action {
        PrayerCommands::List => {
            let next_id = timetable.next_prayer(now_time).map(|p| p.id.clone());
            println!();
            println_colored!(
                GOLD,
                "  Prayer Times — {} ({})",
                config.salah.location_name,
                Local::now().format("%Y-%m-%d")
            );
            println!();
            for prayer in timetable.prayers() {
                let line = format!("  {:<10}  {}", prayer.name, prayer.time);
                if !prayer.enabled {
                    println_colored!(DIM, "{}  (off)", line);
                } else if next_id.as_deref() == Some(prayer.id.as_str()) {
                    println_colored!(AMBER, "{}  ← next", line);
                } else if prayer.time.time() < now_time {
                    println_colored!(DIM, "{}", line);
                } else {
                    println_colored!(BOLD, "{}", line);
                }
            }
            println!();
        }
        PrayerCommands::Set { prayer, time } => {
            let id = timetable.resolve(prayer)?;
            let time = ClockTime::from_str(time)?;
            let prayer = timetable.set_time(&id, time)?;
            println_colored!(GREEN, "  ✓ {} set to {}", prayer.name, prayer.time);
        }
        PrayerCommands::Toggle { prayer } => {
            let id = timetable.resolve(prayer)?;
            let prayer = timetable.toggle(&id)?;
            let state = if prayer.enabled { "enabled" } else { "disabled" };
            println_colored!(AMBER, "  {} {}", prayer.name, state);
        }
        PrayerCommands::Next => match timetable.next_prayer(now_time) {
            Some(prayer) => {
                println_colored!(
                    AMBER,
                    "  Next: {} at {} in {}",
                    prayer.name,
                    prayer.time,
                    format_duration_secs(seconds_until(prayer.time, now_time))
                );
            }
            None => println_colored!(DIM, "  All prayers are disabled."),
        },
        PrayerCommands::Sync => {
            let calc = PrayerCalculator::from_config(&config.salah)?;
            let computed = calc.times_for_date(Local::now().date_naive())?;
            let changed = timetable.sync_from_location(&computed);
            println_colored!(
                GREEN,
                "  ✓ Synced from {} ({}): {} prayer times updated",
                config.salah.location_name,
                config.salah.calc_method,
                changed
            );
        }
        PrayerCommands::Reset => {
            timetable.reset_defaults();
            println_colored!(AMBER, "  ↺ Prayer times restored to defaults");
        }
    }
    Ok(())
}

// ─── Calculator ──────────────────────────────────────────────────────────────

pub fn handle_calc(expr: &[String]) -> Result<()> {
    let expr = expr.join(" ");
    let result = evaluate(&expr)?;
    println_colored!(BOLD, "  {}", result);
    Ok(())
}

// ─── Data ────────────────────────────────────────────────────────────────────

pub fn handle_data(storage: &Storage, action: &DataCommands) -> Result<()> {
    match action {
        DataCommands::Export { output } => {
            let json = serde_json::to_string_pretty(&storage.export_all()?)?;
            match output {
                Some(path) => {
                    std::fs::write(path, json).with_context(|| format!("Writing {:?}", path))?;
                    println_colored!(GREEN, "  ✓ Exported to {}", path.display());
                }
                None => println!("{}", json),
            }
        }
        DataCommands::Import { file } => {
            let content =
                std::fs::read_to_string(file).with_context(|| format!("Reading {:?}", file))?;
            let map: Map<String, Value> =
                serde_json::from_str(&content).context("Import file must be a JSON object")?;
            let imported = storage.import_all(&map)?;
            println_colored!(GREEN, "  ✓ Imported {} collections", imported);
        }
        DataCommands::Clear { yes } => {
            if !yes {
                println_colored!(AMBER, "  This deletes every stored record. Re-run with --yes to confirm.");
                return Ok(());
            }
            let cleared = storage.clear_all()?;
            println_colored!(RED, "  ✗ Cleared {} stored collections", cleared);
        }
    }
    Ok(())
}

// ─── Config ──────────────────────────────────────────────────────────────────

pub fn handle_config(config: &AppConfig, action: &ConfigCommands) -> Result<()> {
    match action {
        ConfigCommands::Show => {
            print!("{}", config.to_toml()?);
            println_colored!(DIM, "# database: {}", config.db_path()?.display());
        }
        ConfigCommands::Path => {
            println!("{}", AppConfig::config_path()?.display());
        }
        ConfigCommands::Init => {
            let path = AppConfig::config_path()?;
            if path.exists() {
                println_colored!(AMBER, "  Config already exists at {}", path.display());
            } else {
                config.save()?;
                println_colored!(GREEN, "  ✓ Wrote {}", path.display());
            }
        }
    }
    Ok(())
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// Interpret a wall-clock time in the local zone. Ambiguous times (DST fall
/// back) take the earlier instant.
fn local_to_utc(ndt: NaiveDateTime) -> Result<DateTime<Utc>> {
    Local
        .from_local_datetime(&ndt)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| anyhow!("{} does not exist in the local timezone", ndt))
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{MemoryStore, StorageKey};
    use crate::features::FeatureError;

    fn words(expr: &str) -> Vec<String> {
        expr.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn calc_fails_on_unknown_operator() {
        assert!(handle_calc(&words("6 * 7")).is_ok());
        let err = handle_calc(&words("2 ^ 3")).unwrap_err();
        assert_eq!(
            err.downcast_ref::<FeatureError>(),
            Some(&FeatureError::InvalidExpression("^".into()))
        );
    }

    #[test]
    fn clear_needs_confirmation() {
        let storage = Storage::new(MemoryStore::new());
        storage.save(StorageKey::Notes, &Vec::<String>::new());

        handle_data(&storage, &DataCommands::Clear { yes: false }).unwrap();
        assert_eq!(storage.stored_keys().unwrap().len(), 1);

        handle_data(&storage, &DataCommands::Clear { yes: true }).unwrap();
        assert!(storage.stored_keys().unwrap().is_empty());
    }
}
