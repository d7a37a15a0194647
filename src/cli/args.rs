use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "trifecta", version, author, about = "Clocks, prayer times, tasbeeh, notes, tasks, calendar, finance and habits in your terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the current time, date and Hijri date
    Clock {
        /// Spell the time out in words
        #[arg(long)]
        words: bool,
        /// Use a 24-hour clock regardless of config
        #[arg(long = "24h")]
        hour24: bool,
    },
    /// Stopwatch that keeps running between invocations
    Stopwatch {
        #[command(subcommand)]
        action: StopwatchCommands,
    },
    /// Tasbeeh counters with a daily goal
    Tasbeeh {
        #[command(subcommand)]
        action: TasbeehCommands,
    },
    /// Notes
    Note {
        #[command(subcommand)]
        action: NoteCommands,
    },
    /// To-do list
    Todo {
        #[command(subcommand)]
        action: TodoCommands,
    },
    /// Calendar events
    Calendar {
        #[command(subcommand)]
        action: CalendarCommands,
    },
    /// Income and expense tracking
    Finance {
        #[command(subcommand)]
        action: FinanceCommands,
    },
    /// Habit streaks
    Habit {
        #[command(subcommand)]
        action: HabitCommands,
    },
    /// Alarms
    Alarm {
        #[command(subcommand)]
        action: AlarmCommands,
    },
    /// Prayer times
    Prayer {
        #[command(subcommand)]
        action: PrayerCommands,
    },
    /// Evaluate a calculator expression, e.g. `trifecta calc 12 x 4 + 2`
    Calc {
        /// Expression tokens
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        expr: Vec<String>,
    },
    /// Export, import or clear all stored data
    Data {
        #[command(subcommand)]
        action: DataCommands,
    },
    /// Inspect the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum StopwatchCommands {
    /// Show elapsed time
    Status,
    /// Start or resume
    Start,
    /// Pause
    Pause,
    /// Stop and clear
    Reset,
}

#[derive(Subcommand, Debug)]
pub enum TasbeehCommands {
    /// List counters and today's progress
    List,
    /// Create a counter
    Add {
        /// Counter name, e.g. SubhanAllah
        name: String,
        /// Daily goal (defaults to the configured goal)
        #[arg(long)]
        goal: Option<u32>,
    },
    /// Count one or more
    Count {
        /// Counter id or name
        event: String,
        #[arg(long, default_value = "1")]
        times: u32,
    },
    /// Undo the last count
    Undo {
        /// Counter id or name
        event: String,
    },
    /// Reset today's count (total is kept)
    Reset {
        /// Counter id or name
        event: String,
    },
    /// Delete a counter
    Remove {
        /// Counter id or name
        event: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum NoteCommands {
    /// List notes, newest first
    List {
        /// Only notes whose title or content contains this text
        #[arg(long, short)]
        search: Option<String>,
    },
    /// Show one note in full
    Show { id: String },
    /// Create a note
    Add {
        title: String,
        #[arg(long, short, default_value = "")]
        content: String,
    },
    /// Edit a note's title and/or content
    Edit {
        id: String,
        #[arg(long, short)]
        title: Option<String>,
        #[arg(long, short)]
        content: Option<String>,
    },
    /// Delete a note
    Remove { id: String },
}

#[derive(Subcommand, Debug)]
pub enum TodoCommands {
    /// List tasks
    List {
        /// Only tasks not yet done
        #[arg(long, conflicts_with = "done")]
        pending: bool,
        /// Only completed tasks
        #[arg(long)]
        done: bool,
    },
    /// Add a task
    Add {
        title: String,
        #[arg(long, short)]
        description: Option<String>,
        /// Due date, YYYY-MM-DD
        #[arg(long)]
        due: Option<String>,
        /// Reminder, "YYYY-MM-DD HH:MM"
        #[arg(long)]
        remind: Option<String>,
    },
    /// Mark done / not done
    Toggle { id: String },
    /// Delete a task
    Remove { id: String },
}

#[derive(Subcommand, Debug)]
pub enum CalendarCommands {
    /// Print a month grid (defaults to the current month)
    Month {
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        month: Option<u32>,
        /// Months to move forward, or back when negative
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        offset: i32,
    },
    /// Add an event
    Add {
        /// Date, YYYY-MM-DD
        date: String,
        title: String,
        #[arg(long, short)]
        description: Option<String>,
    },
    /// Events on a date
    On {
        /// Date, YYYY-MM-DD
        date: String,
    },
    /// Most recently added events
    Recent,
    /// Delete an event
    Remove { id: String },
}

#[derive(Subcommand, Debug)]
pub enum FinanceCommands {
    /// List entries, newest first
    List,
    /// Record income or an expense
    Add {
        /// income or expense
        kind: String,
        amount: f64,
        category: String,
        #[arg(long, short, default_value = "")]
        description: String,
        /// Date, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Delete an entry
    Remove { id: String },
    /// Totals, balance and per-category breakdown
    Summary,
}

#[derive(Subcommand, Debug)]
pub enum HabitCommands {
    /// List habits with their current streak
    List,
    /// Start tracking a habit
    Add {
        name: String,
        #[arg(long, short)]
        description: Option<String>,
        /// Start date, YYYY-MM-DD (defaults to now)
        #[arg(long)]
        since: Option<String>,
    },
    /// Record a relapse now
    Relapse {
        /// Habit id or name
        habit: String,
    },
    /// Stop tracking a habit
    Remove {
        /// Habit id or name
        habit: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum AlarmCommands {
    /// List alarms
    List,
    /// Add an alarm
    Add {
        /// Time, HH:MM
        time: String,
        #[arg(long, short, default_value = "")]
        label: String,
        /// daily, weekdays, weekends, or e.g. mon,wed,fri
        #[arg(long, default_value = "daily")]
        days: String,
    },
    /// Enable / disable
    Toggle { id: String },
    /// Flip one weekday in the repeat mask
    Day {
        id: String,
        /// e.g. mon, tuesday
        weekday: String,
    },
    /// Delete an alarm
    Remove { id: String },
    /// When the next alarm rings
    Next,
}

#[derive(Subcommand, Debug)]
pub enum PrayerCommands {
    /// Show today's prayer times
    List,
    /// Set a prayer time manually
    Set {
        /// Prayer name or id
        prayer: String,
        /// Time, HH:MM
        time: String,
    },
    /// Enable / disable a prayer
    Toggle {
        /// Prayer name or id
        prayer: String,
    },
    /// Countdown to the next prayer
    Next,
    /// Calculate today's times from the configured location
    Sync,
    /// Restore the five default times
    Reset,
}

#[derive(Subcommand, Debug)]
pub enum DataCommands {
    /// Write every collection as one JSON object
    Export {
        /// File to write (stdout when omitted)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Load collections from an exported JSON file
    Import { file: PathBuf },
    /// Delete all stored data
    Clear {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,
    /// Print the config file location
    Path,
    /// Write the default configuration file if none exists
    Init,
}
