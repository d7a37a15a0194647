pub mod alarm;
pub mod calculator;
pub mod calendar;
pub mod collection;
pub mod error;
pub mod finance;
pub mod habit;
pub mod notes;
pub mod prayer;
pub mod stopwatch;
pub mod tasbeeh;
pub mod todo;
pub mod word_clock;

pub use alarm::AlarmClock;
pub use calculator::Calculator;
pub use calendar::{CalendarBook, MonthGrid};
pub use error::FeatureError;
pub use finance::{FinanceLedger, FinanceSummary};
pub use habit::{HabitTracker, StreakDuration};
pub use notes::NotesBook;
pub use prayer::PrayerTimetable;
pub use stopwatch::Stopwatch;
pub use tasbeeh::TasbeehCounter;
pub use todo::TodoList;
