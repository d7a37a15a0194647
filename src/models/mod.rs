pub mod alarm;
pub mod calendar;
pub mod clock_time;
pub mod finance;
pub mod habit;
pub mod id;
pub mod note;
pub mod prayer;
pub mod stopwatch;
pub mod task;
pub mod tasbeeh;

pub use alarm::Alarm;
pub use calendar::CalendarEvent;
pub use clock_time::ClockTime;
pub use finance::{EntryKind, FinanceEntry};
pub use habit::Habit;
pub use note::Note;
pub use prayer::{PrayerTime, default_prayer_times};
pub use stopwatch::StopwatchState;
pub use task::Task;
pub use tasbeeh::TasbeehEvent;

/// A persisted value object with a string identifier.
pub trait Record {
    fn id(&self) -> &str;
}

macro_rules! impl_record {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Record for $ty {
                fn id(&self) -> &str {
                    &self.id
                }
            }
        )*
    };
}

impl_record!(Alarm, CalendarEvent, FinanceEntry, Habit, Note, PrayerTime, Task, TasbeehEvent);
