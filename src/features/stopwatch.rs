use crate::db::{Storage, StorageKey};
use crate::models::StopwatchState;

pub struct Stopwatch {
    storage: Storage,
    /// Elapsed milliseconds while paused.
    accumulated: i64,
    /// Epoch-millisecond origin while running: elapsed = now - origin.
    origin: Option<i64>,
}

impl Stopwatch {
    /// Restore from storage. A stopwatch that was running when last saved keeps
    /// running, with the time spent closed counted in.
    pub fn load(storage: &Storage) -> Self {
        let state: StopwatchState = storage.load(StorageKey::StopwatchState, StopwatchState::default());
        let (accumulated, origin) = match (state.is_running, state.start_time) {
            (true, Some(start)) => (0, Some(start.saturating_sub(state.time))),
            _ => (state.time.max(0), None),
        };
        Self {
            storage: storage.clone(),
            accumulated,
            origin,
        }
    }

    pub fn is_running(&self) -> bool {
        self.origin.is_some()
    }

    pub fn elapsed_ms(&self, now_ms: i64) -> i64 {
        match self.origin {
            Some(origin) => now_ms.saturating_sub(origin).max(0),
            None => self.accumulated,
        }
    }

    pub fn start(&mut self, now_ms: i64) {
        if self.origin.is_none() {
            self.origin = Some(now_ms.saturating_sub(self.accumulated));
            self.accumulated = 0;
            self.persist();
        }
    }

    pub fn pause(&mut self, now_ms: i64) {
        if let Some(origin) = self.origin.take() {
            self.accumulated = now_ms.saturating_sub(origin).max(0);
            self.persist();
        }
    }

    pub fn toggle(&mut self, now_ms: i64) {
        if self.is_running() {
            self.pause(now_ms);
        } else {
            self.start(now_ms);
        }
    }

    pub fn reset(&mut self) {
        self.accumulated = 0;
        self.origin = None;
        self.persist();
    }

    pub fn state(&self) -> StopwatchState {
        match self.origin {
            Some(origin) => StopwatchState {
                time: 0,
                is_running: true,
                start_time: Some(origin),
            },
            None => StopwatchState {
                time: self.accumulated,
                is_running: false,
                start_time: None,
            },
        }
    }

    fn persist(&self) {
        self.storage.save(StorageKey::StopwatchState, &self.state());
    }
}

/// `MM:SS.cc`; minutes keep counting past 59.
pub fn format_elapsed(ms: i64) -> String {
    let ms = ms.max(0);
    let total_secs = ms / 1000;
    format!(
        "{:02}:{:02}.{:02}",
        total_secs / 60,
        total_secs % 60,
        (ms % 1000) / 10
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    #[test]
    fn start_pause_resume_accumulates() {
        let storage = Storage::new(MemoryStore::new());
        let mut sw = Stopwatch::load(&storage);
        assert_eq!(sw.elapsed_ms(5_000), 0);

        sw.start(10_000);
        assert_eq!(sw.elapsed_ms(12_500), 2_500);
        sw.pause(13_000);
        assert_eq!(sw.elapsed_ms(99_000), 3_000);

        sw.start(20_000);
        assert_eq!(sw.elapsed_ms(21_000), 4_000);

        sw.reset();
        assert!(!sw.is_running());
        assert_eq!(sw.elapsed_ms(30_000), 0);
    }

    #[test]
    fn running_stopwatch_survives_reload() {
        let storage = Storage::new(MemoryStore::new());
        let mut sw = Stopwatch::load(&storage);
        sw.start(1_000);
        sw.pause(4_000);
        sw.start(10_000);

        let persisted: StopwatchState = storage.load(StorageKey::StopwatchState, StopwatchState::default());
        assert_eq!(persisted, StopwatchState { time: 0, is_running: true, start_time: Some(7_000) });

        let restored = Stopwatch::load(&storage);
        assert!(restored.is_running());
        assert_eq!(restored.elapsed_ms(60_000), 53_000);
    }

    #[test]
    fn paused_stopwatch_survives_reload() {
        let storage = Storage::new(MemoryStore::new());
        let mut sw = Stopwatch::load(&storage);
        sw.toggle(0);
        sw.toggle(61_230);

        let restored = Stopwatch::load(&storage);
        assert!(!restored.is_running());
        assert_eq!(format_elapsed(restored.elapsed_ms(1_000_000)), "01:01.23");
    }

    #[test]
    fn extreme_stored_values_do_not_overflow() {
        let storage = Storage::new(MemoryStore::new());
        storage.save(
            StorageKey::StopwatchState,
            &StopwatchState { time: i64::MAX, is_running: true, start_time: Some(i64::MIN) },
        );
        let mut sw = Stopwatch::load(&storage);
        assert!(sw.is_running());
        assert_eq!(sw.elapsed_ms(i64::MAX), i64::MAX);
        sw.pause(i64::MAX);
        assert_eq!(sw.elapsed_ms(0), i64::MAX);

        storage.save(
            StorageKey::StopwatchState,
            &StopwatchState { time: i64::MAX, is_running: false, start_time: None },
        );
        let mut sw = Stopwatch::load(&storage);
        sw.start(i64::MIN);
        assert_eq!(sw.elapsed_ms(i64::MIN), 0);
    }

    #[test]
    fn formats_minutes_seconds_centis() {
        assert_eq!(format_elapsed(0), "00:00.00");
        assert_eq!(format_elapsed(59_999), "00:59.99");
        assert_eq!(format_elapsed(6_000_000), "100:00.00");
    }
}
