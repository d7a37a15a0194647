use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicI64, Ordering};

static LAST_ID: AtomicI64 = AtomicI64::new(0);

/// Record id: Unix milliseconds as a decimal string, strictly increasing
/// within the process so two records created in the same millisecond
/// still get distinct ids.
pub fn next_id(now: DateTime<Utc>) -> String {
    let wanted = now.timestamp_millis();
    let prev = LAST_ID
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
            Some(wanted.max(last + 1))
        })
        .unwrap_or(wanted);
    wanted.max(prev + 1).to_string()
}

/// Raise the generator past an id loaded from storage, so ids issued later
/// never collide with records written by an earlier run.
pub fn observe(existing: &str) {
    if let Ok(n) = existing.parse::<i64>() {
        LAST_ID.fetch_max(n, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn ids_are_unique_within_the_same_millisecond() {
        let now = Utc.timestamp_millis_opt(1_900_000_000_000).unwrap();
        let a: i64 = next_id(now).parse().unwrap();
        let b: i64 = next_id(now).parse().unwrap();
        let c: i64 = next_id(now).parse().unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn observed_ids_are_never_reissued() {
        observe("4000000000000");
        let now = Utc.timestamp_millis_opt(1_000).unwrap();
        let id: i64 = next_id(now).parse().unwrap();
        assert!(id > 4_000_000_000_000);

        observe("not-a-number");
    }
}
