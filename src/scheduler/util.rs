use chrono::{DateTime, Duration, Utc};

/// Nombre d'intervalles complets contenus dans `elapsed` (`elapsed >= 0`).
pub(super) fn whole_intervals(elapsed: Duration, interval: Duration) -> i64 {
    match (elapsed.num_nanoseconds(), interval.num_nanoseconds()) {
        (Some(e), Some(i)) => e / i,
        // au-delà de ~292 ans en nanosecondes : précision milliseconde
        _ => elapsed.num_milliseconds() / interval.num_milliseconds().max(1),
    }
}

/// `interval * count` sans se limiter aux multiplicateurs `i32`, borné à `Duration::MAX`.
pub(super) fn scaled(interval: Duration, count: i64) -> Duration {
    let exact = i32::try_from(count)
        .ok()
        .and_then(|count| interval.checked_mul(count));
    exact
        .or_else(|| {
            interval
                .num_milliseconds()
                .checked_mul(count)
                .and_then(Duration::try_milliseconds)
        })
        .unwrap_or(Duration::MAX)
}

/// `at + delta`, saturé au dernier instant représentable.
pub(super) fn forward(at: DateTime<Utc>, delta: Duration) -> DateTime<Utc> {
    at.checked_add_signed(delta).unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Décale un index cyclique de `steps` positions sur `len` éléments.
pub(super) fn cycle(index: usize, steps: i64, len: usize) -> usize {
    let len_i = len as i64;
    ((index as i64 % len_i + steps % len_i) % len_i) as usize
}

pub(super) fn contains(start: DateTime<Utc>, end: DateTime<Utc>, at: DateTime<Utc>) -> bool {
    start <= at && at < end
}
