use chrono::{DateTime, Utc};
use log::debug;

use crate::models::status::{Lifecycle, PositionState};

use super::accrual::MS_PER_DAY;

/// Classify a position spanning `start..end` at instant `now`.
///
/// Pure and deterministic. Progress never decreases as `now` advances.
/// A malformed range (`end <= start`) is reported as already matured with
/// full progress instead of dividing by a non-positive duration.
#[must_use]
pub fn classify(start: DateTime<Utc>, end: DateTime<Utc>, now: DateTime<Utc>) -> Lifecycle {
    let start_ms = start.timestamp_millis();
    let end_ms = end.timestamp_millis();
    let now_ms = now.timestamp_millis();

    let days_elapsed = ((now_ms - start_ms) as f64 / MS_PER_DAY).floor() as i64;

    if end_ms <= start_ms {
        debug!("classify: malformed range {start} .. {end}, treating as matured");
        return Lifecycle {
            state: PositionState::Matured,
            progress: 100.0,
            days_elapsed,
            days_remaining: 0,
        };
    }

    if now_ms >= end_ms {
        return Lifecycle {
            state: PositionState::Matured,
            progress: 100.0,
            days_elapsed,
            days_remaining: 0,
        };
    }

    let progress = ((now_ms - start_ms) as f64 / (end_ms - start_ms) as f64 * 100.0).clamp(0.0, 100.0);
    let days_remaining = ((end_ms - now_ms) as f64 / MS_PER_DAY).ceil() as i64;

    Lifecycle {
        state: PositionState::Active,
        progress,
        days_elapsed,
        days_remaining,
    }
}

