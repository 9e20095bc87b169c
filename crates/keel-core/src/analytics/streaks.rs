//! Activity streak and badge tracking
//!
//! The tracker itself holds nothing: the caller passes in the persisted
//! [`StreakState`] and stores back [`StreakInfo::state`]. Badges are awarded
//! on threshold crossings only - the evaluation where the streak first
//! reaches 7/30/60 days - so re-running with unchanged activity never
//! re-awards anything.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::models::BadgeName;

use super::types::{Badge, StreakInfo, StreakState};

/// Fold one activity date into the streak state.
///
/// - one day after `last_activity`: the streak extends
/// - equal to `last_activity`: same-day re-entry, nothing changes
/// - anything else (first activity, a gap, an out-of-order date): the
///   streak resets to 1
///
/// `recorded_at` stamps any badges earned by this evaluation; the engine
/// never reads the clock itself.
pub fn record_activity(
    state: &StreakState,
    activity: NaiveDate,
    recorded_at: DateTime<Utc>,
) -> StreakInfo {
    let current = match state.last_activity {
        Some(last) if activity == last => state.current,
        Some(last) if activity - last == Duration::days(1) => state.current + 1,
        _ => 1,
    };
    let longest = state.longest.max(current);

    let new_badges = BadgeName::ALL
        .iter()
        .filter(|badge| state.current < badge.threshold() && current >= badge.threshold())
        .map(|&name| Badge {
            name,
            awarded_on: recorded_at,
        })
        .collect();

    StreakInfo {
        current,
        longest,
        last_activity: Some(activity),
        new_badges,
    }
}
