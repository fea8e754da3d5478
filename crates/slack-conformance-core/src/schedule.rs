// crates/slack-conformance-core/src/schedule.rs
// ============================================================================
// Module: Schedule Times
// Description: `post_at` values for the schedule cases.
// Purpose: Compute future send times at run time instead of hardcoding them.
// Dependencies: time
// ============================================================================

//! ## Overview
//! The future case schedules `now + offset`, so the request stays valid no
//! matter when the suite runs. The past case uses a fixed 1999 epoch.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use time::OffsetDateTime;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Fixed `post_at` in the past (1999-07-22T21:40:17Z).
pub const PAST_POST_AT: i64 = 932_679_617;
/// Default distance between now and the scheduled send time.
pub const DEFAULT_SCHEDULE_OFFSET: Duration = Duration::from_secs(60 * 60);
/// Furthest the service accepts a scheduled message (120 days).
pub const MAX_SCHEDULE_OFFSET: Duration = Duration::from_secs(120 * 24 * 60 * 60);

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns `now + offset` as unix epoch seconds.
#[must_use]
pub fn future_post_at(now: OffsetDateTime, offset: Duration) -> i64 {
    let offset_secs = i64::try_from(offset.as_secs()).unwrap_or(i64::MAX);
    now.unix_timestamp().saturating_add(offset_secs)
}

/// Returns the current wall-clock time.
#[must_use]
pub fn now_utc() -> OffsetDateTime {
    OffsetDateTime::now_utc()
}
