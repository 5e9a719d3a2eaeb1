//! Indian equity market session status.
//!
//! Status is a pure function of the instant: it is converted to IST
//! (fixed UTC+05:30, India has no daylight saving), encoded as `HHMM`, and
//! matched against the session windows below in priority order.

use chrono::{DateTime, Datelike, FixedOffset, Offset, Timelike, Utc, Weekday};

use crate::models::MarketStatus;

/// IST offset from UTC in seconds.
pub const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// Regular session, inclusive.
const OPEN_WINDOW: (u32, u32) = (915, 1530);
/// Pre-open call auction, inclusive.
const PRE_OPEN_WINDOW: (u32, u32) = (900, 914);
/// Post-close session, inclusive.
const AFTER_HOURS_WINDOW: (u32, u32) = (1531, 1800);

pub fn ist() -> FixedOffset {
    FixedOffset::east_opt(IST_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

/// Market status at `instant`.
///
/// Weekends in IST are always `Closed`.
pub fn market_status_at(instant: DateTime<Utc>) -> MarketStatus {
    let local = instant.with_timezone(&ist());

    if matches!(local.weekday(), Weekday::Sat | Weekday::Sun) {
        return MarketStatus::Closed;
    }

    status_for_hhmm(local.hour() * 100 + local.minute())
}

/// Maps an `HHMM` time of day to a status.
pub fn status_for_hhmm(hhmm: u32) -> MarketStatus {
    let within = |(start, end): (u32, u32)| hhmm >= start && hhmm <= end;

    if within(OPEN_WINDOW) {
        MarketStatus::Open
    } else if within(PRE_OPEN_WINDOW) {
        MarketStatus::PreOpen
    } else if within(AFTER_HOURS_WINDOW) {
        MarketStatus::AfterHours
    } else {
        MarketStatus::Closed
    }
}
