use chrono_humanize::HumanTime;
use time::OffsetDateTime;

///
/// Human readable distance between `created_at` and `now`, e.g. "3 hours ago".
///
/// Timestamps from the future (clock skew) are treated as if they were created now.
///
pub fn format_time_ago(created_at: OffsetDateTime, now: OffsetDateTime) -> String {
    let seconds = (now - created_at).whole_seconds().max(0);
    let elapsed = chrono::Duration::try_seconds(-seconds).unwrap_or(chrono::Duration::MIN);

    HumanTime::from(elapsed).to_string()
}
