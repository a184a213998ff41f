use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const SHOW_HOURS_UNTIL: i64 = 2 * DAY;
const SHOW_DAYS_UNTIL: i64 = 14 * DAY;

/// Age of `ts` relative to `now`: minutes, hours up to two days, days up to two weeks.
///
/// Older or future timestamps print as a `YYYY-MM-DD` date; anything unparseable as given.
pub(super) fn fmt_updated(ts: &str, now: OffsetDateTime) -> String {
    let Ok(then) = OffsetDateTime::parse(ts, &Rfc3339) else {
        return ts.to_string();
    };
    match (now - then).whole_seconds() {
        0..MINUTE => "just now".to_string(),
        age @ MINUTE..HOUR => format!("{}m ago", age / MINUTE),
        age @ HOUR..SHOW_HOURS_UNTIL => format!("{}h ago", age / HOUR),
        age @ SHOW_HOURS_UNTIL..SHOW_DAYS_UNTIL => format!("{}d ago", age / DAY),
        _ => format!(
            "{}-{:02}-{:02}",
            then.year(),
            u8::from(then.month()),
            then.day()
        ),
    }
}

pub(super) fn now_ts() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "<time>".to_string())
}

#[cfg(test)]
#[path = "../tests/cli_exec/time_utils_tests.rs"]
mod tests;
