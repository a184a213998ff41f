use super::*;

fn at(ts: &str) -> OffsetDateTime {
    OffsetDateTime::parse(ts, &Rfc3339).expect("valid timestamp")
}

#[test]
fn recent_timestamps_are_relative() {
    let now = at("2024-03-10T12:00:00Z");
    assert_eq!(fmt_updated("2024-03-10T11:59:30Z", now), "just now");
    assert_eq!(fmt_updated("2024-03-10T11:15:00Z", now), "45m ago");
    assert_eq!(fmt_updated("2024-03-09T00:00:00Z", now), "36h ago");
    assert_eq!(fmt_updated("2024-03-01T12:00:00Z", now), "9d ago");
}

#[test]
fn old_future_and_unparseable_timestamps() {
    let now = at("2024-03-10T12:00:00Z");
    assert_eq!(fmt_updated("2023-12-25T08:00:00Z", now), "2023-12-25");
    assert_eq!(fmt_updated("2024-04-01T00:00:00Z", now), "2024-04-01");
    assert_eq!(fmt_updated("yesterday", now), "yesterday");
}

#[test]
fn now_ts_is_rfc3339() {
    assert!(OffsetDateTime::parse(&now_ts(), &Rfc3339).is_ok());
}
