use access_log_analyzer::parser::{TimestampError, parse_boundary_timestamp, parse_log_timestamp};
use chrono::{TimeZone, Utc};

#[test]
fn test_boundary_offset_spellings_agree() {
    let expected = Utc.with_ymd_and_hms(2023, 10, 10, 11, 0, 0).unwrap();
    for raw in [
        "2023-10-10T13:00:00+02:00",
        "2023-10-10T13:00:00+0200",
        "2023-10-10T11:00:00Z",
        "2023-10-10T11:00:00+00:00",
        "2023-10-10T04:00:00-0700",
    ] {
        let parsed = parse_boundary_timestamp(raw).unwrap_or_else(|e| panic!("{raw}: {e}"));
        assert_eq!(parsed, expected, "boundary {raw}");
    }
}

#[test]
fn test_boundary_without_offset_is_utc() {
    let parsed = parse_boundary_timestamp("2023-10-10T13:55:36").unwrap();
    assert_eq!(parsed, Utc.with_ymd_and_hms(2023, 10, 10, 13, 55, 36).unwrap());
    assert_eq!(parsed.offset().local_minus_utc(), 0);
}

#[test]
fn test_boundary_date_only_is_utc_midnight() {
    let parsed = parse_boundary_timestamp("2023-10-10").unwrap();
    assert_eq!(parsed, Utc.with_ymd_and_hms(2023, 10, 10, 0, 0, 0).unwrap());
}

#[test]
fn test_boundary_rejects_unknown_shapes() {
    for raw in [
        "yesterday",
        "2023/10/10",
        "10/Oct/2023:13:55:36 -0700",
        "2023-10-10 13:55:36",
        "2023-13-01",
        "2023-10-10Z",
    ] {
        assert_eq!(
            parse_boundary_timestamp(raw),
            Err(TimestampError::InvalidBoundary(raw.to_string())),
            "expected {raw:?} to be rejected"
        );
    }
}

#[test]
fn test_log_and_boundary_timestamps_compare_as_instants() {
    let logged = parse_log_timestamp("10/Oct/2023:13:55:36 -0700").unwrap();
    let boundary = parse_boundary_timestamp("2023-10-10T20:55:36Z").unwrap();
    assert_eq!(logged, boundary);
    assert!(logged < parse_boundary_timestamp("2023-10-10T20:55:37Z").unwrap());
}
