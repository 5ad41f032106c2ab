use access_log_analyzer::commands::write_filtered;
use access_log_analyzer::filter::{EntryFilter, build_status_predicate};
use access_log_analyzer::parser::parse_line;

#[test]
fn test_rt_in_path_does_not_shadow_trailing_request_time() {
    let line = r#"10.0.0.9 - - [10/Oct/2023:13:55:36 +0000] "GET /search?q= rt=5.000 HTTP/1.1" 200 10 rt=0.020"#;
    let entry = parse_line(line).expect("line should parse");
    assert_eq!(entry.path, "/search?q= rt=5.000");
    assert_eq!(entry.raw_request_time.as_deref(), Some("0.020"));
}

#[test]
fn test_rt_in_path_is_used_when_trailing_field_is_absent() {
    // The whole-line fallback picks up the first `rt=` it finds.
    let line = r#"10.0.0.9 - - [10/Oct/2023:13:55:36 +0000] "GET /search?q= rt=5.000 HTTP/1.1" 200 10"#;
    let entry = parse_line(line).expect("line should parse");
    assert_eq!(entry.raw_request_time.as_deref(), Some("5.000"));
    assert_eq!(entry.request_time_seconds, Some(5.0));
}

#[test]
fn test_normalized_output_preserves_raw_request_time_text() {
    let lines = [
        r#"10.0.0.1 - - [10/Oct/2023:13:55:36 +0000] "GET /a HTTP/1.1" 200 5 0.500"#,
        r#"10.0.0.1 - - [10/Oct/2023:13:55:37 +0530] "DELETE /b HTTP/1.0" 204 0"#,
    ];
    let entries: Vec<_> = lines.iter().filter_map(|line| parse_line(line)).collect();

    let mut buf = Vec::new();
    write_filtered(&entries, &EntryFilter::new(), &mut buf).expect("write to memory");

    assert_eq!(
        String::from_utf8(buf).expect("utf8 output"),
        concat!(
            "2023-10-10T13:55:36+00:00 10.0.0.1 GET /a 200 5 rt=0.500\n",
            "2023-10-10T13:55:37+05:30 10.0.0.1 DELETE /b 204 0\n",
        )
    );
}

#[test]
fn test_garbage_status_filter_behaves_like_no_filter() {
    let lines = [
        r#"10.0.0.1 - - [10/Oct/2023:13:55:36 +0000] "GET /a HTTP/1.1" 200 5"#,
        r#"10.0.0.1 - - [10/Oct/2023:13:55:37 +0000] "GET /b HTTP/1.1" 404 5"#,
    ];
    let entries: Vec<_> = lines.iter().filter_map(|line| parse_line(line)).collect();

    let lenient = EntryFilter::new().with_status(build_status_predicate(Some("oops,??")));
    let mut buf = Vec::new();
    let written = write_filtered(&entries, &lenient, &mut buf).expect("write to memory");
    assert_eq!(written, 2);
}
