use super::entities::{HistogramReport, StatsReport};
use colored::{ColoredString, Colorize};
use std::fmt::Write as _;

/// Format the stats report as plain text.
pub fn format_stats_text(report: &StatsReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Total: {}", report.total);
    let _ = writeln!(out, "By status:");
    for (code, count) in &report.status {
        let _ = writeln!(out, "  {}: {}", colorize_status(*code), count);
    }
    let _ = writeln!(out, "Avg RT (ms): {}", format_ms(report.rt_avg_ms));
    let _ = writeln!(out, "P95 RT (ms): {}", format_ms(report.rt_p95_ms));
    let _ = writeln!(out, "P99 RT (ms): {}", format_ms(report.rt_p99_ms));
    let _ = writeln!(out, "Top paths:");

    let width = report
        .top_paths
        .iter()
        .map(|(_, count)| count.to_string().len())
        .max()
        .unwrap_or(0);
    for (path, count) in &report.top_paths {
        let _ = writeln!(out, "{count:>width$}  {path}");
    }

    out
}

/// Format the stats report as pretty-printed JSON.
pub fn format_stats_json(report: &StatsReport) -> String {
    serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
}

/// Format the histogram report as plain text.
pub fn format_histogram_text(report: &HistogramReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Bucket: {} ms", report.bucket_ms());
    let _ = writeln!(out, "Total considered: {}", report.total_considered);
    if report.missing > 0 {
        let _ = writeln!(out, "Missing rt: {}", report.missing);
    }
    let _ = writeln!(out, "Histogram:");
    for (left, right, count) in report.histogram.buckets() {
        let _ = writeln!(out, "{left}-{right}: {count}");
    }

    out
}

/// Format the histogram report as pretty-printed JSON.
pub fn format_histogram_json(report: &HistogramReport) -> String {
    serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
}

fn format_ms(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => "n/a".to_string(),
    }
}

fn colorize_status(code: u16) -> ColoredString {
    let label = code.to_string();
    let label = label.as_str();
    match code / 100 {
        2 => label.green(),
        3 => label.cyan(),
        4 => label.yellow(),
        5 => label.red(),
        _ => label.normal(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::histogram;
    use std::collections::BTreeMap;

    fn sample_report() -> StatsReport {
        StatsReport {
            total: 12,
            status: BTreeMap::from([(200, 11), (404, 1)]),
            rt_avg_ms: Some(12.3456),
            rt_p95_ms: None,
            rt_p99_ms: None,
            top_paths: vec![("/a".to_string(), 10), ("/b".to_string(), 2)],
        }
    }

    #[test]
    fn test_stats_text_aligns_counts() {
        colored::control::set_override(false);
        let text = format_stats_text(&sample_report());
        assert!(text.contains("Avg RT (ms): 12.35\n"));
        assert!(text.contains("P95 RT (ms): n/a\n"));
        assert!(text.contains("Top paths:\n10  /a\n 2  /b\n"));
        colored::control::unset_override();
    }

    #[test]
    fn test_stats_json_rounds_latency() {
        let json: serde_json::Value =
            serde_json::from_str(&format_stats_json(&sample_report())).unwrap();
        assert_eq!(json["rt_avg_ms"], serde_json::json!(12.35));
        assert_eq!(json["rt_p95_ms"], serde_json::Value::Null);
        assert_eq!(json["status"]["404"], serde_json::json!(1));
        assert_eq!(json["top_paths"][0], serde_json::json!(["/a", 10]));
    }

    #[test]
    fn test_histogram_json_keeps_bucket_order() {
        let report = HistogramReport {
            histogram: histogram(&[50.0, 1050.0, 250.0], 100),
            total_considered: 3,
            missing: 0,
        };
        let json = format_histogram_json(&report);
        let first = json.find("\"0-100\"").unwrap();
        let second = json.find("\"200-300\"").unwrap();
        let third = json.find("\"1000-1100\"").unwrap();
        assert!(first < second && second < third, "unexpected order:\n{json}");
    }

    #[test]
    fn test_histogram_text_reports_missing() {
        let report = HistogramReport {
            histogram: histogram(&[150.0], 100),
            total_considered: 2,
            missing: 1,
        };
        assert_eq!(
            format_histogram_text(&report),
            "Bucket: 100 ms\nTotal considered: 2\nMissing rt: 1\nHistogram:\n100-200: 1\n"
        );
    }
}
