use std::sync::Once;
use std::time::Duration;

use checker_core::{
    parse_playlist, render_clean_playlist, render_report, Entry, Failure, Outcome, OutcomeKind,
    Report, ReportError, ResponseInfo, Verdict,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(checker_logging::initialize_for_tests);
}

fn entry(line_number: usize, name: &str, genre: &str) -> Entry {
    Entry {
        line_number,
        name: name.to_string(),
        url: format!("http://{}.test/live", name.to_lowercase()),
        genre: genre.to_string(),
    }
}

fn ok(status: u16, content_type: Option<&str>, millis: u64) -> ResponseInfo {
    ResponseInfo {
        status,
        content_type: content_type.map(str::to_string),
        elapsed: Duration::from_millis(millis),
    }
}

fn reachable(entry: Entry) -> Outcome {
    Outcome::new(entry, Verdict::Reachable(ok(200, Some("video/mp2t"), 120)))
}

fn suspicious(entry: Entry) -> Outcome {
    Outcome::new(entry, Verdict::Suspicious(ok(200, None, 80)))
}

fn unreachable(entry: Entry, failure: Failure) -> Outcome {
    Outcome::new(entry, Verdict::Unreachable(failure))
}

#[test]
fn partitions_are_sorted_by_line_regardless_of_completion_order() {
    init_logging();
    let outcomes = vec![
        reachable(entry(9, "Late", "")),
        unreachable(entry(5, "B", ""), Failure::Timeout),
        reachable(entry(1, "Early", "")),
        unreachable(entry(2, "A", ""), Failure::Timeout),
    ];
    let report = Report::build(4, outcomes).unwrap();

    let lines = |kind| {
        report
            .outcomes(kind)
            .iter()
            .map(|o| o.entry.line_number)
            .collect::<Vec<_>>()
    };
    assert_eq!(lines(OutcomeKind::Reachable), vec![1, 9]);
    assert_eq!(lines(OutcomeKind::Unreachable), vec![2, 5]);
    assert!(report.suspicious().is_empty());
}

#[test]
fn outcome_count_must_match_entry_count() {
    let err = Report::build(3, vec![reachable(entry(1, "A", ""))]).unwrap_err();
    assert_eq!(
        err,
        ReportError::CountMismatch {
            expected: 3,
            actual: 1
        }
    );
}

#[test]
fn each_line_may_have_only_one_outcome() {
    let outcomes = vec![
        reachable(entry(1, "A", "")),
        unreachable(entry(1, "A", ""), Failure::Timeout),
    ];
    let err = Report::build(2, outcomes).unwrap_err();
    assert_eq!(err, ReportError::DuplicateLine(1));
}

#[test]
fn percentages_sum_to_one_hundred() {
    let outcomes = vec![
        reachable(entry(1, "A", "")),
        suspicious(entry(2, "B", "")),
        unreachable(entry(3, "C", ""), Failure::Timeout),
    ];
    let summary = Report::build(3, outcomes).unwrap().summary();
    let total: f64 = [
        OutcomeKind::Reachable,
        OutcomeKind::Suspicious,
        OutcomeKind::Unreachable,
    ]
    .into_iter()
    .map(|kind| (summary.percent(kind) * 10.0).round() / 10.0)
    .sum();
    assert!((total - 100.0).abs() <= 0.1 + 1e-9, "sum was {total}");
}

#[test]
fn empty_report_has_zero_counts_and_percentages() {
    let report = Report::build(0, Vec::new()).unwrap();
    let summary = report.summary();
    assert_eq!(summary.total, 0);
    for kind in [
        OutcomeKind::Reachable,
        OutcomeKind::Suspicious,
        OutcomeKind::Unreachable,
    ] {
        assert_eq!(summary.count(kind), 0);
        assert_eq!(summary.percent(kind), 0.0);
    }

    let text = render_report(&report, "2026-10-16 09:30:00");
    assert!(text.contains("Total channels: 0"));
    assert!(text.contains("Reachable: 0 (0.0%)"));
    assert!(text.contains("Unreachable: 0 (0.0%)"));
    assert_eq!(render_clean_playlist(&report), "");
}

#[test]
fn two_channel_scenario_renders_expected_report() {
    init_logging();
    let good = Entry {
        line_number: 1,
        name: "Channel1".to_string(),
        url: "http://good.test/x".to_string(),
        genre: String::new(),
    };
    let bad = Entry {
        line_number: 2,
        name: "Channel2".to_string(),
        url: "http://bad.test/y".to_string(),
        genre: String::new(),
    };
    let outcomes = vec![
        unreachable(bad, Failure::HttpStatus(ok(404, None, 30))),
        reachable(good),
    ];
    let report = Report::build(2, outcomes).unwrap();

    let expected = "\
============================================================
Playlist Validation Report
============================================================
Generated: 2026-10-16 09:30:00
Total channels: 2
Reachable: 1 (50.0%)
Suspicious: 0 (0.0%)
Unreachable: 1 (50.0%)

❌ Unreachable channels:
----------------------------------------
• Channel2 ()
  URL: http://bad.test/y
  Cause: HTTP 404
  Line: 2

✅ Reachable channels:
----------------------------------------
• Channel1 () - 0.12s
  URL: http://good.test/x
  Line: 1
";
    assert_eq!(render_report(&report, "2026-10-16 09:30:00"), expected);
}

#[test]
fn suspicious_section_lists_warning() {
    let report = Report::build(1, vec![suspicious(entry(3, "Odd", "Misc"))]).unwrap();
    let text = render_report(&report, "2026-10-16 09:30:00");
    assert!(text.contains("⚠️  Suspicious channels:"));
    assert!(text.contains("• Odd (Misc)"));
    assert!(text.contains("  Warning: unexpected content-type"));
    assert!(text.contains("  Line: 3"));
}

#[test]
fn clean_playlist_groups_by_first_seen_genre() {
    let outcomes = vec![
        reachable(entry(7, "HBO", "Movies")),
        reachable(entry(2, "CNN", "News")),
        unreachable(entry(3, "Dead", "News"), Failure::Timeout),
        reachable(entry(5, "ESPN", "Sports")),
        reachable(entry(4, "BBC", "News")),
    ];
    let report = Report::build(5, outcomes).unwrap();

    let expected = "\
News,#genre#
CNN,http://cnn.test/live
BBC,http://bbc.test/live

Sports,#genre#
ESPN,http://espn.test/live

Movies,#genre#
HBO,http://hbo.test/live
";
    assert_eq!(render_clean_playlist(&report), expected);
}

#[test]
fn clean_playlist_reparses_to_reachable_entries() {
    init_logging();
    let source = "\
News,#genre#
CNN,http://cnn.test/live
Dead,http://dead.test/live
,#genre#
Orphan,https://orphan.test/a,b
Sports,#genre#
ESPN,http://espn.test/live
Odd,http://odd.test/live
";
    let entries = parse_playlist(source);
    let outcomes = entries
        .into_iter()
        .map(|entry| match entry.name.as_str() {
            "Dead" => unreachable(entry, Failure::Connection("refused".to_string())),
            "Odd" => suspicious(entry),
            _ => reachable(entry),
        })
        .collect::<Vec<_>>();
    let report = Report::build(outcomes.len(), outcomes).unwrap();

    let key = |e: &Entry| (e.name.clone(), e.url.clone(), e.genre.clone());
    let mut expected = report
        .reachable()
        .iter()
        .map(|o| key(&o.entry))
        .collect::<Vec<_>>();
    let mut reparsed = parse_playlist(&render_clean_playlist(&report))
        .iter()
        .map(key)
        .collect::<Vec<_>>();
    expected.sort();
    reparsed.sort();
    assert_eq!(reparsed, expected);
}
