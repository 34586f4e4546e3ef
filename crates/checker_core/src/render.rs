use std::fmt::Write;

use crate::{Outcome, OutcomeKind, Report, GENRE_MARKER};

const BANNER_WIDTH: usize = 60;
const RULE_WIDTH: usize = 40;

/// Render the human-readable validation report.
///
/// `generated_at` is printed verbatim; callers pass local time formatted as
/// `YYYY-MM-DD HH:MM:SS`.
pub fn render_report(report: &Report, generated_at: &str) -> String {
    let summary = report.summary();
    let banner = "=".repeat(BANNER_WIDTH);
    let mut out = String::new();

    let _ = writeln!(out, "{banner}");
    let _ = writeln!(out, "Playlist Validation Report");
    let _ = writeln!(out, "{banner}");
    let _ = writeln!(out, "Generated: {generated_at}");
    let _ = writeln!(out, "Total channels: {}", summary.total);
    for (label, kind) in [
        ("Reachable", OutcomeKind::Reachable),
        ("Suspicious", OutcomeKind::Suspicious),
        ("Unreachable", OutcomeKind::Unreachable),
    ] {
        let _ = writeln!(
            out,
            "{label}: {} ({:.1}%)",
            summary.count(kind),
            summary.percent(kind)
        );
    }

    if !report.unreachable().is_empty() {
        section_header(&mut out, "❌ Unreachable channels:");
        for outcome in report.unreachable() {
            problem_item(&mut out, outcome, "Cause");
        }
    }

    if !report.suspicious().is_empty() {
        section_header(&mut out, "⚠️  Suspicious channels:");
        for outcome in report.suspicious() {
            problem_item(&mut out, outcome, "Warning");
        }
    }

    if !report.reachable().is_empty() {
        section_header(&mut out, "✅ Reachable channels:");
        for outcome in report.reachable() {
            let entry = &outcome.entry;
            let _ = writeln!(
                out,
                "• {} ({}) - {:.2}s",
                entry.name,
                entry.genre,
                outcome.elapsed_seconds().unwrap_or_default()
            );
            let _ = writeln!(out, "  URL: {}", entry.url);
            let _ = writeln!(out, "  Line: {}", entry.line_number);
        }
    }

    out
}

fn section_header(out: &mut String, title: &str) {
    let _ = writeln!(out);
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
}

fn problem_item(out: &mut String, outcome: &Outcome, label: &str) {
    let entry = &outcome.entry;
    let _ = writeln!(out, "• {} ({})", entry.name, entry.genre);
    let _ = writeln!(out, "  URL: {}", entry.url);
    let _ = writeln!(
        out,
        "  {label}: {}",
        outcome.detail().unwrap_or_else(|| "unknown".to_string())
    );
    let _ = writeln!(out, "  Line: {}", entry.line_number);
}

/// Render a playlist holding only reachable entries.
///
/// Entries are grouped by genre in the order genres first appear among the
/// reachable entries (by source line). Each group is a genre marker followed
/// by its `name,url` lines; groups are separated by a blank line. Returns an
/// empty string when nothing is reachable.
pub fn render_clean_playlist(report: &Report) -> String {
    let mut groups: Vec<(&str, Vec<&Outcome>)> = Vec::new();
    for outcome in report.reachable() {
        let genre = outcome.entry.genre.as_str();
        match groups.iter_mut().find(|(name, _)| *name == genre) {
            Some((_, members)) => members.push(outcome),
            None => groups.push((genre, vec![outcome])),
        }
    }

    let mut out = String::new();
    for (index, (genre, members)) in groups.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "{genre}{GENRE_MARKER}");
        for outcome in members {
            let _ = writeln!(out, "{},{}", outcome.entry.name, outcome.entry.url);
        }
    }
    out
}
