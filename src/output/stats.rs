//! Statistics reporting.

use std::path::Path;

use console::style;

use crate::scrape::{CollectionOutcome, CollectionResult, ScrapeReport};

const COMPLETE: &str = "✓";
const PARTIAL: &str = "~";
const EMPTY: &str = "✗";

/// Width the collection name is padded or cut to.
const NAME_WIDTH: usize = 30;

/// One progress line per collection:
/// `[  3/12] ✓ Faves                          expected=  2 actual=  2`
pub fn format_collection_line(index: usize, total: usize, result: &CollectionResult) -> String {
    let icon = match result.outcome() {
        CollectionOutcome::Complete => style(COMPLETE).green(),
        CollectionOutcome::Partial => style(PARTIAL).yellow(),
        CollectionOutcome::Empty => style(EMPTY).red(),
    };
    let name: String = result.name.chars().take(NAME_WIDTH).collect();

    format!(
        "  [{:3}/{}] {} {:<width$} expected={:3} actual={:3}",
        index + 1,
        total,
        icon,
        name,
        result.expected,
        result.actual(),
        width = NAME_WIDTH
    )
}

/// Print the end-of-run summary.
pub fn print_summary(report: &ScrapeReport, destination: Option<&Path>) {
    let (complete, partial, empty) = report.outcome_counts();

    eprintln!();
    let done = format!(
        "Done: {} collections, {} videos, {}s",
        report.total_collections(),
        report.total_videos(),
        report.elapsed_seconds
    );
    match destination {
        Some(path) => eprintln!(
            "{} {} → {}",
            style(COMPLETE).green(),
            style(done).bold(),
            path.display()
        ),
        None => eprintln!("{} {}", style(COMPLETE).green(), style(done).bold()),
    }

    if partial + empty > 0 {
        eprintln!(
            "  {} complete, {} partial, {} empty",
            style(complete).green(),
            style(partial).yellow(),
            style(empty).red()
        );
    }
}
