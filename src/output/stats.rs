//! Search statistics display

use crate::search::SearchStats;
use std::fmt::Write;

/// Renders statistics in the same layout `print_statistics` uses
pub fn format_statistics(stats: &SearchStats) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "=== Search Statistics ===\n");
    let _ = writeln!(out, "  Pages fetched: {}", stats.pages_fetched);
    let _ = writeln!(out, "  Fetch failures: {}", stats.fetch_failures);
    let _ = writeln!(out, "  URLs claimed: {}", stats.urls_claimed);
    let _ = writeln!(out, "  Workers: {}", stats.workers);
    let _ = writeln!(out, "  Elapsed: {:.2}s", stats.elapsed.as_secs_f64());
    let _ = writeln!(out, "  Throughput: {:.1} pages/sec", stats.pages_per_second());

    let attempted = stats.pages_fetched + stats.fetch_failures;
    let success_rate = if attempted > 0 {
        (stats.pages_fetched as f64 / attempted as f64) * 100.0
    } else {
        0.0
    };
    let _ = writeln!(
        out,
        "\nSuccess Rate: {:.1}% ({} / {} fetches succeeded)",
        success_rate, stats.pages_fetched, attempted
    );

    out
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &SearchStats) {
    print!("{}", format_statistics(stats));
}
