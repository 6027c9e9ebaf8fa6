//! Output module for presenting search results
//!
//! This module handles:
//! - Rendering the discovered path, one hop per line
//! - Rendering search statistics

pub mod stats;

pub use stats::{format_statistics, print_statistics};

use crate::search::LinkPath;
use std::fmt::Write;

/// Renders a path with hop numbers
///
/// ```
/// # use link_racer::output::format_path;
/// # use link_racer::LinkPath;
/// # fn show(path: &LinkPath) {
/// print!("{}", format_path(path));
/// // Path (2 hops):
/// //   0. https://en.wikipedia.org/wiki/A
/// //   1. https://en.wikipedia.org/wiki/B
/// //   2. https://en.wikipedia.org/wiki/C
/// # }
/// ```
pub fn format_path(path: &LinkPath) -> String {
    let mut out = String::new();
    let noun = if path.hops() == 1 { "hop" } else { "hops" };
    let _ = writeln!(out, "Path ({} {}):", path.hops(), noun);

    let width = path.hops().to_string().len();
    for (hop, url) in path.urls().iter().enumerate() {
        let _ = writeln!(out, "  {:>width$}. {}", hop, url, width = width);
    }

    out
}

/// Prints the path to stdout
pub fn print_path(path: &LinkPath) {
    print!("{}", format_path(path));
}
