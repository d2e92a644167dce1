// src/utils.rs
use std::io::{self, Write};
use std::path::Path;

use crate::core::audit::{PageReport, PageStatus};
use crate::models::FormattedResults;

pub fn is_hidden(entry: &walkdir::DirEntry) -> bool {
    entry.file_name().to_str().is_some_and(|s| {
        // Don't consider temp directories as hidden
        if s.starts_with(".tmp") {
            return false;
        }
        s.starts_with('.')
    })
}

/// Writes one `name: value` line per result.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn print_results(out: &mut impl Write, results: &FormattedResults) -> io::Result<()> {
    for (name, text) in results.iter() {
        writeln!(out, "{name}: {text}")?;
    }
    Ok(())
}

/// Writes one line per audited page, followed by any findings and a summary.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn print_reports(out: &mut impl Write, root: &Path, reports: &[PageReport]) -> io::Result<()> {
    let mut bound = 0_usize;

    for report in reports {
        let path = report.path.strip_prefix(root).unwrap_or(&report.path);
        match &report.status {
            PageStatus::Unreadable(err) => writeln!(out, "unreadable  {}: {err}", path.display())?,
            PageStatus::Unbound(err) => writeln!(out, "unbound     {}: {err}", path.display())?,
            PageStatus::Bound(summary) => {
                bound = bound.saturating_add(1);
                let label = if summary.is_clean() { "ok" } else { "warnings" };
                writeln!(
                    out,
                    "{label:<11} {} ({} results, {} coefficients)",
                    path.display(),
                    summary.result_elements,
                    summary.coefficient_elements
                )?;
                print_names(out, "unknown inputs", &summary.unknown_inputs)?;
                print_names(out, "unknown coefficients", &summary.unknown_coefficients)?;
                print_names(out, "unknown results", &summary.unknown_results)?;
                print_names(out, "missing coefficients", &summary.missing_coefficients)?;
                print_names(out, "unparsable coefficients", &summary.unparsable_coefficients)?;
                print_names(out, "results not shown", &summary.undisplayed_results)?;
            }
        }
    }

    writeln!(out, "Pages audited: {}", reports.len())?;
    writeln!(out, "Bound: {bound}")?;
    writeln!(out, "Unbound: {}", reports.len().saturating_sub(bound))?;
    Ok(())
}

fn print_names<T: ToString>(out: &mut impl Write, label: &str, names: &[T]) -> io::Result<()> {
    if names.is_empty() {
        return Ok(());
    }
    let joined: Vec<String> = names.iter().map(ToString::to_string).collect();
    writeln!(out, "            {label}: {}", joined.join(", "))
}
