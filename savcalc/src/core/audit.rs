// src/core/audit.rs
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use glob::Pattern;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::Markup;
use crate::core::binder::{BindError, Binder};
use crate::core::markup::{HtmlPage, Page};
use crate::core::reader::read_form;
use crate::models::{CoefficientName, InputName, ResultName};
use crate::utils::is_hidden;

/// What binding would find on one exported page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageStatus {
    Unreadable(String),
    Unbound(BindError),
    Bound(BoundSummary),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundSummary {
    pub result_elements: usize,
    pub coefficient_elements: usize,
    pub unknown_inputs: Vec<String>,
    pub unknown_coefficients: Vec<String>,
    pub unknown_results: Vec<String>,
    /// Coefficients with no element on the page; they count as zero.
    pub missing_coefficients: Vec<CoefficientName>,
    pub unparsable_coefficients: Vec<CoefficientName>,
    /// Results computed but shown nowhere on the page.
    pub undisplayed_results: Vec<ResultName>,
}

impl BoundSummary {
    /// Whether every declared name is known and every result is shown.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.unknown_inputs.is_empty()
            && self.unknown_coefficients.is_empty()
            && self.unknown_results.is_empty()
            && self.missing_coefficients.is_empty()
            && self.unparsable_coefficients.is_empty()
            && self.undisplayed_results.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageReport {
    pub path: PathBuf,
    pub status: PageStatus,
}

/// Checks a single page's markup.
#[must_use]
pub fn audit_page(page: &HtmlPage, markup: &Markup) -> PageStatus {
    let binder = Binder::bind(page, markup);
    let bound = match &binder {
        Binder::Unbound(err) => return PageStatus::Unbound(err.clone()),
        Binder::Bound(bound) => bound,
    };

    let inputs = read_form::<_, InputName>(page, *bound.form());
    let coefficients = bound.coefficient_scan();

    PageStatus::Bound(BoundSummary {
        result_elements: bound.result_elements(),
        coefficient_elements: page.query_all(&markup.coefficient_attribute).len(),
        unknown_inputs: inputs.unknown,
        unknown_coefficients: coefficients.unknown.clone(),
        unknown_results: bound.unknown_results().to_vec(),
        missing_coefficients: coefficients.missing(),
        unparsable_coefficients: coefficients.unparsable().map(|(name, _)| name).collect(),
        undisplayed_results: bound.undisplayed_results(),
    })
}

/// Audits every page under `dir` whose file name matches `include`.
///
/// Hidden files and directories are skipped. Pages that cannot be read are
/// reported rather than failing the audit.
///
/// # Errors
///
/// This function may return an error if:
/// * `include` is not a valid glob pattern
/// * The directory cannot be traversed
pub fn audit_directory(dir: &Path, include: &str, markup: &Markup) -> Result<Vec<PageReport>> {
    let pattern =
        Pattern::new(include).with_context(|| format!("Invalid page pattern: {include}"))?;
    let mut reports = Vec::new();

    for entry in WalkDir::new(dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e))
    {
        let entry = entry.with_context(|| format!("Failed to scan directory: {}", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(dir).unwrap_or(path);
        let file_name = entry.file_name().to_string_lossy();
        if !pattern.matches(&file_name) && !pattern.matches_path(relative) {
            continue;
        }

        let status = match fs::read_to_string(path) {
            Ok(source) => audit_page(&HtmlPage::parse(&source), markup),
            Err(err) => {
                warn!(path = %path.display(), %err, "page could not be read");
                PageStatus::Unreadable(err.to_string())
            }
        };
        debug!(path = %path.display(), ?status, "page audited");

        reports.push(PageReport {
            path: path.to_path_buf(),
            status,
        });
    }

    Ok(reports)
}
