// src/cli.rs
use anyhow::{Context as _, Result};
use clap::Parser;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::{Config, load_config};
use crate::core::audit::audit_directory;
use crate::core::binder::{Binder, Update};
use crate::core::markup::{HtmlPage, NodeId, Page};
use crate::models::Edit;
use crate::scenario::load_scenario;
use crate::utils::{print_reports, print_results};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Page to bind the calculator to
    #[arg(short, long, default_value = "index.html")]
    pub page: PathBuf,

    /// Type a value into a form field (NAME=VALUE, repeatable)
    #[arg(short, long = "input", value_name = "NAME=VALUE")]
    pub inputs: Vec<Edit>,

    /// YAML file of field values, applied before any --input
    #[arg(short, long)]
    pub scenario: Option<PathBuf>,

    /// Write the updated page to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Read NAME=VALUE edits from stdin, one per line
    #[arg(long)]
    pub interactive: bool,

    /// Audit every page under this directory instead of binding one page
    #[arg(short, long)]
    pub audit: Option<PathBuf>,

    /// Pages to include in audit mode
    #[arg(long, default_value = "*.html")]
    pub include: String,

    /// Config file (defaults to the nearest .savcalc.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Runs the calculator against stdin and stdout.
///
/// # Errors
///
/// Returns an error if a file cannot be read or written, or if the config
/// or scenario is invalid.
pub fn run(args: Args) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_with(args, stdin.lock(), &mut stdout.lock())
}

/// Runs the calculator, reading interactive edits from `input` and writing
/// results to `out`.
///
/// # Errors
///
/// Returns an error if a file cannot be read or written, or if the config
/// or scenario is invalid.
pub fn run_with(args: Args, input: impl BufRead, out: &mut impl Write) -> Result<()> {
    if let Some(dir) = &args.audit {
        let config = resolve_config(args.config.as_deref(), dir)?;
        let reports = audit_directory(dir, &args.include, &config.markup)
            .with_context(|| format!("Failed to audit directory: {}", dir.display()))?;
        print_reports(out, dir, &reports)?;
        return Ok(());
    }

    let page_dir = match args.page.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let config = resolve_config(args.config.as_deref(), page_dir)?;

    let source = fs::read_to_string(&args.page)
        .with_context(|| format!("Failed to read page: {}", args.page.display()))?;
    let mut page = HtmlPage::parse(&source);

    let binder = Binder::bind(&page, &config.markup).with_unavailable(&config.display.unavailable);
    let Some(form) = binder.bound().map(|bound| *bound.form()) else {
        // Same as the live page: missing markup leaves it inert.
        return Ok(());
    };

    let mut edits = match &args.scenario {
        Some(path) => load_scenario(path)?,
        None => Vec::new(),
    };
    edits.extend(args.inputs);

    let mut last = None;
    for edit in &edits {
        if let Some(update) = apply_edit(&binder, &mut page, form, edit) {
            last = Some(update);
        }
    }

    if args.interactive {
        // Edits given on the command line count as the first event.
        if let Some(update) = &last {
            print_results(out, &update.formatted)?;
            writeln!(out)?;
        }
        for line in input.lines() {
            let line = line.context("Failed to read from stdin")?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match line.parse::<Edit>() {
                Ok(edit) => {
                    if let Some(update) = apply_edit(&binder, &mut page, form, &edit) {
                        print_results(out, &update.formatted)?;
                        writeln!(out)?;
                    }
                }
                Err(err) => warn!(%err, "skipping line"),
            }
        }
    } else {
        // Without edits, show what the page's current field values give.
        if last.is_none() {
            last = binder.on_input(&mut page);
        }
        if let Some(update) = &last {
            print_results(out, &update.formatted)?;
        }
    }

    if let Some(path) = &args.output {
        fs::write(path, page.to_html())
            .with_context(|| format!("Failed to write page: {}", path.display()))?;
        info!(path = %path.display(), "page written");
    }

    Ok(())
}

/// Types one value into the form and dispatches the input event. Edits to
/// fields the form does not have change nothing and dispatch nothing.
fn apply_edit(binder: &Binder<NodeId>, page: &mut HtmlPage, form: NodeId, edit: &Edit) -> Option<Update> {
    if let Err(err) = page.set_field_value(form, &edit.field, &edit.value) {
        warn!(%err, %edit, "edit ignored");
        return None;
    }
    binder.on_input(page)
}

fn resolve_config(explicit: Option<&Path>, search_from: &Path) -> Result<Config> {
    let config = match explicit {
        Some(path) => Config::from_file(path)?,
        None => load_config(search_from)?,
    };
    Ok(config)
}
