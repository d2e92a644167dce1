// tests/integration_tests/audit_test.rs
use super::common::{CALCULATOR_PAGE, PLAIN_PAGE, create_test_file};
use anyhow::Result;
use savcalc::{BindError, Markup, PageStatus, ResultName, audit_directory};
use tempfile::TempDir;

fn setup_site() -> Result<TempDir> {
    let temp_dir = TempDir::new()?;

    create_test_file(temp_dir.path(), "index.html", PLAIN_PAGE)?;
    create_test_file(temp_dir.path(), "roi/index.html", CALCULATOR_PAGE)?;
    create_test_file(
        temp_dir.path(),
        "roi/typo.html",
        &CALCULATOR_PAGE.replace("\"supply-chain-risk\"", "\"suply-chain-risk\""),
    )?;
    create_test_file(temp_dir.path(), "roi/notes.md", "# not a page")?;
    create_test_file(temp_dir.path(), ".drafts/old.html", CALCULATOR_PAGE)?;

    Ok(temp_dir)
}

#[test]
fn test_audit_reports_every_page() -> Result<()> {
    let site = setup_site()?;
    let reports = audit_directory(site.path(), "*.html", &Markup::default())?;

    let paths: Vec<_> = reports
        .iter()
        .map(|report| report.path.strip_prefix(site.path()).map(|p| p.to_path_buf()))
        .collect::<Result<_, _>>()?;
    assert_eq!(
        paths,
        vec![
            std::path::PathBuf::from("index.html"),
            std::path::PathBuf::from("roi/index.html"),
            std::path::PathBuf::from("roi/typo.html"),
        ],
        "hidden directories and other files are skipped"
    );

    assert_eq!(
        reports[0].status,
        PageStatus::Unbound(BindError::MissingForm(String::from("calculator-input")))
    );

    let PageStatus::Bound(clean) = &reports[1].status else {
        panic!("calculator page should bind");
    };
    assert!(clean.is_clean());
    assert_eq!(clean.result_elements, 5);
    assert_eq!(clean.coefficient_elements, 7);

    let PageStatus::Bound(typo) = &reports[2].status else {
        panic!("page with a typo still binds");
    };
    assert_eq!(typo.unknown_results, vec![String::from("suply-chain-risk")]);
    assert_eq!(typo.undisplayed_results, vec![ResultName::SupplyChainRisk]);
    Ok(())
}

#[test]
fn test_audit_include_pattern() -> Result<()> {
    let site = setup_site()?;
    let reports = audit_directory(site.path(), "typo.*", &Markup::default())?;
    assert_eq!(reports.len(), 1);
    assert!(reports[0].path.ends_with("roi/typo.html"));
    Ok(())
}

#[test]
fn test_audit_empty_directory() -> Result<()> {
    let site = TempDir::new()?;
    assert!(audit_directory(site.path(), "*.html", &Markup::default())?.is_empty());
    Ok(())
}
