// tests/integration_tests/config_test.rs
use super::common::{CALCULATOR_PAGE, create_test_file};
use anyhow::Result;
use savcalc::{Binder, Config, HtmlPage, load_config};
use tempfile::TempDir;

#[test]
fn test_missing_config_uses_defaults() -> Result<()> {
    let temp_dir = TempDir::new()?;
    assert_eq!(load_config(temp_dir.path())?, Config::default());
    Ok(())
}

#[test]
fn test_site_config_applies_to_nested_pages() -> Result<()> {
    let temp_dir = TempDir::new()?;
    create_test_file(
        temp_dir.path(),
        ".savcalc.toml",
        "[markup]\nresult_attribute = \"data-out\"\n\n[display]\nunavailable = \"not available\"\n",
    )?;
    let html = CALCULATOR_PAGE
        .replace("calculator-result", "data-out")
        .replace(">25<", ">0<");
    create_test_file(temp_dir.path(), "pricing/roi.html", &html)?;

    let config = load_config(&temp_dir.path().join("pricing"))?;
    let mut page = HtmlPage::parse(&std::fs::read_to_string(
        temp_dir.path().join("pricing/roi.html"),
    )?);
    let binder = Binder::bind(&page, &config.markup).with_unavailable(&config.display.unavailable);
    binder.on_input(&mut page).expect("page should be bound");

    assert!(page.to_html().contains(r#"<span data-out="days-saved-waiting">not available</span>"#));
    assert!(page.to_html().contains(r#"<h2 data-out="total-savings">$12,600</h2>"#));
    Ok(())
}

#[test]
fn test_nearest_config_wins() -> Result<()> {
    let temp_dir = TempDir::new()?;
    create_test_file(temp_dir.path(), ".savcalc.toml", "[display]\nunavailable = \"outer\"\n")?;
    create_test_file(temp_dir.path(), "a/.savcalc.toml", "[display]\nunavailable = \"inner\"\n")?;
    std::fs::create_dir_all(temp_dir.path().join("a/b"))?;

    assert_eq!(load_config(&temp_dir.path().join("a/b"))?.display.unavailable, "inner");
    assert_eq!(load_config(temp_dir.path())?.display.unavailable, "outer");
    Ok(())
}
