// tests/integration_tests/binding_test.rs
use super::common::{CALCULATOR_PAGE, PLAIN_PAGE, result_text};
use anyhow::Result;
use savcalc::{BindError, Binder, HtmlPage, Markup, NodeId, Page as _, Reading, InputName};

#[test]
fn test_page_is_untouched_until_an_input_event() {
    let page = HtmlPage::parse(CALCULATOR_PAGE);
    let binder = Binder::bind(&page, &Markup::default());

    assert!(binder.is_bound());
    assert_eq!(page.to_html(), CALCULATOR_PAGE);
    assert_eq!(result_text(&page, "total-savings"), vec!["$0"]);
}

#[test]
fn test_input_event_writes_all_results() {
    let mut page = HtmlPage::parse(CALCULATOR_PAGE);
    let binder = Binder::bind(&page, &Markup::default());

    let update = binder.on_input(&mut page).expect("page should be bound");

    assert_eq!(update.written, 5);
    assert_eq!(result_text(&page, "total-savings"), vec!["$12,600"]);
    assert_eq!(result_text(&page, "value-of-time-saved"), vec!["$2,000"]);
    assert_eq!(result_text(&page, "savings-from-negotiating"), vec!["$10,000"]);
    assert_eq!(result_text(&page, "days-saved-waiting"), vec!["300"]);
    assert_eq!(result_text(&page, "supply-chain-risk"), vec!["$600"]);
    assert!(page.to_html().contains("<p>Days: <span calculator-result=\"days-saved-waiting\">300</span></p>"));
}

#[test]
fn test_edits_flow_through_to_results() -> Result<()> {
    let mut page = HtmlPage::parse(CALCULATOR_PAGE);
    let binder = Binder::bind(&page, &Markup::default());
    let form = *binder.bound().expect("page should be bound").form();

    page.set_field_value(form, "headcount", "100")?;
    binder.on_input(&mut page);
    // 100 * 1 * (100 / 25) * 3
    assert_eq!(result_text(&page, "days-saved-waiting"), vec!["1200"]);
    // 100 * 10 * 1.2
    assert_eq!(result_text(&page, "supply-chain-risk"), vec!["$1,200"]);
    assert_eq!(result_text(&page, "total-savings"), vec!["$13,200"]);

    page.set_field_value(form, "indirect-spend", "")?;
    let update = binder.on_input(&mut page).expect("page should be bound");
    assert_eq!(result_text(&page, "savings-from-negotiating"), vec!["$0"]);
    assert_eq!(update.inputs.get(InputName::IndirectSpend), Some(&Reading::Number(0.0)));
    Ok(())
}

#[test]
fn test_repeated_events_are_idempotent() {
    let mut page = HtmlPage::parse(CALCULATOR_PAGE);
    let binder = Binder::bind(&page, &Markup::default());

    let first = binder.on_input(&mut page).expect("page should be bound");
    let html = page.to_html().to_owned();
    let second = binder.on_input(&mut page).expect("page should be bound");

    assert_eq!(first.formatted, second.formatted);
    assert_eq!(page.to_html(), html);
}

#[test]
fn test_page_without_markup_stays_inert() {
    let mut page = HtmlPage::parse(PLAIN_PAGE);
    let binder: Binder<NodeId> = Binder::bind(&page, &Markup::default());

    assert!(matches!(binder, Binder::Unbound(BindError::MissingForm(_))));
    assert!(binder.on_input(&mut page).is_none());
    assert_eq!(page.to_html(), PLAIN_PAGE);
}

#[test]
fn test_custom_attribute_names() {
    let html = CALCULATOR_PAGE
        .replace("calculator-input", "data-calc-form")
        .replace("calculator-variable", "data-calc-const")
        .replace("calculator-result", "data-calc-out");
    let mut page = HtmlPage::parse(&html);
    let markup = Markup {
        input_attribute: String::from("data-calc-form"),
        coefficient_attribute: String::from("data-calc-const"),
        result_attribute: String::from("data-calc-out"),
    };

    assert!(!Binder::bind(&page, &Markup::default()).is_bound());
    let binder = Binder::bind(&page, &markup);
    let update = binder.on_input(&mut page).expect("page should be bound");
    assert_eq!(update.written, 5);
    assert!(page.to_html().contains(r#"<h2 data-calc-out="total-savings">$12,600</h2>"#));
}
