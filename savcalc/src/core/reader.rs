// src/core/reader.rs
use crate::core::markup::Page;
use crate::models::{FieldName, Reading, Scan};

/// Reads the text content of each element, keyed by the value of
/// `attribute` on that element.
///
/// Elements whose attribute is missing are skipped. When two elements
/// declare the same name the later one in document order wins.
pub fn read_elements<P, N>(page: &P, nodes: &[P::Node], attribute: &str) -> Scan<N>
where
    P: Page,
    N: FieldName,
{
    let mut scan = Scan::new();
    for &node in nodes {
        let Some(declared) = page.attribute(node, attribute) else {
            continue;
        };
        scan.record(&declared, Reading::parse(&page.text_content(node)));
    }
    scan
}

/// Reads the values a form would submit, keyed by field name.
pub fn read_form<P, N>(page: &P, form: P::Node) -> Scan<N>
where
    P: Page,
    N: FieldName,
{
    let mut scan = Scan::new();
    for (name, value) in page.form_data(form) {
        scan.record(&name, Reading::parse(&value));
    }
    scan
}
