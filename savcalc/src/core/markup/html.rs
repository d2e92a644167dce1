// src/core/markup/html.rs
use std::ops::Range;

use super::{EditError, Page};

const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];
const RAW_TEXT_TAGS: &[&str] = &["script", "style", "textarea", "title"];
/// Tags whose open element is closed by a sibling of the same tag.
const SELF_NESTING_FORBIDDEN: &[&str] = &["li", "option", "p"];
const SKIPPED_INPUT_TYPES: &[&str] = &["button", "file", "image", "reset", "submit"];

/// Handle to an element of an [`HtmlPage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct Span {
    range: Range<usize>,
    quoted: bool,
}

#[derive(Debug, Clone)]
struct Attr {
    name: String,
    value: Option<String>,
    span: Option<Span>,
}

#[derive(Debug, Clone)]
struct Element {
    tag: String,
    attrs: Vec<Attr>,
    /// Offset of `<`.
    start: usize,
    /// Offset just past the tag name.
    name_end: usize,
    /// Offset just past the opening tag's `>`.
    open_end: usize,
    /// Offset where the children end.
    close_start: usize,
    /// Offset just past the element, closing tag included.
    end: usize,
    detached: bool,
}

impl Element {
    fn attr(&self, name: &str) -> Option<&Attr> {
        self.attrs.iter().find(|attr| attr.name == name)
    }

    fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    fn attr_value(&self, name: &str) -> Option<&str> {
        self.attr(name).map(|attr| attr.value.as_deref().unwrap_or(""))
    }

    fn is_void(&self) -> bool {
        VOID_TAGS.contains(&self.tag.as_str())
    }

    fn input_type(&self) -> String {
        self.attr_value("type")
            .map_or_else(|| String::from("text"), str::to_ascii_lowercase)
    }
}

/// A forgiving, non-validating HTML document.
///
/// Only what the calculator needs is modelled: elements, their attributes
/// and the byte ranges they cover. Text writes splice the source in place so
/// the rest of the markup is preserved byte for byte.
#[derive(Debug, Clone)]
pub struct HtmlPage {
    source: String,
    elements: Vec<Element>,
}

impl HtmlPage {
    #[must_use]
    pub fn parse(source: &str) -> Self {
        Parser::new(source).run()
    }

    /// The current markup, including every write made so far.
    #[inline]
    #[must_use]
    pub fn to_html(&self) -> &str {
        &self.source
    }

    fn live(&self, node: NodeId) -> Option<&Element> {
        self.elements.get(node.0).filter(|element| !element.detached)
    }

    fn descendants(&self, node: NodeId) -> impl Iterator<Item = (NodeId, &Element)> {
        let bounds = self.live(node).map(|el| (el.open_end, el.close_start));
        self.elements
            .iter()
            .enumerate()
            .skip(node.0.saturating_add(1))
            .filter(move |(_, element)| {
                bounds.is_some_and(|(from, to)| {
                    !element.detached && element.start >= from && element.end <= to
                })
            })
            .map(|(index, element)| (NodeId(index), element))
    }

    fn inner_text(&self, element: &Element) -> String {
        let inner = self
            .source
            .get(element.open_end..element.close_start)
            .unwrap_or_default();
        if RAW_TEXT_TAGS.contains(&element.tag.as_str()) {
            return decode_entities(inner);
        }
        decode_entities(&strip_tags(inner))
    }

    /// Replaces `range` of the source and keeps every element offset valid.
    /// Elements lying wholly inside a non-empty `range` become detached.
    fn splice(&mut self, range: Range<usize>, replacement: &str) {
        let removed = range.len();
        let added = replacement.len();
        // An insertion point belongs to whatever ends there, not to what
        // starts there.
        let shift_start = |offset: &mut usize| {
            if *offset >= range.end && *offset > range.start {
                *offset = offset.saturating_sub(removed).saturating_add(added);
            }
        };
        let shift_end = |offset: &mut usize| {
            if *offset >= range.end {
                *offset = offset.saturating_sub(removed).saturating_add(added);
            }
        };

        self.source.replace_range(range.clone(), replacement);

        for element in &mut self.elements {
            if element.detached {
                continue;
            }
            if removed > 0 && element.start >= range.start && element.end <= range.end {
                element.detached = true;
                continue;
            }
            shift_start(&mut element.start);
            shift_start(&mut element.name_end);
            shift_start(&mut element.open_end);
            shift_end(&mut element.close_start);
            shift_end(&mut element.end);
            for span in element.attrs.iter_mut().filter_map(|attr| attr.span.as_mut()) {
                shift_start(&mut span.range.start);
                shift_end(&mut span.range.end);
            }
        }
    }

    fn write_value_attribute(&mut self, node: NodeId, value: &str) {
        let escaped = escape_attribute(value);
        let Some(element) = self.elements.get(node.0) else {
            return;
        };

        let existing = element
            .attrs
            .iter()
            .position(|attr| attr.name == "value" && attr.span.is_some());

        match existing.and_then(|index| element.attrs.get(index).map(|attr| (index, attr))) {
            Some((index, Attr { span: Some(span), .. })) => {
                let range = span.range.clone();
                let quoted = span.quoted;
                let text = if quoted {
                    escaped
                } else {
                    format!("\"{escaped}\"")
                };
                let text_len = text.len();
                self.splice(range.clone(), &text);
                if let Some(attr) = self
                    .elements
                    .get_mut(node.0)
                    .and_then(|element| element.attrs.get_mut(index))
                {
                    let inner_start = if quoted { range.start } else { range.start + 1 };
                    let inner_len = if quoted { text_len } else { text_len - 2 };
                    attr.value = Some(value.to_owned());
                    attr.span = Some(Span {
                        range: inner_start..inner_start + inner_len,
                        quoted: true,
                    });
                }
            }
            _ => {
                let at = element.name_end;
                let text = format!(" value=\"{escaped}\"");
                self.splice(at..at, &text);
                if let Some(element) = self.elements.get_mut(node.0) {
                    element.attrs.retain(|attr| attr.name != "value");
                    let inner_start = at + " value=\"".len();
                    element.attrs.insert(
                        0,
                        Attr {
                            name: String::from("value"),
                            value: Some(value.to_owned()),
                            span: Some(Span {
                                range: inner_start..inner_start + escaped.len(),
                                quoted: true,
                            }),
                        },
                    );
                }
            }
        }
    }

    fn select_value(&self, select: NodeId) -> Vec<String> {
        let options: Vec<&Element> = self
            .descendants(select)
            .filter(|(_, element)| element.tag == "option")
            .map(|(_, element)| element)
            .collect();
        let option_value = |option: &Element| {
            option
                .attr_value("value")
                .map_or_else(|| self.inner_text(option).trim().to_owned(), str::to_owned)
        };

        let selected: Vec<String> = options
            .iter()
            .filter(|option| option.has_attr("selected"))
            .map(|&option| option_value(option))
            .collect();
        let multiple = self.live(select).is_some_and(|el| el.has_attr("multiple"));

        if multiple {
            selected
        } else if let Some(last) = selected.last() {
            vec![last.clone()]
        } else {
            options
                .first()
                .map(|&option| option_value(option))
                .into_iter()
                .collect()
        }
    }
}

impl Page for HtmlPage {
    type Node = NodeId;

    fn query_first(&self, attribute: &str) -> Option<NodeId> {
        self.query_all(attribute).into_iter().next()
    }

    fn query_all(&self, attribute: &str) -> Vec<NodeId> {
        let attribute = attribute.to_ascii_lowercase();
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, element)| !element.detached && element.has_attr(&attribute))
            .map(|(index, _)| NodeId(index))
            .collect()
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.live(node)?
            .attr_value(&name.to_ascii_lowercase())
            .map(str::to_owned)
    }

    fn text_content(&self, node: NodeId) -> String {
        self.live(node)
            .map(|element| self.inner_text(element))
            .unwrap_or_default()
    }

    fn set_text_content(&mut self, node: NodeId, text: &str) {
        let Some(element) = self.live(node) else {
            return;
        };
        if element.is_void() {
            return;
        }
        let range = element.open_end..element.close_start;
        self.splice(range, &escape_text(text));
    }

    fn form_data(&self, form: NodeId) -> Vec<(String, String)> {
        let mut entries = Vec::new();

        for (node, element) in self.descendants(form) {
            let Some(name) = element.attr_value("name").filter(|name| !name.is_empty()) else {
                continue;
            };
            if element.has_attr("disabled") {
                continue;
            }

            match element.tag.as_str() {
                "input" => {
                    let kind = element.input_type();
                    if SKIPPED_INPUT_TYPES.contains(&kind.as_str()) {
                        continue;
                    }
                    if matches!(kind.as_str(), "checkbox" | "radio") {
                        if element.has_attr("checked") {
                            let value = element.attr_value("value").unwrap_or("on");
                            entries.push((name.to_owned(), value.to_owned()));
                        }
                        continue;
                    }
                    let value = element.attr_value("value").unwrap_or_default();
                    entries.push((name.to_owned(), value.to_owned()));
                }
                "textarea" => entries.push((name.to_owned(), self.inner_text(element))),
                "select" => {
                    for value in self.select_value(node) {
                        entries.push((name.to_owned(), value));
                    }
                }
                _ => {}
            }
        }

        entries
    }

    fn set_field_value(&mut self, form: NodeId, field: &str, value: &str) -> Result<(), EditError> {
        let target = self
            .descendants(form)
            .find(|(_, element)| {
                matches!(element.tag.as_str(), "input" | "select" | "textarea")
                    && element.attr_value("name") == Some(field)
            })
            .map(|(node, element)| (node, element.tag.clone(), element.input_type()));

        let Some((node, tag, kind)) = target else {
            return Err(EditError::NoSuchField(field.to_owned()));
        };

        match tag.as_str() {
            "textarea" => {
                self.set_text_content(node, value);
                Ok(())
            }
            "input"
                if !SKIPPED_INPUT_TYPES.contains(&kind.as_str())
                    && !matches!(kind.as_str(), "checkbox" | "radio") =>
            {
                self.write_value_attribute(node, value);
                Ok(())
            }
            "input" => Err(EditError::NotEditable {
                field: field.to_owned(),
                control: kind,
            }),
            _ => Err(EditError::NotEditable {
                field: field.to_owned(),
                control: tag,
            }),
        }
    }
}

struct Parser<'a> {
    source: &'a str,
    lower: String,
    pos: usize,
    elements: Vec<Element>,
    open: Vec<usize>,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            lower: source.to_ascii_lowercase(),
            pos: 0,
            elements: Vec::new(),
            open: Vec::new(),
        }
    }

    fn bytes(&self) -> &[u8] {
        self.source.as_bytes()
    }

    fn find_from(&self, from: usize, needle: &str) -> Option<usize> {
        self.source
            .get(from..)
            .and_then(|rest| rest.find(needle))
            .map(|found| from + found)
    }

    fn run(mut self) -> HtmlPage {
        let len = self.source.len();

        while let Some(lt) = self.find_from(self.pos, "<") {
            let rest = self.source.get(lt..).unwrap_or_default();

            if rest.starts_with("<!--") {
                self.pos = self.find_from(lt + 4, "-->").map_or(len, |end| end + 3);
            } else if rest.starts_with("<!") || rest.starts_with("<?") {
                self.pos = self.find_from(lt, ">").map_or(len, |end| end + 1);
            } else if rest.starts_with("</") {
                self.closing_tag(lt);
            } else if self.bytes().get(lt + 1).is_some_and(u8::is_ascii_alphabetic) {
                self.opening_tag(lt);
            } else {
                self.pos = lt + 1;
            }
        }

        for index in std::mem::take(&mut self.open) {
            if let Some(element) = self.elements.get_mut(index) {
                element.close_start = len;
                element.end = len;
            }
        }

        HtmlPage {
            source: self.source.to_owned(),
            elements: self.elements,
        }
    }

    fn read_name(&self, from: usize) -> usize {
        let bytes = self.bytes();
        let mut at = from;
        while bytes
            .get(at)
            .is_some_and(|b| !b.is_ascii_whitespace() && !matches!(b, b'>' | b'/' | b'='))
        {
            at += 1;
        }
        at
    }

    fn skip_whitespace(&self, from: usize) -> usize {
        let bytes = self.bytes();
        let mut at = from;
        while bytes.get(at).is_some_and(u8::is_ascii_whitespace) {
            at += 1;
        }
        at
    }

    fn closing_tag(&mut self, lt: usize) {
        let name_end = self.read_name(lt + 2);
        let tag = self.lower.get(lt + 2..name_end).unwrap_or_default().to_owned();
        let end = self
            .find_from(name_end, ">")
            .map_or(self.source.len(), |gt| gt + 1);
        self.pos = end;

        let Some(depth) = self
            .open
            .iter()
            .rposition(|&index| self.elements.get(index).is_some_and(|el| el.tag == tag))
        else {
            return;
        };

        let closed: Vec<usize> = self.open.drain(depth..).collect();
        for (offset, index) in closed.iter().enumerate() {
            if let Some(element) = self.elements.get_mut(*index) {
                element.close_start = lt;
                element.end = if offset == 0 { end } else { lt };
            }
        }
    }

    fn opening_tag(&mut self, lt: usize) {
        let len = self.source.len();
        let name_end = self.read_name(lt + 1);
        let tag = self.lower.get(lt + 1..name_end).unwrap_or_default().to_owned();

        if SELF_NESTING_FORBIDDEN.contains(&tag.as_str())
            && let Some(&top) = self.open.last()
            && self.elements.get(top).is_some_and(|el| el.tag == tag)
        {
            self.open.pop();
            if let Some(element) = self.elements.get_mut(top) {
                element.close_start = lt;
                element.end = lt;
            }
        }

        let (attrs, open_end, self_closing) = self.attributes(name_end);
        let mut element = Element {
            tag,
            attrs,
            start: lt,
            name_end,
            open_end,
            close_start: open_end,
            end: open_end,
            detached: false,
        };
        self.pos = open_end;

        if element.is_void() || self_closing {
            self.elements.push(element);
            return;
        }

        if RAW_TEXT_TAGS.contains(&element.tag.as_str()) {
            let closing = format!("</{}", element.tag);
            let close_start = self
                .lower
                .get(open_end..)
                .and_then(|rest| rest.find(&closing))
                .map_or(len, |found| open_end + found);
            element.close_start = close_start;
            element.end = self
                .find_from(close_start, ">")
                .map_or(len, |gt| gt + 1);
            self.pos = element.end;
            self.elements.push(element);
            return;
        }

        self.open.push(self.elements.len());
        self.elements.push(element);
    }

    /// Reads attributes up to the end of an opening tag. Returns the
    /// attributes, the offset past `>` and whether the tag was self-closing.
    fn attributes(&self, from: usize) -> (Vec<Attr>, usize, bool) {
        let bytes = self.bytes();
        let len = bytes.len();
        let mut attrs = Vec::new();
        let mut at = from;

        loop {
            at = self.skip_whitespace(at);
            match bytes.get(at) {
                None => return (attrs, len, false),
                Some(b'>') => return (attrs, at + 1, false),
                Some(b'/') => {
                    if bytes.get(at + 1) == Some(&b'>') {
                        return (attrs, at + 2, true);
                    }
                    at += 1;
                    continue;
                }
                Some(_) => {}
            }

            let name_end = self.read_name(at);
            if name_end == at {
                at += 1;
                continue;
            }
            let name = self.lower.get(at..name_end).unwrap_or_default().to_owned();
            at = self.skip_whitespace(name_end);

            let mut attr = Attr {
                name,
                value: None,
                span: None,
            };

            if bytes.get(at) == Some(&b'=') {
                at = self.skip_whitespace(at + 1);
                let (range, quoted) = match bytes.get(at) {
                    Some(&quote) if quote == b'"' || quote == b'\'' => {
                        let close = self
                            .source
                            .get(at + 1..)
                            .and_then(|rest| rest.find(char::from(quote)))
                            .map_or(len, |found| at + 1 + found);
                        let range = at + 1..close;
                        at = (close + 1).min(len);
                        (range, true)
                    }
                    _ => {
                        let start = at;
                        while bytes
                            .get(at)
                            .is_some_and(|b| !b.is_ascii_whitespace() && *b != b'>')
                        {
                            at += 1;
                        }
                        (start..at, false)
                    }
                };
                let raw = self.source.get(range.clone()).unwrap_or_default();
                attr.value = Some(decode_entities(raw));
                attr.span = Some(Span { range, quoted });
            }

            attrs.push(attr);
        }
    }
}

fn strip_tags(fragment: &str) -> String {
    let mut out = String::with_capacity(fragment.len());
    let mut rest = fragment;

    while let Some(lt) = rest.find('<') {
        out.push_str(rest.get(..lt).unwrap_or_default());
        let tail = rest.get(lt..).unwrap_or_default();

        if let Some(comment) = tail.strip_prefix("<!--") {
            rest = comment.find("-->").map_or("", |end| comment.get(end + 3..).unwrap_or_default());
            continue;
        }

        let starts_tag = tail
            .as_bytes()
            .get(1)
            .is_some_and(|b| b.is_ascii_alphabetic() || matches!(b, b'/' | b'!' | b'?'));
        if starts_tag {
            rest = tail.find('>').map_or("", |gt| tail.get(gt + 1..).unwrap_or_default());
        } else {
            out.push('<');
            rest = tail.get(1..).unwrap_or_default();
        }
    }

    out.push_str(rest);
    out
}

fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_owned();
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        out.push_str(rest.get(..amp).unwrap_or_default());
        let tail = rest.get(amp..).unwrap_or_default();

        let decoded = tail
            .get(1..)
            .and_then(|body| body.find(';').filter(|semi| *semi <= 10).map(|semi| (body, semi)))
            .and_then(|(body, semi)| {
                let entity = body.get(..semi)?;
                decode_entity(entity).map(|c| (c, semi + 2))
            });

        match decoded {
            Some((c, consumed)) => {
                out.push(c);
                rest = tail.get(consumed..).unwrap_or_default();
            }
            None => {
                out.push('&');
                rest = tail.get(1..).unwrap_or_default();
            }
        }
    }

    out.push_str(rest);
    out
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let number = entity.strip_prefix('#')?;
            let code = match number.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => number.parse::<u32>().ok()?,
            };
            char::from_u32(code)
        }
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attribute(text: &str) -> String {
    escape_text(text).replace('"', "&quot;")
}
