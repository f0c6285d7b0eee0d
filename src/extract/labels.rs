//! Labelled-field rules
//!
//! The site renders most metadata as a bold label followed by a value, in
//! one of three shapes:
//! - `Label: value` on a single text line
//! - `Label:` on one line and the value on the next
//! - `<b>Label:</b> value<br>` or `<b>Label:</b><br>long HTML` inside a block

use regex::Regex;
use scraper::{ElementRef, Html, Node};
use std::sync::LazyLock;

/// Elements that start a new text line when an element is flattened
const LINE_BREAKING: &[&str] = &["br", "div", "p", "tr", "li", "table"];

/// Flattens an element into trimmed text lines
///
/// `<br>` and block elements break lines even when the markup has no newline.
/// Each line has leading and trailing whitespace removed.
pub fn text_lines(element: ElementRef<'_>) -> Vec<String> {
    let mut text = String::new();
    for node in element.descendants() {
        match node.value() {
            Node::Text(t) => text.push_str(t),
            Node::Element(e) if LINE_BREAKING.contains(&e.name()) => text.push('\n'),
            _ => {}
        }
    }
    text.lines().map(|line| line.trim().to_string()).collect()
}

/// Finds `Label: value`, or `Label:` followed by the next non-empty line
pub fn labelled_value(lines: &[String], label: &str) -> Option<String> {
    let inline = lines.iter().find_map(|line| {
        line.strip_prefix(label)
            .and_then(|rest| rest.strip_prefix(": "))
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    });
    if inline.is_some() {
        return inline;
    }

    let marker = format!("{}:", label);
    let index = lines.iter().position(|line| *line == marker)?;
    lines[index + 1..]
        .iter()
        .find(|line| !line.is_empty())
        .cloned()
}

/// `<b>Label:</b> value<br>`, the value confined to the label's own line
static BOLD_LABELLED_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<b>\s*([^<:]+?)\s*:\s*</b>([^\n]*?)<br\s*/?>").expect("valid regex")
});

/// `<b>Label:</b><br>`, the header of a multi-line HTML block
static BOLD_LABELLED_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<b>\s*([^<:]+?)\s*:\s*</b>\s*<br\s*/?>").expect("valid regex")
});

/// Finds `<b>Label:</b> value<br>` in serialized HTML and returns the value's text
///
/// Markup inside the value is dropped and entities are decoded. A label with
/// nothing before its `<br>` is absent.
pub fn bold_labelled_text(html: &str, label: &str) -> Option<String> {
    let captures = BOLD_LABELLED_LINE
        .captures_iter(html)
        .find(|captures| &captures[1] == label)?;
    let fragment = Html::parse_fragment(&captures[2]);
    let text = fragment
        .root_element()
        .text()
        .collect::<String>()
        .trim()
        .to_string();
    (!text.is_empty()).then_some(text)
}

/// Finds `<b>Label:</b><br>` and returns all HTML after it verbatim
pub fn bold_labelled_html(html: &str, label: &str) -> Option<String> {
    let header = BOLD_LABELLED_BLOCK
        .captures_iter(html)
        .find(|captures| &captures[1] == label)?
        .get(0)?;
    let value = html[header.end()..].trim().to_string();
    (!value.is_empty()).then_some(value)
}
