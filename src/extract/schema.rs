//! Declarative extraction engine
//!
//! Every entity is described as data: the anchors a page must contain to be
//! considered well-formed, and a table of fields, each with a locator and a
//! rule turning the located element into a value. When the site's markup
//! drifts, the tables in the entity modules change; this interpreter does not.

use crate::extract::labels::{bold_labelled_html, bold_labelled_text, labelled_value, text_lines};
use crate::{FaError, Result};
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use url::Url;

/// One step of a locator: the `nth` descendant matching a CSS selector
pub type Step = (&'static str, usize);

/// A path of steps resolved from a starting element
///
/// The empty locator resolves to the starting element itself.
pub type Locator = &'static [Step];

/// How a located element is turned into a value
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    /// Trimmed text content
    Text,
    /// Inner HTML verbatim, surrounding whitespace trimmed
    InnerHtml,
    /// Attribute value
    Attr(&'static str),
    /// Attribute value resolved against the page URL
    AttrUrl(&'static str),
    /// Attribute value with a fixed prefix removed
    AttrWithoutPrefix(&'static str, &'static str),
    /// `alt` attribute with a fixed suffix removed
    AltWithoutSuffix(&'static str),
    /// `Label: value` or `Label:` + next line, over the element's text lines
    Labelled(&'static str),
    /// `<b>Label:</b> value<br>`, reduced to text
    BoldLabelled(&'static str),
    /// `<b>Label:</b><br>` followed by HTML kept verbatim
    BoldLabelledHtml(&'static str),
    /// Text of every descendant matching the selector; empty texts dropped
    TextList(&'static str),
}

/// A named field: where to look and how to read it
#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub locator: Locator,
    pub rule: Rule,
}

/// Schema of an entity that occupies a whole page
#[derive(Debug)]
pub struct Schema {
    pub entity: &'static str,
    pub anchors: &'static [Locator],
    pub fields: &'static [Field],
}

/// Schema of a repeated entry on a page
#[derive(Debug)]
pub struct ListSchema {
    pub entity: &'static str,
    pub anchors: &'static [Locator],
    /// Element the items are searched under
    pub scope: Locator,
    /// Selector matching one element per item
    pub item: &'static str,
    pub fields: &'static [Field],
}

/// Values pulled out of a page or list item, keyed by field name
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Extracted {
    values: HashMap<&'static str, String>,
    lists: HashMap<&'static str, Vec<String>>,
}

impl Extracted {
    /// A single-valued field; `None` when absent or empty
    pub fn text(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }

    /// A list field; empty when the container was absent
    pub fn list(&self, name: &str) -> Vec<String> {
        self.lists.get(name).cloned().unwrap_or_default()
    }

    /// A numeric field; thousands separators are tolerated
    pub fn count(&self, name: &str) -> Option<u64> {
        self.values.get(name).and_then(|value| parse_count(value))
    }
}

impl Schema {
    /// Checks the anchors, then extracts every field
    pub fn extract(&self, document: &Html, url: &str) -> Result<Extracted> {
        let root = document.root_element();
        check_anchors(self.entity, self.anchors, root, url)?;
        Ok(extract_fields(self.fields, root, url))
    }
}

impl ListSchema {
    /// Checks the anchors, then extracts the fields of every item in order
    pub fn extract(&self, document: &Html, url: &str) -> Result<Vec<Extracted>> {
        let root = document.root_element();
        check_anchors(self.entity, self.anchors, root, url)?;

        let Some(scope) = resolve(root, self.scope) else {
            return Err(structure_error(self.entity, url, self.scope));
        };
        let Some(item_selector) = selector(self.item) else {
            return Err(structure_error(self.entity, url, &[]));
        };

        Ok(scope
            .select(&item_selector)
            .map(|item| extract_fields(self.fields, item, url))
            .collect())
    }
}

/// Resolves a locator from `start`
pub fn resolve<'a>(start: ElementRef<'a>, locator: Locator) -> Option<ElementRef<'a>> {
    let mut current = start;
    for (css, nth) in locator {
        let step = selector(css)?;
        current = current.select(&step).nth(*nth)?;
    }
    Some(current)
}

/// Human-readable form of a locator, used in errors and logs
pub fn describe(locator: Locator) -> String {
    if locator.is_empty() {
        return "<root>".to_string();
    }
    locator
        .iter()
        .map(|(css, nth)| format!("{}[{}]", css, nth))
        .collect::<Vec<_>>()
        .join(" > ")
}

/// Parses a count such as `1,234`
pub fn parse_count(value: &str) -> Option<u64> {
    let digits: String = value
        .chars()
        .filter(|c| !matches!(c, ',' | ' '))
        .collect();
    digits.parse().ok()
}

fn selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(selector) => Some(selector),
        Err(e) => {
            tracing::error!("Invalid selector {:?}: {:?}", css, e);
            None
        }
    }
}

fn check_anchors(entity: &str, anchors: &[Locator], root: ElementRef<'_>, url: &str) -> Result<()> {
    for anchor in anchors {
        if resolve(root, *anchor).is_none() {
            return Err(structure_error(entity, url, *anchor));
        }
    }
    Ok(())
}

fn structure_error(entity: &str, url: &str, locator: Locator) -> FaError {
    let anchor = describe(locator);
    tracing::warn!(
        "Markup drift: {} page at {} is missing {}",
        entity,
        url,
        anchor
    );
    FaError::UnexpectedPageStructure {
        url: url.to_string(),
        anchor,
    }
}

fn extract_fields(fields: &[Field], start: ElementRef<'_>, url: &str) -> Extracted {
    let mut extracted = Extracted::default();
    for field in fields {
        let element = resolve(start, field.locator);
        match field.rule {
            Rule::TextList(item) => {
                let values: Vec<String> = element
                    .zip(selector(item))
                    .map(|(element, item)| {
                        element
                            .select(&item)
                            .map(|e| e.text().collect::<String>().trim().to_string())
                            .filter(|text| !text.is_empty())
                            .collect()
                    })
                    .unwrap_or_default();
                extracted.lists.insert(field.name, values);
            }
            rule => {
                let value = element
                    .and_then(|element| apply(rule, element, url))
                    .filter(|value| !value.is_empty());
                if let Some(value) = value {
                    extracted.values.insert(field.name, value);
                }
            }
        }
    }
    extracted
}

fn apply(rule: Rule, element: ElementRef<'_>, url: &str) -> Option<String> {
    let value = element.value();
    match rule {
        Rule::Text => Some(element.text().collect::<String>().trim().to_string()),
        Rule::InnerHtml => Some(element.inner_html().trim().to_string()),
        Rule::Attr(name) => value.attr(name).map(|v| v.trim().to_string()),
        Rule::AttrUrl(name) => value.attr(name).and_then(|href| resolve_url(href, url)),
        Rule::AttrWithoutPrefix(name, prefix) => value
            .attr(name)
            .map(|v| v.trim().strip_prefix(prefix).unwrap_or(v.trim()).to_string()),
        Rule::AltWithoutSuffix(suffix) => value
            .attr("alt")
            .map(|alt| alt.trim().strip_suffix(suffix).unwrap_or(alt.trim()).to_string()),
        Rule::Labelled(label) => labelled_value(&text_lines(element), label),
        Rule::BoldLabelled(label) => bold_labelled_text(&element.inner_html(), label),
        Rule::BoldLabelledHtml(label) => bold_labelled_html(&element.inner_html(), label),
        Rule::TextList(_) => None,
    }
}

/// Resolves an href against the page it appeared on
///
/// Protocol-relative links (`//host/path`) take the page's scheme.
fn resolve_url(href: &str, page_url: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    Url::parse(page_url)
        .and_then(|base| base.join(href))
        .map(|url| url.to_string())
        .ok()
}
