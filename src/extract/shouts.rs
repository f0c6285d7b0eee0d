//! Shouts left on a user page (`user/{name}/`)

use crate::extract::schema::{Field, ListSchema, Rule};
use crate::Result;
use scraper::Html;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shout {
    pub id: Option<String>,
    pub name: Option<String>,
    pub posted: Option<String>,
    /// HTML as rendered by the site
    pub text: Option<String>,
}

pub static SHOUTS: ListSchema = ListSchema {
    entity: "shouts",
    anchors: &[&[(".ldot", 0)]],
    scope: &[],
    item: r#"table[id^="shout"]"#,
    fields: &[
        Field {
            name: "id",
            locator: &[],
            rule: Rule::Attr("id"),
        },
        Field {
            name: "name",
            locator: &[(".lead.addpad a", 0)],
            rule: Rule::Text,
        },
        Field {
            name: "posted",
            locator: &[(".popup_date", 0)],
            rule: Rule::Text,
        },
        Field {
            name: "text",
            locator: &[(".no_overflow.alt1", 0)],
            rule: Rule::InnerHtml,
        },
    ],
};

/// Parses the shouts on a user page, newest first as the site lists them
pub fn parse_shouts(document: &Html, url: &str) -> Result<Vec<Shout>> {
    Ok(SHOUTS
        .extract(document, url)?
        .into_iter()
        .map(|fields| Shout {
            id: fields.text("id"),
            name: fields.text("name"),
            posted: fields.text("posted"),
            text: fields.text("text"),
        })
        .collect())
}
