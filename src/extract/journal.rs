//! Journal page (`journal/{id}/`)

use crate::extract::schema::{Field, Locator, Rule, Schema};
use crate::Result;
use scraper::Html;
use serde::Serialize;
use url::Url;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Journal {
    pub title: Option<String>,
    /// HTML as rendered by the site
    pub description: Option<String>,
    pub link: String,
    pub posted: Option<String>,
}

const TITLE: Locator = &[("td.cat b", 0)];
const BODY: Locator = &[("td.alt1 div.no_overflow", 0)];

pub static JOURNAL: Schema = Schema {
    entity: "journal",
    anchors: &[TITLE, BODY],
    fields: &[
        Field {
            name: "title",
            locator: TITLE,
            rule: Rule::Text,
        },
        Field {
            name: "description",
            locator: BODY,
            rule: Rule::InnerHtml,
        },
        Field {
            name: "posted",
            locator: &[("td.cat span", 0)],
            rule: Rule::Attr("title"),
        },
    ],
};

pub fn parse_journal(document: &Html, url: &str, origin: &Url, id: &str) -> Result<Journal> {
    let fields = JOURNAL.extract(document, url)?;
    Ok(Journal {
        title: fields.text("title"),
        description: fields.text("description"),
        link: format!("{}journal/{}/", origin, id),
        posted: fields.text("posted"),
    })
}
