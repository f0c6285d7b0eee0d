//! Submission page (`view/{id}/`)

use crate::extract::schema::{Field, Locator, Rule, Schema};
use crate::Result;
use scraper::Html;
use serde::Serialize;
use url::Url;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Submission {
    pub title: Option<String>,
    /// HTML as rendered by the site
    pub description: Option<String>,
    pub link: String,
    pub posted: Option<String>,
    pub image: Option<String>,
    pub thumbnail: Option<String>,
    pub category: Option<String>,
    pub theme: Option<String>,
    pub species: Option<String>,
    pub gender: Option<String>,
    pub favorites: Option<u64>,
    pub comments: Option<u64>,
    pub views: Option<u64>,
    pub resolution: Option<String>,
    pub rating: Option<String>,
    pub keywords: Vec<String>,
}

const INFO: Locator = &[
    ("div#submission table.maintable table.maintable", 1),
    ("td.alt1", 1),
];
const DESCRIPTION: Locator = &[
    ("div#submission table.maintable table.maintable", 1),
    ("td.alt1", 2),
];

const fn labelled(name: &'static str, label: &'static str) -> Field {
    Field {
        name,
        locator: INFO,
        rule: Rule::Labelled(label),
    }
}

pub static SUBMISSION: Schema = Schema {
    entity: "submission",
    anchors: &[INFO, DESCRIPTION],
    fields: &[
        Field {
            name: "title",
            locator: &[
                ("div#submission table.maintable table.maintable", 1),
                ("td.cat b", 0),
            ],
            rule: Rule::Text,
        },
        Field {
            name: "description",
            locator: DESCRIPTION,
            rule: Rule::InnerHtml,
        },
        Field {
            name: "posted",
            locator: &[
                ("div#submission table.maintable table.maintable", 1),
                ("td.alt1", 1),
                ("span", 0),
            ],
            rule: Rule::Text,
        },
        Field {
            name: "image",
            locator: &[(".actions a", 2)],
            rule: Rule::AttrUrl("href"),
        },
        Field {
            name: "thumbnail",
            locator: &[("img#submissionImg", 0)],
            rule: Rule::AttrUrl("src"),
        },
        labelled("category", "Category"),
        labelled("theme", "Theme"),
        labelled("species", "Species"),
        labelled("gender", "Gender"),
        labelled("favorites", "Favorites"),
        labelled("comments", "Comments"),
        labelled("views", "Views"),
        labelled("resolution", "Resolution"),
        Field {
            name: "rating",
            locator: &[
                ("div#submission table.maintable table.maintable", 1),
                ("td.alt1", 1),
                ("div img", 0),
            ],
            rule: Rule::AltWithoutSuffix(" rating"),
        },
        Field {
            name: "keywords",
            locator: &[
                ("div#submission table.maintable table.maintable", 1),
                ("td.alt1", 1),
                ("div#keywords", 0),
            ],
            rule: Rule::TextList("a"),
        },
    ],
};

/// Parses a submission page
///
/// `link` is the canonical page of the submission under `origin`.
pub fn parse_submission(document: &Html, url: &str, origin: &Url, id: &str) -> Result<Submission> {
    let fields = SUBMISSION.extract(document, url)?;
    Ok(Submission {
        title: fields.text("title"),
        description: fields.text("description"),
        link: format!("{}view/{}/", origin, id),
        posted: fields.text("posted"),
        image: fields.text("image"),
        thumbnail: fields.text("thumbnail"),
        category: fields.text("category"),
        theme: fields.text("theme"),
        species: fields.text("species"),
        gender: fields.text("gender"),
        favorites: fields.count("favorites"),
        comments: fields.count("comments"),
        views: fields.count("views"),
        resolution: fields.text("resolution"),
        rating: fields.text("rating"),
        keywords: fields.list("keywords"),
    })
}
