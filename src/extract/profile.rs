//! User profile page (`user/{name}/`)

use crate::extract::schema::{Field, Locator, Rule, Schema};
use crate::Result;
use scraper::Html;
use serde::Serialize;

/// A user's profile header and statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile {
    pub name: String,
    pub full_name: Option<String>,
    pub artist_type: Option<String>,
    pub registered_since: Option<String>,
    pub current_mood: Option<String>,
    /// HTML as rendered by the site
    pub artist_profile: Option<String>,
    pub pageviews: Option<u64>,
    pub submissions: Option<u64>,
    pub comments_received: Option<u64>,
    pub comments_given: Option<u64>,
    pub journals: Option<u64>,
    pub favorites: Option<u64>,
}

const INFO: Locator = &[(".ldot", 0)];
const STATS: Locator = &[(".ldot", 1)];

const fn info(name: &'static str, rule: Rule) -> Field {
    Field {
        name,
        locator: INFO,
        rule,
    }
}

const fn stat(name: &'static str, label: &'static str) -> Field {
    Field {
        name,
        locator: STATS,
        rule: Rule::BoldLabelled(label),
    }
}

pub static PROFILE: Schema = Schema {
    entity: "profile",
    anchors: &[INFO, STATS],
    fields: &[
        info("full_name", Rule::BoldLabelled("Full Name")),
        info("artist_type", Rule::BoldLabelled("Artist Type")),
        info("registered_since", Rule::BoldLabelled("Registered since")),
        info("current_mood", Rule::BoldLabelled("Current mood")),
        info("artist_profile", Rule::BoldLabelledHtml("Artist Profile")),
        stat("pageviews", "Pageviews"),
        stat("submissions", "Submissions"),
        stat("comments_received", "Comments Received"),
        stat("comments_given", "Comments Given"),
        stat("journals", "Journals"),
        stat("favorites", "Favorites"),
    ],
};

/// Parses a user page into a `Profile`
pub fn parse_profile(document: &Html, url: &str, name: &str) -> Result<Profile> {
    let fields = PROFILE.extract(document, url)?;
    Ok(Profile {
        name: name.to_string(),
        full_name: fields.text("full_name"),
        artist_type: fields.text("artist_type"),
        registered_since: fields.text("registered_since"),
        current_mood: fields.text("current_mood"),
        artist_profile: fields.text("artist_profile"),
        pageviews: fields.count("pageviews"),
        submissions: fields.count("submissions"),
        comments_received: fields.count("comments_received"),
        comments_given: fields.count("comments_given"),
        journals: fields.count("journals"),
        favorites: fields.count("favorites"),
    })
}
