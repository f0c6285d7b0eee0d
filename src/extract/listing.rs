//! Listing pages: folders, journal indexes, watch lists and search results
//!
//! Each listing is a list of identifiers in site order. Submission ids of
//! deleted or hidden entries render as `sid_` with nothing after it; those
//! come back as empty strings so positions line up with the page.

use crate::extract::schema::{Extracted, Field, ListSchema, Rule};
use crate::Result;
use scraper::Html;
use serde::Serialize;
use std::fmt;

/// One of a user's submission folders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FolderKind {
    Gallery,
    Scraps,
    Favorites,
}

impl FolderKind {
    /// Path segment used by the site
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gallery => "gallery",
            Self::Scraps => "scraps",
            Self::Favorites => "favorites",
        }
    }

    pub fn path(&self, user: &str, page: u32) -> String {
        format!("{}/{}/{}/", self.as_str(), user, page)
    }
}

impl fmt::Display for FolderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which side of the watch relation to list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WatchDirection {
    /// Users watching the given user
    Watchers,
    /// Users the given user watches
    Watching,
}

impl WatchDirection {
    pub fn path(&self, user: &str, page: u32) -> String {
        let segment = match self {
            Self::Watchers => "to",
            Self::Watching => "by",
        };
        format!("watchlist/{}/{}/{}/", segment, user, page)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FolderPage {
    pub ids: Vec<String>,
}

impl FolderPage {
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct JournalListing {
    pub ids: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WatchList {
    pub names: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SearchResultSet {
    pub ids: Vec<String>,
}

pub static FOLDER: ListSchema = ListSchema {
    entity: "folder",
    anchors: &[&[("table.maintable", 0)]],
    scope: &[],
    item: "td.alt1 b.t-image",
    fields: &[Field {
        name: "id",
        locator: &[],
        rule: Rule::AttrWithoutPrefix("id", "sid_"),
    }],
};

pub static JOURNALS: ListSchema = ListSchema {
    entity: "journals",
    anchors: &[&[("table.maintable table.maintable tr", 2), ("td td", 0)]],
    scope: &[("table.maintable table.maintable tr", 2), ("td td", 0)],
    item: "table.maintable",
    fields: &[Field {
        name: "id",
        locator: &[],
        rule: Rule::AttrWithoutPrefix("id", "jid:"),
    }],
};

pub static WATCH_LIST: ListSchema = ListSchema {
    entity: "watch list",
    anchors: &[&[("table.maintable", 0)]],
    scope: &[],
    item: "span.artist_name",
    fields: &[Field {
        name: "name",
        locator: &[],
        rule: Rule::Text,
    }],
};

pub static SEARCH_RESULTS: ListSchema = ListSchema {
    entity: "search",
    anchors: &[&[("div#search-results", 0)]],
    scope: &[("div#search-results", 0)],
    item: "b.t-image",
    fields: &[Field {
        name: "id",
        locator: &[],
        rule: Rule::AttrWithoutPrefix("id", "sid_"),
    }],
};

fn column(items: Vec<Extracted>, name: &str) -> Vec<String> {
    items
        .into_iter()
        .map(|item| item.text(name).unwrap_or_default())
        .collect()
}

pub fn parse_folder_page(document: &Html, url: &str) -> Result<FolderPage> {
    let items = FOLDER.extract(document, url)?;
    Ok(FolderPage {
        ids: column(items, "id"),
    })
}

pub fn parse_journal_listing(document: &Html, url: &str) -> Result<JournalListing> {
    let items = JOURNALS.extract(document, url)?;
    Ok(JournalListing {
        ids: column(items, "id"),
    })
}

pub fn parse_watch_list(document: &Html, url: &str) -> Result<WatchList> {
    let items = WATCH_LIST.extract(document, url)?;
    Ok(WatchList {
        names: column(items, "name"),
    })
}

pub fn parse_search_results(document: &Html, url: &str) -> Result<SearchResultSet> {
    let items = SEARCH_RESULTS.extract(document, url)?;
    Ok(SearchResultSet {
        ids: column(items, "id"),
    })
}
