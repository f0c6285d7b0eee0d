//! Entity extraction from validated pages
//!
//! Every entity is a static schema (see `schema`) plus a small function
//! assembling the typed record from the extracted fields. Parsers expect a
//! document that already passed `fetcher::classify`; use `FetchedPage::parse`
//! to get both steps in order.

pub mod labels;
pub mod schema;

mod journal;
mod listing;
mod profile;
mod shouts;
mod submission;

#[cfg(test)]
pub(crate) mod fixtures;

pub use journal::{parse_journal, Journal, JOURNAL};
pub use listing::{
    parse_folder_page, parse_journal_listing, parse_search_results, parse_watch_list, FolderKind,
    FolderPage, JournalListing, SearchResultSet, WatchDirection, WatchList, FOLDER, JOURNALS,
    SEARCH_RESULTS, WATCH_LIST,
};
pub use profile::{parse_profile, Profile, PROFILE};
pub use shouts::{parse_shouts, Shout, SHOUTS};
pub use submission::{parse_submission, Submission, SUBMISSION};
