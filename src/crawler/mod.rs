//! Folder crawling
//!
//! Galleries, scraps and favorites are split across numbered pages with no
//! total count; the only end marker is a page without entries.

mod folder;

pub use folder::FolderCrawler;
