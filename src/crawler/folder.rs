//! Paginated folder listing

use crate::extract::{parse_folder_page, FolderKind};
use crate::fetcher::DocumentSource;
use crate::session::RequestSession;
use crate::Result;

/// Walks the pages of a user's gallery, scraps or favorites folder
pub struct FolderCrawler<'a, S: DocumentSource> {
    source: &'a S,
}

impl<'a, S: DocumentSource> FolderCrawler<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Lists submission ids across consecutive folder pages
    ///
    /// Pages are requested one at a time starting at `start_page`. The walk
    /// ends at the first page with no entries or after `max_pages` pages,
    /// whichever comes first; nothing past an empty page is requested.
    ///
    /// # Arguments
    ///
    /// * `user` - Validated user name
    /// * `kind` - Which folder to walk
    /// * `start_page` - First page, 1-based; 0 is read as 1
    /// * `max_pages` - Upper bound on pages fetched
    /// * `session` - Credentials for the requests
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<String>)` - Ids in site order, blank ids included
    /// * `Err(FaError)` - The first fetch or parse failure
    pub async fn list_folder(
        &self,
        user: &str,
        kind: FolderKind,
        start_page: u32,
        max_pages: u32,
        session: &RequestSession,
    ) -> Result<Vec<String>> {
        let mut ids = Vec::new();
        if max_pages == 0 {
            return Ok(ids);
        }

        // Page numbers saturate at u32::MAX; the walk never wraps around
        let start_page = start_page.max(1);
        let last_page = start_page.saturating_add(max_pages - 1);

        for page in start_page..=last_page {
            let fetched = self.source.fetch(&kind.path(user, page), session).await?;
            let folder = fetched.parse(parse_folder_page)?;

            tracing::debug!(
                "{} page {} of {}: {} entries",
                kind,
                page,
                user,
                folder.len()
            );

            if folder.is_empty() {
                break;
            }
            ids.extend(folder.ids);
        }

        Ok(ids)
    }
}
