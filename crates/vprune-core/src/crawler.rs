//! Paginated crawl of a version source.

use crate::domain::{PruneError, Result, Version};
use crate::obs;
use crate::registry_traits::VersionSource;

/// Page size requested from the registry. GitHub caps `per_page` at 100.
pub const PAGE_SIZE: u32 = 100;

/// Everything a crawl collected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Crawl {
    /// Versions accepted by the filter, in listing order.
    pub matched: Vec<Version>,
    pub versions_seen: usize,
    pub pages_fetched: u32,
}

/// Walks a [`VersionSource`] page by page.
#[derive(Debug, Clone, Copy)]
pub struct Crawler {
    page_size: u32,
}

impl Default for Crawler {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}

impl Crawler {
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Fetch pages starting at 1 until one comes back short, keeping the
    /// versions `filter` accepts.
    ///
    /// A listing whose length is an exact multiple of the page size ends with
    /// one empty page. Any listing failure aborts the crawl and nothing
    /// collected so far is returned.
    pub async fn collect<S, F>(&self, source: &S, mut filter: F) -> Result<Crawl>
    where
        S: VersionSource + ?Sized,
        F: FnMut(&Version) -> bool,
    {
        let mut crawl = Crawl::default();
        let mut page = 1;

        loop {
            let versions = source
                .list_page(self.page_size, page)
                .await
                .map_err(|source| PruneError::List { page, source })?;
            let fetched = versions.len();
            crawl.pages_fetched += 1;
            crawl.versions_seen += fetched;

            let before = crawl.matched.len();
            crawl
                .matched
                .extend(versions.into_iter().filter(|v| filter(v)));
            obs::emit_page_crawled(page, fetched, crawl.matched.len() - before);

            if fetched < self.page_size as usize {
                break;
            }
            page += 1;
        }

        obs::emit_crawl_finished(crawl.pages_fetched, crawl.versions_seen, crawl.matched.len());
        Ok(crawl)
    }
}
