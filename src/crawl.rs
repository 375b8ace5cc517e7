use crate::dedup::SeenSet;
use crate::models::Listing;
use crate::page_source::PageSource;
use crate::sink::ListingSink;
use crate::store::IdStore;
use anyhow::Result;
use chrono::NaiveDate;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct CrawlOptions {
    /// Pages visited per run. Every page up to this count is fetched, even
    /// when earlier pages come back empty.
    pub max_pages: usize,
    /// Store key holding the persisted seen-id list.
    pub store_key: String,
    /// Detail-page URL template with an `{id}` placeholder.
    pub detail_url_template: String,
    /// Pause between page fetches, to be respectful to the server.
    pub page_delay: Duration,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            max_pages: 5,
            store_key: "ids".to_string(),
            detail_url_template: "https://www.richlife.hu/ingatlan/{id}".to_string(),
            page_delay: Duration::from_millis(500),
        }
    }
}

#[derive(Debug, Default)]
pub struct CrawlSummary {
    pub pages_crawled: usize,
    pub failed_pages: usize,
    pub new_listings: usize,
    pub failed_records: usize,
    pub known_ids: usize,
}

/// Runs one incremental crawl: for each page, fetch the id batch, diff it
/// against the seen-set, append the new listings to the sink, then persist
/// the updated set so a crash mid-run does not re-deliver flushed ids.
///
/// A failed page fetch, a failed record write, or a failed persist is
/// logged and the run carries on; none of them aborts the remaining work.
pub fn run_crawl(
    source: &dyn PageSource,
    store: &dyn IdStore,
    sink: &mut dyn ListingSink,
    options: &CrawlOptions,
    first_seen: NaiveDate,
) -> Result<CrawlSummary> {
    let mut seen = SeenSet::load(store, &options.store_key);
    println!("Loaded {} known listing ids", seen.len());

    let mut summary = CrawlSummary::default();

    for page in 1..=options.max_pages {
        if page > 1 && !options.page_delay.is_zero() {
            std::thread::sleep(options.page_delay);
        }

        let batch = match source.fetch_page(page) {
            Ok(batch) => batch,
            Err(e) => {
                eprintln!("Error fetching page {}: {}", page, e);
                summary.failed_pages += 1;
                continue;
            }
        };

        let new_ids = seen.process_page(&batch);
        for id in &new_ids {
            let listing = Listing::new(id, &options.detail_url_template, first_seen);
            match sink.push(&listing) {
                Ok(()) => summary.new_listings += 1,
                Err(e) => {
                    eprintln!("Error writing listing {}: {}", id, e);
                    summary.failed_records += 1;
                }
            }
        }

        if let Err(e) = seen.persist(store, &options.store_key) {
            eprintln!("Error persisting seen ids after page {}: {}", page, e);
        }

        println!("Page {}: {} new listings found", page, new_ids.len());
        summary.pages_crawled += 1;
    }

    summary.known_ids = seen.len();
    Ok(summary)
}
