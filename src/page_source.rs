use crate::verbose_println;
use anyhow::{Context, Result};
use regex::Regex;
use scraper::{Html, Selector};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Yields one page's worth of listing ids for a page index.
pub trait PageSource {
    fn fetch_page(&self, page: usize) -> Result<Vec<String>>;
}

/// Fetches richlife.hu index pages and extracts listing ids from the
/// detail-page anchors (`/ingatlan/<id>`).
pub struct RichlifeSource {
    client: reqwest::blocking::Client,
    base_url: String,
    results_per_page: usize,
}

impl RichlifeSource {
    pub fn new(base_url: String, results_per_page: usize) -> Self {
        RichlifeSource {
            client: reqwest::blocking::Client::new(),
            base_url,
            results_per_page,
        }
    }

    fn page_url(&self, page: usize) -> String {
        format!("{}{}&result_per_page={}", self.base_url, page, self.results_per_page)
    }
}

impl PageSource for RichlifeSource {
    fn fetch_page(&self, page: usize) -> Result<Vec<String>> {
        let url = self.page_url(page);
        verbose_println!("Fetching listing page: {}", url);

        let response = self
            .client
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .send()
            .context(format!("Failed to fetch listing page: {}", url))?;

        let body = response.text().context("Failed to read response body")?;
        let ids = extract_listing_ids(&body);

        verbose_println!("Found {} listing ids on page {}", ids.len(), page);
        Ok(ids)
    }
}

/// Extracts listing ids from detail-page anchors, in document order.
/// Duplicate anchors to the same listing are kept; deduplication is the
/// seen-set's job.
pub fn extract_listing_ids(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let link_selector = Selector::parse(r#"a[href*="/ingatlan/"]"#).unwrap();
    let id_pattern = Regex::new(r"/ingatlan/(\d+)").unwrap();

    let mut ids = Vec::new();
    for element in document.select(&link_selector) {
        if let Some(href) = element.value().attr("href") {
            if let Some(captures) = id_pattern.captures(href) {
                ids.push(captures[1].to_string());
            }
        }
    }
    ids
}
