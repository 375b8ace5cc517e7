use anyhow::Result;
use chrono::Local;
use clap::Parser;
use richwatch::crawl::{run_crawl, CrawlOptions};
use richwatch::page_source::RichlifeSource;
use richwatch::sink::CsvSink;
use richwatch::store::FileStore;

const DEFAULT_BASE_URL: &str = "https://www.richlife.hu/lista/ingatlan?currency=ft&order=date&page=";
const DEFAULT_DETAIL_URL: &str = "https://www.richlife.hu/ingatlan/{id}";

#[derive(Parser, Debug)]
#[clap(author, version, about = "Richwatch - incremental listing watcher for richlife.hu")]
struct Args {
    /// Path to output CSV file
    #[clap(short, long, default_value = "listings.csv")]
    output: String,

    /// Directory holding the persisted id store
    #[clap(short, long, default_value = "richwatch-store")]
    store_dir: String,

    /// Store key the seen listing ids are saved under
    #[clap(long, default_value = "ids")]
    store_key: String,

    /// Listing index URL prefix; the page number is appended
    #[clap(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Detail-page URL template, {id} is replaced per listing
    #[clap(long, default_value = DEFAULT_DETAIL_URL)]
    detail_url: String,

    /// Results requested per index page
    #[clap(long, default_value = "100")]
    page_size: usize,

    /// Maximum number of pages to crawl
    #[clap(short, long, default_value = "5")]
    max_pages: usize,

    /// Enable debug output
    #[clap(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    richwatch::debug::set_verbose(args.debug);

    println!("Richwatch - Listing Watcher for richlife.hu");
    println!("===========================================");

    let source = RichlifeSource::new(args.base_url, args.page_size);
    let store = FileStore::open(&args.store_dir)?;
    let mut sink = CsvSink::open(&args.output)?;

    let options = CrawlOptions {
        max_pages: args.max_pages,
        store_key: args.store_key,
        detail_url_template: args.detail_url,
        ..Default::default()
    };

    let today = Local::now().date_naive();
    let summary = run_crawl(&source, &store, &mut sink, &options, today)?;
    sink.flush()?;

    println!("\n=== Summary ===");
    println!("Pages crawled: {} ({} failed)", summary.pages_crawled, summary.failed_pages);
    println!("New listings: {}", summary.new_listings);
    if summary.failed_records > 0 {
        println!("Records that failed to write: {}", summary.failed_records);
    }
    println!("Total known listing ids: {}", summary.known_ids);
    println!("Saved to: {}", args.output);

    Ok(())
}
