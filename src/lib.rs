pub mod crawl;
pub mod debug;
pub mod dedup;
pub mod models;
pub mod page_source;
pub mod sink;
pub mod store;
