use crate::models::Listing;
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;

/// Append-only output for discovered listings, one record per push.
pub trait ListingSink {
    fn push(&mut self, listing: &Listing) -> Result<()>;
}

/// CSV sink appending to the output file, writing the header only when the
/// file is new or empty.
pub struct CsvSink {
    writer: csv::Writer<std::fs::File>,
}

impl CsvSink {
    pub fn open(output_path: &str) -> Result<Self> {
        let path = Path::new(output_path);
        let has_records = path.exists()
            && path.metadata().map(|m| m.len() > 0).unwrap_or(false);

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .context(format!("Failed to open output file: {}", output_path))?;

        let writer = csv::WriterBuilder::new()
            .has_headers(!has_records)
            .from_writer(file);

        Ok(CsvSink { writer })
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().context("Failed to flush output file")?;
        Ok(())
    }
}

impl ListingSink for CsvSink {
    fn push(&mut self, listing: &Listing) -> Result<()> {
        self.writer
            .serialize(listing)
            .context(format!("Failed to write listing {}", listing.id))?;
        Ok(())
    }
}

/// In-memory sink used by tests.
#[derive(Default)]
pub struct VecSink {
    pub listings: Vec<Listing>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ListingSink for VecSink {
    fn push(&mut self, listing: &Listing) -> Result<()> {
        self.listings.push(listing.clone());
        Ok(())
    }
}
