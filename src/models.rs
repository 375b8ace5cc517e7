use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One discovered listing, as appended to the output dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    pub url: String,
    pub first_seen: NaiveDate,
}

impl Listing {
    /// Builds a listing record from an id, deriving the detail-page URL
    /// from the configured template (`{id}` placeholder).
    pub fn new(id: &str, detail_url_template: &str, first_seen: NaiveDate) -> Self {
        Listing {
            id: id.to_string(),
            url: detail_url_template.replace("{id}", id),
            first_seen,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_derived_from_template() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 28).unwrap();
        let listing = Listing::new("12345", "https://www.richlife.hu/ingatlan/{id}", date);

        assert_eq!(listing.id, "12345");
        assert_eq!(listing.url, "https://www.richlife.hu/ingatlan/12345");
        assert_eq!(listing.first_seen, date);
    }
}
