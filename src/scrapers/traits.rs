use crate::models::{City, Listing, Source};
use anyhow::Result;
use async_trait::async_trait;

/// Common trait for all listing-site scrapers
/// This allows easy addition of new sources (Immowelt, eBay, etc) in the future
#[async_trait]
pub trait SiteScraper: Send + Sync {
    /// Scrape listings for one city, already filtered by the search criteria
    async fn scrape(&self, city: City) -> Result<Vec<Listing>>;

    /// The site this scraper covers
    fn source(&self) -> Source;
}
