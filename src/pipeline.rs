use crate::models::{City, Listing, SearchCriteria, Source};
use crate::scrapers::{
    synthetic, ImmoScoutScraper, ImmonetScraper, KleinanzeigenScraper, SiteScraper,
};
use anyhow::Result;
use std::collections::HashSet;
use tracing::{info, warn};

fn build_scraper(source: Source, criteria: SearchCriteria) -> Result<Box<dyn SiteScraper>> {
    Ok(match source {
        Source::ImmoScout24 => Box::new(ImmoScoutScraper::new(criteria)?),
        Source::Immonet => Box::new(ImmonetScraper::new(criteria)?),
        Source::Kleinanzeigen => Box::new(KleinanzeigenScraper::new(criteria)?),
    })
}

/// Run the scrape sequentially over every selected city and source.
///
/// A failing source logs a warning and the search continues with partial
/// results. The combined result is deduplicated before it is returned.
pub async fn run_search(
    cities: &[City],
    sources: &[Source],
    criteria: SearchCriteria,
    offline: bool,
) -> Result<Vec<Listing>> {
    let mut all_listings = Vec::new();

    if offline {
        info!("Offline mode: generating sample listings");
        for &city in cities {
            for &source in sources {
                all_listings.extend(synthetic::sample_listings(city, source, &criteria));
            }
        }
        return Ok(dedup_by_title_and_price(all_listings));
    }

    for &source in sources {
        let scraper = build_scraper(source, criteria)?;

        for &city in cities {
            info!("Scraping {} for {}", source, city);

            match scraper.scrape(city).await {
                Ok(listings) => {
                    info!("Found {} listings on {} for {}", listings.len(), source, city);
                    all_listings.extend(listings);
                }
                Err(e) => {
                    warn!("Scraping {} for {} failed: {e:#}", source, city);
                }
            }
        }
    }

    Ok(dedup_by_title_and_price(all_listings))
}

/// Drop repeated offers, keeping the first occurrence of each
/// (title, price) pair. Sites list the same object on several result pages.
pub fn dedup_by_title_and_price(listings: Vec<Listing>) -> Vec<Listing> {
    let mut seen = HashSet::new();
    listings
        .into_iter()
        .filter(|listing| seen.insert((listing.title.clone(), listing.price)))
        .collect()
}
