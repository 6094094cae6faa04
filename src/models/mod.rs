use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cities covered by the search
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ValueEnum)]
pub enum City {
    #[serde(rename = "München")]
    Munich,
    Augsburg,
}

impl City {
    /// Human-readable city name as shown on the listing sites
    pub fn name(&self) -> &'static str {
        match self {
            City::Munich => "München",
            City::Augsburg => "Augsburg",
        }
    }

    /// Lowercase slug with umlauts transliterated, used in search URLs
    pub fn slug(&self) -> &'static str {
        match self {
            City::Munich => "munchen",
            City::Augsburg => "augsburg",
        }
    }

    pub fn all() -> Vec<City> {
        vec![City::Munich, City::Augsburg]
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classifieds site a listing was scraped from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ValueEnum)]
pub enum Source {
    #[serde(rename = "ImmoScout24")]
    #[value(name = "immoscout24")]
    ImmoScout24,
    Immonet,
    Kleinanzeigen,
}

impl Source {
    pub fn name(&self) -> &'static str {
        match self {
            Source::ImmoScout24 => "ImmoScout24",
            Source::Immonet => "Immonet",
            Source::Kleinanzeigen => "Kleinanzeigen",
        }
    }

    pub fn all() -> Vec<Source> {
        vec![Source::ImmoScout24, Source::Immonet, Source::Kleinanzeigen]
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One scraped real-estate offer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub title: String,
    /// Asking price in EUR; 0 means extraction failed
    pub price: i64,
    pub rooms: f32,
    /// Living area in m²; 0 means extraction failed
    pub area: i32,
    pub location: String,
    pub city: City,
    pub source: Source,
    pub link: String,
    pub scraped_at: DateTime<Utc>,
}

impl Listing {
    /// Price per square meter, when the area is known
    pub fn price_per_sqm(&self) -> Option<f64> {
        if self.area > 0 {
            Some(self.price as f64 / self.area as f64)
        } else {
            None
        }
    }
}

/// Thresholds a listing has to meet to be kept
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SearchCriteria {
    /// Maximum price (EUR)
    pub max_price: i64,
    /// Minimum number of rooms
    pub min_rooms: f32,
    /// Minimum living area (m²)
    pub min_area: i32,
}

impl SearchCriteria {
    /// Listings with a zero price are extraction failures and never accepted.
    pub fn accepts(&self, listing: &Listing) -> bool {
        listing.price > 0
            && listing.price <= self.max_price
            && listing.rooms >= self.min_rooms
            && listing.area >= self.min_area
    }
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            max_price: 750_000,
            min_rooms: 3.0,
            min_area: 80,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(price: i64, rooms: f32, area: i32) -> Listing {
        Listing {
            title: "Helle 3-Zimmer-Wohnung".to_string(),
            price,
            rooms,
            area,
            location: "Schwabing".to_string(),
            city: City::Munich,
            source: Source::ImmoScout24,
            link: String::new(),
            scraped_at: Utc::now(),
        }
    }

    #[test]
    fn criteria_accepts_listing_within_thresholds() {
        let criteria = SearchCriteria::default();
        assert!(criteria.accepts(&listing(700_000, 3.0, 85)));
    }

    #[test]
    fn criteria_rejects_zero_price() {
        let criteria = SearchCriteria::default();
        assert!(!criteria.accepts(&listing(0, 4.0, 100)));
    }

    #[test]
    fn criteria_rejects_over_budget() {
        let criteria = SearchCriteria::default();
        assert!(!criteria.accepts(&listing(800_000, 3.0, 85)));
    }

    #[test]
    fn criteria_rejects_too_few_rooms_or_too_small() {
        let criteria = SearchCriteria::default();
        assert!(!criteria.accepts(&listing(500_000, 2.5, 85)));
        assert!(!criteria.accepts(&listing(500_000, 3.0, 79)));
    }

    #[test]
    fn half_rooms_compare_against_threshold() {
        let criteria = SearchCriteria {
            min_rooms: 3.5,
            ..Default::default()
        };
        assert!(criteria.accepts(&listing(500_000, 3.5, 90)));
        assert!(!criteria.accepts(&listing(500_000, 3.0, 90)));
    }

    #[test]
    fn price_per_sqm_needs_known_area() {
        assert_eq!(listing(500_000, 3.0, 100).price_per_sqm(), Some(5_000.0));
        assert_eq!(listing(500_000, 3.0, 0).price_per_sqm(), None);
    }

    #[test]
    fn city_slugs_are_ascii() {
        assert_eq!(City::Munich.slug(), "munchen");
        assert_eq!(City::Augsburg.slug(), "augsburg");
        assert_eq!(City::Munich.name(), "München");
    }
}
