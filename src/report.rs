use crate::models::{City, Listing, Source};
use std::collections::HashMap;
use std::fmt;

/// Summary metrics over the final result set
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total: usize,
    pub avg_price: f64,
    pub avg_rooms: f64,
    pub avg_area: f64,
    pub by_source: Vec<(Source, usize)>,
    pub by_city: Vec<(City, usize)>,
}

impl Summary {
    pub fn from_listings(listings: &[Listing]) -> Self {
        let total = listings.len();

        let (avg_price, avg_rooms, avg_area) = if total > 0 {
            let n = total as f64;
            (
                listings.iter().map(|l| l.price as f64).sum::<f64>() / n,
                listings.iter().map(|l| l.rooms as f64).sum::<f64>() / n,
                listings.iter().map(|l| l.area as f64).sum::<f64>() / n,
            )
        } else {
            (0.0, 0.0, 0.0)
        };

        let mut source_counts: HashMap<Source, usize> = HashMap::new();
        let mut city_counts: HashMap<City, usize> = HashMap::new();
        for listing in listings {
            *source_counts.entry(listing.source).or_default() += 1;
            *city_counts.entry(listing.city).or_default() += 1;
        }

        // Stable ordering for display
        let by_source = Source::all()
            .into_iter()
            .filter_map(|s| source_counts.get(&s).map(|&c| (s, c)))
            .collect();
        let by_city = City::all()
            .into_iter()
            .filter_map(|c| city_counts.get(&c).map(|&n| (c, n)))
            .collect();

        Self {
            total,
            avg_price,
            avg_rooms,
            avg_area,
            by_source,
            by_city,
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.total == 0 {
            return writeln!(
                f,
                "No apartments found matching your criteria. Try relaxing the thresholds."
            );
        }

        writeln!(f, "Total found: {}", self.total)?;
        writeln!(f, "Avg price:   €{:.0}", self.avg_price)?;
        writeln!(f, "Avg rooms:   {:.1}", self.avg_rooms)?;
        writeln!(f, "Avg area:    {:.0} m²", self.avg_area)?;

        writeln!(f, "By source:")?;
        for (source, count) in &self.by_source {
            writeln!(f, "  {source}: {count}")?;
        }
        writeln!(f, "By city:")?;
        for (city, count) in &self.by_city {
            writeln!(f, "  {city}: {count}")?;
        }
        Ok(())
    }
}

/// One listing formatted for terminal output
pub fn format_listing(index: usize, listing: &Listing) -> String {
    let mut out = format!(
        "{}. {} (€{})\n   {} rooms, {} m² — {}\n   {} | {}",
        index + 1,
        listing.title,
        listing.price,
        listing.rooms,
        listing.area,
        listing.location,
        listing.source,
        listing.city,
    );
    if let Some(per_sqm) = listing.price_per_sqm() {
        out.push_str(&format!("\n   €{per_sqm:.0}/m²"));
    }
    if !listing.link.is_empty() {
        out.push_str(&format!("\n   {}", listing.link));
    }
    out
}
