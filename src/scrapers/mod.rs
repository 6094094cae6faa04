pub mod immonet;
pub mod immoscout;
pub mod kleinanzeigen;
pub mod synthetic;
pub mod traits;

pub use immonet::ImmonetScraper;
pub use immoscout::ImmoScoutScraper;
pub use kleinanzeigen::KleinanzeigenScraper;
pub use traits::SiteScraper;

use anyhow::{anyhow, Result};
use scraper::{ElementRef, Selector};
use std::time::Duration;

/// Desktop browser user agent; the sites serve a degraded or blocked page to
/// obvious bot agents.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Pause between consecutive page fetches
pub const REQUEST_PACING: Duration = Duration::from_secs(1);

/// Compile a CSS selector, surfacing the pattern in the error
pub(crate) fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("Invalid selector {css}: {e}"))
}

/// Concatenated text content of an element, whitespace-trimmed
pub(crate) fn element_text(element: &ElementRef) -> String {
    element.text().collect::<Vec<_>>().join(" ").trim().to_string()
}

/// Resolve a possibly relative href against the site base URL
pub(crate) fn absolute_url(base: &str, href: &str) -> String {
    if href.starts_with("http") {
        return href.to_string();
    }
    match reqwest::Url::parse(base).and_then(|b| b.join(href)) {
        Ok(url) => url.to_string(),
        Err(_) => String::new(),
    }
}
