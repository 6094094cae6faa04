// Parser tests against representative result-page markup for each site.

use immo_finder::models::{City, SearchCriteria, Source};
use immo_finder::scrapers::{ImmoScoutScraper, ImmonetScraper, KleinanzeigenScraper};

const IMMOSCOUT_PAGE: &str = r#"
<html><body>
  <div class="result-list-entry">
    <h2>Helle 3-Zimmer-Wohnung in Schwabing</h2>
    <dl>
      <dd class="grid-item">549.000 €</dd>
      <dd class="grid-item">3 Zimmer</dd>
      <dd class="grid-item">92 m²</dd>
    </dl>
    <div class="result-list-entry__address">Schwabing-West, München</div>
    <a href="/expose/123456">Details</a>
  </div>
  <div class="result-list-entry">
    <h2>Penthouse am Englischen Garten</h2>
    <dl>
      <dd class="grid-item">1.250.000 €</dd>
      <dd class="grid-item">4 Zimmer</dd>
      <dd class="grid-item">140 m²</dd>
    </dl>
    <div class="result-list-entry__address">Lehel, München</div>
    <a href="/expose/777777">Details</a>
  </div>
</body></html>
"#;

#[test]
fn immoscout_parses_listing_fields() {
    let scraper = ImmoScoutScraper::new(SearchCriteria::default()).unwrap();
    let listings = scraper.parse_page(IMMOSCOUT_PAGE, City::Munich);

    // The penthouse is over budget and filtered out
    assert_eq!(listings.len(), 1);

    let listing = &listings[0];
    assert_eq!(listing.title, "Helle 3-Zimmer-Wohnung in Schwabing");
    assert_eq!(listing.price, 549_000);
    assert_eq!(listing.rooms, 3.0);
    assert_eq!(listing.area, 92);
    assert_eq!(listing.location, "Schwabing-West, München");
    assert_eq!(listing.city, City::Munich);
    assert_eq!(listing.source, Source::ImmoScout24);
    assert_eq!(listing.link, "https://www.immobilienscout24.de/expose/123456");
}

#[test]
fn immoscout_relaxed_budget_keeps_both() {
    let criteria = SearchCriteria {
        max_price: 2_000_000,
        ..Default::default()
    };
    let scraper = ImmoScoutScraper::new(criteria).unwrap();
    let listings = scraper.parse_page(IMMOSCOUT_PAGE, City::Munich);
    assert_eq!(listings.len(), 2);
    assert_eq!(listings[1].price, 1_250_000);
}

#[test]
fn immoscout_empty_page_yields_nothing() {
    let scraper = ImmoScoutScraper::new(SearchCriteria::default()).unwrap();
    assert!(scraper.parse_page("<html><body></body></html>", City::Munich).is_empty());
}

const IMMONET_PAGE: &str = r#"
<html><body>
  <div class="item">
    <h3>4-Zimmer-Wohnung mit Balkon</h3>
    <div class="price-primary">619.000 €</div>
    <div class="text-100">4 Zimmer</div>
    <div class="text-100">108 m²</div>
    <a href="/angebot/98765">Zum Angebot</a>
  </div>
</body></html>
"#;

#[test]
fn immonet_parses_listing_fields() {
    let scraper = ImmonetScraper::new(SearchCriteria::default()).unwrap();
    let listings = scraper.parse_page(IMMONET_PAGE, City::Munich);

    assert_eq!(listings.len(), 1);
    let listing = &listings[0];
    assert_eq!(listing.title, "4-Zimmer-Wohnung mit Balkon");
    assert_eq!(listing.price, 619_000);
    assert_eq!(listing.rooms, 4.0);
    assert_eq!(listing.area, 108);
    assert_eq!(listing.source, Source::Immonet);
    assert_eq!(listing.link, "https://www.immonet.de/angebot/98765");
}

#[test]
fn immonet_article_markup_is_accepted() {
    // Some result pages render hits as <article class="item">
    let page = IMMONET_PAGE.replace("div class=\"item\"", "article class=\"item\"");
    let scraper = ImmonetScraper::new(SearchCriteria::default()).unwrap();
    let listings = scraper.parse_page(&page, City::Augsburg);
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].city, City::Augsburg);
}

#[test]
fn immonet_drops_listing_without_price() {
    let page = r#"
    <div class="item">
      <h3>Wohnung, Preis auf Anfrage</h3>
      <div class="price-primary">Preis auf Anfrage</div>
      <div class="text-100">3 Zimmer</div>
      <div class="text-100">95 m²</div>
    </div>
    "#;
    let scraper = ImmonetScraper::new(SearchCriteria::default()).unwrap();
    assert!(scraper.parse_page(page, City::Munich).is_empty());
}

const KLEINANZEIGEN_PAGE: &str = r#"
<html><body>
  <article class="aditem">
    <div class="aditem-main--top--left">81667 München Haidhausen</div>
    <h2>Großzügige Wohnung in Haidhausen</h2>
    <p>Schöne 3,5 Zimmer Wohnung mit 95 m² und Balkon</p>
    <strong>498.000 €</strong>
    <a href="/s-anzeige/wohnung-haidhausen/222">Anzeige</a>
  </article>
</body></html>
"#;

#[test]
fn kleinanzeigen_mines_rooms_and_area_from_description() {
    let scraper = KleinanzeigenScraper::new(SearchCriteria::default()).unwrap();
    let listings = scraper.parse_page(KLEINANZEIGEN_PAGE, City::Munich);

    assert_eq!(listings.len(), 1);
    let listing = &listings[0];
    assert_eq!(listing.title, "Großzügige Wohnung in Haidhausen");
    assert_eq!(listing.price, 498_000);
    assert_eq!(listing.rooms, 3.5);
    assert_eq!(listing.area, 95);
    assert_eq!(listing.location, "81667 München Haidhausen");
    assert_eq!(
        listing.link,
        "https://www.ebay-kleinanzeigen.de/s-anzeige/wohnung-haidhausen/222"
    );
}

#[test]
fn kleinanzeigen_fallback_markup_and_title_mining() {
    // Older list markup: no <article>, price in a span, details only in the
    // link title
    let page = r#"
    <div class="ad-listitem">
      <a class="ellipsis" href="/s-anzeige/augsburg/333">3 Zimmer Wohnung, 84 qm, ruhige Lage</a>
      <span class="aditem-main--middle--price-shipping--price">425.000 €</span>
    </div>
    "#;
    let scraper = KleinanzeigenScraper::new(SearchCriteria::default()).unwrap();
    let listings = scraper.parse_page(page, City::Augsburg);

    assert_eq!(listings.len(), 1);
    let listing = &listings[0];
    assert_eq!(listing.price, 425_000);
    assert_eq!(listing.rooms, 3.0);
    assert_eq!(listing.area, 84);
    // No location element: falls back to the city name
    assert_eq!(listing.location, "Augsburg");
}

#[test]
fn kleinanzeigen_rejects_too_small_ads() {
    let page = r#"
    <article class="aditem">
      <h2>1 Zimmer Apartment</h2>
      <p>Kompaktes 1 Zimmer Apartment mit 32 m²</p>
      <strong>199.000 €</strong>
      <a href="/s-anzeige/klein/444">Anzeige</a>
    </article>
    "#;
    let scraper = KleinanzeigenScraper::new(SearchCriteria::default()).unwrap();
    assert!(scraper.parse_page(page, City::Munich).is_empty());
}
