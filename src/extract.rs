use regex::Regex;

/// Best-effort numeric field extraction from listing text.
///
/// Listing sites render prices as "450.000 €", rooms as "3,5 Zimmer" or
/// "3 Zi.", areas as "85 m²" or "85qm", and free-text descriptions mix all
/// of them. Each extractor tries an ordered list of patterns and takes the
/// first match; when nothing matches the zero sentinel is returned and the
/// listing is dropped later by the criteria filter.
pub struct FieldExtractor {
    number: Regex,
    room_patterns: Vec<Regex>,
    area_patterns: Vec<Regex>,
}

impl FieldExtractor {
    pub fn new() -> Self {
        Self {
            number: Regex::new(r"\d[\d.,]*").unwrap(),
            room_patterns: vec![
                Regex::new(r"(\d+(?:[,.]\d+)?)\s*(?:zimmer|zi\b)").unwrap(),
                Regex::new(r"(\d+(?:[,.]\d+)?)\s*z\b").unwrap(),
                Regex::new(r"(\d+(?:[,.]\d+)?)\s*room").unwrap(),
            ],
            area_patterns: vec![
                Regex::new(r"(\d+(?:[,.]\d+)?)\s*(?:m²|qm|quadrat)").unwrap(),
                Regex::new(r"(\d+(?:[,.]\d+)?)\s*m2").unwrap(),
            ],
        }
    }

    /// Parse a euro amount out of text like "449.000 €" or "ab 450.000,50 EUR".
    ///
    /// German number formatting: dots are thousands separators, the comma is
    /// the decimal point. Returns 0 when no number is present.
    pub fn euro_amount(&self, text: &str) -> i64 {
        let normalized = text.replace('.', "").replace(',', ".");
        self.number
            .find(&normalized)
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .map(|value| value as i64)
            .unwrap_or(0)
    }

    /// Parse a decimal count out of text like "3,5 Zimmer". Returns 0.0 when
    /// no number is present.
    pub fn decimal(&self, text: &str) -> f32 {
        self.number
            .find(text)
            .and_then(|m| m.as_str().replace(',', ".").parse::<f32>().ok())
            .unwrap_or(0.0)
    }

    /// Find a room count in free text ("3 Zimmer", "3,5 Zi.", "4 rooms").
    pub fn rooms_in(&self, text: &str) -> f32 {
        let text = text.to_lowercase();
        for pattern in &self.room_patterns {
            if let Some(caps) = pattern.captures(&text) {
                if let Ok(rooms) = caps[1].replace(',', ".").parse::<f32>() {
                    return rooms;
                }
            }
        }
        0.0
    }

    /// Find a living area in free text ("85 m²", "85qm", "85 m2").
    pub fn area_in(&self, text: &str) -> i32 {
        let text = text.to_lowercase();
        for pattern in &self.area_patterns {
            if let Some(caps) = pattern.captures(&text) {
                if let Ok(area) = caps[1].replace(',', ".").parse::<f64>() {
                    return area as i32;
                }
            }
        }
        0
    }
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}
