use std::collections::{BTreeSet, HashSet};
use std::sync::OnceLock;

use regex::Regex;

use crate::core::model::ContentSummary;

/// Plausible vehicle prices; rejects page numbers, percentages and VAT rates.
pub const MIN_PRICE: u32 = 10_000;
pub const MAX_PRICE: u32 = 150_000;
pub const MAX_VARIANTS: usize = 5;

const AMOUNT: &str = r"\b(\d{1,3}(?:[ .\x{A0}\x{202F}]\d{3})+|\d{4,6})(?:,\d{1,2}|,-)?";

fn vat_exclusive_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(&format!(r"(?i){AMOUNT}\s*(?:€|EUR)?\s*bez\s*DPH")).unwrap())
}

fn currency_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(&format!(r"(?i){AMOUNT}\s*(?:€|EUR)")).unwrap())
}

fn vat_inclusive_tail_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^\s*(?:s|vr\.|vrátane|vč\.|včetně)\s*DPH").unwrap())
}

fn variant_family_res() -> &'static [Regex; 4] {
    static RES: OnceLock<[Regex; 4]> = OnceLock::new();
    RES.get_or_init(|| {
        [
            // trim levels
            Regex::new(
                r"(?i)\b(Trendline|Comfortline|Highline|Life|Style|Business|Energy|Momentum|Exclusive|Titanium|Trend|Sport|Active|Allure|Shine|Feel|Elegance|Innovation|Family|Beach|Coast|Ocean)\b",
            )
            .unwrap(),
            // special editions
            Regex::new(r"(?i)\b((?:\p{L}+\s+)?Edition(?:\s+\d{1,3})?|Outdoor|Adventure|Panamericana|Cruise)\b")
                .unwrap(),
            // body and seating configurations
            Regex::new(
                r"(?i)\b(\d{1,2}[\s-]?(?:miestn\w*|místn\w*|sedadl\w*|seats?|seater)|Kombi|Combi|Furgon|Skriňa|Skříň|Panel\s+Van|Crew\s+Cab|Double\s+Cab|Dvojkabína|Podvozok|Chassis|Van)\b",
            )
            .unwrap(),
            // length codes
            Regex::new(
                r"(?i)\b(L[1-4]H[1-3]|L[1-4]|Compact|Standard|Extra\s+Long|Long|XL|XS|krátk\w*\s+rázvor\w*|dlh\w*\s+rázvor\w*)\b",
            )
            .unwrap(),
        ]
    })
}

fn parse_amount(raw: &str) -> Option<u32> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

/// Currency amounts that look like vehicle prices, ascending and unique.
///
/// An amount counts when it is followed by "bez DPH" (VAT excluded) or by a
/// euro sign that is not directly followed by a VAT-included marker.
pub fn extract_prices(text: &str) -> Vec<u32> {
    let mut found = BTreeSet::new();

    for caps in vat_exclusive_re().captures_iter(text) {
        found.extend(parse_amount(&caps[1]));
    }

    for caps in currency_re().captures_iter(text) {
        let end = caps.get(0).map(|m| m.end()).unwrap_or_default();
        if vat_inclusive_tail_re().is_match(&text[end..]) {
            continue;
        }
        found.extend(parse_amount(&caps[1]));
    }

    found
        .into_iter()
        .filter(|price| (MIN_PRICE..=MAX_PRICE).contains(price))
        .collect()
}

/// Trim, edition, body and length keywords in family order, first seen wins.
pub fn extract_variants(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut variants = Vec::new();

    for re in variant_family_res() {
        for caps in re.captures_iter(text) {
            let keyword = caps[1].split_whitespace().collect::<Vec<_>>().join(" ");
            if seen.insert(keyword.to_lowercase()) {
                variants.push(keyword);
            }
            if variants.len() == MAX_VARIANTS {
                return variants;
            }
        }
    }

    variants
}

pub fn summarize_text(text: &str) -> ContentSummary {
    ContentSummary {
        prices: extract_prices(text),
        variants_detected: extract_variants(text),
    }
}
