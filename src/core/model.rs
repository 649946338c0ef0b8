use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Make {
    Volkswagen,
    Ford,
    Opel,
    Peugeot,
    Toyota,
    #[serde(rename = "Citroën")]
    Citroen,
    Unknown,
}

impl Make {
    pub fn label(&self) -> &'static str {
        match self {
            Make::Volkswagen => "Volkswagen",
            Make::Ford => "Ford",
            Make::Opel => "Opel",
            Make::Peugeot => "Peugeot",
            Make::Toyota => "Toyota",
            Make::Citroen => "Citroën",
            Make::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Make {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything that can be learned about a price list from its filename alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenameMetadata {
    pub filename: String,
    pub basename: String,
    pub make: Make,
    pub model: String,
    pub variant: Option<String>,
    pub model_year: Option<String>,
    pub validity_date: Option<String>,
}

/// Figures pulled out of the document text. Empty when no text was available.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentSummary {
    pub prices: Vec<u32>,
    pub variants_detected: Vec<String>,
}

impl ContentSummary {
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty() && self.variants_detected.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceListRecord {
    pub filename: String,
    pub basename: String,
    pub make: Make,
    pub model: String,
    pub variant: Option<String>,
    pub model_year: Option<String>,
    pub validity_date: Option<String>,
    pub prices: Vec<u32>,
    pub variants_detected: Vec<String>,
    pub base_price: Option<u32>,
    pub price_range: Option<String>,
}

impl PriceListRecord {
    pub fn new(meta: FilenameMetadata, content: ContentSummary) -> Self {
        let base_price = content.prices.iter().copied().min();
        let price_range = format_price_range(&content.prices);
        Self {
            filename: meta.filename,
            basename: meta.basename,
            make: meta.make,
            model: meta.model,
            variant: meta.variant,
            model_year: meta.model_year,
            validity_date: meta.validity_date,
            prices: content.prices,
            variants_detected: content.variants_detected,
            base_price,
            price_range,
        }
    }

    /// Descending sort key; missing values fall below any real date or year.
    pub fn sort_key(&self) -> (&str, &str) {
        (
            self.validity_date.as_deref().unwrap_or("0000-00-00"),
            self.model_year.as_deref().unwrap_or("0000"),
        )
    }
}

/// Formats an amount with a comma thousands separator, e.g. `25,600`.
pub fn format_amount(amount: u32) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn format_price_range(prices: &[u32]) -> Option<String> {
    let min = prices.iter().copied().min()?;
    let max = prices.iter().copied().max()?;
    if prices.len() >= 2 {
        Some(format!("{} - {} €", format_amount(min), format_amount(max)))
    } else {
        Some(format!("{} €", format_amount(min)))
    }
}
