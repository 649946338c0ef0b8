pub mod html_export;
pub mod json_export;
pub mod shell_export;

use anyhow::Result;
use chrono::NaiveDate;

use crate::core::catalog::Catalog;

pub use html_export::HtmlExporter;
pub use json_export::JsonExporter;
pub use shell_export::ShellExporter;

pub const HTML_FILE: &str = "index.html";
pub const JSON_FILE: &str = "price_lists.json";
pub const SHELL_FILE: &str = "index_dynamic.html";

pub trait Exporter {
    fn export(&self, catalog: &Catalog) -> Result<()>;
}

/// A small label shown next to a price list link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub class: &'static str,
    pub text: String,
}

/// Badges in display order: price, model year, variant, validity date.
pub fn badges(
    price_range: Option<&str>,
    model_year: Option<&str>,
    variant: Option<&str>,
    validity_date: Option<&str>,
) -> Vec<Badge> {
    let mut out = Vec::new();
    if let Some(range) = price_range {
        out.push(Badge {
            class: "price",
            text: range.to_string(),
        });
    }
    if let Some(year) = model_year {
        out.push(Badge {
            class: "year",
            text: format!("MY {year}"),
        });
    }
    if let Some(variant) = variant {
        out.push(Badge {
            class: "variant",
            text: variant.to_string(),
        });
    }
    if let Some(date) = validity_date {
        let text = match format_validity_date(date) {
            Some(formatted) => format!("Valid from {formatted}"),
            None => date.to_string(),
        };
        out.push(Badge { class: "date", text });
    }
    out
}

/// `YYYY-MM-DD` as `DD.MM.YYYY`; None when the string is not a calendar date.
pub fn format_validity_date(date: &str) -> Option<String> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .map(|d| d.format("%d.%m.%Y").to_string())
}

/// Link to a price list from the output folder. Absolute filenames lie
/// outside the report root and are linked as they are.
pub fn link_target(link_prefix: &str, filename: &str) -> String {
    if filename.starts_with('/') {
        filename.to_string()
    } else {
        format!("{link_prefix}{filename}")
    }
}

pub(crate) const STYLE: &str = r#"
* { margin: 0; padding: 0; box-sizing: border-box; }
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif; line-height: 1.6; color: #333; background: #f5f5f5; padding: 20px; }
.container { max-width: 1200px; margin: 0 auto; background: white; padding: 40px; border-radius: 8px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
h1 { color: #2c3e50; margin-bottom: 10px; font-size: 2.5em; border-bottom: 3px solid #3498db; padding-bottom: 15px; }
.subtitle { color: #7f8c8d; margin-bottom: 30px; font-size: 1.1em; }
.make-section { margin-bottom: 40px; }
.make-header { background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; padding: 15px 20px; border-radius: 6px; margin-bottom: 20px; font-size: 1.8em; font-weight: bold; box-shadow: 0 2px 8px rgba(0,0,0,0.15); }
.model-group { margin-bottom: 25px; background: #fafafa; border-left: 4px solid #3498db; padding: 20px; border-radius: 4px; }
.model-title { font-size: 1.5em; color: #2c3e50; margin-bottom: 15px; font-weight: 600; }
.price-list { list-style: none; }
.price-list-item { background: white; padding: 15px 20px; margin-bottom: 10px; border-radius: 4px; border: 1px solid #e0e0e0; transition: all 0.3s ease; display: flex; justify-content: space-between; align-items: center; }
.price-list-item:hover { border-color: #3498db; box-shadow: 0 2px 8px rgba(52, 152, 219, 0.2); transform: translateY(-2px); }
.price-list-link { color: #3498db; text-decoration: none; font-weight: 500; flex-grow: 1; }
.price-list-link:hover { color: #2980b9; text-decoration: underline; }
.metadata { display: flex; gap: 15px; color: #7f8c8d; font-size: 0.9em; }
.badge { background: #ecf0f1; padding: 4px 10px; border-radius: 12px; font-size: 0.85em; font-weight: 500; }
.badge.price { background: #fce4ec; color: #ad1457; }
.badge.year { background: #e8f5e9; color: #2e7d32; }
.badge.variant { background: #e3f2fd; color: #1565c0; }
.badge.date { background: #fff3e0; color: #e65100; }
.variants { color: #95a5a6; font-size: 0.8em; margin-top: 4px; }
.footer { margin-top: 40px; padding-top: 20px; border-top: 2px solid #ecf0f1; text-align: center; color: #7f8c8d; font-size: 0.9em; }
.stats { background: #ecf0f1; padding: 15px; border-radius: 4px; margin-bottom: 30px; display: flex; justify-content: space-around; text-align: center; }
.stat-item { flex: 1; }
.stat-number { font-size: 2em; font-weight: bold; color: #3498db; }
.stat-label { color: #7f8c8d; font-size: 0.9em; text-transform: uppercase; letter-spacing: 1px; }
.error { background: #fdecea; color: #b71c1c; border: 1px solid #f5c6cb; padding: 20px; border-radius: 6px; }
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_valid_dates() {
        assert_eq!(format_validity_date("2025-03-15").as_deref(), Some("15.03.2025"));
    }

    #[test]
    fn malformed_dates_fall_back_to_raw_text() {
        assert_eq!(format_validity_date("2025-13-45"), None);
        let out = badges(None, None, None, Some("2025-13-45"));
        assert_eq!(
            out,
            vec![Badge {
                class: "date",
                text: "2025-13-45".to_string(),
            }]
        );
    }

    #[test]
    fn badges_follow_display_order() {
        let out = badges(Some("25,600 €"), Some("2025"), Some("T7"), Some("2025-03-15"));
        let texts: Vec<&str> = out.iter().map(|b| b.text.as_str()).collect();
        assert_eq!(texts, vec!["25,600 €", "MY 2025", "T7", "Valid from 15.03.2025"]);
    }

    #[test]
    fn absolute_filenames_skip_the_prefix() {
        assert_eq!(link_target("../", "cenniky/a.pdf"), "../cenniky/a.pdf");
        assert_eq!(link_target("../", "/srv/lists/a.pdf"), "/srv/lists/a.pdf");
        assert_eq!(link_target("", "cenniky/a.pdf"), "cenniky/a.pdf");
    }
}
