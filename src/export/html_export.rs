use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::core::catalog::Catalog;
use crate::core::model::PriceListRecord;
use crate::export::{badges, link_target, Exporter, HTML_FILE, STYLE};

/// Writes the fully server-rendered summary page.
#[derive(Debug, Clone)]
pub struct HtmlExporter {
    out_dir: PathBuf,
    link_prefix: String,
    generated_on: NaiveDate,
}

impl HtmlExporter {
    pub fn new(out_dir: PathBuf, link_prefix: impl Into<String>) -> Self {
        Self {
            out_dir,
            link_prefix: link_prefix.into(),
            generated_on: Local::now().date_naive(),
        }
    }

    pub fn with_generated_on(mut self, date: NaiveDate) -> Self {
        self.generated_on = date;
        self
    }

    pub fn render(&self, catalog: &Catalog) -> String {
        let stats = catalog.stats();
        let mut body = format!(
            r#"        <div class="stats">
            <div class="stat-item"><div class="stat-number">{}</div><div class="stat-label">Manufacturers</div></div>
            <div class="stat-item"><div class="stat-number">{}</div><div class="stat-label">Models</div></div>
            <div class="stat-item"><div class="stat-number">{}</div><div class="stat-label">Price Lists</div></div>
        </div>
"#,
            stats.total_manufacturers, stats.total_models, stats.total_price_lists
        );

        for (make, models) in catalog.makes() {
            body.push_str("        <div class=\"make-section\">\n");
            body.push_str(&format!(
                "            <div class=\"make-header\">{}</div>\n",
                encode_text(make)
            ));
            for (model, records) in models {
                body.push_str("            <div class=\"model-group\">\n");
                body.push_str(&format!(
                    "                <div class=\"model-title\">{}</div>\n",
                    encode_text(model)
                ));
                body.push_str("                <ul class=\"price-list\">\n");
                for record in records {
                    body.push_str(&self.record_item(record));
                }
                body.push_str("                </ul>\n");
                body.push_str("            </div>\n");
            }
            body.push_str("        </div>\n");
        }

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Van Price Lists Summary</title>
    <style>{style}</style>
</head>
<body>
    <div class="container">
        <h1>Van Price Lists Summary</h1>
        <p class="subtitle">Complete overview of all available price lists organized by manufacturer and model</p>
{body}
        <div class="footer">
            <p>Generated on {generated}</p>
        </div>
    </div>
</body>
</html>
"#,
            style = STYLE,
            body = body,
            generated = self.generated_on.format("%B %d, %Y"),
        )
    }

    fn record_item(&self, record: &PriceListRecord) -> String {
        let href = link_target(&self.link_prefix, &record.filename);
        let mut item = String::new();
        item.push_str("                    <li class=\"price-list-item\">\n");
        item.push_str("                        <div>\n");
        item.push_str(&format!(
            "                            <a href=\"{}\" class=\"price-list-link\" target=\"_blank\">{}</a>\n",
            encode_double_quoted_attribute(&href),
            encode_text(&record.basename)
        ));
        if !record.variants_detected.is_empty() {
            item.push_str(&format!(
                "                            <div class=\"variants\">{}</div>\n",
                encode_text(&record.variants_detected.join(", "))
            ));
        }
        item.push_str("                        </div>\n");
        item.push_str("                        <div class=\"metadata\">\n");
        for badge in badges(
            record.price_range.as_deref(),
            record.model_year.as_deref(),
            record.variant.as_deref(),
            record.validity_date.as_deref(),
        ) {
            item.push_str(&format!(
                "                            <span class=\"badge {}\">{}</span>\n",
                badge.class,
                encode_text(&badge.text)
            ));
        }
        item.push_str("                        </div>\n");
        item.push_str("                    </li>\n");
        item
    }
}

impl Exporter for HtmlExporter {
    fn export(&self, catalog: &Catalog) -> Result<()> {
        fs::create_dir_all(&self.out_dir)
            .with_context(|| format!("failed to create {}", self.out_dir.display()))?;
        let path = self.out_dir.join(HTML_FILE);
        fs::write(&path, self.render(catalog))
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }
}
