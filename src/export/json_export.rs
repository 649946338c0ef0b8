use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::catalog::{Catalog, CatalogStats};
use crate::core::model::PriceListRecord;
use crate::export::{Exporter, JSON_FILE};

/// Payload read by the client-side page. Field names are part of its contract.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogDocument {
    pub manufacturers: Vec<ManufacturerEntry>,
    pub stats: StatsEntry,
    pub generated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ManufacturerEntry {
    pub name: String,
    pub models: Vec<ModelEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModelEntry {
    pub name: String,
    pub price_lists: Vec<PriceListEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriceListEntry {
    pub filename: String,
    pub basename: String,
    pub base_price: Option<u32>,
    pub price_range: Option<String>,
    pub model_year: Option<String>,
    pub variant: Option<String>,
    pub validity_date: Option<String>,
    pub prices: Vec<u32>,
    pub variants: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatsEntry {
    pub total_manufacturers: usize,
    pub total_models: usize,
    pub total_price_lists: usize,
}

impl From<&PriceListRecord> for PriceListEntry {
    fn from(record: &PriceListRecord) -> Self {
        Self {
            filename: record.filename.clone(),
            basename: record.basename.clone(),
            base_price: record.base_price,
            price_range: record.price_range.clone(),
            model_year: record.model_year.clone(),
            variant: record.variant.clone(),
            validity_date: record.validity_date.clone(),
            prices: record.prices.clone(),
            variants: record.variants_detected.clone(),
        }
    }
}

impl From<CatalogStats> for StatsEntry {
    fn from(stats: CatalogStats) -> Self {
        Self {
            total_manufacturers: stats.total_manufacturers,
            total_models: stats.total_models,
            total_price_lists: stats.total_price_lists,
        }
    }
}

impl CatalogDocument {
    pub fn from_catalog(catalog: &Catalog, generated_on: NaiveDate) -> Self {
        let manufacturers = catalog
            .makes()
            .map(|(make, models)| ManufacturerEntry {
                name: make.to_string(),
                models: models
                    .iter()
                    .map(|(model, records)| ModelEntry {
                        name: model.clone(),
                        price_lists: records.iter().map(PriceListEntry::from).collect(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            manufacturers,
            stats: catalog.stats().into(),
            generated_at: generated_on.format("%Y-%m-%d").to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct JsonExporter {
    out_dir: PathBuf,
    generated_on: NaiveDate,
}

impl JsonExporter {
    pub fn new(out_dir: PathBuf) -> Self {
        Self {
            out_dir,
            generated_on: Local::now().date_naive(),
        }
    }

    pub fn with_generated_on(mut self, date: NaiveDate) -> Self {
        self.generated_on = date;
        self
    }
}

impl Exporter for JsonExporter {
    fn export(&self, catalog: &Catalog) -> Result<()> {
        fs::create_dir_all(&self.out_dir)
            .with_context(|| format!("failed to create {}", self.out_dir.display()))?;
        let path = self.out_dir.join(JSON_FILE);
        let data = serde_json::to_string_pretty(&CatalogDocument::from_catalog(catalog, self.generated_on))?;
        fs::write(&path, data).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::ContentSummary;
    use crate::parser::parse_filename;

    #[test]
    fn uses_external_field_names() -> Result<()> {
        let catalog = Catalog::from_records(vec![PriceListRecord::new(
            parse_filename("cenniky/Cennik_VW_California_T7_MJ2025_15.3.2025.pdf"),
            ContentSummary {
                prices: vec![25600, 31900],
                variants_detected: vec!["Ocean".to_string()],
            },
        )]);
        let doc = CatalogDocument::from_catalog(&catalog, NaiveDate::from_ymd_opt(2025, 3, 20).unwrap());
        let value = serde_json::to_value(&doc)?;

        let entry = &value["manufacturers"][0]["models"][0]["priceLists"][0];
        assert_eq!(value["manufacturers"][0]["name"], "Volkswagen");
        assert_eq!(value["manufacturers"][0]["models"][0]["name"], "California");
        assert_eq!(entry["basePrice"], 25600);
        assert_eq!(entry["priceRange"], "25,600 - 31,900 €");
        assert_eq!(entry["modelYear"], "2025");
        assert_eq!(entry["variant"], "T7");
        assert_eq!(entry["validityDate"], "2025-03-15");
        assert_eq!(entry["prices"], serde_json::json!([25600, 31900]));
        assert_eq!(entry["variants"], serde_json::json!(["Ocean"]));
        assert_eq!(value["stats"]["totalManufacturers"], 1);
        assert_eq!(value["stats"]["totalModels"], 1);
        assert_eq!(value["stats"]["totalPriceLists"], 1);
        assert_eq!(value["generatedAt"], "2025-03-20");
        Ok(())
    }

    #[test]
    fn missing_fields_serialize_as_null() -> Result<()> {
        let catalog = Catalog::from_records(vec![PriceListRecord::new(
            parse_filename("cenniky/Transit_Custom_2024.pdf"),
            ContentSummary::default(),
        )]);
        let doc = CatalogDocument::from_catalog(&catalog, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        let value = serde_json::to_value(&doc)?;
        let entry = &value["manufacturers"][0]["models"][0]["priceLists"][0];
        assert!(entry["basePrice"].is_null());
        assert!(entry["validityDate"].is_null());
        assert_eq!(entry["prices"], serde_json::json!([]));
        Ok(())
    }
}
