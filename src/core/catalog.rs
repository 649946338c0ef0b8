use std::collections::BTreeMap;

use crate::core::model::PriceListRecord;

pub type ModelGroups = BTreeMap<String, Vec<PriceListRecord>>;

/// Price lists grouped by make, then by model.
///
/// Both levels iterate alphabetically. Records inside a model are ordered
/// newest validity date first, then newest model year, with undated records
/// last; ties keep the order in which the records were added.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    makes: BTreeMap<String, ModelGroups>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogStats {
    pub total_manufacturers: usize,
    pub total_models: usize,
    pub total_price_lists: usize,
}

impl Catalog {
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = PriceListRecord>,
    {
        let mut catalog = Self::default();
        for record in records {
            catalog.insert(record);
        }
        catalog.sort();
        catalog
    }

    pub fn insert(&mut self, record: PriceListRecord) {
        self.makes
            .entry(record.make.label().to_string())
            .or_default()
            .entry(record.model.clone())
            .or_default()
            .push(record);
    }

    pub fn sort(&mut self) {
        for models in self.makes.values_mut() {
            for records in models.values_mut() {
                sort_newest_first(records);
            }
        }
    }

    pub fn makes(&self) -> impl Iterator<Item = (&str, &ModelGroups)> {
        self.makes.iter().map(|(make, models)| (make.as_str(), models))
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            total_manufacturers: self.makes.len(),
            total_models: self.makes.values().map(|models| models.len()).sum(),
            total_price_lists: self
                .makes
                .values()
                .flat_map(|models| models.values())
                .map(|records| records.len())
                .sum(),
        }
    }
}

pub fn sort_newest_first(records: &mut [PriceListRecord]) {
    // sort_by is stable, so equal keys keep enumeration order
    records.sort_by(|a, b| b.sort_key().cmp(&a.sort_key()));
}
