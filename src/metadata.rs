// Reference data for barrier reporting: countries, sectors and barrier
// statuses. Shipped as embedded YAML, overridable from a file at startup.

use serde::Deserialize;

use crate::form::SelectOption;

const DEFAULT_METADATA: &str = include_str!("../data/metadata.yml");

pub const STATUS_RESOLVED: &str = "resolved";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MetadataEntry {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Metadata {
    pub countries: Vec<MetadataEntry>,
    pub sectors: Vec<MetadataEntry>,
    pub statuses: Vec<MetadataEntry>,
}

impl Metadata {
    /// Load the embedded reference data.
    pub fn embedded() -> Self {
        serde_yaml::from_str(DEFAULT_METADATA).expect("embedded metadata must parse")
    }

    /// Load reference data from a YAML file, e.g. a `--metadata` override.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&contents)?)
    }

    pub fn country_options(&self) -> Vec<SelectOption> {
        Self::options(&self.countries)
    }

    pub fn status_options(&self) -> Vec<SelectOption> {
        Self::options(&self.statuses)
    }

    pub fn country_ids(&self) -> Vec<String> {
        Self::ids(&self.countries)
    }

    pub fn sector_ids(&self) -> Vec<String> {
        Self::ids(&self.sectors)
    }

    pub fn status_ids(&self) -> Vec<String> {
        Self::ids(&self.statuses)
    }

    pub fn country_name(&self, id: &str) -> Option<&str> {
        Self::name(&self.countries, id)
    }

    pub fn sector_name(&self, id: &str) -> Option<&str> {
        Self::name(&self.sectors, id)
    }

    pub fn status_name(&self, id: &str) -> Option<&str> {
        Self::name(&self.statuses, id)
    }

    fn options(entries: &[MetadataEntry]) -> Vec<SelectOption> {
        entries
            .iter()
            .map(|e| SelectOption::new(&e.id, &e.name))
            .collect()
    }

    fn ids(entries: &[MetadataEntry]) -> Vec<String> {
        entries.iter().map(|e| e.id.clone()).collect()
    }

    fn name<'a>(entries: &'a [MetadataEntry], id: &str) -> Option<&'a str> {
        entries
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.name.as_str())
    }
}
