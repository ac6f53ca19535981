//! Dataset model and loader.
//!
//! The persisted document is a three-level JSON object:
//! `{ "<Country>": { "<City>": { "<Month>": <number> } } }`.
//! Every level keeps the order of the source document, and duplicate keys
//! inside one object are rejected while parsing.

use std::fmt;
use std::marker::PhantomData;
use std::path::Path;

use chrono::{DateTime, Utc};
use common::{Error, Result};
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::normalize::normalize_key;

/// Dataset shipped with the binary, used when no `data_path` is configured.
const BUNDLED_DATASET: &str = include_str!("../../../data/weather.json");

/// A leaf value. Keeps the number exactly as written in the source document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Average(serde_json::Number);

impl Average {
    pub fn as_f64(&self) -> f64 {
        self.0.as_f64().unwrap_or_default()
    }
}

impl From<i64> for Average {
    fn from(value: i64) -> Self {
        Self(value.into())
    }
}

/// Named entries at one level of the hierarchy, in source order.
///
/// Levels hold a handful of entries, so lookups scan linearly.
#[derive(Debug, Clone, PartialEq)]
pub struct Scope<T> {
    entries: Vec<(String, T)>,
}

impl<T> Scope<T> {
    pub fn get(&self, key: &str) -> Option<&T> {
        self.entries
            .iter()
            .find_map(|(name, value)| (name == key).then_some(value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> + '_ {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Serialize> Serialize for Scope<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Scope<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct ScopeVisitor<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for ScopeVisitor<T> {
            type Value = Scope<T>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object with uniquely named entries")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut entries: Vec<(String, T)> =
                    Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, value)) = access.next_entry::<String, T>()? {
                    if entries.iter().any(|(existing, _)| *existing == name) {
                        return Err(de::Error::custom(format!("duplicate key `{name}`")));
                    }
                    entries.push((name, value));
                }
                Ok(Scope { entries })
            }
        }

        deserializer.deserialize_map(ScopeVisitor(PhantomData))
    }
}

/// Month name → average for one city.
pub type MonthlyAverages = Scope<Average>;
/// City name → monthly averages for one country.
pub type Cities = Scope<MonthlyAverages>;
/// Country name → cities.
pub type Countries = Scope<Cities>;

/// Entry counts per level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DatasetSummary {
    pub countries: usize,
    pub cities: usize,
    pub months: usize,
}

/// The immutable climate dataset.
#[derive(Debug, Clone)]
pub struct Dataset {
    countries: Countries,
    loaded_at: DateTime<Utc>,
}

impl Dataset {
    /// Parse a dataset document.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let countries: Countries = serde_json::from_str(raw)
            .map_err(|e| Error::Dataset(format!("malformed dataset document: {e}")))?;
        let dataset = Dataset {
            countries,
            loaded_at: Utc::now(),
        };
        dataset.validate()?;
        Ok(dataset)
    }

    /// Read and parse a dataset document from disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::Dataset(format!("failed to read {}: {}", path.display(), e))
        })?;
        let dataset = Self::from_json_str(&raw)?;
        info!("Loaded dataset from {}", path.display());
        Ok(dataset)
    }

    /// The dataset compiled into the binary.
    pub fn bundled() -> Result<Self> {
        Self::from_json_str(BUNDLED_DATASET)
    }

    pub fn countries(&self) -> &Countries {
        &self.countries
    }

    /// When the document was parsed.
    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn summary(&self) -> DatasetSummary {
        let cities = self.countries.iter().map(|(_, cities)| cities.len()).sum();
        let months = self
            .countries
            .iter()
            .flat_map(|(_, cities)| cities.iter())
            .map(|(_, months)| months.len())
            .sum();
        DatasetSummary {
            countries: self.countries.len(),
            cities,
            months,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.countries.is_empty() {
            return Err(Error::Dataset("dataset must contain at least one country".into()));
        }

        // Stored keys are matched against normalized input, so a key that is
        // not in canonical form can never be reached.
        for (country, cities) in self.countries.iter() {
            warn_if_unreachable(country, country);
            for (city, months) in cities.iter() {
                warn_if_unreachable(city, &format!("{country}/{city}"));
                for (month, _) in months.iter() {
                    warn_if_unreachable(month, &format!("{country}/{city}/{month}"));
                }
            }
        }

        Ok(())
    }
}

fn warn_if_unreachable(key: &str, path: &str) {
    if normalize_key(key) != key {
        warn!("Dataset key {:?} is not capitalized and cannot be looked up", path);
    }
}
