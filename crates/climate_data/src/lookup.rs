//! Hierarchical lookups over the climate dataset.
//!
//! Every operation normalizes its keys and resolves them outer to inner.
//! The first missing key stops the walk and yields a [`NotFound`] listing the
//! valid keys at that level, so a bad country is reported even when the city
//! and month are also bogus.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::debug;

use crate::dataset::{Average, Cities, Dataset, DatasetSummary, MonthlyAverages, Scope};
use crate::normalize::normalize_key;

/// Level of the hierarchy a lookup failed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Country,
    City,
    Month,
}

impl Level {
    /// Plural noun used for the alternatives list (`available_<plural>`).
    pub fn plural(self) -> &'static str {
        match self {
            Level::Country => "countries",
            Level::City => "cities",
            Level::Month => "months",
        }
    }
}

/// A failed lookup together with the keys that would have matched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotFound {
    #[error("Country not found")]
    Country { available: Vec<String> },

    #[error("City not found")]
    City { available: Vec<String> },

    #[error("Month not found")]
    Month { available: Vec<String> },
}

impl NotFound {
    pub fn level(&self) -> Level {
        match self {
            NotFound::Country { .. } => Level::Country,
            NotFound::City { .. } => Level::City,
            NotFound::Month { .. } => Level::Month,
        }
    }

    pub fn available(&self) -> &[String] {
        match self {
            NotFound::Country { available }
            | NotFound::City { available }
            | NotFound::Month { available } => available,
        }
    }
}

/// Result of a lookup: the resolved data or the level that was missing.
pub type Lookup<T> = std::result::Result<T, NotFound>;

fn owned_keys<T>(scope: &Scope<T>) -> Vec<String> {
    scope.keys().map(str::to_owned).collect()
}

/// Read-only lookup service. Clones share the same dataset.
#[derive(Debug, Clone)]
pub struct LookupService {
    dataset: Arc<Dataset>,
}

impl LookupService {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self { dataset }
    }

    /// When the underlying dataset was loaded.
    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.dataset.loaded_at()
    }

    pub fn summary(&self) -> DatasetSummary {
        self.dataset.summary()
    }

    /// All country names.
    pub fn list_countries(&self) -> Vec<&str> {
        self.dataset.countries().keys().collect()
    }

    /// City names of `country`.
    pub fn list_cities(&self, country: &str) -> Lookup<Vec<&str>> {
        Ok(self.resolve_country(country)?.keys().collect())
    }

    /// Month → average mapping of `city` in `country`.
    pub fn city_monthly_averages(&self, country: &str, city: &str) -> Lookup<&MonthlyAverages> {
        let cities = self.resolve_country(country)?;
        resolve_city(cities, city)
    }

    /// Average of `month` for `city` in `country`.
    pub fn monthly_average(&self, country: &str, city: &str, month: &str) -> Lookup<&Average> {
        let cities = self.resolve_country(country)?;
        let months = resolve_city(cities, city)?;
        let key = normalize_key(month);
        months.get(&key).ok_or_else(|| {
            debug!(month = %key, "month not found");
            NotFound::Month {
                available: owned_keys(months),
            }
        })
    }

    fn resolve_country(&self, country: &str) -> Lookup<&Cities> {
        let countries = self.dataset.countries();
        let key = normalize_key(country);
        countries.get(&key).ok_or_else(|| {
            debug!(country = %key, "country not found");
            NotFound::Country {
                available: owned_keys(countries),
            }
        })
    }
}

fn resolve_city<'a>(cities: &'a Cities, city: &str) -> Lookup<&'a MonthlyAverages> {
    let key = normalize_key(city);
    cities.get(&key).ok_or_else(|| {
        debug!(city = %key, "city not found");
        NotFound::City {
            available: owned_keys(cities),
        }
    })
}
