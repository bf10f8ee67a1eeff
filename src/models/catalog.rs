// Catalog data models
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// Store name used when a legacy entry carries no store of its own.
pub const FALLBACK_STORE: &str = "other";

/// Root object returned by `GET {api_url}/free-games`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CatalogPayload {
    pub permanent: PlatformCatalog,
    pub temporary: PlatformCatalog,
    #[serde(default, deserialize_with = "lenient_sale")]
    pub sale: BTreeMap<String, Vec<GameEntry>>,
}

impl CatalogPayload {
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }

    pub fn total_games(&self) -> usize {
        self.permanent.total_games()
            + self.temporary.total_games()
            + self.sale.values().map(Vec::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.total_games() == 0
    }

    /// Every platform named anywhere in the catalog, lower-cased.
    pub fn platforms(&self) -> BTreeSet<String> {
        self.permanent
            .platforms()
            .chain(self.temporary.platforms())
            .map(str::to_lowercase)
            .collect()
    }

    /// Every store named anywhere in the catalog, lower-cased.
    pub fn stores(&self) -> BTreeSet<String> {
        self.permanent
            .shelves()
            .chain(self.temporary.shelves())
            .map(|(_, store, _)| store.to_lowercase())
            .chain(self.sale.keys().map(|s| s.to_lowercase()))
            .collect()
    }
}

/// Listings of one availability kind: platform -> store -> games.
///
/// Older payloads map a platform straight to an array of games. Those are
/// regrouped by each entry's own `store` field while parsing, so the rest of
/// the crate only ever sees the platform -> store nesting.
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
#[serde(transparent)]
pub struct PlatformCatalog(BTreeMap<String, BTreeMap<String, StoreCatalog>>);

#[derive(Deserialize)]
#[serde(untagged)]
enum PlatformShelf {
    Stores(BTreeMap<String, StoreCatalog>),
    Legacy(Vec<GameEntry>),
}

impl<'de> Deserialize<'de> for PlatformCatalog {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, PlatformShelf>::deserialize(d)?;
        let platforms = raw
            .into_iter()
            .map(|(platform, shelf)| {
                let stores = match shelf {
                    PlatformShelf::Stores(stores) => stores,
                    PlatformShelf::Legacy(entries) => group_by_store(entries),
                };
                (platform, stores)
            })
            .collect();
        Ok(Self(platforms))
    }
}

fn group_by_store(entries: Vec<GameEntry>) -> BTreeMap<String, StoreCatalog> {
    let mut grouped: BTreeMap<String, Vec<GameEntry>> = BTreeMap::new();
    for entry in entries {
        let store = entry
            .store
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
            .unwrap_or_else(|| FALLBACK_STORE.to_string());
        grouped.entry(store).or_default().push(entry);
    }
    grouped
        .into_iter()
        .map(|(store, games)| (store, StoreCatalog::FlatList(games)))
        .collect()
}

impl PlatformCatalog {
    pub fn get(&self, platform: &str) -> Option<&BTreeMap<String, StoreCatalog>> {
        self.0.get(platform)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeMap<String, StoreCatalog>)> {
        self.0.iter()
    }

    pub fn platforms(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Flattens to `(platform, store, catalog)` triples in key order.
    pub fn shelves(&self) -> impl Iterator<Item = (&str, &str, &StoreCatalog)> {
        self.0.iter().flat_map(|(platform, stores)| {
            stores
                .iter()
                .map(move |(store, catalog)| (platform.as_str(), store.as_str(), catalog))
        })
    }

    pub fn total_games(&self) -> usize {
        self.shelves().map(|(_, _, catalog)| catalog.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_games() == 0
    }
}

/// The games a single store offers, either as one list or split by genre.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum StoreCatalog {
    FlatList(Vec<GameEntry>),
    GenreGrouped(BTreeMap<String, Vec<GameEntry>>),
}

impl Default for StoreCatalog {
    fn default() -> Self {
        StoreCatalog::FlatList(Vec::new())
    }
}

impl StoreCatalog {
    pub fn entries(&self) -> Box<dyn Iterator<Item = &GameEntry> + '_> {
        match self {
            StoreCatalog::FlatList(games) => Box::new(games.iter()),
            StoreCatalog::GenreGrouped(genres) => Box::new(genres.values().flatten()),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            StoreCatalog::FlatList(games) => games.len(),
            StoreCatalog::GenreGrouped(genres) => genres.values().map(Vec::len).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A single listing. Every field is optional on the wire; missing values fall
/// back to empty defaults and are replaced with placeholders at display time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct GameEntry {
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(deserialize_with = "lenient_string")]
    pub link: String,
    #[serde(deserialize_with = "secure_thumbnail")]
    pub thumbnail: String,
    pub store: Option<String>,
    #[serde(
        rename = "discountPercentage",
        alias = "discount_percentage",
        deserialize_with = "lenient_percentage"
    )]
    pub discount_percentage: Option<u8>,
    #[serde(
        rename = "originalPrice",
        alias = "original_price",
        deserialize_with = "lenient_price"
    )]
    pub original_price: Option<f64>,
    #[serde(
        rename = "finalPrice",
        alias = "final_price",
        deserialize_with = "lenient_price"
    )]
    pub final_price: Option<f64>,
    #[serde(alias = "endDate")]
    pub end_date: Option<String>,
    pub genre: Option<String>,
    #[serde(deserialize_with = "lenient_platforms")]
    pub platforms: BTreeSet<String>,
    pub description: Option<String>,
}

impl GameEntry {
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            ..Default::default()
        }
    }

    pub fn display_title(&self) -> &str {
        match self.title.trim() {
            "" => "Untitled",
            title => title,
        }
    }

    pub fn display_store(&self) -> &str {
        match self.store.as_deref().map(str::trim) {
            Some(store) if !store.is_empty() => store,
            _ => "Unknown store",
        }
    }

    /// Parses `end_date`. Accepts RFC 3339 and offset-less ISO timestamps,
    /// the latter read as UTC.
    pub fn ends_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.end_date.as_deref()?.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .map(|naive| naive.and_utc())
    }

    pub fn matches_title(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(&needle.to_lowercase())
    }

    pub fn has_platform(&self, platform: &str) -> bool {
        self.platforms.iter().any(|p| p.eq_ignore_ascii_case(platform))
    }

    pub fn has_store(&self, store: &str) -> bool {
        self.store
            .as_deref()
            .map_or(false, |s| s.trim().eq_ignore_ascii_case(store))
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

fn secure_thumbnail<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    let raw = lenient_string(d)?;
    Ok(match raw.strip_prefix("http://") {
        Some(rest) => format!("https://{}", rest),
        None => raw,
    })
}

fn number_like(value: Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s
            .trim()
            .trim_start_matches('$')
            .trim_end_matches('%')
            .replace(',', "")
            .parse()
            .ok(),
        _ => None,
    }
}

fn lenient_price<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(Option::<Value>::deserialize(d)?
        .and_then(number_like)
        .filter(|p| p.is_finite() && *p >= 0.0))
}

fn lenient_percentage<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u8>, D::Error> {
    Ok(Option::<Value>::deserialize(d)?
        .and_then(number_like)
        .filter(|p| p.is_finite())
        .map(|p| p.round().clamp(0.0, 100.0) as u8))
}

fn lenient_platforms<'de, D: Deserializer<'de>>(d: D) -> Result<BTreeSet<String>, D::Error> {
    let platforms = match Option::<Value>::deserialize(d)? {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|v| v.as_str().map(|s| s.trim().to_string()))
            .filter(|s| !s.is_empty())
            .collect(),
        Some(Value::String(single)) if !single.trim().is_empty() => {
            BTreeSet::from([single.trim().to_string()])
        }
        _ => BTreeSet::new(),
    };
    Ok(platforms)
}

fn lenient_sale<'de, D: Deserializer<'de>>(
    d: D,
) -> Result<BTreeMap<String, Vec<GameEntry>>, D::Error> {
    Ok(Option::<BTreeMap<String, Vec<GameEntry>>>::deserialize(d)?.unwrap_or_default())
}
