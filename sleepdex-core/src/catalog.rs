//! Catalog Store: the immutable list of sleep-style records.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::constants::{ALL_RECORDS_KEY, MAX_STAR_TIER, MIN_STAR_TIER, STAR_GLYPHS};

/// Errors raised while reading the static catalog document.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog JSON could not be parsed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("catalog document has an unexpected shape: {0}")]
    Shape(String),
}

/// Field locations a record can appear in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Location {
    Wakakusa,
    Cyan,
    Taupe,
    Unohana,
    Lapis,
    Gold,
}

impl Location {
    pub const ALL: [Self; 6] = [
        Self::Wakakusa,
        Self::Cyan,
        Self::Taupe,
        Self::Unohana,
        Self::Lapis,
        Self::Gold,
    ];

    /// Display name, which is also the record key in the catalog JSON.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Wakakusa => "ワカクサ本島",
            Self::Cyan => "シアンの砂浜",
            Self::Taupe => "トープ洞窟",
            Self::Unohana => "ウノハナ雪原",
            Self::Lapis => "ラピスラズリ湖畔",
            Self::Gold => "ゴールド旧発電所",
        }
    }

    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Wakakusa => "wakakusa",
            Self::Cyan => "cyan",
            Self::Taupe => "taupe",
            Self::Unohana => "unohana",
            Self::Lapis => "lapis",
            Self::Gold => "gold",
        }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Accepts either the slug or the display name.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        Self::ALL
            .into_iter()
            .find(|loc| loc.slug().eq_ignore_ascii_case(text) || loc.label() == text)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Location {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown location: {s}"))
    }
}

/// Sleep style categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Style {
    Dozing,
    Snoozing,
    Slumbering,
}

impl Style {
    pub const ALL: [Self; 3] = [Self::Dozing, Self::Snoozing, Self::Slumbering];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dozing => "うとうと",
            Self::Snoozing => "すやすや",
            Self::Slumbering => "ぐっすり",
        }
    }

    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|style| style.label() == label)
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One catalog entry: a sleep-style variant with its rarity, style and
/// per-location research rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawRecord", into = "RawRecord")]
pub struct Record {
    pub id: String,
    pub catalog_number: String,
    pub name: String,
    pub rarity_label: String,
    pub style_label: String,
    ranks: [Option<String>; 6],
}

impl Record {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            catalog_number: String::new(),
            name: name.into(),
            rarity_label: String::new(),
            style_label: String::new(),
            ranks: Default::default(),
        }
    }

    #[must_use]
    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.catalog_number = number.into();
        self
    }

    #[must_use]
    pub fn with_rarity(mut self, rarity: impl Into<String>) -> Self {
        self.rarity_label = rarity.into();
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style_label = style.into();
        self
    }

    #[must_use]
    pub fn with_rank(mut self, location: Location, rank: impl Into<String>) -> Self {
        self.ranks[location.index()] = normalize_rank(Some(rank.into()));
        self
    }

    /// Rank string at `location`, or `None` when the record never appears there.
    #[must_use]
    pub fn rank_at(&self, location: Location) -> Option<&str> {
        self.ranks[location.index()].as_deref()
    }

    #[must_use]
    pub fn is_present_at(&self, location: Location) -> bool {
        self.rank_at(location).is_some()
    }

    #[must_use]
    pub fn style(&self) -> Option<Style> {
        Style::from_label(&self.style_label)
    }

    /// Number of star glyphs in the rarity label.
    #[must_use]
    pub fn star_tier(&self) -> usize {
        self.rarity_label
            .chars()
            .filter(|ch| STAR_GLYPHS.contains(ch))
            .count()
    }

    #[must_use]
    pub fn has_groupable_tier(&self) -> bool {
        (MIN_STAR_TIER..=MAX_STAR_TIER).contains(&self.star_tier())
    }
}

fn normalize_rank(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RawRecord {
    #[serde(rename = "ID", deserialize_with = "text")]
    id: String,
    #[serde(rename = "No", default, deserialize_with = "text")]
    number: String,
    #[serde(rename = "Name", default, deserialize_with = "text")]
    name: String,
    #[serde(rename = "DisplayRarity", default, deserialize_with = "text")]
    rarity: String,
    #[serde(rename = "Style", default, deserialize_with = "text")]
    style: String,
    #[serde(
        rename = "ワカクサ本島",
        default,
        deserialize_with = "optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    wakakusa: Option<String>,
    #[serde(
        rename = "シアンの砂浜",
        default,
        deserialize_with = "optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    cyan: Option<String>,
    #[serde(
        rename = "トープ洞窟",
        default,
        deserialize_with = "optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    taupe: Option<String>,
    #[serde(
        rename = "ウノハナ雪原",
        default,
        deserialize_with = "optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    unohana: Option<String>,
    #[serde(
        rename = "ラピスラズリ湖畔",
        default,
        deserialize_with = "optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    lapis: Option<String>,
    #[serde(
        rename = "ゴールド旧発電所",
        default,
        deserialize_with = "optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    gold: Option<String>,
}

fn text_of(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text_of(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text_of(Value::deserialize(deserializer)?))
}

impl From<RawRecord> for Record {
    fn from(raw: RawRecord) -> Self {
        Self {
            id: raw.id,
            catalog_number: raw.number,
            name: raw.name,
            rarity_label: raw.rarity,
            style_label: raw.style,
            ranks: [
                normalize_rank(raw.wakakusa),
                normalize_rank(raw.cyan),
                normalize_rank(raw.taupe),
                normalize_rank(raw.unohana),
                normalize_rank(raw.lapis),
                normalize_rank(raw.gold),
            ],
        }
    }
}

impl From<Record> for RawRecord {
    fn from(record: Record) -> Self {
        let [wakakusa, cyan, taupe, unohana, lapis, gold] = record.ranks;
        Self {
            id: record.id,
            number: record.catalog_number,
            name: record.name,
            rarity: record.rarity_label,
            style: record.style_label,
            wakakusa,
            cyan,
            taupe,
            unohana,
            lapis,
            gold,
        }
    }
}

/// Ordered, immutable record list with an id index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    records: Vec<Record>,
    index: HashMap<String, usize>,
}

impl Catalog {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut index = HashMap::with_capacity(records.len());
        for (pos, record) in records.iter().enumerate() {
            if index.contains_key(&record.id) {
                log::warn!("duplicate catalog id {} at position {pos}", record.id);
                continue;
            }
            index.insert(record.id.clone(), pos);
        }
        Self { records, index }
    }

    /// Parse the catalog document using the standard "all records" key.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not JSON, the document is not an
    /// object, or the record list has the wrong shape.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Self::from_json_with_key(json, ALL_RECORDS_KEY)
    }

    /// Parse the catalog document reading records from `records_key`.
    ///
    /// A document without the key yields an empty catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not JSON, the document is not an
    /// object, or the record list has the wrong shape.
    pub fn from_json_with_key(json: &str, records_key: &str) -> Result<Self, CatalogError> {
        let doc: Value = serde_json::from_str(json)?;
        let Value::Object(mut map) = doc else {
            return Err(CatalogError::Shape("top level is not an object".to_string()));
        };
        let Some(list) = map.remove(records_key) else {
            log::warn!("catalog has no {records_key} list; starting empty");
            return Ok(Self::empty());
        };
        if !list.is_array() {
            return Err(CatalogError::Shape(format!("{records_key} is not an array")));
        }
        let records: Vec<Record> = serde_json::from_value(list)?;
        log::debug!("catalog loaded with {} records", records.len());
        Ok(Self::from_records(records))
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Record> {
        self.index.get(id).map(|&pos| &self.records[pos])
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct rarity labels in first-appearance order.
    #[must_use]
    pub fn rarity_labels(&self) -> Vec<&str> {
        distinct(self.records.iter().map(|r| r.rarity_label.as_str()))
    }

    /// Distinct style labels in first-appearance order.
    #[must_use]
    pub fn style_labels(&self) -> Vec<&str> {
        distinct(self.records.iter().map(|r| r.style_label.as_str()))
    }
}

/// Distinct values in first-appearance order.
#[must_use]
pub fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = Vec::new();
    for value in values {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}
