use serde::Deserialize;
use std::fmt;

/// A normalized search term: trimmed and lower-cased.
///
/// Queries are either a creature name (`"pikachu"`) or a numeric identifier
/// (`"25"`). Normalization never fails; an empty query is still a valid
/// `Query` value and it is up to the caller to reject it.
///
/// # Examples
///
/// ```
/// use dexcard::domain::Query;
///
/// let query = Query::normalize("  PikaChu ");
/// assert_eq!(query.as_str(), "pikachu");
/// assert!(!query.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    pub fn normalize(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The subset of a remote creature payload that the card is built from.
///
/// Unknown fields are ignored by serde, so the full upstream document
/// deserializes without error.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatureRecord {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub sprites: Sprites,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub abilities: Vec<AbilitySlot>,
    /// Tenths of a meter.
    pub height: u32,
    /// Tenths of a kilogram.
    pub weight: u32,
    /// Null upstream for some entries.
    #[serde(default)]
    pub base_experience: Option<u32>,
    #[serde(default)]
    pub stats: Vec<StatEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sprites {
    #[serde(default)]
    pub front_default: Option<String>,
    #[serde(default)]
    pub other: OtherSprites,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OtherSprites {
    #[serde(rename = "official-artwork", default)]
    pub official_artwork: Option<Artwork>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Artwork {
    #[serde(default)]
    pub front_default: Option<String>,
}

/// A `{ "name": ..., "url": ... }` reference to another resource.
#[derive(Debug, Clone, Deserialize)]
pub struct NamedResource {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TypeSlot {
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AbilitySlot {
    pub ability: NamedResource,
    #[serde(default)]
    pub is_hidden: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatEntry {
    pub base_stat: i64,
    pub stat: NamedResource,
}

impl CreatureRecord {
    /// Official artwork when present and non-empty, otherwise the basic
    /// front sprite.
    pub fn image_url(&self) -> Option<&str> {
        let artwork = self
            .sprites
            .other
            .official_artwork
            .as_ref()
            .and_then(|art| art.front_default.as_deref())
            .filter(|url| !url.is_empty());

        artwork.or_else(|| {
            self.sprites
                .front_default
                .as_deref()
                .filter(|url| !url.is_empty())
        })
    }
}
