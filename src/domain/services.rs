use std::collections::BTreeMap;

use crate::domain::{CreatureRecord, LookupResult, Query};

/// Upper bound used to scale base stats into a fill percentage.
pub const STAT_SCALE_MAX: f64 = 255.0;

/// Anything that can resolve a query into a creature record.
///
/// Implementations perform exactly one attempt per call; retry policy, if
/// any, belongs to the caller.
pub trait CreatureSource: Send + Sync {
    fn fetch(&self, query: &Query) -> LookupResult<CreatureRecord>;
}

/// Display lookup tables used when turning a record into a card.
///
/// Colors are `#RRGGBB` strings so the tables stay independent of whatever
/// front-end draws them.
#[derive(Debug, Clone, PartialEq)]
pub struct CardConfig {
    pub type_colors: BTreeMap<String, String>,
    pub stat_names: BTreeMap<String, String>,
}

impl Default for CardConfig {
    fn default() -> Self {
        let type_colors = [
            ("normal", "#A8A878"),
            ("fire", "#F08030"),
            ("water", "#6890F0"),
            ("electric", "#F8D030"),
            ("grass", "#78C850"),
            ("ice", "#98D8D8"),
            ("fighting", "#C03028"),
            ("poison", "#A040A0"),
            ("ground", "#E0C068"),
            ("flying", "#A890F0"),
            ("psychic", "#F85888"),
            ("bug", "#A8B820"),
            ("rock", "#B8A038"),
            ("ghost", "#705898"),
            ("dragon", "#7038F8"),
            ("dark", "#705848"),
            ("steel", "#B8B8D0"),
            ("fairy", "#EE99AC"),
        ];
        let stat_names = [
            ("hp", "HP"),
            ("attack", "Attack"),
            ("defense", "Defense"),
            ("special-attack", "Sp. Attack"),
            ("special-defense", "Sp. Defense"),
            ("speed", "Speed"),
        ];

        Self {
            type_colors: to_map(&type_colors),
            stat_names: to_map(&stat_names),
        }
    }
}

fn to_map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

impl CardConfig {
    /// Display name for a stat key, falling back to capitalizing the raw key.
    pub fn stat_display_name(&self, key: &str) -> String {
        self.stat_names
            .get(key)
            .cloned()
            .unwrap_or_else(|| capitalize_first(key))
    }

    /// `#RRGGBB` color for a raw type label, if the table knows it.
    pub fn type_color(&self, label: &str) -> Option<&str> {
        self.type_colors.get(label).map(String::as_str)
    }
}

/// A record reduced to exactly what gets drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatureCard {
    pub name: String,
    /// Zero-padded to at least three digits, without the leading `#`.
    pub number: String,
    pub image_url: Option<String>,
    pub types: Vec<TypeBadge>,
    pub height_m: String,
    pub weight_kg: String,
    pub base_experience: Option<u32>,
    pub abilities: Vec<AbilityLabel>,
    pub stats: Vec<StatBar>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeBadge {
    pub label: String,
    /// `None` for labels missing from the color table.
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AbilityLabel {
    pub label: String,
    pub hidden: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatBar {
    pub name: String,
    pub value: i64,
    /// Not clamped: values outside 0..=255 land outside 0..=100.
    pub percentage: f64,
}

/// Turns a fetched record into the card the front-end draws.
///
/// Pure and infallible: unknown type labels get no color and unmapped stat
/// keys fall back to their capitalized raw name.
///
/// # Arguments
///
/// * `record` - Record as received from the data service
/// * `config` - Color and stat-name tables to apply
pub fn build_card(record: &CreatureRecord, config: &CardConfig) -> CreatureCard {
    CreatureCard {
        name: capitalize_first(&record.name),
        number: pad_identifier(record.id),
        image_url: record.image_url().map(str::to_string),
        types: record
            .types
            .iter()
            .map(|slot| TypeBadge {
                label: capitalize_first(&slot.kind.name),
                color: config.type_color(&slot.kind.name).map(str::to_string),
            })
            .collect(),
        height_m: format_tenths(record.height),
        weight_kg: format_tenths(record.weight),
        base_experience: record.base_experience,
        abilities: record
            .abilities
            .iter()
            .map(|slot| AbilityLabel {
                label: capitalize_first(&slot.ability.name),
                hidden: slot.is_hidden,
            })
            .collect(),
        stats: record
            .stats
            .iter()
            .map(|entry| StatBar {
                name: config.stat_display_name(&entry.stat.name),
                value: entry.base_stat,
                percentage: stat_percentage(entry.base_stat),
            })
            .collect(),
    }
}

/// Uppercases the first character only; the rest is left untouched.
///
/// # Examples
///
/// ```
/// use dexcard::domain::capitalize_first;
///
/// assert_eq!(capitalize_first("pikachu"), "Pikachu");
/// assert_eq!(capitalize_first("mystery-stat"), "Mystery-stat");
/// ```
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Zero-pads an identifier to three digits. Longer numbers are never cut.
///
/// # Examples
///
/// ```
/// use dexcard::domain::pad_identifier;
///
/// assert_eq!(pad_identifier(1), "001");
/// assert_eq!(pad_identifier(25), "025");
/// assert_eq!(pad_identifier(1000), "1000");
/// ```
pub fn pad_identifier(id: u32) -> String {
    format!("{:03}", id)
}

/// Formats a tenths-of-a-unit integer with exactly one decimal place.
///
/// # Examples
///
/// ```
/// use dexcard::domain::format_tenths;
///
/// assert_eq!(format_tenths(4), "0.4");
/// assert_eq!(format_tenths(60), "6.0");
/// ```
pub fn format_tenths(raw: u32) -> String {
    format!("{:.1}", f64::from(raw) / 10.0)
}

/// Scales a base stat against [`STAT_SCALE_MAX`] into a fill percentage.
///
/// Values above the scale give more than 100 and negative values give less
/// than 0; nothing is clamped.
///
/// # Examples
///
/// ```
/// use dexcard::domain::stat_percentage;
///
/// assert!((stat_percentage(255) - 100.0).abs() < 1e-9);
/// assert!(stat_percentage(300) > 117.6);
/// ```
pub fn stat_percentage(value: i64) -> f64 {
    value as f64 / STAT_SCALE_MAX * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AbilitySlot, NamedResource, Sprites, StatEntry, TypeSlot};

    fn named(name: &str) -> NamedResource {
        NamedResource { name: name.to_string() }
    }

    fn create_test_record() -> CreatureRecord {
        CreatureRecord {
            id: 25,
            name: "pikachu".to_string(),
            sprites: Sprites::default(),
            types: vec![
                TypeSlot { kind: named("electric") },
                TypeSlot { kind: named("shadow") },
            ],
            abilities: vec![
                AbilitySlot { ability: named("static"), is_hidden: false },
                AbilitySlot { ability: named("lightning-rod"), is_hidden: true },
            ],
            height: 4,
            weight: 60,
            base_experience: Some(112),
            stats: vec![
                StatEntry { base_stat: 35, stat: named("hp") },
                StatEntry { base_stat: 50, stat: named("special-attack") },
                StatEntry { base_stat: 300, stat: named("mystery-stat") },
            ],
        }
    }

    #[test]
    fn test_pad_identifier() {
        assert_eq!(pad_identifier(1), "001");
        assert_eq!(pad_identifier(25), "025");
        assert_eq!(pad_identifier(1000), "1000");
    }

    #[test]
    fn test_capitalize_first() {
        assert_eq!(capitalize_first("pikachu"), "Pikachu");
        assert_eq!(capitalize_first("mr-mime"), "Mr-mime");
        assert_eq!(capitalize_first("Already"), "Already");
        assert_eq!(capitalize_first(""), "");
        assert_eq!(capitalize_first("éclair"), "Éclair");
    }

    #[test]
    fn test_format_tenths_always_one_decimal() {
        assert_eq!(format_tenths(4), "0.4");
        assert_eq!(format_tenths(60), "6.0");
        assert_eq!(format_tenths(9999), "999.9");
        assert_eq!(format_tenths(0), "0.0");
    }

    #[test]
    fn test_stat_display_names() {
        let config = CardConfig::default();
        assert_eq!(config.stat_display_name("special-attack"), "Sp. Attack");
        assert_eq!(config.stat_display_name("hp"), "HP");
        assert_eq!(config.stat_display_name("mystery-stat"), "Mystery-stat");
    }

    #[test]
    fn test_stat_percentage_is_not_clamped() {
        assert!((stat_percentage(300) - 117.647).abs() < 0.01);
        assert!((stat_percentage(255) - 100.0).abs() < f64::EPSILON);
        assert!(stat_percentage(-10) < 0.0);
    }

    #[test]
    fn test_default_config_has_eighteen_types() {
        let config = CardConfig::default();
        assert_eq!(config.type_colors.len(), 18);
        assert_eq!(config.type_color("fire"), Some("#F08030"));
        assert_eq!(config.type_color("shadow"), None);
    }

    #[test]
    fn test_build_card() {
        let card = build_card(&create_test_record(), &CardConfig::default());

        assert_eq!(card.name, "Pikachu");
        assert_eq!(card.number, "025");
        assert_eq!(card.height_m, "0.4");
        assert_eq!(card.weight_kg, "6.0");
        assert_eq!(card.base_experience, Some(112));
        assert_eq!(card.image_url, None);

        assert_eq!(card.types[0].label, "Electric");
        assert_eq!(card.types[0].color.as_deref(), Some("#F8D030"));
        // Unknown labels render uncolored rather than failing.
        assert_eq!(card.types[1].label, "Shadow");
        assert_eq!(card.types[1].color, None);

        assert_eq!(card.abilities[1].label, "Lightning-rod");
        assert!(card.abilities[1].hidden);

        assert_eq!(card.stats[1].name, "Sp. Attack");
        assert_eq!(card.stats[2].name, "Mystery-stat");
        assert!(card.stats[2].percentage > 100.0);
    }

    #[test]
    fn test_build_card_uses_injected_tables() {
        let mut config = CardConfig::default();
        config.stat_names.insert("hp".into(), "Health".into());
        config.type_colors.insert("shadow".into(), "#403040".into());

        let card = build_card(&create_test_record(), &config);
        assert_eq!(card.stats[0].name, "Health");
        assert_eq!(card.types[1].color.as_deref(), Some("#403040"));
    }
}
