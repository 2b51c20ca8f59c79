use crate::statics;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// A `{ name }` reference as the feed uses for categories and weapons.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct Tag {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct Rarity {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

/// A crate (case) or thematic collection an item belongs to.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct CollectionRef {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
}

impl CollectionRef {
    pub fn image(&self) -> &str {
        self.image.as_deref().unwrap_or_default()
    }
}

/// Pattern/paint ids show up as numbers, numeric strings or `{ id, name }` objects
/// depending on the feed revision.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum PatternField {
    Id(u64),
    Text(String),
    Object {
        #[serde(default)]
        id: Option<serde_json::Value>,
        #[serde(default)]
        name: Option<String>,
    },
    Other(serde_json::Value),
}

impl PatternField {
    pub fn as_id(&self) -> Option<u64> {
        match self {
            PatternField::Id(id) => Some(*id),
            PatternField::Text(s) => s.trim().parse().ok(),
            PatternField::Object { id, .. } => match id.as_ref()? {
                serde_json::Value::Number(n) => n.as_u64(),
                serde_json::Value::String(s) => s.trim().parse().ok(),
                _ => None,
            },
            PatternField::Other(_) => None,
        }
    }
}

/// One catalog entry as delivered by the feed.
///
/// Items are never mutated after loading. `display_name`/`variant_name` are only
/// set on the copies produced by [`crate::doppler::expand_doppler_variants`].
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct Item {
    #[serde(default, deserialize_with = "default_on_error")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "default_on_error")]
    pub category: Option<Tag>,
    #[serde(default, deserialize_with = "default_on_error")]
    pub rarity: Option<Rarity>,
    #[serde(default, deserialize_with = "default_on_error")]
    pub weapon: Option<Tag>,
    #[serde(default, deserialize_with = "default_on_error")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "default_on_error")]
    pub crates: Vec<CollectionRef>,
    #[serde(default, deserialize_with = "default_on_error")]
    pub collection: Option<CollectionRef>,
    #[serde(default, deserialize_with = "default_on_error")]
    pub collections: Vec<CollectionRef>,
    #[serde(default, deserialize_with = "default_on_error")]
    pub souvenir: bool,

    #[serde(default, deserialize_with = "default_on_error")]
    pub finish: Option<String>,
    #[serde(default, deserialize_with = "default_on_error")]
    pub finish_name: Option<String>,
    #[serde(default, deserialize_with = "default_on_error")]
    pub phase: Option<String>,
    #[serde(default)]
    pub pattern: Option<PatternField>,
    #[serde(default)]
    pub paint_index: Option<PatternField>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_name: Option<String>,
}

impl Item {
    pub fn category_name(&self) -> Option<&str> {
        self.category
            .as_ref()
            .map(|c| c.name.as_str())
            .filter(|s| !s.is_empty())
    }

    pub fn rarity_name(&self) -> Option<&str> {
        self.rarity
            .as_ref()
            .map(|r| r.name.as_str())
            .filter(|s| !s.is_empty())
    }

    pub fn rarity_color(&self) -> Option<&str> {
        self.rarity.as_ref().and_then(|r| r.color.as_deref())
    }

    pub fn weapon_name(&self) -> Option<&str> {
        self.weapon
            .as_ref()
            .map(|w| w.name.as_str())
            .filter(|s| !s.is_empty())
    }

    pub fn image(&self) -> &str {
        self.image.as_deref().unwrap_or_default()
    }

    /// Name shown on cards: the expanded name when present.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }

    /// Knives and gloves are grouped by weapon and shown through the taskbar.
    pub fn is_condensed(&self) -> bool {
        matches!(
            self.category_name(),
            Some(statics::CATEGORY_KNIVES | statics::CATEGORY_GLOVES)
        )
    }

    pub fn is_knife(&self) -> bool {
        self.category_name() == Some(statics::CATEGORY_KNIVES)
    }

    /// The thematic collection: singular `collection` first, else the first of `collections`.
    pub fn primary_collection(&self) -> Option<&CollectionRef> {
        self.collection
            .as_ref()
            .or_else(|| self.collections.first())
            .filter(|c| !c.name.is_empty())
    }

    /// Exact membership by crate or collection name.
    pub fn belongs_to(&self, name: &str) -> bool {
        self.crates.iter().any(|c| c.name == name)
            || self.collection.as_ref().is_some_and(|c| c.name == name)
            || self.collections.iter().any(|c| c.name == name)
    }

    /// Finish text used for Doppler phase detection (`finish`, then `finish_name`, then `phase`).
    pub fn finish_text(&self) -> Option<&str> {
        [&self.finish, &self.finish_name, &self.phase]
            .into_iter()
            .find_map(|f| f.as_deref().filter(|s| !s.is_empty()))
    }

    pub fn pattern_id(&self) -> Option<u64> {
        self.pattern
            .as_ref()
            .and_then(PatternField::as_id)
            .or_else(|| self.paint_index.as_ref().and_then(PatternField::as_id))
    }
}

/// The feed sends `null` for absent lists/flags on some entries.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Optional fields of the wrong shape fall back to their default instead of
/// failing the whole entry.
fn default_on_error<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}
