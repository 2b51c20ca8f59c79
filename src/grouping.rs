use crate::{Item, statics};
use indexmap::IndexMap;
use std::collections::BTreeMap;

/// Name -> representative image. Iterates in ascending name order.
pub type NameImageMap = BTreeMap<String, String>;

/// The three disjoint home-page buckets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HomeBuckets {
    pub cases: NameImageMap,
    pub others: NameImageMap,
    pub souvenirs: NameImageMap,
}

/// Knife/glove groups (taskbar) and everything else (collapsible sections),
/// both in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderGroups {
    pub condensed: IndexMap<String, Vec<Item>>,
    pub regular: IndexMap<String, Vec<Item>>,
}

impl RenderGroups {
    pub fn item_count(&self) -> usize {
        self.condensed
            .values()
            .chain(self.regular.values())
            .map(Vec::len)
            .sum()
    }
}

/// Buckets every item with a resolvable collection into exactly one of
/// souvenir / case / other. Souvenir wins over case, case over other.
pub fn group_for_home(items: &[Item]) -> HomeBuckets {
    let mut buckets = HomeBuckets::default();

    for item in items {
        let Some(collection) = item.primary_collection() else {
            continue;
        };
        let collection_image = collection
            .image
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(item.image());

        let is_souvenir = item.souvenir
            || collection
                .name
                .to_lowercase()
                .contains(statics::SOUVENIR_MARKER);

        if is_souvenir {
            buckets
                .souvenirs
                .entry(collection.name.clone())
                .or_insert_with(|| collection_image.to_string());
            continue;
        }

        if !item.crates.is_empty() {
            // Cases are keyed by crate name, not collection name.
            for krate in &item.crates {
                buckets
                    .cases
                    .entry(krate.name.clone())
                    .or_insert_with(|| krate.image().to_string());
            }
            continue;
        }

        buckets
            .others
            .entry(collection.name.clone())
            .or_insert_with(|| collection_image.to_string());
    }

    buckets
}

/// Position in the display order, by category first and rarity second.
pub fn rank(item: &Item) -> u32 {
    let lookup = |name: Option<&str>| {
        let name = name?;
        statics::RANK_ORDER
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, r)| *r)
    };
    lookup(item.category_name())
        .or_else(|| lookup(item.rarity_name()))
        .unwrap_or(statics::RANK_DEFAULT)
}

/// Stable ascending sort by [`rank`].
pub fn sort_by_rank(items: &mut [Item]) {
    items.sort_by_key(rank);
}

/// Weapon for knives/gloves (falling back to the category), rarity otherwise.
pub fn group_key(item: &Item) -> &str {
    if item.is_condensed() {
        item.weapon_name()
            .or(item.category_name())
            .unwrap_or(statics::GROUP_UNKNOWN)
    } else {
        item.rarity_name().unwrap_or(statics::GROUP_UNKNOWN)
    }
}

pub fn group_for_render(items: &[Item]) -> RenderGroups {
    let mut grouped: IndexMap<String, Vec<Item>> = IndexMap::new();
    for item in items {
        grouped
            .entry(group_key(item).to_string())
            .or_default()
            .push(item.clone());
    }

    let mut groups = RenderGroups::default();
    for (name, members) in grouped {
        // A group is condensed when its first member is a knife or glove.
        let condensed = members.first().is_some_and(Item::is_condensed);
        if condensed {
            groups.condensed.insert(name, members);
        } else {
            groups.regular.insert(name, members);
        }
    }
    groups
}

/// Entries of the "Collections" menu: every case of a non-souvenir item plus
/// every item's thematic collection.
pub fn navbar_collections(items: &[Item]) -> NameImageMap {
    let mut map = NameImageMap::new();
    for item in items {
        if !item.souvenir {
            for krate in &item.crates {
                map.entry(krate.name.clone())
                    .or_insert_with(|| krate.image().to_string());
            }
        }
        if let Some(collection) = item.primary_collection() {
            map.entry(collection.name.clone())
                .or_insert_with(|| collection.image().to_string());
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::{group_key, rank};
    use crate::item::{Item, Rarity, Tag};

    fn tagged(category: &str, rarity: &str) -> Item {
        Item {
            name: format!("{category}/{rarity}"),
            category: Some(Tag {
                name: category.to_string(),
            }),
            rarity: Some(Rarity {
                name: rarity.to_string(),
                color: None,
            }),
            ..Default::default()
        }
    }

    #[test]
    fn rank_prefers_category_over_rarity() {
        assert_eq!(rank(&tagged("Knives", "Covert")), 0);
        assert_eq!(rank(&tagged("Rifles", "Covert")), 4);
        assert_eq!(rank(&tagged("Rifles", "Remarkable")), 999);
        assert_eq!(rank(&Item::default()), 999);
    }

    #[test]
    fn group_key_falls_back_to_category_then_unknown() {
        let glove = tagged("Gloves", "Extraordinary");
        assert_eq!(group_key(&glove), "Gloves");

        let mut knife = tagged("Knives", "Covert");
        knife.weapon = Some(Tag {
            name: "Karambit".to_string(),
        });
        assert_eq!(group_key(&knife), "Karambit");

        let mut no_rarity = tagged("Pistols", "x");
        no_rarity.rarity = None;
        assert_eq!(group_key(&no_rarity), "Unknown");
    }
}
