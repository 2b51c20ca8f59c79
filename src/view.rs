//! Pure description of what the window shows.
//!
//! [`render`] turns a route plus the catalog into a [`ViewModel`]; `gui.rs` only paints
//! it. Everything here is deterministic, so rendering the same route twice gives equal
//! view models.

use crate::doppler::expand_doppler_variants;
use crate::grouping::{self, NameImageMap};
use crate::related::{RelatedCollections, RelatedPanel};
use crate::route::Route;
use crate::{Catalog, Item, statics};
use indexmap::IndexMap;

#[derive(Debug, Clone, PartialEq)]
pub enum ViewModel {
    /// Nothing loaded yet (or the load failed).
    Loading,
    Home(HomeView),
    Listing(ListingView),
}

/// A clickable collection entry on the home page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pub name: String,
    pub image: String,
    pub location: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HomeView {
    pub cases: Vec<Tile>,
    pub others: Vec<Tile>,
    pub souvenirs: Vec<Tile>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub label: String,
    pub image: String,
    pub color: [u8; 3],
}

impl Card {
    pub fn from_item(item: &Item) -> Self {
        Self {
            label: item.label().to_string(),
            image: item.image().to_string(),
            color: item
                .rarity_color()
                .and_then(parse_hex_color)
                .unwrap_or(statics::COLOR_DEFAULT),
        }
    }
}

/// One button in the knife/glove taskbar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskbarEntry {
    pub name: String,
    pub image: String,
    pub count: usize,
}

/// A collapsible rarity section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    pub color: [u8; 3],
    pub cards: Vec<Card>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingKind {
    Search,
    Collection,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListingView {
    pub kind: ListingKind,
    pub title: String,
    pub banner: Option<String>,
    pub related: Option<RelatedPanel>,
    pub taskbar: Vec<TaskbarEntry>,
    pub sections: Vec<Section>,
    /// Set when the route matched nothing; replaces the item grid.
    pub empty_message: Option<String>,
    /// Members of each taskbar group, looked up when a group gets selected.
    pub condensed: IndexMap<String, Vec<Item>>,
}

impl ListingView {
    pub fn item_count(&self) -> usize {
        self.condensed.values().map(Vec::len).sum::<usize>()
            + self.sections.iter().map(|s| s.cards.len()).sum::<usize>()
    }
}

/// Knife/glove groups currently opened from the taskbar, in selection order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    groups: IndexMap<String, Vec<Item>>,
}

impl Selection {
    pub fn clear(&mut self) {
        self.groups.clear();
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.groups.contains_key(name)
    }

    /// Opens the group if closed, closes it if open. Returns whether it is now open.
    pub fn toggle(&mut self, name: &str, items: &[Item]) -> bool {
        if self.groups.shift_remove(name).is_some() {
            return false;
        }
        self.groups.insert(name.to_string(), items.to_vec());
        true
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// All selected groups' items concatenated in selection order.
    pub fn consolidated(&self) -> Vec<Item> {
        self.groups.values().flatten().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

pub fn render(route: &Route, catalog: &Catalog, related: &dyn RelatedCollections) -> ViewModel {
    match route {
        Route::Home => ViewModel::Home(render_home(catalog.items())),
        Route::Search(query) => ViewModel::Listing(render_listing(
            ListingKind::Search,
            query,
            catalog.search(query),
            None,
            None,
        )),
        Route::Collection(name) => {
            let items = catalog.collection(name);
            let (banner, panel) = if items.is_empty() {
                (None, None)
            } else {
                (
                    collection_banner(&items),
                    related.related(catalog, name, &items),
                )
            };
            ViewModel::Listing(render_listing(
                ListingKind::Collection,
                name.trim(),
                items,
                banner,
                panel,
            ))
        }
    }
}

pub fn render_home(items: &[Item]) -> HomeView {
    let buckets = grouping::group_for_home(items);
    HomeView {
        cases: tiles(&buckets.cases),
        others: tiles(&buckets.others),
        souvenirs: tiles(&buckets.souvenirs),
    }
}

pub fn tiles(map: &NameImageMap) -> Vec<Tile> {
    map.iter()
        .map(|(name, image)| Tile {
            name: name.clone(),
            image: image.clone(),
            location: Route::Collection(name.clone()).to_location(),
        })
        .collect()
}

/// Expands, sorts and groups `items` into taskbar entries and rarity sections.
pub fn render_listing(
    kind: ListingKind,
    title: &str,
    items: Vec<Item>,
    banner: Option<String>,
    related: Option<RelatedPanel>,
) -> ListingView {
    if items.is_empty() {
        return ListingView {
            kind,
            title: title.to_string(),
            banner: None,
            related: None,
            taskbar: Vec::new(),
            sections: Vec::new(),
            empty_message: Some(format!("{} \"{}\"", statics::EN_NO_ITEMS_PREFIX, title)),
            condensed: IndexMap::new(),
        };
    }

    let mut items = expand_doppler_variants(&items);
    grouping::sort_by_rank(&mut items);
    let groups = grouping::group_for_render(&items);

    let taskbar = groups
        .condensed
        .iter()
        .map(|(name, members)| TaskbarEntry {
            name: name.clone(),
            image: members
                .first()
                .map(|i| i.image().to_string())
                .unwrap_or_default(),
            count: members.len(),
        })
        .collect();

    let sections = groups
        .regular
        .iter()
        .map(|(name, members)| Section {
            name: name.clone(),
            color: rarity_header_color(name),
            cards: members.iter().map(Card::from_item).collect(),
        })
        .collect();

    ListingView {
        kind,
        title: title.to_string(),
        banner,
        related,
        taskbar,
        sections,
        empty_message: None,
        condensed: groups.condensed,
    }
}

/// Case artwork for case views, the collection artwork otherwise.
pub fn collection_banner(items: &[Item]) -> Option<String> {
    if let Some(krate) = items.iter().find_map(|i| i.crates.first()) {
        return krate.image.clone().filter(|s| !s.is_empty());
    }
    let first = items.first()?;
    first
        .primary_collection()
        .and_then(|c| c.image.clone())
        .filter(|s| !s.is_empty())
        .or_else(|| first.image.clone().filter(|s| !s.is_empty()))
}

pub fn rarity_header_color(name: &str) -> [u8; 3] {
    statics::RARITY_COLORS
        .iter()
        .find(|(k, _)| *k == name)
        .map(|(_, c)| *c)
        .unwrap_or(statics::COLOR_DEFAULT)
}

/// `#RRGGBB` or `RRGGBB`.
pub fn parse_hex_color(s: &str) -> Option<[u8; 3]> {
    let hex = s.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}
