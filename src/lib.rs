//! Core library for Skindex, a desktop browser for the CS2 skin catalog.
//! Loads the item feed, groups it into collections and rarity sections, and
//! renders routed views (home, search, collection) for the egui front end.

mod app;
mod catalog;
mod config;
mod doppler;
mod grouping;
mod gui;
mod item;
mod related;
mod route;
pub mod statics;
mod view;

pub use app::AppState;
pub use catalog::{Catalog, FeedFormat, FeedSource, LoadError, spawn_load};
pub use config::{Config, RelatedStrategy};
pub use doppler::expand_doppler_variants;
pub use grouping::{
    HomeBuckets, NameImageMap, RenderGroups, group_for_home, group_for_render,
    navbar_collections, rank, sort_by_rank,
};
pub use gui::run_gui;
pub use item::{CollectionRef, Item, PatternField, Rarity, Tag};
pub use related::{
    RelatedCollections, RelatedLink, RelatedPanel, SharedKnifeCases, StaticRelatedTable,
};
pub use route::{History, Route};
pub use view::{
    Card, HomeView, ListingKind, ListingView, Section, Selection, TaskbarEntry, Tile, ViewModel,
    render,
};
