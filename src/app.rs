use crate::related::{RelatedCollections, SharedKnifeCases};
use crate::route::{History, Route};
use crate::view::{self, Card, Selection, ViewModel};
use crate::{Catalog, Item};
use std::collections::HashSet;

/// Everything the window shows, owned in one place.
///
/// All transitions are synchronous `&mut self` calls, so a render can never be
/// re-entered while another one is running.
pub struct AppState {
    catalog: Option<Catalog>,
    related: Box<dyn RelatedCollections>,
    history: History,
    view: ViewModel,
    selection: Selection,
    /// Cards of the consolidated panel, rebuilt only when the selection changes.
    consolidated_cards: Vec<Card>,
    collapsed_sections: HashSet<String>,
    search_input: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new("", Box::new(SharedKnifeCases))
    }
}

impl AppState {
    pub fn new(initial_location: &str, related: Box<dyn RelatedCollections>) -> Self {
        Self {
            catalog: None,
            related,
            history: History::new(initial_location),
            view: ViewModel::Loading,
            selection: Default::default(),
            consolidated_cards: Vec::new(),
            collapsed_sections: HashSet::new(),
            search_input: String::new(),
        }
    }

    /// Installs the dataset and runs the initial route. The catalog is write-once.
    pub fn set_catalog(&mut self, catalog: Catalog) -> bool {
        if self.catalog.is_some() {
            tracing::warn!("catalog already loaded; ignoring second load");
            return false;
        }
        self.catalog = Some(catalog);
        self.reroute();
        true
    }

    pub fn catalog(&self) -> Option<&Catalog> {
        self.catalog.as_ref()
    }

    pub fn view(&self) -> &ViewModel {
        &self.view
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn location(&self) -> &str {
        self.history.current()
    }

    pub fn route(&self) -> Route {
        self.history.route()
    }

    pub fn search_input_mut(&mut self) -> &mut String {
        &mut self.search_input
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    /// Records `route` in history, then renders it.
    pub fn navigate(&mut self, route: &Route) {
        self.navigate_location(&route.to_location());
    }

    pub fn navigate_location(&mut self, location: &str) {
        self.history.push(location);
        self.reroute();
    }

    /// Submits the search box. Blank input is ignored.
    pub fn submit_search(&mut self) -> bool {
        let query = self.search_input.trim().to_lowercase();
        if query.is_empty() {
            return false;
        }
        self.navigate(&Route::Search(query));
        true
    }

    pub fn back(&mut self) -> bool {
        if !self.history.back() {
            return false;
        }
        self.reroute();
        true
    }

    pub fn forward(&mut self) -> bool {
        if !self.history.forward() {
            return false;
        }
        self.reroute();
        true
    }

    /// Full render of the current location: clears the selection and section
    /// visibility, rebuilds the view and mirrors the search query into the search box.
    pub fn reroute(&mut self) {
        let route = self.history.route();
        self.selection.clear();
        self.consolidated_cards.clear();
        self.collapsed_sections.clear();

        let Some(catalog) = self.catalog.as_ref() else {
            tracing::debug!(?route, "catalog not loaded yet; skipping render");
            return;
        };

        tracing::debug!(?route, "routing");
        self.view = view::render(&route, catalog, self.related.as_ref());

        if let Route::Search(query) = &route {
            self.search_input = query.clone();
        }
    }

    /// Opens or closes a knife/glove group and refreshes only the consolidated panel.
    pub fn toggle_condensed(&mut self, name: &str) {
        let ViewModel::Listing(listing) = &self.view else {
            tracing::error!(group = name, "no listing view to select a group from");
            return;
        };
        let Some(items) = listing.condensed.get(name) else {
            tracing::error!(group = name, "condensed group not found in current view");
            return;
        };
        let open = self.selection.toggle(name, items);
        self.consolidated_cards = self
            .selection
            .consolidated()
            .iter()
            .map(Card::from_item)
            .collect();
        tracing::debug!(group = name, open, "toggled condensed group");
    }

    pub fn is_condensed_selected(&self, name: &str) -> bool {
        self.selection.is_selected(name)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Items of every selected taskbar group, in selection order.
    pub fn consolidated(&self) -> Vec<Item> {
        self.selection.consolidated()
    }

    pub fn consolidated_cards(&self) -> &[Card] {
        &self.consolidated_cards
    }

    pub fn toggle_section(&mut self, name: &str) {
        if !self.collapsed_sections.remove(name) {
            self.collapsed_sections.insert(name.to_string());
        }
    }

    pub fn is_section_open(&self, name: &str) -> bool {
        !self.collapsed_sections.contains(name)
    }
}

#[cfg(test)]
mod tests {
    use super::AppState;
    use crate::item::Tag;
    use crate::view::ViewModel;
    use crate::{Catalog, Item};

    #[test]
    fn routing_before_load_keeps_loading_view() {
        let mut state = AppState::default();
        state.navigate_location("?search=ak");
        assert_eq!(state.view(), &ViewModel::Loading);
        assert_eq!(state.location(), "?search=ak");
    }

    #[test]
    fn catalog_is_write_once() {
        let mut state = AppState::default();
        assert!(state.set_catalog(Catalog::default()));
        let second = Catalog::new(vec![Item::default()]);
        assert!(!state.set_catalog(second));
        assert_eq!(state.catalog().map(Catalog::len), Some(0));
    }

    #[test]
    fn blank_search_is_ignored() {
        let mut state = AppState::default();
        state.set_catalog(Catalog::default());
        *state.search_input_mut() = "   ".to_string();
        assert!(!state.submit_search());
        assert_eq!(state.history().back_len(), 0);
    }

    #[test]
    fn section_toggle_flips_only_that_section() {
        let mut state = AppState::default();
        state.toggle_section("Covert");
        assert!(!state.is_section_open("Covert"));
        assert!(state.is_section_open("Classified"));
        state.toggle_section("Covert");
        assert!(state.is_section_open("Covert"));
    }

    #[test]
    fn toggling_without_listing_is_skipped() {
        let mut state = AppState::default();
        state.toggle_condensed("Karambit");
        assert!(state.selection().is_empty());
        assert!(state.consolidated_cards().is_empty());
    }

    #[test]
    fn consolidated_cards_follow_selection_and_reset_on_reroute() {
        let knife = |name: &str| Item {
            name: name.to_string(),
            category: Some(Tag {
                name: "Knives".to_string(),
            }),
            weapon: Some(Tag {
                name: "Karambit".to_string(),
            }),
            ..Default::default()
        };
        let mut state = AppState::default();
        state.set_catalog(Catalog::new(vec![
            knife("Karambit | Fade"),
            knife("Karambit | Slaughter"),
        ]));
        state.navigate_location("?search=karambit");

        state.toggle_condensed("Karambit");
        let labels: Vec<&str> = state
            .consolidated_cards()
            .iter()
            .map(|c| c.label.as_str())
            .collect();
        assert_eq!(labels, ["Karambit | Fade", "Karambit | Slaughter"]);

        state.reroute();
        assert!(state.consolidated_cards().is_empty());

        state.toggle_condensed("Karambit");
        state.toggle_condensed("Karambit");
        assert!(state.consolidated_cards().is_empty());
    }
}
