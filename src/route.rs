use crate::statics;
use url::form_urlencoded;

/// What the window shows, derived from the location's query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Search(String),
    Collection(String),
}

impl Route {
    /// `search` takes precedence over `collection`; empty values count as absent.
    /// Accepts a bare query (`search=ak`), a query with `?`, or a full URL.
    pub fn from_query(location: &str) -> Self {
        let query = query_part(location);

        let mut search = None;
        let mut collection = None;
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            if value.is_empty() {
                continue;
            }
            match key.as_ref() {
                statics::QUERY_SEARCH if search.is_none() => search = Some(value.into_owned()),
                statics::QUERY_COLLECTION if collection.is_none() => {
                    collection = Some(value.into_owned())
                }
                _ => {}
            }
        }

        if let Some(query) = search {
            Route::Search(query)
        } else if let Some(name) = collection {
            Route::Collection(name)
        } else {
            Route::Home
        }
    }

    pub fn to_location(&self) -> String {
        let (key, value) = match self {
            Route::Home => return String::new(),
            Route::Search(query) => (statics::QUERY_SEARCH, query),
            Route::Collection(name) => (statics::QUERY_COLLECTION, name),
        };
        let encoded = form_urlencoded::Serializer::new(String::new())
            .append_pair(key, value)
            .finish();
        format!("?{encoded}")
    }
}

fn query_part(location: &str) -> &str {
    let location = location.trim();
    match location.split_once('?') {
        Some((_, query)) => query,
        None => location,
    }
}

/// Canonical stored form: `""` for no query, otherwise `?<query>`.
pub fn normalize_location(location: &str) -> String {
    let query = query_part(location);
    if query.is_empty() {
        String::new()
    } else {
        format!("?{query}")
    }
}

/// Back/forward stacks around the current location.
#[derive(Debug, Clone, Default)]
pub struct History {
    current: String,
    back: Vec<String>,
    forward: Vec<String>,
}

impl History {
    pub fn new(initial: &str) -> Self {
        Self {
            current: normalize_location(initial),
            back: Vec::new(),
            forward: Vec::new(),
        }
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn route(&self) -> Route {
        Route::from_query(&self.current)
    }

    /// Makes `location` current. Pushing the current location again replaces
    /// it in place, so repeated activation does not grow the back stack.
    /// Returns whether a new entry was recorded.
    pub fn push(&mut self, location: &str) -> bool {
        let location = normalize_location(location);
        if location == self.current {
            return false;
        }
        let prev = std::mem::replace(&mut self.current, location);
        self.back.push(prev);
        self.forward.clear();
        true
    }

    pub fn back(&mut self) -> bool {
        let Some(target) = self.back.pop() else {
            return false;
        };
        let prev = std::mem::replace(&mut self.current, target);
        self.forward.push(prev);
        true
    }

    pub fn forward(&mut self) -> bool {
        let Some(target) = self.forward.pop() else {
            return false;
        };
        let prev = std::mem::replace(&mut self.current, target);
        self.back.push(prev);
        true
    }

    pub fn back_len(&self) -> usize {
        self.back.len()
    }

    pub fn forward_len(&self) -> usize {
        self.forward.len()
    }
}

#[cfg(test)]
mod tests {
    use super::{History, Route, normalize_location};

    #[test]
    fn search_beats_collection() {
        assert_eq!(
            Route::from_query("?collection=Chroma%20Case&search=ak"),
            Route::Search("ak".to_string())
        );
        assert_eq!(
            Route::from_query("?collection=Chroma%20Case"),
            Route::Collection("Chroma Case".to_string())
        );
        assert_eq!(Route::from_query(""), Route::Home);
        assert_eq!(Route::from_query("?search=&other=1"), Route::Home);
    }

    #[test]
    fn accepts_full_urls_and_bare_queries() {
        assert_eq!(
            Route::from_query("https://example.test/database/?search=m4a1"),
            Route::Search("m4a1".to_string())
        );
        assert_eq!(
            Route::from_query("collection=Operation+Breakout+Weapon+Case"),
            Route::Collection("Operation Breakout Weapon Case".to_string())
        );
    }

    #[test]
    fn location_encoding_parses_back() {
        let route = Route::Collection("The 2021 Dust 2 & Mirage Collection".to_string());
        let location = route.to_location();
        assert!(location.starts_with("?collection="));
        assert_eq!(Route::from_query(&location), route);
        assert_eq!(Route::Home.to_location(), "");
    }

    #[test]
    fn normalize_location_adds_question_mark() {
        assert_eq!(normalize_location("search=x"), "?search=x");
        assert_eq!(normalize_location("  "), "");
        assert_eq!(normalize_location("?"), "");
    }

    #[test]
    fn push_back_forward() {
        let mut history = History::new("");
        assert!(history.push("?search=ak"));
        assert!(history.push("?collection=Chroma%20Case"));
        assert!(!history.push("?collection=Chroma%20Case"));
        assert_eq!(history.back_len(), 2);

        assert!(history.back());
        assert_eq!(history.current(), "?search=ak");
        assert!(history.back());
        assert_eq!(history.route(), Route::Home);
        assert!(!history.back());

        assert!(history.forward());
        assert_eq!(history.current(), "?search=ak");

        // A new push drops the forward entries.
        assert!(history.push("?search=awp"));
        assert_eq!(history.forward_len(), 0);
        assert!(!history.forward());
    }
}
