use crate::catalog::FeedSource;
use crate::related::{RelatedCollections, SharedKnifeCases, StaticRelatedTable};
use std::path::PathBuf;

/// How the related-collections bar is computed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RelatedStrategy {
    /// Cases sharing a knife model with the viewed collection.
    #[default]
    SharedKnives,
    /// A hand-maintained JSON table of related names.
    Table(PathBuf),
}

impl RelatedStrategy {
    /// A table that fails to load is logged and behaves as an empty table.
    pub fn build(&self) -> Box<dyn RelatedCollections> {
        match self {
            RelatedStrategy::SharedKnives => Box::new(SharedKnifeCases),
            RelatedStrategy::Table(path) => match StaticRelatedTable::load_path(path) {
                Ok(table) => Box::new(table),
                Err(e) => {
                    tracing::error!(
                        path = %path.display(),
                        error = %format!("{:#}", anyhow::Error::from(e)),
                        "failed to load related collections table"
                    );
                    Box::new(StaticRelatedTable::default())
                }
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub feed: FeedSource,
    pub related: RelatedStrategy,
    /// Location (`?search=...` / `?collection=...`) shown once the feed has loaded.
    pub initial_location: String,
    pub theme_dark: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feed: FeedSource::default(),
            related: RelatedStrategy::default(),
            initial_location: String::new(),
            theme_dark: true,
        }
    }
}
