use crate::{Item, statics};
use flate2::read::GzDecoder;
use std::{
    fmt, fs,
    io::Read,
    path::{Path, PathBuf},
    sync::mpsc,
    thread,
    time::Duration,
};

/// Where the item feed comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    Url(String),
    Path(PathBuf),
}

impl FeedSource {
    /// `http(s)://` is a URL, anything else a local path.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.starts_with("http://") || s.starts_with("https://") {
            FeedSource::Url(s.to_string())
        } else {
            FeedSource::Path(PathBuf::from(s))
        }
    }
}

impl Default for FeedSource {
    fn default() -> Self {
        FeedSource::Url(statics::SKINS_URL.to_string())
    }
}

impl fmt::Display for FeedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedSource::Url(url) => f.write_str(url),
            FeedSource::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("reading {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("gzip decompress")]
    Decompress(#[source] std::io::Error),
    #[error("requesting {url}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("parsing JSON")]
    Json(#[from] serde_json::Error),
    #[error("loader thread exited without a result")]
    Disconnected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedFormat {
    Json,
    GzipJson,
}

/// The loaded dataset. Read-only once constructed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn load(source: &FeedSource) -> Result<Self, LoadError> {
        match source {
            FeedSource::Url(url) => Self::load_url(url),
            FeedSource::Path(path) => Self::load_path(path),
        }
    }

    pub fn load_path(path: &Path) -> Result<Self, LoadError> {
        let bytes = fs::read(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let format = detect_format(path, &bytes);
        Self::from_bytes(&bytes, format)
    }

    pub fn load_url(url: &str) -> Result<Self, LoadError> {
        let http_err = |source: reqwest::Error| LoadError::Http {
            url: url.to_string(),
            source,
        };
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(statics::HTTP_TIMEOUT_SECS))
            .user_agent(statics::HTTP_USER_AGENT)
            .build()
            .map_err(http_err)?;

        let response = client.get(url).send().map_err(http_err)?;
        if !response.status().is_success() {
            return Err(LoadError::Status {
                url: url.to_string(),
                status: response.status(),
            });
        }
        let bytes = response.bytes().map_err(http_err)?;
        let format = if has_gzip_magic(&bytes) {
            FeedFormat::GzipJson
        } else {
            FeedFormat::Json
        };
        Self::from_bytes(&bytes, format)
    }

    /// Parses a JSON array of items. Entries that cannot be read as an item
    /// are skipped with a warning; only a non-array document is an error.
    pub fn from_bytes(bytes: &[u8], format: FeedFormat) -> Result<Self, LoadError> {
        let entries: Vec<serde_json::Value> = match format {
            FeedFormat::Json => serde_json::from_slice(bytes)?,
            FeedFormat::GzipJson => {
                let mut decoder = GzDecoder::new(bytes);
                let mut out = Vec::new();
                decoder
                    .read_to_end(&mut out)
                    .map_err(LoadError::Decompress)?;
                serde_json::from_slice(&out)?
            }
        };

        let total = entries.len();
        let items: Vec<Item> = entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value(entry) {
                Ok(item) => Some(item),
                Err(e) => {
                    tracing::warn!(index, error = %e, "skipping unreadable feed entry");
                    None
                }
            })
            .collect();
        if items.len() < total {
            tracing::warn!(skipped = total - items.len(), total, "feed had unreadable entries");
        }
        Ok(Self::new(items))
    }

    /// Case-insensitive substring match on item name or weapon name.
    pub fn search(&self, query: &str) -> Vec<Item> {
        let query = query.trim().to_lowercase();
        self.items
            .iter()
            .filter(|item| {
                item.name.to_lowercase().contains(&query)
                    || item
                        .weapon_name()
                        .is_some_and(|w| w.to_lowercase().contains(&query))
            })
            .cloned()
            .collect()
    }

    /// Items whose crate or collection name equals the trimmed request exactly.
    pub fn collection(&self, name: &str) -> Vec<Item> {
        let name = name.trim();
        self.items
            .iter()
            .filter(|item| item.belongs_to(name))
            .cloned()
            .collect()
    }
}

/// Runs [`Catalog::load`] on a background thread. The receiver yields exactly one result.
pub fn spawn_load(source: FeedSource) -> mpsc::Receiver<Result<Catalog, LoadError>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        tracing::info!(%source, "loading item feed");
        let result = Catalog::load(&source);
        match &result {
            Ok(catalog) => tracing::info!(items = catalog.len(), "item feed loaded"),
            Err(e) => tracing::error!(error = %e, "item feed failed to load"),
        }
        // The receiver may already be gone if the window closed.
        let _ = tx.send(result);
    });
    rx
}

fn has_gzip_magic(bytes: &[u8]) -> bool {
    bytes.len() >= 2 && bytes[0] == 0x1F && bytes[1] == 0x8B
}

fn detect_format(path: &Path, bytes: &[u8]) -> FeedFormat {
    if path.extension().and_then(|e| e.to_str()) == Some("gz") || has_gzip_magic(bytes) {
        return FeedFormat::GzipJson;
    }
    FeedFormat::Json
}
