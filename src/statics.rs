// Central place for UI strings, fixed lookup tables and other non-localized constants.
// Keep these out of gui.rs/view.rs to reduce duplication and make tweaks safer.

// External data
pub const SKINS_URL: &str =
    "https://raw.githubusercontent.com/ByMykel/CSGO-API/main/public/api/en/skins.json";
pub const HTTP_USER_AGENT: &str = concat!("skindex/", env!("CARGO_PKG_VERSION"));
pub const HTTP_TIMEOUT_SECS: u64 = 60;

// Location query parameters
pub const QUERY_SEARCH: &str = "search";
pub const QUERY_COLLECTION: &str = "collection";

// Feed categories that render through the condensed taskbar.
pub const CATEGORY_KNIVES: &str = "Knives";
pub const CATEGORY_GLOVES: &str = "Gloves";

// Group key for items without a rarity.
pub const GROUP_UNKNOWN: &str = "Unknown";

pub const SOUVENIR_MARKER: &str = "souvenir";
pub const DOPPLER_MARKER: &str = "doppler";

/// Sort rank by category or rarity name. Anything else sorts last.
pub const RANK_ORDER: &[(&str, u32)] = &[
    (CATEGORY_KNIVES, 0),
    (CATEGORY_GLOVES, 1),
    ("Extraordinary", 2),
    ("Contraband", 3),
    ("Covert", 4),
    ("Classified", 5),
    ("Restricted", 6),
    ("Mil-Spec Grade", 7),
    ("Industrial Grade", 8),
    ("Consumer Grade", 9),
];
pub const RANK_DEFAULT: u32 = 999;

/// Section header colors by rarity name (RGB).
pub const RARITY_COLORS: &[(&str, [u8; 3])] = &[
    ("Covert", [0xEB, 0x4B, 0x4B]),
    ("Classified", [0xD3, 0x2C, 0xE6]),
    ("Restricted", [0x88, 0x47, 0xFF]),
    ("Mil-Spec Grade", [0x4B, 0x69, 0xFF]),
    ("Industrial Grade", [0x5E, 0x98, 0xD9]),
    ("Consumer Grade", [0xB0, 0xC3, 0xD9]),
    ("Extraordinary", [0xDD, 0xAA, 0x00]),
    ("Contraband", [0xFF, 0xCC, 0x66]),
];
pub const COLOR_DEFAULT: [u8; 3] = [0xCC, 0xCC, 0xCC];

// Doppler finish keywords, checked in order against the lowercased finish text.
pub const DOPPLER_FINISH_VARIANTS: &[(&str, &str)] = &[
    ("ruby", "Ruby"),
    ("sapphire", "Sapphire"),
    ("black pearl", "Black Pearl"),
    ("phase 1", "Phase 1"),
    ("phase 2", "Phase 2"),
    ("phase 3", "Phase 3"),
    ("phase 4", "Phase 4"),
    ("emerald", "Emerald"),
];

// Doppler pattern ids used by the CS2 data.
pub const DOPPLER_PATTERN_VARIANTS: &[(u64, &str)] = &[
    (415, "Phase 1"),
    (416, "Phase 2"),
    (417, "Phase 3"),
    (418, "Phase 4"),
    (419, "Ruby"),
    (420, "Sapphire"),
    (421, "Black Pearl"),
    (568, "Emerald"),
];
pub const DOPPLER_UNKNOWN_VARIANT: &str = "Unknown Variant";

// English UI strings (EN_ prefix to make future localization easier)
pub const EN_APP_TITLE: &str = "Skindex";

pub const EN_BTN_HOME: &str = "Home";
pub const EN_BTN_COLLECTIONS: &str = "Collections";
pub const EN_BTN_SEARCH: &str = "Search";
pub const EN_BTN_OPEN_FEED: &str = "Open feed...";
pub const EN_BTN_ABOUT: &str = "About";
pub const EN_BTN_TOGGLE_THEME: &str = "Theme";
pub const EN_BTN_CLEAR: &str = "Clear";

pub const EN_NAV_BACK: &str = "<- Back";
pub const EN_NAV_FORWARD: &str = "Forward ->";

pub const EN_HINT_SEARCH: &str = "Search...";

pub const EN_WINDOW_ABOUT: &str = "About";
pub const EN_ABOUT_HEADING: &str = "Skindex";
pub const EN_ABOUT_VERSION: &str = "Version:";
pub const EN_ABOUT_SHORTCUTS: &str = "Shortcuts:";
pub const EN_ABOUT_SHORTCUT_ALT: &str = "- Alt+Left / Alt+Right: Back/Forward";
pub const EN_ABOUT_SHORTCUT_MOUSE: &str = "- Mouse back/forward buttons also work";
pub const EN_ABOUT_DATA_SOURCE: &str = "Item data";

pub const EN_LOADING: &str = "Loading catalog...";
pub const EN_LOAD_FAILED: &str = "Failed to load catalog";

pub const EN_HEADING_CASES: &str = "Case Collections";
pub const EN_HEADING_OTHERS: &str = "Other Collections";
pub const EN_HEADING_SOUVENIRS: &str = "Souvenir Packages";

pub const EN_LABEL_SIMILAR_CASES: &str = "Similar Cases:";
pub const EN_LABEL_SIMILAR_COLLECTIONS: &str = "Similar Collections:";
pub const EN_LABEL_SEARCH_RESULTS: &str = "Search:";

pub const EN_NO_ITEMS_PREFIX: &str = "No items found for";

pub const EN_HISTORY_LABEL: &str = "history:";
pub const EN_HISTORY_BACK: &str = "<-";
pub const EN_LABEL_ITEMS: &str = "items:";

pub const EN_FEED_FILTER_NAME: &str = "Item feed";
pub const EN_FEED_FILTER_EXTENSIONS: &[&str] = &["json", "gz"];
