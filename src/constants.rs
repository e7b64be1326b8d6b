//! Application constants and configuration

pub const APP_NAME: &str = "Word Cloud Explorer";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

// Classic endpoints
pub const TOP_WORDS_PATH: &str = "/get_top_words";
pub const SEARCH_PATH: &str = "/search";

// News API endpoints
pub const API_TOP_WORDS_PATH: &str = "/api/topwords";
pub const API_ARTICLES_PATH: &str = "/api/articles";
pub const DEFAULT_RECENT_DAYS: u32 = 3;
pub const DEFAULT_ARTICLE_LIMIT: u32 = 20;

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

/// Word cloud canvas, in layout units
pub const CLOUD_WIDTH: f32 = 600.0;
pub const CLOUD_HEIGHT: f32 = 400.0;
pub const CLOUD_PADDING: f32 = 5.0;
pub const CLOUD_FONT_FAMILY: &str = "Impact";
/// Font size per unit of word count
pub const SIZE_MULTIPLIER: f32 = 2.0;
pub const DEFAULT_LAYOUT_SEED: u64 = 0x5EED_C10D;
/// Words beyond this many (by size) are left out of the cloud
pub const MAX_CLOUD_WORDS: usize = 150;
/// Largest canvas side accepted from settings
pub const MAX_CLOUD_SIDE: f32 = 1200.0;

/// Naver news sections the crawler files articles under
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "정치",
    "경제",
    "사회",
    "생활/문화",
    "IT/과학",
    "세계",
];
