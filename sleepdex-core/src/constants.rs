//! Fixed keys and labels shared by every front-end.
//!
//! The catalog and the persisted acquisition blob are produced by the game's
//! fan data sheets, so these literals are part of the data format rather than
//! presentation choices.

// Storage and source keys --------------------------------------------------
pub const DEFAULT_STORAGE_KEY: &str = "pokemonSleepChecks";
pub const DEFAULT_CATALOG_PATH: &str = "pokemonsleep_data.json";
pub const ALL_RECORDS_KEY: &str = "すべての寝顔一覧";
pub const BACKUP_FILE_NAME: &str = "backup.json";

// Record field names -------------------------------------------------------
pub const FIELD_ID: &str = "ID";
pub const FIELD_NUMBER: &str = "No";
pub const FIELD_NAME: &str = "Name";
pub const FIELD_RARITY: &str = "DisplayRarity";
pub const FIELD_STYLE: &str = "Style";

// Labels -------------------------------------------------------------------
pub const ALL_LOCATIONS_LABEL: &str = "全寝顔";
pub const TOTAL_ROW_LABEL: &str = "合計";
pub const RATE_LABEL: &str = "取得率";
pub const FILTER_ANY_LABEL: &str = "全て";
pub const ACQUIRED_LABEL: &str = "取得済";
pub const MISSING_LABEL: &str = "未取得";
pub const IMPORT_ERROR_MESSAGE: &str = "無効なJSONファイルです。";

// Rarity -------------------------------------------------------------------
pub const STAR_GLYPHS: [char; 2] = ['☆', '★'];
pub const MIN_STAR_TIER: usize = 1;
pub const MAX_STAR_TIER: usize = 4;

// Rank ---------------------------------------------------------------------
pub const RANK_TIER_WEIGHT: u32 = 100;
pub const RANK_TIER_STEPS: u32 = 5;
pub const RANK_MASTER_STEPS: u32 = 20;

// Katakana ァ..ヶ shifted onto hiragana ぁ..ゖ
pub const KATAKANA_START: u32 = 0x30A1;
pub const KATAKANA_END: u32 = 0x30F6;
pub const KANA_OFFSET: u32 = 0x60;
