// Single source of truth for all default values.

// --- Server ---
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_STATIC_DIR: &str = "static";
pub const DEFAULT_INDEX_FILE: &str = "index.html";

// --- Model ---
pub const DEFAULT_NATIVE_FILE: &str = crate::constants::NATIVE_MODEL_FILE;
pub const DEFAULT_LEGACY_FILE: &str = crate::constants::LEGACY_MODEL_FILE;
/// Legacy decode strategies, in the order they are tried.
pub const DEFAULT_LEGACY_STRATEGIES: [&str; 4] = ["latin1", "bytes", "default", "compat"];

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
/// Levels accepted in `log_level`, alone or as `target=level` directives.
pub const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

// --- Config file ---
pub const DEFAULT_CONFIG_FILENAME: &str = "pathway.toml";
