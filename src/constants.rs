/// Raw field names as produced by the resolution crawler
pub const URL_FIELD: &str = "url";
pub const DATE_FIELD: &str = "date";
pub const RESOLUTION_NUMBER_FIELD: &str = "resolution_number";
pub const GOV_FIELD: &str = "gov";
pub const TITLE_FIELD: &str = "title";
pub const SUBJECT_FIELD: &str = "subject";
pub const BODY_FIELD: &str = "body";

/// Default export file, created fresh on every run
pub const DEFAULT_OUTPUT_PATH: &str = "gov.json";

/// Default directory for rolling log files
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

// Environment overrides
pub const OUTPUT_ENV: &str = "RESOLUTIONS_OUTPUT";
pub const LOG_DIR_ENV: &str = "RESOLUTIONS_LOG_DIR";
