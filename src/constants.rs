/// Defaults shared by the config layer, the HTTP source and the views

// SpaceX v4 REST API
pub const DEFAULT_BASE_URL: &str = "https://api.spacexdata.com/v4";
pub const LAUNCHES_PATH: &str = "launches";
pub const ROCKETS_PATH: &str = "rockets";

// Category used by the filter view when nothing else is configured
pub const DEFAULT_CATEGORY: &str = "Falcon 9";

/// Sentinel for unresolved rocket names, missing dates and failures without a reason
pub const UNKNOWN: &str = "Unknown";

pub const DEFAULT_TOP_N: usize = 5;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

// How many items the preview sections of the report show
pub const NORMALIZED_PREVIEW_LEN: usize = 2;
pub const SUMMARY_PREVIEW_LEN: usize = 3;
pub const GROUP_KEY_PREVIEW_LEN: usize = 5;

pub const CONFIG_FILE: &str = "spacex_report.toml";

// Logging
pub const LOG_DIR: &str = "logs";
pub const LOG_FILE_PREFIX: &str = "spacex_report.log";
pub const DEFAULT_LOG_FILTER: &str = "spacex_report=info";

/// Build an endpoint URL from a base and a collection path
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path)
}
