//! Climate History Core Library
//!
//! Shared helpers for the climate API service:
//! - Configuration loading (XDG-compliant)
//! - Strict `YYYY-MM-DD` date parsing and trailing window arithmetic

mod config;
pub mod dates;

pub use config::{find_config_file, load_config, ConfigSource};
pub use dates::{format_date, parse_date, window_start, DateError, DATE_FORMAT};

/// Application name used for XDG paths
pub const APP_NAME: &str = "climate-api";

/// Default API port
pub const DEFAULT_API_PORT: u16 = 5000;

/// Default trailing window, in days, for the precipitation and tobs summaries
pub const DEFAULT_WINDOW_DAYS: u32 = 365;

/// Default per-query timeout in seconds
pub const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 10;
