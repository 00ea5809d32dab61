/// Longest accepted debounce quiet period
pub const MAX_DEBOUNCE_RATE_MS: u64 = 10_000;

/// Bounds for the stdout flush interval
pub const MIN_TICK_INTERVAL_MS: u64 = 10;
pub const MAX_TICK_INTERVAL_MS: u64 = 1_000;

/// Label formats that can be expressed in a config file
pub const SUPPORTED_LABEL_FORMATS: [&str; 2] = ["path", "startCase"];
