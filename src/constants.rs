use chrono::{NaiveDate, NaiveDateTime};

// Output defaults
pub const DEFAULT_OUTPUT_PATH: &str = "BTCUSDT_big.csv";
pub const DEFAULT_NUM_ROWS: u64 = 500_000;
pub const DEFAULT_BASE_PRICE: f64 = 10_000.0;
// Larger magnitudes lose the second decimal or get written in exponent form.
pub const MAX_ABS_BASE_PRICE: f64 = 1e12;

// 2020-01-01T00:00:00, naive. Resolved in the local zone unless one is given.
pub const DEFAULT_START_TIME: &str = "2020-01-01T00:00:00";
pub const START_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
pub const DEFAULT_START: NaiveDateTime = match NaiveDate::from_ymd_opt(2020, 1, 1) {
    Some(date) => match date.and_hms_opt(0, 0, 0) {
        Some(start) => start,
        None => panic!("invalid default start time"),
    },
    None => panic!("invalid default start date"),
};

/// Seconds between two consecutive candles.
pub const CANDLE_INTERVAL_SECS: i64 = 60;

// Distribution bounds, all half-open [low, high).
pub const OPEN_NOISE: (f64, f64) = (-50.0, 50.0);
pub const CLOSE_NOISE: (f64, f64) = (-50.0, 50.0);
pub const WICK_NOISE: (f64, f64) = (0.0, 10.0);
pub const VOLUME_RANGE: (f64, f64) = (0.1, 100.0);

/// Decimal places kept for prices and volume in the output file.
pub const PRICE_DECIMALS: i32 = 2;

pub const CSV_HEADER: [&str; 6] = ["timestamp", "open", "high", "low", "close", "volume"];

// log a progress line every N rows
pub const PROGRESS_LOG_EVERY: u64 = 100_000;
