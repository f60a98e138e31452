use std::{io, path::PathBuf};

use chrono::NaiveDateTime;
use chrono_tz::Tz;
use serde::Serialize;
use thiserror::Error;

use crate::constants;

/// Structure representing a candle (OHLCV data).
///
/// Field order matches the column order of the generated CSV file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Candle {
    pub timestamp: i64, // Epoch seconds of the candle.
    pub open: f64,      // Opening price.
    pub high: f64,      // Highest price.
    pub low: f64,       // Lowest price.
    pub close: f64,     // Closing price.
    pub volume: f64,    // Trading volume.
}

impl Candle {
    /// Returns a copy with prices and volume rounded to the output precision.
    pub fn rounded(&self) -> Candle {
        Candle {
            timestamp: self.timestamp,
            open: round_to_decimals(self.open, constants::PRICE_DECIMALS),
            high: round_to_decimals(self.high, constants::PRICE_DECIMALS),
            low: round_to_decimals(self.low, constants::PRICE_DECIMALS),
            close: round_to_decimals(self.close, constants::PRICE_DECIMALS),
            volume: round_to_decimals(self.volume, constants::PRICE_DECIMALS),
        }
    }
}

/// Rounds half to even on the scaled value. Never returns `-0.0`.
pub fn round_to_decimals(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    // adding 0.0 turns -0.0 into 0.0 and leaves every other value unchanged
    (value * factor).round_ties_even() / factor + 0.0
}

/// Parameters for one generation run.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub output_path: PathBuf,       // File to create or overwrite.
    pub num_rows: u64,              // Number of data rows (header excluded).
    pub start_time: NaiveDateTime,  // Naive timestamp of the first candle.
    pub timezone: Option<Tz>,       // None = system local timezone.
    pub base_price: f64,            // Price every candle's open is drawn around.
    pub seed: Option<u64>,          // None = unseeded thread rng.
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(constants::DEFAULT_OUTPUT_PATH),
            num_rows: constants::DEFAULT_NUM_ROWS,
            start_time: constants::DEFAULT_START,
            timezone: None,
            base_price: constants::DEFAULT_BASE_PRICE,
            seed: None,
        }
    }
}

pub type Result<T> = std::result::Result<T, GenerateError>;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("start time {0} does not exist in timezone {1}")]
    InvalidStartTime(NaiveDateTime, String),
    #[error("{0} rows overflow the timestamp range")]
    TimestampOverflow(u64),
}
