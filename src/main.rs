// Synthetic OHLCV fixture generator.
// Data models and errors.
mod model;
// Candle series generation.
mod series;
// File generation entry point.
mod generate;
// Data storage module.
mod store {
    /// Candle CSV output.
    pub mod candle;
}
// module storing defaults
mod constants;

use std::path::PathBuf;

use chrono::NaiveDateTime;
use chrono_tz::Tz;
use clap::Parser;
use dotenv::dotenv;

// Command-line argument parser. Every option defaults to the fixture's constants.
#[derive(Parser, Debug)]
#[command(about = "Generate a synthetic OHLCV candle CSV file", long_about = None)]
struct Args {
    /// Output CSV path.
    #[arg(short, long, default_value = constants::DEFAULT_OUTPUT_PATH)]
    output: PathBuf,

    /// Number of data rows to generate.
    #[arg(short = 'n', long, default_value_t = constants::DEFAULT_NUM_ROWS)]
    rows: u64,

    /// Naive start time of the first candle (YYYY-MM-DDTHH:MM:SS).
    #[arg(long, default_value = constants::DEFAULT_START_TIME, value_parser = parse_start_time)]
    start: NaiveDateTime,

    /// IANA timezone the start time is read in. Defaults to the system timezone.
    #[arg(long, value_parser = parse_timezone)]
    timezone: Option<Tz>,

    /// Base price every candle's open is drawn around.
    #[arg(long, default_value_t = constants::DEFAULT_BASE_PRICE, value_parser = parse_base_price)]
    base_price: f64,

    /// Seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,
}

impl From<Args> for model::GeneratorConfig {
    fn from(args: Args) -> Self {
        Self {
            output_path: args.output,
            num_rows: args.rows,
            start_time: args.start,
            timezone: args.timezone,
            base_price: args.base_price,
            seed: args.seed,
        }
    }
}

fn parse_start_time(s: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(s, constants::START_TIME_FORMAT).map_err(|e| e.to_string())
}

fn parse_base_price(s: &str) -> Result<f64, String> {
    let price: f64 = s.parse().map_err(|e: std::num::ParseFloatError| e.to_string())?;
    if !price.is_finite() || price.abs() > constants::MAX_ABS_BASE_PRICE {
        return Err(format!(
            "base price must be finite and within ±{}",
            constants::MAX_ABS_BASE_PRICE
        ));
    }
    Ok(price)
}

fn parse_timezone(s: &str) -> Result<Tz, String> {
    s.parse::<Tz>().map_err(|e| e.to_string())
}

// Main function entry point.
fn main() {
    dotenv().ok();

    env_logger::init();

    let config = model::GeneratorConfig::from(Args::parse());

    if let Err(err) = generate::generate_and_save(&config) {
        log::error!("Error generating candles: {}", err);
        std::process::exit(1);
    }
}
