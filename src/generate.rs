use std::{fs::File, io::BufWriter, path::Path};

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    model::{self, GeneratorConfig},
    series::{self, CandleSeries},
    store,
};

/// Generates the candle file described by `config` and prints the completion
/// message. Uses a seeded `StdRng` when `config.seed` is set, the thread rng
/// otherwise.
pub fn generate_and_save(config: &GeneratorConfig) -> model::Result<u64> {
    let rows = match config.seed {
        Some(seed) => generate_to_file(config, &mut StdRng::seed_from_u64(seed))?,
        None => generate_to_file(config, &mut rand::rng())?,
    };
    println!("{}", completion_message(rows, &config.output_path));
    Ok(rows)
}

pub fn completion_message(rows: u64, path: &Path) -> String {
    format!("Generated {} rows in {}", rows, path.display())
}

/// Writes `config.num_rows` candles drawn from `rng` to `config.output_path`.
///
/// The file is created or truncated. On error a partially written file is
/// left in place.
pub fn generate_to_file<R: Rng>(config: &GeneratorConfig, rng: &mut R) -> model::Result<u64> {
    let start_epoch = series::start_epoch(&config.start_time, config.timezone)?;

    log::info!(
        "Generating {} rows into {} (start epoch {}, {})",
        config.num_rows,
        config.output_path.display(),
        start_epoch,
        match config.seed {
            Some(seed) => format!("seed {seed}"),
            None => "unseeded".to_string(),
        }
    );

    let candles = CandleSeries::new(rng, config.base_price, start_epoch, config.num_rows)?;
    let file = File::create(&config.output_path)?;
    let mut writer = store::candle::candle_writer(BufWriter::new(file));
    let written = store::candle::write_candles(&mut writer, candles)?;

    log::info!(
        "Finished writing {} rows to {}",
        written,
        config.output_path.display()
    );
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GenerateError;
    use chrono_tz::Tz;
    use std::fs;
    use tempfile::TempDir;

    fn config_in(dir: &TempDir, name: &str, num_rows: u64) -> GeneratorConfig {
        GeneratorConfig {
            output_path: dir.path().join(name),
            num_rows,
            timezone: Some(Tz::UTC),
            ..GeneratorConfig::default()
        }
    }

    fn read_rows(path: &Path) -> Vec<csv::StringRecord> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(path)
            .unwrap();
        reader.records().map(|r| r.unwrap()).collect()
    }

    fn decimals(field: &str) -> usize {
        field.split_once('.').map(|(_, frac)| frac.len()).unwrap_or(0)
    }

    #[test]
    fn completion_message_names_rows_and_file() {
        assert_eq!(
            completion_message(3, Path::new("BTCUSDT_big.csv")),
            "Generated 3 rows in BTCUSDT_big.csv"
        );
        assert_eq!(
            completion_message(500_000, Path::new("data/out.csv")),
            "Generated 500000 rows in data/out.csv"
        );
    }

    #[test]
    fn overflowing_row_count_fails_before_creating_file() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir, "huge.csv", u64::MAX);

        let result = generate_and_save(&config);
        assert!(matches!(result, Err(GenerateError::TimestampOverflow(_))));
        assert!(!config.output_path.exists());
    }

    #[test]
    fn three_rows_from_utc_midnight() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir, "small.csv", 3);

        let written = generate_and_save(&config).unwrap();
        assert_eq!(written, 3);

        let text = fs::read_to_string(&config.output_path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "timestamp,open,high,low,close,volume");

        let timestamps: Vec<&str> = lines[1..]
            .iter()
            .map(|line| line.split(',').next().unwrap())
            .collect();
        assert_eq!(timestamps, ["1577836800", "1577836860", "1577836920"]);
        assert!(lines[1..].iter().all(|line| line.split(',').count() == 6));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn written_rows_hold_candle_invariants() {
        let dir = TempDir::new().unwrap();
        let mut config = config_in(&dir, "seeded.csv", 5_000);
        config.seed = Some(7);

        let mut rng = StdRng::seed_from_u64(7);
        generate_to_file(&config, &mut rng).unwrap();

        let rows = read_rows(&config.output_path);
        assert_eq!(rows.len(), 5_001);
        assert_eq!(rows[0].iter().collect::<Vec<_>>(), crate::constants::CSV_HEADER);

        let mut previous: Option<i64> = None;
        for row in &rows[1..] {
            let timestamp: i64 = row[0].parse().unwrap();
            if let Some(prev) = previous {
                assert_eq!(timestamp - prev, 60);
            }
            previous = Some(timestamp);

            for field in row.iter().skip(1) {
                assert!(decimals(field) <= 2, "too many decimals in {field}");
            }
            let values: Vec<f64> = row.iter().skip(1).map(|f| f.parse().unwrap()).collect();
            let (open, high, low, close, volume) =
                (values[0], values[1], values[2], values[3], values[4]);
            assert!(low <= open.min(close));
            assert!(high >= open.max(close));
            assert!((0.1..=100.0).contains(&volume));
        }
    }

    #[test]
    fn same_seed_reproduces_file() {
        let dir = TempDir::new().unwrap();
        let mut first = config_in(&dir, "a.csv", 200);
        first.seed = Some(11);
        let mut second = config_in(&dir, "b.csv", 200);
        second.seed = Some(11);

        generate_and_save(&first).unwrap();
        generate_and_save(&second).unwrap();

        assert_eq!(
            fs::read_to_string(&first.output_path).unwrap(),
            fs::read_to_string(&second.output_path).unwrap()
        );
    }

    #[test]
    fn unseeded_runs_share_shape_but_not_values() {
        let dir = TempDir::new().unwrap();
        let first = config_in(&dir, "a.csv", 200);
        let second = config_in(&dir, "b.csv", 200);

        generate_and_save(&first).unwrap();
        generate_and_save(&second).unwrap();

        let a = read_rows(&first.output_path);
        let b = read_rows(&second.output_path);
        assert_eq!(a.len(), b.len());
        let column = |rows: &[csv::StringRecord], i: usize| -> Vec<String> {
            rows.iter().map(|r| r[i].to_string()).collect()
        };
        assert_eq!(column(&a, 0), column(&b, 0));
        assert_ne!(column(&a, 1), column(&b, 1));
    }

    #[test]
    fn overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir, "existing.csv", 2);
        fs::write(&config.output_path, "stale\ncontent\nthat\nis\nlonger\n").unwrap();

        generate_and_save(&config).unwrap();

        let text = fs::read_to_string(&config.output_path).unwrap();
        assert_eq!(text.lines().count(), 3);
        assert!(!text.contains("stale"));
    }

    #[test]
    fn unwritable_path_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir, "missing/dir/out.csv", 3);

        let result = generate_and_save(&config);
        assert!(matches!(result, Err(GenerateError::Io(_))));
        assert!(!config.output_path.exists());
    }
}
