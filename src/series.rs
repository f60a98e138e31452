use chrono::{Local, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use rand::Rng;

use crate::{
    constants,
    model::{self, Candle, GenerateError},
};

/// Resolves the naive start time to epoch seconds.
///
/// `None` means the system local timezone. Ambiguous local times (DST fold)
/// resolve to the earliest instant; times inside a DST gap are an error.
pub fn start_epoch(start: &NaiveDateTime, timezone: Option<Tz>) -> model::Result<i64> {
    match timezone {
        Some(tz) => resolve_in(&tz, tz.name(), start),
        None => resolve_in(&Local, "local", start),
    }
}

fn resolve_in<Z: TimeZone>(tz: &Z, name: &str, start: &NaiveDateTime) -> model::Result<i64> {
    tz.from_local_datetime(start)
        .earliest()
        .map(|dt| dt.timestamp())
        .ok_or_else(|| GenerateError::InvalidStartTime(*start, name.to_string()))
}

/// Lazily generated candles, one per minute from `start_epoch`.
///
/// Every candle's open is drawn around the same `base_price`; the close of one
/// candle never feeds the next.
pub struct CandleSeries<'a, R: Rng> {
    rng: &'a mut R,
    base_price: f64,
    start_epoch: i64,
    index: u64,
    len: u64,
}

impl<'a, R: Rng> CandleSeries<'a, R> {
    /// Fails when the last candle's timestamp would not fit in an `i64`.
    pub fn new(
        rng: &'a mut R,
        base_price: f64,
        start_epoch: i64,
        len: u64,
    ) -> model::Result<Self> {
        last_timestamp(start_epoch, len).ok_or(GenerateError::TimestampOverflow(len))?;
        Ok(Self {
            rng,
            base_price,
            start_epoch,
            index: 0,
            len,
        })
    }

    fn draw(&mut self) -> Candle {
        // draw order is part of the output contract for seeded runs
        let open = self.base_price + uniform(self.rng, constants::OPEN_NOISE);
        let close = open + uniform(self.rng, constants::CLOSE_NOISE);
        let high = open.max(close) + uniform(self.rng, constants::WICK_NOISE);
        let low = open.min(close) - uniform(self.rng, constants::WICK_NOISE);
        let volume = uniform(self.rng, constants::VOLUME_RANGE);

        Candle {
            timestamp: self.start_epoch + self.index as i64 * constants::CANDLE_INTERVAL_SECS,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

impl<R: Rng> Iterator for CandleSeries<'_, R> {
    type Item = Candle;

    fn next(&mut self) -> Option<Candle> {
        if self.index >= self.len {
            return None;
        }
        let candle = self.draw();
        self.index += 1;
        Some(candle)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.len - self.index) as usize;
        (remaining, Some(remaining))
    }
}

impl<R: Rng> ExactSizeIterator for CandleSeries<'_, R> {}

// Timestamp of candle `len - 1`, or None on overflow. Every earlier candle fits too.
fn last_timestamp(start_epoch: i64, len: u64) -> Option<i64> {
    let steps = i64::try_from(len.saturating_sub(1)).ok()?;
    steps
        .checked_mul(constants::CANDLE_INTERVAL_SECS)?
        .checked_add(start_epoch)
}

fn uniform<R: Rng>(rng: &mut R, (low, high): (f64, f64)) -> f64 {
    rng.random_range(low..high)
}
