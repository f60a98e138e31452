use std::io::Write;

use csv::{Writer, WriterBuilder};

use super::super::{constants, model};

/// Opens a CSV writer over `sink`. The header is written by `write_candles`.
pub fn candle_writer<W: Write>(sink: W) -> Writer<W> {
    WriterBuilder::new().has_headers(false).from_writer(sink)
}

/// Writes the header row followed by one rounded row per candle.
/// Returns the number of data rows written.
pub fn write_candles<W, I>(writer: &mut Writer<W>, candles: I) -> model::Result<u64>
where
    W: Write,
    I: IntoIterator<Item = model::Candle>,
{
    // Write header row
    writer.write_record(constants::CSV_HEADER)?;

    let mut written = 0;
    for candle in candles {
        writer.serialize(candle.rounded())?;
        written += 1;
        if written % constants::PROGRESS_LOG_EVERY == 0 {
            log::debug!("{} rows written", written);
        }
    }

    writer.flush()?;
    Ok(written)
}
