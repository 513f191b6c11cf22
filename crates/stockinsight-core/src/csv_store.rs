//! Flat-file persistence for price series.
//!
//! Files carry the header `Date,Open,High,Low,Close` and one row per record
//! in series order. Writing always truncates the destination.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use tracing::debug;

use crate::{CoreError, PriceRecord, PriceSeries, Symbol, ValidationError};

pub const CSV_HEADER: [&str; 5] = ["Date", "Open", "High", "Low", "Close"];

/// Write `series` to `path`, replacing any previous content.
pub fn write_series(series: &PriceSeries, path: impl AsRef<Path>) -> Result<(), CoreError> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_series_to(series, file)?;
    debug!(symbol = %series.symbol(), path = %path.display(), rows = series.len(), "wrote price series");
    Ok(())
}

/// Write `series` as CSV into any writer.
pub fn write_series_to<W: Write>(series: &PriceSeries, writer: W) -> Result<(), CoreError> {
    // Header is written by hand so that an empty series still gets one.
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(CSV_HEADER)?;
    for record in series.records() {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Read a file produced by [`write_series`] back into a series for `symbol`.
pub fn read_series(symbol: Symbol, path: impl AsRef<Path>) -> Result<PriceSeries, CoreError> {
    read_series_from(symbol, File::open(path)?)
}

pub fn read_series_from<R: Read>(symbol: Symbol, reader: R) -> Result<PriceSeries, CoreError> {
    let mut rdr = csv::Reader::from_reader(reader);

    let header = rdr.headers()?;
    if header.iter().ne(CSV_HEADER) {
        return Err(ValidationError::InvalidHeader {
            found: header.iter().collect::<Vec<_>>().join(","),
        }
        .into());
    }

    let records = rdr
        .deserialize::<PriceRecord>()
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PriceSeries::new(symbol, records)?)
}
