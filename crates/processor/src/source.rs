//! CSV-backed ECG sample source
//!
//! Recordings are plain CSV files with one sample per record. The sample is
//! read from a configurable column and parsed as an integer.

use crate::config::SourceConfig;
use crate::error::{ProcessorError, Result, SourceError, SourceResult};
use std::fs::File;
use std::io;
use std::path::Path;
use tracing::debug;

/// Lazy iterator over the samples of a CSV recording
///
/// Records are numbered from 1, excluding the header. Every malformed record
/// yields an error item; iteration can continue past it, but drivers usually
/// abort on the first one.
pub struct EcgCsvSource<R: io::Read> {
    records: csv::StringRecordsIntoIter<R>,
    column: usize,
    record: u64,
}

impl EcgCsvSource<File> {
    /// Open a recording on disk
    pub fn open<P: AsRef<Path>>(path: P, config: &SourceConfig) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), column = config.column, "Opening ECG recording");
        let file = File::open(path)?;
        Self::from_reader(file, config)
    }
}

impl<R: io::Read> EcgCsvSource<R> {
    /// Read a recording from any byte stream
    pub fn from_reader(reader: R, config: &SourceConfig) -> Result<Self> {
        if !config.delimiter.is_ascii() {
            return Err(ProcessorError::configuration(format!(
                "delimiter '{}' is not a single-byte character",
                config.delimiter
            )));
        }

        let reader = csv::ReaderBuilder::new()
            .has_headers(config.has_header)
            .delimiter(config.delimiter as u8)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        Ok(Self {
            records: reader.into_records(),
            column: config.column,
            record: 0,
        })
    }

    /// Collect every sample, failing on the first malformed record
    pub fn read_all(self) -> Result<Vec<i32>> {
        let samples = self.collect::<SourceResult<Vec<i32>>>()?;
        debug!(samples = samples.len(), "Read ECG recording");
        Ok(samples)
    }

    fn parse(&self, record: &csv::StringRecord) -> SourceResult<i32> {
        let value = record.get(self.column).ok_or(SourceError::MissingColumn {
            record: self.record,
            column: self.column,
        })?;

        value.parse::<i32>().map_err(|_| SourceError::InvalidSample {
            record: self.record,
            value: value.to_string(),
        })
    }
}

impl<R: io::Read> Iterator for EcgCsvSource<R> {
    type Item = SourceResult<i32>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.records.next()?;
        self.record += 1;

        Some(match record {
            Ok(record) => self.parse(&record),
            Err(source) => Err(SourceError::Read {
                record: self.record,
                source,
            }),
        })
    }
}

/// Read every sample of the recording at `path`
pub fn read_samples<P: AsRef<Path>>(path: P, config: &SourceConfig) -> Result<Vec<i32>> {
    EcgCsvSource::open(path, config)?.read_all()
}
