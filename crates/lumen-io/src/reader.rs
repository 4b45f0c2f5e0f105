//! Long-format light curve CSV reader with full input validation.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use lumen_series::LightCurve;
use tracing::{debug, info, instrument};

use crate::IoError;
use crate::domain::{LightCurveDataset, SeriesName};

const EXPECTED_COLUMNS: usize = 3;

/// Reads light curves from a long-format CSV file.
///
/// Expected CSV format:
/// - Header row required: `series_id,time,rate`
/// - One row per sample; the rows of a series must be contiguous and in
///   strictly increasing time order
/// - Series keep the order of their first appearance
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`IoError::FileNotFound`] | File doesn't exist or is unreadable |
/// | [`IoError::CsvParse`] | Malformed CSV record |
/// | [`IoError::EmptyDataset`] | Zero data rows after header |
/// | [`IoError::InconsistentRowLength`] | Row does not have three columns |
/// | [`IoError::MissingSeriesId`] | Row has an empty `series_id` |
/// | [`IoError::NonFiniteValue`] | `time` or `rate` is NaN, Inf, or unparseable |
/// | [`IoError::DuplicateSeriesId`] | A series reappears after another one started |
/// | [`IoError::InvalidSeries`] | Timestamps of a series are not strictly increasing |
pub struct LightCurveReader {
    path: PathBuf,
}

/// Rows of the series currently being read.
struct Block {
    name: String,
    first_row: usize,
    times: Vec<f64>,
    values: Vec<f64>,
}

impl LightCurveReader {
    /// Create a new reader for the given CSV file path.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Read and validate the CSV file, returning a [`LightCurveDataset`].
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn read(&self) -> Result<LightCurveDataset, IoError> {
        let file = std::fs::File::open(&self.path).map_err(|e| IoError::FileNotFound {
            path: self.path.clone(),
            source: e,
        })?;

        // flexible(true) so that InconsistentRowLength fires instead of a
        // low-level CsvParse error.
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let header = rdr.headers().map_err(|e| self.csv_error(e))?;
        debug!(columns = ?header.iter().collect::<Vec<_>>(), "read CSV header");

        let mut names = Vec::new();
        let mut curves = Vec::new();
        let mut seen: HashMap<String, usize> = HashMap::new();
        let mut current: Option<Block> = None;

        for (row_index, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| self.csv_error(e))?;

            if record.len() != EXPECTED_COLUMNS {
                return Err(IoError::InconsistentRowLength {
                    path: self.path.clone(),
                    row_index,
                    expected: EXPECTED_COLUMNS,
                    got: record.len(),
                });
            }

            let name = record.get(0).unwrap_or("");
            if name.is_empty() {
                return Err(IoError::MissingSeriesId {
                    path: self.path.clone(),
                    row_index,
                });
            }
            let time = self.parse_cell(&record, row_index, 1, "time")?;
            let rate = self.parse_cell(&record, row_index, 2, "rate")?;

            let continues = current.as_ref().is_some_and(|block| block.name == name);
            if !continues {
                if let Some(&first_row) = seen.get(name) {
                    return Err(IoError::DuplicateSeriesId {
                        path: self.path.clone(),
                        series: name.to_string(),
                        first_row,
                        second_row: row_index,
                    });
                }
                seen.insert(name.to_string(), row_index);
                if let Some(block) = current.take() {
                    let (name, curve) = self.finish(block)?;
                    names.push(name);
                    curves.push(curve);
                }
                current = Some(Block {
                    name: name.to_string(),
                    first_row: row_index,
                    times: Vec::new(),
                    values: Vec::new(),
                });
            }

            if let Some(block) = current.as_mut() {
                block.times.push(time);
                block.values.push(rate);
            }
        }

        let Some(block) = current else {
            return Err(IoError::EmptyDataset {
                path: self.path.clone(),
            });
        };
        let (name, curve) = self.finish(block)?;
        names.push(name);
        curves.push(curve);

        info!(
            n_series = names.len(),
            n_samples = curves.iter().map(LightCurve::len).sum::<usize>(),
            "dataset loaded"
        );

        Ok(LightCurveDataset::new(names, curves))
    }

    fn parse_cell(
        &self,
        record: &csv::StringRecord,
        row_index: usize,
        col_index: usize,
        column: &'static str,
    ) -> Result<f64, IoError> {
        let raw = record.get(col_index).unwrap_or("");
        match raw.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(IoError::NonFiniteValue {
                path: self.path.clone(),
                row_index,
                column,
                raw: raw.to_string(),
            }),
        }
    }

    fn finish(&self, block: Block) -> Result<(SeriesName, LightCurve), IoError> {
        debug!(series = %block.name, first_row = block.first_row, n_samples = block.times.len(), "series complete");
        let curve = LightCurve::new(block.times, block.values).map_err(|e| IoError::InvalidSeries {
            path: self.path.clone(),
            series: block.name.clone(),
            source: e,
        })?;
        Ok((SeriesName::new(block.name), curve))
    }

    fn csv_error(&self, e: csv::Error) -> IoError {
        IoError::CsvParse {
            path: self.path.clone(),
            offset: e.position().map_or(0, |p| p.byte()),
            source: e,
        }
    }
}
