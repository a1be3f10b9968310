use chrono::prelude::*;
use std::fs::File;
use std::io::Read;
use std::path::Path;
pub mod chart;
pub mod error;
pub mod plot;
pub mod viewer;

pub use error::{Error, Result};

pub const VERSION: Option<&'static str> = option_env!("CARGO_PKG_VERSION");

pub const DEFAULT_CSV: &str = "1RM_data.csv";
pub const DATE_COLUMN: &str = "Date";
pub const ONE_RM_COLUMN: &str = "1RM";

/// Datetime layouts tried after RFC 3339, in order.
pub const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];
/// Date-only layouts, mapped to midnight.
pub const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// The main struct for the 1RM time series.
/// Rows are kept in file order, the two columns always have the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    pub date: Vec<NaiveDateTime>,
    pub one_rep_max: Vec<f64>,
}

impl Progress {
    /// Initiate an empty Progress
    /// using the given capacity for the date and 1RM vectors
    pub fn new(capacity: usize) -> Progress {
        let date: Vec<NaiveDateTime> = Vec::with_capacity(capacity);
        let one_rep_max: Vec<f64> = Vec::with_capacity(capacity);
        Progress { date, one_rep_max }
    }

    /// Initiate a Progress from a csv file.
    pub fn from_csv<P>(fin: P) -> Result<Progress>
    where
        P: AsRef<Path>,
    {
        let path = fin.as_ref();
        let file = File::open(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Progress::from_reader(file)
    }

    /// Initiate a Progress from any csv source.
    /// The "Date" and "1RM" columns are found by header name, other columns are ignored.
    /// Fail on the first row with an invalid date or value, no row is skipped.
    pub fn from_reader<R: Read>(rdr: R) -> Result<Progress> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(rdr);
        let headers = reader.headers()?.clone();
        let date_idx = column_index(&headers, DATE_COLUMN)?;
        let orm_idx = column_index(&headers, ONE_RM_COLUMN)?;

        let mut progress = Progress::new(256);
        for record in reader.records() {
            let record = record?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            let date_field = record.get(date_idx).unwrap_or_default();
            let orm_field = record.get(orm_idx).unwrap_or_default();
            let date = parse_datetime(date_field).ok_or_else(|| Error::Date {
                line,
                value: date_field.to_string(),
            })?;
            let orm = match orm_field.parse::<f64>() {
                Ok(v) if v.is_finite() => v,
                _ => {
                    return Err(Error::Value {
                        line,
                        value: orm_field.to_string(),
                    })
                }
            };
            progress.date.push(date);
            progress.one_rep_max.push(orm);
        }
        Ok(progress)
    }

    pub fn len(&self) -> usize {
        self.date.len()
    }

    pub fn is_empty(&self) -> bool {
        self.date.is_empty()
    }

    /// The (date, 1RM) pairs in file order.
    pub fn points(&self) -> impl Iterator<Item = (NaiveDateTime, f64)> + '_ {
        self.date.iter().copied().zip(self.one_rep_max.iter().copied())
    }
}

impl std::fmt::Display for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{},{}", DATE_COLUMN, ONE_RM_COLUMN)?;
        for (d, v) in self.points() {
            writeln!(f, "{},{}", d, v)?;
        }
        Ok(())
    }
}

fn column_index(headers: &csv::StringRecord, name: &'static str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or(Error::MissingColumn(name))
}

/// Parse the textual date of a row,
/// trying RFC 3339 first, then the datetime and the date-only layouts.
pub fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// min and max of a slice, None when empty
pub fn min_and_max<T: std::cmp::PartialOrd + Copy>(s: &[T]) -> Option<(T, T)> {
    let (first, rest) = s.split_first()?;
    let bounds = rest.iter().fold((*first, *first), |(min, max), &v| {
        (
            if v < min { v } else { min },
            if v > max { v } else { max },
        )
    });
    Some(bounds)
}
