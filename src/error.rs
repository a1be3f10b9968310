use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("could not open csv file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("could not parse date '{value}' at line {line}")]
    Date { line: u64, value: String },

    #[error("invalid 1RM value '{value}' at line {line}")]
    Value { line: u64, value: String },

    #[error("data cannot be plotted: {0}")]
    Range(String),

    #[error("could not draw the chart: {0}")]
    Render(String),

    #[error("could not open the chart viewer: {0}")]
    Viewer(String),
}

pub type Result<T> = std::result::Result<T, Error>;
