// src/error.rs

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested report type is not in the registry.
    #[error("unknown report type '{given}'; valid types: [{}]", .valid.join(", "))]
    UnknownReportType {
        given: String,
        valid: Vec<&'static str>,
    },

    /// The report type exists but has no historical bundle archive.
    #[error("no bundle archive is published for report type '{0}'")]
    MissingBundle(String),

    #[error("invalid year range: start {start} is after end {end}")]
    InvalidYearRange { start: i32, end: i32 },

    /// Transport failure or non-success HTTP status, surfaced as-is.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// The archive holds no .txt/.csv entry to load.
    #[error("no .txt/.csv entry found in archive; entries: {entries:?}")]
    NoDataFile { entries: Vec<String> },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Zip(#[from] zip::result::ZipError),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Url(#[from] url::ParseError),
}
