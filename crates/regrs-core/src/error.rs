use crate::model::FitError;
use crate::settings::SettingsError;
use std::path::PathBuf;

/// Which kind of mistake produced an error, so shells can word messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad path, bad file contents, unknown column, unparsable entry.
    Input,
    /// An operation was called before the session reached the needed state.
    Sequencing,
    /// The data cannot support a meaningful fit.
    DegenerateData,
}

#[derive(thiserror::Error, Debug)]
pub enum RegressionError {
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("io error reading {}: {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row} has {found} fields but the header has {expected}")]
    RaggedRow { row: usize, found: usize, expected: usize },
    #[error("column '{name}' has {found} values, expected {expected}")]
    ColumnLength { name: String, found: usize, expected: usize },
    #[error("column '{0}' is not a numeric column of the dataset")]
    UnknownColumn(String),
    #[error("'{0}' is not a number")]
    InvalidInput(String),
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),
    #[error("plot error: {0}")]
    Plot(String),
    #[error("no dataset and columns selected yet")]
    NotConfigured,
    #[error("model is not trained yet")]
    NotTrained,
    #[error("no numeric columns left after filtering")]
    NoNumericColumns,
    #[error(
        "not enough rows to split: {rows} rows give {train} training and {test} test rows, \
         need at least {needed} of each"
    )]
    NotEnoughRows { rows: usize, train: usize, test: usize, needed: usize },
    #[error("fit failed: {0}")]
    Fit(#[from] FitError),
}

impl RegressionError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RegressionError::FileNotFound(_)
            | RegressionError::Io { .. }
            | RegressionError::Csv(_)
            | RegressionError::RaggedRow { .. }
            | RegressionError::ColumnLength { .. }
            | RegressionError::UnknownColumn(_)
            | RegressionError::InvalidInput(_)
            | RegressionError::Settings(_)
            | RegressionError::Plot(_) => ErrorCategory::Input,
            RegressionError::NotConfigured | RegressionError::NotTrained => {
                ErrorCategory::Sequencing
            },
            RegressionError::NoNumericColumns
            | RegressionError::NotEnoughRows { .. }
            | RegressionError::Fit(_) => ErrorCategory::DegenerateData,
        }
    }
}

pub type Result<T> = std::result::Result<T, RegressionError>;
