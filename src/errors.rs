//! Centralized error handling for labeled time series
//!
//! Every failure is raised synchronously where it is detected. Variants carry the
//! axis, name or index involved and, where it helps, the valid alternatives.

use thiserror::Error;

/// Main error type for labeled time series operations
#[derive(Debug, Error)]
pub enum TimeSeriesError {
    /// Shape, rank or invariant violation
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Axis index outside `[0, 4)`
    #[error("Axis index {index} is out of range [0, 4)")]
    AxisOutOfRange { index: i64 },

    /// Position outside the extent of an axis
    #[error("Index {index} is out of range for axis '{axis}' with extent {extent}")]
    IndexOutOfRange {
        axis: String,
        index: i64,
        extent: usize,
    },

    /// Window bounds outside the valid interval of an axis
    #[error("Window [{start}, {end}) is outside the interval [{lower}, {upper}] of axis '{axis}'")]
    WindowOutOfRange {
        axis: String,
        start: f64,
        end: f64,
        lower: f64,
        upper: f64,
    },

    /// Axis argument that is neither an integer nor a name
    #[error("Axis argument {argument} is neither an integer nor an axis name")]
    InvalidAxisArgument { argument: String },

    /// Axis name that matches no axis
    #[error("Axis '{name}' not found; available axes: {available:?}")]
    AxisNotFound {
        name: String,
        available: Vec<String>,
    },

    /// Label token that matches no entry of the axis labels
    #[error("Label {label} not found on axis '{axis}'; existing labels: {available:?}")]
    LabelNotFound {
        axis: String,
        label: String,
        available: Vec<String>,
    },

    /// Label-mode access on an axis without labels
    #[error("There are no labels defined for axis '{axis}' of this instance with shape {shape:?}")]
    MissingLabels { axis: String, shape: [usize; 4] },

    /// Dynamic accessor miss
    #[error(
        "Attribute '{name}' is not defined for this instance; \
         valid variable labels: {variables:?}, valid space labels: {space:?}"
    )]
    UnknownAttribute {
        name: String,
        variables: Vec<String>,
        space: Vec<String>,
    },

    /// Array shape error from ndarray
    #[error("Array error: {0}")]
    ArrayError(#[from] ndarray::ShapeError),

    /// Thread pool configuration error
    #[error("Thread pool error: {0}")]
    ThreadPoolError(String),
}

/// Error classes, independent of the specific variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    OutOfRange,
    Type,
    Name,
    Lookup,
    MissingLabels,
    UnknownAttribute,
    Array,
    ThreadPool,
}

impl TimeSeriesError {
    /// Build a validation error from any message
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// The class this error belongs to
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::AxisOutOfRange { .. }
            | Self::IndexOutOfRange { .. }
            | Self::WindowOutOfRange { .. } => ErrorKind::OutOfRange,
            Self::InvalidAxisArgument { .. } => ErrorKind::Type,
            Self::AxisNotFound { .. } => ErrorKind::Name,
            Self::LabelNotFound { .. } => ErrorKind::Lookup,
            Self::MissingLabels { .. } => ErrorKind::MissingLabels,
            Self::UnknownAttribute { .. } => ErrorKind::UnknownAttribute,
            Self::ArrayError(_) => ErrorKind::Array,
            Self::ThreadPoolError(_) => ErrorKind::ThreadPool,
        }
    }
}

/// Result type alias for labeled time series operations
pub type Result<T> = std::result::Result<T, TimeSeriesError>;
