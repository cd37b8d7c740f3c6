//! Labeled 4-axis time series arrays
//!
//! A [`LabeledArray`] is a dense `f64` buffer with exactly four named axes,
//! conventionally time, state variable, space and sample/mode, each optionally
//! carrying a label sequence. Axis 0 also carries a time coordinate kept
//! consistent with a start time and sample period.
//!
//! ## Key Features
//!
//! - **Label-aware slicing**: integer, label or range selectors per axis
//! - **Duplication**: every transform builds a new instance through one builder,
//!   sharing the buffer when nothing was resliced
//! - **Parallel reductions**: mean, sum, min, max across any axis using Rayon
//! - **Derived transforms**: time windows, decimation, bipolar derivation, axis
//!   swaps and concatenation
//!
//! ## Module Organization
//!
//! - [`series`]: the labeled array and its read-only accessors
//! - [`dimensions`]: axis names and per-axis labels
//! - [`time`]: the time coordinate of axis 0
//! - [`slicing`]: selectors and their resolution
//! - [`duplicate`]: the builder behind construction and every transform
//! - [`accessor`]: lookup of slices by label name
//! - [`statistics`]: reductions across one axis
//! - [`transforms`], [`bipolar`]: derived transforms
//! - [`adapter`]: conversion from foreign labeled representations
//! - [`flavor`]: region, surface, volume and sensor variants
//! - [`parallel`]: parallel processing configuration
//! - [`errors`]: centralized error handling
//!
//! ## Usage
//!
//! ```rust
//! use labeled_timeseries::prelude::*;
//! use ndarray::Array4;
//!
//! let series = LabeledArray::builder(Array4::<f64>::zeros((3, 1, 3, 1)))
//!     .labels("Space", labels(["r1", "r2", "r3"]))
//!     .sample_period(0.01)
//!     .build()?;
//!
//! let subspace = series.get_subspace(["r2", "r3"])?;
//! assert_eq!(subspace.shape(), [3, 1, 2, 1]);
//!
//! let window = series.time_window(1, 2)?;
//! assert!((window.start_time() - 0.01).abs() < 1e-9);
//! # Ok::<(), TimeSeriesError>(())
//! ```

pub mod accessor;
pub mod adapter;
pub mod bipolar;
pub mod config;
pub mod dimensions;
pub mod duplicate;
pub mod errors;
pub mod flavor;
pub mod labels;
pub mod parallel;
pub mod reporter;
pub mod series;
pub mod slicing;
pub mod statistics;
pub mod time;
pub mod transforms;

pub use accessor::Attribute;
pub use adapter::{AxisMapping, ForeignSeries};
pub use bipolar::{BipolarPair, BipolarPairing, ContactPairing};
pub use config::{SeriesDefaults, TIME_TOLERANCE};
pub use dimensions::{AxisRef, Dimensions, DEFAULT_AXIS_NAMES, NDIM};
pub use duplicate::SeriesBuilder;
pub use errors::{ErrorKind, Result, TimeSeriesError};
pub use flavor::{Flavor, LabelSource, NamedLabels, SensorKind, SourceRef};
pub use labels::{labels, positional_labels, Label};
pub use parallel::{get_parallel_info, ParallelConfig, ParallelInfo};
pub use reporter::{LogReporter, Reporter};
pub use series::{canonicalize, LabeledArray};
pub use slicing::{RangeSpec, Selector};
pub use statistics::StatOperation;
pub use time::TimeAxis;

pub mod prelude {
    //! Commonly used imports for convenience
    pub use crate::accessor::Attribute;
    pub use crate::bipolar::{BipolarPairing, ContactPairing};
    pub use crate::errors::{ErrorKind, Result, TimeSeriesError};
    pub use crate::flavor::{Flavor, NamedLabels, SensorKind};
    pub use crate::labels::{labels, Label};
    pub use crate::parallel::ParallelConfig;
    pub use crate::reporter::{LogReporter, Reporter};
    pub use crate::series::LabeledArray;
    pub use crate::slicing::{RangeSpec, Selector};
    pub use crate::statistics::StatOperation;
}
