//! Conversion from foreign labeled representations
//!
//! A [`ForeignSeries`] exposes named dimensions, a value buffer and optional
//! per-dimension coordinates. [`AxisMapping`] decides which foreign dimension
//! lands on which canonical axis. Coordinates on axis 0 become the time vector;
//! coordinates whose length disagrees with the extent are replaced with positions.

use crate::dimensions::{DEFAULT_AXIS_NAMES, NDIM};
use crate::errors::{Result, TimeSeriesError};
use crate::labels::{positional_labels, Label};
use crate::reporter::Reporter;
use crate::series::{canonicalize, LabeledArray};
use ndarray::ArrayD;

/// A labeled array held in some other representation
pub trait ForeignSeries {
    /// Dimension names, one per axis of [`ForeignSeries::values`]
    fn dims(&self) -> Vec<String>;

    fn values(&self) -> ArrayD<f64>;

    fn coords(&self, dim: &str) -> Option<Vec<Label>>;

    fn name(&self) -> Option<String> {
        None
    }

    fn sample_period_unit(&self) -> Option<String> {
        None
    }
}

/// Canonical position `k` receives foreign axis `order[k]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisMapping {
    order: [usize; NDIM],
}

impl AxisMapping {
    /// # Errors
    ///
    /// Returns a validation error unless `order` is a permutation of `0..4`.
    pub fn new(order: [usize; NDIM]) -> Result<Self> {
        let mut seen = [false; NDIM];
        for &axis in &order {
            if axis >= NDIM || seen[axis] {
                return Err(TimeSeriesError::validation(format!(
                    "axis mapping {order:?} is not a permutation of 0..{NDIM}"
                )));
            }
            seen[axis] = true;
        }
        Ok(Self { order })
    }

    #[must_use]
    pub const fn identity() -> Self {
        Self { order: [0, 1, 2, 3] }
    }

    #[must_use]
    pub const fn order(&self) -> [usize; NDIM] {
        self.order
    }
}

impl Default for AxisMapping {
    fn default() -> Self {
        Self::identity()
    }
}

impl LabeledArray {
    /// Build a series from a foreign representation
    ///
    /// # Errors
    ///
    /// Validation errors for ranks above 4, more dimension names than axes,
    /// duplicate names, or an inconsistent time coordinate.
    pub fn from_foreign(
        source: &dyn ForeignSeries,
        mapping: Option<&AxisMapping>,
        reporter: &dyn Reporter,
    ) -> Result<Self> {
        let values = source.values();
        let foreign_dims = source.dims();
        if foreign_dims.len() != values.ndim() {
            return Err(TimeSeriesError::validation(format!(
                "foreign series names {} dimensions for data of rank {}",
                foreign_dims.len(),
                values.ndim()
            )));
        }

        let names = padded_names(&foreign_dims);
        let order = mapping.copied().unwrap_or_default().order();
        let data = canonicalize(values)?.permuted_axes(order);
        let names = order.map(|k| names[k].clone());
        let shape = data.shape().to_vec();

        let mut builder = Self::builder(data).names(names.clone());
        if let Some(title) = source.name().filter(|n| !n.is_empty()) {
            builder = builder.title(title);
        }
        if let Some(unit) = source.sample_period_unit() {
            builder = builder.sample_period_unit(unit);
        }

        for (axis, name) in names.iter().enumerate() {
            if !foreign_dims.contains(name) {
                continue;
            }
            let Some(coords) = source.coords(name) else {
                continue;
            };
            let coords = if coords.len() == shape[axis] {
                coords
            } else {
                reporter.warn(&format!(
                    "coordinates of '{name}' have length {} but extent {}; using positions",
                    coords.len(),
                    shape[axis]
                ));
                positional_labels(shape[axis])
            };
            if axis == 0 {
                let numeric: Option<Vec<f64>> = coords.iter().map(Label::as_f64).collect();
                if let Some(time) = numeric {
                    builder = builder.time(time);
                    continue;
                }
            }
            builder = builder.labels(axis, coords);
        }
        builder.build()
    }
}

/// Foreign names followed by default names for the axes added by canonicalization.
///
/// Slot `k` takes its own default name unless a foreign dimension already uses
/// it, then the first unused default, then `axis_<k>`.
fn padded_names(foreign_dims: &[String]) -> [String; NDIM] {
    let mut names: Vec<String> = foreign_dims.iter().take(NDIM).cloned().collect();
    for k in names.len()..NDIM {
        let name = std::iter::once(DEFAULT_AXIS_NAMES[k])
            .chain(DEFAULT_AXIS_NAMES)
            .map(String::from)
            .find(|n| !names.contains(n))
            .unwrap_or_else(|| format!("axis_{k}"));
        names.push(name);
    }
    let mut padded: [String; NDIM] = Default::default();
    for (slot, name) in padded.iter_mut().zip(names) {
        *slot = name;
    }
    padded
}
