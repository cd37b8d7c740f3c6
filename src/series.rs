//! The labeled 4-axis array
//!
//! A [`LabeledArray`] is a dense `f64` buffer with axes conventionally ordered as
//! time, variable, space and sample/mode. It carries the axis registry, the time
//! axis, a title and its domain flavor. Instances are immutable by convention:
//! every transform returns a new instance built through [`SeriesBuilder`].

use crate::dimensions::{AxisRef, Dimensions, NDIM};
use crate::duplicate::SeriesBuilder;
use crate::errors::{Result, TimeSeriesError};
use crate::flavor::Flavor;
use crate::labels::Label;
use crate::time::TimeAxis;
use ndarray::{ArcArray, Array4, ArrayD, ArrayView4, ArrayViewMut4, Axis, Ix4};
use serde_json::{json, Map, Value as JsonValue};

#[derive(Debug, Clone)]
pub struct LabeledArray {
    pub(crate) data: ArcArray<f64, Ix4>,
    pub(crate) dims: Dimensions,
    pub(crate) time: TimeAxis,
    pub(crate) title: String,
    pub(crate) flavor: Flavor,
}

/// Bring a buffer of rank 1 to 4 to rank 4 by appending singleton axes
///
/// # Errors
///
/// Returns a validation error for rank 0 or rank above 4.
pub fn canonicalize(data: ArrayD<f64>) -> Result<Array4<f64>> {
    let data = match data.ndim() {
        1 => data
            .insert_axis(Axis(1))
            .insert_axis(Axis(2))
            .insert_axis(Axis(3)),
        2 => data.insert_axis(Axis(2)).insert_axis(Axis(3)),
        3 => data.insert_axis(Axis(3)),
        4 => data,
        ndim => {
            return Err(TimeSeriesError::validation(format!(
                "data of rank {ndim} cannot be canonicalized; expected 1 to {NDIM} axes"
            )))
        }
    };
    Ok(data.into_dimensionality::<Ix4>()?)
}

impl LabeledArray {
    /// Start building a series from a raw buffer of rank 1 to 4
    pub fn builder<D: ndarray::Dimension>(data: ndarray::Array<f64, D>) -> SeriesBuilder<'static> {
        SeriesBuilder::new(None).data(data)
    }

    /// Series with default names, time axis and no labels
    ///
    /// # Errors
    ///
    /// Returns a validation error if the buffer cannot be canonicalized.
    pub fn new<D: ndarray::Dimension>(data: ndarray::Array<f64, D>) -> Result<Self> {
        Self::builder(data).build()
    }

    /// Start a duplicate of this series; unspecified fields are copied
    #[must_use]
    pub fn duplicate(&self) -> SeriesBuilder<'_> {
        SeriesBuilder::new(Some(self))
    }

    // ---------------------------------------------------------------- data

    #[must_use]
    pub fn data(&self) -> ArrayView4<'_, f64> {
        self.data.view()
    }

    /// Mutable view of the buffer; copies it first if it is shared with other instances
    pub fn data_mut(&mut self) -> ArrayViewMut4<'_, f64> {
        self.data.view_mut()
    }

    #[must_use]
    pub fn to_array(&self) -> Array4<f64> {
        self.data.to_owned()
    }

    /// Whether both instances read the same backing buffer
    #[must_use]
    pub fn shares_buffer_with(&self, other: &Self) -> bool {
        std::ptr::eq(self.data.as_ptr(), other.data.as_ptr())
    }

    /// The buffer with singleton axes removed
    #[must_use]
    pub fn squeezed(&self) -> ArrayD<f64> {
        let shape: Vec<usize> = self.data.shape().iter().copied().filter(|&n| n > 1).collect();
        let values: Vec<f64> = self.data.iter().copied().collect();
        // element count is unchanged by dropping unit axes
        ArrayD::from_shape_vec(shape, values).unwrap_or_else(|_| self.data.to_owned().into_dyn())
    }

    #[must_use]
    pub fn shape(&self) -> [usize; NDIM] {
        let (t, v, s, m) = self.data.dim();
        [t, v, s, m]
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn time_length(&self) -> usize {
        self.data.shape()[0]
    }

    #[must_use]
    pub fn number_of_variables(&self) -> usize {
        self.data.shape()[1]
    }

    #[must_use]
    pub fn number_of_labels(&self) -> usize {
        self.data.shape()[2]
    }

    #[must_use]
    pub fn number_of_samples(&self) -> usize {
        self.data.shape()[3]
    }

    // ------------------------------------------------------------ registry

    #[must_use]
    pub const fn dimensions(&self) -> &Dimensions {
        &self.dims
    }

    #[must_use]
    pub const fn axis_names(&self) -> &[String; NDIM] {
        self.dims.names()
    }

    /// See [`Dimensions::axis_index`]
    ///
    /// # Errors
    ///
    /// Out-of-range, type or name errors for unresolvable axes.
    pub fn axis_index(&self, axis: impl Into<AxisRef>) -> Result<usize> {
        self.dims.axis_index(axis)
    }

    /// # Errors
    ///
    /// Returns `AxisOutOfRange` if `index >= 4`.
    pub fn axis_name(&self, index: usize) -> Result<&str> {
        self.dims.axis_name(index)
    }

    /// See [`Dimensions::axis_labels`]
    ///
    /// # Errors
    ///
    /// Axis resolution errors, or `MissingLabels` when the axis was never labeled.
    pub fn axis_labels(&self, axis: impl Into<AxisRef>) -> Result<&[Label]> {
        self.dims.axis_labels(axis, self.shape())
    }

    /// Labels of an axis, or positional integers when it was never labeled
    ///
    /// # Errors
    ///
    /// Axis resolution errors.
    pub fn axis_labels_or_positions(&self, axis: impl Into<AxisRef>) -> Result<Vec<Label>> {
        let index = self.axis_index(axis)?;
        Ok(self.dims.labels_at(index).map_or_else(
            || crate::labels::positional_labels(self.shape()[index]),
            <[Label]>::to_vec,
        ))
    }

    /// Copy of the label map keyed by axis name
    #[must_use]
    pub fn labels_dimensions(&self) -> std::collections::BTreeMap<String, Vec<Label>> {
        self.dims.labels_dimensions()
    }

    /// Labels of the space axis, empty if it has none
    #[must_use]
    pub fn space_labels(&self) -> Vec<Label> {
        self.dims.labels_at(2).map(<[Label]>::to_vec).unwrap_or_default()
    }

    /// Labels of the variable axis, empty if it has none
    #[must_use]
    pub fn variables_labels(&self) -> Vec<Label> {
        self.dims.labels_at(1).map(<[Label]>::to_vec).unwrap_or_default()
    }

    /// Rename axes in place; labels stay with their axes
    ///
    /// # Errors
    ///
    /// See [`Dimensions::rename_axes`].
    pub fn rename_axes(&mut self, new_names: &[&str], indices: Option<&[usize]>) -> Result<()> {
        self.dims.rename_axes(new_names, indices)
    }

    // ---------------------------------------------------------------- time

    #[must_use]
    pub const fn time_axis(&self) -> &TimeAxis {
        &self.time
    }

    #[must_use]
    pub fn time(&self) -> &[f64] {
        self.time.time()
    }

    #[must_use]
    pub const fn start_time(&self) -> f64 {
        self.time.start_time()
    }

    #[must_use]
    pub fn end_time(&self) -> f64 {
        self.time.end_time()
    }

    #[must_use]
    pub fn duration(&self) -> f64 {
        self.time.duration()
    }

    #[must_use]
    pub const fn sample_period(&self) -> f64 {
        self.time.sample_period()
    }

    #[must_use]
    pub fn sample_period_unit(&self) -> &str {
        self.time.unit()
    }

    #[must_use]
    pub fn time_unit(&self) -> &str {
        self.time.unit()
    }

    #[must_use]
    pub fn sample_rate(&self) -> f64 {
        self.time.sample_rate()
    }

    // ------------------------------------------------------------ metadata

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub const fn flavor(&self) -> &Flavor {
        &self.flavor
    }

    /// Summary of the series and its buffer as JSON
    #[must_use]
    pub fn summary_info(&self) -> JsonValue {
        let mut summary = Map::new();
        summary.insert("Time-series type".into(), json!(self.flavor.type_name()));
        summary.insert("Time-series name".into(), json!(self.title));
        summary.insert("Dimensions".into(), json!(self.dims.names().to_vec()));
        summary.insert("Time units".into(), json!(self.time.unit()));
        summary.insert("Sample period".into(), json!(self.time.sample_period()));
        summary.insert("Length".into(), json!(self.time_length()));
        summary.insert("Shape".into(), json!(self.shape().to_vec()));
        summary.insert("Size".into(), json!(self.size()));

        let finite: Vec<f64> = self.data.iter().copied().filter(|x| x.is_finite()).collect();
        if !finite.is_empty() {
            let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
            let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            #[allow(clippy::cast_precision_loss)]
            let mean = finite.iter().sum::<f64>() / finite.len() as f64;
            summary.insert("Minimum".into(), json!(min));
            summary.insert("Maximum".into(), json!(max));
            summary.insert("Mean".into(), json!(mean));
        }

        for (name, labels) in self.dims.labels_dimensions() {
            let values: Vec<JsonValue> = labels.iter().map(Label::to_json).collect();
            summary.insert(format!("{name} labels"), JsonValue::Array(values));
        }
        self.flavor.summary_entries(&mut summary);
        JsonValue::Object(summary)
    }
}
