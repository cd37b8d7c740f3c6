//! Building and duplicating labeled arrays
//!
//! [`SeriesBuilder`] is the single path through which instances come into
//! existence. With a source it copies every field that is not overridden; without
//! one it starts from [`SeriesDefaults`]. `build` re-validates rank, label lengths
//! and the time axis before anything is returned.
//!
//! The source buffer is shared with the result only when neither the data nor any
//! axis selection was overridden.

use crate::config::{SeriesDefaults, TIME_TOLERANCE};
use crate::dimensions::{AxisRef, Dimensions, NDIM};
use crate::errors::{Result, TimeSeriesError};
use crate::flavor::Flavor;
use crate::labels::Label;
use crate::series::{canonicalize, LabeledArray};
use crate::time::TimeAxis;
use ndarray::{ArcArray, ArrayD, Axis, Ix4};

pub struct SeriesBuilder<'a> {
    source: Option<&'a LabeledArray>,
    data: Option<ArrayD<f64>>,
    takes: [Option<Vec<usize>>; NDIM],
    names: Option<[String; NDIM]>,
    labels: Vec<(AxisRef, Option<Vec<Label>>)>,
    time: Option<Vec<f64>>,
    start_time: Option<f64>,
    sample_period: Option<f64>,
    unit: Option<String>,
    title: Option<String>,
    flavor: Option<Flavor>,
    defaults: SeriesDefaults,
}

impl<'a> SeriesBuilder<'a> {
    pub(crate) fn new(source: Option<&'a LabeledArray>) -> Self {
        Self {
            source,
            data: None,
            takes: Default::default(),
            names: None,
            labels: Vec::new(),
            time: None,
            start_time: None,
            sample_period: None,
            unit: None,
            title: None,
            flavor: None,
            defaults: SeriesDefaults::default(),
        }
    }

    /// Replace the buffer; rank 1 to 3 input is canonicalized
    #[must_use]
    pub fn data<D: ndarray::Dimension>(mut self, data: ndarray::Array<f64, D>) -> Self {
        self.data = Some(data.into_dyn());
        self
    }

    /// Keep only the given positions along `axis`, re-slicing its labels (and time on axis 0)
    #[must_use]
    pub fn take(mut self, axis: usize, indices: Vec<usize>) -> Self {
        if let Some(slot) = self.takes.get_mut(axis) {
            *slot = Some(indices);
        }
        self
    }

    #[must_use]
    pub fn names<S: Into<String>>(mut self, names: [S; NDIM]) -> Self {
        self.names = Some(names.map(Into::into));
        self
    }

    /// Replace the labels of one axis; the length is still checked
    #[must_use]
    pub fn labels(mut self, axis: impl Into<AxisRef>, labels: Vec<Label>) -> Self {
        self.labels.push((axis.into(), Some(labels)));
        self
    }

    /// Drop the labels of one axis
    #[must_use]
    pub fn clear_labels(mut self, axis: impl Into<AxisRef>) -> Self {
        self.labels.push((axis.into(), None));
        self
    }

    /// Explicit time vector; start time and sample period are derived from it
    #[must_use]
    pub fn time(mut self, time: Vec<f64>) -> Self {
        self.time = Some(time);
        self
    }

    #[must_use]
    pub const fn start_time(mut self, start_time: f64) -> Self {
        self.start_time = Some(start_time);
        self
    }

    #[must_use]
    pub const fn sample_period(mut self, sample_period: f64) -> Self {
        self.sample_period = Some(sample_period);
        self
    }

    #[must_use]
    pub fn sample_period_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn flavor(mut self, flavor: Flavor) -> Self {
        self.flavor = Some(flavor);
        self
    }

    /// Defaults used for fields neither given nor available from a source
    #[must_use]
    pub fn defaults(mut self, defaults: SeriesDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Assemble and validate the new instance
    ///
    /// # Errors
    ///
    /// - `Validation` for rank, extent, label-length, name or time-axis violations
    /// - `IndexOutOfRange` for selections outside an axis
    /// - axis resolution errors for label overrides addressed by name or index
    pub fn build(self) -> Result<LabeledArray> {
        let source = self.source;
        let flavor = self
            .flavor
            .clone()
            .or_else(|| source.map(|s| s.flavor.clone()))
            .unwrap_or_default();

        let names = match (&self.names, source) {
            (Some(names), _) => names.clone(),
            (None, Some(s)) => s.dims.names().clone(),
            (None, None) => flavor.default_axis_names(),
        };
        let mut dims = Dimensions::new(names)?;

        let (mut data, base_shape) = self.base_data()?;
        let reshaped = self.data.is_some() || self.takes.iter().any(Option::is_some);
        for (axis, take) in self.takes.iter().enumerate() {
            if let Some(indices) = take {
                check_take(&dims, axis, indices, base_shape[axis])?;
                data = data.select(Axis(axis), indices).into_shared();
            }
        }
        let shape = shape_of(&data);
        for (axis, &extent) in shape.iter().enumerate() {
            if extent == 0 {
                return Err(TimeSeriesError::validation(format!(
                    "axis '{}' has zero extent",
                    dims.names()[axis]
                )));
            }
        }

        self.assign_labels(&mut dims, &flavor, base_shape)?;
        for (axis, &extent) in shape.iter().enumerate() {
            if let Some(labels) = dims.labels_at(axis) {
                if labels.len() != extent {
                    return Err(TimeSeriesError::validation(format!(
                        "axis '{}' has extent {extent} but {} labels",
                        dims.names()[axis],
                        labels.len()
                    )));
                }
            }
        }

        let time = self.assemble_time(shape[0], base_shape[0])?;
        time.validate(shape[0], &dims.names()[0])?;

        let title = self
            .title
            .or_else(|| source.map(|s| s.title.clone()))
            .unwrap_or_else(|| match flavor {
                Flavor::Generic => self.defaults.title.clone(),
                _ => flavor.default_title(),
            });

        log::debug!(
            "Built series '{title}' with shape {shape:?} (buffer {})",
            if reshaped { "new" } else { "shared" }
        );

        Ok(LabeledArray {
            data,
            dims,
            time,
            title,
            flavor,
        })
    }

    fn base_data(&self) -> Result<(ArcArray<f64, Ix4>, [usize; NDIM])> {
        let data = match (&self.data, self.source) {
            (Some(data), _) => canonicalize(data.clone())?.into_shared(),
            (None, Some(source)) => source.data.clone(),
            (None, None) => {
                return Err(TimeSeriesError::validation(
                    "a new series needs a data buffer",
                ))
            }
        };
        let shape = shape_of(&data);
        Ok((data, shape))
    }

    fn assign_labels(
        &self,
        dims: &mut Dimensions,
        flavor: &Flavor,
        base_shape: [usize; NDIM],
    ) -> Result<()> {
        let mut explicit = [false; NDIM];
        for (axis, labels) in &self.labels {
            let index = dims.axis_index(axis.clone())?;
            dims.set_labels(index, labels.clone());
            explicit[index] = true;
        }

        match self.source {
            Some(source) => {
                let source_shape = source.shape();
                for axis in 0..NDIM {
                    if explicit[axis] {
                        continue;
                    }
                    let Some(labels) = source.dims.labels_at(axis) else {
                        continue;
                    };
                    if base_shape[axis] != source_shape[axis] {
                        return Err(TimeSeriesError::validation(format!(
                            "axis '{}' changed extent from {} to {} without replacement labels",
                            dims.names()[axis],
                            source_shape[axis],
                            base_shape[axis]
                        )));
                    }
                    let labels = match &self.takes[axis] {
                        Some(indices) => indices.iter().map(|&i| labels[i].clone()).collect(),
                        None => labels.to_vec(),
                    };
                    dims.set_labels(axis, Some(labels));
                }
            }
            None => {
                if !explicit[2] {
                    if let Some(source) = flavor.space_label_source() {
                        dims.set_labels(2, Some(source.labels()));
                    }
                }
            }
        }
        Ok(())
    }

    fn assemble_time(&self, extent: usize, base_extent: usize) -> Result<TimeAxis> {
        let source_time = self.source.map(|s| &s.time);
        let unit = self
            .unit
            .clone()
            .or_else(|| source_time.map(|t| t.unit().to_string()))
            .unwrap_or_else(|| self.defaults.sample_period_unit.clone());
        let period = self
            .sample_period
            .or_else(|| source_time.map(TimeAxis::sample_period))
            .unwrap_or(self.defaults.sample_period);
        // time re-sliced along with the buffer, when the source time still lines up
        let taken = match (source_time, &self.takes[0]) {
            (Some(t), Some(indices)) if t.len() == base_extent => Some(t.select(indices)?),
            _ => None,
        };

        if let Some(time) = &self.time {
            let axis = TimeAxis::from_vector(time.clone(), period, unit)?;
            if let Some(start) = self.start_time {
                if (start - axis.start_time()).abs() > TIME_TOLERANCE {
                    return Err(TimeSeriesError::validation(format!(
                        "start_time {start} disagrees with time vector starting at {}",
                        axis.start_time()
                    )));
                }
            }
            if let Some(period) = self.sample_period {
                if axis.len() > 1 && (period - axis.sample_period()).abs() > TIME_TOLERANCE {
                    return Err(TimeSeriesError::validation(format!(
                        "sample_period {period} disagrees with time vector step {}",
                        axis.sample_period()
                    )));
                }
            }
            return Ok(axis);
        }

        if self.start_time.is_some() || self.sample_period.is_some() {
            let start = self
                .start_time
                .or_else(|| taken.as_ref().map(TimeAxis::start_time))
                .or_else(|| source_time.map(TimeAxis::start_time))
                .unwrap_or(self.defaults.start_time);
            return Ok(TimeAxis::from_period(start, period, extent, unit));
        }

        if let Some(time) = taken {
            return Ok(time.with_unit(unit));
        }

        match source_time {
            Some(t) if t.len() == extent => Ok(t.clone().with_unit(unit)),
            Some(t) => Ok(TimeAxis::from_period(t.start_time(), period, extent, unit)),
            None => Ok(TimeAxis::from_period(
                self.defaults.start_time,
                period,
                extent,
                unit,
            )),
        }
    }
}

fn check_take(dims: &Dimensions, axis: usize, indices: &[usize], extent: usize) -> Result<()> {
    if let Some(&index) = indices.iter().find(|&&i| i >= extent) {
        return Err(TimeSeriesError::IndexOutOfRange {
            axis: dims.names()[axis].clone(),
            index: i64::try_from(index).unwrap_or(i64::MAX),
            extent,
        });
    }
    Ok(())
}

fn shape_of(data: &ArcArray<f64, Ix4>) -> [usize; NDIM] {
    let (t, v, s, m) = data.dim();
    [t, v, s, m]
}
