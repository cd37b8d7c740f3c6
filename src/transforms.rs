//! Derived transforms
//!
//! Each transform resolves positions, assembles the new buffer and hands both to
//! the duplicator, so the result is re-validated like any other instance.

use crate::config::TIME_TOLERANCE;
use crate::dimensions::AxisRef;
use crate::errors::{Result, TimeSeriesError};
use crate::labels::Label;
use crate::reporter::Reporter;
use crate::series::LabeledArray;
use ndarray::Axis;

impl LabeledArray {
    /// Keep the time points `[start, end)`
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` if `start < 0` or `end > time_length`, `Validation` if the
    /// window is empty.
    pub fn time_window(&self, start: i64, end: i64) -> Result<Self> {
        let indices = self.window_indices(0, start, end)?;
        self.duplicate().take(0, indices).build()
    }

    /// Keep the time points between two coordinates, converted by truncation
    ///
    /// # Errors
    ///
    /// `WindowOutOfRange` for coordinates outside `[start_time, end_time]`,
    /// `Validation` if the window is empty.
    pub fn time_window_by_units(&self, start_time: f64, end_time: f64) -> Result<Self> {
        let time = self.time_axis();
        let lower = time.start_time();
        let upper = time.end_time();
        if start_time < lower - TIME_TOLERANCE || end_time > upper + TIME_TOLERANCE {
            return Err(TimeSeriesError::WindowOutOfRange {
                axis: self.axis_names()[0].clone(),
                start: start_time,
                end: end_time,
                lower,
                upper,
            });
        }
        let start = time.index_for_time(start_time);
        let end = time.index_for_time(end_time);
        log::debug!("Time window [{start_time}, {end_time}) maps to positions [{start}, {end})");
        self.time_window(start, end)
    }

    /// Keep the samples `[start, end)` of axis 3
    ///
    /// # Errors
    ///
    /// As [`LabeledArray::time_window`], on axis 3.
    pub fn get_sample_window(&self, start: i64, end: i64) -> Result<Self> {
        let indices = self.window_indices(3, start, end)?;
        self.duplicate().take(3, indices).build()
    }

    /// Subsample the time axis to a coarser sample period
    ///
    /// # Errors
    ///
    /// `Validation` unless `new_sample_period` is a positive integer multiple of the
    /// current period.
    pub fn decimate_time(&self, new_sample_period: f64) -> Result<Self> {
        let period = self.sample_period();
        let ratio = new_sample_period / period;
        let factor = ratio.round();
        if !ratio.is_finite() || factor < 1.0 || (ratio - factor).abs() > TIME_TOLERANCE {
            return Err(TimeSeriesError::validation(format!(
                "new sample period {new_sample_period} is not a multiple of {period}"
            )));
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let factor = factor as usize;
        let indices: Vec<usize> = (0..self.time_length()).step_by(factor).collect();
        #[allow(clippy::cast_precision_loss)]
        let new_period = period * factor as f64;
        self.duplicate()
            .take(0, indices)
            .sample_period(new_period)
            .build()
    }

    /// Exchange two axes together with their names and labels
    ///
    /// When the time axis is involved, its coordinates become the labels of the
    /// other position and the new axis 0 takes its time from numeric labels, or
    /// from the current start time and period.
    ///
    /// # Errors
    ///
    /// Axis resolution errors, or a validation error from rebuilding the series.
    pub fn swap_axes(&self, first: impl Into<AxisRef>, second: impl Into<AxisRef>) -> Result<Self> {
        let a = self.axis_index(first)?;
        let b = self.axis_index(second)?;
        if a == b {
            return self.duplicate().build();
        }

        let mut view = self.data();
        view.swap_axes(a, b);
        let data = view.as_standard_layout().into_owned();

        let mut dims = self.dimensions().clone();
        let involves_time = a == 0 || b == 0;
        if involves_time && !dims.has_labels(0) {
            let time = self.time().iter().map(|&t| Label::Float(t)).collect();
            dims.set_labels(0, Some(time));
        }
        dims.swap(a, b);

        let mut builder = self.duplicate().data(data).names(dims.names().clone());
        for axis in 0..4 {
            builder = match dims.labels_at(axis) {
                Some(labels) => builder.labels(axis, labels.to_vec()),
                None => builder.clear_labels(axis),
            };
        }
        if involves_time {
            let numeric: Option<Vec<f64>> = dims
                .labels_at(0)
                .and_then(|labels| labels.iter().map(Label::as_f64).collect());
            builder = match numeric {
                Some(time) => builder.time(time),
                None => builder
                    .start_time(self.start_time())
                    .sample_period(self.sample_period()),
            };
        }
        builder.build()
    }

    /// Join series along one axis
    ///
    /// All inputs must share the sample period and the extents of every other
    /// axis. Labels along the axis are appended; other labels, the title and the
    /// time origin come from the first series.
    ///
    /// # Errors
    ///
    /// `Validation` for an empty input, mismatched periods or extents, or labels
    /// present on some inputs only.
    pub fn concatenate(
        series: &[Self],
        axis: impl Into<AxisRef>,
        reporter: &dyn Reporter,
    ) -> Result<Self> {
        let Some(first) = series.first() else {
            return Err(TimeSeriesError::validation(
                "cannot concatenate an empty list of series",
            ));
        };
        let axis = first.axis_index(axis)?;
        let shape = first.shape();

        for (position, other) in series.iter().enumerate().skip(1) {
            if (other.sample_period() - first.sample_period()).abs() > TIME_TOLERANCE {
                return Err(TimeSeriesError::validation(format!(
                    "series {position} has sample period {} unlike {} of the first series",
                    other.sample_period(),
                    first.sample_period()
                )));
            }
            let other_shape = other.shape();
            if (0..4).any(|k| k != axis && other_shape[k] != shape[k]) {
                let name = &first.axis_names()[axis];
                return Err(TimeSeriesError::validation(format!(
                    "series {position} has shape {other_shape:?}, want {shape:?} outside '{name}'"
                )));
            }
            if other.axis_names() != first.axis_names() {
                reporter.warn(&format!(
                    "series {position} has axes {:?}, using {:?}",
                    other.axis_names(),
                    first.axis_names()
                ));
            }
            if axis == 0 {
                let previous = &series[position - 1];
                let expected = previous.time_axis().time_for_index(previous.time_length());
                if (other.start_time() - expected).abs() > TIME_TOLERANCE {
                    reporter.warn(&format!(
                        "series {position} starts at {} instead of {expected}; time is rebuilt",
                        other.start_time()
                    ));
                }
            }
        }

        let labeled = series
            .iter()
            .filter(|s| s.dimensions().has_labels(axis))
            .count();
        let labels: Option<Vec<Label>> = if labeled == series.len() {
            Some(series.iter().flat_map(|s| s.labels_along(axis)).collect())
        } else if labeled == 0 {
            None
        } else {
            return Err(TimeSeriesError::validation(format!(
                "only {labeled} of {} series carry labels along axis '{}'",
                series.len(),
                first.axis_names()[axis]
            )));
        };

        let views: Vec<_> = series.iter().map(LabeledArray::data).collect();
        let data = ndarray::concatenate(Axis(axis), &views)?;
        log::debug!(
            "Concatenated {} series along axis '{}' into shape {:?}",
            series.len(),
            first.axis_names()[axis],
            data.shape()
        );

        let mut builder = first.duplicate().data(data);
        builder = match labels {
            Some(labels) => builder.labels(axis, labels),
            None => builder.clear_labels(axis),
        };
        if axis == 0 {
            builder = builder.start_time(first.start_time());
        }
        builder.build()
    }

    /// Element-wise transform of the buffer
    ///
    /// # Errors
    ///
    /// Validation errors from rebuilding the series.
    pub fn map_values<F>(&self, f: F) -> Result<Self>
    where
        F: FnMut(f64) -> f64,
    {
        self.duplicate().data(self.data().mapv(f)).build()
    }

    fn labels_along(&self, axis: usize) -> Vec<Label> {
        self.dimensions()
            .labels_at(axis)
            .map(<[Label]>::to_vec)
            .unwrap_or_default()
    }

    fn window_indices(&self, axis: usize, start: i64, end: i64) -> Result<Vec<usize>> {
        let extent = self.shape()[axis];
        let name = self.axis_names()[axis].clone();
        let start_index = usize::try_from(start).map_err(|_| TimeSeriesError::IndexOutOfRange {
            axis: name.clone(),
            index: start,
            extent,
        })?;
        let end_index = usize::try_from(end)
            .ok()
            .filter(|&e| e <= extent)
            .ok_or_else(|| TimeSeriesError::IndexOutOfRange {
                axis: name.clone(),
                index: end,
                extent,
            })?;
        if start_index >= end_index {
            return Err(TimeSeriesError::validation(format!(
                "window [{start}, {end}) on axis '{name}' is empty"
            )));
        }
        Ok((start_index..end_index).collect())
    }
}
