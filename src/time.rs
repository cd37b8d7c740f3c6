//! Time coordinate of axis 0
//!
//! The time axis is held in two equivalent forms: the explicit coordinate vector
//! and the `(start_time, sample_period)` pair. Constructors derive one from the
//! other; [`TimeAxis::validate`] re-checks that they agree.

use crate::config::TIME_TOLERANCE;
use crate::errors::{Result, TimeSeriesError};

#[derive(Debug, Clone, PartialEq)]
pub struct TimeAxis {
    time: Vec<f64>,
    start_time: f64,
    sample_period: f64,
    unit: String,
}

impl TimeAxis {
    /// Synthesize `time = start_time + sample_period * arange(len)`
    pub fn from_period(
        start_time: f64,
        sample_period: f64,
        len: usize,
        unit: impl Into<String>,
    ) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let time = (0..len).map(|i| start_time + sample_period * i as f64).collect();
        Self {
            time,
            start_time,
            sample_period,
            unit: unit.into(),
        }
    }

    /// Derive `start_time = time[0]` and `sample_period = mean(diff(time))`.
    ///
    /// A single-point vector keeps `fallback_period`.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty vector.
    pub fn from_vector(
        time: Vec<f64>,
        fallback_period: f64,
        unit: impl Into<String>,
    ) -> Result<Self> {
        let Some(&start_time) = time.first() else {
            return Err(TimeSeriesError::validation(
                "time vector of axis 0 must not be empty",
            ));
        };
        let sample_period = mean_diff(&time).unwrap_or(fallback_period);
        Ok(Self {
            time,
            start_time,
            sample_period,
            unit: unit.into(),
        })
    }

    /// Check the vector against `(start_time, sample_period)` and the axis-0 extent
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the violated relation.
    pub fn validate(&self, extent: usize, axis_name: &str) -> Result<()> {
        if self.time.len() != extent {
            return Err(TimeSeriesError::validation(format!(
                "axis '{axis_name}' has extent {extent} but its time vector has length {}",
                self.time.len()
            )));
        }
        if !self.sample_period.is_finite() || self.sample_period <= 0.0 {
            return Err(TimeSeriesError::validation(format!(
                "axis '{axis_name}' has non-positive sample period {}",
                self.sample_period
            )));
        }
        if let Some(&first) = self.time.first() {
            if (first - self.start_time).abs() > TIME_TOLERANCE {
                return Err(TimeSeriesError::validation(format!(
                    "axis '{axis_name}' starts at {first} but start_time is {}",
                    self.start_time
                )));
            }
        }
        if let Some(period) = mean_diff(&self.time) {
            if (period - self.sample_period).abs() > TIME_TOLERANCE {
                return Err(TimeSeriesError::validation(format!(
                    "axis '{axis_name}' has mean time step {period} but sample_period is {}",
                    self.sample_period
                )));
            }
        }
        Ok(())
    }

    /// Time points at the given positions, re-deriving start and period
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty selection.
    pub fn select(&self, indices: &[usize]) -> Result<Self> {
        let time = indices.iter().map(|&i| self.time[i]).collect();
        Self::from_vector(time, self.sample_period, self.unit.clone())
    }

    #[must_use]
    pub(crate) fn with_unit(mut self, unit: String) -> Self {
        self.unit = unit;
        self
    }

    #[must_use]
    pub fn time(&self) -> &[f64] {
        &self.time
    }

    #[must_use]
    pub const fn start_time(&self) -> f64 {
        self.start_time
    }

    #[must_use]
    pub const fn sample_period(&self) -> f64 {
        self.sample_period
    }

    #[must_use]
    pub fn unit(&self) -> &str {
        &self.unit
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.time.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// `start_time + (len - 1) * sample_period`
    #[must_use]
    pub fn end_time(&self) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let steps = self.time.len().saturating_sub(1) as f64;
        self.start_time + steps * self.sample_period
    }

    #[must_use]
    pub fn duration(&self) -> f64 {
        self.end_time() - self.start_time
    }

    /// Samples per second when the unit is milliseconds (`m` prefix), else per unit
    #[must_use]
    pub fn sample_rate(&self) -> f64 {
        if self.unit.starts_with('m') {
            1000.0 / self.sample_period
        } else {
            1.0 / self.sample_period
        }
    }

    /// `start_time + index * sample_period`
    #[must_use]
    pub fn time_for_index(&self, index: usize) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let index = index as f64;
        self.start_time + index * self.sample_period
    }

    /// Truncating conversion of a coordinate to a position.
    ///
    /// Ratios within [`TIME_TOLERANCE`] of an integer snap to it, so `0.03 / 0.01`
    /// maps to 3 rather than 2.
    #[must_use]
    pub fn index_for_time(&self, time: f64) -> i64 {
        let ratio = (time - self.start_time) / self.sample_period;
        let nearest = ratio.round();
        let index = if (ratio - nearest).abs() < TIME_TOLERANCE {
            nearest
        } else {
            ratio.trunc()
        };
        #[allow(clippy::cast_possible_truncation)]
        {
            index as i64
        }
    }
}

fn mean_diff(time: &[f64]) -> Option<f64> {
    if time.len() < 2 {
        return None;
    }
    let sum: f64 = time.windows(2).map(|w| w[1] - w[0]).sum();
    #[allow(clippy::cast_precision_loss)]
    Some(sum / (time.len() - 1) as f64)
}
