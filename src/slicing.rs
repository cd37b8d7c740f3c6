//! Slice resolution
//!
//! A [`Selector`] describes the positions to keep along one axis. Resolution turns
//! it into a concrete ordered index list, independently per axis:
//!
//! - integer tokens select by position, after a bounds check
//! - any other tokens are looked up in the axis labels (axis 0 falls back to its
//!   time coordinate when it carries no labels)
//! - ranges are half-open for integer endpoints and clamp to the extent; a stop
//!   given as a label is inclusive
//!
//! Integer and label tokens may not be mixed within one axis.

use crate::dimensions::{AxisRef, NDIM};
use crate::errors::{Result, TimeSeriesError};
use crate::labels::{render, Label};
use crate::series::LabeledArray;
use std::borrow::Cow;

/// Range over one axis with optional endpoints and step
#[derive(Debug, Clone, PartialEq)]
pub struct RangeSpec {
    pub start: Option<Label>,
    pub stop: Option<Label>,
    pub step: Option<usize>,
}

impl RangeSpec {
    #[must_use]
    pub fn between(start: impl Into<Label>, stop: impl Into<Label>) -> Self {
        Self {
            start: Some(start.into()),
            stop: Some(stop.into()),
            step: None,
        }
    }

    #[must_use]
    pub fn starting_at(start: impl Into<Label>) -> Self {
        Self {
            start: Some(start.into()),
            stop: None,
            step: None,
        }
    }

    #[must_use]
    pub fn up_to(stop: impl Into<Label>) -> Self {
        Self {
            start: None,
            stop: Some(stop.into()),
            step: None,
        }
    }

    #[must_use]
    pub const fn with_step(mut self, step: usize) -> Self {
        self.step = Some(step);
        self
    }
}

/// Access specifier for one axis
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Selector {
    /// Every position, in order
    #[default]
    All,
    /// Integer positions or label tokens, homogeneous
    Tokens(Vec<Label>),
    Range(RangeSpec),
}

impl Selector {
    #[must_use]
    pub fn index(index: usize) -> Self {
        Self::Tokens(vec![Label::from(index)])
    }

    #[must_use]
    pub fn indices(indices: &[usize]) -> Self {
        Self::Tokens(indices.iter().map(|&i| Label::from(i)).collect())
    }

    #[must_use]
    pub fn label(label: impl Into<Label>) -> Self {
        Self::Tokens(vec![label.into()])
    }

    #[must_use]
    pub fn labels<T: Into<Label> + Clone>(labels: &[T]) -> Self {
        Self::Tokens(labels.iter().cloned().map(Into::into).collect())
    }

    #[must_use]
    pub fn range(start: impl Into<Label>, stop: impl Into<Label>) -> Self {
        Self::Range(RangeSpec::between(start, stop))
    }

    #[must_use]
    pub fn range_from(start: impl Into<Label>) -> Self {
        Self::Range(RangeSpec::starting_at(start))
    }

    #[must_use]
    pub fn range_to(stop: impl Into<Label>) -> Self {
        Self::Range(RangeSpec::up_to(stop))
    }

    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl From<usize> for Selector {
    fn from(value: usize) -> Self {
        Self::index(value)
    }
}

impl From<i64> for Selector {
    fn from(value: i64) -> Self {
        Self::Tokens(vec![Label::Int(value)])
    }
}

impl From<f64> for Selector {
    fn from(value: f64) -> Self {
        Self::label(value)
    }
}

impl From<&str> for Selector {
    fn from(value: &str) -> Self {
        Self::label(value)
    }
}

impl From<String> for Selector {
    fn from(value: String) -> Self {
        Self::label(value)
    }
}

impl From<Label> for Selector {
    fn from(value: Label) -> Self {
        Self::Tokens(vec![value])
    }
}

impl From<Vec<Label>> for Selector {
    fn from(value: Vec<Label>) -> Self {
        Self::Tokens(value)
    }
}

impl From<Vec<&str>> for Selector {
    fn from(value: Vec<&str>) -> Self {
        Self::labels(&value)
    }
}

impl From<Vec<usize>> for Selector {
    fn from(value: Vec<usize>) -> Self {
        Self::indices(&value)
    }
}

impl<const N: usize> From<[&str; N]> for Selector {
    fn from(value: [&str; N]) -> Self {
        Self::labels(&value)
    }
}

impl<const N: usize> From<[usize; N]> for Selector {
    fn from(value: [usize; N]) -> Self {
        Self::indices(&value)
    }
}

impl From<RangeSpec> for Selector {
    fn from(value: RangeSpec) -> Self {
        Self::Range(value)
    }
}

impl From<std::ops::Range<usize>> for Selector {
    fn from(value: std::ops::Range<usize>) -> Self {
        Self::range(value.start, value.end)
    }
}

impl From<std::ops::RangeFull> for Selector {
    fn from(_: std::ops::RangeFull) -> Self {
        Self::All
    }
}

/// Resolves selectors against one axis of a series
struct AxisResolver<'a> {
    series: &'a LabeledArray,
    axis: usize,
    extent: usize,
}

impl<'a> AxisResolver<'a> {
    fn new(series: &'a LabeledArray, axis: usize) -> Self {
        Self {
            series,
            axis,
            extent: series.shape()[axis],
        }
    }

    fn name(&self) -> String {
        self.series.axis_names()[self.axis].clone()
    }

    fn resolve(&self, selector: &Selector) -> Result<Vec<usize>> {
        let indices = match selector {
            Selector::All => (0..self.extent).collect(),
            Selector::Tokens(tokens) => self.resolve_tokens(tokens)?,
            Selector::Range(range) => self.resolve_range(range)?,
        };
        if indices.is_empty() {
            return Err(TimeSeriesError::validation(format!(
                "selection {selector:?} on axis '{}' is empty",
                self.name()
            )));
        }
        Ok(indices)
    }

    fn resolve_tokens(&self, tokens: &[Label]) -> Result<Vec<usize>> {
        let index_count = tokens.iter().filter(|t| t.is_index()).count();
        if index_count == tokens.len() {
            tokens.iter().map(|t| self.check_index(t)).collect()
        } else if index_count == 0 {
            let labels = self.labels()?;
            tokens.iter().map(|t| self.find(&labels, t)).collect()
        } else {
            Err(self.heterogeneous(tokens))
        }
    }

    fn resolve_range(&self, range: &RangeSpec) -> Result<Vec<usize>> {
        let step = range.step.unwrap_or(1);
        if step == 0 {
            return Err(TimeSeriesError::validation(format!(
                "range step on axis '{}' must be positive",
                self.name()
            )));
        }
        let endpoints: Vec<&Label> = range.start.iter().chain(range.stop.iter()).collect();
        let by_index = endpoints.iter().all(|e| e.is_index());
        if !by_index && endpoints.iter().any(|e| e.is_index()) {
            let tokens: Vec<Label> = endpoints.into_iter().cloned().collect();
            return Err(self.heterogeneous(&tokens));
        }

        let (start, stop) = if by_index {
            (
                self.clamp(range.start.as_ref(), 0)?,
                self.clamp(range.stop.as_ref(), self.extent)?,
            )
        } else {
            let labels = self.labels()?;
            let start = match &range.start {
                Some(label) => self.find(&labels, label)?,
                None => 0,
            };
            // a stop label is included in the selection
            let stop = match &range.stop {
                Some(label) => self.find(&labels, label)? + 1,
                None => self.extent,
            };
            (start, stop)
        };
        Ok((start..stop).step_by(step).collect())
    }

    fn check_index(&self, token: &Label) -> Result<usize> {
        let Label::Int(index) = *token else {
            return Err(self.heterogeneous(std::slice::from_ref(token)));
        };
        usize::try_from(index)
            .ok()
            .filter(|&i| i < self.extent)
            .ok_or_else(|| TimeSeriesError::IndexOutOfRange {
                axis: self.name(),
                index,
                extent: self.extent,
            })
    }

    fn clamp(&self, endpoint: Option<&Label>, default: usize) -> Result<usize> {
        match endpoint {
            None => Ok(default),
            Some(&Label::Int(index)) => usize::try_from(index)
                .map(|i| i.min(self.extent))
                .map_err(|_| TimeSeriesError::IndexOutOfRange {
                    axis: self.name(),
                    index,
                    extent: self.extent,
                }),
            Some(other) => Err(self.heterogeneous(std::slice::from_ref(other))),
        }
    }

    fn labels(&self) -> Result<Cow<'a, [Label]>> {
        if let Some(labels) = self.series.dimensions().labels_at(self.axis) {
            return Ok(Cow::Borrowed(labels));
        }
        if self.axis == 0 {
            let time = self.series.time().iter().map(|&t| Label::Float(t)).collect();
            return Ok(Cow::Owned(time));
        }
        Err(TimeSeriesError::MissingLabels {
            axis: self.name(),
            shape: self.series.shape(),
        })
    }

    fn find(&self, labels: &[Label], token: &Label) -> Result<usize> {
        labels
            .iter()
            .position(|l| l.matches(token))
            .ok_or_else(|| TimeSeriesError::LabelNotFound {
                axis: self.name(),
                label: token.to_string(),
                available: render(labels),
            })
    }

    fn heterogeneous(&self, tokens: &[Label]) -> TimeSeriesError {
        TimeSeriesError::validation(format!(
            "selection {:?} on axis '{}' is not integer, string, or range",
            render(tokens),
            self.name()
        ))
    }
}

impl LabeledArray {
    /// Resolve a selector into positions along one axis
    ///
    /// # Errors
    ///
    /// - `IndexOutOfRange` for integer tokens outside the axis, or negative range endpoints
    /// - `MissingLabels` for label tokens on an unlabeled axis
    /// - `LabelNotFound` for the first label token that matches nothing
    /// - `Validation` for mixed tokens, a zero step or an empty result
    pub fn resolve(&self, axis: impl Into<AxisRef>, selector: &Selector) -> Result<Vec<usize>> {
        let axis = self.axis_index(axis)?;
        AxisResolver::new(self, axis).resolve(selector)
    }

    /// New series keeping the selected positions of one axis
    ///
    /// # Errors
    ///
    /// See [`LabeledArray::resolve`].
    pub fn slice_axis(
        &self,
        axis: impl Into<AxisRef>,
        selector: impl Into<Selector>,
    ) -> Result<Self> {
        let axis = self.axis_index(axis)?;
        let mut selectors: [Selector; NDIM] = Default::default();
        selectors[axis] = selector.into();
        self.select(&selectors)
    }

    /// # Errors
    ///
    /// `IndexOutOfRange` for positions outside the axis.
    pub fn slice_by_index(&self, axis: impl Into<AxisRef>, indices: &[usize]) -> Result<Self> {
        self.slice_axis(axis, Selector::indices(indices))
    }

    /// # Errors
    ///
    /// `MissingLabels`, `LabelNotFound`, or `Validation` if an integer token is mixed in.
    pub fn slice_by_label<T: Into<Label> + Clone>(
        &self,
        axis: impl Into<AxisRef>,
        labels: &[T],
    ) -> Result<Self> {
        self.slice_axis(axis, Selector::labels(labels))
    }

    /// # Errors
    ///
    /// See [`LabeledArray::resolve`].
    pub fn slice_by_range(&self, axis: impl Into<AxisRef>, range: RangeSpec) -> Result<Self> {
        self.slice_axis(axis, range)
    }

    /// Apply up to four selectors, one per axis in order; missing ones select all
    ///
    /// # Errors
    ///
    /// `Validation` for more than four selectors, or any per-axis resolution error.
    pub fn select(&self, selectors: &[Selector]) -> Result<Self> {
        if selectors.len() > NDIM {
            return Err(TimeSeriesError::validation(format!(
                "{} selectors given for a series with {NDIM} axes",
                selectors.len()
            )));
        }
        let mut builder = self.duplicate();
        for (axis, selector) in selectors.iter().enumerate() {
            if selector.is_all() {
                continue;
            }
            let indices = AxisResolver::new(self, axis).resolve(selector)?;
            builder = builder.take(axis, indices);
        }
        builder.build()
    }

    /// Like [`LabeledArray::select`], with axes addressed by name
    ///
    /// # Errors
    ///
    /// `AxisNotFound` for unknown names, `Validation` for an axis named twice, or any
    /// per-axis resolution error.
    pub fn select_named(&self, selectors: &[(&str, Selector)]) -> Result<Self> {
        let mut ordered: [Selector; NDIM] = Default::default();
        let mut seen = [false; NDIM];
        for (name, selector) in selectors {
            let axis = self.axis_index(*name)?;
            if seen[axis] {
                return Err(TimeSeriesError::validation(format!(
                    "axis '{name}' is selected more than once"
                )));
            }
            seen[axis] = true;
            ordered[axis] = selector.clone();
        }
        self.select(&ordered)
    }

    // ------------------------------------------------------- per-axis helpers

    /// # Errors
    ///
    /// See [`LabeledArray::resolve`].
    pub fn get_times(&self, selector: impl Into<Selector>) -> Result<Self> {
        self.slice_axis(0usize, selector)
    }

    /// # Errors
    ///
    /// `IndexOutOfRange` for positions outside axis 0.
    pub fn get_times_by_index(&self, indices: &[usize]) -> Result<Self> {
        self.slice_by_index(0usize, indices)
    }

    /// # Errors
    ///
    /// See [`LabeledArray::resolve`].
    pub fn get_state_variables(&self, selector: impl Into<Selector>) -> Result<Self> {
        self.slice_axis(1usize, selector)
    }

    /// # Errors
    ///
    /// `IndexOutOfRange` for positions outside axis 1.
    pub fn get_state_variables_by_index(&self, indices: &[usize]) -> Result<Self> {
        self.slice_by_index(1usize, indices)
    }

    /// # Errors
    ///
    /// Label resolution errors on axis 1.
    pub fn get_state_variables_by_label<T: Into<Label> + Clone>(
        &self,
        labels: &[T],
    ) -> Result<Self> {
        self.slice_by_label(1usize, labels)
    }

    /// # Errors
    ///
    /// See [`LabeledArray::resolve`].
    pub fn get_subspace(&self, selector: impl Into<Selector>) -> Result<Self> {
        self.slice_axis(2usize, selector)
    }

    /// # Errors
    ///
    /// `IndexOutOfRange` for positions outside axis 2.
    pub fn get_subspace_by_index(&self, indices: &[usize]) -> Result<Self> {
        self.slice_by_index(2usize, indices)
    }

    /// # Errors
    ///
    /// Label resolution errors on axis 2.
    pub fn get_subspace_by_label<T: Into<Label> + Clone>(&self, labels: &[T]) -> Result<Self> {
        self.slice_by_label(2usize, labels)
    }

    /// # Errors
    ///
    /// See [`LabeledArray::resolve`].
    pub fn get_modes(&self, selector: impl Into<Selector>) -> Result<Self> {
        self.slice_axis(3usize, selector)
    }

    /// # Errors
    ///
    /// `IndexOutOfRange` for positions outside axis 3.
    pub fn get_modes_by_index(&self, indices: &[usize]) -> Result<Self> {
        self.slice_by_index(3usize, indices)
    }

    /// # Errors
    ///
    /// Label resolution errors on axis 3.
    pub fn get_modes_by_label<T: Into<Label> + Clone>(&self, labels: &[T]) -> Result<Self> {
        self.slice_by_label(3usize, labels)
    }

    /// Positions of the given space labels
    ///
    /// # Errors
    ///
    /// Label resolution errors on axis 2.
    pub fn get_indices_for_labels<T: Into<Label> + Clone>(
        &self,
        labels: &[T],
    ) -> Result<Vec<usize>> {
        self.resolve(2usize, &Selector::labels(labels))
    }

    /// Positions of the given variable labels
    ///
    /// # Errors
    ///
    /// Label resolution errors on axis 1.
    pub fn get_indices_for_state_variables<T: Into<Label> + Clone>(
        &self,
        labels: &[T],
    ) -> Result<Vec<usize>> {
        self.resolve(1usize, &Selector::labels(labels))
    }
}
