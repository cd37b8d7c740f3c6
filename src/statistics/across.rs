//! Reductions of a labeled array across one axis
//!
//! The reduced axis keeps extent 1 and is relabeled with the operation name. All
//! other axes, and the time axis when it is not the one reduced, are untouched.

use super::operations::StatOperation;
use super::parallel::parallel_reduce_axis;
use crate::dimensions::AxisRef;
use crate::errors::Result;
use crate::labels::Label;
use crate::parallel::ParallelConfig;
use crate::series::LabeledArray;
use ndarray::ArrayView1;

impl LabeledArray {
    /// Reduce along `axis` with an arbitrary lane operation
    ///
    /// # Errors
    ///
    /// Axis resolution errors, or a validation error from rebuilding the series.
    pub fn reduce_across<F>(&self, axis: impl Into<AxisRef>, op: F, op_name: &str) -> Result<Self>
    where
        F: Fn(ArrayView1<'_, f64>) -> f64 + Sync + Send,
    {
        self.reduce_across_with(&ParallelConfig::default(), axis, op, op_name)
    }

    /// [`LabeledArray::reduce_across`] on the pool described by `config`
    ///
    /// # Errors
    ///
    /// As [`LabeledArray::reduce_across`], plus `ThreadPoolError`.
    pub fn reduce_across_with<F>(
        &self,
        config: &ParallelConfig,
        axis: impl Into<AxisRef>,
        op: F,
        op_name: &str,
    ) -> Result<Self>
    where
        F: Fn(ArrayView1<'_, f64>) -> f64 + Sync + Send,
    {
        let axis = self.axis_index(axis)?;
        log::debug!("{op_name} across axis '{}'", self.axis_names()[axis]);
        let data = self.data();
        let reduced = config.install(|| parallel_reduce_axis(data, axis, op))??;

        let mut builder = self
            .duplicate()
            .data(reduced)
            .labels(axis, vec![Label::from(op_name)]);
        if axis == 0 {
            builder = builder.start_time(self.start_time());
        }
        builder.build()
    }

    /// Reduce with one of the built-in operations
    ///
    /// # Errors
    ///
    /// See [`LabeledArray::reduce_across`].
    pub fn stat_across(&self, axis: impl Into<AxisRef>, operation: StatOperation) -> Result<Self> {
        self.reduce_across(axis, |lane| operation.apply(lane), operation.as_str())
    }

    /// # Errors
    ///
    /// See [`LabeledArray::reduce_across`].
    pub fn mean_across(&self, axis: impl Into<AxisRef>) -> Result<Self> {
        self.stat_across(axis, StatOperation::Mean)
    }

    /// # Errors
    ///
    /// See [`LabeledArray::reduce_across`].
    pub fn sum_across(&self, axis: impl Into<AxisRef>) -> Result<Self> {
        self.stat_across(axis, StatOperation::Sum)
    }

    /// # Errors
    ///
    /// See [`LabeledArray::reduce_across`].
    pub fn min_across(&self, axis: impl Into<AxisRef>) -> Result<Self> {
        self.stat_across(axis, StatOperation::Min)
    }

    /// # Errors
    ///
    /// See [`LabeledArray::reduce_across`].
    pub fn max_across(&self, axis: impl Into<AxisRef>) -> Result<Self> {
        self.stat_across(axis, StatOperation::Max)
    }
}
