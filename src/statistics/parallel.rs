//! Lane-parallel reduction kernel

use crate::errors::Result;
use ndarray::{Array4, ArrayView1, ArrayView4, Axis};
use rayon::prelude::*;

/// Reduce every lane along `axis` with `op`, keeping the axis with extent 1
///
/// # Errors
///
/// Returns an error if the reduced array cannot be reshaped.
pub fn parallel_reduce_axis<F>(data: ArrayView4<'_, f64>, axis: usize, op: F) -> Result<Array4<f64>>
where
    F: Fn(ArrayView1<'_, f64>) -> f64 + Sync + Send,
{
    let lanes: Vec<ArrayView1<'_, f64>> = data.lanes(Axis(axis)).into_iter().collect();
    log::debug!(
        "Reducing {} lanes across {} threads",
        lanes.len(),
        rayon::current_num_threads()
    );
    let values: Vec<f64> = lanes.into_par_iter().map(|lane| op(lane)).collect();

    // lanes are produced in logical order of the remaining axes
    let mut shape = data.shape().to_vec();
    shape.remove(axis);
    let reduced = ndarray::Array3::from_shape_vec((shape[0], shape[1], shape[2]), values)?;
    Ok(reduced.insert_axis(Axis(axis)))
}
