//! Core statistical operations
//!
//! Every operation skips non-finite values. A lane without a finite value reduces
//! to NaN, except for the sum, which is 0.

use ndarray::ArrayView1;

/// Supported statistical operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatOperation {
    /// Arithmetic mean
    Mean,
    /// Sum of values
    Sum,
    /// Minimum value
    Min,
    /// Maximum value
    Max,
}

impl StatOperation {
    /// Label given to the reduced axis
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mean => "Mean",
            Self::Sum => "Sum",
            Self::Min => "Minimum",
            Self::Max => "Maximum",
        }
    }

    /// Reduce one lane to a scalar
    #[must_use]
    pub fn apply(self, lane: ArrayView1<'_, f64>) -> f64 {
        let finite = lane.iter().copied().filter(|x| x.is_finite());
        match self {
            Self::Sum => finite.sum(),
            Self::Mean => {
                let (sum, count) = finite.fold((0.0, 0_u32), |(s, c), x| (s + x, c + 1));
                if count > 0 {
                    sum / f64::from(count)
                } else {
                    f64::NAN
                }
            }
            Self::Min => {
                let min = finite.fold(f64::INFINITY, f64::min);
                if min == f64::INFINITY {
                    f64::NAN
                } else {
                    min
                }
            }
            Self::Max => {
                let max = finite.fold(f64::NEG_INFINITY, f64::max);
                if max == f64::NEG_INFINITY {
                    f64::NAN
                } else {
                    max
                }
            }
        }
    }
}
