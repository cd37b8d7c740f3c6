//! Axis names and per-axis label sequences
//!
//! A [`Dimensions`] registry always holds exactly four unique axis names and an
//! optional label sequence per axis. Labels are stored by position, so renaming
//! an axis keeps its labels attached to it.

use crate::errors::{Result, TimeSeriesError};
use crate::labels::Label;
use std::collections::BTreeMap;

/// Number of axes of every labeled array
pub const NDIM: usize = 4;

/// Generic axis names: time, variable, space, sample/mode
pub const DEFAULT_AXIS_NAMES: [&str; NDIM] = ["Time", "State Variable", "Space", "Mode"];

/// Reference to an axis, by position or by name
#[derive(Debug, Clone, PartialEq)]
pub enum AxisRef {
    Index(i64),
    Name(String),
    /// Argument that cannot name an axis, kept for the error message
    Invalid(String),
}

impl From<usize> for AxisRef {
    fn from(value: usize) -> Self {
        Self::Index(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<i32> for AxisRef {
    fn from(value: i32) -> Self {
        Self::Index(i64::from(value))
    }
}

impl From<i64> for AxisRef {
    fn from(value: i64) -> Self {
        Self::Index(value)
    }
}

impl From<&str> for AxisRef {
    fn from(value: &str) -> Self {
        Self::Name(value.to_string())
    }
}

impl From<String> for AxisRef {
    fn from(value: String) -> Self {
        Self::Name(value)
    }
}

impl From<&Label> for AxisRef {
    fn from(value: &Label) -> Self {
        match value {
            Label::Int(i) => Self::Index(*i),
            Label::Str(s) => Self::Name(s.clone()),
            Label::Float(x) => Self::Invalid(x.to_string()),
        }
    }
}

/// Ordered axis names plus optional labels for each axis
#[derive(Debug, Clone, PartialEq)]
pub struct Dimensions {
    names: [String; NDIM],
    labels: [Option<Vec<Label>>; NDIM],
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            names: DEFAULT_AXIS_NAMES.map(String::from),
            labels: Default::default(),
        }
    }
}

impl Dimensions {
    /// Create a registry from four axis names, without labels
    ///
    /// # Errors
    ///
    /// Returns a validation error if the names are not unique.
    pub fn new(names: [String; NDIM]) -> Result<Self> {
        check_unique(&names)?;
        Ok(Self {
            names,
            labels: Default::default(),
        })
    }

    /// Resolve a name or position into an axis index in `[0, 4)`
    ///
    /// # Errors
    ///
    /// - `AxisOutOfRange` for integers outside `[0, 4)`
    /// - `InvalidAxisArgument` for arguments that are neither integers nor names
    /// - `AxisNotFound` for names that match no axis
    pub fn axis_index(&self, axis: impl Into<AxisRef>) -> Result<usize> {
        match axis.into() {
            AxisRef::Index(index) => usize::try_from(index)
                .ok()
                .filter(|&i| i < NDIM)
                .ok_or(TimeSeriesError::AxisOutOfRange { index }),
            AxisRef::Name(name) => self
                .names
                .iter()
                .position(|n| *n == name)
                .ok_or_else(|| TimeSeriesError::AxisNotFound {
                    name,
                    available: self.names.to_vec(),
                }),
            AxisRef::Invalid(argument) => Err(TimeSeriesError::InvalidAxisArgument { argument }),
        }
    }

    /// Name of the axis at `index`
    ///
    /// # Errors
    ///
    /// Returns `AxisOutOfRange` if `index >= 4`.
    pub fn axis_name(&self, index: usize) -> Result<&str> {
        self.names
            .get(index)
            .map(String::as_str)
            .ok_or(TimeSeriesError::AxisOutOfRange {
                index: i64::try_from(index).unwrap_or(i64::MAX),
            })
    }

    /// All four axis names in order
    #[must_use]
    pub const fn names(&self) -> &[String; NDIM] {
        &self.names
    }

    /// Labels assigned to an axis.
    ///
    /// An axis that was never labeled is an error here, not an empty sequence.
    ///
    /// # Errors
    ///
    /// Axis resolution errors, or `MissingLabels` when the axis has no labels.
    pub fn axis_labels(&self, axis: impl Into<AxisRef>, shape: [usize; NDIM]) -> Result<&[Label]> {
        let index = self.axis_index(axis)?;
        self.labels[index]
            .as_deref()
            .ok_or_else(|| TimeSeriesError::MissingLabels {
                axis: self.names[index].clone(),
                shape,
            })
    }

    /// Labels of an axis by position, if any were assigned
    #[must_use]
    pub fn labels_at(&self, index: usize) -> Option<&[Label]> {
        self.labels.get(index).and_then(Option::as_deref)
    }

    #[must_use]
    pub fn has_labels(&self, index: usize) -> bool {
        self.labels_at(index).is_some()
    }

    pub(crate) fn set_labels(&mut self, index: usize, labels: Option<Vec<Label>>) {
        self.labels[index] = labels;
    }

    /// Copy of the label map keyed by axis name, labeled axes only
    #[must_use]
    pub fn labels_dimensions(&self) -> BTreeMap<String, Vec<Label>> {
        self.names
            .iter()
            .zip(&self.labels)
            .filter_map(|(name, labels)| labels.as_ref().map(|l| (name.clone(), l.clone())))
            .collect()
    }

    /// Rename axes, keeping each axis' labels attached to it.
    ///
    /// Without `indices`, the names apply to the leading axes in order.
    ///
    /// # Errors
    ///
    /// Returns a validation error when lengths disagree or names become duplicated,
    /// and `AxisOutOfRange` for bad indices.
    pub fn rename_axes(&mut self, new_names: &[&str], indices: Option<&[usize]>) -> Result<()> {
        let indices: Vec<usize> = match indices {
            Some(indices) => indices.to_vec(),
            None => (0..new_names.len()).collect(),
        };
        if indices.len() != new_names.len() {
            return Err(TimeSeriesError::validation(format!(
                "{} axis names given for {} axis indices",
                new_names.len(),
                indices.len()
            )));
        }

        let mut names = self.names.clone();
        for (&name, &index) in new_names.iter().zip(&indices) {
            if index >= NDIM {
                return Err(TimeSeriesError::AxisOutOfRange {
                    index: i64::try_from(index).unwrap_or(i64::MAX),
                });
            }
            log::debug!("Renaming axis '{}' to '{name}'", names[index]);
            names[index] = name.to_string();
        }
        check_unique(&names)?;
        self.names = names;
        Ok(())
    }

    /// Swap two axes, names and labels together
    pub(crate) fn swap(&mut self, a: usize, b: usize) {
        self.names.swap(a, b);
        self.labels.swap(a, b);
    }
}

fn check_unique(names: &[String; NDIM]) -> Result<()> {
    for (i, name) in names.iter().enumerate() {
        if names[i + 1..].contains(name) {
            return Err(TimeSeriesError::validation(format!(
                "axis name '{name}' is used more than once in {names:?}"
            )));
        }
    }
    Ok(())
}
