//! Named access to labeled slices
//!
//! A name is tried first as a variable label (axis 1), then as a space label
//! (axis 2). [`LabeledArray::attr`] additionally falls back to the metadata of the
//! series. Names containing `__` are reserved and never looked up as labels.

use crate::errors::{Result, TimeSeriesError};
use crate::labels::{render, Label};
use crate::series::LabeledArray;
use crate::slicing::Selector;

/// Value returned by [`LabeledArray::attr`]
#[derive(Debug, Clone)]
pub enum Attribute {
    Series(LabeledArray),
    Number(f64),
    Count(usize),
    Text(String),
    Shape([usize; 4]),
    Vector(Vec<f64>),
}

impl Attribute {
    /// The slice, when the name resolved to a label
    #[must_use]
    pub fn into_series(self) -> Option<LabeledArray> {
        match self {
            Self::Series(series) => Some(series),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(x) => Some(*x),
            _ => None,
        }
    }
}

fn is_reserved(name: &str) -> bool {
    name.contains("__")
}

impl LabeledArray {
    /// Single-label slice for a variable or space label
    ///
    /// # Errors
    ///
    /// `UnknownAttribute` listing the valid variable and space labels.
    pub fn get(&self, name: &str) -> Result<Self> {
        match self.label_slice(name)? {
            Some(series) => Ok(series),
            None => Err(self.unknown_attribute(name)),
        }
    }

    /// Label slice, or a metadata value of the same name
    ///
    /// # Errors
    ///
    /// `UnknownAttribute` when the name is neither a label nor a metadata field.
    pub fn attr(&self, name: &str) -> Result<Attribute> {
        if let Some(series) = self.label_slice(name)? {
            return Ok(Attribute::Series(series));
        }
        self.metadata_attribute(name)
            .ok_or_else(|| self.unknown_attribute(name))
    }

    fn label_slice(&self, name: &str) -> Result<Option<Self>> {
        if is_reserved(name) {
            return Ok(None);
        }
        let token = Label::from(name);
        for axis in [1usize, 2] {
            let found = self
                .dimensions()
                .labels_at(axis)
                .is_some_and(|labels| labels.iter().any(|l| l.matches(&token)));
            if found {
                log::debug!("Resolved '{name}' on axis '{}'", self.axis_names()[axis]);
                return self.slice_axis(axis, Selector::label(token)).map(Some);
            }
        }
        Ok(None)
    }

    fn metadata_attribute(&self, name: &str) -> Option<Attribute> {
        let value = match name {
            "title" => Attribute::Text(self.title().to_string()),
            "sample_period_unit" | "time_unit" => Attribute::Text(self.time_unit().to_string()),
            "start_time" => Attribute::Number(self.start_time()),
            "end_time" => Attribute::Number(self.end_time()),
            "duration" => Attribute::Number(self.duration()),
            "sample_period" => Attribute::Number(self.sample_period()),
            "sample_rate" => Attribute::Number(self.sample_rate()),
            "time_length" => Attribute::Count(self.time_length()),
            "number_of_variables" => Attribute::Count(self.number_of_variables()),
            "number_of_labels" => Attribute::Count(self.number_of_labels()),
            "number_of_samples" => Attribute::Count(self.number_of_samples()),
            "size" => Attribute::Count(self.size()),
            "nr_dimensions" => Attribute::Count(4),
            "shape" => Attribute::Shape(self.shape()),
            "time" => Attribute::Vector(self.time().to_vec()),
            _ => return None,
        };
        Some(value)
    }

    fn unknown_attribute(&self, name: &str) -> TimeSeriesError {
        TimeSeriesError::UnknownAttribute {
            name: name.to_string(),
            variables: render(&self.variables_labels()),
            space: render(&self.space_labels()),
        }
    }
}
