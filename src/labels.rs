//! Label tokens attached to axis positions

use crate::config::TIME_TOLERANCE;
use serde_json::Value as JsonValue;
use std::fmt;

/// One label token: a name, an integer or a floating coordinate
///
/// `==` is exact; label lookup goes through [`Label::matches`].
#[derive(Debug, Clone, PartialEq)]
pub enum Label {
    Int(i64),
    Float(f64),
    Str(String),
}

impl Label {
    /// True for integer tokens, which always select by position
    #[must_use]
    pub const fn is_index(&self) -> bool {
        matches!(self, Self::Int(_))
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric value of the token, if any
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            #[allow(clippy::cast_precision_loss)]
            Self::Int(i) => Some(*i as f64),
            Self::Float(x) => Some(*x),
            Self::Str(_) => None,
        }
    }

    /// Equality used by label lookup.
    ///
    /// Strings compare exactly, numbers compare numerically within [`TIME_TOLERANCE`].
    #[must_use]
    pub fn matches(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Str(_), _) | (_, Self::Str(_)) => false,
            _ => match (self.as_f64(), other.as_f64()) {
                (Some(a), Some(b)) => (a - b).abs() < TIME_TOLERANCE,
                _ => false,
            },
        }
    }

    pub(crate) fn to_json(&self) -> JsonValue {
        match self {
            Self::Int(i) => JsonValue::from(*i),
            Self::Float(x) => JsonValue::from(*x),
            Self::Str(s) => JsonValue::from(s.as_str()),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Str(s) => write!(f, "'{s}'"),
        }
    }
}

impl From<&str> for Label {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Label {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for Label {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

impl From<i64> for Label {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Label {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<usize> for Label {
    fn from(value: usize) -> Self {
        Self::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<f64> for Label {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// Build a label vector from anything convertible into labels
pub fn labels<I, T>(items: I) -> Vec<Label>
where
    I: IntoIterator<Item = T>,
    T: Into<Label>,
{
    items.into_iter().map(Into::into).collect()
}

/// Positional integer labels `0..len`
#[must_use]
pub fn positional_labels(len: usize) -> Vec<Label> {
    (0..len).map(Label::from).collect()
}

/// Render labels for error messages
pub(crate) fn render(labels: &[Label]) -> Vec<String> {
    labels.iter().map(ToString::to_string).collect()
}
