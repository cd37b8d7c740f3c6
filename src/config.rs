//! Construction defaults and numeric tolerances

/// Tolerance shared by time-axis validation, float label matching and decimation checks
pub const TIME_TOLERANCE: f64 = 1e-6;

/// Defaults applied when a new series is built without explicit metadata
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesDefaults {
    pub title: String,
    pub start_time: f64,
    pub sample_period: f64,
    pub sample_period_unit: String,
}

impl SeriesDefaults {
    /// Create a new set of defaults
    pub fn new(
        title: impl Into<String>,
        start_time: f64,
        sample_period: f64,
        sample_period_unit: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            start_time,
            sample_period,
            sample_period_unit: sample_period_unit.into(),
        }
    }

    /// Same defaults with a different title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

impl Default for SeriesDefaults {
    fn default() -> Self {
        Self::new("Time Series", 0.0, 1.0, "ms")
    }
}
