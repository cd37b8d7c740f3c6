//! Domain flavors of a labeled array
//!
//! A flavor carries only the reference objects a region, surface, volume or
//! sensor recording is tied to. The references are opaque: the core reads a
//! title and a label vector from them and nothing else.

use crate::dimensions::NDIM;
use crate::labels::Label;
use serde_json::{Map, Value as JsonValue};
use std::fmt;
use std::sync::Arc;

/// Opaque domain object usable as a source of labels
pub trait LabelSource: Send + Sync {
    fn title(&self) -> &str;

    fn labels(&self) -> Vec<Label>;
}

/// Shared handle to a label source
pub type SourceRef = Arc<dyn LabelSource>;

/// A named list of labels, the simplest label source
#[derive(Debug, Clone, PartialEq)]
pub struct NamedLabels {
    pub title: String,
    pub labels: Vec<Label>,
}

impl NamedLabels {
    pub fn new(title: impl Into<String>, labels: Vec<Label>) -> Self {
        Self {
            title: title.into(),
            labels,
        }
    }

    /// Wrap into a shared [`SourceRef`]
    #[must_use]
    pub fn shared(self) -> SourceRef {
        Arc::new(self)
    }
}

impl LabelSource for NamedLabels {
    fn title(&self) -> &str {
        &self.title
    }

    fn labels(&self) -> Vec<Label> {
        self.labels.clone()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorKind {
    Eeg,
    Meg,
    Seeg,
}

impl SensorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eeg => "EEG",
            Self::Meg => "MEG",
            Self::Seeg => "SEEG",
        }
    }
}

/// Kind of recording and the references it carries
#[derive(Clone, Default)]
pub enum Flavor {
    #[default]
    Generic,
    Region {
        connectivity: Option<SourceRef>,
        region_mapping: Option<SourceRef>,
        region_mapping_volume: Option<SourceRef>,
    },
    Surface {
        surface: Option<SourceRef>,
    },
    Volume {
        volume: Option<SourceRef>,
    },
    Sensors {
        kind: SensorKind,
        sensors: Option<SourceRef>,
    },
}

impl Flavor {
    /// Region flavor tied to a connectivity
    #[must_use]
    pub fn region(connectivity: SourceRef) -> Self {
        Self::Region {
            connectivity: Some(connectivity),
            region_mapping: None,
            region_mapping_volume: None,
        }
    }

    #[must_use]
    pub fn sensors(kind: SensorKind, sensors: SourceRef) -> Self {
        Self::Sensors {
            kind,
            sensors: Some(sensors),
        }
    }

    /// Type name reported in summaries
    #[must_use]
    pub fn type_name(&self) -> String {
        match self {
            Self::Generic => "TimeSeries".to_string(),
            Self::Region { .. } => "TimeSeriesRegion".to_string(),
            Self::Surface { .. } => "TimeSeriesSurface".to_string(),
            Self::Volume { .. } => "TimeSeriesVolume".to_string(),
            Self::Sensors { kind, .. } => format!("TimeSeries{}", kind.as_str()),
        }
    }

    /// Default title for new series of this flavor
    #[must_use]
    pub fn default_title(&self) -> String {
        match self {
            Self::Generic => "Time Series".to_string(),
            Self::Region { .. } => "Region Time Series".to_string(),
            Self::Surface { .. } => "Surface Time Series".to_string(),
            Self::Volume { .. } => "Volume Time Series".to_string(),
            Self::Sensors { kind, .. } => format!("{} Time Series", kind.as_str()),
        }
    }

    /// Default axis names for new series of this flavor
    #[must_use]
    pub fn default_axis_names(&self) -> [String; NDIM] {
        let names = match self {
            Self::Generic => ["Time", "State Variable", "Space", "Mode"],
            Self::Region { .. } => ["Time", "State Variable", "Region", "Mode"],
            Self::Surface { .. } => ["Time", "State Variable", "Vertex", "Mode"],
            Self::Volume { .. } => ["Time", "X", "Y", "Z"],
            Self::Sensors { .. } => ["Time", "State Variable", "Sensor", "Mode"],
        };
        names.map(String::from)
    }

    /// Labels for the space axis supplied by the flavor's reference object
    #[must_use]
    pub fn space_label_source(&self) -> Option<&SourceRef> {
        match self {
            Self::Region { connectivity, .. } => connectivity.as_ref(),
            Self::Sensors { sensors, .. } => sensors.as_ref(),
            _ => None,
        }
    }

    pub(crate) fn summary_entries(&self, summary: &mut Map<String, JsonValue>) {
        let title = |source: &Option<SourceRef>| {
            JsonValue::from(source.as_ref().map_or("None", |s| s.title()))
        };
        match self {
            Self::Generic => {}
            Self::Region {
                connectivity,
                region_mapping,
                region_mapping_volume,
            } => {
                summary.insert("Source Connectivity".into(), title(connectivity));
                summary.insert("Region Mapping".into(), title(region_mapping));
                summary.insert("Region Mapping Volume".into(), title(region_mapping_volume));
            }
            Self::Surface { surface } => {
                summary.insert("Source Surface".into(), title(surface));
            }
            Self::Volume { volume } => {
                summary.insert("Source Volume".into(), title(volume));
            }
            Self::Sensors { kind, sensors } => {
                summary.insert("Sensors Type".into(), JsonValue::from(kind.as_str()));
                summary.insert("Source Sensors".into(), title(sensors));
            }
        }
    }
}

impl fmt::Debug for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.type_name())
    }
}
