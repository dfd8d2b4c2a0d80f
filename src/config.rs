//! Configuration for fitting a mapper and sweeping its filtration.

use serde::{Deserialize, Serialize};

use crate::distance::MetricKind;
use crate::error::{MapperError, MapperResult};
use crate::topology::ThresholdSchedule;

/// Which point set plays the landmark role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleAssignment {
    /// Cluster centroids are landmarks, raw points are observers
    #[default]
    CentroidLandmarks,
    /// Raw points are landmarks, cluster centroids are observers
    PointLandmarks,
}

/// Mapper settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    /// Distance between landmarks and observers.
    /// Default: Euclidean
    pub metric: MetricKind,

    /// Highest simplex dimension built.
    /// Default: 2 (triangles); 3 adds tetrahedra
    pub max_dimension: usize,

    /// Thresholds visited by filtration builds.
    /// Default: 50 evenly spaced samples up to the largest distance
    pub schedule: ThresholdSchedule,

    /// Which point set supplies the landmarks.
    /// Default: cluster centroids, with data points as observers
    pub roles: RoleAssignment,

    /// Sweep worker count.
    /// Default: None (available parallelism)
    pub threads: Option<usize>,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            metric: MetricKind::Euclidean,
            max_dimension: 2,
            schedule: ThresholdSchedule::default(),
            roles: RoleAssignment::CentroidLandmarks,
            threads: None,
        }
    }
}

impl MapperConfig {
    pub fn validate(&self) -> MapperResult<()> {
        if self.threads == Some(0) {
            return Err(MapperError::invalid_config("threads must be at least 1 when set"));
        }
        self.schedule.validate()
    }

    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> MapperResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> MapperResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
