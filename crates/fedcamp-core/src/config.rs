use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};

/// Default weight applied to arrival-night occupants in the busiest-day
/// score. Arrival nights generate disproportionate staffing workload, so the
/// weight must stay above the continuing-night weight of 1.
pub const DEFAULT_ARRIVAL_WEIGHT: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    /// Multiplier for single-night and first-night occupants.
    pub arrival_weight: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            arrival_weight: DEFAULT_ARRIVAL_WEIGHT,
        }
    }
}

impl ScoreWeights {
    pub fn validate(&self) -> Result<()> {
        if !self.arrival_weight.is_finite() || self.arrival_weight <= 1.0 {
            return Err(PipelineError::Validation(format!(
                "arrival_weight must be a finite number greater than 1.0, got {}",
                self.arrival_weight
            )));
        }
        Ok(())
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let weights: ScoreWeights = toml::from_str(content)?;
        weights.validate()?;
        Ok(weights)
    }
}
