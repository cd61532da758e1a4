//! Defines the `ModelParameters` struct, which represents the contents of `model.toml`.
use crate::error::{ModelResult, ensure_parameter};
use crate::input::{input_err_msg, read_toml};
use crate::intervention::InterventionParameters;
use crate::units::{Heads, Hours, Pounds};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

const MODEL_PARAMETERS_FILE_NAME: &str = "model.toml";

macro_rules! define_param_default {
    ($name:ident, $type: ty, $value: expr) => {
        fn $name() -> $type {
            $value
        }
    };
}

define_param_default!(default_head_multiplier, f64, 1000.0);
define_param_default!(default_feed_multiplier, f64, 0.0005);

/// Represents the contents of the entire model file.
#[derive(Debug, Default, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ModelParameters {
    /// Intervention parameters, unless these are given in `interventions.csv`
    #[serde(default)]
    pub interventions: Option<InterventionParameters>,
    /// How model quantities are scaled in output files
    #[serde(default)]
    pub reporting: ReportingScale,
}

/// Multipliers applied to model quantities when they are reported.
///
/// Baseline counts are usually given in thousands of head, and feed is computed in pounds.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ReportingScale {
    /// Number of head represented by one unit of population
    #[serde(default = "default_head_multiplier")]
    pub head_multiplier: f64,
    /// Reported feed units per pound (0.0005 gives short tons)
    #[serde(default = "default_feed_multiplier")]
    pub feed_multiplier: f64,
}

impl Default for ReportingScale {
    fn default() -> Self {
        Self {
            head_multiplier: default_head_multiplier(),
            feed_multiplier: default_feed_multiplier(),
        }
    }
}

/// Check that a multiplier is finite and greater than zero
fn check_multiplier(name: &str, value: f64) -> ModelResult<()> {
    ensure_parameter!(
        value.is_finite() && value > 0.0,
        "`{name}` must be a finite number greater than zero (got {value})"
    );

    Ok(())
}

impl ReportingScale {
    /// Check that both multipliers are usable
    pub fn validate(&self) -> ModelResult<()> {
        check_multiplier("head_multiplier", self.head_multiplier)?;
        check_multiplier("feed_multiplier", self.feed_multiplier)
    }

    /// A head-count as reported
    pub fn heads(&self, heads: Heads) -> f64 {
        heads.value() * self.head_multiplier
    }

    /// Slaughter hours as reported (hours scale with the number of animals)
    pub fn hours(&self, hours: Hours) -> f64 {
        hours.value() * self.head_multiplier
    }

    /// An amount of feed as reported
    pub fn feed(&self, feed: Pounds) -> f64 {
        feed.value() * self.head_multiplier * self.feed_multiplier
    }
}

impl ModelParameters {
    /// Read a model file from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `model_dir` - Folder containing model configuration files
    ///
    /// # Returns
    ///
    /// The model file contents as a [`ModelParameters`] struct or an error if the file is invalid
    pub fn from_path<P: AsRef<Path>>(model_dir: P) -> Result<ModelParameters> {
        let file_path = model_dir.as_ref().join(MODEL_PARAMETERS_FILE_NAME);
        let model_params: ModelParameters = read_toml(&file_path)?;

        model_params
            .validate()
            .with_context(|| input_err_msg(&file_path))?;

        Ok(model_params)
    }

    /// Validate parameters after reading in file
    fn validate(&self) -> ModelResult<()> {
        if let Some(interventions) = &self.interventions {
            interventions.validate()?;
        }

        self.reporting.validate()
    }
}
