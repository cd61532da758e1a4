//! The model: everything loaded from a model directory that's needed for a run.
use crate::baseline::BaselineStatistics;
use crate::intervention::InterventionParameters;
use std::path::PathBuf;

pub mod parameters;
pub use parameters::{ModelParameters, ReportingScale};

/// Model definition
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    /// Path to model folder
    pub model_path: PathBuf,
    /// Parameters from the model TOML file
    pub parameters: ModelParameters,
    /// The baseline statistics
    pub baseline: BaselineStatistics,
    /// The interventions to apply, from `model.toml` or `interventions.csv`
    pub interventions: InterventionParameters,
}
