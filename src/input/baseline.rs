//! Code for reading the baseline statistics from a CSV file.
use super::{input_err_msg, read_named_table};
use crate::baseline::{BaselineStatistics, BaselineVariable};
use anyhow::{Result, ensure};
use log::warn;
use std::path::Path;
use strum::IntoEnumIterator;

const BASELINE_FILE_NAME: &str = "baseline.csv";

/// Read the baseline statistics from the model directory.
///
/// Every required variable must be present. Names the model doesn't use are allowed, but a warning
/// is logged for each of them as they are likely to be typos.
///
/// # Arguments
///
/// * `model_dir` - Folder containing model configuration files
pub fn read_baseline(model_dir: &Path) -> Result<BaselineStatistics> {
    let file_path = model_dir.join(BASELINE_FILE_NAME);
    let baseline: BaselineStatistics = read_named_table(&file_path)?.into_iter().collect();

    let missing: Vec<_> = BaselineVariable::iter()
        .filter(|var| var.is_required() && baseline.get(var.name()).is_none())
        .map(BaselineVariable::name)
        .collect();
    ensure!(
        missing.is_empty(),
        "{}: missing required variables: {}",
        input_err_msg(&file_path),
        missing.join(", ")
    );

    for name in baseline.unknown_names() {
        warn!(
            "Ignoring unknown variable `{name}` in {}",
            file_path.display()
        );
    }

    Ok(baseline)
}
