//! Common routines for handling input data.
use crate::model::{Model, ModelParameters};
use crate::simulation::initialise;
use anyhow::{Context, Result, ensure};
use indexmap::IndexMap;
use itertools::Itertools;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

mod baseline;
use baseline::read_baseline;
mod interventions;
use interventions::read_interventions;

/// Read a series of type `T`s from a CSV file.
///
/// Will raise an error if the file is empty.
///
/// # Arguments
///
/// * `file_path` - Path to the CSV file
pub fn read_csv<'a, T: DeserializeOwned + 'a>(
    file_path: &'a Path,
) -> Result<impl Iterator<Item = T> + 'a> {
    let vec = read_csv_internal(file_path)?;
    ensure!(!vec.is_empty(), "CSV file {} cannot be empty", file_path.display());

    Ok(vec.into_iter())
}

/// Read a series of type `T`s from a CSV file, returning `None` if the file doesn't exist.
///
/// # Arguments
///
/// * `file_path` - Path to the CSV file
pub fn read_csv_optional<'a, T: DeserializeOwned + 'a>(
    file_path: &'a Path,
) -> Result<Option<impl Iterator<Item = T> + 'a>> {
    if !file_path.exists() {
        return Ok(None);
    }

    read_csv(file_path).map(Some)
}

fn read_csv_internal<T: DeserializeOwned>(file_path: &Path) -> Result<Vec<T>> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(file_path)
        .with_context(|| input_err_msg(file_path))?
        .into_deserialize()
        .process_results(|iter| iter.collect_vec())
        .with_context(|| input_err_msg(file_path))
}

/// Parse a TOML file at the specified path.
///
/// # Arguments
///
/// * `file_path` - Path to the TOML file
///
/// # Returns
///
/// * The deserialised TOML data or an error if the file could not be read or parsed.
pub fn read_toml<T: DeserializeOwned>(file_path: &Path) -> Result<T> {
    let toml_str = fs::read_to_string(file_path).with_context(|| input_err_msg(file_path))?;
    let toml_data = toml::from_str(&toml_str).with_context(|| input_err_msg(file_path))?;

    Ok(toml_data)
}

/// Format an error message to include the file path. To be used with `anyhow::Context`.
pub fn input_err_msg<P: AsRef<Path>>(file_path: P) -> String {
    format!("Error reading {}", file_path.as_ref().display())
}

/// A row of a table of named quantities
#[derive(Debug, Deserialize, PartialEq)]
struct NamedQuantityRaw {
    variable: String,
    quantity: f64,
}

/// Read a table of named quantities from a CSV file with `variable` and `quantity` columns.
///
/// Other columns (e.g. `description`) are ignored. Names must be unique.
pub fn read_named_table(file_path: &Path) -> Result<IndexMap<String, f64>> {
    named_table_from_rows(read_csv(file_path)?).with_context(|| input_err_msg(file_path))
}

/// Read a table of named quantities if the file exists
fn read_named_table_optional(file_path: &Path) -> Result<Option<IndexMap<String, f64>>> {
    read_csv_optional(file_path)?
        .map(|rows| named_table_from_rows(rows).with_context(|| input_err_msg(file_path)))
        .transpose()
}

fn named_table_from_rows<I>(rows: I) -> Result<IndexMap<String, f64>>
where
    I: Iterator<Item = NamedQuantityRaw>,
{
    let mut table = IndexMap::new();
    for row in rows {
        let variable = row.variable.trim().to_string();
        ensure!(!variable.is_empty(), "Variable names cannot be empty");
        ensure!(
            !table.contains_key(&variable),
            "Duplicate entry for variable `{variable}`"
        );
        table.insert(variable, row.quantity);
    }

    Ok(table)
}

/// Read a model from the specified directory.
///
/// The model is checked by deriving the simulation's starting state, so any problem with the
/// inputs is reported here rather than part-way through a run.
///
/// # Arguments
///
/// * `model_dir` - Folder containing model configuration files
///
/// # Returns
///
/// The loaded model or an error.
pub fn load_model<P: AsRef<Path>>(model_dir: P) -> Result<Model> {
    let model_dir = model_dir.as_ref();
    let parameters = ModelParameters::from_path(model_dir)?;
    let baseline = read_baseline(model_dir)?;
    let interventions = read_interventions(model_dir, parameters.interventions.as_ref())?;

    initialise(&baseline, &interventions).context("Could not set up simulation")?;

    Ok(Model {
        model_path: model_dir.to_path_buf(),
        parameters,
        baseline,
        interventions,
    })
}
