//! Code for reading the intervention parameters.
use super::{input_err_msg, read_named_table_optional};
use crate::intervention::InterventionParameters;
use anyhow::{Context, Result, ensure};
use std::path::Path;

const INTERVENTIONS_FILE_NAME: &str = "interventions.csv";

/// Read the intervention parameters for a model.
///
/// These come either from the `[interventions]` section of `model.toml` or from
/// `interventions.csv`, but not both. If neither is given, the defaults are used.
///
/// # Arguments
///
/// * `model_dir` - Folder containing model configuration files
/// * `from_model_file` - The `[interventions]` section of `model.toml`, if present
pub fn read_interventions(
    model_dir: &Path,
    from_model_file: Option<&InterventionParameters>,
) -> Result<InterventionParameters> {
    let file_path = model_dir.join(INTERVENTIONS_FILE_NAME);
    let Some(table) = read_named_table_optional(&file_path)? else {
        return Ok(from_model_file.cloned().unwrap_or_default());
    };

    ensure!(
        from_model_file.is_none(),
        "Interventions are given in both model.toml and {INTERVENTIONS_FILE_NAME}. \
        Please remove one of them."
    );

    let params = InterventionParameters::from_named_quantities(
        table.iter().map(|(name, value)| (name.as_str(), *value)),
    )
    .with_context(|| input_err_msg(&file_path))?;
    params.validate().with_context(|| input_err_msg(&file_path))?;

    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{assert_error, interventions};
    use rstest::rstest;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    fn create_interventions_file(dir_path: &Path, contents: &str) {
        let mut file = File::create(dir_path.join(INTERVENTIONS_FILE_NAME)).unwrap();
        writeln!(file, "variable,quantity\n{contents}").unwrap();
    }

    #[test]
    fn test_read_interventions_defaults() {
        let dir = tempdir().unwrap();
        assert_eq!(
            read_interventions(dir.path(), None).unwrap(),
            InterventionParameters::default()
        );
    }

    #[rstest]
    fn test_read_interventions_from_model_file(interventions: InterventionParameters) {
        let dir = tempdir().unwrap();
        let params = InterventionParameters {
            reduction_in_pig_breeding: 40.0,
            ..interventions
        };
        assert_eq!(read_interventions(dir.path(), Some(&params)).unwrap(), params);
    }

    #[test]
    fn test_read_interventions_from_csv() {
        let dir = tempdir().unwrap();
        create_interventions_file(
            dir.path(),
            "reduction_in_poultry_breeding,25\nmonths,36\nuse_grass_and_residues_for_dairy,1",
        );
        assert_eq!(
            read_interventions(dir.path(), None).unwrap(),
            InterventionParameters {
                reduction_in_poultry_breeding: 25.0,
                months: 36,
                use_grass_and_residues_for_dairy: true,
                ..Default::default()
            }
        );
    }

    #[rstest]
    fn test_read_interventions_both(interventions: InterventionParameters) {
        let dir = tempdir().unwrap();
        create_interventions_file(dir.path(), "months,36");
        assert_error!(
            read_interventions(dir.path(), Some(&interventions)),
            "Interventions are given in both model.toml and interventions.csv. \
            Please remove one of them."
        );
    }

    #[rstest]
    #[case("discount_rate,150")]
    #[case("months,2.5")]
    #[case("reduction_in_goats,10")]
    fn test_read_interventions_invalid(#[case] contents: &str) {
        let dir = tempdir().unwrap();
        create_interventions_file(dir.path(), contents);
        let file_path = dir.path().join(INTERVENTIONS_FILE_NAME);
        assert_error!(
            read_interventions(dir.path(), None),
            input_err_msg(&file_path)
        );
    }
}
