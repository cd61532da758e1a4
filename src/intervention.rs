//! Policy interventions applied for the whole of a simulation run.
use crate::error::{ModelError, ModelResult, ensure_parameter};
use crate::units::Dimensionless;
use serde::{Deserialize, Serialize};

macro_rules! define_param_default {
    ($name:ident, $type: ty, $value: expr) => {
        fn $name() -> $type {
            $value
        }
    };
}

define_param_default!(default_change_to_baseline_slaughter, f64, 100.0);
define_param_default!(default_months, u32, 12);
define_param_default!(default_discount_rate, f64, 50.0);

/// The policy interventions for a run.
///
/// Percentages are given on a 0–100 scale, as a user would enter them.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct InterventionParameters {
    /// Percentage reduction in beef-calf births
    #[serde(default)]
    pub reduction_in_beef_calves: f64,
    /// Percentage reduction in dairy-calf births
    #[serde(default)]
    pub reduction_in_dairy_calves: f64,
    /// Slaughter rate as a percentage of the baseline rate (100 = unchanged)
    #[serde(default = "default_change_to_baseline_slaughter")]
    pub change_to_baseline_slaughter: f64,
    /// Percentage reduction in pig breeding
    #[serde(default)]
    pub reduction_in_pig_breeding: f64,
    /// Percentage reduction in poultry breeding
    #[serde(default)]
    pub reduction_in_poultry_breeding: f64,
    /// Number of months to simulate
    #[serde(default = "default_months")]
    pub months: u32,
    /// Percentage of slaughter skill lost when labour moves between species
    #[serde(default = "default_discount_rate")]
    pub discount_rate: f64,
    /// Percentage of slaughter and other deaths drawn from pregnant females
    #[serde(default)]
    pub mother_slaughter: f64,
    /// Whether dairy cattle are fed on grass and crop residues (and so don't count toward feed)
    #[serde(default)]
    pub use_grass_and_residues_for_dairy: bool,
}

impl Default for InterventionParameters {
    fn default() -> Self {
        Self {
            reduction_in_beef_calves: 0.0,
            reduction_in_dairy_calves: 0.0,
            change_to_baseline_slaughter: default_change_to_baseline_slaughter(),
            reduction_in_pig_breeding: 0.0,
            reduction_in_poultry_breeding: 0.0,
            months: default_months(),
            discount_rate: default_discount_rate(),
            mother_slaughter: 0.0,
            use_grass_and_residues_for_dairy: false,
        }
    }
}

/// Check that a parameter is a percentage between 0 and 100
fn check_percentage(name: &str, value: f64) -> ModelResult<()> {
    ensure_parameter!(
        (0.0..=100.0).contains(&value),
        "`{name}` must be a percentage between 0 and 100 (got {value})"
    );

    Ok(())
}

/// Convert a value from a named table into a whole number of months
#[allow(clippy::float_cmp, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn months_from_quantity(value: f64) -> ModelResult<u32> {
    ensure_parameter!(
        value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= f64::from(u32::MAX),
        "`months` must be a non-negative whole number (got {value})"
    );

    Ok(value as u32)
}

/// Convert a value from a named table into a flag
#[allow(clippy::float_cmp)]
fn flag_from_quantity(name: &str, value: f64) -> ModelResult<bool> {
    if value == 0.0 {
        Ok(false)
    } else if value == 1.0 {
        Ok(true)
    } else {
        Err(ModelError::ParameterError(format!(
            "`{name}` must be 0 or 1 (got {value})"
        )))
    }
}

impl InterventionParameters {
    /// Check that all parameters are in range
    pub fn validate(&self) -> ModelResult<()> {
        check_percentage("reduction_in_beef_calves", self.reduction_in_beef_calves)?;
        check_percentage("reduction_in_dairy_calves", self.reduction_in_dairy_calves)?;
        check_percentage("reduction_in_pig_breeding", self.reduction_in_pig_breeding)?;
        check_percentage(
            "reduction_in_poultry_breeding",
            self.reduction_in_poultry_breeding,
        )?;
        check_percentage("discount_rate", self.discount_rate)?;
        check_percentage("mother_slaughter", self.mother_slaughter)?;

        // Slaughter may be raised above the baseline, so this is only bounded below
        ensure_parameter!(
            self.change_to_baseline_slaughter.is_finite()
                && self.change_to_baseline_slaughter >= 0.0,
            "`change_to_baseline_slaughter` must be a finite, non-negative percentage (got {})",
            self.change_to_baseline_slaughter
        );

        Ok(())
    }

    /// Read parameters from a table of named quantities.
    ///
    /// Missing names take their default values. Flags are given as 0 or 1.
    pub fn from_named_quantities<'a, I>(quantities: I) -> ModelResult<Self>
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let mut params = Self::default();
        for (name, value) in quantities {
            match name {
                "reduction_in_beef_calves" => params.reduction_in_beef_calves = value,
                "reduction_in_dairy_calves" => params.reduction_in_dairy_calves = value,
                "change_to_baseline_slaughter" => params.change_to_baseline_slaughter = value,
                "reduction_in_pig_breeding" => params.reduction_in_pig_breeding = value,
                "reduction_in_poultry_breeding" => params.reduction_in_poultry_breeding = value,
                "months" => params.months = months_from_quantity(value)?,
                "discount_rate" => params.discount_rate = value,
                "mother_slaughter" => params.mother_slaughter = value,
                "use_grass_and_residues_for_dairy" => {
                    params.use_grass_and_residues_for_dairy = flag_from_quantity(name, value)?;
                }
                unknown => {
                    return Err(ModelError::ParameterError(format!(
                        "Unknown intervention parameter `{unknown}`"
                    )));
                }
            }
        }

        Ok(params)
    }

    /// Validate the parameters and convert percentages to fractions
    pub fn to_fractions(&self) -> ModelResult<InterventionFractions> {
        self.validate()?;

        let fraction = |percentage: f64| Dimensionless(percentage / 100.0);
        Ok(InterventionFractions {
            reduction_in_beef_calves: fraction(self.reduction_in_beef_calves),
            reduction_in_dairy_calves: fraction(self.reduction_in_dairy_calves),
            slaughter_multiplier: fraction(self.change_to_baseline_slaughter),
            reduction_in_pig_breeding: fraction(self.reduction_in_pig_breeding),
            reduction_in_poultry_breeding: fraction(self.reduction_in_poultry_breeding),
            skill_transfer_efficiency: fraction(100.0 - self.discount_rate),
            mother_slaughter: fraction(self.mother_slaughter),
            use_grass_and_residues_for_dairy: self.use_grass_and_residues_for_dairy,
        })
    }
}

/// Intervention parameters with percentages converted to fractions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterventionFractions {
    /// Fractional reduction in beef-calf births
    pub reduction_in_beef_calves: Dimensionless,
    /// Fractional reduction in dairy-calf births
    pub reduction_in_dairy_calves: Dimensionless,
    /// Multiplier on baseline slaughter capacity
    pub slaughter_multiplier: Dimensionless,
    /// Fractional reduction in pig breeding
    pub reduction_in_pig_breeding: Dimensionless,
    /// Fractional reduction in poultry breeding
    pub reduction_in_poultry_breeding: Dimensionless,
    /// Fraction of spare slaughter hours usable by the next species
    pub skill_transfer_efficiency: Dimensionless,
    /// Fraction of slaughter and other deaths drawn from pregnant females
    pub mother_slaughter: Dimensionless,
    /// Whether dairy cattle feed is excluded
    pub use_grass_and_residues_for_dairy: bool,
}
