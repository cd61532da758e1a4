//! Fixtures for tests
use crate::baseline::BaselineStatistics;
use crate::intervention::InterventionParameters;
use rstest::fixture;

/// Assert that an error with the given message occurs
macro_rules! assert_error {
    ($result:expr, $msg:expr) => {
        assert_eq!(
            $result.unwrap_err().chain().next().unwrap().to_string(),
            $msg
        );
    };
}
pub(crate) use assert_error;

/// A small, self-consistent set of baseline statistics
#[fixture]
pub fn baseline_statistics() -> BaselineStatistics {
    [
        ("calves_under_500lb", 1000.0),
        ("milk_cows", 200.0),
        ("beef_cows", 800.0),
        ("steers_500lb_plus", 400.0),
        ("heifers_500lb_plus", 400.0),
        ("bulls_500lb_plus", 50.0),
        ("calf_crop", 1200.0),
        ("cattle_on_feed", 300.0),
        ("cow_slaughter_per_month", 100.0),
        ("cow_gestation_months", 9.0),
        ("total_pigs", 1000.0),
        ("piglets_per_month", 150.0),
        ("pig_slaughter_per_month", 140.0),
        ("pig_gestation_months", 4.0),
        ("piglets_per_litter", 7.5),
        ("total_poultry", 2000.0),
        ("poultry_slaughter_per_month", 50.0),
        ("poultry_gestation_months", 1.0),
    ]
    .into_iter()
    .collect()
}

#[fixture]
pub fn interventions() -> InterventionParameters {
    InterventionParameters::default()
}
