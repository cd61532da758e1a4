//! The monthly update of the simulation state.
use super::initialise::{CALVES_PER_MOTHER, RunConstants};
use super::record::{MonthlyRecord, TrackRecord};
use super::slaughter::{CapacityTransfer, SLAUGHTER_HOURS};
use super::state::SimulationState;
use crate::track::PerTrack;
use crate::units::{Dimensionless, Hours};

/// Fraction of each population dying of causes other than slaughter each month
pub const OTHER_DEATH_RATE: Dimensionless = Dimensionless(0.005);

/// Whether `month` falls on the given gestation period (to within half a month).
///
/// Breeding interventions affect animals conceived at the start of the run, so their effect on
/// births only shows up one gestation period later.
pub fn at_gestation_boundary(month: u32, gestation_months: f64) -> bool {
    (f64::from(month) - gestation_months).abs() <= 0.5
}

/// The fraction of births remaining after a reduction
fn remaining(reduction: Dimensionless) -> Dimensionless {
    Dimensionless(1.0) - reduction
}

/// The outcome of simulating one month
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    /// The state at the start of the next month
    pub state: SimulationState,
    /// What happened during this month
    pub record: MonthlyRecord,
    /// Slaughter capacity moved between species during this month
    pub transfer: CapacityTransfer,
}

/// Advance the simulation by one month.
///
/// The returned record describes month `month` using the populations at the start of the month;
/// the returned state is the state at the start of the following month.
pub fn step(state: &SimulationState, constants: &RunConstants, month: u32) -> StepOutcome {
    let interventions = &constants.interventions;
    let population = &state.population;
    let mut next = state.clone();

    let mut births = PerTrack {
        beef: state.pregnant_cows * CALVES_PER_MOTHER,
        dairy: state.dairy_births,
        pig: state.pregnant_sows * constants.piglets_per_litter,
        poultry: state.poultry_births,
    };

    if at_gestation_boundary(month, constants.gestation.cow) {
        let keep_beef = remaining(interventions.reduction_in_beef_calves);
        births.beef = births.beef * keep_beef;
        next.pregnant_cows = next.pregnant_cows * keep_beef;
        next.dairy_births = next.dairy_births * remaining(interventions.reduction_in_dairy_calves);
        births.dairy = next.dairy_births;
    }
    if at_gestation_boundary(month, constants.gestation.pig) {
        let keep_pigs = remaining(interventions.reduction_in_pig_breeding);
        births.pig = births.pig * keep_pigs;
        next.pregnant_sows = next.pregnant_sows * keep_pigs;
    }
    if at_gestation_boundary(month, constants.gestation.poultry) {
        next.poultry_births =
            next.poultry_births * remaining(interventions.reduction_in_poultry_breeding);
        births.poultry = next.poultry_births;
    }
    births.beef = births.beef.non_negative();
    births.pig = births.pig.non_negative();

    let transfer = next
        .capacity
        .cascade(population, interventions.skill_transfer_efficiency);

    // Dairy cattle are only culled at the end of their productive life; beef takes the rest of the
    // cow capacity
    let dairy_slaughter = population.dairy / constants.dairy_life_expectancy_months;
    let slaughtered = PerTrack {
        beef: (next.capacity.cow - dairy_slaughter).non_negative(),
        dairy: dairy_slaughter,
        pig: next.capacity.pig,
        poultry: next.capacity.poultry,
    };

    // No more beef cattle can be reported slaughtered than there are in the herd, but the full
    // slaughter still comes out of the herd and the pregnant pool below
    let reported_slaughter = PerTrack {
        beef: slaughtered.beef.min(population.beef),
        ..slaughtered
    };

    let other_deaths = population.map(|pop| *pop * OTHER_DEATH_RATE);
    let feed = population.zip_with(&constants.feed_per_head, |pop, rate| *pop * *rate);
    let slaughter_hours =
        reported_slaughter.zip_with(&SLAUGHTER_HOURS, |head, hours| *head * *hours);

    let combined_feed = feed.total();
    let record = MonthlyRecord {
        month,
        tracks: PerTrack::from_fn(|track| {
            let hours = *slaughter_hours.get(track);
            TrackRecord {
                population: *population.get(track),
                births: *births.get(track),
                slaughtered: *reported_slaughter.get(track),
                slaughter_hours: hours,
                slaughter_hours_fraction: fraction_of_capacity(
                    hours,
                    constants.total_capacity_hours,
                ),
                other_deaths: *other_deaths.get(track),
                feed: *feed.get(track),
            }
        }),
        combined_feed,
        combined_feed_saved: constants.baseline_feed - combined_feed,
    };

    next.population = PerTrack::from_fn(|track| {
        (*population.get(track) + *births.get(track)
            - *slaughtered.get(track)
            - *other_deaths.get(track))
        .non_negative()
    });

    // Some of the animals lost are pregnant females, which reduces future births
    let mothers = interventions.mother_slaughter;
    next.pregnant_sows = (next.pregnant_sows - mothers * (slaughtered.pig + other_deaths.pig))
        .non_negative();
    next.pregnant_cows = (next.pregnant_cows - mothers * (slaughtered.beef + other_deaths.beef))
        .non_negative();

    StepOutcome {
        state: next,
        record,
        transfer,
    }
}

/// Slaughter hours as a fraction of the total capacity.
///
/// If capacity has been set to zero, nothing is slaughtered and the fraction is zero.
pub fn fraction_of_capacity(hours: Hours, total_capacity_hours: Hours) -> Dimensionless {
    if total_capacity_hours > Hours(0.0) {
        hours / total_capacity_hours
    } else {
        Dimensionless(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baseline::BaselineStatistics;
    use crate::fixture::{baseline_statistics, interventions};
    use crate::intervention::InterventionParameters;
    use crate::simulation::initialise::initialise;
    use crate::units::{Heads, Pounds};
    use float_cmp::assert_approx_eq;
    use rstest::rstest;

    fn run_records(
        baseline: &BaselineStatistics,
        params: &InterventionParameters,
    ) -> Vec<MonthlyRecord> {
        let (mut state, constants) = initialise(baseline, params).unwrap();
        (0..constants.months)
            .map(|month| {
                let outcome = step(&state, &constants, month);
                state = outcome.state;
                outcome.record
            })
            .collect()
    }

    #[rstest]
    #[case(0, 9.0, false)]
    #[case(8, 9.0, false)]
    #[case(9, 9.0, true)]
    #[case(9, 9.4, true)]
    #[case(10, 9.4, false)]
    #[case(10, 9.6, true)]
    #[case(10, 9.0, false)]
    fn test_at_gestation_boundary(
        #[case] month: u32,
        #[case] gestation: f64,
        #[case] expected: bool,
    ) {
        assert_eq!(at_gestation_boundary(month, gestation), expected);
    }

    #[rstest]
    fn test_first_month(
        baseline_statistics: BaselineStatistics,
        interventions: InterventionParameters,
    ) {
        let (state, constants) = initialise(&baseline_statistics, &interventions).unwrap();
        let outcome = step(&state, &constants, 0);
        let beef = &outcome.record.tracks.beef;

        // Nothing is short of capacity, so the cascade does nothing
        assert_eq!(outcome.transfer, CapacityTransfer::default());

        // Beef gets whatever cow capacity isn't used by the dairy cull
        let dairy_slaughter = Heads(425.0 / 60.0);
        assert_approx_eq!(
            Heads,
            outcome.record.tracks.dairy.slaughtered,
            dairy_slaughter
        );
        assert_approx_eq!(Heads, beef.slaughtered, Heads(100.0) - dairy_slaughter);
        assert_approx_eq!(Heads, beef.births, Heads(87.5));
        assert_approx_eq!(Heads, beef.other_deaths, Heads(2375.0 * 0.005));

        let expected = beef.population + beef.births - beef.slaughtered - beef.other_deaths;
        assert_approx_eq!(Heads, outcome.state.population.beef, expected, epsilon = 1e-9);

        // Feed is unchanged from the baseline in the first month
        assert_approx_eq!(Pounds, outcome.record.combined_feed, constants.baseline_feed);
        assert_approx_eq!(
            Pounds,
            outcome.record.combined_feed_saved,
            Pounds(0.0),
            epsilon = 1e-9
        );
    }

    #[rstest]
    fn test_slaughter_hours_fraction(
        baseline_statistics: BaselineStatistics,
        interventions: InterventionParameters,
    ) {
        let (state, constants) = initialise(&baseline_statistics, &interventions).unwrap();
        let record = step(&state, &constants, 0).record;
        let total: f64 = record
            .tracks
            .iter()
            .map(|(_, track)| track.slaughter_hours_fraction.value())
            .sum();

        // All capacity is used, so the fractions account for all of the hours
        assert_approx_eq!(f64, total, 1.0, epsilon = 1e-12);
    }

    #[rstest]
    fn test_gestation_window(
        baseline_statistics: BaselineStatistics,
        interventions: InterventionParameters,
    ) {
        let baseline_run = run_records(&baseline_statistics, &interventions);
        let reduced = InterventionParameters {
            reduction_in_beef_calves: 50.0,
            ..interventions
        };
        let reduced_run = run_records(&baseline_statistics, &reduced);

        // Cow gestation is 9 months in the fixture
        assert_eq!(baseline_run[..9], reduced_run[..9]);
        assert_approx_eq!(Heads, baseline_run[9].tracks.beef.births, Heads(87.5));
        assert_approx_eq!(Heads, reduced_run[9].tracks.beef.births, Heads(43.75));
    }

    #[rstest]
    fn test_cascade_into_pigs(
        baseline_statistics: BaselineStatistics,
        interventions: InterventionParameters,
    ) {
        let (mut state, constants) = initialise(&baseline_statistics, &interventions).unwrap();
        state.population.poultry = Heads(10.0);
        let outcome = step(&state, &constants, 0);

        // 40 birds spare at 0.08 h each, half of which is usable at 4 h per pig
        assert_approx_eq!(
            Heads,
            outcome.transfer.poultry_to_pig,
            Heads(0.4),
            epsilon = 1e-12
        );
        assert_approx_eq!(
            Heads,
            outcome.record.tracks.pig.slaughtered,
            Heads(140.4),
            epsilon = 1e-12
        );
        assert_eq!(outcome.record.tracks.poultry.slaughtered, Heads(10.0));
    }

    #[rstest]
    fn test_cascade_full_discount(
        baseline_statistics: BaselineStatistics,
        interventions: InterventionParameters,
    ) {
        let interventions = InterventionParameters {
            discount_rate: 100.0,
            ..interventions
        };
        let (mut state, constants) = initialise(&baseline_statistics, &interventions).unwrap();
        state.population.poultry = Heads(10.0);
        state.population.pig = Heads(20.0);
        let outcome = step(&state, &constants, 0);
        assert_eq!(outcome.transfer, CapacityTransfer::default());
        assert_eq!(outcome.record.tracks.pig.slaughtered, Heads(20.0));
        let cows = outcome.record.tracks.beef.slaughtered + outcome.record.tracks.dairy.slaughtered;
        assert_approx_eq!(Heads, cows, Heads(100.0), epsilon = 1e-12);
    }

    #[rstest]
    fn test_beef_herd_exhausted(
        baseline_statistics: BaselineStatistics,
        interventions: InterventionParameters,
    ) {
        let interventions = InterventionParameters {
            change_to_baseline_slaughter: 3000.0,
            ..interventions
        };
        let (state, constants) = initialise(&baseline_statistics, &interventions).unwrap();
        let outcome = step(&state, &constants, 0);
        let beef = &outcome.record.tracks.beef;

        // Spare pig capacity (4200 - 1000 head at 4 h, half usable) goes to cows
        let intended = Heads(3000.0 + 1600.0 - 425.0 / 60.0);
        assert_approx_eq!(Heads, outcome.transfer.pig_to_cow, Heads(1600.0), epsilon = 1e-9);
        assert!(intended > state.population.beef);

        // Only the herd itself can be reported as slaughtered, but the herd is used up
        assert_eq!(beef.slaughtered, state.population.beef);
        assert_approx_eq!(Hours, beef.slaughter_hours, Hours(2375.0 * 4.0));
        assert_eq!(outcome.state.population.beef, Heads(0.0));
    }

    #[rstest]
    fn test_pregnant_pool_depletion(
        baseline_statistics: BaselineStatistics,
        interventions: InterventionParameters,
    ) {
        let interventions = InterventionParameters {
            mother_slaughter: 10.0,
            ..interventions
        };
        let (state, constants) = initialise(&baseline_statistics, &interventions).unwrap();
        assert_approx_eq!(Heads, state.pregnant_sows, Heads(20.0));
        assert_approx_eq!(Heads, state.pregnant_cows, Heads(87.5));
        let outcome = step(&state, &constants, 0);

        // 140 pigs slaughtered and 5 other deaths
        assert_approx_eq!(
            Heads,
            outcome.state.pregnant_sows,
            Heads(20.0 - 0.1 * 145.0),
            epsilon = 1e-12
        );

        // Beef slaughter is what the dairy cull leaves of the cow capacity
        let beef_losses = 100.0 - 425.0 / 60.0 + 2375.0 * 0.005;
        assert_approx_eq!(
            Heads,
            outcome.state.pregnant_cows,
            Heads(87.5 - 0.1 * beef_losses),
            epsilon = 1e-12
        );
    }

    #[rstest]
    #[case(0.0, 150.0, 20.0)]
    #[case(50.0, 75.0, 10.0)]
    #[case(100.0, 0.0, 0.0)]
    fn test_pig_breeding_reduction(
        baseline_statistics: BaselineStatistics,
        interventions: InterventionParameters,
        #[case] reduction: f64,
        #[case] expected_births: f64,
        #[case] expected_sows: f64,
    ) {
        let interventions = InterventionParameters {
            reduction_in_pig_breeding: reduction,
            ..interventions
        };
        let (mut state, constants) = initialise(&baseline_statistics, &interventions).unwrap();
        let mut births = Vec::new();
        for month in 0..6 {
            let outcome = step(&state, &constants, month);
            births.push(outcome.record.tracks.pig.births);
            state = outcome.state;
            if month == 4 {
                // Pig gestation is 4 months in the fixture
                assert_approx_eq!(Heads, state.pregnant_sows, Heads(expected_sows));
            }
        }

        for month_births in &births[..4] {
            assert_approx_eq!(Heads, *month_births, Heads(150.0));
        }

        // The smaller pool of pregnant sows gives fewer births from then on
        assert_approx_eq!(Heads, births[4], Heads(expected_births));
        assert_approx_eq!(Heads, births[5], Heads(expected_births));
    }

    #[rstest]
    #[case(0.0, 50.0)]
    #[case(25.0, 37.5)]
    fn test_poultry_breeding_reduction(
        baseline_statistics: BaselineStatistics,
        interventions: InterventionParameters,
        #[case] reduction: f64,
        #[case] expected_births: f64,
    ) {
        let interventions = InterventionParameters {
            reduction_in_poultry_breeding: reduction,
            ..interventions
        };
        let records = run_records(&baseline_statistics, &interventions);

        // Poultry incubation is 1 month in the fixture, and the reduced rate persists
        assert_approx_eq!(Heads, records[0].tracks.poultry.births, Heads(50.0));
        assert_approx_eq!(Heads, records[1].tracks.poultry.births, Heads(expected_births));
        assert_approx_eq!(Heads, records[2].tracks.poultry.births, Heads(expected_births));
        assert_approx_eq!(Heads, records[11].tracks.poultry.births, Heads(expected_births));
    }

    #[rstest]
    fn test_populations_non_negative(
        baseline_statistics: BaselineStatistics,
        interventions: InterventionParameters,
    ) {
        let interventions = InterventionParameters {
            change_to_baseline_slaughter: 1000.0,
            reduction_in_beef_calves: 100.0,
            reduction_in_dairy_calves: 100.0,
            reduction_in_pig_breeding: 100.0,
            reduction_in_poultry_breeding: 100.0,
            mother_slaughter: 100.0,
            months: 48,
            ..interventions
        };
        let (mut state, constants) = initialise(&baseline_statistics, &interventions).unwrap();
        for month in 0..constants.months {
            state = step(&state, &constants, month).state;
            for (track, pop) in state.population.iter() {
                assert!(*pop >= Heads(0.0), "{track} population went negative");
            }
            assert!(state.pregnant_cows >= Heads(0.0));
            assert!(state.pregnant_sows >= Heads(0.0));
        }
    }

    #[rstest]
    fn test_grass_fed_dairy(
        baseline_statistics: BaselineStatistics,
        interventions: InterventionParameters,
    ) {
        let interventions = InterventionParameters {
            use_grass_and_residues_for_dairy: true,
            ..interventions
        };
        for record in run_records(&baseline_statistics, &interventions) {
            assert_eq!(record.tracks.dairy.feed, Pounds(0.0));
        }
    }

    #[test]
    fn test_fraction_of_zero_capacity() {
        assert_eq!(
            fraction_of_capacity(Hours(10.0), Hours(0.0)),
            Dimensionless(0.0)
        );
    }
}
