//! Derivation of the starting state and run constants from the baseline statistics.
use super::slaughter::{SlaughterCapacity, capacity_hours};
use super::state::SimulationState;
use crate::baseline::{BaselineInputs, BaselineStatistics, CattleBaseline};
use crate::error::{ModelResult, ensure_data};
use crate::intervention::{InterventionFractions, InterventionParameters};
use crate::track::PerTrack;
use crate::units::{Dimensionless, Heads, Hours, Pounds, PoundsPerHead};

/// Calves born to each pregnant cow
pub const CALVES_PER_MOTHER: Dimensionless = Dimensionless(1.0);

/// Used to convert annual figures to monthly ones
pub const MONTHS_PER_YEAR: Dimensionless = Dimensionless(12.0);

/// The make-up of the cattle herd, split into beef and dairy tracks.
///
/// The baseline data doesn't distinguish beef from dairy heifers and calves, so these are
/// apportioned using the ratio of dairy cows to beef cows.
#[derive(Debug, Clone, PartialEq)]
pub struct HerdComposition {
    /// Ratio of dairy cows to beef cows
    pub dairy_beef_mother_ratio: Dimensionless,
    /// Fraction of calves which end up in the beef track
    pub calves_destined_for_beef_ratio: Dimensionless,
    /// Dairy heifers 500 lb and over
    pub dairy_heifers: Heads,
    /// Beef heifers 500 lb and over
    pub beef_heifers: Heads,
    /// Beef calves under 500 lb
    pub beef_calves: Heads,
    /// Male dairy calves, raised for beef
    pub dairy_calf_steers: Heads,
    /// Female dairy calves
    pub dairy_calf_girls: Heads,
    /// New beef calves per month
    pub new_beef_calves_per_month: Heads,
    /// New dairy calves per month
    pub new_dairy_calves_per_month: Heads,
    /// Head of cattle in the beef track
    pub beef_track: Heads,
    /// Head of cattle in the dairy track
    pub dairy_track: Heads,
}

impl HerdComposition {
    /// Split the cattle herd into beef and dairy tracks
    pub fn from_baseline(cattle: &CattleBaseline) -> ModelResult<Self> {
        ensure_data!(
            cattle.beef_cows > Heads(0.0),
            "Number of beef cows cannot be zero"
        );
        ensure_data!(
            cattle.calves > Heads(0.0),
            "Number of calves under 500 lb cannot be zero"
        );
        ensure_data!(
            cattle.milk_cows <= cattle.beef_cows,
            "Number of milk cows ({}) cannot exceed number of beef cows ({}): splitting calves and \
            heifers by this ratio would leave a negative number of beef animals",
            cattle.milk_cows.value(),
            cattle.beef_cows.value()
        );

        let dairy_beef_mother_ratio = cattle.milk_cows / cattle.beef_cows;
        let dairy_heifers = cattle.heifers * dairy_beef_mother_ratio;
        let beef_heifers = cattle.heifers - dairy_heifers;

        let dairy_calves = cattle.calves * dairy_beef_mother_ratio;
        let beef_calves = cattle.calves - dairy_calves;
        let dairy_calf_steers = dairy_calves / Dimensionless(2.0);
        let dairy_calf_girls = dairy_calves / Dimensionless(2.0);

        let calves_destined_for_beef_ratio = (beef_calves + dairy_calf_steers) / cattle.calves;
        let new_beef_calves = cattle.calf_crop * calves_destined_for_beef_ratio;
        let new_dairy_calves = cattle.calf_crop - new_beef_calves;

        Ok(Self {
            dairy_beef_mother_ratio,
            calves_destined_for_beef_ratio,
            dairy_heifers,
            beef_heifers,
            beef_calves,
            dairy_calf_steers,
            dairy_calf_girls,
            new_beef_calves_per_month: new_beef_calves / MONTHS_PER_YEAR,
            new_dairy_calves_per_month: new_dairy_calves / MONTHS_PER_YEAR,
            beef_track: dairy_calf_steers
                + beef_calves
                + cattle.steers
                + cattle.beef_cows
                + beef_heifers,
            dairy_track: dairy_calf_girls + cattle.milk_cows + dairy_heifers,
        })
    }
}

/// Gestation periods in months, at which breeding interventions take effect
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestationPeriods {
    /// Cow gestation
    pub cow: f64,
    /// Pig gestation
    pub pig: f64,
    /// Poultry incubation
    pub poultry: f64,
}

/// Values which are fixed for the duration of a run
#[derive(Debug, Clone, PartialEq)]
pub struct RunConstants {
    /// The number of months to simulate
    pub months: u32,
    /// Intervention parameters as fractions
    pub interventions: InterventionFractions,
    /// The beef/dairy split of the starting herd
    pub herd: HerdComposition,
    /// Gestation periods for each species
    pub gestation: GestationPeriods,
    /// Piglets born to each pregnant sow
    pub piglets_per_litter: Dimensionless,
    /// Productive life of dairy cattle, in months
    pub dairy_life_expectancy_months: Dimensionless,
    /// Monthly feed per head for each track
    pub feed_per_head: PerTrack<PoundsPerHead>,
    /// Monthly feed demand of the starting populations
    pub baseline_feed: Pounds,
    /// Total monthly slaughter capacity in worker-hours, after the slaughter multiplier
    pub total_capacity_hours: Hours,
}

/// Compute the starting state and run constants.
///
/// Percentages in `params` are converted to fractions here and nowhere else.
pub fn initialise(
    baseline: &BaselineStatistics,
    params: &InterventionParameters,
) -> ModelResult<(SimulationState, RunConstants)> {
    let interventions = params.to_fractions()?;
    let inputs = BaselineInputs::try_from(baseline)?;
    let herd = HerdComposition::from_baseline(&inputs.cattle)?;

    ensure_data!(
        inputs.pigs.piglets_per_litter > 0.0,
        "Number of piglets per litter cannot be zero"
    );
    ensure_data!(
        inputs.cattle.dairy_life_expectancy_years > 0.0,
        "Dairy life expectancy cannot be zero"
    );

    let baseline_capacity = SlaughterCapacity {
        cow: inputs.cattle.slaughter_per_month,
        pig: inputs.pigs.slaughter_per_month,
        poultry: inputs.poultry.slaughter_per_month,
    };
    let baseline_capacity_hours = capacity_hours(&baseline_capacity);
    ensure_data!(
        baseline_capacity_hours > Hours(0.0),
        "Total baseline slaughter capacity cannot be zero"
    );

    let population = PerTrack {
        beef: herd.beef_track,
        dairy: herd.dairy_track,
        pig: inputs.pigs.population,
        poultry: inputs.poultry.population,
    };

    let feed_per_head = PerTrack {
        beef: inputs.cattle.beef_feed_per_head,
        dairy: if interventions.use_grass_and_residues_for_dairy {
            PoundsPerHead(0.0)
        } else {
            inputs.cattle.dairy_feed_per_head
        },
        pig: inputs.pigs.feed_per_head,
        poultry: inputs.poultry.feed_per_head,
    };
    let baseline_feed = population.zip_with(&feed_per_head, |pop, rate| *pop * *rate).total();

    let piglets_per_litter = Dimensionless(inputs.pigs.piglets_per_litter);
    let state = SimulationState {
        population,
        pregnant_cows: herd.new_beef_calves_per_month / CALVES_PER_MOTHER,
        pregnant_sows: inputs.pigs.piglets_per_month / piglets_per_litter,
        dairy_births: herd.new_dairy_calves_per_month,
        poultry_births: inputs.poultry.chicks_per_month,
        capacity: baseline_capacity.scaled(interventions.slaughter_multiplier),
    };

    let constants = RunConstants {
        months: params.months,
        interventions,
        gestation: GestationPeriods {
            cow: inputs.cattle.gestation_months,
            pig: inputs.pigs.gestation_months,
            poultry: inputs.poultry.gestation_months,
        },
        piglets_per_litter,
        dairy_life_expectancy_months: Dimensionless(inputs.cattle.dairy_life_expectancy_years)
            * MONTHS_PER_YEAR,
        feed_per_head,
        baseline_feed,
        total_capacity_hours: baseline_capacity_hours * interventions.slaughter_multiplier,
        herd,
    };

    Ok((state, constants))
}
