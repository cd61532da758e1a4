//! Functionality for running the livestock simulation.
use crate::baseline::BaselineStatistics;
use crate::error::ModelResult;
use crate::intervention::InterventionParameters;
use crate::model::Model;
use crate::output::{DataWriter, feed_reduction_headline, write_summary};
use crate::units::Heads;
use anyhow::Result;
use log::{debug, info};
use std::path::Path;

pub mod initialise;
pub use initialise::{RunConstants, initialise};
pub mod record;
pub use record::{MonthlyRecord, TrackRecord};
pub mod slaughter;
pub mod state;
pub use state::SimulationState;
pub mod step;
pub use step::{StepOutcome, step};
pub mod summary;
pub use summary::Summary;

/// A simulation ready to run, with its starting state and constants derived from the inputs
#[derive(Debug, Clone, PartialEq)]
pub struct Simulation {
    initial_state: SimulationState,
    constants: RunConstants,
}

/// The result of running a simulation to completion
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationOutput {
    /// One record per month, in order
    pub records: Vec<MonthlyRecord>,
    /// Totals over the run
    pub summary: Summary,
}

impl Simulation {
    /// Derive the starting state and run constants, checking the inputs.
    ///
    /// Any [`crate::error::ModelError`] is raised here, before any month is simulated.
    pub fn new(
        baseline: &BaselineStatistics,
        params: &InterventionParameters,
    ) -> ModelResult<Self> {
        let (initial_state, constants) = initialise(baseline, params)?;

        Ok(Self {
            initial_state,
            constants,
        })
    }

    /// The values fixed for the duration of the run
    pub fn constants(&self) -> &RunConstants {
        &self.constants
    }

    /// The state at the start of month zero
    pub fn initial_state(&self) -> &SimulationState {
        &self.initial_state
    }

    /// Iterate over the months of the run.
    ///
    /// Each run starts afresh from the initial state, so this can be called repeatedly.
    pub fn iter(&self) -> MonthlySteps<'_> {
        MonthlySteps {
            constants: &self.constants,
            state: self.initial_state.clone(),
            month: 0,
        }
    }

    /// Run every month and summarise the results
    pub fn run(&self) -> SimulationOutput {
        let records: Vec<_> = self.iter().map(|outcome| outcome.record).collect();
        let summary = Summary::from_records(
            &records,
            self.constants.baseline_feed,
            self.constants.months,
        );

        SimulationOutput { records, summary }
    }
}

/// An iterator over the months of a run, yielding the outcome of each
pub struct MonthlySteps<'a> {
    constants: &'a RunConstants,
    state: SimulationState,
    month: u32,
}

impl Iterator for MonthlySteps<'_> {
    type Item = StepOutcome;

    fn next(&mut self) -> Option<Self::Item> {
        if self.month >= self.constants.months {
            return None;
        }

        let outcome = step(&self.state, self.constants, self.month);
        self.state = outcome.state.clone();
        self.month += 1;

        Some(outcome)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.constants.months.saturating_sub(self.month)).ok();
        (remaining.unwrap_or(usize::MAX), remaining)
    }
}

/// Simulate the given inputs without writing anything to disk
pub fn run_simulation(
    baseline: &BaselineStatistics,
    params: &InterventionParameters,
) -> ModelResult<SimulationOutput> {
    Ok(Simulation::new(baseline, params)?.run())
}

/// Run the simulation for a model, writing results to `output_path`.
///
/// # Arguments:
///
/// * `model` - The model to run
/// * `output_path` - The folder to which output files will be written
/// * `debug_model` - Whether to write additional information (e.g. the end-of-month state) to file
pub fn run(model: &Model, output_path: &Path, debug_model: bool) -> Result<Summary> {
    let simulation = Simulation::new(&model.baseline, &model.interventions)?;
    let constants = simulation.constants();
    let scale = &model.parameters.reporting;
    info!("Simulating {} months", constants.months);
    debug!(
        "Baseline monthly feed: {} lb; total slaughter capacity: {} worker-hours per month",
        constants.baseline_feed.value(),
        constants.total_capacity_hours.value()
    );

    let mut writer = DataWriter::create(output_path, *scale, debug_model)?;
    let mut records = Vec::with_capacity(constants.months as usize);
    for outcome in simulation.iter() {
        let month = outcome.record.month;
        let transfer = &outcome.transfer;
        if transfer.poultry_to_pig > Heads(0.0) || transfer.pig_to_cow > Heads(0.0) {
            debug!(
                "Month {month}: spare slaughter capacity moved from poultry to pigs: {}, \
                from pigs to cattle: {}",
                transfer.poultry_to_pig.value(),
                transfer.pig_to_cow.value()
            );
        }

        writer.write_record(&outcome.record)?;
        writer.write_debug_state(month, &outcome.state)?;
        records.push(outcome.record);
    }
    writer.flush()?;

    let summary = Summary::from_records(&records, constants.baseline_feed, constants.months);
    write_summary(output_path, &summary, scale)?;
    info!("{}", feed_reduction_headline(&summary, scale));

    Ok(summary)
}
