//! The module responsible for writing output data to disk.
use crate::model::ReportingScale;
use crate::simulation::{MonthlyRecord, SimulationState, Summary};
use crate::track::{PerTrack, Track};
use crate::units::Heads;
use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::fs;
use std::fs::File;
use std::path::{Path, PathBuf};

pub mod metadata;
pub use metadata::write_metadata;

/// The root folder in which model-specific output folders will be created
const OUTPUT_DIRECTORY_ROOT: &str = "livestock_sim_results";

/// The output file name for per-track monthly figures
const MONTHLY_TRACKS_FILE_NAME: &str = "monthly_tracks.csv";

/// The output file name for monthly feed totals
const MONTHLY_FEED_FILE_NAME: &str = "monthly_feed.csv";

/// The output file name for the run summary
const SUMMARY_FILE_NAME: &str = "summary.toml";

/// The output file name for the end-of-month simulation state
const DEBUG_STATE_FILE_NAME: &str = "debug_state.csv";

/// Feed units in one million (e.g. short tons to megatons)
const FEED_UNITS_PER_MEGA: f64 = 1e6;

/// Get the model name from the specified directory path
pub fn get_output_dir(model_dir: &Path) -> Result<PathBuf> {
    // Get the model name from the dir path. This ends up being convoluted because we need to check
    // for all possible errors. Ugh.
    let model_dir = model_dir
        .canonicalize() // canonicalise in case the user has specified "."
        .context("Could not resolve path to model")?;

    let model_name = model_dir
        .file_name()
        .context("Model cannot be in root folder")?
        .to_str()
        .context("Invalid chars in model dir name")?;

    // Construct path
    Ok([OUTPUT_DIRECTORY_ROOT, model_name].iter().collect())
}

/// Create a new output directory for the model, optionally overwriting existing data
///
/// # Arguments
///
/// * `output_dir` - The output directory to create/overwrite
/// * `allow_overwrite` - Whether to delete and recreate the folder if it is non-empty
///
/// # Returns
///
/// True if the output dir contained existing data that was deleted, false if not, or an error.
pub fn create_output_directory(output_dir: &Path, allow_overwrite: bool) -> Result<bool> {
    // If the folder already exists, then delete it
    let overwrite = if let Ok(mut it) = fs::read_dir(output_dir) {
        if it.next().is_none() {
            // Folder exists and is empty: nothing to do
            return Ok(false);
        }

        ensure!(
            allow_overwrite,
            "Output folder already exists and is not empty. \
            Please delete the folder or pass the --overwrite command-line option."
        );

        fs::remove_dir_all(output_dir)?;
        true
    } else {
        false
    };

    // Try to create the directory, with parents
    fs::create_dir_all(output_dir)?;

    Ok(overwrite)
}

/// Represents a row in the per-track monthly CSV file
#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct TrackRow {
    month: u32,
    track: Track,
    population: f64,
    births: f64,
    slaughtered: f64,
    slaughter_hours: f64,
    slaughter_hours_fraction: f64,
    other_deaths: f64,
    feed: f64,
}

/// Represents a row in the monthly feed CSV file
#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct FeedRow {
    month: u32,
    combined_feed: f64,
    combined_feed_saved: f64,
}

/// Represents a row in the debug state CSV file
#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct StateRow {
    month: u32,
    beef_population: f64,
    dairy_population: f64,
    pig_population: f64,
    poultry_population: f64,
    pregnant_cows: f64,
    pregnant_sows: f64,
    dairy_births: f64,
    poultry_births: f64,
    cow_capacity: f64,
    pig_capacity: f64,
    poultry_capacity: f64,
}

impl StateRow {
    /// Create a new [`StateRow`] for the state at the end of `month`
    fn new(month: u32, state: &SimulationState, scale: &ReportingScale) -> Self {
        let heads = |value| scale.heads(value);
        Self {
            month,
            beef_population: heads(state.population.beef),
            dairy_population: heads(state.population.dairy),
            pig_population: heads(state.population.pig),
            poultry_population: heads(state.population.poultry),
            pregnant_cows: heads(state.pregnant_cows),
            pregnant_sows: heads(state.pregnant_sows),
            dairy_births: heads(state.dairy_births),
            poultry_births: heads(state.poultry_births),
            cow_capacity: heads(state.capacity.cow),
            pig_capacity: heads(state.capacity.pig),
            poultry_capacity: heads(state.capacity.poultry),
        }
    }
}

/// For writing extra debug information about the model
struct DebugDataWriter {
    state_writer: csv::Writer<File>,
}

impl DebugDataWriter {
    /// Open CSV files to write debug info to
    ///
    /// # Arguments
    ///
    /// * `output_path` - Folder where files will be saved
    fn create(output_path: &Path) -> Result<Self> {
        let file_path = output_path.join(DEBUG_STATE_FILE_NAME);

        Ok(Self {
            state_writer: csv::Writer::from_path(file_path)?,
        })
    }

    /// Write the state at the end of a month to file
    fn write_state(
        &mut self,
        month: u32,
        state: &SimulationState,
        scale: &ReportingScale,
    ) -> Result<()> {
        self.state_writer
            .serialize(StateRow::new(month, state, scale))?;

        Ok(())
    }

    /// Flush the underlying streams
    fn flush(&mut self) -> Result<()> {
        self.state_writer.flush()?;

        Ok(())
    }
}

/// An object for writing the monthly records of a run to file
pub struct DataWriter {
    tracks_writer: csv::Writer<File>,
    feed_writer: csv::Writer<File>,
    scale: ReportingScale,
    debug_writer: Option<DebugDataWriter>,
}

impl DataWriter {
    /// Open CSV files to write output data to
    ///
    /// # Arguments
    ///
    /// * `output_path` - Folder where files will be saved
    /// * `scale` - Multipliers to apply to reported quantities
    /// * `save_debug_info` - Whether to include extra CSV files for debugging model
    pub fn create(
        output_path: &Path,
        scale: ReportingScale,
        save_debug_info: bool,
    ) -> Result<Self> {
        let new_writer = |file_name| {
            let file_path = output_path.join(file_name);
            csv::Writer::from_path(file_path)
        };

        let debug_writer = if save_debug_info {
            // Create debug CSV files
            Some(DebugDataWriter::create(output_path)?)
        } else {
            None
        };

        Ok(Self {
            tracks_writer: new_writer(MONTHLY_TRACKS_FILE_NAME)?,
            feed_writer: new_writer(MONTHLY_FEED_FILE_NAME)?,
            scale,
            debug_writer,
        })
    }

    /// Write the record for one month to the CSV files
    pub fn write_record(&mut self, record: &MonthlyRecord) -> Result<()> {
        let scale = &self.scale;
        for (track, values) in record.tracks.iter() {
            let row = TrackRow {
                month: record.month,
                track,
                population: scale.heads(values.population),
                births: scale.heads(values.births),
                slaughtered: scale.heads(values.slaughtered),
                slaughter_hours: scale.hours(values.slaughter_hours),
                slaughter_hours_fraction: values.slaughter_hours_fraction.value(),
                other_deaths: scale.heads(values.other_deaths),
                feed: scale.feed(values.feed),
            };
            self.tracks_writer.serialize(row)?;
        }

        self.feed_writer.serialize(FeedRow {
            month: record.month,
            combined_feed: scale.feed(record.combined_feed),
            combined_feed_saved: scale.feed(record.combined_feed_saved),
        })?;

        Ok(())
    }

    /// Write the state at the end of a month, if debug info is being saved
    pub fn write_debug_state(&mut self, month: u32, state: &SimulationState) -> Result<()> {
        if let Some(wtr) = &mut self.debug_writer {
            wtr.write_state(month, state, &self.scale)?;
        }

        Ok(())
    }

    /// Flush the underlying streams
    pub fn flush(&mut self) -> Result<()> {
        self.tracks_writer.flush()?;
        self.feed_writer.flush()?;
        if let Some(wtr) = &mut self.debug_writer {
            wtr.flush()?;
        }

        Ok(())
    }
}

/// Totals for each track, as written to the summary file
#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct TrackTotals {
    beef: f64,
    dairy: f64,
    pig: f64,
    poultry: f64,
}

impl TrackTotals {
    fn new(totals: &PerTrack<Heads>, scale: &ReportingScale) -> Self {
        let totals = totals.map(|heads| scale.heads(*heads));
        Self {
            beef: totals.beef,
            dairy: totals.dairy,
            pig: totals.pig,
            poultry: totals.poultry,
        }
    }
}

/// The contents of the summary file.
///
/// Tables come after plain values, as TOML requires.
#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct SummaryFile {
    months: u32,
    baseline_monthly_feed: f64,
    baseline_total_feed: f64,
    total_feed: f64,
    total_feed_saved: f64,
    total_births: TrackTotals,
    total_slaughtered: TrackTotals,
}

impl SummaryFile {
    fn new(summary: &Summary, scale: &ReportingScale) -> Self {
        Self {
            months: summary.months,
            baseline_monthly_feed: scale.feed(summary.baseline_monthly_feed),
            baseline_total_feed: scale.feed(summary.baseline_total_feed),
            total_feed: scale.feed(summary.total_feed),
            total_feed_saved: scale.feed(summary.total_feed_saved),
            total_births: TrackTotals::new(&summary.total_births, scale),
            total_slaughtered: TrackTotals::new(&summary.total_slaughtered, scale),
        }
    }
}

/// Write the run summary to the specified output path in TOML format
pub fn write_summary(output_path: &Path, summary: &Summary, scale: &ReportingScale) -> Result<()> {
    let file_path = output_path.join(SUMMARY_FILE_NAME);
    let contents = toml::to_string(&SummaryFile::new(summary, scale))?;
    fs::write(&file_path, contents)
        .with_context(|| format!("Could not write {}", file_path.display()))?;

    Ok(())
}

/// The one-line description of a run's result, with feed in millions of reported units
pub fn feed_reduction_headline(summary: &Summary, scale: &ReportingScale) -> String {
    format!(
        "Total feed use reduction over {} months is {:.0} Mtons from a baseline of {:.0} Mtons",
        summary.months,
        scale.feed(summary.total_feed_saved) / FEED_UNITS_PER_MEGA,
        scale.feed(summary.baseline_total_feed) / FEED_UNITS_PER_MEGA
    )
}
