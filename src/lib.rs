//! Common functionality for livestock-sim: a monthly simulation of livestock populations, slaughter
//! and feed use under policy interventions.
#![warn(missing_docs)]
use std::path::PathBuf;

pub mod baseline;
pub mod cli;
pub mod error;
pub mod input;
pub mod intervention;
pub mod log;
pub mod model;
pub mod output;
pub mod settings;
pub mod simulation;
pub mod track;
pub mod units;

#[cfg(test)]
mod fixture;

/// Get config dir for program.
pub fn get_config_dir() -> PathBuf {
    let Some(mut config_dir) = dirs::config_dir() else {
        panic!("Couldn't get config directory")
    };
    config_dir.push("livestock-sim");

    config_dir
}
