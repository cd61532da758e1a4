//! Per-month records of what happened during a run.
use crate::track::PerTrack;
use crate::units::{Dimensionless, Heads, Hours, Pounds};

/// What happened to one track during one month
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackRecord {
    /// Head-count at the start of the month
    pub population: Heads,
    /// Animals born
    pub births: Heads,
    /// Animals slaughtered
    pub slaughtered: Heads,
    /// Worker-hours spent on slaughter
    pub slaughter_hours: Hours,
    /// Slaughter hours as a fraction of the total capacity
    pub slaughter_hours_fraction: Dimensionless,
    /// Deaths from causes other than slaughter
    pub other_deaths: Heads,
    /// Feed eaten
    pub feed: Pounds,
}

/// The record of a single simulated month
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyRecord {
    /// Month index, starting at zero
    pub month: u32,
    /// Figures for each track
    pub tracks: PerTrack<TrackRecord>,
    /// Feed eaten by all tracks
    pub combined_feed: Pounds,
    /// Feed saved compared with the starting populations (negative if more is eaten)
    pub combined_feed_saved: Pounds,
}
