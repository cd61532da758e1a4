//! The state carried from one simulated month to the next.
use super::slaughter::SlaughterCapacity;
use crate::track::PerTrack;
use crate::units::Heads;

/// The mutable state of a single simulation run.
///
/// Each run derives its own state from the inputs, so separate runs never share anything.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    /// Live head-count for each track
    pub population: PerTrack<Heads>,
    /// Pregnant beef cows
    pub pregnant_cows: Heads,
    /// Pregnant sows
    pub pregnant_sows: Heads,
    /// Dairy calves born per month
    pub dairy_births: Heads,
    /// Chicks hatched per month
    pub poultry_births: Heads,
    /// Current slaughter capacity for each species (head/month)
    pub capacity: SlaughterCapacity,
}
