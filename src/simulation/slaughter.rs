//! Slaughter capacity and the transfer of spare slaughter labour between species.
//!
//! Capacity is measured in head per month for each species. Each head takes a fixed number of
//! worker-hours to slaughter. When there are fewer animals of a species than the capacity for it,
//! the unused hours may be moved on to the next species, with some loss of efficiency as workers
//! aren't fully skilled in the new work. Transfers only go poultry → pig → cow.
use crate::track::PerTrack;
use crate::units::{Dimensionless, Heads, Hours, HoursPerHead};

/// Worker-hours to slaughter one cow
pub const COW_SLAUGHTER_HOURS: HoursPerHead = HoursPerHead(4.0);

/// Worker-hours to slaughter one pig
pub const PIG_SLAUGHTER_HOURS: HoursPerHead = HoursPerHead(4.0);

/// Worker-hours to slaughter one bird
pub const POULTRY_SLAUGHTER_HOURS: HoursPerHead = HoursPerHead(0.08);

/// Worker-hours per head for each track (beef and dairy are both cows)
pub const SLAUGHTER_HOURS: PerTrack<HoursPerHead> = PerTrack {
    beef: COW_SLAUGHTER_HOURS,
    dairy: COW_SLAUGHTER_HOURS,
    pig: PIG_SLAUGHTER_HOURS,
    poultry: POULTRY_SLAUGHTER_HOURS,
};

/// Slaughter capacity for each species, in head per month
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlaughterCapacity {
    /// Capacity for cows (beef and dairy)
    pub cow: Heads,
    /// Capacity for pigs
    pub pig: Heads,
    /// Capacity for poultry
    pub poultry: Heads,
}

/// Head-equivalents of capacity moved between species in one month
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct CapacityTransfer {
    /// Pig capacity gained from spare poultry hours
    pub poultry_to_pig: Heads,
    /// Cow capacity gained from spare pig hours
    pub pig_to_cow: Heads,
}

/// Total worker-hours needed to use all of the given capacity
pub fn capacity_hours(capacity: &SlaughterCapacity) -> Hours {
    capacity.cow * COW_SLAUGHTER_HOURS
        + capacity.pig * PIG_SLAUGHTER_HOURS
        + capacity.poultry * POULTRY_SLAUGHTER_HOURS
}

/// Clamp capacity to the live population, returning the hours left over
fn release_spare_hours(
    capacity: &mut Heads,
    population: Heads,
    hours_per_head: HoursPerHead,
) -> Hours {
    if population < *capacity {
        let spare = (*capacity - population) * hours_per_head;
        *capacity = population;
        spare
    } else {
        Hours(0.0)
    }
}

impl SlaughterCapacity {
    /// Scale all capacities by the given multiplier
    pub fn scaled(&self, multiplier: Dimensionless) -> Self {
        Self {
            cow: self.cow * multiplier,
            pig: self.pig * multiplier,
            poultry: self.poultry * multiplier,
        }
    }

    /// Move spare slaughter hours from poultry to pigs, then from pigs to cows.
    ///
    /// After this, poultry and pig capacity don't exceed their live populations. Spare hours are
    /// scaled by `efficiency` before being converted to head of the receiving species.
    pub fn cascade(
        &mut self,
        population: &PerTrack<Heads>,
        efficiency: Dimensionless,
    ) -> CapacityTransfer {
        let spare =
            release_spare_hours(&mut self.poultry, population.poultry, POULTRY_SLAUGHTER_HOURS);
        let poultry_to_pig = spare * efficiency / PIG_SLAUGHTER_HOURS;
        self.pig += poultry_to_pig;

        let spare = release_spare_hours(&mut self.pig, population.pig, PIG_SLAUGHTER_HOURS);
        let pig_to_cow = spare * efficiency / COW_SLAUGHTER_HOURS;
        self.cow += pig_to_cow;

        CapacityTransfer {
            poultry_to_pig,
            pig_to_cow,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn capacity() -> SlaughterCapacity {
        SlaughterCapacity {
            cow: Heads(100.0),
            pig: Heads(100.0),
            poultry: Heads(1000.0),
        }
    }

    fn population(pig: f64, poultry: f64) -> PerTrack<Heads> {
        PerTrack {
            beef: Heads(5000.0),
            dairy: Heads(1000.0),
            pig: Heads(pig),
            poultry: Heads(poultry),
        }
    }

    #[rstest]
    fn test_capacity_hours(capacity: SlaughterCapacity) {
        assert_approx_eq!(Hours, capacity_hours(&capacity), Hours(880.0));
    }

    #[rstest]
    fn test_cascade_no_spare(mut capacity: SlaughterCapacity) {
        let before = capacity;
        let transfer = capacity.cascade(&population(500.0, 5000.0), Dimensionless(0.5));
        assert_eq!(transfer, CapacityTransfer::default());
        assert_eq!(capacity, before);
    }

    #[rstest]
    fn test_cascade_poultry_to_pig(mut capacity: SlaughterCapacity) {
        // 600 birds short of capacity: 48 spare hours, half usable, 4 h per pig
        let transfer = capacity.cascade(&population(500.0, 400.0), Dimensionless(0.5));
        assert_eq!(capacity.poultry, Heads(400.0));
        assert_approx_eq!(Heads, transfer.poultry_to_pig, Heads(6.0), epsilon = 1e-12);
        assert_approx_eq!(Heads, capacity.pig, Heads(106.0), epsilon = 1e-12);
        assert_eq!(transfer.pig_to_cow, Heads(0.0));
        assert_eq!(capacity.cow, Heads(100.0));
    }

    #[rstest]
    fn test_cascade_through_to_cows(mut capacity: SlaughterCapacity) {
        // Pig capacity is 106 after the poultry transfer, but only 50 pigs are left
        let transfer = capacity.cascade(&population(50.0, 400.0), Dimensionless(0.5));
        assert_eq!(capacity.pig, Heads(50.0));
        assert_approx_eq!(Heads, transfer.pig_to_cow, Heads(28.0), epsilon = 1e-12);
        assert_approx_eq!(Heads, capacity.cow, Heads(128.0), epsilon = 1e-12);
    }

    #[rstest]
    fn test_cascade_full_discount(mut capacity: SlaughterCapacity) {
        let transfer = capacity.cascade(&population(50.0, 400.0), Dimensionless(0.0));
        assert_eq!(transfer, CapacityTransfer::default());
        assert_eq!(capacity.poultry, Heads(400.0));
        assert_eq!(capacity.pig, Heads(50.0));
        assert_eq!(capacity.cow, Heads(100.0));
    }
}
