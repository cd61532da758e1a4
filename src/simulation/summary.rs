//! Totals over a whole run.
use super::record::MonthlyRecord;
use crate::track::PerTrack;
use crate::units::{Dimensionless, Heads, Pounds};

/// Run-level totals derived from the monthly records
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// The number of months simulated
    pub months: u32,
    /// Monthly feed demand of the starting populations
    pub baseline_monthly_feed: Pounds,
    /// Feed the starting populations would eat over the whole run
    pub baseline_total_feed: Pounds,
    /// Feed eaten over the whole run
    pub total_feed: Pounds,
    /// Feed saved over the whole run
    pub total_feed_saved: Pounds,
    /// Births over the whole run for each track
    pub total_births: PerTrack<Heads>,
    /// Animals slaughtered over the whole run for each track
    pub total_slaughtered: PerTrack<Heads>,
}

impl Summary {
    /// Sum up the monthly records of a run
    pub fn from_records(records: &[MonthlyRecord], baseline_feed: Pounds, months: u32) -> Self {
        let mut total_births = PerTrack::<Heads>::default();
        let mut total_slaughtered = PerTrack::<Heads>::default();
        for record in records {
            total_births = total_births.zip_with(&record.tracks, |total, track| {
                *total + track.births
            });
            total_slaughtered = total_slaughtered.zip_with(&record.tracks, |total, track| {
                *total + track.slaughtered
            });
        }

        Self {
            months,
            baseline_monthly_feed: baseline_feed,
            baseline_total_feed: baseline_feed * Dimensionless(f64::from(months)),
            total_feed: records.iter().map(|record| record.combined_feed).sum(),
            total_feed_saved: records
                .iter()
                .map(|record| record.combined_feed_saved)
                .sum(),
            total_births,
            total_slaughtered,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::record::TrackRecord;
    use crate::units::Hours;
    use float_cmp::assert_approx_eq;

    fn record(month: u32, births: f64, feed: f64) -> MonthlyRecord {
        let track = TrackRecord {
            population: Heads(100.0),
            births: Heads(births),
            slaughtered: Heads(2.0),
            slaughter_hours: Hours(8.0),
            slaughter_hours_fraction: Dimensionless(0.25),
            other_deaths: Heads(0.5),
            feed: Pounds(feed),
        };
        MonthlyRecord {
            month,
            tracks: PerTrack {
                beef: track,
                dairy: track,
                pig: track,
                poultry: track,
            },
            combined_feed: Pounds(feed * 4.0),
            combined_feed_saved: Pounds(400.0 - feed * 4.0),
        }
    }

    #[test]
    fn test_from_records() {
        let records = [record(0, 1.0, 100.0), record(1, 3.0, 90.0)];
        let summary = Summary::from_records(&records, Pounds(400.0), 2);

        assert_eq!(summary.months, 2);
        assert_approx_eq!(Pounds, summary.baseline_total_feed, Pounds(800.0));
        assert_approx_eq!(Pounds, summary.total_feed, Pounds(760.0));
        assert_approx_eq!(Pounds, summary.total_feed_saved, Pounds(40.0));
        assert_eq!(summary.total_births.pig, Heads(4.0));
        assert_eq!(summary.total_slaughtered.total(), Heads(16.0));
    }

    #[test]
    fn test_from_no_records() {
        let summary = Summary::from_records(&[], Pounds(400.0), 0);
        assert_eq!(summary.baseline_total_feed, Pounds(0.0));
        assert_eq!(summary.total_feed, Pounds(0.0));
        assert_eq!(summary.total_feed_saved, Pounds(0.0));
        assert_eq!(summary.total_births, PerTrack::default());
    }
}
