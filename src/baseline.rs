//! Baseline herd and flock statistics.
//!
//! The baseline is a table of named quantities (herd counts, monthly slaughter rates, gestation
//! periods, etc.) describing the livestock sector before any intervention. It is supplied once at
//! the start of a run and never modified.
use crate::error::{ModelResult, ensure_data};
use crate::units::{Heads, PoundsPerHead};
use indexmap::IndexMap;
use strum::{EnumIter, IntoEnumIterator, IntoStaticStr};

/// Default productive life of dairy cattle, in years
const DEFAULT_DAIRY_LIFE_EXPECTANCY_YEARS: f64 = 5.0;

/// Default per-head monthly feed rates (lb), derived top-down from total feed use
const DEFAULT_BEEF_FEED_PER_HEAD: f64 = 137.311_755_2;
const DEFAULT_DAIRY_FEED_PER_HEAD: f64 = 448.382_043_1;
const DEFAULT_PIG_FEED_PER_HEAD: f64 = 141.836_158_6;
const DEFAULT_POULTRY_FEED_PER_HEAD: f64 = 4.763_762_808;

/// A named quantity which may appear in the baseline table
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum BaselineVariable {
    /// Live pig population
    TotalPigs,
    /// Piglets born per month
    PigletsPerMonth,
    /// Baseline pig slaughter rate (head/month)
    PigSlaughterPerMonth,
    /// Pig gestation period (months)
    PigGestationMonths,
    /// Piglets per litter
    PigletsPerLitter,
    /// Live broiler population
    TotalPoultry,
    /// Baseline poultry slaughter rate (head/month)
    PoultrySlaughterPerMonth,
    /// Poultry incubation period (months)
    PoultryGestationMonths,
    /// Calves under 500 lb
    #[strum(serialize = "calves_under_500lb")]
    CalvesUnder500Lb,
    /// Dairy cows
    MilkCows,
    /// Beef cows
    BeefCows,
    /// Steers 500 lb and over
    #[strum(serialize = "steers_500lb_plus")]
    Steers500LbPlus,
    /// Heifers 500 lb and over
    #[strum(serialize = "heifers_500lb_plus")]
    Heifers500LbPlus,
    /// Bulls 500 lb and over
    #[strum(serialize = "bulls_500lb_plus")]
    Bulls500LbPlus,
    /// New calves per year
    CalfCrop,
    /// Cattle on feed
    CattleOnFeed,
    /// Baseline cow slaughter rate (head/month)
    CowSlaughterPerMonth,
    /// Cow gestation period (months)
    CowGestationMonths,
    /// Poultry hatched per month (defaults to the poultry slaughter rate)
    ChicksPerMonth,
    /// Productive life of dairy cattle (years)
    DairyLifeExpectancyYears,
    /// Monthly feed per head of beef cattle (lb)
    BeefFeedPerHead,
    /// Monthly feed per head of dairy cattle (lb)
    DairyFeedPerHead,
    /// Monthly feed per pig (lb)
    PigFeedPerHead,
    /// Monthly feed per bird (lb)
    PoultryFeedPerHead,
}

impl BaselineVariable {
    /// The name of the variable as it appears in input files
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Whether the variable must be present in the baseline table
    pub fn is_required(self) -> bool {
        !matches!(
            self,
            Self::ChicksPerMonth
                | Self::DairyLifeExpectancyYears
                | Self::BeefFeedPerHead
                | Self::DairyFeedPerHead
                | Self::PigFeedPerHead
                | Self::PoultryFeedPerHead
        )
    }

    /// Look up a variable by name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::iter().find(|var| var.name() == name)
    }
}

/// A read-only table of named baseline quantities
#[derive(Debug, Default, Clone, PartialEq)]
pub struct BaselineStatistics {
    quantities: IndexMap<String, f64>,
}

impl BaselineStatistics {
    /// Get the quantity with the given name, if present
    pub fn get(&self, name: &str) -> Option<f64> {
        self.quantities.get(name).copied()
    }

    /// Get a required quantity, checking that it is usable
    pub fn require(&self, var: BaselineVariable) -> ModelResult<f64> {
        let name = var.name();
        let Some(value) = self.get(name) else {
            return Err(crate::error::ModelError::DataError(format!(
                "Missing required baseline variable `{name}`"
            )));
        };
        check_quantity(name, value)?;

        Ok(value)
    }

    /// Get an optional quantity, checking that it is usable if present
    pub fn optional(&self, var: BaselineVariable) -> ModelResult<Option<f64>> {
        let name = var.name();
        self.get(name)
            .map(|value| check_quantity(name, value).map(|()| value))
            .transpose()
    }

    /// Iterate over names and quantities in the order they were supplied
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.quantities.iter().map(|(name, value)| (name.as_str(), *value))
    }

    /// The number of quantities in the table
    pub fn len(&self) -> usize {
        self.quantities.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }

    /// Names in the table which the model doesn't use
    pub fn unknown_names(&self) -> impl Iterator<Item = &str> {
        self.quantities
            .keys()
            .map(String::as_str)
            .filter(|name| BaselineVariable::from_name(name).is_none())
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for BaselineStatistics {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self {
            quantities: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }
}

/// Baseline quantities must be finite and non-negative
fn check_quantity(name: &str, value: f64) -> ModelResult<()> {
    ensure_data!(
        value.is_finite() && value >= 0.0,
        "Baseline variable `{name}` must be a finite, non-negative number (got {value})"
    );

    Ok(())
}

/// The baseline statistics for pigs
#[derive(Debug, Clone, PartialEq)]
pub struct PigBaseline {
    /// Live pig population
    pub population: Heads,
    /// Piglets born per month
    pub piglets_per_month: Heads,
    /// Baseline slaughter rate per month
    pub slaughter_per_month: Heads,
    /// Gestation period in months
    pub gestation_months: f64,
    /// Piglets per litter
    pub piglets_per_litter: f64,
    /// Monthly feed per pig
    pub feed_per_head: PoundsPerHead,
}

/// The baseline statistics for poultry
#[derive(Debug, Clone, PartialEq)]
pub struct PoultryBaseline {
    /// Live broiler population
    pub population: Heads,
    /// Chicks hatched per month
    pub chicks_per_month: Heads,
    /// Baseline slaughter rate per month
    pub slaughter_per_month: Heads,
    /// Incubation period in months
    pub gestation_months: f64,
    /// Monthly feed per bird
    pub feed_per_head: PoundsPerHead,
}

/// The baseline statistics for cattle, before splitting into beef and dairy
#[derive(Debug, Clone, PartialEq)]
pub struct CattleBaseline {
    /// Calves under 500 lb
    pub calves: Heads,
    /// Dairy cows
    pub milk_cows: Heads,
    /// Beef cows
    pub beef_cows: Heads,
    /// Steers 500 lb and over
    pub steers: Heads,
    /// Heifers 500 lb and over
    pub heifers: Heads,
    /// Bulls 500 lb and over
    pub bulls: Heads,
    /// New calves per year
    pub calf_crop: Heads,
    /// Cattle on feed
    pub cattle_on_feed: Heads,
    /// Baseline cow slaughter rate per month
    pub slaughter_per_month: Heads,
    /// Gestation period in months
    pub gestation_months: f64,
    /// Productive life of dairy cattle in years
    pub dairy_life_expectancy_years: f64,
    /// Monthly feed per head of beef cattle
    pub beef_feed_per_head: PoundsPerHead,
    /// Monthly feed per head of dairy cattle
    pub dairy_feed_per_head: PoundsPerHead,
}

/// Typed view of the [`BaselineStatistics`] used by the model
#[derive(Debug, Clone, PartialEq)]
pub struct BaselineInputs {
    /// Cattle statistics
    pub cattle: CattleBaseline,
    /// Pig statistics
    pub pigs: PigBaseline,
    /// Poultry statistics
    pub poultry: PoultryBaseline,
}

impl TryFrom<&BaselineStatistics> for BaselineInputs {
    type Error = crate::error::ModelError;

    fn try_from(stats: &BaselineStatistics) -> ModelResult<Self> {
        use BaselineVariable as V;

        let heads = |var| stats.require(var).map(Heads);
        let feed = |var, default| {
            stats
                .optional(var)
                .map(|value| PoundsPerHead(value.unwrap_or(default)))
        };

        let poultry_slaughter_per_month = heads(V::PoultrySlaughterPerMonth)?;
        let chicks_per_month = stats
            .optional(V::ChicksPerMonth)?
            .map_or(poultry_slaughter_per_month, Heads);

        Ok(Self {
            cattle: CattleBaseline {
                calves: heads(V::CalvesUnder500Lb)?,
                milk_cows: heads(V::MilkCows)?,
                beef_cows: heads(V::BeefCows)?,
                steers: heads(V::Steers500LbPlus)?,
                heifers: heads(V::Heifers500LbPlus)?,
                bulls: heads(V::Bulls500LbPlus)?,
                calf_crop: heads(V::CalfCrop)?,
                cattle_on_feed: heads(V::CattleOnFeed)?,
                slaughter_per_month: heads(V::CowSlaughterPerMonth)?,
                gestation_months: stats.require(V::CowGestationMonths)?,
                dairy_life_expectancy_years: stats
                    .optional(V::DairyLifeExpectancyYears)?
                    .unwrap_or(DEFAULT_DAIRY_LIFE_EXPECTANCY_YEARS),
                beef_feed_per_head: feed(V::BeefFeedPerHead, DEFAULT_BEEF_FEED_PER_HEAD)?,
                dairy_feed_per_head: feed(V::DairyFeedPerHead, DEFAULT_DAIRY_FEED_PER_HEAD)?,
            },
            pigs: PigBaseline {
                population: heads(V::TotalPigs)?,
                piglets_per_month: heads(V::PigletsPerMonth)?,
                slaughter_per_month: heads(V::PigSlaughterPerMonth)?,
                gestation_months: stats.require(V::PigGestationMonths)?,
                piglets_per_litter: stats.require(V::PigletsPerLitter)?,
                feed_per_head: feed(V::PigFeedPerHead, DEFAULT_PIG_FEED_PER_HEAD)?,
            },
            poultry: PoultryBaseline {
                population: heads(V::TotalPoultry)?,
                chicks_per_month,
                slaughter_per_month: poultry_slaughter_per_month,
                gestation_months: stats.require(V::PoultryGestationMonths)?,
                feed_per_head: feed(V::PoultryFeedPerHead, DEFAULT_POULTRY_FEED_PER_HEAD)?,
            },
        })
    }
}
