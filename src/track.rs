//! The animal populations ("tracks") followed by the model.
use serde_string_enum::{DeserializeLabeledStringEnum, SerializeLabeledStringEnum};
use strum::EnumIter;

/// One of the four modelled animal populations.
///
/// Each track has its own births, deaths, slaughter and feed accounting.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    SerializeLabeledStringEnum,
    DeserializeLabeledStringEnum,
)]
pub enum Track {
    /// Beef cattle, including dairy bull calves raised for beef
    #[string = "beef"]
    Beef,
    /// Dairy cattle (milk cows, dairy heifers and heifer calves)
    #[string = "dairy"]
    Dairy,
    /// Pigs
    #[string = "pig"]
    Pig,
    /// Broiler poultry
    #[string = "poultry"]
    Poultry,
}

/// A value held for every [`Track`]
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PerTrack<T> {
    /// Value for beef cattle
    pub beef: T,
    /// Value for dairy cattle
    pub dairy: T,
    /// Value for pigs
    pub pig: T,
    /// Value for poultry
    pub poultry: T,
}

impl<T> PerTrack<T> {
    /// Create a [`PerTrack`] by calling `f` for each track
    pub fn from_fn<F: FnMut(Track) -> T>(mut f: F) -> Self {
        Self {
            beef: f(Track::Beef),
            dairy: f(Track::Dairy),
            pig: f(Track::Pig),
            poultry: f(Track::Poultry),
        }
    }

    /// Get the value for the given track
    pub fn get(&self, track: Track) -> &T {
        match track {
            Track::Beef => &self.beef,
            Track::Dairy => &self.dairy,
            Track::Pig => &self.pig,
            Track::Poultry => &self.poultry,
        }
    }

    /// Iterate over tracks and values, in [`Track`] order
    pub fn iter(&self) -> impl Iterator<Item = (Track, &T)> {
        [
            (Track::Beef, &self.beef),
            (Track::Dairy, &self.dairy),
            (Track::Pig, &self.pig),
            (Track::Poultry, &self.poultry),
        ]
        .into_iter()
    }

    /// Apply a function to every value
    pub fn map<U, F: FnMut(&T) -> U>(&self, mut f: F) -> PerTrack<U> {
        PerTrack {
            beef: f(&self.beef),
            dairy: f(&self.dairy),
            pig: f(&self.pig),
            poultry: f(&self.poultry),
        }
    }

    /// Combine with another [`PerTrack`] element-wise
    pub fn zip_with<U, V, F>(&self, other: &PerTrack<U>, mut f: F) -> PerTrack<V>
    where
        F: FnMut(&T, &U) -> V,
    {
        PerTrack {
            beef: f(&self.beef, &other.beef),
            dairy: f(&self.dairy, &other.dairy),
            pig: f(&self.pig, &other.pig),
            poultry: f(&self.poultry, &other.poultry),
        }
    }
}

impl<T: Copy + std::iter::Sum> PerTrack<T> {
    /// The sum over all tracks
    pub fn total(&self) -> T {
        [self.beef, self.dairy, self.pig, self.poultry]
            .into_iter()
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{Dimensionless, Heads};
    use itertools::assert_equal;
    use strum::IntoEnumIterator;

    #[test]
    fn test_track_display() {
        assert_equal(
            Track::iter().map(|track| track.to_string()),
            ["beef", "dairy", "pig", "poultry"],
        );
    }

    #[test]
    fn test_per_track_iter_matches_get() {
        let values = PerTrack {
            beef: 1,
            dairy: 2,
            pig: 3,
            poultry: 4,
        };
        for (track, value) in values.iter() {
            assert_eq!(values.get(track), value);
        }
        assert_equal(values.iter().map(|(track, _)| track), Track::iter());
    }

    #[test]
    fn test_per_track_total() {
        let heads = PerTrack {
            beef: Heads(1.0),
            dairy: Heads(2.0),
            pig: Heads(3.0),
            poultry: Heads(4.0),
        };
        assert_eq!(heads.total(), Heads(10.0));
        assert_eq!(heads.map(|h| *h * Dimensionless(2.0)).total(), Heads(20.0));
    }
}
