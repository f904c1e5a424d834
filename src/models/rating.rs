use std::fmt::Display;

use serde::{Deserialize, Deserializer, Serialize};

/// Number of stars a widget displays
pub const STAR_COUNT: u8 = 5;

/// A committed star rating, always in 1..=5
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Rating(u8);

impl Rating {
    /// Creates a rating, rejecting anything outside 1..=5
    pub fn new(value: u8) -> Option<Self> {
        (1..=STAR_COUNT).contains(&value).then_some(Self(value))
    }

    /// Interprets a float the way the server serializes stored ratings.
    ///
    /// Stored values come back as floats (`4.0`). Only whole numbers in
    /// 1..=5 are committed ratings; everything else is treated as unset.
    pub fn from_float(value: f64) -> Option<Self> {
        if value.fract() != 0.0 {
            return None;
        }
        if !(1.0..=STAR_COUNT as f64).contains(&value) {
            return None;
        }
        Self::new(value as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for Rating {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(value)
    }
}

impl<'de> Deserialize<'de> for Rating {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = u8::deserialize(deserializer)?;
        Rating::new(raw)
            .ok_or_else(|| serde::de::Error::custom(format!("rating {} out of range 1..=5", raw)))
    }
}

/// Per-movie star widget state.
///
/// `Unset -> Hovering (transient) -> Committed -> Unset` (via clear).
/// A re-commit replaces the committed value directly. Hovering never
/// touches the committed value; leaving reverts the display to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StarWidget {
    committed: Option<Rating>,
    hover: Option<Rating>,
}

impl StarWidget {
    /// Creates a widget, committed to `prior` when the server provided one
    pub fn new(prior: Option<Rating>) -> Self {
        Self {
            committed: prior,
            hover: None,
        }
    }

    /// Temporarily displays `rating` stars under the cursor
    pub fn preview(&mut self, rating: Rating) {
        self.hover = Some(rating);
    }

    /// Reverts the display to the committed value
    pub fn leave(&mut self) {
        self.hover = None;
    }

    /// Commits a rating, replacing any previous one
    pub fn commit(&mut self, rating: Rating) {
        self.committed = Some(rating);
        self.hover = None;
    }

    /// Clears the committed rating
    pub fn clear(&mut self) {
        self.committed = None;
        self.hover = None;
    }

    pub fn committed(&self) -> Option<Rating> {
        self.committed
    }

    pub fn is_rated(&self) -> bool {
        self.committed.is_some()
    }

    /// How many stars render as filled right now.
    ///
    /// The hover preview wins while the cursor is over the widget; the
    /// committed value otherwise; zero when unset.
    pub fn displayed(&self) -> u8 {
        self.hover
            .or(self.committed)
            .map(Rating::get)
            .unwrap_or(0)
    }
}
