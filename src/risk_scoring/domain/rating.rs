use crate::shared::Result;
use serde::{Deserialize, Serialize};

/// Lowest accepted likelihood/impact rating
pub const MIN_RATING: u8 = 1;

/// Highest accepted likelihood/impact rating
pub const MAX_RATING: u8 = 5;

/// NewType wrapper for a likelihood or impact rating in 1..=5
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub fn new(value: u8) -> Result<Self> {
        if !(MIN_RATING..=MAX_RATING).contains(&value) {
            anyhow::bail!(
                "must be an integer between {} and {}",
                MIN_RATING,
                MAX_RATING
            );
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Every rating, lowest first
    pub fn all() -> impl DoubleEndedIterator<Item = Rating> {
        (MIN_RATING..=MAX_RATING).map(Rating)
    }
}

impl TryFrom<u8> for Rating {
    type Error = anyhow::Error;

    fn try_from(value: u8) -> Result<Self> {
        Rating::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
