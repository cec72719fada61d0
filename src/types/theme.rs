use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::error::ClientError;

/// Trip styles offered by the planner form. Sent to the backend as the display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TravelTheme {
    #[serde(rename = "Couple Getaway")]
    CoupleGetaway,
    #[serde(rename = "Family Trip")]
    FamilyTrip,
    #[serde(rename = "Solo Adventure")]
    SoloAdventure,
    #[serde(rename = "Backpacking")]
    Backpacking,
}

impl TravelTheme {
    pub const ALL: [TravelTheme; 4] = [
        TravelTheme::CoupleGetaway,
        TravelTheme::FamilyTrip,
        TravelTheme::SoloAdventure,
        TravelTheme::Backpacking,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TravelTheme::CoupleGetaway => "Couple Getaway",
            TravelTheme::FamilyTrip => "Family Trip",
            TravelTheme::SoloAdventure => "Solo Adventure",
            TravelTheme::Backpacking => "Backpacking",
        }
    }
}

impl fmt::Display for TravelTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TravelTheme {
    type Err = ClientError;

    /// Accepts the display name or a kebab/snake-case variant ("solo-adventure").
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().replace(['-', '_'], " ");
        Self::ALL
            .into_iter()
            .find(|theme| theme.as_str().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| ClientError::Validation(format!("unknown travel theme `{value}`")))
    }
}
