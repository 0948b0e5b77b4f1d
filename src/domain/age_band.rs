use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::error::{AdvisorError, AdvisorResult};

/// Age bands used by the UK dietary reference tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AgeBand {
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2-3")]
    TwoToThree,
    #[serde(rename = "4-6")]
    FourToSix,
    #[serde(rename = "7-10")]
    SevenToTen,
    #[serde(rename = "11-14")]
    ElevenToFourteen,
    #[serde(rename = "15-18")]
    FifteenToEighteen,
    #[serde(rename = "19-64")]
    Adult,
    #[serde(rename = "65-74")]
    YoungerSenior,
    #[serde(rename = "75+")]
    OlderSenior,
}

impl AgeBand {
    /// All bands in ascending order; contiguous from age 1 upward
    pub const ALL: [AgeBand; 9] = [
        AgeBand::One,
        AgeBand::TwoToThree,
        AgeBand::FourToSix,
        AgeBand::SevenToTen,
        AgeBand::ElevenToFourteen,
        AgeBand::FifteenToEighteen,
        AgeBand::Adult,
        AgeBand::YoungerSenior,
        AgeBand::OlderSenior,
    ];

    /// Resolve an age to its band.
    ///
    /// Ages of zero or below have no band and are rejected rather than clamped.
    pub fn for_age(age: i64) -> AdvisorResult<Self> {
        if age < 1 {
            return Err(AdvisorError::OutOfRangeAge(age));
        }

        let band = Self::ALL
            .into_iter()
            .find(|band| band.contains(age))
            .unwrap_or(AgeBand::OlderSenior);
        Ok(band)
    }

    /// Inclusive lower bound and inclusive upper bound, `None` when open-ended
    pub fn bounds(&self) -> (i64, Option<i64>) {
        match self {
            AgeBand::One => (1, Some(1)),
            AgeBand::TwoToThree => (2, Some(3)),
            AgeBand::FourToSix => (4, Some(6)),
            AgeBand::SevenToTen => (7, Some(10)),
            AgeBand::ElevenToFourteen => (11, Some(14)),
            AgeBand::FifteenToEighteen => (15, Some(18)),
            AgeBand::Adult => (19, Some(64)),
            AgeBand::YoungerSenior => (65, Some(74)),
            AgeBand::OlderSenior => (75, None),
        }
    }

    pub fn contains(&self, age: i64) -> bool {
        let (min, max) = self.bounds();
        age >= min && max.map_or(true, |max| age <= max)
    }

    /// Key used by the requirement tables
    pub fn label(&self) -> &'static str {
        match self {
            AgeBand::One => "1",
            AgeBand::TwoToThree => "2-3",
            AgeBand::FourToSix => "4-6",
            AgeBand::SevenToTen => "7-10",
            AgeBand::ElevenToFourteen => "11-14",
            AgeBand::FifteenToEighteen => "15-18",
            AgeBand::Adult => "19-64",
            AgeBand::YoungerSenior => "65-74",
            AgeBand::OlderSenior => "75+",
        }
    }
}

impl fmt::Display for AgeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AgeBand {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        Self::ALL
            .into_iter()
            .find(|band| band.label() == label)
            .ok_or_else(|| AdvisorError::UnknownAgeGroup(label.to_string()))
    }
}
