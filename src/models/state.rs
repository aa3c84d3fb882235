//! Federal state and pay scale enumerations.
//!
//! Both are closed sets: the engine knows exactly sixteen employers
//! (fifteen Länder plus the federal service) and four pay scale families.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The employer whose salary tables and subsidy rules apply.
///
/// Names serialize in their German spelling, e.g. `"Baden-Württemberg"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FederalState {
    /// Baden-Württemberg.
    #[serde(rename = "Baden-Württemberg")]
    BadenWuerttemberg,
    /// Bayern (Bavaria).
    Bayern,
    /// Berlin.
    Berlin,
    /// Brandenburg.
    Brandenburg,
    /// Bremen.
    Bremen,
    /// The federal service.
    Bund,
    /// Hessen.
    Hessen,
    /// Mecklenburg-Vorpommern.
    #[serde(rename = "Mecklenburg-Vorpommern")]
    MecklenburgVorpommern,
    /// Niedersachsen.
    Niedersachsen,
    /// Nordrhein-Westfalen.
    #[serde(rename = "Nordrhein-Westfalen")]
    NordrheinWestfalen,
    /// Rheinland-Pfalz.
    #[serde(rename = "Rheinland-Pfalz")]
    RheinlandPfalz,
    /// Saarland.
    Saarland,
    /// Sachsen.
    Sachsen,
    /// Sachsen-Anhalt.
    #[serde(rename = "Sachsen-Anhalt")]
    SachsenAnhalt,
    /// Schleswig-Holstein.
    #[serde(rename = "Schleswig-Holstein")]
    SchleswigHolstein,
    /// Thüringen.
    #[serde(rename = "Thüringen")]
    Thueringen,
}

impl FederalState {
    /// All sixteen states, in alphabetical order of their German names.
    pub const ALL: [FederalState; 16] = [
        FederalState::BadenWuerttemberg,
        FederalState::Bayern,
        FederalState::Berlin,
        FederalState::Brandenburg,
        FederalState::Bremen,
        FederalState::Bund,
        FederalState::Hessen,
        FederalState::MecklenburgVorpommern,
        FederalState::Niedersachsen,
        FederalState::NordrheinWestfalen,
        FederalState::RheinlandPfalz,
        FederalState::Saarland,
        FederalState::Sachsen,
        FederalState::SachsenAnhalt,
        FederalState::SchleswigHolstein,
        FederalState::Thueringen,
    ];

    /// Returns the German display name.
    pub fn name(self) -> &'static str {
        match self {
            FederalState::BadenWuerttemberg => "Baden-Württemberg",
            FederalState::Bayern => "Bayern",
            FederalState::Berlin => "Berlin",
            FederalState::Brandenburg => "Brandenburg",
            FederalState::Bremen => "Bremen",
            FederalState::Bund => "Bund",
            FederalState::Hessen => "Hessen",
            FederalState::MecklenburgVorpommern => "Mecklenburg-Vorpommern",
            FederalState::Niedersachsen => "Niedersachsen",
            FederalState::NordrheinWestfalen => "Nordrhein-Westfalen",
            FederalState::RheinlandPfalz => "Rheinland-Pfalz",
            FederalState::Saarland => "Saarland",
            FederalState::Sachsen => "Sachsen",
            FederalState::SachsenAnhalt => "Sachsen-Anhalt",
            FederalState::SchleswigHolstein => "Schleswig-Holstein",
            FederalState::Thueringen => "Thüringen",
        }
    }
}

impl fmt::Display for FederalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FederalState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        FederalState::ALL
            .into_iter()
            .find(|state| state.name() == trimmed)
            .ok_or_else(|| format!("unknown state '{}'", trimmed))
    }
}

/// The pay scale family (Besoldungsordnung) a pay grade belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PayScale {
    /// Ascending salaries with experience steps (A grades).
    A,
    /// Fixed salaries for senior positions (B grades).
    B,
    /// Professorial salaries (W grades).
    W,
    /// Judges and public prosecutors (R grades).
    R,
}

impl fmt::Display for PayScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            PayScale::A => "A",
            PayScale::B => "B",
            PayScale::W => "W",
            PayScale::R => "R",
        };
        f.write_str(letter)
    }
}

impl FromStr for PayScale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A" => Ok(PayScale::A),
            "B" => Ok(PayScale::B),
            "W" => Ok(PayScale::W),
            "R" => Ok(PayScale::R),
            other => Err(format!("unknown pay scale '{}', expected one of A, B, W, R", other)),
        }
    }
}
