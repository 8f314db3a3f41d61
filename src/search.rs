//! Search predicates used by the shell

use crate::prisoner::Prisoner;
use crate::roster::Roster;

/// Custody status filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Custody {
    /// No release date
    Imprisoned,
    /// Has a release date
    Released,
}

/// A single search criterion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Exact, case-sensitive full name
    Name(String),
    /// Eye color, case-insensitive
    EyeColor(String),
    BirthYear(i32),
    HeightCm(u32),
    /// Exact feature tag
    Feature(String),
    Status(Custody),
}

impl Query {
    pub fn matches(&self, prisoner: &Prisoner) -> bool {
        match self {
            Query::Name(name) => prisoner.full_name() == name,
            Query::EyeColor(color) => prisoner.eye_color().to_lowercase() == color.to_lowercase(),
            Query::BirthYear(year) => prisoner.birth_year() == *year,
            Query::HeightCm(height) => prisoner.height_cm() == *height,
            Query::Feature(feature) => prisoner.has_feature(feature),
            Query::Status(Custody::Imprisoned) => prisoner.is_in_custody(),
            Query::Status(Custody::Released) => !prisoner.is_in_custody(),
        }
    }

    /// All matching records, in roster order
    pub fn run(&self, roster: &Roster) -> Roster {
        roster.filter(|p| self.matches(p))
    }
}
