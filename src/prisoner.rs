//! Prisoner record

use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

// Field prefixes of the readable block, shared with the decoder
pub const NAME_PREFIX: &str = "Name:";
pub const BIRTH_PREFIX: &str = "Birth:";
pub const HEIGHT_PREFIX: &str = "Height:";
pub const EYES_PREFIX: &str = "Eyes:";
pub const FEATURES_PREFIX: &str = "Features:";
pub const IMPRISONED_PREFIX: &str = "Imprisoned:";
pub const RELEASED_PREFIX: &str = "Released:";

/// Height unit suffix
pub const HEIGHT_UNIT: &str = "cm";
/// Release-date placeholder for someone still in custody
pub const NOT_RELEASED: &str = "N/A";
/// ISO calendar date format used in the text channel
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One prisoner's identity, description and custody dates.
///
/// Equality and hashing only look at the full name and birth date: two
/// records with the same pair describe the same person, whatever the other
/// fields say. Duplicate detection and [`List::remove`](crate::List::remove)
/// both rely on this.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prisoner {
    full_name: String,
    birth_date: NaiveDate,
    height_cm: u32,
    eye_color: String,
    features: Vec<String>,
    imprisoned: NaiveDate,
    released: Option<NaiveDate>,
}

impl Prisoner {
    /// Create a record. `features` is copied into the record.
    ///
    /// Text fields are trimmed and blank features are dropped, so the record
    /// reads back from the text channel exactly as it was built.
    pub fn new<I, S>(
        full_name: impl Into<String>,
        birth_date: NaiveDate,
        height_cm: u32,
        eye_color: impl Into<String>,
        features: I,
        imprisoned: NaiveDate,
        released: Option<NaiveDate>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            full_name: trimmed(full_name.into()),
            birth_date,
            height_cm,
            eye_color: trimmed(eye_color.into()),
            features: features
                .into_iter()
                .map(|f| trimmed(f.into()))
                .filter(|f| !f.is_empty())
                .collect(),
            imprisoned,
            released,
        }
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    pub fn birth_year(&self) -> i32 {
        self.birth_date.year()
    }

    pub fn height_cm(&self) -> u32 {
        self.height_cm
    }

    pub fn eye_color(&self) -> &str {
        &self.eye_color
    }

    /// Distinguishing features, read-only
    pub fn features(&self) -> &[String] {
        &self.features
    }

    /// Owned copy of the features for callers that want to edit them
    pub fn features_vec(&self) -> Vec<String> {
        self.features.clone()
    }

    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }

    /// Start of custody
    pub fn imprisoned(&self) -> NaiveDate {
        self.imprisoned
    }

    /// End of custody; `None` while still in custody
    pub fn released(&self) -> Option<NaiveDate> {
        self.released
    }

    pub fn is_in_custody(&self) -> bool {
        self.released.is_none()
    }
}

fn trimmed(value: String) -> String {
    let trimmed = value.trim();
    if trimmed.len() == value.len() {
        value
    } else {
        trimmed.to_string()
    }
}

impl PartialEq for Prisoner {
    fn eq(&self, other: &Self) -> bool {
        self.full_name == other.full_name && self.birth_date == other.birth_date
    }
}

impl Eq for Prisoner {}

impl Hash for Prisoner {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.full_name.hash(state);
        self.birth_date.hash(state);
    }
}

/// Readable block, one field per line, no trailing newline
impl fmt::Display for Prisoner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", NAME_PREFIX, self.full_name)?;
        writeln!(f, "{} {}", BIRTH_PREFIX, self.birth_date.format(DATE_FORMAT))?;
        writeln!(f, "{} {}{}", HEIGHT_PREFIX, self.height_cm, HEIGHT_UNIT)?;
        writeln!(f, "{} {}", EYES_PREFIX, self.eye_color)?;
        writeln!(f, "{} [{}]", FEATURES_PREFIX, self.features.join(", "))?;
        writeln!(f, "{} {}", IMPRISONED_PREFIX, self.imprisoned.format(DATE_FORMAT))?;
        match self.released {
            Some(date) => write!(f, "{} {}", RELEASED_PREFIX, date.format(DATE_FORMAT)),
            None => write!(f, "{} {}", RELEASED_PREFIX, NOT_RELEASED),
        }
    }
}
