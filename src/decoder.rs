//! Text channel decoder

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use chrono::NaiveDate;

use crate::error::{CodecError, CodecResult, FieldError};
use crate::list::List;
use crate::prisoner::{
    Prisoner, BIRTH_PREFIX, DATE_FORMAT, EYES_PREFIX, FEATURES_PREFIX, HEIGHT_PREFIX, HEIGHT_UNIT,
    IMPRISONED_PREFIX, NAME_PREFIX, NOT_RELEASED, RELEASED_PREFIX,
};

/// What to do with a block whose fields cannot be parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedPolicy {
    /// Fail the whole load on the first bad field
    #[default]
    Abort,
    /// Drop the offending block, log it, keep going
    Skip,
}

/// Parses readable prisoner blocks back into records
pub struct Decoder {
    policy: MalformedPolicy,
}

impl Decoder {
    /// Create a new decoder that aborts on malformed input
    pub fn new() -> Self {
        Self {
            policy: MalformedPolicy::default(),
        }
    }

    /// Choose how malformed blocks are handled
    pub fn with_policy(mut self, policy: MalformedPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Decode records from a string
    pub fn decode(&self, input: &str) -> CodecResult<List<Prisoner>> {
        self.decode_reader(input.as_bytes())
    }

    /// Decode records from a text file
    pub fn decode_file(&self, path: &Path) -> CodecResult<List<Prisoner>> {
        let file = File::open(path)?;
        let list = self.decode_reader(BufReader::new(file))?;
        log::info!("Loaded {} records from {}", list.len(), path.display());
        Ok(list)
    }

    /// Decode records line by line from any buffered reader
    ///
    /// A blank line closes the current block. A block is only materialized if
    /// it carried a `Name:` line; the final block does not need a trailing
    /// blank line.
    pub fn decode_reader<R: BufRead>(&self, reader: R) -> CodecResult<List<Prisoner>> {
        let mut list = List::new();
        let mut pending = PendingRecord::default();
        let mut line_num = 0;

        for line in reader.lines() {
            let line = line?;
            line_num += 1;
            let line = line.trim();

            if line.is_empty() {
                self.finish_block(&mut list, std::mem::take(&mut pending), line_num)?;
                continue;
            }

            if let Err(err) = pending.apply_line(line) {
                match self.policy {
                    MalformedPolicy::Abort => {
                        return Err(CodecError::Parse { line: line_num, source: err });
                    }
                    MalformedPolicy::Skip => pending.poison(line_num, err),
                }
            }
        }

        // Last block, if the input did not end with a blank line
        self.finish_block(&mut list, pending, line_num)?;

        Ok(list)
    }

    /// Turn an accumulated block into a record and append it
    fn finish_block(&self, list: &mut List<Prisoner>, pending: PendingRecord, line_num: usize) -> CodecResult<()> {
        if let Some((line, err)) = pending.error {
            log::warn!("Skipping malformed record at line {}: {}", line, err);
            return Ok(());
        }

        match pending.into_prisoner() {
            Ok(Some(prisoner)) => {
                log::debug!("Parsed record '{}'", prisoner.full_name());
                list.add(prisoner);
            }
            Ok(None) => {}
            Err(err) => match self.policy {
                MalformedPolicy::Abort => return Err(CodecError::Parse { line: line_num, source: err }),
                MalformedPolicy::Skip => {
                    log::warn!("Skipping incomplete record ending at line {}: {}", line_num, err);
                }
            },
        }
        Ok(())
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Field accumulator for the block being read
#[derive(Debug, Default)]
struct PendingRecord {
    name: Option<String>,
    birth: Option<NaiveDate>,
    height_cm: u32,
    eyes: Option<String>,
    features: Vec<String>,
    imprisoned: Option<NaiveDate>,
    released: Option<NaiveDate>,
    /// First field error seen in this block (skip mode only)
    error: Option<(usize, FieldError)>,
}

impl PendingRecord {
    /// Assign the field named by the line's prefix; unknown lines are ignored
    fn apply_line(&mut self, line: &str) -> Result<(), FieldError> {
        if let Some(rest) = line.strip_prefix(NAME_PREFIX) {
            self.name = Some(rest.trim().to_string());
        } else if let Some(rest) = line.strip_prefix(BIRTH_PREFIX) {
            self.birth = Some(parse_date(BIRTH_PREFIX, rest)?);
        } else if let Some(rest) = line.strip_prefix(HEIGHT_PREFIX) {
            self.height_cm = parse_height(rest)?;
        } else if let Some(rest) = line.strip_prefix(EYES_PREFIX) {
            self.eyes = Some(rest.trim().to_string());
        } else if let Some(rest) = line.strip_prefix(FEATURES_PREFIX) {
            self.features = parse_features(rest);
        } else if let Some(rest) = line.strip_prefix(IMPRISONED_PREFIX) {
            self.imprisoned = Some(parse_date(IMPRISONED_PREFIX, rest)?);
        } else if let Some(rest) = line.strip_prefix(RELEASED_PREFIX) {
            let value = rest.trim();
            self.released = if value == NOT_RELEASED {
                None
            } else {
                Some(parse_date(RELEASED_PREFIX, value)?)
            };
        } else {
            log::debug!("Ignoring unrecognized line: {}", line);
        }
        Ok(())
    }

    fn poison(&mut self, line: usize, err: FieldError) {
        if self.error.is_none() {
            self.error = Some((line, err));
        }
    }

    /// `Ok(None)` when the block never named anyone
    fn into_prisoner(self) -> Result<Option<Prisoner>, FieldError> {
        let Some(name) = self.name else {
            return Ok(None);
        };
        let Some(birth) = self.birth else {
            return Err(FieldError::Missing { name, field: field_name(BIRTH_PREFIX) });
        };
        let Some(imprisoned) = self.imprisoned else {
            return Err(FieldError::Missing { name, field: field_name(IMPRISONED_PREFIX) });
        };

        Ok(Some(Prisoner::new(
            name,
            birth,
            self.height_cm,
            self.eyes.unwrap_or_default(),
            self.features,
            imprisoned,
            self.released,
        )))
    }
}

/// "Birth:" -> "Birth"
fn field_name(prefix: &'static str) -> &'static str {
    prefix.trim_end_matches(':')
}

fn parse_date(prefix: &'static str, value: &str) -> Result<NaiveDate, FieldError> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| FieldError::InvalidDate {
        field: field_name(prefix),
        value: value.to_string(),
    })
}

/// "180cm" or "180"
fn parse_height(value: &str) -> Result<u32, FieldError> {
    value
        .replace(HEIGHT_UNIT, "")
        .trim()
        .parse()
        .map_err(|_| FieldError::InvalidHeight {
            value: value.trim().to_string(),
        })
}

/// "[a, b]" or "a, b"; blank content or "[]" gives no features
fn parse_features(value: &str) -> Vec<String> {
    let value = value.trim();
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .unwrap_or(value)
        .trim();

    if inner.is_empty() {
        return Vec::new();
    }

    inner
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
