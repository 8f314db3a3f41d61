//! Pick a persistence channel by file extension

use std::path::Path;

use crate::decoder::{Decoder, MalformedPolicy};
use crate::encoder::Encoder;
use crate::error::CodecResult;
use crate::roster::Roster;
use crate::snapshot;

/// On-disk representation of a roster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Readable blocks
    Text,
    /// Binary snapshot
    Snapshot,
}

impl Format {
    /// `.dat` and `.bin` are snapshots, everything else is text
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("dat") || ext.eq_ignore_ascii_case("bin") => Format::Snapshot,
            _ => Format::Text,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Text => "text",
            Format::Snapshot => "snapshot",
        }
    }
}

/// Load a roster from `path` in the format its extension implies
pub fn load(path: &Path, policy: MalformedPolicy) -> CodecResult<Roster> {
    match Format::from_path(path) {
        Format::Text => Decoder::new().with_policy(policy).decode_file(path),
        Format::Snapshot => snapshot::read(path),
    }
}

/// Save a roster to `path` in the format its extension implies
pub fn save(roster: &Roster, path: &Path) -> CodecResult<()> {
    match Format::from_path(path) {
        Format::Text => Encoder::new().encode_to_file(roster, path),
        Format::Snapshot => snapshot::write(roster, path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::sample_roster;

    #[test]
    fn test_format_from_path() {
        assert_eq!(Format::from_path(Path::new("prisoners.dat")), Format::Snapshot);
        assert_eq!(Format::from_path(Path::new("dir/roster.BIN")), Format::Snapshot);
        assert_eq!(Format::from_path(Path::new("prisoners.txt")), Format::Text);
        assert_eq!(Format::from_path(Path::new("no_extension")), Format::Text);
    }

    #[test]
    fn test_convert_text_to_snapshot_and_back() {
        let dir = tempfile::tempdir().unwrap();
        let text = dir.path().join("a.txt");
        let dat = dir.path().join("a.dat");
        let text_again = dir.path().join("b.txt");

        save(&sample_roster(), &text).unwrap();
        let from_text = load(&text, MalformedPolicy::Abort).unwrap();
        save(&from_text, &dat).unwrap();
        let from_dat = load(&dat, MalformedPolicy::Abort).unwrap();
        save(&from_dat, &text_again).unwrap();

        assert_eq!(from_dat, sample_roster());
        assert_eq!(
            std::fs::read_to_string(&text).unwrap(),
            std::fs::read_to_string(&text_again).unwrap()
        );
    }
}
